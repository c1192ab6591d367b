// crates/meds-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Spec Store
// Description: Durable SpecStore backed by SQLite.
// Purpose: Persist integrated specs with deterministic serialization.
// Dependencies: meds-core, rusqlite, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`SpecStore`] using `SQLite`. Each save
//! appends a canonical JSON snapshot to a version table keyed by [`SpecId`].
//! Loads verify the stored hash, then recompute the content-derived id of the
//! decoded spec and fail closed when either check disagrees.
//! Security posture: database contents are untrusted.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use meds_core::DesignSpec;
use meds_core::SpecId;
use meds_core::SpecStore;
use meds_core::StoreError;
use meds_core::hashing::DEFAULT_HASH_ALGORITHM;
use meds_core::hashing::HashAlgorithm;
use meds_core::hashing::canonical_json_bytes;
use meds_core::hashing::hash_bytes;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use rusqlite::params;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Maximum canonical spec snapshot size accepted by the store.
pub const MAX_SPEC_BYTES: usize = 4 * 1024 * 1024;

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode.
    #[default]
    Wal,
    /// Delete journal mode.
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode.
    #[default]
    Full,
    /// Normal synchronous mode.
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` spec store.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
    /// Optional maximum snapshots kept per spec id.
    #[serde(default)]
    pub max_versions: Option<u64>,
}

impl SqliteStoreConfig {
    /// Returns a config for `path` with default pragmas and no retention.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
            max_versions: None,
        }
    }
}

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
#[derive(Debug, Error)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Store corruption or hash mismatch.
    #[error("sqlite store corruption: {0}")]
    Corrupt(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
    /// Snapshot exceeded the size limit.
    #[error("sqlite store payload too large: {actual_bytes} bytes (max {max_bytes})")]
    TooLarge {
        /// Maximum allowed bytes.
        max_bytes: usize,
        /// Actual payload size in bytes.
        actual_bytes: usize,
    },
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Store(message),
            SqliteStoreError::Corrupt(message) => Self::Corrupt(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
            SqliteStoreError::TooLarge {
                max_bytes,
                actual_bytes,
            } => Self::Invalid(format!(
                "spec_json exceeds size limit: {actual_bytes} bytes (max {max_bytes})"
            )),
        }
    }
}

/// Maps a `rusqlite` error into a store error.
fn db_error(err: &rusqlite::Error) -> SqliteStoreError {
    SqliteStoreError::Db(err.to_string())
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed spec store.
#[derive(Clone)]
pub struct SqliteSpecStore {
    /// Store configuration.
    config: SqliteStoreConfig,
    /// Shared `SQLite` connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteSpecStore {
    /// Opens an `SQLite`-backed spec store, creating the schema on first use.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the database cannot be opened or
    /// initialized, or the config is invalid.
    pub fn new(config: SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        if config.max_versions == Some(0) {
            return Err(SqliteStoreError::Invalid(
                "max_versions must be greater than zero".to_string(),
            ));
        }
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let mut connection = open_connection(&config)?;
        initialize_schema(&mut connection)?;
        Ok(Self {
            config,
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Returns the number of snapshots retained for `spec_id`.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the query fails.
    pub fn version_count(&self, spec_id: &SpecId) -> Result<u64, SqliteStoreError> {
        let guard =
            self.connection.lock().map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))?;
        let count: i64 = guard
            .query_row(
                "SELECT COUNT(*) FROM spec_versions WHERE spec_id = ?1",
                params![spec_id.as_str()],
                |row| row.get(0),
            )
            .map_err(|err| db_error(&err))?;
        drop(guard);
        u64::try_from(count).map_err(|_| SqliteStoreError::Corrupt("negative version count".to_string()))
    }
}

impl SpecStore for SqliteSpecStore {
    fn load(&self, spec_id: &SpecId) -> Result<Option<DesignSpec>, StoreError> {
        self.load_spec(spec_id).map_err(StoreError::from)
    }

    fn save(&self, spec_id: &SpecId, spec: &DesignSpec) -> Result<(), StoreError> {
        self.save_spec(spec_id, spec).map_err(StoreError::from)
    }
}

impl SqliteSpecStore {
    /// Loads the latest snapshot for the provided spec identifier.
    fn load_spec(&self, spec_id: &SpecId) -> Result<Option<DesignSpec>, SqliteStoreError> {
        let row = {
            let mut guard = self
                .connection
                .lock()
                .map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))?;
            let tx = guard.transaction().map_err(|err| db_error(&err))?;
            let row = match latest_version(&tx, spec_id)? {
                Some(version) => Some(read_snapshot(&tx, spec_id, version)?),
                None => None,
            };
            tx.commit().map_err(|err| db_error(&err))?;
            drop(guard);
            row
        };
        let Some((bytes, hash_value, hash_algorithm)) = row else {
            return Ok(None);
        };
        let algorithm = parse_hash_algorithm(&hash_algorithm)?;
        let expected = hash_bytes(algorithm, &bytes);
        if expected.value != hash_value {
            return Err(SqliteStoreError::Corrupt(format!(
                "hash mismatch for spec {}",
                spec_id.as_str()
            )));
        }
        let spec: DesignSpec = serde_json::from_slice(&bytes)
            .map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
        if content_spec_id(&spec)? != *spec_id {
            return Err(SqliteStoreError::Invalid(
                "spec_id mismatch between key and payload".to_string(),
            ));
        }
        Ok(Some(spec))
    }

    /// Appends a snapshot of `spec` under `spec_id`.
    fn save_spec(&self, spec_id: &SpecId, spec: &DesignSpec) -> Result<(), SqliteStoreError> {
        let canonical_json =
            canonical_json_bytes(spec).map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
        if canonical_json.len() > MAX_SPEC_BYTES {
            return Err(SqliteStoreError::TooLarge {
                max_bytes: MAX_SPEC_BYTES,
                actual_bytes: canonical_json.len(),
            });
        }
        let digest = hash_bytes(DEFAULT_HASH_ALGORITHM, &canonical_json);
        if digest.to_spec_id() != *spec_id {
            return Err(SqliteStoreError::Invalid(format!(
                "spec_id {} does not match spec content",
                spec_id.as_str()
            )));
        }
        let saved_at = unix_millis();
        let mut guard =
            self.connection.lock().map_err(|_| SqliteStoreError::Db("mutex poisoned".to_string()))?;
        let tx = guard.transaction().map_err(|err| db_error(&err))?;
        let next_version = match latest_version(&tx, spec_id)? {
            None => 1,
            Some(value) => value.checked_add(1).ok_or_else(|| {
                SqliteStoreError::Corrupt(format!(
                    "spec version overflow for spec {}",
                    spec_id.as_str()
                ))
            })?,
        };
        tx.execute(
            "INSERT INTO specs (spec_id, latest_version) VALUES (?1, ?2) ON CONFLICT(spec_id) DO \
             UPDATE SET latest_version = excluded.latest_version",
            params![spec_id.as_str(), next_version],
        )
        .map_err(|err| db_error(&err))?;
        tx.execute(
            "INSERT INTO spec_versions (spec_id, version, spec_json, spec_hash, hash_algorithm, \
             saved_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                spec_id.as_str(),
                next_version,
                canonical_json,
                digest.value,
                digest.algorithm.label(),
                saved_at
            ],
        )
        .map_err(|err| db_error(&err))?;
        enforce_retention(&tx, spec_id.as_str(), next_version, self.config.max_versions)?;
        tx.commit().map_err(|err| db_error(&err))?;
        drop(guard);
        Ok(())
    }
}

// ============================================================================
// SECTION: Queries
// ============================================================================

/// Returns the latest stored version for `spec_id`, rejecting invalid values.
fn latest_version(tx: &Transaction<'_>, spec_id: &SpecId) -> Result<Option<i64>, SqliteStoreError> {
    let latest: Option<i64> = tx
        .query_row(
            "SELECT latest_version FROM specs WHERE spec_id = ?1",
            params![spec_id.as_str()],
            |row| row.get(0),
        )
        .optional()
        .map_err(|err| db_error(&err))?;
    match latest {
        Some(value) if value < 1 => Err(SqliteStoreError::Corrupt(format!(
            "invalid latest_version for spec {}",
            spec_id.as_str()
        ))),
        other => Ok(other),
    }
}

/// Reads one snapshot row after checking its length against the size limit.
fn read_snapshot(
    tx: &Transaction<'_>,
    spec_id: &SpecId,
    version: i64,
) -> Result<(Vec<u8>, String, String), SqliteStoreError> {
    let metadata = tx
        .query_row(
            "SELECT length(spec_json), spec_hash, hash_algorithm FROM spec_versions WHERE \
             spec_id = ?1 AND version = ?2",
            params![spec_id.as_str(), version],
            |row| {
                let length: i64 = row.get(0)?;
                let hash: String = row.get(1)?;
                let algorithm: String = row.get(2)?;
                Ok((length, hash, algorithm))
            },
        )
        .optional()
        .map_err(|err| db_error(&err))?;
    let Some((length, hash, algorithm)) = metadata else {
        return Err(SqliteStoreError::Corrupt(format!(
            "missing version {version} for spec {}",
            spec_id.as_str()
        )));
    };
    let length = usize::try_from(length).map_err(|_| {
        SqliteStoreError::Invalid(format!("negative spec length for spec {}", spec_id.as_str()))
    })?;
    if length > MAX_SPEC_BYTES {
        return Err(SqliteStoreError::TooLarge {
            max_bytes: MAX_SPEC_BYTES,
            actual_bytes: length,
        });
    }
    let bytes: Vec<u8> = tx
        .query_row(
            "SELECT spec_json FROM spec_versions WHERE spec_id = ?1 AND version = ?2",
            params![spec_id.as_str(), version],
            |row| row.get(0),
        )
        .map_err(|err| db_error(&err))?;
    Ok((bytes, hash, algorithm))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Recomputes the content-derived id of a decoded spec.
fn content_spec_id(spec: &DesignSpec) -> Result<SpecId, SqliteStoreError> {
    let bytes =
        canonical_json_bytes(spec).map_err(|err| SqliteStoreError::Invalid(err.to_string()))?;
    Ok(hash_bytes(DEFAULT_HASH_ALGORITHM, &bytes).to_spec_id())
}

/// Ensures the parent directory for the store exists.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    let Some(parent) = path.parent() else {
        return Err(SqliteStoreError::Io("store path missing parent directory".to_string()));
    };
    if parent.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))
}

/// Validates store paths for safety limits.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let path_string = path.display().to_string();
    if path_string.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid("store path exceeds length limit".to_string()));
    }
    for component in path.components() {
        let name = component.as_os_str().to_string_lossy();
        if name.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(
                "store path contains an overlong component".to_string(),
            ));
        }
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(
            "store path must be a file, not a directory".to_string(),
        ));
    }
    Ok(())
}

/// Opens an `SQLite` connection and applies the configured pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
    let connection =
        Connection::open_with_flags(&config.path, flags).map_err(|err| db_error(&err))?;
    connection.execute_batch("PRAGMA foreign_keys = ON;").map_err(|err| db_error(&err))?;
    connection
        .execute_batch(&format!("PRAGMA journal_mode = {};", config.journal_mode.pragma_value()))
        .map_err(|err| db_error(&err))?;
    connection
        .execute_batch(&format!("PRAGMA synchronous = {};", config.sync_mode.pragma_value()))
        .map_err(|err| db_error(&err))?;
    connection
        .busy_timeout(Duration::from_millis(config.busy_timeout_ms))
        .map_err(|err| db_error(&err))?;
    Ok(connection)
}

/// Initializes the `SQLite` schema or validates the existing version.
fn initialize_schema(connection: &mut Connection) -> Result<(), SqliteStoreError> {
    let tx = connection.transaction().map_err(|err| db_error(&err))?;
    tx.execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| db_error(&err))?;
    let version: Option<i64> = tx
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| db_error(&err))?;
    match version {
        None => {
            tx.execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| db_error(&err))?;
            tx.execute_batch(
                "CREATE TABLE IF NOT EXISTS specs (
                    spec_id TEXT PRIMARY KEY,
                    latest_version INTEGER NOT NULL
                );
                CREATE TABLE IF NOT EXISTS spec_versions (
                    spec_id TEXT NOT NULL,
                    version INTEGER NOT NULL,
                    spec_json BLOB NOT NULL,
                    spec_hash TEXT NOT NULL,
                    hash_algorithm TEXT NOT NULL,
                    saved_at INTEGER NOT NULL,
                    PRIMARY KEY (spec_id, version),
                    FOREIGN KEY (spec_id) REFERENCES specs(spec_id) ON DELETE CASCADE
                );",
            )
            .map_err(|err| db_error(&err))?;
        }
        Some(value) if value == SCHEMA_VERSION => {}
        Some(value) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {value}"
            )));
        }
    }
    tx.commit().map_err(|err| db_error(&err))?;
    Ok(())
}

/// Drops snapshots older than the retention window.
fn enforce_retention(
    tx: &Transaction<'_>,
    spec_id: &str,
    latest_version: i64,
    max_versions: Option<u64>,
) -> Result<(), SqliteStoreError> {
    let Some(max_versions) = max_versions else {
        return Ok(());
    };
    let max_versions = i64::try_from(max_versions)
        .map_err(|_| SqliteStoreError::Invalid("max_versions too large".to_string()))?;
    if latest_version > max_versions {
        let min_version = latest_version - max_versions + 1;
        tx.execute(
            "DELETE FROM spec_versions WHERE spec_id = ?1 AND version < ?2",
            params![spec_id, min_version],
        )
        .map_err(|err| db_error(&err))?;
    }
    Ok(())
}

/// Returns the current unix epoch in milliseconds.
fn unix_millis() -> i64 {
    let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
    i64::try_from(now.as_millis()).unwrap_or(i64::MAX)
}

/// Parses a stored hash algorithm label.
fn parse_hash_algorithm(label: &str) -> Result<HashAlgorithm, SqliteStoreError> {
    HashAlgorithm::from_label(label)
        .ok_or_else(|| SqliteStoreError::Invalid(format!("unsupported hash algorithm: {label}")))
}
