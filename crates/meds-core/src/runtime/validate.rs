// crates/meds-core/src/runtime/validate.rs
// ============================================================================
// Module: MEDS Validator
// Description: Typed construction of the design spec from normalized JSON.
// Purpose: Reject irreparable structures and fill still-missing defaults.
// Dependencies: crate::core, crate::runtime::normalize, serde_json
// ============================================================================

//! ## Overview
//! Validation parses rather than checks: a [`SpecWalker`] walks the
//! normalized JSON once, building every typed section of a [`DesignSpec`]
//! while recording each violated constraint with its JSON path. Optional
//! fields that are still missing take the typed defaults; unknown properties
//! are never read and therefore dropped.
//!
//! The result is either a complete, invariant-satisfying spec or the full
//! violation list. It is never a partially valid spec.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde_json::Map;
use serde_json::Value;

use crate::core::identifiers::ComponentId;
use crate::core::spec::A11y;
use crate::core::spec::ColorEntry;
use crate::core::spec::ColorToken;
use crate::core::spec::Component;
use crate::core::spec::ComponentType;
use crate::core::spec::Composition;
use crate::core::spec::ContrastClass;
use crate::core::spec::DEFAULT_COMPONENT_CONFIDENCE;
use crate::core::spec::DEFAULT_FAMILY_CONFIDENCE;
use crate::core::spec::Density;
use crate::core::spec::DesignSpec;
use crate::core::spec::FamilyCandidate;
use crate::core::spec::FocusRing;
use crate::core::spec::Foundations;
use crate::core::spec::Grid;
use crate::core::spec::MAX_FONT_WEIGHT;
use crate::core::spec::MIN_FONT_WEIGHT;
use crate::core::spec::MIN_HIT_AREA_PX;
use crate::core::spec::MIN_TYPE_SCALE_LEN;
use crate::core::spec::MIN_TYPE_SCALE_PX;
use crate::core::spec::Motion;
use crate::core::spec::MotionDurations;
use crate::core::spec::PIXEL_QUANTUM;
use crate::core::spec::PixelValue;
use crate::core::spec::Platform;
use crate::core::spec::SPEC_MODALITY;
use crate::core::spec::SPEC_VERSION;
use crate::core::spec::Spacing;
use crate::core::spec::Typography;
use crate::core::spec::UNKNOWN_SENTINEL;
use crate::core::spec::ViewportProfile;
use crate::core::violation::SpecViolation;
use crate::runtime::normalize::is_valid_easing;
use crate::runtime::normalize::whole_u32;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Validates normalized JSON and fills remaining defaults.
///
/// # Errors
///
/// Returns every violated constraint when the input cannot form a valid spec.
pub fn validate_and_fill(normalized: &Value) -> Result<DesignSpec, Vec<SpecViolation>> {
    let mut walker = SpecWalker::default();
    let spec = walker.design_spec(normalized);
    if walker.violations.is_empty() { Ok(spec) } else { Err(walker.violations) }
}

// ============================================================================
// SECTION: Walker
// ============================================================================

/// Accumulates violations while constructing typed sections.
#[derive(Default)]
struct SpecWalker {
    /// Violations recorded so far.
    violations: Vec<SpecViolation>,
}

/// Joins a JSON pointer path with a child key or index.
fn child(path: &str, key: impl std::fmt::Display) -> String {
    format!("{path}/{key}")
}

/// Returns true for `#RGB`, `#RRGGBB` and `#RRGGBBAA`.
fn is_hex_color(text: &str) -> bool {
    text.strip_prefix('#').is_some_and(|digits| {
        matches!(digits.len(), 3 | 6 | 8) && digits.bytes().all(|byte| byte.is_ascii_hexdigit())
    })
}

impl SpecWalker {
    /// Records a violation.
    fn fail(&mut self, path: &str, message: impl Into<String>) {
        self.violations.push(SpecViolation::new(path, message));
    }

    /// Returns a non-null field, recording a violation when it is missing.
    fn required<'a>(&mut self, map: &'a Map<String, Value>, key: &str, path: &str) -> Option<&'a Value> {
        let value = optional(map, key);
        if value.is_none() {
            self.fail(&child(path, key), "is required");
        }
        value
    }

    /// Requires an object value.
    fn object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
        let map = value.as_object();
        if map.is_none() {
            self.fail(path, "must be an object");
        }
        map
    }

    /// Requires an array value.
    fn array<'a>(&mut self, value: &'a Value, path: &str) -> &'a [Value] {
        match value.as_array() {
            Some(items) => items,
            None => {
                self.fail(path, "must be an array");
                &[]
            }
        }
    }

    /// Requires a string value, optionally non-empty.
    fn text(&mut self, value: &Value, path: &str, allow_empty: bool) -> String {
        match value.as_str() {
            Some(text) if allow_empty || !text.trim().is_empty() => text.to_string(),
            Some(_) => {
                self.fail(path, "must be a non-empty string");
                String::new()
            }
            None => {
                self.fail(path, "must be a string");
                String::new()
            }
        }
    }

    /// Requires an exact string literal.
    fn literal(&mut self, value: Option<&Value>, expected: &str, path: &str) -> String {
        if value.and_then(Value::as_str) != Some(expected) {
            self.fail(path, format!("must equal \"{expected}\""));
        }
        expected.to_string()
    }

    /// Requires an integer within `[min, max]`.
    fn integer(&mut self, value: &Value, path: &str, min: u32, max: u32) -> u32 {
        match value.as_f64().and_then(whole_u32) {
            Some(number) if (min..=max).contains(&number) => number,
            _ => {
                self.fail(path, format!("must be an integer within [{min}, {max}]"));
                min
            }
        }
    }

    /// Reads an optional confidence in `[0, 1]`.
    fn confidence(&mut self, value: Option<&Value>, fallback: f64, path: &str) -> f64 {
        match value {
            None => fallback,
            Some(raw) => match raw.as_f64() {
                Some(number) if (0.0..=1.0).contains(&number) => number,
                _ => {
                    self.fail(path, "must be a number within [0, 1]");
                    fallback
                }
            },
        }
    }

    /// Requires a positive multiple of the pixel quantum.
    fn quantized_px(&mut self, value: &Value, path: &str) -> u32 {
        match value.as_f64().and_then(whole_u32) {
            Some(number) if number >= PIXEL_QUANTUM && number % PIXEL_QUANTUM == 0 => number,
            _ => {
                self.fail(path, format!("must be a positive multiple of {PIXEL_QUANTUM}"));
                PIXEL_QUANTUM
            }
        }
    }

    /// Accepts a quantized pixel value or the unknown sentinel.
    fn quantized_px_or_unknown(&mut self, value: &Value, path: &str) -> PixelValue {
        if value.as_str() == Some(UNKNOWN_SENTINEL) {
            return PixelValue::Unknown;
        }
        PixelValue::Px(self.quantized_px(value, path))
    }

    /// Accepts a positive measurement or the unknown sentinel.
    fn measurement(&mut self, value: &Value, path: &str) -> PixelValue {
        if value.as_str() == Some(UNKNOWN_SENTINEL) {
            return PixelValue::Unknown;
        }
        PixelValue::Px(self.integer(value, path, 1, u32::MAX))
    }

    /// Requires a sorted, deduplicated list of non-negative multiples of 8.
    fn quantized_list(&mut self, value: &Value, path: &str) -> Vec<u32> {
        let mut out: Vec<u32> = Vec::new();
        for (index, item) in self.array(value, path).iter().enumerate() {
            match item.as_f64().and_then(whole_u32) {
                Some(number) if number % PIXEL_QUANTUM == 0 => out.push(number),
                _ => self.fail(
                    &child(path, index),
                    format!("must be a non-negative multiple of {PIXEL_QUANTUM}"),
                ),
            }
        }
        self.require_strictly_ascending(&out, path);
        out
    }

    /// Records a violation unless values are strictly ascending.
    fn require_strictly_ascending(&mut self, values: &[u32], path: &str) {
        if values.windows(2).any(|pair| pair[0] >= pair[1]) {
            self.fail(path, "must be sorted ascending without duplicates");
        }
    }

    /// Parses a closed-enum label.
    fn enumerated<T>(
        &mut self,
        value: &Value,
        path: &str,
        parse: impl Fn(&str) -> Option<T>,
        accepted: &str,
    ) -> Option<T> {
        let parsed = value.as_str().and_then(parse);
        if parsed.is_none() {
            self.fail(path, format!("must be one of: {accepted}"));
        }
        parsed
    }

    // ========================================================================
    // SECTION: Sections
    // ========================================================================

    /// Builds the complete spec.
    fn design_spec(&mut self, value: &Value) -> DesignSpec {
        let empty = Map::new();
        let root = self.object(value, "").unwrap_or(&empty);
        let version = self.literal(root.get("version"), SPEC_VERSION, "/version");
        let modality = self.literal(root.get("modality"), SPEC_MODALITY, "/modality");
        let viewport_profile = self
            .required(root, "viewportProfile", "")
            .map_or_else(ViewportProfile::default, |raw| self.viewport(raw, "/viewportProfile"));
        let foundations = self
            .required(root, "foundations", "")
            .map_or_else(Foundations::default, |raw| self.foundations(raw, "/foundations"));
        let components = self
            .required(root, "components", "")
            .map_or_else(Vec::new, |raw| self.components(raw, "/components"));
        let composition = self
            .required(root, "composition", "")
            .map_or_else(Composition::default, |raw| self.composition(raw, "/composition"));
        DesignSpec {
            version,
            modality,
            viewport_profile,
            foundations,
            components,
            composition,
            ux_rulebook: optional(root, "uxRulebook").cloned(),
            ux_signals: optional(root, "uxSignals").cloned(),
            patterns: None,
            accessibility: None,
            states: None,
        }
    }

    /// Builds the viewport profile.
    fn viewport(&mut self, value: &Value, path: &str) -> ViewportProfile {
        let defaults = ViewportProfile::default();
        let Some(map) = self.object(value, path) else {
            return defaults;
        };
        let platform = self
            .required(map, "platform", path)
            .and_then(|raw| {
                self.enumerated(raw, &child(path, "platform"), Platform::parse, "mobile, tablet, desktop")
            })
            .unwrap_or(defaults.platform);
        let width_px = optional(map, "widthPx")
            .map_or(defaults.width_px, |raw| self.measurement(raw, &child(path, "widthPx")));
        let height_px = optional(map, "heightPx")
            .map_or(defaults.height_px, |raw| self.measurement(raw, &child(path, "heightPx")));
        let confidence =
            self.confidence(optional(map, "confidence"), defaults.confidence, &child(path, "confidence"));
        ViewportProfile {
            platform,
            width_px,
            height_px,
            confidence,
        }
    }

    /// Builds the foundations block.
    fn foundations(&mut self, value: &Value, path: &str) -> Foundations {
        let defaults = Foundations::default();
        let Some(map) = self.object(value, path) else {
            return defaults;
        };
        let color = self
            .required(map, "color", path)
            .map_or_else(Vec::new, |raw| self.colors(raw, &child(path, "color")));
        let typography = self
            .required(map, "typography", path)
            .map_or_else(Typography::default, |raw| self.typography(raw, &child(path, "typography")));
        let spacing = self
            .required(map, "spacing", path)
            .map_or_else(Spacing::default, |raw| self.spacing(raw, &child(path, "spacing")));
        let radius = match optional(map, "radius") {
            Some(raw) => self.quantized_list(raw, &child(path, "radius")),
            None => defaults.radius,
        };
        let shadow = match optional(map, "shadow") {
            Some(raw) => self.shadow(raw, &child(path, "shadow")),
            None => defaults.shadow,
        };
        let motion = match optional(map, "motion") {
            Some(raw) => self.motion(raw, &child(path, "motion")),
            None => defaults.motion,
        };
        let grid = match optional(map, "grid") {
            Some(raw) => self.grid(raw, &child(path, "grid")),
            None => defaults.grid,
        };
        let a11y = match optional(map, "a11y") {
            Some(raw) => self.a11y(raw, &child(path, "a11y")),
            None => defaults.a11y,
        };
        Foundations {
            color,
            typography,
            spacing,
            radius,
            shadow,
            motion,
            grid,
            a11y,
        }
    }

    /// Builds color entries.
    fn colors(&mut self, value: &Value, path: &str) -> Vec<ColorEntry> {
        let mut entries = Vec::new();
        for (index, item) in self.array(value, path).iter().enumerate() {
            let item_path = child(path, index);
            let Some(map) = self.object(item, &item_path) else {
                continue;
            };
            let token = self.required(map, "token", &item_path).and_then(|raw| {
                self.enumerated(raw, &child(&item_path, "token"), ColorToken::parse, "the semantic color tokens")
            });
            let hex = self.required(map, "hex", &item_path).map(|raw| self.hex(raw, &child(&item_path, "hex")));
            let usage = optional(map, "usage")
                .map_or_else(String::new, |raw| self.text(raw, &child(&item_path, "usage"), true));
            if let (Some(token), Some(hex)) = (token, hex) {
                entries.push(ColorEntry {
                    token,
                    hex,
                    usage,
                });
            }
        }
        entries
    }

    /// Requires a hex color string.
    fn hex(&mut self, value: &Value, path: &str) -> String {
        let text = self.text(value, path, false);
        if !text.is_empty() && !is_hex_color(&text) {
            self.fail(path, "must be #RGB, #RRGGBB or #RRGGBBAA");
        }
        text
    }

    /// Builds typography tokens.
    fn typography(&mut self, value: &Value, path: &str) -> Typography {
        let defaults = Typography::default();
        let Some(map) = self.object(value, path) else {
            return defaults;
        };
        let primary_family = self
            .required(map, "primaryFamily", path)
            .map_or_else(String::new, |raw| self.text(raw, &child(path, "primaryFamily"), false));
        let mut family_candidates = Vec::new();
        if let Some(raw) = optional(map, "familyCandidates") {
            let candidates_path = child(path, "familyCandidates");
            for (index, item) in self.array(raw, &candidates_path).iter().enumerate() {
                let item_path = child(&candidates_path, index);
                let Some(candidate) = self.object(item, &item_path) else {
                    continue;
                };
                let family = self
                    .required(candidate, "family", &item_path)
                    .map_or_else(String::new, |raw| self.text(raw, &child(&item_path, "family"), false));
                let confidence = self.confidence(
                    optional(candidate, "confidence"),
                    DEFAULT_FAMILY_CONFIDENCE,
                    &child(&item_path, "confidence"),
                );
                family_candidates.push(FamilyCandidate {
                    family,
                    confidence,
                });
            }
        }
        let scale_px = self
            .required(map, "scalePx", path)
            .map_or_else(Vec::new, |raw| self.type_scale(raw, &child(path, "scalePx")));
        let weights = self
            .required(map, "weights", path)
            .map_or_else(Vec::new, |raw| self.weights(raw, &child(path, "weights")));
        Typography {
            primary_family,
            family_candidates,
            scale_px,
            weights,
        }
    }

    /// Requires at least three distinct ascending sizes of at least 8px.
    fn type_scale(&mut self, value: &Value, path: &str) -> Vec<u32> {
        let mut sizes = Vec::new();
        for (index, item) in self.array(value, path).iter().enumerate() {
            sizes.push(self.integer(item, &child(path, index), MIN_TYPE_SCALE_PX, u32::MAX));
        }
        if sizes.len() < MIN_TYPE_SCALE_LEN {
            self.fail(path, format!("must contain at least {MIN_TYPE_SCALE_LEN} sizes"));
        }
        self.require_strictly_ascending(&sizes, path);
        sizes
    }

    /// Requires a non-empty list of weights within `[300, 800]`.
    fn weights(&mut self, value: &Value, path: &str) -> Vec<u32> {
        let mut weights = Vec::new();
        for (index, item) in self.array(value, path).iter().enumerate() {
            weights.push(self.integer(item, &child(path, index), MIN_FONT_WEIGHT, MAX_FONT_WEIGHT));
        }
        if weights.is_empty() {
            self.fail(path, "must not be empty");
        }
        weights
    }

    /// Builds spacing tokens.
    fn spacing(&mut self, value: &Value, path: &str) -> Spacing {
        let defaults = Spacing::default();
        let Some(map) = self.object(value, path) else {
            return defaults;
        };
        let base_px = self
            .required(map, "basePx", path)
            .map_or(defaults.base_px, |raw| self.quantized_px_or_unknown(raw, &child(path, "basePx")));
        let scale_px = match optional(map, "scalePx") {
            Some(raw) => self.quantized_list(raw, &child(path, "scalePx")),
            None => defaults.scale_px,
        };
        Spacing {
            base_px,
            scale_px,
        }
    }

    /// Requires a map of shadow names to CSS strings.
    fn shadow(&mut self, value: &Value, path: &str) -> BTreeMap<String, String> {
        let mut presets = BTreeMap::new();
        if let Some(map) = self.object(value, path) {
            for (name, preset) in map {
                let css = self.text(preset, &child(path, name), true);
                presets.insert(name.clone(), css);
            }
        }
        presets
    }

    /// Builds motion tokens.
    fn motion(&mut self, value: &Value, path: &str) -> Motion {
        let defaults = Motion::default();
        let Some(map) = self.object(value, path) else {
            return defaults;
        };
        let durations_ms = match optional(map, "durationsMs") {
            Some(raw) => self.durations(raw, &child(path, "durationsMs")),
            None => defaults.durations_ms,
        };
        let easings = match optional(map, "easings") {
            Some(raw) => {
                let easings_path = child(path, "easings");
                let mut easings = Vec::new();
                for (index, item) in self.array(raw, &easings_path).iter().enumerate() {
                    let item_path = child(&easings_path, index);
                    let easing = self.text(item, &item_path, false);
                    if !easing.is_empty() && !is_valid_easing(&easing) {
                        self.fail(&item_path, "must be linear, ease-in, ease-out, ease-in-out or cubic-bezier(...)");
                    }
                    easings.push(easing);
                }
                if easings.is_empty() {
                    self.fail(&easings_path, "must not be empty");
                }
                easings
            }
            None => defaults.easings,
        };
        Motion {
            durations_ms,
            easings,
        }
    }

    /// Builds motion durations.
    fn durations(&mut self, value: &Value, path: &str) -> MotionDurations {
        let defaults = MotionDurations::default();
        let Some(map) = self.object(value, path) else {
            return defaults;
        };
        let fast = optional(map, "fast").map_or(defaults.fast, |raw| self.integer(raw, &child(path, "fast"), 0, u32::MAX));
        let base = optional(map, "base").map_or(defaults.base, |raw| self.integer(raw, &child(path, "base"), 0, u32::MAX));
        let slow = optional(map, "slow").map_or(defaults.slow, |raw| self.integer(raw, &child(path, "slow"), 0, u32::MAX));
        MotionDurations {
            fast,
            base,
            slow,
        }
    }

    /// Builds the layout grid.
    fn grid(&mut self, value: &Value, path: &str) -> Grid {
        let defaults = Grid::default();
        let Some(map) = self.object(value, path) else {
            return defaults;
        };
        let columns = optional(map, "columns")
            .map_or(defaults.columns, |raw| self.integer(raw, &child(path, "columns"), 1, u32::MAX));
        let gutter_px = optional(map, "gutterPx")
            .map_or(defaults.gutter_px, |raw| self.quantized_px_or_unknown(raw, &child(path, "gutterPx")));
        let margin_px = optional(map, "marginPx")
            .map_or(defaults.margin_px, |raw| self.quantized_px_or_unknown(raw, &child(path, "marginPx")));
        let max_width_px = optional(map, "maxWidthPx")
            .map_or(defaults.max_width_px, |raw| self.quantized_px_or_unknown(raw, &child(path, "maxWidthPx")));
        Grid {
            columns,
            gutter_px,
            margin_px,
            max_width_px,
        }
    }

    /// Builds accessibility tokens.
    fn a11y(&mut self, value: &Value, path: &str) -> A11y {
        let defaults = A11y::default();
        let Some(map) = self.object(value, path) else {
            return defaults;
        };
        let min_hit_area_px = match optional(map, "minHitAreaPx") {
            Some(raw) => {
                let area_path = child(path, "minHitAreaPx");
                let area = self.quantized_px(raw, &area_path);
                if area < MIN_HIT_AREA_PX {
                    self.fail(&area_path, format!("must be at least {MIN_HIT_AREA_PX}"));
                }
                area
            }
            None => defaults.min_hit_area_px,
        };
        let focus_ring = match optional(map, "focusRing") {
            Some(raw) => self.focus_ring(raw, &child(path, "focusRing")),
            None => defaults.focus_ring,
        };
        let contrast = optional(map, "contrast")
            .and_then(|raw| self.enumerated(raw, &child(path, "contrast"), parse_contrast, "AA, AAA"))
            .unwrap_or(defaults.contrast);
        A11y {
            min_hit_area_px,
            focus_ring,
            contrast,
        }
    }

    /// Builds the focus ring.
    fn focus_ring(&mut self, value: &Value, path: &str) -> FocusRing {
        let defaults = FocusRing::default();
        let Some(map) = self.object(value, path) else {
            return defaults;
        };
        let width_px = optional(map, "widthPx")
            .map_or(defaults.width_px, |raw| self.integer(raw, &child(path, "widthPx"), 1, u32::MAX));
        let style =
            optional(map, "style").map_or_else(|| defaults.style.clone(), |raw| self.text(raw, &child(path, "style"), false));
        let color =
            optional(map, "color").map_or_else(|| defaults.color.clone(), |raw| self.hex(raw, &child(path, "color")));
        FocusRing {
            width_px,
            style,
            color,
        }
    }

    /// Builds the component inventory.
    fn components(&mut self, value: &Value, path: &str) -> Vec<Component> {
        let mut components = Vec::new();
        let mut seen_ids = BTreeSet::new();
        for (index, item) in self.array(value, path).iter().enumerate() {
            let item_path = child(path, index);
            let Some(map) = self.object(item, &item_path) else {
                continue;
            };
            let id = self
                .required(map, "id", &item_path)
                .map_or_else(String::new, |raw| self.text(raw, &child(&item_path, "id"), false));
            if !id.is_empty() && !seen_ids.insert(id.clone()) {
                self.fail(&child(&item_path, "id"), format!("duplicate component id: {id}"));
            }
            let component_type = self.required(map, "type", &item_path).and_then(|raw| {
                self.enumerated(raw, &child(&item_path, "type"), ComponentType::parse, "the component archetypes")
            });
            let variants = optional(map, "variants")
                .map_or_else(Vec::new, |raw| self.labels(raw, &child(&item_path, "variants")));
            let states = optional(map, "states")
                .map_or_else(Vec::new, |raw| self.labels(raw, &child(&item_path, "states")));
            let style = match optional(map, "style") {
                Some(raw) => self.object(raw, &child(&item_path, "style")).cloned(),
                None => None,
            };
            let confidence = self.confidence(
                optional(map, "confidence"),
                DEFAULT_COMPONENT_CONFIDENCE,
                &child(&item_path, "confidence"),
            );
            if let Some(component_type) = component_type {
                components.push(Component {
                    id: ComponentId::new(id),
                    component_type,
                    variants,
                    states,
                    style,
                    confidence,
                });
            }
        }
        components
    }

    /// Requires a list of string labels.
    fn labels(&mut self, value: &Value, path: &str) -> Vec<String> {
        let mut labels = Vec::new();
        for (index, item) in self.array(value, path).iter().enumerate() {
            labels.push(self.text(item, &child(path, index), true));
        }
        labels
    }

    /// Builds page composition.
    fn composition(&mut self, value: &Value, path: &str) -> Composition {
        let defaults = Composition::default();
        let Some(map) = self.object(value, path) else {
            return defaults;
        };
        let page_gap_px = optional(map, "pageGapPx")
            .map_or(defaults.page_gap_px, |raw| self.quantized_px_or_unknown(raw, &child(path, "pageGapPx")));
        let section_gap_px = optional(map, "sectionGapPx")
            .map_or(defaults.section_gap_px, |raw| self.quantized_px_or_unknown(raw, &child(path, "sectionGapPx")));
        let card_gap_px = optional(map, "cardGapPx")
            .map_or(defaults.card_gap_px, |raw| self.quantized_px_or_unknown(raw, &child(path, "cardGapPx")));
        let density = optional(map, "density")
            .and_then(|raw| self.enumerated(raw, &child(path, "density"), parse_density, "comfortable, compact"))
            .unwrap_or(defaults.density);
        Composition {
            page_gap_px,
            section_gap_px,
            card_gap_px,
            density,
        }
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns a non-null field.
fn optional<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

/// Parses a contrast class label.
fn parse_contrast(label: &str) -> Option<ContrastClass> {
    match label {
        "AA" => Some(ContrastClass::Aa),
        "AAA" => Some(ContrastClass::Aaa),
        _ => None,
    }
}

/// Parses a density label.
fn parse_density(label: &str) -> Option<Density> {
    match label {
        "comfortable" => Some(Density::Comfortable),
        "compact" => Some(Density::Compact),
        _ => None,
    }
}
