// crates/meds-core/src/runtime/normalize.rs
// ============================================================================
// Module: MEDS Normalizer
// Description: Best-effort repair of untrusted AI design output.
// Purpose: Maximize the chance that raw JSON passes validation.
// Dependencies: crate::core, regex-lite, serde_json
// ============================================================================

//! ## Overview
//! [`normalize`] is total: it never fails and always returns an object. Every
//! required section is guaranteed present by injecting the typed defaults from
//! [`crate::core::spec`] when a field is absent, `null`, or the wrong type.
//!
//! Scalar pixel fields follow one rule: absent or non-scalar values take the
//! default, positive numbers are quantized to 8px (floored at 8), and strings
//! or non-positive numbers pass through untouched for the validator to judge.
//! List-valued pixel fields keep only non-negative numbers, quantized, sorted,
//! and deduplicated.
//!
//! Normalization is idempotent: `normalize(&normalize(x)) == normalize(x)`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex_lite::Regex;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::core::schema::EASING_PATTERN;
use crate::core::spec::A11y;
use crate::core::spec::ColorToken;
use crate::core::spec::ComponentType;
use crate::core::spec::Composition;
use crate::core::spec::DEFAULT_COMPONENT_CONFIDENCE;
use crate::core::spec::DEFAULT_FAMILY_CONFIDENCE;
use crate::core::spec::FALLBACK_EASING;
use crate::core::spec::FALLBACK_TYPE_SCALE_PX;
use crate::core::spec::FALLBACK_WEIGHTS;
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
use crate::core::spec::SPEC_MODALITY;
use crate::core::spec::SPEC_VERSION;
use crate::core::spec::Spacing;
use crate::core::spec::Typography;
use crate::core::spec::UNKNOWN_SENTINEL;
use crate::core::spec::ViewportProfile;
use crate::core::spec::default_color_palette;

// ============================================================================
// SECTION: Remap Tables
// ============================================================================

/// Common AI color token spellings mapped onto the closed vocabulary.
const COLOR_TOKEN_REMAP: &[(&str, ColorToken)] = &[
    ("background", ColorToken::Surface),
    ("foreground", ColorToken::Text),
    ("card-background", ColorToken::SurfaceAlt),
    ("card", ColorToken::SurfaceAlt),
    ("cardBackground", ColorToken::SurfaceAlt),
    ("muted", ColorToken::TextMuted),
    ("muted-foreground", ColorToken::TextMuted),
    ("text-secondary", ColorToken::TextMuted),
    ("secondaryText", ColorToken::TextMuted),
    ("error", ColorToken::Danger),
    ("destructive", ColorToken::Danger),
    ("outline", ColorToken::Border),
    ("divider", ColorToken::Border),
    ("stroke", ColorToken::Border),
    ("highlight", ColorToken::Accent),
    ("tertiary", ColorToken::Accent),
    ("backdrop", ColorToken::Overlay),
    ("scrim", ColorToken::Overlay),
    ("positive", ColorToken::Success),
    ("caution", ColorToken::Warning),
    ("brand", ColorToken::Primary),
];

/// Component type spellings keyed by lowercase alphanumeric form.
const COMPONENT_TYPE_REMAP: &[(&str, ComponentType)] = &[
    ("appbar", ComponentType::AppBar),
    ("header", ComponentType::AppBar),
    ("topbar", ComponentType::AppBar),
    ("navbar", ComponentType::NavBar),
    ("nav", ComponentType::NavBar),
    ("navigation", ComponentType::NavBar),
    ("navigationbar", ComponentType::NavBar),
    ("sidebar", ComponentType::Sidebar),
    ("sidenav", ComponentType::Sidebar),
    ("drawer", ComponentType::Drawer),
    ("tabs", ComponentType::Tabs),
    ("tab", ComponentType::Tabs),
    ("tabbar", ComponentType::Tabs),
    ("breadcrumbs", ComponentType::Breadcrumbs),
    ("breadcrumb", ComponentType::Breadcrumbs),
    ("toolbar", ComponentType::Toolbar),
    ("button", ComponentType::Button),
    ("btn", ComponentType::Button),
    ("cta", ComponentType::Button),
    ("iconbutton", ComponentType::IconButton),
    ("fab", ComponentType::Fab),
    ("floatingactionbutton", ComponentType::Fab),
    ("textfield", ComponentType::TextField),
    ("input", ComponentType::TextField),
    ("textinput", ComponentType::TextField),
    ("search", ComponentType::TextField),
    ("searchbar", ComponentType::TextField),
    ("textarea", ComponentType::TextArea),
    ("select", ComponentType::Select),
    ("dropdown", ComponentType::Select),
    ("combobox", ComponentType::Select),
    ("checkbox", ComponentType::Checkbox),
    ("radiogroup", ComponentType::RadioGroup),
    ("radio", ComponentType::RadioGroup),
    ("switch", ComponentType::Switch),
    ("toggle", ComponentType::Switch),
    ("table", ComponentType::Table),
    ("datatable", ComponentType::Table),
    ("list", ComponentType::List),
    ("listitem", ComponentType::ListItem),
    ("row", ComponentType::ListItem),
    ("card", ComponentType::Card),
    ("modal", ComponentType::Modal),
    ("dialog", ComponentType::Modal),
    ("alert", ComponentType::Alert),
    ("toast", ComponentType::Alert),
    ("snackbar", ComponentType::Alert),
    ("banner", ComponentType::Alert),
    ("notification", ComponentType::Alert),
    ("badge", ComponentType::Badge),
    ("chip", ComponentType::Badge),
    ("tag", ComponentType::Badge),
    ("pill", ComponentType::Badge),
    ("avatar", ComponentType::Avatar),
    ("image", ComponentType::Image),
    ("img", ComponentType::Image),
];

// ============================================================================
// SECTION: Quantization
// ============================================================================

/// Rounds a pixel measurement to the nearest multiple of 8.
#[must_use]
pub fn quantize8(value: f64) -> f64 {
    let quantum = f64::from(PIXEL_QUANTUM);
    (value / quantum).round() * quantum
}

/// Converts a finite, non-negative whole number into a `u32`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Value is checked to be finite, non-negative, integral, and within u32 range."
)]
pub(crate) fn whole_u32(value: f64) -> Option<u32> {
    let in_range = value.is_finite() && value >= 0.0 && value <= f64::from(u32::MAX);
    if in_range && value.fract() == 0.0 { Some(value as u32) } else { None }
}

/// Renders a number as an integer JSON value when possible.
fn number_value(value: f64) -> Value {
    whole_u32(value).map_or_else(
        || serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number),
        Value::from,
    )
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// Repairs raw AI output into a shape the validator can accept.
#[must_use]
pub fn normalize(raw: &Value) -> Value {
    let mut root = raw.as_object().cloned().unwrap_or_default();

    // Both literals are fixed; whatever the model emitted is replaced.
    root.insert("version".to_string(), Value::from(SPEC_VERSION));
    root.insert("modality".to_string(), Value::from(SPEC_MODALITY));

    let viewport = normalize_viewport(root.get("viewportProfile"));
    root.insert("viewportProfile".to_string(), viewport);
    let foundations = normalize_foundations(root.get("foundations"));
    root.insert("foundations".to_string(), foundations);
    let components = normalize_components(root.get("components"));
    root.insert("components".to_string(), components);
    let composition = normalize_composition(root.get("composition"));
    root.insert("composition".to_string(), composition);

    for passthrough in ["uxRulebook", "uxSignals"] {
        if root.get(passthrough).is_some_and(Value::is_null) {
            root.remove(passthrough);
        }
    }
    Value::Object(root)
}

// ============================================================================
// SECTION: Shared Helpers
// ============================================================================

/// Serializes a typed default into JSON.
fn default_json<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

/// Returns the field as an object when it is one.
fn object_at<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Map<String, Value>> {
    map.get(key).and_then(Value::as_object)
}

/// Returns a trimmed, non-empty string field.
fn trimmed_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::trim).filter(|text| !text.is_empty()).map(str::to_string)
}

/// Clamps a numeric confidence into `[0, 1]`, or returns the fallback.
fn clamp_confidence(value: Option<&Value>, fallback: f64) -> Value {
    let confidence = value.and_then(Value::as_f64).filter(|number| number.is_finite());
    number_value(confidence.map_or(fallback, |number| number.clamp(0.0, 1.0)))
}

/// Normalizes a scalar pixel field that must be a positive multiple of 8.
fn normalize_scalar_px(value: Option<&Value>, default: Value) -> Value {
    match value {
        None | Some(Value::Null) => default,
        Some(Value::Number(number)) => match number.as_f64() {
            Some(raw) if raw > 0.0 => number_value(quantize8(raw).max(f64::from(PIXEL_QUANTUM))),
            _ => Value::Number(number.clone()),
        },
        Some(Value::String(text)) => Value::String(text.clone()),
        Some(_) => default,
    }
}

/// Normalizes a list of pixel values into sorted, deduplicated multiples of 8.
fn normalize_px_list<'a>(values: impl IntoIterator<Item = &'a Value>) -> Value {
    let quantized: BTreeSet<u32> = values
        .into_iter()
        .filter_map(Value::as_f64)
        .filter(|raw| *raw >= 0.0)
        .filter_map(|raw| whole_u32(quantize8(raw)))
        .collect();
    Value::Array(quantized.into_iter().map(Value::from).collect())
}

/// Reads a numeric value from a number or a numeric string.
fn lenient_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

// ============================================================================
// SECTION: Viewport
// ============================================================================

/// Normalizes the viewport profile.
fn normalize_viewport(value: Option<&Value>) -> Value {
    let Some(map) = value.and_then(Value::as_object) else {
        return default_json(&ViewportProfile::default());
    };
    let defaults = ViewportProfile::default();
    let mut out = Map::new();
    let platform = map
        .get("platform")
        .and_then(Value::as_str)
        .map_or_else(|| defaults.platform.as_str().to_string(), |text| text.trim().to_lowercase());
    out.insert("platform".to_string(), Value::from(platform));
    for key in ["widthPx", "heightPx"] {
        out.insert(key.to_string(), normalize_measurement(map.get(key)));
    }
    out.insert("confidence".to_string(), clamp_confidence(map.get("confidence"), defaults.confidence));
    Value::Object(out)
}

/// Normalizes a viewport measurement (rounded, not quantized).
fn normalize_measurement(value: Option<&Value>) -> Value {
    match value.and_then(Value::as_f64) {
        Some(raw) if raw > 0.0 => number_value(raw.round().max(1.0)),
        _ => Value::from(UNKNOWN_SENTINEL),
    }
}

// ============================================================================
// SECTION: Foundations
// ============================================================================

/// Normalizes the foundations block.
fn normalize_foundations(value: Option<&Value>) -> Value {
    let Some(map) = value.and_then(Value::as_object) else {
        return default_json(&Foundations::default());
    };
    let mut out = map.clone();
    out.insert("color".to_string(), normalize_colors(map.get("color")));
    out.insert("typography".to_string(), normalize_typography(map.get("typography")));
    out.insert("spacing".to_string(), normalize_spacing(map.get("spacing")));
    out.insert("radius".to_string(), normalize_radius(map.get("radius")));
    out.insert("shadow".to_string(), normalize_shadow(map.get("shadow")));
    out.insert("motion".to_string(), normalize_motion(map.get("motion")));
    out.insert("grid".to_string(), normalize_grid(map.get("grid")));
    out.insert("a11y".to_string(), normalize_a11y(map.get("a11y")));
    Value::Object(out)
}

/// Normalizes color entries and remaps common token spellings.
fn normalize_colors(value: Option<&Value>) -> Value {
    let Some(entries) = value.and_then(Value::as_array) else {
        return default_json(&default_color_palette());
    };
    let normalized = entries
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            let mut out = entry.clone();
            if let Some(token) = entry.get("token").and_then(Value::as_str) {
                out.insert("token".to_string(), Value::from(remap_color_token(token)));
            }
            if let Some(hex) = entry.get("hex").and_then(Value::as_str) {
                out.insert("hex".to_string(), Value::from(repair_hex(hex)));
            }
            if !entry.get("usage").is_some_and(Value::is_string) {
                out.insert("usage".to_string(), Value::from(""));
            }
            Value::Object(out)
        })
        .collect();
    Value::Array(normalized)
}

/// Maps a token onto the closed vocabulary; unknown tokens pass through.
fn remap_color_token(token: &str) -> String {
    let token = token.trim();
    if ColorToken::parse(token).is_some() {
        return token.to_string();
    }
    COLOR_TOKEN_REMAP
        .iter()
        .find(|(alias, _)| *alias == token)
        .map_or_else(|| token.to_string(), |(_, mapped)| mapped.as_str().to_string())
}

/// Trims a hex color and restores a missing leading `#`.
fn repair_hex(hex: &str) -> String {
    let hex = hex.trim();
    let bare_digits = matches!(hex.len(), 3 | 6 | 8) && hex.bytes().all(|byte| byte.is_ascii_hexdigit());
    if bare_digits { format!("#{hex}") } else { hex.to_string() }
}

/// Normalizes typography tokens.
fn normalize_typography(value: Option<&Value>) -> Value {
    let Some(map) = value.and_then(Value::as_object) else {
        return default_json(&Typography::default());
    };
    let defaults = Typography::default();
    let mut out = map.clone();

    let declared_primary = trimmed_string(map.get("primaryFamily"));
    let candidates: Vec<Value> = match map.get("familyCandidates").and_then(Value::as_array) {
        Some(entries) => entries.iter().filter_map(normalize_family_candidate).collect(),
        None => {
            let family = declared_primary.clone().unwrap_or_else(|| defaults.primary_family.clone());
            vec![family_candidate(family, DEFAULT_FAMILY_CONFIDENCE)]
        }
    };
    let primary = declared_primary
        .or_else(|| {
            candidates.first().and_then(|candidate| trimmed_string(candidate.get("family")))
        })
        .unwrap_or(defaults.primary_family);
    out.insert("primaryFamily".to_string(), Value::from(primary));
    out.insert("familyCandidates".to_string(), Value::Array(candidates));
    out.insert("scalePx".to_string(), normalize_type_scale(map.get("scalePx")));
    out.insert("weights".to_string(), normalize_weights(map.get("weights")));
    Value::Object(out)
}

/// Builds a `{family, confidence}` object.
fn family_candidate(family: String, confidence: f64) -> Value {
    let mut out = Map::new();
    out.insert("family".to_string(), Value::from(family));
    out.insert("confidence".to_string(), number_value(confidence));
    Value::Object(out)
}

/// Rewrites a bare string or partial object into a family candidate.
fn normalize_family_candidate(entry: &Value) -> Option<Value> {
    match entry {
        Value::String(_) => {
            trimmed_string(Some(entry)).map(|family| family_candidate(family, DEFAULT_FAMILY_CONFIDENCE))
        }
        Value::Object(map) => {
            let family = trimmed_string(map.get("family"))?;
            let confidence = clamp_confidence(map.get("confidence"), DEFAULT_FAMILY_CONFIDENCE);
            let mut out = Map::new();
            out.insert("family".to_string(), Value::from(family));
            out.insert("confidence".to_string(), confidence);
            Some(Value::Object(out))
        }
        _ => None,
    }
}

/// Rounds, filters, sorts, and deduplicates the type scale.
fn normalize_type_scale(value: Option<&Value>) -> Value {
    let sizes: BTreeSet<u32> = value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(lenient_number)
                .filter_map(|raw| whole_u32(raw.round()))
                .filter(|size| *size >= MIN_TYPE_SCALE_PX)
                .collect()
        })
        .unwrap_or_default();
    let sizes: Vec<u32> = if sizes.len() < MIN_TYPE_SCALE_LEN {
        FALLBACK_TYPE_SCALE_PX.to_vec()
    } else {
        sizes.into_iter().collect()
    };
    Value::Array(sizes.into_iter().map(Value::from).collect())
}

/// Drops weights outside `[300, 800]`; falls back to `[400]` when empty.
fn normalize_weights(value: Option<&Value>) -> Value {
    let weights: BTreeSet<u32> = value
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(lenient_number)
                .filter_map(|raw| whole_u32(raw.round()))
                .filter(|weight| (MIN_FONT_WEIGHT..=MAX_FONT_WEIGHT).contains(weight))
                .collect()
        })
        .unwrap_or_default();
    let weights: Vec<u32> =
        if weights.is_empty() { FALLBACK_WEIGHTS.to_vec() } else { weights.into_iter().collect() };
    Value::Array(weights.into_iter().map(Value::from).collect())
}

/// Normalizes spacing tokens.
fn normalize_spacing(value: Option<&Value>) -> Value {
    let defaults = Spacing::default();
    let Some(map) = value.and_then(Value::as_object) else {
        return default_json(&defaults);
    };
    let mut out = map.clone();
    out.insert("basePx".to_string(), normalize_scalar_px(map.get("basePx"), default_json(&defaults.base_px)));
    let scale = match map.get("scalePx").and_then(Value::as_array) {
        Some(entries) => normalize_px_list(entries),
        None => default_json(&defaults.scale_px),
    };
    out.insert("scalePx".to_string(), scale);
    Value::Object(out)
}

/// Normalizes radii, flattening an object of named radii.
fn normalize_radius(value: Option<&Value>) -> Value {
    match value {
        Some(Value::Array(entries)) => normalize_px_list(entries),
        Some(Value::Object(named)) => normalize_px_list(named.values()),
        Some(number @ Value::Number(_)) => normalize_px_list([number]),
        _ => default_json(&Foundations::default().radius),
    }
}

/// Coerces shadows into a map of CSS strings.
fn normalize_shadow(value: Option<&Value>) -> Value {
    let Some(map) = value.and_then(Value::as_object) else {
        return default_json(&Foundations::default().shadow);
    };
    let presets: Map<String, Value> =
        map.iter().filter(|(_, preset)| preset.is_string()).map(|(name, preset)| (name.clone(), preset.clone())).collect();
    Value::Object(presets)
}

/// Returns the compiled easing grammar.
fn easing_regex() -> Option<&'static Regex> {
    static EASING: OnceLock<Option<Regex>> = OnceLock::new();
    EASING.get_or_init(|| Regex::new(EASING_PATTERN).ok()).as_ref()
}

/// Returns true when the easing matches the accepted grammar.
pub(crate) fn is_valid_easing(easing: &str) -> bool {
    easing_regex().is_some_and(|regex| regex.is_match(easing))
}

/// Normalizes motion tokens.
fn normalize_motion(value: Option<&Value>) -> Value {
    let Some(map) = value.and_then(Value::as_object) else {
        return default_json(&Motion::default());
    };
    let mut out = map.clone();
    out.insert("durationsMs".to_string(), normalize_durations(map.get("durationsMs")));
    let candidates: Vec<&str> = match map.get("easings") {
        Some(Value::Array(entries)) => entries.iter().filter_map(Value::as_str).collect(),
        Some(Value::String(single)) => vec![single.as_str()],
        _ => Vec::new(),
    };
    let mut easings: Vec<Value> = Vec::new();
    for easing in candidates.into_iter().map(str::trim).filter(|easing| is_valid_easing(easing)) {
        let easing = Value::from(easing);
        if !easings.contains(&easing) {
            easings.push(easing);
        }
    }
    if easings.is_empty() {
        easings.push(Value::from(FALLBACK_EASING));
    }
    out.insert("easings".to_string(), Value::Array(easings));
    Value::Object(out)
}

/// Normalizes motion duration buckets.
fn normalize_durations(value: Option<&Value>) -> Value {
    let defaults = MotionDurations::default();
    let Some(map) = value.and_then(Value::as_object) else {
        return default_json(&defaults);
    };
    let mut out = map.clone();
    for (key, fallback) in [("fast", defaults.fast), ("base", defaults.base), ("slow", defaults.slow)] {
        let duration = map
            .get(key)
            .and_then(Value::as_f64)
            .filter(|raw| *raw >= 0.0)
            .and_then(|raw| whole_u32(raw.round()))
            .unwrap_or(fallback);
        out.insert(key.to_string(), Value::from(duration));
    }
    Value::Object(out)
}

/// Normalizes the layout grid.
fn normalize_grid(value: Option<&Value>) -> Value {
    let defaults = Grid::default();
    let Some(map) = value.and_then(Value::as_object) else {
        return default_json(&defaults);
    };
    let mut out = map.clone();
    let columns = map
        .get("columns")
        .and_then(Value::as_f64)
        .filter(|raw| *raw >= 1.0)
        .and_then(|raw| whole_u32(raw.round()))
        .unwrap_or(defaults.columns);
    out.insert("columns".to_string(), Value::from(columns));
    out.insert("gutterPx".to_string(), normalize_scalar_px(map.get("gutterPx"), default_json(&defaults.gutter_px)));
    out.insert("marginPx".to_string(), normalize_scalar_px(map.get("marginPx"), default_json(&defaults.margin_px)));
    out.insert(
        "maxWidthPx".to_string(),
        normalize_scalar_px(map.get("maxWidthPx"), default_json(&defaults.max_width_px)),
    );
    Value::Object(out)
}

/// Normalizes accessibility tokens and floors the hit area at 40px.
fn normalize_a11y(value: Option<&Value>) -> Value {
    let defaults = A11y::default();
    let Some(map) = value.and_then(Value::as_object) else {
        return default_json(&defaults);
    };
    let mut out = map.clone();
    let hit_area = map
        .get("minHitAreaPx")
        .and_then(Value::as_f64)
        .filter(|raw| *raw > 0.0)
        .and_then(|raw| whole_u32(quantize8(raw)))
        .map_or(MIN_HIT_AREA_PX, |quantized| quantized.max(MIN_HIT_AREA_PX));
    out.insert("minHitAreaPx".to_string(), Value::from(hit_area));

    let ring = match object_at(map, "focusRing") {
        Some(ring) => {
            let mut ring_out = ring.clone();
            let width = ring
                .get("widthPx")
                .and_then(Value::as_f64)
                .filter(|raw| *raw > 0.0)
                .and_then(|raw| whole_u32(raw.round().max(1.0)))
                .unwrap_or(defaults.focus_ring.width_px);
            ring_out.insert("widthPx".to_string(), Value::from(width));
            let style = trimmed_string(ring.get("style")).unwrap_or_else(|| defaults.focus_ring.style.clone());
            ring_out.insert("style".to_string(), Value::from(style));
            let color = ring
                .get("color")
                .and_then(Value::as_str)
                .map_or_else(|| defaults.focus_ring.color.clone(), repair_hex);
            ring_out.insert("color".to_string(), Value::from(color));
            Value::Object(ring_out)
        }
        None => default_json(&defaults.focus_ring),
    };
    out.insert("focusRing".to_string(), ring);

    let contrast = match map.get("contrast").and_then(Value::as_str).map(|text| text.trim().to_uppercase()) {
        Some(class) if class == "AA" || class == "AAA" => class,
        _ => "AA".to_string(),
    };
    out.insert("contrast".to_string(), Value::from(contrast));
    Value::Object(out)
}

// ============================================================================
// SECTION: Components
// ============================================================================

/// Maps a component type spelling onto the closed set.
fn remap_component_type(label: &str) -> String {
    let key: String = label.chars().filter(char::is_ascii_alphanumeric).collect::<String>().to_lowercase();
    COMPONENT_TYPE_REMAP
        .iter()
        .find(|(alias, _)| *alias == key)
        .map_or_else(|| label.trim().to_string(), |(_, kind)| kind.as_str().to_string())
}

/// Keeps only string labels from a list (or wraps a single string).
fn string_list(value: &Value) -> Option<Value> {
    match value {
        Value::Array(entries) => {
            Some(Value::Array(entries.iter().filter(|entry| entry.is_string()).cloned().collect()))
        }
        Value::String(_) => Some(Value::Array(vec![value.clone()])),
        _ => None,
    }
}

/// Normalizes the component inventory and repairs ids.
fn normalize_components(value: Option<&Value>) -> Value {
    let Some(entries) = value.and_then(Value::as_array) else {
        return Value::Array(Vec::new());
    };
    let mut used_ids: BTreeSet<String> = BTreeSet::new();
    let mut components = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut out = match entry {
            Value::Object(map) => map.clone(),
            Value::String(label) => {
                let mut map = Map::new();
                map.insert("type".to_string(), Value::from(label.as_str()));
                map
            }
            _ => continue,
        };
        if let Some(label) = out.get("type").and_then(Value::as_str) {
            let remapped = remap_component_type(label);
            out.insert("type".to_string(), Value::from(remapped));
        }

        let index = components.len();
        let base_id = trimmed_string(out.get("id")).unwrap_or_else(|| format!("component-{index}"));
        let id = unique_id(&base_id, &used_ids);
        used_ids.insert(id.clone());
        out.insert("id".to_string(), Value::from(id));

        for key in ["variants", "states"] {
            let labels = out.get(key).and_then(string_list);
            match labels {
                Some(labels) => {
                    out.insert(key.to_string(), labels);
                }
                None => {
                    out.remove(key);
                }
            }
        }
        if !out.get("style").is_some_and(Value::is_object) {
            out.remove("style");
        }
        let confidence = clamp_confidence(out.get("confidence"), DEFAULT_COMPONENT_CONFIDENCE);
        out.insert("confidence".to_string(), confidence);
        components.push(Value::Object(out));
    }
    Value::Array(components)
}

/// Appends a numeric suffix until the id is unused.
pub(crate) fn unique_id(base: &str, used: &BTreeSet<String>) -> String {
    if !used.contains(base) {
        return base.to_string();
    }
    let mut suffix = 2_usize;
    loop {
        let candidate = format!("{base}-{suffix}");
        if !used.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

// ============================================================================
// SECTION: Composition
// ============================================================================

/// Normalizes page composition.
fn normalize_composition(value: Option<&Value>) -> Value {
    let defaults = Composition::default();
    let Some(map) = value.and_then(Value::as_object) else {
        return default_json(&defaults);
    };
    let mut out = map.clone();
    for (key, fallback) in [
        ("pageGapPx", defaults.page_gap_px),
        ("sectionGapPx", defaults.section_gap_px),
        ("cardGapPx", defaults.card_gap_px),
    ] {
        out.insert(key.to_string(), normalize_scalar_px(map.get(key), default_json(&fallback)));
    }
    let density = match map.get("density").and_then(Value::as_str).map(|text| text.trim().to_lowercase()) {
        Some(density) if density == "compact" => "compact",
        _ => "comfortable",
    };
    out.insert("density".to_string(), Value::from(density));
    Value::Object(out)
}
