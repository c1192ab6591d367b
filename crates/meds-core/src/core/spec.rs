// crates/meds-core/src/core/spec.rs
// ============================================================================
// Module: MEDS Design Specification
// Description: Typed, validated design specification and its closed enums.
// Purpose: Define the canonical spec shape produced by validation and
//          enriched by integration.
// Dependencies: crate::core::{identifiers, rulebook}, serde, serde_json
// ============================================================================

//! ## Overview
//! A [`DesignSpec`] is only ever constructed by the validator (or loaded back
//! from a store), so every value it holds already satisfies the spec
//! invariants: closed color tokens, 8px-quantized spacing, bounded weights,
//! ascending type scale, enum-restricted easings, and a non-null shadow map.
//!
//! The `Default` impls below are the documented literal defaults. The
//! normalizer injects them for absent or malformed fields and the validator
//! uses them for optional fields that are still missing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::Map;
use serde_json::Value;

use crate::core::identifiers::ComponentId;
use crate::core::rulebook::PolicyPlatform;
use crate::core::rulebook::UxAction;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Literal spec version tag.
pub const SPEC_VERSION: &str = "1.0";
/// Literal modality tag.
pub const SPEC_MODALITY: &str = "screenshot";
/// Sentinel used for pixel values that could not be measured.
pub const UNKNOWN_SENTINEL: &str = "unknown";
/// Pixel quantum every spacing value snaps to.
pub const PIXEL_QUANTUM: u32 = 8;
/// Minimum interactive hit area in pixels.
pub const MIN_HIT_AREA_PX: u32 = 40;
/// Inclusive lower bound for font weights.
pub const MIN_FONT_WEIGHT: u32 = 300;
/// Inclusive upper bound for font weights.
pub const MAX_FONT_WEIGHT: u32 = 800;
/// Smallest admissible type scale entry in pixels.
pub const MIN_TYPE_SCALE_PX: u32 = 8;
/// Minimum number of distinct type scale entries.
pub const MIN_TYPE_SCALE_LEN: usize = 3;
/// Fallback type scale used when fewer than three sizes survive.
pub const FALLBACK_TYPE_SCALE_PX: [u32; 3] = [12, 16, 24];
/// Fallback weight list used when no weight survives filtering.
pub const FALLBACK_WEIGHTS: [u32; 1] = [400];
/// Fallback easing list used when no easing survives filtering.
pub const FALLBACK_EASING: &str = "ease-in-out";
/// Confidence assigned to family candidates that omit one.
pub const DEFAULT_FAMILY_CONFIDENCE: f64 = 0.8;
/// Confidence assigned to components that omit one.
pub const DEFAULT_COMPONENT_CONFIDENCE: f64 = 0.6;

// ============================================================================
// SECTION: Design Specification
// ============================================================================

/// Canonical, validated design specification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSpec {
    /// Spec version tag (always [`SPEC_VERSION`]).
    pub version: String,
    /// Modality tag (always [`SPEC_MODALITY`]).
    pub modality: String,
    /// Viewport classification of the analyzed screenshot.
    pub viewport_profile: ViewportProfile,
    /// Design tokens.
    pub foundations: Foundations,
    /// Ordered component inventory.
    pub components: Vec<Component>,
    /// Page-level composition settings.
    pub composition: Composition,
    /// Legacy rulebook passthrough.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ux_rulebook: Option<Value>,
    /// Legacy signal passthrough.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ux_signals: Option<Value>,
    /// Interaction patterns derived during integration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patterns: Option<PatternBlock>,
    /// Accessibility flags derived during integration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility: Option<AccessibilityBlock>,
    /// Loading/empty/error presentation derived during integration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub states: Option<StateBlock>,
}

impl DesignSpec {
    /// Returns true when a component of the given type is present.
    #[must_use]
    pub fn has_component(&self, component_type: ComponentType) -> bool {
        self.components.iter().any(|component| component.component_type == component_type)
    }

    /// Returns true when the spec carries a color entry for the token.
    #[must_use]
    pub fn has_color(&self, token: ColorToken) -> bool {
        self.foundations.color.iter().any(|entry| entry.token == token)
    }
}

// ============================================================================
// SECTION: Pixel Values
// ============================================================================

/// Pixel measurement or the `"unknown"` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelValue {
    /// Measured pixel value.
    Px(u32),
    /// Measurement not available.
    Unknown,
}

impl PixelValue {
    /// Returns the measured value, if any.
    #[must_use]
    pub const fn px(self) -> Option<u32> {
        match self {
            Self::Px(value) => Some(value),
            Self::Unknown => None,
        }
    }

    /// Raises the value to `floor`, treating the sentinel as zero.
    #[must_use]
    pub fn at_least(self, floor: u32) -> Self {
        match self {
            Self::Px(value) => Self::Px(value.max(floor)),
            Self::Unknown => Self::Px(floor),
        }
    }
}

impl Serialize for PixelValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Px(value) => serializer.serialize_u32(*value),
            Self::Unknown => serializer.serialize_str(UNKNOWN_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for PixelValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        match &value {
            Value::String(text) if text == UNKNOWN_SENTINEL => Ok(Self::Unknown),
            Value::Number(number) => number
                .as_u64()
                .and_then(|raw| u32::try_from(raw).ok())
                .map(Self::Px)
                .ok_or_else(|| serde::de::Error::custom("pixel value must be a u32")),
            _ => Err(serde::de::Error::custom("pixel value must be a number or \"unknown\"")),
        }
    }
}

// ============================================================================
// SECTION: Viewport
// ============================================================================

/// Platform class of the analyzed screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Phone-sized viewport.
    Mobile,
    /// Tablet-sized viewport.
    Tablet,
    /// Desktop viewport.
    #[default]
    Desktop,
}

impl Platform {
    /// Returns the serialized platform label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }

    /// Parses a lowercase platform label.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "mobile" => Some(Self::Mobile),
            "tablet" => Some(Self::Tablet),
            "desktop" => Some(Self::Desktop),
            _ => None,
        }
    }

    /// Returns the rulebook policy scope used for this platform.
    ///
    /// Tablets share the desktop policy: rulebooks only scope desktop and
    /// mobile, and tablets are not treated as touch-first by the context.
    #[must_use]
    pub const fn policy_platform(self) -> PolicyPlatform {
        match self {
            Self::Mobile => PolicyPlatform::Mobile,
            Self::Tablet | Self::Desktop => PolicyPlatform::Desktop,
        }
    }
}

/// Viewport classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportProfile {
    /// Platform class.
    pub platform: Platform,
    /// Viewport width.
    pub width_px: PixelValue,
    /// Viewport height.
    pub height_px: PixelValue,
    /// Classifier confidence in [0, 1].
    pub confidence: f64,
}

impl Default for ViewportProfile {
    fn default() -> Self {
        Self {
            platform: Platform::Desktop,
            width_px: PixelValue::Unknown,
            height_px: PixelValue::Unknown,
            confidence: 0.5,
        }
    }
}

// ============================================================================
// SECTION: Foundations
// ============================================================================

/// Design tokens extracted from the screenshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Foundations {
    /// Semantic color entries.
    pub color: Vec<ColorEntry>,
    /// Typography tokens.
    pub typography: Typography,
    /// Spacing tokens.
    pub spacing: Spacing,
    /// Sorted, deduplicated corner radii.
    pub radius: Vec<u32>,
    /// Named shadow presets.
    pub shadow: BTreeMap<String, String>,
    /// Motion tokens.
    pub motion: Motion,
    /// Layout grid.
    pub grid: Grid,
    /// Accessibility tokens.
    pub a11y: A11y,
}

impl Default for Foundations {
    fn default() -> Self {
        Self {
            color: default_color_palette(),
            typography: Typography::default(),
            spacing: Spacing::default(),
            radius: vec![8, 16],
            shadow: BTreeMap::from([("none".to_string(), "none".to_string())]),
            motion: Motion::default(),
            grid: Grid::default(),
            a11y: A11y::default(),
        }
    }
}

/// Closed vocabulary of semantic color tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorToken {
    /// Brand primary.
    Primary,
    /// Brand secondary.
    Secondary,
    /// Accent highlight.
    Accent,
    /// Base surface.
    Surface,
    /// Raised or alternate surface.
    SurfaceAlt,
    /// Body text.
    Text,
    /// De-emphasized text.
    TextMuted,
    /// Borders and dividers.
    Border,
    /// Positive status.
    Success,
    /// Cautionary status.
    Warning,
    /// Destructive or error status.
    Danger,
    /// Scrim behind modal surfaces.
    Overlay,
}

impl ColorToken {
    /// Every token in declaration order.
    pub const ALL: [Self; 12] = [
        Self::Primary,
        Self::Secondary,
        Self::Accent,
        Self::Surface,
        Self::SurfaceAlt,
        Self::Text,
        Self::TextMuted,
        Self::Border,
        Self::Success,
        Self::Warning,
        Self::Danger,
        Self::Overlay,
    ];

    /// Returns the serialized token name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Accent => "accent",
            Self::Surface => "surface",
            Self::SurfaceAlt => "surfaceAlt",
            Self::Text => "text",
            Self::TextMuted => "textMuted",
            Self::Border => "border",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Overlay => "overlay",
        }
    }

    /// Parses a serialized token name.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.as_str() == label)
    }
}

impl fmt::Display for ColorToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Semantic color entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorEntry {
    /// Semantic token.
    pub token: ColorToken,
    /// Hex color (`#RGB`, `#RRGGBB` or `#RRGGBBAA`).
    pub hex: String,
    /// Free-form usage note.
    #[serde(default)]
    pub usage: String,
}

impl ColorEntry {
    /// Creates a color entry.
    #[must_use]
    pub fn new(token: ColorToken, hex: &str, usage: &str) -> Self {
        Self {
            token,
            hex: hex.to_string(),
            usage: usage.to_string(),
        }
    }
}

/// Returns the documented default color palette.
#[must_use]
pub fn default_color_palette() -> Vec<ColorEntry> {
    vec![
        ColorEntry::new(ColorToken::Primary, "#2563EB", "primary actions"),
        ColorEntry::new(ColorToken::Surface, "#FFFFFF", "page background"),
        ColorEntry::new(ColorToken::Text, "#111827", "body text"),
        ColorEntry::new(ColorToken::TextMuted, "#6B7280", "secondary text"),
        ColorEntry::new(ColorToken::Border, "#E5E7EB", "dividers"),
    ]
}

/// Typography tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    /// Primary font family.
    pub primary_family: String,
    /// Weighted family candidates.
    pub family_candidates: Vec<FamilyCandidate>,
    /// Ascending type scale in pixels.
    pub scale_px: Vec<u32>,
    /// Font weights within [300, 800].
    pub weights: Vec<u32>,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            primary_family: "Inter".to_string(),
            family_candidates: vec![FamilyCandidate {
                family: "Inter".to_string(),
                confidence: DEFAULT_FAMILY_CONFIDENCE,
            }],
            scale_px: FALLBACK_TYPE_SCALE_PX.to_vec(),
            weights: vec![400, 600],
        }
    }
}

/// Font family candidate with a classifier confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyCandidate {
    /// Family name.
    pub family: String,
    /// Confidence in [0, 1].
    pub confidence: f64,
}

/// Spacing tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    /// Base spacing unit.
    pub base_px: PixelValue,
    /// Sorted, deduplicated spacing scale.
    pub scale_px: Vec<u32>,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            base_px: PixelValue::Px(PIXEL_QUANTUM),
            scale_px: vec![8, 16, 24, 32, 48],
        }
    }
}

/// Motion tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Motion {
    /// Named duration buckets.
    pub durations_ms: MotionDurations,
    /// Allowed easing curves.
    pub easings: Vec<String>,
}

impl Default for Motion {
    fn default() -> Self {
        Self {
            durations_ms: MotionDurations::default(),
            easings: vec![FALLBACK_EASING.to_string()],
        }
    }
}

/// Named motion duration buckets in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionDurations {
    /// Micro-interactions.
    pub fast: u32,
    /// Standard transitions.
    pub base: u32,
    /// Large surface transitions.
    pub slow: u32,
}

impl Default for MotionDurations {
    fn default() -> Self {
        Self {
            fast: 120,
            base: 200,
            slow: 320,
        }
    }
}

/// Layout grid tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    /// Column count.
    pub columns: u32,
    /// Gutter between columns.
    pub gutter_px: PixelValue,
    /// Outer page margin.
    pub margin_px: PixelValue,
    /// Maximum content width.
    pub max_width_px: PixelValue,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            columns: 12,
            gutter_px: PixelValue::Px(24),
            margin_px: PixelValue::Px(24),
            max_width_px: PixelValue::Unknown,
        }
    }
}

/// Accessibility tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct A11y {
    /// Minimum interactive hit area (at least 40px).
    pub min_hit_area_px: u32,
    /// Keyboard focus ring.
    pub focus_ring: FocusRing,
    /// Target contrast class.
    pub contrast: ContrastClass,
}

impl Default for A11y {
    fn default() -> Self {
        Self {
            min_hit_area_px: MIN_HIT_AREA_PX,
            focus_ring: FocusRing::default(),
            contrast: ContrastClass::Aa,
        }
    }
}

/// Focus ring specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusRing {
    /// Ring width in pixels.
    pub width_px: u32,
    /// CSS outline style.
    pub style: String,
    /// Ring color (hex).
    pub color: String,
}

impl Default for FocusRing {
    fn default() -> Self {
        Self {
            width_px: 2,
            style: "solid".to_string(),
            color: "#2563EB".to_string(),
        }
    }
}

/// WCAG contrast class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContrastClass {
    /// WCAG AA.
    #[default]
    #[serde(rename = "AA")]
    Aa,
    /// WCAG AAA.
    #[serde(rename = "AAA")]
    Aaa,
}

// ============================================================================
// SECTION: Components
// ============================================================================

/// Closed set of UI archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ComponentType {
    /// Application bar.
    AppBar,
    /// Top navigation bar.
    NavBar,
    /// Persistent side navigation.
    Sidebar,
    /// Sliding drawer.
    Drawer,
    /// Tab strip.
    Tabs,
    /// Breadcrumb trail.
    Breadcrumbs,
    /// Action toolbar.
    Toolbar,
    /// Text button.
    Button,
    /// Icon-only button.
    IconButton,
    /// Floating action button.
    Fab,
    /// Single-line input.
    TextField,
    /// Multi-line input.
    TextArea,
    /// Dropdown select.
    Select,
    /// Checkbox.
    Checkbox,
    /// Radio group.
    RadioGroup,
    /// Toggle switch.
    Switch,
    /// Data table.
    Table,
    /// List container.
    List,
    /// List row.
    ListItem,
    /// Card surface.
    Card,
    /// Modal dialog.
    Modal,
    /// Alert or toast.
    Alert,
    /// Status badge.
    Badge,
    /// Avatar.
    Avatar,
    /// Image.
    Image,
}

impl ComponentType {
    /// Every component type in declaration order.
    pub const ALL: [Self; 25] = [
        Self::AppBar,
        Self::NavBar,
        Self::Sidebar,
        Self::Drawer,
        Self::Tabs,
        Self::Breadcrumbs,
        Self::Toolbar,
        Self::Button,
        Self::IconButton,
        Self::Fab,
        Self::TextField,
        Self::TextArea,
        Self::Select,
        Self::Checkbox,
        Self::RadioGroup,
        Self::Switch,
        Self::Table,
        Self::List,
        Self::ListItem,
        Self::Card,
        Self::Modal,
        Self::Alert,
        Self::Badge,
        Self::Avatar,
        Self::Image,
    ];

    /// Returns the serialized type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AppBar => "AppBar",
            Self::NavBar => "NavBar",
            Self::Sidebar => "Sidebar",
            Self::Drawer => "Drawer",
            Self::Tabs => "Tabs",
            Self::Breadcrumbs => "Breadcrumbs",
            Self::Toolbar => "Toolbar",
            Self::Button => "Button",
            Self::IconButton => "IconButton",
            Self::Fab => "Fab",
            Self::TextField => "TextField",
            Self::TextArea => "TextArea",
            Self::Select => "Select",
            Self::Checkbox => "Checkbox",
            Self::RadioGroup => "RadioGroup",
            Self::Switch => "Switch",
            Self::Table => "Table",
            Self::List => "List",
            Self::ListItem => "ListItem",
            Self::Card => "Card",
            Self::Modal => "Modal",
            Self::Alert => "Alert",
            Self::Badge => "Badge",
            Self::Avatar => "Avatar",
            Self::Image => "Image",
        }
    }

    /// Parses a serialized type name.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == label)
    }

    /// Returns true for form input archetypes.
    #[must_use]
    pub const fn is_form_input(self) -> bool {
        matches!(
            self,
            Self::TextField | Self::TextArea | Self::Select | Self::Checkbox | Self::RadioGroup
        )
    }

    /// Returns true for list-like content containers.
    #[must_use]
    pub const fn is_collection(self) -> bool {
        matches!(self, Self::List | Self::ListItem | Self::Card)
    }

    /// Returns true for top-level navigation chrome.
    #[must_use]
    pub const fn is_top_navigation(self) -> bool {
        matches!(self, Self::AppBar | Self::NavBar)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Component inventory entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Component identifier (unique within the spec).
    pub id: ComponentId,
    /// Component archetype.
    #[serde(rename = "type")]
    pub component_type: ComponentType,
    /// Variant labels.
    #[serde(default)]
    pub variants: Vec<String>,
    /// Interaction state labels.
    #[serde(default)]
    pub states: Vec<String>,
    /// Optional style overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Map<String, Value>>,
    /// Detector confidence in [0, 1].
    pub confidence: f64,
}

// ============================================================================
// SECTION: Composition
// ============================================================================

/// Layout density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    /// Generous spacing.
    #[default]
    Comfortable,
    /// Tight spacing.
    Compact,
}

/// Page composition settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Composition {
    /// Gap between top-level page regions.
    pub page_gap_px: PixelValue,
    /// Gap between sections.
    pub section_gap_px: PixelValue,
    /// Gap between cards.
    pub card_gap_px: PixelValue,
    /// Layout density.
    pub density: Density,
}

impl Default for Composition {
    fn default() -> Self {
        Self {
            page_gap_px: PixelValue::Px(24),
            section_gap_px: PixelValue::Px(32),
            card_gap_px: PixelValue::Px(16),
            density: Density::Comfortable,
        }
    }
}

// ============================================================================
// SECTION: Integrated Blocks
// ============================================================================

/// Interaction patterns derived from UX decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternBlock {
    /// Navigation pattern.
    pub navigation: NavigationPattern,
    /// Feedback pattern.
    pub feedback: FeedbackPattern,
}

/// Navigation topology and detail presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPattern {
    /// Navigation topology classification.
    pub topology: NavigationTopology,
    /// Action chosen for "view details", if a Details rule fired.
    pub details_action: Option<UxAction>,
}

/// Navigation topology classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigationTopology {
    /// Persistent sidebar hierarchy.
    Sidebar,
    /// Tabbed sections.
    Tabbed,
    /// Top navigation bar.
    TopNav,
    /// Off-canvas drawer.
    Drawer,
    /// Single flat screen.
    Flat,
}

/// Feedback timing classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackPattern {
    /// Feedback timing class.
    pub timing: FeedbackTiming,
    /// Action chosen by the first Feedback rule, if any.
    pub action: Option<UxAction>,
}

/// Feedback timing classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeedbackTiming {
    /// Transient notification after the fact.
    Transient,
    /// Progress shown while work runs.
    Progressive,
    /// Interaction blocked until acknowledged.
    Blocking,
    /// Inline feedback next to the control.
    Inline,
}

/// Accessibility flags derived from UX decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityBlock {
    /// Keyboard navigation must be supported.
    pub keyboard_navigation: bool,
    /// A visible focus ring is specified.
    pub focus_visible: bool,
    /// Target contrast class.
    pub contrast: ContrastClass,
    /// Effective minimum target size in pixels.
    pub min_target_px: u32,
    /// Touch target sizing is enforced.
    pub touch_targets_enforced: bool,
    /// Reduced motion is requested.
    pub reduced_motion: bool,
}

/// Loading, empty, and error presentation classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateBlock {
    /// Loading presentation.
    pub loading: LoadingPresentation,
    /// Empty-state presentation.
    pub empty: EmptyPresentation,
    /// Error presentation.
    pub error: ErrorPresentation,
}

/// Loading presentation classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoadingPresentation {
    /// Content-shaped placeholders.
    Skeleton,
    /// Determinate progress.
    Progress,
    /// Indeterminate spinner.
    Spinner,
    /// No loading affordance.
    None,
}

/// Empty-state presentation classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EmptyPresentation {
    /// Illustrated empty state for collections.
    Illustrated,
    /// Short inline message.
    Message,
}

/// Error presentation classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorPresentation {
    /// Transient toast.
    Toast,
    /// Blocking modal.
    Modal,
    /// Inline message.
    Inline,
}
