//! Sparse style record as it appears on the wire.
//!
//! Every property is optional. Absence means "use the host toolkit default";
//! the resolver in [`crate::style`] turns this into concrete values.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::lenient;

/// Box spacing for one of padding/margin. The most specific value wins:
/// edge, then axis, then `all`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub all: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub horizontal: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub vertical: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub bottom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub start: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub end: Option<f64>,
}

impl Spacing {
    pub fn all(value: f64) -> Self {
        Self {
            all: Some(value),
            ..Self::default()
        }
    }

    pub fn symmetric(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal: Some(horizontal),
            vertical: Some(vertical),
            ..Self::default()
        }
    }

    /// Every value that is set, paired with its field name.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        [
            ("all", self.all),
            ("horizontal", self.horizontal),
            ("vertical", self.vertical),
            ("top", self.top),
            ("bottom", self.bottom),
            ("start", self.start),
            ("end", self.end),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }
}

/// `"padding": 16` is shorthand for `"padding": {"all": 16}`.
fn opt_spacing<'de, D>(deserializer: D) -> Result<Option<Spacing>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::Object(_) => Spacing::deserialize(value)
            .map(Some)
            .map_err(D::Error::custom),
        other => lenient::value_to_f64(&other)
            .map(|v| Some(Spacing::all(v)))
            .ok_or_else(|| D::Error::custom("expected a spacing object or a number")),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    // Box spacing
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opt_spacing")]
    pub padding: Option<Spacing>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opt_spacing")]
    pub margin: Option<Spacing>,

    // Sizing, as dimension strings ("100%", "50%", "24dp", "24")
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub min_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub min_height: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub max_width: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub max_height: Option<String>,

    // Colors, as hex strings
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub shadow_color: Option<String>,

    // Typography
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub font_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub alignment: Option<String>,

    // Flex
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub flex: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub flex_direction: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub justify_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_string")]
    pub align_items: Option<String>,

    // Decoration
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub corner_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub shadow_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub shadow_offset_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub shadow_offset_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub rotation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient::opt_f64")]
    pub z_index: Option<f64>,
}

impl Style {
    /// Dimension-string fields paired with their wire names.
    pub fn dimensions(&self) -> [(&'static str, Option<&str>); 6] {
        [
            ("width", self.width.as_deref()),
            ("height", self.height.as_deref()),
            ("minWidth", self.min_width.as_deref()),
            ("minHeight", self.min_height.as_deref()),
            ("maxWidth", self.max_width.as_deref()),
            ("maxHeight", self.max_height.as_deref()),
        ]
    }

    /// Color fields paired with their wire names.
    pub fn colors(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("backgroundColor", self.background_color.as_deref()),
            ("textColor", self.text_color.as_deref()),
            ("borderColor", self.border_color.as_deref()),
            ("shadowColor", self.shadow_color.as_deref()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
