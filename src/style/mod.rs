//! Style resolution: sparse wire [`Style`] → toolkit-ready [`ResolvedStyle`].
//!
//! Resolution is a pure function. Malformed values never fail here: bad
//! dimensions become zero, bad colors become opaque black, and unknown
//! keywords become `None` (host default). Flagging malformed input is the
//! validator's job.

mod color;
mod dimension;
mod keywords;

pub use color::{is_hex_color, parse_color, parse_color_strict, Color};
pub use dimension::{parse_dimension, parse_dimension_strict, Dimension};
pub use keywords::{
    is_keyword, parse_arrangement, parse_cross_alignment, parse_flex_direction,
    parse_font_weight, parse_horizontal_alignment, parse_keyboard_type, parse_text_overflow,
    parse_vertical_alignment, Arrangement, CrossAlignment, FlexDirection, FontWeight,
    HorizontalAlignment, KeyboardType, TextOverflow, VerticalAlignment, ALIGNMENT_KEYWORDS,
    ALIGN_ITEMS_KEYWORDS, CONTENT_SCALE_KEYWORDS, FLEX_DIRECTION_KEYWORDS, FONT_WEIGHT_KEYWORDS,
    JUSTIFY_CONTENT_KEYWORDS, KEYBOARD_TYPE_KEYWORDS, TEXT_OVERFLOW_KEYWORDS,
    VERTICAL_ALIGNMENT_KEYWORDS,
};

use crate::model::{Spacing, Style};

/// Per-edge spacing in dp.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeInsets {
    pub top: f32,
    pub bottom: f32,
    pub start: f32,
    pub end: f32,
}

impl EdgeInsets {
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Edge value precedence: edge-specific > axis > all > 0.
pub fn resolve_edges(spacing: Option<&Spacing>) -> EdgeInsets {
    let Some(spacing) = spacing else {
        return EdgeInsets::default();
    };
    let pick = |edge: Option<f64>, axis: Option<f64>| -> f32 {
        edge.or(axis).or(spacing.all).unwrap_or(0.0) as f32
    };
    EdgeInsets {
        top: pick(spacing.top, spacing.vertical),
        bottom: pick(spacing.bottom, spacing.vertical),
        start: pick(spacing.start, spacing.horizontal),
        end: pick(spacing.end, spacing.horizontal),
    }
}

/// Fully-typed style. `None` means "host toolkit default".
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedStyle {
    pub padding: EdgeInsets,
    pub margin: EdgeInsets,

    pub width: Option<Dimension>,
    pub height: Option<Dimension>,
    pub min_width: Option<Dimension>,
    pub min_height: Option<Dimension>,
    pub max_width: Option<Dimension>,
    pub max_height: Option<Dimension>,

    pub background_color: Option<Color>,
    pub text_color: Option<Color>,
    pub border_color: Option<Color>,
    pub shadow_color: Option<Color>,

    pub font_size: Option<f32>,
    pub font_weight: Option<FontWeight>,
    pub alignment: Option<HorizontalAlignment>,

    pub flex: Option<f32>,
    pub flex_direction: Option<FlexDirection>,
    pub justify_content: Option<Arrangement>,
    pub align_items: Option<CrossAlignment>,

    pub corner_radius: Option<f32>,
    pub border_width: Option<f32>,
    pub shadow_radius: Option<f32>,
    pub shadow_offset_x: Option<f32>,
    pub shadow_offset_y: Option<f32>,
    pub opacity: Option<f32>,
    pub rotation: Option<f32>,
    pub scale: Option<f32>,
    pub z_index: Option<f32>,
}

fn non_negative(value: Option<f64>) -> Option<f32> {
    value.map(|v| v.max(0.0) as f32)
}

fn as_f32(value: Option<f64>) -> Option<f32> {
    value.map(|v| v as f32)
}

/// Resolve a sparse style. `None` resolves to all host defaults.
pub fn resolve(style: Option<&Style>) -> ResolvedStyle {
    let Some(style) = style else {
        return ResolvedStyle::default();
    };

    let dimension = |raw: &Option<String>| raw.as_deref().map(parse_dimension);
    let color = |raw: &Option<String>| raw.as_deref().map(parse_color);

    ResolvedStyle {
        padding: resolve_edges(style.padding.as_ref()),
        margin: resolve_edges(style.margin.as_ref()),

        width: dimension(&style.width),
        height: dimension(&style.height),
        min_width: dimension(&style.min_width),
        min_height: dimension(&style.min_height),
        max_width: dimension(&style.max_width),
        max_height: dimension(&style.max_height),

        background_color: color(&style.background_color),
        text_color: color(&style.text_color),
        border_color: color(&style.border_color),
        shadow_color: color(&style.shadow_color),

        font_size: style.font_size.filter(|v| *v > 0.0).map(|v| v as f32),
        font_weight: style.font_weight.as_deref().and_then(parse_font_weight),
        alignment: style.alignment.as_deref().and_then(parse_horizontal_alignment),

        flex: non_negative(style.flex),
        flex_direction: style.flex_direction.as_deref().and_then(parse_flex_direction),
        justify_content: style.justify_content.as_deref().and_then(parse_arrangement),
        align_items: style.align_items.as_deref().and_then(parse_cross_alignment),

        corner_radius: non_negative(style.corner_radius),
        border_width: non_negative(style.border_width),
        shadow_radius: non_negative(style.shadow_radius),
        shadow_offset_x: as_f32(style.shadow_offset_x),
        shadow_offset_y: as_f32(style.shadow_offset_y),
        opacity: style.opacity.map(|v| v.clamp(0.0, 1.0) as f32),
        rotation: as_f32(style.rotation),
        scale: style.scale.filter(|v| *v > 0.0).map(|v| v as f32),
        z_index: non_negative(style.z_index),
    }
}
