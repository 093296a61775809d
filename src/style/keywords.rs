//! Closed keyword vocabularies for enumerated style and component fields.
//!
//! Matching is case-insensitive. The `*_KEYWORDS` tables are the allowed
//! sets the validator checks against; each parser accepts exactly its table.

pub const FONT_WEIGHT_KEYWORDS: &[&str] = &[
    "thin", "extralight", "light", "normal", "regular", "medium", "semibold", "bold",
    "extrabold", "black", "100", "200", "300", "400", "500", "600", "700", "800", "900",
];
pub const ALIGNMENT_KEYWORDS: &[&str] = &["start", "left", "center", "end", "right"];
pub const VERTICAL_ALIGNMENT_KEYWORDS: &[&str] = &["top", "center", "bottom"];
pub const FLEX_DIRECTION_KEYWORDS: &[&str] = &["row", "column", "row-reverse", "column-reverse"];
pub const JUSTIFY_CONTENT_KEYWORDS: &[&str] = &[
    "start", "end", "center", "space-between", "space-around", "space-evenly", "flex-start",
    "flex-end",
];
pub const ALIGN_ITEMS_KEYWORDS: &[&str] = &[
    "start", "center", "end", "stretch", "top", "bottom", "flex-start", "flex-end",
];
pub const TEXT_OVERFLOW_KEYWORDS: &[&str] = &["clip", "ellipsis", "visible"];
pub const KEYBOARD_TYPE_KEYWORDS: &[&str] = &[
    "text", "number", "email", "phone", "password", "uri", "url", "decimal",
];
pub const CONTENT_SCALE_KEYWORDS: &[&str] = &["fit", "crop", "fill", "inside", "none"];

fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// True when `raw` is in `allowed`, ignoring case and surrounding space.
pub fn is_keyword(raw: &str, allowed: &[&str]) -> bool {
    let key = normalize(raw);
    allowed.iter().any(|k| *k == key)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalAlignment {
    Start,
    Center,
    End,
}

pub fn parse_horizontal_alignment(raw: &str) -> Option<HorizontalAlignment> {
    match normalize(raw).as_str() {
        "start" | "left" => Some(HorizontalAlignment::Start),
        "center" => Some(HorizontalAlignment::Center),
        "end" | "right" => Some(HorizontalAlignment::End),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
}

pub fn parse_vertical_alignment(raw: &str) -> Option<VerticalAlignment> {
    match normalize(raw).as_str() {
        "top" => Some(VerticalAlignment::Top),
        "center" => Some(VerticalAlignment::Center),
        "bottom" => Some(VerticalAlignment::Bottom),
        _ => None,
    }
}

/// Main-axis distribution (`justifyContent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

pub fn parse_arrangement(raw: &str) -> Option<Arrangement> {
    match normalize(raw).as_str() {
        "start" | "flex-start" => Some(Arrangement::Start),
        "end" | "flex-end" => Some(Arrangement::End),
        "center" => Some(Arrangement::Center),
        "space-between" => Some(Arrangement::SpaceBetween),
        "space-around" => Some(Arrangement::SpaceAround),
        "space-evenly" => Some(Arrangement::SpaceEvenly),
        _ => None,
    }
}

/// Cross-axis placement (`alignItems`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossAlignment {
    Start,
    Center,
    End,
    Stretch,
}

pub fn parse_cross_alignment(raw: &str) -> Option<CrossAlignment> {
    match normalize(raw).as_str() {
        "start" | "flex-start" | "top" => Some(CrossAlignment::Start),
        "center" => Some(CrossAlignment::Center),
        "end" | "flex-end" | "bottom" => Some(CrossAlignment::End),
        "stretch" => Some(CrossAlignment::Stretch),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlexDirection {
    Row,
    Column,
    RowReverse,
    ColumnReverse,
}

impl FlexDirection {
    pub fn is_horizontal(&self) -> bool {
        matches!(self, FlexDirection::Row | FlexDirection::RowReverse)
    }
}

pub fn parse_flex_direction(raw: &str) -> Option<FlexDirection> {
    match normalize(raw).as_str() {
        "row" => Some(FlexDirection::Row),
        "column" => Some(FlexDirection::Column),
        "row-reverse" => Some(FlexDirection::RowReverse),
        "column-reverse" => Some(FlexDirection::ColumnReverse),
        _ => None,
    }
}

/// Numeric font weight, 100..=900.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);
}

pub fn parse_font_weight(raw: &str) -> Option<FontWeight> {
    let weight = match normalize(raw).as_str() {
        "thin" => 100,
        "extralight" => 200,
        "light" => 300,
        "normal" | "regular" => 400,
        "medium" => 500,
        "semibold" => 600,
        "bold" => 700,
        "extrabold" => 800,
        "black" => 900,
        numeric => {
            let value = numeric.parse::<u16>().ok()?;
            if !(100..=900).contains(&value) || value % 100 != 0 {
                return None;
            }
            value
        }
    };
    Some(FontWeight(weight))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextOverflow {
    Clip,
    Ellipsis,
    Visible,
}

pub fn parse_text_overflow(raw: &str) -> Option<TextOverflow> {
    match normalize(raw).as_str() {
        "clip" => Some(TextOverflow::Clip),
        "ellipsis" => Some(TextOverflow::Ellipsis),
        "visible" => Some(TextOverflow::Visible),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyboardType {
    Text,
    Number,
    Email,
    Phone,
    Password,
    Uri,
    Decimal,
}

pub fn parse_keyboard_type(raw: &str) -> Option<KeyboardType> {
    match normalize(raw).as_str() {
        "text" => Some(KeyboardType::Text),
        "number" => Some(KeyboardType::Number),
        "email" => Some(KeyboardType::Email),
        "phone" => Some(KeyboardType::Phone),
        "password" => Some(KeyboardType::Password),
        "uri" | "url" => Some(KeyboardType::Uri),
        "decimal" => Some(KeyboardType::Decimal),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsers_accept_every_allowed_keyword() {
        for k in FONT_WEIGHT_KEYWORDS {
            assert!(parse_font_weight(k).is_some(), "{k}");
        }
        for k in ALIGNMENT_KEYWORDS {
            assert!(parse_horizontal_alignment(k).is_some(), "{k}");
        }
        for k in VERTICAL_ALIGNMENT_KEYWORDS {
            assert!(parse_vertical_alignment(k).is_some(), "{k}");
        }
        for k in FLEX_DIRECTION_KEYWORDS {
            assert!(parse_flex_direction(k).is_some(), "{k}");
        }
        for k in JUSTIFY_CONTENT_KEYWORDS {
            assert!(parse_arrangement(k).is_some(), "{k}");
        }
        for k in ALIGN_ITEMS_KEYWORDS {
            assert!(parse_cross_alignment(k).is_some(), "{k}");
        }
        for k in TEXT_OVERFLOW_KEYWORDS {
            assert!(parse_text_overflow(k).is_some(), "{k}");
        }
        for k in KEYBOARD_TYPE_KEYWORDS {
            assert!(parse_keyboard_type(k).is_some(), "{k}");
        }
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(parse_horizontal_alignment("LEFT"), Some(HorizontalAlignment::Start));
        assert_eq!(parse_arrangement("Space-Between"), Some(Arrangement::SpaceBetween));
        assert!(is_keyword(" Bold ", FONT_WEIGHT_KEYWORDS));
    }

    #[test]
    fn flex_synonyms() {
        assert_eq!(parse_arrangement("flex-end"), Some(Arrangement::End));
        assert_eq!(parse_cross_alignment("flex-start"), Some(CrossAlignment::Start));
    }

    #[test]
    fn font_weight_numbers_must_be_hundreds() {
        assert_eq!(parse_font_weight("600"), Some(FontWeight(600)));
        assert_eq!(parse_font_weight("650"), None);
        assert_eq!(parse_font_weight("1000"), None);
        assert_eq!(parse_font_weight("heavy"), None);
    }
}
