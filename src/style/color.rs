//! Hex color parsing.

/// An ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub alpha: u8,
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha: 0xFF,
            red,
            green,
            blue,
        }
    }

    pub const fn argb(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self {
            alpha,
            red,
            green,
            blue,
        }
    }

    /// Packed `0xAARRGGBB`.
    pub fn to_argb_u32(&self) -> u32 {
        u32::from_be_bytes([self.alpha, self.red, self.green, self.blue])
    }
}

/// Parse `#RGB`, `#RRGGBB` or `#AARRGGBB`. Returns `None` for anything else.
pub fn parse_color_strict(raw: &str) -> Option<Color> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|n| n * 17);
            Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::argb(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

/// Parse a hex color, falling back to opaque black.
pub fn parse_color(raw: &str) -> Color {
    parse_color_strict(raw).unwrap_or(Color::BLACK)
}

pub fn is_hex_color(raw: &str) -> bool {
    parse_color_strict(raw).is_some()
}
