//! Dimension strings: `"100%"`, `"<n>%"`, `"<n>dp"` or a bare number.

/// A resolved size along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Fill the available space (`"100%"`).
    Fill,
    /// Fraction of the available space in `0.0..=1.0`.
    Fraction(f32),
    /// Density-independent pixels.
    Dp(f32),
}

impl Dimension {
    pub const ZERO: Dimension = Dimension::Dp(0.0);

    /// Fraction of the available space this dimension claims, if relative.
    pub fn fraction(&self) -> Option<f32> {
        match self {
            Dimension::Fill => Some(1.0),
            Dimension::Fraction(f) => Some(*f),
            Dimension::Dp(_) => None,
        }
    }
}

fn parse_finite(raw: &str) -> Option<f32> {
    raw.trim().parse::<f32>().ok().filter(|v| v.is_finite())
}

/// Strict grammar check used by validation.
pub fn parse_dimension_strict(raw: &str) -> Option<Dimension> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Some(percent) = trimmed.strip_suffix('%') {
        let value = parse_finite(percent)?;
        if value >= 100.0 {
            return Some(Dimension::Fill);
        }
        return Some(Dimension::Fraction(value.max(0.0) / 100.0));
    }
    let number = trimmed.strip_suffix("dp").unwrap_or(trimmed);
    parse_finite(number).map(Dimension::Dp)
}

/// Parse a dimension string. Unparseable input resolves to zero.
pub fn parse_dimension(raw: &str) -> Dimension {
    parse_dimension_strict(raw).unwrap_or(Dimension::ZERO)
}
