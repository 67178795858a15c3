//! Hex color literals for palette shades.
//!
//! Palette shades accept exactly one format: a `#` followed by six hex
//! digits, in either case. Shorthand (`#fff`), named colors and functional
//! notations (`rgb(...)`) are rejected so every shade maps to one concrete
//! RGB triple.
//!
//! # Example
//!
//! ```rust
//! use windtheme::HexColor;
//!
//! let primary = HexColor::parse("#DC2626").unwrap();
//! assert_eq!(primary.rgb(), (220, 38, 38));
//! assert_eq!(primary.to_string(), "#dc2626");
//!
//! assert!(HexColor::parse("#fff").is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#[0-9a-fA-F]{6}$").expect("hex color pattern is a valid regex")
});

/// A validated `#RRGGBB` color.
///
/// Equality compares the RGB components, so `#DC2626` and `#dc2626` are the
/// same color. Displays and serializes as lowercase hex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    /// Builds a color from its components.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a `#RRGGBB` literal.
    ///
    /// Surrounding whitespace is not trimmed: `" #dc2626"` is rejected.
    pub fn parse(s: &str) -> Result<Self, String> {
        if !HEX_COLOR.is_match(s) {
            return Err(format!(
                "invalid hex color '{}' (expected #RRGGBB)",
                s
            ));
        }

        let component = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&s[range], 16).map_err(|_| format!("invalid hex: {}", s))
        };

        Ok(Self {
            r: component(1..3)?,
            g: component(3..5)?,
            b: component(5..7)?,
        })
    }

    /// Returns the `(r, g, b)` components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lowercase() {
        assert_eq!(
            HexColor::parse("#ff6b35").unwrap(),
            HexColor::from_rgb(255, 107, 53)
        );
        assert_eq!(
            HexColor::parse("#000000").unwrap(),
            HexColor::from_rgb(0, 0, 0)
        );
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            HexColor::parse("#FF6B35").unwrap(),
            HexColor::parse("#ff6b35").unwrap()
        );
        assert_eq!(HexColor::parse("#AbCdEf").unwrap().rgb(), (171, 205, 239));
    }

    #[test]
    fn test_rejects_shorthand_and_long_forms() {
        assert!(HexColor::parse("#fff").is_err());
        assert!(HexColor::parse("#ffff").is_err());
        assert!(HexColor::parse("#ffffffff").is_err());
    }

    #[test]
    fn test_rejects_non_hex() {
        assert!(HexColor::parse("#gggggg").is_err());
        assert!(HexColor::parse("dc2626").is_err());
        assert!(HexColor::parse("red").is_err());
        assert!(HexColor::parse("rgb(220, 38, 38)").is_err());
        assert!(HexColor::parse("").is_err());
    }

    #[test]
    fn test_rejects_surrounding_whitespace() {
        assert!(HexColor::parse(" #dc2626").is_err());
        assert!(HexColor::parse("#dc2626\n").is_err());
    }

    #[test]
    fn test_display_is_lowercase() {
        let c = HexColor::parse("#DCFCE7").unwrap();
        assert_eq!(c.to_string(), "#dcfce7");
    }

    #[test]
    fn test_from_str() {
        let c: HexColor = "#3b82f6".parse().unwrap();
        assert_eq!(c.rgb(), (59, 130, 246));
    }

    #[test]
    fn test_error_message_names_value() {
        let err = HexColor::parse("#12345").unwrap_err();
        assert!(err.contains("#12345"));
    }
}
