//! Shading colors accepted from configuration.

use serde::{Deserialize, Deserializer, Serialize};

use crate::core::Error;

/// Linear RGB color in `[0, 1]`.
///
/// Deserializes from either `"#rrggbb"` or `[r, g, b]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(into = "[f32; 3]")]
pub struct Color(pub [f32; 3]);

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Rgb([f32; 3]),
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self([r, g, b])
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, Error> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::Color(format!("expected #rrggbb, got '{}'", hex)));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| Error::Color(format!("invalid hex digits in '{}'", hex)))
        };
        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let color = match ColorRepr::deserialize(deserializer)? {
            ColorRepr::Hex(s) => Color::from_hex(&s),
            ColorRepr::Rgb(rgb) => {
                if rgb.iter().all(|c| c.is_finite() && (0.0..=1.0).contains(c)) {
                    Ok(Color(rgb))
                } else {
                    Err(Error::Color(format!("channels must be in [0, 1], got {:?}", rgb)))
                }
            }
        };
        color.map_err(serde::de::Error::custom)
    }
}

impl From<Color> for [f32; 3] {
    fn from(c: Color) -> Self {
        c.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let c = Color::from_hex("#ff8000").unwrap();
        assert_eq!(c.0[0], 1.0);
        assert!((c.0[1] - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.0[2], 0.0);
        assert_eq!(Color::from_hex("00ff00").unwrap(), Color::rgb(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_reject_bad_hex() {
        assert!(Color::from_hex("#fff").is_err());
        assert!(Color::from_hex("#gg0000").is_err());
        assert!(Color::from_hex("#ffé000").is_err());
        assert!(Color::from_hex("#+f+f+f").is_err());
        assert!(Color::from_hex("-10000").is_err());
        assert!(serde_json::from_str::<Color>("\"#+f+f+f\"").is_err());
    }

    #[test]
    fn test_deserialize_both_forms() {
        let a: Color = serde_json::from_str("\"#000000\"").unwrap();
        let b: Color = serde_json::from_str("[0.25, 0.5, 1.0]").unwrap();
        assert_eq!(a, Color::rgb(0.0, 0.0, 0.0));
        assert_eq!(b, Color::rgb(0.25, 0.5, 1.0));
        assert!(serde_json::from_str::<Color>("[2.0, 0.0, 0.0]").is_err());
    }
}
