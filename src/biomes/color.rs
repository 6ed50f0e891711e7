//! Hex colors and HSL conversion.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorParseError {
    #[error("Color {0:?} must look like #rrggbb")]
    Format(String),
    #[error("Color {0:?} contains a non-hex digit")]
    Digit(String),
}

/// 24-bit sRGB color written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor(pub [u8; 3]);

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    pub fn to_hsl(self) -> Hsl {
        let [r, g, b] = self.0.map(|c| c as f64 / 255.0);
        rgb_to_hsl(r, g, b)
    }

    pub fn from_hsl(hsl: Hsl) -> Self {
        let (r, g, b) = hsl_to_rgb(hsl);
        Self([r, g, b].map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8))
    }
}

impl FromStr for HexColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| ColorParseError::Format(s.to_string()))?;

        let mut rgb = [0u8; 3];
        for (i, channel) in rgb.iter_mut().enumerate() {
            *channel = u8::from_str_radix(&digits[2 * i..2 * i + 2], 16)
                .map_err(|_| ColorParseError::Digit(s.to_string()))?;
        }
        Ok(Self(rgb))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<HexColor> for String {
    fn from(c: HexColor) -> Self {
        c.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.0;
        write!(f, "#{r:02x}{g:02x}{b:02x}")
    }
}

/// Hue in degrees [0, 360), saturation and lightness in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

pub fn rgb_to_hsl(r: f64, g: f64, b: f64) -> Hsl {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let d = max - min;

    if d == 0.0 {
        return Hsl { h: 0.0, s: 0.0, l };
    }

    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl { h: h * 60.0, s, l }
}

pub fn hsl_to_rgb(hsl: Hsl) -> (f64, f64, f64) {
    let Hsl { h, s, l } = hsl;
    if s == 0.0 {
        return (l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    let h = h.rem_euclid(360.0) / 360.0;

    let channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    };

    (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_and_prints_hex() {
        let c: HexColor = "#1a2B3c".parse().unwrap();
        assert_eq!(c, HexColor::rgb(0x1a, 0x2b, 0x3c));
        assert_eq!(c.to_string(), "#1a2b3c");
    }

    #[test]
    fn test_rejects_malformed_hex() {
        assert!(matches!("1a2b3c".parse::<HexColor>(), Err(ColorParseError::Format(_))));
        assert!(matches!("#1a2b3".parse::<HexColor>(), Err(ColorParseError::Format(_))));
        assert!(matches!("#1a2b3g".parse::<HexColor>(), Err(ColorParseError::Digit(_))));
    }

    #[test]
    fn test_serde_uses_hex_strings() {
        let c = HexColor::rgb(255, 128, 0);
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "\"#ff8000\"");
        let back: HexColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
        assert!(serde_json::from_str::<HexColor>("\"red\"").is_err());
    }

    #[test]
    fn test_hsl_of_primaries() {
        let red = HexColor::rgb(255, 0, 0).to_hsl();
        assert_eq!((red.h, red.s, red.l), (0.0, 1.0, 0.5));
        let green = HexColor::rgb(0, 255, 0).to_hsl();
        assert!((green.h - 120.0).abs() < 1e-9);
        let blue = HexColor::rgb(0, 0, 255).to_hsl();
        assert!((blue.h - 240.0).abs() < 1e-9);
        let grey = HexColor::rgb(128, 128, 128).to_hsl();
        assert_eq!(grey.s, 0.0);
    }

    #[test]
    fn test_hsl_conversion_preserves_palette_colors() {
        for hex in ["#2b4a6f", "#c9b27c", "#6f8f4e", "#3f6b3a", "#f2efe6", "#000000", "#ffffff"] {
            let c: HexColor = hex.parse().unwrap();
            assert_eq!(HexColor::from_hsl(c.to_hsl()), c, "{}", hex);
        }
    }
}
