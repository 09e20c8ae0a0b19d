//! CSS color parsing and blending.
//!
//! Gauge cards accept colors in the forms users type into a dashboard config:
//! hex (`#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`), `rgb()`/`rgba()` functions and
//! common named colors. Everything is emitted as lowercase `#rrggbb`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced while parsing a color string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("Empty color string")]
    Empty,

    #[error("Invalid hex color '{0}'")]
    InvalidHex(String),

    #[error("Invalid color function '{0}'")]
    InvalidFunction(String),

    #[error("Unknown color name '{0}'")]
    UnknownName(String),
}

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    /// Parse any supported CSS color notation.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ColorError::Empty);
        }

        if let Some(hex) = s.strip_prefix('#') {
            return Self::from_hex(hex).ok_or_else(|| ColorError::InvalidHex(s.to_string()));
        }

        let lower = s.to_ascii_lowercase();
        if lower.starts_with("rgb") {
            return Self::from_function(&lower)
                .ok_or_else(|| ColorError::InvalidFunction(s.to_string()));
        }

        named_color(&lower).ok_or_else(|| ColorError::UnknownName(s.to_string()))
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();

        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self {
                alpha: nibble(3)?,
                ..Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)
            }),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self {
                alpha: byte(6)?,
                ..Self::rgb(byte(0)?, byte(2)?, byte(4)?)
            }),
            _ => None,
        }
    }

    /// `rgb(r, g, b)` / `rgba(r, g, b, a)`; expects lowercase input.
    fn from_function(s: &str) -> Option<Self> {
        let open = s.find('(')?;
        let name = s[..open].trim();
        let args = s[open + 1..].strip_suffix(')')?;
        let parts: Vec<&str> = args
            .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();

        let channel = |p: &str| -> Option<u8> {
            let v = match p.strip_suffix('%') {
                Some(pct) => pct.parse::<f64>().ok()? * 2.55,
                None => p.parse::<f64>().ok()?,
            };
            Some(v.round().clamp(0.0, 255.0) as u8)
        };

        let (r, g, b) = match parts.as_slice() {
            [r, g, b] | [r, g, b, _] => (channel(*r)?, channel(*g)?, channel(*b)?),
            _ => return None,
        };

        let alpha = match parts.get(3) {
            Some(a) => {
                let a = match a.strip_suffix('%') {
                    Some(pct) => pct.parse::<f64>().ok()? / 100.0,
                    None => a.parse::<f64>().ok()?,
                };
                (a.clamp(0.0, 1.0) * 255.0).round() as u8
            }
            None => 255,
        };

        match name {
            "rgb" | "rgba" => Some(Self {
                red: r,
                green: g,
                blue: b,
                alpha,
            }),
            _ => None,
        }
    }

    /// Format as `#rrggbb`. Alpha is dropped.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }

    /// Linear per-channel blend from `self` (t = 0) to `other` (t = 1).
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            let a = a as f64;
            let b = b as f64;
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };
        Self {
            red: mix(self.red, other.red),
            green: mix(self.green, other.green),
            blue: mix(self.blue, other.blue),
            alpha: mix(self.alpha, other.alpha),
        }
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

fn named_color(name: &str) -> Option<Rgba> {
    let rgb = match name {
        "black" => (0, 0, 0),
        "white" => (255, 255, 255),
        "red" => (255, 0, 0),
        "lime" => (0, 255, 0),
        "green" => (0, 128, 0),
        "blue" => (0, 0, 255),
        "yellow" => (255, 255, 0),
        "orange" => (255, 165, 0),
        "purple" => (128, 0, 128),
        "cyan" | "aqua" => (0, 255, 255),
        "magenta" | "fuchsia" => (255, 0, 255),
        "gray" | "grey" => (128, 128, 128),
        "silver" => (192, 192, 192),
        "maroon" => (128, 0, 0),
        "olive" => (128, 128, 0),
        "navy" => (0, 0, 128),
        "teal" => (0, 128, 128),
        "pink" => (255, 192, 203),
        "brown" => (165, 42, 42),
        "gold" => (255, 215, 0),
        "indigo" => (75, 0, 130),
        "violet" => (238, 130, 238),
        "darkgreen" => (0, 100, 0),
        "darkred" => (139, 0, 0),
        "darkorange" => (255, 140, 0),
        "lightgreen" => (144, 238, 144),
        "lightblue" => (173, 216, 230),
        "transparent" => {
            return Some(Rgba {
                alpha: 0,
                ..Rgba::rgb(0, 0, 0)
            })
        }
        _ => return None,
    };
    Some(Rgba::rgb(rgb.0, rgb.1, rgb.2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Rgba::parse("#ff0000").unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::parse("#FF0000").unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::parse("#0f0").unwrap(), Rgba::rgb(0, 255, 0));
        assert_eq!(Rgba::parse("#00ff0080").unwrap().alpha, 0x80);
    }

    #[test]
    fn test_parse_rgb_function() {
        assert_eq!(
            Rgba::parse("rgb(3, 155, 229)").unwrap(),
            Rgba::rgb(3, 155, 229)
        );
        let c = Rgba::parse("rgba(255, 0, 0, 0.5)").unwrap();
        assert_eq!(c.red, 255);
        assert_eq!(c.alpha, 128);
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(Rgba::parse("Red").unwrap(), Rgba::rgb(255, 0, 0));
        assert_eq!(Rgba::parse("green").unwrap(), Rgba::rgb(0, 128, 0));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Rgba::parse("  "), Err(ColorError::Empty));
        assert!(matches!(Rgba::parse("#12"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(Rgba::parse("#gggggg"), Err(ColorError::InvalidHex(_))));
        assert!(matches!(
            Rgba::parse("rgb(1,2)"),
            Err(ColorError::InvalidFunction(_))
        ));
        assert!(matches!(
            Rgba::parse("notacolor"),
            Err(ColorError::UnknownName(_))
        ));
    }

    #[test]
    fn test_lerp_endpoints_and_middle() {
        let red = Rgba::rgb(255, 0, 0);
        let blue = Rgba::rgb(0, 0, 255);
        assert_eq!(red.lerp(&blue, 0.0), red);
        assert_eq!(red.lerp(&blue, 1.0), blue);
        assert_eq!(red.lerp(&blue, 0.5).to_hex(), "#800080");
    }
}
