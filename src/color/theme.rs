//! Configurable colors for the report display.

use std::fmt;

use ratatui::style::Color;
use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// RGB color representation for config serialization.
///
/// Supports multiple input formats:
/// - Hex: `"#FF8000"` or `"#ff8000"`
/// - RGB string: `"255,128,0"`
/// - Verbose: `{ r = 255, g = 128, b = 0 }`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }

    /// Parse from hex string like "#FF8000" or "FF8000"
    fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        if s.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&s[0..2], 16).ok()?;
        let g = u8::from_str_radix(&s[2..4], 16).ok()?;
        let b = u8::from_str_radix(&s[4..6], 16).ok()?;
        Some(Self { r, g, b })
    }

    /// Parse from comma-separated string like "255,128,0"
    fn from_csv(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(',').map(|p| p.trim()).collect();
        if parts.len() != 3 {
            return None;
        }
        let r = parts[0].parse().ok()?;
        let g = parts[1].parse().ok()?;
        let b = parts[2].parse().ok()?;
        Some(Self { r, g, b })
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        rgb.to_color()
    }
}

impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b))
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RgbVisitor;

        impl<'de> Visitor<'de> for RgbVisitor {
            type Value = Rgb;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a hex string, \"r,g,b\" string, or { r, g, b } table")
            }

            fn visit_str<E>(self, value: &str) -> Result<Rgb, E>
            where
                E: de::Error,
            {
                Rgb::from_hex(value)
                    .or_else(|| Rgb::from_csv(value))
                    .ok_or_else(|| E::custom(format!("invalid color: {value}")))
            }

            fn visit_map<M>(self, mut map: M) -> Result<Rgb, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut r = None;
                let mut g = None;
                let mut b = None;
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "r" => r = Some(map.next_value()?),
                        "g" => g = Some(map.next_value()?),
                        "b" => b = Some(map.next_value()?),
                        other => return Err(de::Error::unknown_field(other, &["r", "g", "b"])),
                    }
                }
                Ok(Rgb {
                    r: r.ok_or_else(|| de::Error::missing_field("r"))?,
                    g: g.ok_or_else(|| de::Error::missing_field("g"))?,
                    b: b.ok_or_else(|| de::Error::missing_field("b"))?,
                })
            }
        }

        deserializer.deserialize_any(RgbVisitor)
    }
}

/// Display colors, overridable from `rfview.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Background for high-conservation cells (>= 0.8).
    pub band_high: Rgb,
    /// Background for medium-conservation cells (>= 0.6).
    pub band_medium: Rgb,
    /// Background for low-conservation cells (>= 0.4).
    pub band_low: Rgb,
    /// Foreground for structural annotation rows (SS_cons, RF).
    pub annotation: Rgb,
    /// Status bar background.
    pub status_bg: Rgb,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            band_high: Rgb::new(0, 255, 255),     // cyan
            band_medium: Rgb::new(135, 206, 235), // skyblue
            band_low: Rgb::new(169, 169, 169),    // gray
            annotation: Rgb::new(128, 128, 128),
            status_bg: Rgb::new(40, 40, 60),
        }
    }
}
