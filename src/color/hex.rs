use core::fmt::{self, Write};

use heapless::String;
use serde::de::{self, Deserialize, Deserializer, Visitor};

use crate::color::Rgb;

/// `#RRGGBB` string form of a color
pub type HexString = String<7>;

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Parse a `#RRGGBB` (or bare `RRGGBB`) hex color
///
/// Returns `None` unless exactly six hex digits remain after the
/// optional leading `#`.
pub fn parse_hex(s: &str) -> Option<Rgb> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 || !digits.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(rgb_from_u32(value))
}

/// Format a color as lowercase `#rrggbb`
pub fn to_hex(color: Rgb) -> HexString {
    let mut out = HexString::new();
    // 7 bytes always fit
    let _ = write!(out, "#{:02x}{:02x}{:02x}", color.r, color.g, color.b);
    out
}

/// Color that deserializes from a `#RRGGBB` string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexColor(pub Rgb);

impl From<HexColor> for Rgb {
    fn from(value: HexColor) -> Self {
        value.0
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HexVisitor;

        impl Visitor<'_> for HexVisitor {
            type Value = HexColor;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a #RRGGBB color string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<HexColor, E> {
                parse_hex(v)
                    .map(HexColor)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}
