use core::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::{Serialize, Serializer};

use crate::color::Rgb;

/// One color slot of a LED package
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChannel {
    Red,
    Green,
    Blue,
}

impl ColorChannel {
    const fn from_ascii(c: u8) -> Option<Self> {
        match c {
            b'R' | b'r' => Some(Self::Red),
            b'G' | b'g' => Some(Self::Green),
            b'B' | b'b' => Some(Self::Blue),
            _ => None,
        }
    }

    const fn letter(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Green => 'G',
            Self::Blue => 'B',
        }
    }

    /// Pick this channel's value out of a color
    pub const fn of(self, color: Rgb) -> u8 {
        match self {
            Self::Red => color.r,
            Self::Green => color.g,
            Self::Blue => color.b,
        }
    }
}

/// Order in which the color slots are wired on the board (`RGB`, `GRB`, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelOrder([ColorChannel; 3]);

impl PixelOrder {
    pub const RGB: Self = Self([ColorChannel::Red, ColorChannel::Green, ColorChannel::Blue]);
    pub const GRB: Self = Self([ColorChannel::Green, ColorChannel::Red, ColorChannel::Blue]);

    /// Parse a 3-letter permutation of `R`, `G` and `B`
    pub fn parse_from_str(s: &str) -> Option<Self> {
        let &[a, b, c] = s.as_bytes() else {
            return None;
        };
        let order = [
            ColorChannel::from_ascii(a)?,
            ColorChannel::from_ascii(b)?,
            ColorChannel::from_ascii(c)?,
        ];
        if order[0] == order[1] || order[1] == order[2] || order[0] == order[2] {
            return None;
        }
        Some(Self(order))
    }

    pub const fn channels(self) -> [ColorChannel; 3] {
        self.0
    }
}

impl Default for PixelOrder {
    fn default() -> Self {
        Self::RGB
    }
}

impl fmt::Display for PixelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in self.0 {
            write!(f, "{}", channel.letter())?;
        }
        Ok(())
    }
}

impl Serialize for PixelOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let buf = self.0.map(|channel| channel.letter() as u8);
        let s = core::str::from_utf8(&buf).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(s)
    }
}

impl<'de> Deserialize<'de> for PixelOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderVisitor;

        impl Visitor<'_> for OrderVisitor {
            type Value = PixelOrder;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a permutation of \"RGB\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<PixelOrder, E> {
                PixelOrder::parse_from_str(v)
                    .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
            }
        }

        deserializer.deserialize_str(OrderVisitor)
    }
}
