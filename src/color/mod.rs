mod hex;
mod lerp;

use smart_leds::RGB8;

pub use hex::{HexColor, HexString, parse_hex, rgb_from_u32, to_hex};
pub use lerp::{LerpedColor, lerp};

pub type Rgb = RGB8;

/// All channels off
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
