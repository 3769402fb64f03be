//! Linear color interpolation for crossfades

use crate::color::{HexString, Rgb, to_hex};

/// Result of [`lerp`] before it is narrowed back to 8-bit channels
///
/// `pct` is not clamped, so values outside `0..=255` are possible when
/// the caller passes a position outside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LerpedColor {
    pub r: i32,
    pub g: i32,
    pub b: i32,
}

impl LerpedColor {
    /// Narrow to an 8-bit color, saturating out-of-range channels
    pub fn to_rgb(self) -> Rgb {
        Rgb {
            r: saturate(self.r),
            g: saturate(self.g),
            b: saturate(self.b),
        }
    }

    /// `#rrggbb` form of the saturated color
    pub fn to_hex(self) -> HexString {
        to_hex(self.to_rgb())
    }
}

/// Blend `a` towards `b` by `pct` (0.0 = `a`, 1.0 = `b`)
///
/// Operates on pre-gamma values. Each channel is `a + (b - a) * pct`,
/// truncated towards zero.
pub fn lerp(a: Rgb, b: Rgb, pct: f32) -> LerpedColor {
    LerpedColor {
        r: lerp_channel(a.r, b.r, pct),
        g: lerp_channel(a.g, b.g, pct),
        b: lerp_channel(a.b, b.b, pct),
    }
}

#[inline]
#[allow(clippy::cast_possible_truncation)]
fn lerp_channel(a: u8, b: u8, pct: f32) -> i32 {
    let a = f32::from(a);
    let b = f32::from(b);
    libm::truncf(a + (b - a) * pct) as i32
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn saturate(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}
