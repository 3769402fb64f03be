//! Flag animation styles with compile-time known variants
//!
//! All animations are stored in an enum to avoid heap allocations.
//! Each one implements the `Animation` trait and advances exactly one
//! frame per timer tick.

mod fade;
mod sparkle;

use core::fmt;

use serde::Deserialize;
use serde::de::{self, Deserializer, Visitor};

pub use fade::FadeAnimation;
pub use sparkle::{
    CROSSFADE_COMPLETE, CROSSFADE_STEP, SPARKLE_ACTIVE_GROUPS, SparkleAnimation, SparkleState,
};

use crate::channel_buffer::ChannelBuffer;
use crate::color::Rgb;
use crate::flags::Palette;
use crate::rng::Rng;
use crate::serde_ext::number_as_bool;

/// Channel groups rendered per tick
pub const CHANNEL_GROUPS: usize = 7;

const ANIMATION_NAME_FADE: &str = "fade";
const ANIMATION_NAME_SWEEP: &str = "sweep";
const ANIMATION_NAME_SPARKLE: &str = "sparkle";
const ANIMATION_NAME_UNKNOWN: &str = "unknown";

/// Everything a single animation step reads and writes
pub struct Frame<'a> {
    /// Active palette
    pub palette: &'a Palette,
    /// Index of the current palette color
    pub current_color: &'a mut usize,
    pub rng: &'a mut Rng,
    /// Colors produced for this tick, one per channel group
    pub buffer: &'a mut ChannelBuffer,
}

impl Frame<'_> {
    /// Current palette color
    pub fn current(&self) -> Rgb {
        self.palette.color(*self.current_color)
    }

    /// Palette color after the current one, wrapping
    pub fn next(&self) -> Rgb {
        self.palette.color(*self.current_color + 1)
    }

    /// Move to the next palette color, wrapping
    pub fn advance(&mut self) {
        *self.current_color = self.palette.wrap(*self.current_color + 1);
    }
}

pub trait Animation {
    /// Produce one tick worth of channel colors
    fn step(&mut self, frame: &mut Frame<'_>);

    /// Reset animation state
    fn reset(&mut self) {}
}

/// Known animation styles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationId {
    Fade,
    Sweep,
    Sparkle,
    /// Any style name this firmware does not know
    Unknown,
}

impl AnimationId {
    pub fn parse_from_str(s: &str) -> Self {
        match s {
            ANIMATION_NAME_FADE => Self::Fade,
            ANIMATION_NAME_SWEEP => Self::Sweep,
            ANIMATION_NAME_SPARKLE => Self::Sparkle,
            _ => Self::Unknown,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fade => ANIMATION_NAME_FADE,
            Self::Sweep => ANIMATION_NAME_SWEEP,
            Self::Sparkle => ANIMATION_NAME_SPARKLE,
            Self::Unknown => ANIMATION_NAME_UNKNOWN,
        }
    }
}

impl<'de> Deserialize<'de> for AnimationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct StyleVisitor;

        impl Visitor<'_> for StyleVisitor {
            type Value = AnimationId;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an animation style name")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<AnimationId, E> {
                Ok(AnimationId::parse_from_str(v))
            }
        }

        deserializer.deserialize_str(StyleVisitor)
    }
}

/// Animation settings of one flag, as stored in the flag document
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
pub struct AnimationDescriptor {
    pub style: AnimationId,
    /// Crossfade between palette entries instead of hard cuts
    #[serde(default, deserialize_with = "number_as_bool")]
    pub fade: bool,
    /// Sparkle blends towards the next palette color instead of black
    #[serde(default, deserialize_with = "number_as_bool")]
    pub mix: bool,
}

impl AnimationDescriptor {
    pub const fn new(style: AnimationId, fade: bool, mix: bool) -> Self {
        Self { style, fade, mix }
    }

    pub fn to_slot(self) -> AnimationSlot {
        match self.style {
            AnimationId::Fade => AnimationSlot::Fade(FadeAnimation),
            AnimationId::Sweep => AnimationSlot::Sweep(FadeAnimation),
            AnimationId::Sparkle => {
                AnimationSlot::Sparkle(SparkleAnimation::new(self.fade, self.mix))
            }
            AnimationId::Unknown => AnimationSlot::Unknown,
        }
    }
}

/// Animation slot - enum containing all possible animations
#[derive(Debug, Clone, Default)]
pub enum AnimationSlot {
    /// Hard cut to the next palette color every tick
    Fade(FadeAnimation),
    /// Same frames as `Fade`; no per-group phase offset
    Sweep(FadeAnimation),
    /// Random groups lit with the current color, optionally crossfading
    Sparkle(SparkleAnimation),
    /// Unrecognized style: steps leave the buffer untouched
    #[default]
    Unknown,
}

impl AnimationSlot {
    /// Advance one tick
    ///
    /// Returns `false` when the slot has nothing to render.
    pub fn step(&mut self, frame: &mut Frame<'_>) -> bool {
        match self {
            Self::Fade(animation) | Self::Sweep(animation) => animation.step(frame),
            Self::Sparkle(animation) => animation.step(frame),
            Self::Unknown => return false,
        }
        true
    }

    pub fn reset(&mut self) {
        match self {
            Self::Fade(animation) | Self::Sweep(animation) => Animation::reset(animation),
            Self::Sparkle(animation) => Animation::reset(animation),
            Self::Unknown => {}
        }
    }

    pub fn id(&self) -> AnimationId {
        match self {
            Self::Fade(_) => AnimationId::Fade,
            Self::Sweep(_) => AnimationId::Sweep,
            Self::Sparkle(_) => AnimationId::Sparkle,
            Self::Unknown => AnimationId::Unknown,
        }
    }
}
