//! Sparkle: a few random groups light up, then fade out or into the next color

use heapless::Vec;

use super::{Animation, CHANNEL_GROUPS, Frame};
use crate::color::{BLACK, Rgb, lerp};

/// Groups lit per sparkle
pub const SPARKLE_ACTIVE_GROUPS: usize = 3;
/// Crossfade progress added per tick
pub const CROSSFADE_STEP: u8 = 20;
/// Crossfade progress at which the color change is committed
pub const CROSSFADE_COMPLETE: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SparkleState {
    /// Next tick picks a new set of groups
    #[default]
    Idle,
    /// Blending the lit groups away from the current color
    Crossfading { progress: u8 },
}

#[derive(Debug, Clone, Default)]
pub struct SparkleAnimation {
    fade: bool,
    mix: bool,
    state: SparkleState,
    active: Vec<u8, SPARKLE_ACTIVE_GROUPS>,
}

impl SparkleAnimation {
    pub const fn new(fade: bool, mix: bool) -> Self {
        Self {
            fade,
            mix,
            state: SparkleState::Idle,
            active: Vec::new(),
        }
    }

    pub const fn state(&self) -> SparkleState {
        self.state
    }

    /// Channel groups lit by the current sparkle
    pub fn active_groups(&self) -> &[u8] {
        &self.active
    }

    /// Compute this tick's fill color and move to the next state
    fn transition(&mut self, frame: &mut Frame<'_>) -> Rgb {
        match self.state {
            SparkleState::Crossfading { progress } if self.fade => {
                let progress = progress
                    .saturating_add(CROSSFADE_STEP)
                    .min(CROSSFADE_COMPLETE);
                let target = if self.mix { frame.next() } else { BLACK };
                let pct = f32::from(progress) / f32::from(CROSSFADE_COMPLETE);
                let fill = lerp(frame.current(), target, pct).to_rgb();

                if progress >= CROSSFADE_COMPLETE {
                    frame.advance();
                    self.state = SparkleState::Idle;
                } else {
                    self.state = SparkleState::Crossfading { progress };
                }
                fill
            }
            _ => {
                self.pick_groups(frame);
                let fill = frame.current();
                if self.fade {
                    self.state = SparkleState::Crossfading { progress: 0 };
                } else {
                    frame.advance();
                    self.state = SparkleState::Idle;
                }
                fill
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn pick_groups(&mut self, frame: &mut Frame<'_>) {
        self.active.clear();
        while !self.active.is_full() {
            let group = frame.rng.below(CHANNEL_GROUPS) as u8;
            if !self.active.contains(&group) {
                let _ = self.active.push(group);
            }
        }
    }
}

impl Animation for SparkleAnimation {
    fn step(&mut self, frame: &mut Frame<'_>) {
        let fill = self.transition(frame);
        for group in 0..CHANNEL_GROUPS {
            #[allow(clippy::cast_possible_truncation)]
            let lit = self.active.contains(&(group as u8));
            frame.buffer.push(if lit { fill } else { BLACK });
        }
    }

    fn reset(&mut self) {
        self.state = SparkleState::Idle;
        self.active.clear();
    }
}
