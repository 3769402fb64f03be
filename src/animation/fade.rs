//! Flat palette cycling

use super::{Animation, CHANNEL_GROUPS, Frame};

/// Advances to the next palette color and fills every group with it
#[derive(Debug, Clone, Copy, Default)]
pub struct FadeAnimation;

impl Animation for FadeAnimation {
    fn step(&mut self, frame: &mut Frame<'_>) {
        frame.advance();
        let color = frame.current();
        frame.buffer.fill(color, CHANNEL_GROUPS);
    }
}
