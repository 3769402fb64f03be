//! Pending channel-group colors between `step` and `blit`

use heapless::Deque;

use crate::color::Rgb;

/// Capacity of the frame buffer streamed to the drivers
pub const CHANNEL_BUFFER_CAPACITY: usize = 6;

/// Bounded FIFO of colors, one entry per channel group
///
/// Pushing into a full buffer evicts the oldest entry; the newest
/// entry is never dropped.
#[derive(Debug, Default)]
pub struct ChannelBuffer<const N: usize = CHANNEL_BUFFER_CAPACITY> {
    inner: Deque<Rgb, N>,
}

impl<const N: usize> ChannelBuffer<N> {
    pub const fn new() -> Self {
        Self {
            inner: Deque::new(),
        }
    }

    /// Append a color, dropping the oldest one when full
    pub fn push(&mut self, color: Rgb) {
        if self.inner.is_full() {
            self.inner.pop_front();
        }
        // Cannot fail: a slot was just freed
        let _ = self.inner.push_back(color);
    }

    /// Append the same color `count` times
    pub fn fill(&mut self, color: Rgb, count: usize) {
        for _ in 0..count {
            self.push(color);
        }
    }

    /// Take the oldest pending color
    pub fn pop(&mut self) -> Option<Rgb> {
        self.inner.pop_front()
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    /// Pending colors, oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Rgb> {
        self.inner.iter()
    }
}
