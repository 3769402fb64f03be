/// Cursor over a non-empty list that wraps at both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    current: usize,
    count: usize,
}

impl Selection {
    /// Start at `current`; indices outside `0..count` fall back to 0
    pub const fn new(current: usize, count: usize) -> Self {
        let current = if current < count { current } else { 0 };
        Self { current, count }
    }

    pub const fn current(&self) -> usize {
        self.current
    }

    pub const fn count(&self) -> usize {
        self.count
    }

    /// Step forward, wrapping from the last entry to the first
    pub fn next(&mut self) -> usize {
        self.current = if self.current + 1 >= self.count {
            0
        } else {
            self.current + 1
        };
        self.current
    }

    /// Step back, wrapping from the first entry to the last
    pub fn prev(&mut self) -> usize {
        self.current = if self.current == 0 {
            self.count.saturating_sub(1)
        } else {
            self.current - 1
        };
        self.current
    }
}
