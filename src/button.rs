//! Debounced push-buttons

use embassy_time::{Duration, Instant};

/// Cooldown applied when none is given
pub const DEFAULT_REPEAT: Duration = Duration::from_millis(300);

/// The four buttons on the badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    PronounPrev,
    PronounNext,
    FlagPrev,
    FlagNext,
}

impl Button {
    pub const ALL: [Button; 4] = [
        Button::PronounPrev,
        Button::PronounNext,
        Button::FlagPrev,
        Button::FlagNext,
    ];

    const fn index(self) -> usize {
        match self {
            Self::PronounPrev => 0,
            Self::PronounNext => 1,
            Self::FlagPrev => 2,
            Self::FlagNext => 3,
        }
    }
}

/// Suppresses repeated edges inside a cooldown window
#[derive(Debug, Clone, Copy)]
pub struct Debouncer {
    repeat: Duration,
    next_call: Instant,
}

impl Debouncer {
    /// Create a debouncer; edges within `repeat` of `now` are already ignored
    pub fn new(now: Instant, repeat: Duration) -> Self {
        Self {
            repeat,
            next_call: now + repeat,
        }
    }

    pub fn with_default_repeat(now: Instant) -> Self {
        Self::new(now, DEFAULT_REPEAT)
    }

    /// Feed a raw edge; returns `true` if it is accepted
    ///
    /// An accepted edge restarts the cooldown window.
    pub fn accept(&mut self, now: Instant) -> bool {
        if now > self.next_call {
            self.next_call = now + self.repeat;
            return true;
        }
        false
    }

    /// Feed a raw edge and run `callback` once if it is accepted
    pub fn on_edge<R>(&mut self, now: Instant, callback: impl FnOnce() -> R) -> Option<R> {
        self.accept(now).then(callback)
    }

    pub const fn repeat(&self) -> Duration {
        self.repeat
    }
}

/// One debouncer per badge button
#[derive(Debug, Clone)]
pub struct ButtonBank {
    debouncers: [Debouncer; 4],
}

impl ButtonBank {
    pub fn new(now: Instant, repeat: Duration) -> Self {
        Self {
            debouncers: [Debouncer::new(now, repeat); 4],
        }
    }

    /// Debounce an edge of `button`
    pub fn accept(&mut self, button: Button, now: Instant) -> bool {
        self.debouncers[button.index()].accept(now)
    }
}
