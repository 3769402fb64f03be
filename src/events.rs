//! Button edge queue between interrupt handlers and the main loop
//!
//! Interrupt handlers only timestamp the edge and push it; debouncing and
//! dispatch happen when the badge drains the queue. Built on
//! `critical-section` and `heapless::Deque`, so pushing from an interrupt
//! and draining from thread mode are both safe.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;
use heapless::Deque;

use crate::button::Button;

/// Default queue depth
pub const EDGE_QUEUE_SIZE: usize = 8;

/// A raw edge seen on a button input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonEdge {
    pub button: Button,
    pub at: Instant,
}

/// Returned when an edge is pushed into a full queue; the edge is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull(pub ButtonEdge);

/// Bounded, interrupt-safe edge queue
///
/// Meant to live in a `static`.
pub struct EdgeQueue<const SIZE: usize = EDGE_QUEUE_SIZE> {
    inner: Mutex<RefCell<Deque<ButtonEdge, SIZE>>>,
}

impl<const SIZE: usize> EdgeQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Record an edge; called from the interrupt handler
    pub fn push(&self, button: Button, at: Instant) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            let mut queue = self.inner.borrow(cs).borrow_mut();
            queue
                .push_back(ButtonEdge { button, at })
                .map_err(QueueFull)
        })
    }

    /// Take the oldest edge, if any
    pub fn pop(&self) -> Option<ButtonEdge> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().pop_front())
    }

    pub fn is_empty(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().is_empty())
    }
}

impl<const SIZE: usize> Default for EdgeQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}
