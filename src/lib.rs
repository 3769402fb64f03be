#![no_std]

pub mod animation;
pub mod badge;
pub mod button;
pub mod channel_buffer;
pub mod color;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod events;
pub mod flags;
pub mod font;
pub mod gamma;
pub mod led_driver;
pub mod pixel_order;
pub mod pronouns;
pub mod rng;
pub mod scheduler;
pub mod selection;
mod serde_ext;

pub use animation::{AnimationDescriptor, AnimationId, AnimationSlot, CHANNEL_GROUPS};
pub use badge::{Badge, BadgeErrorOf, BadgeParts};
pub use button::{Button, ButtonBank, Debouncer};
pub use channel_buffer::{CHANNEL_BUFFER_CAPACITY, ChannelBuffer};
pub use config::{BadgeConfig, ConfigStorage, ConfigStore};
pub use display::{DisplayDriver, DisplayPins, Panel};
pub use engine::AnimationEngine;
pub use error::{BadgeError, ConfigError, DataError};
pub use events::{ButtonEdge, EdgeQueue};
pub use flags::{Flag, FlagLibrary, Palette};
pub use led_driver::{LedDriver, discover_drivers, scan_bus};
pub use pixel_order::PixelOrder;
pub use pronouns::{PronounList, PronounPair};
pub use scheduler::TickScheduler;
pub use selection::Selection;

pub use color::{Rgb, lerp};
pub use gamma::gamma8;
pub use embassy_time::{Duration, Instant};
