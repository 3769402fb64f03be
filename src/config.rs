//! Badge settings and their persistence
//!
//! The settings live in a small JSON document owned by the board's
//! storage. It is read once at boot and rewritten in full whenever a
//! selected index changes.

use embassy_time::Duration;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::pixel_order::PixelOrder;
use crate::serde_ext::{bool_as_number, number_as_bool};

/// Frame rate used when the document has none (or zero)
pub const DEFAULT_ANIMATION_FPS: u32 = 10;
/// Size of the buffer the document is read into and written from
pub const CONFIG_DOCUMENT_SIZE: usize = 256;
/// Period of the display glitch tick
pub const GLITCH_PERIOD: Duration = Duration::from_millis(1000);

/// Backing storage for the config document
pub trait ConfigStorage {
    type Error: core::fmt::Debug;

    /// Read the stored document into `buf`, returning its length
    fn load(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Replace the stored document
    fn store(&mut self, document: &[u8]) -> Result<(), Self::Error>;
}

/// Typed view of the config document
///
/// Missing keys read as zero, `false` or the type's default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    /// Basis for both the LED tick and the boot animation pace
    pub animation_fps: u32,
    #[serde(
        deserialize_with = "number_as_bool",
        serialize_with = "bool_as_number"
    )]
    pub overdrive_leds: bool,
    /// Selected flag index
    pub flag: usize,
    /// Selected pronoun pair index
    pub pronouns: usize,
    pub pixel_order: PixelOrder,
    /// Only drive the first LED chip found on the bus
    #[serde(
        deserialize_with = "number_as_bool",
        serialize_with = "bool_as_number"
    )]
    pub battery_saver: bool,
    #[serde(
        deserialize_with = "number_as_bool",
        serialize_with = "bool_as_number"
    )]
    pub glitch_effects: bool,
}

impl BadgeConfig {
    /// Parse a config document; an empty document yields the defaults
    pub fn from_json(document: &[u8]) -> Option<Self> {
        if document.iter().all(u8::is_ascii_whitespace) {
            return Some(Self::default());
        }
        serde_json_core::from_slice(document)
            .ok()
            .map(|(config, _)| config)
    }

    /// Frame rate with the zero fallback applied
    pub const fn fps(&self) -> u32 {
        if self.animation_fps == 0 {
            DEFAULT_ANIMATION_FPS
        } else {
            self.animation_fps
        }
    }

    /// Period of the LED animation tick
    pub const fn tick_period(&self) -> Duration {
        Duration::from_millis(10_000 / self.fps() as u64)
    }

    /// Delay between boot animation frames
    pub const fn boot_frame_period(&self) -> Duration {
        Duration::from_millis(5_000 / self.fps() as u64)
    }
}

/// Loaded config plus the storage it is flushed to
pub struct ConfigStore<S> {
    storage: S,
    config: BadgeConfig,
}

impl<S: ConfigStorage> ConfigStore<S> {
    /// Load the document from storage
    pub fn open(mut storage: S) -> Result<Self, ConfigError<S::Error>> {
        let mut buf = [0u8; CONFIG_DOCUMENT_SIZE];
        let len = storage.load(&mut buf).map_err(ConfigError::Storage)?;
        let document = buf.get(..len).ok_or(ConfigError::Parse)?;
        let config = BadgeConfig::from_json(document).ok_or(ConfigError::Parse)?;
        Ok(Self { storage, config })
    }

    pub fn config(&self) -> &BadgeConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Remember the selected flag and flush
    pub fn set_flag(&mut self, index: usize) -> Result<(), ConfigError<S::Error>> {
        self.config.flag = index;
        self.save()
    }

    /// Remember the selected pronoun pair and flush
    pub fn set_pronouns(&mut self, index: usize) -> Result<(), ConfigError<S::Error>> {
        self.config.pronouns = index;
        self.save()
    }

    /// Write the whole document back to storage
    pub fn save(&mut self) -> Result<(), ConfigError<S::Error>> {
        let mut buf = [0u8; CONFIG_DOCUMENT_SIZE];
        let len = serde_json_core::to_slice(&self.config, &mut buf)
            .map_err(|_| ConfigError::Serialize)?;
        let document = buf.get(..len).ok_or(ConfigError::Serialize)?;
        self.storage.store(document).map_err(ConfigError::Storage)
    }
}
