//! Flag palettes and their animation settings
//!
//! Loaded once at boot from the flag document and immutable afterwards.

use heapless::Vec;
use serde::Deserialize;

use crate::animation::AnimationDescriptor;
use crate::color::{BLACK, HexColor, Rgb};
use crate::error::DataError;

/// Most colors a single flag can carry
pub const MAX_PALETTE_COLORS: usize = 12;
/// Most flags in the flag document
pub const MAX_FLAGS: usize = 32;

/// Ordered, never empty set of colors of one flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb, MAX_PALETTE_COLORS>,
}

impl Palette {
    /// Build a palette; `None` if `colors` is empty or too long
    pub fn new(colors: &[Rgb]) -> Option<Self> {
        if colors.is_empty() {
            return None;
        }
        Vec::from_slice(colors).ok().map(|colors| Self { colors })
    }

    /// Single-color palette
    pub fn solid(color: Rgb) -> Self {
        let mut colors = Vec::new();
        let _ = colors.push(color);
        Self { colors }
    }

    /// Wrap an index into the palette range
    pub fn wrap(&self, index: usize) -> usize {
        index % self.colors.len()
    }

    /// Color at `index`, wrapping around the end
    pub fn color(&self, index: usize) -> Rgb {
        self.colors.get(self.wrap(index)).copied().unwrap_or(BLACK)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; present for API symmetry
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::solid(BLACK)
    }
}

/// One flag: its palette and how to animate it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flag {
    pub palette: Palette,
    pub animation: AnimationDescriptor,
}

#[derive(Deserialize)]
struct FlagRecord {
    colors: Vec<HexColor, MAX_PALETTE_COLORS>,
    animation: AnimationDescriptor,
}

#[derive(Deserialize)]
struct FlagDocument {
    flags: Vec<FlagRecord, MAX_FLAGS>,
}

/// All flags available for selection
#[derive(Debug, Clone)]
pub struct FlagLibrary {
    flags: Vec<Flag, MAX_FLAGS>,
}

impl FlagLibrary {
    /// Parse the flag document: `{"flags": [{"colors": [...], "animation": {...}}]}`
    pub fn from_json(document: &[u8]) -> Result<Self, DataError> {
        let (parsed, _) = serde_json_core::from_slice::<FlagDocument>(document)
            .map_err(|_| DataError::Parse)?;

        let mut flags = Vec::new();
        for record in parsed.flags {
            let colors: Vec<Rgb, MAX_PALETTE_COLORS> =
                record.colors.iter().map(|&hex| Rgb::from(hex)).collect();
            let palette = Palette::new(&colors).ok_or(DataError::EmptyPalette)?;
            let _ = flags.push(Flag {
                palette,
                animation: record.animation,
            });
        }
        Self::new(flags)
    }

    pub fn new(flags: Vec<Flag, MAX_FLAGS>) -> Result<Self, DataError> {
        if flags.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(Self { flags })
    }

    pub fn get(&self, index: usize) -> Option<&Flag> {
        self.flags.get(index)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
