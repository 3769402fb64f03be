//! Pronoun pairs shown on the two displays

use embassy_time::Duration;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::{String, Vec};
use serde::Deserialize;

use crate::display::{ADDRESSABLE_POSITIONS, DISPLAY_POSITIONS, DisplayDriver, Panel};
use crate::error::DataError;
use crate::rng::Rng;

/// Most pairs in the pronoun document
pub const MAX_PRONOUNS: usize = 32;
/// Longest pronoun that fits a display
pub const MAX_PRONOUN_CHARS: usize = 5;

/// Text for one display
pub type PronounText = String<MAX_PRONOUN_CHARS>;

/// One entry per display, e.g. `["they", "them"]`
pub type PronounPair = [PronounText; 2];

#[derive(Deserialize)]
struct PronounDocument {
    pronouns: Vec<PronounPair, MAX_PRONOUNS>,
}

/// All pronoun pairs available for selection
#[derive(Debug, Clone)]
pub struct PronounList {
    pairs: Vec<PronounPair, MAX_PRONOUNS>,
}

impl PronounList {
    /// Parse the pronoun document: `{"pronouns": [["she", "her"], ...]}`
    pub fn from_json(document: &[u8]) -> Result<Self, DataError> {
        let (parsed, _) = serde_json_core::from_slice::<PronounDocument>(document)
            .map_err(|_| DataError::Parse)?;
        Self::new(parsed.pronouns)
    }

    pub fn new(pairs: Vec<PronounPair, MAX_PRONOUNS>) -> Result<Self, DataError> {
        if pairs.is_empty() {
            return Err(DataError::Empty);
        }
        Ok(Self { pairs })
    }

    pub fn get(&self, index: usize) -> Option<&PronounPair> {
        self.pairs.get(index)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Boot animation frames, shown on both displays
pub const BOOT_FRAMES: [&str; 8] = [
    "   <", "  <<", " <<<", "<<<<", "<<< ", "<<  ", "<   ", "    ",
];

/// Glyphs a glitch may flash
pub const GLITCH_GLYPHS: [char; 9] = ['#', '*', '-', '!', '$', '%', '/', '\\', '+'];

/// Out of `GLITCH_ROLL`, rolls below `GLITCH_CHANCE` glitch
const GLITCH_ROLL: usize = 20;
const GLITCH_CHANCE: usize = 5;

/// Show a pronoun pair, one entry per display
///
/// Positions left of a short pronoun are blanked so nothing of the
/// previous pair survives.
pub fn render_pair<P: OutputPin>(
    display: &mut DisplayDriver<P>,
    pair: &PronounPair,
) -> Result<(), P::Error> {
    for (panel, text) in Panel::ALL.into_iter().zip(pair) {
        display.print_text(panel, text)?;
        for position in (0..ADDRESSABLE_POSITIONS).skip(text.chars().count()) {
            display.print_char(panel, ' ', position)?;
        }
    }
    Ok(())
}

/// Play the boot animation, `frame_period` between frames
pub fn animate_boot<P: OutputPin, D: DelayNs>(
    display: &mut DisplayDriver<P>,
    delay: &mut D,
    frame_period: Duration,
) -> Result<(), P::Error> {
    let frame_ms = u32::try_from(frame_period.as_millis()).unwrap_or(u32::MAX);
    for frame in BOOT_FRAMES {
        for panel in Panel::ALL {
            display.print_text(panel, frame)?;
        }
        delay.delay_ms(frame_ms);
    }
    Ok(())
}

/// One glitch tick
///
/// Most ticks restore `pair`; the rest flash a random glyph at a random
/// position of a random display. Returns whether a glyph was flashed.
pub fn glitch<P: OutputPin>(
    display: &mut DisplayDriver<P>,
    rng: &mut Rng,
    pair: &PronounPair,
) -> Result<bool, P::Error> {
    if rng.below(GLITCH_ROLL) >= GLITCH_CHANCE {
        render_pair(display, pair)?;
        return Ok(false);
    }

    let panel = Panel::ALL[rng.below(Panel::ALL.len())];
    let glyph = GLITCH_GLYPHS[rng.below(GLITCH_GLYPHS.len())];
    #[allow(clippy::cast_possible_truncation)]
    let position = rng.below(usize::from(DISPLAY_POSITIONS)) as u8;
    display.print_char(panel, glyph, position)?;
    Ok(true)
}
