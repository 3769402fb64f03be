//! Dual alphanumeric display driver
//!
//! Two 4-digit smart displays share the address lines and a bit-banged
//! shift register carrying the character code. Each display has its own
//! write-enable line, so one serial bus can feed both without the second
//! display latching data meant for the first.

use embedded_hal::digital::{OutputPin, PinState};

use crate::font::{self, PATTERN_BITS};

/// Character positions addressed per display
pub const DISPLAY_POSITIONS: u8 = 5;
/// Distinct positions the two address lines can select
pub const ADDRESSABLE_POSITIONS: u8 = 4;

/// One of the two physical displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    First,
    Second,
}

impl Panel {
    pub const ALL: [Panel; 2] = [Panel::First, Panel::Second];

    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Bit-banged serial-in, parallel-out shift register
pub struct ShiftRegister<P> {
    data: P,
    clock: P,
    latch: P,
}

impl<P: OutputPin> ShiftRegister<P> {
    pub fn new(data: P, clock: P, latch: P) -> Self {
        Self { data, clock, latch }
    }

    /// Shift one bit in on a rising clock edge
    pub fn bit(&mut self, value: bool) -> Result<(), P::Error> {
        self.data.set_state(PinState::from(value))?;
        self.clock.set_high()?;
        self.clock.set_low()
    }

    /// Move the shifted bits to the output stage
    pub fn latch(&mut self) -> Result<(), P::Error> {
        self.latch.set_high()?;
        self.latch.set_low()
    }
}

/// Pins wiring both displays to the controller
pub struct DisplayPins<P> {
    pub a0: P,
    pub a1: P,
    pub wr0: P,
    pub wr1: P,
    pub sr_data: P,
    pub sr_clock: P,
    pub sr_latch: P,
}

/// Owner of the shared address lines, serial bus and both write-enables
pub struct DisplayDriver<P> {
    a0: P,
    a1: P,
    write_enable: [P; 2],
    shift: ShiftRegister<P>,
}

impl<P: OutputPin> DisplayDriver<P> {
    /// Take the pins and park them: address 0, both displays deselected
    pub fn new(pins: DisplayPins<P>) -> Result<Self, P::Error> {
        let mut driver = Self {
            a0: pins.a0,
            a1: pins.a1,
            write_enable: [pins.wr0, pins.wr1],
            shift: ShiftRegister::new(pins.sr_data, pins.sr_clock, pins.sr_latch),
        };
        driver.a0.set_low()?;
        driver.a1.set_low()?;
        for wr in &mut driver.write_enable {
            wr.set_high()?;
        }
        Ok(driver)
    }

    /// Drive the address lines for a character position
    ///
    /// Only two address lines exist: positions past the last addressable
    /// one leave the lines as they are, so a fifth character written in
    /// order lands on position 3.
    pub fn select(&mut self, position: u8) -> Result<(), P::Error> {
        if position >= ADDRESSABLE_POSITIONS {
            return Ok(());
        }
        self.a0.set_state(PinState::from(position & 0b01 != 0))?;
        self.a1.set_state(PinState::from(position & 0b10 != 0))
    }

    /// Shift out an encoded pattern and strobe it into one display
    pub fn write(&mut self, panel: Panel, pattern: u8) -> Result<(), P::Error> {
        for bit in 0..PATTERN_BITS {
            self.shift.bit(pattern & (1 << bit) != 0)?;
        }
        let wr = &mut self.write_enable[panel.index()];
        wr.set_low()?;
        self.shift.latch()?;
        wr.set_high()
    }

    /// Print one character at a position of a display
    pub fn print_char(&mut self, panel: Panel, ch: char, position: u8) -> Result<(), P::Error> {
        self.select(position)?;
        self.write(panel, font::encode_char(ch))
    }

    /// Print text right-aligned: the last character lands on position 0
    ///
    /// Characters beyond [`DISPLAY_POSITIONS`] are ignored.
    pub fn print_text(&mut self, panel: Panel, text: &str) -> Result<(), P::Error> {
        for (position, ch) in (0..DISPLAY_POSITIONS).zip(text.chars().rev()) {
            self.print_char(panel, ch, position)?;
        }
        Ok(())
    }

    /// Blank every position of a display
    pub fn clear_display(&mut self, panel: Panel) -> Result<(), P::Error> {
        for position in 0..DISPLAY_POSITIONS {
            self.print_char(panel, ' ', position)?;
        }
        Ok(())
    }
}
