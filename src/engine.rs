//! Animation engine: renders the active flag and streams it to the LED chips

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::animation::{AnimationSlot, CHANNEL_GROUPS, Frame};
use crate::channel_buffer::ChannelBuffer;
use crate::flags::{Flag, Palette};
use crate::led_driver::{LedDriver, MAX_LED_DRIVERS, REGISTERS_PER_COLOR};
use crate::rng::Rng;

/// PWM register of the first channel group
pub const FIRST_CHANNEL: u8 = 1;

/// Drives every attached LED chip from one palette and animation
///
/// Owns the LED bus; the chips share it and are written one after
/// another within a tick.
pub struct AnimationEngine<I> {
    bus: I,
    drivers: Vec<LedDriver, MAX_LED_DRIVERS>,

    // Per-flag state, reset by `begin`
    palette: Palette,
    animation: AnimationSlot,
    current_color: usize,
    buffer: ChannelBuffer,

    rng: Rng,
}

impl<I: I2c> AnimationEngine<I> {
    pub fn new(bus: I, drivers: Vec<LedDriver, MAX_LED_DRIVERS>, seed: u64) -> Self {
        Self {
            bus,
            drivers,
            palette: Palette::default(),
            animation: AnimationSlot::default(),
            current_color: 0,
            buffer: ChannelBuffer::new(),
            rng: Rng::new(seed),
        }
    }

    /// Run the init sequence on every chip
    pub fn initialize_drivers(&mut self) -> Result<(), I::Error> {
        for driver in &self.drivers {
            driver.initialize(&mut self.bus)?;
        }
        Ok(())
    }

    /// Startup diagnostic sweep on every chip
    pub fn selftest<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), I::Error> {
        for driver in &self.drivers {
            driver.led_selftest(&mut self.bus, delay)?;
        }
        Ok(())
    }

    /// Switch to a flag: reset state, blank the chips and show its first color
    pub fn begin(&mut self, flag: &Flag) -> Result<(), I::Error> {
        self.palette = flag.palette.clone();
        self.animation = flag.animation.to_slot();
        self.animation.reset();
        self.current_color = 0;

        self.buffer.clear();
        self.buffer
            .fill(self.palette.color(self.current_color), CHANNEL_GROUPS);

        for driver in &self.drivers {
            driver.blank_display(&mut self.bus)?;
        }
        self.blit()
    }

    /// Compute the next frame into the channel buffer without sending it
    ///
    /// Returns `false` if the animation style is unknown; the buffer is
    /// left untouched in that case.
    pub fn render(&mut self) -> bool {
        let mut frame = Frame {
            palette: &self.palette,
            current_color: &mut self.current_color,
            rng: &mut self.rng,
            buffer: &mut self.buffer,
        };
        let rendered = self.animation.step(&mut frame);

        if !rendered {
            #[cfg(feature = "esp32-log")]
            println!("[AnimationEngine.step] unknown animation style, skipping frame");
        }

        rendered
    }

    /// One timer tick: render, then stream the frame out
    pub fn step(&mut self) -> Result<(), I::Error> {
        self.render();
        self.blit()
    }

    /// Drain the channel buffer into every chip
    ///
    /// Each entry goes to the same channel group on all chips; the next
    /// group starts right after the last register the previous one used.
    pub fn blit(&mut self) -> Result<(), I::Error> {
        let mut channel = FIRST_CHANNEL;
        while let Some(color) = self.buffer.pop() {
            let mut last = None;
            for driver in &self.drivers {
                last = Some(driver.set_led(&mut self.bus, channel, color)?);
            }
            if let Some(last) = last {
                channel = last.wrapping_add(REGISTERS_PER_COLOR);
            }
        }
        Ok(())
    }

    /// Index of the current palette color
    pub fn current_color(&self) -> usize {
        self.current_color
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn animation(&self) -> &AnimationSlot {
        &self.animation
    }

    /// Frame computed by [`render`](Self::render) and not yet sent
    pub fn buffer(&self) -> &ChannelBuffer {
        &self.buffer
    }

    pub fn drivers(&self) -> &[LedDriver] {
        &self.drivers
    }

    pub fn bus(&self) -> &I {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut I {
        &mut self.bus
    }
}
