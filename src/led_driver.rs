//! Register-mapped LED driver chip on the shared I2C bus
//!
//! Every color slot of a channel group spans four PWM registers laid out
//! as `[value, 0, value, 0]`; the zero registers are the second half of
//! the chip's two-register-per-output addressing and must stay cleared.
//! PWM writes only take effect after the update register is written.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::color::Rgb;
use crate::gamma::gamma8;
use crate::pixel_order::PixelOrder;

/// Software shutdown register
pub const REG_SHUTDOWN: u8 = 0x00;
/// First PWM register
pub const REG_PWM_START: u8 = 0x01;
/// End (exclusive) of the PWM range cleared by [`LedDriver::blank_display`]
pub const REG_PWM_END: u8 = 0x48;
/// Latches pending PWM values into the outputs
pub const REG_UPDATE: u8 = 0x49;
/// First per-output scaling register
pub const REG_SCALING_START: u8 = 0x4A;
/// End (exclusive) of the scaling range
pub const REG_SCALING_END: u8 = 0x6D;
/// Global current ceiling
pub const REG_GLOBAL_BRIGHTNESS: u8 = 0x6E;

pub const SHUTDOWN_ENABLED: u8 = 0x00;
pub const NORMAL_OPERATION: u8 = 0x01;

/// Scaling applied to every output on init
pub const DEFAULT_CHANNEL_SCALING: u8 = 0x80;
/// Global current ceiling in normal mode
pub const DEFAULT_GLOBAL_BRIGHTNESS: u8 = 0x32;
/// Global current ceiling with `overdrive_leds`
pub const OVERDRIVE_GLOBAL_BRIGHTNESS: u8 = 0xFF;

/// Registers per color slot of a channel group
pub const REGISTERS_PER_COLOR: u8 = 4;

/// Self-test: stride, end (exclusive) and dwell per lit window
const SELFTEST_STEP: u8 = 4;
const SELFTEST_END: u8 = 70;
const SELFTEST_DWELL_MS: u32 = 75;

/// Upper bound of driver chips served by one animation engine
pub const MAX_LED_DRIVERS: usize = 4;

/// First and last (exclusive) 7-bit addresses probed by [`scan_bus`]
const SCAN_START: u8 = 0x08;
const SCAN_END: u8 = 0x78;

/// One LED driver chip, identified by its bus address
///
/// The driver does not own the bus: several chips share it and each
/// call borrows it for the duration of the register writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedDriver {
    address: u8,
    order: PixelOrder,
    overdrive: bool,
}

impl LedDriver {
    pub const fn new(address: u8, order: PixelOrder, overdrive: bool) -> Self {
        Self {
            address,
            order,
            overdrive,
        }
    }

    pub const fn address(&self) -> u8 {
        self.address
    }

    pub const fn pixel_order(&self) -> PixelOrder {
        self.order
    }

    /// Bring the chip from reset into normal operation
    ///
    /// Everything before the final shutdown-register write is only staged,
    /// so the order of these writes matters.
    pub fn initialize<I: I2c>(&self, bus: &mut I) -> Result<(), I::Error> {
        self.write_register(bus, REG_SHUTDOWN, SHUTDOWN_ENABLED)?;
        self.set_global_scaling(bus, DEFAULT_CHANNEL_SCALING)?;
        self.blank_display(bus)?;
        let ceiling = if self.overdrive {
            OVERDRIVE_GLOBAL_BRIGHTNESS
        } else {
            DEFAULT_GLOBAL_BRIGHTNESS
        };
        self.set_global_brightness(bus, ceiling)?;
        self.update(bus)?;
        self.write_register(bus, REG_SHUTDOWN, NORMAL_OPERATION)
    }

    /// Set the scaling of a single output
    pub fn set_channel_scaling<I: I2c>(
        &self,
        bus: &mut I,
        register: u8,
        value: u8,
    ) -> Result<(), I::Error> {
        self.write_register(bus, register, value)
    }

    /// Set the same scaling on every output
    pub fn set_global_scaling<I: I2c>(&self, bus: &mut I, value: u8) -> Result<(), I::Error> {
        for register in REG_SCALING_START..REG_SCALING_END {
            self.set_channel_scaling(bus, register, value)?;
        }
        Ok(())
    }

    pub fn set_global_brightness<I: I2c>(&self, bus: &mut I, value: u8) -> Result<(), I::Error> {
        self.write_register(bus, REG_GLOBAL_BRIGHTNESS, value)
    }

    /// Clear every PWM register
    pub fn blank_display<I: I2c>(&self, bus: &mut I) -> Result<(), I::Error> {
        for register in REG_PWM_START..REG_PWM_END {
            self.write_register(bus, register, 0)?;
            self.update(bus)?;
        }
        Ok(())
    }

    /// Write one channel group
    ///
    /// `channel` is the first PWM register of the group. Values are
    /// gamma-corrected on the way out. Returns the base register of the
    /// last color slot written; the next group starts
    /// [`REGISTERS_PER_COLOR`] past it.
    pub fn set_led<I: I2c>(&self, bus: &mut I, channel: u8, color: Rgb) -> Result<u8, I::Error> {
        let mut register = channel;
        for (slot, component) in (0u8..).zip(self.order.channels()) {
            register = channel.wrapping_add(REGISTERS_PER_COLOR * slot);
            let value = gamma8(component.of(color));
            self.write_register(bus, register, value)?;
            self.write_register(bus, register.wrapping_add(1), 0)?;
            self.write_register(bus, register.wrapping_add(2), value)?;
            self.write_register(bus, register.wrapping_add(3), 0)?;
            self.update(bus)?;
        }
        Ok(register)
    }

    /// Walk a lit 4-register window across the chip, then blank it
    pub fn led_selftest<I: I2c, D: DelayNs>(
        &self,
        bus: &mut I,
        delay: &mut D,
    ) -> Result<(), I::Error> {
        for register in (REG_PWM_START..SELFTEST_END).step_by(SELFTEST_STEP as usize) {
            self.write_register(bus, register, 0xFF)?;
            if register > REG_PWM_START {
                self.write_register(bus, register - SELFTEST_STEP, 0x00)?;
            }
            self.update(bus)?;
            delay.delay_ms(SELFTEST_DWELL_MS);
        }
        self.blank_display(bus)
    }

    fn update<I: I2c>(&self, bus: &mut I) -> Result<(), I::Error> {
        self.write_register(bus, REG_UPDATE, 0x00)
    }

    fn write_register<I: I2c>(&self, bus: &mut I, register: u8, value: u8) -> Result<(), I::Error> {
        bus.write(self.address, &[register, value])
    }
}

/// Probe the bus and return the addresses that acknowledge
pub fn scan_bus<I: I2c>(bus: &mut I) -> Vec<u8, MAX_LED_DRIVERS> {
    let mut found = Vec::new();
    for address in SCAN_START..SCAN_END {
        if bus.write(address, &[]).is_ok() && found.push(address).is_err() {
            break;
        }
    }
    found
}

/// Create drivers for the chips found on the bus
///
/// With `battery_saver` only the first chip is used.
pub fn discover_drivers<I: I2c>(
    bus: &mut I,
    order: PixelOrder,
    overdrive: bool,
    battery_saver: bool,
) -> Vec<LedDriver, MAX_LED_DRIVERS> {
    let found = scan_bus(bus);
    let take = if battery_saver { 1 } else { found.len() };

    #[cfg(feature = "esp32-log")]
    println!(
        "[discover_drivers] found {:?}, battery saver: {:?}",
        found.as_slice(),
        battery_saver
    );

    found
        .iter()
        .take(take)
        .map(|&address| LedDriver::new(address, order, overdrive))
        .collect()
}
