//! Top-level badge: wires config, data, buttons, displays and LEDs together
//!
//! The board owns the hardware and the main loop. It builds a [`Badge`]
//! from [`BadgeParts`], calls [`Badge::start`] once, then repeatedly drains
//! its button [`EdgeQueue`] and calls [`Badge::poll`], sleeping for
//! [`Badge::sleep_duration`] in between.

use embassy_time::{Duration, Instant};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::button::{Button, ButtonBank, DEFAULT_REPEAT};
use crate::config::{ConfigStorage, ConfigStore, GLITCH_PERIOD};
use crate::display::{DisplayDriver, DisplayPins};
use crate::engine::AnimationEngine;
use crate::error::{BadgeError, ConfigError, DataError};
use crate::events::EdgeQueue;
use crate::flags::FlagLibrary;
use crate::led_driver::discover_drivers;
use crate::pronouns::{self, PronounList};
use crate::rng::Rng;
use crate::scheduler::TickScheduler;
use crate::selection::Selection;

/// Mixed into the board seed so glitches and sparkles draw different streams
const GLITCH_SEED_SALT: u64 = 0xA5A5_5A5A_0F0F_F0F0;

/// Error type of a badge built over bus `I`, pins `P` and storage `S`
pub type BadgeErrorOf<I, P, S> = BadgeError<
    <I as embedded_hal::i2c::ErrorType>::Error,
    <P as embedded_hal::digital::ErrorType>::Error,
    <S as ConfigStorage>::Error,
>;

/// Everything the board hands over to build a [`Badge`]
pub struct BadgeParts<I, P, S> {
    pub led_bus: I,
    pub display_pins: DisplayPins<P>,
    pub storage: S,
    pub flags: FlagLibrary,
    pub pronouns: PronounList,
    /// Board entropy, e.g. from the hardware RNG
    pub seed: u64,
}

pub struct Badge<I, P, S> {
    store: ConfigStore<S>,

    flags: FlagLibrary,
    flag: Selection,
    pronouns: PronounList,
    pronoun: Selection,

    engine: AnimationEngine<I>,
    display: DisplayDriver<P>,

    buttons: ButtonBank,
    animation_timer: TickScheduler,
    glitch_timer: TickScheduler,
    rng: Rng,
}

impl<I, P, S> Badge<I, P, S>
where
    I: I2c,
    P: OutputPin,
    S: ConfigStorage,
{
    /// Load the config, probe the LED bus and take over the display pins
    ///
    /// Nothing is shown until [`start`](Self::start).
    pub fn new(parts: BadgeParts<I, P, S>, now: Instant) -> Result<Self, BadgeErrorOf<I, P, S>> {
        let BadgeParts {
            mut led_bus,
            display_pins,
            storage,
            flags,
            pronouns,
            seed,
        } = parts;

        let store = ConfigStore::open(storage).map_err(BadgeError::Config)?;
        let config = store.config().clone();

        let drivers = discover_drivers(
            &mut led_bus,
            config.pixel_order,
            config.overdrive_leds,
            config.battery_saver,
        );
        let engine = AnimationEngine::new(led_bus, drivers, seed);
        let display = DisplayDriver::new(display_pins).map_err(BadgeError::Pin)?;

        let flag = Selection::new(config.flag, flags.len());
        let pronoun = Selection::new(config.pronouns, pronouns.len());

        #[cfg(feature = "esp32-log")]
        {
            if flag.current() != config.flag {
                println!("[Badge.new] stored flag {} out of range, using 0", config.flag);
            }
            if pronoun.current() != config.pronouns {
                println!(
                    "[Badge.new] stored pronouns {} out of range, using 0",
                    config.pronouns
                );
            }
        }

        Ok(Self {
            store,
            flags,
            flag,
            pronouns,
            pronoun,
            engine,
            display,
            buttons: ButtonBank::new(now, DEFAULT_REPEAT),
            animation_timer: TickScheduler::new(now, config.tick_period()),
            glitch_timer: TickScheduler::new(now, GLITCH_PERIOD),
            rng: Rng::new(seed ^ GLITCH_SEED_SALT),
        })
    }

    /// Boot sequence: LED init and self-test, display boot animation, then
    /// the stored pronouns and flag
    ///
    /// Blocks on `delay`; run it before button interrupts are attached.
    pub fn start<D: DelayNs>(
        &mut self,
        delay: &mut D,
        now: Instant,
    ) -> Result<(), BadgeErrorOf<I, P, S>> {
        self.engine.initialize_drivers().map_err(BadgeError::Bus)?;
        self.engine.selftest(delay).map_err(BadgeError::Bus)?;

        let frame_period = self.store.config().boot_frame_period();
        pronouns::animate_boot(&mut self.display, delay, frame_period)
            .map_err(BadgeError::Pin)?;

        self.show_pronouns()?;
        self.show_flag()?;

        self.animation_timer = TickScheduler::new(now, self.store.config().tick_period());
        self.glitch_timer = TickScheduler::new(now, GLITCH_PERIOD);
        Ok(())
    }

    /// Run whichever timers are due
    pub fn poll(&mut self, now: Instant) -> Result<(), BadgeErrorOf<I, P, S>> {
        if self.animation_timer.poll(now) {
            self.engine.step().map_err(BadgeError::Bus)?;
        }
        if self.store.config().glitch_effects && self.glitch_timer.poll(now) {
            self.glitch()?;
        }
        Ok(())
    }

    /// How long the main loop may sleep before the next timer is due
    pub fn sleep_duration(&self, now: Instant) -> Duration {
        let animation = self.animation_timer.sleep_duration(now);
        if self.store.config().glitch_effects {
            animation.min(self.glitch_timer.sleep_duration(now))
        } else {
            animation
        }
    }

    /// Debounce a raw edge and dispatch it; returns whether it was accepted
    pub fn handle_edge(
        &mut self,
        button: Button,
        now: Instant,
    ) -> Result<bool, BadgeErrorOf<I, P, S>> {
        if !self.buttons.accept(button, now) {
            return Ok(false);
        }
        match button {
            Button::PronounPrev => self.prev_pronoun()?,
            Button::PronounNext => self.next_pronoun()?,
            Button::FlagPrev => self.prev_flag()?,
            Button::FlagNext => self.next_flag()?,
        }
        Ok(true)
    }

    /// Drain queued edges; returns how many presses were accepted
    pub fn process_edges<const N: usize>(
        &mut self,
        queue: &EdgeQueue<N>,
    ) -> Result<usize, BadgeErrorOf<I, P, S>> {
        let mut accepted = 0;
        while let Some(edge) = queue.pop() {
            if self.handle_edge(edge.button, edge.at)? {
                accepted += 1;
            }
        }
        Ok(accepted)
    }

    pub fn next_pronoun(&mut self) -> Result<(), BadgeErrorOf<I, P, S>> {
        let index = self.pronoun.next();
        log_persist_failure(self.store.set_pronouns(index));
        self.show_pronouns()
    }

    pub fn prev_pronoun(&mut self) -> Result<(), BadgeErrorOf<I, P, S>> {
        let index = self.pronoun.prev();
        log_persist_failure(self.store.set_pronouns(index));
        self.show_pronouns()
    }

    pub fn next_flag(&mut self) -> Result<(), BadgeErrorOf<I, P, S>> {
        let index = self.flag.next();
        log_persist_failure(self.store.set_flag(index));
        self.show_flag()
    }

    pub fn prev_flag(&mut self) -> Result<(), BadgeErrorOf<I, P, S>> {
        let index = self.flag.prev();
        log_persist_failure(self.store.set_flag(index));
        self.show_flag()
    }

    /// One glitch tick on the displays; returns whether a glyph was flashed
    pub fn glitch(&mut self) -> Result<bool, BadgeErrorOf<I, P, S>> {
        let pair = self
            .pronouns
            .get(self.pronoun.current())
            .ok_or(BadgeError::Data(DataError::Empty))?;
        pronouns::glitch(&mut self.display, &mut self.rng, pair).map_err(BadgeError::Pin)
    }

    fn show_pronouns(&mut self) -> Result<(), BadgeErrorOf<I, P, S>> {
        let pair = self
            .pronouns
            .get(self.pronoun.current())
            .ok_or(BadgeError::Data(DataError::Empty))?;
        pronouns::render_pair(&mut self.display, pair).map_err(BadgeError::Pin)
    }

    fn show_flag(&mut self) -> Result<(), BadgeErrorOf<I, P, S>> {
        let flag = self
            .flags
            .get(self.flag.current())
            .ok_or(BadgeError::Data(DataError::Empty))?;
        self.engine.begin(flag).map_err(BadgeError::Bus)
    }

    pub fn flag_index(&self) -> usize {
        self.flag.current()
    }

    pub fn pronoun_index(&self) -> usize {
        self.pronoun.current()
    }

    pub fn config_store(&self) -> &ConfigStore<S> {
        &self.store
    }

    pub fn engine(&self) -> &AnimationEngine<I> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut AnimationEngine<I> {
        &mut self.engine
    }
}

/// Selection changes stay on screen even if they could not be saved
fn log_persist_failure<E: core::fmt::Debug>(result: Result<(), ConfigError<E>>) {
    if let Err(_err) = result {
        #[cfg(feature = "esp32-log")]
        println!("[Badge] failed to persist selection: {}", _err);
    }
}
