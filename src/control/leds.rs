//! Indicator LED Controller
//!
//! Maps the [`LedMask`] onto the five panel LEDs every tick. The four
//! section LEDs follow their bits directly. The power LED is a two-state
//! machine selected by bit 5 on every tick:
//!
//! ```text
//!            bit 5 set
//!   STEADY ─────────────▶ BLINKING
//!     ▲                      │
//!     └──────────────────────┘
//!            bit 5 clear
//! ```
//!
//! In STEADY the power LED follows bit 4. In BLINKING it toggles every
//! [`BLINK_PERIOD_MS`] and holds its level in between.

use embedded_hal::digital::{OutputPin, PinState};

use crate::config::BLINK_PERIOD_MS;
use crate::types::{Led, LedMask, Millis};

/// Logical LED level
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LedLevel {
    /// LED is off
    #[default]
    Off,
    /// LED is on
    On,
}

impl LedLevel {
    /// Level for a mask bit
    #[must_use]
    pub const fn from_bool(on: bool) -> Self {
        if on {
            Self::On
        } else {
            Self::Off
        }
    }

    /// Toggle the level
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    /// Whether the LED is lit
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl From<LedLevel> for PinState {
    fn from(level: LedLevel) -> Self {
        match level {
            LedLevel::Off => PinState::Low,
            LedLevel::On => PinState::High,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for LedLevel {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Off => defmt::write!(f, "OFF"),
            Self::On => defmt::write!(f, "ON"),
        }
    }
}

/// Power LED behaviour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PowerMode {
    /// Follows the steady-on bit
    #[default]
    Steady,
    /// Toggles on a fixed period
    Blinking,
}

impl PowerMode {
    /// Mode selected by a mask
    #[must_use]
    pub const fn for_mask(mask: LedMask) -> Self {
        if mask.blink_enabled() {
            Self::Blinking
        } else {
            Self::Steady
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for PowerMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Steady => defmt::write!(f, "STEADY"),
            Self::Blinking => defmt::write!(f, "BLINKING"),
        }
    }
}

/// Blink phase and the time it last flipped
///
/// Left stale while the LED is steady; only elapsed time decides the next
/// toggle, so no resync is needed when blinking resumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlinkPhase {
    level: LedLevel,
    last_toggle: Millis,
}

impl BlinkPhase {
    /// Start with the LED off at `now`
    #[must_use]
    pub const fn new(now: Millis) -> Self {
        Self {
            level: LedLevel::Off,
            last_toggle: now,
        }
    }

    /// Toggle if a full period has passed, returns the new level if so
    pub fn advance(&mut self, now: Millis) -> Option<LedLevel> {
        if now.has_elapsed(self.last_toggle, BLINK_PERIOD_MS) {
            self.last_toggle = now;
            self.level = self.level.toggle();
            Some(self.level)
        } else {
            None
        }
    }

    /// Current phase level
    #[must_use]
    pub const fn level(&self) -> LedLevel {
        self.level
    }

    /// Time of the last toggle
    #[must_use]
    pub const fn last_toggle(&self) -> Millis {
        self.last_toggle
    }
}

/// The five panel LED outputs
#[derive(Debug)]
pub struct LedBank<P> {
    /// Section 2 "off" LED (bit 0)
    pub sec2_off: P,
    /// Section 2 "on" LED (bit 1)
    pub sec2_on: P,
    /// Section 1 "off" LED (bit 2)
    pub sec1_off: P,
    /// Section 1 "on" LED (bit 3)
    pub sec1_on: P,
    /// Power LED (bits 4 and 5)
    pub power: P,
}

/// Drives a [`LedBank`] from the LED mask
pub struct LedController<P> {
    bank: LedBank<P>,
    blink: BlinkPhase,
    power: LedLevel,
    mode: PowerMode,
}

impl<P: OutputPin> LedController<P> {
    /// Take the bank, switch every LED off
    #[must_use]
    pub fn new(bank: LedBank<P>, now: Millis) -> Self {
        let mut controller = Self {
            bank,
            blink: BlinkPhase::new(now),
            power: LedLevel::Off,
            mode: PowerMode::Steady,
        };
        controller.drive_sections(LedMask::OFF);
        controller.drive_power(LedLevel::Off);
        controller
    }

    /// Update every output for this tick
    pub fn tick(&mut self, mask: LedMask, now: Millis) {
        self.drive_sections(mask);

        self.mode = PowerMode::for_mask(mask);
        match self.mode {
            PowerMode::Blinking => {
                if let Some(level) = self.blink.advance(now) {
                    self.drive_power(level);
                }
            }
            PowerMode::Steady => {
                self.drive_power(LedLevel::from_bool(mask.is_set(Led::PowerSteady)));
            }
        }
    }

    /// Mode chosen on the last tick
    #[must_use]
    pub const fn power_mode(&self) -> PowerMode {
        self.mode
    }

    /// Level last driven onto the power LED
    #[must_use]
    pub const fn power_level(&self) -> LedLevel {
        self.power
    }

    /// Blink sub-state
    #[must_use]
    pub const fn blink_phase(&self) -> BlinkPhase {
        self.blink
    }

    /// Borrow the pins
    #[must_use]
    pub const fn bank(&self) -> &LedBank<P> {
        &self.bank
    }

    /// Give the pins back
    #[must_use]
    pub fn release(self) -> LedBank<P> {
        self.bank
    }

    fn drive_sections(&mut self, mask: LedMask) {
        drive(&mut self.bank.sec2_off, mask.is_set(Led::Sec2Off));
        drive(&mut self.bank.sec2_on, mask.is_set(Led::Sec2On));
        drive(&mut self.bank.sec1_off, mask.is_set(Led::Sec1Off));
        drive(&mut self.bank.sec1_on, mask.is_set(Led::Sec1On));
    }

    fn drive_power(&mut self, level: LedLevel) {
        // GPIO writes are infallible on the target
        let _ = self.bank.power.set_state(level.into());
        self.power = level;
    }
}

fn drive<P: OutputPin>(pin: &mut P, on: bool) {
    let _ = pin.set_state(LedLevel::from_bool(on).into());
}
