//! Cooperative Scheduler
//!
//! One tight polling loop, no blocking waits. Every iteration runs the
//! stages in [`STAGE_ORDER`]; each stage gates its own work on elapsed
//! time rather than sleeping.
//!
//! ```text
//!   ┌────────┐   ┌──────────┐   ┌──────┐   ┌────────┐
//!   │ Filter │──▶│ Commands │──▶│ LEDs │──▶│ Report │──┐
//!   └────────┘   └──────────┘   └──────┘   └────────┘  │
//!        ▲                                              │
//!        └──────────────────── next tick ───────────────┘
//! ```
//!
//! The order matters: the reporter reads the estimates the filter wrote
//! in the same tick, and the LEDs reflect a command applied in the same
//! tick.

use embedded_hal::digital::OutputPin;

use crate::control::commands::CommandParser;
use crate::control::leds::{LedBank, LedController};
use crate::control::reporter::Reporter;
use crate::control::state::CommandState;
use crate::dsp::filter::{Alpha, FilteredValues, SignalFilter};
use crate::ports::{AnalogSource, Clock, SerialChannel};
use crate::protocol::{Command, TelemetryFrame};
use crate::types::Millis;

/// One unit of per-tick work
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// Sample every channel and update the estimates
    Filter,
    /// Take at most one inbound line and apply it
    Commands,
    /// Drive the LEDs, including the blink timer
    Leds,
    /// Emit telemetry if the interval has elapsed
    Report,
}

/// Stage order within one tick
pub const STAGE_ORDER: [Stage; 4] = [Stage::Filter, Stage::Commands, Stage::Leds, Stage::Report];

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickOutcome {
    /// Command applied this tick
    pub command: Option<Command>,
    /// Frame written this tick
    pub report: Option<TelemetryFrame>,
}

impl TickOutcome {
    /// Whether anything externally visible happened
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        self.command.is_none() && self.report.is_none()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for TickOutcome {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Tick(cmd={}, report={})", self.command, self.report);
    }
}

/// Owns every component and the state they share
pub struct Scheduler<A, S, P> {
    analog: A,
    serial: S,
    filter: SignalFilter,
    filtered: FilteredValues,
    parser: CommandParser,
    state: CommandState,
    leds: LedController<P>,
    reporter: Reporter,
    ticks: u32,
}

impl<A, S, P> Scheduler<A, S, P>
where
    A: AnalogSource,
    S: SerialChannel,
    P: OutputPin,
{
    /// Build the scheduler, seeding the filter from a first reading
    #[must_use]
    pub fn new(analog: A, serial: S, leds: LedBank<P>, now: Millis) -> Self {
        Self::with_reporter(analog, serial, leds, Reporter::new(now), now)
    }

    /// Build the scheduler around a preconfigured reporter
    #[must_use]
    pub fn with_reporter(
        mut analog: A,
        serial: S,
        leds: LedBank<P>,
        reporter: Reporter,
        now: Millis,
    ) -> Self {
        let first = analog.read_all();
        let filter = SignalFilter::seeded(Alpha::DEFAULT, &first);
        let filtered = filter.values();

        Self {
            analog,
            serial,
            filter,
            filtered,
            parser: CommandParser::new(),
            state: CommandState::new(),
            leds: LedController::new(leds, now),
            reporter,
            ticks: 0,
        }
    }

    /// Run one iteration of every stage
    pub fn tick(&mut self, now: Millis) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        for stage in STAGE_ORDER {
            match stage {
                Stage::Filter => {
                    let raw = self.analog.read_all();
                    self.filtered = self.filter.update(&raw);
                }
                Stage::Commands => {
                    let line = self.serial.try_read_line();
                    outcome.command = self
                        .parser
                        .try_parse_and_apply(line.as_deref(), &mut self.state);
                }
                Stage::Leds => {
                    self.leds.tick(self.state.leds(), now);
                }
                Stage::Report => {
                    outcome.report = self.reporter.maybe_send(
                        now,
                        self.state.report_interval(),
                        &self.filtered,
                        &mut self.serial,
                    );
                }
            }
        }

        self.ticks = self.ticks.wrapping_add(1);
        outcome
    }

    /// Tick forever, handing every outcome to `observe`
    pub fn run_forever<C, F>(&mut self, clock: &C, mut observe: F) -> !
    where
        C: Clock,
        F: FnMut(&Self, &TickOutcome),
    {
        loop {
            let outcome = self.tick(clock.now());
            observe(&*self, &outcome);
        }
    }

    /// Latest filter estimates
    #[must_use]
    pub const fn filtered(&self) -> &FilteredValues {
        &self.filtered
    }

    /// Command-driven state
    #[must_use]
    pub const fn state(&self) -> &CommandState {
        &self.state
    }

    /// Command counters
    #[must_use]
    pub const fn parser(&self) -> &CommandParser {
        &self.parser
    }

    /// LED controller
    #[must_use]
    pub const fn leds(&self) -> &LedController<P> {
        &self.leds
    }

    /// Telemetry reporter
    #[must_use]
    pub const fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    /// Iterations run so far
    #[must_use]
    pub const fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Analog source
    pub fn analog_mut(&mut self) -> &mut A {
        &mut self.analog
    }

    /// Serial channel
    pub fn serial_mut(&mut self) -> &mut S {
        &mut self.serial
    }
}
