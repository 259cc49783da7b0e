//! Pot Panel Main Application
//!
//! Entry point for the STM32G474-based pot panel firmware.
//! Initializes hardware, then hands control to the cooperative scheduler,
//! which never returns.

#![no_std]
#![no_main]

use defmt::{debug, info};
use embassy_executor::Spawner;
use embassy_stm32::adc::AdcChannel;
use embassy_stm32::usart::BufferedUart;
use embassy_stm32::{bind_interrupts, peripherals, usart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use potpanel_firmware::prelude::*;

// Bind interrupt handlers
bind_interrupts!(struct Irqs {
    USART1 => usart::BufferedInterruptHandler<peripherals::USART1>;
});

static UART_TX_BUF: StaticCell<[u8; UART_TX_BUFFER_SIZE]> = StaticCell::new();
static UART_RX_BUF: StaticCell<[u8; UART_RX_BUFFER_SIZE]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Pot Panel Firmware v{}", env!("CARGO_PKG_VERSION"));

    // Initialize STM32G474 peripherals with default clock configuration
    let config = embassy_stm32::Config::default();
    let p = embassy_stm32::init(config);

    info!("Peripherals initialized");

    // USART1: PA9 = TX, PA10 = RX
    let coding = LineCoding::default();
    let uart = BufferedUart::new(
        p.USART1,
        Irqs,
        p.PA10,
        p.PA9,
        UART_TX_BUF.init([0; UART_TX_BUFFER_SIZE]),
        UART_RX_BUF.init([0; UART_RX_BUFFER_SIZE]),
        uart_config(&coding),
    )
    .unwrap();

    info!("USART1 initialized at {}", coding);

    // Potentiometers on PA0..PA3 (ADC1_IN1..IN4), in telemetry order
    let mut adc = PotAdc::new(
        p.ADC1,
        [
            p.PA0.degrade_adc(),
            p.PA1.degrade_adc(),
            p.PA2.degrade_adc(),
            p.PA3.degrade_adc(),
        ],
    );
    adc.configure();

    info!("ADC1 initialized, {}-bit", ADC_RESOLUTION_BITS);

    let leds = LedPins {
        sec2_off: led_output(p.PB6),
        sec2_on: led_output(p.PB7),
        sec1_off: led_output(p.PB8),
        sec1_on: led_output(p.PB9),
        power: led_output(p.PB5),
    };

    let clock = SystemClock::new();
    let start = clock.now();
    let mut scheduler = Scheduler::new(adc, UartLink::new(uart), leds.into_bank(), start);

    info!(
        "Starting up: report every {}, filter alpha {}",
        scheduler.state().report_interval(),
        FILTER_ALPHA
    );

    let mut last_status = start;
    scheduler.run_forever(&clock, |scheduler, outcome| {
        if let Some(command) = outcome.command {
            info!("Applied {} -> {}", command, scheduler.state());
        }
        if let Some(frame) = outcome.report {
            debug!("Sent {}", frame);
        }

        let now = clock.now();
        if now.has_elapsed(last_status, STATUS_LOG_INTERVAL_MS) {
            last_status = now;
            info!(
                "Status: ticks={} frames={} cmds={} rejected={} power={}",
                scheduler.ticks(),
                scheduler.reporter().sent(),
                scheduler.parser().accepted(),
                scheduler.parser().rejected(),
                scheduler.leds().power_mode()
            );
        }
    })
}
