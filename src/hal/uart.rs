//! UART Serial Link
//!
//! Interrupt-driven buffered USART. Received bytes sit in the driver's
//! ring buffer until the scheduler polls for a line, so polling never
//! waits on the wire.

use embassy_stm32::usart::{self, BufferedUart, Config, DataBits};
use embedded_io::{Read, ReadReady, Write};

use crate::ports::SerialChannel;
use crate::serial::{Line, LineCoding, LineReader, Parity, StopBits, LINE_TERMINATOR};

/// Build a USART configuration from a line coding
#[must_use]
pub fn uart_config(coding: &LineCoding) -> Config {
    let mut config = Config::default();
    config.baudrate = coding.baud_rate;
    config.data_bits = match coding.data_bits {
        7 => DataBits::DataBits7,
        9 => DataBits::DataBits9,
        _ => DataBits::DataBits8,
    };
    config.parity = match coding.parity {
        Parity::None => usart::Parity::ParityNone,
        Parity::Odd => usart::Parity::ParityOdd,
        Parity::Even => usart::Parity::ParityEven,
    };
    config.stop_bits = match coding.stop_bits {
        StopBits::One => usart::StopBits::STOP1,
        StopBits::Two => usart::StopBits::STOP2,
    };
    config
}

/// Line-oriented wrapper around a buffered UART
pub struct UartLink<'d> {
    uart: BufferedUart<'d>,
    reader: LineReader,
}

impl<'d> UartLink<'d> {
    /// Wrap an initialised UART
    #[must_use]
    pub const fn new(uart: BufferedUart<'d>) -> Self {
        Self {
            uart,
            reader: LineReader::new(),
        }
    }
}

impl SerialChannel for UartLink<'_> {
    fn try_read_line(&mut self) -> Option<Line> {
        let mut byte = [0u8; 1];
        loop {
            // Only read what is already buffered
            if !matches!(self.uart.read_ready(), Ok(true)) {
                return None;
            }
            match self.uart.read(&mut byte) {
                Ok(1) => {
                    if let Some(line) = self.reader.feed(byte[0]) {
                        return Some(line);
                    }
                }
                Ok(_) => return None,
                Err(err) => {
                    defmt::warn!("UART read error: {}", err);
                    self.reader.clear();
                    return None;
                }
            }
        }
    }

    fn write_line(&mut self, line: &str) {
        if self.uart.write_all(line.as_bytes()).is_err()
            || self.uart.write_all(LINE_TERMINATOR.as_bytes()).is_err()
        {
            defmt::warn!("UART write dropped");
        }
    }
}
