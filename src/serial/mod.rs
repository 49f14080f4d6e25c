//! Serial port access for the M9803R, using the [`serialport`] crate.
//!
//! The line settings are fixed by the instrument: 7 data bits, no parity and 2 stop bits. Only the device path, baud rate and read timeout are configurable.

use std::fmt;
use std::io::BufReader;

use crate::reader::{AsyncMultimeter, FrameReader};
use crate::Result;

use serialport::{DataBits, Parity, SerialPort, StopBits};
use tracing::info;

pub const DEFAULT_PATH: &str = "/dev/tty.usbserial";
pub const DEFAULT_BAUD_RATE: u32 = 9600;
const DEFAULT_TIMEOUT_MS: u64 = 1000;

pub const DATA_BITS: DataBits = DataBits::Seven;
pub const PARITY: Parity = Parity::None;
pub const STOP_BITS: StopBits = StopBits::Two;

/// Configuration passed to [`open`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SerialConfig {
    /// Device path, e.g. `/dev/ttyUSB0`
    pub path: String,
    pub baud_rate: u32,
    /// Max time a single read blocks before giving the reader a chance to check for shutdown
    pub timeout: std::time::Duration,
}

impl SerialConfig {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_owned(),
            ..Default::default()
        }
    }
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_PATH.to_owned(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: std::time::Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

/// Prints the line settings as `path,baud,data bits,parity,stop bits`.
impl fmt::Display for SerialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{:?},{:?},{:?}",
            self.path, self.baud_rate, DATA_BITS, PARITY, STOP_BITS
        )
    }
}

/// Open the serial port with the line settings of the instrument.
pub fn open(config: &SerialConfig) -> Result<Box<dyn SerialPort>> {
    let port = serialport::new(config.path.as_str(), config.baud_rate)
        .data_bits(DATA_BITS)
        .parity(PARITY)
        .stop_bits(STOP_BITS)
        .timeout(config.timeout)
        .open()?;

    info!("Opened {}", config);
    Ok(port)
}

/// Convenience constructors for a multimeter connected over a serial port.
pub struct Multimeter;

impl Multimeter {
    /// Blocking frame reader on top of the serial port.
    pub fn new(config: &SerialConfig) -> Result<FrameReader<BufReader<Box<dyn SerialPort>>>> {
        let port = open(config)?;
        Ok(FrameReader::new(BufReader::new(port)))
    }

    /// Reads the serial port on a background thread and hands out readings as streams.
    pub fn new_async(config: &SerialConfig) -> Result<AsyncMultimeter> {
        let reader = Multimeter::new(config)?;
        Ok(AsyncMultimeter::new(reader))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SerialConfig::default();
        assert_eq!(config.path, "/dev/tty.usbserial");
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.timeout, std::time::Duration::from_millis(1000));
    }

    #[test]
    fn test_config_display() {
        let config = SerialConfig::new("/dev/ttyUSB0");
        assert_eq!(config.to_string(), "/dev/ttyUSB0,9600,Seven,None,Two");
    }
}
