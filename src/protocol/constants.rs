//! Constants for the M9803R wire format.
use strum_macros::{Display, EnumIter, FromRepr};

/// Length of a frame on the wire, including the terminator
pub const FRAME_LEN: usize = 11;
/// Every frame ends with `\r\n`
pub const TERMINATOR: [u8; 2] = [0x0d, 0x0a];

// Frame layout
//  byte 0      status (sign, overload)
//  byte 1..=4  digits, least significant first
//  byte 5      mode, high bit always set
//  byte 6..=8  reserved
//  byte 9..=10 terminator
pub const STATUS_OFFSET: usize = 0;
pub const DIGITS_OFFSET: usize = 1;
pub const DIGITS_LEN: usize = 4;
pub const MODE_OFFSET: usize = 5;
pub const RESERVED_OFFSET: usize = 6;
pub const RESERVED_LEN: usize = 3;

pub static NEGATIVE_MASK: u8 = 0x08;
pub static OVERLOAD_MASK: u8 = 0x01;
pub static MODE_MASK: u8 = 0x7f;

/// Measurement mode selected on the instrument. Code 11 is not used by the protocol.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, FromRepr, EnumIter, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Mode {
    #[strum(to_string = "DC V")]
    DcVoltage = 0,
    #[strum(to_string = "AC V")]
    AcVoltage = 1,
    #[strum(to_string = "DC mA")]
    DcMilliamps = 2,
    #[strum(to_string = "AC mA")]
    AcMilliamps = 3,
    #[strum(to_string = "Ohm")]
    Resistance = 4,
    #[strum(to_string = "Continuity")]
    Continuity = 5,
    #[strum(to_string = "Diode")]
    Diode = 6,
    /// Adapter input
    #[strum(to_string = "ADP")]
    Adp = 7,
    #[strum(to_string = "DC A")]
    DcAmps = 8,
    #[strum(to_string = "AC A")]
    AcAmps = 9,
    #[strum(to_string = "Hz")]
    Frequency = 10,
    #[strum(to_string = "Cap")]
    Capacitance = 12,
}

impl Mode {
    /// Numeric code of the mode as sent by the instrument, without the high bit.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}
