//! Frame decoder for the M9803R serial protocol.
//!
//! The instrument sends one frame per display update. Each frame is decoded on its own, there is no state carried between frames.
//! ## Example:
//! ```rust
//! use m9803r::protocol::{decode_frame, Mode};
//!
//! let reading = decode_frame(b"\x81\x00\x00\x00\x04\x84\x85\x80\x84\r\n").unwrap();
//! assert_eq!(reading.magnitude, 4000);
//! assert!(reading.is_overload);
//! assert_eq!(reading.mode, Mode::Resistance);
//! ```

mod constants;
pub mod error;
mod types;

pub use constants::{Mode, FRAME_LEN, TERMINATOR};
pub use error::Error;
pub use error::Error as DecodeError;
pub use types::{Frame, Reading};

use constants::{DIGITS_LEN, NEGATIVE_MASK, OVERLOAD_MASK};

/// Reconstructs the displayed integer from the digit bytes, least significant digit first.
pub fn decode_digits(digits: [u8; DIGITS_LEN]) -> Result<u16, Error> {
    digits.iter().rev().try_fold(0u16, |acc, &digit| {
        if digit > 9 {
            return Err(Error::MalformedDigit(digit));
        }
        Ok(acc * 10 + digit as u16)
    })
}

pub fn decode_sign(status: u8) -> bool {
    status & NEGATIVE_MASK != 0
}

pub fn decode_overload(status: u8) -> bool {
    status & OVERLOAD_MASK != 0
}

/// Looks up the measurement mode code. The protocol high bit must already be stripped, any byte with it set is rejected.
pub fn decode_mode(mode: u8) -> Result<Mode, Error> {
    Mode::from_repr(mode).ok_or(Error::UnknownMode(mode))
}

/// Decodes a complete frame, including its `\r\n` terminator, into a [`Reading`].
pub fn decode_frame(bytes: &[u8]) -> Result<Reading, Error> {
    let frame = Frame::try_from(bytes)?;
    Reading::try_from(&frame)
}
