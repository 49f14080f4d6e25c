//! Types used in the M9803R protocol.
use std::fmt;

use crate::protocol::constants::*;
use crate::protocol::error::Error;

/// A validated frame: exactly [`FRAME_LEN`] bytes ending in `\r\n`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Frame {
    data: [u8; FRAME_LEN],
}

impl Frame {
    /// Status byte carrying the sign and overload flags
    pub fn status(&self) -> u8 {
        self.data[STATUS_OFFSET]
    }

    /// Digit bytes, least significant digit first
    pub fn digits(&self) -> [u8; DIGITS_LEN] {
        let mut digits = [0; DIGITS_LEN];
        digits.copy_from_slice(&self.data[DIGITS_OFFSET..DIGITS_OFFSET + DIGITS_LEN]);
        digits
    }

    /// Raw mode byte, high bit included
    pub fn mode(&self) -> u8 {
        self.data[MODE_OFFSET]
    }

    /// Bytes the decoder does not interpret
    pub fn reserved(&self) -> [u8; RESERVED_LEN] {
        let mut reserved = [0; RESERVED_LEN];
        reserved.copy_from_slice(&self.data[RESERVED_OFFSET..RESERVED_OFFSET + RESERVED_LEN]);
        reserved
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

impl TryFrom<&[u8]> for Frame {
    type Error = Error;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let data: [u8; FRAME_LEN] = bytes.try_into().map_err(|_| Error::MalformedFrame)?;

        if data[FRAME_LEN - TERMINATOR.len()..] != TERMINATOR {
            return Err(Error::MalformedFrame);
        }

        Ok(Self { data })
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("status", &hex::encode([self.status()]))
            .field("digits", &hex::encode(self.digits()))
            .field("mode", &hex::encode([self.mode()]))
            .field("reserved", &hex::encode(self.reserved()))
            .finish()
    }
}

/// One decoded measurement snapshot. The magnitude is the raw displayed digits, no range or unit scaling is applied.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reading {
    /// Displayed digits as an integer, 0 to 9999
    pub magnitude: u16,
    pub is_negative: bool,
    /// Input is out of range for the current mode
    pub is_overload: bool,
    pub mode: Mode,
}

impl Reading {
    /// Signed raw value of the display.
    pub fn value(&self) -> i32 {
        match self.is_negative {
            true => -(self.magnitude as i32),
            false => self.magnitude as i32,
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_overload {
            write!(f, "OL {}", self.mode)
        } else {
            write!(f, "{} {}", self.value(), self.mode)
        }
    }
}

impl TryFrom<&Frame> for Reading {
    type Error = Error;
    fn try_from(frame: &Frame) -> Result<Self, Self::Error> {
        Ok(Self {
            magnitude: super::decode_digits(frame.digits())?,
            is_negative: super::decode_sign(frame.status()),
            is_overload: super::decode_overload(frame.status()),
            // Mode bytes carry the protocol high bit, report the raw byte on failure
            mode: super::decode_mode(frame.mode() & MODE_MASK)
                .map_err(|_| Error::UnknownMode(frame.mode()))?,
        })
    }
}
