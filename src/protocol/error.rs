//! Error types for the M9803R frame decoder.

use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
pub enum Error {
    /// Wrong frame length, or the frame does not end with `\r\n`
    #[error("Malformed Frame")]
    MalformedFrame,
    /// Mode byte does not map to a known measurement mode
    #[error("Unknown Mode: 0x{0:02x}")]
    UnknownMode(u8),
    /// Digit byte outside of 0-9
    #[error("Malformed Digit: 0x{0:02x}")]
    MalformedDigit(u8),
}
