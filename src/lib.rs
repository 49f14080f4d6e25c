//! # The M9803R Crate
//! Decoder for the serial data stream of the M9803R handheld digital multimeter and its protocol-compatible clones. The instrument continuously sends fixed-length binary frames, each carrying the displayed digits, the sign and overload flags, and the active measurement mode.
//!
//! ## Decoding Example
//!
//! The decoder is a set of pure functions. A single frame, including its `\r\n` terminator, decodes into a [`Reading`].
//!
//! ```rust
//! use m9803r::{decode_frame, Mode};
//!
//! let frame = b"\x88\x09\x05\x01\x01\x80\x80\x80\x84\r\n";
//! let reading = decode_frame(frame).unwrap();
//!
//! assert_eq!(reading.magnitude, 1159);
//! assert!(reading.is_negative);
//! assert_eq!(reading.mode, Mode::DcVoltage);
//! ```
//!
//! ## Async Example
//!
//! With the `serial` feature the port is opened with the line settings of the instrument, and readings are received as a stream. Dropping the adapter stops the background reader.
//!
//! ```rust,ignore
//! use m9803r::StreamExt;
//! async fn dmm_example() {
//!     let config = m9803r::serial::SerialConfig::default();
//!     let dmm = m9803r::serial::Multimeter::new_async(&config).unwrap();
//!     let mut stream = dmm.readings();
//!
//!     while let Some(reading) = stream.next().await {
//!         println!("{}", reading);
//!     }
//! }
//! ```
//!

mod error;
pub mod protocol;
pub mod reader;

#[cfg(feature = "serial")]
pub mod serial;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;

pub use crate::protocol::{
    decode_digits, decode_frame, decode_mode, decode_overload, decode_sign, DecodeError, Frame,
    Mode, Reading,
};
pub use reader::{AsyncMultimeter, FrameReader};
pub use tokio_stream::{Stream, StreamExt, Timeout};
