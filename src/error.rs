//! Contains the main error type for the library.
use thiserror::Error;

/// The main error type for the library. Decode failures are contained by this error as [`Error::DecodeError`].
#[derive(Error, Debug)]
pub enum Error {
    #[error("Not Found")]
    NotFound,
    #[error("Timeout")]
    Timeout,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    DecodeError(#[from] crate::protocol::error::Error),
    #[cfg(feature = "serial")]
    #[error(transparent)]
    SerialPortError(serialport::Error),
}

impl From<tokio_stream::Elapsed> for Error {
    fn from(_: tokio_stream::Elapsed) -> Error {
        Error::Timeout
    }
}

#[cfg(feature = "serial")]
impl From<serialport::Error> for Error {
    fn from(e: serialport::Error) -> Error {
        match e.kind {
            serialport::ErrorKind::NoDevice => Error::NotFound,
            serialport::ErrorKind::Io(std::io::ErrorKind::NotFound) => Error::NotFound,
            _ => Error::SerialPortError(e),
        }
    }
}
