//! Reads newline terminated frames from a byte source and decodes them.

pub mod async_reader;

use std::io::{BufRead, Read};

use crate::protocol::{decode_frame, DecodeError, Reading, FRAME_LEN};
use crate::{Error, Result};
use tracing::{debug, warn};

/// Longest line kept in memory before it is discarded as a malformed frame
const MAX_LINE_LEN: usize = 4 * FRAME_LEN;

pub use async_reader::AsyncMultimeter;

/// Blocking reader over any [`BufRead`] source, e.g. a buffered serial port or a recorded capture.
///
/// Every line up to and including `\n` is treated as one frame. There is no resynchronization, a corrupted line simply fails to decode.
pub struct FrameReader<R> {
    reader: R,
    buffer: Vec<u8>,
}

impl<R: BufRead> FrameReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
        }
    }

    /// Read the raw bytes of the next frame. Returns `None` at the end of the input.
    ///
    /// On a read timeout [`Error::Timeout`] is returned and the partial frame is kept, the next call continues where this one stopped.
    /// A line longer than a few frames is dropped and reported as [`DecodeError::MalformedFrame`].
    pub fn read_frame(&mut self) -> Result<Option<Vec<u8>>> {
        let limit = (MAX_LINE_LEN - self.buffer.len()) as u64;
        match (&mut self.reader).take(limit).read_until(b'\n', &mut self.buffer) {
            Ok(0) if self.buffer.is_empty() => Ok(None),
            Ok(_) if self.buffer.len() >= MAX_LINE_LEN && self.buffer.last() != Some(&b'\n') => {
                warn!("Dropping {} bytes without line terminator", self.buffer.len());
                self.buffer.clear();
                Err(DecodeError::MalformedFrame.into())
            }
            Ok(_) => {
                let frame = std::mem::take(&mut self.buffer);
                debug!("RX {}", hex::encode(&frame));
                Ok(Some(frame))
            }
            Err(e) => match e.kind() {
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock => {
                    Err(Error::Timeout)
                }
                _ => Err(e.into()),
            },
        }
    }

    /// Read and decode the next frame.
    pub fn read_reading(&mut self) -> Result<Option<Reading>> {
        match self.read_frame()? {
            Some(frame) => Ok(Some(decode_frame(&frame)?)),
            None => Ok(None),
        }
    }

    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Yields one item per frame until the end of the input. Decode errors and timeouts are yielded as well, the caller decides whether to skip them.
impl<R: BufRead> Iterator for FrameReader<R> {
    type Item = Result<Reading>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_reading().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Mode;
    use std::io::{BufReader, Cursor, Read};

    /// Fails with a timeout once after the first chunk.
    struct TimeoutOnce {
        chunks: Vec<Vec<u8>>,
        timed_out: bool,
    }

    impl Read for TimeoutOnce {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.chunks.len() == 1 && !self.timed_out {
                self.timed_out = true;
                return Err(std::io::ErrorKind::TimedOut.into());
            }
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let chunk = self.chunks.remove(0);
            buf[..chunk.len()].copy_from_slice(&chunk);
            Ok(chunk.len())
        }
    }

    #[test]
    fn test_read_frames() {
        let data = b"\x80\x03\x02\x00\x00\x81\x81\x80\x84\r\n\x88\x09\x05\x01\x01\x80\x80\x80\x84\r\n";
        let mut reader = FrameReader::new(Cursor::new(&data[..]));

        assert_eq!(reader.read_frame().unwrap(), Some(data[..11].to_vec()));
        assert_eq!(reader.read_frame().unwrap(), Some(data[11..].to_vec()));
        assert_eq!(reader.read_frame().unwrap(), None);
    }

    #[test]
    fn test_partial_frame_at_end() {
        let data = b"\x80\x03\x02\x00\x00\x81\x81\x80\x84\r\n\x80\x03";
        let mut reader = FrameReader::new(Cursor::new(&data[..]));

        assert!(reader.read_reading().unwrap().is_some());
        match reader.read_reading() {
            Err(Error::DecodeError(DecodeError::MalformedFrame)) => {}
            other => panic!("Expected MalformedFrame, got {:?}", other),
        }
        assert!(reader.read_reading().unwrap().is_none());
    }

    #[test]
    fn test_iterator_keeps_going_after_error() {
        let data = b"\x80\x03\x02\x00\x00\x8b\x81\x80\x84\r\n\x80\x00\x06\x01\x00\x8C\x80\x80\x84\r\n";
        let results: Vec<Result<Reading>> = FrameReader::new(Cursor::new(&data[..])).collect();

        assert_eq!(results.len(), 2);
        assert!(matches!(
            results[0],
            Err(Error::DecodeError(DecodeError::UnknownMode(0x8b)))
        ));
        match &results[1] {
            Ok(reading) => {
                assert_eq!(reading.magnitude, 160);
                assert_eq!(reading.mode, Mode::Capacitance);
            }
            Err(e) => panic!("Unexpected error {:?}", e),
        }
    }

    #[test]
    fn test_line_length_bounded() {
        let data = vec![0x80; 1_000_000];
        let mut reader = FrameReader::new(Cursor::new(data));

        let mut errors = 0;
        loop {
            match reader.read_frame() {
                Err(Error::DecodeError(DecodeError::MalformedFrame)) => errors += 1,
                Ok(None) => break,
                Ok(Some(frame)) => assert!(frame.len() <= MAX_LINE_LEN),
                Err(e) => panic!("Unexpected error {:?}", e),
            }
            assert!(reader.buffer.len() <= MAX_LINE_LEN);
        }
        assert!(errors > 0);
    }

    #[test]
    fn test_reading_after_long_line() {
        let mut data = vec![0x80; 100];
        data.push(b'\n');
        data.extend_from_slice(b"\x80\x04\x07\x09\x01\x8a\x80\x80\x84\r\n");

        let results: Vec<Result<Reading>> = FrameReader::new(Cursor::new(data)).collect();
        assert!(results.len() > 1);
        for result in &results[..results.len() - 1] {
            assert!(matches!(
                result,
                Err(Error::DecodeError(DecodeError::MalformedFrame))
            ));
        }
        match results.last() {
            Some(Ok(reading)) => {
                assert_eq!(reading.magnitude, 1974);
                assert_eq!(reading.mode, Mode::Frequency);
            }
            other => panic!("Expected frequency reading, got {:?}", other),
        }
    }

    #[test]
    fn test_timeout_resumes_frame() {
        let source = TimeoutOnce {
            chunks: vec![
                b"\x88\x09\x05\x01".to_vec(),
                b"\x01\x80\x80\x80\x84\r\n".to_vec(),
            ],
            timed_out: false,
        };
        let mut reader = FrameReader::new(BufReader::new(source));

        assert!(matches!(reader.read_reading(), Err(Error::Timeout)));

        let reading = reader.read_reading().unwrap().unwrap();
        assert_eq!(reading.magnitude, 1159);
        assert!(reading.is_negative);
        assert_eq!(reading.mode, Mode::DcVoltage);
    }
}
