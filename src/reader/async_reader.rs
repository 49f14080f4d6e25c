//! Async wrapper around a [`FrameReader`].

use std::io::BufRead;

use crate::protocol::{DecodeError, Reading};
use crate::reader::FrameReader;
use crate::Error;
use crate::Stream;
use async_stream::stream;
use tokio::sync::oneshot::error::TryRecvError;
use tokio::sync::{broadcast, oneshot};
use tokio_stream::StreamExt;
use tracing::{debug, error, info, warn};

const RX_BUFFER_SIZE: usize = 1024;

type DecodeResult = std::result::Result<Reading, DecodeError>;

fn process<R: BufRead>(
    mut reader: FrameReader<R>,
    mut shutdown_receiver: oneshot::Receiver<()>,
    rx_sender: broadcast::Sender<DecodeResult>,
) {
    while let Err(TryRecvError::Empty) = shutdown_receiver.try_recv() {
        let result = match reader.read_reading() {
            Ok(Some(reading)) => Ok(reading),
            Ok(None) => {
                info!("End of input, stopping reader");
                break;
            }
            // Gives the loop a chance to see the shutdown signal
            Err(Error::Timeout) => continue,
            Err(Error::DecodeError(e)) => Err(e),
            Err(e) => {
                error!("Reading from multimeter failed: {}", e);
                break;
            }
        };

        debug!("RX {:?}", result);

        // Only fails when there are no receivers left
        let _ = rx_sender.send(result);
    }
}

/// Async wrapper around a [`FrameReader`]. Starts a background thread that reads and decodes frames, and uses a tokio broadcast channel to hand the results to any number of streams.
///
/// Dropping the adapter stops the background thread. The underlying source should have a read timeout, otherwise the thread only notices the shutdown once the next frame arrives.
pub struct AsyncMultimeter {
    processing_handle: Option<std::thread::JoinHandle<()>>,
    recv_receiver: broadcast::Receiver<DecodeResult>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl AsyncMultimeter {
    pub fn new<R: BufRead + Send + 'static>(reader: FrameReader<R>) -> Self {
        let (shutdown_sender, shutdown_receiver) = oneshot::channel();
        let (recv_sender, recv_receiver) = broadcast::channel(RX_BUFFER_SIZE);

        let mut ret = AsyncMultimeter {
            shutdown: Some(shutdown_sender),
            processing_handle: None,
            recv_receiver,
        };

        ret.processing_handle = Some(std::thread::spawn(move || {
            process(reader, shutdown_receiver, recv_sender);
        }));

        ret
    }

    /// Receive the result of every frame decoded after this call, including decode failures. The stream ends when the source is exhausted or fails.
    pub fn recv(&self) -> impl Stream<Item = DecodeResult> {
        let mut rx = self.recv_receiver.resubscribe();

        Box::pin(stream! {
            loop {
                match rx.recv().await {
                    Ok(result) => yield result,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("Receiver lagged, skipped {} frames", skipped);
                        continue
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }

    /// Receive successfully decoded readings only. Frames that fail to decode are logged and skipped.
    pub fn readings(&self) -> impl Stream<Item = Reading> {
        self.recv().filter_map(|result| match result {
            Ok(reading) => Some(reading),
            Err(e) => {
                warn!("Skipping frame: {}", e);
                None
            }
        })
    }
}

impl Drop for AsyncMultimeter {
    fn drop(&mut self) {
        if let Some(handle) = self.processing_handle.take() {
            // The thread may already have stopped on its own
            if let Some(shutdown) = self.shutdown.take() {
                let _ = shutdown.send(());
            }
            if handle.join().is_err() {
                error!("Multimeter reader thread panicked");
            }
        }
    }
}
