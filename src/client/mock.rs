use std::{
    io::{self, Cursor, Read},
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
};

use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};

#[derive(Debug, Default)]
struct Log {
    written: Vec<u8>,
    shut_down: bool,
}

/// A fake stream for testing network applications backed by buffers.
#[derive(Debug)]
pub struct MockStream {
    received: Cursor<Vec<u8>>,
    log: Arc<Mutex<Log>>,
}

/// A view of everything written to a `MockStream`, usable after the stream is gone.
#[derive(Clone, Debug)]
pub struct LogView {
    log: Arc<Mutex<Log>>,
}

impl MockStream {
    /// Creates a new mock stream with the specified bytes to read.
    pub fn new(initial: &[u8]) -> MockStream {
        MockStream {
            received: Cursor::new(initial.to_owned()),
            log: Arc::new(Mutex::new(Log::default())),
        }
    }

    /// Gets a view of the data written to this stream.
    pub fn view(&self) -> LogView {
        LogView {
            log: Arc::clone(&self.log),
        }
    }
}

impl LogView {
    /// Gets everything written so far as a string.
    pub fn sent(&self) -> String {
        String::from_utf8_lossy(&self.log.lock().written).into_owned()
    }

    /// Whether the stream was shut down.
    pub fn is_shut_down(&self) -> bool {
        self.log.lock().shut_down
    }
}

impl AsyncRead for MockStream {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let n = self.as_mut().received.read(buf.initialize_unfilled())?;
        buf.advance(n);
        Poll::Ready(Ok(()))
    }
}

impl AsyncWrite for MockStream {
    fn poll_write(
        self: Pin<&mut Self>,
        _: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<Result<usize, io::Error>> {
        self.log.lock().written.extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _: &mut Context<'_>) -> Poll<Result<(), io::Error>> {
        self.log.lock().shut_down = true;
        Poll::Ready(Ok(()))
    }
}
