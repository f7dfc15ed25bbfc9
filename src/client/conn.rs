//! A module providing the connection used internally by `Bot`.
use std::fmt;

use log::debug;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::error;
use crate::proto::LineFramer;

/// A transport paired with the framer that splits its input into lines.
pub struct Connection<T> {
    transport: T,
    framer: LineFramer,
}

impl<T> fmt::Debug for Connection<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Connection({:?}, ...)", self.framer)
    }
}

impl<T> Connection<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Wraps a transport.
    pub fn new(transport: T, framer: LineFramer) -> Connection<T> {
        Connection { transport, framer }
    }

    /// Waits for the next line from the server. `None` means the server hung up.
    pub async fn next_line(&mut self) -> error::Result<Option<String>> {
        let line = self.framer.next_line(&mut self.transport).await?;
        if let Some(ref line) = line {
            debug!("<< {}", line);
        }
        Ok(line)
    }

    /// Writes one line to the server in a single write.
    pub async fn send_line(&mut self, line: &str) -> error::Result<()> {
        let data = self.framer.encode_line(line)?;
        self.transport.write_all(&data).await?;
        self.transport.flush().await?;
        debug!(">> {}", line.trim_end());
        Ok(())
    }

    /// Writes every line queued on `outgoing`, oldest first.
    pub async fn drain(&mut self, outgoing: &mut UnboundedReceiver<String>) -> error::Result<()> {
        while let Ok(line) = outgoing.try_recv() {
            self.send_line(&line).await?;
        }
        Ok(())
    }

    /// Shuts the transport down, consuming the connection.
    pub async fn shutdown(mut self) -> error::Result<()> {
        self.transport.shutdown().await?;
        Ok(())
    }
}
