//! Line framing for the raw byte stream of a connection.
use std::collections::VecDeque;
use std::fmt;

use bytes::BytesMut;
use encoding::label::encoding_from_whatwg_label;
use encoding::{DecoderTrap, EncoderTrap, EncodingRef};
use log::warn;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::{self, ProtocolError};

/// The most bytes requested from the transport in a single read.
pub const READ_CHUNK_SIZE: usize = 4096;

/// The protocol line terminator.
pub const LINE_TERMINATOR: &str = "\r\n";

/// Turns a byte stream into complete protocol lines.
///
/// Incomplete trailing data is held back as raw bytes until its terminator arrives, so a
/// multi-byte character split across two reads is only decoded once the whole line is
/// present.
pub struct LineFramer {
    encoding: EncodingRef,
    remainder: BytesMut,
    lines: VecDeque<String>,
    next_index: usize,
}

impl LineFramer {
    /// Creates a framer decoding lines with the encoding named by a WHATWG label.
    pub fn new(label: &str) -> error::Result<LineFramer> {
        encoding_from_whatwg_label(label)
            .map(|enc| LineFramer {
                encoding: enc,
                remainder: BytesMut::with_capacity(READ_CHUNK_SIZE),
                lines: VecDeque::new(),
                next_index: 0,
            })
            .ok_or_else(|| ProtocolError::UnknownCodec {
                codec: label.to_owned(),
            })
    }

    /// Gets the canonical name of the encoding in use.
    pub fn encoding_name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Appends a chunk of received bytes, queueing every line it completes.
    pub fn feed(&mut self, chunk: &[u8]) -> error::Result<()> {
        self.remainder.extend_from_slice(chunk);
        while let Some(offset) = self.find_terminator() {
            let frame = self.remainder.split_to(offset + LINE_TERMINATOR.len());
            let line = self.decode(&frame[..offset])?;
            self.lines.push_back(line);
        }
        Ok(())
    }

    /// Takes the oldest complete line, if one is queued.
    pub fn pop_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }

    /// Gets the number of bytes held back as an incomplete line.
    pub fn pending(&self) -> usize {
        self.remainder.len()
    }

    /// Reads from `src` until a complete line is available and returns it without its
    /// terminator. Returns `None` once the peer has closed the stream.
    pub async fn next_line<R>(&mut self, src: &mut R) -> error::Result<Option<String>>
    where
        R: AsyncRead + Unpin,
    {
        let mut chunk = [0u8; READ_CHUNK_SIZE];
        loop {
            if let Some(line) = self.pop_line() {
                return Ok(Some(line));
            }

            let read = src.read(&mut chunk).await?;
            if read == 0 {
                if !self.remainder.is_empty() {
                    warn!(
                        "Discarding {} bytes of an unterminated line at end of stream.",
                        self.remainder.len()
                    );
                    self.remainder.clear();
                    self.next_index = 0;
                }
                return Ok(None);
            }
            self.feed(&chunk[..read])?;
        }
    }

    /// Encodes an outgoing line, cutting it at its first line break and terminating it with
    /// CRLF. Anything after an embedded line break is dropped so that a single call can
    /// never smuggle in a second command.
    pub fn encode_line(&self, line: &str) -> error::Result<Vec<u8>> {
        let end = line.find(|c: char| c == '\r' || c == '\n').unwrap_or(line.len());
        let mut data = String::with_capacity(end + LINE_TERMINATOR.len());
        data.push_str(&line[..end]);
        data.push_str(LINE_TERMINATOR);

        self.encoding
            .encode(&data, EncoderTrap::Replace)
            .map_err(|data| ProtocolError::CodecFailed {
                codec: self.encoding.name(),
                data: data.into_owned(),
            })
    }

    fn find_terminator(&mut self) -> Option<usize> {
        // A '\r' at the very end of the previous search may pair with a new '\n'.
        let start = self.next_index.saturating_sub(LINE_TERMINATOR.len() - 1);
        let found = self.remainder[start..]
            .windows(LINE_TERMINATOR.len())
            .position(|w| w == LINE_TERMINATOR.as_bytes());

        match found {
            Some(offset) => {
                self.next_index = 0;
                Some(start + offset)
            }
            None => {
                self.next_index = self.remainder.len();
                None
            }
        }
    }

    fn decode(&self, line: &[u8]) -> error::Result<String> {
        self.encoding
            .decode(line, DecoderTrap::Replace)
            .map_err(|data| ProtocolError::CodecFailed {
                codec: self.encoding.name(),
                data: data.into_owned(),
            })
    }
}

impl fmt::Debug for LineFramer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineFramer")
            .field("encoding", &self.encoding.name())
            .field("pending", &self.remainder.len())
            .field("queued", &self.lines.len())
            .finish()
    }
}
