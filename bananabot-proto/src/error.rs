//! Protocol errors using `thiserror`.

use thiserror::Error;

/// A `Result` type for `ProtocolError`s.
pub type Result<T, E = ProtocolError> = ::std::result::Result<T, E>;

/// A protocol error.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// An internal I/O error.
    #[error("an io error occurred")]
    Io(#[source] std::io::Error),

    /// The configured character encoding is not a known WHATWG label.
    #[error("unknown codec: {}", codec)]
    UnknownCodec {
        /// The attempted codec.
        codec: String,
    },

    /// A line could not be encoded with the configured encoding.
    #[error("codec {} failed: {}", codec, data)]
    CodecFailed {
        /// The canonical name of the failing codec.
        codec: &'static str,
        /// The data that failed to encode.
        data: String,
    },

    /// A line that could not be turned into a message or event.
    #[error("malformed message: {}", string)]
    MalformedMessage {
        /// The line that failed to parse.
        string: String,
        /// The detailed message parsing error.
        #[source]
        cause: MessageParseError,
    },
}

impl From<std::io::Error> for ProtocolError {
    fn from(e: std::io::Error) -> ProtocolError {
        ProtocolError::Io(e)
    }
}

/// Errors that occur when parsing lines into messages and events.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageParseError {
    /// The line did not start with the `:` sender prefix.
    #[error("missing sender prefix")]
    MissingSender,

    /// Nothing followed the sender prefix.
    #[error("missing command")]
    MissingCommand,

    /// The sender looked like a user but was not `nick!user@host`.
    #[error("malformed user sender: {}", sender)]
    MalformedUser {
        /// The offending sender text.
        sender: String,
    },

    /// A recognized command carried too few arguments.
    #[error("{} expects at least {} arguments, found {}", command, expected, found)]
    NotEnoughArguments {
        /// The command being classified.
        command: &'static str,
        /// The minimum number of arguments.
        expected: usize,
        /// The number of arguments present.
        found: usize,
    },
}
