//! The line protocol spoken by bananabot.
//!
//! Bytes come off the wire through a [`LineFramer`](line/struct.LineFramer.html), each line
//! is parsed into a [`ServerMessage`](message/struct.ServerMessage.html), and messages are
//! classified into [`Event`](event/enum.Event.html)s. Messages starting with the trigger
//! character additionally yield a [`CommandEvent`](command/struct.CommandEvent.html).

#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod event;
pub mod line;
pub mod message;
pub mod sender;

pub use self::command::CommandEvent;
pub use self::event::{Event, JoinEvent, PartEvent, PrivmsgEvent};
pub use self::line::LineFramer;
pub use self::message::ServerMessage;
pub use self::sender::Sender;
