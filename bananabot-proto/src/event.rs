//! Typed events classified out of server messages.
use log::trace;

use crate::error::{MessageParseError, ProtocolError};
use crate::message::ServerMessage;
use crate::sender::Sender;

/// A message sent to a channel or directly to us.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PrivmsgEvent {
    /// Who sent the message.
    pub sender: Sender,
    /// The channel or nickname the message was addressed to.
    pub recipient: String,
    /// The message body.
    pub text: String,
}

/// Someone (possibly us) joined a channel.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct JoinEvent {
    /// Who joined.
    pub sender: Sender,
    /// The channel joined, when the server named one.
    pub channel: Option<String>,
}

/// Someone (possibly us) left a channel.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct PartEvent {
    /// Who left.
    pub sender: Sender,
    /// The channel left, when the server named one.
    pub channel: Option<String>,
}

/// The events the client knows how to route.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Event {
    /// A keep-alive probe, carrying the arguments to echo back.
    Ping(Vec<String>),
    /// `PRIVMSG`
    Privmsg(PrivmsgEvent),
    /// `JOIN`
    Join(JoinEvent),
    /// `PART`
    Part(PartEvent),
}

impl Event {
    /// Classifies a message by its command.
    ///
    /// Commands without an event (numerics, `NOTICE`, `MODE`, ...) give `Ok(None)`. A
    /// recognized command missing the arguments it needs is an error.
    pub fn classify(msg: ServerMessage) -> Result<Option<Event>, ProtocolError> {
        let event = match &msg.command[..] {
            "PING" => Event::Ping(msg.args),
            "PRIVMSG" => {
                if msg.args.len() < 2 {
                    return Err(ProtocolError::MalformedMessage {
                        string: msg.to_string(),
                        cause: MessageParseError::NotEnoughArguments {
                            command: "PRIVMSG",
                            expected: 2,
                            found: msg.args.len(),
                        },
                    });
                }
                let mut args = msg.args.into_iter();
                Event::Privmsg(PrivmsgEvent {
                    sender: msg.sender,
                    recipient: args.next().unwrap_or_default(),
                    text: args.next().unwrap_or_default(),
                })
            }
            "JOIN" => Event::Join(JoinEvent {
                sender: msg.sender,
                channel: msg.args.into_iter().next(),
            }),
            "PART" => Event::Part(PartEvent {
                sender: msg.sender,
                channel: msg.args.into_iter().next(),
            }),
            other => {
                trace!("Dropping unhandled command {}.", other);
                return Ok(None);
            }
        };
        Ok(Some(event))
    }
}
