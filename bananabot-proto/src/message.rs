//! A module providing a data structure for messages received from servers.
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::{MessageParseError, ProtocolError};
use crate::sender::Sender;

/// A single line received from the server: who sent it, the command, and its arguments.
///
/// The last argument holds the trailing parameter (the one introduced by `:`) verbatim,
/// spaces included.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ServerMessage {
    /// The origin of the message.
    pub sender: Sender,
    /// The command, e.g. `PRIVMSG` or a numeric reply such as `001`.
    pub command: String,
    /// The arguments, in protocol order.
    pub args: Vec<String>,
}

impl ServerMessage {
    /// Creates a message from its parts.
    pub fn new<S>(sender: Sender, command: &str, args: &[S]) -> ServerMessage
    where
        S: AsRef<str>,
    {
        ServerMessage {
            sender,
            command: command.to_owned(),
            args: args.iter().map(|a| a.as_ref().to_owned()).collect(),
        }
    }

    /// Parses a line (without its terminator) into a message.
    ///
    /// # Example
    /// ```
    /// # use bananabot_proto::{Sender, ServerMessage};
    /// let msg = ServerMessage::parse(":nick!user@host PRIVMSG #chan :hi there").unwrap();
    /// assert_eq!(msg.sender.nickname(), Some("nick"));
    /// assert_eq!(msg.command, "PRIVMSG");
    /// assert_eq!(msg.args, vec!["#chan", "hi there"]);
    /// ```
    pub fn parse(line: &str) -> Result<ServerMessage, ProtocolError> {
        parse_parts(line).map_err(|cause| ProtocolError::MalformedMessage {
            string: line.to_owned(),
            cause,
        })
    }
}

fn parse_parts(line: &str) -> Result<ServerMessage, MessageParseError> {
    let line = line.trim_end_matches(|c: char| c == '\r' || c == '\n');
    let state = line.strip_prefix(':').ok_or(MessageParseError::MissingSender)?;
    let (sender_info, state) = state
        .split_once(' ')
        .ok_or(MessageParseError::MissingCommand)?;
    let sender = Sender::parse(sender_info)?;

    let mut command = None;
    let mut args = Vec::new();
    let mut offset = 0;
    for token in state.split(' ') {
        let start = offset;
        offset += token.len() + 1;

        if token.is_empty() {
            continue;
        }
        if command.is_none() {
            command = Some(token);
        } else if token.starts_with(':') {
            // Everything from here on is one argument, spacing and all.
            args.push(state[start + 1..].to_owned());
            break;
        } else {
            args.push(token.to_owned());
        }
    }

    Ok(ServerMessage {
        sender,
        command: command.ok_or(MessageParseError::MissingCommand)?.to_owned(),
        args,
    })
}

impl FromStr for ServerMessage {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<ServerMessage, Self::Err> {
        ServerMessage::parse(s)
    }
}

/// Writes the message back in wire form (without a terminator), always using the trailing
/// form for the last argument.
impl Display for ServerMessage {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, ":{} {}", self.sender, self.command)?;
        if let Some((last, init)) = self.args.split_last() {
            for arg in init {
                write!(f, " {}", arg)?;
            }
            write!(f, " :{}", last)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::ServerMessage;
    use crate::error::{MessageParseError, ProtocolError};
    use crate::sender::Sender;

    fn user() -> Sender {
        Sender::User {
            nick: "nick".into(),
            username: "user".into(),
            hostname: "host".into(),
        }
    }

    #[test]
    fn from_string_trailing() {
        assert_eq!(
            ":nick!user@host COMMAND a b :trailing words"
                .parse::<ServerMessage>()
                .unwrap(),
            ServerMessage::new(user(), "COMMAND", &["a", "b", "trailing words"])
        );
    }

    #[test]
    fn from_string_server() {
        assert_eq!(
            ":irc.example.net COMMAND x".parse::<ServerMessage>().unwrap(),
            ServerMessage::new(
                Sender::Server {
                    hostname: "irc.example.net".into()
                },
                "COMMAND",
                &["x"]
            )
        );
    }

    #[test]
    fn from_string_no_trailing() {
        let msg: ServerMessage = ":nick!user@host JOIN #chan".parse().unwrap();
        assert_eq!(msg.command, "JOIN");
        assert_eq!(msg.args, vec!["#chan"]);
    }

    #[test]
    fn from_string_no_args() {
        let msg: ServerMessage = ":irc.example.net QUIT".parse().unwrap();
        assert_eq!(msg.command, "QUIT");
        assert!(msg.args.is_empty());
    }

    #[test]
    fn trailing_spacing_preserved() {
        let msg: ServerMessage = ":nick!user@host PRIVMSG #chan :a  b   c ".parse().unwrap();
        assert_eq!(msg.args, vec!["#chan", "a  b   c "]);
    }

    #[test]
    fn trailing_may_be_empty() {
        let msg: ServerMessage = ":nick!user@host PRIVMSG #chan :".parse().unwrap();
        assert_eq!(msg.args, vec!["#chan", ""]);
    }

    #[test]
    fn colon_inside_middle_arg() {
        let msg: ServerMessage = ":nick!user@host COMMAND ARG:test :Testing!".parse().unwrap();
        assert_eq!(msg.args, vec!["ARG:test", "Testing!"]);
    }

    #[test]
    fn trailing_colons_kept() {
        let msg: ServerMessage = ":nick!user@host PRIVMSG #chan ::) hi :x".parse().unwrap();
        assert_eq!(msg.args, vec!["#chan", ":) hi :x"]);
    }

    #[test]
    fn repeated_spaces_between_args() {
        let msg: ServerMessage = ":irc.example.net 353  me = #chan  :a b".parse().unwrap();
        assert_eq!(msg.command, "353");
        assert_eq!(msg.args, vec!["me", "=", "#chan", "a b"]);
    }

    #[test]
    fn atypical_endings() {
        let msg: ServerMessage = ":nick!user@host PRIVMSG #chan :hi\r\n".parse().unwrap();
        assert_eq!(msg.args, vec!["#chan", "hi"]);
    }

    #[test]
    fn missing_sender() {
        match "PING :token".parse::<ServerMessage>() {
            Err(ProtocolError::MalformedMessage { string, cause }) => {
                assert_eq!(string, "PING :token");
                assert_eq!(cause, MessageParseError::MissingSender);
            }
            other => panic!("expected a malformed message, got {:?}", other),
        }
    }

    #[test]
    fn missing_command() {
        for line in &[":irc.example.net", ":irc.example.net ", ""] {
            match line.parse::<ServerMessage>() {
                Err(ProtocolError::MalformedMessage { cause, .. }) => assert!(
                    cause == MessageParseError::MissingCommand
                        || cause == MessageParseError::MissingSender
                ),
                other => panic!("expected a malformed message, got {:?}", other),
            }
        }
    }

    #[test]
    fn malformed_user() {
        match ":nick!user PRIVMSG #chan :hi".parse::<ServerMessage>() {
            Err(ProtocolError::MalformedMessage { cause, .. }) => assert_eq!(
                cause,
                MessageParseError::MalformedUser {
                    sender: "nick!user".into()
                }
            ),
            other => panic!("expected a malformed message, got {:?}", other),
        }
    }

    #[test]
    fn to_string() {
        let msg = ServerMessage::new(user(), "PRIVMSG", &["#chan", "hello world"]);
        assert_eq!(msg.to_string(), ":nick!user@host PRIVMSG #chan :hello world");
        let msg: ServerMessage = ":irc.example.net QUIT".parse().unwrap();
        assert_eq!(msg.to_string(), ":irc.example.net QUIT");
    }
}
