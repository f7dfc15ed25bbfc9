//! Bot commands carried inside channel and private messages.
use crate::event::PrivmsgEvent;
use crate::sender::Sender;

/// The character that marks a message as a command unless configured otherwise.
pub const DEFAULT_TRIGGER: char = '!';

/// A message of the form `!name arguments...`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CommandEvent {
    /// Who issued the command.
    pub sender: Sender,
    /// Where the command was sent (a channel, or our own nickname).
    pub recipient: String,
    /// The command name, without the trigger.
    pub command: String,
    /// The arguments split on whitespace.
    pub arg_tokens: Vec<String>,
    /// The arguments as typed, internal spacing preserved.
    pub arg_text: String,
}

impl CommandEvent {
    /// Extracts a command from a message whose text begins with `trigger`.
    ///
    /// # Example
    /// ```
    /// # use bananabot_proto::{CommandEvent, PrivmsgEvent, Sender};
    /// let msg = PrivmsgEvent {
    ///     sender: Sender::parse("nick!user@host").unwrap(),
    ///     recipient: "#chan".to_owned(),
    ///     text: "!echo hello world".to_owned(),
    /// };
    /// let cmd = CommandEvent::extract(&msg, '!').unwrap();
    /// assert_eq!(cmd.command, "echo");
    /// assert_eq!(cmd.arg_text, "hello world");
    /// assert_eq!(cmd.arg_tokens, vec!["hello", "world"]);
    /// ```
    pub fn extract(ev: &PrivmsgEvent, trigger: char) -> Option<CommandEvent> {
        let body = ev.text.strip_prefix(trigger)?;
        let (command, arg_text) = match body.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim_start()),
            None => (body, ""),
        };
        if command.is_empty() {
            return None;
        }

        Some(CommandEvent {
            sender: ev.sender.clone(),
            recipient: ev.recipient.clone(),
            command: command.to_owned(),
            arg_tokens: arg_text.split_whitespace().map(|s| s.to_owned()).collect(),
            arg_text: arg_text.to_owned(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::{CommandEvent, DEFAULT_TRIGGER};
    use crate::event::PrivmsgEvent;
    use crate::sender::Sender;

    fn privmsg(text: &str) -> PrivmsgEvent {
        PrivmsgEvent {
            sender: Sender::User {
                nick: "nick".into(),
                username: "user".into(),
                hostname: "host".into(),
            },
            recipient: "#chan".into(),
            text: text.into(),
        }
    }

    fn extract(text: &str) -> Option<CommandEvent> {
        CommandEvent::extract(&privmsg(text), DEFAULT_TRIGGER)
    }

    #[test]
    fn echo() {
        let cmd = extract("!echo hello world").unwrap();
        assert_eq!(cmd.sender, privmsg("").sender);
        assert_eq!(cmd.recipient, "#chan");
        assert_eq!(cmd.command, "echo");
        assert_eq!(cmd.arg_text, "hello world");
        assert_eq!(cmd.arg_tokens, vec!["hello", "world"]);
    }

    #[test]
    fn no_trigger() {
        assert_eq!(extract("just chatting"), None);
        assert_eq!(extract(" !echo hi"), None);
    }

    #[test]
    fn no_arguments() {
        let cmd = extract("!ping").unwrap();
        assert_eq!(cmd.command, "ping");
        assert_eq!(cmd.arg_text, "");
        assert!(cmd.arg_tokens.is_empty());
    }

    #[test]
    fn internal_spacing_kept_in_text_only() {
        let cmd = extract("!echo   a  b\tc").unwrap();
        assert_eq!(cmd.arg_text, "a  b\tc");
        assert_eq!(cmd.arg_tokens, vec!["a", "b", "c"]);
    }

    #[test]
    fn bare_trigger() {
        assert_eq!(extract("!"), None);
        assert_eq!(extract("! echo"), None);
    }

    #[test]
    fn other_trigger() {
        let cmd = CommandEvent::extract(&privmsg(".echo hi"), '.').unwrap();
        assert_eq!(cmd.command, "echo");
        assert_eq!(extract(".echo hi"), None);
    }
}
