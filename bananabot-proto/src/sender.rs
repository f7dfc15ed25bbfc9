//! A module providing an enum for the origin of a message.
use std::fmt;
use std::str::FromStr;

use crate::error::MessageParseError;

/// The Sender indicates who a message came from, according to the server.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Sender {
    /// nickname "!" username "@" hostname
    User {
        /// The user's nickname.
        nick: String,
        /// The user's username (ident).
        username: String,
        /// The host the user is connecting from.
        hostname: String,
    },
    /// servername, e.g. irc.example.net
    Server {
        /// The server's hostname.
        hostname: String,
    },
}

impl Sender {
    /// Parses sender information (the text between the leading `:` and the first space).
    ///
    /// Anything containing a `!` has to be a full `nick!user@host`; everything else is taken
    /// to be a bare server hostname.
    ///
    /// # Example
    /// ```
    /// # use bananabot_proto::Sender;
    /// let user = Sender::parse("banana!bot@example.com").unwrap();
    /// assert_eq!(user.nickname(), Some("banana"));
    /// let server = Sender::parse("irc.example.net").unwrap();
    /// assert_eq!(server.nickname(), None);
    /// ```
    pub fn parse(s: &str) -> Result<Sender, MessageParseError> {
        if !s.contains('!') {
            return Ok(Sender::Server {
                hostname: s.to_owned(),
            });
        }

        // nick runs to the first '!', username to the next '@', and the host keeps the rest.
        let malformed = || MessageParseError::MalformedUser {
            sender: s.to_owned(),
        };
        let (nick, rest) = s.split_once('!').ok_or_else(malformed)?;
        let (username, hostname) = rest.split_once('@').ok_or_else(malformed)?;
        Ok(Sender::User {
            nick: nick.to_owned(),
            username: username.to_owned(),
            hostname: hostname.to_owned(),
        })
    }

    /// Gets the nickname of a user sender.
    pub fn nickname(&self) -> Option<&str> {
        match self {
            Sender::User { nick, .. } => Some(nick),
            Sender::Server { .. } => None,
        }
    }

    /// Gets the hostname, which every sender has.
    pub fn hostname(&self) -> &str {
        match self {
            Sender::User { hostname, .. } | Sender::Server { hostname } => hostname,
        }
    }
}

impl FromStr for Sender {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sender::parse(s)
    }
}

/// This is isomorphic with `FromStr`.
impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Sender::User {
                nick,
                username,
                hostname,
            } => write!(f, "{}!{}@{}", nick, username, hostname),
            Sender::Server { hostname } => write!(f, "{}", hostname),
        }
    }
}
