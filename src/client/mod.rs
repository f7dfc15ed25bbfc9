//! A small, single-connection IRC bot.
//!
//! A [`Bot`](struct.Bot.html) owns one connection to one server. It performs the handshake,
//! joins the configured channels, and then routes every incoming event to the
//! [`Handlers`](handlers/struct.Handlers.html) it was built with. Handlers reply through a
//! [`BotHandle`](struct.BotHandle.html), whose sending API lives on
//! [`BotExt`](ext/trait.BotExt.html).
//!
//! # Example
//!
//! ```no_run
//! use bananabot::client::prelude::*;
//!
//! # async fn run() -> bananabot::error::Result<()> {
//! let config = Config::load("config.yaml")?;
//! let mut handlers = Handlers::with_builtins();
//! handlers.on_command("hug", |bot, cmd| bot.send_action(&cmd.recipient, "hugs everyone"));
//!
//! let mut bot: Bot = Bot::new(config, handlers);
//! bot.connect().await?;
//! bot.mainloop().await
//! # }
//! ```

use log::{debug, info, trace};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::client::conn::Connection;
use crate::client::data::Config;
use crate::client::ext::BotExt;
use crate::client::handlers::Handlers;
use crate::error::{self, Error};
use crate::proto::{CommandEvent, Event, LineFramer, ServerMessage};

pub mod conn;
pub mod data;
pub mod ext;
pub mod handlers;
#[cfg(test)]
mod mock;
pub mod prelude;

/// Where a `Bot` is in the life of its connection.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BotState {
    /// No transport yet.
    Disconnected,
    /// A transport is open but nothing has been said.
    Connecting,
    /// `NICK` and `USER` are being sent.
    Identifying,
    /// The configured channels are being joined.
    Joining,
    /// Events are being read and dispatched.
    Running,
    /// The server closed the connection, or the bot quit.
    Closed,
    /// The mainloop stopped on an error.
    Faulted,
}

/// A cheap, cloneable handle for sending lines through a `Bot`.
///
/// Lines are queued and written by the bot after the current handler returns, in the order
/// they were queued.
#[derive(Clone, Debug)]
pub struct BotHandle {
    tx_outgoing: UnboundedSender<String>,
}

impl BotHandle {
    pub(crate) fn channel() -> (BotHandle, UnboundedReceiver<String>) {
        let (tx_outgoing, rx_outgoing) = mpsc::unbounded_channel();
        (BotHandle { tx_outgoing }, rx_outgoing)
    }
}

impl BotExt for BotHandle {
    fn send_raw<S: Into<String>>(&self, line: S) -> error::Result<()> {
        self.tx_outgoing.send(line.into())?;
        Ok(())
    }
}

/// The bot: one connection, its configuration, and the handlers it dispatches to.
#[derive(Debug)]
pub struct Bot<T = TcpStream> {
    config: Config,
    handlers: Handlers,
    conn: Option<Connection<T>>,
    handle: BotHandle,
    outgoing: UnboundedReceiver<String>,
    state: BotState,
}

impl<T> Bot<T> {
    /// Creates a disconnected bot.
    pub fn new(config: Config, handlers: Handlers) -> Bot<T> {
        let (handle, outgoing) = BotHandle::channel();
        Bot {
            config,
            handlers,
            conn: None,
            handle,
            outgoing,
            state: BotState::Disconnected,
        }
    }

    /// Gets the configuration being used with this bot.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Gets the current connection state.
    pub fn state(&self) -> BotState {
        self.state
    }

    /// Gets a handle for sending messages through this bot.
    pub fn handle(&self) -> BotHandle {
        self.handle.clone()
    }
}

impl Bot<TcpStream> {
    /// Opens a TCP connection to the configured host and port.
    pub async fn connect(&mut self) -> error::Result<()> {
        let host = self.config.host()?;
        let port = self.config.port();
        info!("Connecting to {}:{}.", host, port);
        let stream = TcpStream::connect((host, port)).await?;
        self.attach(stream)
    }
}

impl<T> Bot<T>
where
    T: AsyncRead + AsyncWrite + Unpin,
{
    /// Creates a bot speaking over an already open transport.
    pub fn with_transport(config: Config, handlers: Handlers, transport: T) -> error::Result<Bot<T>> {
        let mut bot = Bot::new(config, handlers);
        bot.attach(transport)?;
        Ok(bot)
    }

    fn attach(&mut self, transport: T) -> error::Result<()> {
        let framer = LineFramer::new(self.config.encoding())?;
        self.conn = Some(Connection::new(transport, framer));
        self.state = BotState::Connecting;
        Ok(())
    }

    fn conn(&mut self) -> error::Result<&mut Connection<T>> {
        self.conn.as_mut().ok_or(Error::NotConnected)
    }

    /// Sends `NICK` and `USER`.
    pub async fn identify(&mut self) -> error::Result<()> {
        self.state = BotState::Identifying;
        let nick = format!("NICK {}", self.config.nickname()?);
        let user = format!(
            "USER {} * * {}",
            self.config.username()?,
            self.config.realname()?
        );
        let conn = self.conn()?;
        conn.send_line(&nick).await?;
        conn.send_line(&user).await?;
        info!("Identified as {}.", self.config.nickname()?);
        Ok(())
    }

    /// Sends one `JOIN` per configured channel, in order.
    pub async fn join_channels(&mut self) -> error::Result<()> {
        self.state = BotState::Joining;
        let conn = self.conn.as_mut().ok_or(Error::NotConnected)?;
        for chan in self.config.channels() {
            conn.send_line(&format!("JOIN {}", chan)).await?;
            info!("Joining {}.", chan);
        }
        Ok(())
    }

    /// Reads and dispatches events until the server closes the connection.
    pub async fn run(&mut self) -> error::Result<()> {
        self.state = BotState::Running;
        loop {
            let conn = self.conn()?;
            let line = match conn.next_line().await? {
                Some(line) => line,
                None => {
                    info!("Server closed the connection.");
                    return Ok(());
                }
            };

            // Servers send PING without a prefix.
            if let Some(token) = line.strip_prefix("PING ") {
                conn.send_line(&format!("PONG {}", token)).await?;
                continue;
            }

            let msg = ServerMessage::parse(&line)?;
            if let Some(event) = Event::classify(msg)? {
                self.dispatch(event).await?;
            }
            let conn = self.conn.as_mut().ok_or(Error::NotConnected)?;
            conn.drain(&mut self.outgoing).await?;
        }
    }

    async fn dispatch(&mut self, event: Event) -> error::Result<()> {
        let conn = self.conn.as_mut().ok_or(Error::NotConnected)?;
        match event {
            Event::Ping(args) => {
                conn.send_line(&format!("PONG :{}", args.join(" "))).await?;
            }
            Event::Join(ev) => {
                for handler in self.handlers.join() {
                    handler(&self.handle, &ev)?;
                    conn.drain(&mut self.outgoing).await?;
                }
            }
            Event::Part(ev) => {
                for handler in self.handlers.part() {
                    handler(&self.handle, &ev)?;
                    conn.drain(&mut self.outgoing).await?;
                }
            }
            Event::Privmsg(ev) => {
                for handler in self.handlers.privmsg() {
                    handler(&self.handle, &ev)?;
                    conn.drain(&mut self.outgoing).await?;
                }

                let trigger = self.config.command_trigger();
                if let Some(cmd) = CommandEvent::extract(&ev, trigger) {
                    match self.handlers.command(&cmd.command) {
                        Some(handler) => {
                            debug!("Running command {} for {}.", cmd.command, cmd.sender);
                            handler(&self.handle, &cmd)?;
                            conn.drain(&mut self.outgoing).await?;
                        }
                        None => trace!("Ignoring unknown command {}.", cmd.command),
                    }
                }
            }
        }
        Ok(())
    }

    /// Identifies, joins the configured channels, and dispatches events until the server
    /// hangs up or something fails. The transport is shut down however this returns.
    pub async fn mainloop(&mut self) -> error::Result<()> {
        let res = self.drive().await;
        self.state = match res {
            Ok(()) => BotState::Closed,
            Err(_) => BotState::Faulted,
        };
        self.disconnect().await;
        res
    }

    async fn drive(&mut self) -> error::Result<()> {
        self.conn()?;
        self.identify().await?;
        self.join_channels().await?;
        self.run().await
    }

    /// Sends `QUIT` with the given reason and closes the connection.
    pub async fn quit(&mut self, reason: &str) -> error::Result<()> {
        let res = match self.conn.as_mut() {
            Some(conn) => conn.send_line(&format!("QUIT :{}", reason)).await,
            None => Ok(()),
        };
        self.state = BotState::Closed;
        self.disconnect().await;
        res
    }

    async fn disconnect(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = conn.shutdown().await {
                debug!("Failed to shut the connection down cleanly: {}", e);
            }
        }
    }
}
