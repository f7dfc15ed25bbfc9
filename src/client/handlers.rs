//! The table of handlers a `Bot` routes events to.
//!
//! Handlers are registered during setup and handed to the bot by value; the bot only ever
//! reads them. Every handler gets a [`BotHandle`](../struct.BotHandle.html) for replying
//! and the event that triggered it. An error returned from a handler is not caught: it ends
//! the mainloop.
use std::collections::HashMap;
use std::fmt;

use log::warn;

use crate::client::ext::BotExt;
use crate::client::BotHandle;
use crate::error::Result;
use crate::proto::{CommandEvent, JoinEvent, PartEvent, PrivmsgEvent};

/// A boxed handler for events of type `E`.
pub type Handler<E> = Box<dyn Fn(&BotHandle, &E) -> Result<()>>;

/// Handlers for each event kind, plus command handlers keyed by command name.
#[derive(Default)]
pub struct Handlers {
    join: Vec<Handler<JoinEvent>>,
    part: Vec<Handler<PartEvent>>,
    privmsg: Vec<Handler<PrivmsgEvent>>,
    command: HashMap<String, Handler<CommandEvent>>,
}

impl Handlers {
    /// Creates an empty registry.
    pub fn new() -> Handlers {
        Handlers::default()
    }

    /// Creates a registry holding the built-in commands (currently just `echo`).
    pub fn with_builtins() -> Handlers {
        let mut handlers = Handlers::new();
        handlers.on_command("echo", echo);
        handlers
    }

    /// Adds a handler run for every `JOIN`, after those already registered.
    pub fn on_join<F>(&mut self, handler: F) -> &mut Handlers
    where
        F: Fn(&BotHandle, &JoinEvent) -> Result<()> + 'static,
    {
        self.join.push(Box::new(handler));
        self
    }

    /// Adds a handler run for every `PART`, after those already registered.
    pub fn on_part<F>(&mut self, handler: F) -> &mut Handlers
    where
        F: Fn(&BotHandle, &PartEvent) -> Result<()> + 'static,
    {
        self.part.push(Box::new(handler));
        self
    }

    /// Adds a handler run for every `PRIVMSG`, after those already registered.
    pub fn on_privmsg<F>(&mut self, handler: F) -> &mut Handlers
    where
        F: Fn(&BotHandle, &PrivmsgEvent) -> Result<()> + 'static,
    {
        self.privmsg.push(Box::new(handler));
        self
    }

    /// Sets the handler for the command `name` (given without the trigger character).
    /// A command has at most one handler; registering another replaces it.
    pub fn on_command<F>(&mut self, name: &str, handler: F) -> &mut Handlers
    where
        F: Fn(&BotHandle, &CommandEvent) -> Result<()> + 'static,
    {
        if self.command.insert(name.to_owned(), Box::new(handler)).is_some() {
            warn!("Replaced the existing handler for command {}.", name);
        }
        self
    }

    /// Gets the `JOIN` handlers in registration order.
    pub fn join(&self) -> &[Handler<JoinEvent>] {
        &self.join
    }

    /// Gets the `PART` handlers in registration order.
    pub fn part(&self) -> &[Handler<PartEvent>] {
        &self.part
    }

    /// Gets the `PRIVMSG` handlers in registration order.
    pub fn privmsg(&self) -> &[Handler<PrivmsgEvent>] {
        &self.privmsg
    }

    /// Gets the handler for the command `name`, if any.
    pub fn command(&self, name: &str) -> Option<&Handler<CommandEvent>> {
        self.command.get(name)
    }

    /// Gets the names of all registered commands, sorted.
    pub fn commands(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.command.keys().map(|k| &k[..]).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for Handlers {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Handlers")
            .field("join", &self.join.len())
            .field("part", &self.part.len())
            .field("privmsg", &self.privmsg.len())
            .field("command", &self.commands())
            .finish()
    }
}

/// Replies to wherever the command was sent with the command's arguments.
pub fn echo(bot: &BotHandle, cmd: &CommandEvent) -> Result<()> {
    bot.send_privmsg(&cmd.recipient, &cmd.arg_text)
}
