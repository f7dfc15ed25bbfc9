//! Utilities and shortcuts for talking to the server from handlers.
//!
//! This module provides the [`BotExt`](trait.BotExt.html) trait which is the idiomatic way of
//! sending messages from a handler. It is implemented for
//! [`BotHandle`](../struct.BotHandle.html), the handle every handler receives.
//!
//! # Examples
//!
//! ```
//! use bananabot::client::prelude::*;
//!
//! let mut handlers = Handlers::new();
//! handlers.on_join(|bot, join| match join.sender.nickname() {
//!     Some(nick) => bot.send_privmsg("#bananas", format!("Welcome, {}!", nick)),
//!     None => Ok(()),
//! });
//! ```
use std::fmt::Display;

use crate::error::Result;

/// Idiomatic extensions for sending messages through a bot handle.
pub trait BotExt {
    /// Queues a raw protocol line. The line terminator is added on the way out.
    fn send_raw<S: Into<String>>(&self, line: S) -> Result<()>
    where
        Self: Sized;

    /// Sends a message to the specified target (a channel or a nickname).
    fn send_privmsg<S1, S2>(&self, target: S1, message: S2) -> Result<()>
    where
        Self: Sized,
        S1: Display,
        S2: Display,
    {
        self.send_raw(format!("PRIVMSG {} :{}", target, message))
    }

    /// Sends a CTCP-escaped message to the specified target.
    fn send_ctcp<S1, S2>(&self, target: S1, msg: S2) -> Result<()>
    where
        Self: Sized,
        S1: Display,
        S2: Display,
    {
        self.send_privmsg(target, format!("\u{001}{}\u{001}", msg))
    }

    /// Sends an action command to the specified target.
    fn send_action<S1, S2>(&self, target: S1, msg: S2) -> Result<()>
    where
        Self: Sized,
        S1: Display,
        S2: Display,
    {
        self.send_ctcp(target, format!("ACTION {}", msg))
    }

    /// Joins the specified channel.
    fn join_channel<S: Display>(&self, chan: S) -> Result<()>
    where
        Self: Sized,
    {
        self.send_raw(format!("JOIN {}", chan))
    }

    /// Leaves the specified channel.
    fn part_channel<S: Display>(&self, chan: S) -> Result<()>
    where
        Self: Sized,
    {
        self.send_raw(format!("PART {}", chan))
    }
}
