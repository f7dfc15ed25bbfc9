//! A prelude re-exporting everything needed to write and run a bot.
//!
//! A [`Bot`](../struct.Bot.html) is built from a `Config`, which says which server to connect
//! to and as whom, and a set of `Handlers`, which say what to do with each `JOIN`, `PART`,
//! `PRIVMSG`, and command. Handlers reply through a `BotHandle` using the methods on `BotExt`.
//! The event types come from the `proto` crate.

pub use crate::{
    client::{
        data::Config,
        ext::BotExt,
        handlers::{Handler, Handlers},
        Bot, BotHandle, BotState,
    },
    proto::{
        CommandEvent, Event, JoinEvent, PartEvent, PrivmsgEvent, Sender, ServerMessage,
    },
};
