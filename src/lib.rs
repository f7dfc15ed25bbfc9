//! A small IRC bot that connects to one server, joins its channels, and answers commands.
//!
//! The wire protocol lives in the [`proto`](../bananabot_proto/index.html) crate. This crate
//! adds the configuration, the connection, and the event dispatcher.
#![warn(missing_docs)]

pub use bananabot_proto as proto;

pub mod client;
pub mod error;
