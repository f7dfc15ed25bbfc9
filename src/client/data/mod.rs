//! Data related to bot configuration.

pub use crate::client::data::config::Config;

pub mod config;
