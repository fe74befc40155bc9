//! homework-bot library crate.
//!
//! Polls the homework review API and relays status changes to a Telegram chat.
//!
//! - [`config::BotConfig`] - credentials and settings read from the environment
//! - [`review`] - review API client, payload validation and status rendering
//! - [`notification::Notifier`] - best-effort delivery to the chat
//! - [`poller::PollLoop`] - the fetch/validate/render/notify/sleep loop

pub mod config;
pub mod error;
pub mod logging;
pub mod notification;
pub mod panic_hook;
pub mod poller;
pub mod review;
pub mod utils;

pub use error::{Error, Result};
