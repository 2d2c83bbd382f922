//! IPC message protocol for the fluid paint engine
//!
//! Defines the message types exchanged between the painting engine and the
//! host UI that embeds it. The host owns input capture, widgets and windows;
//! everything it tells the engine goes through [`HostToEngine`], everything
//! the engine reports back goes through [`EngineToHost`].

mod commands;
mod error;
mod input;
mod messages;

pub use commands::*;
pub use error::*;
pub use input::*;
pub use messages::*;
