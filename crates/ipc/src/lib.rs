//! IPC message protocol for the Nitro pixel editor
//!
//! Defines all message types exchanged between the editor engine and a UI
//! front-end. Messages travel as JSON tagged with `type` / `data`.

mod commands;
mod error;
mod input;
mod messages;

pub use commands::*;
pub use error::*;
pub use input::*;
pub use messages::*;
