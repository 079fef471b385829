//! Terminal presentation: console commands and text/JSON frames.

pub mod commands;
pub mod console;
pub mod frame;

pub use commands::{Command, HELP};
pub use console::{apply, render, Outcome};
pub use frame::Frame;
