//! calgrid CLI library.
//!
//! This crate provides the terminal interface for the calgrid calendar.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, EventFields, ExportFormat};
pub use config::Config;
