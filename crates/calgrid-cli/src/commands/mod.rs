//! CLI subcommand implementations.

pub mod day;
pub mod events;
pub mod export;
pub mod month;
pub mod util;
