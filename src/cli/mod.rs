pub mod ask;
pub mod commands;
pub mod models;
pub mod serve;

pub use commands::{Cli, Commands};
