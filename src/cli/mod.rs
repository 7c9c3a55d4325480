pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{AppArgs, CliArgs, Commands, DetectArgs, ScriptArgs};
pub use output::{OutputFormat, OutputFormatter};
