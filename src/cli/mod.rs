// CLI module - Command line interface
pub mod args;
pub mod commands;
pub mod output;

pub use args::{config_to_args, Args};
pub use commands::{execute_command, start_session};
