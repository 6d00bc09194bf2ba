//! CLI module - argument parsing, prompts, and the import menu

mod args;
pub mod file_selector;
pub mod menu;
pub mod prompts;

pub use args::{Cli, Commands};
pub use menu::*;
pub use prompts::*;
