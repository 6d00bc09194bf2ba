//! Dropimport: Legacy Import Library
//!
//! Imports v4 configs and download history databases into the current
//! installation, isolating failures per database.

pub mod cli;
pub mod config;
pub mod import;
pub mod report;
pub mod transfer;
pub mod utils;
