//! Import module - legacy config and history import flow

pub mod classify;
pub mod discovery;
pub mod error;
pub mod importer;
pub mod outcome;

pub use classify::*;
pub use discovery::*;
pub use error::*;
pub use importer::*;
pub use outcome::*;
