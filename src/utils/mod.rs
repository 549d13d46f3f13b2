//! Utility modules shared by the commands and the server.

pub mod mime;
pub mod path;
mod plural;

pub use plural::plural_count;
