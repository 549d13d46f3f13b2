//! Process lifecycle shared by the server and its actors.

mod state;

pub use state::{is_shutdown, register_server, setup_shutdown_handler};
