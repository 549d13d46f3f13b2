//! Live channel between the server and preview clients.
//!
//! ```text
//! browser ──ws──→ acceptor ──TcpStream──→ coordinator ──→ session
//! ```

pub mod message;
pub mod server;

pub use message::{ClientMsg, ServerMsg};
