//! Actor System for Live Preview
//!
//! ```text
//! acceptor --TcpStream--> Coordinator --spawn--> Session (IO thread)
//!                         (tokio rt)               │
//!                                                  └─→ controller task
//! ```
//!
//! # Module Structure
//!
//! - `coordinator` - Owns the runtime, starts sessions, handles shutdown
//! - `session` - Per-client IO loop and its surface/shell implementation

pub mod coordinator;
pub mod session;

pub use coordinator::Coordinator;
