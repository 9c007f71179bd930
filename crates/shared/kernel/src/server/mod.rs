//! Shared HTTP plumbing: application state, guest sessions, the JSON
//! response envelope and the system routes.

mod health;
pub mod response;
pub mod router;
pub mod session;
pub mod state;
