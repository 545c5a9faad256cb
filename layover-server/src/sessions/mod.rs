//! Planning sessions and their storage.
//!
//! A session is created when a plan is first generated and carries the
//! follow-up chat. Sessions are addressed by a random id.

mod error;
mod session;
mod store;

pub use error::SessionError;
pub use session::{Session, SessionId, SessionUpdate};
pub use store::{MokaSessionStore, SessionConfig, SessionStore};
