//! Session module — the signed-in user and its persistence boundary.
//!
//! [`SessionStore`] is a small key-value boundary (one JSON blob on disk)
//! with `set_user` / `get_user` / `clear_user`.  [`AuthService`] implements
//! the demo's mock credential flows on top of it: any non-empty credentials
//! are accepted; there is no server.

pub mod auth;
pub mod store;

pub use auth::{AuthError, AuthService};
pub use store::{SessionStore, User};
