//! Authentication for MAWAQIT sessions.
//!
//! This module provides:
//! - `AuthMethod`: explicit credential/token/anonymous modes
//! - `create_authenticated_client`: the operation-scoped session factory
//!
//! Sessions are never persisted or shared; each operation gets its own.

pub mod session;

pub use session::AuthMethod;
pub(crate) use session::create_authenticated_client;
