//! REST API client module for the MAWAQIT service.
//!
//! This module provides the `MawaqitClient` for communicating with the
//! MAWAQIT API: login, token acquisition, mosque search and prayer-time
//! calendars.
//!
//! The API uses an opaque access token obtained through HTTP Basic login,
//! sent back verbatim in the `Authorization` header (no `Bearer` prefix).

pub mod client;
pub mod error;

pub use client::MawaqitClient;
pub use error::ApiError;
