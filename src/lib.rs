//! Async client for the MAWAQIT prayer-times web service.
//!
//! Built for embedding in home-automation integrations: the functions in
//! [`ops`] authenticate (credentials or a stored token), fetch mosque
//! directory data and prayer-time calendars, and mask credential and
//! network failures as `false`/empty/`None` results so a polling caller
//! never has to special-case them. An empty result means "could not
//! complete", not "definitively no data".
//!
//! Each operation builds its own short-lived session and drops it when
//! done; no state is cached between calls.
//!
//! ```no_run
//! use mawaqit_client::{fetch_prayer_times, AuthMethod, ClientConfig};
//!
//! # async fn run() -> Result<(), mawaqit_client::ApiError> {
//! let config = ClientConfig::default();
//! let auth = AuthMethod::credentials("user@example.org", "secret");
//!
//! if let Some(calendar) = fetch_prayer_times(&config, None, None, Some("mosque-uuid"), &auth).await? {
//!     println!("today: {:?}", calendar.times);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;
pub mod ops;

pub use api::{ApiError, MawaqitClient};
pub use auth::AuthMethod;
pub use config::ClientConfig;
pub use models::{Mosque, PrayerCalendar};
pub use ops::{
    all_mosques_by_keyword, all_mosques_neighborhood, fetch_prayer_times, get_api_token,
    test_credentials,
};
