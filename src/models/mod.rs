//! Data models for MAWAQIT API payloads.
//!
//! - `Mosque`: directory records from the search endpoints
//! - `PrayerCalendar`: the prayer-times payload for one mosque

pub mod calendar;
pub mod mosque;

pub use calendar::PrayerCalendar;
pub use mosque::Mosque;
