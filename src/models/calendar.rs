// Allow dead code: API response structs have fields for completeness
#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Prayer-time calendar for one mosque, as returned by
/// `GET /mosque/{id}/prayer-times`.
///
/// `times` holds today's five prayer times as `"HH:MM"` strings in order
/// (Fajr, Dhuhr, Asr, Maghrib, Isha). `calendar` holds one entry per month,
/// each mapping the day of month (as a string key, `"1"`..`"31"`) to that
/// day's five times. Fields this crate does not interpret are kept in
/// `extra` so callers see the full payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrayerCalendar {
    #[serde(default)]
    pub times: Vec<String>,
    pub shuruq: Option<String>,
    pub jumua: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub calendar: Vec<HashMap<String, Vec<String>>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl PrayerCalendar {
    /// Prayer times for a calendar date, if the annual calendar covers it.
    pub fn times_on(&self, date: NaiveDate) -> Option<&[String]> {
        let month = self.calendar.get(date.month0() as usize)?;
        month.get(&date.day().to_string()).map(Vec::as_slice)
    }
}
