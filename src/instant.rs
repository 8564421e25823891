// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Validated UTC calendar instant.
//!
//! [`Instant`] is the entry point of the calculation chain.  It wraps a
//! `chrono::DateTime<Utc>` whose calendar fields have been validated at
//! construction, so every later stage can rely on a real Gregorian date.
//!
//! Leap seconds are **not** modelled: a chrono leap-second representation
//! (`nanosecond >= 1e9`) is folded back into the last regular second of the
//! minute.

use chrono::{DateTime, Datelike, NaiveDate, SecondsFormat, Timelike, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const NANOS_PER_SECOND: f64 = 1e9;
const MAX_NANOS: u32 = 999_999_999;

/// A UTC date-time with a validated calendar date.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    datetime: DateTime<Utc>,
}

impl Instant {
    // ── constructors ──────────────────────────────────────────────────

    /// Build an instant from calendar fields.
    ///
    /// `second` may carry a fractional part but must lie in `[0, 60)`.
    /// Any field outside its calendar range is rejected with
    /// [`Error::InvalidDateTime`].
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Result<Self> {
        let invalid = || Error::InvalidDateTime {
            year,
            month,
            day,
            hour,
            minute,
            second,
        };
        if !second.is_finite() || !(0.0..60.0).contains(&second) {
            return Err(invalid());
        }
        let whole = second.floor();
        let nanos = (((second - whole) * NANOS_PER_SECOND).round() as u32).min(MAX_NANOS);
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_nano_opt(hour, minute, whole as u32, nanos))
            .ok_or_else(invalid)?;
        Ok(Self {
            datetime: DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc),
        })
    }

    /// Build an instant from a `chrono::DateTime<Utc>`.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let datetime = if datetime.nanosecond() > MAX_NANOS {
            datetime.with_nanosecond(MAX_NANOS).unwrap_or(datetime)
        } else {
            datetime
        };
        Self { datetime }
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The wrapped `chrono` value.
    #[inline]
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.datetime
    }

    #[inline]
    pub fn year(&self) -> i32 {
        self.datetime.year()
    }

    /// Month, 1-based.
    #[inline]
    pub fn month(&self) -> u32 {
        self.datetime.month()
    }

    /// Day of month, 1-based.
    #[inline]
    pub fn day(&self) -> u32 {
        self.datetime.day()
    }

    #[inline]
    pub fn hour(&self) -> u32 {
        self.datetime.hour()
    }

    #[inline]
    pub fn minute(&self) -> u32 {
        self.datetime.minute()
    }

    /// Seconds within the minute, including the fractional part.
    #[inline]
    pub fn second(&self) -> f64 {
        self.datetime.second() as f64 + self.datetime.nanosecond() as f64 / NANOS_PER_SECOND
    }

    /// Hours elapsed since 00:00 of the same day.
    #[inline]
    pub fn day_hours(&self) -> f64 {
        self.hour() as f64 + self.minute() as f64 / 60.0 + self.second() / 3600.0
    }
}

// ── Display / FromStr ─────────────────────────────────────────────────────

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.datetime.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromStr for Instant {
    type Err = Error;

    /// Parse an RFC 3339 timestamp; any offset is converted to UTC.
    fn from_str(s: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| Self::from_utc(dt.with_timezone(&Utc)))
            .map_err(|e| Error::MalformedTimestamp {
                text: s.to_owned(),
                reason: e.to_string(),
            })
    }
}

impl From<DateTime<Utc>> for Instant {
    #[inline]
    fn from(datetime: DateTime<Utc>) -> Self {
        Self::from_utc(datetime)
    }
}

impl From<Instant> for DateTime<Utc> {
    #[inline]
    fn from(instant: Instant) -> Self {
        instant.datetime
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Instant {
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_instant_fields_roundtrip() {
        let t = Instant::new(2024, 3, 20, 12, 30, 15.25).unwrap();
        assert_eq!(t.year(), 2024);
        assert_eq!(t.month(), 3);
        assert_eq!(t.day(), 20);
        assert_eq!(t.hour(), 12);
        assert_eq!(t.minute(), 30);
        assert!((t.second() - 15.25).abs() < 1e-9);
        assert!((t.day_hours() - (12.0 + 30.0 / 60.0 + 15.25 / 3600.0)).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_impossible_dates() {
        assert!(Instant::new(2023, 2, 29, 0, 0, 0.0).is_err());
        assert!(Instant::new(2024, 13, 1, 0, 0, 0.0).is_err());
        assert!(Instant::new(2024, 4, 31, 0, 0, 0.0).is_err());
        assert!(Instant::new(2024, 1, 1, 24, 0, 0.0).is_err());
        assert!(Instant::new(2024, 1, 1, 0, 60, 0.0).is_err());
        assert!(Instant::new(2024, 1, 1, 0, 0, 60.0).is_err());
        assert!(Instant::new(2024, 1, 1, 0, 0, -0.5).is_err());
        assert!(Instant::new(2024, 1, 1, 0, 0, f64::NAN).is_err());
        assert!(Instant::new(2024, 2, 29, 0, 0, 0.0).is_ok());
    }

    #[test]
    fn test_parse_rfc3339_converts_offset_to_utc() {
        let t: Instant = "2024-03-20T08:00:00-04:00".parse().unwrap();
        assert_eq!(t.hour(), 12);
        assert_eq!(t.day(), 20);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = "20/03/2024 noon".parse::<Instant>().unwrap_err();
        assert!(matches!(err, Error::MalformedTimestamp { .. }));
    }

    #[test]
    fn test_leap_second_is_folded() {
        let leap = Utc
            .with_ymd_and_hms(2016, 12, 31, 23, 59, 59)
            .unwrap()
            .with_nanosecond(1_500_000_000)
            .unwrap();
        let t = Instant::from_utc(leap);
        assert!(t.second() < 60.0);
        assert_eq!(t.minute(), 59);
    }

    #[test]
    fn test_ordering_follows_time() {
        let a = Instant::new(2024, 1, 1, 0, 0, 0.0).unwrap();
        let b = Instant::new(2024, 1, 1, 0, 0, 0.5).unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_display_is_rfc3339() {
        let t = Instant::new(2000, 1, 1, 12, 0, 0.0).unwrap();
        assert_eq!(t.to_string(), "2000-01-01T12:00:00Z");
        assert_eq!(t.to_string().parse::<Instant>().unwrap(), t);
    }
}
