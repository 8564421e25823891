// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation of the crate.
//!
//! All variants except [`Error::Config`] are *invalid input*: the caller
//! handed over something that is rejected before any computation runs.
//! Numerically degenerate outcomes (zero denominators, `ln(1)`, zero
//! charge) are **not** errors; they travel as
//! [`Metric::Undefined`](crate::Metric::Undefined) values instead.

use crate::body::CelestialBody;
use crate::zodiac::ZodiacSign;
use thiserror::Error;

/// Errors produced by `alchm`.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// Calendar fields do not describe a real UTC date-time.
    #[error("invalid date-time {year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second}")]
    InvalidDateTime {
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    },

    /// Timestamp text could not be parsed as RFC 3339.
    #[error("malformed timestamp {text:?}: {reason}")]
    MalformedTimestamp { text: String, reason: String },

    /// Latitude outside [-90, 90] degrees (or not finite).
    #[error("latitude {0}° outside [-90, 90]")]
    LatitudeOutOfRange(f64),

    /// Longitude outside [-180, 180] degrees (or not finite).
    #[error("longitude {0}° outside [-180, 180]")]
    LongitudeOutOfRange(f64),

    /// Latitude at a pole while the rejecting polar policy is active.
    #[error("latitude {0}° is at a pole; the ascendant is undefined there")]
    PolarLatitude(f64),

    /// Polar clamp limit must lie strictly between 0 and 90 degrees.
    #[error("polar clamp limit {0}° must lie in (0, 90)")]
    InvalidPolarLimit(f64),

    /// Ecliptic longitude was NaN or infinite.
    #[error("ecliptic longitude of {body} is not finite")]
    NonFiniteLongitude { body: CelestialBody },

    /// Sampling interval must be finite and strictly positive.
    #[error("time interval {0} s must be finite and > 0")]
    InvalidInterval(f64),

    /// Elemental composition has a negative/non-finite share or sums to zero.
    #[error("invalid elemental composition: {0}")]
    InvalidElemental(&'static str),

    /// Body name not recognised.
    #[error("unknown celestial body {0:?}")]
    UnknownBody(String),

    /// Sign name not recognised.
    #[error("unknown zodiac sign {0:?}")]
    UnknownSign(String),

    /// The same body was supplied twice for one chart.
    #[error("{0} appears more than once in the chart")]
    DuplicateBody(CelestialBody),

    /// A chart is missing one of the ten bodies.
    #[error("chart is missing {0}")]
    MissingBody(CelestialBody),

    /// A contribution table lacks an entry.
    #[error("contribution table has no entry for {body} in {sign}")]
    IncompleteTable {
        body: CelestialBody,
        sign: ZodiacSign,
    },

    /// Configuration or table data could not be decoded.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// `true` for every variant of the invalid-input kind.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, Self::Config(_))
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result alias for `alchm` operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_not_invalid_input() {
        assert!(!Error::Config("bad".into()).is_invalid_input());
        assert!(Error::PolarLatitude(90.0).is_invalid_input());
        assert!(Error::MissingBody(CelestialBody::Moon).is_invalid_input());
    }

    #[test]
    fn messages_name_the_offending_value() {
        let msg = Error::IncompleteTable {
            body: CelestialBody::Mars,
            sign: ZodiacSign::Leo,
        }
        .to_string();
        assert!(msg.contains("Mars"), "{msg}");
        assert!(msg.contains("Leo"), "{msg}");
        assert!(Error::LatitudeOutOfRange(91.5).to_string().contains("91.5"));
    }
}
