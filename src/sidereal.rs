// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Greenwich Mean and Local Sidereal Time.
//!
//! GMST follows the IAU 1982 polynomial (seconds), evaluated at 0h UT of
//! the date, plus the mean solar seconds elapsed since then:
//!
//! ```text
//! t    = (JD − 2451545.0) / 36525
//! GMST = 24110.54841 + 8640184.812866·t + 0.093104·t² − 0.0000062·t³
//!        + 86400·(JD − 2451545.0 + 0.5)
//! ```
//!
//! The elapsed-day term is a multiple of 86400 s at every 0h UT, so it only
//! contributes the time of day once reduced modulo 24 h.  The combined
//! expression is Meeus (1998) eq. 12.4 written in seconds.
//!
//! No nutation (equation of the equinoxes) is applied: this is *mean*
//! sidereal time.

use qtty::{Degrees, Hour, Hours, Seconds};

use crate::angle::normalize_hours;
use crate::julian::JulianDay;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const GMST_AT_0H_S: f64 = 24_110.548_41;
const GMST_T1_S: f64 = 8_640_184.812_866;
const GMST_T2_S: f64 = 0.093_104;
const GMST_T3_S: f64 = -0.000_006_2;
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Degrees of right ascension per sidereal hour.
const DEGREES_PER_HOUR: f64 = 15.0;

/// A sidereal time, always in `[0, 24)` hours.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SiderealTime {
    hours: f64,
}

impl SiderealTime {
    /// Wrap any real number of hours into `[0, 24)`.
    #[inline]
    pub fn from_hours(hours: f64) -> Self {
        Self {
            hours: normalize_hours(hours),
        }
    }

    #[inline]
    pub fn hours(&self) -> Hours {
        Hours::new(self.hours)
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.hours
    }

    /// The same angle in degrees (15° per hour), i.e. the RAMC when this
    /// is a local sidereal time.
    #[inline]
    pub fn degrees(&self) -> Degrees {
        Degrees::new(self.hours * DEGREES_PER_HOUR)
    }
}

/// Milliseconds in a sidereal day of 24 h.
const MILLIS_PER_DAY: u64 = 86_400_000;

impl std::fmt::Display for SiderealTime {
    /// `hhHmmMss.sssS`, rounded to the millisecond; rounding carries into
    /// minutes and hours, and 24h wraps to 00h.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total_ms = (self.hours * 3_600_000.0).round() as u64 % MILLIS_PER_DAY;
        let h = total_ms / 3_600_000;
        let m = total_ms / 60_000 % 60;
        let ms = total_ms % 60_000;
        write!(f, "{:02}h{:02}m{:02}.{:03}s", h, m, ms / 1000, ms % 1000)
    }
}

/// Greenwich Mean Sidereal Time for a Julian Day.
pub fn greenwich_mean_sidereal_time(jd: JulianDay) -> SiderealTime {
    let days = jd.days_since_j2000().value();
    let t = jd.julian_centuries().value();
    let seconds = GMST_AT_0H_S
        + GMST_T1_S * t
        + GMST_T2_S * t * t
        + GMST_T3_S * t * t * t
        + SECONDS_PER_DAY * (days + 0.5);
    let hours = Seconds::new(seconds).to::<Hour>().value();
    SiderealTime::from_hours(hours)
}

/// Local Sidereal Time: GMST shifted by the east longitude (15° per hour).
pub fn local_sidereal_time(gmst: SiderealTime, longitude: Degrees) -> SiderealTime {
    SiderealTime::from_hours(gmst.value() + longitude.value() / DEGREES_PER_HOUR)
}
