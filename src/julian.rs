// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Day: continuous day count on the civil (UTC) axis.
//!
//! [`JulianDay`] stores a single [`Days`] quantity.  Unlike a dynamical
//! Julian Ephemeris Day, no ΔT or leap-second correction is applied: the
//! value is derived directly from the UTC calendar fields of an
//! [`Instant`], which is all the sidereal-time formulas downstream expect.

use qtty::*;
use std::ops::{Add, Sub};

use crate::instant::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A point on the Julian Day axis.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDay {
    quantity: Days,
}

impl JulianDay {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw scalar day count.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self { quantity: days }
    }

    /// Civil-calendar conversion of a UTC instant.
    ///
    /// ```text
    /// decimalDay = day + (hour + minute/60 + second/3600) / 24
    /// a = ⌊(14 − month) / 12⌋
    /// y = year + 4800 − a
    /// m = month + 12a − 3
    /// JD = decimalDay + ⌊(153m + 2)/5⌋ + 365y + ⌊y/4⌋ − ⌊y/100⌋ + ⌊y/400⌋ − 32045 − 0.5
    /// ```
    ///
    /// Valid for any proleptic Gregorian date and never fails.  Leap
    /// seconds are not modelled.
    ///
    /// The result is an `f64` day count, so near the present epoch
    /// (JD ≈ 2.46e6) it resolves about 40 µs.  Instants closer together
    /// than that may map to the same Julian Day; instants at least 1 ms
    /// apart always map to strictly increasing values.
    pub fn from_instant(instant: &Instant) -> Self {
        let decimal_day = instant.day() as f64 + instant.day_hours() / 24.0;
        let month = instant.month() as i64;
        let a = (14 - month).div_euclid(12);
        let y = instant.year() as i64 + 4800 - a;
        let m = month + 12 * a - 3;
        let whole = (153 * m + 2).div_euclid(5) + 365 * y + y.div_euclid(4) - y.div_euclid(100)
            + y.div_euclid(400)
            - 32_045;
        Self::new(whole as f64 + decimal_day - 0.5)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// Days elapsed since J2000.0.
    #[inline]
    pub fn days_since_j2000(&self) -> Days {
        *self - Self::J2000
    }

    /// Julian centuries since J2000.0 (the `t` of the sidereal-time polynomial).
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            (self.days_since_j2000() / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }
}

impl From<&Instant> for JulianDay {
    #[inline]
    fn from(instant: &Instant) -> Self {
        Self::from_instant(instant)
    }
}

impl From<Instant> for JulianDay {
    #[inline]
    fn from(instant: Instant) -> Self {
        Self::from_instant(&instant)
    }
}

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for JulianDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Julian Day: {}", self.quantity)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for JulianDay {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for JulianDay {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl Sub<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl Sub for JulianDay {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    fn jd(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: f64) -> JulianDay {
        JulianDay::from_instant(&Instant::new(y, mo, d, h, mi, s).unwrap())
    }

    #[test]
    fn test_j2000_epoch() {
        assert_eq!(jd(2000, 1, 1, 12, 0, 0.0), JulianDay::J2000);
    }

    #[test]
    fn test_reference_epochs() {
        // Unix epoch and MJD epoch.
        assert_eq!(jd(1970, 1, 1, 0, 0, 0.0).value(), 2_440_587.5);
        assert_eq!(jd(1858, 11, 17, 0, 0, 0.0).value(), 2_400_000.5);
        // First day of the Gregorian calendar.
        assert_eq!(jd(1582, 10, 15, 0, 0, 0.0).value(), 2_299_160.5);
    }

    #[test]
    fn test_leap_day_is_contiguous() {
        let feb29 = jd(2000, 2, 29, 0, 0, 0.0);
        let mar1 = jd(2000, 3, 1, 0, 0, 0.0);
        assert_eq!(mar1 - feb29, Days::new(1.0));
    }

    #[test]
    fn test_millisecond_steps_are_strictly_increasing() {
        let mut last = jd(2024, 3, 20, 11, 59, 59.900);
        for k in 1..=20 {
            let next = jd(2024, 3, 20, 11, 59, 59.900 + 0.001 * k as f64);
            assert!(next.value() > last.value(), "step {k}: {} !> {}", next.value(), last.value());
            last = next;
        }
    }

    #[test]
    fn test_time_of_day_fraction() {
        let midnight = jd(2024, 3, 20, 0, 0, 0.0);
        let evening = jd(2024, 3, 20, 18, 0, 0.0);
        assert!(((evening - midnight) - Days::new(0.75)).abs() < Days::new(1e-12));
        let one_second = jd(2024, 3, 20, 0, 0, 1.0) - midnight;
        assert!((one_second.to::<Second>() - Seconds::new(1.0)).abs() < Seconds::new(1e-4));
    }

    #[test]
    fn test_julian_centuries() {
        let jd = JulianDay::J2000 + Days::new(36_525.0 * 3.0);
        assert!((jd.julian_centuries() - Centuries::new(3.0)).abs() < Centuries::new(1e-12));
        assert_eq!(JulianDay::J2000.julian_centuries(), Centuries::new(0.0));
    }

    #[test]
    fn test_display_jd() {
        let s = format!("{}", JulianDay::J2000);
        assert!(s.contains("Julian Day"));
    }

    #[test]
    fn test_add_sub_days() {
        let jd = JulianDay::new(2_451_545.0);
        assert_eq!((jd + Days::new(1.5)).value(), 2_451_546.5);
        assert_eq!((jd - Days::new(0.5)).value(), 2_451_544.5);
    }
}
