// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Range reduction helpers.

/// Reduce `value` into `[0, period)`.
///
/// `rem_euclid` can round up to exactly `period` for tiny negative inputs
/// (e.g. `-1e-20`); that case folds back to `0`.
#[inline]
pub fn wrap(value: f64, period: f64) -> f64 {
    let r = value.rem_euclid(period);
    if r >= period {
        0.0
    } else {
        r
    }
}

/// Reduce an angle in degrees into `[0, 360)`.
#[inline]
pub fn normalize_degrees(deg: f64) -> f64 {
    wrap(deg, 360.0)
}

/// Reduce a time of day in hours into `[0, 24)`.
#[inline]
pub fn normalize_hours(hours: f64) -> f64 {
    wrap(hours, 24.0)
}
