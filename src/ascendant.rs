// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Ascendant and Midheaven ecliptic longitudes.
//!
//! Both are derived from the local sidereal time taken as the RAMC (right
//! ascension of the midheaven) and a fixed mean obliquity:
//!
//! ```text
//! Asc = atan2( cos(RAMC), −sin(RAMC)·cos(ε) − tan(φ)·sin(ε) )
//! MC  = atan2( sin(RAMC),  cos(RAMC)·cos(ε) )
//! ```
//!
//! Neither nutation nor precession is applied, so results diverge from a
//! high-precision ephemeris by up to a few arc-minutes.

use qtty::{Degrees, Radian};

use crate::angle::normalize_degrees;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::geo::GeoCoordinate;
use crate::sidereal::SiderealTime;

/// Ecliptic longitude of the ascendant in `[0, 360)` degrees.
///
/// `latitude` must already be finite and off the poles; use
/// [`ascendant_for`] to apply the configured [`PolarPolicy`](crate::PolarPolicy).
pub fn ascendant_longitude(lst: SiderealTime, latitude: Degrees, obliquity: Degrees) -> Degrees {
    let ramc = lst.degrees().to::<Radian>().value();
    let eps = obliquity.to::<Radian>().value();
    let phi = latitude.to::<Radian>().value();

    let asc = f64::atan2(
        ramc.cos(),
        -ramc.sin() * eps.cos() - phi.tan() * eps.sin(),
    );
    Degrees::new(normalize_degrees(asc.to_degrees()))
}

/// Ascendant for an observer, honouring the polar policy of `config`.
pub fn ascendant_for(lst: SiderealTime, observer: &GeoCoordinate, config: &EngineConfig) -> Result<Degrees> {
    let latitude = observer.effective_latitude(config.polar_policy)?;
    Ok(ascendant_longitude(lst, latitude, config.obliquity()))
}

/// Ecliptic longitude of the midheaven (MC) in `[0, 360)` degrees.
pub fn midheaven_longitude(lst: SiderealTime, obliquity: Degrees) -> Degrees {
    let ramc = lst.degrees().to::<Radian>().value();
    let eps = obliquity.to::<Radian>().value();

    let mc = f64::atan2(ramc.sin(), ramc.cos() * eps.cos());
    Degrees::new(normalize_degrees(mc.to_degrees()))
}
