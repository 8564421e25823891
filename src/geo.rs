// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Geographic observer location.

use qtty::Degrees;

use crate::config::PolarPolicy;
use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geodetic latitude/longitude of the observer, in degrees.
///
/// Longitude is positive east of Greenwich.  Both coordinates are range
/// checked at construction; the poles are representable but
/// [`effective_latitude`](Self::effective_latitude) applies a
/// [`PolarPolicy`] before the ascendant formula sees them.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawCoordinate"))]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Validate and build a coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(Error::LatitudeOutOfRange(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    #[inline]
    pub fn latitude(&self) -> Degrees {
        Degrees::new(self.latitude)
    }

    #[inline]
    pub fn longitude(&self) -> Degrees {
        Degrees::new(self.longitude)
    }

    /// `true` at exactly ±90°.
    #[inline]
    pub fn is_polar(&self) -> bool {
        self.latitude.abs() >= 90.0
    }

    /// Latitude to feed the ascendant formula under `policy`.
    ///
    /// * [`PolarPolicy::Reject`]: the poles yield [`Error::PolarLatitude`].
    /// * [`PolarPolicy::Clamp`]: latitudes beyond ±limit are pulled back.
    pub fn effective_latitude(&self, policy: PolarPolicy) -> Result<Degrees> {
        match policy {
            PolarPolicy::Reject if self.is_polar() => Err(Error::PolarLatitude(self.latitude)),
            PolarPolicy::Reject => Ok(self.latitude()),
            PolarPolicy::Clamp { limit_deg } => {
                if !(limit_deg > 0.0 && limit_deg < 90.0) {
                    return Err(Error::InvalidPolarLimit(limit_deg));
                }
                let clamped = self.latitude.clamp(-limit_deg, limit_deg);
                if clamped != self.latitude {
                    tracing::warn!(
                        latitude = self.latitude,
                        clamped,
                        "latitude clamped before ascendant computation"
                    );
                }
                Ok(Degrees::new(clamped))
            }
        }
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawCoordinate> for GeoCoordinate {
    type Error = Error;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Self::new(raw.latitude, raw.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_limits() {
        assert!(GeoCoordinate::new(90.0, 180.0).is_ok());
        assert!(GeoCoordinate::new(-90.0, -180.0).is_ok());
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(
            GeoCoordinate::new(90.5, 0.0),
            Err(Error::LatitudeOutOfRange(90.5))
        );
        assert_eq!(
            GeoCoordinate::new(0.0, -181.0),
            Err(Error::LongitudeOutOfRange(-181.0))
        );
        assert!(GeoCoordinate::new(f64::NAN, 0.0).is_err());
        assert!(GeoCoordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn poles_rejected_by_default_policy() {
        let north = GeoCoordinate::new(90.0, 10.0).unwrap();
        assert_eq!(
            north.effective_latitude(PolarPolicy::Reject),
            Err(Error::PolarLatitude(90.0))
        );
        let nyc = GeoCoordinate::new(40.7128, -74.006).unwrap();
        assert_eq!(
            nyc.effective_latitude(PolarPolicy::Reject).unwrap(),
            Degrees::new(40.7128)
        );
    }

    #[test]
    fn poles_clamped_when_requested() {
        let south = GeoCoordinate::new(-90.0, 0.0).unwrap();
        let lat = south
            .effective_latitude(PolarPolicy::Clamp { limit_deg: 89.9 })
            .unwrap();
        assert_eq!(lat, Degrees::new(-89.9));

        let mid = GeoCoordinate::new(45.0, 0.0).unwrap();
        let lat = mid
            .effective_latitude(PolarPolicy::Clamp { limit_deg: 89.9 })
            .unwrap();
        assert_eq!(lat, Degrees::new(45.0));
    }

    #[test]
    fn clamp_limit_is_validated() {
        let p = GeoCoordinate::new(10.0, 0.0).unwrap();
        assert_eq!(
            p.effective_latitude(PolarPolicy::Clamp { limit_deg: 90.0 }),
            Err(Error::InvalidPolarLimit(90.0))
        );
    }
}
