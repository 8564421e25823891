// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Complete charts: one [`ZodiacPosition`] per [`CelestialBody`].
//!
//! A [`PlanetaryPositions`] always holds all ten bodies exactly once; the
//! type cannot be built otherwise.  Positions may come from the crate's own
//! ascendant chain, from an external ephemeris through [`EphemerisSource`],
//! or from a mix of both via [`PositionsBuilder`]; downstream stages cannot
//! tell the difference.

use qtty::Degrees;
use std::ops::Index;

use crate::body::CelestialBody;
use crate::error::{Error, Result};
use crate::instant::Instant;
use crate::zodiac::ZodiacPosition;

/// A complete chart of ten zodiac positions, stored in body order.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetaryPositions {
    positions: [ZodiacPosition; CelestialBody::COUNT],
}

impl PlanetaryPositions {
    /// Start an empty builder.
    pub fn builder() -> PositionsBuilder {
        PositionsBuilder::default()
    }

    /// Build a chart from `(body, ecliptic longitude in degrees)` pairs.
    ///
    /// Every body must appear exactly once with a finite longitude.
    pub fn from_longitudes<I>(longitudes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (CelestialBody, f64)>,
    {
        let mut builder = Self::builder();
        for (body, lon) in longitudes {
            builder.longitude(body, Degrees::new(lon))?;
        }
        builder.build()
    }

    #[inline]
    pub fn get(&self, body: CelestialBody) -> &ZodiacPosition {
        &self.positions[body.index()]
    }

    #[inline]
    pub fn ascendant(&self) -> &ZodiacPosition {
        self.get(CelestialBody::Ascendant)
    }

    /// Iterate `(body, position)` in body order.
    pub fn iter(&self) -> impl Iterator<Item = (CelestialBody, &ZodiacPosition)> + '_ {
        CelestialBody::ALL.into_iter().zip(self.positions.iter())
    }

    /// Copy of this chart with one body moved.
    pub fn with_position(mut self, body: CelestialBody, position: ZodiacPosition) -> Self {
        self.positions[body.index()] = position;
        self
    }
}

impl Index<CelestialBody> for PlanetaryPositions {
    type Output = ZodiacPosition;

    #[inline]
    fn index(&self, body: CelestialBody) -> &Self::Output {
        self.get(body)
    }
}

/// Incremental, validating assembly of a [`PlanetaryPositions`].
#[derive(Debug, Clone, Default)]
pub struct PositionsBuilder {
    slots: [Option<ZodiacPosition>; CelestialBody::COUNT],
}

impl PositionsBuilder {
    /// Place `body`; a second placement of the same body is an error.
    pub fn position(&mut self, body: CelestialBody, position: ZodiacPosition) -> Result<&mut Self> {
        if !position.exact_longitude.is_finite() {
            return Err(Error::NonFiniteLongitude { body });
        }
        let slot = &mut self.slots[body.index()];
        if slot.is_some() {
            return Err(Error::DuplicateBody(body));
        }
        *slot = Some(position);
        Ok(self)
    }

    /// Place `body` at an ecliptic longitude (any real value, reduced into `[0, 360)`).
    pub fn longitude(&mut self, body: CelestialBody, longitude: Degrees) -> Result<&mut Self> {
        if !longitude.value().is_finite() {
            return Err(Error::NonFiniteLongitude { body });
        }
        self.position(body, ZodiacPosition::from_longitude(longitude))
    }

    #[inline]
    pub fn contains(&self, body: CelestialBody) -> bool {
        self.slots[body.index()].is_some()
    }

    /// Finish the chart; the first missing body (in body order) is reported.
    pub fn build(&self) -> Result<PlanetaryPositions> {
        let mut positions = [ZodiacPosition::from_longitude(Degrees::new(0.0)); CelestialBody::COUNT];
        for (body, slot) in CelestialBody::ALL.into_iter().zip(self.slots.iter()) {
            positions[body.index()] = slot.ok_or(Error::MissingBody(body))?;
        }
        Ok(PlanetaryPositions { positions })
    }
}

/// Anything able to supply a complete chart for an instant, typically an
/// adapter over an external ephemeris service.
pub trait EphemerisSource {
    fn positions(&self, instant: &Instant) -> Result<PlanetaryPositions>;
}

/// A fixed chart acts as a source that ignores the instant.
impl EphemerisSource for PlanetaryPositions {
    fn positions(&self, _instant: &Instant) -> Result<PlanetaryPositions> {
        Ok(self.clone())
    }
}

impl<F> EphemerisSource for F
where
    F: Fn(&Instant) -> Result<PlanetaryPositions>,
{
    fn positions(&self, instant: &Instant) -> Result<PlanetaryPositions> {
        self(instant)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;
    use serde::de::Error as _;
    use serde::ser::SerializeMap;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::collections::BTreeMap;

    /// Serialised as a map `{ "Sun": { ...position... }, ... }`.
    impl Serialize for PlanetaryPositions {
        fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut map = serializer.serialize_map(Some(CelestialBody::COUNT))?;
            for (body, position) in self.iter() {
                map.serialize_entry(body.name(), position)?;
            }
            map.end()
        }
    }

    /// Only `exactLongitude` is trusted on input; sign and DMS are rebuilt.
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct RawPosition {
        exact_longitude: f64,
    }

    impl<'de> Deserialize<'de> for PlanetaryPositions {
        fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = BTreeMap::<String, RawPosition>::deserialize(deserializer)?;
            let mut builder = PlanetaryPositions::builder();
            for (name, position) in raw {
                let body: CelestialBody = name.parse().map_err(D::Error::custom)?;
                builder
                    .longitude(body, Degrees::new(position.exact_longitude))
                    .map_err(D::Error::custom)?;
            }
            builder.build().map_err(D::Error::custom)
        }
    }
}
