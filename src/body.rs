// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The ten chart bodies.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bodies that make up a chart: the ascendant plus nine celestial bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CelestialBody {
    Ascendant,
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl CelestialBody {
    /// Number of bodies in a chart.
    pub const COUNT: usize = 10;

    /// All bodies, in chart order.
    pub const ALL: [CelestialBody; Self::COUNT] = [
        Self::Ascendant,
        Self::Sun,
        Self::Moon,
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
    ];

    /// 0-based index in [`ALL`](Self::ALL).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Ascendant => "Ascendant",
            Self::Sun => "Sun",
            Self::Moon => "Moon",
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
        }
    }

    /// Relative importance of the body when blending a chart's elements.
    ///
    /// The lights and the ascendant dominate, personal planets weigh half
    /// as much, the social planets a third, the outer planets a sixth.
    pub const fn chart_weight(self) -> f64 {
        match self {
            Self::Ascendant | Self::Sun | Self::Moon => 3.0,
            Self::Mercury | Self::Venus | Self::Mars => 1.5,
            Self::Jupiter | Self::Saturn => 1.0,
            Self::Uranus | Self::Neptune => 0.5,
        }
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CelestialBody {
    type Err = Error;

    /// Case-insensitive body name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownBody(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_distinct_bodies_in_index_order() {
        assert_eq!(CelestialBody::ALL.len(), 10);
        for (i, body) in CelestialBody::ALL.into_iter().enumerate() {
            assert_eq!(body.index(), i);
        }
    }

    #[test]
    fn parse_any_casing() {
        assert_eq!("sun".parse::<CelestialBody>().unwrap(), CelestialBody::Sun);
        assert_eq!("ASCENDANT".parse::<CelestialBody>().unwrap(), CelestialBody::Ascendant);
        assert!(matches!(
            "Pluto".parse::<CelestialBody>(),
            Err(Error::UnknownBody(_))
        ));
    }

    #[test]
    fn chart_weights_total() {
        let total: f64 = CelestialBody::ALL.iter().map(|b| b.chart_weight()).sum();
        assert_eq!(total, 16.5);
    }
}
