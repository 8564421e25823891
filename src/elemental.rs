// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Classical elements and normalised elemental compositions.

use std::fmt;

use crate::error::{Error, Result};
use crate::positions::PlanetaryPositions;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The four classical elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Element {
    Fire,
    Water,
    Earth,
    Air,
}

impl Element {
    pub const ALL: [Element; 4] = [Self::Fire, Self::Water, Self::Earth, Self::Air];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Water => "Water",
            Self::Earth => "Earth",
            Self::Air => "Air",
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shares of the four elements; each in `[0, 1]`, summing to 1.
///
/// Construction always normalises, so a value of this type is a valid
/// composition by construction.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "RawElemental", rename_all = "PascalCase")
)]
pub struct ElementalProperties {
    fire: f64,
    water: f64,
    earth: f64,
    air: f64,
}

impl ElementalProperties {
    /// Normalise four non-negative weights into a composition.
    ///
    /// # Errors
    /// [`Error::InvalidElemental`] when a weight is negative or not finite,
    /// or when all four are zero.
    pub fn new(fire: f64, water: f64, earth: f64, air: f64) -> Result<Self> {
        let weights = [fire, water, earth, air];
        if weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::InvalidElemental("share is not finite"));
        }
        if weights.iter().any(|w| *w < 0.0) {
            return Err(Error::InvalidElemental("share is negative"));
        }
        let sum: f64 = weights.iter().sum();
        if sum <= 0.0 || !sum.is_finite() {
            return Err(Error::InvalidElemental("shares sum to zero"));
        }
        Ok(Self {
            fire: fire / sum,
            water: water / sum,
            earth: earth / sum,
            air: air / sum,
        })
    }

    /// The neutral profile, 0.25 each.
    pub const fn balanced() -> Self {
        Self {
            fire: 0.25,
            water: 0.25,
            earth: 0.25,
            air: 0.25,
        }
    }

    /// Elemental profile of a chart: each body's sign element counted with
    /// the body's [`chart_weight`](crate::CelestialBody::chart_weight).
    pub fn from_positions(positions: &PlanetaryPositions) -> Self {
        let mut weights = [0.0_f64; 4];
        for (body, position) in positions.iter() {
            let slot = match position.sign.element() {
                Element::Fire => 0,
                Element::Water => 1,
                Element::Earth => 2,
                Element::Air => 3,
            };
            weights[slot] += body.chart_weight();
        }
        let sum: f64 = weights.iter().sum();
        Self {
            fire: weights[0] / sum,
            water: weights[1] / sum,
            earth: weights[2] / sum,
            air: weights[3] / sum,
        }
    }

    #[inline]
    pub fn fire(&self) -> f64 {
        self.fire
    }

    #[inline]
    pub fn water(&self) -> f64 {
        self.water
    }

    #[inline]
    pub fn earth(&self) -> f64 {
        self.earth
    }

    #[inline]
    pub fn air(&self) -> f64 {
        self.air
    }

    pub fn get(&self, element: Element) -> f64 {
        match element {
            Element::Fire => self.fire,
            Element::Water => self.water,
            Element::Earth => self.earth,
            Element::Air => self.air,
        }
    }

    /// Strongest element; ties go to the earlier of Fire, Water, Earth, Air.
    pub fn dominant(&self) -> Element {
        let mut best = Element::Fire;
        for element in Element::ALL {
            if self.get(element) > self.get(best) {
                best = element;
            }
        }
        best
    }
}

impl Default for ElementalProperties {
    fn default() -> Self {
        Self::balanced()
    }
}

#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawElemental {
    fire: f64,
    water: f64,
    earth: f64,
    air: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawElemental> for ElementalProperties {
    type Error = Error;

    fn try_from(raw: RawElemental) -> Result<Self> {
        Self::new(raw.fire, raw.water, raw.earth, raw.air)
    }
}
