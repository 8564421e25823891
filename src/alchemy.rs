// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Alchemical composition of a chart.
//!
//! Each body contributes the [`PlanetSignTable`] delta for the sign it
//! occupies; the four totals are clamped at zero.  Contributions are summed
//! in fixed body order, so the result does not depend on how the chart was
//! assembled.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use crate::body::CelestialBody;
use crate::positions::PlanetaryPositions;
use crate::table::PlanetSignTable;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// AlchemicalDelta
// ═══════════════════════════════════════════════════════════════════════════

/// One table entry: a signed contribution to each of the four principles.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "PascalCase"))]
pub struct AlchemicalDelta {
    pub spirit: f64,
    pub essence: f64,
    pub matter: f64,
    pub substance: f64,
}

impl AlchemicalDelta {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(spirit: f64, essence: f64, matter: f64, substance: f64) -> Self {
        Self {
            spirit,
            essence,
            matter,
            substance,
        }
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.spirit.is_finite()
            && self.essence.is_finite()
            && self.matter.is_finite()
            && self.substance.is_finite()
    }
}

impl Add for AlchemicalDelta {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.spirit + rhs.spirit,
            self.essence + rhs.essence,
            self.matter + rhs.matter,
            self.substance + rhs.substance,
        )
    }
}

impl AddAssign for AlchemicalDelta {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for AlchemicalDelta {
    type Output = Self;

    #[inline]
    fn mul(self, k: f64) -> Self {
        Self::new(
            self.spirit * k,
            self.essence * k,
            self.matter * k,
            self.substance * k,
        )
    }
}

impl Sum for AlchemicalDelta {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// AlchemicalProperties
// ═══════════════════════════════════════════════════════════════════════════

/// Spirit, Essence, Matter and Substance of a chart; each `>= 0`.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "PascalCase"))]
pub struct AlchemicalProperties {
    pub spirit: f64,
    pub essence: f64,
    pub matter: f64,
    pub substance: f64,
}

impl AlchemicalProperties {
    /// Clamp summed deltas at zero.
    ///
    /// A NaN total also clamps to zero.  Totals summed from a
    /// [`PlanetSignTable`] are always finite, since every constructor
    /// rejects non-finite deltas.
    pub fn from_totals(totals: AlchemicalDelta) -> Self {
        Self {
            spirit: totals.spirit.max(0.0),
            essence: totals.essence.max(0.0),
            matter: totals.matter.max(0.0),
            substance: totals.substance.max(0.0),
        }
    }

    /// Equal amount of each principle.
    pub const fn uniform(amount: f64) -> Self {
        Self {
            spirit: amount,
            essence: amount,
            matter: amount,
            substance: amount,
        }
    }

    /// Fold a whole chart through `table`.
    pub fn compose(positions: &PlanetaryPositions, table: &PlanetSignTable) -> Self {
        let totals: AlchemicalDelta = positions
            .iter()
            .map(|(body, position)| table.get(body, position.sign))
            .sum();
        Self::from_totals(totals)
    }

    /// Contribution of a single body (clamped), handy for per-body breakdowns.
    pub fn of_body(positions: &PlanetaryPositions, body: CelestialBody, table: &PlanetSignTable) -> Self {
        Self::from_totals(table.get(body, positions.get(body).sign))
    }

    /// Kinetic charge `Q = Matter + Substance`.
    #[inline]
    pub fn charge(&self) -> f64 {
        self.matter + self.substance
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.spirit + self.essence + self.matter + self.substance
    }
}

/// Free-function form of [`AlchemicalProperties::compose`].
pub fn compose(positions: &PlanetaryPositions, table: &PlanetSignTable) -> AlchemicalProperties {
    AlchemicalProperties::compose(positions, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zodiac::ZodiacSign;

    fn chart(lon: impl Fn(CelestialBody) -> f64) -> PlanetaryPositions {
        PlanetaryPositions::from_longitudes(CelestialBody::ALL.into_iter().map(|b| (b, lon(b)))).unwrap()
    }

    #[test]
    fn sums_each_body_once() {
        let table = PlanetSignTable::from_fn(|_, _| AlchemicalDelta::new(1.0, 0.5, 0.25, 0.0)).unwrap();
        let a = compose(&chart(|_| 15.0), &table);
        assert!((a.spirit - 10.0).abs() < 1e-12);
        assert!((a.essence - 5.0).abs() < 1e-12);
        assert!((a.matter - 2.5).abs() < 1e-12);
        assert_eq!(a.substance, 0.0);
    }

    #[test]
    fn negative_totals_clamp_to_zero() {
        let table = PlanetSignTable::from_fn(|_, sign| {
            if sign == ZodiacSign::Leo {
                AlchemicalDelta::new(-2.0, 1.0, -0.1, 0.3)
            } else {
                AlchemicalDelta::ZERO
            }
        })
        .unwrap();
        let a = compose(&chart(|_| 130.0), &table);
        assert_eq!(a.spirit, 0.0);
        assert_eq!(a.matter, 0.0);
        assert!((a.essence - 10.0).abs() < 1e-12);
        assert!((a.substance - 3.0).abs() < 1e-12);
    }

    #[test]
    fn partial_negative_sum_is_kept_when_positive_overall() {
        let table = PlanetSignTable::from_fn(|body, _| {
            if body == CelestialBody::Sun {
                AlchemicalDelta::new(-1.0, 0.0, 0.0, 0.0)
            } else {
                AlchemicalDelta::new(0.5, 0.0, 0.0, 0.0)
            }
        })
        .unwrap();
        let a = compose(&chart(|_| 200.0), &table);
        assert!((a.spirit - 3.5).abs() < 1e-12);
    }

    #[test]
    fn table_lookup_follows_the_sign() {
        let table = PlanetSignTable::standard();
        let c = chart(|b| if b == CelestialBody::Sun { 45.0 } else { 15.0 });
        let sun = AlchemicalProperties::of_body(&c, CelestialBody::Sun, &table);
        // Taurus is earth: Matter and Substance scaled by the Sun's weight.
        assert!((sun.matter - 1.8).abs() < 1e-12);
        assert!((sun.substance - 1.8).abs() < 1e-12);
        assert_eq!(sun.spirit, 0.0);
    }

    #[test]
    fn charge_is_matter_plus_substance() {
        let a = AlchemicalProperties {
            spirit: 1.0,
            essence: 2.0,
            matter: 3.0,
            substance: 4.0,
        };
        assert_eq!(a.charge(), 7.0);
        assert_eq!(a.total(), 10.0);
        assert_eq!(AlchemicalProperties::uniform(1.0).charge(), 2.0);
    }
}
