// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Per-body, per-sign contribution table.
//!
//! The table is configuration data handed to the engine; it must cover all
//! ten bodies in all twelve signs.  [`PlanetSignTable::standard`] derives a
//! default from sign elements and body chart weights:
//!
//! | element | Spirit | Essence | Matter | Substance |
//! |---------|--------|---------|--------|-----------|
//! | fire    | 0.6    |         |        | 0.4       |
//! | air     | 0.4    | 0.4     |        |           |
//! | water   |        | 0.6     | 0.4    |           |
//! | earth   |        |         | 0.6    | 0.6       |
//!
//! each scaled by [`CelestialBody::chart_weight`].

use crate::alchemy::AlchemicalDelta;
use crate::body::CelestialBody;
use crate::elemental::Element;
use crate::error::{Error, Result};
use crate::zodiac::ZodiacSign;

const SIGNS: usize = 12;

/// Complete 10 × 12 lookup of [`AlchemicalDelta`] values.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanetSignTable {
    entries: [[AlchemicalDelta; SIGNS]; CelestialBody::COUNT],
}

impl PlanetSignTable {
    /// Build a table by evaluating `f` for every (body, sign) pair.
    ///
    /// # Errors
    /// [`Error::Config`] naming the first pair whose delta is not finite.
    pub fn from_fn<F>(mut f: F) -> Result<Self>
    where
        F: FnMut(CelestialBody, ZodiacSign) -> AlchemicalDelta,
    {
        let mut entries = [[AlchemicalDelta::ZERO; SIGNS]; CelestialBody::COUNT];
        for body in CelestialBody::ALL {
            for sign in ZodiacSign::ALL {
                let delta = f(body, sign);
                if !delta.is_finite() {
                    return Err(Error::Config(format!(
                        "non-finite contribution for {body} in {sign}"
                    )));
                }
                entries[body.index()][sign.index()] = delta;
            }
        }
        Ok(Self { entries })
    }

    /// Build a table from explicit entries.
    ///
    /// # Errors
    /// * [`Error::Config`] on a repeated pair or a non-finite delta.
    /// * [`Error::IncompleteTable`] naming the first missing pair.
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (CelestialBody, ZodiacSign, AlchemicalDelta)>,
    {
        let mut slots = [[None; SIGNS]; CelestialBody::COUNT];
        for (body, sign, delta) in entries {
            if !delta.is_finite() {
                return Err(Error::Config(format!(
                    "non-finite contribution for {body} in {sign}"
                )));
            }
            let slot = &mut slots[body.index()][sign.index()];
            if slot.is_some() {
                return Err(Error::Config(format!(
                    "duplicate contribution for {body} in {sign}"
                )));
            }
            *slot = Some(delta);
        }

        let mut table = [[AlchemicalDelta::ZERO; SIGNS]; CelestialBody::COUNT];
        for body in CelestialBody::ALL {
            for sign in ZodiacSign::ALL {
                table[body.index()][sign.index()] = slots[body.index()][sign.index()]
                    .ok_or(Error::IncompleteTable { body, sign })?;
            }
        }
        Ok(Self { entries: table })
    }

    /// Built-in table derived from sign elements and body weights.
    pub fn standard() -> Self {
        let mut entries = [[AlchemicalDelta::ZERO; SIGNS]; CelestialBody::COUNT];
        for body in CelestialBody::ALL {
            for sign in ZodiacSign::ALL {
                entries[body.index()][sign.index()] = element_delta(sign.element()) * body.chart_weight();
            }
        }
        Self { entries }
    }

    #[inline]
    pub fn get(&self, body: CelestialBody, sign: ZodiacSign) -> AlchemicalDelta {
        self.entries[body.index()][sign.index()]
    }

    /// Iterate all 120 entries, body-major.
    pub fn iter(&self) -> impl Iterator<Item = (CelestialBody, ZodiacSign, AlchemicalDelta)> + '_ {
        CelestialBody::ALL.into_iter().flat_map(move |body| {
            ZodiacSign::ALL
                .into_iter()
                .map(move |sign| (body, sign, self.get(body, sign)))
        })
    }
}

impl Default for PlanetSignTable {
    fn default() -> Self {
        Self::standard()
    }
}

const fn element_delta(element: Element) -> AlchemicalDelta {
    match element {
        Element::Fire => AlchemicalDelta::new(0.6, 0.0, 0.0, 0.4),
        Element::Air => AlchemicalDelta::new(0.4, 0.4, 0.0, 0.0),
        Element::Water => AlchemicalDelta::new(0.0, 0.6, 0.4, 0.0),
        Element::Earth => AlchemicalDelta::new(0.0, 0.0, 0.6, 0.6),
    }
}

// ── JSON loading ──────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl PlanetSignTable {
    /// Load a table from JSON shaped `{ "<body>": { "<sign>": { "Spirit": .. } } }`.
    ///
    /// Body and sign names are case-insensitive; missing principle fields
    /// default to 0.
    pub fn from_json_str(json: &str) -> Result<Self> {
        use std::collections::BTreeMap;

        let raw: BTreeMap<String, BTreeMap<String, AlchemicalDelta>> = serde_json::from_str(json)?;
        let mut entries = Vec::with_capacity(CelestialBody::COUNT * SIGNS);
        for (body_name, signs) in raw {
            let body: CelestialBody = body_name.parse()?;
            for (sign_name, delta) in signs {
                let sign: ZodiacSign = sign_name.parse()?;
                entries.push((body, sign, delta));
            }
        }
        let table = Self::from_entries(entries)?;
        tracing::debug!(entries = CelestialBody::COUNT * SIGNS, "loaded contribution table");
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_scales_by_body_weight() {
        let t = PlanetSignTable::standard();
        let sun_aries = t.get(CelestialBody::Sun, ZodiacSign::Aries);
        assert!((sun_aries.spirit - 1.8).abs() < 1e-12);
        assert!((sun_aries.substance - 1.2).abs() < 1e-12);
        let neptune_pisces = t.get(CelestialBody::Neptune, ZodiacSign::Pisces);
        assert!((neptune_pisces.essence - 0.3).abs() < 1e-12);
        assert!((neptune_pisces.matter - 0.2).abs() < 1e-12);
        assert_eq!(t.iter().count(), 120);
    }

    #[test]
    fn from_entries_requires_every_pair() {
        let all: Vec<_> = PlanetSignTable::standard().iter().collect();
        assert_eq!(
            PlanetSignTable::from_entries(all.clone()).unwrap(),
            PlanetSignTable::standard()
        );

        let missing: Vec<_> = all
            .iter()
            .copied()
            .filter(|(b, s, _)| !(*b == CelestialBody::Mars && *s == ZodiacSign::Virgo))
            .collect();
        assert_eq!(
            PlanetSignTable::from_entries(missing),
            Err(Error::IncompleteTable {
                body: CelestialBody::Mars,
                sign: ZodiacSign::Virgo
            })
        );
    }

    #[test]
    fn from_entries_rejects_duplicates_and_nan() {
        let mut dup: Vec<_> = PlanetSignTable::standard().iter().collect();
        dup.push((CelestialBody::Sun, ZodiacSign::Leo, AlchemicalDelta::ZERO));
        assert!(matches!(PlanetSignTable::from_entries(dup), Err(Error::Config(_))));

        let mut nan: Vec<_> = PlanetSignTable::standard().iter().collect();
        nan[0].2.spirit = f64::NAN;
        assert!(matches!(PlanetSignTable::from_entries(nan), Err(Error::Config(_))));
    }

    #[test]
    fn negative_entries_are_allowed() {
        let t = PlanetSignTable::from_fn(|_, _| AlchemicalDelta::new(-1.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(t.get(CelestialBody::Moon, ZodiacSign::Gemini).spirit, -1.0);
    }

    #[test]
    fn from_fn_rejects_non_finite_deltas() {
        let nan = PlanetSignTable::from_fn(|body, sign| {
            if body == CelestialBody::Saturn && sign == ZodiacSign::Libra {
                AlchemicalDelta::new(0.0, f64::NAN, 0.0, 0.0)
            } else {
                AlchemicalDelta::ZERO
            }
        });
        assert_eq!(
            nan,
            Err(Error::Config("non-finite contribution for Saturn in Libra".into()))
        );
        assert!(matches!(
            PlanetSignTable::from_fn(|_, _| AlchemicalDelta::new(f64::INFINITY, 0.0, 0.0, 0.0)),
            Err(Error::Config(_))
        ));
        assert_eq!(
            PlanetSignTable::from_fn(|body, sign| PlanetSignTable::standard().get(body, sign)).unwrap(),
            PlanetSignTable::standard()
        );
    }
}
