// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! End-to-end calculation chain.
//!
//! ```text
//! Instant ─► JulianDay ─► GMST ─► LST ─► Ascendant ─► ZodiacPosition ─┐
//!                                                                     ├─► PlanetaryPositions
//!                                 EphemerisSource / caller longitudes ┘
//!   PlanetaryPositions ─► AlchemicalProperties ─► ThermodynamicMetrics ─► KineticMetrics
//! ```
//!
//! [`Engine`] holds only immutable configuration, so one instance can be
//! shared freely between threads.  Kinetic state is never stored here.

use qtty::Seconds;

use crate::alchemy::AlchemicalProperties;
use crate::ascendant::ascendant_for;
use crate::body::CelestialBody;
use crate::config::EngineConfig;
use crate::elemental::ElementalProperties;
use crate::error::Result;
use crate::geo::GeoCoordinate;
use crate::instant::Instant;
use crate::julian::JulianDay;
use crate::kinetics::{kinetics, ChargeSample, KineticStep};
use crate::positions::{EphemerisSource, PlanetaryPositions};
use crate::sidereal::{greenwich_mean_sidereal_time, local_sidereal_time, SiderealTime};
use crate::table::PlanetSignTable;
use crate::thermo::ThermodynamicMetrics;
use crate::zodiac::ZodiacPosition;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything derived from one chart.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Snapshot {
    pub alchemical: AlchemicalProperties,
    pub elemental: ElementalProperties,
    pub thermodynamics: ThermodynamicMetrics,
}

/// Configured calculation chain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Engine {
    config: EngineConfig,
    table: PlanetSignTable,
}

impl Engine {
    /// # Errors
    /// Whatever [`EngineConfig::validate`] rejects.
    pub fn new(config: EngineConfig, table: PlanetSignTable) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, table })
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn table(&self) -> &PlanetSignTable {
        &self.table
    }

    pub fn julian_day(&self, instant: &Instant) -> JulianDay {
        let jd = JulianDay::from_instant(instant);
        tracing::debug!(%instant, jd = jd.value(), "julian day");
        jd
    }

    /// Local sidereal time of `observer` at `instant`.
    pub fn sidereal_time(&self, instant: &Instant, observer: &GeoCoordinate) -> SiderealTime {
        let gmst = greenwich_mean_sidereal_time(self.julian_day(instant));
        let lst = local_sidereal_time(gmst, observer.longitude());
        tracing::debug!(gmst = gmst.value(), lst = lst.value(), "sidereal time");
        lst
    }

    /// Zodiac position of the ascendant.
    ///
    /// # Errors
    /// [`Error::PolarLatitude`](crate::Error::PolarLatitude) or
    /// [`Error::InvalidPolarLimit`](crate::Error::InvalidPolarLimit),
    /// depending on the configured polar policy.
    pub fn ascendant(&self, instant: &Instant, observer: &GeoCoordinate) -> Result<ZodiacPosition> {
        let lst = self.sidereal_time(instant, observer);
        let longitude = ascendant_for(lst, observer, &self.config)?;
        let position = ZodiacPosition::from_longitude(longitude);
        tracing::debug!(longitude = longitude.value(), %position, "ascendant");
        Ok(position)
    }

    /// Chart with a computed ascendant and caller-supplied longitudes
    /// (degrees) for the nine other bodies.
    ///
    /// # Errors
    /// [`Error::DuplicateBody`](crate::Error::DuplicateBody) if `others`
    /// contains the ascendant or repeats a body,
    /// [`Error::MissingBody`](crate::Error::MissingBody) if one is absent,
    /// plus the errors of [`ascendant`](Self::ascendant).
    pub fn chart<I>(&self, instant: &Instant, observer: &GeoCoordinate, others: I) -> Result<PlanetaryPositions>
    where
        I: IntoIterator<Item = (CelestialBody, f64)>,
    {
        let mut builder = PlanetaryPositions::builder();
        builder.position(CelestialBody::Ascendant, self.ascendant(instant, observer)?)?;
        for (body, longitude) in others {
            builder.longitude(body, qtty::Degrees::new(longitude))?;
        }
        builder.build()
    }

    /// Chart supplied by an external source.
    pub fn chart_from<S>(&self, source: &S, instant: &Instant) -> Result<PlanetaryPositions>
    where
        S: EphemerisSource + ?Sized,
    {
        let positions = source.positions(instant)?;
        tracing::debug!(%instant, "chart from ephemeris source");
        Ok(positions)
    }

    /// Alchemical composition, chart elements and thermodynamics.
    pub fn evaluate(&self, positions: &PlanetaryPositions) -> Snapshot {
        self.evaluate_with(positions, ElementalProperties::from_positions(positions))
    }

    /// As [`evaluate`](Self::evaluate), with a caller-supplied elemental profile.
    pub fn evaluate_with(&self, positions: &PlanetaryPositions, elemental: ElementalProperties) -> Snapshot {
        let alchemical = AlchemicalProperties::compose(positions, &self.table);
        tracing::debug!(
            spirit = alchemical.spirit,
            essence = alchemical.essence,
            matter = alchemical.matter,
            substance = alchemical.substance,
            "alchemical composition"
        );
        let thermodynamics = ThermodynamicMetrics::compute(&alchemical, &elemental);
        tracing::debug!(
            heat = %thermodynamics.heat,
            entropy = %thermodynamics.entropy,
            reactivity = %thermodynamics.reactivity,
            net_energy = %thermodynamics.net_energy,
            kalchm = %thermodynamics.kalchm,
            monica = %thermodynamics.monica,
            "thermodynamics"
        );
        Snapshot {
            alchemical,
            elemental,
            thermodynamics,
        }
    }

    /// Kinetic step for a snapshot taken at `at`.
    pub fn kinetics(
        &self,
        snapshot: &Snapshot,
        at: JulianDay,
        interval: Seconds,
        previous: Option<&ChargeSample>,
    ) -> Result<KineticStep> {
        let step = kinetics(&snapshot.alchemical, &snapshot.thermodynamics, at, interval, previous)?;
        tracing::debug!(
            charge = step.metrics.charge,
            potential_difference = %step.metrics.potential_difference,
            current_flow = %step.metrics.current_flow,
            power = %step.metrics.power,
            "kinetics"
        );
        Ok(step)
    }

    /// Convenience: chart from `source`, then [`evaluate`](Self::evaluate).
    pub fn evaluate_source<S>(&self, source: &S, instant: &Instant) -> Result<Snapshot>
    where
        S: EphemerisSource + ?Sized,
    {
        Ok(self.evaluate(&self.chart_from(source, instant)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolarPolicy;
    use crate::error::Error;
    use crate::zodiac::ZodiacSign;

    fn nyc() -> GeoCoordinate {
        GeoCoordinate::new(40.7128, -74.0060).unwrap()
    }

    fn equinox_noon() -> Instant {
        Instant::new(2024, 3, 20, 12, 0, 0.0).unwrap()
    }

    fn others() -> Vec<(CelestialBody, f64)> {
        CelestialBody::ALL[1..]
            .iter()
            .enumerate()
            .map(|(i, b)| (*b, 15.0 + 37.0 * i as f64))
            .collect()
    }

    #[test]
    fn julian_and_sidereal_stages() {
        let engine = Engine::default();
        let jd = engine.julian_day(&equinox_noon());
        assert!((jd.value() - 2_460_390.0).abs() < 1e-9);
        let lst = engine.sidereal_time(&equinox_noon(), &nyc());
        assert!((lst.value() - 18.967_04).abs() < 1e-4, "LST = {}", lst.value());
    }

    #[test]
    fn ascendant_fixture() {
        let asc = Engine::default().ascendant(&equinox_noon(), &nyc()).unwrap();
        assert_eq!(asc.sign, ZodiacSign::Aries);
        assert!((asc.exact_longitude - 24.645).abs() < 0.5, "asc = {}", asc.exact_longitude);
    }

    #[test]
    fn chart_combines_computed_and_supplied() {
        let engine = Engine::default();
        let chart = engine.chart(&equinox_noon(), &nyc(), others()).unwrap();
        assert_eq!(chart.ascendant().sign, ZodiacSign::Aries);
        assert!((chart[CelestialBody::Sun].exact_longitude - 15.0).abs() < 1e-12);

        let mut with_asc = others();
        with_asc.push((CelestialBody::Ascendant, 1.0));
        assert_eq!(
            engine.chart(&equinox_noon(), &nyc(), with_asc),
            Err(Error::DuplicateBody(CelestialBody::Ascendant))
        );
    }

    #[test]
    fn evaluate_matches_manual_pipeline() {
        let engine = Engine::default();
        let chart = engine.chart(&equinox_noon(), &nyc(), others()).unwrap();
        let snap = engine.evaluate(&chart);
        let alchemical = AlchemicalProperties::compose(&chart, engine.table());
        let elemental = ElementalProperties::from_positions(&chart);
        assert_eq!(snap.alchemical, alchemical);
        assert_eq!(snap.elemental, elemental);
        assert_eq!(snap.thermodynamics, ThermodynamicMetrics::compute(&alchemical, &elemental));
    }

    #[test]
    fn new_validates_config() {
        let bad = EngineConfig::default().with_polar_policy(PolarPolicy::Clamp { limit_deg: 95.0 });
        assert!(Engine::new(bad, PlanetSignTable::standard()).is_err());
        assert!(Engine::new(EngineConfig::default(), PlanetSignTable::standard()).is_ok());
    }

    #[test]
    fn engine_is_shareable() {
        fn check<T: Send + Sync>() {}
        check::<Engine>();
    }

    #[test]
    fn pole_rejected_by_default() {
        let pole = GeoCoordinate::new(-90.0, 0.0).unwrap();
        assert_eq!(
            Engine::default().ascendant(&equinox_noon(), &pole),
            Err(Error::PolarLatitude(-90.0))
        );
    }
}
