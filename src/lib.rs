// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Astro-alchemical calculation chain
//!
//! This crate turns a UTC instant and an observer location into a chain of
//! derived quantities: the rising sign, a composite alchemical profile of a
//! chart, thermodynamic scalars and a circuit-style kinetic model.
//!
//! # Pipeline
//!
//! | Stage | Entry point |
//! |-------|-------------|
//! | Instant → Julian Day | [`JulianDay::from_instant`] |
//! | Julian Day → GMST → LST | [`greenwich_mean_sidereal_time`], [`local_sidereal_time`] |
//! | LST + latitude → Ascendant | [`ascendant_longitude`], [`ascendant_for`] |
//! | Longitude → sign/degree | [`ZodiacPosition::from_longitude`] |
//! | Chart → Spirit/Essence/Matter/Substance | [`AlchemicalProperties::compose`] |
//! | Alchemical + elemental → metrics | [`ThermodynamicMetrics::compute`] |
//! | Metrics + previous sample → Q, V, I, P | [`kinetics`], [`KineticTracker`] |
//!
//! [`Engine`] wires the stages together with an [`EngineConfig`] and a
//! [`PlanetSignTable`].
//!
//! # Degenerate values
//!
//! Invalid input is rejected with an [`Error`].  Inputs that are valid but
//! make a metric undefined (a zero denominator, `ln 1`, zero charge) yield
//! [`Metric::Undefined`] with a [`Degeneracy`] reason, which later stages
//! propagate unchanged.
//!
//! # Example
//!
//! ```
//! use alchm::{CelestialBody, Engine, GeoCoordinate, Instant, ZodiacSign};
//!
//! let engine = Engine::default();
//! let when: Instant = "2024-03-20T12:00:00Z".parse().unwrap();
//! let nyc = GeoCoordinate::new(40.7128, -74.0060).unwrap();
//!
//! let asc = engine.ascendant(&when, &nyc).unwrap();
//! assert_eq!(asc.sign, ZodiacSign::Aries);
//!
//! let others = CelestialBody::ALL[1..].iter().map(|b| (*b, 0.0));
//! let chart = engine.chart(&when, &nyc, others).unwrap();
//! let snapshot = engine.evaluate(&chart);
//! assert!(snapshot.thermodynamics.heat.is_defined());
//! ```
//!
//! # Features
//!
//! * `serde`: `Serialize`/`Deserialize` for every record, plus JSON loading
//!   of [`EngineConfig`] and [`PlanetSignTable`].

mod alchemy;
mod angle;
mod ascendant;
mod body;
mod config;
mod elemental;
mod engine;
mod error;
mod geo;
mod instant;
mod julian;
mod kinetics;
mod metric;
mod positions;
mod sidereal;
mod table;
mod thermo;
mod zodiac;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use alchemy::{compose, AlchemicalDelta, AlchemicalProperties};
pub use angle::{normalize_degrees, normalize_hours};
pub use ascendant::{ascendant_for, ascendant_longitude, midheaven_longitude};
pub use body::CelestialBody;
pub use config::{EngineConfig, PolarPolicy, DEFAULT_POLAR_LIMIT_DEG, MEAN_OBLIQUITY_DEG};
pub use elemental::{Element, ElementalProperties};
pub use engine::{Engine, Snapshot};
pub use error::{Error, Result};
pub use geo::GeoCoordinate;
pub use instant::Instant;
pub use julian::JulianDay;
pub use kinetics::{kinetics, ChargeSample, KineticMetrics, KineticStep, KineticTracker};
pub use metric::{Degeneracy, Metric, ZERO_TOLERANCE};
pub use positions::{EphemerisSource, PlanetaryPositions, PositionsBuilder};
pub use sidereal::{greenwich_mean_sidereal_time, local_sidereal_time, SiderealTime};
pub use table::PlanetSignTable;
pub use thermo::{kalchm, ln_kalchm, monica, monica_from_ln, thermodynamics, ThermodynamicMetrics};
pub use zodiac::{DegreeCountdown, SignCountdown, ZodiacPosition, ZodiacSign, MINUTES_PER_DEGREE, SIGN_WIDTH_DEG};
