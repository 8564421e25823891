// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Engine configuration.
//!
//! The engine holds no global state: everything that could vary between
//! deployments (obliquity constant, polar handling) lives in
//! [`EngineConfig`], and the contribution table is passed separately as a
//! [`PlanetSignTable`](crate::PlanetSignTable).

use qtty::Degrees;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean obliquity of the ecliptic at J2000.0, in degrees.
pub const MEAN_OBLIQUITY_DEG: f64 = 23.439_291_1;

/// Documented maximum |latitude| used by [`PolarPolicy::Clamp`].
pub const DEFAULT_POLAR_LIMIT_DEG: f64 = 89.9;

/// What to do with a latitude of ±90°, where `tan(latitude)` diverges.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "mode", rename_all = "snake_case"))]
pub enum PolarPolicy {
    /// Refuse polar input with [`Error::PolarLatitude`].
    #[default]
    Reject,
    /// Clamp |latitude| to `limit_deg` before the ascendant formula.
    Clamp { limit_deg: f64 },
}

impl PolarPolicy {
    /// Clamp at [`DEFAULT_POLAR_LIMIT_DEG`].
    pub const fn clamp_default() -> Self {
        Self::Clamp {
            limit_deg: DEFAULT_POLAR_LIMIT_DEG,
        }
    }
}

/// Tunables of the calculation chain.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Obliquity of the ecliptic used by the ascendant formula.
    pub obliquity_deg: f64,
    pub polar_policy: PolarPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            obliquity_deg: MEAN_OBLIQUITY_DEG,
            polar_policy: PolarPolicy::Reject,
        }
    }
}

impl EngineConfig {
    pub fn with_obliquity(mut self, obliquity: Degrees) -> Self {
        self.obliquity_deg = obliquity.value();
        self
    }

    pub fn with_polar_policy(mut self, policy: PolarPolicy) -> Self {
        self.polar_policy = policy;
        self
    }

    #[inline]
    pub fn obliquity(&self) -> Degrees {
        Degrees::new(self.obliquity_deg)
    }

    /// Check that the values are usable.
    pub fn validate(&self) -> Result<()> {
        if !self.obliquity_deg.is_finite() || !(0.0..90.0).contains(&self.obliquity_deg) {
            return Err(Error::Config(format!(
                "obliquity {}° must lie in [0, 90)",
                self.obliquity_deg
            )));
        }
        if let PolarPolicy::Clamp { limit_deg } = self.polar_policy {
            if !(limit_deg > 0.0 && limit_deg < 90.0) {
                return Err(Error::InvalidPolarLimit(limit_deg));
            }
        }
        Ok(())
    }

    /// Decode and validate a JSON configuration; missing fields keep their
    /// defaults.
    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
