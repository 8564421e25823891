// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Thermodynamic metrics of an (alchemical, elemental) pair.
//!
//! With Spirit `S`, Essence `E`, Matter `M`, Substance `Su` and elements
//! Fire `F`, Water `W`, Earth `Ea`, Air `Ai`:
//!
//! ```text
//! heat       = (S² + F²) / (Su + E + M + W + Ai + Ea)²
//! entropy    = (S² + Su² + F² + Ai²) / (E + M + Ea + W)²
//! reactivity = (S² + Su² + E² + F² + Ai² + W²) / (M + Ea)²
//! netEnergy  = heat − entropy·reactivity
//! kalchm     = (S^S · E^E) / (M^M · Su^Su)          0^0 = 1
//! monica     = −netEnergy / (reactivity · ln kalchm)
//! ```
//!
//! Kalchm is evaluated in log space and Monica uses that logarithm
//! directly, so Monica stays defined where Kalchm itself does not fit in an
//! `f64`.  Every zero denominator or degenerate logarithm yields
//! [`Metric::Undefined`] instead of `inf`/`NaN`.

use crate::alchemy::AlchemicalProperties;
use crate::elemental::ElementalProperties;
use crate::metric::{is_zero, Degeneracy, Metric};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Immutable snapshot of the six metrics.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ThermodynamicMetrics {
    pub heat: Metric,
    pub entropy: Metric,
    pub reactivity: Metric,
    pub net_energy: Metric,
    /// Multiplicative ratio (Kalchm).
    pub kalchm: Metric,
    /// Log-normalised ratio (Monica).
    pub monica: Metric,
}

impl ThermodynamicMetrics {
    /// Evaluate all six metrics.
    pub fn compute(alchemical: &AlchemicalProperties, elemental: &ElementalProperties) -> Self {
        let AlchemicalProperties {
            spirit: s,
            essence: e,
            matter: m,
            substance: su,
        } = *alchemical;
        let (f, w, ea, ai) = (elemental.fire(), elemental.water(), elemental.earth(), elemental.air());

        let heat = ratio_of_square(s * s + f * f, su + e + m + w + ai + ea);
        let entropy = ratio_of_square(s * s + su * su + f * f + ai * ai, e + m + ea + w);
        let reactivity = ratio_of_square(s * s + su * su + e * e + f * f + ai * ai + w * w, m + ea);
        let net_energy = heat.zip_with(entropy.zip_with(reactivity, |en, r| en * r), |h, er| h - er);
        let kalchm = kalchm(alchemical);
        let monica = monica_from_ln(net_energy, reactivity, ln_kalchm(alchemical));

        let metrics = Self {
            heat,
            entropy,
            reactivity,
            net_energy,
            kalchm,
            monica,
        };
        metrics.trace_degenerate();
        metrics
    }

    /// `(name, metric)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Metric)> {
        [
            ("heat", self.heat),
            ("entropy", self.entropy),
            ("reactivity", self.reactivity),
            ("net_energy", self.net_energy),
            ("kalchm", self.kalchm),
            ("monica", self.monica),
        ]
        .into_iter()
    }

    pub fn is_fully_defined(&self) -> bool {
        self.iter().all(|(_, m)| m.is_defined())
    }

    fn trace_degenerate(&self) {
        for (metric, value) in self.iter() {
            if let Metric::Undefined(reason) = value {
                tracing::trace!(metric, %reason, "thermodynamic metric undefined");
            }
        }
    }
}

/// Free-function form of [`ThermodynamicMetrics::compute`].
pub fn thermodynamics(alchemical: &AlchemicalProperties, elemental: &ElementalProperties) -> ThermodynamicMetrics {
    ThermodynamicMetrics::compute(alchemical, elemental)
}

#[inline]
fn ratio_of_square(numerator: f64, base: f64) -> Metric {
    Metric::quotient(numerator, base * base)
}

/// `x·ln x`, with the `0^0 = 1` convention giving 0 at `x = 0`.
#[inline]
fn self_power_ln(x: f64) -> f64 {
    if x > 0.0 {
        x * x.ln()
    } else {
        0.0
    }
}

/// Natural logarithm of Kalchm,
/// `S·ln S + E·ln E − M·ln M − Su·ln Su`.
///
/// Finite for any finite composition, even where Kalchm itself is not
/// representable.
pub fn ln_kalchm(alchemical: &AlchemicalProperties) -> f64 {
    self_power_ln(alchemical.spirit) + self_power_ln(alchemical.essence)
        - self_power_ln(alchemical.matter)
        - self_power_ln(alchemical.substance)
}

/// Kalchm `(S^S · E^E) / (M^M · Su^Su)`.
///
/// Always positive when representable.  A result above `f64::MAX` is
/// `Undefined(Overflow)`; one below the smallest normal `f64` is
/// `Undefined(Underflow)`.
pub fn kalchm(alchemical: &AlchemicalProperties) -> Metric {
    let k = ln_kalchm(alchemical).exp();
    if !k.is_finite() {
        Metric::Undefined(Degeneracy::Overflow)
    } else if k < f64::MIN_POSITIVE {
        Metric::Undefined(Degeneracy::Underflow)
    } else {
        Metric::Value(k)
    }
}

/// Monica `−netEnergy / (reactivity · ln kalchm)` from a Kalchm value.
///
/// Undefined operands propagate in the order net energy, reactivity,
/// kalchm.  Then a zero reactivity, a non-positive kalchm and a kalchm of
/// one are reported, in that order.
pub fn monica(net_energy: Metric, reactivity: Metric, kalchm: Metric) -> Metric {
    let (ne, r, k) = match (net_energy, reactivity, kalchm) {
        (Metric::Value(ne), Metric::Value(r), Metric::Value(k)) => (ne, r, k),
        (Metric::Undefined(reason), _, _)
        | (_, Metric::Undefined(reason), _)
        | (_, _, Metric::Undefined(reason)) => return Metric::Undefined(reason),
    };
    if is_zero(r) {
        return Metric::Undefined(Degeneracy::ZeroReactivity);
    }
    if k <= 0.0 {
        return Metric::Undefined(Degeneracy::NonPositiveLogArgument);
    }
    monica_from_ln(Metric::Value(ne), Metric::Value(r), k.ln())
}

/// Monica from `ln kalchm` directly, as returned by [`ln_kalchm`].
///
/// Stays defined when Kalchm itself under- or overflows but its logarithm
/// is finite and non-zero.
pub fn monica_from_ln(net_energy: Metric, reactivity: Metric, ln_kalchm: f64) -> Metric {
    let (ne, r) = match (net_energy, reactivity) {
        (Metric::Value(ne), Metric::Value(r)) => (ne, r),
        (Metric::Undefined(reason), _) | (_, Metric::Undefined(reason)) => {
            return Metric::Undefined(reason)
        }
    };
    if is_zero(r) {
        return Metric::Undefined(Degeneracy::ZeroReactivity);
    }
    if ln_kalchm.is_nan() {
        return Metric::Undefined(Degeneracy::NonPositiveLogArgument);
    }
    if !ln_kalchm.is_finite() {
        return Metric::Undefined(Degeneracy::Overflow);
    }
    if is_zero(ln_kalchm) {
        return Metric::Undefined(Degeneracy::UnityLogArgument);
    }
    Metric::from_f64(-ne / (r * ln_kalchm))
}
