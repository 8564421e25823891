// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Circuit-style rates of change between consecutive samples.
//!
//! ```text
//! Q = Matter + Substance
//! V = netEnergy / Q
//! I = reactivity · (Q − Q_prev) / Δt
//! P = I · V
//! ```
//!
//! The previous [`ChargeSample`] is always passed in explicitly and handed
//! back in the returned [`KineticStep`]; [`KineticTracker`] is a thin owner
//! of that value for callers that prefer a stateful handle.

use qtty::Seconds;

use crate::alchemy::AlchemicalProperties;
use crate::error::{Error, Result};
use crate::julian::JulianDay;
use crate::metric::{is_zero, Degeneracy, Metric};
use crate::thermo::ThermodynamicMetrics;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Charge observed at a moment; the state carried between samples.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChargeSample {
    pub charge: f64,
    pub at: JulianDay,
}

/// Charge, potential difference, current flow and power of one sample.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct KineticMetrics {
    pub charge: f64,
    pub potential_difference: Metric,
    pub current_flow: Metric,
    pub power: Metric,
}

/// Metrics of this sample plus the sample to feed into the next call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KineticStep {
    pub metrics: KineticMetrics,
    pub sample: ChargeSample,
}

/// Evaluate one kinetic sample.
///
/// `previous = None` marks the first sample of a stream, for which the
/// current flow is defined as 0.
///
/// # Errors
/// [`Error::InvalidInterval`] unless `interval` is finite and `> 0`.
pub fn kinetics(
    alchemical: &AlchemicalProperties,
    thermo: &ThermodynamicMetrics,
    at: JulianDay,
    interval: Seconds,
    previous: Option<&ChargeSample>,
) -> Result<KineticStep> {
    let dt = interval.value();
    if !dt.is_finite() || dt <= 0.0 {
        return Err(Error::InvalidInterval(dt));
    }

    let charge = alchemical.charge();

    let potential_difference = thermo.net_energy.and_then(|ne| {
        if is_zero(charge) {
            Metric::Undefined(Degeneracy::ZeroCharge)
        } else {
            Metric::from_f64(ne / charge)
        }
    });

    let current_flow = match previous {
        None => Metric::ZERO,
        Some(prev) => {
            if prev.at > at {
                tracing::warn!(
                    previous = prev.at.value(),
                    current = at.value(),
                    "kinetic samples out of time order; current flow is not meaningful"
                );
            }
            let rate = (charge - prev.charge) / dt;
            thermo.reactivity.map(|r| r * rate)
        }
    };

    let power = current_flow.zip_with(potential_difference, |i, v| i * v);

    let metrics = KineticMetrics {
        charge,
        potential_difference,
        current_flow,
        power,
    };
    for (metric, value) in [
        ("potential_difference", potential_difference),
        ("current_flow", current_flow),
        ("power", power),
    ] {
        if let Metric::Undefined(reason) = value {
            tracing::trace!(metric, %reason, "kinetic metric undefined");
        }
    }

    Ok(KineticStep {
        metrics,
        sample: ChargeSample { charge, at },
    })
}

/// Owns the previous [`ChargeSample`] of one stream.
///
/// Trackers share nothing, so independent streams can advance on separate
/// threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KineticTracker {
    previous: Option<ChargeSample>,
}

impl KineticTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue a stream from a stored sample.
    pub fn resume(previous: ChargeSample) -> Self {
        Self {
            previous: Some(previous),
        }
    }

    #[inline]
    pub fn previous(&self) -> Option<&ChargeSample> {
        self.previous.as_ref()
    }

    /// Forget the previous sample; the next call counts as a first sample.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Evaluate a sample and remember it.  On error the tracker is unchanged.
    pub fn advance(
        &mut self,
        alchemical: &AlchemicalProperties,
        thermo: &ThermodynamicMetrics,
        at: JulianDay,
        interval: Seconds,
    ) -> Result<KineticMetrics> {
        let step = kinetics(alchemical, thermo, at, interval, self.previous.as_ref())?;
        self.previous = Some(step.sample);
        Ok(step.metrics)
    }
}
