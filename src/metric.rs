// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Scalar results that may be undefined by construction.
//!
//! A [`Metric`] is either a finite value or an explicit
//! [`Metric::Undefined`] carrying the [`Degeneracy`] that produced it.
//! Combining metrics propagates the first undefined operand unchanged, so
//! a degenerate input never turns into `inf` or `NaN` further down the
//! chain.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Magnitude below which a denominator, reactivity, charge or logarithm
/// is treated as zero.
pub const ZERO_TOLERANCE: f64 = 1e-12;

#[inline]
pub(crate) fn is_zero(x: f64) -> bool {
    x.abs() < ZERO_TOLERANCE
}

/// Why a metric has no value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Degeneracy {
    /// A ratio's denominator is zero.
    ZeroDenominator,
    /// `ln` of a value ≤ 0.
    NonPositiveLogArgument,
    /// `ln(1) = 0` in a denominator.
    UnityLogArgument,
    /// Reactivity is zero where it divides.
    ZeroReactivity,
    /// Charge is zero where it divides.
    ZeroCharge,
    /// The result is too large to represent as a finite `f64`.
    Overflow,
    /// The result is positive but too small to represent as a normal `f64`.
    Underflow,
}

impl Degeneracy {
    pub const fn description(self) -> &'static str {
        match self {
            Self::ZeroDenominator => "zero denominator",
            Self::NonPositiveLogArgument => "logarithm of a non-positive value",
            Self::UnityLogArgument => "logarithm of one",
            Self::ZeroReactivity => "zero reactivity",
            Self::ZeroCharge => "zero charge",
            Self::Overflow => "not representable",
            Self::Underflow => "too small to represent",
        }
    }
}

impl fmt::Display for Degeneracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A computed value or a tagged "undefined".
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Metric {
    Value(f64),
    Undefined(Degeneracy),
}

impl Metric {
    pub const ZERO: Self = Self::Value(0.0);

    /// Wrap a raw result; non-finite input becomes `Undefined(Overflow)`.
    #[inline]
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() {
            Self::Value(value)
        } else {
            Self::Undefined(Degeneracy::Overflow)
        }
    }

    /// `numerator / denominator`, undefined when the denominator is zero.
    #[inline]
    pub fn quotient(numerator: f64, denominator: f64) -> Self {
        if is_zero(denominator) {
            Self::Undefined(Degeneracy::ZeroDenominator)
        } else {
            Self::from_f64(numerator / denominator)
        }
    }

    #[inline]
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Undefined(_) => None,
        }
    }

    #[inline]
    pub fn degeneracy(self) -> Option<Degeneracy> {
        match self {
            Self::Value(_) => None,
            Self::Undefined(reason) => Some(reason),
        }
    }

    #[inline]
    pub fn is_defined(self) -> bool {
        matches!(self, Self::Value(_))
    }

    #[inline]
    pub fn value_or(self, default: f64) -> f64 {
        self.value().unwrap_or(default)
    }

    /// Apply `f` to a defined value.
    #[inline]
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Value(v) => Self::from_f64(f(v)),
            undefined => undefined,
        }
    }

    #[inline]
    pub fn and_then(self, f: impl FnOnce(f64) -> Metric) -> Self {
        match self {
            Self::Value(v) => f(v),
            undefined => undefined,
        }
    }

    /// Combine two metrics; `self` is checked first.
    #[inline]
    pub fn zip_with(self, other: Metric, f: impl FnOnce(f64, f64) -> f64) -> Self {
        match (self, other) {
            (Self::Value(a), Self::Value(b)) => Self::from_f64(f(a, b)),
            (Self::Undefined(reason), _) | (_, Self::Undefined(reason)) => Self::Undefined(reason),
        }
    }
}

impl From<f64> for Metric {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => {
                if let Some(prec) = f.precision() {
                    write!(f, "{v:.prec$}")
                } else {
                    write!(f, "{v}")
                }
            }
            Self::Undefined(reason) => write!(f, "undefined ({reason})"),
        }
    }
}
