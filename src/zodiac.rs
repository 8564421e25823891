// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zodiac signs and sign/degree/minute/second positions.
//!
//! The ecliptic is divided into twelve equal signs of 30° starting at the
//! vernal equinox (0° Aries).  [`ZodiacPosition::from_longitude`] accepts
//! any real longitude and reduces it into `[0, 360)` first.

use qtty::{Degrees, Hour, Minutes};
use std::fmt;
use std::str::FromStr;

use crate::angle::normalize_degrees;
use crate::elemental::Element;
use crate::error::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Width of one sign in degrees.
pub const SIGN_WIDTH_DEG: f64 = 30.0;

/// Clock minutes for the ascendant to advance one degree.
pub const MINUTES_PER_DEGREE: f64 = 4.0;

/// The twelve signs of the tropical zodiac.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// All signs in ecliptic order (0 = Aries).
    pub const ALL: [ZodiacSign; 12] = [
        Self::Aries,
        Self::Taurus,
        Self::Gemini,
        Self::Cancer,
        Self::Leo,
        Self::Virgo,
        Self::Libra,
        Self::Scorpio,
        Self::Sagittarius,
        Self::Capricorn,
        Self::Aquarius,
        Self::Pisces,
    ];

    /// 0-based index (Aries = 0 .. Pisces = 11).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Sign at `index`, wrapping modulo 12.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Aries => "Aries",
            Self::Taurus => "Taurus",
            Self::Gemini => "Gemini",
            Self::Cancer => "Cancer",
            Self::Leo => "Leo",
            Self::Virgo => "Virgo",
            Self::Libra => "Libra",
            Self::Scorpio => "Scorpio",
            Self::Sagittarius => "Sagittarius",
            Self::Capricorn => "Capricorn",
            Self::Aquarius => "Aquarius",
            Self::Pisces => "Pisces",
        }
    }

    /// Classical element of the sign (triplicity).
    pub const fn element(self) -> Element {
        match self {
            Self::Aries | Self::Leo | Self::Sagittarius => Element::Fire,
            Self::Taurus | Self::Virgo | Self::Capricorn => Element::Earth,
            Self::Gemini | Self::Libra | Self::Aquarius => Element::Air,
            Self::Cancer | Self::Scorpio | Self::Pisces => Element::Water,
        }
    }

    /// Ecliptic longitude where the sign begins.
    #[inline]
    pub fn start(self) -> Degrees {
        Degrees::new(self.index() as f64 * SIGN_WIDTH_DEG)
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ZodiacSign {
    type Err = Error;

    /// Case-insensitive: `"aries"`, `"Aries"` and `"ARIES"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|sign| sign.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownSign(s.to_owned()))
    }
}

/// Countdown until the position reaches the next whole degree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DegreeCountdown {
    pub minutes: u32,
    pub seconds: u32,
}

/// Countdown until the position enters the next sign.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SignCountdown {
    pub hours: u32,
    pub minutes: u32,
}

/// A longitude expressed as sign + degree/minute/second within the sign.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ZodiacPosition {
    pub sign: ZodiacSign,
    /// Whole degrees within the sign, `0..=29`.
    pub degree: u8,
    /// Arc-minutes, `0..=59`.
    pub minute: u8,
    /// Whole arc-seconds, `0..=59`.
    pub second: u8,
    /// Normalised ecliptic longitude in `[0, 360)`.
    pub exact_longitude: f64,
}

impl ZodiacPosition {
    /// Map any real longitude (degrees) onto the zodiac.
    pub fn from_longitude(longitude: Degrees) -> Self {
        let lon = normalize_degrees(longitude.value());
        let sign_index = ((lon / SIGN_WIDTH_DEG).floor() as usize).min(11);
        let in_sign = lon - sign_index as f64 * SIGN_WIDTH_DEG;

        let degree = in_sign.floor().min(29.0);
        let minutes_f = (in_sign - degree) * 60.0;
        let minute = minutes_f.floor().min(59.0);
        let second = ((minutes_f - minute) * 60.0).floor().min(59.0);

        Self {
            sign: ZodiacSign::from_index(sign_index),
            degree: degree as u8,
            minute: minute as u8,
            second: second as u8,
            exact_longitude: lon,
        }
    }

    /// Exact position within the sign, `[0, 30)` degrees.
    #[inline]
    pub fn degree_in_sign(&self) -> f64 {
        (self.exact_longitude - self.sign.start().value()).max(0.0)
    }

    /// Longitude rebuilt from sign/degree/minute/second (truncated to the
    /// arc-second, so it never exceeds `exact_longitude`).
    pub fn reconstructed_longitude(&self) -> Degrees {
        Degrees::new(
            self.sign.start().value()
                + self.degree as f64
                + self.minute as f64 / 60.0
                + self.second as f64 / 3600.0,
        )
    }

    /// Clock time for the remaining fraction of the current degree, at
    /// [`MINUTES_PER_DEGREE`].
    pub fn time_to_next_degree(&self) -> DegreeCountdown {
        let in_sign = self.degree_in_sign();
        let remaining_deg = 1.0 - (in_sign - in_sign.floor());
        let total = remaining_deg * MINUTES_PER_DEGREE;
        let minutes = total.floor();
        let seconds = ((total - minutes) * 60.0).floor().min(59.0);
        DegreeCountdown {
            minutes: minutes as u32,
            seconds: seconds as u32,
        }
    }

    /// Clock time left before the next sign, at [`MINUTES_PER_DEGREE`].
    pub fn time_to_next_sign(&self) -> SignCountdown {
        let total = Minutes::new((SIGN_WIDTH_DEG - self.degree_in_sign()) * MINUTES_PER_DEGREE);
        let hours = total.to::<Hour>().value().floor();
        let minutes = (total.value() - hours * 60.0).floor().min(59.0);
        SignCountdown {
            hours: hours as u32,
            minutes: minutes as u32,
        }
    }
}

impl fmt::Display for ZodiacPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}° {:02}' {:02}\" {}",
            self.degree, self.minute, self.second, self.sign
        )
    }
}
