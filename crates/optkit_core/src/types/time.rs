//! Day count conventions and time to expiry.
//!
//! Option contracts are usually quoted with an expiration date rather than a
//! year fraction. This module converts between the two.
//!
//! # Examples
//!
//! ```
//! use optkit_core::types::time::{time_to_expiry, DayCountConvention};
//! use chrono::NaiveDate;
//!
//! let valuation = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let expiration = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
//!
//! // 182 days / 365
//! let t = time_to_expiry(valuation, expiration).unwrap();
//! assert!((t - 0.4986).abs() < 0.001);
//!
//! let t_360 = DayCountConvention::ActualActual360.year_fraction(valuation, expiration);
//! assert!((t_360 - 0.5056).abs() < 0.001);
//! ```

use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::str::FromStr;

use super::error::DateError;

/// Day count convention for converting a date interval to years.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DayCountConvention {
    /// Actual/365 Fixed: actual_days / 365.0
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "ACT/365"))]
    ActualActual365,

    /// Actual/360: actual_days / 360.0
    #[cfg_attr(feature = "serde", serde(rename = "ACT/360"))]
    ActualActual360,

    /// 30/360 US Bond Basis. Each month counts 30 days, the year 360.
    #[cfg_attr(feature = "serde", serde(rename = "30/360"))]
    Thirty360,
}

impl DayCountConvention {
    /// Returns the standard convention name.
    ///
    /// ```
    /// use optkit_core::types::time::DayCountConvention;
    ///
    /// assert_eq!(DayCountConvention::ActualActual365.name(), "ACT/365");
    /// assert_eq!(DayCountConvention::Thirty360.name(), "30/360");
    /// ```
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::ActualActual365 => "ACT/365",
            DayCountConvention::ActualActual360 => "ACT/360",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Year fraction from `start` to `end`.
    ///
    /// Negative when `end` precedes `start`.
    pub fn year_fraction(&self, start: NaiveDate, end: NaiveDate) -> f64 {
        match self {
            DayCountConvention::ActualActual365 => (end - start).num_days() as f64 / 365.0,
            DayCountConvention::ActualActual360 => (end - start).num_days() as f64 / 360.0,
            DayCountConvention::Thirty360 => {
                let (first, last, sign) = if start <= end {
                    (start, end, 1.0)
                } else {
                    (end, start, -1.0)
                };

                let d1 = if first.day() == 31 { 30 } else { first.day() };
                let d2 = if last.day() == 31 && d1 == 30 {
                    30
                } else {
                    last.day()
                };

                let days = 360 * (last.year() - first.year())
                    + 30 * (last.month() as i32 - first.month() as i32)
                    + (d2 as i32 - d1 as i32);
                sign * days as f64 / 360.0
            }
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = String;

    /// Parses case-insensitively, ignoring '/' and spaces:
    /// - ACT/365: "ACT/365", "Actual/365", "A365"
    /// - ACT/360: "ACT/360", "Actual/360", "A360"
    /// - 30/360: "30/360", "Thirty360"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' '], "").as_str() {
            "ACT365" | "ACTUAL365" | "A365" => Ok(DayCountConvention::ActualActual365),
            "ACT360" | "ACTUAL360" | "A360" => Ok(DayCountConvention::ActualActual360),
            "30360" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            _ => Err(format!("Unknown day count convention: {}", s)),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Parses an ISO 8601 (`YYYY-MM-DD`) date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| DateError::ParseError(s.to_string()))
}

/// Time to expiry in years using ACT/365.
///
/// # Errors
/// `DateError::NotAfterValuation` when `expiration <= valuation`; a zero or
/// negative time to expiry is outside the domain of the pricing formulas.
pub fn time_to_expiry(valuation: NaiveDate, expiration: NaiveDate) -> Result<f64, DateError> {
    time_to_expiry_with(DayCountConvention::ActualActual365, valuation, expiration)
}

/// Time to expiry in years under an explicit convention.
pub fn time_to_expiry_with(
    convention: DayCountConvention,
    valuation: NaiveDate,
    expiration: NaiveDate,
) -> Result<f64, DateError> {
    if expiration <= valuation {
        return Err(DateError::NotAfterValuation {
            valuation: valuation.to_string(),
            expiration: expiration.to_string(),
        });
    }
    Ok(convention.year_fraction(valuation, expiration))
}
