//! # Settlement Periods
//!
//! A `Period` is an inclusive calendar-date range over which revenue is
//! aggregated and exactly one Calculation per barber is produced.
//!
//! Period boundaries are dates without time-of-day: a sale stamped
//! `2026-03-31T23:59:12Z` belongs to any period whose range includes
//! `2026-03-31`.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An inclusive calendar-date range.
///
/// Construction enforces `start <= end`; a `Period` in hand is always
/// well-formed, so downstream code never re-checks the ordering.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "RawPeriod")]
pub struct Period {
    start: NaiveDate,
    end: NaiveDate,
}

/// Unvalidated mirror used by the serde `try_from` hook.
#[derive(Deserialize)]
struct RawPeriod {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawPeriod> for Period {
    type Error = ValidationError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Period::new(raw.start, raw.end)
    }
}

impl Period {
    /// Creates a period, rejecting a start after the end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::PeriodOrder { start, end });
        }
        Ok(Period { start, end })
    }

    /// The calendar month containing `date`, as a period.
    ///
    /// Reports default to this scope, matching how payouts are run in
    /// practice (one settlement per barber per month).
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let next_month = if start.month() == 12 {
            NaiveDate::from_ymd_opt(start.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(start.year(), start.month() + 1, 1)
        };
        let end = next_month
            .and_then(|d| d.checked_sub_days(Days::new(1)))
            .unwrap_or(date);
        Period { start, end }
    }

    /// First day of the period (inclusive).
    #[inline]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the period (inclusive).
    #[inline]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` falls within the period, boundaries included.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
