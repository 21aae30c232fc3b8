// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Canonical fiscal year domain model.
//!
//! A fiscal year is identified by the calendar year in which it starts
//! (April 1). All other properties — label, date range, statutory return
//! deadline, quarter spans — are derived deterministically from that one
//! value.

use crate::error::DomainError;
use crate::quarter::QuarterSpan;
use serde::{Deserialize, Serialize};
use time::{Date, Month};

/// Builds a date from fixed calendar components.
///
/// Only fails when the year is outside the range `time` can represent.
fn calendar_date(year: i32, month: Month, day: u8) -> Result<Date, DomainError> {
    Date::from_calendar_date(year, month, day).map_err(|_| DomainError::YearOutOfRange { year })
}

/// Represents a fiscal year (April 1 – March 31).
///
/// Fiscal years are labeled by their two-digit start and end years, so the
/// year starting April 2025 is `25-26`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FiscalYear {
    /// The calendar year in which the fiscal year starts.
    start_year: i32,
}

impl FiscalYear {
    /// Creates a fiscal year from its start year.
    #[must_use]
    pub const fn new(start_year: i32) -> Self {
        Self { start_year }
    }

    /// Returns the fiscal year containing the given date.
    ///
    /// April through December belong to the fiscal year starting that same
    /// calendar year; January through March belong to the fiscal year that
    /// started the previous calendar year.
    #[must_use]
    pub fn containing(today: Date) -> Self {
        let start_year = if u8::from(today.month()) >= 4 {
            today.year()
        } else {
            today.year() - 1
        };
        Self { start_year }
    }

    /// Returns the calendar year in which this fiscal year starts.
    #[must_use]
    pub const fn start_year(&self) -> i32 {
        self.start_year
    }

    /// Returns the fiscal year immediately before this one.
    #[must_use]
    pub const fn previous(&self) -> Self {
        Self {
            start_year: self.start_year - 1,
        }
    }

    /// Returns the `YY-YY` label, e.g. `25-26` for the year starting April
    /// 2025. Both halves are zero-padded (`05-06`).
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{:02}-{:02}",
            self.start_year.rem_euclid(100),
            (self.start_year + 1).rem_euclid(100)
        )
    }

    /// Returns April 1 of the start year.
    ///
    /// # Errors
    ///
    /// Returns an error if the start year is outside the representable range.
    pub fn start_date(&self) -> Result<Date, DomainError> {
        calendar_date(self.start_year, Month::April, 1)
    }

    /// Returns March 31 of the following calendar year.
    ///
    /// # Errors
    ///
    /// Returns an error if the start year is outside the representable range.
    pub fn end_date(&self) -> Result<Date, DomainError> {
        calendar_date(self.start_year + 1, Month::March, 31)
    }

    /// Returns the statutory return-filing deadline: July 31 of the calendar
    /// year after the fiscal year starts.
    ///
    /// # Errors
    ///
    /// Returns an error if the start year is outside the representable range.
    pub fn return_due_date(&self) -> Result<Date, DomainError> {
        calendar_date(self.start_year + 1, Month::July, 31)
    }

    /// Returns the four quarter spans of this fiscal year, in order.
    ///
    /// Quarter boundaries are fixed calendar months:
    /// - Q1: April 1 – June 30
    /// - Q2: July 1 – September 30
    /// - Q3: October 1 – December 31
    /// - Q4: January 1 – March 31 of the following calendar year
    ///
    /// The spans are contiguous and together cover the full fiscal year.
    ///
    /// # Errors
    ///
    /// Returns an error if the start year is outside the representable range.
    pub fn quarter_spans(&self) -> Result<[QuarterSpan; 4], DomainError> {
        let y = self.start_year;
        Ok([
            QuarterSpan::new(
                QuarterNumber::Q1,
                calendar_date(y, Month::April, 1)?,
                calendar_date(y, Month::June, 30)?,
            ),
            QuarterSpan::new(
                QuarterNumber::Q2,
                calendar_date(y, Month::July, 1)?,
                calendar_date(y, Month::September, 30)?,
            ),
            QuarterSpan::new(
                QuarterNumber::Q3,
                calendar_date(y, Month::October, 1)?,
                calendar_date(y, Month::December, 31)?,
            ),
            QuarterSpan::new(
                QuarterNumber::Q4,
                calendar_date(y + 1, Month::January, 1)?,
                calendar_date(y + 1, Month::March, 31)?,
            ),
        ])
    }
}

impl std::fmt::Display for FiscalYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FY {}", self.label())
    }
}

/// A quarter number within a fiscal year, restricted to 1–4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuarterNumber(u8);

impl QuarterNumber {
    /// First quarter (April–June).
    pub const Q1: Self = Self(1);
    /// Second quarter (July–September).
    pub const Q2: Self = Self(2);
    /// Third quarter (October–December).
    pub const Q3: Self = Self(3);
    /// Fourth quarter (January–March).
    pub const Q4: Self = Self(4);

    /// Creates a quarter number, validating the 1–4 range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidQuarterNumber` for values outside 1–4.
    pub const fn new(number: u8) -> Result<Self, DomainError> {
        if number == 0 || number > 4 {
            return Err(DomainError::InvalidQuarterNumber(number));
        }
        Ok(Self(number))
    }

    /// Returns the raw quarter number (1–4).
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for QuarterNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

/// Identifies one quarter of one fiscal year.
///
/// This is the unit the transition engine reasons about: "Q3 of FY 25-26".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuarterRef {
    fiscal_year: FiscalYear,
    number: QuarterNumber,
}

impl QuarterRef {
    /// Creates a quarter reference from its parts.
    #[must_use]
    pub const fn new(fiscal_year: FiscalYear, number: QuarterNumber) -> Self {
        Self {
            fiscal_year,
            number,
        }
    }

    /// Returns the quarter containing the given date.
    ///
    /// January through March map to Q4 of the fiscal year that started the
    /// previous calendar year; the Q4 span crosses the calendar-year line.
    #[must_use]
    pub fn containing(today: Date) -> Self {
        let fiscal_year = FiscalYear::containing(today);
        let number = match u8::from(today.month()) {
            4..=6 => QuarterNumber::Q1,
            7..=9 => QuarterNumber::Q2,
            10..=12 => QuarterNumber::Q3,
            _ => QuarterNumber::Q4,
        };
        Self {
            fiscal_year,
            number,
        }
    }

    /// Returns the quarter immediately before this one.
    ///
    /// Q1 wraps to Q4 of the previous fiscal year; any other quarter
    /// decrements within the same fiscal year.
    #[must_use]
    pub const fn previous(&self) -> Self {
        match self.number.as_u8() {
            1 => Self {
                fiscal_year: self.fiscal_year.previous(),
                number: QuarterNumber::Q4,
            },
            n => Self {
                fiscal_year: self.fiscal_year,
                number: QuarterNumber(n - 1),
            },
        }
    }

    /// Returns the fiscal year this quarter belongs to.
    #[must_use]
    pub const fn fiscal_year(&self) -> FiscalYear {
        self.fiscal_year
    }

    /// Returns the quarter number.
    #[must_use]
    pub const fn number(&self) -> QuarterNumber {
        self.number
    }
}

impl std::fmt::Display for QuarterRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.fiscal_year, self.number)
    }
}
