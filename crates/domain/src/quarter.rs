// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quarter status tracking and the date-driven status policy.
//!
//! Unlike operator-driven workflows, quarter status is a pure function of
//! the calendar: a quarter is inactive before its span, active within it,
//! and completed after it. The lock flag shadows that lifecycle — only
//! not-yet-started quarters are locked.

use crate::error::DomainError;
use crate::fiscal_year::QuarterNumber;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Lifecycle status of a quarter.
///
/// Status advances monotonically `inactive → active → completed` as calendar
/// time passes; it never regresses in normal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuarterStatus {
    /// The quarter has not started yet.
    Inactive,
    /// Today falls within the quarter's date range.
    Active,
    /// The quarter has ended.
    Completed,
}

impl QuarterStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "inactive" => Ok(Self::Inactive),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidQuarterStatus(s.to_string())),
        }
    }
}

impl FromStr for QuarterStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for QuarterStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The lock flag and status a quarter should carry on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuarterDisposition {
    /// Whether the quarter is locked for data entry.
    pub is_locked: bool,
    /// The lifecycle status.
    pub status: QuarterStatus,
}

/// One quarter's date range within a fiscal year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterSpan {
    number: QuarterNumber,
    start_date: Date,
    end_date: Date,
}

impl QuarterSpan {
    /// Creates a quarter span from its parts.
    #[must_use]
    pub const fn new(number: QuarterNumber, start_date: Date, end_date: Date) -> Self {
        Self {
            number,
            start_date,
            end_date,
        }
    }

    /// Returns the quarter number.
    #[must_use]
    pub const fn number(&self) -> QuarterNumber {
        self.number
    }

    /// Returns the first day of the quarter (inclusive).
    #[must_use]
    pub const fn start_date(&self) -> Date {
        self.start_date
    }

    /// Returns the last day of the quarter (inclusive).
    #[must_use]
    pub const fn end_date(&self) -> Date {
        self.end_date
    }

    /// Determines the lock flag and status this quarter should carry on
    /// `today`.
    ///
    /// Both boundary days count as inside the quarter: a quarter is active
    /// from its first day through its last day inclusive, completed only
    /// strictly after the last day, and locked/inactive strictly before the
    /// first.
    #[must_use]
    pub fn disposition_on(&self, today: Date) -> QuarterDisposition {
        if today > self.end_date {
            QuarterDisposition {
                is_locked: false,
                status: QuarterStatus::Completed,
            }
        } else if today >= self.start_date {
            QuarterDisposition {
                is_locked: false,
                status: QuarterStatus::Active,
            }
        } else {
            QuarterDisposition {
                is_locked: true,
                status: QuarterStatus::Inactive,
            }
        }
    }
}
