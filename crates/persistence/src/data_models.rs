// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::{clients, financial_years, quarters};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Insertable client row.
///
/// Clients are owned by the external client-management subsystem; this
/// struct exists so tests and local seeding can populate the table.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = clients)]
pub struct NewClient {
    pub first_name: String,
    pub last_name: String,
    pub aadhaar_number: String,
    pub pan_number: String,
    pub is_family_member: i32,
    pub family_relationship: Option<String>,
    pub is_advance_tax_payer: i32,
}

/// Insertable financial year row.
///
/// Dates are ISO-8601 strings (`2025-04-01`); see [`crate::format_date`].
#[derive(Debug, Clone, PartialEq, Eq, Insertable)]
#[diesel(table_name = financial_years)]
pub struct NewFinancialYear {
    pub client_id: i64,
    pub label: String,
    pub start_date: String,
    pub end_date: String,
    pub return_due_date: String,
    pub status: String,
}

/// One quarter's worth of provisioning input.
///
/// The owning `financial_year_id` is not known until the financial year row
/// has been inserted, so it is assigned inside the provisioning transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuarter {
    pub quarter_number: i32,
    pub start_date: String,
    pub end_date: String,
    pub is_locked: bool,
    pub status: String,
}

/// Fully-resolved insertable quarter row.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = quarters)]
pub(crate) struct QuarterRow {
    pub financial_year_id: i64,
    pub quarter_number: i32,
    pub start_date: String,
    pub end_date: String,
    pub is_locked: i32,
    pub status: String,
}

/// A financial year row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Serialize, Deserialize)]
pub struct FinancialYearRecord {
    pub financial_year_id: i64,
    pub client_id: i64,
    pub label: String,
    pub start_date: String,
    pub end_date: String,
    pub return_due_date: String,
    pub status: String,
}

/// A quarter row as stored.
///
/// `is_locked` is the raw storage integer (0/1).
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Serialize, Deserialize)]
pub struct QuarterRecord {
    pub quarter_id: i64,
    pub financial_year_id: i64,
    pub quarter_number: i32,
    pub start_date: String,
    pub end_date: String,
    pub is_locked: i32,
    pub status: String,
}

impl QuarterRecord {
    /// Returns the lock flag as a boolean.
    #[must_use]
    pub const fn locked(&self) -> bool {
        self.is_locked != 0
    }
}

/// Rows actually changed by one run of the quarter transition.
///
/// Both counts are zero when the database already matched the target state,
/// which is how a re-run at an unchanged date reports itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterTransitionCounts {
    /// Current-quarter rows set to unlocked/active.
    pub current_quarters_updated: usize,
    /// Previous-quarter rows set to completed.
    pub previous_quarters_updated: usize,
}
