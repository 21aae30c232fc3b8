// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quarter transition mutations.
//!
//! The transition is driven by calendar time, not by events: callers pass
//! the identities of the quarter containing today and the one before it,
//! and this module converges the stored rows onto the target state inside a
//! single transaction.
//!
//! The `WHERE` predicates exclude rows already in the target state, so a
//! re-run at an unchanged date writes nothing — the update is a convergent
//! assignment, safe under retries and overlapping runs.

use crate::data_models::QuarterTransitionCounts;
use crate::diesel_schema::{financial_years, quarters};
use crate::error::PersistenceError;
use advtax_domain::QuarterStatus;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

backend_fn! {

/// Applies the quarter transition for the given identities in one transaction.
///
/// Step 1 unlocks and activates every quarter numbered `current_number`
/// under a financial year labeled `current_label` that is not already
/// unlocked and active. Step 2 completes every quarter numbered
/// `previous_number` under a financial year labeled `previous_label` whose
/// status is not already completed; the lock flag is left untouched there.
///
/// Both updates commit atomically, so concurrent readers never observe one
/// applied without the other.
pub fn transition_quarters(
    conn: &mut _,
    current_label: &str,
    current_number: i32,
    previous_label: &str,
    previous_number: i32,
) -> Result<QuarterTransitionCounts, PersistenceError> {
    conn.transaction(|conn| {
        let current_fy_ids: Vec<i64> = financial_years::table
            .filter(financial_years::label.eq(current_label))
            .select(financial_years::financial_year_id)
            .load::<i64>(conn)?;

        let previous_fy_ids: Vec<i64> = financial_years::table
            .filter(financial_years::label.eq(previous_label))
            .select(financial_years::financial_year_id)
            .load::<i64>(conn)?;

        let mut counts = QuarterTransitionCounts::default();

        if !current_fy_ids.is_empty() {
            counts.current_quarters_updated = diesel::update(
                quarters::table.filter(
                    quarters::financial_year_id
                        .eq_any(&current_fy_ids)
                        .and(quarters::quarter_number.eq(current_number))
                        .and(
                            quarters::is_locked
                                .ne(0)
                                .or(quarters::status.ne(QuarterStatus::Active.as_str())),
                        ),
                ),
            )
            .set((
                quarters::is_locked.eq(0),
                quarters::status.eq(QuarterStatus::Active.as_str()),
            ))
            .execute(conn)?;
        }

        if !previous_fy_ids.is_empty() {
            counts.previous_quarters_updated = diesel::update(
                quarters::table.filter(
                    quarters::financial_year_id
                        .eq_any(&previous_fy_ids)
                        .and(quarters::quarter_number.eq(previous_number))
                        .and(quarters::status.ne(QuarterStatus::Completed.as_str())),
                ),
            )
            .set(quarters::status.eq(QuarterStatus::Completed.as_str()))
            .execute(conn)?;
        }

        debug!(
            current_label,
            current_number,
            previous_label,
            previous_number,
            current_quarters_updated = counts.current_quarters_updated,
            previous_quarters_updated = counts.previous_quarters_updated,
            "Applied quarter transition"
        );

        Ok(counts)
    })
}

}
