// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Financial year provisioning mutations.
//!
//! Inserting a financial year and its quarters is a single transaction: the
//! generated financial year id is read before commit so the quarter rows can
//! reference it, and any failure rolls everything back together.

use crate::backend::PersistenceBackend;
use crate::data_models::{NewFinancialYear, NewQuarter, QuarterRow};
use crate::diesel_schema::{financial_years, quarters};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

/// Maps a unique-constraint violation on the financial year insert to the
/// dedicated duplicate error; the `UNIQUE(client_id, label)` constraint is
/// what closes the check-then-insert race under concurrent runs.
fn map_insert_error(
    error: diesel::result::Error,
    financial_year: &NewFinancialYear,
) -> PersistenceError {
    match error {
        diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            PersistenceError::DuplicateFinancialYear {
                client_id: financial_year.client_id,
                label: financial_year.label.clone(),
            }
        }
        other => other.into(),
    }
}

backend_fn! {

/// Inserts a financial year and its quarter rows in one transaction.
///
/// The quarter inputs carry no owning id; it is assigned here from the
/// freshly inserted financial year row.
pub fn create_financial_year_with_quarters(
    conn: &mut _,
    financial_year: &NewFinancialYear,
    new_quarters: &[NewQuarter],
) -> Result<i64, PersistenceError> {
    conn.transaction(|conn| {
        diesel::insert_into(financial_years::table)
            .values(financial_year)
            .execute(conn)
            .map_err(|e| map_insert_error(e, financial_year))?;

        let financial_year_id = conn.last_insert_id()?;

        let rows: Vec<QuarterRow> = new_quarters
            .iter()
            .map(|q| QuarterRow {
                financial_year_id,
                quarter_number: q.quarter_number,
                start_date: q.start_date.clone(),
                end_date: q.end_date.clone(),
                is_locked: i32::from(q.is_locked),
                status: q.status.clone(),
            })
            .collect();

        diesel::insert_into(quarters::table)
            .values(&rows)
            .execute(conn)?;

        debug!(
            financial_year_id,
            client_id = financial_year.client_id,
            label = %financial_year.label,
            quarter_count = rows.len(),
            "Inserted financial year with quarters"
        );

        Ok(financial_year_id)
    })
}

}
