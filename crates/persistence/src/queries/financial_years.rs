// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Financial year query operations.

use crate::data_models::FinancialYearRecord;
use crate::diesel_schema::financial_years;
use crate::error::PersistenceError;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Returns the ids of all financial years carrying the given label.
///
/// One row per client that has been provisioned for the year, so the result
/// set grows with the client population.
pub fn financial_year_ids_with_label(
    conn: &mut _,
    label: &str,
) -> Result<Vec<i64>, PersistenceError> {
    financial_years::table
        .filter(financial_years::label.eq(label))
        .select(financial_years::financial_year_id)
        .load::<i64>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// Checks whether a client already has a financial year with the label.
pub fn financial_year_exists(
    conn: &mut _,
    client_id: i64,
    label: &str,
) -> Result<bool, PersistenceError> {
    diesel::select(exists(
        financial_years::table
            .filter(financial_years::client_id.eq(client_id))
            .filter(financial_years::label.eq(label)),
    ))
    .get_result::<bool>(conn)
    .map_err(Into::into)
}

}

backend_fn! {

/// Retrieves a financial year by id.
pub fn get_financial_year(
    conn: &mut _,
    financial_year_id: i64,
) -> Result<FinancialYearRecord, PersistenceError> {
    financial_years::table
        .find(financial_year_id)
        .first::<FinancialYearRecord>(conn)
        .optional()?
        .ok_or(PersistenceError::FinancialYearNotFound(financial_year_id))
}

}

backend_fn! {

/// Retrieves a client's financial year for a label, if present.
pub fn find_financial_year(
    conn: &mut _,
    client_id: i64,
    label: &str,
) -> Result<Option<FinancialYearRecord>, PersistenceError> {
    financial_years::table
        .filter(financial_years::client_id.eq(client_id))
        .filter(financial_years::label.eq(label))
        .first::<FinancialYearRecord>(conn)
        .optional()
        .map_err(Into::into)
}

}

backend_fn! {

/// Counts all financial year rows.
pub fn count_financial_years(conn: &mut _) -> Result<i64, PersistenceError> {
    financial_years::table
        .count()
        .get_result::<i64>(conn)
        .map_err(Into::into)
}

}
