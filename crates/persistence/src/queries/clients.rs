// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client query operations.
//!
//! Clients are owned by the external client-management subsystem; this
//! module only reads their ids.

use crate::diesel_schema::{clients, financial_years};
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Lists all client ids in ascending order.
pub fn list_client_ids(conn: &mut _) -> Result<Vec<i64>, PersistenceError> {
    clients::table
        .select(clients::client_id)
        .order(clients::client_id.asc())
        .load::<i64>(conn)
        .map_err(Into::into)
}

}

backend_fn! {

/// Returns ids of clients lacking a financial year with the given label.
///
/// Anti-join: every client id that does not appear among the
/// `financial_years` rows carrying `label`. Scans the full client set; fine
/// while the client population is modest.
pub fn clients_without_financial_year(
    conn: &mut _,
    label: &str,
) -> Result<Vec<i64>, PersistenceError> {
    let covered = financial_years::table
        .filter(financial_years::label.eq(label))
        .select(financial_years::client_id);

    clients::table
        .filter(clients::client_id.ne_all(covered))
        .select(clients::client_id)
        .order(clients::client_id.asc())
        .load::<i64>(conn)
        .map_err(Into::into)
}

}
