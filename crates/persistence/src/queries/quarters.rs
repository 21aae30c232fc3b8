// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Quarter query operations.

use crate::data_models::QuarterRecord;
use crate::diesel_schema::quarters;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Lists the quarters of a financial year, ordered by quarter number.
pub fn list_quarters(
    conn: &mut _,
    financial_year_id: i64,
) -> Result<Vec<QuarterRecord>, PersistenceError> {
    quarters::table
        .filter(quarters::financial_year_id.eq(financial_year_id))
        .order(quarters::quarter_number.asc())
        .load::<QuarterRecord>(conn)
        .map_err(Into::into)
}

}
