// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client mutation operations.
//!
//! The client roster is owned by the external client-management subsystem;
//! this mutation exists so tests and local seeding can populate it.

use crate::backend::PersistenceBackend;
use crate::data_models::NewClient;
use crate::diesel_schema::clients;
use crate::error::PersistenceError;
use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

backend_fn! {

/// Inserts a client row and returns the generated id.
pub fn create_client(conn: &mut _, client: &NewClient) -> Result<i64, PersistenceError> {
    diesel::insert_into(clients::table)
        .values(client)
        .execute(conn)?;
    conn.last_insert_id()
}

}
