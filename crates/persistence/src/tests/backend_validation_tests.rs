// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend validation tests for multi-database support.
//!
//! These tests validate that the persistence layer works correctly on
//! MariaDB/MySQL in addition to the default `SQLite` backend.
//!
//! ## Test Execution
//!
//! - `SQLite` tests run normally via `cargo test`
//! - MariaDB/MySQL tests are marked `#[ignore]` and run only via
//!   `cargo xtask test-mariadb`
//!
//! ## Infrastructure Requirements
//!
//! `MariaDB` tests require:
//! - `DATABASE_URL` environment variable (set by xtask)
//! - `ADVTAX_TEST_BACKEND=mariadb` environment variable
//! - Running `MariaDB` instance (provisioned by xtask)
//!
//! Tests fail fast if required infrastructure is missing.
//!
//! ## What These Tests Validate
//!
//! Infrastructure and schema compatibility, not business logic:
//! - Schema creation and migration application
//! - Constraint enforcement (FK, UNIQUE)
//! - Transaction semantics
//!
//! Business logic is validated by the standard suite against `SQLite`.

use diesel::MysqlConnection;
use diesel::prelude::*;
use std::env;

use crate::tests::{date, provisioning_inputs};
use crate::{NewClient, Persistence, PersistenceError};
use advtax_domain::{FiscalYear, QuarterRef};

/// Helper to get the `MariaDB` connection URL from environment.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is not set, indicating missing infrastructure.
fn get_mariadb_url() -> String {
    env::var("DATABASE_URL")
        .expect("DATABASE_URL not set - MariaDB tests must be run via `cargo xtask test-mariadb`")
}

/// Helper to verify we're running in the `MariaDB` test environment.
///
/// # Panics
///
/// Panics if `ADVTAX_TEST_BACKEND` is not set to `mariadb`.
fn verify_mariadb_test_environment() {
    let backend = env::var("ADVTAX_TEST_BACKEND").expect(
        "ADVTAX_TEST_BACKEND not set - MariaDB tests must be run via `cargo xtask test-mariadb`",
    );
    assert_eq!(backend, "mariadb", "ADVTAX_TEST_BACKEND must be 'mariadb'");
}

/// Creates a uniquely-tagged client on the `MariaDB` backend.
fn create_mariadb_client(persistence: &mut Persistence, tag: &str) -> i64 {
    persistence
        .create_client(&NewClient {
            first_name: format!("Client-{tag}"),
            last_name: String::from("Backend"),
            aadhaar_number: format!("AADHAAR-MDB-{tag}"),
            pan_number: format!("PAN-MDB-{tag}"),
            is_family_member: 0,
            family_relationship: None,
            is_advance_tax_payer: 1,
        })
        .unwrap()
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_connection() {
    verify_mariadb_test_environment();
    let url = get_mariadb_url();

    let result = MysqlConnection::establish(&url);
    assert!(
        result.is_ok(),
        "Failed to connect to MariaDB: {:?}",
        result.err()
    );
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_migrations_and_foreign_keys() {
    verify_mariadb_test_environment();
    let mut persistence = Persistence::new_with_mysql(&get_mariadb_url()).unwrap();
    persistence.verify_foreign_key_enforcement().unwrap();
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_provision_and_transition_round_trip() {
    verify_mariadb_test_environment();
    let mut persistence = Persistence::new_with_mysql(&get_mariadb_url()).unwrap();

    let client_id = create_mariadb_client(&mut persistence, "RT");
    let (financial_year, quarters) =
        provisioning_inputs(client_id, FiscalYear::new(2025), date(2025, 5, 15));
    let financial_year_id = persistence
        .create_financial_year_with_quarters(&financial_year, &quarters)
        .unwrap();

    assert_eq!(
        persistence
            .list_quarters(financial_year_id)
            .unwrap()
            .len(),
        4
    );

    let current = QuarterRef::containing(date(2025, 10, 5));
    let first = persistence
        .transition_quarters(&current, &current.previous())
        .unwrap();
    assert!(first.current_quarters_updated >= 1);

    // Idempotence holds on this backend too.
    let second = persistence
        .transition_quarters(&current, &current.previous())
        .unwrap();
    assert_eq!(second.current_quarters_updated, 0);
    assert_eq!(second.previous_quarters_updated, 0);
}

#[test]
#[ignore = "requires MariaDB via cargo xtask test-mariadb"]
fn test_mariadb_unique_constraint_on_client_label() {
    verify_mariadb_test_environment();
    let mut persistence = Persistence::new_with_mysql(&get_mariadb_url()).unwrap();

    let client_id = create_mariadb_client(&mut persistence, "UQ");
    let (financial_year, quarters) =
        provisioning_inputs(client_id, FiscalYear::new(2025), date(2025, 5, 15));
    persistence
        .create_financial_year_with_quarters(&financial_year, &quarters)
        .unwrap();

    let result = persistence.create_financial_year_with_quarters(&financial_year, &quarters);
    assert_eq!(
        result,
        Err(PersistenceError::DuplicateFinancialYear {
            client_id,
            label: String::from("25-26"),
        })
    );
}
