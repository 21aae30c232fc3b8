// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod backend_validation_tests;
mod transition_tests;

use crate::{NewClient, NewFinancialYear, NewQuarter, Persistence, format_date};
use advtax_domain::{FiscalYear, QuarterStatus};
use time::{Date, Month};

/// Builds a date from numeric components for test readability.
pub fn date(year: i32, month: u8, day: u8) -> Date {
    Date::from_calendar_date(year, Month::try_from(month).unwrap(), day).unwrap()
}

/// Inserts a client row with unique government ids derived from `tag`.
pub fn create_test_client(persistence: &mut Persistence, tag: &str) -> i64 {
    persistence
        .create_client(&NewClient {
            first_name: format!("Client-{tag}"),
            last_name: String::from("Test"),
            aadhaar_number: format!("AADHAAR-{tag}"),
            pan_number: format!("PAN-{tag}"),
            is_family_member: 0,
            family_relationship: None,
            is_advance_tax_payer: 1,
        })
        .unwrap()
}

/// Builds provisioning inputs for a client the way the provisioning job
/// does: statutory dates from the fiscal year, quarter dispositions as of
/// `today`.
pub fn provisioning_inputs(
    client_id: i64,
    fiscal_year: FiscalYear,
    today: Date,
) -> (NewFinancialYear, Vec<NewQuarter>) {
    let financial_year = NewFinancialYear {
        client_id,
        label: fiscal_year.label(),
        start_date: format_date(fiscal_year.start_date().unwrap()).unwrap(),
        end_date: format_date(fiscal_year.end_date().unwrap()).unwrap(),
        return_due_date: format_date(fiscal_year.return_due_date().unwrap()).unwrap(),
        status: String::from("active"),
    };

    let quarters = fiscal_year
        .quarter_spans()
        .unwrap()
        .iter()
        .map(|span| {
            let disposition = span.disposition_on(today);
            NewQuarter {
                quarter_number: i32::from(span.number().as_u8()),
                start_date: format_date(span.start_date()).unwrap(),
                end_date: format_date(span.end_date()).unwrap(),
                is_locked: disposition.is_locked,
                status: disposition.status.as_str().to_string(),
            }
        })
        .collect();

    (financial_year, quarters)
}

/// Provisions a client for the fiscal year as of `today` and returns the
/// generated financial year id.
pub fn provision_test_year(
    persistence: &mut Persistence,
    client_id: i64,
    fiscal_year: FiscalYear,
    today: Date,
) -> i64 {
    let (financial_year, quarters) = provisioning_inputs(client_id, fiscal_year, today);
    persistence
        .create_financial_year_with_quarters(&financial_year, &quarters)
        .unwrap()
}

/// Shorthand for asserting a quarter row's lock flag and status.
pub fn assert_quarter_state(
    persistence: &mut Persistence,
    financial_year_id: i64,
    quarter_number: i32,
    locked: bool,
    status: QuarterStatus,
) {
    let quarters = persistence.list_quarters(financial_year_id).unwrap();
    let quarter = quarters
        .iter()
        .find(|q| q.quarter_number == quarter_number)
        .unwrap();
    assert_eq!(
        quarter.locked(),
        locked,
        "lock flag mismatch for Q{quarter_number}"
    );
    assert_eq!(
        quarter.status,
        status.as_str(),
        "status mismatch for Q{quarter_number}"
    );
}
