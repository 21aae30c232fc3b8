// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.


use advtax_persistence::{NewClient, Persistence};
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
            last_name: String::from("Jobs"),
            aadhaar_number: format!("AADHAAR-JOB-{tag}"),
            pan_number: format!("PAN-JOB-{tag}"),
            is_family_member: 0,
            family_relationship: None,
            is_advance_tax_payer: 1,
        })
        .unwrap()
}
