// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::Persistence;
use crate::tests::{assert_quarter_state, create_test_client, date, provision_test_year};
use advtax_domain::{FiscalYear, QuarterRef, QuarterStatus};

#[test]
fn test_transition_activates_current_and_completes_previous() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let client_id = create_test_client(&mut persistence, "T1");
    // Provisioned in May: Q1 active, Q2-Q4 locked/inactive.
    let financial_year_id = provision_test_year(
        &mut persistence,
        client_id,
        FiscalYear::new(2025),
        date(2025, 5, 15),
    );

    // October: Q3 is current, Q2 is previous.
    let current = QuarterRef::containing(date(2025, 10, 5));
    let counts = persistence
        .transition_quarters(&current, &current.previous())
        .unwrap();

    assert_eq!(counts.current_quarters_updated, 1);
    assert_eq!(counts.previous_quarters_updated, 1);

    assert_quarter_state(
        &mut persistence,
        financial_year_id,
        3,
        false,
        QuarterStatus::Active,
    );
    // Completion leaves the lock flag untouched.
    assert_quarter_state(
        &mut persistence,
        financial_year_id,
        2,
        true,
        QuarterStatus::Completed,
    );
    // Untargeted quarters keep their provisioned state.
    assert_quarter_state(
        &mut persistence,
        financial_year_id,
        1,
        false,
        QuarterStatus::Active,
    );
    assert_quarter_state(
        &mut persistence,
        financial_year_id,
        4,
        true,
        QuarterStatus::Inactive,
    );
}

#[test]
fn test_transition_is_idempotent() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let client_id = create_test_client(&mut persistence, "T2");
    let financial_year_id = provision_test_year(
        &mut persistence,
        client_id,
        FiscalYear::new(2025),
        date(2025, 5, 15),
    );

    let current = QuarterRef::containing(date(2025, 10, 5));
    let first = persistence
        .transition_quarters(&current, &current.previous())
        .unwrap();
    assert_eq!(first.current_quarters_updated, 1);
    assert_eq!(first.previous_quarters_updated, 1);

    let before = persistence.list_quarters(financial_year_id).unwrap();

    // Re-running at the same date converges to zero writes.
    let second = persistence
        .transition_quarters(&current, &current.previous())
        .unwrap();
    assert_eq!(second.current_quarters_updated, 0);
    assert_eq!(second.previous_quarters_updated, 0);

    let after = persistence.list_quarters(financial_year_id).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_transition_across_the_calendar_year_boundary() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let client_id = create_test_client(&mut persistence, "T3");
    let financial_year_id = provision_test_year(
        &mut persistence,
        client_id,
        FiscalYear::new(2025),
        date(2025, 5, 15),
    );

    // January 2026: current is Q4 of FY 25-26, previous is Q3 of the same year.
    let current = QuarterRef::containing(date(2026, 1, 10));
    assert_eq!(current.fiscal_year().start_year(), 2025);
    assert_eq!(current.number().as_u8(), 4);

    let counts = persistence
        .transition_quarters(&current, &current.previous())
        .unwrap();
    assert_eq!(counts.current_quarters_updated, 1);
    assert_eq!(counts.previous_quarters_updated, 1);

    assert_quarter_state(
        &mut persistence,
        financial_year_id,
        4,
        false,
        QuarterStatus::Active,
    );
    assert_quarter_state(
        &mut persistence,
        financial_year_id,
        3,
        true,
        QuarterStatus::Completed,
    );
}

#[test]
fn test_transition_updates_one_row_per_matching_financial_year() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let c1 = create_test_client(&mut persistence, "T4");
    let c2 = create_test_client(&mut persistence, "T5");
    provision_test_year(&mut persistence, c1, FiscalYear::new(2025), date(2025, 5, 15));
    provision_test_year(&mut persistence, c2, FiscalYear::new(2025), date(2025, 5, 15));

    let current = QuarterRef::containing(date(2025, 10, 5));
    let counts = persistence
        .transition_quarters(&current, &current.previous())
        .unwrap();

    assert_eq!(counts.current_quarters_updated, 2);
    assert_eq!(counts.previous_quarters_updated, 2);
}

#[test]
fn test_transition_without_matching_years_is_a_noop() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let client_id = create_test_client(&mut persistence, "T6");
    // Only FY 24-25 exists; a 25-26 transition has nothing to touch.
    provision_test_year(
        &mut persistence,
        client_id,
        FiscalYear::new(2024),
        date(2024, 6, 1),
    );

    let current = QuarterRef::containing(date(2025, 10, 5));
    let counts = persistence
        .transition_quarters(&current, &current.previous())
        .unwrap();

    assert_eq!(counts.current_quarters_updated, 0);
    // Q2 of FY 24-25 is untouched even though its number matches.
    assert_eq!(counts.previous_quarters_updated, 0);
}

#[test]
fn test_april_transition_completes_q4_of_the_prior_year() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let client_id = create_test_client(&mut persistence, "T7");
    // Provisioned mid-year 24-25; by February Q4 is the active quarter.
    let prior_fy_id = provision_test_year(
        &mut persistence,
        client_id,
        FiscalYear::new(2024),
        date(2025, 2, 10),
    );
    // The new year's rows exist too (provisioned on April 1).
    let new_fy_id = provision_test_year(
        &mut persistence,
        client_id,
        FiscalYear::new(2025),
        date(2025, 4, 1),
    );

    // April: current is Q1 of FY 25-26, previous wraps to Q4 of FY 24-25.
    let current = QuarterRef::containing(date(2025, 4, 1));
    let previous = current.previous();
    assert_eq!(previous.fiscal_year().label(), "24-25");

    let counts = persistence.transition_quarters(&current, &previous).unwrap();
    // Q1 was already active from provisioning; only the old Q4 changes.
    assert_eq!(counts.current_quarters_updated, 0);
    assert_eq!(counts.previous_quarters_updated, 1);

    assert_quarter_state(&mut persistence, new_fy_id, 1, false, QuarterStatus::Active);
    assert_quarter_state(
        &mut persistence,
        prior_fy_id,
        4,
        false,
        QuarterStatus::Completed,
    );
}

#[test]
fn test_transition_unlocks_a_locked_but_active_quarter() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let client_id = create_test_client(&mut persistence, "T8");
    let financial_year_id = provision_test_year(
        &mut persistence,
        client_id,
        FiscalYear::new(2025),
        date(2025, 5, 15),
    );

    // Q1 is already active and unlocked; a same-quarter transition in June
    // must not count it again.
    let current = QuarterRef::containing(date(2025, 6, 15));
    let counts = persistence
        .transition_quarters(&current, &current.previous())
        .unwrap();
    assert_eq!(counts.current_quarters_updated, 0);
    assert_quarter_state(
        &mut persistence,
        financial_year_id,
        1,
        false,
        QuarterStatus::Active,
    );
}
