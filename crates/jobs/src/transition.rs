// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The quarter transition engine.
//!
//! Computes the quarter containing today and the one before it, then asks
//! the datastore to converge every matching row onto the target state in a
//! single transaction: current quarter unlocked and active, previous
//! quarter completed.
//!
//! Recomputing the identities from today's date on every invocation, rather
//! than tracking a "last transitioned" cursor, makes the job naturally
//! idempotent: replays and retries land on the same end state, and running
//! more often than once per quarter boundary is cheap no-op work. The wrap
//! from Q1 back to Q4 of the prior fiscal year is handled by the calendar
//! mapper, as is the December→January step inside Q3/Q4 of a single year.

use crate::error::TransitionError;
use advtax_domain::QuarterRef;
use advtax_persistence::{Persistence, QuarterTransitionCounts};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::info;

/// Outcome of one successful quarter transition run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterTransitionReport {
    /// The quarter that was activated (contains today).
    pub current: QuarterRef,
    /// The quarter that was completed.
    pub previous: QuarterRef,
    /// Rows actually changed in each step; both zero when the database
    /// already matched the calendar.
    pub counts: QuarterTransitionCounts,
}

/// Advances quarter state to match the calendar as of `today`.
///
/// # Errors
///
/// Returns a `TransitionError` carrying both attempted quarter identities
/// if the transaction fails; the datastore rolls back and no rows change.
pub fn transition_quarters_to_current_state(
    persistence: &mut Persistence,
    today: Date,
) -> Result<QuarterTransitionReport, TransitionError> {
    let current = QuarterRef::containing(today);
    let previous = current.previous();

    info!(%current, %previous, %today, "Starting quarter transition");

    let counts: QuarterTransitionCounts = persistence
        .transition_quarters(&current, &previous)
        .map_err(|e| TransitionError {
            current,
            previous,
            cause: e.into(),
        })?;

    info!(
        %current,
        %previous,
        current_quarters_updated = counts.current_quarters_updated,
        previous_quarters_updated = counts.previous_quarters_updated,
        "Quarter transition committed"
    );

    Ok(QuarterTransitionReport {
        current,
        previous,
        counts,
    })
}
