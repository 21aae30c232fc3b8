// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Job engines for the Advance Tax maintenance service.
//!
//! Two recurring maintenance tasks keep the platform's fiscal calendar
//! current:
//!
//! - **Provisioning** — every client gets a financial year row (plus its
//!   four quarters) for the year containing today. The gap scan finds
//!   uncovered clients; each one is provisioned in its own transaction so a
//!   failure never blocks the rest of the roster.
//! - **Quarter transition** — as calendar time advances, the quarter
//!   containing today is unlocked and activated and the one before it is
//!   completed. Identities are recomputed from today's date on every run, so
//!   the job has no cursor state and re-runs converge to the same end state.
//!
//! Failures inside a job unit are converted to result records or typed
//! errors at that unit's boundary; nothing here panics or propagates raw
//! datastore errors past the job surface. The scheduler that invokes these
//! engines decides log severity and retry policy.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod provision;
mod transition;

#[cfg(test)]
mod tests;

pub use error::{JobFailure, ProvisioningError, TransitionError};
pub use provision::{
    ProvisionRunSummary, ProvisionedFinancialYear, RunStatus,
    clients_without_current_financial_year, provision_clients, provision_financial_year,
    provision_for_all_clients,
};
pub use transition::{QuarterTransitionReport, transition_quarters_to_current_state};
