// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the job layer.

use advtax_domain::{DomainError, QuarterRef};
use advtax_persistence::PersistenceError;
use thiserror::Error;

/// Underlying cause of a job unit failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobFailure {
    /// Calendar arithmetic failed.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The datastore rejected a read or write; the enclosing transaction
    /// was rolled back.
    #[error(transparent)]
    Datastore(#[from] PersistenceError),
}

/// Provisioning failed for one client.
///
/// Collected per client during an all-clients run; a failure here never
/// aborts sibling clients' provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("provisioning failed for client {client_id}: {cause}")]
pub struct ProvisioningError {
    /// The client whose provisioning failed.
    pub client_id: i64,
    /// The underlying cause.
    #[source]
    pub cause: JobFailure,
}

/// The quarter transition transaction failed and was rolled back.
///
/// Carries the quarter identities that were being targeted, for
/// diagnosability; no rows were changed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("quarter transition failed (current {current}, previous {previous}): {cause}")]
pub struct TransitionError {
    /// The quarter that was being activated.
    pub current: QuarterRef,
    /// The quarter that was being completed.
    pub previous: QuarterRef,
    /// The underlying cause.
    #[source]
    pub cause: JobFailure,
}
