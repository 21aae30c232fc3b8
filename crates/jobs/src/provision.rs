// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Financial year provisioning.
//!
//! Maps today's date onto the current fiscal year and creates the financial
//! year row plus its four quarter rows for every client that lacks one.
//! Each client is provisioned under its own transaction; the all-clients
//! run reports per-client failures in its summary instead of aborting.

use crate::error::{JobFailure, ProvisioningError};
use advtax_domain::FiscalYear;
use advtax_persistence::{
    NewFinancialYear, NewQuarter, Persistence, PersistenceError, format_date,
};
use serde::{Deserialize, Serialize};
use time::Date;
use tracing::{debug, error, info};

/// Status a financial year carries at creation. Never transitioned by this
/// service.
const FINANCIAL_YEAR_STATUS_ACTIVE: &str = "active";

/// Outcome status of an all-clients provisioning run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every targeted client was provisioned.
    Success,
    /// At least one client failed; the rest were still provisioned.
    Partial,
}

/// A freshly provisioned financial year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedFinancialYear {
    /// Generated financial year id.
    pub financial_year_id: i64,
    /// The owning client.
    pub client_id: i64,
    /// The fiscal-year label (e.g. `25-26`).
    pub label: String,
    /// Number of quarter rows created (always 4).
    pub quarters_created: usize,
}

/// Summary of one all-clients provisioning run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionRunSummary {
    /// Overall outcome.
    pub status: RunStatus,
    /// The fiscal-year label the run targeted.
    pub label: String,
    /// Clients the gap scan selected.
    pub clients_processed: usize,
    /// Financial years actually created.
    pub financial_years_created: usize,
    /// Quarter rows actually created.
    pub quarters_created: usize,
    /// Clients whose provisioning failed.
    pub failed_count: usize,
    /// The failing client ids, in processing order.
    pub failed_client_ids: Vec<i64>,
}

impl ProvisionRunSummary {
    fn empty(label: String) -> Self {
        Self {
            status: RunStatus::Success,
            label,
            clients_processed: 0,
            financial_years_created: 0,
            quarters_created: 0,
            failed_count: 0,
            failed_client_ids: Vec::new(),
        }
    }
}

/// Builds the insertable rows for one client's financial year as of `today`.
fn build_provisioning_rows(
    client_id: i64,
    fiscal_year: FiscalYear,
    today: Date,
) -> Result<(NewFinancialYear, Vec<NewQuarter>), JobFailure> {
    let financial_year = NewFinancialYear {
        client_id,
        label: fiscal_year.label(),
        start_date: format_date(fiscal_year.start_date()?)?,
        end_date: format_date(fiscal_year.end_date()?)?,
        return_due_date: format_date(fiscal_year.return_due_date()?)?,
        status: FINANCIAL_YEAR_STATUS_ACTIVE.to_string(),
    };

    let quarters = fiscal_year
        .quarter_spans()?
        .iter()
        .map(|span| {
            let disposition = span.disposition_on(today);
            Ok(NewQuarter {
                quarter_number: i32::from(span.number().as_u8()),
                start_date: format_date(span.start_date())?,
                end_date: format_date(span.end_date())?,
                is_locked: disposition.is_locked,
                status: disposition.status.as_str().to_string(),
            })
        })
        .collect::<Result<Vec<_>, JobFailure>>()?;

    Ok((financial_year, quarters))
}

/// Returns ids of clients with no financial year for the year containing
/// `today`.
///
/// # Errors
///
/// Returns an error if the gap scan query fails.
pub fn clients_without_current_financial_year(
    persistence: &mut Persistence,
    today: Date,
) -> Result<Vec<i64>, PersistenceError> {
    let label = FiscalYear::containing(today).label();
    let client_ids = persistence.clients_without_financial_year(&label)?;
    info!(
        label = %label,
        count = client_ids.len(),
        "Scanned for clients without a current financial year"
    );
    Ok(client_ids)
}

/// Provisions the current fiscal year for one client.
///
/// The financial year row and all four quarter rows are inserted in a
/// single transaction; quarter lock/status come from the policy evaluated
/// against `today`.
///
/// # Errors
///
/// Returns a `ProvisioningError` carrying the client id and the cause. The
/// transaction is rolled back; no partial rows remain.
pub fn provision_financial_year(
    persistence: &mut Persistence,
    client_id: i64,
    today: Date,
) -> Result<ProvisionedFinancialYear, ProvisioningError> {
    let fiscal_year = FiscalYear::containing(today);

    let (financial_year, quarters) = build_provisioning_rows(client_id, fiscal_year, today)
        .map_err(|cause| ProvisioningError { client_id, cause })?;

    let financial_year_id = persistence
        .create_financial_year_with_quarters(&financial_year, &quarters)
        .map_err(|e| ProvisioningError {
            client_id,
            cause: e.into(),
        })?;

    debug!(
        financial_year_id,
        client_id,
        label = %financial_year.label,
        "Provisioned financial year"
    );

    Ok(ProvisionedFinancialYear {
        financial_year_id,
        client_id,
        label: financial_year.label,
        quarters_created: quarters.len(),
    })
}

/// Provisions the current fiscal year for each listed client.
///
/// Clients are processed sequentially, each under its own transaction; a
/// failure is recorded in the summary and never aborts the remaining
/// clients.
#[must_use]
pub fn provision_clients(
    persistence: &mut Persistence,
    client_ids: &[i64],
    today: Date,
) -> ProvisionRunSummary {
    let label = FiscalYear::containing(today).label();
    let mut created: usize = 0;
    let mut quarters_created: usize = 0;
    let mut failed_client_ids: Vec<i64> = Vec::new();

    for &client_id in client_ids {
        match provision_financial_year(persistence, client_id, today) {
            Ok(provisioned) => {
                created += 1;
                quarters_created += provisioned.quarters_created;
            }
            Err(e) => {
                error!(client_id, error = %e, "Client provisioning failed");
                failed_client_ids.push(client_id);
            }
        }
    }

    let failed_count = failed_client_ids.len();
    ProvisionRunSummary {
        status: if failed_count == 0 {
            RunStatus::Success
        } else {
            RunStatus::Partial
        },
        label,
        clients_processed: client_ids.len(),
        financial_years_created: created,
        quarters_created,
        failed_count,
        failed_client_ids,
    }
}

/// Runs the provisioning job over the whole client roster.
///
/// Scans for clients lacking the current year, provisions each one
/// independently, and reports the aggregate. `status` is `partial` whenever
/// at least one client failed.
///
/// # Errors
///
/// Returns an error only if the gap scan itself fails; per-client failures
/// are reported in the summary instead.
pub fn provision_for_all_clients(
    persistence: &mut Persistence,
    today: Date,
) -> Result<ProvisionRunSummary, PersistenceError> {
    let client_ids = clients_without_current_financial_year(persistence, today)?;

    if client_ids.is_empty() {
        let label = FiscalYear::containing(today).label();
        info!(label = %label, "No clients need financial year provisioning");
        return Ok(ProvisionRunSummary::empty(label));
    }

    let summary = provision_clients(persistence, &client_ids, today);

    info!(
        label = %summary.label,
        clients_processed = summary.clients_processed,
        financial_years_created = summary.financial_years_created,
        quarters_created = summary.quarters_created,
        failed_count = summary.failed_count,
        "Provisioning run finished"
    );

    Ok(summary)
}
