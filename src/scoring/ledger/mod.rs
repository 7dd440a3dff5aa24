//! Per-driver infraction ledger and license-point balance.
//!
//! Each infraction of the selected period is resolved against the SCP
//! catalogue, the deducted points are summed, and the remaining balance is
//! derived from the fixed license-point capital. The balance is not clamped:
//! a driver can go negative and the screens show it.

mod banding;

pub use banding::{dashboard_band, scorecard_band, BalanceBand};

use super::catalog::{InvariantCatalog, RuleCatalog};
use super::domain::Infraction;
use super::period::{lenient_year_match, resolve, LedgerPeriod};
use chrono::NaiveDate;
use serde::Serialize;

/// License-point capital every driver starts a period with.
pub const LICENSE_POINT_CAPITAL: i32 = 12;

/// One resolved infraction row of the ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfractionDetail {
    pub infraction_id: String,
    pub date: String,
    pub invariant_title: String,
    pub severity: String,
    pub points_lost: i32,
    pub sanction_label: String,
}

/// Full ledger for one driver over one period.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverLedger {
    pub driver_id: String,
    pub details: Vec<InfractionDetail>,
    pub total_points_lost: i32,
    pub balance: i32,
    pub infraction_count: usize,
}

/// Computes the infraction ledger for one driver.
///
/// `infractions` is the partner-scoped collection; rows belonging to other
/// drivers are ignored. Period filtering uses the lenient policy: rows whose
/// date cannot be parsed still count when the raw string contains the year.
/// A driver with no matching infraction keeps the full capital.
pub fn driver_ledger(
    driver_id: &str,
    infractions: &[Infraction],
    rules: &RuleCatalog,
    invariants: &InvariantCatalog,
    period: LedgerPeriod,
) -> DriverLedger {
    let mut dated: Vec<(Option<NaiveDate>, InfractionDetail)> = infractions
        .iter()
        .filter(|infraction| infraction.driver_id.as_deref() == Some(driver_id))
        .filter(|infraction| lenient_year_match(&infraction.date, period))
        .map(|infraction| {
            let invariant_id = infraction.invariant_id.as_deref().unwrap_or("");
            let outcome = rules.lookup(invariant_id, &infraction.severity);

            let detail = InfractionDetail {
                infraction_id: infraction.id.clone(),
                date: infraction.date.clone(),
                invariant_title: invariants.title(invariant_id).to_string(),
                severity: infraction.severity.clone(),
                points_lost: outcome.point_value,
                sanction_label: outcome.sanction_label,
            };

            (resolve(&infraction.date).map(|r| r.date), detail)
        })
        .collect();

    // Most recent first; rows with unresolvable dates sink to the end.
    // Best-effort order only — same-day rows keep store order.
    dated.sort_by(|a, b| b.0.cmp(&a.0));

    let details: Vec<InfractionDetail> = dated.into_iter().map(|(_, detail)| detail).collect();
    let total_points_lost = details.iter().map(|detail| detail.points_lost).sum();

    DriverLedger {
        driver_id: driver_id.to_string(),
        infraction_count: details.len(),
        balance: LICENSE_POINT_CAPITAL - total_points_lost,
        total_points_lost,
        details,
    }
}
