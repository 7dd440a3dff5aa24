//! Contract with the external document store: the flat collections the
//! engines consume, plus the partner-scoped facade the shell calls.
//!
//! The store itself (persistence, activation writes, imports) lives outside
//! this service; a [`FleetSnapshot`] is just its read-side payload.

use crate::scoring::catalog::{InvariantCatalog, RuleCatalog};
use crate::scoring::domain::{
    is_blank, Driver, Infraction, Invariant, KpiAnnotation, Objective, Partner, RuleCatalogEntry,
    TripReport, Vehicle,
};
use crate::scoring::enrich::{EnrichedTripReport, ReferenceTables};
use crate::scoring::kpi::{self, KpiRow, WeeklyTripSummary};
use crate::scoring::ledger::{self, DriverLedger};
use crate::scoring::period::{KpiPeriod, LedgerPeriod};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Snapshot of every collection the scoring engines read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FleetSnapshot {
    pub partners: Vec<Partner>,
    pub drivers: Vec<Driver>,
    pub vehicles: Vec<Vehicle>,
    pub invariants: Vec<Invariant>,
    pub rules: Vec<RuleCatalogEntry>,
    pub trip_reports: Vec<TripReport>,
    pub infractions: Vec<Infraction>,
    pub objectives: Vec<Objective>,
    pub annotations: Vec<KpiAnnotation>,
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("snapshot file {path} is not valid JSON: {source}")]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl FleetSnapshot {
    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let raw = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| SnapshotError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// The partner the back office currently works against. The store keeps
    /// at most one row flagged active.
    pub fn active_partner(&self) -> Option<&Partner> {
        self.partners.iter().find(|partner| partner.active)
    }

    /// Point ledger for one driver over the selected period, scoped to the
    /// active partner's infractions. Without an active partner there is
    /// nothing to deduct and the driver keeps the full capital.
    pub fn driver_ledger(&self, driver_id: &str, period: LedgerPeriod) -> DriverLedger {
        let rules = RuleCatalog::from_entries(&self.rules);
        let invariants = InvariantCatalog::from_invariants(&self.invariants);

        let scoped: Vec<Infraction> = match self.active_partner() {
            Some(partner) => self
                .infractions
                .iter()
                .filter(|infraction| infraction.partner_id == partner.id)
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        ledger::driver_ledger(driver_id, &scoped, &rules, &invariants, period)
    }

    /// KPI rows for the active partner, empty when no partner is active.
    pub fn kpi_report(&self, period: KpiPeriod) -> Vec<KpiRow> {
        match self.active_partner() {
            Some(partner) => kpi::evaluate(
                &partner.id,
                &self.invariants,
                &self.objectives,
                &self.trip_reports,
                &self.annotations,
                period,
            ),
            None => Vec::new(),
        }
    }

    /// Weekly trip sub-totals for the active partner.
    pub fn weekly_summaries(&self, period: KpiPeriod) -> Vec<WeeklyTripSummary> {
        match self.active_partner() {
            Some(partner) => kpi::weekly_trip_summaries(&partner.id, &self.trip_reports, period),
            None => Vec::new(),
        }
    }

    pub fn reference_tables(&self) -> ReferenceTables {
        ReferenceTables::new(&self.drivers, &self.invariants, &self.partners)
    }

    /// Trip reports still missing a driver or invariant assignment,
    /// enriched for display. These rows are excluded from per-invariant
    /// aggregates until the back office assigns them.
    pub fn unassigned_reports(&self) -> Vec<EnrichedTripReport> {
        let tables = self.reference_tables();
        self.trip_reports
            .iter()
            .filter(|report| is_blank(&report.driver_id) || is_blank(&report.invariant_id))
            .map(|report| tables.enrich_trip_report(report))
            .collect()
    }
}
