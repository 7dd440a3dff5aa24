//! The scoring and aggregation engines.
//!
//! Everything here is pure, synchronous computation over in-memory
//! snapshots: safe to call repeatedly and concurrently, no shared state, no
//! I/O. Dirty input degrades locally (zero values, documented fallback
//! labels) — nothing in this module returns an error or panics on malformed
//! records.

pub mod catalog;
pub mod codec;
pub mod domain;
pub mod enrich;
pub mod kpi;
pub mod ledger;
pub mod period;

#[cfg(test)]
mod tests;

pub use catalog::{InvariantCatalog, RuleCatalog, RuleOutcome};
pub use domain::{
    Driver, Infraction, Invariant, KpiAnnotation, Objective, ObjectiveFrequency, Partner,
    PartnerId, RuleCatalogEntry, Severity, TripReport, Vehicle,
};
pub use enrich::{EnrichedInfraction, EnrichedTripReport, ReferenceTables};
pub use kpi::{KpiAnnotationView, KpiRow, WeeklyTripSummary};
pub use ledger::{
    dashboard_band, driver_ledger, scorecard_band, BalanceBand, DriverLedger, InfractionDetail,
    LICENSE_POINT_CAPITAL,
};
pub use period::{KpiPeriod, LedgerPeriod, ResolvedDate};
