//! Pure join/lookup pass attaching display labels to raw rows before they
//! reach a screen. Idempotent and side-effect-free.

use super::domain::{is_blank, Driver, Infraction, Invariant, Partner, PartnerId, TripReport};
use serde::Serialize;
use std::collections::HashMap;

/// Label rendered when a foreign key is empty or unresolvable.
pub const MISSING_LABEL: &str = "N/A";

/// Id-keyed reference maps for drivers, invariants, and partners.
#[derive(Debug, Default)]
pub struct ReferenceTables {
    drivers: HashMap<String, String>,
    invariants: HashMap<String, String>,
    partners: HashMap<String, String>,
}

impl ReferenceTables {
    pub fn new(drivers: &[Driver], invariants: &[Invariant], partners: &[Partner]) -> Self {
        Self {
            drivers: drivers
                .iter()
                .map(|driver| (driver.id.clone(), driver.full_name()))
                .collect(),
            invariants: invariants
                .iter()
                .map(|invariant| (invariant.id.clone(), invariant.title.clone()))
                .collect(),
            partners: partners
                .iter()
                .map(|partner| (partner.id.0.clone(), partner.name.clone()))
                .collect(),
        }
    }

    pub fn driver_full_name(&self, driver_id: &Option<String>) -> String {
        self.label(&self.drivers, driver_id)
    }

    pub fn invariant_title(&self, invariant_id: &Option<String>) -> String {
        self.label(&self.invariants, invariant_id)
    }

    pub fn partner_name(&self, partner_id: &PartnerId) -> String {
        self.partners
            .get(partner_id.as_str())
            .cloned()
            .unwrap_or_else(|| MISSING_LABEL.to_string())
    }

    fn label(&self, table: &HashMap<String, String>, id: &Option<String>) -> String {
        if is_blank(id) {
            return MISSING_LABEL.to_string();
        }
        id.as_deref()
            .and_then(|key| table.get(key.trim()))
            .cloned()
            .unwrap_or_else(|| MISSING_LABEL.to_string())
    }

    pub fn enrich_trip_report(&self, report: &TripReport) -> EnrichedTripReport {
        EnrichedTripReport {
            driver_full_name: self.driver_full_name(&report.driver_id),
            invariant_title: self.invariant_title(&report.invariant_id),
            partner_name: self.partner_name(&report.partner_id),
            report: report.clone(),
        }
    }

    pub fn enrich_infraction(&self, infraction: &Infraction) -> EnrichedInfraction {
        EnrichedInfraction {
            driver_full_name: self.driver_full_name(&infraction.driver_id),
            invariant_title: self.invariant_title(&infraction.invariant_id),
            partner_name: self.partner_name(&infraction.partner_id),
            infraction: infraction.clone(),
        }
    }
}

/// Raw trip-report row with its display labels attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedTripReport {
    #[serde(flatten)]
    pub report: TripReport,
    pub driver_full_name: String,
    pub invariant_title: String,
    pub partner_name: String,
}

/// Raw infraction row with its display labels attached.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedInfraction {
    #[serde(flatten)]
    pub infraction: Infraction,
    pub driver_full_name: String,
    pub invariant_title: String,
    pub partner_name: String,
}
