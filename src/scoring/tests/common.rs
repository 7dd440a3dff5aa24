use crate::scoring::catalog::{InvariantCatalog, RuleCatalog};
use crate::scoring::domain::{
    Infraction, Invariant, KpiAnnotation, Objective, PartnerId, RuleCatalogEntry, TripReport,
};

pub(super) fn partner() -> PartnerId {
    PartnerId("p-morel".to_string())
}

pub(super) fn invariants() -> Vec<Invariant> {
    [
        ("inv-kms", "Kms parcourus"),
        ("inv-conduite", "Temps de conduite"),
        ("inv-repos", "Temps de repos"),
        ("inv-vitesse", "Excès de vitesse"),
        ("inv-freinage", "Freinage brusque"),
    ]
    .into_iter()
    .map(|(id, title)| Invariant {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
    })
    .collect()
}

pub(super) fn rule(
    id: &str,
    invariant_id: &str,
    severity: &str,
    sanction: &str,
    points: i32,
) -> RuleCatalogEntry {
    RuleCatalogEntry {
        id: id.to_string(),
        invariant_id: invariant_id.to_string(),
        severity: severity.to_string(),
        sanction_label: sanction.to_string(),
        point_value: points,
    }
}

pub(super) fn rules() -> Vec<RuleCatalogEntry> {
    vec![
        rule("scp-1", "inv-vitesse", "Alerte", "Avertissement oral", 2),
        rule("scp-2", "inv-vitesse", "Alarme", "Mise à pied 1 jour", 5),
        rule("scp-3", "inv-freinage", "Alerte", "Avertissement écrit", 1),
    ]
}

pub(super) fn rule_catalog() -> RuleCatalog {
    RuleCatalog::from_entries(&rules())
}

pub(super) fn invariant_catalog() -> InvariantCatalog {
    InvariantCatalog::from_invariants(&invariants())
}

pub(super) fn infraction(
    id: &str,
    date: &str,
    driver: &str,
    invariant: &str,
    severity: &str,
) -> Infraction {
    Infraction {
        id: id.to_string(),
        partner_id: partner(),
        date: date.to_string(),
        driver_id: Some(driver.to_string()),
        invariant_id: Some(invariant.to_string()),
        severity: severity.to_string(),
        count: 1,
        ..Infraction::default()
    }
}

pub(super) fn report(
    id: &str,
    date: &str,
    invariant: Option<&str>,
    driving: &str,
    wait: &str,
    distance: &str,
) -> TripReport {
    TripReport {
        id: id.to_string(),
        date: date.to_string(),
        partner_id: partner(),
        driver_id: Some("d-bernard".to_string()),
        invariant_id: invariant.map(str::to_string),
        driving_duration: driving.to_string(),
        wait_duration: wait.to_string(),
        distance_km: distance.to_string(),
        ..TripReport::default()
    }
}

pub(super) fn objective(
    id: &str,
    invariant_id: &str,
    target: f64,
    frequency: &str,
    unit: &str,
) -> Objective {
    Objective {
        id: id.to_string(),
        partner_id: partner(),
        invariant_id: invariant_id.to_string(),
        chapter: "Exploitation".to_string(),
        target,
        unit: unit.to_string(),
        mode: "cumul".to_string(),
        frequency: frequency.to_string(),
    }
}

pub(super) fn annotation(id: &str, objective_id: &str) -> KpiAnnotation {
    KpiAnnotation {
        id: id.to_string(),
        partner_id: partner(),
        objective_id: objective_id.to_string(),
        root_cause: Some("Tournées express".to_string()),
        ..KpiAnnotation::default()
    }
}
