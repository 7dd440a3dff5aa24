use super::common::*;
use crate::scoring::catalog::{MISSING_RULE_LABEL, UNKNOWN_INVARIANT_TITLE};
use crate::scoring::ledger::{
    dashboard_band, driver_ledger, scorecard_band, BalanceBand, LICENSE_POINT_CAPITAL,
};
use crate::scoring::period::LedgerPeriod;

#[test]
fn deductions_sum_across_severities() {
    let infractions = vec![
        infraction("i-1", "2024-03-12", "d-bernard", "inv-vitesse", "Alarme"),
        infraction("i-2", "2024-03-20", "d-bernard", "inv-vitesse", "Alerte"),
    ];

    let ledger = driver_ledger(
        "d-bernard",
        &infractions,
        &rule_catalog(),
        &invariant_catalog(),
        LedgerPeriod::Year(2024),
    );

    assert_eq!(ledger.total_points_lost, 7);
    assert_eq!(ledger.balance, 5);
    assert_eq!(ledger.infraction_count, 2);
}

#[test]
fn a_clean_driver_keeps_the_full_capital() {
    let ledger = driver_ledger(
        "d-klein",
        &[],
        &rule_catalog(),
        &invariant_catalog(),
        LedgerPeriod::All,
    );

    assert_eq!(ledger.balance, LICENSE_POINT_CAPITAL);
    assert_eq!(ledger.total_points_lost, 0);
    assert!(ledger.details.is_empty());
}

#[test]
fn details_sort_most_recent_first_with_unreadable_dates_last() {
    let infractions = vec![
        infraction("i-old", "2024-01-05", "d-bernard", "inv-vitesse", "Alerte"),
        infraction("i-fuzzy", "courant 2024", "d-bernard", "inv-freinage", "Alerte"),
        infraction("i-new", "20/03/2024", "d-bernard", "inv-vitesse", "Alarme"),
    ];

    let ledger = driver_ledger(
        "d-bernard",
        &infractions,
        &rule_catalog(),
        &invariant_catalog(),
        LedgerPeriod::Year(2024),
    );

    let ids: Vec<&str> = ledger
        .details
        .iter()
        .map(|detail| detail.infraction_id.as_str())
        .collect();
    assert_eq!(ids, ["i-new", "i-old", "i-fuzzy"]);
}

#[test]
fn unreadable_dates_count_only_when_they_name_the_year() {
    let infractions = vec![
        infraction("i-kept", "saisie 2024", "d-bernard", "inv-vitesse", "Alerte"),
        infraction("i-dropped", "saisie 2023", "d-bernard", "inv-vitesse", "Alerte"),
    ];

    let ledger = driver_ledger(
        "d-bernard",
        &infractions,
        &rule_catalog(),
        &invariant_catalog(),
        LedgerPeriod::Year(2024),
    );

    assert_eq!(ledger.infraction_count, 1);
    assert_eq!(ledger.details[0].infraction_id, "i-kept");
}

#[test]
fn rows_from_other_drivers_and_years_are_ignored() {
    let infractions = vec![
        infraction("i-mine", "2024-03-12", "d-bernard", "inv-vitesse", "Alerte"),
        infraction("i-hers", "2024-03-12", "d-klein", "inv-vitesse", "Alarme"),
        infraction("i-last-year", "2023-11-02", "d-bernard", "inv-vitesse", "Alarme"),
    ];

    let ledger = driver_ledger(
        "d-bernard",
        &infractions,
        &rule_catalog(),
        &invariant_catalog(),
        LedgerPeriod::Year(2024),
    );

    assert_eq!(ledger.infraction_count, 1);
    assert_eq!(ledger.total_points_lost, 2);
}

#[test]
fn unknown_references_degrade_to_labels_not_errors() {
    let infractions = vec![infraction(
        "i-orphan",
        "2024-06-01",
        "d-bernard",
        "inv-fantome",
        "Alarme",
    )];

    let ledger = driver_ledger(
        "d-bernard",
        &infractions,
        &rule_catalog(),
        &invariant_catalog(),
        LedgerPeriod::All,
    );

    let detail = &ledger.details[0];
    assert_eq!(detail.invariant_title, UNKNOWN_INVARIANT_TITLE);
    assert_eq!(detail.sanction_label, MISSING_RULE_LABEL);
    assert_eq!(detail.points_lost, 0);
    assert_eq!(ledger.balance, LICENSE_POINT_CAPITAL);
}

#[test]
fn the_balance_is_not_clamped_at_zero() {
    let infractions: Vec<_> = (0..3)
        .map(|n| {
            infraction(
                &format!("i-{n}"),
                "2024-03-12",
                "d-bernard",
                "inv-vitesse",
                "Alarme",
            )
        })
        .collect();

    let ledger = driver_ledger(
        "d-bernard",
        &infractions,
        &rule_catalog(),
        &invariant_catalog(),
        LedgerPeriod::Year(2024),
    );

    assert_eq!(ledger.total_points_lost, 15);
    assert_eq!(ledger.balance, -3);
}

#[test]
fn dashboard_banding_splits_above_eight_and_above_four() {
    assert_eq!(dashboard_band(12), BalanceBand::Good);
    assert_eq!(dashboard_band(9), BalanceBand::Good);
    assert_eq!(dashboard_band(8), BalanceBand::Warning);
    assert_eq!(dashboard_band(5), BalanceBand::Warning);
    assert_eq!(dashboard_band(4), BalanceBand::Critical);
    assert_eq!(dashboard_band(-3), BalanceBand::Critical);
}

#[test]
fn scorecard_banding_is_stricter_than_the_dashboard() {
    assert_eq!(scorecard_band(12), BalanceBand::Good);
    assert_eq!(scorecard_band(11), BalanceBand::Good);
    assert_eq!(scorecard_band(10), BalanceBand::Warning);
    assert_eq!(scorecard_band(6), BalanceBand::Warning);
    assert_eq!(scorecard_band(5), BalanceBand::Critical);

    // The same balance lands in different bands on the two screens.
    assert_eq!(dashboard_band(10), BalanceBand::Good);
    assert_eq!(scorecard_band(10), BalanceBand::Warning);
}
