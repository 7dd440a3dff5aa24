//! Built-in demo dataset and console rendering for the CLI.
//!
//! The snapshot below stands in for the external document store when no
//! snapshot file is supplied: one active partner, two drivers, the three
//! fleet-wide invariants plus two event invariants, an SCP catalogue, a
//! month of trip reports, and the infractions recorded against them.

use clap::Args;
use fleet_scp::error::AppError;
use fleet_scp::scoring::{
    dashboard_band, scorecard_band, DriverLedger, Infraction, Invariant, KpiAnnotation, KpiPeriod,
    KpiRow, LedgerPeriod, Objective, Partner, PartnerId, RuleCatalogEntry, TripReport, Vehicle,
    WeeklyTripSummary,
};
use fleet_scp::scoring::{Driver, Severity};
use fleet_scp::store::FleetSnapshot;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation year (defaults to the demo dataset's year)
    #[arg(long)]
    pub(crate) year: Option<i32>,
    /// Evaluation month 1-12 (defaults to the demo dataset's month)
    #[arg(long)]
    pub(crate) month: Option<u32>,
}

const DEMO_YEAR: i32 = 2024;
const DEMO_MONTH: u32 = 3;

fn partner_id() -> PartnerId {
    PartnerId("p-morel".to_string())
}

pub(crate) fn demo_snapshot() -> FleetSnapshot {
    let partner = partner_id();

    let partners = vec![
        Partner {
            id: partner.clone(),
            name: "Transports Morel".to_string(),
            active: true,
        },
        Partner {
            id: PartnerId("p-ducret".to_string()),
            name: "Logistique Ducret".to_string(),
            active: false,
        },
    ];

    let drivers = vec![
        Driver {
            id: "d-bernard".to_string(),
            first_name: "Luc".to_string(),
            last_name: "Bernard".to_string(),
            license_number: "76-123456".to_string(),
            license_category: "CE".to_string(),
            obc_key_id: Some("obc-114".to_string()),
            work_site: "Rouen".to_string(),
        },
        Driver {
            id: "d-klein".to_string(),
            first_name: "Anne".to_string(),
            last_name: "Klein".to_string(),
            license_number: "67-654321".to_string(),
            license_category: "C".to_string(),
            obc_key_id: None,
            work_site: "Strasbourg".to_string(),
        },
    ];

    let vehicles = vec![
        Vehicle {
            id: "v-201".to_string(),
            name: "Tracteur 201".to_string(),
            plate: "FG-201-XA".to_string(),
            driver_id: Some("d-bernard".to_string()),
        },
        Vehicle {
            id: "v-202".to_string(),
            name: "Porteur 202".to_string(),
            plate: "FG-202-XB".to_string(),
            driver_id: Some("d-klein".to_string()),
        },
    ];

    let invariants = vec![
        Invariant {
            id: "inv-kms".to_string(),
            title: "Kms parcourus".to_string(),
            description: "Distance totale parcourue par la flotte".to_string(),
        },
        Invariant {
            id: "inv-conduite".to_string(),
            title: "Temps de conduite".to_string(),
            description: "Temps de conduite cumulé".to_string(),
        },
        Invariant {
            id: "inv-repos".to_string(),
            title: "Temps de repos".to_string(),
            description: "Temps d'attente et de repos cumulé".to_string(),
        },
        Invariant {
            id: "inv-vitesse".to_string(),
            title: "Excès de vitesse".to_string(),
            description: "Dépassements de la vitesse autorisée".to_string(),
        },
        Invariant {
            id: "inv-freinage".to_string(),
            title: "Freinage brusque".to_string(),
            description: "Freinages d'urgence détectés par l'OBC".to_string(),
        },
    ];

    let rules = vec![
        RuleCatalogEntry {
            id: "scp-1".to_string(),
            invariant_id: "inv-vitesse".to_string(),
            severity: Severity::Alerte.label().to_string(),
            sanction_label: "Avertissement oral".to_string(),
            point_value: 2,
        },
        RuleCatalogEntry {
            id: "scp-2".to_string(),
            invariant_id: "inv-vitesse".to_string(),
            severity: Severity::Alarme.label().to_string(),
            sanction_label: "Mise à pied 1 jour".to_string(),
            point_value: 5,
        },
        RuleCatalogEntry {
            id: "scp-3".to_string(),
            invariant_id: "inv-freinage".to_string(),
            severity: Severity::Alerte.label().to_string(),
            sanction_label: "Avertissement écrit".to_string(),
            point_value: 1,
        },
        RuleCatalogEntry {
            id: "scp-4".to_string(),
            invariant_id: "inv-freinage".to_string(),
            severity: Severity::Alarme.label().to_string(),
            sanction_label: "Entretien de recadrage".to_string(),
            point_value: 3,
        },
    ];

    let trip_reports = vec![
        trip(
            "r-301",
            "2024-03-04",
            Some("d-bernard"),
            None,
            "08:15:00",
            "02:06:00",
            "412,5",
        ),
        trip(
            "r-302",
            "05/03/2024",
            Some("d-klein"),
            None,
            "07:40:00",
            "01:30:00",
            "388,0",
        ),
        trip(
            "r-303",
            "2024-03-12",
            Some("d-bernard"),
            Some("inv-vitesse"),
            "06:05:00",
            "00:48:00",
            "301,2",
        ),
        trip(
            "r-304",
            "12/03/2024",
            Some("d-klein"),
            Some("inv-vitesse"),
            "05:30:00",
            "01:00:00",
            "275,4",
        ),
        trip(
            "r-305",
            "2024-03-19",
            Some("d-bernard"),
            Some("inv-vitesse"),
            "07:55:00",
            "02:24:00",
            "405,9",
        ),
        trip(
            "r-306",
            "20/03/2024",
            Some("d-klein"),
            Some("inv-vitesse"),
            "06:45:00",
            "01:12:00",
            "330,0",
        ),
        trip(
            "r-307",
            "2024-03-21",
            Some("d-bernard"),
            Some("inv-freinage"),
            "04:20:00",
            "00:30:00",
            "198,6",
        ),
        // Awaiting assignment by the back office.
        trip("r-308", "2024-03-26", None, None, "03:10:00", "00:42:00", "142,3"),
    ];

    let infractions = vec![
        infraction(
            "i-401",
            "2024-03-12",
            "d-bernard",
            "inv-vitesse",
            Severity::Alarme,
            Some("r-303"),
        ),
        infraction(
            "i-402",
            "20/03/2024",
            "d-klein",
            "inv-vitesse",
            Severity::Alerte,
            Some("r-306"),
        ),
        infraction(
            "i-403",
            "2024-03-21",
            "d-bernard",
            "inv-freinage",
            Severity::Alerte,
            Some("r-307"),
        ),
    ];

    let objectives = vec![
        Objective {
            id: "obj-kms".to_string(),
            partner_id: partner.clone(),
            invariant_id: "inv-kms".to_string(),
            chapter: "Exploitation".to_string(),
            target: 2300.0,
            unit: "km".to_string(),
            mode: "cumul".to_string(),
            frequency: "Mensuel".to_string(),
        },
        Objective {
            id: "obj-conduite".to_string(),
            partner_id: partner.clone(),
            invariant_id: "inv-conduite".to_string(),
            chapter: "Exploitation".to_string(),
            target: 50.0,
            unit: "h".to_string(),
            mode: "cumul".to_string(),
            frequency: "Mensuel".to_string(),
        },
        Objective {
            id: "obj-vitesse".to_string(),
            partner_id: partner.clone(),
            invariant_id: "inv-vitesse".to_string(),
            chapter: "Sécurité".to_string(),
            target: 3.0,
            unit: String::new(),
            mode: "plafond".to_string(),
            frequency: "Mensuel".to_string(),
        },
    ];

    let annotations = vec![KpiAnnotation {
        id: "ann-1".to_string(),
        partner_id: partner,
        objective_id: "obj-vitesse".to_string(),
        result: Some("Seuil dépassé deux mois de suite".to_string()),
        root_cause: Some("Tournées express sur la rocade".to_string()),
        action_taken: Some("Rappel des consignes en réunion d'équipe".to_string()),
        comment: None,
    }];

    FleetSnapshot {
        partners,
        drivers,
        vehicles,
        invariants,
        rules,
        trip_reports,
        infractions,
        objectives,
        annotations,
    }
}

fn trip(
    id: &str,
    date: &str,
    driver: Option<&str>,
    invariant: Option<&str>,
    driving: &str,
    wait: &str,
    distance: &str,
) -> TripReport {
    TripReport {
        id: id.to_string(),
        date: date.to_string(),
        partner_id: partner_id(),
        driver_id: driver.map(str::to_string),
        invariant_id: invariant.map(str::to_string),
        start_time: "06:00:00".to_string(),
        end_time: "16:30:00".to_string(),
        driving_duration: driving.to_string(),
        wait_duration: wait.to_string(),
        total_duration: String::new(),
        idle_duration: "00:25:00".to_string(),
        distance_km: distance.to_string(),
        avg_speed: "62,4".to_string(),
        max_speed: "88,0".to_string(),
    }
}

fn infraction(
    id: &str,
    date: &str,
    driver: &str,
    invariant: &str,
    severity: Severity,
    source_report: Option<&str>,
) -> Infraction {
    Infraction {
        id: id.to_string(),
        partner_id: partner_id(),
        date: date.to_string(),
        driver_id: Some(driver.to_string()),
        invariant_id: Some(invariant.to_string()),
        severity: severity.label().to_string(),
        count: 1,
        disciplinary_measure: None,
        other_measures: None,
        follow_up_required: severity == Severity::Alarme,
        follow_up_date: None,
        improvement_observed: false,
        source_report_id: source_report.map(str::to_string),
    }
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let year = args.year.unwrap_or(DEMO_YEAR);
    let month = args.month.unwrap_or(DEMO_MONTH);

    let snapshot = demo_snapshot();
    let partner_name = snapshot
        .active_partner()
        .map(|partner| partner.name.clone())
        .unwrap_or_else(|| "N/A".to_string());

    println!("Fleet compliance demo — {partner_name}");

    println!("\nPoint ledgers ({year})");
    for driver in &snapshot.drivers {
        let ledger = snapshot.driver_ledger(&driver.id, LedgerPeriod::Year(year));
        render_ledger(&driver.full_name(), &ledger);
    }

    let period = KpiPeriod::Monthly { year, month };
    println!("\nKPI report ({month:02}/{year})");
    render_kpi_rows(&snapshot.kpi_report(period));

    println!("\nWeekly activity");
    render_weekly(&snapshot.weekly_summaries(period));

    let unassigned = snapshot.unassigned_reports();
    if unassigned.is_empty() {
        println!("\nUnassigned reports: none");
    } else {
        println!("\nUnassigned reports");
        for row in &unassigned {
            println!(
                "- {} | {} | driver {} | invariant {}",
                row.report.id, row.report.date, row.driver_full_name, row.invariant_title
            );
        }
    }

    Ok(())
}

pub(crate) fn render_ledger(driver_label: &str, ledger: &DriverLedger) {
    println!(
        "- {}: {} infraction(s), {} point(s) lost, balance {}/12 [{} / {}]",
        driver_label,
        ledger.infraction_count,
        ledger.total_points_lost,
        ledger.balance,
        dashboard_band(ledger.balance).label(),
        scorecard_band(ledger.balance).label()
    );
    for detail in &ledger.details {
        println!(
            "    {} | {} | {} | -{} pt | {}",
            detail.date,
            detail.invariant_title,
            detail.severity,
            detail.points_lost,
            detail.sanction_label
        );
    }
}

pub(crate) fn render_kpi_rows(rows: &[KpiRow]) {
    if rows.is_empty() {
        println!("- no active partner, nothing to evaluate");
        return;
    }
    for row in rows {
        let marker = if row.is_exceeded { " (!)" } else { "" };
        println!(
            "- {}: {} / objectif {}{}",
            row.invariant_title, row.display_value, row.objective_label, marker
        );
        if let Some(annotation) = &row.annotation {
            if let Some(cause) = &annotation.root_cause {
                println!("    cause: {cause}");
            }
            if let Some(action) = &annotation.action_taken {
                println!("    action: {action}");
            }
        }
    }
}

pub(crate) fn render_weekly(weeks: &[WeeklyTripSummary]) {
    if weeks.is_empty() {
        println!("- no reports in the period");
        return;
    }
    for week in weeks {
        println!(
            "- {}: {} rapport(s), {:.0} km, {} de conduite",
            week.label,
            week.report_count,
            week.distance_km,
            fleet_scp::scoring::codec::format_duration(week.driving_seconds)
        );
    }
}
