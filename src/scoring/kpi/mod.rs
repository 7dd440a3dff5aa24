//! Objective evaluation: one KPI row per invariant for a monthly or yearly
//! period, comparing aggregated trip-report actuals against the partner's
//! frequency-scaled targets.

mod views;

pub use views::{KpiAnnotationView, KpiRow, WeeklyTripSummary};

use super::codec::{parse_decimal, parse_duration};
use super::domain::{
    Invariant, KpiAnnotation, Objective, ObjectiveFrequency, PartnerId, TripReport,
};
use super::enrich::MISSING_LABEL;
use super::period::{resolve, strict_date_filter, KpiPeriod};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};

/// The three fleet-wide invariants, in their fixed display order. Their
/// aggregates cover every report of the period regardless of the report's
/// own invariant tag; every other invariant only counts reports tagged to
/// it. The comparator in [`evaluate`] consults this list, so these rows
/// always sort first.
pub const GLOBAL_INVARIANT_TITLES: [&str; 3] =
    ["Kms parcourus", "Temps de conduite", "Temps de repos"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MetricKind {
    DistanceKm,
    DrivingHours,
    RestHours,
    EventCount,
}

impl MetricKind {
    fn for_title(title: &str) -> Self {
        match title {
            "Kms parcourus" => Self::DistanceKm,
            "Temps de conduite" => Self::DrivingHours,
            "Temps de repos" => Self::RestHours,
            _ => Self::EventCount,
        }
    }

    const fn is_fleet_wide(self) -> bool {
        !matches!(self, Self::EventCount)
    }
}

/// Builds the KPI rows for one partner and period.
///
/// Reports are filtered with the strict date policy (unparsable dates are
/// dropped) and bucketed by invariant id in one pass, so the per-invariant
/// scan does not rescan the whole period.
pub fn evaluate(
    partner_id: &PartnerId,
    invariants: &[Invariant],
    objectives: &[Objective],
    reports: &[TripReport],
    annotations: &[KpiAnnotation],
    period: KpiPeriod,
) -> Vec<KpiRow> {
    let period_reports: Vec<&TripReport> = reports
        .iter()
        .filter(|report| report.partner_id == *partner_id)
        .filter(|report| strict_date_filter(&report.date, period))
        .collect();

    let mut by_invariant: HashMap<&str, Vec<&TripReport>> = HashMap::new();
    for report in &period_reports {
        if let Some(invariant_id) = report.invariant_id.as_deref() {
            if !invariant_id.trim().is_empty() {
                by_invariant.entry(invariant_id).or_default().push(*report);
            }
        }
    }

    let mut rows: Vec<KpiRow> = invariants
        .iter()
        .map(|invariant| {
            let kind = MetricKind::for_title(&invariant.title);
            let relevant: &[&TripReport] = if kind.is_fleet_wide() {
                &period_reports
            } else {
                by_invariant
                    .get(invariant.id.as_str())
                    .map(Vec::as_slice)
                    .unwrap_or(&[])
            };

            let value = aggregate(kind, relevant);
            let objective = objectives.iter().find(|objective| {
                objective.partner_id == *partner_id && objective.invariant_id == invariant.id
            });

            let (objective_label, is_exceeded) = match objective {
                Some(objective) => {
                    let scaled = scale_target(&objective.frequency, period, objective.target);
                    (
                        objective_label(scaled, &objective.unit),
                        value > scaled,
                    )
                }
                // An invariant with no target can never be exceeded.
                None => (MISSING_LABEL.to_string(), false),
            };

            let annotation = objective.and_then(|objective| {
                annotations
                    .iter()
                    .find(|annotation| annotation.objective_id == objective.id)
                    .map(KpiAnnotationView::from_record)
            });

            KpiRow {
                invariant_id: invariant.id.clone(),
                invariant_title: invariant.title.clone(),
                value,
                display_value: display_value(kind, value),
                objective_label,
                is_exceeded,
                objective_id: objective.map(|objective| objective.id.clone()),
                annotation,
            }
        })
        .collect();

    rows.sort_by_key(|row| sort_key(&row.invariant_title));
    rows
}

fn aggregate(kind: MetricKind, reports: &[&TripReport]) -> f64 {
    match kind {
        MetricKind::DistanceKm => reports
            .iter()
            .map(|report| parse_decimal(&report.distance_km))
            .sum(),
        MetricKind::DrivingHours => seconds_to_hours(
            reports
                .iter()
                .map(|report| parse_duration(&report.driving_duration))
                .sum(),
        ),
        MetricKind::RestHours => seconds_to_hours(
            reports
                .iter()
                .map(|report| parse_duration(&report.wait_duration))
                .sum(),
        ),
        MetricKind::EventCount => reports.len() as f64,
    }
}

fn seconds_to_hours(seconds: i64) -> f64 {
    seconds as f64 / 3600.0
}

/// Scales a target to the evaluation period. Monthly targets multiply by 12
/// for a yearly reading; annual targets pass through. Daily and weekly
/// frequencies have no monthly/yearly multiplier upstream and fall through
/// unscaled.
fn scale_target(frequency_raw: &str, period: KpiPeriod, target: f64) -> f64 {
    match (ObjectiveFrequency::parse(frequency_raw), period) {
        (Some(ObjectiveFrequency::Mensuel), KpiPeriod::Yearly { .. }) => target * 12.0,
        _ => target,
    }
}

fn objective_label(scaled_target: f64, unit: &str) -> String {
    let number = format_number(scaled_target);
    let unit = unit.trim();
    if unit.is_empty() {
        number
    } else {
        format!("{number} {unit}")
    }
}

fn format_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{value}")
    }
}

fn display_value(kind: MetricKind, value: f64) -> String {
    match kind {
        // Measured metrics render with zero decimals, standard rounding.
        MetricKind::DistanceKm | MetricKind::DrivingHours | MetricKind::RestHours => {
            format!("{}", value.round() as i64)
        }
        MetricKind::EventCount => format!("{}", value as i64),
    }
}

fn sort_key(title: &str) -> (usize, usize, String) {
    match GLOBAL_INVARIANT_TITLES
        .iter()
        .position(|global| *global == title)
    {
        Some(index) => (0, index, String::new()),
        None => (1, 0, title.to_lowercase()),
    }
}

/// Weekly sub-totals of the period's trip activity, partitioned on the
/// Monday-start week boundary.
pub fn weekly_trip_summaries(
    partner_id: &PartnerId,
    reports: &[TripReport],
    period: KpiPeriod,
) -> Vec<WeeklyTripSummary> {
    let mut weeks: BTreeMap<NaiveDate, WeeklyTripSummary> = BTreeMap::new();

    for report in reports {
        if report.partner_id != *partner_id || !strict_date_filter(&report.date, period) {
            continue;
        }
        let Some(resolved) = resolve(&report.date) else {
            continue;
        };

        let entry = weeks
            .entry(resolved.week_start)
            .or_insert_with(|| WeeklyTripSummary {
                week_start: resolved.week_start,
                week_end: resolved.week_end,
                label: resolved.week_label(),
                report_count: 0,
                distance_km: 0.0,
                driving_seconds: 0,
            });

        entry.report_count += 1;
        entry.distance_km += parse_decimal(&report.distance_km);
        entry.driving_seconds += parse_duration(&report.driving_duration);
    }

    weeks.into_values().collect()
}
