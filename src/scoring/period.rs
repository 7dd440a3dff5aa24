//! Date bucketing and the two period-filter policies.
//!
//! Report dates arrive in two notations (`yyyy-mm-dd` and `dd/mm/yyyy`,
//! occasionally with a time suffix). [`resolve`] turns either into calendar
//! buckets; the ledger and the KPI evaluator filter on the result through
//! deliberately different policies ([`lenient_year_match`] vs
//! [`strict_date_filter`]).

use chrono::{DateTime, Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A raw date string resolved into its calendar buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    pub year: i32,
    /// 1..=12
    pub month: u32,
    /// Most recent Monday on or before `date`.
    pub week_start: NaiveDate,
    /// `week_start + 6` days.
    pub week_end: NaiveDate,
}

impl ResolvedDate {
    /// Week caption used by the weekly sub-totals on the report screens.
    pub fn week_label(&self) -> String {
        format!(
            "Semaine du {} au {}",
            self.week_start.format("%d/%m/%Y"),
            self.week_end.format("%d/%m/%Y")
        )
    }
}

/// Resolves a loosely-formatted date string, or `None` when no notation
/// matches. Callers exclude unresolvable records from period aggregation
/// (or fall back to [`looks_like_year`], depending on their policy).
pub fn resolve(raw: &str) -> Option<ResolvedDate> {
    let date = parse_loose(raw)?;
    let week_start = date - Duration::days(date.weekday().num_days_from_monday() as i64);

    Some(ResolvedDate {
        date,
        year: date.year(),
        month: date.month(),
        week_start,
        week_end: week_start + Duration::days(6),
    })
}

fn parse_loose(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains('/') {
        return NaiveDate::parse_from_str(trimmed, "%d/%m/%Y").ok();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.date_naive());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}

/// Raw substring check used as the degraded fallback when a date cannot be
/// parsed at all but the row should still count for a year filter.
pub fn looks_like_year(raw: &str, year: i32) -> bool {
    raw.contains(&year.to_string())
}

/// Period selector for the point ledger: everything, or a single year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerPeriod {
    All,
    Year(i32),
}

/// Period selector for KPI evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum KpiPeriod {
    Monthly { year: i32, month: u32 },
    Yearly { year: i32 },
}

impl KpiPeriod {
    pub const fn year(self) -> i32 {
        match self {
            Self::Monthly { year, .. } | Self::Yearly { year } => year,
        }
    }
}

/// Ledger filter policy: a parsable date must fall in the selected year; an
/// unparsable one still counts when the raw string contains the year
/// substring. Kept separate from [`strict_date_filter`] — the two screens
/// observably differ.
pub fn lenient_year_match(raw_date: &str, period: LedgerPeriod) -> bool {
    match period {
        LedgerPeriod::All => true,
        LedgerPeriod::Year(year) => match resolve(raw_date) {
            Some(resolved) => resolved.year == year,
            None => looks_like_year(raw_date, year),
        },
    }
}

/// KPI filter policy: unparsable dates are dropped, no substring fallback.
pub fn strict_date_filter(raw_date: &str, period: KpiPeriod) -> bool {
    match resolve(raw_date) {
        Some(resolved) => match period {
            KpiPeriod::Monthly { year, month } => {
                resolved.year == year && resolved.month == month
            }
            KpiPeriod::Yearly { year } => resolved.year == year,
        },
        None => false,
    }
}
