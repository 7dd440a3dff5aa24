use serde::{Deserialize, Serialize};

/// Identifier of the partner whose records a computation is scoped to.
///
/// Every scoped engine takes this explicitly; the core never reads an
/// ambient "current partner" flag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnerId(pub String);

impl PartnerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PartnerId {
    fn default() -> Self {
        Self(String::new())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Alerte,
    Alarme,
}

impl Severity {
    pub const fn ordered() -> [Self; 2] {
        [Self::Alerte, Self::Alarme]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Alerte => "Alerte",
            Self::Alarme => "Alarme",
        }
    }

    /// Case-insensitive parse of the hand-entered severity column.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "alerte" => Some(Self::Alerte),
            "alarme" => Some(Self::Alarme),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectiveFrequency {
    Journalier,
    Hebdomadaire,
    Mensuel,
    Annuel,
}

impl ObjectiveFrequency {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Journalier => "Journalier",
            Self::Hebdomadaire => "Hebdomadaire",
            Self::Mensuel => "Mensuel",
            Self::Annuel => "Annuel",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "journalier" => Some(Self::Journalier),
            "hebdomadaire" => Some(Self::Hebdomadaire),
            "mensuel" => Some(Self::Mensuel),
            "annuel" => Some(Self::Annuel),
            _ => None,
        }
    }
}

/// A contracting partner. Exactly one partner is flagged `active` at a time;
/// the external store enforces that on activation, this core only reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Partner {
    pub id: PartnerId,
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Driver {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub license_number: String,
    pub license_category: String,
    pub obc_key_id: Option<String>,
    pub work_site: String,
}

impl Driver {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Vehicle {
    pub id: String,
    pub name: String,
    pub plate: String,
    pub driver_id: Option<String>,
}

/// A named monitored behavior or metric ("Kms parcourus", "Excès de
/// vitesse", ...). Dimension key joining infractions, objectives, and SCP
/// rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invariant {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// One row of the sanction/point catalogue (SCP). Unique per
/// `(invariantId, severity)` pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleCatalogEntry {
    pub id: String,
    pub invariant_id: String,
    pub severity: String,
    pub sanction_label: String,
    pub point_value: i32,
}

/// Raw trip report as imported into the store. Durations are `"hh:mm:ss"`
/// strings, distance and speeds are locale decimals with a comma separator;
/// the codec module turns them into numbers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TripReport {
    pub id: String,
    pub date: String,
    pub partner_id: PartnerId,
    pub driver_id: Option<String>,
    pub invariant_id: Option<String>,
    pub start_time: String,
    pub end_time: String,
    pub driving_duration: String,
    pub wait_duration: String,
    pub total_duration: String,
    pub idle_duration: String,
    pub distance_km: String,
    pub avg_speed: String,
    pub max_speed: String,
}

/// A recorded occurrence of a driver violating an invariant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Infraction {
    pub id: String,
    pub partner_id: PartnerId,
    pub date: String,
    pub driver_id: Option<String>,
    pub invariant_id: Option<String>,
    pub severity: String,
    pub count: u32,
    pub disciplinary_measure: Option<String>,
    pub other_measures: Option<String>,
    pub follow_up_required: bool,
    pub follow_up_date: Option<String>,
    pub improvement_observed: bool,
    pub source_report_id: Option<String>,
}

/// A partner-defined target for an invariant over a declared frequency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Objective {
    pub id: String,
    pub partner_id: PartnerId,
    pub invariant_id: String,
    pub chapter: String,
    pub target: f64,
    pub unit: String,
    pub mode: String,
    pub frequency: String,
}

/// Free-text analysis attached to a period's KPI row. Never computed here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KpiAnnotation {
    pub id: String,
    pub partner_id: PartnerId,
    pub objective_id: String,
    pub result: Option<String>,
    pub root_cause: Option<String>,
    pub action_taken: Option<String>,
    pub comment: Option<String>,
}

/// True when an optional foreign key is absent or blank in the raw row.
pub(crate) fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
