//! In-memory indexes over the reference collections: the sanction/point
//! catalogue (SCP) and the invariant title table.

use super::domain::{Invariant, RuleCatalogEntry};
use serde::Serialize;
use std::collections::HashMap;

/// Sanction label reported when no SCP row matches an infraction.
pub const MISSING_RULE_LABEL: &str = "Aucune règle SCP correspondante";

/// Title reported when an infraction references an unknown invariant.
pub const UNKNOWN_INVARIANT_TITLE: &str = "Invariant Inconnu";

/// Point deduction and sanction label resolved for one infraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub point_value: i32,
    pub sanction_label: String,
}

impl RuleOutcome {
    fn missing() -> Self {
        Self {
            point_value: 0,
            sanction_label: MISSING_RULE_LABEL.to_string(),
        }
    }
}

/// Index of SCP rows keyed by `(invariantId, severity)`, built once per
/// evaluation. Lookup is exact on the pair and case-insensitive on the
/// severity half; there is no fuzzy or partial matching.
#[derive(Debug, Default)]
pub struct RuleCatalog {
    entries: HashMap<String, RuleOutcome>,
}

impl RuleCatalog {
    pub fn from_entries(rows: &[RuleCatalogEntry]) -> Self {
        let mut entries = HashMap::with_capacity(rows.len());
        for row in rows {
            // The pair is unique in a well-formed catalogue; duplicates
            // resolve last-wins in store order.
            entries.insert(
                Self::key(&row.invariant_id, &row.severity),
                RuleOutcome {
                    point_value: row.point_value,
                    sanction_label: row.sanction_label.clone(),
                },
            );
        }
        Self { entries }
    }

    fn key(invariant_id: &str, severity: &str) -> String {
        format!("{invariant_id}-{severity}").to_lowercase()
    }

    /// Resolves the deduction for an `(invariant, severity)` pair, falling
    /// back to a zero-point outcome labelled [`MISSING_RULE_LABEL`].
    pub fn lookup(&self, invariant_id: &str, severity: &str) -> RuleOutcome {
        self.entries
            .get(&Self::key(invariant_id, severity))
            .cloned()
            .unwrap_or_else(RuleOutcome::missing)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Id -> title index over the invariant table.
#[derive(Debug, Default)]
pub struct InvariantCatalog {
    titles: HashMap<String, String>,
}

impl InvariantCatalog {
    pub fn from_invariants(invariants: &[Invariant]) -> Self {
        let titles = invariants
            .iter()
            .map(|invariant| (invariant.id.clone(), invariant.title.clone()))
            .collect();
        Self { titles }
    }

    /// Display title for an invariant id, [`UNKNOWN_INVARIANT_TITLE`] when
    /// the reference is missing or dangling.
    pub fn title(&self, invariant_id: &str) -> &str {
        self.titles
            .get(invariant_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_INVARIANT_TITLE)
    }
}
