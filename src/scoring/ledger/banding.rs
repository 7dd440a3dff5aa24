use serde::Serialize;

/// Presentation band for a point balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceBand {
    Good,
    Warning,
    Critical,
}

impl BalanceBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "Good",
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

/// Banding used by the fleet dashboard gauge: above 8 is good, above 4 is a
/// warning, the rest is critical.
pub fn dashboard_band(balance: i32) -> BalanceBand {
    if balance > 8 {
        BalanceBand::Good
    } else if balance > 4 {
        BalanceBand::Warning
    } else {
        BalanceBand::Critical
    }
}

/// Stricter banding used by the driver scorecard: 11 and up is good, 6 to 10
/// is a warning, below 6 is critical. The dashboard and the scorecard apply
/// different thresholds to the same balance; both are kept as-is.
pub fn scorecard_band(balance: i32) -> BalanceBand {
    if balance >= 11 {
        BalanceBand::Good
    } else if balance >= 6 {
        BalanceBand::Warning
    } else {
        BalanceBand::Critical
    }
}
