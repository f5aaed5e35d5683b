use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// StatsSummary: Aggregate dashboard statistics
// ---------------------------------------------------------------------------

/// Output of [`summarize`](crate::analytics::summarize).
///
/// `monthly_spending` is always rounded to exactly two decimal places and sums
/// raw amounts across currencies without conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_spending: Decimal,
    pub upcoming_renewals: usize,
}

impl Default for StatsSummary {
    fn default() -> Self {
        Self {
            total: 0,
            active: 0,
            expired: 0,
            monthly_spending: Decimal::new(0, 2),
            upcoming_renewals: 0,
        }
    }
}
