//! Spending and renewal analytics over a subscription snapshot.
//!
//! Everything here is a pure function of the records and an injected `today`;
//! nothing reads the clock or mutates its input.

use chrono::NaiveDate;
use rust_decimal::prelude::RoundingStrategy;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config;
use crate::models::{Frequency, Status, StatsSummary, SubscriptionRecord};

const DAYS_PER_MONTH: i64 = 30;
const WEEKS_PER_MONTH: i64 = 4;
const MONTHS_PER_YEAR: i64 = 12;

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Convert a price billed at `frequency` into its monthly equivalent.
///
/// Uses the linear 30-day / 4-week / 12-month approximation, not calendar
/// arithmetic. Results beyond the `Decimal` range saturate at
/// `Decimal::MAX` / `Decimal::MIN`.
pub fn normalize_to_monthly(price: Decimal, frequency: Frequency) -> Decimal {
    match frequency {
        Frequency::Daily => price.saturating_mul(Decimal::from(DAYS_PER_MONTH)),
        Frequency::Weekly => price.saturating_mul(Decimal::from(WEEKS_PER_MONTH)),
        Frequency::Monthly => price,
        Frequency::Yearly => price / Decimal::from(MONTHS_PER_YEAR),
    }
}

/// Monthly-equivalent price of a single record, ignoring its status.
pub fn monthly_equivalent(record: &SubscriptionRecord) -> Decimal {
    normalize_to_monthly(record.price, record.frequency)
}

/// Round half-up to two decimal places, always keeping a scale of 2.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

// ---------------------------------------------------------------------------
// Renewal window
// ---------------------------------------------------------------------------

/// Whole days from `today` until the record's next renewal.
///
/// Negative when the renewal is overdue, `None` when no date is known.
pub fn days_until_renewal(record: &SubscriptionRecord, today: NaiveDate) -> Option<i64> {
    record
        .renewal_date
        .map(|renewal| renewal.signed_duration_since(today).num_days())
}

/// Whether an active record renews within the inclusive `0..=7` day window.
pub fn is_upcoming_renewal(record: &SubscriptionRecord, today: NaiveDate) -> bool {
    if record.status != Status::Active {
        return false;
    }
    matches!(
        days_until_renewal(record, today),
        Some(days) if (0..=config::RENEWAL_WINDOW_DAYS).contains(&days)
    )
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Summarize a snapshot into dashboard statistics.
///
/// Total for any input. Monthly spend adds active records only, across
/// currencies, and is rounded once at the end. A sum past the `Decimal`
/// range saturates instead of panicking.
pub fn summarize(records: &[SubscriptionRecord], today: NaiveDate) -> StatsSummary {
    let mut summary = StatsSummary {
        total: records.len(),
        ..StatsSummary::default()
    };
    let mut spending = Decimal::ZERO;

    for record in records {
        match record.status {
            Status::Active => {
                summary.active += 1;
                spending = spending.saturating_add(monthly_equivalent(record));
                if is_upcoming_renewal(record, today) {
                    summary.upcoming_renewals += 1;
                }
            }
            Status::Expired => summary.expired += 1,
            Status::Cancelled => {}
        }
    }

    summary.monthly_spending = round_money(spending);
    summary
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Everything the dashboard page shows: the stats cards plus the first few
/// records of the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub stats: StatsSummary,
    pub recent: Vec<SubscriptionRecord>,
}

impl Dashboard {
    pub fn build(records: &[SubscriptionRecord], today: NaiveDate) -> Self {
        Self {
            stats: summarize(records, today),
            recent: records.iter().take(config::RECENT_LIMIT).cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.stats.total == 0
    }
}
