//! Immutable snapshot of a user's subscriptions as of one fetch.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::analytics::{self, Dashboard};
use crate::error::{Result, SubtrackError};
use crate::models::{StatsSummary, SubscriptionRecord};
use crate::queries::{SubscriptionFilter, SubscriptionQuery};

/// Records from a single fetch plus the instant they were fetched.
///
/// Both the aggregator and the filter pipeline read from a snapshot; neither
/// mutates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    records: Vec<SubscriptionRecord>,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    /// Wrap freshly fetched records, stamping them with the current time.
    pub fn new(records: Vec<SubscriptionRecord>) -> Self {
        Self::at(records, Utc::now())
    }

    pub fn at(records: Vec<SubscriptionRecord>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            records,
            fetched_at,
        }
    }

    pub fn records(&self) -> &[SubscriptionRecord] {
        &self.records
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by id.
    pub fn record(&self, id: &str) -> Result<&SubscriptionRecord> {
        self.query()
            .get(id)
            .ok_or_else(|| SubtrackError::NotFound(format!("Subscription {}", id)))
    }

    /// Access the query interface over this snapshot.
    pub fn query(&self) -> SubscriptionQuery<'_> {
        SubscriptionQuery::new(&self.records)
    }

    pub fn filter(&self, query: &SubscriptionFilter) -> Vec<SubscriptionRecord> {
        self.query().filter(query)
    }

    pub fn summarize(&self, today: NaiveDate) -> StatsSummary {
        analytics::summarize(&self.records, today)
    }

    pub fn dashboard(&self, today: NaiveDate) -> Dashboard {
        Dashboard::build(&self.records, today)
    }

    pub fn into_records(self) -> Vec<SubscriptionRecord> {
        self.records
    }
}
