//! In-memory filtering and search over a subscription snapshot.
//!
//! The three predicates (name search, status, category) combine by AND and
//! never reorder records.

use std::fmt;
use std::str::FromStr;

use crate::error::SubtrackError;
use crate::models::{Category, Status, SubscriptionRecord};

/// Value the UI uses for "no filter" on the status and category selectors.
pub const ALL: &str = "all";

// ---------------------------------------------------------------------------
// Selector filters
// ---------------------------------------------------------------------------

/// Either every value passes, or only one concrete value does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Selector::All
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(wanted) => wanted == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selector::All)
    }
}

impl<T: FromStr<Err = SubtrackError>> FromStr for Selector<T> {
    type Err = SubtrackError;

    /// Parses `"all"` (any case) as [`Selector::All`], anything else as a concrete value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(Selector::All)
        } else {
            s.parse().map(Selector::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str(ALL),
            Selector::Only(value) => value.fmt(f),
        }
    }
}

impl<T> From<T> for Selector<T> {
    fn from(value: T) -> Self {
        Selector::Only(value)
    }
}

pub type StatusFilter = Selector<Status>;
pub type CategoryFilter = Selector<Category>;

// ---------------------------------------------------------------------------
// SubscriptionFilter
// ---------------------------------------------------------------------------

/// Query for the subscriptions listing.
///
/// The default value (empty search, all statuses, all categories) matches
/// every record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscriptionFilter {
    pub search_term: String,
    pub status: StatusFilter,
    pub category: CategoryFilter,
}

impl SubscriptionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search<S: Into<String>>(mut self, term: S) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn status<F: Into<StatusFilter>>(mut self, status: F) -> Self {
        self.status = status.into();
        self
    }

    pub fn category<F: Into<CategoryFilter>>(mut self, category: F) -> Self {
        self.category = category.into();
        self
    }

    /// Build a filter from the raw selector strings the UI produces.
    pub fn from_parts(search_term: &str, status: &str, category: &str) -> Result<Self, SubtrackError> {
        Ok(Self {
            search_term: search_term.to_string(),
            status: status.parse()?,
            category: category.parse()?,
        })
    }

    /// True when no predicate restricts anything.
    pub fn is_identity(&self) -> bool {
        self.search_term.is_empty() && self.status.is_all() && self.category.is_all()
    }

    /// Prepare the filter for repeated evaluation (lower-cases the search term once).
    fn matcher(&self) -> Matcher<'_> {
        Matcher {
            needle: (!self.search_term.is_empty()).then(|| self.search_term.to_lowercase()),
            filter: self,
        }
    }

    pub fn matches(&self, record: &SubscriptionRecord) -> bool {
        self.matcher().matches(record)
    }
}

struct Matcher<'a> {
    needle: Option<String>,
    filter: &'a SubscriptionFilter,
}

impl Matcher<'_> {
    fn matches(&self, record: &SubscriptionRecord) -> bool {
        let name_match = match &self.needle {
            Some(needle) => record.name.to_lowercase().contains(needle.as_str()),
            None => true,
        };
        name_match
            && self.filter.status.matches(&record.status)
            && self.filter.category.matches(&record.category)
    }
}

/// Return the records matching `query`, in their original order.
pub fn filter(records: &[SubscriptionRecord], query: &SubscriptionFilter) -> Vec<SubscriptionRecord> {
    let matcher = query.matcher();
    records
        .iter()
        .filter(|r| matcher.matches(r))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// SubscriptionQuery
// ---------------------------------------------------------------------------

/// Query interface over a borrowed snapshot of subscription records.
pub struct SubscriptionQuery<'a> {
    records: &'a [SubscriptionRecord],
}

impl<'a> SubscriptionQuery<'a> {
    /// Create a new `SubscriptionQuery` bound to the given records.
    pub fn new(records: &'a [SubscriptionRecord]) -> Self {
        Self { records }
    }

    /// All records matching the filter, in snapshot order.
    pub fn filter(&self, query: &SubscriptionFilter) -> Vec<SubscriptionRecord> {
        filter(self.records, query)
    }

    /// Case-insensitive substring search on the name. An empty term matches everything.
    pub fn search(&self, term: &str) -> Vec<SubscriptionRecord> {
        self.filter(&SubscriptionFilter::new().search(term))
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&'a SubscriptionRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Count records matching the filter.
    pub fn count(&self, query: &SubscriptionFilter) -> usize {
        let matcher = query.matcher();
        self.records.iter().filter(|r| matcher.matches(r)).count()
    }

    /// The first `limit` records of the snapshot.
    pub fn recent(&self, limit: usize) -> &'a [SubscriptionRecord] {
        &self.records[..limit.min(self.records.len())]
    }
}
