//! Field-level validation for the "add subscription" form.
//!
//! Every field is checked eagerly and the first violation per field is kept,
//! so callers can show all problems at once.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{parse_day, Category, Currency, Frequency, NewSubscription};

pub const NAME_MIN_CHARS: usize = 2;
pub const NAME_MAX_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// ValidationErrors
// ---------------------------------------------------------------------------

/// Mapping from field name (wire spelling, e.g. `paymentMethod`) to message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation, keeping the first message reported for the field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

// ---------------------------------------------------------------------------
// SubscriptionDraft
// ---------------------------------------------------------------------------

/// Raw, unvalidated form input. Everything is a string as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDraft {
    pub name: String,
    pub price: String,
    pub currency: String,
    pub frequency: String,
    pub category: String,
    pub payment_method: String,
    pub start_date: Option<String>,
}

impl Default for SubscriptionDraft {
    /// The form's initial state.
    fn default() -> Self {
        Self {
            name: String::new(),
            price: String::new(),
            currency: Currency::Inr.as_str().to_string(),
            frequency: Frequency::Monthly.as_str().to_string(),
            category: Category::Entertainment.as_str().to_string(),
            payment_method: String::new(),
            start_date: None,
        }
    }
}

impl SubscriptionDraft {
    /// Validate every field, returning the ready-to-submit subscription or all
    /// violations found.
    pub fn validate(&self) -> Result<NewSubscription, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let name_len = self.name.chars().count();
        if name_len < NAME_MIN_CHARS {
            errors.add("name", "Name must be at least 2 characters");
        } else if name_len > NAME_MAX_CHARS {
            errors.add("name", "Name must be less than 100 characters");
        }

        let price = parse_price(&self.price);
        if price < Decimal::ZERO {
            errors.add("price", "Price must be positive");
        }

        let currency = parse_field::<Currency>(&mut errors, "currency", &self.currency);
        let frequency = parse_field::<Frequency>(&mut errors, "frequency", &self.frequency);
        let category = parse_field::<Category>(&mut errors, "category", &self.category);

        if self.payment_method.is_empty() {
            errors.add("paymentMethod", "Payment method is required");
        }

        let start_date = match self.start_date.as_deref().map(str::trim) {
            None | Some("") => {
                errors.add("startDate", "Start date is required");
                None
            }
            Some(raw) => {
                let parsed = parse_day(raw);
                if parsed.is_none() {
                    errors.add("startDate", "Start date must be a valid date");
                }
                parsed
            }
        };

        match (currency, frequency, category, start_date) {
            (Some(currency), Some(frequency), Some(category), Some(start_date))
                if errors.is_empty() =>
            {
                Ok(NewSubscription {
                    name: self.name.clone(),
                    price,
                    currency,
                    frequency,
                    category,
                    payment_method: self.payment_method.clone(),
                    start_date,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Parse a typed price. Empty or non-numeric input counts as zero.
fn parse_price(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

fn parse_field<T: FromStr>(errors: &mut ValidationErrors, field: &str, raw: &str) -> Option<T> {
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            errors.add(field, format!("Invalid {}", field));
            None
        }
    }
}
