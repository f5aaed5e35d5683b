use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SubtrackError;

use super::date;

/// Implements `as_str`, `ALL`, `Display` and case-insensitive `FromStr` for a
/// fieldless wire enum.
macro_rules! wire_enum {
    ($ty:ident, $label:literal, { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $ty {
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// The string used on the wire.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = SubtrackError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $(
                    if s.eq_ignore_ascii_case($wire) {
                        return Ok($ty::$variant);
                    }
                )+
                Err(SubtrackError::InvalidArgument(format!(
                    concat!("Unknown ", $label, ": {}"),
                    s
                )))
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Currency a subscription is billed in. Amounts are tagged, never converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Usd,
    Eur,
    Inr,
    Yen,
}

wire_enum!(Currency, "currency", {
    Usd => "USD",
    Eur => "EUR",
    Inr => "INR",
    Yen => "YEN",
});

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Inr => "₹",
            Currency::Yen => "¥",
        }
    }
}

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

/// Billing cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

wire_enum!(Frequency, "frequency", {
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
    Yearly => "yearly",
});

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Sports,
    Entertainment,
    Lifestyle,
    Technology,
    Finance,
    Politics,
    Games,
}

wire_enum!(Category, "category", {
    Sports => "sports",
    Entertainment => "entertainment",
    Lifestyle => "lifestyle",
    Technology => "technology",
    Finance => "finance",
    Politics => "politics",
    Games => "games",
});

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status. `Cancelled` is terminal; `Active` and `Expired` are
/// maintained by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Expired,
    Cancelled,
}

wire_enum!(Status, "status", {
    Active => "active",
    Expired => "expired",
    Cancelled => "cancelled",
});

// ---------------------------------------------------------------------------
// SubscriptionRecord
// ---------------------------------------------------------------------------

/// A single subscription as returned by the record source.
///
/// Unknown server fields (`userId`, `createdAt`, ...) are ignored on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub currency: Currency,
    pub frequency: Frequency,
    pub category: Category,
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(
        default,
        with = "date::optional_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<NaiveDate>,
    #[serde(
        default,
        with = "date::optional_day",
        skip_serializing_if = "Option::is_none"
    )]
    pub renewal_date: Option<NaiveDate>,
}

impl SubscriptionRecord {
    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

// ---------------------------------------------------------------------------
// NewSubscription
// ---------------------------------------------------------------------------

/// A validated subscription ready to be created on the server.
///
/// Produced by [`SubscriptionDraft::validate`](crate::validation::SubscriptionDraft::validate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub currency: Currency,
    pub frequency: Frequency,
    pub category: Category,
    pub payment_method: String,
    #[serde(with = "date::day")]
    pub start_date: NaiveDate,
}
