//! Query modules for the subscription tracker SDK.
//!
//! Queries borrow an in-memory snapshot and never touch the network.

pub mod subscriptions;

pub use subscriptions::{
    filter, CategoryFilter, Selector, StatusFilter, SubscriptionFilter, SubscriptionQuery,
};
