//! Form validation tests for new subscriptions.

mod common;

use rust_decimal::Decimal;
use subtrack_sdk::models::{Category, Currency, Frequency};
use subtrack_sdk::validation::SubscriptionDraft;

fn valid_draft() -> SubscriptionDraft {
    SubscriptionDraft {
        name: "Spotify".to_string(),
        price: "119.00".to_string(),
        currency: "INR".to_string(),
        frequency: "monthly".to_string(),
        category: "entertainment".to_string(),
        payment_method: "UPI".to_string(),
        start_date: Some("2025-02-01".to_string()),
    }
}

#[test]
fn valid_draft_produces_new_subscription() {
    let sub = valid_draft().validate().unwrap();
    assert_eq!(sub.name, "Spotify");
    assert_eq!(sub.price, Decimal::new(11900, 2));
    assert_eq!(sub.currency, Currency::Inr);
    assert_eq!(sub.frequency, Frequency::Monthly);
    assert_eq!(sub.category, Category::Entertainment);
    assert_eq!(sub.payment_method, "UPI");
    assert_eq!(sub.start_date, common::day(2025, 2, 1));
}

#[test]
fn default_draft_reports_every_missing_field() {
    let errors = SubscriptionDraft::default().validate().unwrap_err();
    assert_eq!(errors.get("name"), Some("Name must be at least 2 characters"));
    assert_eq!(errors.get("paymentMethod"), Some("Payment method is required"));
    assert_eq!(errors.get("startDate"), Some("Start date is required"));
    // empty price is zero, which is allowed
    assert_eq!(errors.get("price"), None);
    assert_eq!(errors.len(), 3);
}

#[test]
fn name_length_bounds() {
    let mut draft = valid_draft();
    draft.name = "X".to_string();
    assert!(draft.validate().unwrap_err().get("name").is_some());

    draft.name = "XY".to_string();
    assert!(draft.validate().is_ok());

    draft.name = "a".repeat(100);
    assert!(draft.validate().is_ok());

    draft.name = "a".repeat(101);
    assert_eq!(
        draft.validate().unwrap_err().get("name"),
        Some("Name must be less than 100 characters")
    );
}

#[test]
fn negative_price_is_rejected() {
    let mut draft = valid_draft();
    draft.price = "-1".to_string();
    assert_eq!(
        draft.validate().unwrap_err().get("price"),
        Some("Price must be positive")
    );
}

#[test]
fn unparseable_price_counts_as_zero() {
    let mut draft = valid_draft();
    draft.price = "free".to_string();
    assert_eq!(draft.validate().unwrap().price, Decimal::ZERO);
}

#[test]
fn unknown_enum_values_are_rejected() {
    let mut draft = valid_draft();
    draft.currency = "GBP".to_string();
    draft.frequency = "hourly".to_string();
    draft.category = "music".to_string();
    let errors = draft.validate().unwrap_err();
    assert_eq!(errors.get("currency"), Some("Invalid currency"));
    assert_eq!(errors.get("frequency"), Some("Invalid frequency"));
    assert_eq!(errors.get("category"), Some("Invalid category"));
}

#[test]
fn malformed_start_date_is_rejected() {
    let mut draft = valid_draft();
    draft.start_date = Some("31/01/2025".to_string());
    assert_eq!(
        draft.validate().unwrap_err().get("startDate"),
        Some("Start date must be a valid date")
    );
}

#[test]
fn timestamp_start_date_is_accepted() {
    let mut draft = valid_draft();
    draft.start_date = Some("2025-02-01T18:30:00.000Z".to_string());
    assert_eq!(draft.validate().unwrap().start_date, common::day(2025, 2, 1));
}

#[test]
fn errors_serialize_as_field_map() {
    let mut draft = valid_draft();
    draft.payment_method.clear();
    let errors = draft.validate().unwrap_err();
    let value = serde_json::to_value(&errors).unwrap();
    assert_eq!(
        value,
        serde_json::json!({ "paymentMethod": "Payment method is required" })
    );
    assert_eq!(errors.to_string(), "paymentMethod: Payment method is required");
}

#[test]
fn new_subscription_wire_format() {
    let sub = valid_draft().validate().unwrap();
    let value = serde_json::to_value(&sub).unwrap();
    assert_eq!(value["price"], 119.0);
    assert_eq!(value["currency"], "INR");
    assert_eq!(value["paymentMethod"], "UPI");
    assert_eq!(value["startDate"], "2025-02-01");
}
