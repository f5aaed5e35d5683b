use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// User: Identity returned by the auth endpoints
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// UserProfile: Account details from the users endpoint
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Any other fields the server sends (timestamps, etc.).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// Display name, falling back to the signed-in user's name.
    pub fn display_name<'a>(&'a self, fallback: &'a User) -> &'a str {
        self.name.as_deref().unwrap_or(&fallback.name)
    }

    /// Email, falling back to the signed-in user's email.
    pub fn display_email<'a>(&'a self, fallback: &'a User) -> &'a str {
        self.email.as_deref().unwrap_or(&fallback.email)
    }
}

// ---------------------------------------------------------------------------
// Wire envelopes
// ---------------------------------------------------------------------------

/// Every API response wraps its payload in `{ "data": ... }`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

/// Payload of the sign-in and sign-up endpoints.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AuthPayload {
    pub token: String,
    pub user: User,
}
