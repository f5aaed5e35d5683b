//! Blocking HTTP client for the subscription tracker API.
//!
//! Every response is wrapped in `{ "data": ... }`. Failed requests surface as
//! [`SubtrackError::Api`] carrying the server's `error` or `message` text.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config;
use crate::error::{Result, SubtrackError};
use crate::models::{AuthPayload, Envelope, NewSubscription, SubscriptionRecord, UserProfile};
use crate::session::Session;

/// Thin record source over the REST API.
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a client for the API rooted at `base_url`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an endpoint path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    // -- Auth --------------------------------------------------------------

    /// Exchange credentials for a session.
    pub fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let body = serde_json::json!({ "email": email, "password": password });
        let payload: AuthPayload = self.send(
            self.client.post(self.url(config::SIGN_IN_PATH)).json(&body),
            "Failed to sign in",
        )?;
        log::info!("Signed in as {}", payload.user.email);
        Ok(Session::new(payload.token, payload.user))
    }

    /// Register a new account; the server signs the user in immediately.
    pub fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let body = serde_json::json!({ "name": name, "email": email, "password": password });
        let payload: AuthPayload = self.send(
            self.client.post(self.url(config::SIGN_UP_PATH)).json(&body),
            "Failed to sign up",
        )?;
        log::info!("Signed up as {}", payload.user.email);
        Ok(Session::new(payload.token, payload.user))
    }

    // -- Subscriptions -----------------------------------------------------

    /// Fetch every subscription owned by the session's user.
    pub fn list_subscriptions(&self, session: &Session) -> Result<Vec<SubscriptionRecord>> {
        let url = self.url(&config::user_subscriptions_path(session.user_id()));
        let records: Vec<SubscriptionRecord> = self.send(
            self.authorized(self.client.get(url), session),
            "Failed to fetch subscriptions",
        )?;
        log::debug!("Fetched {} subscriptions", records.len());
        Ok(records)
    }

    /// Create a subscription for the session's user.
    ///
    /// Returns the server's `data` payload unchanged.
    pub fn create_subscription(
        &self,
        session: &Session,
        subscription: &NewSubscription,
    ) -> Result<Value> {
        let body = CreateSubscriptionRequest {
            user_id: session.user_id(),
            subscription,
        };
        let created: Value = self.send(
            self.authorized(self.client.post(self.url(config::SUBSCRIPTIONS_PATH)), session)
                .json(&body),
            "Failed to create subscription",
        )?;
        log::info!("Created subscription {}", subscription.name);
        Ok(created)
    }

    // -- Users -------------------------------------------------------------

    /// Fetch the account details of the session's user.
    pub fn profile(&self, session: &Session) -> Result<UserProfile> {
        let url = self.url(&config::user_path(session.user_id()));
        self.send(
            self.authorized(self.client.get(url), session),
            "Failed to fetch profile",
        )
    }

    // -- Helpers -----------------------------------------------------------

    fn authorized(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        request.header(AUTHORIZATION, session.bearer())
    }

    /// Send a request and unwrap the `data` envelope.
    ///
    /// `failure` is the message used when an error response carries none.
    fn send<T: DeserializeOwned>(&self, request: RequestBuilder, failure: &str) -> Result<T> {
        let resp = request.send()?;
        let status = resp.status();
        log::debug!("{} {}", status.as_u16(), resp.url());

        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| failure.to_string());
            log::warn!("{}: {} ({})", failure, message, status.as_u16());
            return Err(SubtrackError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp.text()?;
        let envelope: Envelope<T> = serde_json::from_str(&text)?;
        Ok(envelope.data)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateSubscriptionRequest<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    subscription: &'a NewSubscription,
}

/// Pull a human-readable message out of an error body: `error`, then `message`.
fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    ["error", "message"].iter().find_map(|key| {
        value
            .get(*key)
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string())
    })
}
