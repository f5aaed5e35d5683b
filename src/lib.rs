//! Subscription tracker SDK for Rust.
//!
//! Fetches a user's subscriptions from the tracker API and turns them into
//! dashboard statistics (normalized monthly spend, upcoming renewals) and
//! filtered listings. The analytics and filtering are pure functions over an
//! in-memory [`Snapshot`]; the network side is a thin blocking client.
//!
//! # Quick start
//!
//! ```no_run
//! use subtrack_sdk::queries::SubscriptionFilter;
//! use subtrack_sdk::models::Status;
//! use subtrack_sdk::SubtrackSdk;
//!
//! let mut sdk = SubtrackSdk::builder().build().unwrap();
//! sdk.sign_in("ada@example.com", "hunter22").unwrap();
//!
//! let snapshot = sdk.snapshot().unwrap();
//! let today = chrono::Utc::now().date_naive();
//! let stats = snapshot.summarize(today);
//! println!("{} active, {} per month", stats.active, stats.monthly_spending);
//!
//! let visible = snapshot.filter(&SubscriptionFilter::new().search("net").status(Status::Active));
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod analytics;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod queries;
pub mod session;
pub mod snapshot;
pub mod validation;

#[cfg(feature = "async")]
pub use async_client::AsyncSubtrackSdk;
pub use analytics::{summarize, Dashboard};
pub use client::ApiClient;
pub use error::{Result, SubtrackError};
pub use queries::{filter, SubscriptionFilter};
pub use session::{Session, SessionStore};
pub use snapshot::Snapshot;
pub use validation::{SubscriptionDraft, ValidationErrors};

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;

use crate::models::{User, UserProfile};

// ---------------------------------------------------------------------------
// SubtrackSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`SubtrackSdk`] instance.
///
/// Use [`SubtrackSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](SubtrackSdkBuilder::build) to create the SDK.
pub struct SubtrackSdkBuilder {
    base_url: Option<String>,
    timeout: Duration,
    session_path: Option<PathBuf>,
}

impl Default for SubtrackSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            session_path: None,
        }
    }
}

impl SubtrackSdkBuilder {
    /// Set the API base URL (e.g. `https://tracker.example.com/api/v1`).
    ///
    /// If not set, `SUBTRACK_API_URL` is used, falling back to the local
    /// development server.
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set where the session is persisted.
    ///
    /// If not set, the platform config directory is used
    /// (e.g. `~/.config/subtrack-sdk/session.json` on Linux).
    pub fn session_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.session_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the SDK, restoring a previously stored session if there is one.
    ///
    /// Does not touch the network.
    pub fn build(self) -> Result<SubtrackSdk> {
        let base_url = self.base_url.unwrap_or_else(config::default_api_base);
        let client = ApiClient::new(&base_url, self.timeout)?;
        let store = SessionStore::new(self.session_path);
        let session = store.load()?;
        Ok(SubtrackSdk {
            client,
            store,
            session,
        })
    }
}

// ---------------------------------------------------------------------------
// SubtrackSdk
// ---------------------------------------------------------------------------

/// The main entry point for the subscription tracker SDK.
///
/// Owns the HTTP client, the session store and the current session. Created
/// via [`SubtrackSdk::builder()`].
pub struct SubtrackSdk {
    client: ApiClient,
    store: SessionStore,
    session: Option<Session>,
}

impl SubtrackSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> SubtrackSdkBuilder {
        SubtrackSdkBuilder::default()
    }

    // -- Session -----------------------------------------------------------

    /// Sign in and persist the resulting session.
    pub fn sign_in(&mut self, email: &str, password: &str) -> Result<&Session> {
        let session = self.client.sign_in(email, password)?;
        Ok(self.start_session(session))
    }

    /// Create an account, sign in and persist the resulting session.
    pub fn sign_up(&mut self, name: &str, email: &str, password: &str) -> Result<&Session> {
        let session = self.client.sign_up(name, email, password)?;
        Ok(self.start_session(session))
    }

    /// Forget the current session, in memory and on disk.
    pub fn sign_out(&mut self) -> Result<()> {
        if let Some(session) = self.session.take() {
            log::info!("Signed out {}", session.user.email);
        }
        self.store.clear()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }

    fn start_session(&mut self, session: Session) -> &Session {
        if let Err(e) = self.store.save(&session) {
            log::warn!(
                "Could not persist session to {}: {}",
                self.store.path.display(),
                e
            );
        }
        self.session.insert(session)
    }

    fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(SubtrackError::NotSignedIn)
    }

    // -- Data --------------------------------------------------------------

    /// Fetch the signed-in user's subscriptions as a fresh snapshot.
    pub fn snapshot(&self) -> Result<Snapshot> {
        let session = self.require_session()?;
        let records = self.client.list_subscriptions(session)?;
        Ok(Snapshot::new(records))
    }

    /// Fetch a snapshot and build the dashboard view for `today`.
    pub fn dashboard(&self, today: NaiveDate) -> Result<Dashboard> {
        Ok(self.snapshot()?.dashboard(today))
    }

    /// Validate a form draft and create the subscription on the server.
    ///
    /// Validation failures are returned as [`SubtrackError::Validation`]
    /// without any request being sent.
    pub fn create_subscription(&self, draft: &SubscriptionDraft) -> Result<serde_json::Value> {
        let session = self.require_session()?;
        let subscription = draft.validate()?;
        self.client.create_subscription(session, &subscription)
    }

    /// Fetch the signed-in user's profile.
    pub fn profile(&self) -> Result<UserProfile> {
        let session = self.require_session()?;
        self.client.profile(session)
    }

    /// Return a reference to the underlying [`ApiClient`] for advanced usage.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for SubtrackSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SubtrackSdk(base_url={}, session_path={}, user={})",
            self.client.base_url(),
            self.store.path.display(),
            self.user().map(|u| u.email.as_str()).unwrap_or("<signed out>")
        )
    }
}
