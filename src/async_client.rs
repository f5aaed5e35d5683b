//! Async wrapper around [`SubtrackSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking HTTP client waits on the network.
//!
//! # Example
//!
//! ```no_run
//! use subtrack_sdk::AsyncSubtrackSdk;
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = AsyncSubtrackSdk::builder().build().await.unwrap();
//!     sdk.sign_in("ada@example.com", "hunter22").await.unwrap();
//!
//!     let snapshot = sdk.snapshot().await.unwrap();
//!     let stats = snapshot.summarize(chrono::Utc::now().date_naive());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDate;

use crate::analytics::Dashboard;
use crate::config;
use crate::error::{Result, SubtrackError};
use crate::models::UserProfile;
use crate::session::Session;
use crate::snapshot::Snapshot;
use crate::validation::SubscriptionDraft;
use crate::SubtrackSdk;

// ---------------------------------------------------------------------------
// AsyncSubtrackSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncSubtrackSdk`] instance.
pub struct AsyncSubtrackSdkBuilder {
    base_url: Option<String>,
    timeout: Duration,
    session_path: Option<PathBuf>,
}

impl Default for AsyncSubtrackSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: config::DEFAULT_TIMEOUT,
            session_path: None,
        }
    }
}

impl AsyncSubtrackSdkBuilder {
    /// Set the API base URL.
    pub fn base_url<S: Into<String>>(mut self, url: S) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the HTTP request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set where the session is persisted.
    pub fn session_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.session_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the async SDK.
    ///
    /// Initialization runs on the blocking thread pool since the blocking
    /// HTTP client must not be created inside the async runtime.
    pub async fn build(self) -> Result<AsyncSubtrackSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = SubtrackSdk::builder().timeout(self.timeout);
            if let Some(url) = self.base_url {
                builder = builder.base_url(url);
            }
            if let Some(path) = self.session_path {
                builder = builder.session_path(path);
            }
            let sdk = builder.build()?;
            Ok(AsyncSubtrackSdk {
                inner: Arc::new(Mutex::new(sdk)),
            })
        })
        .await
        .map_err(|e| SubtrackError::InvalidArgument(format!("Task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncSubtrackSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`SubtrackSdk`].
///
/// All operations are dispatched to a blocking thread pool via
/// [`tokio::task::spawn_blocking`]. The underlying [`SubtrackSdk`] is
/// protected by a [`Mutex`] since signing in and out mutate it.
pub struct AsyncSubtrackSdk {
    inner: Arc<Mutex<SubtrackSdk>>,
}

impl AsyncSubtrackSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncSubtrackSdkBuilder {
        AsyncSubtrackSdkBuilder::default()
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives a `&mut SubtrackSdk` and should return a
    /// `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut SubtrackSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = sdk
                .lock()
                .map_err(|_| SubtrackError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| SubtrackError::InvalidArgument(format!("Task join error: {e}")))?
    }

    /// Sign in and persist the session. Returns a copy of the new session.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.to_string();
        let password = password.to_string();
        self.run(move |s| s.sign_in(&email, &password).cloned()).await
    }

    /// Create an account and persist the resulting session.
    pub async fn sign_up(&self, name: &str, email: &str, password: &str) -> Result<Session> {
        let name = name.to_string();
        let email = email.to_string();
        let password = password.to_string();
        self.run(move |s| s.sign_up(&name, &email, &password).cloned())
            .await
    }

    /// Forget the current session.
    pub async fn sign_out(&self) -> Result<()> {
        self.run(|s| s.sign_out()).await
    }

    /// Fetch a fresh snapshot of the signed-in user's subscriptions.
    pub async fn snapshot(&self) -> Result<Snapshot> {
        self.run(|s| s.snapshot()).await
    }

    /// Fetch a snapshot and build the dashboard view for `today`.
    pub async fn dashboard(&self, today: NaiveDate) -> Result<Dashboard> {
        self.run(move |s| s.dashboard(today)).await
    }

    /// Validate a draft and create the subscription on the server.
    pub async fn create_subscription(&self, draft: SubscriptionDraft) -> Result<serde_json::Value> {
        self.run(move |s| s.create_subscription(&draft)).await
    }

    /// Fetch the signed-in user's profile.
    pub async fn profile(&self) -> Result<UserProfile> {
        self.run(|s| s.profile()).await
    }

    /// Copy of the current session, if signed in.
    pub async fn session(&self) -> Result<Option<Session>> {
        self.run(|s| Ok(s.session().cloned())).await
    }
}
