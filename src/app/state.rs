use anyhow::{Context, Result};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::info;

use crate::app::models::UserProfile;

/// Credentials held for the lifetime of a login.
#[derive(Debug, Default, Clone)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// HTTP client reused across every API call
    pub http: Client,

    /// Login session (RwLock so workflows can refresh it concurrently)
    pub session: Arc<RwLock<Session>>,

    /// Application configuration
    pub config: &'static crate::config::AppConfig,
}

impl AppState {
    pub async fn new() -> Result<Self> {
        let config = crate::config::get();

        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        info!("HTTP client ready, backend: {}", config.api_base_url);

        Ok(Self {
            http,
            session: Arc::new(RwLock::new(Session::default())),
            config,
        })
    }

    /// Bearer token of the active session, if any.
    pub async fn token(&self) -> Option<String> {
        self.session.read().await.token.clone()
    }
}
