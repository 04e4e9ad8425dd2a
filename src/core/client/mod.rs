//! Public client surface + builder.
//! Internals are split into `auth` (bearer token), `constants` (endpoints + defaults)
//! and `retry` (opt-in retry policy).

mod auth;
pub(crate) mod constants;
mod retry;

pub use retry::{Backoff, RetryConfig};

use crate::core::FmError;
use constants::{DATA_PATH, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, TOKEN_ENV_VAR, USER_AGENT};
use reqwest::{Client, RequestBuilder, Response};
use std::fmt;
use std::time::Duration;
use url::Url;

/// HTTP client for the FinMind data API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct FmClient {
    http: Client,
    base_url: Url,
    api_token: Option<String>,
    retry: RetryConfig,
}

impl fmt::Debug for FmClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmClient")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl FmClient {
    /// Create a new builder.
    pub fn builder() -> FmClientBuilder {
        FmClientBuilder::default()
    }

    /// Builds a client with default endpoints and the token from `FINMIND_API_TOKEN`, if set.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_env() -> Result<Self, FmError> {
        Self::builder()
            .api_token_opt(std::env::var(TOKEN_ENV_VAR).ok())
            .build()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn data_url(&self) -> Result<Url, FmError> {
        Ok(self.base_url.join(DATA_PATH)?)
    }

    /// The client-wide retry policy.
    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    /// Sends `req`, retrying according to `override_cfg` or the client-wide policy.
    ///
    /// With retries disabled (the default) this is a single `send`.
    pub(crate) async fn send_with_retry(
        &self,
        req: RequestBuilder,
        override_cfg: Option<&RetryConfig>,
    ) -> Result<Response, FmError> {
        let cfg = override_cfg.unwrap_or(&self.retry);
        if !cfg.enabled || cfg.max_retries == 0 {
            return Ok(req.send().await?);
        }

        let mut attempt = 0u32;
        loop {
            let this = req
                .try_clone()
                .ok_or_else(|| FmError::Data("request is not cloneable for retry".into()))?;

            match this.send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if attempt < cfg.max_retries && cfg.retry_on_status.contains(&status) {
                        tracing::debug!(status, attempt, "retrying FinMind request");
                        tokio::time::sleep(cfg.backoff.delay(attempt)).await;
                        attempt += 1;
                        continue;
                    }
                    return Ok(resp);
                }
                Err(e) => {
                    let retryable = (e.is_timeout() && cfg.retry_on_timeout)
                        || (e.is_connect() && cfg.retry_on_connect);
                    if attempt < cfg.max_retries && retryable {
                        tracing::debug!(error = %e, attempt, "retrying FinMind request");
                        tokio::time::sleep(cfg.backoff.delay(attempt)).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(e.into());
                }
            }
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct FmClientBuilder {
    user_agent: Option<String>,
    base_url: Option<Url>,
    api_token: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    retry: Option<RetryConfig>,
}

impl FmClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the API host (e.g., `https://api.finmindtrade.com/`).
    #[must_use]
    pub fn base_url(mut self, url: Url) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the FinMind API token sent as a bearer token.
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = auth::normalize_token(Some(token.into()));
        self
    }

    /// Set the API token from an optional value; blank tokens are ignored.
    #[must_use]
    pub fn api_token_opt(mut self, token: Option<String>) -> Self {
        self.api_token = auth::normalize_token(token);
        self
    }

    /// Set the overall request timeout. Default: 30 seconds.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Set the client-wide retry policy. Default: retries disabled.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the default base URL cannot be parsed or the HTTP client
    /// cannot be constructed.
    pub fn build(self) -> Result<FmClient, FmError> {
        let base_url = match self.base_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .timeout(
                self.timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            );

        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        let http = httpb.build()?;

        Ok(FmClient {
            http,
            base_url,
            api_token: self.api_token,
            retry: self.retry.unwrap_or_default(),
        })
    }
}
