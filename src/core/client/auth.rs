//! Bearer-token handling for FinMind endpoints.

use reqwest::RequestBuilder;

impl super::FmClient {
    /// Returns `true` if an API token is configured.
    ///
    /// FinMind accepts anonymous requests at a much lower rate limit, so a missing
    /// token is not an error at this level.
    pub fn has_credentials(&self) -> bool {
        self.api_token.is_some()
    }

    /// Attaches `Authorization: Bearer <token>` when a token is configured.
    pub(crate) fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.api_token.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }
}

/// Normalizes a token read from configuration: blank values mean "no token".
pub(crate) fn normalize_token(raw: Option<String>) -> Option<String> {
    raw.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}
