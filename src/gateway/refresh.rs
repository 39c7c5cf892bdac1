use futures_util::future::BoxFuture;
use tracing::{debug, instrument};

use super::TokenSet;
use crate::config::ClientConfig;
use crate::error::AuthError;

/// Exchanges a refresh token for a fresh token set.
pub trait TokenRefresher: Send + Sync {
    fn refresh<'a>(&'a self, refresh_token: &'a str) -> BoxFuture<'a, Result<TokenSet, AuthError>>;
}

/// Refreshes through an OpenID Connect token endpoint (`refresh_token` grant).
#[derive(Debug, Clone)]
pub struct OidcRefresher {
    client: reqwest::Client,
    token_endpoint: String,
    client_id: String,
}

impl OidcRefresher {
    pub fn new(token_endpoint: impl Into<String>, client_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            token_endpoint: token_endpoint.into(),
            client_id: client_id.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.token_endpoint(), config.client_id.clone())
    }

    #[instrument(skip(self, refresh_token), fields(endpoint = %self.token_endpoint))]
    async fn exchange(&self, refresh_token: &str) -> Result<TokenSet, AuthError> {
        debug!("Requesting token refresh");
        let form = [
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];

        let response = self
            .client
            .post(&self.token_endpoint)
            .form(&form)
            .send()
            .await
            .map_err(|e| AuthError::ProviderUnreachable(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AuthError::RefreshRejected {
                status: response.status().as_u16(),
            });
        }

        response
            .json::<TokenSet>()
            .await
            .map_err(|e| AuthError::MalformedToken(e.to_string()))
    }
}

impl TokenRefresher for OidcRefresher {
    fn refresh<'a>(&'a self, refresh_token: &'a str) -> BoxFuture<'a, Result<TokenSet, AuthError>> {
        Box::pin(self.exchange(refresh_token))
    }
}
