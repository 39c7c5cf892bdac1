use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};

use crate::domain::UserIdentity;
use crate::error::AuthError;

/// Credentials issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenSet {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl TokenSet {
    pub fn new(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token,
            expires_in: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Anonymous,
    Active,
    /// Forced logout after a failed token refresh.
    Terminated,
}

#[derive(Debug, Default)]
struct SessionState {
    tokens: Option<TokenSet>,
    identity: Option<UserIdentity>,
}

/// The current browsing session's credentials.
///
/// Clones share state. Status changes are broadcast so the application can
/// react to a forced logout.
#[derive(Debug, Clone)]
pub struct Session {
    state: Arc<RwLock<SessionState>>,
    status: Arc<watch::Sender<SessionStatus>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl Session {
    pub fn anonymous() -> Self {
        let (status, _) = watch::channel(SessionStatus::Anonymous);
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            status: Arc::new(status),
        }
    }

    pub async fn signed_in(tokens: TokenSet) -> Self {
        let session = Self::anonymous();
        session.install(tokens).await;
        session
    }

    /// Replaces the held tokens and re-reads the identity from the access token.
    ///
    /// A token set without a refresh token keeps the one already held, as
    /// providers may omit it from refresh grant responses.
    pub async fn install(&self, mut tokens: TokenSet) {
        let identity = match decode_identity(&tokens.access_token) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(error = %e, "Access token carries no readable claims");
                None
            }
        };

        let mut state = self.state.write().await;
        if tokens.refresh_token.is_none() {
            tokens.refresh_token = state.tokens.take().and_then(|previous| previous.refresh_token);
        }
        state.tokens = Some(tokens);
        state.identity = identity;
        drop(state);

        self.status.send_replace(SessionStatus::Active);
    }

    pub async fn access_token(&self) -> Option<String> {
        let state = self.state.read().await;
        state.tokens.as_ref().map(|tokens| tokens.access_token.clone())
    }

    pub async fn refresh_token(&self) -> Option<String> {
        let state = self.state.read().await;
        state.tokens.as_ref().and_then(|tokens| tokens.refresh_token.clone())
    }

    pub async fn identity(&self) -> Option<UserIdentity> {
        self.state.read().await.identity.clone()
    }

    /// Drops all credentials and signals a forced logout.
    pub async fn terminate(&self) {
        let mut state = self.state.write().await;
        state.tokens = None;
        state.identity = None;
        drop(state);

        info!("Session terminated");
        self.status.send_replace(SessionStatus::Terminated);
    }

    pub fn status(&self) -> SessionStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionStatus> {
        self.status.subscribe()
    }
}

/// Reads the (unverified) claims of a JWT access token.
pub fn decode_identity(token: &str) -> Result<UserIdentity, AuthError> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or_else(|| AuthError::MalformedToken("not a JWT".to_string()))?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| AuthError::MalformedToken(e.to_string()))?;
    let claims: serde_json::Value =
        serde_json::from_slice(&bytes).map_err(|e| AuthError::MalformedToken(e.to_string()))?;

    Ok(UserIdentity::from_claims(&claims))
}
