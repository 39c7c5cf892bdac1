use std::sync::Arc;
use std::time::{Duration, Instant};

use futures_util::future::BoxFuture;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use tracing::{debug, info, warn};

use super::{ApiRequest, ApiResponse, Session, TokenRefresher, Transport};
use crate::error::{ApiError, AuthError};

/// One stage of the gateway pipeline.
///
/// A stage may rewrite the request, call `next` zero or more times, and
/// inspect or replace the response.
pub trait Middleware: Send + Sync {
    fn handle<'a>(&'a self, request: ApiRequest, next: Next<'a>) -> BoxFuture<'a, Result<ApiResponse, ApiError>>;
}

/// The remainder of the pipeline after the current stage.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    transport: &'a dyn Transport,
    middlewares: &'a [Arc<dyn Middleware>],
}

impl<'a> Next<'a> {
    pub(crate) fn new(transport: &'a dyn Transport, middlewares: &'a [Arc<dyn Middleware>]) -> Self {
        Self {
            transport,
            middlewares,
        }
    }

    pub fn run(self, request: ApiRequest) -> BoxFuture<'a, Result<ApiResponse, ApiError>> {
        match self.middlewares.split_first() {
            Some((current, rest)) => current.handle(request, Next::new(self.transport, rest)),
            None => self.transport.send(request),
        }
    }
}

/// Sets `Authorization: Bearer <token>` from the session, or strips it when signed out.
pub struct BearerAuth {
    session: Session,
}

impl BearerAuth {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

impl Middleware for BearerAuth {
    fn handle<'a>(&'a self, mut request: ApiRequest, next: Next<'a>) -> BoxFuture<'a, Result<ApiResponse, ApiError>> {
        Box::pin(async move {
            match self.session.access_token().await {
                Some(token) => {
                    let value = HeaderValue::from_str(&format!("Bearer {}", token))
                        .map_err(|e| ApiError::Validation(format!("Malformed access token: {}", e)))?;
                    request.headers.insert(AUTHORIZATION, value);
                }
                None => {
                    request.headers.remove(AUTHORIZATION);
                }
            }
            next.run(request).await
        })
    }
}

/// Recovers from an expired access token: on a first 401, refresh the
/// session and reissue the request once. A failed refresh ends the session
/// and lets the 401 through.
///
/// Must sit outside [`BearerAuth`] so the reissued request carries the new token.
pub struct RefreshOnUnauthorized {
    session: Session,
    refresher: Arc<dyn TokenRefresher>,
}

impl RefreshOnUnauthorized {
    pub fn new(session: Session, refresher: Arc<dyn TokenRefresher>) -> Self {
        Self { session, refresher }
    }

    async fn refresh(&self) -> Result<(), AuthError> {
        let refresh_token = self
            .session
            .refresh_token()
            .await
            .ok_or(AuthError::NoRefreshToken)?;
        let tokens = self.refresher.refresh(&refresh_token).await?;
        self.session.install(tokens).await;
        Ok(())
    }
}

impl Middleware for RefreshOnUnauthorized {
    fn handle<'a>(&'a self, request: ApiRequest, next: Next<'a>) -> BoxFuture<'a, Result<ApiResponse, ApiError>> {
        Box::pin(async move {
            let retry = (!request.retried).then(|| request.clone());
            let response = next.run(request).await?;

            if response.status != StatusCode::UNAUTHORIZED {
                return Ok(response);
            }
            let Some(mut retry) = retry else {
                debug!("Unauthorized after retry, giving up");
                return Ok(response);
            };

            match self.refresh().await {
                Ok(()) => {
                    info!(path = %retry.path, "Token refreshed, reissuing request");
                    retry.retried = true;
                    next.run(retry).await
                }
                Err(e) => {
                    warn!(error = %e, "Token refresh failed, ending session");
                    self.session.terminate().await;
                    Ok(response)
                }
            }
        })
    }
}

/// Emits one event per request with its outcome and latency.
#[derive(Debug, Default)]
pub struct RequestLogging;

impl Middleware for RequestLogging {
    fn handle<'a>(&'a self, request: ApiRequest, next: Next<'a>) -> BoxFuture<'a, Result<ApiResponse, ApiError>> {
        Box::pin(async move {
            let method = request.method.clone();
            let path = request.path.clone();
            let started = Instant::now();

            let result = next.run(request).await;
            let elapsed_ms = millis(started.elapsed());
            match &result {
                Ok(response) if response.status == StatusCode::FORBIDDEN => {
                    warn!(%method, %path, elapsed_ms, "Access forbidden - insufficient permissions")
                }
                Ok(response) => debug!(%method, %path, status = response.status.as_u16(), elapsed_ms, "Request completed"),
                Err(e) => warn!(%method, %path, error = %e, elapsed_ms, "Request failed"),
            }
            result
        })
    }
}

fn millis(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
