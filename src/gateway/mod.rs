//! Authenticated access to the backend REST API.
//!
//! Requests pass through a chain of [`Middleware`] stages before reaching the
//! [`Transport`]. The default chain logs each call, retries once after a
//! token refresh on 401, and injects the bearer token.

pub mod middleware;
pub mod refresh;
pub mod request;
pub mod session;
pub mod transport;

use std::sync::Arc;

use tracing::instrument;

pub use middleware::*;
pub use refresh::*;
pub use request::*;
pub use session::*;
pub use transport::*;

use crate::config::ClientConfig;
use crate::error::ApiError;

#[derive(Clone)]
pub struct ApiGateway {
    transport: Arc<dyn Transport>,
    middlewares: Arc<[Arc<dyn Middleware>]>,
    session: Session,
}

impl ApiGateway {
    /// Gateway with the standard chain: logging, refresh-on-401, bearer injection.
    pub fn new(transport: Arc<dyn Transport>, session: Session, refresher: Arc<dyn TokenRefresher>) -> Self {
        let middlewares: Vec<Arc<dyn Middleware>> = vec![
            Arc::new(RequestLogging),
            Arc::new(RefreshOnUnauthorized::new(session.clone(), refresher)),
            Arc::new(BearerAuth::new(session.clone())),
        ];
        Self::with_middlewares(transport, session, middlewares)
    }

    /// Gateway with a caller-supplied chain, outermost stage first.
    pub fn with_middlewares(
        transport: Arc<dyn Transport>,
        session: Session,
        middlewares: Vec<Arc<dyn Middleware>>,
    ) -> Self {
        Self {
            transport,
            middlewares: middlewares.into(),
            session,
        }
    }

    /// Gateway talking HTTP to the configured backend and identity provider.
    pub fn connect(config: &ClientConfig, session: Session) -> Self {
        let transport = Arc::new(HttpTransport::new(config.api_url.clone()));
        let refresher = Arc::new(OidcRefresher::from_config(config));
        Self::new(transport, session, refresher)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the request through the chain; any non-2xx outcome becomes an [`ApiError`].
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        Next::new(self.transport.as_ref(), &self.middlewares)
            .run(request)
            .await?
            .into_result()
    }
}
