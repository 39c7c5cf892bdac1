use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use super::{load_dashboard, Catalog, DashboardStats, MyOrders, OrderBoard};
use crate::clients::{OrderClient, ProductClient};
use crate::config::ClientConfig;
use crate::domain::{has_capability, UserIdentity, ADMIN};
use crate::error::ApiError;
use crate::gateway::{ApiGateway, Session, SessionStatus, TokenSet};

/// The application's wiring: one gateway and session shared by every client,
/// plus factories for each screen's state.
#[derive(Clone)]
pub struct Storefront {
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    session: Session,
    notice_ttl: Duration,
}

impl Storefront {
    /// Connects to the configured backend with an already-issued token set.
    pub async fn connect(config: &ClientConfig, tokens: Option<TokenSet>) -> Self {
        let session = match tokens {
            Some(tokens) => Session::signed_in(tokens).await,
            None => Session::anonymous(),
        };
        info!(api_url = %config.api_url, "Connecting storefront");
        Self::from_gateway(ApiGateway::connect(config, session), config.notice_ttl)
    }

    pub fn from_gateway(gateway: ApiGateway, notice_ttl: Duration) -> Self {
        Self {
            product_client: ProductClient::from_gateway(gateway.clone()),
            order_client: OrderClient::from_gateway(gateway.clone()),
            session: gateway.session().clone(),
            notice_ttl,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn identity(&self) -> Option<UserIdentity> {
        self.session.identity().await
    }

    /// Whether admin screens should be offered. The backend still checks every call.
    pub async fn is_admin(&self) -> bool {
        has_capability(self.identity().await.as_ref(), ADMIN)
    }

    /// Fires when the session is terminated, e.g. after a failed token refresh.
    pub fn session_events(&self) -> watch::Receiver<SessionStatus> {
        self.session.subscribe()
    }

    pub async fn logout(&self) {
        self.session.terminate().await;
    }

    pub fn catalog(&self) -> Catalog {
        Catalog::new(self.product_client.clone(), self.order_client.clone(), self.notice_ttl)
    }

    pub fn order_board(&self) -> OrderBoard {
        OrderBoard::new(self.order_client.clone())
    }

    pub fn my_orders(&self) -> MyOrders {
        MyOrders::new(self.order_client.clone())
    }

    pub async fn dashboard(&self) -> Result<DashboardStats, ApiError> {
        let identity = self.identity().await;
        load_dashboard(&self.product_client, &self.order_client, identity.as_ref()).await
    }
}
