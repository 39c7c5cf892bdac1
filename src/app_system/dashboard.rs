use tracing::{info, instrument};

use crate::clients::{OrderClient, ProductClient};
use crate::domain::{has_capability, UserIdentity, ADMIN};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_products: usize,
    /// Every order for admins, the caller's own orders otherwise.
    pub total_orders: usize,
    pub my_orders: usize,
}

/// Collects the landing-page counters. The all-orders call is only issued
/// for identities holding the ADMIN capability.
#[instrument(skip_all, fields(user = identity.map(UserIdentity::display_name).unwrap_or("anonymous")))]
pub async fn load_dashboard(
    products: &ProductClient,
    orders: &OrderClient,
    identity: Option<&UserIdentity>,
) -> Result<DashboardStats, ApiError> {
    let total_products = products.list_products().await?.len();
    let my_orders = orders.my_orders().await?.len();

    let total_orders = if has_capability(identity, ADMIN) {
        orders.list_orders().await?.len()
    } else {
        my_orders
    };

    let stats = DashboardStats {
        total_products,
        total_orders,
        my_orders,
    };
    info!(?stats, "Dashboard loaded");
    Ok(stats)
}
