use tracing::{debug, info, instrument};

use crate::domain::{Order, OrderCreate, OrderStatus};
use crate::error::ApiError;
use crate::order_resource::OrderAction;
use crate::rest_framework::ResourceClient;

/// Client for placing and managing orders.
///
/// `list_orders`, `get_order` and `update_order_status` are privileged; the
/// backend answers them with 403 for everyone else.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl_basic_client!(OrderClient, Order, order);

impl OrderClient {
    #[instrument(skip(self, request), fields(lines = request.items.len()))]
    pub async fn place_order(&self, request: OrderCreate) -> Result<Order, ApiError> {
        if request.is_empty() {
            return Err(ApiError::Validation("Cannot place an empty order".to_string()));
        }
        if let Some(item) = request.items.iter().find(|item| item.quantity == 0) {
            return Err(ApiError::Validation(format!(
                "Quantity for product {} must be at least 1",
                item.product_id
            )));
        }

        debug!("Sending request");
        let order = self.inner.create(request).await?;
        info!(order_id = order.id, total = %order.total_amount, "Order placed");
        Ok(order)
    }

    /// Orders belonging to the signed-in user.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>, ApiError> {
        debug!("Sending request");
        self.inner.list_at("my-orders").await
    }

    #[instrument(skip(self))]
    pub async fn update_order_status(&self, id: u64, status: OrderStatus) -> Result<Order, ApiError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::UpdateStatus(status))
            .await
    }
}
