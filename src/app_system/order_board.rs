use tracing::{error, instrument};

use crate::clients::OrderClient;
use crate::domain::{Order, OrderStatus};
use crate::error::ApiError;

/// State behind the privileged all-orders screen.
pub struct OrderBoard {
    client: OrderClient,
    orders: Vec<Order>,
    filter: Option<OrderStatus>,
    loading: bool,
    error: Option<String>,
}

impl OrderBoard {
    pub fn new(client: OrderClient) -> Self {
        Self {
            client,
            orders: Vec::new(),
            filter: None,
            loading: false,
            error: None,
        }
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `None` shows every status.
    pub fn set_filter(&mut self, filter: Option<OrderStatus>) {
        self.filter = filter;
    }

    pub fn visible(&self) -> impl Iterator<Item = &Order> {
        let filter = self.filter;
        self.orders
            .iter()
            .filter(move |order| filter.map_or(true, |status| order.status == status))
    }

    pub fn count(&self, status: OrderStatus) -> usize {
        self.orders.iter().filter(|order| order.status == status).count()
    }

    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        let result = self.client.list_orders().await;
        self.loading = false;

        match result {
            Ok(orders) => {
                self.orders = orders;
                self.error = None;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error fetching orders");
                self.error = Some(match e {
                    ApiError::PermissionDenied { .. } => "You do not have permission to view all orders.",
                    _ => "Failed to load orders. Please try again.",
                }
                .to_string());
                Err(e)
            }
        }
    }

    /// Changes an order's status and reloads the list. On failure the list is left as is.
    #[instrument(skip(self))]
    pub async fn update_status(&mut self, id: u64, status: OrderStatus) -> Result<(), ApiError> {
        match self.client.update_order_status(id, status).await {
            Ok(_) => self.load().await,
            Err(e) => {
                error!(error = %e, "Status update failed");
                self.error = Some("Failed to update order status".to_string());
                Err(e)
            }
        }
    }
}
