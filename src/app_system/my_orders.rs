use tracing::{error, instrument};

use crate::clients::OrderClient;
use crate::domain::Order;
use crate::error::ApiError;

/// State behind the signed-in user's order history.
pub struct MyOrders {
    client: OrderClient,
    orders: Vec<Order>,
    loading: bool,
    error: Option<String>,
}

impl MyOrders {
    pub fn new(client: OrderClient) -> Self {
        Self {
            client,
            orders: Vec::new(),
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

    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        let result = self.client.my_orders().await;
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
                    ApiError::PermissionDenied { .. } => "You do not have permission to view orders.",
                    _ => "Failed to load orders. Please try again.",
                }
                .to_string());
                Err(e)
            }
        }
    }
}
