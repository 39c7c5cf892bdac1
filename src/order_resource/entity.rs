use reqwest::Method;

use super::actions::OrderAction;
use crate::domain::{Order, OrderCreate};
use crate::gateway::ApiRequest;
use crate::rest_framework::Resource;

impl Resource for Order {
    type Id = u64;
    type CreatePayload = OrderCreate;
    type Patch = (); // Orders are never edited in place
    type Action = OrderAction;

    const COLLECTION: &'static str = "/api/orders";

    /// `UpdateStatus` → `PATCH /api/orders/{id}/status?status={status}`
    fn action_request(id: &u64, action: &OrderAction) -> ApiRequest {
        match action {
            OrderAction::UpdateStatus(status) => {
                ApiRequest::new(Method::PATCH, format!("{}/status", Self::item_path(id)))
                    .query("status", status.as_str())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderStatus;

    #[test]
    fn test_status_action_route() {
        let request = Order::action_request(&12, &OrderAction::UpdateStatus(OrderStatus::Shipped));
        assert_eq!(request.method, Method::PATCH);
        assert_eq!(request.path, "/api/orders/12/status");
        assert_eq!(request.query, vec![("status".to_string(), "SHIPPED".to_string())]);
        assert!(request.body.is_none());
    }
}
