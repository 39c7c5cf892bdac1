use std::convert::Infallible;

use crate::domain::{Product, ProductDraft};
use crate::gateway::ApiRequest;
use crate::rest_framework::Resource;

impl Resource for Product {
    type Id = u64;
    type CreatePayload = ProductDraft;
    type Patch = ProductDraft;
    type Action = Infallible; // No custom actions for products

    const COLLECTION: &'static str = "/api/products";

    fn action_request(_id: &u64, action: &Infallible) -> ApiRequest {
        match *action {}
    }
}
