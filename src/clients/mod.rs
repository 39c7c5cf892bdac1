//! Typed clients for the backend collections, one per resource.

#[macro_use]
mod macros;
pub mod order_client;
pub mod product_client;

pub use order_client::OrderClient;
pub use product_client::ProductClient;
