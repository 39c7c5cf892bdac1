//! # storefront-client
//!
//! Client side of the storefront: a shopping cart bounded by stock, typed
//! clients for the product and order APIs, and an authenticated gateway that
//! injects the bearer token and recovers once from an expired one.
//!
//! ```ignore
//! let config = ClientConfig::from_env()?;
//! let storefront = Storefront::connect(&config, Some(tokens)).await;
//!
//! let mut catalog = storefront.catalog();
//! catalog.load_products().await?;
//! catalog.add_to_cart(product_id);
//! let order = catalog.place_order().await?;
//! ```

pub mod app_system;
pub mod clients;
pub mod config;
pub mod domain;
pub mod error;
pub mod gateway;
pub mod order_resource;
pub mod product_resource;
pub mod rest_framework;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, Storefront};
pub use config::ClientConfig;
pub use error::ApiError;
