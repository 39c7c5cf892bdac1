use std::env;

use tracing::{error, info, warn, Instrument};

use storefront_client::gateway::{SessionStatus, TokenSet};
use storefront_client::{setup_tracing, ClientConfig, Storefront};

#[tokio::main]
async fn main() -> Result<(), String> {
    // A missing .env file is fine; the process environment still applies
    let _ = dotenvy::dotenv();
    setup_tracing();

    let config = ClientConfig::from_env().map_err(|e| e.to_string())?;
    let tokens = env::var("STOREFRONT_ACCESS_TOKEN")
        .ok()
        .map(|access| TokenSet::new(access, env::var("STOREFRONT_REFRESH_TOKEN").ok()));
    if tokens.is_none() {
        warn!("STOREFRONT_ACCESS_TOKEN not set, requests will be sent without credentials");
    }

    let storefront = Storefront::connect(&config, tokens).await;

    let mut session_events = storefront.session_events();
    tokio::spawn(async move {
        while session_events.changed().await.is_ok() {
            if *session_events.borrow() == SessionStatus::Terminated {
                warn!("Session ended, sign in again to continue");
            }
        }
    });

    let identity = storefront.identity().await;
    let username = identity.as_ref().map_or("User", |identity| identity.display_name());
    let is_admin = storefront.is_admin().await;
    info!(user = %username, admin = is_admin, "Welcome back");

    match storefront
        .dashboard()
        .instrument(tracing::info_span!("dashboard"))
        .await
    {
        Ok(stats) => info!(
            products = stats.total_products,
            orders = stats.total_orders,
            my_orders = stats.my_orders,
            "Dashboard ready"
        ),
        Err(e) => error!(error = %e, "Error fetching stats"),
    }

    let mut catalog = storefront.catalog();
    let span = tracing::info_span!("catalog");
    async {
        if catalog.load_products().await.is_err() {
            return;
        }
        for product in catalog.products() {
            let stock = if product.in_stock() {
                format!("{} in stock", product.stock_quantity)
            } else {
                "Out of stock".to_string()
            };
            info!(id = product.id, name = %product.name, price = %product.price.round_dp(2), %stock, "Product");
        }
    }
    .instrument(span)
    .await;

    if let Some(message) = catalog.error() {
        error!("{}", message);
    }

    info!("Done");
    Ok(())
}
