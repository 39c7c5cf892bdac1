use std::time::Duration;

use tracing::{error, info, instrument, warn};

use super::Notice;
use crate::clients::{OrderClient, ProductClient};
use crate::domain::{Cart, Order, Product};
use crate::error::ApiError;
use crate::product_resource::ProductForm;

pub const ORDER_PLACED: &str = "Order placed successfully!";

/// State behind the product catalog screen: the product list, the cart and
/// the messages shown to the user.
///
/// Failed calls record a message in [`Catalog::error`] and leave the
/// products and the cart as they were.
pub struct Catalog {
    product_client: ProductClient,
    order_client: OrderClient,
    notice_ttl: Duration,
    products: Vec<Product>,
    cart: Cart,
    loading: bool,
    error: Option<String>,
    notice: Option<Notice>,
}

impl Catalog {
    pub fn new(product_client: ProductClient, order_client: OrderClient, notice_ttl: Duration) -> Self {
        Self {
            product_client,
            order_client,
            notice_ttl,
            products: Vec::new(),
            cart: Cart::new(),
            loading: false,
            error: None,
            notice: None,
        }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: u64) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// The success notice, while it is still due to be shown.
    pub fn notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|notice| notice.is_visible())
            .map(Notice::message)
    }

    #[instrument(skip(self))]
    pub async fn load_products(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        let result = self.product_client.list_products().await;
        self.loading = false;

        match result {
            Ok(products) => {
                info!(count = products.len(), "Products loaded");
                self.products = products;
                self.cart.reconcile(&self.products);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Error fetching products");
                self.error = Some("Failed to load products. Please try again.".to_string());
                Err(e)
            }
        }
    }

    /// Adds one unit of a listed product to the cart.
    pub fn add_to_cart(&mut self, product_id: u64) -> bool {
        match self.products.iter().find(|product| product.id == product_id) {
            Some(product) => self.cart.add(product),
            None => false,
        }
    }

    /// Submits the cart as an order.
    ///
    /// On success the cart is emptied, a notice is shown and the product list
    /// is fetched again. On failure the cart and the product list are untouched.
    #[instrument(skip(self), fields(lines = self.cart.len()))]
    pub async fn place_order(&mut self) -> Result<Order, ApiError> {
        if self.cart.is_empty() {
            let e = ApiError::Validation("Your cart is empty".to_string());
            self.error = Some(e.user_message("Failed to place order"));
            return Err(e);
        }

        let request = self.cart.order_request();
        match self.order_client.place_order(request).await {
            Ok(order) => {
                self.cart.clear();
                self.notice = Some(Notice::new(ORDER_PLACED, self.notice_ttl));
                if let Err(e) = self.load_products().await {
                    warn!(error = %e, "Order placed but product refresh failed");
                }
                Ok(order)
            }
            Err(e) => {
                error!(error = %e, "Order placement failed");
                self.error = Some(e.user_message("Failed to place order"));
                Err(e)
            }
        }
    }

    /// Creates a product, or replaces `editing` when given. Privileged.
    #[instrument(skip(self, form))]
    pub async fn save_product(&mut self, form: &ProductForm, editing: Option<u64>) -> Result<Product, ApiError> {
        let result = match form.validate() {
            Ok(draft) => match editing {
                Some(id) => self.product_client.update_product(id, draft).await,
                None => self.product_client.create_product(draft).await,
            },
            Err(e) => Err(e),
        };

        match result {
            Ok(product) => {
                // A failed reload keeps its own message.
                let _ = self.load_products().await;
                Ok(product)
            }
            Err(e) => {
                self.error = Some(e.user_message("Failed to save product"));
                Err(e)
            }
        }
    }

    /// Privileged.
    #[instrument(skip(self))]
    pub async fn delete_product(&mut self, id: u64) -> Result<(), ApiError> {
        match self.product_client.delete_product(id).await {
            Ok(()) => {
                self.cart.remove(id);
                let _ = self.load_products().await;
                Ok(())
            }
            Err(e) => {
                self.error = Some("Failed to delete product".to_string());
                Err(e)
            }
        }
    }
}
