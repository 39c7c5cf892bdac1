use std::str::FromStr;

use rust_decimal::Decimal;

use crate::domain::{Product, ProductDraft};
use crate::error::ApiError;

/// Raw admin form input for creating or editing a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub stock_quantity: String,
}

impl ProductForm {
    /// Prefills the form for editing an existing product.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: product.price.to_string(),
            stock_quantity: product.stock_quantity.to_string(),
        }
    }

    /// Checks the inputs and builds the payload sent to the backend.
    pub fn validate(&self) -> Result<ProductDraft, ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::Validation("Product name is required".to_string()));
        }

        let price = Decimal::from_str(self.price.trim())
            .map_err(|_| ApiError::Validation(format!("Invalid price: {}", self.price)))?;
        if price.is_sign_negative() {
            return Err(ApiError::Validation("Price must not be negative".to_string()));
        }

        let stock_quantity = self
            .stock_quantity
            .trim()
            .parse::<u32>()
            .map_err(|_| ApiError::Validation(format!("Invalid stock quantity: {}", self.stock_quantity)))?;

        let description = self.description.trim();
        Ok(ProductDraft {
            name: name.to_string(),
            description: (!description.is_empty()).then(|| description.to_string()),
            price,
            stock_quantity,
        })
    }
}
