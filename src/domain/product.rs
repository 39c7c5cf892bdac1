use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a product in the catalog, as served by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: u32,
}

/// Payload for creating or replacing a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub stock_quantity: u32,
}

impl Product {
    pub fn new(id: u64, name: impl Into<String>, price: Decimal, stock_quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            price,
            stock_quantity,
        }
    }

    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }
}
