use rust_decimal::Decimal;

use super::{OrderCreate, OrderItemRequest, Product};

/// One product-and-quantity entry in the cart.
///
/// `product` is the snapshot taken when the line was last touched by
/// [`Cart::add`]; it is only used for display and stock bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product_id: u64,
    pub quantity: u32,
    pub product: Product,
}

impl CartLine {
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn subtotal(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Session-scoped shopping cart. Lines keep the order in which products were first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`. Returns `false` when the cart was left unchanged,
    /// either because the product is out of stock or the line is already at stock.
    pub fn add(&mut self, product: &Product) -> bool {
        if !product.in_stock() {
            return false;
        }

        match self.lines.iter_mut().find(|line| line.product_id == product.id) {
            Some(line) if line.quantity < product.stock_quantity => {
                line.quantity += 1;
                line.product = product.clone();
                true
            }
            Some(_) => false,
            None => {
                self.lines.push(CartLine {
                    product_id: product.id,
                    quantity: 1,
                    product: product.clone(),
                });
                true
            }
        }
    }

    /// Stores `quantity` for an existing line; a quantity below 1 removes it.
    ///
    /// Callers are expected to stay within the product's stock.
    pub fn set_quantity(&mut self, product_id: u64, quantity: u32) {
        if quantity < 1 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, product_id: u64) {
        self.lines.retain(|line| line.product_id != product_id);
    }

    /// Sum of all line subtotals, rounded to cents. Saturates like [`CartLine::subtotal`].
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::subtotal)
            .fold(Decimal::ZERO, Decimal::saturating_add)
            .round_dp(2)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Brings the cart in line with a freshly loaded product list.
    ///
    /// Lines are clamped to the current stock and take the new snapshot.
    /// Lines for products that are unlisted or sold out are dropped.
    pub fn reconcile(&mut self, products: &[Product]) {
        self.lines.retain_mut(|line| {
            match products.iter().find(|product| product.id == line.product_id) {
                Some(product) if product.in_stock() => {
                    line.quantity = line.quantity.min(product.stock_quantity);
                    line.product = product.clone();
                    true
                }
                _ => false,
            }
        });
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn quantity_of(&self, product_id: u64) -> u32 {
        self.lines
            .iter()
            .find(|line| line.product_id == product_id)
            .map_or(0, |line| line.quantity)
    }

    /// Whether another unit of `product` may be added.
    pub fn can_add(&self, product: &Product) -> bool {
        self.quantity_of(product.id) < product.stock_quantity
    }

    /// Snapshot of the cart as the payload submitted when placing an order.
    pub fn order_request(&self) -> OrderCreate {
        OrderCreate {
            items: self
                .lines
                .iter()
                .map(|line| OrderItemRequest {
                    product_id: line.product_id,
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn product_a() -> Product {
        Product::new(1, "Product A", Decimal::new(999, 2), 5)
    }

    fn product_b() -> Product {
        Product::new(2, "Product B", Decimal::new(2000, 2), 1)
    }

    #[test]
    fn test_scenario_total() {
        let mut cart = Cart::new();
        cart.add(&product_a());
        cart.add(&product_a());
        cart.add(&product_b());

        assert_eq!(cart.quantity_of(1), 2);
        assert_eq!(cart.quantity_of(2), 1);
        assert_eq!(cart.total(), Decimal::new(3998, 2));
        assert_eq!(cart.total().to_string(), "39.98");
    }

    #[test]
    fn test_add_at_stock_limit_is_noop() {
        let mut cart = Cart::new();
        assert!(cart.add(&product_b()));
        let before = cart.clone();

        assert!(!cart.add(&product_b()));
        assert_eq!(cart, before);
        assert!(!cart.can_add(&product_b()));
    }

    #[test]
    fn test_out_of_stock_never_creates_line() {
        let mut cart = Cart::new();
        let sold_out = Product::new(9, "Sold out", Decimal::ONE, 0);
        assert!(!cart.add(&sold_out));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut by_zero = Cart::new();
        by_zero.add(&product_a());
        by_zero.add(&product_b());
        let mut by_remove = by_zero.clone();

        by_zero.set_quantity(1, 0);
        by_remove.remove(1);
        assert_eq!(by_zero, by_remove);
        assert_eq!(by_zero.len(), 1);
    }

    #[test]
    fn test_remove_absent_is_silent() {
        let mut cart = Cart::new();
        cart.add(&product_a());
        cart.remove(42);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_set_quantity_ignores_unknown_product() {
        let mut cart = Cart::new();
        cart.set_quantity(7, 3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_order_request_snapshot_and_clear() {
        let mut cart = Cart::new();
        cart.add(&product_b());
        cart.add(&product_a());
        cart.set_quantity(1, 4);

        let request = cart.order_request();
        assert_eq!(
            request.items,
            vec![
                OrderItemRequest { product_id: 2, quantity: 1 },
                OrderItemRequest { product_id: 1, quantity: 4 },
            ]
        );

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Decimal::ZERO);
    }

    #[test]
    fn test_reconcile_clamps_and_drops_lines() {
        let mut cart = Cart::new();
        for _ in 0..4 {
            cart.add(&product_a());
        }
        cart.add(&product_b());
        cart.add(&Product::new(3, "Product C", Decimal::new(125, 2), 3));

        let reloaded = vec![
            Product::new(1, "Product A", Decimal::new(1099, 2), 1),
            Product::new(2, "Product B", Decimal::new(2000, 2), 0),
        ];
        cart.reconcile(&reloaded);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity_of(1), 1);
        assert_eq!(cart.lines()[0].product.price, Decimal::new(1099, 2));
        assert_eq!(cart.total(), Decimal::new(1099, 2));
    }

    #[test]
    fn test_total_saturates_instead_of_overflowing() {
        let mut cart = Cart::new();
        cart.add(&Product::new(1, "Priceless", Decimal::MAX, 10));
        cart.add(&Product::new(1, "Priceless", Decimal::MAX, 10));
        cart.add(&Product::new(2, "Also priceless", Decimal::MAX, 1));

        assert_eq!(cart.lines()[0].subtotal(), Decimal::MAX);
        assert_eq!(cart.total(), Decimal::MAX);
    }

    #[derive(Debug, Clone)]
    enum CartOp {
        Add(usize),
        Remove(u64),
        SetQuantity(u64, u32),
    }

    fn catalog() -> Vec<Product> {
        vec![
            product_a(),
            product_b(),
            Product::new(3, "Product C", Decimal::new(125, 2), 3),
            Product::new(4, "Product D", Decimal::new(4999, 2), 0),
        ]
    }

    fn cart_op() -> impl Strategy<Value = CartOp> {
        prop_oneof![
            (0usize..4).prop_map(CartOp::Add),
            (1u64..5).prop_map(CartOp::Remove),
            (1u64..5, 0u32..6).prop_map(|(id, qty)| CartOp::SetQuantity(id, qty)),
        ]
    }

    proptest! {
        #[test]
        fn prop_lines_positive_and_total_matches(ops in prop::collection::vec(cart_op(), 0..40)) {
            let products = catalog();
            let mut cart = Cart::new();

            for op in ops {
                match op {
                    CartOp::Add(index) => { cart.add(&products[index]); }
                    CartOp::Remove(id) => cart.remove(id),
                    CartOp::SetQuantity(id, qty) => cart.set_quantity(id, qty),
                }

                let expected: Decimal = cart.lines().iter().map(CartLine::subtotal).sum();
                prop_assert_eq!(cart.total(), expected.round_dp(2));
                for line in cart.lines() {
                    prop_assert!(line.quantity >= 1);
                }
            }
        }

        #[test]
        fn prop_add_never_exceeds_stock(adds in prop::collection::vec(0usize..4, 0..40)) {
            let products = catalog();
            let mut cart = Cart::new();

            for index in adds {
                cart.add(&products[index]);
            }
            for line in cart.lines() {
                prop_assert!(line.quantity <= line.product.stock_quantity);
            }
        }
    }
}
