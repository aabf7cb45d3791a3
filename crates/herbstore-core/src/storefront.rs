//! The cart and view-state controller.
//!
//! [`Storefront`] is the single owner of the shopper's cart, the active
//! screen, the selected product, the category filter and the cart-panel flag.
//! Screens render from its read-only queries and call its operations; none of
//! the operations can fail; an out-of-range id or quantity is a no-op.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::cart::Cart;
use crate::catalog::{visible_products, Catalog, CategoryFilter, Product};
use crate::receipt::{OrderChannel, OrderReceipt};

/// The top-level screen being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    #[default]
    Catalog,
    ProductDetail,
    Checkout,
    Payment,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Screen::Catalog => write!(f, "catalog"),
            Screen::ProductDetail => write!(f, "product-detail"),
            Screen::Checkout => write!(f, "checkout"),
            Screen::Payment => write!(f, "payment"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Storefront {
    catalog: Arc<Catalog>,
    cart: Cart,
    screen: Screen,
    /// Only meaningful while `screen == ProductDetail`.
    selected: Option<Product>,
    filter: CategoryFilter,
    cart_open: bool,
    scroll_reset: bool,
}

impl Default for Storefront {
    fn default() -> Self {
        Self::new(crate::catalog::builtin_catalog())
    }
}

impl Storefront {
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog: Arc::new(catalog),
            cart: Cart::new(),
            screen: Screen::Catalog,
            selected: None,
            filter: CategoryFilter::All,
            cart_open: false,
            scroll_reset: false,
        }
    }

    // -- queries ------------------------------------------------------------

    /// Shared handle to the catalog, so callers can hold products while
    /// mutating the storefront.
    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.cart.subtotal()
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    #[must_use]
    pub fn is_cart_open(&self) -> bool {
        self.cart_open
    }

    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        visible_products(&self.catalog, self.filter)
    }

    #[must_use]
    pub fn categories(&self) -> Vec<CategoryFilter> {
        self.catalog.categories()
    }

    /// Returns `true` once after every screen transition, then `false` until
    /// the next one. Renderers use it to jump back to the top of the page.
    pub fn take_scroll_reset(&mut self) -> bool {
        std::mem::take(&mut self.scroll_reset)
    }

    // -- cart ---------------------------------------------------------------

    /// Adds one unit of `product` and opens the cart panel.
    pub fn add_to_cart(&mut self, product: &Product) {
        self.cart.add(product);
        self.cart_open = true;
        tracing::debug!(
            product_id = %product.id,
            items = self.cart.item_count(),
            "added to cart"
        );
    }

    pub fn update_quantity(&mut self, product_id: &str, delta: i64) {
        let changed = self.cart.update_quantity(product_id, delta);
        tracing::debug!(product_id, delta, changed, "update quantity");
    }

    pub fn remove_item(&mut self, product_id: &str) {
        let removed = self.cart.remove(product_id);
        tracing::debug!(product_id, removed, "remove item");
    }

    pub fn open_cart(&mut self) {
        self.cart_open = true;
    }

    pub fn close_cart(&mut self) {
        self.cart_open = false;
    }

    // -- navigation ---------------------------------------------------------

    pub fn set_category_filter(&mut self, filter: CategoryFilter) {
        self.filter = filter;
    }

    pub fn select_product(&mut self, product: &Product) {
        self.selected = Some(product.clone());
        self.go_to(Screen::ProductDetail);
    }

    /// Product detail and checkout go back to the catalog; payment goes back
    /// to checkout. Does nothing on the catalog screen.
    pub fn navigate_back(&mut self) {
        match self.screen {
            Screen::Catalog => {}
            Screen::ProductDetail | Screen::Checkout => {
                self.selected = None;
                self.go_to(Screen::Catalog);
            }
            Screen::Payment => self.go_to(Screen::Checkout),
        }
    }

    /// Closes the cart panel and shows checkout. Checkout renders its own
    /// empty-cart notice, so an empty cart does not block the transition.
    pub fn proceed_to_checkout(&mut self) {
        self.cart_open = false;
        self.go_to(Screen::Checkout);
    }

    /// Shipping details are validated by the checkout form before this is called.
    pub fn proceed_to_payment(&mut self) {
        self.go_to(Screen::Payment);
    }

    /// Completes an order handed off to WhatsApp.
    pub fn place_order(&mut self) -> OrderReceipt {
        self.finish_order(OrderChannel::WhatsApp)
    }

    /// Completes an order paid through the card flow.
    pub fn complete_payment(&mut self) -> OrderReceipt {
        self.finish_order(OrderChannel::Card)
    }

    fn finish_order(&mut self, channel: OrderChannel) -> OrderReceipt {
        let receipt = OrderReceipt::new(channel, self.cart.take());
        self.selected = None;
        self.go_to(Screen::Catalog);
        tracing::info!(
            order_id = %receipt.id,
            %channel,
            items = receipt.item_count(),
            total = %receipt.total,
            "order completed"
        );
        receipt
    }

    fn go_to(&mut self, screen: Screen) {
        if self.screen != screen {
            tracing::debug!(from = %self.screen, to = %screen, "screen transition");
        }
        self.screen = screen;
        self.scroll_reset = true;
    }
}

#[cfg(test)]
#[path = "storefront_test.rs"]
mod tests;
