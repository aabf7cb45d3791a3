use rust_decimal::Decimal;

use super::*;
use crate::catalog::Category;

fn products() -> (Product, Product) {
    let catalog = crate::catalog::builtin_catalog();
    (
        catalog.get("p1").cloned().unwrap(),
        catalog.get("p2").cloned().unwrap(),
    )
}

fn cart_lines(store: &Storefront) -> Vec<(String, u32)> {
    store
        .cart()
        .entries()
        .iter()
        .map(|e| (e.product.id.clone(), e.quantity))
        .collect()
}

#[test]
fn starts_on_empty_catalog() {
    let store = Storefront::default();
    assert_eq!(store.screen(), Screen::Catalog);
    assert!(store.cart().is_empty());
    assert!(store.selected().is_none());
    assert_eq!(store.filter(), CategoryFilter::All);
    assert!(!store.is_cart_open());
}

#[test]
fn add_sequence_merges_entries_and_totals() {
    let (p1, p2) = products();
    let mut store = Storefront::default();
    store.add_to_cart(&p1);
    store.add_to_cart(&p2);
    store.add_to_cart(&p1);

    assert_eq!(
        cart_lines(&store),
        vec![("p1".to_string(), 2), ("p2".to_string(), 1)]
    );
    assert_eq!(store.item_count(), 3);
    assert_eq!(store.subtotal(), Decimal::new(284_000, 2));
}

#[test]
fn add_never_duplicates_entries() {
    let (p1, p2) = products();
    let mut store = Storefront::default();
    for product in [&p1, &p2, &p2, &p1, &p1, &p2, &p1] {
        store.add_to_cart(product);
    }
    let lines = cart_lines(&store);
    assert_eq!(lines.len(), 2);
    let quantity_sum: u64 = lines.iter().map(|(_, q)| u64::from(*q)).sum();
    assert_eq!(store.item_count(), quantity_sum);
    assert_eq!(store.item_count(), 7);
}

#[test]
fn re_add_keeps_entry_position() {
    let (p1, p2) = products();
    let mut store = Storefront::default();
    store.add_to_cart(&p1);
    store.add_to_cart(&p2);
    store.add_to_cart(&p1);
    assert_eq!(store.cart().entries()[0].product.id, "p1");
    assert_eq!(store.cart().entries()[0].quantity, 2);
}

#[test]
fn add_opens_cart_panel() {
    let (p1, _) = products();
    let mut store = Storefront::default();
    store.add_to_cart(&p1);
    assert!(store.is_cart_open());
    store.close_cart();
    assert!(!store.is_cart_open());
    store.add_to_cart(&p1);
    assert!(store.is_cart_open());
}

#[test]
fn decrement_floors_at_one() {
    let (p1, _) = products();
    let mut store = Storefront::default();
    store.add_to_cart(&p1);
    store.update_quantity("p1", -1);
    assert_eq!(cart_lines(&store), vec![("p1".to_string(), 1)]);

    store.update_quantity("p1", 1);
    store.update_quantity("p1", 1);
    assert_eq!(store.cart().get("p1").unwrap().quantity, 3);
    store.update_quantity("p1", -1);
    assert_eq!(store.cart().get("p1").unwrap().quantity, 2);
}

#[test]
fn update_quantity_for_missing_product_is_noop() {
    let (p1, _) = products();
    let mut store = Storefront::default();
    store.add_to_cart(&p1);
    store.update_quantity("p2", 3);
    assert_eq!(cart_lines(&store), vec![("p1".to_string(), 1)]);
}

#[test]
fn remove_then_add_appends_at_end_with_quantity_one() {
    let (p1, p2) = products();
    let mut store = Storefront::default();
    store.add_to_cart(&p1);
    store.add_to_cart(&p1);
    store.add_to_cart(&p2);

    store.remove_item("p1");
    store.add_to_cart(&p1);

    assert_eq!(
        cart_lines(&store),
        vec![("p2".to_string(), 1), ("p1".to_string(), 1)]
    );
}

#[test]
fn remove_missing_item_is_noop() {
    let (p1, _) = products();
    let mut store = Storefront::default();
    store.add_to_cart(&p1);
    store.remove_item("p9");
    assert_eq!(store.item_count(), 1);
}

#[test]
fn subtotal_reads_are_idempotent() {
    let (p1, p2) = products();
    let mut store = Storefront::default();
    store.add_to_cart(&p1);
    store.add_to_cart(&p2);
    store.add_to_cart(&p2);

    let expected: Decimal = store
        .cart()
        .entries()
        .iter()
        .map(|e| e.product.price * Decimal::from(e.quantity))
        .sum();
    assert_eq!(store.subtotal(), expected);
    assert_eq!(store.subtotal(), store.subtotal());
    assert_eq!(store.subtotal(), Decimal::new(208_000, 2));
}

#[test]
fn select_then_back_clears_selection() {
    let (_, p2) = products();
    let mut store = Storefront::default();
    store.select_product(&p2);
    assert_eq!(store.screen(), Screen::ProductDetail);
    assert_eq!(store.selected().map(|p| p.id.as_str()), Some("p2"));

    store.navigate_back();
    assert_eq!(store.screen(), Screen::Catalog);
    assert!(store.selected().is_none());
}

#[test]
fn back_from_catalog_does_nothing() {
    let mut store = Storefront::default();
    store.navigate_back();
    assert_eq!(store.screen(), Screen::Catalog);
    assert!(!store.take_scroll_reset());
}

#[test]
fn checkout_closes_cart_panel_even_when_empty() {
    let mut store = Storefront::default();
    store.open_cart();
    store.proceed_to_checkout();
    assert_eq!(store.screen(), Screen::Checkout);
    assert!(!store.is_cart_open());
}

#[test]
fn detail_add_then_checkout_path() {
    let (p1, _) = products();
    let mut store = Storefront::default();
    store.select_product(&p1);
    store.add_to_cart(&p1);
    assert_eq!(store.screen(), Screen::ProductDetail);
    assert!(store.is_cart_open());

    store.proceed_to_checkout();
    assert_eq!(store.screen(), Screen::Checkout);
    assert!(!store.is_cart_open());
}

#[test]
fn back_from_checkout_returns_to_catalog() {
    let mut store = Storefront::default();
    store.proceed_to_checkout();
    store.navigate_back();
    assert_eq!(store.screen(), Screen::Catalog);
}

#[test]
fn back_from_payment_returns_to_checkout() {
    let (p1, _) = products();
    let mut store = Storefront::default();
    store.add_to_cart(&p1);
    store.proceed_to_checkout();
    store.proceed_to_payment();
    assert_eq!(store.screen(), Screen::Payment);

    store.navigate_back();
    assert_eq!(store.screen(), Screen::Checkout);
    assert_eq!(store.item_count(), 1);
}

#[test]
fn payment_completion_clears_cart_and_returns_to_catalog() {
    let (p1, p2) = products();
    let mut store = Storefront::default();
    store.add_to_cart(&p1);
    store.add_to_cart(&p2);
    store.proceed_to_checkout();
    store.proceed_to_payment();

    let receipt = store.complete_payment();

    assert!(store.cart().is_empty());
    assert_eq!(store.screen(), Screen::Catalog);
    assert_eq!(receipt.channel, OrderChannel::Card);
    assert_eq!(receipt.total, Decimal::new(164_000, 2));
    assert_eq!(receipt.item_count(), 2);
}

#[test]
fn place_order_clears_cart_and_returns_to_catalog() {
    let (p1, _) = products();
    let mut store = Storefront::default();
    store.add_to_cart(&p1);
    store.add_to_cart(&p1);
    store.proceed_to_checkout();

    let receipt = store.place_order();

    assert!(store.cart().is_empty());
    assert_eq!(store.item_count(), 0);
    assert_eq!(store.screen(), Screen::Catalog);
    assert_eq!(receipt.channel, OrderChannel::WhatsApp);
    assert_eq!(receipt.lines.len(), 1);
    assert_eq!(receipt.total, Decimal::new(240_000, 2));
}

#[test]
fn order_completion_with_empty_cart_still_resets() {
    let mut store = Storefront::default();
    store.proceed_to_checkout();
    let receipt = store.place_order();
    assert!(receipt.lines.is_empty());
    assert_eq!(receipt.total, Decimal::ZERO);
    assert_eq!(store.screen(), Screen::Catalog);
}

#[test]
fn receipts_get_distinct_ids() {
    let mut store = Storefront::default();
    let first = store.place_order();
    let second = store.complete_payment();
    assert_ne!(first.id, second.id);
}

#[test]
fn category_filter_drives_visible_products() {
    let mut store = Storefront::default();
    assert_eq!(store.visible_products().len(), 2);

    store.set_category_filter(CategoryFilter::Only(Category::Tea));
    assert!(store.visible_products().is_empty());

    store.set_category_filter(CategoryFilter::Only(Category::Supplement));
    let ids: Vec<&str> = store
        .visible_products()
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["p1", "p2"]);
}

#[test]
fn filter_does_not_trigger_scroll_reset() {
    let mut store = Storefront::default();
    store.set_category_filter(CategoryFilter::Only(Category::Oil));
    assert!(!store.take_scroll_reset());
}

#[test]
fn scroll_reset_fires_once_per_transition() {
    let (p1, _) = products();
    let mut store = Storefront::default();
    store.select_product(&p1);
    assert!(store.take_scroll_reset());
    assert!(!store.take_scroll_reset());

    store.navigate_back();
    assert!(store.take_scroll_reset());
}

#[test]
fn catalog_handle_outlives_mutation() {
    let mut store = Storefront::default();
    let catalog = store.catalog();
    let product = catalog.get("p2").unwrap();
    store.add_to_cart(product);
    store.select_product(product);
    assert_eq!(store.item_count(), 1);
}
