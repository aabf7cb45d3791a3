//! Plain-text screens. Every function returns the full text so callers decide
//! where it goes.

use std::fmt::Write;

use herbstore_core::{Gallery, OrderReceipt, PaymentPhase, Product, Screen, Storefront};
use rust_decimal::Decimal;

pub(crate) fn money(currency: &str, amount: Decimal) -> String {
    format!("{currency}{:.2}", amount.round_dp(2))
}

fn rule(title: &str) -> String {
    format!("== {title} ==\n")
}

pub(crate) fn product_list(products: &[&Product], currency: &str) -> String {
    if products.is_empty() {
        return "No products in this category.\n".to_string();
    }
    let mut out = String::new();
    for product in products {
        let _ = writeln!(
            out,
            "  {:<4} {}  ({})  {}",
            product.id,
            product.name,
            product.category,
            money(currency, product.price)
        );
        let _ = writeln!(out, "       {}", product.description);
    }
    out
}

pub(crate) fn catalog_screen(store: &Storefront, currency: &str) -> String {
    let mut out = rule("Our Collection");
    let buttons: Vec<String> = store
        .categories()
        .into_iter()
        .map(|f| {
            if f == store.filter() {
                format!("[{f}]")
            } else {
                f.to_string()
            }
        })
        .collect();
    let _ = writeln!(out, "Filter: {}", buttons.join("  "));
    out.push_str(&product_list(&store.visible_products(), currency));
    out
}

pub(crate) fn detail_screen(product: &Product, gallery: &Gallery<'_>, currency: &str) -> String {
    let mut out = rule(&product.name);
    let _ = writeln!(
        out,
        "{} | {}",
        product.category,
        money(currency, product.price)
    );
    if let Some(image) = gallery.current() {
        let (n, total) = gallery.position();
        let _ = writeln!(out, "Image {n} / {total}: {image}");
    }
    let _ = writeln!(out, "\n{}", product.long_description);

    if !product.benefits.is_empty() {
        let _ = writeln!(out, "\nBenefits: {}", product.benefits.join(", "));
    }
    if !product.ingredients.is_empty() {
        out.push_str("\nIngredients:\n");
        for ingredient in &product.ingredients {
            let _ = writeln!(out, "  - {ingredient}");
        }
    }
    if !product.usage.is_empty() {
        let _ = writeln!(out, "\nHow to use: {}", product.usage);
    }
    out
}

pub(crate) fn cart_panel(store: &Storefront, currency: &str) -> String {
    let mut out = rule(&format!("Your Cart ({} items)", store.item_count()));
    if store.cart().is_empty() {
        out.push_str("Your cart is empty.\n");
        return out;
    }
    for entry in store.cart().entries() {
        let _ = writeln!(
            out,
            "  {:<4} {}  x{}  {}",
            entry.product_id(),
            entry.product.name,
            entry.quantity,
            money(currency, entry.line_total())
        );
    }
    let _ = writeln!(out, "Subtotal: {}", money(currency, store.subtotal()));
    out.push_str("Type 'checkout' to continue.\n");
    out
}

pub(crate) fn checkout_screen(store: &Storefront, currency: &str) -> String {
    let mut out = rule("Secure Checkout");
    if store.cart().is_empty() {
        out.push_str("Your cart is empty. Type 'back' to return to the shop.\n");
        return out;
    }
    out.push_str("Order Summary:\n");
    for entry in store.cart().entries() {
        let _ = writeln!(
            out,
            "  {}  Qty: {}  {}",
            entry.product.name,
            entry.quantity,
            money(currency, entry.line_total())
        );
    }
    let total = money(currency, store.subtotal());
    let _ = writeln!(out, "Subtotal: {total}");
    out.push_str("Shipping: Free\n");
    let _ = writeln!(out, "Total: {total}");
    out.push_str("\nType 'whatsapp' to order via WhatsApp, or 'ship' to enter shipping details.\n");
    out
}

pub(crate) fn payment_screen(phase: PaymentPhase, total: Decimal, currency: &str) -> String {
    match phase {
        PaymentPhase::Form => {
            let mut out = rule("Secure Payment");
            let _ = writeln!(out, "Total Amount to Pay: {}", money(currency, total));
            out.push_str("Type 'pay' to enter card details, or 'back' to edit shipping.\n");
            out
        }
        PaymentPhase::Processing => {
            "Processing Payment... Please do not close this window. ('back' cancels)\n".to_string()
        }
        PaymentPhase::Success => "Payment Successful! Redirecting to shop...\n".to_string(),
    }
}

pub(crate) fn receipt(receipt: &OrderReceipt, currency: &str) -> String {
    let mut out = rule("Order Placed");
    let _ = writeln!(out, "Order {} via {}", receipt.id, receipt.channel);
    let _ = writeln!(
        out,
        "{} items, total {}",
        receipt.item_count(),
        money(currency, receipt.total)
    );
    out
}

pub(crate) fn screen(store: &Storefront, image_index: usize, currency: &str) -> String {
    match store.screen() {
        Screen::Catalog => catalog_screen(store, currency),
        Screen::ProductDetail => match store.selected() {
            Some(product) => {
                let mut gallery = Gallery::new(product);
                gallery.select(image_index);
                detail_screen(product, &gallery, currency)
            }
            None => catalog_screen(store, currency),
        },
        Screen::Checkout => checkout_screen(store, currency),
        Screen::Payment => payment_screen(PaymentPhase::Form, store.subtotal(), currency),
    }
}
