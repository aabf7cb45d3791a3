//! `order-link`: build a WhatsApp order link without an interactive session.

use herbstore_core::{AppConfig, Catalog, Storefront, WhatsAppHandoff};

/// Parses `<id>` or `<id>=<quantity>`.
pub(crate) fn parse_item(raw: &str) -> Result<(String, u32), String> {
    let (id, quantity) = match raw.split_once('=') {
        Some((id, qty)) => {
            let qty = qty
                .trim()
                .parse::<u32>()
                .map_err(|e| format!("invalid quantity in '{raw}': {e}"))?;
            (id.trim(), qty)
        }
        None => (raw.trim(), 1),
    };

    if id.is_empty() {
        return Err(format!("missing product id in '{raw}'"));
    }
    if quantity == 0 {
        return Err(format!("quantity must be at least 1 in '{raw}'"));
    }
    Ok((id.to_string(), quantity))
}

/// Fills a fresh cart with `items` (repeated ids accumulate) and prints the link.
pub(crate) fn run_order_link(
    catalog: Catalog,
    items: &[(String, u32)],
    config: &AppConfig,
) -> anyhow::Result<()> {
    let store = build_cart(catalog, items)?;
    let handoff = WhatsAppHandoff::from_config(config);

    println!("{}", handoff.message(store.cart()));
    println!();
    println!("{}", handoff.order_url(store.cart()));
    Ok(())
}

pub(crate) fn build_cart(catalog: Catalog, items: &[(String, u32)]) -> anyhow::Result<Storefront> {
    let mut store = Storefront::new(catalog);
    let catalog = store.catalog();

    for (id, quantity) in items {
        let product = catalog
            .get(id)
            .ok_or_else(|| anyhow::anyhow!("product '{id}' not found"))?;
        store.add_to_cart(product);
        store.update_quantity(id, i64::from(*quantity) - 1);
    }

    tracing::debug!(
        lines = store.cart().entries().len(),
        items = store.item_count(),
        "order link cart built"
    );
    Ok(store)
}
