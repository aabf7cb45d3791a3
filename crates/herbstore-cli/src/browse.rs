//! One-shot catalog commands: `catalog` and `show`.

use std::io::Write;

use herbstore_core::{visible_products, Catalog, CategoryFilter, Gallery};

use crate::shop::render;

pub(crate) fn run_catalog(
    catalog: &Catalog,
    filter: CategoryFilter,
    json: bool,
    currency: &str,
) -> anyhow::Result<()> {
    let products = visible_products(catalog, filter);
    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &products)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", render::product_list(&products, currency))?;
    }
    Ok(())
}

pub(crate) fn run_show(
    catalog: &Catalog,
    id: &str,
    json: bool,
    currency: &str,
) -> anyhow::Result<()> {
    let product = catalog
        .get(id)
        .ok_or_else(|| anyhow::anyhow!("product '{id}' not found"))?;

    let mut out = std::io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut out, product)?;
        writeln!(out)?;
    } else {
        let gallery = Gallery::new(product);
        write!(out, "{}", render::detail_screen(product, &gallery, currency))?;
    }
    Ok(())
}
