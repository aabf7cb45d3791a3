use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Tea,
    Oil,
    Salve,
    Supplement,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Tea,
        Category::Oil,
        Category::Salve,
        Category::Supplement,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Tea => write!(f, "Tea"),
            Category::Oil => write!(f, "Oil"),
            Category::Salve => write!(f, "Salve"),
            Category::Supplement => write!(f, "Supplement"),
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

/// The catalog's category filter: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    #[must_use]
    pub fn matches(self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => product.category == category,
        }
    }
}

impl std::fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CategoryFilter::All => write!(f, "All"),
            CategoryFilter::Only(category) => write!(f, "{category}"),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            s.parse().map(CategoryFilter::Only)
        }
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

/// A purchasable catalog item. Never mutated after the catalog is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub price: Decimal,
    /// One-line summary shown on the catalog card.
    pub description: String,
    pub long_description: String,
    /// Gallery images, in display order. The first one is the thumbnail.
    pub images: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub usage: String,
}

impl Product {
    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub products: Vec<Product>,
}

impl Catalog {
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Filter buttons for the catalog screen: `All`, then every category
    /// present in the catalog in first-seen order.
    #[must_use]
    pub fn categories(&self) -> Vec<CategoryFilter> {
        let mut seen = HashSet::new();
        let mut filters = vec![CategoryFilter::All];
        for product in &self.products {
            if seen.insert(product.category) {
                filters.push(CategoryFilter::Only(product.category));
            }
        }
        filters
    }
}

/// Products visible under `filter`, in catalog order.
#[must_use]
pub fn visible_products(catalog: &Catalog, filter: CategoryFilter) -> Vec<&Product> {
    catalog
        .products
        .iter()
        .filter(|p| filter.matches(p))
        .collect()
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Catalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let catalog: Catalog = serde_yaml::from_str(&content)?;
    validate_catalog(&catalog)?;

    tracing::info!(
        path = %path.display(),
        products = catalog.products.len(),
        "loaded catalog file"
    );
    Ok(catalog)
}

/// Highest unit price a catalog file may carry.
fn max_price() -> Decimal {
    Decimal::new(10_000_000, 0)
}

fn validate_catalog(catalog: &Catalog) -> Result<(), ConfigError> {
    if catalog.products.is_empty() {
        return Err(ConfigError::Validation(
            "catalog must contain at least one product".to_string(),
        ));
    }

    let mut seen_ids = HashSet::new();
    for product in &catalog.products {
        if product.id.trim().is_empty() {
            return Err(ConfigError::Validation(
                "product id must be non-empty".to_string(),
            ));
        }
        if product.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "product '{}' has an empty name",
                product.id
            )));
        }
        if product.price.is_sign_negative() {
            return Err(ConfigError::Validation(format!(
                "product '{}' has negative price {}",
                product.id, product.price
            )));
        }
        if product.price > max_price() {
            return Err(ConfigError::Validation(format!(
                "product '{}' price {} exceeds the maximum of {}",
                product.id,
                product.price,
                max_price()
            )));
        }
        if product.images.is_empty() {
            return Err(ConfigError::Validation(format!(
                "product '{}' must have at least one image",
                product.id
            )));
        }
        if !seen_ids.insert(product.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate product id: '{}'",
                product.id
            )));
        }
    }

    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// The shop's compiled-in catalog.
#[must_use]
pub fn builtin_catalog() -> Catalog {
    const CDN: &str = "https://res.cloudinary.com/ditsmq3r6/image/upload";

    let success_plus = Product {
        id: "p1".to_string(),
        name: "SUCCESS PLUS".to_string(),
        category: Category::Supplement,
        price: Decimal::new(120_000, 2),
        description: "A natural, herbal supplement designed to support vitality, stamina, \
                      and overall wellbeing."
            .to_string(),
        long_description: "Success Plus is a premium herbal formulation derived from the potent \
            Mucuna Pruriens bean. Traditionally known as \"Velvet Bean\", this adaptogen has been \
            used in Ayurveda for centuries to revitalize the reproductive system, enhance mood \
            through dopamine support, and boost physical stamina. Our organic sourcing ensures \
            that you receive the purest form of this revitalizing herb, free from synthetic \
            additives. It acts as a restorative tonic for the nervous system and helps combat \
            the effects of stress."
            .to_string(),
        images: vec![
            format!("{CDN}/v1764411187/Screenshot_2025-11-29-14-20-30-05_40deb401b9ffe8e1df2f1cc5ba480b12_py96a5.jpg"),
            format!("{CDN}/v1764411188/81VjYM0QcnL_e0bncv.jpg"),
            format!("{CDN}/v1764411188/91VQG0kITFL_lmxfcj.jpg"),
            format!("{CDN}/v1764411188/91KU_bG_buL_j5sjrj.jpg"),
        ],
        benefits: strings(&["Vitality", "Stamina", "Overall Wellbeing", "Mucuna Pruriens"]),
        ingredients: strings(&[
            "Organic Mucuna Pruriens Extract",
            "Ashwagandha Root",
            "Shilajit Resin",
            "Safed Musli",
            "Natural Excipients",
        ]),
        usage: "Mix 1 teaspoon (approx. 5g) of powder with warm milk or water. Consume once \
                daily, preferably 30 minutes before bedtime. For optimal results, use \
                consistently for 90 days alongside a balanced diet."
            .to_string(),
    };

    let herbal_queen = Product {
        id: "p2".to_string(),
        name: "Herbal Queen".to_string(),
        category: Category::Supplement,
        price: Decimal::new(44_000, 2),
        description: "Herbal Queen Garcinia Cambogia Essence – Natural Weight Loss Support \
                      without any diet & exercise."
            .to_string(),
        long_description: "Herbal Queen is a concentrated essence of Garcinia Cambogia, a \
            tropical fruit known for its ability to block the body's ability to make fat and put \
            the brakes on your appetite. This liquid formula is designed for rapid absorption, \
            providing immediate support for your weight management goals without the need for \
            harsh stimulants. It supports healthy metabolism, helps curb cravings naturally, and \
            promotes a feeling of fullness."
            .to_string(),
        images: vec![
            format!("{CDN}/v1764412554/2_20251129_160457_0001_sxqqup.jpg"),
            format!("{CDN}/v1764412554/3_20251129_160458_0002_pw3xto.jpg"),
            format!("{CDN}/v1764412555/4_20251129_160458_0003_qswopz.jpg"),
            format!("{CDN}/v1764412555/1_20251129_160457_0000_kdgvqr.jpg"),
        ],
        benefits: strings(&["Weight Loss", "Garcinia Cambogia", "100% Herbal", "Safe & Effective"]),
        ingredients: strings(&[
            "Pure Garcinia Cambogia Essence (60% HCA)",
            "Green Coffee Bean Extract",
            "Purified Water",
            "Lemon Essence",
            "Natural Preservatives",
        ]),
        usage: "Add 15 drops (approx. 5ml) to a glass of warm water. Drink on an empty stomach \
                first thing in the morning. Wait at least 30 minutes before eating breakfast to \
                allow for full absorption."
            .to_string(),
    };

    Catalog {
        products: vec![success_plus, herbal_queen],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_temp_catalog(name: &str, yaml: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "herbstore-catalog-{}-{name}.yaml",
            std::process::id()
        ));
        std::fs::write(&path, yaml).expect("failed to write temp catalog");
        path
    }

    fn product(id: &str, category: Category) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {id}"),
            category,
            price: Decimal::new(1000, 2),
            description: String::new(),
            long_description: String::new(),
            images: vec!["https://example.com/a.jpg".to_string()],
            benefits: vec![],
            ingredients: vec![],
            usage: String::new(),
        }
    }

    #[test]
    fn builtin_catalog_has_the_two_supplements() {
        let catalog = builtin_catalog();
        let ids: Vec<&str> = catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2"]);
        assert_eq!(catalog.get("p1").unwrap().price, Decimal::new(120_000, 2));
        assert_eq!(catalog.get("p2").unwrap().price, Decimal::new(44_000, 2));
        assert!(validate_catalog(&catalog).is_ok());
    }

    #[test]
    fn filter_all_returns_full_catalog_in_order() {
        let catalog = builtin_catalog();
        let visible = visible_products(&catalog, CategoryFilter::All);
        let expected: Vec<&Product> = catalog.products().iter().collect();
        assert_eq!(visible, expected);
    }

    #[test]
    fn filter_supplement_returns_both_products() {
        let catalog = builtin_catalog();
        let visible = visible_products(&catalog, CategoryFilter::Only(Category::Supplement));
        assert_eq!(visible.len(), 2);
    }

    #[test]
    fn filter_tea_returns_nothing() {
        let catalog = builtin_catalog();
        assert!(visible_products(&catalog, Category::Tea.into()).is_empty());
    }

    #[test]
    fn filter_preserves_catalog_order_for_mixed_categories() {
        let catalog = Catalog {
            products: vec![
                product("a", Category::Oil),
                product("b", Category::Tea),
                product("c", Category::Oil),
            ],
        };
        let ids: Vec<&str> = visible_products(&catalog, Category::Oil.into())
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn categories_lists_all_then_first_seen() {
        let catalog = Catalog {
            products: vec![
                product("a", Category::Salve),
                product("b", Category::Tea),
                product("c", Category::Salve),
            ],
        };
        assert_eq!(
            catalog.categories(),
            vec![
                CategoryFilter::All,
                CategoryFilter::Only(Category::Salve),
                CategoryFilter::Only(Category::Tea),
            ]
        );
        assert_eq!(
            builtin_catalog().categories(),
            vec![CategoryFilter::All, CategoryFilter::Only(Category::Supplement)]
        );
    }

    #[test]
    fn category_filter_parses_case_insensitively() {
        assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(
            "supplement".parse::<CategoryFilter>(),
            Ok(CategoryFilter::Only(Category::Supplement))
        );
        assert!("Tinctures".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::Only(Category::Oil).to_string(), "Oil");
    }

    #[test]
    fn load_catalog_reads_valid_yaml() {
        let path = write_temp_catalog(
            "valid",
            r#"
products:
  - id: t1
    name: Tulsi Tea
    category: Tea
    price: "150.50"
    description: Holy basil tea.
    long_description: Loose-leaf tulsi.
    images: ["https://example.com/tulsi.jpg"]
"#,
        );
        let catalog = load_catalog(&path).expect("expected catalog to load");
        std::fs::remove_file(&path).ok();

        let tea = catalog.get("t1").unwrap();
        assert_eq!(tea.category, Category::Tea);
        assert_eq!(tea.price, Decimal::new(15_050, 2));
        assert!(tea.benefits.is_empty());
        assert_eq!(tea.thumbnail(), Some("https://example.com/tulsi.jpg"));
    }

    #[test]
    fn load_catalog_missing_file_is_io_error() {
        let result = load_catalog(Path::new("/nonexistent/herbstore/catalog.yaml"));
        assert!(matches!(result, Err(ConfigError::CatalogFileIo { .. })));
    }

    #[test]
    fn load_catalog_rejects_unknown_category() {
        let path = write_temp_catalog(
            "bad-category",
            r#"
products:
  - id: x
    name: X
    category: Tincture
    price: "1.00"
    description: ""
    long_description: ""
    images: ["a.jpg"]
"#,
        );
        let result = load_catalog(&path);
        std::fs::remove_file(&path).ok();
        assert!(matches!(result, Err(ConfigError::CatalogFileParse(_))));
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let catalog = Catalog {
            products: vec![product("a", Category::Oil), product("a", Category::Tea)],
        };
        let err = validate_catalog(&catalog).unwrap_err();
        assert!(err.to_string().contains("duplicate product id"));
    }

    #[test]
    fn validate_rejects_product_without_images() {
        let mut p = product("a", Category::Oil);
        p.images.clear();
        let err = validate_catalog(&Catalog { products: vec![p] }).unwrap_err();
        assert!(err.to_string().contains("at least one image"));
    }

    #[test]
    fn validate_rejects_negative_price() {
        let mut p = product("a", Category::Oil);
        p.price = Decimal::new(-1, 0);
        assert!(validate_catalog(&Catalog { products: vec![p] }).is_err());
    }

    #[test]
    fn validate_rejects_price_above_maximum() {
        let mut p = product("a", Category::Oil);
        p.price = Decimal::MAX;
        let err = validate_catalog(&Catalog { products: vec![p] }).unwrap_err();
        assert!(err.to_string().contains("exceeds the maximum"));

        let mut p = product("b", Category::Oil);
        p.price = max_price();
        assert!(validate_catalog(&Catalog { products: vec![p] }).is_ok());
    }

    #[test]
    fn validate_rejects_empty_catalog() {
        assert!(validate_catalog(&Catalog { products: vec![] }).is_err());
    }

    #[test]
    fn product_serializes_price_as_string() {
        let catalog = builtin_catalog();
        let json = serde_json::to_value(catalog.get("p2").unwrap()).unwrap();
        assert_eq!(json["price"], "440.00");
        assert_eq!(json["category"], "Supplement");
    }
}
