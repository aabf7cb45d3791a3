pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod gallery;
pub mod handoff;
pub mod payment;
pub mod receipt;
pub mod storefront;

pub use app_config::AppConfig;
pub use cart::{Cart, CartEntry};
pub use catalog::{
    builtin_catalog, load_catalog, visible_products, Catalog, Category, CategoryFilter, Product,
};
pub use checkout::{ShippingDetails, ShippingForm, DEFAULT_COUNTRY};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, FormError};
pub use gallery::Gallery;
pub use handoff::WhatsAppHandoff;
pub use payment::{CardDetails, CardForm, PaymentPhase};
pub use receipt::{OrderChannel, OrderReceipt};
pub use storefront::{Screen, Storefront};
