use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// YAML catalog replacing the built-in one. `None` uses [`crate::builtin_catalog`].
    pub catalog_path: Option<PathBuf>,
    pub store_name: String,
    pub currency_symbol: String,
    /// International number without `+`, as `wa.me` expects it.
    pub whatsapp_number: String,
    pub payment_processing_ms: u64,
    pub payment_success_ms: u64,
}

impl AppConfig {
    #[must_use]
    pub fn payment_processing_delay(&self) -> Duration {
        Duration::from_millis(self.payment_processing_ms)
    }

    #[must_use]
    pub fn payment_success_delay(&self) -> Duration {
        Duration::from_millis(self.payment_success_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            catalog_path: None,
            store_name: "JJ Herbals".to_string(),
            currency_symbol: "₹".to_string(),
            whatsapp_number: "919656614930".to_string(),
            payment_processing_ms: 2000,
            payment_success_ms: 2000,
        }
    }
}
