//! Order handoff to a WhatsApp chat.
//!
//! The storefront builds a `wa.me` link carrying a plain-text order summary.
//! Whether the chat ever becomes an order is unknown to the storefront.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::app_config::AppConfig;
use crate::cart::Cart;

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhatsAppHandoff {
    /// Digits only, country code first.
    pub phone_number: String,
    pub store_name: String,
    pub currency_symbol: String,
}

impl WhatsAppHandoff {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            phone_number: config.whatsapp_number.clone(),
            store_name: config.store_name.clone(),
            currency_symbol: config.currency_symbol.clone(),
        }
    }

    /// The chat message listing every cart line and the total.
    #[must_use]
    pub fn message(&self, cart: &Cart) -> String {
        let items = cart
            .entries()
            .iter()
            .map(|e| format!("• {} (Qty: {})", e.product.name, e.quantity))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Hello, I would like to place an order via {} App:\n\n{items}\n\nTotal Amount: {}{:.2}\n\nPlease confirm my order.",
            self.store_name,
            self.currency_symbol,
            cart.subtotal().round_dp(2),
        )
    }

    /// `https://wa.me/<phone>?text=<message>` for the current cart.
    #[must_use]
    pub fn order_url(&self, cart: &Cart) -> String {
        let message = self.message(cart);
        let text = utf8_percent_encode(&message, URI_COMPONENT);
        format!("https://wa.me/{}?text={text}", self.phone_number)
    }
}

impl Default for WhatsAppHandoff {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}
