use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::cart::{total_of, CartEntry};

/// How an order left the storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderChannel {
    /// Handed off to a WhatsApp chat; no confirmation comes back.
    WhatsApp,
    /// Paid through the simulated card flow.
    Card,
}

impl std::fmt::Display for OrderChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderChannel::WhatsApp => write!(f, "whatsapp"),
            OrderChannel::Card => write!(f, "card"),
        }
    }
}

/// Confirmation data for a completed order. The storefront keeps no copy.
#[derive(Debug, Clone, Serialize)]
pub struct OrderReceipt {
    pub id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub channel: OrderChannel,
    pub lines: Vec<CartEntry>,
    pub total: Decimal,
}

impl OrderReceipt {
    pub(crate) fn new(channel: OrderChannel, lines: Vec<CartEntry>) -> Self {
        let total = total_of(&lines);
        Self {
            id: Uuid::new_v4(),
            placed_at: Utc::now(),
            channel,
            lines,
            total,
        }
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}
