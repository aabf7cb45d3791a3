//! Card form and phase model for the simulated payment screen.
//!
//! The phases only ever move forward: `Form → Processing → Success`. There is
//! no failure branch; the timed driver lives in `herbstore-payment`.

use std::sync::LazyLock;

use regex::Regex;

use crate::FormError;

static CARD_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s]{13,19}$").expect("valid regex"));
static EXPIRY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])/?([0-9]{2})$").expect("valid regex"));
static CVV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3,4}$").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentPhase {
    #[default]
    Form,
    Processing,
    Success,
}

impl PaymentPhase {
    /// The phase that follows this one, or `None` once payment has succeeded.
    #[must_use]
    pub fn next(self) -> Option<PaymentPhase> {
        match self {
            PaymentPhase::Form => Some(PaymentPhase::Processing),
            PaymentPhase::Processing => Some(PaymentPhase::Success),
            PaymentPhase::Success => None,
        }
    }
}

impl std::fmt::Display for PaymentPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentPhase::Form => write!(f, "form"),
            PaymentPhase::Processing => write!(f, "processing"),
            PaymentPhase::Success => write!(f, "success"),
        }
    }
}

/// Raw card form input, exactly as typed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardForm {
    pub number: String,
    /// `MM/YY` or `MMYY`.
    pub expiry: String,
    pub cvv: String,
    pub holder: String,
}

impl std::fmt::Debug for CardForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardForm")
            .field("number", &"[redacted]")
            .field("expiry", &self.expiry)
            .field("cvv", &"[redacted]")
            .field("holder", &self.holder)
            .finish()
    }
}

/// Card input that passed the field patterns. Nothing is authorised.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    number: String,
    pub expiry_month: u8,
    pub expiry_year: u8,
    pub holder: String,
}

impl CardDetails {
    /// Last four digits of the card number, for display.
    #[must_use]
    pub fn last4(&self) -> &str {
        let start = self.number.len().saturating_sub(4);
        &self.number[start..]
    }
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("last4", &self.last4())
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("holder", &self.holder)
            .finish()
    }
}

impl CardForm {
    /// Pattern checks only: digit groups, `MM/YY`, 3–4 digit CVV and a
    /// holder name. No Luhn check.
    ///
    /// # Errors
    ///
    /// Returns the first failing field as a [`FormError`].
    pub fn validate(&self) -> Result<CardDetails, FormError> {
        if self.number.is_empty() {
            return Err(FormError::Required {
                field: "Card Number",
            });
        }
        if !CARD_NUMBER_RE.is_match(&self.number) {
            return Err(FormError::Invalid {
                field: "Card Number",
                reason: "expected 13 to 19 digits and spaces",
            });
        }

        if self.expiry.is_empty() {
            return Err(FormError::Required {
                field: "Expiry Date",
            });
        }
        let Some(caps) = EXPIRY_RE.captures(&self.expiry) else {
            return Err(FormError::Invalid {
                field: "Expiry Date",
                reason: "expected MM/YY",
            });
        };
        let (Ok(expiry_month), Ok(expiry_year)) = (caps[1].parse::<u8>(), caps[2].parse::<u8>())
        else {
            return Err(FormError::Invalid {
                field: "Expiry Date",
                reason: "expected MM/YY",
            });
        };

        if self.cvv.is_empty() {
            return Err(FormError::Required { field: "CVV" });
        }
        if !CVV_RE.is_match(&self.cvv) {
            return Err(FormError::Invalid {
                field: "CVV",
                reason: "expected 3 or 4 digits",
            });
        }

        let holder = self.holder.trim();
        if holder.is_empty() {
            return Err(FormError::Required {
                field: "Card Holder Name",
            });
        }

        Ok(CardDetails {
            number: self.number.chars().filter(char::is_ascii_digit).collect(),
            expiry_month,
            expiry_year,
            holder: holder.to_string(),
        })
    }
}
