use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::FormError;

/// Shipping is domestic only; the form shows this read-only.
pub const DEFAULT_COUNTRY: &str = "India";

/// Same shape the browser's `type="email"` input accepts.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid regex")
});

/// In-progress shipping form on the checkout screen.
///
/// Nothing here reaches the storefront until [`ShippingForm::submit`] succeeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingForm {
    pub full_name: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub pincode: String,
}

/// A submitted shipping form. All fields are trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingDetails {
    pub full_name: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub district: String,
    pub state: String,
    pub country: String,
    pub pincode: String,
}

fn required(field: &'static str, value: &str) -> Result<String, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FormError::Required { field });
    }
    Ok(trimmed.to_string())
}

impl ShippingForm {
    /// Checks the form in display order and returns the first problem found.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Required`] for a blank field, or
    /// [`FormError::Invalid`] for a malformed email address.
    pub fn submit(&self) -> Result<ShippingDetails, FormError> {
        let full_name = required("Full Name", &self.full_name)?;
        let mobile = required("Mobile Number", &self.mobile)?;
        let email = required("Email ID", &self.email)?;
        if !EMAIL_RE.is_match(&email) {
            return Err(FormError::Invalid {
                field: "Email ID",
                reason: "expected an address like name@example.com",
            });
        }
        let address = required("Full Address", &self.address)?;
        let city = required("City", &self.city)?;
        let district = required("District", &self.district)?;
        let state = required("State", &self.state)?;
        let pincode = required("Pincode", &self.pincode)?;

        Ok(ShippingDetails {
            full_name,
            mobile,
            email,
            address,
            city,
            district,
            state,
            country: DEFAULT_COUNTRY.to_string(),
            pincode,
        })
    }
}
