//! Shipping form validation and the order payload.
//!
//! A [`ShippingForm`] holds whatever the shopper typed. [`ShippingForm::validate`]
//! either returns a [`ShippingDetails`] whose every field passed its rule, or
//! a [`FieldErrors`] map with one message per failing field.
//!
//! Lengths are counted in UTF-16 code units, the unit browsers use for
//! `minlength`, and values are checked as entered (no trimming).

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::cart::{self, CartItem};
use crate::types::{Email, Price};

/// A shipping form field, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShippingField {
    Name,
    Email,
    Phone,
    Address,
    City,
    State,
    ZipCode,
}

impl ShippingField {
    /// All fields, in the order the form shows them.
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Email,
        Self::Phone,
        Self::Address,
        Self::City,
        Self::State,
        Self::ZipCode,
    ];

    /// Form input name.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Address => "address",
            Self::City => "city",
            Self::State => "state",
            Self::ZipCode => "zipCode",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Address",
            Self::City => "City",
            Self::State => "State",
            Self::ZipCode => "Zip code",
        }
    }

    /// Minimum length in UTF-16 code units. `None` for fields checked by format.
    #[must_use]
    pub const fn min_chars(self) -> Option<usize> {
        match self {
            Self::Name | Self::City | Self::State => Some(2),
            Self::Phone => Some(10),
            Self::Address | Self::ZipCode => Some(5),
            Self::Email => None,
        }
    }

    /// Message shown when the field fails validation.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Name => "Name must be at least 2 characters",
            Self::Email => "Invalid email address",
            Self::Phone => "Phone number must be at least 10 digits",
            Self::Address => "Address must be at least 5 characters",
            Self::City => "City must be at least 2 characters",
            Self::State => "State must be at least 2 characters",
            Self::ZipCode => "Zip code must be at least 5 characters",
        }
    }
}

/// Per-field validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ShippingField, &'static str>);

impl FieldErrors {
    /// Whether any field failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: ShippingField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Failing fields and their messages, in form order.
    pub fn iter(&self) -> impl Iterator<Item = (ShippingField, &'static str)> + '_ {
        self.0.iter().map(|(field, msg)| (*field, *msg))
    }

    fn insert(&mut self, field: ShippingField) {
        self.0.insert(field, field.message());
    }
}

/// Raw shipping form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShippingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl ShippingForm {
    /// Value currently entered for `field`.
    #[must_use]
    pub fn value(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::Name => &self.name,
            ShippingField::Email => &self.email,
            ShippingField::Phone => &self.phone,
            ShippingField::Address => &self.address,
            ShippingField::City => &self.city,
            ShippingField::State => &self.state,
            ShippingField::ZipCode => &self.zip_code,
        }
    }

    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the messages for all failing fields (not just the first).
    pub fn validate(self) -> Result<ShippingDetails, FieldErrors> {
        let mut errors = FieldErrors::default();

        for field in ShippingField::ALL {
            if let Some(min) = field.min_chars()
                && self.value(field).encode_utf16().count() < min
            {
                errors.insert(field);
            }
        }

        let email = Email::parse(&self.email);
        if email.is_err() {
            errors.insert(ShippingField::Email);
        }

        match email {
            Ok(email) if errors.is_empty() => Ok(ShippingDetails {
                name: self.name,
                email,
                phone: self.phone,
                address: self.address,
                city: self.city,
                state: self.state,
                zip_code: self.zip_code,
            }),
            _ => Err(errors),
        }
    }
}

/// A validated shipping record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub name: String,
    pub email: Email,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// An order built at checkout. Emitted once, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub customer: ShippingDetails,
    pub items: Vec<CartItem>,
    pub total_amount: Price,
}

impl Order {
    /// Build an order from a cart snapshot and the subtotal computed from it.
    #[must_use]
    pub fn new(customer: ShippingDetails, items: Vec<CartItem>, total_amount: Price) -> Self {
        Self {
            id: Uuid::new_v4(),
            placed_at: Utc::now(),
            customer,
            items,
            total_amount,
        }
    }

    /// Build an order, computing the total from `items`.
    #[must_use]
    pub fn from_items(customer: ShippingDetails, items: Vec<CartItem>) -> Self {
        let total = cart::subtotal(&items);
        Self::new(customer, items, total)
    }
}

/// Where the checkout form is in its lifecycle.
///
/// `Idle` → `Submitting` happens only for a valid form; `Submitting` ends
/// in `Done` or falls back to `Idle` on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutPhase {
    #[default]
    Idle,
    Submitting,
    Done,
}

impl CheckoutPhase {
    /// Label for the submit button.
    #[must_use]
    pub const fn button_label(self) -> &'static str {
        match self {
            Self::Idle => "Place Order",
            Self::Submitting | Self::Done => "Processing...",
        }
    }

    /// Whether the submit button accepts clicks.
    #[must_use]
    pub const fn accepts_input(self) -> bool {
        matches!(self, Self::Idle)
    }
}
