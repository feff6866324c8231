/// One line of the rental ledger.
///
/// # Actor Framework
/// Served by a [`ResourceActor`](resource_actor::ResourceActor) through
/// [`impl PersistentEntity for Rental`](#impl-PersistentEntity-for-Rental).
///
/// Rentals are append-only: the product type, code and daily rate are copied at booking
/// time and never re-read from the catalog.
use crate::model::CustomerId;
use crate::pricing::Quote;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Rentals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RentalId(pub i64);

impl From<i64> for RentalId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for RentalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rental_{}", self.0)
    }
}

/// Credit and payment terms captured on the booking form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountTerms {
    pub account_open: Option<String>,
    pub application_date: Option<NaiveDate>,
    pub next_credit_review: Option<NaiveDate>,
    pub last_credit_review: Option<i64>,
    pub date_reviewed: Option<NaiveDate>,
    pub credit_check: Option<String>,
    pub settlement_due_day: Option<i64>,
    pub payment_due: Option<String>,
    pub deposit: Option<String>,
    pub pay_due_day: Option<String>,
    pub payment_method: Option<String>,
    pub check_credit: bool,
    pub terms_agreed: bool,
    pub account_on_hold: bool,
    pub restrict_mailing: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rental {
    pub id: RentalId,
    pub customer_id: CustomerId,
    pub receipt_ref: String,
    pub product_type: String,
    pub product_code: String,
    pub no_days: u32,
    pub cost_per_day: Decimal,
    pub credit_limit: Decimal,
    pub discount_percent: Decimal,
    pub terms: AccountTerms,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    pub created_at: NaiveDateTime,
}

/// Payload for booking a rental.
///
/// `period` is the selector label (e.g. `"1-30 days"`); it is validated when the booking
/// is priced.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    pub customer_id: CustomerId,
    pub product_type: String,
    pub period: String,
    pub terms: AccountTerms,
}

/// Rentals cannot be edited; the update payload carries nothing.
#[derive(Debug, Clone, Copy)]
pub struct RentalUpdate;

/// Which rentals a `list` request returns. Results are newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RentalFilter {
    #[default]
    All,
    /// Case-insensitive substring match on receipt reference or product type.
    Search(String),
    /// Exact receipt reference.
    Receipt(String),
}

/// Custom rental operations.
#[derive(Debug, Clone)]
pub enum RentalAction {
    /// Prices a booking against the current catalog without writing anything.
    /// An unrecognised period label yields no quote.
    Quote {
        product_type: String,
        period: String,
    },
}

/// Results from RentalActions - variants match 1:1 with RentalAction
#[derive(Debug, Clone)]
pub enum RentalActionResult {
    Quote(Option<Quote>),
}
