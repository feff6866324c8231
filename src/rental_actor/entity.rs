//! [`PersistentEntity`] implementation for [`Rental`].
//!
//! A booking is priced from the catalog's first eligible unit of the requested type, stamped
//! with a receipt reference and written once. Receipt references are unique at the store;
//! a clash just means another candidate is drawn.

use super::error::RentalError;
use super::RentalContext;
use crate::model::{
    AccountTerms, BookingRequest, CustomerId, Rental, RentalAction, RentalActionResult,
    RentalFilter, RentalId, RentalUpdate,
};
use crate::pricing::{self, Quote, RentalPeriod};
use crate::store::{is_unique_violation, like_pattern, money_from_column, money_to_column};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use resource_actor::PersistentEntity;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use tracing::{debug, warn};

const SELECT_RENTAL: &str = "SELECT rental_id, customer_id, receipt_ref, product_type, \
     product_code, no_days, cost_per_day, account_open, app_date, next_credit_review, \
     last_credit_review, date_rev, credit_limit, credit_check, sett_due_day, payment_due, \
     discount, deposit, pay_due_day, payment_method, check_credit, term_agreed, account_on_hold, \
     restrict_mailing, tax, subtotal, total, created_date FROM rentals";

const NEWEST_FIRST: &str = "ORDER BY created_date DESC, rental_id DESC";

/// `credit_limit` is stored as its display label, e.g. `£150`.
fn credit_limit_label(limit: Decimal) -> String {
    format!("£{}", limit.normalize())
}

fn parse_credit_limit(label: Option<String>) -> Result<Decimal, RentalError> {
    match label {
        None => Ok(Decimal::ZERO),
        Some(label) => label
            .trim()
            .trim_start_matches('£')
            .parse()
            .map_err(|_| {
                RentalError::DatabaseError(format!("unreadable credit limit '{}'", label))
            }),
    }
}

impl Rental {
    fn from_row(row: &SqliteRow) -> Result<Self, RentalError> {
        let money = |column: &str| -> Result<Decimal, RentalError> {
            Ok(money_from_column(row.try_get::<Option<f64>, _>(column)?.unwrap_or(0.0)))
        };
        let flag = |column: &str| -> Result<bool, RentalError> {
            Ok(row.try_get::<Option<bool>, _>(column)?.unwrap_or(false))
        };
        let no_days: i64 = row.try_get::<Option<i64>, _>("no_days")?.unwrap_or(0);

        let terms = AccountTerms {
            account_open: row.try_get("account_open")?,
            application_date: row.try_get::<Option<NaiveDate>, _>("app_date")?,
            next_credit_review: row.try_get::<Option<NaiveDate>, _>("next_credit_review")?,
            last_credit_review: row.try_get("last_credit_review")?,
            date_reviewed: row.try_get::<Option<NaiveDate>, _>("date_rev")?,
            credit_check: row.try_get("credit_check")?,
            settlement_due_day: row.try_get("sett_due_day")?,
            payment_due: row.try_get("payment_due")?,
            deposit: row.try_get("deposit")?,
            pay_due_day: row.try_get("pay_due_day")?,
            payment_method: row.try_get("payment_method")?,
            check_credit: flag("check_credit")?,
            terms_agreed: flag("term_agreed")?,
            account_on_hold: flag("account_on_hold")?,
            restrict_mailing: flag("restrict_mailing")?,
        };

        Ok(Self {
            id: RentalId(row.try_get("rental_id")?),
            customer_id: CustomerId(
                row
                    .try_get::<Option<i64>, _>("customer_id")?
                    .unwrap_or_default(),
            ),
            receipt_ref: row.try_get::<Option<String>, _>("receipt_ref")?.unwrap_or_default(),
            product_type: row.try_get::<Option<String>, _>("product_type")?.unwrap_or_default(),
            product_code: row.try_get::<Option<String>, _>("product_code")?.unwrap_or_default(),
            no_days: u32::try_from(no_days.max(0)).unwrap_or(u32::MAX),
            cost_per_day: money("cost_per_day")?,
            credit_limit: parse_credit_limit(row.try_get("credit_limit")?)?,
            discount_percent: money("discount")?.normalize(),
            terms,
            subtotal: money("subtotal")?,
            tax: money("tax")?,
            total: money("total")?,
            created_at: row
                .try_get::<Option<NaiveDateTime>, _>("created_date")?
                .unwrap_or_default(),
        })
    }

    async fn load(conn: &mut SqliteConnection, id: RentalId) -> Result<Option<Self>, RentalError> {
        let sql = format!("{} WHERE rental_id = ?", SELECT_RENTAL);
        let row = sqlx::query(&sql).bind(id.0).fetch_optional(&mut *conn).await?;
        row.as_ref().map(Self::from_row).transpose()
    }
}

/// Writes one priced booking under `receipt_ref`.
async fn write_booking(
    conn: &mut SqliteConnection,
    booking: &BookingRequest,
    product_code: &str,
    quote: &Quote,
    receipt_ref: &str,
) -> Result<RentalId, sqlx::Error> {
    let terms = &booking.terms;
    let done = sqlx::query(
        "INSERT INTO rentals (customer_id, receipt_ref, product_type, product_code, no_days, \
         cost_per_day, account_open, app_date, next_credit_review, last_credit_review, date_rev, \
         credit_limit, credit_check, sett_due_day, payment_due, discount, deposit, pay_due_day, \
         payment_method, check_credit, term_agreed, account_on_hold, restrict_mailing, tax, \
         subtotal, total) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(booking.customer_id.0)
    .bind(receipt_ref)
    .bind(booking.product_type.trim())
    .bind(product_code)
    .bind(i64::from(quote.day_count))
    .bind(money_to_column(quote.cost_per_day))
    .bind(&terms.account_open)
    .bind(terms.application_date)
    .bind(terms.next_credit_review)
    .bind(terms.last_credit_review)
    .bind(terms.date_reviewed)
    .bind(credit_limit_label(quote.credit_limit))
    .bind(&terms.credit_check)
    .bind(terms.settlement_due_day)
    .bind(&terms.payment_due)
    .bind(money_to_column(quote.discount_percent))
    .bind(&terms.deposit)
    .bind(&terms.pay_due_day)
    .bind(&terms.payment_method)
    .bind(terms.check_credit)
    .bind(terms.terms_agreed)
    .bind(terms.account_on_hold)
    .bind(terms.restrict_mailing)
    .bind(money_to_column(quote.tax))
    .bind(money_to_column(quote.subtotal))
    .bind(money_to_column(quote.total))
    .execute(&mut *conn)
    .await?;
    Ok(RentalId(done.last_insert_rowid()))
}

/// The append-only rental ledger.
///
/// - **Create**: [`BookingRequest`]; see [`insert`](#method.insert) for the booking steps.
/// - **Update / Delete**: always `Immutable`.
/// - **List**: [`RentalFilter`], newest first.
/// - **Actions**: [`RentalAction::Quote`] prices a booking without writing it.
#[async_trait]
impl PersistentEntity for Rental {
    type Id = RentalId;
    type Create = BookingRequest;
    type Update = RentalUpdate;
    type Filter = RentalFilter;
    type Action = RentalAction;
    type ActionResult = RentalActionResult;
    type Context = RentalContext;
    type Error = RentalError;

    /// Books a rental.
    ///
    /// 1. Resolve the period tier; unknown labels are a validation error.
    /// 2. Ask the catalog for the first eligible product of the type.
    /// 3. Price it from the product's current daily rate.
    /// 4. Optionally reserve one unit.
    /// 5. Insert under a fresh receipt reference, redrawing on a unique clash.
    ///
    /// A reserved unit is released again if the row could not be written.
    async fn insert(
        conn: &mut SqliteConnection,
        params: BookingRequest,
        ctx: &RentalContext,
    ) -> Result<RentalId, RentalError> {
        let product_type = params.product_type.trim();
        if product_type.is_empty() {
            return Err(RentalError::Validation("product type is required".into()));
        }
        let period = RentalPeriod::from_label(&params.period).ok_or_else(|| {
            RentalError::Validation(format!("unknown rental period '{}'", params.period))
        })?;

        let product = ctx
            .products
            .first_eligible(product_type)
            .await?
            .ok_or_else(|| RentalError::NoAvailableProduct(product_type.to_string()))?;
        let quote = Quote::new(product.cost_per_day, period)?;
        debug!(product = %product.id, total = %quote.total, "Booking priced");

        if ctx.reserve_stock {
            ctx.products.reserve_stock(product.id, 1).await?;
        }

        let written =
            write_with_fresh_receipt(conn, &params, &product.product_code, &quote, ctx).await;
        if written.is_err() && ctx.reserve_stock {
            if let Err(e) = ctx.products.release_stock(product.id, 1).await {
                warn!(product = %product.id, error = %e, "Releasing reserved unit failed");
            }
        }
        written
    }

    async fn fetch(
        conn: &mut SqliteConnection,
        id: &RentalId,
    ) -> Result<Option<Self>, RentalError> {
        Self::load(conn, *id).await
    }

    async fn list(
        conn: &mut SqliteConnection,
        filter: RentalFilter,
    ) -> Result<Vec<Self>, RentalError> {
        let rows = match filter {
            RentalFilter::All => {
                let sql = format!("{} {}", SELECT_RENTAL, NEWEST_FIRST);
                sqlx::query(&sql).fetch_all(&mut *conn).await?
            }
            RentalFilter::Search(term) => {
                let sql = format!(
                    "{} WHERE LOWER(receipt_ref) LIKE ? ESCAPE '\\' \
                     OR LOWER(product_type) LIKE ? ESCAPE '\\' {}",
                    SELECT_RENTAL, NEWEST_FIRST
                );
                let pattern = like_pattern(term.trim());
                sqlx::query(&sql)
                    .bind(&pattern)
                    .bind(&pattern)
                    .fetch_all(&mut *conn)
                    .await?
            }
            RentalFilter::Receipt(receipt_ref) => {
                let sql = format!("{} WHERE receipt_ref = ? {}", SELECT_RENTAL, NEWEST_FIRST);
                sqlx::query(&sql)
                    .bind(receipt_ref.trim())
                    .fetch_all(&mut *conn)
                    .await?
            }
        };
        rows.iter().map(Self::from_row).collect()
    }

    async fn update(
        _conn: &mut SqliteConnection,
        id: &RentalId,
        _update: RentalUpdate,
        _ctx: &RentalContext,
    ) -> Result<Option<Self>, RentalError> {
        Err(RentalError::Immutable(id.to_string()))
    }

    async fn delete(
        _conn: &mut SqliteConnection,
        id: &RentalId,
        _ctx: &RentalContext,
    ) -> Result<bool, RentalError> {
        Err(RentalError::Immutable(id.to_string()))
    }

    async fn handle_action(
        _conn: &mut SqliteConnection,
        action: RentalAction,
        ctx: &RentalContext,
    ) -> Result<RentalActionResult, RentalError> {
        match action {
            RentalAction::Quote {
                product_type,
                period,
            } => {
                let product_type = product_type.trim();
                let product = ctx
                    .products
                    .first_eligible(product_type)
                    .await?
                    .ok_or_else(|| RentalError::NoAvailableProduct(product_type.to_string()))?;
                let quote = pricing::quote(product.cost_per_day, &period)?;
                Ok(RentalActionResult::Quote(quote))
            }
        }
    }
}

async fn write_with_fresh_receipt(
    conn: &mut SqliteConnection,
    booking: &BookingRequest,
    product_code: &str,
    quote: &Quote,
    ctx: &RentalContext,
) -> Result<RentalId, RentalError> {
    for attempt in 1..=ctx.receipt_attempts {
        let receipt_ref = (ctx.receipts)();
        match write_booking(conn, booking, product_code, quote, &receipt_ref).await {
            Ok(id) => return Ok(id),
            Err(e) if is_unique_violation(&e) => {
                debug!(%receipt_ref, attempt, "Receipt reference taken, drawing another");
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(RentalError::DuplicateReceipt(ctx.receipt_attempts))
}
