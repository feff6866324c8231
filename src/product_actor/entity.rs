//! [`PersistentEntity`] implementation for [`Product`].
//!
//! Rows live in the `products` table. Product codes are unique at the store, so a clash is
//! detected from the constraint failure rather than a read-before-write.

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{
    Product, ProductCreate, ProductFilter, ProductId, ProductStatus, ProductUpdate,
};
use crate::pricing::MAX_COST_PER_DAY;
use crate::store::{is_unique_violation, money_from_column, money_to_column};
use async_trait::async_trait;
use resource_actor::PersistentEntity;
use rust_decimal::Decimal;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

const SELECT_PRODUCT: &str = "SELECT product_id, product_type, product_code, cost_per_day, \
     available_quantity, status FROM products";

fn validate(
    product_type: &str,
    product_code: &str,
    cost_per_day: Decimal,
    quantity: i64,
) -> Result<(), ProductError> {
    if product_type.trim().is_empty() {
        return Err(ProductError::Validation("product type is required".into()));
    }
    if product_code.trim().is_empty() {
        return Err(ProductError::Validation("product code is required".into()));
    }
    if cost_per_day < Decimal::ZERO {
        return Err(ProductError::Validation(format!(
            "cost per day must not be negative (got {})",
            cost_per_day
        )));
    }
    if cost_per_day > MAX_COST_PER_DAY {
        return Err(ProductError::Validation(format!(
            "cost per day must not exceed {} (got {})",
            MAX_COST_PER_DAY, cost_per_day
        )));
    }
    if cost_per_day.normalize().scale() > 2 {
        return Err(ProductError::Validation(format!(
            "cost per day must be in whole pennies (got {})",
            cost_per_day
        )));
    }
    if quantity < 0 {
        return Err(ProductError::Validation(format!(
            "quantity must not be negative (got {})",
            quantity
        )));
    }
    if quantity > i64::from(u32::MAX) {
        return Err(ProductError::Validation(format!(
            "quantity {} is too large",
            quantity
        )));
    }
    Ok(())
}

fn duplicate_or(code: &str, e: sqlx::Error) -> ProductError {
    if is_unique_violation(&e) {
        ProductError::DuplicateCode(code.to_string())
    } else {
        ProductError::from(e)
    }
}

impl Product {
    fn from_row(row: &SqliteRow) -> Result<Self, ProductError> {
        let status = match row.try_get::<Option<String>, _>("status")? {
            Some(s) => s.parse().map_err(ProductError::DatabaseError)?,
            None => ProductStatus::default(),
        };
        let quantity: i64 = row
            .try_get::<Option<i64>, _>("available_quantity")?
            .unwrap_or(0);
        let cost: Option<f64> = row.try_get("cost_per_day")?;
        Ok(Self {
            id: ProductId(row.try_get("product_id")?),
            product_type: row.try_get("product_type")?,
            product_code: row
                .try_get::<Option<String>, _>("product_code")?
                .unwrap_or_default(),
            cost_per_day: money_from_column(cost.unwrap_or(0.0)),
            available_quantity: u32::try_from(quantity.max(0)).unwrap_or(u32::MAX),
            status,
        })
    }

    async fn load(
        conn: &mut SqliteConnection,
        id: ProductId,
    ) -> Result<Option<Self>, ProductError> {
        let sql = format!("{} WHERE product_id = ?", SELECT_PRODUCT);
        let row = sqlx::query(&sql).bind(id.0).fetch_optional(&mut *conn).await?;
        row.as_ref().map(Self::from_row).transpose()
    }

    async fn load_existing(
        conn: &mut SqliteConnection,
        id: ProductId,
    ) -> Result<Self, ProductError> {
        Self::load(conn, id)
            .await?
            .ok_or_else(|| ProductError::NotFound(id.to_string()))
    }
}

/// Catalog entries.
///
/// - **Create**: [`ProductCreate`]; rejects blank type/code, negative quantity, a cost that is
///   negative, above [`MAX_COST_PER_DAY`] or not in whole pennies, and a code already in use
///   (`DuplicateCode`, existing row untouched).
/// - **Update**: [`ProductUpdate`] replaces every editable column.
/// - **Delete**: unconditional; rentals keep their own copy of type, code and rate.
/// - **Actions**: [`ProductAction`].
#[async_trait]
impl PersistentEntity for Product {
    type Id = ProductId;
    type Create = ProductCreate;
    type Update = ProductUpdate;
    type Filter = ProductFilter;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    async fn insert(
        conn: &mut SqliteConnection,
        params: ProductCreate,
        _ctx: &(),
    ) -> Result<ProductId, ProductError> {
        validate(
            &params.product_type,
            &params.product_code,
            params.cost_per_day,
            params.quantity,
        )?;
        let done = sqlx::query(
            "INSERT INTO products \
             (product_type, product_code, cost_per_day, available_quantity, status) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(params.product_type.trim())
        .bind(params.product_code.trim())
        .bind(money_to_column(params.cost_per_day))
        .bind(params.quantity)
        .bind(ProductStatus::Available.as_str())
        .execute(&mut *conn)
        .await
        .map_err(|e| duplicate_or(params.product_code.trim(), e))?;
        Ok(ProductId(done.last_insert_rowid()))
    }

    async fn fetch(
        conn: &mut SqliteConnection,
        id: &ProductId,
    ) -> Result<Option<Self>, ProductError> {
        Self::load(conn, *id).await
    }

    async fn list(
        conn: &mut SqliteConnection,
        filter: ProductFilter,
    ) -> Result<Vec<Self>, ProductError> {
        let rows = match filter {
            ProductFilter::All => {
                let sql = format!("{} ORDER BY product_type, product_code", SELECT_PRODUCT);
                sqlx::query(&sql).fetch_all(&mut *conn).await?
            }
            ProductFilter::Eligible { product_type } => {
                let sql = format!(
                    "{} WHERE available_quantity > 0 AND status = ? \
                     AND (? IS NULL OR product_type = ?) ORDER BY product_id",
                    SELECT_PRODUCT
                );
                sqlx::query(&sql)
                    .bind(ProductStatus::Available.as_str())
                    .bind(product_type.as_deref())
                    .bind(product_type.as_deref())
                    .fetch_all(&mut *conn)
                    .await?
            }
        };
        rows.iter().map(Self::from_row).collect()
    }

    async fn update(
        conn: &mut SqliteConnection,
        id: &ProductId,
        update: ProductUpdate,
        _ctx: &(),
    ) -> Result<Option<Self>, ProductError> {
        validate(
            &update.product_type,
            &update.product_code,
            update.cost_per_day,
            update.quantity,
        )?;
        let done = sqlx::query(
            "UPDATE products SET product_type = ?, product_code = ?, cost_per_day = ?, \
             available_quantity = ?, status = ? WHERE product_id = ?",
        )
        .bind(update.product_type.trim())
        .bind(update.product_code.trim())
        .bind(money_to_column(update.cost_per_day))
        .bind(update.quantity)
        .bind(update.status.as_str())
        .bind(id.0)
        .execute(&mut *conn)
        .await
        .map_err(|e| duplicate_or(update.product_code.trim(), e))?;
        if done.rows_affected() == 0 {
            return Ok(None);
        }
        Self::load(conn, *id).await
    }

    async fn delete(
        conn: &mut SqliteConnection,
        id: &ProductId,
        _ctx: &(),
    ) -> Result<bool, ProductError> {
        let done = sqlx::query("DELETE FROM products WHERE product_id = ?")
            .bind(id.0)
            .execute(&mut *conn)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn handle_action(
        conn: &mut SqliteConnection,
        action: ProductAction,
        _ctx: &(),
    ) -> Result<ProductActionResult, ProductError> {
        match action {
            ProductAction::FirstEligible { product_type } => {
                let sql = format!(
                    "{} WHERE product_type = ? AND available_quantity > 0 AND status = ? \
                     ORDER BY product_id LIMIT 1",
                    SELECT_PRODUCT
                );
                let row = sqlx::query(&sql)
                    .bind(product_type.trim())
                    .bind(ProductStatus::Available.as_str())
                    .fetch_optional(&mut *conn)
                    .await?;
                let product = row.as_ref().map(Self::from_row).transpose()?;
                Ok(ProductActionResult::FirstEligible(product))
            }
            ProductAction::ReserveStock { id, quantity } => {
                if quantity == 0 {
                    return Err(ProductError::Validation(
                        "reserve quantity must be positive".into(),
                    ));
                }
                // Single conditional statement: the check and the decrement cannot be split.
                let done = sqlx::query(
                    "UPDATE products SET available_quantity = available_quantity - ? \
                     WHERE product_id = ? AND available_quantity >= ?",
                )
                .bind(i64::from(quantity))
                .bind(id.0)
                .bind(i64::from(quantity))
                .execute(&mut *conn)
                .await?;
                let product = Self::load_existing(conn, id).await?;
                if done.rows_affected() == 0 {
                    return Err(ProductError::InsufficientStock {
                        id,
                        requested: quantity,
                        available: product.available_quantity,
                    });
                }
                Ok(ProductActionResult::ReserveStock(product.available_quantity))
            }
            ProductAction::ReleaseStock { id, quantity } => {
                let done = sqlx::query(
                    "UPDATE products SET available_quantity = available_quantity + ? \
                     WHERE product_id = ?",
                )
                .bind(i64::from(quantity))
                .bind(id.0)
                .execute(&mut *conn)
                .await?;
                if done.rows_affected() == 0 {
                    return Err(ProductError::NotFound(id.to_string()));
                }
                let product = Self::load_existing(conn, id).await?;
                Ok(ProductActionResult::ReleaseStock(product.available_quantity))
            }
        }
    }
}
