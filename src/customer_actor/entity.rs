//! [`PersistentEntity`] implementation for [`Customer`].

use super::error::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use async_trait::async_trait;
use chrono::NaiveDate;
use resource_actor::PersistentEntity;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};

const SELECT_CUSTOMER: &str =
    "SELECT customer_id, customer_name, phone, email, address, created_date FROM customers";

/// Blank optional fields are stored as NULL.
fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required_name(name: &str) -> Result<String, CustomerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CustomerError::Validation("customer name is required".into()));
    }
    Ok(name.to_string())
}

impl Customer {
    fn from_row(row: &SqliteRow) -> Result<Self, CustomerError> {
        Ok(Self {
            id: CustomerId(row.try_get("customer_id")?),
            name: row.try_get("customer_name")?,
            phone: row.try_get("phone")?,
            email: row.try_get("email")?,
            address: row.try_get("address")?,
            created_date: row
                .try_get::<Option<NaiveDate>, _>("created_date")?
                .unwrap_or_default(),
        })
    }

    async fn load(
        conn: &mut SqliteConnection,
        id: CustomerId,
    ) -> Result<Option<Self>, CustomerError> {
        let sql = format!("{} WHERE customer_id = ?", SELECT_CUSTOMER);
        let row = sqlx::query(&sql).bind(id.0).fetch_optional(&mut *conn).await?;
        row.as_ref().map(Self::from_row).transpose()
    }
}

/// Customers on file.
///
/// - **Create**: [`CustomerCreate`]; the name is required, the contact fields are optional.
/// - **Update**: [`CustomerUpdate`]; `None` keeps a field, an empty string clears it.
/// - **Delete**: refused with `InUse` while any rental references the customer.
#[async_trait]
impl PersistentEntity for Customer {
    type Id = CustomerId;
    type Create = CustomerCreate;
    type Update = CustomerUpdate;
    type Filter = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = CustomerError;

    async fn insert(
        conn: &mut SqliteConnection,
        params: CustomerCreate,
        _ctx: &(),
    ) -> Result<CustomerId, CustomerError> {
        let name = required_name(&params.name)?;
        let done = sqlx::query(
            "INSERT INTO customers (customer_name, phone, email, address) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(non_blank(params.phone))
        .bind(non_blank(params.email))
        .bind(non_blank(params.address))
        .execute(&mut *conn)
        .await?;
        Ok(CustomerId(done.last_insert_rowid()))
    }

    async fn fetch(
        conn: &mut SqliteConnection,
        id: &CustomerId,
    ) -> Result<Option<Self>, CustomerError> {
        Self::load(conn, *id).await
    }

    async fn list(conn: &mut SqliteConnection, _filter: ()) -> Result<Vec<Self>, CustomerError> {
        let sql = format!("{} ORDER BY customer_name, customer_id", SELECT_CUSTOMER);
        let rows = sqlx::query(&sql).fetch_all(&mut *conn).await?;
        rows.iter().map(Self::from_row).collect()
    }

    async fn update(
        conn: &mut SqliteConnection,
        id: &CustomerId,
        update: CustomerUpdate,
        _ctx: &(),
    ) -> Result<Option<Self>, CustomerError> {
        let Some(mut customer) = Self::load(conn, *id).await? else {
            return Ok(None);
        };
        if let Some(name) = update.name {
            customer.name = required_name(&name)?;
        }
        if update.phone.is_some() {
            customer.phone = non_blank(update.phone);
        }
        if update.email.is_some() {
            customer.email = non_blank(update.email);
        }
        if update.address.is_some() {
            customer.address = non_blank(update.address);
        }

        sqlx::query(
            "UPDATE customers SET customer_name = ?, phone = ?, email = ?, address = ? \
             WHERE customer_id = ?",
        )
        .bind(&customer.name)
        .bind(&customer.phone)
        .bind(&customer.email)
        .bind(&customer.address)
        .bind(id.0)
        .execute(&mut *conn)
        .await?;
        Ok(Some(customer))
    }

    async fn delete(
        conn: &mut SqliteConnection,
        id: &CustomerId,
        _ctx: &(),
    ) -> Result<bool, CustomerError> {
        if Self::load(conn, *id).await?.is_none() {
            return Ok(false);
        }
        let rentals: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rentals WHERE customer_id = ?")
            .bind(id.0)
            .fetch_one(&mut *conn)
            .await?;
        if rentals > 0 {
            return Err(CustomerError::InUse {
                id: id.to_string(),
                rentals,
            });
        }
        let done = sqlx::query("DELETE FROM customers WHERE customer_id = ?")
            .bind(id.0)
            .execute(&mut *conn)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn handle_action(
        _conn: &mut SqliteConnection,
        _action: (),
        _ctx: &(),
    ) -> Result<(), CustomerError> {
        Ok(())
    }
}
