//! Table definitions and the default catalog.
//!
//! Column names and constraints match the long-standing `rental_inventory.db` layout, so an
//! existing database file opens unchanged.

use resource_actor::Store;
use sqlx::SqliteConnection;
use tracing::{debug, info};

const CREATE_CUSTOMERS: &str = r#"
    CREATE TABLE IF NOT EXISTS customers (
        customer_id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_name TEXT NOT NULL,
        phone TEXT,
        email TEXT,
        address TEXT,
        created_date DATE DEFAULT CURRENT_DATE
    )
"#;

const CREATE_RENTALS: &str = r#"
    CREATE TABLE IF NOT EXISTS rentals (
        rental_id INTEGER PRIMARY KEY AUTOINCREMENT,
        customer_id INTEGER,
        receipt_ref TEXT UNIQUE,
        product_type TEXT,
        product_code TEXT,
        no_days INTEGER,
        cost_per_day REAL,
        account_open TEXT,
        app_date DATE,
        next_credit_review DATE,
        last_credit_review INTEGER,
        date_rev DATE,
        credit_limit TEXT,
        credit_check TEXT,
        sett_due_day INTEGER,
        payment_due TEXT,
        discount REAL,
        deposit TEXT,
        pay_due_day TEXT,
        payment_method TEXT,
        check_credit INTEGER,
        term_agreed INTEGER,
        account_on_hold INTEGER,
        restrict_mailing INTEGER,
        tax REAL,
        subtotal REAL,
        total REAL,
        created_date DATETIME DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (customer_id) REFERENCES customers (customer_id)
    )
"#;

const CREATE_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        product_id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_type TEXT NOT NULL,
        product_code TEXT UNIQUE,
        cost_per_day REAL,
        available_quantity INTEGER DEFAULT 1,
        status TEXT DEFAULT 'Available'
    )
"#;

/// A catalog row inserted on first run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedProduct {
    pub product_type: &'static str,
    pub product_code: &'static str,
    pub cost_per_day: f64,
    pub quantity: i64,
}

pub const DEFAULT_CATALOG: [SeedProduct; 4] = [
    SeedProduct {
        product_type: "Car",
        product_code: "CAR452",
        cost_per_day: 12.00,
        quantity: 5,
    },
    SeedProduct {
        product_type: "Van",
        product_code: "VAN775",
        cost_per_day: 19.00,
        quantity: 3,
    },
    SeedProduct {
        product_type: "Minibus",
        product_code: "MIN334",
        cost_per_day: 12.00,
        quantity: 2,
    },
    SeedProduct {
        product_type: "Truck",
        product_code: "TRK7483",
        cost_per_day: 15.00,
        quantity: 2,
    },
];

/// Creates any missing tables and seeds the default catalog.
///
/// Safe to run on every start: tables use `IF NOT EXISTS` and the seed uses
/// `INSERT OR IGNORE`, so a code that already exists (even with edited values) is left alone.
pub async fn migrate(store: &Store) -> Result<(), sqlx::Error> {
    let mut conn = store.connect().await?;
    apply(&mut conn).await?;
    store.release(conn).await;
    info!(path = %store.path().display(), "Store schema ready");
    Ok(())
}

async fn apply(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    for ddl in [CREATE_CUSTOMERS, CREATE_RENTALS, CREATE_PRODUCTS] {
        sqlx::query(ddl).execute(&mut *conn).await?;
    }

    let mut seeded = 0;
    for seed in DEFAULT_CATALOG {
        let done = sqlx::query(
            "INSERT OR IGNORE INTO products \
             (product_type, product_code, cost_per_day, available_quantity) \
             VALUES (?, ?, ?, ?)",
        )
        .bind(seed.product_type)
        .bind(seed.product_code)
        .bind(seed.cost_per_day)
        .bind(seed.quantity)
        .execute(&mut *conn)
        .await?;
        seeded += done.rows_affected();
    }
    debug!(seeded, "Default catalog applied");
    Ok(())
}
