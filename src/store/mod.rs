//! SQLite schema plus the conversions shared by the entity implementations.

pub mod schema;

pub use schema::{migrate, SeedProduct, DEFAULT_CATALOG};

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// True when `e` is a UNIQUE constraint failure.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}

/// Money columns are REAL. Amounts are written from their 2-place decimal value.
pub fn money_to_column(amount: Decimal) -> f64 {
    amount.to_f64().unwrap_or_default()
}

/// Reads a REAL money column back into pennies.
pub fn money_from_column(value: f64) -> Decimal {
    Decimal::from_f64(value)
        .map(crate::pricing::to_pennies)
        .unwrap_or_default()
}

/// Escapes `%`, `_` and `\` so a user term is matched literally by `LIKE ... ESCAPE '\'`.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}
