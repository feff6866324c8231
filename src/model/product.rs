/// Represents a rentable unit type in the catalog (a car, a van, …).
///
/// # Actor Framework
/// This struct implements the [`PersistentEntity`](resource_actor::PersistentEntity) trait,
/// so it is served by a [`ResourceActor`](resource_actor::ResourceActor).
///
/// See [`impl PersistentEntity for Product`](#impl-PersistentEntity-for-Product) for:
/// - Creation parameters ([`ProductCreate`])
/// - Update parameters ([`ProductUpdate`])
/// - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i64);

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Whether a product can currently be rented out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProductStatus {
    #[default]
    Available,
    Unavailable,
    Maintenance,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Available => "Available",
            ProductStatus::Unavailable => "Unavailable",
            ProductStatus::Maintenance => "Maintenance",
        }
    }
}

impl Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Available" => Ok(ProductStatus::Available),
            "Unavailable" => Ok(ProductStatus::Unavailable),
            "Maintenance" => Ok(ProductStatus::Maintenance),
            other => Err(format!("unknown product status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub product_type: String,
    pub product_code: String,
    pub cost_per_day: Decimal,
    pub available_quantity: u32,
    pub status: ProductStatus,
}

impl Product {
    /// A product can be booked while it has stock and is marked available.
    pub fn is_eligible(&self) -> bool {
        self.available_quantity > 0 && self.status == ProductStatus::Available
    }
}

/// Payload for adding a product to the catalog.
///
/// `quantity` is signed so that a negative entry is reported as a validation error rather
/// than silently wrapped.
#[derive(Debug, Clone)]
pub struct ProductCreate {
    pub product_type: String,
    pub product_code: String,
    pub cost_per_day: Decimal,
    pub quantity: i64,
}

/// Payload for replacing a product's editable fields.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub product_type: String,
    pub product_code: String,
    pub cost_per_day: Decimal,
    pub quantity: i64,
    pub status: ProductStatus,
}

/// Which products a `list` request returns.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ProductFilter {
    /// Every product, ordered by type then code.
    #[default]
    All,
    /// Bookable products only, optionally of one type.
    Eligible { product_type: Option<String> },
}
