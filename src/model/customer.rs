use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub i64);

impl From<i64> for CustomerId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "customer_{}", self.0)
    }
}

/// A customer on file.
///
/// # Actor Framework
/// Served by a [`ResourceActor`](resource_actor::ResourceActor) through
/// [`impl PersistentEntity for Customer`](#impl-PersistentEntity-for-Customer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub created_date: NaiveDate,
}

/// Payload for creating a new customer.
#[derive(Debug, Clone, Default)]
pub struct CustomerCreate {
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl CustomerCreate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Payload for updating an existing customer.
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}
