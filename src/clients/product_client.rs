//! # Product Client
//!
//! Provides a high-level API for interacting with the `Product` actor.
//! It wraps a `ResourceClient<Product>` and exposes catalog and stock methods.
use crate::model::{Product, ProductCreate, ProductFilter, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use resource_actor::{EntityClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<ProductError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => ProductError::NotFound(id),
            Err(FrameworkError::Store(e)) => ProductError::DatabaseError(e.to_string()),
            Err(other) => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn add_product(&self, params: ProductCreate) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Every product, ordered by type then code.
    pub async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.list(ProductFilter::All).await
    }

    /// Bookable products, optionally of a single type.
    pub async fn list_eligible(
        &self,
        product_type: Option<String>,
    ) -> Result<Vec<Product>, ProductError> {
        self.list(ProductFilter::Eligible { product_type }).await
    }

    /// The product a booking of `product_type` would use, if any.
    #[instrument(skip(self))]
    pub async fn first_eligible(
        &self,
        product_type: &str,
    ) -> Result<Option<Product>, ProductError> {
        debug!("Looking up first eligible {}", product_type);
        let action = ProductAction::FirstEligible {
            product_type: product_type.to_string(),
        };
        match self.inner.perform_action(action).await {
            Ok(ProductActionResult::FirstEligible(product)) => Ok(product),
            Ok(other) => Err(unexpected("FirstEligible", other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Takes `quantity` units out of stock and returns what is left.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Reserving {} units of {}", quantity, id);
        match self
            .inner
            .perform_action(ProductAction::ReserveStock { id, quantity })
            .await
        {
            Ok(ProductActionResult::ReserveStock(left)) => Ok(left),
            Ok(other) => Err(unexpected("ReserveStock", other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }

    /// Returns `quantity` units to stock and reports the new level.
    #[instrument(skip(self))]
    pub async fn release_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Releasing {} units of {}", quantity, id);
        match self
            .inner
            .perform_action(ProductAction::ReleaseStock { id, quantity })
            .await
        {
            Ok(ProductActionResult::ReleaseStock(level)) => Ok(level),
            Ok(other) => Err(unexpected("ReleaseStock", other)),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

fn unexpected(action: &str, result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!(
        "{} answered with {:?}",
        action, result
    ))
}
