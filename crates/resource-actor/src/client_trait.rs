//! # EntityClient Trait
//!
//! Common surface for resource-specific clients: default `get`, `list` and `delete`
//! built on a wrapped [`ResourceClient`], with framework errors mapped into the
//! resource's own error type.
use crate::{FrameworkError, PersistentEntity, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard read/delete requests.
///
/// ```rust,ignore
/// #[async_trait]
/// impl EntityClient<Product> for ProductClient {
///     type Error = ProductError;
///     fn inner(&self) -> &ResourceClient<Product> { &self.inner }
///     fn map_error(e: FrameworkError) -> ProductError { /* downcast or wrap */ }
/// }
///
/// // get(), list() and delete() are now available on ProductClient.
/// let all = product_client.list(ProductFilter::All).await?;
/// ```
#[async_trait]
pub trait EntityClient<T: PersistentEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity matching `filter`.
    #[tracing::instrument(skip(self))]
    async fn list(&self, filter: T::Filter) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list(filter).await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
