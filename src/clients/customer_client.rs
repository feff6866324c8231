//! # Customer Client
//!
//! Provides a high-level API for interacting with the `Customer` actor.
use crate::customer_actor::CustomerError;
use crate::model::{Customer, CustomerCreate, CustomerId, CustomerUpdate};
use async_trait::async_trait;
use resource_actor::{EntityClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<CustomerError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CustomerError::NotFound(id),
            Err(FrameworkError::Store(e)) => CustomerError::DatabaseError(e.to_string()),
            Err(other) => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl CustomerClient {
    #[instrument(skip(self))]
    pub async fn add_customer(&self, params: CustomerCreate) -> Result<CustomerId, CustomerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_customer(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Every customer, ordered by name.
    pub async fn list_customers(&self) -> Result<Vec<Customer>, CustomerError> {
        self.list(()).await
    }
}
