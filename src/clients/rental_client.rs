//! # Rental Client
//!
//! Provides a high-level API for interacting with the `Rental` actor: booking, history and
//! quotes. Pricing and stock checks happen inside the actor, which calls the catalog
//! through its [`RentalContext`](crate::rental_actor::RentalContext).
use crate::model::{
    BookingRequest, Rental, RentalAction, RentalActionResult, RentalFilter, RentalId,
};
use crate::pricing::Quote;
use crate::rental_actor::RentalError;
use async_trait::async_trait;
use resource_actor::{EntityClient, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Rental actor.
#[derive(Clone)]
pub struct RentalClient {
    inner: ResourceClient<Rental>,
}

impl RentalClient {
    pub fn new(inner: ResourceClient<Rental>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<Rental> for RentalClient {
    type Error = RentalError;

    fn inner(&self) -> &ResourceClient<Rental> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<RentalError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => RentalError::NotFound(id),
            Err(FrameworkError::Store(e)) => RentalError::DatabaseError(e.to_string()),
            Err(other) => RentalError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl RentalClient {
    #[instrument(skip(self))]
    pub async fn book(&self, booking: BookingRequest) -> Result<RentalId, RentalError> {
        info!("Sending booking to actor");
        self.inner.create(booking).await.map_err(Self::map_error)
    }

    /// The whole history, newest first.
    pub async fn list_rentals(&self) -> Result<Vec<Rental>, RentalError> {
        self.list(RentalFilter::All).await
    }

    /// Rentals whose receipt reference or product type contains `term`, ignoring case.
    pub async fn search_rentals(&self, term: &str) -> Result<Vec<Rental>, RentalError> {
        self.list(RentalFilter::Search(term.to_string())).await
    }

    pub async fn find_by_receipt(&self, receipt_ref: &str) -> Result<Option<Rental>, RentalError> {
        let found = self
            .list(RentalFilter::Receipt(receipt_ref.to_string()))
            .await?;
        Ok(found.into_iter().next())
    }

    /// Prices a booking without making it. `None` means the period label is not recognised.
    #[instrument(skip(self))]
    pub async fn quote(
        &self,
        product_type: &str,
        period: &str,
    ) -> Result<Option<Quote>, RentalError> {
        debug!("Sending request");
        let action = RentalAction::Quote {
            product_type: product_type.to_string(),
            period: period.to_string(),
        };
        match self.inner.perform_action(action).await {
            Ok(RentalActionResult::Quote(quote)) => Ok(quote),
            Err(e) => Err(Self::map_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product_actor::ProductError;
    use resource_actor::mock::MockClient;

    #[tokio::test]
    async fn test_catalog_errors_reach_the_caller() {
        let mut mock = MockClient::<Rental>::new();
        mock.expect_create()
            .return_err(FrameworkError::entity(RentalError::Product(
                ProductError::DatabaseError("disk I/O error".into()),
            )));
        let client = RentalClient::new(mock.client());

        let result = client
            .book(BookingRequest {
                customer_id: crate::model::CustomerId(1),
                product_type: "Car".into(),
                period: "1-30 days".into(),
                terms: Default::default(),
            })
            .await;

        assert!(matches!(
            result,
            Err(RentalError::Product(ProductError::DatabaseError(_)))
        ));
        mock.verify();
    }

    #[tokio::test]
    async fn test_find_by_receipt_takes_the_single_match() {
        let mut mock = MockClient::<Rental>::new();
        mock.expect_list().return_ok(vec![]);
        let client = RentalClient::new(mock.client());

        assert_eq!(client.find_by_receipt("10908").await, Ok(None));
        mock.verify();
    }
}
