use crate::clients::{CustomerClient, ProductClient, RentalClient};
use crate::config::AppConfig;
use crate::error::SystemError;
use crate::rental_actor::{random_receipts, ReceiptGenerator, RentalContext};
use resource_actor::Store;
use tracing::{error, info};

/// The running back office: one actor per service, all sharing one store file.
///
/// # Architecture
///
/// - **Customer Actor**: customers on file (CRUD)
/// - **Product Actor**: the catalog and its stock counts
/// - **Rental Actor**: bookings and history; calls the Product actor to price and reserve
///
/// # Example
///
/// ```ignore
/// let system = RentalSystem::start(&AppConfig::load(None)?).await?;
///
/// let customer = system.customer_client.add_customer(CustomerCreate::named("Ada")).await?;
/// let rental = system.rental_client.book(booking_for(customer)).await?;
///
/// system.shutdown().await?;
/// ```
pub struct RentalSystem {
    pub customer_client: CustomerClient,
    pub product_client: ProductClient,
    pub rental_client: RentalClient,
    store: Store,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RentalSystem {
    /// Prepares the store and starts every actor.
    pub async fn start(config: &AppConfig) -> Result<Self, SystemError> {
        Self::start_with_receipts(config, random_receipts()).await
    }

    /// Like [`start`](Self::start), with a chosen receipt reference generator.
    pub async fn start_with_receipts(
        config: &AppConfig,
        receipts: ReceiptGenerator,
    ) -> Result<Self, SystemError> {
        let store = Store::open(&config.database.path);
        crate::store::migrate(&store).await?;

        let buffer = config.actors.buffer_size;

        // 1. Create actors (no dependencies yet)
        let (customer_actor, customer_client) = crate::customer_actor::new(store.clone(), buffer);
        let (product_actor, product_client) = crate::product_actor::new(store.clone(), buffer);
        let (rental_actor, rental_client) = crate::rental_actor::new(store.clone(), buffer);

        // 2. Start actors with injected context
        let customer_handle = tokio::spawn(customer_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(()));

        let rental_context = RentalContext::new(product_client.clone())
            .with_receipts(receipts)
            .with_reserve_stock(config.booking.reserve_stock)
            .with_receipt_attempts(config.booking.receipt_attempts);
        let rental_handle = tokio::spawn(rental_actor.run(rental_context));

        info!(
            store = %store.path().display(),
            reserve_stock = config.booking.reserve_stock,
            "Rental system started"
        );

        Ok(Self {
            customer_client,
            product_client,
            rental_client,
            store,
            handles: vec![customer_handle, product_handle, rental_handle],
        })
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Drops every client and waits for the actors to drain their mailboxes.
    ///
    /// The rental actor holds a product client in its context, so the product actor stops
    /// only after the rental actor has.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.customer_client);
        drop(self.product_client);
        drop(self.rental_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(SystemError::ActorFailed(e.to_string()));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
