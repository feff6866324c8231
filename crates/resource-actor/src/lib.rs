//! # Resource Actor
//!
//! Building blocks for store-backed resource services. Each resource (a table, in
//! practice) is served by one [`ResourceActor`] that owns a [`Store`] handle and answers
//! typed [`ResourceRequest`]s one at a time. Callers talk to it through a cloneable
//! [`ResourceClient`].
//!
//! ## Layers
//!
//! 1. **Entity** ([`PersistentEntity`]) - the rows, their DTOs and the SQL behind each request
//! 2. **Runtime** ([`ResourceActor`]) - the request loop and per-request connection handling
//! 3. **Interface** ([`ResourceClient`], [`EntityClient`]) - typed requests and error mapping
//!
//! ## Requests
//!
//! Every user action is one [`ResourceRequest`] variant: `Create`, `Get`, `List`, `Update`,
//! `Delete`, or a resource-specific `Action`. The actor dispatches them in a single `match`,
//! which is the only place requests are handled.
//!
//! ## Connections
//!
//! The actor does not pool connections. It opens one per request and closes it after the
//! reply is built, so a store failure only costs that request; the actor keeps serving.
//!
//! ## Context Injection
//!
//! Dependencies are passed to [`ResourceActor::run`] rather than to the constructor. A rental
//! actor can therefore be given the product client after both actors exist:
//!
//! ```rust,ignore
//! let (product_actor, products) = ResourceActor::<Product>::new(store.clone(), 32);
//! let (rental_actor, rentals) = ResourceActor::<Rental>::new(store.clone(), 32);
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(rental_actor.run(RentalContext::new(ProductClient::new(products.clone()))));
//! ```
//!
//! ## Testing
//!
//! See [`mock`] for scripted clients that stand in for a dependency actor.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod store;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::EntityClient;
pub use entity::PersistentEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use store::Store;
