//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors.
//!
//! ## Wiring
//!
//! Actors are created first and receive their dependencies when they start running:
//!
//! ```rust,ignore
//! let (product_actor, product_client) = product_actor::new(store.clone(), 32);
//! let (rental_actor, rental_client) = rental_actor::new(store.clone(), 32);
//!
//! tokio::spawn(product_actor.run(()));
//! tokio::spawn(rental_actor.run(RentalContext::new(product_client.clone())));
//! ```
//!
//! | Actor | Context |
//! |---|---|
//! | Customer | `()` |
//! | Product | `()` |
//! | Rental | [`RentalContext`](crate::rental_actor::RentalContext) (product client, receipt generator, booking settings) |
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients** - closes the sending side of each mailbox
//! 2. **Actors detect closure** - `recv()` returns `None` once queued requests are answered
//! 3. **Await completion** - [`RentalSystem::shutdown`] joins every task
//!
//! The dependency graph is acyclic (rental depends on product, nothing depends on rental),
//! so channel closure alone is enough to stop everything.

pub mod rental_system;
pub mod tracing;

pub use rental_system::*;
pub use self::tracing::*;
