//! # Rental Desk
//!
//! > **The back office of a small vehicle rental business.**
//!
//! Customers, a product catalog (cars, vans, minibuses, trucks) and an append-only ledger of
//! rentals, kept in one SQLite file. Each service is a resource actor: a Tokio task that
//! answers typed requests one at a time and opens a store connection per request.
//!
//! ## 🏗️ Design
//!
//! - **One request per user action**: every command is a single [`ResourceRequest`](resource_actor::ResourceRequest)
//!   dispatched by the actor's `run` loop.
//! - **The store is the only state**: services cache nothing; every listing re-reads the table.
//! - **Uniqueness at the store**: product codes and receipt references are unique indexes, and
//!   a constraint failure is turned into a typed error (or, for receipts, another attempt).
//! - **Money in decimals**: billing uses [`rust_decimal::Decimal`] rounded to pennies, so
//!   `total == subtotal + tax` holds exactly for every stored row.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`resource_actor`])
//! The generic [`ResourceActor`](resource_actor::ResourceActor), its client, the
//! [`PersistentEntity`](resource_actor::PersistentEntity) contract and the mock clients.
//!
//! ### 2. The Services ([`customer_actor`], [`product_actor`], [`rental_actor`])
//! One `PersistentEntity` implementation per table, with its error type and factory.
//!
//! ### 3. The Interface ([`clients`])
//! Typed wrappers such as [`RentalClient::book`](clients::RentalClient::book) that hide the
//! message passing and hand back each service's own error enum.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! [`RentalSystem`](lifecycle::RentalSystem) prepares the store, starts and wires the actors,
//! and shuts them down.
//!
//! ### Supporting modules
//! - [`pricing`] - period tiers, discounts, tax and the billing formula
//! - [`store`] - schema, default catalog and column conversions
//! - [`report`] - printed receipts, CSV export, analytics
//! - [`config`] - settings from file and environment
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! rental-desk products list
//! rental-desk customers add "Ada Lovelace" --phone 01234
//! rental-desk book --customer 1 --type Car --period "1-30 days" --payment Cash
//! rental-desk rentals search car
//! RUST_LOG=info rental-desk stats
//! ```

pub mod clients;
pub mod config;
pub mod customer_actor;
pub mod error;
pub mod lifecycle;
pub mod model;
pub mod pricing;
pub mod product_actor;
pub mod rental_actor;
pub mod report;
pub mod store;
