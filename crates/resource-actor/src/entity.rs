//! # PersistentEntity Trait
//!
//! The `PersistentEntity` trait is the contract every stored resource (Customer, Product,
//! Rental, …) implements to be served by the generic `ResourceActor`. It names the DTOs for
//! each request kind and supplies the SQL that backs them. The actor owns the connection
//! handling and the message loop; the entity owns the rows.
//!
//! # Architecture Note
//! The actor hands every hook a freshly opened `SqliteConnection`. The connection is closed
//! once the request has been answered, so an entity must not keep anything from it beyond
//! the returned values.
//!
//! Associated types keep requests honest: a `Product` actor only accepts `ProductCreate`
//! payloads, and a `Rental` actor only accepts `BookingRequest`s.

use async_trait::async_trait;
use sqlx::SqliteConnection;
use std::fmt::{Debug, Display};

/// Trait that any stored resource must implement to be managed by `ResourceActor`.
///
/// # Context
/// `Context` carries runtime dependencies (other clients, generators, settings) and is
/// injected through `ResourceActor::run`, not at construction time. Use `()` when the
/// entity needs nothing.
#[async_trait]
pub trait PersistentEntity: Clone + Send + Sync + Debug + 'static {
    /// Store-assigned identifier.
    type Id: Clone + Send + Sync + Display + Debug;

    /// Payload for creating a new row.
    type Create: Send + Sync + Debug;

    /// Payload for updating an existing row.
    type Update: Send + Sync + Debug;

    /// Selection criteria for `list` requests.
    type Filter: Send + Sync + Debug;

    /// Resource-specific operations that are not plain CRUD (e.g. `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into the actor.
    type Context: Send + Sync;

    /// One error enum per resource. Clients downcast the boxed framework error back to it.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Validates the payload and writes a new row, returning its id.
    async fn insert(
        conn: &mut SqliteConnection,
        params: Self::Create,
        ctx: &Self::Context,
    ) -> Result<Self::Id, Self::Error>;

    /// Reads a single row.
    async fn fetch(conn: &mut SqliteConnection, id: &Self::Id)
        -> Result<Option<Self>, Self::Error>;

    /// Reads every row matching `filter`, in the resource's canonical order.
    async fn list(
        conn: &mut SqliteConnection,
        filter: Self::Filter,
    ) -> Result<Vec<Self>, Self::Error>;

    /// Applies an update. `Ok(None)` means no row has that id.
    async fn update(
        conn: &mut SqliteConnection,
        id: &Self::Id,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<Option<Self>, Self::Error>;

    /// Removes a row. `Ok(false)` means no row has that id.
    async fn delete(
        conn: &mut SqliteConnection,
        id: &Self::Id,
        ctx: &Self::Context,
    ) -> Result<bool, Self::Error>;

    /// Handles a custom resource-specific action.
    async fn handle_action(
        conn: &mut SqliteConnection,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
