//! # Generic Actor Server
//!
//! `ResourceActor` is the server half of a resource: it owns the request receiver and the
//! [`Store`] handle, and answers one request at a time. Each request gets its own store
//! connection, which is closed before the next request is read.

use crate::client::ResourceClient;
use crate::entity::PersistentEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::store::Store;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Opens a connection, awaits `$body` on it and closes it again.
///
/// Entity errors are boxed into [`FrameworkError::EntityError`]; a failed connect becomes
/// [`FrameworkError::Store`].
macro_rules! on_connection {
    ($store:expr, $conn:ident => $body:expr) => {
        match $store.connect().await {
            Ok(mut $conn) => {
                let result = $body.await.map_err(FrameworkError::entity);
                $store.release($conn).await;
                result
            }
            Err(e) => Err(FrameworkError::from(e)),
        }
    };
}

/// The generic actor that serves a stored resource.
///
/// **Concurrency Model**:
/// Requests are handled sequentially inside the actor's task, so two writes from the same
/// service never interleave. Different services run in their own tasks and meet only at
/// the store, where SQLite's unique indexes and locking settle any conflict.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new(store, buffer)` returns the actor and its client.
/// 2.  **Wire**: pass dependencies into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop on a Tokio task.
///
/// ```rust,ignore
/// let (actor, client) = ResourceActor::<Product>::new(store.clone(), 32);
/// tokio::spawn(actor.run(()));
/// let products = client.list(ProductFilter::All).await?;
/// ```
pub struct ResourceActor<T: PersistentEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: Store,
}

impl<T: PersistentEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the mailbox capacity; senders wait once it is full.
    pub fn new(store: Store, buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self { receiver, store };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// # Context Injection
    /// `context` is passed to every write hook, which lets an entity call other actors
    /// that were created after this one.
    pub async fn run(mut self, context: T::Context) {
        // "Product" instead of "rental_desk::model::product::Product"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, store = %self.store.path().display(), "Actor started");

        let mut handled: u64 = 0;
        while let Some(msg) = self.receiver.recv().await {
            handled += 1;
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result =
                        on_connection!(self.store, conn => T::insert(&mut conn, params, &context));
                    match &result {
                        Ok(id) => info!(entity_type, %id, "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let result = on_connection!(self.store, conn => T::fetch(&mut conn, &id));
                    match &result {
                        Ok(item) => debug!(entity_type, %id, found = item.is_some(), "Get"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Get failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::List { filter, respond_to } => {
                    debug!(entity_type, ?filter, "List");
                    let result = on_connection!(self.store, conn => T::list(&mut conn, filter));
                    match &result {
                        Ok(items) => debug!(entity_type, count = items.len(), "Listed"),
                        Err(e) => warn!(entity_type, error = %e, "List failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result =
                        on_connection!(self.store, conn => T::update(&mut conn, &id, update, &context))
                            .and_then(|item| {
                                item.ok_or_else(|| FrameworkError::NotFound(id.to_string()))
                            });
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result =
                        on_connection!(self.store, conn => T::delete(&mut conn, &id, &context))
                            .and_then(|removed| {
                                if removed {
                                    Ok(())
                                } else {
                                    Err(FrameworkError::NotFound(id.to_string()))
                                }
                            });
                    match &result {
                        Ok(()) => info!(entity_type, %id, "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action { action, respond_to } => {
                    debug!(entity_type, ?action, "Action");
                    let result =
                        on_connection!(self.store, conn => T::handle_action(&mut conn, action, &context));
                    match &result {
                        Ok(_) => info!(entity_type, "Action ok"),
                        Err(e) => warn!(entity_type, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, handled, "Shutdown");
    }
}
