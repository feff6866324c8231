//! # Generic Messages
//!
//! The request type exchanged between `ResourceClient` and `ResourceActor`. Every user
//! action becomes exactly one variant, answered on its own oneshot channel.

use crate::entity::PersistentEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to a resource actor.
///
/// The variants map onto CRUD plus `List` for ordered reads and `Action` for
/// resource-specific operations. Payload types come from the [`PersistentEntity`]
/// implementation, so a `Customer` payload cannot reach the `Product` actor.
#[derive(Debug)]
pub enum ResourceRequest<T: PersistentEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: T::Filter,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
