//! # Generic Messages
//!
//! Message types exchanged between a `ResourceClient` and its `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Request sent to an actor.
///
/// Each actor manages one resource type, so the request set is a fixed
/// lifecycle vocabulary instead of ad-hoc messages:
///
/// - **Create**: issues an id, builds the entity from [`ActorEntity::Create`],
///   runs `on_create`, and answers with the stored entity.
/// - **Get**: point lookup. A missing id is `Ok(None)`.
/// - **List**: every entity accepted by [`ActorEntity::matches`], in id order.
/// - **Update**: mutates through `on_update`. A missing id is
///   [`FrameworkError::NotFound`].
/// - **Reset**: drops every entity, rewinds the id generator, and answers with
///   the number of entities removed.
/// - **Stop**: answers with the number of entities held and leaves the loop,
///   even while clients are still alive.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
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
    Reset {
        respond_to: Response<usize>,
    },
    Stop {
        respond_to: Response<usize>,
    },
}
