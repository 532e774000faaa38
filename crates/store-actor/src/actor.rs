//! # Generic Actor Server
//!
//! `ResourceActor` owns the entities of one type and processes requests one at a
//! time, so the store needs no locking.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::id::IdGenerator;
use crate::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// The actor is the server half: it owns the `store` and the receiving end of the
/// channel. Each instance runs in its own Tokio task and handles one message at a
/// time, which is what keeps concurrent creates from producing duplicate ids.
///
/// # Usage Pattern
///
/// 1. Call [`ResourceActor::new`] to get the actor and its client.
/// 2. Pass dependencies (other clients) into [`ResourceActor::run`].
/// 3. Spawn the returned future.
///
/// ```rust
/// use async_trait::async_trait;
/// use store_actor::{ActorEntity, ResourceActor};
///
/// #[derive(Clone, Debug)]
/// struct Tag {
///     id: u32,
///     label: String,
/// }
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("tag error")]
/// struct TagError;
///
/// #[async_trait]
/// impl ActorEntity for Tag {
///     type Id = u32;
///     type Create = String;
///     type Update = String;
///     type Filter = ();
///     type Context = ();
///     type Error = TagError;
///
///     fn from_create_params(id: u32, label: String) -> Result<Self, TagError> {
///         Ok(Self { id, label })
///     }
///     fn matches(&self, _: &()) -> bool {
///         true
///     }
///     async fn on_update(&mut self, label: String, _: &()) -> Result<(), TagError> {
///         self.label = label;
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Tag>::new(8);
///     tokio::spawn(actor.run(()));
///
///     let tag = client.create("spicy".to_string()).await.unwrap();
///     assert_eq!(tag.id, 1);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: issues an id from the generator (the counter advances even if
///   the create is later rejected), calls `from_create_params`, then `on_create`,
///   inserts, and returns a clone of the stored entity.
/// * **Get**: clone of the entity, or `None`.
/// * **List**: clones of matching entities in ascending id order.
/// * **Update**: `on_update` on the stored entity, then returns the new state.
/// * **Reset**: clears the store and rewinds the generator to 1.
/// * **Stop**: ends the loop. Requests still queued are dropped and their
///   callers see `ActorDropped`; later sends fail with `ActorClosed`.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    ids: IdGenerator,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new `ResourceActor` with a fresh [`IdGenerator`] and its client.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full,
    /// client calls wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        Self::with_id_generator(buffer_size, IdGenerator::new())
    }

    /// Creates an actor that issues ids from an existing generator.
    pub fn with_id_generator(buffer_size: usize, ids: IdGenerator) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            ids,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// A handle on this actor's id counter.
    pub fn id_generator(&self) -> IdGenerator {
        self.ids.clone()
    }

    /// Runs the actor's event loop, processing messages until every client is
    /// dropped or a Stop request arrives.
    ///
    /// `context` is handed to every entity hook. It may hold clients of actors that
    /// were created after this one.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.ids.next_id());

                    match T::from_create_params(id, params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, %id, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id, item.clone());
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(item));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items: Vec<T> = self
                        .store
                        .values()
                        .filter(|item| item.matches(&filter))
                        .cloned()
                        .collect();
                    debug!(entity_type, ?filter, count = items.len(), "Listed");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    if let Some(item) = self.store.get_mut(&id) {
                        if let Err(e) = item.on_update(update, &context).await {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                        info!(entity_type, %id, "Updated");
                        let _ = respond_to.send(Ok(item.clone()));
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                    }
                }
                ResourceRequest::Reset { respond_to } => {
                    let removed = self.store.len();
                    self.store.clear();
                    self.ids.reset();
                    info!(entity_type, removed, "Reset");
                    let _ = respond_to.send(Ok(removed));
                }
                ResourceRequest::Stop { respond_to } => {
                    info!(entity_type, size = self.store.len(), "Stop requested");
                    let _ = respond_to.send(Ok(self.store.len()));
                    break;
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
