//! # ActorEntity Trait
//!
//! The contract every stored resource (Restaurant, MenuItem, Order, ...) implements
//! so a generic [`ResourceActor`](crate::ResourceActor) can own it.
//!
//! Associated types keep payloads from crossing entity boundaries: a `MenuItem`
//! actor only accepts `MenuItem::Create`, and the compiler rejects anything else.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`] defaults to `Ok(())`.
//!
//! Entities that are immutable after creation can use
//! [`std::convert::Infallible`] as their `Update` type and match on it in
//! `on_update`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by ResourceActor.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` associated type is
/// injected into every hook when the actor starts, which lets dependencies be
/// wired after construction.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Unique identifier. Built from the `u32` issued by the actor's
    /// [`IdGenerator`](crate::IdGenerator). `Ord` keeps listings in id order.
    type Id: Ord + Hash + Copy + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Selection criteria accepted by `List` requests.
    type Filter: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per actor, covering every hook.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full entity from the issued id and the payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this entity belongs in a `List` response for `filter`.
    fn matches(&self, filter: &Self::Filter) -> bool;

    // --- Lifecycle Hooks (Async) ---

    /// Called after construction and before the entity is stored. An error here
    /// rejects the create; the issued id is not handed out again.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        ctx: &Self::Context,
    ) -> Result<(), Self::Error>;
}
