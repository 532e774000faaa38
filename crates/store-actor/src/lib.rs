//! # Store Actor
//!
//! Building blocks for in-process resource stores: each resource type lives in its
//! own actor, and callers talk to it through a typed, cloneable client.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the stored type, its payloads and hooks.
//! 2. **Runtime** ([`ResourceActor`]): owns the entities and processes requests
//!    sequentially in a Tokio task.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): type-safe request
//!    sending.
//!
//! Each actor owns an [`IdGenerator`] that issues `1, 2, 3, ...` and is rewound by
//! a `Reset` request. Entities are kept in id order, so `List` responses are
//! stable between writes.
//!
//! ## Request set
//!
//! Create, Get, List, Update and Reset. See [`ResourceRequest`]. There is no
//! delete: stored resources are only ever cleared as a whole.
//!
//! ## Context Injection
//!
//! Dependencies arrive through [`ResourceActor::run`], not through `new`, so an
//! actor can be handed clients of actors created after it:
//!
//! ```rust,ignore
//! let (restaurants, restaurant_client) = ResourceActor::<Restaurant>::new(32);
//! let (orders, order_client) = ResourceActor::<Order>::new(32);
//!
//! tokio::spawn(restaurants.run(()));
//! tokio::spawn(orders.run(Some(restaurant_client.clone())));
//! ```
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from scripted expectations, which lets a
//! real actor run against mocked dependencies.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod id;
pub mod message;
pub mod mock;
pub mod telemetry;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use id::IdGenerator;
pub use message::{ResourceRequest, Response};
