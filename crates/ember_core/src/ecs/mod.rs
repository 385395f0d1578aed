//! Entity Component System core types.
//!
//! Entities are plain ids with a component bitmask. Each component type
//! lives in its own densely packed store, and systems run in registration
//! order over the pool of active entities. A `World` ties the three
//! managers together.

mod bundle;
mod component;
mod entity;
mod error;
mod registry;
pub mod storage;
mod system;
mod system_handle;
mod system_registry;
mod world;

pub use bundle::Bundle;
pub use component::{Component, ComponentDirectory, ComponentId, MAX_COMPONENTS};
pub use entity::{Entity, EntityRegistry, Signature, MAX_ENTITIES};
pub use error::{EcsError, SystemError};
pub use registry::Registry;
pub use storage::{ComponentStore, ErasedStore};
pub use system::{ActiveEntities, System};
pub use system_handle::SystemHandle;
pub use system_registry::SystemRegistry;
pub use world::World;
