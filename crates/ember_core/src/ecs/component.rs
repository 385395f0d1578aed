// component.rs - Runtime component registration
//
// Component types get small integer ids in registration order. The id picks
// both the signature bit and the slot of the type's store in the directory,
// so typed lookups are one hash (TypeId -> id) and one downcast.

use crate::ecs::{ComponentStore, EcsError, Entity, ErasedStore};
use std::any::{type_name, TypeId};
use std::collections::HashMap;

/// Index of a registered component type, also its signature bit.
pub type ComponentId = u8;

/// Width of `Signature`, and so the most component types one world can hold.
pub const MAX_COMPONENTS: usize = 32;

/// Anything `'static` can be a component; no derive or registration macro
/// is needed beyond calling `register_component` (or letting a bundle do it).
pub trait Component: 'static {}

impl<T: 'static> Component for T {}

/// Owns one store per registered component type.
#[derive(Default)]
pub struct ComponentDirectory {
    ids: HashMap<TypeId, ComponentId>,
    stores: Vec<Box<dyn ErasedStore>>,
}

impl ComponentDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `T` an id and create its store. Registering again returns the
    /// original id and keeps the existing store and its contents.
    pub fn register_component<T: Component>(&mut self) -> Result<ComponentId, EcsError> {
        if let Some(&id) = self.ids.get(&TypeId::of::<T>()) {
            return Ok(id);
        }
        if self.stores.len() >= MAX_COMPONENTS {
            tracing::error!(
                component = type_name::<T>(),
                max = MAX_COMPONENTS,
                "component type capacity exhausted"
            );
            return Err(EcsError::ComponentLimitReached {
                max: MAX_COMPONENTS,
            });
        }

        let id = self.stores.len() as ComponentId;
        self.ids.insert(TypeId::of::<T>(), id);
        self.stores.push(Box::new(ComponentStore::<T>::new()));
        tracing::debug!(component = type_name::<T>(), id, "component registered");
        Ok(id)
    }

    pub fn component_id<T: Component>(&self) -> Result<ComponentId, EcsError> {
        self.ids
            .get(&TypeId::of::<T>())
            .copied()
            .ok_or(EcsError::UnregisteredComponent {
                component: type_name::<T>(),
            })
    }

    pub fn is_registered<T: Component>(&self) -> bool {
        self.ids.contains_key(&TypeId::of::<T>())
    }

    pub fn store<T: Component>(&self) -> Result<&ComponentStore<T>, EcsError> {
        let id = self.component_id::<T>()?;
        self.stores[id as usize]
            .as_any()
            .downcast_ref::<ComponentStore<T>>()
            .ok_or(EcsError::UnregisteredComponent {
                component: type_name::<T>(),
            })
    }

    pub fn store_mut<T: Component>(&mut self) -> Result<&mut ComponentStore<T>, EcsError> {
        let id = self.component_id::<T>()?;
        self.stores[id as usize]
            .as_any_mut()
            .downcast_mut::<ComponentStore<T>>()
            .ok_or(EcsError::UnregisteredComponent {
                component: type_name::<T>(),
            })
    }

    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), EcsError> {
        self.store_mut::<T>()?.insert(entity, value)
    }

    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
        self.store_mut::<T>()?.remove(entity)
    }

    pub fn get_component<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.store::<T>()?
            .get(entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    pub fn get_component_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.store_mut::<T>()?
            .get_mut(entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })
    }

    /// Purge `entity` from every store, whether or not it has a value there.
    pub fn entity_destroyed(&mut self, entity: Entity) {
        for store in &mut self.stores {
            store.on_entity_destroyed(entity);
        }
    }

    pub fn registered_count(&self) -> usize {
        self.stores.len()
    }

    /// Type name behind `id`, for diagnostics.
    pub fn name_of(&self, id: ComponentId) -> Option<&'static str> {
        self.stores.get(id as usize).map(|store| store.type_name())
    }

    /// Number of stored values per registered type, in id order.
    pub fn store_sizes(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.stores.iter().map(|store| (store.type_name(), store.len()))
    }
}
