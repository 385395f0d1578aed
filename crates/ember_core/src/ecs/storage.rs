// storage.rs - Dense per-type component storage
//
// Values live in one contiguous Vec with no holes. Two indices map between
// entities and slots; removal swap-removes and patches both indices so the
// array stays packed for iteration.

use crate::ecs::{EcsError, Entity};
use std::any::{type_name, Any};
use std::collections::HashMap;

/// Packed storage for every value of one component type.
pub struct ComponentStore<T> {
    values: Vec<T>,
    entity_to_index: HashMap<Entity, usize>,
    index_to_entity: Vec<Entity>,
}

impl<T: 'static> ComponentStore<T> {
    pub fn new() -> Self {
        Self {
            values: Vec::new(),
            entity_to_index: HashMap::new(),
            index_to_entity: Vec::new(),
        }
    }

    /// Append `value` for `entity`. A second insert for the same entity is
    /// refused and leaves the store untouched.
    pub fn insert(&mut self, entity: Entity, value: T) -> Result<(), EcsError> {
        if self.entity_to_index.contains_key(&entity) {
            return Err(EcsError::DuplicateComponent {
                entity,
                component: type_name::<T>(),
            });
        }

        let index = self.values.len();
        self.values.push(value);
        self.index_to_entity.push(entity);
        self.entity_to_index.insert(entity, index);
        Ok(())
    }

    /// Remove and return the value for `entity`, moving the last slot into
    /// the hole.
    pub fn remove(&mut self, entity: Entity) -> Result<T, EcsError> {
        let index = self
            .entity_to_index
            .remove(&entity)
            .ok_or(EcsError::MissingComponent {
                entity,
                component: type_name::<T>(),
            })?;

        let value = self.values.swap_remove(index);
        self.index_to_entity.swap_remove(index);

        // If something moved into `index`, point its entity at the new slot.
        if let Some(&moved) = self.index_to_entity.get(index) {
            self.entity_to_index.insert(moved, index);
        }
        Ok(value)
    }

    #[inline]
    pub fn get(&self, entity: Entity) -> Option<&T> {
        let &index = self.entity_to_index.get(&entity)?;
        self.values.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        let &index = self.entity_to_index.get(&entity)?;
        self.values.get_mut(index)
    }

    #[inline]
    pub fn contains(&self, entity: Entity) -> bool {
        self.entity_to_index.contains_key(&entity)
    }

    /// Drop the entity's value if it has one.
    pub fn on_entity_destroyed(&mut self, entity: Entity) {
        if self.contains(entity) {
            let _ = self.remove(entity);
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Dense values in slot order.
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    /// Owners of each slot, parallel to `as_slice`.
    pub fn entities(&self) -> &[Entity] {
        &self.index_to_entity
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.index_to_entity.iter().copied().zip(self.values.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.index_to_entity
            .iter()
            .copied()
            .zip(self.values.iter_mut())
    }

    /// Assert that both indices are exact inverses over `[0, len)`.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert_eq!(self.values.len(), self.index_to_entity.len());
        assert_eq!(self.values.len(), self.entity_to_index.len());
        for (slot, entity) in self.index_to_entity.iter().enumerate() {
            assert_eq!(self.entity_to_index.get(entity), Some(&slot));
        }
    }
}

impl<T: 'static> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Object-safe view of a `ComponentStore<T>` with the type erased.
///
/// Destruction is the only operation that has to reach every store without
/// knowing its type; typed access goes back through `as_any`.
pub trait ErasedStore: Any {
    fn on_entity_destroyed(&mut self, entity: Entity);
    fn contains(&self, entity: Entity) -> bool;
    fn len(&self) -> usize;
    fn type_name(&self) -> &'static str;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> ErasedStore for ComponentStore<T> {
    fn on_entity_destroyed(&mut self, entity: Entity) {
        ComponentStore::on_entity_destroyed(self, entity);
    }

    fn contains(&self, entity: Entity) -> bool {
        ComponentStore::contains(self, entity)
    }

    fn len(&self) -> usize {
        ComponentStore::len(self)
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
