use crate::ecs::{EcsError, Entity, Registry};
use std::collections::btree_set::{self, BTreeSet};

/// Logic run once per simulation step.
///
/// Every system receives the same pool of active entities and decides per
/// entity whether it applies, usually with `Registry::has_component`:
///
/// ```ignore
/// impl System for Movement {
///     fn update(&mut self, entities: &ActiveEntities, registry: &mut Registry, delta: f64) -> Result<(), EcsError> {
///         for entity in entities {
///             if !(registry.has_component::<Position>(entity) && registry.has_component::<Velocity>(entity)) {
///                 continue;
///             }
///             let velocity = registry.get::<Velocity>(entity)?.0;
///             registry.get_mut::<Position>(entity)?.0 += velocity * delta as f32;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait System: 'static {
    fn update(
        &mut self,
        entities: &ActiveEntities,
        registry: &mut Registry,
        delta: f64,
    ) -> Result<(), EcsError>;

    /// Label used in logs and profiling.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// The entities visible to systems, in ascending id order.
#[derive(Debug, Default, Clone)]
pub struct ActiveEntities {
    entities: BTreeSet<Entity>,
}

impl ActiveEntities {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if the entity was already active.
    pub fn insert(&mut self, entity: Entity) -> bool {
        self.entities.insert(entity)
    }

    /// Returns false if the entity was not active.
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.entities.remove(&entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> std::iter::Copied<btree_set::Iter<'_, Entity>> {
        self.entities.iter().copied()
    }
}

impl<'a> IntoIterator for &'a ActiveEntities {
    type Item = Entity;
    type IntoIter = std::iter::Copied<btree_set::Iter<'a, Entity>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_is_an_ordered_set() {
        let mut pool = ActiveEntities::new();
        assert!(pool.insert(Entity::from_raw(9)));
        assert!(pool.insert(Entity::from_raw(2)));
        assert!(!pool.insert(Entity::from_raw(9)));

        let ids: Vec<u32> = pool.iter().map(Entity::id).collect();
        assert_eq!(ids, vec![2, 9]);

        assert!(pool.remove(Entity::from_raw(2)));
        assert!(!pool.remove(Entity::from_raw(2)));
        assert_eq!(pool.len(), 1);
        assert!(pool.contains(Entity::from_raw(9)));
    }
}
