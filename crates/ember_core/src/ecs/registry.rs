// registry.rs - Entity + component bookkeeping behind one API
//
// Every mutation that touches a component store also updates the owning
// entity's signature inside the same `&mut self` call, and validates before
// mutating, so no caller can see a set bit without a stored value or the
// reverse.

use crate::ecs::{
    Bundle, Component, ComponentDirectory, ComponentId, EcsError, Entity, EntityRegistry,
    Signature, MAX_ENTITIES,
};
use std::any::type_name;

/// The API systems and scene loaders program against.
pub struct Registry {
    entities: EntityRegistry,
    directory: ComponentDirectory,
}

impl Registry {
    pub fn new(max_entities: usize) -> Self {
        Self {
            entities: EntityRegistry::new(max_entities),
            directory: ComponentDirectory::new(),
        }
    }

    pub fn register_component<T: Component>(&mut self) -> Result<ComponentId, EcsError> {
        self.directory.register_component::<T>()
    }

    pub fn component_id<T: Component>(&self) -> Result<ComponentId, EcsError> {
        self.directory.component_id::<T>()
    }

    /// Create an entity holding a default value of every type in `B`.
    ///
    /// The entity is not active; systems see it only after it is added to
    /// the pool, which leaves room to fill in the components first.
    pub fn make_entity<B: Bundle + Default>(&mut self) -> Result<Entity, EcsError> {
        self.spawn(B::default())
    }

    /// Create an entity holding the given component values.
    pub fn spawn<B: Bundle>(&mut self, bundle: B) -> Result<Entity, EcsError> {
        let signature = B::register(&mut self.directory)?;
        let entity = self.entities.create_entity(signature)?;

        // A fresh id owns no slots, so inserts can only fail on a broken
        // invariant; unwind the entity rather than leave it half-built.
        if let Err(err) = bundle.insert(&mut self.directory, entity) {
            tracing::error!(%entity, error = %err, "bundle insert failed, unwinding entity");
            self.directory.entity_destroyed(entity);
            let released = self.entities.destroy_entity(entity);
            debug_assert!(released.is_ok(), "fresh entity {entity} could not be released");
            return Err(err);
        }
        Ok(entity)
    }

    /// False for dead or out-of-range entities and for unregistered types.
    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        let Ok(id) = self.directory.component_id::<T>() else {
            return false;
        };
        self.entities
            .signature(entity)
            .map(|signature| signature.test(id))
            .unwrap_or(false)
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.directory.get_component::<T>(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.directory.get_component_mut::<T>(entity)
    }

    /// Attach `value` to a live entity, registering `T` if needed.
    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), EcsError> {
        self.entities.ensure_alive(entity)?;
        let id = self.directory.register_component::<T>()?;
        if let Err(err) = self.directory.add_component(entity, value) {
            tracing::warn!(%entity, component = type_name::<T>(), error = %err, "add_component rejected");
            return Err(err);
        }
        self.entities.signature_mut(entity)?.set(id);
        Ok(())
    }

    pub fn add_default_component<T: Component + Default>(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.add_component(entity, T::default())
    }

    /// Detach and return the entity's `T`.
    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
        let id = self.directory.component_id::<T>()?;
        let value = match self.directory.remove_component::<T>(entity) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(%entity, component = type_name::<T>(), error = %err, "remove_component rejected");
                return Err(err);
            }
        };
        self.entities.signature_mut(entity)?.reset(id);
        Ok(value)
    }

    /// Visit every stored `T` in dense order. Values can be changed but not
    /// added or removed, so signatures stay in step with the store.
    pub fn for_each_mut<T: Component>(&mut self, mut f: impl FnMut(Entity, &mut T)) -> Result<(), EcsError> {
        for (entity, value) in self.directory.store_mut::<T>()?.iter_mut() {
            f(entity, value);
        }
        Ok(())
    }

    pub fn signature(&self, entity: Entity) -> Result<Signature, EcsError> {
        self.entities.signature(entity)
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn living_count(&self) -> usize {
        self.entities.living_count()
    }

    pub fn entities(&self) -> &EntityRegistry {
        &self.entities
    }

    pub fn directory(&self) -> &ComponentDirectory {
        &self.directory
    }

    /// Purge the entity's components and recycle its id. Pool membership is
    /// the caller's concern; `World::destroy_entity` handles all of it.
    pub(crate) fn destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.entities.ensure_alive(entity)?;
        self.directory.entity_destroyed(entity);
        self.entities.destroy_entity(entity)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new(MAX_ENTITIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    struct Position(Vec3);
    #[derive(Debug, Default, Clone, Copy, PartialEq)]
    struct Velocity(Vec3);
    #[derive(Debug, Default, PartialEq)]
    struct Scale(f32);

    /// has_component agrees with store membership for every pair.
    fn assert_consistent(registry: &Registry, entity: Entity) {
        let dir = registry.directory();
        if let Ok(store) = dir.store::<Position>() {
            assert_eq!(registry.has_component::<Position>(entity), store.contains(entity));
        }
        if let Ok(store) = dir.store::<Velocity>() {
            assert_eq!(registry.has_component::<Velocity>(entity), store.contains(entity));
        }
        if let Ok(store) = dir.store::<Scale>() {
            assert_eq!(registry.has_component::<Scale>(entity), store.contains(entity));
        }
    }

    #[test]
    fn make_entity_defaults_every_member() {
        let mut registry = Registry::default();
        let e = registry.make_entity::<(Position, Velocity)>().unwrap();

        assert!(registry.has_component::<Position>(e));
        assert!(registry.has_component::<Velocity>(e));
        assert!(!registry.has_component::<Scale>(e));
        assert_eq!(registry.get::<Position>(e), Ok(&Position::default()));
        assert_eq!(registry.signature(e).unwrap().len(), 2);
    }

    #[test]
    fn spawn_keeps_given_values() {
        let mut registry = Registry::default();
        let e = registry
            .spawn((Position(Vec3::X), Scale(2.0)))
            .unwrap();
        assert_eq!(registry.get::<Position>(e).unwrap().0, Vec3::X);
        assert_eq!(registry.get::<Scale>(e), Ok(&Scale(2.0)));
    }

    #[test]
    fn duplicate_bundle_type_creates_nothing() {
        let mut registry = Registry::default();
        let err = registry.make_entity::<(Position, Position)>().unwrap_err();
        assert!(matches!(err, EcsError::DuplicateBundleType { .. }));
        assert_eq!(registry.living_count(), 0);
        assert_eq!(registry.directory().registered_count(), 0);
    }

    #[test]
    fn add_and_remove_track_signature() {
        let mut registry = Registry::default();
        let e = registry.make_entity::<(Position,)>().unwrap();

        registry.add_component(e, Velocity(Vec3::Y)).unwrap();
        assert!(registry.has_component::<Velocity>(e));
        assert_consistent(&registry, e);

        assert_eq!(registry.remove_component::<Velocity>(e), Ok(Velocity(Vec3::Y)));
        assert!(!registry.has_component::<Velocity>(e));
        assert_consistent(&registry, e);

        registry.add_default_component::<Scale>(e).unwrap();
        assert_eq!(registry.get::<Scale>(e), Ok(&Scale(0.0)));
        assert_consistent(&registry, e);
    }

    #[test]
    fn remove_missing_component_is_a_protocol_violation() {
        let mut registry = Registry::default();
        registry.register_component::<Position>().unwrap();
        let e = registry.make_entity::<(Velocity,)>().unwrap();

        let err = registry.remove_component::<Position>(e).unwrap_err();
        assert!(matches!(err, EcsError::MissingComponent { entity, .. } if entity == e));
        assert_consistent(&registry, e);
    }

    #[test]
    fn remove_unregistered_component_is_reported() {
        let mut registry = Registry::default();
        let e = registry.make_entity::<()>().unwrap();
        assert!(matches!(
            registry.remove_component::<Scale>(e),
            Err(EcsError::UnregisteredComponent { .. })
        ));
    }

    #[test]
    fn duplicate_add_leaves_value_and_signature() {
        let mut registry = Registry::default();
        let e = registry.spawn((Scale(1.0),)).unwrap();

        let err = registry.add_component(e, Scale(9.0)).unwrap_err();
        assert!(matches!(err, EcsError::DuplicateComponent { .. }));
        assert_eq!(registry.get::<Scale>(e), Ok(&Scale(1.0)));
        assert!(registry.has_component::<Scale>(e));
    }

    #[test]
    fn add_to_dead_entity_is_refused() {
        let mut registry = Registry::default();
        let e = registry.make_entity::<()>().unwrap();
        registry.destroy_entity(e).unwrap();

        let err = registry.add_component(e, Scale(1.0)).unwrap_err();
        assert_eq!(err, EcsError::EntityNotAlive { entity: e });
        assert!(!registry.has_component::<Scale>(e));
        // Nothing was stored for the dead id.
        assert!(registry
            .directory()
            .store::<Scale>()
            .map(|store| store.is_empty())
            .unwrap_or(true));
    }

    #[test]
    fn get_mut_writes_through() {
        let mut registry = Registry::default();
        let e = registry.make_entity::<(Position,)>().unwrap();
        registry.get_mut::<Position>(e).unwrap().0 = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(registry.get::<Position>(e).unwrap().0, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn for_each_mut_touches_only_holders() {
        let mut registry = Registry::default();
        let a = registry.spawn((Position(Vec3::X), Velocity(Vec3::Y))).unwrap();
        let b = registry.spawn((Velocity(Vec3::Z),)).unwrap();
        let c = registry.spawn((Position(Vec3::Z),)).unwrap();

        let mut seen = Vec::new();
        registry
            .for_each_mut::<Position>(|entity, position| {
                seen.push(entity);
                position.0 *= 2.0;
            })
            .unwrap();

        seen.sort();
        assert_eq!(seen, vec![a, c]);
        assert_eq!(registry.get::<Position>(a).unwrap().0, Vec3::X * 2.0);
        assert_eq!(registry.get::<Position>(c).unwrap().0, Vec3::Z * 2.0);
        assert!(!registry.has_component::<Position>(b));
        assert_consistent(&registry, b);
    }

    #[test]
    fn for_each_mut_on_unregistered_type_fails() {
        let mut registry = Registry::default();
        let err = registry.for_each_mut::<Scale>(|_, _| {}).unwrap_err();
        assert!(matches!(err, EcsError::UnregisteredComponent { .. }));
    }

    #[test]
    fn failed_insert_unwinds_the_entity() {
        let mut registry = Registry::default();
        registry.register_component::<Position>().unwrap();
        // A stale slot for the id the next spawn will receive.
        registry
            .directory
            .add_component(Entity::from_raw(0), Position::default())
            .unwrap();

        let err = registry
            .spawn((Velocity(Vec3::X), Position(Vec3::Y)))
            .unwrap_err();

        assert!(matches!(err, EcsError::DuplicateComponent { .. }));
        assert_eq!(registry.living_count(), 0);
        assert!(!registry.is_alive(Entity::from_raw(0)));
        assert!(registry.directory().store::<Velocity>().unwrap().is_empty());
        assert!(registry.directory().store::<Position>().unwrap().is_empty());
    }

    #[test]
    fn capacity_applies_to_make_entity() {
        let mut registry = Registry::new(2);
        registry.make_entity::<(Scale,)>().unwrap();
        registry.make_entity::<(Scale,)>().unwrap();

        let err = registry.make_entity::<(Scale,)>().unwrap_err();
        assert_eq!(err, EcsError::EntityLimitReached { max: 2 });
        assert_eq!(registry.directory().store::<Scale>().unwrap().len(), 2);
    }
}
