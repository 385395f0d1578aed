// world.rs - The ECS context object
//
// One World owns the entity registry, the component directory (both inside
// `Registry`) and the system registry. Nothing is global, so independent
// worlds can live side by side.

use crate::config::WorldConfig;
use crate::ecs::{
    ActiveEntities, Bundle, Component, ComponentId, EcsError, Entity, Registry, System,
    SystemError, SystemHandle, SystemRegistry,
};
use ember_metrics::Counter;

/// Entities, components and systems for one simulation.
pub struct World {
    registry: Registry,
    systems: SystemRegistry,
    counters: Counter,
}

impl World {
    /// Create a world with the default capacity.
    pub fn new() -> Self {
        Self::with_config(WorldConfig::default())
    }

    pub fn with_config(config: WorldConfig) -> Self {
        tracing::debug!(max_entities = config.max_entities, "world created");
        Self {
            registry: Registry::new(config.max_entities),
            systems: SystemRegistry::new(),
            counters: Counter::new(),
        }
    }

    pub fn register_component<T: Component>(&mut self) -> Result<ComponentId, EcsError> {
        self.registry.register_component::<T>()
    }

    pub fn register_system<S: System + Default>(&mut self) -> SystemHandle {
        self.systems.register_system::<S>()
    }

    pub fn add_system<S: System>(&mut self, system: S) -> SystemHandle {
        self.systems.add_system(system)
    }

    /// See `Registry::make_entity`. The entity still has to be activated.
    pub fn make_entity<B: Bundle + Default>(&mut self) -> Result<Entity, EcsError> {
        let entity = self.registry.make_entity::<B>()?;
        self.counters.increment("entities_created", 1);
        Ok(entity)
    }

    pub fn spawn<B: Bundle>(&mut self, bundle: B) -> Result<Entity, EcsError> {
        let entity = self.registry.spawn(bundle)?;
        self.counters.increment("entities_created", 1);
        Ok(entity)
    }

    /// Make a constructed entity visible to systems.
    pub fn add_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        if !self.registry.is_alive(entity) {
            return Err(EcsError::EntityNotAlive { entity });
        }
        self.systems.add_entity(entity);
        Ok(())
    }

    /// Hide an entity from systems without destroying it.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        self.systems.remove_entity(entity)
    }

    /// Destroy an entity completely: components, signature, id and pool
    /// membership. A dead or out-of-range entity is rejected untouched.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.registry.destroy_entity(entity)?;
        self.systems.remove_entity(entity);
        self.counters.increment("entities_destroyed", 1);
        Ok(())
    }

    pub fn has_component<T: Component>(&self, entity: Entity) -> bool {
        self.registry.has_component::<T>(entity)
    }

    pub fn get<T: Component>(&self, entity: Entity) -> Result<&T, EcsError> {
        self.registry.get::<T>(entity)
    }

    pub fn get_mut<T: Component>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        self.registry.get_mut::<T>(entity)
    }

    pub fn add_component<T: Component>(&mut self, entity: Entity, value: T) -> Result<(), EcsError> {
        self.registry.add_component(entity, value)
    }

    pub fn add_default_component<T: Component + Default>(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.registry.add_default_component::<T>(entity)
    }

    pub fn remove_component<T: Component>(&mut self, entity: Entity) -> Result<T, EcsError> {
        self.registry.remove_component::<T>(entity)
    }

    /// First active entity (lowest id) that has a `T`.
    pub fn first_active_with<T: Component>(&self) -> Option<Entity> {
        self.systems
            .entities()
            .iter()
            .find(|&entity| self.registry.has_component::<T>(entity))
    }

    /// Run one simulation step.
    pub fn update(&mut self, delta: f64) -> Result<(), SystemError> {
        self.systems.update(&mut self.registry, delta)
    }

    pub fn active_entities(&self) -> &ActiveEntities {
        self.systems.entities()
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn systems(&self) -> &SystemRegistry {
        &self.systems
    }

    pub fn systems_mut(&mut self) -> &mut SystemRegistry {
        &mut self.systems
    }

    pub fn counters(&self) -> &Counter {
        &self.counters
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
