use crate::ecs::{ActiveEntities, Entity, Registry, System, SystemError, SystemHandle};
use ember_metrics::SystemProfiler;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;

/// Registered systems in dispatch order plus the shared active pool.
#[derive(Default)]
pub struct SystemRegistry {
    systems: Vec<RegisteredSystem>,
    lookup: HashMap<TypeId, SystemHandle>,
    active: ActiveEntities,
    profiler: SystemProfiler,
}

impl SystemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct and register `S` once. Later calls return the existing
    /// handle without building another instance.
    pub fn register_system<S: System + Default>(&mut self) -> SystemHandle {
        if let Some(handle) = self.existing::<S>() {
            return handle;
        }
        self.push(S::default())
    }

    /// Register an already-constructed system. If `S` is registered the
    /// argument is dropped and the live instance stays.
    pub fn add_system<S: System>(&mut self, system: S) -> SystemHandle {
        if let Some(handle) = self.existing::<S>() {
            return handle;
        }
        self.push(system)
    }

    fn existing<S: System>(&self) -> Option<SystemHandle> {
        let handle = self.lookup.get(&TypeId::of::<S>()).copied()?;
        tracing::warn!(system = type_name::<S>(), %handle, "system already registered");
        Some(handle)
    }

    fn push<S: System>(&mut self, system: S) -> SystemHandle {
        let handle = SystemHandle::new(self.systems.len());
        let name = system.name().to_string();
        tracing::debug!(system = %name, %handle, "system registered");

        self.lookup.insert(TypeId::of::<S>(), handle);
        self.systems.push(RegisteredSystem {
            name,
            system: Box::new(system),
        });
        handle
    }

    pub fn handle_of<S: System>(&self) -> Option<SystemHandle> {
        self.lookup.get(&TypeId::of::<S>()).copied()
    }

    pub fn system<S: System>(&self) -> Option<&S> {
        let handle = self.handle_of::<S>()?;
        self.systems[usize::from(handle)]
            .system
            .as_any()
            .downcast_ref::<S>()
    }

    pub fn system_mut<S: System>(&mut self) -> Option<&mut S> {
        let handle = self.handle_of::<S>()?;
        self.systems[usize::from(handle)]
            .system
            .as_any_mut()
            .downcast_mut::<S>()
    }

    /// Make `entity` visible to systems. Returns false if it already was.
    pub fn add_entity(&mut self, entity: Entity) -> bool {
        self.active.insert(entity)
    }

    /// Hide `entity` from systems. Returns false if it was not active.
    pub fn remove_entity(&mut self, entity: Entity) -> bool {
        self.active.remove(entity)
    }

    pub fn entities(&self) -> &ActiveEntities {
        &self.active
    }

    /// Run every system once, in registration order, over the same pool.
    ///
    /// The first failing system ends the step; systems after it do not run.
    pub fn update(&mut self, registry: &mut Registry, delta: f64) -> Result<(), SystemError> {
        let Self {
            systems,
            active,
            profiler,
            ..
        } = self;

        for entry in systems.iter_mut() {
            let _span = tracing::trace_span!("system", name = %entry.name).entered();
            let result = profiler.time_system(&entry.name, || {
                entry.system.update(active, registry, delta)
            });

            if let Err(source) = result {
                tracing::warn!(system = %entry.name, error = %source, "system failed");
                return Err(SystemError::Failed {
                    system: entry.name.clone(),
                    source,
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Handles and names in dispatch order.
    pub fn iter(&self) -> impl Iterator<Item = (SystemHandle, &str)> {
        self.systems
            .iter()
            .enumerate()
            .map(|(index, entry)| (SystemHandle::new(index), entry.name.as_str()))
    }

    pub fn profiler(&self) -> &SystemProfiler {
        &self.profiler
    }

    pub fn profiler_mut(&mut self) -> &mut SystemProfiler {
        &mut self.profiler
    }
}

struct RegisteredSystem {
    name: String,
    system: Box<dyn AnySystem>,
}

/// `System` plus downcasting, so typed lookups can recover `&S`.
trait AnySystem: System {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<S: System> AnySystem for S {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
