//! Demo components and systems driven by the runtime loop

use ember_core::ecs::{ActiveEntities, EcsError, Registry, System};
use glam::Vec3;

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Position(pub Vec3);

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Velocity(pub Vec3);

/// Scales every velocity down by `drag` per second of simulated time.
#[derive(Debug, Default)]
pub struct DragSystem {
    pub drag: f32,
}

impl System for DragSystem {
    fn update(&mut self, entities: &ActiveEntities, registry: &mut Registry, delta: f64) -> Result<(), EcsError> {
        let factor = (1.0 - self.drag * delta as f32).max(0.0);
        for entity in entities {
            if !registry.has_component::<Velocity>(entity) {
                continue;
            }
            registry.get_mut::<Velocity>(entity)?.0 *= factor;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "drag"
    }
}

/// Integrates velocity into position.
#[derive(Debug, Default)]
pub struct MovementSystem;

impl System for MovementSystem {
    fn update(&mut self, entities: &ActiveEntities, registry: &mut Registry, delta: f64) -> Result<(), EcsError> {
        for entity in entities {
            if !(registry.has_component::<Position>(entity) && registry.has_component::<Velocity>(entity)) {
                continue;
            }
            let velocity = registry.get::<Velocity>(entity)?.0;
            registry.get_mut::<Position>(entity)?.0 += velocity * delta as f32;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "movement"
    }
}
