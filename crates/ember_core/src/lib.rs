//! Ember Core
//!
//! The simulation kernel:
//! - Entity Component System (ECS)
//! - World configuration
//! - Frame timing

pub mod config;
pub mod ecs;
pub mod time;

pub use glam;

pub use config::WorldConfig;
pub use ecs::{Entity, Registry, System, World};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
