use crate::ecs::Entity;
use thiserror::Error;

/// Errors raised by entity and component bookkeeping.
///
/// Capacity errors are returned before any state is touched; callers that
/// cannot size their world up front should treat them as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    #[error("entity limit of {max} live entities reached")]
    EntityLimitReached { max: usize },

    #[error("component type limit of {max} reached")]
    ComponentLimitReached { max: usize },

    #[error("entity {entity} is outside the id range [0, {max})")]
    EntityOutOfRange { entity: Entity, max: usize },

    #[error("entity {entity} is not alive")]
    EntityNotAlive { entity: Entity },

    #[error("entity {entity} already has a {component} component")]
    DuplicateComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("entity {entity} has no {component} component")]
    MissingComponent {
        entity: Entity,
        component: &'static str,
    },

    #[error("component type {component} is not registered")]
    UnregisteredComponent { component: &'static str },

    #[error("component type {component} appears more than once in a bundle")]
    DuplicateBundleType { component: &'static str },
}

/// Errors surfaced by system dispatch.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("system '{system}' failed")]
    Failed {
        system: String,
        #[source]
        source: EcsError,
    },
}

impl SystemError {
    /// Name of the system that stopped the step.
    pub fn system(&self) -> &str {
        match self {
            SystemError::Failed { system, .. } => system,
        }
    }
}
