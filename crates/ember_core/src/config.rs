//! World configuration

use crate::ecs::MAX_ENTITIES;
use serde::{Deserialize, Serialize};

/// Sizing for a `World`. Fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Size of the entity id universe; also the most entities alive at once.
    pub max_entities: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            max_entities: MAX_ENTITIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: WorldConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, WorldConfig::default());
        assert_eq!(config.max_entities, 5000);
    }

    #[test]
    fn explicit_capacity_is_read() {
        let config: WorldConfig = serde_json::from_str(r#"{ "max_entities": 128 }"#).unwrap();
        assert_eq!(config.max_entities, 128);
    }
}
