//! Entity ids and the registry that hands them out
//!
//! An entity is nothing but an index. The registry owns the only per-entity
//! state the core keeps outside of component stores: the signature bitmask
//! recording which component types the entity currently has.

use crate::ecs::{ComponentId, EcsError, MAX_COMPONENTS};
use std::collections::VecDeque;
use std::fmt;

/// Default size of the entity id universe.
pub const MAX_ENTITIES: usize = 5000;

/// Opaque entity handle.
///
/// Ids are recycled, so a handle kept past `destroy_entity` may later name a
/// different entity.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Entity(u32);

impl Entity {
    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u32 {
        self.0
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Component-presence bitmask, one bit per registered component id.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature(u32);

const _: () = assert!(MAX_COMPONENTS <= u32::BITS as usize);

impl Signature {
    pub const EMPTY: Self = Self(0);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Mask for `id`, or zero when `id` has no bit.
    #[inline]
    const fn bit(id: ComponentId) -> u32 {
        if (id as usize) < MAX_COMPONENTS {
            1 << id
        } else {
            0
        }
    }

    /// False for ids outside `[0, MAX_COMPONENTS)`.
    #[inline]
    pub const fn test(self, id: ComponentId) -> bool {
        self.0 & Self::bit(id) != 0
    }

    /// Set the bit for `id`. Returns false, changing nothing, when `id` is
    /// out of range.
    #[inline]
    pub fn set(&mut self, id: ComponentId) -> bool {
        let bit = Self::bit(id);
        self.0 |= bit;
        bit != 0
    }

    /// Clear the bit for `id`. Returns false when `id` is out of range.
    #[inline]
    pub fn reset(&mut self, id: ComponentId) -> bool {
        let bit = Self::bit(id);
        self.0 &= !bit;
        bit != 0
    }

    pub fn clear(&mut self) {
        self.0 = 0;
    }

    /// Out-of-range ids leave the signature unchanged.
    #[must_use]
    pub const fn with(mut self, id: ComponentId) -> Self {
        self.0 |= Self::bit(id);
        self
    }

    /// True when every bit of `other` is also set here.
    pub const fn contains(self, other: Signature) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }
}

/// Allocates entity ids from a fixed universe and stores their signatures.
pub struct EntityRegistry {
    available: VecDeque<Entity>,
    signatures: Vec<Signature>,
    alive: Vec<bool>,
    living: usize,
}

impl EntityRegistry {
    /// Seeds the recycling queue with every id in `[0, max_entities)`.
    pub fn new(max_entities: usize) -> Self {
        let max_entities = max_entities.min(u32::MAX as usize);
        Self {
            available: (0..max_entities as u32).map(Entity).collect(),
            signatures: vec![Signature::EMPTY; max_entities],
            alive: vec![false; max_entities],
            living: 0,
        }
    }

    /// Hand out the least recently released id.
    pub fn create_entity(&mut self, signature: Signature) -> Result<Entity, EcsError> {
        if self.living >= self.capacity() {
            tracing::error!(max = self.capacity(), "entity capacity exhausted");
            return Err(EcsError::EntityLimitReached {
                max: self.capacity(),
            });
        }
        let entity = self
            .available
            .pop_front()
            .ok_or(EcsError::EntityLimitReached {
                max: self.capacity(),
            })?;

        self.living += 1;
        self.alive[entity.index()] = true;
        self.signatures[entity.index()] = signature;
        tracing::trace!(%entity, signature = signature.bits(), "entity created");
        Ok(entity)
    }

    /// Clear the signature and queue the id for reuse.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<(), EcsError> {
        self.ensure_alive(entity)?;

        self.living -= 1;
        self.alive[entity.index()] = false;
        self.signatures[entity.index()].clear();
        self.available.push_back(entity);
        tracing::trace!(%entity, "entity destroyed");
        Ok(())
    }

    pub fn signature(&self, entity: Entity) -> Result<Signature, EcsError> {
        self.signatures
            .get(entity.index())
            .copied()
            .ok_or(EcsError::EntityOutOfRange {
                entity,
                max: self.capacity(),
            })
    }

    /// Live entities only; a queued id keeps its cleared signature.
    pub fn signature_mut(&mut self, entity: Entity) -> Result<&mut Signature, EcsError> {
        self.ensure_alive(entity)?;
        Ok(&mut self.signatures[entity.index()])
    }

    pub fn set_signature(&mut self, entity: Entity, signature: Signature) -> Result<(), EcsError> {
        *self.signature_mut(entity)? = signature;
        Ok(())
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.get(entity.index()).copied().unwrap_or(false)
    }

    pub(crate) fn ensure_alive(&self, entity: Entity) -> Result<(), EcsError> {
        match self.alive.get(entity.index()) {
            Some(true) => Ok(()),
            Some(false) => Err(EcsError::EntityNotAlive { entity }),
            None => Err(EcsError::EntityOutOfRange {
                entity,
                max: self.capacity(),
            }),
        }
    }

    pub fn living_count(&self) -> usize {
        self.living
    }

    pub fn capacity(&self) -> usize {
        self.signatures.len()
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new(MAX_ENTITIES)
    }
}
