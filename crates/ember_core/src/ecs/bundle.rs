//! Component bundles for spawning entities

use crate::ecs::{Component, ComponentDirectory, EcsError, Entity, Signature};
use std::any::{type_name, TypeId};

/// A group of components inserted into a fresh entity together.
///
/// Implemented for tuples of up to eight component types. `make_entity`
/// additionally needs `Default`, which tuples provide when every element
/// does.
pub trait Bundle: 'static {
    /// Register every member type and return the combined signature.
    ///
    /// Fails if the same type appears twice, since an entity holds at most
    /// one value per component type.
    fn register(directory: &mut ComponentDirectory) -> Result<Signature, EcsError>;

    /// Insert every member into its store for `entity`.
    fn insert(self, directory: &mut ComponentDirectory, entity: Entity) -> Result<(), EcsError>;
}

impl Bundle for () {
    fn register(_directory: &mut ComponentDirectory) -> Result<Signature, EcsError> {
        Ok(Signature::EMPTY)
    }

    fn insert(self, _directory: &mut ComponentDirectory, _entity: Entity) -> Result<(), EcsError> {
        Ok(())
    }
}

macro_rules! impl_bundle {
    ($($T:ident),+) => {
        impl<$($T: Component),+> Bundle for ($($T,)+) {
            fn register(directory: &mut ComponentDirectory) -> Result<Signature, EcsError> {
                // Reject repeats before any member gets an id.
                let types = [$((TypeId::of::<$T>(), type_name::<$T>())),+];
                for (position, (ty, name)) in types.iter().enumerate() {
                    if types[..position].iter().any(|(seen, _)| seen == ty) {
                        return Err(EcsError::DuplicateBundleType { component: *name });
                    }
                }

                let mut signature = Signature::EMPTY;
                $( signature.set(directory.register_component::<$T>()?); )+
                Ok(signature)
            }

            #[allow(non_snake_case)]
            fn insert(self, directory: &mut ComponentDirectory, entity: Entity) -> Result<(), EcsError> {
                let ($($T,)+) = self;
                $( directory.add_component(entity, $T)?; )+
                Ok(())
            }
        }
    };
}

impl_bundle!(A);
impl_bundle!(A, B);
impl_bundle!(A, B, C);
impl_bundle!(A, B, C, D);
impl_bundle!(A, B, C, D, E);
impl_bundle!(A, B, C, D, E, F);
impl_bundle!(A, B, C, D, E, F, G);
impl_bundle!(A, B, C, D, E, F, G, H);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default, Debug, PartialEq)]
    struct Light(f32);
    #[derive(Default, Debug, PartialEq)]
    struct Direction([f32; 3]);

    #[test]
    fn register_builds_signature() {
        let mut dir = ComponentDirectory::new();
        dir.register_component::<Direction>().unwrap();

        let sig = <(Light, Direction)>::register(&mut dir).unwrap();
        // Direction kept id 0; Light got 1.
        assert_eq!(sig, Signature::EMPTY.with(0).with(1));
    }

    #[test]
    fn repeated_type_is_rejected() {
        let mut dir = ComponentDirectory::new();
        let err = <(Light, Direction, Light)>::register(&mut dir).unwrap_err();
        assert!(matches!(err, EcsError::DuplicateBundleType { component } if component.ends_with("Light")));
        // No member claimed an id on the way to the error.
        assert_eq!(dir.registered_count(), 0);
    }

    #[test]
    fn insert_places_each_value() {
        let mut dir = ComponentDirectory::new();
        <(Light, Direction)>::register(&mut dir).unwrap();
        let e = Entity::from_raw(2);

        (Light(0.5), Direction([0.0, -1.0, 0.0]))
            .insert(&mut dir, e)
            .unwrap();

        assert_eq!(dir.get_component::<Light>(e), Ok(&Light(0.5)));
        assert_eq!(
            dir.get_component::<Direction>(e),
            Ok(&Direction([0.0, -1.0, 0.0]))
        );
    }

    #[test]
    fn empty_bundle_has_empty_signature() {
        let mut dir = ComponentDirectory::new();
        assert_eq!(<()>::register(&mut dir), Ok(Signature::EMPTY));
        assert_eq!(dir.registered_count(), 0);
    }
}
