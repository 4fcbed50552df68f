//! Replicated scanner geometry.
//!
//! A scanner is a tree of replicated placements:
//!
//! - [`ScannerGeometry`] holds one [`ReplicatedDetectorModule`] per module type
//! - each of those places one shared [`DetectorModule`] many times
//! - each module places one shared [`SolidVolume`] (the crystal) many times
//!
//! Replicas share their object definition; only the transform differs.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::ids::TypeOfModule;
use crate::shape::SolidVolume;
use crate::transform::RigidTransform;

/// One shared object placed by a list of transforms.
///
/// The position of a transform in the list is the instance index at this
/// level of the tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReplicatedObject<T> {
    /// The shared definition.
    pub object: T,
    /// One placement per replica.
    pub transforms: Vec<RigidTransform>,
}

impl<T> ReplicatedObject<T> {
    /// An object with no replicas yet.
    #[must_use]
    pub const fn new(object: T) -> Self {
        Self {
            object,
            transforms: Vec::new(),
        }
    }

    /// An object placed by the given transforms.
    #[must_use]
    pub const fn with_transforms(object: T, transforms: Vec<RigidTransform>) -> Self {
        Self { object, transforms }
    }

    /// Adds a replica.
    pub fn push(&mut self, transform: RigidTransform) {
        self.transforms.push(transform);
    }

    /// Number of replicas.
    #[must_use]
    pub fn num_replicas(&self) -> usize {
        self.transforms.len()
    }

    /// Placement of one replica.
    #[must_use]
    pub fn transform(&self, instance: usize) -> Option<&RigidTransform> {
        self.transforms.get(instance)
    }
}

/// Crystals placed by a list of transforms.
pub type ReplicatedSolidVolume = ReplicatedObject<SolidVolume>;

/// Modules placed by a list of transforms.
pub type ReplicatedDetectorModule = ReplicatedObject<DetectorModule>;

/// A detector module: the detecting elements inside one module instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DetectorModule {
    /// Crystals in module-local coordinates.
    pub detecting_elements: ReplicatedSolidVolume,
}

impl DetectorModule {
    /// Creates a module from its replicated crystals.
    #[must_use]
    pub const fn new(detecting_elements: ReplicatedSolidVolume) -> Self {
        Self { detecting_elements }
    }

    /// Number of detecting elements in one module instance.
    #[must_use]
    pub fn num_elements(&self) -> usize {
        self.detecting_elements.num_replicas()
    }
}

/// Full scanner geometry, one entry per module type.
///
/// Element and module counts are uniform within a module type and may
/// differ across types.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScannerGeometry {
    /// Replicated modules, indexed by [`TypeOfModule`].
    pub replicated_modules: Vec<ReplicatedDetectorModule>,
}

impl ScannerGeometry {
    /// Creates a geometry from its module types.
    #[must_use]
    pub const fn new(replicated_modules: Vec<ReplicatedDetectorModule>) -> Self {
        Self { replicated_modules }
    }

    /// Number of module types.
    #[must_use]
    pub fn number_of_module_types(&self) -> usize {
        self.replicated_modules.len()
    }

    /// The replicated module of one type.
    #[must_use]
    pub fn module_type(&self, type_of_module: TypeOfModule) -> Option<&ReplicatedDetectorModule> {
        self.replicated_modules.get(type_of_module.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::BoxShape;

    fn small_module() -> DetectorModule {
        let crystal = SolidVolume::new(BoxShape::cuboid([1.0, 1.0, 1.0]), 1);
        let transforms = (0..3u8)
            .map(|i| RigidTransform::translation(0.0, f32::from(i), 0.0))
            .collect();
        DetectorModule::new(ReplicatedObject::with_transforms(crystal, transforms))
    }

    #[test]
    fn replica_counts() {
        let mut rep = ReplicatedObject::new(small_module());
        rep.push(RigidTransform::identity());
        rep.push(RigidTransform::translation(1.0, 0.0, 0.0));

        assert_eq!(rep.num_replicas(), 2);
        assert_eq!(rep.object.num_elements(), 3);
        assert!(rep.transform(1).is_some());
        assert!(rep.transform(2).is_none());
    }

    #[test]
    fn module_type_lookup() {
        let geometry = ScannerGeometry::new(vec![ReplicatedObject::new(small_module())]);
        assert_eq!(geometry.number_of_module_types(), 1);
        assert!(geometry.module_type(TypeOfModule(0)).is_some());
        assert!(geometry.module_type(TypeOfModule(1)).is_none());
    }
}
