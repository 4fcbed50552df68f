//! Solid shapes of detecting elements.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A box given by its 8 corners in a local frame.
///
/// Corner order is meaningful and is kept by every transform. For shapes
/// built with [`BoxShape::cuboid`] the order is
/// `(0,0,0) (0,0,z) (0,y,z) (0,y,0) (x,0,0) (x,0,z) (x,y,z) (x,y,0)`.
///
/// # Example
///
/// ```
/// use scanner_types::BoxShape;
///
/// let crystal = BoxShape::cuboid([20.0, 4.0, 4.0]);
/// assert_eq!(crystal.center().x, 10.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoxShape {
    corners: [Point3<f32>; 8],
}

impl BoxShape {
    /// Creates a shape from explicit corners.
    #[must_use]
    pub const fn from_corners(corners: [Point3<f32>; 8]) -> Self {
        Self { corners }
    }

    /// An axis-aligned cuboid with one corner at the origin.
    #[must_use]
    pub fn cuboid(lengths: [f32; 3]) -> Self {
        let [x, y, z] = lengths;
        Self::from_corners([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, z),
            Point3::new(0.0, y, z),
            Point3::new(0.0, y, 0.0),
            Point3::new(x, 0.0, 0.0),
            Point3::new(x, 0.0, z),
            Point3::new(x, y, z),
            Point3::new(x, y, 0.0),
        ])
    }

    /// The corners, in construction order.
    #[must_use]
    pub const fn corners(&self) -> &[Point3<f32>; 8] {
        &self.corners
    }

    /// Mean of the corners.
    #[must_use]
    pub fn center(&self) -> Point3<f32> {
        let sum = self
            .corners
            .iter()
            .fold(Vector3::zeros(), |acc, c| acc + c.coords);
        Point3::from(sum / 8.0)
    }
}

/// A detecting volume: a box shape plus the id of its bulk material.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolidVolume {
    /// Shape in the element's local frame.
    pub shape: BoxShape,
    /// Index into the scanner's bulk-material table.
    pub material_id: u32,
}

impl SolidVolume {
    /// Creates a new solid volume.
    #[must_use]
    pub const fn new(shape: BoxShape, material_id: u32) -> Self {
        Self { shape, material_id }
    }
}
