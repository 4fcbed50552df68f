//! Rigid placement transforms.
//!
//! A [`RigidTransform`] is a 3x4 matrix: rotation in the left 3x3 block,
//! translation in the last column. It places a child frame (a crystal, a
//! module) inside its parent frame. Composition pads to 4x4 homogeneous
//! form, multiplies, and truncates back.

use nalgebra::{Matrix3x4, Matrix4, Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::shape::BoxShape;

/// Placement of a child frame inside a parent frame.
///
/// The left 3x3 block is assumed orthonormal. This is not enforced, and
/// composition never re-normalizes it.
///
/// # Example
///
/// ```
/// use scanner_types::RigidTransform;
/// use nalgebra::Point3;
///
/// let t = RigidTransform::translation(1.0, 2.0, 3.0);
/// let p = t.apply(&Point3::origin());
/// assert_eq!(p, Point3::new(1.0, 2.0, 3.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RigidTransform {
    /// Row-major 3x4 placement matrix.
    pub matrix: Matrix3x4<f32>,
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    /// Wraps a 3x4 matrix.
    #[must_use]
    pub const fn from_matrix(matrix: Matrix3x4<f32>) -> Self {
        Self { matrix }
    }

    /// Builds a transform from its three rows.
    #[must_use]
    #[rustfmt::skip]
    pub fn from_rows(rows: [[f32; 4]; 3]) -> Self {
        let [r0, r1, r2] = rows;
        Self {
            matrix: Matrix3x4::new(
                r0[0], r0[1], r0[2], r0[3],
                r1[0], r1[1], r1[2], r1[3],
                r2[0], r2[1], r2[2], r2[3],
            ),
        }
    }

    /// The identity placement.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix3x4::identity(),
        }
    }

    /// A pure translation.
    #[must_use]
    pub fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, tx],
            [0.0, 1.0, 0.0, ty],
            [0.0, 0.0, 1.0, tz],
        ])
    }

    /// Rotation about the scanner (z) axis followed by an axial shift.
    ///
    /// This is the placement of one module on a ring: rows
    /// `[cos, sin, 0, 0]`, `[-sin, cos, 0, 0]`, `[0, 0, 1, axial_offset]`.
    #[must_use]
    pub fn ring_rotation(angle: f32, axial_offset: f32) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        Self::from_rows([
            [cos_a, sin_a, 0.0, 0.0],
            [-sin_a, cos_a, 0.0, 0.0],
            [0.0, 0.0, 1.0, axial_offset],
        ])
    }

    /// Pads to a 4x4 homogeneous matrix with bottom row `[0, 0, 0, 1]`.
    #[must_use]
    pub fn to_homogeneous(&self) -> Matrix4<f32> {
        let mut mat = Matrix4::identity();
        mat.fixed_view_mut::<3, 4>(0, 0).copy_from(&self.matrix);
        mat
    }

    /// Truncates a 4x4 homogeneous matrix to its top three rows.
    #[must_use]
    pub fn from_homogeneous(mat: &Matrix4<f32>) -> Self {
        Self {
            matrix: mat.fixed_view::<3, 4>(0, 0).into_owned(),
        }
    }

    /// Translation column.
    #[must_use]
    pub fn translation_part(&self) -> Vector3<f32> {
        self.matrix.column(3).into_owned()
    }

    /// Composes `self` with an inner transform: the result applies `inner`
    /// first, then `self`.
    #[must_use]
    pub fn then_inner(&self, inner: &Self) -> Self {
        Self::from_homogeneous(&(self.to_homogeneous() * inner.to_homogeneous()))
    }

    /// Applies the transform to a point.
    #[must_use]
    pub fn apply(&self, point: &Point3<f32>) -> Point3<f32> {
        Point3::from(self.matrix * point.to_homogeneous())
    }
}

/// Composes a frame chain, outermost first.
///
/// `compose(&[a, b])` applied to a point equals applying `b` and then `a`.
/// An empty chain yields the identity.
///
/// # Example
///
/// ```
/// use scanner_types::{RigidTransform, compose};
/// use nalgebra::Point3;
///
/// let module = RigidTransform::ring_rotation(std::f32::consts::FRAC_PI_2, 0.0);
/// let element = RigidTransform::translation(10.0, 0.0, 0.0);
/// let p = compose(&[module, element]).apply(&Point3::origin());
/// assert!((p.y + 10.0).abs() < 1e-5);
/// ```
#[must_use]
pub fn compose(transforms: &[RigidTransform]) -> RigidTransform {
    let mat = transforms
        .iter()
        .rev()
        .fold(Matrix4::identity(), |acc, t| t.to_homogeneous() * acc);
    RigidTransform::from_homogeneous(&mat)
}

/// Applies a transform to a point.
#[must_use]
pub fn apply(transform: &RigidTransform, point: &Point3<f32>) -> Point3<f32> {
    transform.apply(point)
}

/// Applies a whole frame chain (outermost first) to a point.
#[must_use]
pub fn apply_all(transforms: &[RigidTransform], point: &Point3<f32>) -> Point3<f32> {
    compose(transforms).apply(point)
}

/// Applies a transform to every corner of a shape, keeping corner order.
#[must_use]
pub fn transform_shape(transform: &RigidTransform, shape: &BoxShape) -> BoxShape {
    BoxShape::from_corners((*shape.corners()).map(|c| transform.apply(&c)))
}
