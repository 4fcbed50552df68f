//! Cylindrical block geometry.

use tracing::debug;

use scanner_types::{
    BoxShape, DetectorModule, ReplicatedDetectorModule, ReplicatedObject, ReplicatedSolidVolume,
    RigidTransform, ScannerGeometry, SolidVolume,
};

use crate::config::CylindricalBlocksConfig;
use crate::error::Result;

/// One crystal with its first corner at the origin.
#[must_use]
pub fn crystal(config: &CylindricalBlocksConfig) -> SolidVolume {
    SolidVolume::new(BoxShape::cuboid(config.crystal_length), config.material_id)
}

/// Offset of replica `i` of `n`, centred on zero.
#[allow(clippy::cast_precision_loss)]
fn centred(i: usize, n: usize, length: f32) -> f32 {
    (i as f32 - (n as f32 - 1.0) / 2.0) * length
}

/// Crystals of one module, starting at the inner radius and centred on the
/// other two axes. The last grid axis varies fastest.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn detector_module(config: &CylindricalBlocksConfig) -> DetectorModule {
    let [n0, n1, n2] = config.num_crystals_per_module;
    let [l0, l1, l2] = config.crystal_length;
    let mut elements: ReplicatedSolidVolume = ReplicatedObject::new(crystal(config));
    for rep0 in 0..n0 {
        for rep1 in 0..n1 {
            for rep2 in 0..n2 {
                elements.push(RigidTransform::translation(
                    config.radius + rep0 as f32 * l0,
                    centred(rep1, n1, l1),
                    centred(rep2, n2, l2),
                ));
            }
        }
    }
    DetectorModule::new(elements)
}

/// Modules rotated about the scanner axis and stacked along it.
///
/// Instance `z + num_modules_along_axis * a` sits in axial slot `z` at
/// angular slot `a`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn replicated_module(config: &CylindricalBlocksConfig) -> ReplicatedDetectorModule {
    let n_ring = config.num_modules_along_ring;
    let n_axis = config.num_modules_along_axis;
    let mut modules = ReplicatedObject::new(detector_module(config));
    for a in 0..n_ring {
        let angle = config.start_angle + config.arc * a as f32 / n_ring as f32;
        for z in 0..n_axis {
            let axial = centred(z, n_axis, config.module_spacing_along_axis);
            modules.push(RigidTransform::ring_rotation(angle, axial));
        }
    }
    modules
}

/// A scanner with one module type per configuration, in order.
///
/// # Errors
///
/// Fails if any configuration is invalid.
pub fn scanner_geometry(configs: &[CylindricalBlocksConfig]) -> Result<ScannerGeometry> {
    for config in configs {
        config.validate()?;
    }
    let geometry = ScannerGeometry::new(configs.iter().map(replicated_module).collect());
    debug!(
        num_module_types = geometry.number_of_module_types(),
        "built cylindrical scanner geometry"
    );
    Ok(geometry)
}
