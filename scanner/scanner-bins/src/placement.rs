//! Physical placement of detecting elements.
//!
//! Diagnostics only; nothing here runs per event.

use scanner_types::{
    BinEdges, BoxShape, DetectionBin, ExpandedDetectionBin, Result, RigidTransform, ScannerError,
    ScannerGeometry, TypeOfModule, compose, transform_shape,
};

use crate::layout::BinLayout;

/// Scanner-frame transform of one element: the module placement applied
/// after the element placement.
///
/// # Errors
///
/// Returns [`ScannerError::UnknownModuleType`] for an unknown type and
/// [`ScannerError::ExpandedBinOutOfRange`] when the module or element index
/// has no transform.
pub fn element_transform(
    geometry: &ScannerGeometry,
    type_of_module: TypeOfModule,
    expanded: &ExpandedDetectionBin,
) -> Result<RigidTransform> {
    let rep_module = geometry.module_type(type_of_module).ok_or_else(|| {
        ScannerError::unknown_type(type_of_module, geometry.number_of_module_types())
    })?;
    let elements = &rep_module.object.detecting_elements;
    let out_of_range = || ScannerError::ExpandedBinOutOfRange {
        type_of_module,
        expanded: *expanded,
        num_modules: rep_module.num_replicas(),
        num_elements_per_module: elements.num_replicas(),
        // Placement does not depend on energy.
        num_energy_bins: expanded.energy_index as usize + 1,
    };
    let module_tf = rep_module
        .transform(expanded.module_index as usize)
        .ok_or_else(out_of_range)?;
    let element_tf = elements
        .transform(expanded.element_index as usize)
        .ok_or_else(out_of_range)?;
    Ok(compose(&[*module_tf, *element_tf]))
}

/// Corners of one detecting element in the scanner frame.
///
/// # Errors
///
/// See [`element_transform`].
pub fn resolve_box(
    geometry: &ScannerGeometry,
    type_of_module: TypeOfModule,
    expanded: &ExpandedDetectionBin,
) -> Result<BoxShape> {
    let transform = element_transform(geometry, type_of_module, expanded)?;
    let rep_module = geometry.module_type(type_of_module).ok_or_else(|| {
        ScannerError::unknown_type(type_of_module, geometry.number_of_module_types())
    })?;
    Ok(transform_shape(
        &transform,
        &rep_module.object.detecting_elements.object.shape,
    ))
}

/// [`resolve_box`] for a compact bin.
///
/// # Errors
///
/// Fails for an unknown type, a type with no energy bins, or an out-of-range
/// bin.
pub fn resolve_box_for_bin(
    geometry: &ScannerGeometry,
    energy_bin_edges: &[BinEdges],
    type_of_module: TypeOfModule,
    bin: DetectionBin,
) -> Result<BoxShape> {
    let layout = BinLayout::for_module_type(geometry, energy_bin_edges, type_of_module)?;
    let expanded = layout.checked_expand(bin)?;
    resolve_box(geometry, type_of_module, &expanded)
}
