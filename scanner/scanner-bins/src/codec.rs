//! Geometry-level codec entry points and a per-scanner layout cache.

use tracing::debug;

use scanner_types::{
    BinEdges, DetectionBin, ExpandedDetectionBin, Result, ScannerError, ScannerGeometry,
    ScannerInformation, TypeOfModule,
};

use crate::layout::BinLayout;

/// Detecting elements of one module type: module replicas times element
/// replicas.
///
/// # Errors
///
/// Returns [`ScannerError::UnknownModuleType`] for a type past the end of the
/// geometry.
pub fn num_detecting_elements(
    geometry: &ScannerGeometry,
    type_of_module: TypeOfModule,
) -> Result<usize> {
    let rep_module = geometry.module_type(type_of_module).ok_or_else(|| {
        ScannerError::unknown_type(type_of_module, geometry.number_of_module_types())
    })?;
    Ok(rep_module.num_replicas() * rep_module.object.num_elements())
}

/// Detection bins of one module type: detecting elements times energy bins.
///
/// # Errors
///
/// Returns [`ScannerError::UnknownModuleType`] if the geometry or the energy
/// edges lack the type.
pub fn num_detection_bins(
    geometry: &ScannerGeometry,
    energy_bin_edges: &[BinEdges],
    type_of_module: TypeOfModule,
) -> Result<usize> {
    let num_elements = num_detecting_elements(geometry, type_of_module)?;
    let edges = energy_bin_edges
        .get(type_of_module.index())
        .ok_or_else(|| ScannerError::unknown_type(type_of_module, energy_bin_edges.len()))?;
    Ok(num_elements * edges.number_of_bins())
}

/// Splits `bin` into module, element and energy indices.
///
/// # Errors
///
/// Returns an error for an unknown module type, a type with no energy bins,
/// or a bin outside `[0, num_detection_bins)`.
pub fn expand(
    geometry: &ScannerGeometry,
    energy_bin_edges: &[BinEdges],
    type_of_module: TypeOfModule,
    bin: DetectionBin,
) -> Result<ExpandedDetectionBin> {
    BinLayout::for_module_type(geometry, energy_bin_edges, type_of_module)?.checked_expand(bin)
}

/// Joins module, element and energy indices into a detection bin.
///
/// # Errors
///
/// Returns an error for an unknown module type, a type with no energy bins,
/// or an index past its cardinality.
pub fn encode(
    geometry: &ScannerGeometry,
    energy_bin_edges: &[BinEdges],
    type_of_module: TypeOfModule,
    expanded: ExpandedDetectionBin,
) -> Result<DetectionBin> {
    BinLayout::for_module_type(geometry, energy_bin_edges, type_of_module)?
        .checked_encode(expanded)
}

/// [`expand`] over a slice of bins of the same module type.
///
/// # Errors
///
/// Fails on the first invalid bin.
pub fn expand_detection_bins(
    geometry: &ScannerGeometry,
    energy_bin_edges: &[BinEdges],
    type_of_module: TypeOfModule,
    bins: &[DetectionBin],
) -> Result<Vec<ExpandedDetectionBin>> {
    let layout = BinLayout::for_module_type(geometry, energy_bin_edges, type_of_module)?;
    bins.iter().map(|&b| layout.checked_expand(b)).collect()
}

/// [`encode`] over a slice of expanded bins of the same module type.
///
/// # Errors
///
/// Fails on the first out-of-range triple.
pub fn make_detection_bins(
    geometry: &ScannerGeometry,
    energy_bin_edges: &[BinEdges],
    type_of_module: TypeOfModule,
    expanded: &[ExpandedDetectionBin],
) -> Result<Vec<DetectionBin>> {
    let layout = BinLayout::for_module_type(geometry, energy_bin_edges, type_of_module)?;
    expanded.iter().map(|&e| layout.checked_encode(e)).collect()
}

/// Layouts of every module type of one scanner, computed once.
///
/// The per-event hot path indexes into this instead of re-reading the
/// geometry.
///
/// # Example
///
/// ```
/// use scanner_bins::BinCodec;
/// use scanner_types::{ScannerGeometry, ScannerInformation};
///
/// let scanner = ScannerInformation::new("empty", ScannerGeometry::default(), Vec::new());
/// let codec = BinCodec::new(&scanner).unwrap();
/// assert_eq!(codec.number_of_module_types(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BinCodec {
    layouts: Vec<BinLayout>,
}

impl BinCodec {
    /// Builds the layout of every module type.
    ///
    /// # Errors
    ///
    /// Fails if any module type lacks energy bin edges or has no energy bins.
    pub fn new(scanner: &ScannerInformation) -> Result<Self> {
        Self::from_geometry(&scanner.scanner_geometry, &scanner.event_energy_bin_edges)
    }

    /// Builds the layout of every module type from geometry and energy edges.
    ///
    /// # Errors
    ///
    /// See [`BinCodec::new`].
    pub fn from_geometry(geometry: &ScannerGeometry, energy_bin_edges: &[BinEdges]) -> Result<Self> {
        let layouts = (0..geometry.number_of_module_types())
            .map(|t| BinLayout::for_module_type(geometry, energy_bin_edges, TypeOfModule(t as u32)))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            num_module_types = layouts.len(),
            total_bins = layouts.iter().map(BinLayout::num_detection_bins).sum::<usize>(),
            "built bin codec"
        );
        Ok(Self { layouts })
    }

    /// Number of module types covered.
    #[must_use]
    pub fn number_of_module_types(&self) -> usize {
        self.layouts.len()
    }

    /// Layout of one module type.
    ///
    /// # Errors
    ///
    /// Returns [`ScannerError::UnknownModuleType`] for a type past the end.
    pub fn layout(&self, type_of_module: TypeOfModule) -> Result<&BinLayout> {
        self.layouts
            .get(type_of_module.index())
            .ok_or_else(|| ScannerError::unknown_type(type_of_module, self.layouts.len()))
    }

    /// All layouts, indexed by module type.
    #[must_use]
    pub fn layouts(&self) -> &[BinLayout] {
        &self.layouts
    }

    /// Bounds-checked expansion.
    ///
    /// # Errors
    ///
    /// Fails for an unknown type or an out-of-range bin.
    pub fn expand(&self, type_of_module: TypeOfModule, bin: DetectionBin) -> Result<ExpandedDetectionBin> {
        self.layout(type_of_module)?.checked_expand(bin)
    }

    /// Bounds-checked encoding.
    ///
    /// # Errors
    ///
    /// Fails for an unknown type or an index past its cardinality.
    pub fn encode(
        &self,
        type_of_module: TypeOfModule,
        expanded: ExpandedDetectionBin,
    ) -> Result<DetectionBin> {
        self.layout(type_of_module)?.checked_encode(expanded)
    }
}
