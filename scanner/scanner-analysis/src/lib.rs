//! Summaries of PET scanner descriptions and their list-mode events.
//!
//! - [`ScannerSummary`] - module-type cardinalities, binning and symmetry-group
//!   counts of a scanner header, printable as a report
//! - [`summarize_time_blocks`] - [`EventStatistics`] over prompt events, with
//!   blocks evaluated in parallel
//!
//! # Example
//!
//! ```
//! use scanner_analysis::{ScannerSummary, summarize_time_blocks};
//! use scanner_synth::{CylindricalBlocksConfig, EventGenerator, GeneratorConfig, scanner_information};
//!
//! let scanner = scanner_information(&[CylindricalBlocksConfig::large_ring().with_modules(4, 1)]).unwrap();
//! println!("{}", ScannerSummary::from_scanner(&scanner).unwrap());
//!
//! let blocks = EventGenerator::new(&scanner, GeneratorConfig::new().with_seed(1))
//!     .unwrap()
//!     .time_blocks(2, 1.0, 5)
//!     .unwrap();
//! let stats = summarize_time_blocks(&scanner, &blocks).unwrap();
//! assert_eq!(stats.num_prompts, 10);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod stats;
mod summary;

pub use error::{AnalysisError, Result};
pub use stats::{EventStatistics, summarize_time_blocks};
pub use summary::{ModuleTypeSummary, PairSummary, ScannerSummary};
