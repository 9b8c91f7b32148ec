//! covplot Core Library
//!
//! Genomic coordinate math, region parsing and the full-genome overview
//! layout shared by the renderer and the view controllers.

pub mod coords;
pub mod error;
pub mod layout;
pub mod types;

// Re-export commonly used types and functions
pub use coords::{scale, to_genomic, to_pixel, PixelFrame};
pub use error::{Error, Result};
pub use layout::{ChromosomeDimension, ChromosomeLayoutTable, SLOT_GAP};
pub use types::{parse_region_str, Chromosome, GenomicPos, GenomicRegion, RegionQuery, Resolution, TrackPoint};

/// Version information for the covplot core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
