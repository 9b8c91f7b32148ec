//! The backend request/response contract.
//!
//! The data backend is an external collaborator: it owns the coverage and
//! BAF files and the chromosome dimension table, and the core only consumes
//! it through [`CoverageSource`]. Field names match the HTTP API
//! (`/_overviewchromdim`, `/_getcoverage`) so recorded responses
//! deserialize directly.

use covplot_core::{ChromosomeDimension, ChromosomeLayoutTable, Chromosome, TrackPoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    /// Backend request rejected or unreachable. Surfaced through the
    /// transient input-field error state, never thrown at the user.
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error(transparent)]
    Core(#[from] covplot_core::Error),
}

pub type Result<T> = std::result::Result<T, ViewError>;

/// Per-sample parameters repeated on every coverage request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchParams {
    pub sample_name: String,
    pub hg_type: String,
    pub hg_filedir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChromDimsRequest {
    pub hg_type: String,
    pub x_pos: f64,
    pub y_pos: f64,
    pub full_plot_width: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChromDim {
    pub size: u64,
    pub x_pos: f64,
    pub y_pos: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChromDimsResponse {
    pub chrom_dims: BTreeMap<Chromosome, ChromDim>,
}

impl ChromDimsResponse {
    /// Adopt the backend-computed slots as a layout table.
    pub fn into_layout(self) -> covplot_core::Result<ChromosomeLayoutTable> {
        let dims = self
            .chrom_dims
            .into_iter()
            .map(|(chromosome, dim)| ChromosomeDimension {
                chromosome,
                size_bp: dim.size,
                x_pos: dim.x_pos,
                width: dim.width,
            })
            .collect();
        ChromosomeLayoutTable::from_dimensions(dims)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageRequest {
    /// `"<chrom>:<start>-<end>"`; `end` may be the literal token `None`,
    /// meaning "to the chromosome end".
    pub region: String,
    pub sample_name: String,
    pub hg_type: String,
    pub hg_filedir: String,
    pub xpos: f64,
    pub ypos: f64,
    pub plot_height: f64,
    pub extra_plot_width: f64,
    pub top_bottom_padding: f64,
    pub x_ampl: f64,
    pub baf_y_start: f64,
    pub baf_y_end: f64,
    pub log2_y_start: f64,
    pub log2_y_end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<bool>,
}

/// One fetched window of both tracks. `baf` and `data` rows are 4-column
/// arrays with the base-pair position at index 1 and the value at index 3.
/// Open-ended requests come back with `end` resolved to the data extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageResponse {
    pub chrom: Chromosome,
    pub start: u64,
    pub end: u64,
    pub y_pos: f64,
    pub baf: Vec<[f64; 4]>,
    pub data: Vec<[f64; 4]>,
}

impl CoverageResponse {
    pub fn baf_points(&self) -> Vec<TrackPoint> {
        extract_points(&self.baf)
    }

    pub fn coverage_points(&self) -> Vec<TrackPoint> {
        extract_points(&self.data)
    }
}

fn extract_points(rows: &[[f64; 4]]) -> Vec<TrackPoint> {
    rows.iter()
        .map(|row| TrackPoint::new(row[1] as u64, row[3]))
        .collect()
}

/// The external data backend seam.
pub trait CoverageSource {
    fn chrom_dims(&self, request: &ChromDimsRequest) -> Result<ChromDimsResponse>;
    fn coverage(&self, request: &CoverageRequest) -> Result<CoverageResponse>;
}
