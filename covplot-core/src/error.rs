//! Error handling for covplot core operations

use crate::types::Chromosome;
use thiserror::Error;

/// Main error type for coordinate and layout operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("degenerate region on {chromosome}: start and end are both {position}")]
    DegenerateRegion { chromosome: Chromosome, position: u64 },

    #[error("pixel {pixel} lies outside every chromosome slot")]
    OutOfLayout { pixel: f64 },

    #[error("invalid chromosome identifier: {0}")]
    InvalidChromosome(String),

    #[error("invalid region string: {0}")]
    InvalidRegion(String),

    #[error("layout is missing chromosome {0}")]
    MissingChromosome(Chromosome),
}

pub type Result<T> = std::result::Result<T, Error>;
