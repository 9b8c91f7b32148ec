use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type GenomicPos = u64;

/// Display names in canonical karyotype order.
const KARYOTYPE: [&str; 24] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "X", "Y",
];

/// One of the 24 human chromosomes, ordered by karyotype index so that
/// `X` sorts after `22` and before `Y`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct Chromosome(u8);

impl Chromosome {
    pub const COUNT: usize = 24;
    pub const X: Chromosome = Chromosome(22);
    pub const Y: Chromosome = Chromosome(23);

    /// All chromosomes in canonical order, `1..22, X, Y`.
    pub fn all() -> impl Iterator<Item = Chromosome> {
        (0..Self::COUNT as u8).map(Chromosome)
    }

    pub fn from_index(index: usize) -> Option<Chromosome> {
        (index < Self::COUNT).then(|| Chromosome(index as u8))
    }

    /// Position in canonical karyotype order, `0..24`.
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn name(self) -> &'static str {
        KARYOTYPE[self.0 as usize]
    }

    /// The following chromosome in karyotype order, wrapping `Y -> 1`.
    pub fn next(self) -> Chromosome {
        Chromosome((self.0 + 1) % Self::COUNT as u8)
    }

    /// The preceding chromosome in karyotype order, wrapping `1 -> Y`.
    pub fn prev(self) -> Chromosome {
        Chromosome((self.0 + Self::COUNT as u8 - 1) % Self::COUNT as u8)
    }
}

impl FromStr for Chromosome {
    type Err = Error;

    fn from_str(s: &str) -> Result<Chromosome> {
        let name = s.trim().strip_prefix("chr").unwrap_or(s.trim());
        match name.to_ascii_uppercase().as_str() {
            "X" | "23" => return Ok(Chromosome::X),
            "Y" | "24" => return Ok(Chromosome::Y),
            _ => {}
        }
        match name.parse::<u8>() {
            Ok(n) if (1..=22).contains(&n) => Ok(Chromosome(n - 1)),
            _ => Err(Error::InvalidChromosome(s.to_string())),
        }
    }
}

impl TryFrom<String> for Chromosome {
    type Error = Error;

    fn try_from(s: String) -> Result<Chromosome> {
        s.parse()
    }
}

impl From<Chromosome> for String {
    fn from(chrom: Chromosome) -> String {
        chrom.name().to_string()
    }
}

impl fmt::Display for Chromosome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A half-open span `[start, end)` on one chromosome.
///
/// Construction normalizes a reversed span by swapping its ends, so
/// `start < end` holds for every value of this type. Zero-width input is
/// rejected; downstream pixel mapping divides by the width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomicRegion {
    pub chromosome: Chromosome,
    pub start: GenomicPos,
    pub end: GenomicPos,
}

impl GenomicRegion {
    pub fn new(chromosome: Chromosome, start: GenomicPos, end: GenomicPos) -> Result<GenomicRegion> {
        if start == end {
            return Err(Error::DegenerateRegion {
                chromosome,
                position: start,
            });
        }
        let (start, end) = if start < end { (start, end) } else { (end, start) };
        Ok(GenomicRegion {
            chromosome,
            start,
            end,
        })
    }

    pub fn width(&self) -> u64 {
        self.end - self.start
    }

    /// Restrict the region to `[0, size]`, keeping it non-degenerate.
    pub fn clamp_to(&self, size: u64) -> GenomicRegion {
        let end = self.end.min(size.max(1));
        GenomicRegion {
            chromosome: self.chromosome,
            start: self.start.min(end - 1),
            end,
        }
    }
}

impl fmt::Display for GenomicRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chromosome, self.start, self.end)
    }
}

/// Data resolution class the backend selects its pre-binned files by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    A,
    B,
    C,
    D,
}

/// A parsed region request; `end == None` means "to the chromosome end".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionQuery {
    pub chromosome: Chromosome,
    pub start: GenomicPos,
    pub end: Option<GenomicPos>,
}

impl RegionQuery {
    /// Resolution by requested span: the wider the window, the coarser the
    /// bins. Open-ended queries always use the coarsest class.
    pub fn resolution(&self) -> Resolution {
        let end = match self.end {
            Some(end) => end,
            None => return Resolution::A,
        };
        let size = end.saturating_sub(self.start);
        if size > 25_000_000 {
            Resolution::A
        } else if size > 3_000_000 {
            Resolution::B
        } else if size > 200_000 {
            Resolution::C
        } else {
            Resolution::D
        }
    }

    pub fn into_region(self, chromosome_size: u64) -> Result<GenomicRegion> {
        let end = self.end.unwrap_or(chromosome_size);
        GenomicRegion::new(self.chromosome, self.start, end)
    }
}

impl fmt::Display for RegionQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end {
            Some(end) => write!(f, "{}:{}-{}", self.chromosome, self.start, end),
            None => write!(f, "{}:{}-None", self.chromosome, self.start),
        }
    }
}

/// Parse a region string of the form `<chrom>:<start>-<end>`.
///
/// Accepted variations:
/// - a whitespace-separated triple (`"1 100 200"`);
/// - `end` as the literal token `None`, meaning "to the chromosome end";
/// - a `chr` prefix on the chromosome name, and `23`/`24` for `X`/`Y`;
/// - a negative start (`"1:-100-200"`), which shifts the window right so it
///   starts at 0 with its width preserved.
pub fn parse_region_str(region: &str) -> Result<RegionQuery> {
    let invalid = || Error::InvalidRegion(region.to_string());

    let (chrom_str, start_str, end_str) = if region.contains(':') {
        let (chrom, range) = region.split_once(':').ok_or_else(invalid)?;
        let parts: Vec<&str> = range.split('-').collect();
        match parts.as_slice() {
            [start, end] => (chrom, *start, *end),
            // Leading '-' parses as an empty first field: negative start.
            ["", overhang, end] => {
                let chromosome: Chromosome = chrom.parse()?;
                let overhang: u64 = overhang.parse().map_err(|_| invalid())?;
                let end: u64 = end.parse().map_err(|_| invalid())?;
                return Ok(RegionQuery {
                    chromosome,
                    start: 0,
                    end: Some(end + overhang),
                });
            }
            _ => return Err(invalid()),
        }
    } else {
        let mut fields = region.split_whitespace();
        match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(chrom), Some(start), Some(end), None) => (chrom, start, end),
            _ => return Err(invalid()),
        }
    };

    let chromosome: Chromosome = chrom_str.parse()?;
    let start: i64 = start_str.trim().parse().map_err(|_| invalid())?;
    let end = match end_str.trim() {
        "None" => None,
        text => Some(text.parse::<u64>().map_err(|_| invalid())?),
    };
    Ok(RegionQuery {
        chromosome,
        start: start.max(0) as u64,
        end,
    })
}

/// A single measurement on a track: BAF in `[0, 1]` or a signed log2 ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub pos: GenomicPos,
    pub value: f64,
}

impl TrackPoint {
    pub fn new(pos: GenomicPos, value: f64) -> TrackPoint {
        TrackPoint { pos, value }
    }
}
