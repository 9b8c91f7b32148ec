//! Recorded-response data source.
//!
//! Serves the backend contract from a directory of JSON files captured from
//! a live server: `chrom_dims.json` plus one `<chrom>.json` full-chromosome
//! coverage response per chromosome. Region requests are answered by
//! slicing the recorded rows, widened by the request's extra plot width the
//! same way the live backend widens them.

use covplot_core::parse_region_str;
use covplot_view::{
    ChromDimsRequest, ChromDimsResponse, CoverageRequest, CoverageResponse, CoverageSource,
    ViewError,
};
use std::fs;
use std::path::PathBuf;

pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> FileSource {
        FileSource { dir: dir.into() }
    }

    fn read_json<T: serde::de::DeserializeOwned>(&self, name: &str) -> Result<T, ViewError> {
        let path = self.dir.join(name);
        let text = fs::read_to_string(&path)
            .map_err(|err| ViewError::Fetch(format!("{}: {err}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|err| ViewError::Fetch(format!("{}: {err}", path.display())))
    }
}

impl CoverageSource for FileSource {
    fn chrom_dims(&self, _request: &ChromDimsRequest) -> Result<ChromDimsResponse, ViewError> {
        self.read_json("chrom_dims.json")
    }

    fn coverage(&self, request: &CoverageRequest) -> Result<CoverageResponse, ViewError> {
        let query = parse_region_str(&request.region).map_err(ViewError::Core)?;
        let recorded: CoverageResponse = self.read_json(&format!("{}.json", query.chromosome))?;

        let data_end = |rows: &[[f64; 4]]| rows.last().map_or(0, |row| row[1] as u64);
        let end = match query.end {
            Some(end) => end,
            // Open-ended: resolve to the recorded data extent.
            None => data_end(&recorded.data).max(data_end(&recorded.baf)),
        };
        if end <= query.start {
            return Err(ViewError::Fetch(format!(
                "no data for {} in {}",
                request.region, query.chromosome
            )));
        }
        log::debug!(
            "serving {} at resolution {:?}",
            request.region,
            query.resolution()
        );

        // Widen by the extra plot width so drags have edge data, as the
        // live backend does.
        let extra = if query.end.is_some() && request.x_ampl > 0.0 {
            (request.extra_plot_width * (end - query.start) as f64 / request.x_ampl) as u64
        } else {
            0
        };
        let lo = query.start.saturating_sub(extra);
        let hi = end + extra;
        let slice = |rows: &[[f64; 4]]| -> Vec<[f64; 4]> {
            rows.iter()
                .filter(|row| {
                    let pos = row[1] as u64;
                    pos >= lo && pos <= hi
                })
                .copied()
                .collect()
        };

        Ok(CoverageResponse {
            chrom: query.chromosome,
            start: query.start,
            end,
            y_pos: request.ypos,
            baf: slice(&recorded.baf),
            data: slice(&recorded.data),
        })
    }
}
