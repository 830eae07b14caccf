//! Settings for a single run of the zone extraction.

use std::path::PathBuf;


/// Inputs and options of one run. Only `curv_file` is required.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// FreeSurfer curv file of a single hemisphere, e.g. `surf/lh.curv`.
    pub curv_file: PathBuf,
    /// Parcellation of the same hemisphere, e.g. `label/lh.aparc.annot`.
    pub annot_file: Option<PathBuf>,
    /// Per-vertex metric in MGH/MGZ format, e.g. diffusion data sampled onto the white surface.
    pub metric_file: Option<PathBuf>,
    /// Region names to summarize. `None` selects the default region list.
    pub regions: Option<Vec<String>>,
    /// Summary table path. `None` writes next to the metric file.
    pub output_csv: Option<PathBuf>,
    /// Optional path for the raw per-vertex table.
    pub save_data: Option<PathBuf>,
    /// Render the curvature histogram and, with a metric, the scatter plot.
    pub plots: bool,
    /// Write one combined label file per region.
    pub region_labels: bool,
}

impl Config {
    /// A config that only classifies the given curvature file, with plots enabled.
    pub fn new<P: Into<PathBuf>>(curv_file: P) -> Config {
        Config {
            curv_file: curv_file.into(),
            annot_file: None,
            metric_file: None,
            regions: None,
            output_csv: None,
            save_data: None,
            plots: true,
            region_labels: false,
        }
    }
}
