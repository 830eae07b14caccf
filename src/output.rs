//! Output files: zone masks as FreeSurfer curv files, and summary tables as CSV.

use std::path::{Path, PathBuf};

use crate::error::{GyralError, Result};
use crate::fs_curv::write_curv;
use crate::regions::{RegionLabeling, RegionZones};
use crate::stats::SummaryRow;
use crate::util::{curv_basename, strip_last_extension, with_suffix};
use crate::zones::{Zone, ZoneMasks};

pub const CROWN_SUFFIX: &str = ".gyral_crown";
pub const WALL_SUFFIX: &str = ".sulcal_wall";
pub const FUNDUS_SUFFIX: &str = ".sulcal_fundi";
pub const COMBINED_SUFFIX: &str = ".crown_wall_sulc";
pub const HISTOGRAM_SUFFIX: &str = ".histogram_curvature.png";
pub const SUMMARY_CSV_SUFFIX: &str = "_gyral_wall_sulcal_metrics.csv";
pub const SCATTER_SUFFIX: &str = "_curv_vs_metric.png";

pub const SUMMARY_CSV_HEADER: [&str; 8] = ["File", "Region", "Crown_mean", "Crown_sd", "Wall_mean", "Wall_sd", "Sulcus_mean", "Sulcus_sd"];
pub const VERTEX_CSV_HEADER: [&str; 5] = ["Vertex", "Curvature", "Zone", "Region", "Metric"];


/// Paths of the files derived from the curvature input.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub basename: PathBuf,
    pub crown: PathBuf,
    pub wall: PathBuf,
    pub fundus: PathBuf,
    pub combined: PathBuf,
    pub histogram: PathBuf,
}

impl OutputPaths {

    /// Derive all output paths from the curvature file path, e.g. `surf/lh.curv` gives `surf/lh.gyral_crown`.
    pub fn for_curv<P: AsRef<Path>>(curv_file: P) -> OutputPaths {
        let basename = curv_basename(curv_file);
        OutputPaths {
            crown: with_suffix(&basename, CROWN_SUFFIX),
            wall: with_suffix(&basename, WALL_SUFFIX),
            fundus: with_suffix(&basename, FUNDUS_SUFFIX),
            combined: with_suffix(&basename, COMBINED_SUFFIX),
            histogram: with_suffix(&basename, HISTOGRAM_SUFFIX),
            basename,
        }
    }

    pub fn zone_mask(&self, zone: Zone) -> &Path {
        match zone {
            Zone::Crown => &self.crown,
            Zone::Wall => &self.wall,
            Zone::Fundus => &self.fundus,
        }
    }

    /// Path of the combined label file of a single region.
    pub fn region_combined(&self, region: &str) -> PathBuf {
        with_suffix(&self.basename, &format!("{}_{}", COMBINED_SUFFIX, region))
    }
}


/// Default summary table path, next to the metric file: `x/lh.fa.mgh` gives `x/lh.fa_gyral_wall_sulcal_metrics.csv`.
pub fn default_summary_csv<P: AsRef<Path>>(metric_file: P) -> PathBuf {
    with_suffix(strip_last_extension(metric_file), SUMMARY_CSV_SUFFIX)
}

/// Path of the curvature vs. metric scatter plot, next to the metric file.
pub fn scatter_plot_path<P: AsRef<Path>>(metric_file: P) -> PathBuf {
    with_suffix(strip_last_extension(metric_file), SCATTER_SUFFIX)
}


fn check_len(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(GyralError::LengthMismatch(what, expected, found));
    }
    Ok(())
}

fn mask_values(mask: &[bool]) -> Vec<f32> {
    mask.iter().map(|m| if *m { 1.0 } else { 0.0 }).collect()
}

fn label_values(label: &[u8]) -> Vec<f32> {
    label.iter().map(|l| *l as f32).collect()
}


/// Write the three zone masks (as 0/1 values) and the combined label (1/2/3) as curv files.
pub fn write_zone_masks(paths: &OutputPaths, masks: &ZoneMasks) -> Result<()> {
    for zone in Zone::ALL.iter() {
        write_curv(paths.zone_mask(*zone), &mask_values(masks.mask(*zone)))?;
    }
    write_curv(&paths.combined, &label_values(&masks.combined_label()))?;
    Ok(())
}


/// Write the combined label of every region to its own curv file. Returns the written paths.
pub fn write_region_labels(paths: &OutputPaths, regions: &[RegionZones]) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(regions.len());
    for region in regions.iter() {
        let path = paths.region_combined(&region.name);
        write_curv(&path, &label_values(&region.combined))?;
        written.push(path);
    }
    Ok(written)
}


/// Write the summary table with one row per region. Statistics of empty zones are written as `NaN`.
pub fn write_summary_csv<P: AsRef<Path>>(path: P, rows: &[SummaryRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&SUMMARY_CSV_HEADER)?;
    for row in rows.iter() {
        wtr.write_record(&[
            row.file.clone(),
            row.region.clone(),
            row.crown.mean.to_string(),
            row.crown.sd.to_string(),
            row.wall.mean.to_string(),
            row.wall.sd.to_string(),
            row.fundus.mean.to_string(),
            row.fundus.sd.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}


/// Write the raw per-vertex data: curvature, zone label, and, if available, region name and metric value.
///
/// Region and metric columns are left empty when the respective input is missing; the region
/// column is also empty for vertices not assigned to any colortable region.
pub fn write_vertex_table<P: AsRef<Path>>(path: P, curv: &[f32], masks: &ZoneMasks, labeling: Option<&RegionLabeling>, metric: Option<&[f32]>) -> Result<()> {
    check_len("zone masks", curv.len(), masks.len())?;
    if let Some(l) = labeling {
        check_len("annotation", curv.len(), l.len())?;
    }
    if let Some(m) = metric {
        check_len("metric", curv.len(), m.len())?;
    }

    let combined = masks.combined_label();
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(&VERTEX_CSV_HEADER)?;
    for (idx, value) in curv.iter().enumerate() {
        let region = labeling
            .and_then(|l| l.name_of(l.codes[idx]))
            .unwrap_or("");
        let metric_value = metric
            .map(|m| m[idx].to_string())
            .unwrap_or_default();
        wtr.write_record(&[
            idx.to_string(),
            value.to_string(),
            combined[idx].to_string(),
            region.to_string(),
            metric_value,
        ])?;
    }
    wtr.flush()?;
    Ok(())
}
