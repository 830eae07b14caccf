//! One complete run: load the inputs, classify, restrict to regions, summarize, write.
//!
//! All inputs are loaded and validated, and all regions resolved, before the first file is written.

use log::{debug, info, warn};

use std::path::PathBuf;

use crate::config::Config;
use crate::error::{GyralError, Result};
use crate::fs_annot::read_annot;
use crate::fs_curv::read_curv;
use crate::fs_mgh::read_mgh;
use crate::output::{self, OutputPaths};
use crate::plot;
use crate::regions::{region_zones, requested_or_default, RegionLabeling, RegionZones};
use crate::stats::{summarize, SummaryRow};
use crate::zones::{Percentiles, Zone, ZoneMasks};


/// What a run computed and which files it wrote.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub percentiles: Percentiles,
    pub masks: ZoneMasks,
    pub regions: Vec<RegionZones>,
    pub rows: Vec<SummaryRow>,
    pub written: Vec<PathBuf>,
}


fn check_vertex_count(what: &'static str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(GyralError::LengthMismatch(what, expected, found));
    }
    Ok(())
}


/// Run the zone extraction as described by the config.
///
/// # Errors
///
/// Any read error of the inputs, [`GyralError::LengthMismatch`] if annotation or metric do not have one value
/// per curvature vertex, [`GyralError::UnknownRegion`] for region names missing from the annotation, and write
/// errors. Only write errors can leave some of the outputs behind.
pub fn run(config: &Config) -> Result<RunReport> {
    let curv = read_curv(&config.curv_file)?.data;
    info!("Read {} curvature values from '{}'.", curv.len(), config.curv_file.display());

    let labeling = match &config.annot_file {
        Some(path) => {
            let annot = read_annot(path)?;
            debug!("{}", annot);
            let labeling = RegionLabeling::from_annot(&annot);
            check_vertex_count("annotation", curv.len(), labeling.len())?;
            Some(labeling)
        }
        None => None,
    };

    let metric = match &config.metric_file {
        Some(path) => {
            let mgh = read_mgh(path)?;
            debug!("Metric volume has dimensions {:?} and data type {}.", mgh.header.dim(), mgh.header.dtype_name().unwrap_or("unknown"));
            let metric = mgh.flat_data();
            check_vertex_count("metric", curv.len(), metric.len())?;
            Some(metric)
        }
        None => None,
    };

    let percentiles = Percentiles::from_curvature(&curv)?;
    info!("Curvature thresholds: {}.", percentiles);

    let masks = ZoneMasks::classify(&curv, &percentiles);
    info!("Vertices per zone: {} crown, {} wall, {} fundus.",
        masks.count(Zone::Crown), masks.count(Zone::Wall), masks.count(Zone::Fundus));

    let regions = match &labeling {
        Some(labeling) => {
            if config.regions.as_ref().map_or(true, |r| r.is_empty()) {
                info!("Using default ROIs: {:?}", requested_or_default(None));
            }
            let names = requested_or_default(config.regions.as_deref());
            region_zones(labeling, &masks, &names)?
        }
        None => {
            if config.regions.is_some() {
                warn!("Ignoring the requested regions, no annot file given.");
            }
            Vec::new()
        }
    };

    let rows = match (&metric, &config.metric_file, &labeling) {
        (Some(metric), Some(metric_file), Some(_)) => {
            let rows = summarize(metric, &regions, &metric_file.to_string_lossy())?;
            for row in rows.iter() {
                for zone in Zone::ALL.iter() {
                    if row.zone(*zone).is_empty() {
                        warn!("Region '{}' has no {} vertices, its statistics are NaN.", row.region, zone);
                    }
                }
            }
            rows
        }
        (Some(_), _, None) => {
            warn!("No annot file given, skipping the per-region metric summary.");
            Vec::new()
        }
        _ => Vec::new(),
    };

    let paths = OutputPaths::for_curv(&config.curv_file);
    let mut written: Vec<PathBuf> = Vec::new();

    output::write_zone_masks(&paths, &masks)?;
    written.extend(Zone::ALL.iter().map(|z| paths.zone_mask(*z).to_path_buf()));
    written.push(paths.combined.clone());

    if config.region_labels {
        written.extend(output::write_region_labels(&paths, &regions)?);
    }

    if let (Some(metric_file), Some(_)) = (&config.metric_file, &labeling) {
        let csv_path = config.output_csv.clone()
            .unwrap_or_else(|| output::default_summary_csv(metric_file));
        output::write_summary_csv(&csv_path, &rows)?;
        written.push(csv_path);
    }

    if let Some(path) = &config.save_data {
        output::write_vertex_table(path, &curv, &masks, labeling.as_ref(), metric.as_deref())?;
        written.push(path.clone());
    }

    if config.plots {
        plot::plot_curvature_histogram(&paths.histogram, &curv, &percentiles)?;
        written.push(paths.histogram.clone());

        if let (Some(metric), Some(metric_file)) = (&metric, &config.metric_file) {
            let scatter = output::scatter_plot_path(metric_file);
            plot::plot_metric_vs_curvature(&scatter, &curv, metric)?;
            written.push(scatter);
        }
    }

    for path in written.iter() {
        info!("Wrote '{}'.", path.display());
    }

    Ok(RunReport { percentiles, masks, regions, rows, written })
}
