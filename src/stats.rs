//! Summary statistics of a per-vertex metric within the zones of each region.

use ndarray::Array1;
use ndarray_stats::SummaryStatisticsExt;

use crate::error::{GyralError, Result};
use crate::regions::RegionZones;
use crate::zones::Zone;


/// Mean and population standard deviation of the metric over the vertices of one zone.
///
/// Both values are NaN if the zone contains no vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneStats {
    pub mean: f64,
    pub sd: f64,
    pub num_vertices: usize,
}

impl ZoneStats {

    /// Compute the statistics over all metric values whose mask entry is `true`.
    pub fn of_selection(metric: &[f32], mask: &[bool]) -> ZoneStats {
        let selected: Array1<f64> = metric.iter()
            .zip(mask.iter())
            .filter(|(_, m)| **m)
            .map(|(v, _)| *v as f64)
            .collect();

        let mean = SummaryStatisticsExt::mean(&selected).unwrap_or(f64::NAN);
        let sd = selected.central_moment(2).map(f64::sqrt).unwrap_or(f64::NAN);

        ZoneStats { mean, sd, num_vertices: selected.len() }
    }

    pub fn is_empty(&self) -> bool {
        self.num_vertices == 0
    }
}


/// One line of the summary table: the metric statistics in the three zones of a region.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub file: String,
    pub region: String,
    pub crown: ZoneStats,
    pub wall: ZoneStats,
    pub fundus: ZoneStats,
}

impl SummaryRow {
    pub fn zone(&self, zone: Zone) -> &ZoneStats {
        match zone {
            Zone::Crown => &self.crown,
            Zone::Wall => &self.wall,
            Zone::Fundus => &self.fundus,
        }
    }
}


/// Compute one [`SummaryRow`] per region, in the order of `regions`.
///
/// # Errors
///
/// [`GyralError::LengthMismatch`] if the metric does not have one value per vertex of the region masks.
pub fn summarize(metric: &[f32], regions: &[RegionZones], source_file: &str) -> Result<Vec<SummaryRow>> {
    if let Some(first) = regions.first() {
        if first.masks.len() != metric.len() {
            return Err(GyralError::LengthMismatch("metric", first.masks.len(), metric.len()));
        }
    }

    Ok(regions.iter()
        .map(|region| {
            let stats = |zone: Zone| ZoneStats::of_selection(metric, region.masks.mask(zone));
            SummaryRow {
                file: source_file.to_string(),
                region: region.name.clone(),
                crown: stats(Zone::Crown),
                wall: stats(Zone::Wall),
                fundus: stats(Zone::Fundus),
            }
        })
        .collect())
}


#[cfg(test)]
mod test {
    use super::*;
    use crate::regions::{region_zones, RegionLabeling};
    use crate::zones::{Percentiles, ZoneMasks};
    use approx::assert_abs_diff_eq;

    #[test]
    fn constant_metric_has_zero_spread() {
        let metric = vec![0.7f32; 6];
        let mask = vec![true, false, true, true, false, true];
        let stats = ZoneStats::of_selection(&metric, &mask);

        assert_eq!(4, stats.num_vertices);
        assert_abs_diff_eq!(stats.mean, 0.7f32 as f64, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.sd, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn standard_deviation_is_the_population_one() {
        let metric = vec![2.0f32, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let stats = ZoneStats::of_selection(&metric, &[true; 8]);

        assert_abs_diff_eq!(stats.mean, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(stats.sd, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn an_empty_selection_yields_nan() {
        let stats = ZoneStats::of_selection(&[1.0, 2.0], &[false, false]);

        assert!(stats.is_empty());
        assert!(stats.mean.is_nan());
        assert!(stats.sd.is_nan());
    }

    #[test]
    fn rows_follow_region_order_and_keep_empty_zones() {
        let curv = vec![-3.0f32, -2.0, -1.0, 0.0, 1.0, 2.0, 3.0];
        let pct = Percentiles::from_curvature(&curv).unwrap();
        let masks = ZoneMasks::classify(&curv, &pct);
        let labeling = RegionLabeling {
            codes: vec![1, 1, 1, 1, 0, 0, 0],
            names: vec!["cuneus".to_string(), "precuneus".to_string()],
        };
        let regions = region_zones(&labeling, &masks, &["precuneus".to_string(), "cuneus".to_string()]).unwrap();
        let metric = vec![10.0f32, 20.0, 1.0, 3.0, 5.0, 7.0, 9.0];

        let rows = summarize(&metric, &regions, "lh.fa.mgh").unwrap();

        assert_eq!(2, rows.len());
        assert_eq!("precuneus", rows[0].region);
        assert_eq!("lh.fa.mgh", rows[0].file);
        assert_abs_diff_eq!(rows[0].crown.mean, 15.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rows[0].crown.sd, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rows[0].wall.mean, 2.0, epsilon = 1e-12);
        assert!(rows[0].fundus.mean.is_nan());

        // p66 = 0.96, so all of cuneus (curvature 1, 2, 3) is fundus
        assert_eq!("cuneus", rows[1].region);
        assert!(rows[1].zone(Zone::Crown).is_empty());
        assert!(rows[1].zone(Zone::Wall).is_empty());
        assert!(rows[1].wall.mean.is_nan());
        assert_eq!(3, rows[1].fundus.num_vertices);
        assert_abs_diff_eq!(rows[1].fundus.mean, 7.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rows[1].fundus.sd, (8.0f64 / 3.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn a_metric_of_different_length_is_rejected() {
        let curv = vec![-1.0f32, 0.0, 1.0];
        let pct = Percentiles::from_curvature(&curv).unwrap();
        let masks = ZoneMasks::classify(&curv, &pct);
        let labeling = RegionLabeling { codes: vec![0, 0, 0], names: vec!["cuneus".to_string()] };
        let regions = region_zones(&labeling, &masks, &["cuneus".to_string()]).unwrap();

        let result = summarize(&[1.0, 2.0], &regions, "m.mgh");
        assert!(matches!(result, Err(GyralError::LengthMismatch("metric", 3, 2))));
    }
}
