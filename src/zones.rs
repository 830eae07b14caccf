//! Split brain surface vertices into three curvature zones.
//!
//! Vertices with a curvature below the 33rd percentile form the gyral crowns, vertices above the
//! 66th percentile form the sulcal fundi, and everything in between (both thresholds included)
//! forms the sulcal walls. The three zones are disjoint and together cover every vertex.

use ndarray::Array1;
use ndarray_stats::{interpolate::Linear, Quantile1dExt};
use noisy_float::types::{n64, N64};

use std::fmt;

use crate::error::{GyralError, Result};

pub const CROWN_PERCENTILE: f64 = 33.0;
pub const FUNDUS_PERCENTILE: f64 = 66.0;


/// The two curvature thresholds separating the zones, computed once per surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Percentiles {
    pub p33: f64,
    pub p66: f64,
}

impl Percentiles {

    /// Compute the 33rd and 66th percentiles of the curvature values, using linear interpolation
    /// between the two closest ranks.
    ///
    /// # Errors
    ///
    /// [`GyralError::EmptyCurvature`] for empty input, and [`GyralError::NonFiniteCurvature`] if any value is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```
    /// let pct = gyral_zones::Percentiles::from_curvature(&[-2.0, -1.0, 0.0, 1.0, 2.0]).unwrap();
    /// assert!((pct.p33 - (-0.68)).abs() < 1e-9);
    /// assert!((pct.p66 - 0.64).abs() < 1e-9);
    /// ```
    pub fn from_curvature(curv: &[f32]) -> Result<Percentiles> {
        if curv.is_empty() {
            return Err(GyralError::EmptyCurvature);
        }
        if let Some(vertex) = curv.iter().position(|v| !v.is_finite()) {
            return Err(GyralError::NonFiniteCurvature(vertex));
        }

        let mut values: Array1<N64> = curv.iter().map(|v| n64(*v as f64)).collect();
        let p33 = percentile(&mut values, CROWN_PERCENTILE)?;
        let p66 = percentile(&mut values, FUNDUS_PERCENTILE)?;

        Ok(Percentiles { p33, p66 })
    }

    /// Get the zone a curvature value falls into. Values equal to a threshold belong to the wall.
    pub fn zone_of(&self, value: f32) -> Zone {
        let value = value as f64;
        if value < self.p33 {
            Zone::Crown
        } else if value > self.p66 {
            Zone::Fundus
        } else {
            Zone::Wall
        }
    }
}

impl fmt::Display for Percentiles {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "33rd percentile = {:.6}, 66th percentile = {:.6}", self.p33, self.p66)
    }
}


fn percentile(values: &mut Array1<N64>, p: f64) -> Result<f64> {
    values.quantile_mut(n64(p / 100.0), &Linear)
        .map(|q| q.raw())
        .map_err(|_| GyralError::EmptyCurvature)
}


/// A curvature zone. The discriminant is the value used in combined label files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    Crown = 1,
    Wall = 2,
    Fundus = 3,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Crown, Zone::Wall, Zone::Fundus];

    pub fn label(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            Zone::Crown => "crown",
            Zone::Wall => "wall",
            Zone::Fundus => "fundus",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}


/// One boolean mask per zone, each with one entry per vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneMasks {
    pub crown: Vec<bool>,
    pub wall: Vec<bool>,
    pub fundus: Vec<bool>,
}

impl ZoneMasks {

    /// Assign every curvature value to its zone.
    pub fn classify(curv: &[f32], pct: &Percentiles) -> ZoneMasks {
        let zones: Vec<Zone> = curv.iter().map(|v| pct.zone_of(*v)).collect();
        ZoneMasks {
            crown: zones.iter().map(|z| *z == Zone::Crown).collect(),
            wall: zones.iter().map(|z| *z == Zone::Wall).collect(),
            fundus: zones.iter().map(|z| *z == Zone::Fundus).collect(),
        }
    }

    /// Number of vertices covered by the masks.
    pub fn len(&self) -> usize {
        self.crown.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crown.is_empty()
    }

    pub fn mask(&self, zone: Zone) -> &[bool] {
        match zone {
            Zone::Crown => &self.crown,
            Zone::Wall => &self.wall,
            Zone::Fundus => &self.fundus,
        }
    }

    /// Number of vertices in the given zone.
    pub fn count(&self, zone: Zone) -> usize {
        self.mask(zone).iter().filter(|m| **m).count()
    }

    /// Intersect all three masks with a vertex membership mask, e.g. the vertices of a brain region.
    pub fn restrict(&self, member: &[bool]) -> ZoneMasks {
        let and = |mask: &[bool]| -> Vec<bool> {
            mask.iter().zip(member.iter()).map(|(a, b)| *a && *b).collect()
        };
        ZoneMasks {
            crown: and(&self.crown),
            wall: and(&self.wall),
            fundus: and(&self.fundus),
        }
    }

    /// Encode the three masks into a single label per vertex: 1 for crown, 2 for wall, 3 for fundus,
    /// and 0 for vertices outside all masks (which only happens after [`ZoneMasks::restrict`]).
    pub fn combined_label(&self) -> Vec<u8> {
        (0..self.len())
            .map(|idx| {
                Zone::ALL.iter()
                    .find(|zone| self.mask(**zone)[idx])
                    .map(|zone| zone.label())
                    .unwrap_or(0)
            })
            .collect()
    }
}


#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn one_to_hundred() -> Vec<f32> {
        (1..=100).map(|v| v as f32).collect()
    }

    #[test]
    fn percentiles_use_linear_interpolation() {
        let pct = Percentiles::from_curvature(&one_to_hundred()).unwrap();
        assert_abs_diff_eq!(pct.p33, 33.67, epsilon = 1e-9);
        assert_abs_diff_eq!(pct.p66, 66.34, epsilon = 1e-9);
    }

    #[test]
    fn percentiles_do_not_depend_on_input_order() {
        let mut values = one_to_hundred();
        values.reverse();
        let pct = Percentiles::from_curvature(&values).unwrap();
        assert_abs_diff_eq!(pct.p33, 33.67, epsilon = 1e-9);
        assert_abs_diff_eq!(pct.p66, 66.34, epsilon = 1e-9);
    }

    #[test]
    fn a_single_value_is_both_percentiles() {
        let pct = Percentiles::from_curvature(&[0.25]).unwrap();
        assert_eq!(0.25, pct.p33);
        assert_eq!(0.25, pct.p66);
        assert_eq!(Zone::Wall, pct.zone_of(0.25));
    }

    #[test]
    fn empty_and_non_finite_curvature_is_rejected() {
        assert!(matches!(Percentiles::from_curvature(&[]), Err(GyralError::EmptyCurvature)));
        assert!(matches!(Percentiles::from_curvature(&[1.0, f32::NAN]), Err(GyralError::NonFiniteCurvature(1))));
        assert!(matches!(Percentiles::from_curvature(&[f32::INFINITY]), Err(GyralError::NonFiniteCurvature(0))));
    }

    #[test]
    fn zone_counts_for_one_to_hundred() {
        let curv = one_to_hundred();
        let pct = Percentiles::from_curvature(&curv).unwrap();
        let masks = ZoneMasks::classify(&curv, &pct);

        assert_eq!(33, masks.count(Zone::Crown));
        assert_eq!(33, masks.count(Zone::Wall));
        assert_eq!(34, masks.count(Zone::Fundus));
    }

    #[test]
    fn zones_are_disjoint_and_exhaustive() {
        let curv: Vec<f32> = (0..257).map(|i| ((i * 37) % 101) as f32 / 7.0 - 6.0).collect();
        let pct = Percentiles::from_curvature(&curv).unwrap();
        let masks = ZoneMasks::classify(&curv, &pct);

        for idx in 0..curv.len() {
            let hits = Zone::ALL.iter().filter(|z| masks.mask(**z)[idx]).count();
            assert_eq!(1, hits, "vertex {} is in {} zones", idx, hits);
        }
        assert_eq!(curv.len(), masks.count(Zone::Crown) + masks.count(Zone::Wall) + masks.count(Zone::Fundus));
    }

    #[test]
    fn values_on_the_thresholds_belong_to_the_wall() {
        let curv = vec![1.0f32, 2.0, 2.0, 2.0, 3.0];
        let pct = Percentiles::from_curvature(&curv).unwrap();
        assert_eq!(2.0, pct.p33);
        assert_eq!(2.0, pct.p66);

        let masks = ZoneMasks::classify(&curv, &pct);
        assert_eq!(vec![1, 2, 2, 2, 3], masks.combined_label());
    }

    #[test]
    fn combined_label_matches_the_masks() {
        let curv = vec![-2.0f32, -1.0, 0.0, 1.0, 2.0];
        let pct = Percentiles::from_curvature(&curv).unwrap();
        let masks = ZoneMasks::classify(&curv, &pct);
        let combined = masks.combined_label();

        assert_eq!(vec![1, 1, 2, 3, 3], combined);
        for (idx, label) in combined.iter().enumerate() {
            assert_eq!(*label == 1, masks.crown[idx]);
            assert_eq!(*label == 2, masks.wall[idx]);
            assert_eq!(*label == 3, masks.fundus[idx]);
        }
    }

    #[test]
    fn restricted_masks_are_zero_outside_the_member_vertices() {
        let curv = vec![-2.0f32, -1.0, 0.0, 1.0, 2.0];
        let pct = Percentiles::from_curvature(&curv).unwrap();
        let masks = ZoneMasks::classify(&curv, &pct);
        let region = masks.restrict(&[true, false, true, false, true]);

        assert_eq!(vec![1, 0, 2, 0, 3], region.combined_label());
        assert_eq!(1, region.count(Zone::Crown));
    }
}
