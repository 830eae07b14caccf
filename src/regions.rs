//! Restrict the curvature zones to named cortical regions of a surface parcellation.

use crate::error::{GyralError, Result};
use crate::fs_annot::FsAnnot;
use crate::zones::ZoneMasks;

/// Regions used when the caller does not name any, from the Desikan-Killiani atlas (`aparc`).
pub const DEFAULT_REGIONS: [&str; 15] = [
    "entorhinal",
    "postcentral",
    "superiortemporal",
    "fusiform",
    "lateraloccipital",
    "middletemporal",
    "posteriorcingulate",
    "inferiorparietal",
    "parahippocampal",
    "precentral",
    "cuneus",
    "inferiortemporal",
    "paracentral",
    "precuneus",
    "superiorparietal",
];

/// Region code for vertices whose annot label matches no colortable entry.
pub const NO_REGION: i32 = -1;


/// Per-vertex region codes plus the code to name mapping. A region's code is its index in `names`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionLabeling {
    pub codes: Vec<i32>,
    pub names: Vec<String>,
}

impl RegionLabeling {

    /// Build the labeling from a parcellation, replacing the packed RGB labels by colortable indices.
    pub fn from_annot(annot: &FsAnnot) -> RegionLabeling {
        let codes = annot.vertex_colortable_indices()
            .into_iter()
            .map(|idx| idx.map(|i| i as i32).unwrap_or(NO_REGION))
            .collect();
        RegionLabeling { codes, names: annot.regions() }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Look up the code of a region by name.
    ///
    /// # Errors
    ///
    /// [`GyralError::UnknownRegion`] if the name is not part of the mapping.
    pub fn code_of(&self, name: &str) -> Result<i32> {
        self.names.iter()
            .position(|n| n == name)
            .map(|idx| idx as i32)
            .ok_or_else(|| GyralError::UnknownRegion(name.to_string()))
    }

    pub fn name_of(&self, code: i32) -> Option<&str> {
        if code < 0 {
            return None;
        }
        self.names.get(code as usize).map(|n| n.as_str())
    }

    /// Membership mask of the region with the given code.
    pub fn membership(&self, code: i32) -> Vec<bool> {
        self.codes.iter().map(|c| *c == code).collect()
    }
}


/// The zones of one region: each mask is the global zone mask restricted to the region's vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionZones {
    pub name: String,
    pub code: i32,
    pub masks: ZoneMasks,
    /// Combined zone label, 0 for all vertices outside the region.
    pub combined: Vec<u8>,
}


/// The region names to use: the requested ones, or [`DEFAULT_REGIONS`] if none were requested.
pub fn requested_or_default(requested: Option<&[String]>) -> Vec<String> {
    match requested {
        Some(names) if !names.is_empty() => names.to_vec(),
        _ => DEFAULT_REGIONS.iter().map(|n| n.to_string()).collect(),
    }
}


/// Resolve every region name to its code. Fails on the first name that is not part of the labeling,
/// before any masks are computed.
pub fn resolve_regions(labeling: &RegionLabeling, names: &[String]) -> Result<Vec<(String, i32)>> {
    names.iter()
        .map(|name| labeling.code_of(name).map(|code| (name.clone(), code)))
        .collect()
}


/// Compute the zone masks of every requested region, in request order.
///
/// # Errors
///
/// * [`GyralError::LengthMismatch`] if the labeling and the masks cover different numbers of vertices.
/// * [`GyralError::UnknownRegion`] if a requested name is not part of the labeling.
pub fn region_zones(labeling: &RegionLabeling, masks: &ZoneMasks, names: &[String]) -> Result<Vec<RegionZones>> {
    if labeling.len() != masks.len() {
        return Err(GyralError::LengthMismatch("annotation", masks.len(), labeling.len()));
    }

    let resolved = resolve_regions(labeling, names)?;

    Ok(resolved.into_iter()
        .map(|(name, code)| {
            let region_masks = masks.restrict(&labeling.membership(code));
            let combined = region_masks.combined_label();
            RegionZones { name, code, masks: region_masks, combined }
        })
        .collect())
}
