//! Split FreeSurfer brain surfaces into gyral crown, sulcal wall and sulcal fundus zones.
//!
//! The zones are defined by the 33rd and 66th percentiles of the per-vertex curvature. They can be
//! restricted to the regions of a cortical parcellation, and a per-vertex metric (like diffusion
//! data sampled onto the white surface) can be summarized within the zones of every region.
//!
//! The FreeSurfer file formats involved (curv, annot, MGH/MGZ) are read by the `fs_*` modules.

pub mod cli;
pub mod config;
pub mod error;
pub mod fs_annot;
pub mod fs_curv;
pub mod fs_mgh;
pub mod output;
pub mod pipeline;
pub mod plot;
pub mod regions;
pub mod stats;
pub mod util;
pub mod zones;

pub use config::Config;
pub use error::{GyralError, Result};
pub use fs_annot::{read_annot, FsAnnot, FsAnnotColortable};
pub use fs_curv::{read_curv, write_curv, CurvHeader, FsCurv};
pub use fs_mgh::{read_mgh, FsMgh, FsMghHeader};
pub use pipeline::{run, RunReport};
pub use regions::{RegionLabeling, RegionZones, DEFAULT_REGIONS};
pub use stats::{SummaryRow, ZoneStats};
pub use zones::{Percentiles, Zone, ZoneMasks};
