//! Functions for managing FreeSurfer brain volumes in binary 'MGH' files.
//!
//! Surface overlays produced by `mri_vol2surf` are stored as MGH volumes where one dimension
//! runs over the mesh vertices, so the same reader serves for per-vertex metrics.


use byteordered::{ByteOrdered};
use flate2::bufread::GzDecoder;
use ndarray::{Array, Array4, ShapeBuilder};

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path};

use crate::util::{is_gz_file, MAX_PREALLOCATED_VALUES};
use crate::error::{GyralError, Result};

pub const MGH_VERSION: i32 = 1;

pub const MRI_UCHAR: i32 = 0;
pub const MRI_INT: i32 = 1;
pub const MRI_FLOAT: i32 = 3;
pub const MRI_SHORT: i32 = 4;

pub const MGH_DATATYPE_NAMES : [&str; 4] = ["MRI_UCHAR", "MRI_INT", "MRI_FLOAT", "MRI_SHORT"];
pub const MGH_DATATYPE_CODES : [i32; 4] = [MRI_UCHAR, MRI_INT, MRI_FLOAT, MRI_SHORT];
pub const MGH_DATA_START : usize = 284; // The index in bytes where the data part starts in an MGH file.

/// Models the header of a FreeSurfer MGH file containing a brain volume.
#[derive(Debug, Clone, PartialEq)]
pub struct FsMghHeader {
    pub mgh_format_version: i32,
    pub dim1len: i32,
    pub dim2len: i32,
    pub dim3len: i32,
    pub dim4len: i32,  // aka "num_frames"
    pub dtype: i32,
    pub dof: i32,
    pub is_ras_good: i16,
    pub delta: [f32; 3],
    pub mdc_raw: [f32; 9],
    pub p_xyz_c: [f32; 3],
}


/// Models a FreeSurfer MGH file. Exactly one of the data fields is `Some`, depending on `header.dtype`.
#[derive(Debug, Clone, PartialEq)]
pub struct FsMgh {
    pub header: FsMghHeader,
    pub data_mri_uchar: Option<Array4<u8>>,
    pub data_mri_float: Option<Array4<f32>>,
    pub data_mri_int: Option<Array4<i32>>,
    pub data_mri_short: Option<Array4<i16>>,
}


impl Default for FsMghHeader {
    fn default() -> FsMghHeader {
        FsMghHeader {
            mgh_format_version: MGH_VERSION,
            dim1len: 0,
            dim2len: 0,
            dim3len: 0,
            dim4len: 0,
            dtype: MRI_INT,
            dof: 0,
            is_ras_good: 0,
            delta: [0.; 3],
            mdc_raw: [0.; 9],
            p_xyz_c: [0.; 3],
        }
    }
}

/// The header of an MGH/MGZ file.
impl FsMghHeader {

    /// Read an MGH header from the given byte stream.
    /// It is assumed that the input is currently at the start of the
    /// header. Afterwards, the input is positioned at the start of the data part.
    pub fn from_reader<S>(input: &mut S) -> Result<FsMghHeader>
    where
        S: Read,
    {
        let mut hdr = FsMghHeader::default();

        let mut input = ByteOrdered::be(input);

        hdr.mgh_format_version = input.read_i32()?;

        if hdr.mgh_format_version != MGH_VERSION {
            return Err(GyralError::InvalidFsMghFormat);
        }

        hdr.dim1len = input.read_i32()?;
        hdr.dim2len = input.read_i32()?;
        hdr.dim3len = input.read_i32()?;
        hdr.dim4len = input.read_i32()?;

        if hdr.dim1len < 0 || hdr.dim2len < 0 || hdr.dim3len < 0 || hdr.dim4len < 0 {
            return Err(GyralError::InvalidFsMghFormat);
        }

        hdr.dtype = input.read_i32()?;
        hdr.dof = input.read_i32()?;

        hdr.is_ras_good = input.read_i16()?;

        let mut header_bytes_read: usize = 7 * 4 + 2;

        if hdr.is_ras_good == 1 {
            for idx in 0..3 { hdr.delta[idx] = input.read_f32()?; }
            for idx in 0..9 { hdr.mdc_raw[idx] = input.read_f32()?; }
            for idx in 0..3 { hdr.p_xyz_c[idx] = input.read_f32()?; }
            header_bytes_read += 15 * 4;
        }

        // This is only read because we cannot seek in a GZ stream.
        for _ in header_bytes_read..MGH_DATA_START {
            input.read_u8()?;
        }

        Ok(hdr)
    }

    /// The dimensions of the volume, as `(dim1, dim2, dim3, frames)`.
    pub fn dim(&self) -> (usize, usize, usize, usize) {
        (self.dim1len as usize, self.dim2len as usize, self.dim3len as usize, self.dim4len as usize)
    }

    /// The FreeSurfer name of the data type, e.g. "MRI_FLOAT".
    pub fn dtype_name(&self) -> Option<&'static str> {
        MGH_DATATYPE_CODES.iter()
            .position(|c| *c == self.dtype)
            .map(|idx| MGH_DATATYPE_NAMES[idx])
    }

    /// The total number of voxels (or vertices, for surface overlays) over all frames.
    ///
    /// # Errors
    ///
    /// [`GyralError::InvalidFsMghFormat`] if the product of the dimensions does not fit into a `usize`.
    pub fn num_values(&self) -> Result<usize> {
        let (d1, d2, d3, d4) = self.dim();
        d1.checked_mul(d2)
            .and_then(|n| n.checked_mul(d3))
            .and_then(|n| n.checked_mul(d4))
            .ok_or(GyralError::InvalidFsMghFormat)
    }
}


impl FsMgh {

    /// Read an MGH or MGZ file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FsMgh> {
        let gz = is_mgz_file(&path);
        let file = BufReader::new(File::open(path)?);
        if gz {
            FsMgh::from_reader(&mut GzDecoder::new(file))
        } else {
            let mut file = file;
            FsMgh::from_reader(&mut file)
        }
    }

    /// Read header and data from the given byte stream, positioned at the start of the MGH file.
    ///
    /// The voxel values are stored on disk with the first dimension varying fastest, so the arrays
    /// are built in column-major (Fortran) memory order.
    pub fn from_reader<S>(input: &mut S) -> Result<FsMgh>
    where
        S: Read,
    {
        let hdr = FsMghHeader::from_reader(input)?;
        let n = hdr.num_values()?;
        let capacity = n.min(MAX_PREALLOCATED_VALUES);
        let shape = hdr.dim().f();

        let mut input = ByteOrdered::be(input);

        let mut mgh = FsMgh {
            header: hdr.clone(),
            data_mri_uchar: None,
            data_mri_float: None,
            data_mri_int: None,
            data_mri_short: None,
        };

        match hdr.dtype {
            MRI_UCHAR => {
                let mut data: Vec<u8> = Vec::with_capacity(capacity);
                for _ in 0..n { data.push(input.read_u8()?); }
                mgh.data_mri_uchar = Some(Array::from_shape_vec(shape, data)?);
            }
            MRI_INT => {
                let mut data: Vec<i32> = Vec::with_capacity(capacity);
                for _ in 0..n { data.push(input.read_i32()?); }
                mgh.data_mri_int = Some(Array::from_shape_vec(shape, data)?);
            }
            MRI_FLOAT => {
                let mut data: Vec<f32> = Vec::with_capacity(capacity);
                for _ in 0..n { data.push(input.read_f32()?); }
                mgh.data_mri_float = Some(Array::from_shape_vec(shape, data)?);
            }
            MRI_SHORT => {
                let mut data: Vec<i16> = Vec::with_capacity(capacity);
                for _ in 0..n { data.push(input.read_i16()?); }
                mgh.data_mri_short = Some(Array::from_shape_vec(shape, data)?);
            }
            other => return Err(GyralError::UnsupportedMriDataTypeInMgh(other)),
        }

        Ok(mgh)
    }

    /// Flatten the data into a 1D vector of f32 values, in logical (row-major) index order of the
    /// `(dim1, dim2, dim3, frames)` array. For surface overlays of shape `(num_vertices, 1, 1, 1)`
    /// this is simply the per-vertex value sequence.
    pub fn flat_data(&self) -> Vec<f32> {
        if let Some(data) = &self.data_mri_float {
            data.iter().copied().collect()
        } else if let Some(data) = &self.data_mri_int {
            data.iter().map(|v| *v as f32).collect()
        } else if let Some(data) = &self.data_mri_short {
            data.iter().map(|v| *v as f32).collect()
        } else if let Some(data) = &self.data_mri_uchar {
            data.iter().map(|v| *v as f32).collect()
        } else {
            Vec::new()
        }
    }
}


/// MGZ files are GZip compressed MGH files.
fn is_mgz_file<P: AsRef<Path>>(path: P) -> bool {
    is_gz_file(&path) || path.as_ref()
        .extension()
        .map(|e| e.eq_ignore_ascii_case("mgz"))
        .unwrap_or(false)
}


/// Read an MGH or MGZ file.
///
/// # Examples
///
/// ```no_run
/// let mgh = gyral_zones::read_mgh("/path/to/subjects_dir/subject1/surf/lh.fa.mgh").unwrap();
/// let per_vertex: Vec<f32> = mgh.flat_data();
/// ```
pub fn read_mgh<P: AsRef<Path>>(path: P) -> Result<FsMgh> {
    FsMgh::from_file(path)
}
