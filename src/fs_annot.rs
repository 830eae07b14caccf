//! Functions for managing FreeSurfer brain surface parcellations in annot files.
//!
//! These files assign each vertex of a brain surface mesh to exactly one brain region
//! or label. A so-called colortable contains data on the regions, including the region's
//! name, an RGB display color, and a unique identifier.

use byteordered::{ByteOrdered};
use flate2::bufread::GzDecoder;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path};
use std::fmt;

use crate::util::{is_gz_file, read_fixed_length_string, MAX_PREALLOCATED_VALUES};
use crate::error::{GyralError, Result};


#[derive(Debug, Clone, PartialEq)]
pub struct FsAnnotColortable {
    pub id: Vec<i32>,  // A region index, not really needed. The 'label' is unique as well and more relevant, see below.
    pub name: Vec<String>,
    pub r: Vec<i32>,
    pub g: Vec<i32>,
    pub b: Vec<i32>,
    pub a: Vec<i32>,
    pub label: Vec<i32>, // A unique label computed from r,g,b. Used in annot.vertex_labels to identify the region.
}

impl FsAnnotColortable {

    /// Read a colortable in format version 2 from a reader. The reader must be at the start position of the colortable.
    pub fn from_reader<S>(input: &mut S) -> Result<FsAnnotColortable>
    where
        S: Read,
    {
        let mut input = ByteOrdered::be(input);

        let num_chars_orig_filename: i32 = input.read_i32()?; // Length of following string.
        let _orig_filename = read_fixed_length_string(&mut input, num_chars_orig_filename as usize)?;
        let num_colortable_entries: i32 = input.read_i32()?; // Yes, it is stored twice. Once here, once before.

        let num_entries = num_colortable_entries.max(0) as usize;
        let capacity = num_entries.min(MAX_PREALLOCATED_VALUES);
        let mut id: Vec<i32> = Vec::with_capacity(capacity);
        let mut name: Vec<String> = Vec::with_capacity(capacity);
        let mut r: Vec<i32> = Vec::with_capacity(capacity);
        let mut g: Vec<i32> = Vec::with_capacity(capacity);
        let mut b: Vec<i32> = Vec::with_capacity(capacity);
        let mut a: Vec<i32> = Vec::with_capacity(capacity);
        let mut label: Vec<i32> = Vec::with_capacity(capacity);

        for idx in 0..num_entries {
            id.push(input.read_i32()?);
            let num_chars_region_name: i32 = input.read_i32()?; // Length of following string.
            name.push(read_fixed_length_string(&mut input, num_chars_region_name as usize)?);
            r.push(input.read_i32()?);
            g.push(input.read_i32()?);
            b.push(input.read_i32()?);
            a.push(input.read_i32()?);

            // FreeSurfer packs only the color channels into the label, the alpha (transparency) value is ignored.
            label.push(r[idx] + g[idx] * (1 << 8) + b[idx] * (1 << 16));
        }

        Ok(FsAnnotColortable { id, name, r, g, b, a, label })
    }
}

impl fmt::Display for FsAnnotColortable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Colortable for {} brain regions.", self.id.len())
    }
}


/// Models a FreeSurfer brain surface parcellation from an annot file. This is the result of applying a brain atlas (like Desikan-Killiani) to a subject. The `vertex_indices` are the 0-based indices used in FreeSurfer and should be ignored. The `vertex_labels` field contains the mesh vertices in order, and assigns to each vertex a brain region using the `label` field (not the `id` field!) from the `colortable`. The field `colortable` contains an [`FsAnnotColortable`] struct that describes the brain regions.
#[derive(Debug, Clone, PartialEq)]
pub struct FsAnnot {
    pub vertex_indices: Vec<i32>, // 0-based indices, not really needed as all vertices need to be covered in order.
    pub vertex_labels: Vec<i32>,
    pub colortable: FsAnnotColortable,
}

impl FsAnnot {
    /// Read an FsAnnot instance from a file. Files ending in ".gz" are decompressed on the fly.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FsAnnot> {
        let gz = is_gz_file(&path);
        let file = BufReader::new(File::open(path)?);
        if gz {
            FsAnnot::from_reader(&mut GzDecoder::new(file))
        } else {
            let mut file = file;
            FsAnnot::from_reader(&mut file)
        }
    }

    /// Read an annot from the given byte stream, which must be positioned at the start of the file.
    pub fn from_reader<S>(input: &mut S) -> Result<FsAnnot>
    where
        S: Read,
    {
        let mut file = ByteOrdered::be(input);

        let num_vertices: i32 = file.read_i32()?;

        let capacity = (num_vertices.max(0) as usize).min(MAX_PREALLOCATED_VALUES);
        let mut vertex_indices : Vec<i32> = Vec::with_capacity(capacity);
        let mut vertex_labels : Vec<i32> = Vec::with_capacity(capacity);
        for _ in 0..num_vertices {
            vertex_indices.push(file.read_i32()?);
            vertex_labels.push(file.read_i32()?);
        }

        let has_colortable: i32 = file.read_i32()?;

        if has_colortable != 1 {
            return Err(GyralError::UnsupportedFsAnnotFormatVersion);
        }

        let num_colortable_entries: i32 = file.read_i32()?;

        if num_colortable_entries == -2 { // If this is negative, the absolute value encodes the file format version. We only support version 2.
            let _max_structure_id: i32 = file.read_i32()?;

            let colortable: FsAnnotColortable = FsAnnotColortable::from_reader(&mut file)?;

            Ok(FsAnnot { vertex_indices, vertex_labels, colortable })
        } else {
            Err(GyralError::UnsupportedFsAnnotFormatVersion)
        }
    }

    /// Get the region names contained in the [`FsAnnot`] struct.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// let annot = gyral_zones::read_annot("/path/to/subjects_dir/subject1/label/lh.aparc.annot").unwrap();
    /// annot.regions();
    /// ```
    pub fn regions(&self) -> Vec<String> {
        self.colortable.name.clone()
    }


    /// Get the number of regions contained in the [`FsAnnot`] struct, or its [`FsAnnotColortable`].
    pub fn num_regions(&self) -> usize {
        self.colortable.name.len()
    }


    /// Get the number of vertices the parcellation covers.
    pub fn num_vertices(&self) -> usize {
        self.vertex_labels.len()
    }


    /// Returns the indices into the colortable fields for each vertex, or `None` for vertices whose
    /// label does not match any region label.
    pub fn vertex_colortable_indices(&self) -> Vec<Option<usize>> {
        self.vertex_labels.iter()
            .map(|vlabel| self.colortable.label.iter().position(|region_label| region_label == vlabel))
            .collect()
    }
}


impl fmt::Display for FsAnnot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Surface parcellation assigning {} vertices to {} brain regions.", self.num_vertices(), self.num_regions())
    }
}


/// Read a brain parcellation from a FreeSurfer annot file.
///
/// A parcellation assigns each vertex of a brain surface mesh to exactly one brain region.
/// The colortable contains data on the regions, including the region's
/// name, an RGB display color, and a unique identifier. A parcellation is the result of
/// applying a brain atlas to the brain surface reconstruction of a subject.
///
/// # Examples
///
/// ```no_run
/// let annot = gyral_zones::read_annot("/path/to/subjects_dir/subject1/label/lh.aparc.annot").unwrap();
/// println!("Annotation assigns the {} brain mesh vertices to {} different regions.", annot.vertex_indices.len(), annot.regions().len());
/// ```
pub fn read_annot<P: AsRef<Path>>(path: P) -> Result<FsAnnot> {
    FsAnnot::from_file(path)
}
