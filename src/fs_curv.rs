// Functions for managing FreeSurfer per-vertex data in binary 'curv' files.
// These files store 1 scalar value (typically a morphological descriptor, like cortical thickness at that point)
// for each vertex of the respective brain surface mesh.

use byteordered::{ByteOrdered};
use flate2::bufread::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path};

use crate::util::{is_gz_file, MAX_PREALLOCATED_VALUES};
use crate::error::{GyralError, Result};

pub const CURV_MAGIC: [u8; 3] = [255; 3];


#[derive(Debug, Clone, PartialEq)]
pub struct CurvHeader {
    pub curv_magic: [u8; 3],
    pub num_vertices: i32,
    pub num_faces: i32,
    pub num_values_per_vertex: i32,
}


impl Default for CurvHeader {
    fn default() -> CurvHeader {
        CurvHeader {
            curv_magic: CURV_MAGIC,
            num_vertices: 0,
            num_faces: 0,
            num_values_per_vertex: 1,
        }
    }
}

impl CurvHeader {

    /// Read a Curv header from the given byte stream.
    /// It is assumed that the input is currently at the start of the
    /// Curv header.
    pub fn from_reader<S>(input: &mut S) -> Result<CurvHeader>
    where
        S: Read,
    {
        let mut hdr = CurvHeader::default();

        let mut input = ByteOrdered::be(input);

        for v in &mut hdr.curv_magic {
            *v = input.read_u8()?;
        }

        if hdr.curv_magic != CURV_MAGIC {
            return Err(GyralError::InvalidCurvFormat);
        }

        hdr.num_vertices = input.read_i32()?;
        hdr.num_faces = input.read_i32()?;
        hdr.num_values_per_vertex = input.read_i32()?;

        if hdr.num_vertices < 0 || hdr.num_values_per_vertex != 1 {
            return Err(GyralError::InvalidCurvFormat);
        }

        Ok(hdr)
    }


    /// Write this header to the given byte stream, in big endian byte order.
    pub fn to_writer<W>(&self, output: &mut W) -> Result<()>
    where
        W: Write,
    {
        let mut output = ByteOrdered::be(output);
        for v in &self.curv_magic {
            output.write_u8(*v)?;
        }
        output.write_i32(self.num_vertices)?;
        output.write_i32(self.num_faces)?;
        output.write_i32(self.num_values_per_vertex)?;
        Ok(())
    }
}


/// Models a FreeSurfer curv file: a header plus one f32 value per mesh vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct FsCurv {
    pub header: CurvHeader,
    pub data: Vec<f32>,
}


impl FsCurv {

    /// Wrap per-vertex values into a curv struct with a matching header. The face count is set to 0.
    pub fn from_data(data: Vec<f32>) -> FsCurv {
        let header = CurvHeader {
            num_vertices: data.len() as i32,
            ..CurvHeader::default()
        };
        FsCurv { header, data }
    }

    /// Read an FsCurv instance from a file. Files ending in ".gz" are decompressed on the fly.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<FsCurv> {
        let gz = is_gz_file(&path);
        let file = BufReader::new(File::open(path)?);
        if gz {
            FsCurv::from_reader(&mut GzDecoder::new(file))
        } else {
            let mut file = file;
            FsCurv::from_reader(&mut file)
        }
    }

    /// Read header and per-vertex data from the given byte stream.
    pub fn from_reader<S>(input: &mut S) -> Result<FsCurv>
    where
        S: Read,
    {
        let hdr = CurvHeader::from_reader(input)?;

        let mut input = ByteOrdered::be(input);
        let mut data : Vec<f32> = Vec::with_capacity((hdr.num_vertices as usize).min(MAX_PREALLOCATED_VALUES));
        for _ in 0..hdr.num_vertices {
            data.push(input.read_f32()?);
        }

        Ok(FsCurv { header: hdr, data })
    }

    /// Write header and data to the given byte stream.
    pub fn to_writer<W>(&self, output: &mut W) -> Result<()>
    where
        W: Write,
    {
        self.header.to_writer(output)?;
        let mut output = ByteOrdered::be(output);
        for v in self.data.iter() {
            output.write_f32(*v)?;
        }
        Ok(())
    }

    /// Write this curv to a file. If the file's name ends with ".gz", the output is GZip compressed.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let gz = is_gz_file(&path);
        let mut file = BufWriter::new(File::create(path)?);
        if gz {
            let mut encoder = GzEncoder::new(file, Compression::default());
            self.to_writer(&mut encoder)?;
            encoder.finish()?.flush()?;
        } else {
            self.to_writer(&mut file)?;
            file.flush()?;
        }
        Ok(())
    }
}


/// Read per-vertex data from a FreeSurfer curv file, e.g., `lh.curv` or `lh.thickness`.
///
/// # Examples
///
/// ```no_run
/// let curv = gyral_zones::read_curv("/path/to/subjects_dir/subject1/surf/lh.curv").unwrap();
/// println!("Read {} curvature values.", curv.data.len());
/// ```
pub fn read_curv<P: AsRef<Path>>(path: P) -> Result<FsCurv> {
    FsCurv::from_file(path)
}


/// Write per-vertex data to a new FreeSurfer curv file.
///
/// The number of faces in the header is set to 0, as the values are not tied to a specific mesh file.
pub fn write_curv<P: AsRef<Path>>(path: P, data: &[f32]) -> Result<()> {
    FsCurv::from_data(data.to_vec()).to_file(path)
}


#[cfg(test)]
mod test {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn a_written_curv_file_can_be_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lh.test");
        let data = vec![-0.5f32, 0.0, 0.25, 1.5];
        write_curv(&path, &data).unwrap();

        let curv = read_curv(&path).unwrap();
        assert_eq!(4, curv.header.num_vertices);
        assert_eq!(0, curv.header.num_faces);
        assert_eq!(1, curv.header.num_values_per_vertex);
        assert_eq!(data, curv.data);
    }

    #[test]
    fn gz_compressed_curv_files_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lh.test.gz");
        let data = vec![3.0f32, 2.0, 1.0];
        write_curv(&path, &data).unwrap();

        let curv = read_curv(&path).unwrap();
        assert_eq!(3, curv.header.num_vertices);
        assert_eq!(data, curv.data);
    }

    #[test]
    fn the_header_layout_is_big_endian() {
        let mut buf: Vec<u8> = Vec::new();
        FsCurv::from_data(vec![1.0]).to_writer(&mut buf).unwrap();

        assert_eq!(3 + 4 * 3 + 4, buf.len());
        assert_eq!(&[255u8, 255, 255], &buf[0..3]);
        assert_eq!(&[0u8, 0, 0, 1], &buf[3..7]);
        assert_eq!(&1.0f32.to_be_bytes(), &buf[15..19]);
    }

    #[test]
    fn a_wrong_magic_number_is_rejected() {
        let bytes: Vec<u8> = vec![0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        let result = FsCurv::from_reader(&mut &bytes[..]);
        assert!(matches!(result, Err(GyralError::InvalidCurvFormat)));
    }

    #[test]
    fn truncated_data_is_an_io_error() {
        let mut buf: Vec<u8> = Vec::new();
        FsCurv::from_data(vec![1.0, 2.0]).to_writer(&mut buf).unwrap();
        buf.truncate(buf.len() - 2);
        assert!(matches!(FsCurv::from_reader(&mut &buf[..]), Err(GyralError::Io(_))));
    }

    #[test]
    fn a_huge_vertex_count_in_a_short_file_is_an_io_error() {
        let mut buf: Vec<u8> = vec![255, 255, 255];
        buf.extend_from_slice(&i32::MAX.to_be_bytes());
        buf.extend_from_slice(&0i32.to_be_bytes());
        buf.extend_from_slice(&1i32.to_be_bytes());
        buf.extend_from_slice(&0.5f32.to_be_bytes());

        assert!(matches!(FsCurv::from_reader(&mut &buf[..]), Err(GyralError::Io(_))));
    }
}
