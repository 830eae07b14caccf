use quick_error::quick_error;
use std::io::Error as IOError;

quick_error! {
    /// Error type for all error variants originated by this crate.
    #[derive(Debug)]
    pub enum GyralError {
        /// Invalid curv file: wrong magic number.
        InvalidCurvFormat {
            display("Invalid Curv file")
        }

        /// Only annot files with a version 2 colortable are supported.
        UnsupportedFsAnnotFormatVersion {
            display("Unsupported FreeSurfer annot file format version")
        }

        InvalidFsMghFormat {
            display("Invalid FreeSurfer MGH file")
        }

        UnsupportedMriDataTypeInMgh(dtype: i32) {
            display("Unsupported MRI data type {} in MGH file", dtype)
        }

        /// Two per-vertex inputs that must be index-aligned differ in length.
        LengthMismatch(what: &'static str, expected: usize, found: usize) {
            display("Vertex count mismatch: curvature has {} vertices, but {} has {}", expected, what, found)
        }

        /// A requested region name is not part of the annotation's colortable.
        UnknownRegion(name: String) {
            display("Region '{}' not found in annotation colortable", name)
        }

        EmptyCurvature {
            display("Curvature data contains no vertices")
        }

        NonFiniteCurvature(vertex: usize) {
            display("Curvature value at vertex {} is not a finite number", vertex)
        }

        Plot(msg: String) {
            display("Plotting failed: {}", msg)
        }

        Shape(err: ndarray::ShapeError) {
            from()
            source(err)
        }

        Csv(err: csv::Error) {
            from()
            source(err)
        }

        /// I/O Error
        Io(err: IOError) {
            from()
            source(err)
        }
    }
}

/// Alias type for results originated from this crate.
pub type Result<T> = ::std::result::Result<T, GyralError>;
