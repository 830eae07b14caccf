//! Utility functions used in all other gyral_zones modules.

use std::path::{Path, PathBuf};
use std::io::Read;

use crate::error::{Result};

use byteordered::byteorder::ReadBytesExt;

/// Upper bound for buffers sized from a count in a file header. Larger inputs grow while they are read,
/// so a corrupt count ends in an EOF error instead of a huge allocation.
pub const MAX_PREALLOCATED_VALUES: usize = 1 << 20;

/// Check whether the file extension ends with ".gz".
pub fn is_gz_file<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    path.as_ref()
        .file_name()
        .map(|a| a.to_string_lossy().ends_with(".gz"))
        .unwrap_or(false)
}


/// Read a fixed length zero-terminated byte string of the given length from the input. Embedded '\0' chars are allowed, but not added to the returned String.
pub fn read_fixed_length_string<S>(input: &mut S, len: usize) -> Result<String>
where
    S: Read,
{
    let mut info_line = String::with_capacity(len.min(MAX_PREALLOCATED_VALUES));
    for _  in 0..len   {
        let cur_char = input.read_u8()? as char;
        if cur_char != '\0'  {
            info_line.push(cur_char);
        }
    }
    Ok(info_line)
}


/// Derive the output basename from a curvature file path.
///
/// The file name is cut at its first '.', and the directory part is kept as is. So `/subjects/s01/surf/lh.curv`
/// becomes `/subjects/s01/surf/lh`. Dots in directory names are left alone.
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// let base = gyral_zones::util::curv_basename("/subjects/s01/surf/lh.curv");
/// assert_eq!(base, PathBuf::from("/subjects/s01/surf/lh"));
/// ```
pub fn curv_basename<P: AsRef<Path>>(path: P) -> PathBuf {
    let path = path.as_ref();
    let file_name = path
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or("");
    match path.parent() {
        Some(parent) => parent.join(stem),
        None => PathBuf::from(stem),
    }
}


/// Remove the last extension from a path, e.g. `lh.swm.mgh` becomes `lh.swm`.
pub fn strip_last_extension<P: AsRef<Path>>(path: P) -> PathBuf {
    path.as_ref().with_extension("")
}


/// Append a literal suffix to a path, without treating the suffix as an extension.
pub fn with_suffix<P: AsRef<Path>>(path: P, suffix: &str) -> PathBuf {
    let mut p = path.as_ref().as_os_str().to_os_string();
    p.push(suffix);
    PathBuf::from(p)
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn gz_files_are_detected_by_name() {
        assert!(is_gz_file("lh.thickness.gz"));
        assert!(!is_gz_file("lh.thickness"));
        assert!(!is_gz_file("/some/dir.gz/lh.curv"));
    }

    #[test]
    fn curv_basename_cuts_file_name_at_first_dot() {
        assert_eq!(curv_basename("lh.curv"), PathBuf::from("lh"));
        assert_eq!(curv_basename("surf/lh.smoothwm.curv.gz"), PathBuf::from("surf/lh"));
        assert_eq!(curv_basename("/data/sub.01/surf/rh.curv"), PathBuf::from("/data/sub.01/surf/rh"));
    }

    #[test]
    fn last_extension_is_stripped() {
        assert_eq!(strip_last_extension("x/lh.swm.mgh"), PathBuf::from("x/lh.swm"));
        assert_eq!(strip_last_extension("x/lh.swm.mgz"), PathBuf::from("x/lh.swm"));
    }

    #[test]
    fn suffix_is_appended_literally() {
        assert_eq!(with_suffix("surf/lh", ".gyral_crown"), PathBuf::from("surf/lh.gyral_crown"));
        assert_eq!(with_suffix("x/lh.swm", "_curv_vs_metric.png"), PathBuf::from("x/lh.swm_curv_vs_metric.png"));
    }

    #[test]
    fn fixed_length_strings_skip_embedded_zeros() {
        let bytes: Vec<u8> = vec![b'a', b'b', 0, b'c', 0];
        let mut input = &bytes[..];
        let s = read_fixed_length_string(&mut input, 5).unwrap();
        assert_eq!(s, "abc");
    }
}
