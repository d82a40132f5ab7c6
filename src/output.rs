use std::path::{Path, PathBuf};

/// Suffix added to the name of the corrected files
pub const DEFAULT_SUFFIX: &str = "fixedWCS";

/// Name of the corrected copy of `input`
///
/// The file name is cut at its first `.fits` (so that `.fits.gz` is dropped
/// too) and `.<suffix>.fits` is appended. The parent directory is kept.
pub fn output_path<P: AsRef<Path>>(input: P, suffix: &str) -> PathBuf {
    let input = input.as_ref();
    let name = input
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let stem = match name.find(".fits") {
        Some(idx) => &name[..idx],
        None => &name[..],
    };

    input.with_file_name(format!("{stem}.{suffix}.fits"))
}

/// Whether `path` looks like a file produced with `suffix`
pub fn is_output_path<P: AsRef<Path>>(path: P, suffix: &str) -> bool {
    path.as_ref()
        .file_name()
        .map(|name| name.to_string_lossy().ends_with(&format!(".{suffix}.fits")))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::{is_output_path, output_path, DEFAULT_SUFFIX};
    use std::path::PathBuf;
    use test_case::test_case;

    #[test_case(
        "dir/v42.fits", DEFAULT_SUFFIX => PathBuf::from("dir/v42.fixedWCS.fits")
        ; "default suffix"
    )]
    #[test_case("v123.fits.gz", DEFAULT_SUFFIX => PathBuf::from("v123.fixedWCS.fits") ; "gzipped")]
    #[test_case("/data/v1.fits", "rot" => PathBuf::from("/data/v1.rot.fits") ; "custom suffix")]
    #[test_case(
        "run.fits.d/v7.fits", DEFAULT_SUFFIX => PathBuf::from("run.fits.d/v7.fixedWCS.fits")
        ; "directory is kept"
    )]
    #[test_case(
        "v7.fit", DEFAULT_SUFFIX => PathBuf::from("v7.fit.fixedWCS.fits")
        ; "no fits extension"
    )]
    fn test_output_path(input: &str, suffix: &str) -> PathBuf {
        output_path(input, suffix)
    }

    #[test]
    fn test_is_output_path() {
        assert!(is_output_path("dir/v42.fixedWCS.fits", DEFAULT_SUFFIX));
        assert!(!is_output_path("dir/v42.fits", DEFAULT_SUFFIX));
        assert!(!is_output_path("dir/v42.fixedWCS.fits", "other"));
    }
}
