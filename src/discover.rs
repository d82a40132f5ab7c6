//! Selection of the files to correct
use std::path::{Path, PathBuf};

use glob::Pattern;
use log::{debug, warn};

use crate::error::Error;

/// Names of the SVC images in a directory
pub const SVC_FILE_PATTERN: &str = "v*.fits*";

/// List the SVC images (`v*.fits*`) of a directory
pub fn discover_dir<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, Error> {
    let dir = dir.as_ref().to_string_lossy();
    // The directory itself may contain glob special characters
    let pattern = Path::new(&Pattern::escape(&dir)).join(SVC_FILE_PATTERN);

    discover_glob(&pattern.to_string_lossy())
}

/// List the files matching a glob pattern
///
/// A path without any wildcard gives back that file if it exists.
/// Directories and unreadable entries are skipped.
pub fn discover_glob(pattern: &str) -> Result<Vec<PathBuf>, Error> {
    let mut files = Vec::new();
    for entry in glob::glob(pattern)? {
        match entry {
            Ok(path) if path.is_file() => files.push(path),
            Ok(path) => debug!("{} is not a file. Skipped", path.display()),
            Err(e) => warn!("{e}. Skipped"),
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::{discover_dir, discover_glob};
    use std::fs;
    use std::path::PathBuf;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("nires-wcs-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_discover_dir() {
        let dir = test_dir("discover[dir]");
        for name in ["v1.fits", "v2.fits.gz", "a3.fits", "v4.txt"] {
            fs::write(dir.join(name), b"").unwrap();
        }
        fs::create_dir(dir.join("v5.fits.d")).unwrap();

        let mut files = discover_dir(&dir).unwrap();
        files.sort();
        assert_eq!(files, vec![dir.join("v1.fits"), dir.join("v2.fits.gz")]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_discover_glob() {
        let dir = test_dir("glob");
        for name in ["v1.fits", "v2.fits"] {
            fs::write(dir.join(name), b"").unwrap();
        }

        let single = dir.join("v1.fits");
        assert_eq!(discover_glob(&single.to_string_lossy()).unwrap(), vec![single]);

        let missing = dir.join("v3.fits");
        assert!(discover_glob(&missing.to_string_lossy()).unwrap().is_empty());

        assert!(discover_glob("[").is_err());

        fs::remove_dir_all(&dir).unwrap();
    }
}
