use std::{error::Error, path::PathBuf};

use clap::Parser;
use log::{info, warn};

use nires_wcs::{
    PointingOrigins,
    batch::{self, BatchReport, FixOptions},
    discover,
    output::DEFAULT_SUFFIX,
};

/// Fix NIRES Slit Viewing Camera WCS.
///
/// The CD matrix is rotated by 180 - ROTDEST degrees and CRPIX is set
/// according to the pointing origin (PONAME). Each corrected image is written
/// next to its input as `<name>.<suffix>.fits`.
#[derive(Parser, Debug)]
#[command(name = "fix-nires-wcs", version, about, long_about = None)]
pub struct Fix {
    /// Glob pattern or path of the images. A directory selects its `v*.fits*` files.
    #[clap(value_name = "FILENAMES")]
    pub filenames: String,
    /// Suffix of the output file names.
    #[clap(long, default_value = DEFAULT_SUFFIX)]
    pub suffix: String,
    /// JSON table of the pointing origins, replacing the measured ones.
    /// E.g. `[{"pattern": "IMAG", "crpix": [482.4, 454.5]}]`
    #[clap(long, value_name = "FILE")]
    pub origins: Option<PathBuf>,
    /// Log the corrections without writing any file.
    #[clap(long)]
    pub dry_run: bool,
    /// Stop at the first file that cannot be corrected.
    #[clap(long)]
    pub fail_fast: bool,
}

impl Fix {
    pub fn exec(self) -> Result<(), Box<dyn Error>> {
        let origins = match &self.origins {
            Some(path) => PointingOrigins::from_path(path)?,
            None => PointingOrigins::default(),
        };
        let options = FixOptions {
            suffix: self.suffix,
            dry_run: self.dry_run,
            fail_fast: self.fail_fast,
        };

        let path = PathBuf::from(&self.filenames);
        let report = if path.is_dir() {
            batch::fix_dir(&path, &origins, &options)?
        } else {
            let files = discover::discover_glob(&self.filenames)?;
            if files.is_empty() {
                warn!("No file matches {}", self.filenames);
            }
            batch::fix_files(&files, &origins, &options)?
        };

        summarize(&report)
    }
}

fn summarize(report: &BatchReport) -> Result<(), Box<dyn Error>> {
    info!(
        "{} file(s) fixed out of {}",
        report.fixed.len(),
        report.num_files()
    );
    if report.is_success() {
        Ok(())
    } else {
        let failed = report
            .failed
            .iter()
            .map(|(path, e)| format!("{}: {e}", path.display()))
            .collect::<Vec<_>>()
            .join("\n");
        Err(format!("{} file(s) could not be fixed:\n{failed}", report.failed.len()).into())
    }
}
