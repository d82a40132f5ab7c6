//! Correction of whole files and lists of files
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};

use crate::correct::Correction;
use crate::discover;
use crate::error::Error;
use crate::file::FITSFile;
use crate::origin::PointingOrigins;
use crate::output::{self, DEFAULT_SUFFIX};

#[derive(Debug, Clone, PartialEq)]
pub struct FixOptions {
    /// Inserted in the output file names: `v1.fits` gives `v1.<suffix>.fits`
    pub suffix: String,
    /// Compute and log the corrections without writing anything
    pub dry_run: bool,
    /// Stop at the first file that cannot be corrected
    pub fail_fast: bool,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            suffix: DEFAULT_SUFFIX.to_owned(),
            dry_run: false,
            fail_fast: false,
        }
    }
}

/// Outcome of a batch of files
#[derive(Debug, Default, PartialEq)]
pub struct BatchReport {
    /// (input, output) of the corrected files
    pub fixed: Vec<(PathBuf, PathBuf)>,
    /// The files that could not be corrected and why
    pub failed: Vec<(PathBuf, Error)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn num_files(&self) -> usize {
        self.fixed.len() + self.failed.len()
    }
}

/// Correct the primary header of a file and write the result next to it
///
/// The output is always written, replacing any previous one, but never
/// replaces the input itself. Returns the path of the output.
pub fn fix_file<P: AsRef<Path>>(
    input: P,
    origins: &PointingOrigins,
    options: &FixOptions,
) -> Result<PathBuf, Error> {
    let input = input.as_ref();
    let output = output::output_path(input, &options.suffix);
    if output == input {
        return Err(Error::OutputIsInput(input.display().to_string()));
    }

    let mut file = FITSFile::open(input)?;
    let correction = Correction::compute(file.get_header(), origins)?;
    info!(
        "{}: ROTDEST = {}, CD rotated by {} deg",
        input.display(),
        correction.position_angle,
        correction.theta.to_degrees()
    );
    debug!("{}", serde_json::to_string(&correction)?);
    file.header = correction.apply(file.get_header())?;

    if options.dry_run {
        info!("Dry run. {} not written", output.display());
    } else {
        file.save(&output, true)?;
        info!("{} written", output.display());
    }

    Ok(output)
}

/// Correct a list of files, in order
///
/// Unless `options.fail_fast` is set, a file that cannot be corrected is
/// reported in the [BatchReport] and the next files are still processed.
pub fn fix_files<I, P>(
    inputs: I,
    origins: &PointingOrigins,
    options: &FixOptions,
) -> Result<BatchReport, Error>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let mut report = BatchReport::default();
    for input in inputs {
        let input = input.as_ref();
        match fix_file(input, origins, options) {
            Ok(output) => report.fixed.push((input.to_owned(), output)),
            Err(e) if options.fail_fast => return Err(e),
            Err(e) => {
                error!("{}: {e}", input.display());
                report.failed.push((input.to_owned(), e));
            }
        }
    }

    Ok(report)
}

/// Correct all the SVC images (`v*.fits*`) of a directory
///
/// Files already produced with the same suffix are skipped.
pub fn fix_dir<P: AsRef<Path>>(
    dir: P,
    origins: &PointingOrigins,
    options: &FixOptions,
) -> Result<BatchReport, Error> {
    let dir = dir.as_ref();
    let inputs = discover::discover_dir(dir)?
        .into_iter()
        .filter(|path| !output::is_output_path(path, &options.suffix))
        .collect::<Vec<_>>();
    if inputs.is_empty() {
        warn!("No SVC image found in {}", dir.display());
    }

    fix_files(inputs, origins, options)
}
