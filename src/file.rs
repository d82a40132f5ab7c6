use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::ops::{Deref, DerefMut};
use std::path::Path;

use crate::error::Error;
use crate::fits::Fits;
use crate::gz::GzReader;

#[derive(Debug)]
pub struct FITSFile(Fits);

impl FITSFile {
    /// Open a fits file from a path. Can be gzip-compressed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let f = File::open(path)?;
        let bufreader = BufReader::new(f);
        // Decorate the reader with a gz decoder
        let reader = GzReader::new(bufreader)?;
        Ok(Self(Fits::from_reader(reader)?))
    }

    /// Write the file uncompressed to `path`
    ///
    /// # Params
    /// * `overwrite` - replace `path` if it already exists. Otherwise
    ///   an `AlreadyExists` I/O error is returned
    pub fn save<P: AsRef<Path>>(&self, path: P, overwrite: bool) -> Result<(), Error> {
        let f = if overwrite {
            File::create(path)?
        } else {
            OpenOptions::new().write(true).create_new(true).open(path)?
        };
        let mut writer = BufWriter::new(f);
        self.0.write(&mut writer)?;
        writer.flush()?;

        Ok(())
    }
}

impl Deref for FITSFile {
    type Target = Fits;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for FITSFile {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
