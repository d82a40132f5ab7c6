//! Table of the reference pixels associated to the NIRES pointing origins
//!
//! The CRPIX written by the SVC does not follow the selected pointing origin.
//! The values of the default table have been measured on SVC data.
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Reference pixel of the pointing origins whose name contains `pattern`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointingOrigin {
    pub pattern: String,
    /// (CRPIX1, CRPIX2)
    pub crpix: [f64; 2],
}

impl PointingOrigin {
    pub fn new<S: Into<String>>(pattern: S, crpix1: f64, crpix2: f64) -> Self {
        Self {
            pattern: pattern.into(),
            crpix: [crpix1, crpix2],
        }
    }

    pub fn matches(&self, poname: &str) -> bool {
        poname.contains(self.pattern.as_str())
    }
}

/// Ordered list of pointing origins. The first matching entry wins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointingOrigins(Vec<PointingOrigin>);

impl Default for PointingOrigins {
    fn default() -> Self {
        Self(vec![
            PointingOrigin::new("IMAG", 482.4, 454.5),
            PointingOrigin::new("NIRES", 84.28, 450.16),
        ])
    }
}

impl PointingOrigins {
    pub fn new(origins: Vec<PointingOrigin>) -> Self {
        Self(origins)
    }

    /// Find the first entry whose pattern is contained in `poname`
    pub fn lookup(&self, poname: &str) -> Option<&PointingOrigin> {
        self.0.iter().find(|origin| origin.matches(poname))
    }

    /// Read a table written in JSON, i.e.
    /// `[{"pattern": "IMAG", "crpix": [482.4, 454.5]}]`
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let origins = serde_json::from_reader(reader)?;
        Ok(origins)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let f = File::open(path)?;
        Self::from_reader(BufReader::new(f))
    }
}
