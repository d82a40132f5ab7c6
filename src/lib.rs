//! This crate fixes the WCS of the images of the NIRES slit viewing camera (SVC)
//!
//! The SVC writes a CD matrix that ignores the position angle of the
//! telescope and a CRPIX that ignores the selected pointing origin.
//! The CD matrix is rotated by `180 - ROTDEST` degrees and the CRPIX is
//! taken from a table of measured pointing origins.
//!
//! # Examples
//!
//! Basic usage:
//!
//! ```
//! use nires_wcs::{card::Value, correct_default, wcs::CdMatrix, Header};
//!
//! let mut header = Header::default();
//! header.set("ROTDEST", Value::Float(180.0)).unwrap();
//! CdMatrix([[-1e-4, 0.0], [0.0, 1e-4]]).write_to(&mut header).unwrap();
//! header.set("PONAME", Value::String("NIRES".to_owned())).unwrap();
//!
//! let fixed = correct_default(&header).unwrap();
//! assert_eq!(fixed.get_f64("CRPIX1").unwrap(), 84.28);
//! assert_eq!(fixed.get_f64("CRPIX2").unwrap(), 450.16);
//! // A position angle of 180 deg leaves the CD matrix unchanged
//! let cd = CdMatrix::from_header(&fixed).unwrap();
//! assert_eq!(cd, CdMatrix([[-1e-4, 0.0], [0.0, 1e-4]]));
//! ```
//!
//! Whole files are corrected with [batch::fix_file]:
//!
//! ```no_run
//! use nires_wcs::{batch::{fix_file, FixOptions}, PointingOrigins};
//!
//! // writes v0042.fixedWCS.fits
//! let origins = PointingOrigins::default();
//! let output = fix_file("v0042.fits.gz", &origins, &FixOptions::default()).unwrap();
//! ```

#[macro_use]
extern crate quick_error;

pub mod batch;
pub mod card;
pub mod correct;
pub mod discover;
pub mod error;
pub mod file;
pub mod fits;
pub mod gz;
pub mod header;
pub mod origin;
pub mod output;
pub mod wcs;

pub use correct::{correct, correct_default, Correction};
pub use error::Error;
pub use file::FITSFile;
pub use fits::Fits;
pub use header::Header;
pub use origin::{PointingOrigin, PointingOrigins};
