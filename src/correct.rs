//! Correction of the WCS written by the NIRES slit viewing camera
//!
//! The CD matrix provided by the SVC does not take the position angle into
//! account. It is rotated by `180 - ROTDEST` degrees. The CRPIX does not
//! follow the pointing origin either, it is taken from a [PointingOrigins] table.
use log::{debug, info};
use serde::Serialize;

use crate::card::Value;
use crate::error::Error;
use crate::header::Header;
use crate::origin::{PointingOrigin, PointingOrigins};
use crate::wcs::CdMatrix;

/// Position angle of the image vertical axis
pub const PA_KEYWORD: &str = "ROTDEST";
/// Name of the selected pointing origin
pub const PONAME_KEYWORD: &str = "PONAME";
pub const CRPIX_KEYWORDS: [&str; 2] = ["CRPIX1", "CRPIX2"];

/// Instrument geometry offset between the detector and the position angle, in degrees
pub const PA_OFFSET_DEG: f64 = 180.0;

/// Everything needed to correct one header, computed before any card is touched
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correction {
    /// ROTDEST, in degrees
    pub position_angle: f64,
    /// Rotation applied to the CD matrix, in radians
    pub theta: f64,
    pub original_cd: CdMatrix,
    pub corrected_cd: CdMatrix,
    pub poname: String,
    /// The table entry matching PONAME, if any
    pub origin: Option<PointingOrigin>,
}

impl Correction {
    /// Read ROTDEST, the CD matrix and PONAME and derive the corrected values
    pub fn compute(header: &Header, origins: &PointingOrigins) -> Result<Self, Error> {
        let position_angle = header.get_f64(PA_KEYWORD)?;
        let original_cd = CdMatrix::from_header(header)?;
        let poname = header.get_str(PONAME_KEYWORD)?.to_owned();

        let theta = (PA_OFFSET_DEG - position_angle).to_radians();
        let corrected_cd = CdMatrix::rotation(theta) * original_cd;
        let origin = origins.lookup(&poname).cloned();

        Ok(Self {
            position_angle,
            theta,
            original_cd,
            corrected_cd,
            poname,
            origin,
        })
    }

    /// Give a copy of `header` with the corrected CD matrix and CRPIX
    pub fn apply(&self, header: &Header) -> Result<Header, Error> {
        let mut header = header.clone();
        self.corrected_cd.write_to(&mut header)?;

        info!("PONAME: {}", self.poname);
        match &self.origin {
            Some(origin) => {
                info!("{} PO", origin.pattern);
                for (kw, crpix) in CRPIX_KEYWORDS.iter().zip(origin.crpix) {
                    header.set(kw, Value::Float(crpix))?;
                }
            }
            None => debug!("No pointing origin matches {}. CRPIX left unchanged", self.poname),
        }

        Ok(header)
    }
}

/// Correct the WCS of a SVC primary header
///
/// The given header is left untouched. If a required keyword is missing
/// the error is returned before anything has been computed.
///
/// # Params
/// * `header` - the primary header of a SVC image
/// * `origins` - the CRPIX values of the known pointing origins
pub fn correct(header: &Header, origins: &PointingOrigins) -> Result<Header, Error> {
    Correction::compute(header, origins)?.apply(header)
}

/// [correct] with the measured pointing origins
pub fn correct_default(header: &Header) -> Result<Header, Error> {
    correct(header, &PointingOrigins::default())
}

#[cfg(test)]
mod tests {
    use super::{correct, correct_default, Correction};
    use crate::card::Value;
    use crate::error::Error;
    use crate::header::Header;
    use crate::origin::{PointingOrigin, PointingOrigins};
    use crate::wcs::CdMatrix;

    const M: CdMatrix = CdMatrix([
        [-4.1666666666667e-5, 1.2e-6],
        [0.8e-6, 4.1666666666667e-5],
    ]);

    fn svc_header(rotdest: f64, cd: CdMatrix, poname: &str) -> Header {
        let mut header = Header::default();
        header.set("SIMPLE", Value::Logical(true)).unwrap();
        header.set("CRPIX1", Value::Float(512.0)).unwrap();
        header.set("CRPIX2", Value::Float(512.0)).unwrap();
        header.set("ROTDEST", Value::Float(rotdest)).unwrap();
        cd.write_to(&mut header).unwrap();
        header.set("PONAME", Value::String(poname.to_owned())).unwrap();
        header
    }

    fn crpix(header: &Header) -> (f64, f64) {
        (
            header.get_f64("CRPIX1").unwrap(),
            header.get_f64("CRPIX2").unwrap(),
        )
    }

    #[test]
    fn test_pa_180_is_identity() {
        let fixed = correct_default(&svc_header(180.0, M, "OTHER")).unwrap();
        assert_eq!(CdMatrix::from_header(&fixed), Ok(M));
    }

    #[test]
    fn test_pa_90() {
        let fixed = correct_default(&svc_header(90.0, M, "OTHER")).unwrap();
        let r90 = CdMatrix([[0.0, -1.0], [1.0, 0.0]]);
        let cd = CdMatrix::from_header(&fixed).unwrap();
        assert!(cd.approx_eq(&(r90 * M), 1e-10));
    }

    #[test]
    fn test_not_idempotent() {
        let header = svc_header(90.0, M, "IMAG");
        let once = correct_default(&header).unwrap();
        let twice = correct_default(&once).unwrap();

        let cd_once = CdMatrix::from_header(&once).unwrap();
        let cd_twice = CdMatrix::from_header(&twice).unwrap();
        assert!(!cd_once.approx_eq(&cd_twice, 1e-10));
    }

    #[test]
    fn test_pointing_origins() {
        let fixed = correct_default(&svc_header(0.0, M, "IMAG_SOMETHING")).unwrap();
        assert_eq!(crpix(&fixed), (482.4, 454.5));

        let fixed = correct_default(&svc_header(0.0, M, "NIRES_FOO")).unwrap();
        assert_eq!(crpix(&fixed), (84.28, 450.16));

        let fixed = correct_default(&svc_header(0.0, M, "OTHER")).unwrap();
        assert_eq!(crpix(&fixed), (512.0, 512.0));
    }

    #[test]
    fn test_end_to_end() {
        let header = svc_header(0.0, CdMatrix::IDENTITY, "IMAG1");
        let correction = Correction::compute(&header, &PointingOrigins::default()).unwrap();
        assert!((correction.theta - std::f64::consts::PI).abs() < 1e-15);

        let fixed = correction.apply(&header).unwrap();
        let cd = CdMatrix::from_header(&fixed).unwrap();
        assert!(cd.approx_eq(&CdMatrix([[-1.0, 0.0], [0.0, -1.0]]), 1e-10));
        assert_eq!(crpix(&fixed), (482.4, 454.5));
        // the cards keep their place
        assert_eq!(
            fixed.keywords().collect::<Vec<_>>(),
            header.keywords().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_missing_crpix_is_added() {
        let mut header = Header::default();
        header.set("ROTDEST", Value::Integer(180)).unwrap();
        CdMatrix::IDENTITY.write_to(&mut header).unwrap();
        header.set("PONAME", Value::String("NIRES".to_owned())).unwrap();

        let fixed = correct_default(&header).unwrap();
        assert_eq!(crpix(&fixed), (84.28, 450.16));
    }

    #[test]
    fn test_custom_table() {
        let origins = PointingOrigins::new(vec![PointingOrigin::new("SLIT", 1.5, 2.5)]);
        let fixed = correct(&svc_header(0.0, M, "NIRES_SLIT"), &origins).unwrap();
        assert_eq!(crpix(&fixed), (1.5, 2.5));
    }

    #[test]
    fn test_missing_keyword() {
        let mut header = Header::default();
        CdMatrix::IDENTITY.write_to(&mut header).unwrap();
        header.set("PONAME", Value::String("IMAG".to_owned())).unwrap();
        let before = header.clone();

        assert_eq!(
            correct_default(&header),
            Err(Error::MissingKeyword("ROTDEST".to_owned()))
        );
        assert_eq!(header, before);
    }

    #[test]
    fn test_poname_must_be_a_string() {
        let mut header = svc_header(0.0, M, "IMAG");
        header.set("PONAME", Value::Float(1.0)).unwrap();
        assert_eq!(
            correct_default(&header),
            Err(Error::KeywordType("PONAME".to_owned(), "string"))
        );
    }
}
