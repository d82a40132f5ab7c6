use std::ops::Mul;

use serde::Serialize;

use crate::card::Value;
use crate::error::Error;
use crate::header::Header;

/// Keywords of the CD matrix, laid out row-major
pub const CD_KEYWORDS: [[&str; 2]; 2] = [["CD1_1", "CD1_2"], ["CD2_1", "CD2_2"]];

/// Linear part of a WCS mapping pixel offsets to intermediate world coordinates
///
/// Stored row-major: `self.0[i][j]` is the `CD{i+1}_{j+1}` keyword.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CdMatrix(pub [[f64; 2]; 2]);

impl CdMatrix {
    pub const IDENTITY: CdMatrix = CdMatrix([[1.0, 0.0], [0.0, 1.0]]);

    /// Counter-clockwise rotation matrix `[[cos, -sin], [sin, cos]]`
    ///
    /// # Params
    /// * `theta` - angle in radians
    pub fn rotation(theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        CdMatrix([[cos, -sin], [sin, cos]])
    }

    /// Read the four CDi_j cards of a header
    pub fn from_header(header: &Header) -> Result<Self, Error> {
        let mut cd = [[0.0; 2]; 2];
        for (i, row) in CD_KEYWORDS.iter().enumerate() {
            for (j, kw) in row.iter().enumerate() {
                cd[i][j] = header.get_f64(kw)?;
            }
        }
        Ok(CdMatrix(cd))
    }

    /// Write the matrix into the four CDi_j cards of a header
    pub fn write_to(&self, header: &mut Header) -> Result<(), Error> {
        for (i, row) in CD_KEYWORDS.iter().enumerate() {
            for (j, kw) in row.iter().enumerate() {
                header.set(kw, Value::Float(self.0[i][j]))?;
            }
        }
        Ok(())
    }

    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        self.0
            .iter()
            .flatten()
            .zip(other.0.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Mul for CdMatrix {
    type Output = CdMatrix;

    fn mul(self, rhs: CdMatrix) -> CdMatrix {
        let [[a, b], [c, d]] = self.0;
        let [[e, f], [g, h]] = rhs.0;
        CdMatrix([
            [a * e + b * g, a * f + b * h],
            [c * e + d * g, c * f + d * h],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::CdMatrix;
    use crate::card::Value;
    use crate::error::Error;
    use crate::header::Header;

    #[test]
    fn test_rotation() {
        let r = CdMatrix::rotation(90_f64.to_radians());
        assert!(r.approx_eq(&CdMatrix([[0.0, -1.0], [1.0, 0.0]]), 1e-15));
        assert_eq!(CdMatrix::rotation(0.0), CdMatrix([[1.0, -0.0], [0.0, 1.0]]));
        // a rotation keeps the pixel scale
        let m = CdMatrix([[-1e-4, 2e-5], [3e-5, 1e-4]]);
        let [[a, b], [c, d]] = (r * m).0;
        let [[e, f], [g, h]] = m.0;
        assert!(((a * d - b * c) - (e * h - f * g)).abs() < 1e-20);
    }

    #[test]
    fn test_product_is_not_commutative() {
        let a = CdMatrix([[1.0, 2.0], [3.0, 4.0]]);
        let b = CdMatrix([[0.0, 1.0], [1.0, 0.0]]);
        assert_eq!(a * b, CdMatrix([[2.0, 1.0], [4.0, 3.0]]));
        assert_eq!(b * a, CdMatrix([[3.0, 4.0], [1.0, 2.0]]));
        assert_eq!(CdMatrix::IDENTITY * a, a);
    }

    #[test]
    fn test_header_round_trip() {
        let mut header = Header::default();
        header.set("CD1_1", Value::Integer(1)).unwrap();
        header.set("CD1_2", Value::Float(2.5)).unwrap();
        header.set("CD2_1", Value::Float(-3.0)).unwrap();
        assert_eq!(
            CdMatrix::from_header(&header),
            Err(Error::MissingKeyword("CD2_2".to_owned()))
        );

        header.set("CD2_2", Value::Float(4.0)).unwrap();
        let cd = CdMatrix::from_header(&header).unwrap();
        assert_eq!(cd, CdMatrix([[1.0, 2.5], [-3.0, 4.0]]));

        let mut other = Header::default();
        cd.write_to(&mut other).unwrap();
        assert_eq!(
            other.keywords().collect::<Vec<_>>(),
            vec!["CD1_1", "CD1_2", "CD2_1", "CD2_2"]
        );
        assert_eq!(CdMatrix::from_header(&other), Ok(cd));
    }
}
