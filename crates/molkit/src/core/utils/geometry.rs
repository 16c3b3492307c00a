//! Elementary 3D geometry over atom positions.
//!
//! Distances, bond angles, and dihedral angles over point pairs, triples,
//! and quadruples. Angles are returned in radians; `_deg` variants convert.
//! Zero-length direction vectors have no defined angle and are reported as
//! [`GeometryError::Degenerate`] instead of propagating NaN.

use nalgebra::Point3;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Degenerate geometry: {what} has zero length")]
    Degenerate { what: &'static str },
}

/// Euclidean distance between two points.
pub fn distance(p: &Point3<f64>, q: &Point3<f64>) -> f64 {
    (q - p).norm()
}

/// Angle at the vertex `p2` formed by `p1-p2-p3`, in radians.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if `p1` or `p3` coincides with the
/// vertex, in which case the angle is undefined.
pub fn angle(p1: &Point3<f64>, p2: &Point3<f64>, p3: &Point3<f64>) -> Result<f64, GeometryError> {
    let u = p1 - p2;
    let v = p3 - p2;
    if u.norm() == 0.0 {
        return Err(GeometryError::Degenerate { what: "p1-p2 arm" });
    }
    if v.norm() == 0.0 {
        return Err(GeometryError::Degenerate { what: "p3-p2 arm" });
    }
    // Clamp against rounding so arccos never sees |x| > 1.
    let cosine = (u.dot(&v) / (u.norm() * v.norm())).clamp(-1.0, 1.0);
    Ok(cosine.acos())
}

/// Signed dihedral (torsion) angle of the chain `p1-p2-p3-p4`, in radians.
///
/// The magnitude is the angle between the `p1-p2-p3` and `p2-p3-p4` planes;
/// the sign is taken from the dot product of the first bond vector with the
/// normal of the second plane.
///
/// # Errors
///
/// Returns [`GeometryError::Degenerate`] if either plane is degenerate,
/// i.e. three consecutive points are collinear or coincident.
pub fn dihedral(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    p4: &Point3<f64>,
) -> Result<f64, GeometryError> {
    let b1 = p2 - p1;
    let b2 = p3 - p2;
    let b3 = p4 - p3;

    let n1 = b1.cross(&b2);
    let n2 = b2.cross(&b3);
    if n1.norm() == 0.0 {
        return Err(GeometryError::Degenerate {
            what: "p1-p2-p3 plane normal",
        });
    }
    if n2.norm() == 0.0 {
        return Err(GeometryError::Degenerate {
            what: "p2-p3-p4 plane normal",
        });
    }

    let cosine = (n1.dot(&n2) / (n1.norm() * n2.norm())).clamp(-1.0, 1.0);
    let magnitude = cosine.acos();
    if b1.dot(&n2) < 0.0 {
        Ok(-magnitude)
    } else {
        Ok(magnitude)
    }
}

/// [`angle`] in degrees.
pub fn angle_deg(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> Result<f64, GeometryError> {
    angle(p1, p2, p3).map(f64::to_degrees)
}

/// [`dihedral`] in degrees.
pub fn dihedral_deg(
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
    p4: &Point3<f64>,
) -> Result<f64, GeometryError> {
    dihedral(p1, p2, p3, p4).map(f64::to_degrees)
}
