//! Vector helpers shared by the segment builder and the join resolver.

use crate::math::{vector, Vector};

/// Returns the vector rotated a quarter turn clockwise in a y-up coordinate
/// system: `(v.y, -v.x)`.
///
/// This is the one handedness convention used by the whole workspace.
#[inline]
pub fn perpendicular(v: Vector) -> Vector {
    vector(v.y, -v.x)
}

/// The z component of the 3D cross product of two 2D vectors.
#[inline]
pub fn cross(a: Vector, b: Vector) -> f32 {
    a.x * b.y - a.y * b.x
}

/// Returns `1.0` if `b` turns counter-clockwise relative to `a` (in a y-up
/// coordinate system) or if the two vectors are colinear, `-1.0` otherwise.
#[inline]
pub fn turn_sign(a: Vector, b: Vector) -> f32 {
    if cross(a, b) >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Returns a vector of length one pointing in the same direction, or `None`
/// if the vector is too small or not finite to be normalized.
#[inline]
pub fn normalize_or_none(v: Vector) -> Option<Vector> {
    let length = v.length();
    if length > 0.0 && length.is_finite() {
        Some(v / length)
    } else {
        None
    }
}

/// Unsigned angle between two vectors in radians, in `[0, PI]`.
///
/// The cosine is clamped before calling `acos`, so rounding errors on nearly
/// parallel vectors never produce NaN. Zero-length vectors yield an angle of
/// `PI / 2`.
pub fn angle_between(a: Vector, b: Vector) -> f32 {
    let (a, b) = match (normalize_or_none(a), normalize_or_none(b)) {
        (Some(a), Some(b)) => (a, b),
        _ => {
            return core::f32::consts::FRAC_PI_2;
        }
    };

    a.dot(b).max(-1.0).min(1.0).acos()
}

#[test]
fn perpendicular_handedness() {
    assert_eq!(perpendicular(vector(1.0, 0.0)), vector(0.0, -1.0));
    assert_eq!(perpendicular(vector(0.0, 1.0)), vector(1.0, 0.0));
    // Two quarter turns point backwards.
    assert_eq!(
        perpendicular(perpendicular(vector(3.0, 2.0))),
        vector(-3.0, -2.0)
    );
}

#[test]
fn turn_direction() {
    let right = vector(1.0, 0.0);
    assert_eq!(turn_sign(right, vector(0.0, 1.0)), 1.0);
    assert_eq!(turn_sign(right, vector(0.0, -1.0)), -1.0);
    // Colinear counts as positive.
    assert_eq!(turn_sign(right, vector(2.0, 0.0)), 1.0);
    assert_eq!(turn_sign(right, vector(-2.0, 0.0)), 1.0);
}

#[test]
fn angles() {
    use core::f32::consts::{FRAC_PI_2, PI};
    let epsilon = 0.00001;

    assert!((angle_between(vector(1.0, 0.0), vector(0.0, 5.0)) - FRAC_PI_2).abs() < epsilon);
    assert!((angle_between(vector(1.0, 0.0), vector(-1.0, 0.0)) - PI).abs() < epsilon);
    assert_eq!(angle_between(vector(1.0, 0.0), vector(2.0, 0.0)), 0.0);
    assert_eq!(angle_between(vector(0.0, 0.0), vector(2.0, 2.0)), FRAC_PI_2);
}

#[test]
fn normalize_degenerate() {
    assert_eq!(normalize_or_none(vector(0.0, 0.0)), None);
    assert_eq!(normalize_or_none(vector(f32::NAN, 1.0)), None);
    assert_eq!(normalize_or_none(vector(0.0, 4.0)), Some(vector(0.0, 1.0)));
}
