use crate::math::{Point, Transform, Vector};
use crate::utils::normalize_or_none;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    #[inline]
    pub fn new(from: Point, to: Point) -> Self {
        LineSegment { from, to }
    }

    /// Returns the vector between this segment's `from` and `to` points.
    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.to - self.from
    }

    /// Computes the length of this segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.to_vector().length()
    }

    /// The unit vector pointing from `from` to `to`, or `None` for a
    /// zero-length segment.
    #[inline]
    pub fn direction(&self) -> Option<Vector> {
        normalize_or_none(self.to_vector())
    }

    /// Computes the mid-point of this segment.
    #[inline]
    pub fn mid_point(&self) -> Point {
        self.from.lerp(self.to, 0.5)
    }

    /// Applies the transform to this segment and returns the results.
    #[inline]
    pub fn transformed(&self, transform: &Transform) -> Self {
        LineSegment {
            from: transform.transform_point(self.from),
            to: transform.transform_point(self.to),
        }
    }
}

#[cfg(test)]
use crate::math::{point, vector};

#[test]
fn segment_basics() {
    let s = LineSegment::new(point(1.0, 1.0), point(4.0, 5.0));

    assert_eq!(s.to_vector(), vector(3.0, 4.0));
    assert_eq!(s.length(), 5.0);
    assert_eq!(s.direction(), Some(vector(0.6, 0.8)));
    assert_eq!(s.mid_point(), point(2.5, 3.0));
}

#[test]
fn degenerate_segment() {
    let s = LineSegment::new(point(2.0, 2.0), point(2.0, 2.0));
    assert_eq!(s.direction(), None);
    assert_eq!(s.length(), 0.0);
}

#[test]
fn transformed_segment() {
    let s = LineSegment::new(point(0.0, 0.0), point(1.0, 1.0));
    let t = Transform::scale(2.0, 3.0).then_translate(vector(1.0, 0.0));

    assert_eq!(
        s.transformed(&t),
        LineSegment::new(point(1.0, 0.0), point(3.0, 3.0))
    );
}
