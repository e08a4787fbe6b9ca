use crate::geom::utils::{normalize_or_none, perpendicular};
use crate::math::{vector, Point};
use crate::{Color, Quad, SegmentRole};

/// Builds the quad of a single segment, extruded by half of `line_width` on
/// each side.
///
/// With `offset = perpendicular(direction) * line_width / 2` the corners are
/// `from - offset`, `from + offset`, `to + offset` and `to - offset`.
///
/// Zero-length segments have no direction and collapse into a zero-area quad.
/// The tessellators skip them before getting here.
pub fn build_segment(
    from: Point,
    to: Point,
    role: SegmentRole,
    line_width: f32,
    color: Color,
) -> Quad {
    let offset = match normalize_or_none(to - from) {
        Some(direction) => perpendicular(direction) * (line_width * 0.5),
        None => vector(0.0, 0.0),
    };

    Quad::new(
        [from - offset, from + offset, to + offset, to - offset],
        role,
        color,
    )
}

/// Builds a flat cap extending the segment `from -> to` by half of the line
/// width.
///
/// The start cap goes backwards from `from`, the end cap forwards from `to`.
/// There is no cap in the middle of a stroke, so `SegmentRole::Middle` and
/// zero-length segments return `None`.
pub fn build_cap(
    from: Point,
    to: Point,
    role: SegmentRole,
    line_width: f32,
    color: Color,
) -> Option<Quad> {
    let extension = normalize_or_none(to - from)? * (line_width * 0.5);

    match role {
        SegmentRole::Start => Some(build_segment(
            from - extension,
            from,
            SegmentRole::Start,
            line_width,
            color,
        )),
        SegmentRole::End => Some(build_segment(
            to,
            to + extension,
            SegmentRole::End,
            line_width,
            color,
        )),
        SegmentRole::Middle => None,
    }
}

#[cfg(test)]
use crate::math::point;

#[test]
fn horizontal_segment() {
    let quad = build_segment(
        point(0.0, 0.0),
        point(10.0, 0.0),
        SegmentRole::Middle,
        2.0,
        Color::WHITE,
    );

    assert_eq!(
        quad.positions,
        [
            point(0.0, 1.0),
            point(0.0, -1.0),
            point(10.0, -1.0),
            point(10.0, 1.0),
        ]
    );
    assert_eq!(quad.uvs, SegmentRole::Middle.uvs());
}

#[test]
fn segment_winding_is_consistent() {
    use crate::geom::utils::cross;

    let directions = [
        vector(1.0, 0.0),
        vector(0.0, 1.0),
        vector(-3.0, 2.0),
        vector(-1.0, -5.0),
        vector(4.0, -0.5),
    ];

    for d in &directions {
        let from = point(1.0, 1.0);
        let quad = build_segment(from, from + *d, SegmentRole::Middle, 1.0, Color::WHITE);
        let p = quad.positions;
        let first = cross(p[1] - p[0], p[2] - p[1]);
        let second = cross(p[3] - p[2], p[0] - p[3]);
        // Both triangles have the same, non-degenerate orientation.
        assert!(first > 0.0, "{:?}", d);
        assert!(second > 0.0, "{:?}", d);
    }
}

#[test]
fn roles_select_uvs() {
    let quad = build_segment(
        point(0.0, 0.0),
        point(0.0, 5.0),
        SegmentRole::Start,
        1.0,
        Color::BLACK,
    );
    assert_eq!(quad.uvs, SegmentRole::Start.uvs());
    assert_eq!(quad.color, Color::BLACK);
}

#[test]
fn degenerate_segment_has_no_area() {
    let p = point(3.0, 3.0);
    let quad = build_segment(p, p, SegmentRole::Middle, 4.0, Color::WHITE);
    for p in &quad.positions {
        assert_eq!(*p, point(3.0, 3.0));
    }
}

#[test]
fn caps() {
    let from = point(0.0, 0.0);
    let to = point(10.0, 0.0);

    let start = build_cap(from, to, SegmentRole::Start, 4.0, Color::WHITE).unwrap();
    assert_eq!(
        start.positions,
        [
            point(-2.0, 2.0),
            point(-2.0, -2.0),
            point(0.0, -2.0),
            point(0.0, 2.0),
        ]
    );
    assert_eq!(start.uvs, SegmentRole::Start.uvs());

    let end = build_cap(from, to, SegmentRole::End, 4.0, Color::WHITE).unwrap();
    assert_eq!(
        end.positions,
        [
            point(10.0, 2.0),
            point(10.0, -2.0),
            point(12.0, -2.0),
            point(12.0, 2.0),
        ]
    );
    assert_eq!(end.uvs, SegmentRole::End.uvs());

    assert!(build_cap(from, to, SegmentRole::Middle, 4.0, Color::WHITE).is_none());
    assert!(build_cap(from, from, SegmentRole::Start, 4.0, Color::WHITE).is_none());
}
