use crate::geom::utils::{angle_between, normalize_or_none, turn_sign};
use crate::{LineJoin, Quad, SegmentRole};

use core::f32::consts::PI;
use log::trace;

/// Below this angle between two segments a miter join is not attempted.
pub const MIN_MITER_JOIN: f32 = 15.0 * PI / 180.0;

/// Above this angle a bevel join also moves its inner corner to the miter
/// point, which removes the notch on gentle turns.
pub const MIN_BEVEL_NICE_JOIN: f32 = 30.0 * PI / 180.0;

/// Welds the corner shared by two consecutive segment quads.
///
/// `prev` must end where `next` starts. The trailing corners of `prev`
/// (`2` and `3`) and the leading corners of `next` (`0` and `1`) are
/// adjusted in place:
///
/// - With `LineJoin::Miter`, if the join is stable, the four corners are
///   moved to the two miter points and `None` is returned.
/// - Otherwise the inner corner may be snapped to its miter point and a bevel
///   quad spanning the four corners is returned. It must be drawn between
///   the two segments.
///
/// The join is stable when the angle between the segments is large enough
/// and the miter distance is smaller than half of both adjacent segments.
/// Unstable miters fall back to bevels, this function always produces valid
/// geometry.
///
/// The bevel quad does not share the winding of the segment quads, and one of
/// its triangles is usually degenerate.
pub fn resolve_join(
    prev: &mut Quad,
    next: &mut Quad,
    line_join: LineJoin,
    line_width: f32,
) -> Option<Quad> {
    // Trailing edge of prev (pointing backwards) and leading edge of next,
    // both measured along the positive side.
    let vec1 = prev.positions[1] - prev.positions[2];
    let vec2 = next.positions[2] - next.positions[1];
    let max_distance = vec1.length().min(vec2.length()) * 0.5;

    let miter = normalize_or_none(vec1)
        .zip(normalize_or_none(vec2))
        .map(|(n1, n2)| {
            let angle = angle_between(n1, n2);
            let sign = turn_sign(n1, n2);
            let distance = (line_width / (2.0 * (angle * 0.5).tan())).max(0.0);

            // Positive side, then negative side.
            let a = prev.positions[2] + n1 * (distance * sign);
            let b = prev.positions[3] - n1 * (distance * sign);

            (angle, sign, distance, a, b)
        });

    let fits = |min_angle: f32| match miter {
        Some((angle, _, distance, _, _)) => {
            angle > min_angle && distance.is_finite() && distance < max_distance
        }
        None => false,
    };

    if line_join == LineJoin::Miter {
        if let (true, Some((_, _, _, a, b))) = (fits(MIN_MITER_JOIN), miter) {
            prev.positions[2] = a;
            prev.positions[3] = b;
            next.positions[0] = b;
            next.positions[1] = a;
            return None;
        }

        if let Some((angle, _, distance, _, _)) = miter {
            trace!(
                "miter join falls back to bevel (angle: {:.3}, miter distance: {:.3}, max: {:.3})",
                angle,
                distance,
                max_distance,
            );
        }
    }

    if let (true, Some((_, sign, _, a, b))) = (fits(MIN_BEVEL_NICE_JOIN), miter) {
        // Only the inner corner moves, the outer side stays open for the bevel.
        if sign > 0.0 {
            prev.positions[2] = a;
            next.positions[1] = a;
        } else {
            prev.positions[3] = b;
            next.positions[0] = b;
        }
    }

    // The bevel reuses the corners of both segments, texture coordinates
    // included.
    let bevel = Quad::new(
        [
            prev.positions[2],
            prev.positions[3],
            next.positions[0],
            next.positions[1],
        ],
        SegmentRole::Middle,
        prev.color,
    )
    .with_uvs([prev.uvs[2], prev.uvs[3], next.uvs[0], next.uvs[1]]);

    Some(bevel)
}
