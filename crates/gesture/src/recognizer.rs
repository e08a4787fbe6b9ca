use crate::math::{point, Point, Rect};

use futures::future::{self, BoxFuture, FutureExt};
use std::fmt;

/// One stroke of a gesture, in the capture surface's local coordinates.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct GestureLine {
    pub points: Vec<Point>,
    pub closed_line: bool,
}

impl GestureLine {
    pub fn new() -> Self {
        GestureLine::default()
    }

    pub fn last_point(&self) -> Option<Point> {
        self.points.last().cloned()
    }
}

/// The strokes of a gesture, oldest first.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct GestureData {
    pub lines: Vec<GestureLine>,
}

impl GestureData {
    pub fn new() -> Self {
        GestureData::default()
    }

    pub fn last_line(&self) -> Option<&GestureLine> {
        self.lines.last()
    }

    pub fn last_line_mut(&mut self) -> Option<&mut GestureLine> {
        self.lines.last_mut()
    }

    /// The `size` most recent lines.
    pub fn window(&self, size: usize) -> GestureData {
        let start = self.lines.len().saturating_sub(size);
        GestureData {
            lines: self.lines[start..].to_vec(),
        }
    }

    /// Maps every point into `[0, 1]` relative to `area`, clamping the points
    /// that fall outside of it.
    pub fn normalized_into(&self, area: &Rect) -> GestureData {
        let normalize = |value: f32, min: f32, extent: f32| {
            if extent > 0.0 {
                ((value - min) / extent).max(0.0).min(1.0)
            } else {
                0.0
            }
        };

        GestureData {
            lines: self
                .lines
                .iter()
                .map(|line| GestureLine {
                    points: line
                        .points
                        .iter()
                        .map(|p| {
                            point(
                                normalize(p.x, area.origin.x, area.size.width),
                                normalize(p.y, area.origin.y, area.size.height),
                            )
                        })
                        .collect(),
                    closed_line: line.closed_line,
                })
                .collect(),
        }
    }
}

/// Identifies a gesture template known to a recognizer.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct GestureId(pub String);

impl fmt::Display for GestureId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'l> From<&'l str> for GestureId {
    fn from(id: &'l str) -> Self {
        GestureId(id.to_string())
    }
}

/// The best match of a recognizer and its score in `[0, 1]`.
///
/// Displays as the gesture id and the score as a percentage on two lines, or
/// `?` when nothing was recognized.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct RecognitionResult {
    pub gesture: Option<GestureId>,
    pub score: f32,
}

impl RecognitionResult {
    pub fn new(gesture: impl Into<GestureId>, score: f32) -> Self {
        RecognitionResult {
            gesture: Some(gesture.into()),
            score,
        }
    }

    /// Nothing recognized.
    pub fn empty() -> Self {
        RecognitionResult {
            gesture: None,
            score: 0.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.gesture.is_none()
    }

    pub fn is_accepted(&self, score_to_accept: f32) -> bool {
        self.gesture.is_some() && self.score >= score_to_accept
    }
}

impl Default for RecognitionResult {
    fn default() -> Self {
        RecognitionResult::empty()
    }
}

impl fmt::Display for RecognitionResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Halves round to even, 0.125 shows as 12%.
        let percent = (self.score * 100.0).round_ties_even() as i32;
        match self.gesture {
            Some(ref id) => write!(f, "{}\n{}%", id, percent),
            None => f.write_str("?"),
        }
    }
}

/// Classifies gestures.
///
/// `normalize_scale` is `false` when the points were already normalized into
/// a fixed area, in which case the recognizer should compare them as is.
///
/// Recognition may be slow, it runs as a future that the capture awaits and
/// may abort.
pub trait Recognizer {
    fn recognize(
        &self,
        data: GestureData,
        normalize_scale: bool,
    ) -> BoxFuture<'static, RecognitionResult>;
}

/// Synchronous recognizers.
impl<F> Recognizer for F
where
    F: Fn(GestureData, bool) -> RecognitionResult,
{
    fn recognize(
        &self,
        data: GestureData,
        normalize_scale: bool,
    ) -> BoxFuture<'static, RecognitionResult> {
        future::ready(self(data, normalize_scale)).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::rect;
    use futures::executor::block_on;

    fn line(points: &[Point]) -> GestureLine {
        GestureLine {
            points: points.to_vec(),
            closed_line: false,
        }
    }

    #[test]
    fn display() {
        assert_eq!(RecognitionResult::new("circle", 0.874).to_string(), "circle\n87%");
        assert_eq!(RecognitionResult::new("square", 1.0).to_string(), "square\n100%");
        assert_eq!(RecognitionResult::new("arc", 0.125).to_string(), "arc\n12%");
        assert_eq!(RecognitionResult::new("arc", 0.375).to_string(), "arc\n38%");
        assert_eq!(RecognitionResult::empty().to_string(), "?");
    }

    #[test]
    fn acceptance() {
        assert!(RecognitionResult::new("a", 0.8).is_accepted(0.8));
        assert!(!RecognitionResult::new("a", 0.79).is_accepted(0.8));
        assert!(!RecognitionResult::empty().is_accepted(0.0));
    }

    #[test]
    fn window() {
        let data = GestureData {
            lines: vec![
                line(&[point(0.0, 0.0)]),
                line(&[point(1.0, 0.0)]),
                line(&[point(2.0, 0.0)]),
            ],
        };

        assert_eq!(data.window(2).lines, data.lines[1..].to_vec());
        assert_eq!(data.window(3), data);
        assert_eq!(data.window(5), data);
        assert!(data.window(0).lines.is_empty());
    }

    #[test]
    fn normalize() {
        let data = GestureData {
            lines: vec![line(&[point(10.0, 20.0), point(60.0, 45.0), point(200.0, -5.0)])],
        };

        let normalized = data.normalized_into(&rect(10.0, 20.0, 100.0, 50.0));
        assert_eq!(
            normalized.lines[0].points,
            vec![point(0.0, 0.0), point(0.5, 0.5), point(1.0, 0.0)]
        );

        let flat = data.normalized_into(&rect(0.0, 0.0, 0.0, 0.0));
        assert_eq!(flat.lines[0].points[1], point(0.0, 0.0));
    }

    #[test]
    fn closure_recognizer() {
        let recognizer = |data: GestureData, normalize_scale: bool| {
            assert!(normalize_scale);
            RecognitionResult::new("lines", data.lines.len() as f32 / 10.0)
        };

        let result = block_on(recognizer.recognize(GestureData::new(), true));
        assert_eq!(result, RecognitionResult::new("lines", 0.0));
    }
}
