use crate::drawer::LineDrawer;
use crate::math::{Point, Rect};
use crate::recognizer::{GestureData, GestureLine, RecognitionResult, Recognizer};
use crate::surface::RenderSurface;
use crate::tessellation::{Color, StreamingStroke, UnsupportedParameter};

use futures::future::{AbortHandle, Abortable, Aborted};
use log::{debug, trace};
use std::sync::{Arc, Mutex};

/// What happens to the stored lines when a new line would exceed
/// `CaptureOptions::max_lines`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum RemoveStrategy {
    /// Drop the oldest line.
    RemoveOld,
    /// Drop every line.
    ClearAll,
}

/// Parameters of a [`GestureCapture`](struct.GestureCapture.html).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
#[non_exhaustive]
pub struct CaptureOptions {
    /// Minimum score for a recognition to be accepted, in `[0, 1]`.
    ///
    /// Default value: `0.8`.
    pub score_to_accept: f32,

    /// Smallest number of recent lines submitted to the recognizer, in `[1, 10]`.
    ///
    /// Default value: `1`.
    pub min_lines: usize,

    /// Number of lines kept, in `[1, 10]` and not less than `min_lines`.
    ///
    /// Default value: `2`.
    pub max_lines: usize,

    /// Default value: `RemoveStrategy::RemoveOld`.
    pub remove_strategy: RemoveStrategy,

    /// After a successful recognition, drop the lines that were not part of
    /// the recognized gesture.
    ///
    /// Default value: `false`.
    pub clear_not_recognized_lines: bool,

    /// If set, points are normalized into this area before recognition and
    /// the recognizer is asked not to normalize their scale.
    ///
    /// Default value: `None`.
    pub fixed_area: Option<Rect>,

    /// Width of the live strokes, a positive finite number. Checked by
    /// `GestureCapture::new`.
    ///
    /// Default value: `LineDrawer::DEFAULT_LINE_WIDTH`.
    pub line_width: f32,

    /// Color of the live strokes.
    ///
    /// Default value: `Color::WHITE`.
    pub line_color: Color,
}

impl CaptureOptions {
    pub const MAX_LINES: usize = 10;

    pub const DEFAULT: Self = CaptureOptions {
        score_to_accept: 0.8,
        min_lines: 1,
        max_lines: 2,
        remove_strategy: RemoveStrategy::RemoveOld,
        clear_not_recognized_lines: false,
        fixed_area: None,
        line_width: StreamingStroke::DEFAULT_LINE_WIDTH,
        line_color: Color::WHITE,
    };

    #[inline]
    pub fn with_score_to_accept(mut self, score: f32) -> Self {
        self.score_to_accept = score.max(0.0).min(1.0);
        self
    }

    /// Clamped to `[1, 10]`. Raises `max_lines` if needed.
    #[inline]
    pub fn with_min_lines(mut self, min_lines: usize) -> Self {
        self.min_lines = min_lines.max(1).min(Self::MAX_LINES);
        self.max_lines = self.max_lines.max(self.min_lines);
        self
    }

    /// Clamped to `[1, 10]` and to `min_lines`.
    #[inline]
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines.max(1).min(Self::MAX_LINES).max(self.min_lines);
        self
    }

    #[inline]
    pub const fn with_remove_strategy(mut self, strategy: RemoveStrategy) -> Self {
        self.remove_strategy = strategy;
        self
    }

    #[inline]
    pub const fn with_clear_not_recognized_lines(mut self, clear: bool) -> Self {
        self.clear_not_recognized_lines = clear;
        self
    }

    #[inline]
    pub const fn with_fixed_area(mut self, area: Rect) -> Self {
        self.fixed_area = Some(area);
        self
    }

    #[inline]
    pub const fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    #[inline]
    pub const fn with_line_color(mut self, color: Color) -> Self {
        self.line_color = color;
        self
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Aborts the recognition attempt in flight, if any.
///
/// Obtained from [`GestureCapture::canceller`](struct.GestureCapture.html#method.canceller),
/// can be moved to another thread, for example to implement a timeout.
#[derive(Clone, Default)]
pub struct Canceller {
    handle: Arc<Mutex<Option<AbortHandle>>>,
}

impl Canceller {
    /// Returns `false` if no attempt was running.
    pub fn cancel(&self) -> bool {
        let handle = match self.handle.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };

        match handle {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    fn set(&self, handle: Option<AbortHandle>) {
        match self.handle.lock() {
            Ok(mut guard) => *guard = handle,
            Err(poisoned) => *poisoned.into_inner() = handle,
        }
    }
}

/// Records gestures made of one or several strokes and submits them to a
/// recognizer.
///
/// Pointer events drive the capture: `pointer_down` starts a line,
/// `pointer_move` extends it, and `pointer_up` ends it and runs the
/// recognition. Each line is drawn live by its own `LineDrawer`; drawer `i`
/// always displays line `i`. New drawers get their surface from `new_surface`.
///
/// When a line ends, the recognizer first sees all the stored lines, then
/// fewer and fewer of the most recent ones until `min_lines`. The first
/// result scoring at least `score_to_accept` wins.
pub struct GestureCapture<R, S, F> {
    recognizer: R,
    options: CaptureOptions,
    data: GestureData,
    drawers: Vec<LineDrawer<S>>,
    // Empty stroke cloned into new drawers.
    style: StreamingStroke,
    new_surface: F,
    canceller: Canceller,
}

impl<R, S, F> GestureCapture<R, S, F>
where
    R: Recognizer,
    S: RenderSurface,
    F: FnMut() -> S,
{
    /// Fails with `InvalidLineWidth` if `options.line_width` can't be drawn.
    pub fn new(
        recognizer: R,
        options: CaptureOptions,
        mut new_surface: F,
    ) -> Result<Self, UnsupportedParameter> {
        let style = StreamingStroke::new(options.line_width, options.line_color)?;
        let first = LineDrawer::with_stroke(new_surface(), style.clone());

        Ok(GestureCapture {
            recognizer,
            options,
            data: GestureData::new(),
            drawers: vec![first],
            style,
            new_surface,
            canceller: Canceller::default(),
        })
    }

    /// Starts a new line.
    pub fn pointer_down(&mut self, position: Point) {
        if self.data.lines.len() >= self.options.max_lines {
            match self.options.remove_strategy {
                RemoveStrategy::RemoveOld => {
                    self.data.lines.remove(0);
                    // Keep drawer i on line i.
                    let mut drawer = self.drawers.remove(0);
                    drawer.clear();
                    self.drawers.push(drawer);
                }
                RemoveStrategy::ClearAll => {
                    self.data.lines.clear();
                    for drawer in &mut self.drawers {
                        drawer.clear();
                    }
                }
            }
        }

        self.data.lines.push(GestureLine::new());
        let idx = self.data.lines.len() - 1;

        if self.drawers.len() <= idx {
            let surface = (self.new_surface)();
            self.drawers.push(LineDrawer::with_stroke(surface, self.style.clone()));
        } else {
            self.drawers[idx].clear();
        }

        self.add_point(idx, position);
    }

    /// Extends the current line. Ignored if no line was started or if the
    /// position did not change.
    pub fn pointer_move(&mut self, position: Point) {
        let idx = match self.current_line() {
            Some(idx) => idx,
            None => return,
        };

        if self.data.lines[idx].last_point() != Some(position) {
            self.add_point(idx, position);
        }
    }

    /// Ends the current line and runs the recognition.
    ///
    /// Returns `RecognitionResult::empty()` if no window of lines was
    /// accepted. Aborted attempts count as not recognized.
    pub async fn pointer_up(&mut self, position: Point) -> RecognitionResult {
        let idx = match self.current_line() {
            Some(idx) => idx,
            None => return RecognitionResult::empty(),
        };

        self.add_point(idx, position);

        let line_count = self.data.lines.len();
        let min_size = self.options.min_lines.max(1);

        for size in (min_size..=line_count).rev() {
            let window = self.data.window(size);

            let (input, normalize_scale) = match self.options.fixed_area {
                Some(ref area) => (window.normalized_into(area), false),
                None => (window.clone(), true),
            };

            let (handle, registration) = AbortHandle::new_pair();
            self.canceller.set(Some(handle));

            let attempt = Abortable::new(
                self.recognizer.recognize(input, normalize_scale),
                registration,
            )
            .await;

            self.canceller.set(None);

            let result = match attempt {
                Ok(result) => result,
                Err(Aborted) => {
                    debug!("recognition of the last {} lines aborted", size);
                    RecognitionResult::empty()
                }
            };

            if result.is_accepted(self.options.score_to_accept) {
                debug!("recognized {} line(s): {:?} ({})", size, result.gesture, result.score);

                if self.options.clear_not_recognized_lines {
                    self.data = window;
                    self.redraw();
                }

                return result;
            }

            trace!("last {} line(s) not recognized (score: {})", size, result.score);
        }

        RecognitionResult::empty()
    }

    /// Removes every line.
    pub fn clear_lines(&mut self) {
        self.data.lines.clear();
        for drawer in &mut self.drawers {
            drawer.clear();
        }
    }

    /// A handle that aborts the recognition in flight.
    pub fn canceller(&self) -> Canceller {
        self.canceller.clone()
    }

    pub fn data(&self) -> &GestureData {
        &self.data
    }

    pub fn drawers(&self) -> &[LineDrawer<S>] {
        &self.drawers
    }

    pub fn options(&self) -> &CaptureOptions {
        &self.options
    }

    pub fn recognizer(&self) -> &R {
        &self.recognizer
    }

    fn current_line(&self) -> Option<usize> {
        self.data.lines.len().checked_sub(1)
    }

    fn add_point(&mut self, idx: usize, position: Point) {
        if !(position.x.is_finite() && position.y.is_finite()) {
            trace!("dropping non-finite position {:?}", position);
            return;
        }

        self.data.lines[idx].points.push(position);
        self.drawers[idx].add_point(position);
    }

    fn redraw(&mut self) {
        for drawer in &mut self.drawers {
            drawer.clear();
        }

        for (line, drawer) in self.data.lines.iter().zip(self.drawers.iter_mut()) {
            for p in &line.points {
                drawer.add_point(*p);
            }
        }
    }
}
