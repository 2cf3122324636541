// Touch swipe gesture state and the swipe/drag classification.
use crate::geometry::{Point, SlotTransforms, Transform};

const SWIPE_VELOCITY: f64 = 0.65;
const RUBBER_BAND_SPAN: f64 = 1000.0;

#[derive(Default, Debug, Clone, PartialEq)]
pub struct TouchState {
    pub start: Option<Point>,
    pub last: Option<Point>,
    pub moving: bool,
    pub start_time: f64,
}

/// What the gesture needs to know about the slideshow at the time of an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeContext {
    pub has_previous: bool,
    pub has_next: bool,
    pub viewport_width: f64,
    pub zoom_active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeOutcome {
    /// Tap or ignored gesture; nothing to do.
    None,
    Next,
    Previous,
    /// Snap the slots back to rest.
    Cancel,
}

pub fn min_swipe_distance(viewport_width: f64) -> f64 {
    (viewport_width / 6.0).clamp(50.0, 250.0)
}

/// Decides whether a finished horizontal drag of `x_diff` (start minus end,
/// positive when dragging left) commits a navigation.
pub fn classify_swipe(
    x_diff: f64,
    elapsed_ms: f64,
    viewport_width: f64,
    has_previous: bool,
    has_next: bool,
) -> SwipeOutcome {
    let min_swipe = min_swipe_distance(viewport_width);
    let is_swipe = x_diff.abs() > elapsed_ms * SWIPE_VELOCITY;
    let far = viewport_width / 4.0;
    if has_next && (x_diff > far || (x_diff > min_swipe && is_swipe)) {
        SwipeOutcome::Next
    } else if has_previous && (x_diff < -far || (x_diff < -min_swipe && is_swipe)) {
        SwipeOutcome::Previous
    } else {
        SwipeOutcome::Cancel
    }
}

impl TouchState {
    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    pub fn begin(self, point: Point, now_ms: f64, zoom_active: bool) -> Self {
        if zoom_active {
            return self;
        }
        Self { start: Some(point), last: None, moving: false, start_time: now_ms }
    }

    /// Records a move and returns provisional slot transforms when the drag
    /// is mostly horizontal.
    pub fn track(mut self, point: Point, ctx: SwipeContext) -> (Self, Option<SlotTransforms>) {
        if ctx.zoom_active {
            return (self, None);
        }
        let Some(start) = self.start else {
            return (self, None);
        };
        self.moving = true;
        self.last = Some(point);
        let x_diff = start.x - point.x;
        let y_diff = start.y - point.y;
        if x_diff.abs() <= y_diff.abs() {
            return (self, None);
        }
        let rubber_band = Transform::scale_at(1.0 + x_diff.abs() / RUBBER_BAND_SPAN, start);
        let shifted = Transform::translate_x(-x_diff);
        let feedback = if x_diff >= 0.0 {
            if ctx.has_next {
                SlotTransforms { current: shifted, next: shifted, previous: Transform::IDENTITY }
            } else {
                SlotTransforms { current: rubber_band, ..Default::default() }
            }
        } else if ctx.has_previous {
            SlotTransforms { current: shifted, previous: shifted, next: Transform::IDENTITY }
        } else {
            SlotTransforms { current: rubber_band, ..Default::default() }
        };
        (self, Some(feedback))
    }

    /// Ends the gesture. The returned state is always neutral.
    pub fn finish(self, now_ms: f64, ctx: SwipeContext) -> (Self, SwipeOutcome) {
        let outcome = match (self.start, self.last) {
            (Some(start), Some(last)) if self.moving && !ctx.zoom_active => classify_swipe(
                start.x - last.x,
                now_ms - self.start_time,
                ctx.viewport_width,
                ctx.has_previous,
                ctx.has_next,
            ),
            _ => SwipeOutcome::None,
        };
        (Self::default(), outcome)
    }
}
