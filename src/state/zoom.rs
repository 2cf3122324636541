// Zoom/pan state for the image on display. Scale and pan are applied as
// `translate(position) scale(scale)` around the element centre, which is the
// viewport centre since slot elements fill the viewport.
use crate::geometry::{Point, Transform, ViewportDimensions};

#[derive(Debug, Clone, PartialEq)]
pub struct ZoomState {
    pub scale: f64,
    pub old_scale: f64,
    pub max: f64,
    pub position: Point,
    pub previous_pointer: Option<Point>,
    /// A pan drag is in progress.
    pub clicked: bool,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self::new(5.0)
    }
}

impl ZoomState {
    pub fn new(max: f64) -> Self {
        Self {
            scale: 1.0,
            old_scale: 1.0,
            max: max.max(1.0),
            position: Point::default(),
            previous_pointer: None,
            clicked: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.scale != 1.0
    }

    pub fn reset(self) -> Self {
        Self::new(self.max)
    }

    pub fn zoom_in(self, factor: f64, target: Option<Point>, dims: &ViewportDimensions) -> Self {
        let scale = self.scale + factor * self.scale;
        self.zoom_to(scale, target, dims)
    }

    pub fn zoom_out(self, factor: f64, target: Option<Point>, dims: &ViewportDimensions) -> Self {
        let scale = self.scale - factor * self.scale;
        self.zoom_to(scale, target, dims)
    }

    /// Rescales keeping `target` (viewport centre when absent) fixed on screen,
    /// as far as the pan bounds allow.
    pub fn zoom_to(mut self, scale: f64, target: Option<Point>, dims: &ViewportDimensions) -> Self {
        let scale = scale.clamp(1.0, self.max);
        if scale == 1.0 {
            return self.reset();
        }
        let center = dims.screen.center();
        let anchor = target.unwrap_or(center);
        let rel_x = anchor.x - center.x;
        let rel_y = anchor.y - center.y;
        // anchor in unscaled image coordinates, relative to the centre
        let local_x = (rel_x - self.position.x) / self.scale;
        let local_y = (rel_y - self.position.y) / self.scale;
        self.old_scale = self.scale;
        self.scale = scale;
        self.position = Point::new(rel_x - scale * local_x, rel_y - scale * local_y);
        self.bound(dims)
    }

    /// Clamps the pan so the rendered content, letterbox excluded, never
    /// leaves a gap at the viewport edges.
    pub fn bound(mut self, dims: &ViewportDimensions) -> Self {
        let d = dims.current_or_screen();
        let max_x = ((self.scale * d.width - (d.width + 2.0 * d.offset_width)) / 2.0).max(0.0);
        let max_y = ((self.scale * d.height - (d.height + 2.0 * d.offset_height)) / 2.0).max(0.0);
        self.position.x = self.position.x.clamp(-max_x, max_x);
        self.position.y = self.position.y.clamp(-max_y, max_y);
        self
    }

    pub fn press(mut self, pointer: Point) -> Self {
        if !self.is_active() {
            return self;
        }
        self.previous_pointer = Some(pointer);
        self.clicked = true;
        self
    }

    /// Pans by the pointer delta. The flag reports whether the move was consumed.
    pub fn drag(mut self, pointer: Point, dims: &ViewportDimensions) -> (Self, bool) {
        if !self.is_active() || !self.clicked {
            return (self, false);
        }
        let Some(previous) = self.previous_pointer else {
            return (self, false);
        };
        self.position.x += pointer.x - previous.x;
        self.position.y += pointer.y - previous.y;
        self.previous_pointer = Some(pointer);
        (self.bound(dims), true)
    }

    pub fn release(mut self) -> Self {
        self.clicked = false;
        self.previous_pointer = None;
        self
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translate_x: self.position.x,
            translate_y: self.position.y,
            scale: self.scale,
            origin: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    fn full_frame() -> ViewportDimensions {
        ViewportDimensions::compute(Size::new(1000.0, 800.0), Some((1000, 800)), None, None)
    }

    fn portrait() -> ViewportDimensions {
        ViewportDimensions::compute(Size::new(1000.0, 800.0), Some((400, 800)), None, None)
    }

    #[test]
    fn zoom_in_is_capped_at_max() {
        let dims = full_frame();
        let mut z = ZoomState::new(5.0);
        for _ in 0..50 {
            z = z.zoom_in(0.5, None, &dims);
            assert!(z.scale <= 5.0);
        }
        assert_eq!(z.scale, 5.0);
        assert!(z.is_active());
    }

    #[test]
    fn zoom_out_stops_at_one_and_resets() {
        let dims = full_frame();
        let mut z = ZoomState::new(5.0)
            .zoom_in(0.5, Some(Point::new(900.0, 700.0)), &dims)
            .zoom_in(0.5, Some(Point::new(900.0, 700.0)), &dims);
        assert!(z.position != Point::default());
        z = z.press(Point::new(10.0, 10.0));
        for _ in 0..50 {
            z = z.zoom_out(0.25, None, &dims);
            assert!(z.scale >= 1.0);
        }
        assert_eq!(z.scale, 1.0);
        assert!(!z.is_active());
        assert!(!z.clicked);
        assert_eq!(z.position, Point::default());
    }

    #[test]
    fn target_point_stays_under_pointer() {
        let dims = full_frame();
        let target = Point::new(700.0, 500.0);
        let z = ZoomState::default().zoom_in(0.25, Some(target), &dims);
        assert_eq!(z.scale, 1.25);
        assert_eq!(z.old_scale, 1.0);
        assert_eq!(z.position, Point::new(-50.0, -25.0));

        // the same image pixel (200, 100 from centre) maps back onto the target
        let z2 = z.clone().zoom_in(0.25, Some(target), &dims);
        let center = dims.screen.center();
        let local_x = (target.x - center.x - z.position.x) / z.scale;
        let screen_x = center.x + z2.position.x + z2.scale * local_x;
        assert!((screen_x - target.x).abs() < 1e-9);
    }

    #[test]
    fn untargeted_zoom_anchors_at_centre() {
        let z = ZoomState::default().zoom_in(0.5, None, &full_frame());
        assert_eq!(z.scale, 1.5);
        assert_eq!(z.position, Point::default());
    }

    #[test]
    fn pan_is_bounded_by_content() {
        let dims = full_frame();
        let z = ZoomState::default().zoom_to(2.0, None, &dims).press(Point::new(0.0, 0.0));
        let (z, handled) = z.drag(Point::new(5_000.0, -5_000.0), &dims);
        assert!(handled);
        assert_eq!(z.position, Point::new(500.0, -400.0));
        let (z, _) = z.drag(Point::new(4_900.0, -5_000.0), &dims);
        assert_eq!(z.position, Point::new(400.0, -400.0));
        let z = z.release();
        assert!(!z.clicked);
        assert_eq!(z.scale, 2.0);
    }

    #[test]
    fn letterbox_is_not_pannable() {
        let dims = portrait();
        let z = ZoomState::default().zoom_to(2.0, None, &dims).press(Point::new(0.0, 0.0));
        let (z, _) = z.drag(Point::new(300.0, 900.0), &dims);
        // 800px wide content still fits the 1000px viewport horizontally
        assert_eq!(z.position, Point::new(0.0, 400.0));
    }

    #[test]
    fn drag_without_zoom_is_not_consumed() {
        let dims = full_frame();
        let z = ZoomState::default().press(Point::new(1.0, 1.0));
        assert!(!z.clicked);
        let (z, handled) = z.drag(Point::new(50.0, 50.0), &dims);
        assert!(!handled);
        assert_eq!(z.position, Point::default());
    }

    #[test]
    fn rebound_after_viewport_shrink() {
        let z = ZoomState::default().zoom_to(3.0, Some(Point::new(1000.0, 800.0)), &full_frame());
        let smaller =
            ViewportDimensions::compute(Size::new(500.0, 400.0), Some((1000, 800)), None, None);
        let z = z.bound(&smaller);
        assert!(z.position.x.abs() <= 500.0);
        assert!(z.position.y.abs() <= 400.0);
    }
}
