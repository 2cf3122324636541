//! Slideshow view model.
//!
//! Owns the current/previous/next slots, their geometry, the touch and zoom
//! controllers and the navigation lock. Every entry point returns the side
//! effects the host has to carry out (timers, route writes, fullscreen calls)
//! instead of performing them, so the whole interaction core runs without a
//! browser.

use crate::config::GalleryConfig;
use crate::geometry::{Point, SlotTransforms, Transform, ViewportDimensions, ViewportProvider};
use crate::model::{Gallery, GalleryEvent, ImageEntry, ImageHandle};
use crate::state::touch::{SwipeContext, SwipeOutcome, TouchState};
use crate::state::zoom::ZoomState;
use crate::util::{clog, cwarn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Previous,
    Current,
    Next,
}

/// Snapshot of the entry shown in a slot.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotImage {
    pub index: usize,
    pub source_url: String,
    pub preview_url: Option<String>,
    pub natural: Option<(u32, u32)>,
    pub loaded: bool,
    /// Decoded source captured on first load; rendering reuses it.
    pub handle: Option<ImageHandle>,
    pub title: String,
    pub caption: String,
    pub has_caption: bool,
}

impl SlotImage {
    fn from_entry(entry: &ImageEntry) -> Self {
        Self {
            index: entry.index,
            source_url: entry.source_url.clone(),
            preview_url: entry.preview_url.clone(),
            natural: entry.natural_size(),
            loaded: entry.loaded,
            handle: entry.handle.clone(),
            title: entry.title.clone(),
            caption: entry.caption.clone(),
            has_caption: entry.has_caption(),
        }
    }

    fn is(&self, index: usize, source_url: &str) -> bool {
        self.index == index && self.source_url == source_url
    }

    /// Address the `<img>` should point at: the captured handle once the
    /// image has rendered, the source URL before that.
    pub fn display_src(&self) -> &str {
        self.handle.as_ref().map_or(&self.source_url, |h| h.src())
    }
}

/// User-level commands coming from the overlay, the keyboard or the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlideshowAction {
    NavigateToPrevious,
    NavigateToNext,
    ResetSlideshow,
    ToggleFullscreen,
    ZoomIn,
    ZoomOut,
    ToggleToolbar,
}

/// Work the host performs on behalf of the model.
#[derive(Clone, Debug, PartialEq)]
pub enum SlideshowEffect {
    /// Call `finish_transition` after the delay.
    ScheduleTransitionEnd { after_ms: u32 },
    /// Call `settle` after the delay.
    ScheduleSettle { after_ms: u32 },
    SetRoute(usize),
    ResetRoute,
    RequestFullscreen,
    ExitFullscreen,
    LockPageScroll(bool),
    Focus,
    Notify(GalleryEvent),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Direction {
    Previous,
    Next,
}

pub struct SlideshowModel<V: ViewportProvider> {
    config: GalleryConfig,
    viewport: V,
    open: bool,
    current: Option<SlotImage>,
    previous: Option<SlotImage>,
    next: Option<SlotImage>,
    dims: ViewportDimensions,
    transforms: SlotTransforms,
    transition_ms: Option<u32>,
    /// Target index of the navigation in flight.
    transitioning: Option<usize>,
    spinner: bool,
    toolbar_visible: bool,
    fullscreen_enabled: bool,
    fullscreen_active: bool,
    touch: TouchState,
    zoom: ZoomState,
}

impl<V: ViewportProvider> SlideshowModel<V> {
    pub fn new(config: GalleryConfig, viewport: V, fullscreen_enabled: bool) -> Self {
        let zoom = ZoomState::new(config.max_zoom);
        let dims = ViewportDimensions { screen: viewport.viewport_size(), ..Default::default() };
        Self {
            config,
            viewport,
            open: false,
            current: None,
            previous: None,
            next: None,
            dims,
            transforms: SlotTransforms::default(),
            transition_ms: None,
            transitioning: None,
            spinner: false,
            toolbar_visible: true,
            fullscreen_enabled,
            fullscreen_active: false,
            touch: TouchState::default(),
            zoom,
        }
    }

    // ---- view state -------------------------------------------------------

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn spinner_visible(&self) -> bool {
        self.spinner
    }

    pub fn toolbar_visible(&self) -> bool {
        self.toolbar_visible
    }

    pub fn fullscreen_enabled(&self) -> bool {
        self.fullscreen_enabled
    }

    pub fn fullscreen_active(&self) -> bool {
        self.fullscreen_active
    }

    pub fn zoom_active(&self) -> bool {
        self.zoom.is_active()
    }

    pub fn zoom_clicked(&self) -> bool {
        self.zoom.clicked
    }

    pub fn zoom(&self) -> &ZoomState {
        &self.zoom
    }

    pub fn touch(&self) -> &TouchState {
        &self.touch
    }

    pub fn dimensions(&self) -> &ViewportDimensions {
        &self.dims
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn slot(&self, slot: Slot) -> Option<&SlotImage> {
        match slot {
            Slot::Previous => self.previous.as_ref(),
            Slot::Current => self.current.as_ref(),
            Slot::Next => self.next.as_ref(),
        }
    }

    /// Transform currently applied to a slot. Zoom replaces the swipe
    /// transform of the current slot while active.
    pub fn slot_transform(&self, slot: Slot) -> Transform {
        match slot {
            Slot::Previous => self.transforms.previous,
            Slot::Current if self.zoom.is_active() => self.zoom.transform(),
            Slot::Current => self.transforms.current,
            Slot::Next => self.transforms.next,
        }
    }

    /// Horizontal resting position of a slot before any transform.
    pub fn slot_rest(&self, slot: Slot) -> f64 {
        match slot {
            Slot::Previous => self.dims.previous_rest(),
            Slot::Current => 0.0,
            Slot::Next => self.dims.next_rest(),
        }
    }

    /// CSS transition duration for slot transforms, if one is running.
    pub fn transition_ms(&self) -> Option<u32> {
        self.transition_ms
    }

    // ---- open / close -----------------------------------------------------

    /// Applies the container's `active` flag and active image. The slideshow
    /// is open only when both are set.
    pub fn set_active(
        &mut self,
        active: bool,
        image: Option<&ImageEntry>,
        gallery: &Gallery,
    ) -> Vec<SlideshowEffect> {
        match image.filter(|_| active) {
            Some(entry) => self.open_on(entry, gallery),
            None => self.close(),
        }
    }

    fn open_on(&mut self, entry: &ImageEntry, gallery: &Gallery) -> Vec<SlideshowEffect> {
        let same_image = self.open
            && self.current.as_ref().is_some_and(|c| c.is(entry.index, &entry.source_url));
        if same_image {
            // sequence may have changed around the same image
            self.populate(entry, gallery);
            self.recompute();
            return Vec::new();
        }
        let newly_opened = !self.open;
        self.open = true;
        self.zoom = self.zoom.clone().reset();
        self.spinner = !entry.loaded;
        self.populate(entry, gallery);
        self.transforms = SlotTransforms::default();
        self.transition_ms = None;
        self.transitioning = None;
        self.recompute();
        clog(&format!("slideshow: showing image {}", entry.index));
        if newly_opened {
            self.toolbar_visible = true;
            vec![SlideshowEffect::LockPageScroll(true), SlideshowEffect::Focus]
        } else {
            Vec::new()
        }
    }

    fn populate(&mut self, entry: &ImageEntry, gallery: &Gallery) {
        self.current = Some(SlotImage::from_entry(entry));
        self.previous = gallery.previous_of(entry.index).map(SlotImage::from_entry);
        self.next = gallery.next_of(entry.index).map(SlotImage::from_entry);
    }

    fn close(&mut self) -> Vec<SlideshowEffect> {
        if !self.open {
            return Vec::new();
        }
        clog("slideshow: closed");
        self.open = false;
        self.current = None;
        self.previous = None;
        self.next = None;
        self.spinner = false;
        self.zoom = self.zoom.clone().reset();
        self.touch = TouchState::default();
        self.transforms = SlotTransforms::default();
        self.transition_ms = None;
        self.transitioning = None;
        self.recompute();
        let mut effects = vec![SlideshowEffect::LockPageScroll(false)];
        if self.fullscreen_active {
            effects.push(SlideshowEffect::ExitFullscreen);
        }
        effects
    }

    // ---- geometry ---------------------------------------------------------

    fn recompute(&mut self) {
        let natural = |s: &Option<SlotImage>| s.as_ref().and_then(|s| s.natural);
        self.dims = ViewportDimensions::compute(
            self.viewport.viewport_size(),
            natural(&self.current),
            natural(&self.previous),
            natural(&self.next),
        );
        if self.zoom.is_active() {
            self.zoom = self.zoom.clone().bound(&self.dims);
        }
    }

    /// Viewport size changed. In-progress gestures are left alone.
    pub fn resize(&mut self) {
        self.recompute();
    }

    fn update_slots(
        &mut self,
        index: usize,
        source_url: &str,
        mut f: impl FnMut(&mut SlotImage),
    ) -> bool {
        let mut touched = false;
        for slot in [&mut self.previous, &mut self.current, &mut self.next] {
            if let Some(s) = slot.as_mut().filter(|s| s.is(index, source_url)) {
                f(s);
                touched = true;
            }
        }
        touched
    }

    // ---- navigation -------------------------------------------------------

    pub fn navigate_to_previous(&mut self) -> Vec<SlideshowEffect> {
        self.navigate(Direction::Previous)
    }

    pub fn navigate_to_next(&mut self) -> Vec<SlideshowEffect> {
        self.navigate(Direction::Next)
    }

    fn navigate(&mut self, direction: Direction) -> Vec<SlideshowEffect> {
        if !self.open || self.transitioning.is_some() {
            return Vec::new();
        }
        let target = match direction {
            Direction::Previous => self.previous.as_ref(),
            Direction::Next => self.next.as_ref(),
        };
        let Some(target) = target.map(|t| t.index) else {
            return Vec::new();
        };
        self.zoom = self.zoom.clone().reset();
        self.transitioning = Some(target);
        self.transition_ms = Some(self.config.transition_ms);
        let travel = self.dims.current_travel();
        self.transforms = match direction {
            Direction::Next => SlotTransforms {
                current: Transform::translate_x(-travel),
                next: Transform::translate_x(-self.dims.next_rest()),
                previous: Transform::IDENTITY,
            },
            Direction::Previous => SlotTransforms {
                current: Transform::translate_x(travel),
                previous: Transform::translate_x(-self.dims.previous_rest()),
                next: Transform::IDENTITY,
            },
        };
        let event = match direction {
            Direction::Previous => GalleryEvent::NavigateToPrevious,
            Direction::Next => GalleryEvent::NavigateToNext,
        };
        vec![
            SlideshowEffect::ScheduleTransitionEnd { after_ms: self.config.transition_ms },
            SlideshowEffect::Notify(event),
        ]
    }

    /// End of the navigation delay: commit the route change and unlock.
    pub fn finish_transition(&mut self) -> Vec<SlideshowEffect> {
        match self.transitioning.take() {
            Some(target) => {
                self.transition_ms = None;
                clog(&format!("slideshow: navigated to {}", target));
                vec![SlideshowEffect::SetRoute(target)]
            }
            None => Vec::new(),
        }
    }

    /// End of a cancel animation: drop the transition styling.
    pub fn settle(&mut self) {
        if self.transitioning.is_none() {
            self.transition_ms = None;
        }
    }

    // ---- commands ---------------------------------------------------------

    pub fn dispatch(&mut self, action: SlideshowAction) -> Vec<SlideshowEffect> {
        use SlideshowAction::*;
        match action {
            NavigateToPrevious => self.navigate_to_previous(),
            NavigateToNext => self.navigate_to_next(),
            ResetSlideshow => {
                if !self.open {
                    return Vec::new();
                }
                vec![
                    SlideshowEffect::ResetRoute,
                    SlideshowEffect::Notify(GalleryEvent::ResetSlideshow),
                ]
            }
            ToggleFullscreen => {
                if !self.fullscreen_enabled || !self.open {
                    return Vec::new();
                }
                let request = if self.fullscreen_active {
                    SlideshowEffect::ExitFullscreen
                } else {
                    SlideshowEffect::RequestFullscreen
                };
                vec![request, SlideshowEffect::Notify(GalleryEvent::ToggleFullscreen)]
            }
            ZoomIn => {
                if !self.open || self.transitioning.is_some() {
                    return Vec::new();
                }
                let factor = self.config.button_zoom_factor;
                self.zoom = self.zoom.clone().zoom_in(factor, None, &self.dims);
                vec![SlideshowEffect::Notify(GalleryEvent::ZoomIn)]
            }
            ZoomOut => {
                if !self.open || self.transitioning.is_some() {
                    return Vec::new();
                }
                let factor = self.config.button_zoom_factor;
                self.zoom = self.zoom.clone().zoom_out(factor, None, &self.dims);
                vec![SlideshowEffect::Notify(GalleryEvent::ZoomOut)]
            }
            ToggleToolbar => {
                self.toolbar_visible = !self.toolbar_visible;
                Vec::new()
            }
        }
    }

    /// Keyboard input. `None` means the key is not ours and the browser
    /// default should run.
    pub fn key_down(&mut self, key: &str) -> Option<Vec<SlideshowEffect>> {
        if !self.open {
            return None;
        }
        match key {
            "Escape" | "Esc" => {
                if self.fullscreen_active {
                    Some(vec![SlideshowEffect::ExitFullscreen])
                } else {
                    Some(self.dispatch(SlideshowAction::ResetSlideshow))
                }
            }
            "ArrowLeft" | "Left" => Some(self.navigate_to_previous()),
            "ArrowRight" | "Right" => Some(self.navigate_to_next()),
            "ArrowUp" | "Up" | "ArrowDown" | "Down" => Some(Vec::new()),
            _ => None,
        }
    }

    /// Fullscreen state changed; `active` is true when the slideshow is the
    /// fullscreen element.
    pub fn fullscreen_changed(&mut self, active: bool) {
        self.fullscreen_active = active;
    }

    // ---- pointer input ----------------------------------------------------

    fn swipe_context(&self) -> SwipeContext {
        SwipeContext {
            has_previous: self.previous.is_some(),
            has_next: self.next.is_some(),
            viewport_width: self.dims.screen.width,
            zoom_active: self.zoom.is_active(),
        }
    }

    pub fn touch_start(&mut self, point: Point, now_ms: f64) {
        if !self.open {
            return;
        }
        let zoom_active = self.zoom.is_active();
        if zoom_active && self.transitioning.is_none() {
            self.zoom = self.zoom.clone().press(point);
        }
        self.touch = std::mem::take(&mut self.touch).begin(point, now_ms, zoom_active);
    }

    /// Returns true when the move belongs to the slideshow and the default
    /// scrolling should be suppressed.
    pub fn touch_move(&mut self, point: Point) -> bool {
        if !self.open {
            return false;
        }
        if self.zoom.is_active() {
            let (zoom, handled) = self.zoom.clone().drag(point, &self.dims);
            self.zoom = zoom;
            return handled;
        }
        if !self.touch.is_tracking() {
            return false;
        }
        let ctx = self.swipe_context();
        let (touch, feedback) = std::mem::take(&mut self.touch).track(point, ctx);
        self.touch = touch;
        if let Some(feedback) = feedback.filter(|_| self.transitioning.is_none()) {
            self.transforms = feedback;
            self.transition_ms = None;
        }
        true
    }

    pub fn touch_end(&mut self, now_ms: f64) -> Vec<SlideshowEffect> {
        self.zoom = self.zoom.clone().release();
        let ctx = self.swipe_context();
        let (touch, outcome) = std::mem::take(&mut self.touch).finish(now_ms, ctx);
        self.touch = touch;
        if !self.open {
            return Vec::new();
        }
        match outcome {
            SwipeOutcome::None => Vec::new(),
            SwipeOutcome::Next => self.navigate_to_next(),
            SwipeOutcome::Previous => self.navigate_to_previous(),
            SwipeOutcome::Cancel => {
                if self.transitioning.is_some() {
                    return Vec::new();
                }
                self.transforms = SlotTransforms::default();
                self.transition_ms = Some(self.config.cancel_ms);
                vec![SlideshowEffect::ScheduleSettle { after_ms: self.config.cancel_ms }]
            }
        }
    }

    /// Primary button pressed. Only a zoomed image takes mouse drags.
    pub fn mouse_down(&mut self, point: Point) -> bool {
        if !self.open || !self.zoom.is_active() || self.transitioning.is_some() {
            return false;
        }
        self.zoom = self.zoom.clone().press(point);
        true
    }

    pub fn mouse_move(&mut self, point: Point, primary_held: bool) -> bool {
        if !self.open || !primary_held {
            return false;
        }
        let (zoom, handled) = self.zoom.clone().drag(point, &self.dims);
        self.zoom = zoom;
        handled
    }

    pub fn mouse_up(&mut self) {
        self.zoom = self.zoom.clone().release();
    }

    /// Wheel input. Returns true when consumed; an ignored wheel must keep
    /// its default scrolling. Nothing zooms while a slide is moving.
    pub fn wheel(&mut self, delta_y: f64, pointer: Point) -> bool {
        if !self.open || self.transitioning.is_some() {
            return false;
        }
        let loaded = self.current.as_ref().is_some_and(|c| c.loaded);
        let factor = self.config.wheel_zoom_factor;
        if delta_y < 0.0 && loaded {
            self.zoom = self.zoom.clone().zoom_in(factor, Some(pointer), &self.dims);
            true
        } else if delta_y > 0.0 && self.zoom.is_active() {
            self.zoom = self.zoom.clone().zoom_out(factor, Some(pointer), &self.dims);
            true
        } else {
            false
        }
    }

    // ---- image reference callbacks ----------------------------------------

    /// The image in the current slot finished loading.
    pub fn image_loaded(
        &mut self,
        index: usize,
        source_url: &str,
        handle: ImageHandle,
        natural: Option<(u32, u32)>,
        gallery: &mut Gallery,
    ) {
        if self.record_load(index, source_url, handle, natural, gallery)
            && self.current.as_ref().is_some_and(|c| c.is(index, source_url))
        {
            self.spinner = false;
        }
    }

    /// A neighbour slot finished loading. The spinner is not affected.
    pub fn adjoining_image_loaded(
        &mut self,
        index: usize,
        source_url: &str,
        handle: ImageHandle,
        natural: Option<(u32, u32)>,
        gallery: &mut Gallery,
    ) {
        self.record_load(index, source_url, handle, natural, gallery);
    }

    /// Marks the entry loaded and refreshes matching slots. False for a
    /// callback about an entry that is no longer at that position.
    fn record_load(
        &mut self,
        index: usize,
        source_url: &str,
        handle: ImageHandle,
        natural: Option<(u32, u32)>,
        gallery: &mut Gallery,
    ) -> bool {
        let Some(entry) = gallery.get_mut(index).filter(|e| e.source_url == source_url) else {
            return false;
        };
        entry.mark_loaded(handle);
        let resized = match natural {
            Some((w, h)) => entry.set_natural_size(w, h),
            None => false,
        };
        let natural = entry.natural_size();
        let handle = entry.handle.clone();
        let touched = self.update_slots(index, source_url, |s| {
            s.loaded = true;
            s.natural = natural;
            s.handle = handle.clone();
        });
        if touched && resized {
            self.recompute();
        }
        true
    }

    pub fn image_error(&mut self, index: usize, source_url: &str) -> Vec<SlideshowEffect> {
        let relevant = [&self.previous, &self.current, &self.next]
            .into_iter()
            .any(|s| s.as_ref().is_some_and(|s| s.is(index, source_url)));
        if !relevant {
            return Vec::new();
        }
        cwarn(&format!("slideshow: failed to load {}", source_url));
        if self.current.as_ref().is_some_and(|c| c.is(index, source_url)) {
            self.spinner = false;
        }
        vec![SlideshowEffect::Notify(GalleryEvent::ImageLoadError(source_url.to_string()))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryItem;
    use crate::geometry::Size;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct FixedViewport(Rc<Cell<Size>>);

    impl ViewportProvider for FixedViewport {
        fn viewport_size(&self) -> Size {
            self.0.get()
        }
    }

    fn gallery(n: usize) -> Gallery {
        Gallery::from_items(
            (0..n)
                .map(|i| GalleryItem {
                    src: format!("{i}.jpg"),
                    width: Some(400),
                    height: Some(800),
                    ..Default::default()
                })
                .collect(),
        )
    }

    fn model() -> (SlideshowModel<FixedViewport>, Rc<Cell<Size>>) {
        let size = Rc::new(Cell::new(Size::new(1000.0, 800.0)));
        let m = SlideshowModel::new(GalleryConfig::default(), FixedViewport(size.clone()), true);
        (m, size)
    }

    fn open_at(m: &mut SlideshowModel<FixedViewport>, g: &Gallery, i: usize) -> Vec<SlideshowEffect> {
        m.set_active(true, g.get(i), g)
    }

    fn load_current(m: &mut SlideshowModel<FixedViewport>, g: &mut Gallery, i: usize) {
        let src = format!("{i}.jpg");
        m.image_loaded(i, &src, ImageHandle::new(&src), None, g);
    }

    #[test]
    fn opens_only_when_active_and_image_set() {
        let g = gallery(3);
        let (mut m, _) = model();
        assert!(m.set_active(false, g.get(1), &g).is_empty());
        assert!(!m.is_open());
        assert!(m.set_active(true, None, &g).is_empty());
        assert!(!m.is_open());

        let effects = open_at(&mut m, &g, 1);
        assert_eq!(effects, vec![SlideshowEffect::LockPageScroll(true), SlideshowEffect::Focus]);
        assert!(m.is_open());
        assert!(m.spinner_visible());
        assert_eq!(m.slot(Slot::Previous).unwrap().index, 0);
        assert_eq!(m.slot(Slot::Next).unwrap().index, 2);
        assert!(m.dimensions().current.is_some());
    }

    #[test]
    fn reassigning_the_same_image_is_a_no_op() {
        let g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        m.wheel(-1.0, Point::new(1.0, 1.0));
        assert!(open_at(&mut m, &g, 1).is_empty());
        assert!(m.is_open());
    }

    #[test]
    fn closing_releases_slots_and_exits_fullscreen() {
        let g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 0);
        m.fullscreen_changed(true);
        let effects = m.set_active(true, None, &g);
        assert_eq!(
            effects,
            vec![SlideshowEffect::LockPageScroll(false), SlideshowEffect::ExitFullscreen]
        );
        assert!(!m.is_open());
        assert!(m.slot(Slot::Current).is_none());
        assert!(!m.spinner_visible());
        assert!(m.set_active(false, None, &g).is_empty());
    }

    #[test]
    fn already_loaded_image_shows_no_spinner() {
        let mut g = gallery(2);
        g.get_mut(1).unwrap().mark_loaded(ImageHandle::new("1.jpg"));
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        assert!(!m.spinner_visible());
    }

    #[test]
    fn second_navigation_during_transition_is_dropped() {
        let g = gallery(4);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);

        let first = m.navigate_to_next();
        assert_eq!(
            first,
            vec![
                SlideshowEffect::ScheduleTransitionEnd { after_ms: 250 },
                SlideshowEffect::Notify(GalleryEvent::NavigateToNext),
            ]
        );
        assert!(m.transitioning.is_some());
        assert!(m.navigate_to_next().is_empty());
        assert!(m.navigate_to_previous().is_empty());

        let committed = m.finish_transition();
        assert_eq!(committed, vec![SlideshowEffect::SetRoute(2)]);
        assert!(m.finish_transition().is_empty());
        assert!(!m.transitioning.is_some());

        open_at(&mut m, &g, 2);
        assert_eq!(m.navigate_to_next().len(), 2);
    }

    #[test]
    fn navigation_moves_slots_by_their_travel() {
        let g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        // 400x800 in 1000x800: 400 wide with a 300px letterbox on each side
        assert_eq!(m.slot_rest(Slot::Next), 700.0);
        assert_eq!(m.slot_rest(Slot::Previous), -700.0);

        m.navigate_to_next();
        assert_eq!(m.slot_transform(Slot::Current), Transform::translate_x(-700.0));
        assert_eq!(m.slot_transform(Slot::Next), Transform::translate_x(-700.0));
        assert_eq!(m.transition_ms(), Some(250));

        m.finish_transition();
        open_at(&mut m, &g, 2);
        assert!(m.slot_transform(Slot::Current).is_identity());
        assert_eq!(m.transition_ms(), None);
    }

    #[test]
    fn zoom_and_pan_wait_for_the_transition() {
        let mut g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        load_current(&mut m, &mut g, 1);
        m.navigate_to_next();

        assert!(!m.wheel(-1.0, Point::new(500.0, 400.0)));
        assert!(m.dispatch(SlideshowAction::ZoomIn).is_empty());
        assert!(m.dispatch(SlideshowAction::ZoomOut).is_empty());
        assert!(!m.zoom_active());
        assert_eq!(m.slot_transform(Slot::Current), Transform::translate_x(-700.0));

        m.touch_start(Point::new(500.0, 400.0), 0.0);
        assert!(!m.zoom_clicked());
        assert!(!m.mouse_down(Point::new(500.0, 400.0)));
    }

    #[test]
    fn navigation_stops_at_the_ends() {
        let g = gallery(2);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        assert!(m.navigate_to_next().is_empty());
        open_at(&mut m, &g, 0);
        assert!(m.navigate_to_previous().is_empty());
    }

    #[test]
    fn fast_swipe_navigates() {
        let g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        m.touch_start(Point::new(600.0, 400.0), 0.0);
        assert!(m.touch_move(Point::new(340.0, 402.0)));
        assert_eq!(m.slot_transform(Slot::Next), Transform::translate_x(-260.0));
        let effects = m.touch_end(300.0);
        assert!(effects.contains(&SlideshowEffect::ScheduleTransitionEnd { after_ms: 250 }));
        assert_eq!(m.finish_transition(), vec![SlideshowEffect::SetRoute(2)]);
        assert!(!m.touch().is_tracking());
    }

    #[test]
    fn short_swipe_snaps_back() {
        let g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        m.touch_start(Point::new(600.0, 400.0), 0.0);
        m.touch_move(Point::new(500.0, 400.0));
        assert!(!m.slot_transform(Slot::Current).is_identity());
        let effects = m.touch_end(1000.0);
        assert_eq!(effects, vec![SlideshowEffect::ScheduleSettle { after_ms: 150 }]);
        for slot in [Slot::Previous, Slot::Current, Slot::Next] {
            assert!(m.slot_transform(slot).is_identity());
        }
        assert_eq!(m.transition_ms(), Some(150));
        m.settle();
        assert_eq!(m.transition_ms(), None);
    }

    #[test]
    fn tap_does_nothing() {
        let g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        m.touch_start(Point::new(600.0, 400.0), 0.0);
        assert!(m.touch_end(80.0).is_empty());
    }

    #[test]
    fn load_marking_is_idempotent() {
        let mut g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        let first = ImageHandle::new("1.jpg");
        m.image_loaded(1, "1.jpg", first.clone(), Some((400, 800)), &mut g);
        m.image_loaded(1, "1.jpg", ImageHandle::new("1.jpg"), Some((400, 800)), &mut g);
        let entry = g.get(1).unwrap();
        assert!(entry.loaded);
        assert!(entry.handle.as_ref().unwrap().same_as(&first));
        assert!(!m.spinner_visible());
        let slot = m.slot(Slot::Current).unwrap();
        assert!(slot.loaded);
        assert!(slot.handle.as_ref().unwrap().same_as(&first));
    }

    #[test]
    fn loaded_entry_renders_from_its_handle() {
        let mut g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        assert_eq!(m.slot(Slot::Current).unwrap().display_src(), "1.jpg");

        let decoded = ImageHandle::new("https://cdn.test/1.jpg");
        m.image_loaded(1, "1.jpg", decoded.clone(), None, &mut g);
        assert_eq!(m.slot(Slot::Current).unwrap().display_src(), "https://cdn.test/1.jpg");

        // reopening on the same entry picks the handle up from the gallery
        m.set_active(false, None, &g);
        open_at(&mut m, &g, 0);
        let next = m.slot(Slot::Next).unwrap();
        assert!(next.handle.as_ref().unwrap().same_as(&decoded));
        assert_eq!(next.display_src(), "https://cdn.test/1.jpg");
    }

    #[test]
    fn neighbour_load_leaves_spinner() {
        let mut g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        m.adjoining_image_loaded(2, "2.jpg", ImageHandle::new("2.jpg"), None, &mut g);
        assert!(m.spinner_visible());
        assert!(g.get(2).unwrap().loaded);
        assert!(m.slot(Slot::Next).unwrap().loaded);
    }

    #[test]
    fn stale_load_does_not_touch_the_current_slot() {
        let mut g = gallery(5);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        open_at(&mut m, &g, 3);
        m.image_loaded(1, "1.jpg", ImageHandle::new("1.jpg"), None, &mut g);
        assert!(m.spinner_visible());
        assert!(g.get(1).unwrap().loaded);

        // an entry that moved away from that position is left alone
        m.image_loaded(3, "other.jpg", ImageHandle::new("other.jpg"), None, &mut g);
        assert!(!g.get(3).unwrap().loaded);
        assert!(m.spinner_visible());
    }

    #[test]
    fn load_error_notifies_and_clears_spinner() {
        let g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        let effects = m.image_error(1, "1.jpg");
        assert_eq!(
            effects,
            vec![SlideshowEffect::Notify(GalleryEvent::ImageLoadError("1.jpg".into()))]
        );
        assert!(!m.spinner_visible());
        assert!(!m.slot(Slot::Current).unwrap().loaded);
        assert!(m.image_error(4, "4.jpg").is_empty());
    }

    #[test]
    fn wheel_ignores_unloaded_images() {
        let mut g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        assert!(!m.wheel(-100.0, Point::new(500.0, 400.0)));
        assert!(!m.zoom_active());
        assert!(!m.wheel(100.0, Point::new(500.0, 400.0)));

        load_current(&mut m, &mut g, 1);
        assert!(m.wheel(-100.0, Point::new(500.0, 400.0)));
        assert!(m.zoom_active());
        assert!(m.wheel(100.0, Point::new(500.0, 400.0)));
        assert!(!m.zoom_active());
    }

    #[test]
    fn zoom_blocks_swipe_and_pans_instead() {
        let mut g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        load_current(&mut m, &mut g, 1);
        m.dispatch(SlideshowAction::ZoomIn);
        m.dispatch(SlideshowAction::ZoomIn);
        assert!(m.zoom_active());

        m.touch_start(Point::new(500.0, 400.0), 0.0);
        assert!(m.zoom_clicked());
        assert!(m.touch_move(Point::new(500.0, 300.0)));
        assert_eq!(m.zoom().position.y, -100.0);
        assert!(m.touch_end(50.0).is_empty());
        assert!(!m.zoom_clicked());
        assert!(m.zoom_active());
    }

    #[test]
    fn navigation_resets_zoom() {
        let mut g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        load_current(&mut m, &mut g, 1);
        m.dispatch(SlideshowAction::ZoomIn);
        m.navigate_to_previous();
        assert!(!m.zoom_active());
    }

    #[test]
    fn mouse_drag_needs_zoom() {
        let mut g = gallery(3);
        let (mut m, _) = model();
        open_at(&mut m, &g, 1);
        assert!(!m.mouse_down(Point::new(1.0, 1.0)));
        load_current(&mut m, &mut g, 1);
        m.dispatch(SlideshowAction::ZoomIn);
        assert!(m.mouse_down(Point::new(500.0, 400.0)));
        assert!(!m.mouse_move(Point::new(500.0, 450.0), false));
        assert!(m.mouse_move(Point::new(500.0, 450.0), true));
        m.mouse_up();
        assert!(!m.zoom_clicked());
    }

    #[test]
    fn keyboard_handling() {
        let g = gallery(3);
        let (mut m, _) = model();
        assert!(m.key_down("ArrowRight").is_none());
        open_at(&mut m, &g, 1);
        assert_eq!(m.key_down("ArrowDown"), Some(Vec::new()));
        assert!(m.key_down("a").is_none());
        assert_eq!(m.key_down("ArrowRight").unwrap().len(), 2);
        m.finish_transition();

        m.fullscreen_changed(true);
        assert_eq!(m.key_down("Escape"), Some(vec![SlideshowEffect::ExitFullscreen]));
        m.fullscreen_changed(false);
        assert_eq!(
            m.key_down("Escape"),
            Some(vec![
                SlideshowEffect::ResetRoute,
                SlideshowEffect::Notify(GalleryEvent::ResetSlideshow),
            ])
        );
    }

    #[test]
    fn fullscreen_toggle_requires_support() {
        let g = gallery(2);
        let size = Rc::new(Cell::new(Size::new(800.0, 600.0)));
        let mut m = SlideshowModel::new(GalleryConfig::default(), FixedViewport(size), false);
        m.set_active(true, g.get(0), &g);
        assert!(m.dispatch(SlideshowAction::ToggleFullscreen).is_empty());

        let (mut m, _) = model();
        open_at(&mut m, &g, 0);
        assert_eq!(m.dispatch(SlideshowAction::ToggleFullscreen)[0], SlideshowEffect::RequestFullscreen);
        m.fullscreen_changed(true);
        assert_eq!(m.dispatch(SlideshowAction::ToggleFullscreen)[0], SlideshowEffect::ExitFullscreen);
    }

    #[test]
    fn toolbar_toggles_and_reappears_on_open() {
        let g = gallery(2);
        let (mut m, _) = model();
        open_at(&mut m, &g, 0);
        m.dispatch(SlideshowAction::ToggleToolbar);
        assert!(!m.toolbar_visible());
        m.set_active(false, None, &g);
        open_at(&mut m, &g, 1);
        assert!(m.toolbar_visible());
    }

    #[test]
    fn geometry_waits_for_natural_size() {
        let mut g = Gallery::from_items(vec![GalleryItem { src: "a.jpg".into(), ..Default::default() }]);
        let (mut m, _) = model();
        m.set_active(true, g.get(0), &g);
        assert!(m.dimensions().current.is_none());
        assert_eq!(m.slot_rest(Slot::Next), 1000.0);

        m.image_loaded(0, "a.jpg", ImageHandle::new("a.jpg"), Some((1600, 900)), &mut g);
        let d = m.dimensions().current.unwrap();
        assert_eq!((d.width, d.height), (1000.0, 562.5));
        assert_eq!(g.get(0).unwrap().natural_size(), Some((1600, 900)));
    }

    #[test]
    fn resize_keeps_gesture_and_rebounds_zoom() {
        let mut g = gallery(3);
        let (mut m, size) = model();
        open_at(&mut m, &g, 1);
        load_current(&mut m, &mut g, 1);
        m.wheel(-1.0, Point::new(500.0, 0.0));
        m.wheel(-1.0, Point::new(500.0, 0.0));
        m.wheel(-1.0, Point::new(500.0, 0.0));
        let before = m.zoom().position.y;
        assert!(before > 0.0);

        m.touch_start(Point::new(100.0, 100.0), 0.0);
        let touch_before = m.touch().clone();
        size.set(Size::new(500.0, 400.0));
        m.resize();
        assert_eq!(m.dimensions().screen, Size::new(500.0, 400.0));
        assert_eq!(m.touch(), &touch_before);
        let d = m.dimensions().current.unwrap();
        let max_y = (m.zoom().scale * d.height - (d.height + 2.0 * d.offset_height)) / 2.0;
        assert!(m.zoom().position.y <= max_y.max(0.0));
    }
}
