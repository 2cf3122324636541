//! Image fitting math and the transform values applied to slideshow slots.

use crate::error::GalleryError;
use crate::util::px;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Source of the current viewport size. The browser build reads the window,
/// tests supply a fixed size.
pub trait ViewportProvider {
    fn viewport_size(&self) -> Size;
}

/// Largest rectangle with the source aspect ratio that fits inside the box.
pub fn contain_fit(
    source_width: f64,
    source_height: f64,
    box_width: f64,
    box_height: f64,
) -> Result<Size, GalleryError> {
    let valid_source = |v: f64| v.is_finite() && v > 0.0;
    if !valid_source(source_width) || !valid_source(source_height) {
        return Err(GalleryError::InvalidDimension { width: source_width, height: source_height });
    }
    let valid_box = |v: f64| v.is_finite() && v >= 0.0;
    if !valid_box(box_width) || !valid_box(box_height) {
        return Err(GalleryError::InvalidDimension { width: box_width, height: box_height });
    }
    let ratio = source_width / source_height;
    let (mut width, mut height);
    if ratio >= 1.0 {
        width = box_width;
        height = width / ratio;
        if height > box_height {
            height = box_height;
            width = height * ratio;
        }
    } else {
        height = box_height;
        width = height * ratio;
        if width > box_width {
            width = box_width;
            height = width / ratio;
        }
    }
    Ok(Size { width, height })
}

/// Contain-fit size of one slot image plus its symmetric letterbox offsets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SlotDimensions {
    pub width: f64,
    pub height: f64,
    pub offset_width: f64,
    pub offset_height: f64,
}

impl SlotDimensions {
    /// `None` while the natural size is unknown; the caller retries once it arrives.
    pub fn fit(natural: Option<(u32, u32)>, screen: Size) -> Option<Self> {
        let (w, h) = natural?;
        let fitted = contain_fit(w as f64, h as f64, screen.width, screen.height).ok()?;
        Some(Self {
            width: fitted.width,
            height: fitted.height,
            offset_width: (screen.width - fitted.width) / 2.0,
            offset_height: (screen.height - fitted.height) / 2.0,
        })
    }

    /// Horizontal shift that takes the rendered pixels fully off-screen.
    pub fn travel(&self) -> f64 {
        self.width + self.offset_width
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportDimensions {
    pub screen: Size,
    pub current: Option<SlotDimensions>,
    pub previous: Option<SlotDimensions>,
    pub next: Option<SlotDimensions>,
}

impl ViewportDimensions {
    pub fn compute(
        screen: Size,
        current: Option<(u32, u32)>,
        previous: Option<(u32, u32)>,
        next: Option<(u32, u32)>,
    ) -> Self {
        Self {
            screen,
            current: SlotDimensions::fit(current, screen),
            previous: SlotDimensions::fit(previous, screen),
            next: SlotDimensions::fit(next, screen),
        }
    }

    fn travel_of(&self, slot: Option<SlotDimensions>) -> f64 {
        slot.map(|d| d.travel()).unwrap_or(self.screen.width)
    }

    pub fn current_travel(&self) -> f64 {
        self.travel_of(self.current)
    }

    /// Resting x position of the previous slot, just past the left edge.
    pub fn previous_rest(&self) -> f64 {
        -self.travel_of(self.previous)
    }

    /// Resting x position of the next slot, just past the right edge.
    pub fn next_rest(&self) -> f64 {
        self.travel_of(self.next)
    }

    /// Dimensions used to bound zoom. An image of unknown size is treated as
    /// filling the whole screen.
    pub fn current_or_screen(&self) -> SlotDimensions {
        self.current.unwrap_or(SlotDimensions {
            width: self.screen.width,
            height: self.screen.height,
            offset_width: 0.0,
            offset_height: 0.0,
        })
    }
}

/// Translate + scale applied to a slot element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    pub origin: Option<Point>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform =
        Transform { translate_x: 0.0, translate_y: 0.0, scale: 1.0, origin: None };

    pub fn translate_x(x: f64) -> Self {
        Self { translate_x: x, ..Self::IDENTITY }
    }

    pub fn scale_at(scale: f64, origin: Point) -> Self {
        Self { scale, origin: Some(origin), ..Self::IDENTITY }
    }

    pub fn is_identity(&self) -> bool {
        self.translate_x == 0.0 && self.translate_y == 0.0 && self.scale == 1.0
    }

    /// Value for the CSS `transform` property; empty for identity.
    pub fn css(&self) -> String {
        if self.is_identity() {
            return String::new();
        }
        let mut out = format!("translate({}, {})", px(self.translate_x), px(self.translate_y));
        if self.scale != 1.0 {
            out.push_str(&format!(" scale({:.4})", self.scale));
        }
        out
    }

    /// Value for the CSS `transform-origin` property; empty means element centre.
    pub fn origin_css(&self) -> String {
        match self.origin {
            Some(p) => format!("{} {}", px(p.x), px(p.y)),
            None => String::new(),
        }
    }
}

/// Transforms for the three slideshow slots.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SlotTransforms {
    pub current: Transform,
    pub previous: Transform,
    pub next: Transform,
}
