// Gallery container: owns the image sequence and maps the route index to the
// active image.
use crate::config::GalleryItem;
use crate::model::{Gallery, ImageEntry};
use crate::util::clog;

/// Index-bearing location the slideshow is driven from. The browser build
/// keeps it in the URL fragment.
pub trait Route {
    fn current_index(&self) -> Option<usize>;
    fn set_index(&mut self, index: Option<usize>);
}

pub struct GalleryContainer<R: Route> {
    route: R,
    gallery: Gallery,
    active: bool,
    active_index: Option<usize>,
}

impl<R: Route> GalleryContainer<R> {
    pub fn new(route: R, gallery: Gallery) -> Self {
        let mut container = Self { route, gallery, active: true, active_index: None };
        container.route_changed();
        container
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn gallery_mut(&mut self) -> &mut Gallery {
        &mut self.gallery
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn active_image(&self) -> Option<&ImageEntry> {
        self.active_index.and_then(|i| self.gallery.get(i))
    }

    /// Re-reads the route. An index past the end of the sequence means no
    /// active image.
    pub fn route_changed(&mut self) -> Option<usize> {
        let index = self.route.current_index();
        self.active_index = index.filter(|i| *i < self.gallery.len());
        if index.is_some() && self.active_index.is_none() {
            clog(&format!("gallery: route index {:?} out of range", index));
        }
        self.active_index
    }

    /// Grid selection.
    pub fn select(&mut self, index: usize) -> Option<usize> {
        self.route.set_index(Some(index));
        self.route_changed()
    }

    pub fn reset_route(&mut self) {
        self.route.set_index(None);
        self.active_index = None;
    }

    pub fn replace_items(&mut self, items: Vec<GalleryItem>) -> Option<usize> {
        self.gallery.replace(items);
        if self.gallery.is_empty() {
            clog("gallery: no images");
        }
        self.route_changed()
    }
}
