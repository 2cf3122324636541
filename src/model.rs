//! Gallery data model: the ordered image sequence and its entries.

use std::rc::Rc;

use crate::config::GalleryItem;

/// Notifications the widget raises for the host page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GalleryEvent {
    NavigateToPrevious,
    NavigateToNext,
    ResetSlideshow,
    ToggleFullscreen,
    ZoomIn,
    ZoomOut,
    /// Carries the source URL that failed.
    ImageLoadError(String),
}

/// Handle to a decoded asset, captured the first time an image renders so
/// later displays reuse it. Compared by reference.
#[derive(Clone, Debug)]
pub struct ImageHandle(Rc<str>);

impl ImageHandle {
    pub fn new(resolved_src: &str) -> Self {
        Self(Rc::from(resolved_src))
    }

    pub fn src(&self) -> &str {
        &self.0
    }

    pub fn same_as(&self, other: &ImageHandle) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same_as(other)
    }
}

#[derive(Clone, Debug)]
pub struct ImageEntry {
    /// Position in the sequence, reassigned on every mutation.
    pub index: usize,
    pub source_url: String,
    pub preview_url: Option<String>,
    pub natural_width: Option<u32>,
    pub natural_height: Option<u32>,
    /// Sticky once set.
    pub loaded: bool,
    pub handle: Option<ImageHandle>,
    pub title: String,
    pub caption: String,
    pub previous: Option<usize>,
    pub next: Option<usize>,
}

impl ImageEntry {
    pub fn from_item(item: GalleryItem) -> Self {
        Self {
            index: 0,
            source_url: item.src,
            preview_url: item.preview,
            natural_width: item.width.filter(|w| *w > 0),
            natural_height: item.height.filter(|h| *h > 0),
            loaded: false,
            handle: None,
            title: item.title,
            caption: item.caption,
            previous: None,
            next: None,
        }
    }

    pub fn has_previous_image(&self) -> bool {
        self.previous.is_some()
    }

    pub fn has_next_image(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_caption(&self) -> bool {
        !self.caption.trim().is_empty()
    }

    pub fn natural_size(&self) -> Option<(u32, u32)> {
        Some((self.natural_width?, self.natural_height?))
    }

    /// Grid thumbnail source: the preview when present, else the full image.
    pub fn thumbnail_url(&self) -> &str {
        self.preview_url.as_deref().unwrap_or(&self.source_url)
    }

    /// Marks the entry loaded and keeps the first handle seen. Returns false
    /// when it was already loaded.
    pub fn mark_loaded(&mut self, handle: ImageHandle) -> bool {
        if self.handle.is_none() {
            self.handle = Some(handle);
        }
        if self.loaded {
            return false;
        }
        self.loaded = true;
        true
    }

    /// Stores the natural size. Returns true when it changed.
    pub fn set_natural_size(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let changed = self.natural_size() != Some((width, height));
        self.natural_width = Some(width);
        self.natural_height = Some(height);
        changed
    }
}

/// Ordered image sequence with back/forward links.
#[derive(Clone, Debug, Default)]
pub struct Gallery {
    entries: Vec<ImageEntry>,
}

impl Gallery {
    pub fn from_items(items: Vec<GalleryItem>) -> Self {
        let mut g = Self { entries: items.into_iter().map(ImageEntry::from_item).collect() };
        g.relink();
        g
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ImageEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ImageEntry> {
        self.entries.get_mut(index)
    }

    pub fn entries(&self) -> &[ImageEntry] {
        &self.entries
    }

    pub fn previous_of(&self, index: usize) -> Option<&ImageEntry> {
        self.get(index)?.previous.and_then(|i| self.get(i))
    }

    pub fn next_of(&self, index: usize) -> Option<&ImageEntry> {
        self.get(index)?.next.and_then(|i| self.get(i))
    }

    /// Replaces the whole sequence. Entries whose source survives keep their
    /// loaded flag, natural size and handle.
    pub fn replace(&mut self, items: Vec<GalleryItem>) {
        let old = std::mem::take(&mut self.entries);
        self.entries = items
            .into_iter()
            .map(|item| {
                let mut entry = ImageEntry::from_item(item);
                if let Some(prev) = old.iter().find(|o| o.source_url == entry.source_url) {
                    entry.loaded = prev.loaded;
                    entry.handle = prev.handle.clone();
                    if entry.natural_size().is_none() {
                        entry.natural_width = prev.natural_width;
                        entry.natural_height = prev.natural_height;
                    }
                }
                entry
            })
            .collect();
        self.relink();
    }

    /// Inserts at `index`, clamped to the end of the sequence.
    pub fn insert(&mut self, index: usize, item: GalleryItem) {
        let at = index.min(self.entries.len());
        self.entries.insert(at, ImageEntry::from_item(item));
        self.relink();
    }

    pub fn remove(&mut self, index: usize) -> Option<ImageEntry> {
        if index >= self.entries.len() {
            return None;
        }
        let removed = self.entries.remove(index);
        self.relink();
        Some(removed)
    }

    /// Moves the entry at `from` to position `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if from >= self.entries.len() || to >= self.entries.len() {
            return false;
        }
        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        self.relink();
        true
    }

    fn relink(&mut self) {
        let n = self.entries.len();
        for (i, entry) in self.entries.iter_mut().enumerate() {
            entry.index = i;
            entry.previous = i.checked_sub(1);
            entry.next = if i + 1 < n { Some(i + 1) } else { None };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(src: &str) -> GalleryItem {
        GalleryItem { src: src.into(), ..Default::default() }
    }

    fn gallery(n: usize) -> Gallery {
        Gallery::from_items((0..n).map(|i| item(&format!("{i}.jpg"))).collect())
    }

    fn assert_linked(g: &Gallery) {
        let n = g.len();
        for (i, e) in g.entries().iter().enumerate() {
            assert_eq!(e.index, i);
            if i == 0 {
                assert!(!e.has_previous_image());
            } else {
                assert_eq!(g.previous_of(i).map(|p| p.index), Some(i - 1));
            }
            if i + 1 == n {
                assert!(!e.has_next_image());
            } else {
                assert_eq!(g.next_of(i).map(|p| p.index), Some(i + 1));
            }
        }
    }

    #[test]
    fn sequence_is_linked() {
        let g = gallery(5);
        assert_linked(&g);
        assert_eq!(g.next_of(1).unwrap().source_url, "2.jpg");
        assert_eq!(g.previous_of(1).unwrap().source_url, "0.jpg");
    }

    #[test]
    fn single_entry_has_no_neighbours() {
        let g = gallery(1);
        let e = g.get(0).unwrap();
        assert!(!e.has_previous_image());
        assert!(!e.has_next_image());
    }

    #[test]
    fn mutations_relink() {
        let mut g = gallery(4);
        g.insert(1, item("new.jpg"));
        assert_linked(&g);
        assert_eq!(g.get(1).unwrap().source_url, "new.jpg");

        let removed = g.remove(0).unwrap();
        assert_eq!(removed.source_url, "0.jpg");
        assert_linked(&g);
        assert_eq!(g.get(0).unwrap().source_url, "new.jpg");
        assert!(g.remove(10).is_none());

        assert!(g.reorder(0, 3));
        assert_linked(&g);
        assert_eq!(g.get(3).unwrap().source_url, "new.jpg");
        assert!(!g.reorder(0, 4));

        g.insert(99, item("tail.jpg"));
        assert_eq!(g.get(g.len() - 1).unwrap().source_url, "tail.jpg");
        assert_linked(&g);
    }

    #[test]
    fn replace_keeps_load_state_of_surviving_sources() {
        let mut g = gallery(3);
        let handle = ImageHandle::new("blob:1");
        g.get_mut(1).unwrap().mark_loaded(handle.clone());
        g.get_mut(1).unwrap().set_natural_size(640, 480);

        g.replace(vec![item("1.jpg"), item("9.jpg")]);
        assert_linked(&g);
        let kept = g.get(0).unwrap();
        assert!(kept.loaded);
        assert!(kept.handle.as_ref().unwrap().same_as(&handle));
        assert_eq!(kept.natural_size(), Some((640, 480)));
        assert!(!g.get(1).unwrap().loaded);
    }

    #[test]
    fn load_marking_is_idempotent() {
        let mut e = ImageEntry::from_item(item("a.jpg"));
        let first = ImageHandle::new("a.jpg");
        assert!(e.mark_loaded(first.clone()));
        assert!(!e.mark_loaded(ImageHandle::new("a.jpg")));
        assert!(e.loaded);
        assert!(e.handle.as_ref().unwrap().same_as(&first));
    }

    #[test]
    fn zero_sizes_are_ignored() {
        let e = ImageEntry::from_item(GalleryItem {
            src: "a.jpg".into(),
            width: Some(0),
            height: Some(10),
            ..Default::default()
        });
        assert_eq!(e.natural_size(), None);
        let mut e = e;
        assert!(!e.set_natural_size(0, 10));
        assert!(e.set_natural_size(10, 10));
        assert!(!e.set_natural_size(10, 10));
    }

    #[test]
    fn thumbnail_prefers_preview() {
        let mut e = ImageEntry::from_item(item("a.jpg"));
        assert_eq!(e.thumbnail_url(), "a.jpg");
        e.preview_url = Some("a_small.jpg".into());
        assert_eq!(e.thumbnail_url(), "a_small.jpg");
        assert!(!e.has_caption());
        e.caption = "  ".into();
        assert!(!e.has_caption());
    }
}
