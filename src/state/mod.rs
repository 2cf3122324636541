pub mod gallery;
pub mod slideshow;
pub mod touch;
pub mod zoom;

pub use gallery::{GalleryContainer, Route};
pub use slideshow::{Slot, SlideshowAction, SlideshowEffect, SlideshowModel};
