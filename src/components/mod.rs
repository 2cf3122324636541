pub mod app;
pub mod gallery;
pub mod grid;
pub mod icons;
pub mod overlay;
pub mod slideshow;
