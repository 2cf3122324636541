use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    /// Geometry was asked to fit a rectangle with a zero, negative or non-finite side.
    #[error("invalid dimension {width}x{height}")]
    InvalidDimension { width: f64, height: f64 },
    #[error("gallery manifest is malformed: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("element `{0}` not found")]
    MissingElement(String),
}
