//! Widget configuration and the start-up manifest listing gallery images.

use serde::{Deserialize, Serialize};

use crate::error::GalleryError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Route prefix, the `i` in `#/i/3`.
    pub prefix: String,
    pub max_zoom: f64,
    /// Scale change per wheel tick, relative to the current scale.
    pub wheel_zoom_factor: f64,
    /// Scale change per toolbar zoom button press, relative to the current scale.
    pub button_zoom_factor: f64,
    pub transition_ms: u32,
    pub cancel_ms: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            prefix: "i".into(),
            max_zoom: 5.0,
            wheel_zoom_factor: 0.25,
            button_zoom_factor: 0.5,
            transition_ms: 250,
            cancel_ms: 150,
        }
    }
}

/// One gallery item as the host page describes it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryItem {
    pub src: String,
    /// Small placeholder shown in the grid and while the full image loads.
    pub preview: Option<String>,
    pub title: String,
    pub caption: String,
    /// Natural size when the host already knows it.
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryManifest {
    pub config: GalleryConfig,
    pub images: Vec<GalleryItem>,
}

impl GalleryManifest {
    pub fn from_json(raw: &str) -> Result<Self, GalleryError> {
        let mut manifest: GalleryManifest = serde_json::from_str(raw)?;
        manifest.config.max_zoom = manifest.config.max_zoom.max(1.0);
        Ok(manifest)
    }

    /// Demo content used when the page embeds no manifest.
    pub fn demo() -> Self {
        let sizes = [(1600, 900), (900, 1350), (1200, 1200), (2048, 768), (1024, 768)];
        let images = sizes
            .iter()
            .enumerate()
            .map(|(i, (w, h))| GalleryItem {
                src: format!("https://picsum.photos/id/{}/{}/{}", 10 + i, w, h),
                preview: Some(format!("https://picsum.photos/id/{}/{}/{}", 10 + i, w / 8, h / 8)),
                title: format!("Photo {}", i + 1),
                caption: if i % 2 == 0 { format!("{}x{} sample", w, h) } else { String::new() },
                width: Some(*w),
                height: Some(*h),
            })
            .collect();
        Self { config: GalleryConfig::default(), images }
    }
}
