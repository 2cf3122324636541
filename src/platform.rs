//! Browser adapters behind the gallery core: window viewport, hash route,
//! fullscreen vendor shim, page scroll lock and the embedded manifest.

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};

use crate::config::{GalleryConfig, GalleryManifest};
use crate::error::GalleryError;
use crate::geometry::{Size, ViewportProvider};
use crate::state::Route;
use crate::util::{clog, cwarn};

pub const MANIFEST_ELEMENT_ID: &str = "sl-gallery-data";

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Reads the window size. The wider of the layout width and `innerWidth`
/// is used so an overlay scrollbar does not shrink the slides.
#[derive(Clone, Copy, Default)]
pub struct WindowViewport;

impl ViewportProvider for WindowViewport {
    fn viewport_size(&self) -> Size {
        let Some(window) = web_sys::window() else {
            return Size::default();
        };
        let read = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let inner_w = read(window.inner_width());
        let inner_h = read(window.inner_height());
        let (client_w, client_h) = window
            .document()
            .and_then(|d| d.document_element())
            .map(|e| (e.client_width() as f64, e.client_height() as f64))
            .unwrap_or((0.0, 0.0));
        Size::new(client_w.max(inner_w), client_h.max(inner_h))
    }
}

// ---- route ---------------------------------------------------------------

/// `#/<prefix>/<index>` → index. Trailing segments are ignored.
pub fn parse_hash(hash: &str, prefix: &str) -> Option<usize> {
    let path = hash.trim_start_matches('#').trim_start_matches('/');
    let mut parts = path.split('/');
    if parts.next()? != prefix {
        return None;
    }
    parts.next()?.parse().ok()
}

pub fn format_hash(prefix: &str, index: usize) -> String {
    format!("#/{}/{}", prefix, index)
}

/// Route stored in the URL fragment.
pub struct HashRoute {
    prefix: String,
}

impl HashRoute {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Route for HashRoute {
    fn current_index(&self) -> Option<usize> {
        let hash = web_sys::window()?.location().hash().ok()?;
        parse_hash(&hash, &self.prefix)
    }

    fn set_index(&mut self, index: Option<usize>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let location = window.location();
        match index {
            Some(i) => {
                if let Err(e) = location.set_hash(&format_hash(&self.prefix, i)) {
                    cwarn(&format!("route: could not set hash: {:?}", e));
                }
            }
            None => {
                // drop the fragment without leaving a bare `#` behind
                let url = format!(
                    "{}{}",
                    location.pathname().unwrap_or_default(),
                    location.search().unwrap_or_default()
                );
                let pushed = window
                    .history()
                    .and_then(|h| h.push_state_with_url(&JsValue::NULL, "", Some(&url)));
                if let Err(e) = pushed {
                    cwarn(&format!("route: could not clear hash: {:?}", e));
                }
            }
        }
    }
}

// ---- fullscreen ----------------------------------------------------------

/// Property and event names of one fullscreen API flavour.
#[derive(Debug, PartialEq, Eq)]
pub struct FullscreenVendor {
    pub request: &'static str,
    pub exit: &'static str,
    pub element: &'static str,
    pub enabled: &'static str,
    pub change: &'static str,
}

pub static FULLSCREEN_VENDORS: [FullscreenVendor; 4] = [
    FullscreenVendor {
        request: "requestFullscreen",
        exit: "exitFullscreen",
        element: "fullscreenElement",
        enabled: "fullscreenEnabled",
        change: "fullscreenchange",
    },
    FullscreenVendor {
        request: "webkitRequestFullscreen",
        exit: "webkitExitFullscreen",
        element: "webkitFullscreenElement",
        enabled: "webkitFullscreenEnabled",
        change: "webkitfullscreenchange",
    },
    FullscreenVendor {
        request: "mozRequestFullScreen",
        exit: "mozCancelFullScreen",
        element: "mozFullScreenElement",
        enabled: "mozFullScreenEnabled",
        change: "mozfullscreenchange",
    },
    FullscreenVendor {
        request: "msRequestFullscreen",
        exit: "msExitFullscreen",
        element: "msFullscreenElement",
        enabled: "msFullscreenEnabled",
        change: "MSFullscreenChange",
    },
];

/// First flavour whose exit method the document exposes.
pub fn pick_vendor(has: impl Fn(&str) -> bool) -> Option<&'static FullscreenVendor> {
    FULLSCREEN_VENDORS.iter().find(|v| has(v.exit))
}

#[derive(Clone)]
pub struct FullscreenApi {
    document: Document,
    vendor: &'static FullscreenVendor,
}

impl FullscreenApi {
    pub fn detect() -> Option<Self> {
        let document = document()?;
        let target: &JsValue = document.as_ref();
        let vendor = pick_vendor(|name| Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false))?;
        Some(Self { document, vendor })
    }

    fn get(&self, name: &str) -> Option<JsValue> {
        Reflect::get(self.document.as_ref(), &JsValue::from_str(name)).ok()
    }

    pub fn enabled(&self) -> bool {
        self.get(self.vendor.enabled).and_then(|v| v.as_bool()).unwrap_or(false)
    }

    pub fn change_event(&self) -> &'static str {
        self.vendor.change
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn element(&self) -> Option<Element> {
        self.get(self.vendor.element)?.dyn_into::<Element>().ok()
    }

    pub fn is_element_fullscreen(&self, element: &Element) -> bool {
        self.element().is_some_and(|e| &e == element)
    }

    pub fn request(&self, element: &Element) -> Result<(), JsValue> {
        call_method(element.as_ref(), self.vendor.request)
    }

    pub fn exit(&self) -> Result<(), JsValue> {
        if self.element().is_none() {
            return Ok(());
        }
        call_method(self.document.as_ref(), self.vendor.exit)
    }
}

fn call_method(target: &JsValue, name: &str) -> Result<(), JsValue> {
    let method: Function = Reflect::get(target, &JsValue::from_str(name))?.dyn_into()?;
    method.call0(target)?;
    Ok(())
}

// ---- page ----------------------------------------------------------------

pub fn lock_page_scroll(lock: bool) {
    let Some(body) = document().and_then(|d| d.body()) else {
        return;
    };
    let style = body.style();
    let result = if lock {
        style.set_property("overflow", "hidden")
    } else {
        style.remove_property("overflow").map(|_| ())
    };
    if let Err(e) = result {
        cwarn(&format!("page: could not toggle scroll lock: {:?}", e));
    }
}

pub fn focus(element: &HtmlElement) {
    let _ = element.focus();
}

/// Hover styling only for devices without touch input.
pub fn hover_enabled() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let touch = Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false)
        && window.navigator().max_touch_points() > 0;
    !touch
}

// ---- manifest ------------------------------------------------------------

pub fn read_manifest() -> Result<GalleryManifest, GalleryError> {
    let element = document()
        .and_then(|d| d.get_element_by_id(MANIFEST_ELEMENT_ID))
        .ok_or_else(|| GalleryError::MissingElement(MANIFEST_ELEMENT_ID.to_string()))?;
    GalleryManifest::from_json(&element.text_content().unwrap_or_default())
}

/// Manifest for start-up. Never fails: no manifest gives the demo content,
/// a broken one an empty gallery.
pub fn load_manifest() -> GalleryManifest {
    match read_manifest() {
        Ok(manifest) => {
            clog(&format!("gallery: {} images from manifest", manifest.images.len()));
            manifest
        }
        Err(GalleryError::MissingElement(id)) => {
            clog(&format!("gallery: no #{} element, using demo images", id));
            GalleryManifest::demo()
        }
        Err(e) => {
            cwarn(&format!("gallery: {}", e));
            GalleryManifest { config: GalleryConfig::default(), images: Vec::new() }
        }
    }
}
