use crate::geometry::Transform;
use crate::state::Slot;
use crate::state::slideshow::SlotImage;
use crate::util::px;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;
use yew::prelude::*;

/// What one slot needs for rendering.
#[derive(Clone, PartialEq)]
pub struct SlotView {
    pub slot: Slot,
    pub image: Option<SlotImage>,
    /// Horizontal resting offset in px.
    pub rest: f64,
    pub transform: Transform,
}

/// An `<img>` finished loading.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageLoad {
    pub slot: Slot,
    pub index: usize,
    pub src: String,
    /// Resolved URL the browser decoded.
    pub resolved: String,
    pub natural: Option<(u32, u32)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImageFailure {
    pub index: usize,
    pub src: String,
}

#[derive(Properties, PartialEq, Clone)]
pub struct SlideshowProps {
    pub root: NodeRef,
    pub open: bool,
    pub slots: Vec<SlotView>,
    pub transition_ms: Option<u32>,
    pub spinner: bool,
    pub zoom_active: bool,
    pub zoom_clicked: bool,
    pub on_load: Callback<ImageLoad>,
    pub on_error: Callback<ImageFailure>,
    #[prop_or_default]
    pub children: Html,
}

const SPINNER_CSS: &str = "@keyframes sl-gallery-spin { to { transform: rotate(360deg); } }";

#[function_component(Slideshow)]
pub fn slideshow(props: &SlideshowProps) -> Html {
    let root_style = format!(
        "position:fixed; inset:0; z-index:1000; overflow:hidden; background:#000; outline:none; touch-action:none; user-select:none; display:{};",
        if props.open { "block" } else { "none" }
    );
    let cursor = if props.zoom_clicked {
        "grabbing"
    } else if props.zoom_active {
        "grab"
    } else {
        "default"
    };
    let transition = match props.transition_ms {
        Some(ms) => format!("transform {}ms ease-out", ms),
        None => "none".to_string(),
    };

    let slots = props.slots.iter().map(|view| {
        let style = format!(
            "position:absolute; top:0; width:100%; height:100%; left:{}; transform:{}; transform-origin:{}; transition:{}; cursor:{};",
            px(view.rest),
            view.transform.css(),
            view.transform.origin_css(),
            transition,
            cursor
        );
        let content = match &view.image {
            Some(image) => render_image(view.slot, image, &props.on_load, &props.on_error),
            None => html! {},
        };
        html! { <div key={format!("{:?}", view.slot)} style={style}>{ content }</div> }
    });

    html! {
        <div ref={props.root.clone()} tabindex="-1" style={root_style}>
            <style>{ SPINNER_CSS }</style>
            { for slots }
            { if props.spinner {
                html! { <div style="position:absolute; left:50%; top:50%; width:40px; height:40px; margin:-20px 0 0 -20px; border:3px solid rgba(255,255,255,0.25); border-top-color:#fff; border-radius:50%; animation:sl-gallery-spin 0.8s linear infinite; pointer-events:none;"></div> }
            } else { html! {} } }
            { props.children.clone() }
        </div>
    }
}

fn render_image(
    slot: Slot,
    image: &SlotImage,
    on_load: &Callback<ImageLoad>,
    on_error: &Callback<ImageFailure>,
) -> Html {
    let onload = {
        let on_load = on_load.clone();
        let index = image.index;
        let src = image.source_url.clone();
        Callback::from(move |e: Event| {
            let Some(img) = e.target().and_then(|t| t.dyn_into::<HtmlImageElement>().ok()) else {
                return;
            };
            let natural = match (img.natural_width(), img.natural_height()) {
                (0, _) | (_, 0) => None,
                (w, h) => Some((w, h)),
            };
            on_load.emit(ImageLoad {
                slot,
                index,
                src: src.clone(),
                resolved: img.current_src(),
                natural,
            });
        })
    };
    let onerror = {
        let on_error = on_error.clone();
        let index = image.index;
        let src = image.source_url.clone();
        Callback::from(move |_: Event| on_error.emit(ImageFailure { index, src: src.clone() }))
    };
    let fill = "position:absolute; inset:0; width:100%; height:100%; object-fit:contain; pointer-events:none;";
    let preview = match (&image.preview_url, image.loaded) {
        (Some(preview), false) => html! {
            <img src={preview.clone()} alt="" draggable="false" style={format!("{} filter:blur(4px);", fill)} />
        },
        _ => html! {},
    };
    html! {<>
        { preview }
        <img
            key={image.source_url.clone()}
            src={image.display_src().to_string()}
            alt={image.title.clone()}
            draggable="false"
            {onload}
            {onerror}
            style={fill} />
    </>}
}
