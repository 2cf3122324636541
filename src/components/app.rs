use super::gallery::Gallery;
use crate::model::GalleryEvent;
use crate::platform::load_manifest;
use crate::util::{clog, cwarn};
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let manifest = use_memo((), |_| load_manifest());

    // Host-facing notifications end up in the console
    let on_event = Callback::from(|event: GalleryEvent| match event {
        GalleryEvent::ImageLoadError(src) => cwarn(&format!("gallery: could not load {}", src)),
        other => clog(&format!("gallery: {:?}", other)),
    });

    html! {<div style="max-width:1200px; margin:0 auto; padding:16px; box-sizing:border-box; overflow:hidden;">
        <Gallery
            config={manifest.config.clone()}
            images={manifest.images.clone()}
            {on_event} />
    </div>}
}
