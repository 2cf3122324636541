use super::icons::{Icon, IconButton};
use crate::state::SlideshowAction;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct OverlayProps {
    pub title: AttrValue,
    pub caption: AttrValue,
    pub has_caption: bool,
    pub toolbar_visible: bool,
    pub has_previous: bool,
    pub has_next: bool,
    pub fullscreen_enabled: bool,
    pub fullscreen_active: bool,
    pub zoom_active: bool,
    pub hover_enabled: bool,
    pub on_action: Callback<SlideshowAction>,
}

const TOOLBAR: &str = "position:fixed; left:0; right:0; z-index:2; display:flex; align-items:center; gap:4px; padding:0 8px; box-sizing:border-box; background:rgba(0,0,0,0.65); color:#fff; transition:top 0.35s ease, bottom 0.35s ease, opacity 0.35s ease, visibility 0.35s ease;";

#[function_component(Overlay)]
pub fn overlay(props: &OverlayProps) -> Html {
    let action = |a: SlideshowAction| {
        let cb = props.on_action.clone();
        Callback::from(move |_: MouseEvent| cb.emit(a))
    };
    let visible = props.toolbar_visible;

    let header_style = format!(
        "{} height:64px; top:{}; visibility:{};",
        TOOLBAR,
        if visible { "0" } else { "-64px" },
        if visible { "visible" } else { "hidden" }
    );
    let show_footer = visible && props.has_caption;
    let footer_style = format!(
        "{} min-height:64px; justify-content:center; text-align:center; font-size:14px; color:#ddd; bottom:{}; opacity:{}; visibility:{};",
        TOOLBAR,
        if show_footer { "0" } else { "-64px" },
        if show_footer { "1" } else { "0" },
        if show_footer { "visible" } else { "hidden" }
    );
    let close_style = format!(
        "position:absolute; top:8px; z-index:2; transition:right 0.35s ease, visibility 0.35s ease; right:{}; visibility:{};",
        if visible { "-48px" } else { "8px" },
        if visible { "hidden" } else { "visible" }
    );
    // panning a zoomed image must not click through to navigation
    let blocks = if props.zoom_active { "none" } else { "auto" };
    let block = |left: &str, width: &str, shown: bool| {
        format!(
            "position:fixed; top:0; bottom:0; z-index:1; left:{}; width:{}; pointer-events:{}; display:{};",
            left,
            width,
            blocks,
            if shown { "block" } else { "none" }
        )
    };
    let fullscreen_icon =
        if props.fullscreen_active { Icon::FullscreenExit } else { Icon::Fullscreen };

    html! {<>
        <div style={header_style}>
            <div style="flex:1; font-size:18px; white-space:nowrap; overflow:hidden; text-overflow:ellipsis;">{ props.title.clone() }</div>
            <IconButton icon={Icon::ZoomOut} label="Zoom out" hover={props.hover_enabled} onclick={action(SlideshowAction::ZoomOut)} />
            <IconButton icon={Icon::ZoomIn} label="Zoom in" hover={props.hover_enabled} onclick={action(SlideshowAction::ZoomIn)} />
            { if props.fullscreen_enabled {
                html! { <IconButton icon={fullscreen_icon} label="Toggle fullscreen" hover={props.hover_enabled} onclick={action(SlideshowAction::ToggleFullscreen)} /> }
            } else { html! {} } }
            <IconButton icon={Icon::Close} label="Close" hover={props.hover_enabled} onclick={action(SlideshowAction::ResetSlideshow)} />
        </div>
        <div style={footer_style}>
            <div>{ props.caption.clone() }</div>
        </div>
        <IconButton icon={Icon::Close} label="Close" hover={props.hover_enabled} style={close_style} onclick={action(SlideshowAction::ResetSlideshow)} />
        <div style={block("30%", "40%", true)} onclick={action(SlideshowAction::ToggleToolbar)}></div>
        <div style={block("0", "30%", props.has_previous)} onclick={action(SlideshowAction::NavigateToPrevious)}>
            <IconButton icon={Icon::ChevronLeft} label="Previous image" hover={props.hover_enabled} style="position:absolute; left:8px; top:50%; transform:translateY(-50%);" />
        </div>
        <div style={block("70%", "30%", props.has_next)} onclick={action(SlideshowAction::NavigateToNext)}>
            <IconButton icon={Icon::ChevronRight} label="Next image" hover={props.hover_enabled} style="position:absolute; right:8px; top:50%; transform:translateY(-50%);" />
        </div>
    </>}
}
