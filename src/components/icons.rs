use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Icon {
    ChevronLeft,
    ChevronRight,
    Close,
    Fullscreen,
    FullscreenExit,
    ZoomIn,
    ZoomOut,
}

impl Icon {
    pub fn path(self) -> &'static str {
        match self {
            Icon::ChevronLeft => "M15.41 7.41L14 6l-6 6 6 6 1.41-1.41L10.83 12z",
            Icon::ChevronRight => "M10 6L8.59 7.41 13.17 12l-4.58 4.59L10 18l6-6z",
            Icon::Close => {
                "M19 6.41L17.59 5 12 10.59 6.41 5 5 6.41 10.59 12 5 17.59 6.41 19 12 13.41 17.59 19 19 17.59 13.41 12z"
            }
            Icon::Fullscreen => {
                "M7 14H5v5h5v-2H7v-3zm-2-4h2V7h3V5H5v5zm12 7h-3v2h5v-5h-2v3zM14 5v2h3v3h2V5h-5z"
            }
            Icon::FullscreenExit => {
                "M5 16h3v3h2v-5H5v2zm3-8H5v2h5V5H8v3zm6 11h2v-3h3v-2h-5v5zm2-11V5h-2v5h5V8h-3z"
            }
            Icon::ZoomIn => "M19 13h-6v6h-2v-6H5v-2h6V5h2v6h6v2z",
            Icon::ZoomOut => "M19 13H5v-2h14v2z",
        }
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct IconButtonProps {
    pub icon: Icon,
    pub label: AttrValue,
    #[prop_or_default]
    pub onclick: Option<Callback<MouseEvent>>,
    #[prop_or_default]
    pub style: AttrValue,
    #[prop_or(false)]
    pub hover: bool,
}

/// Round 48px icon button.
#[function_component(IconButton)]
pub fn icon_button(props: &IconButtonProps) -> Html {
    let hovered = use_state(|| false);
    let enter = {
        let hovered = hovered.clone();
        let enabled = props.hover;
        Callback::from(move |_| hovered.set(enabled))
    };
    let leave = {
        let hovered = hovered.clone();
        Callback::from(move |_| hovered.set(false))
    };
    let background = if *hovered { "rgba(99,99,99,0.3)" } else { "rgba(0,0,0,0.3)" };
    let onclick = props.onclick.clone().map(|cb| {
        let hovered = hovered.clone();
        Callback::from(move |e: MouseEvent| {
            // hover state would otherwise stick after the element moves away
            hovered.set(false);
            cb.emit(e);
        })
    });
    html! {
        <button
            title={props.label.clone()}
            aria-label={props.label.clone()}
            {onclick}
            onmouseenter={enter}
            onmouseleave={leave}
            style={format!("width:48px; height:48px; padding:12px; border:0; border-radius:50%; color:#fff; background:{}; cursor:pointer; {}", background, props.style)}>
            <svg viewBox="0 0 24 24" width="24" height="24" style="display:block; fill:currentColor;">
                <path d={props.icon.path()}></path>
            </svg>
        </button>
    }
}
