use yew::prelude::*;

#[derive(Clone, PartialEq)]
pub struct Thumbnail {
    pub index: usize,
    pub src: String,
    pub title: String,
}

#[derive(Properties, PartialEq, Clone)]
pub struct GridProps {
    pub thumbnails: Vec<Thumbnail>,
    pub on_select: Callback<usize>,
    #[prop_or(4)]
    pub columns: u32,
    #[prop_or(8)]
    pub gutter_px: u32,
    /// Item height as a percentage of its width.
    #[prop_or(75)]
    pub item_height_pct: u32,
}

#[function_component(Grid)]
pub fn grid(props: &GridProps) -> Html {
    let columns = props.columns.max(1);
    let gutter = props.gutter_px;
    let basis = format!(
        "calc((100% - 0.1px - {}px) / {})",
        gutter * columns,
        columns
    );
    let items = props.thumbnails.iter().map(|thumb| {
        let onclick = {
            let cb = props.on_select.clone();
            let index = thumb.index;
            Callback::from(move |_: MouseEvent| cb.emit(index))
        };
        let style = format!(
            "position:relative; flex:1 1 {basis}; max-width:{basis}; margin:0 {g}px {g}px 0; overflow:hidden; cursor:pointer; background-image:url(\"{src}\"); background-size:cover; background-position:center center; background-repeat:no-repeat; box-sizing:border-box;",
            basis = basis,
            g = gutter,
            src = thumb.src.replace('"', "%22"),
        );
        html! {
            <div key={thumb.index} title={thumb.title.clone()} style={style} {onclick}>
                <div style={format!("padding-top:{}%;", props.item_height_pct)}></div>
            </div>
        }
    });
    html! {
        <div style={format!("display:flex; flex-direction:row; flex-wrap:wrap; padding:0; margin:0 -{g}px -{g}px 0;", g = gutter)}>
            { for items }
        </div>
    }
}
