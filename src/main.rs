mod components;
mod config;
mod error;
mod geometry;
mod model;
mod platform;
mod state;
mod util;

fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<components::app::App>::new().render();
}
