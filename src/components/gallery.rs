use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use super::grid::{Grid, Thumbnail};
use super::overlay::Overlay;
use super::slideshow::{ImageFailure, ImageLoad, Slideshow, SlotView};
use crate::config::{GalleryConfig, GalleryItem};
use crate::geometry::Point;
use crate::model::{Gallery as ImageSequence, GalleryEvent, ImageHandle};
use crate::platform::{self, FullscreenApi, HashRoute, WindowViewport};
use crate::state::{GalleryContainer, Slot, SlideshowAction, SlideshowEffect, SlideshowModel};
use crate::util::{clog, cwarn};

#[derive(Properties, PartialEq, Clone)]
pub struct GalleryProps {
    #[prop_or_default]
    pub config: GalleryConfig,
    pub images: Vec<GalleryItem>,
    /// Slideshow may open only while set.
    #[prop_or(true)]
    pub active: bool,
    #[prop_or_default]
    pub on_event: Callback<GalleryEvent>,
}

type Container = GalleryContainer<HashRoute>;
type Model = SlideshowModel<WindowViewport>;

/// Shared handles the event listeners and timers work through.
#[derive(Clone)]
struct Host {
    container: Rc<RefCell<Container>>,
    model: Rc<RefCell<Model>>,
    fullscreen: Option<FullscreenApi>,
    transition_timer: Rc<RefCell<Option<Timeout>>>,
    settle_timer: Rc<RefCell<Option<Timeout>>>,
    on_event: Rc<RefCell<Callback<GalleryEvent>>>,
    root: NodeRef,
    redraw: UseForceUpdateHandle,
}

impl Host {
    fn run(&self, effects: Vec<SlideshowEffect>) {
        for effect in effects {
            match effect {
                SlideshowEffect::ScheduleTransitionEnd { after_ms } => {
                    let host = self.clone();
                    let timer = Timeout::new(after_ms, move || {
                        let effects = host.model.borrow_mut().finish_transition();
                        host.run(effects);
                        host.redraw.force_update();
                    });
                    *self.transition_timer.borrow_mut() = Some(timer);
                }
                SlideshowEffect::ScheduleSettle { after_ms } => {
                    let host = self.clone();
                    let timer = Timeout::new(after_ms, move || {
                        host.model.borrow_mut().settle();
                        host.redraw.force_update();
                    });
                    *self.settle_timer.borrow_mut() = Some(timer);
                }
                SlideshowEffect::SetRoute(index) => {
                    self.container.borrow_mut().select(index);
                    self.sync();
                }
                SlideshowEffect::ResetRoute => {
                    self.container.borrow_mut().reset_route();
                    self.sync();
                }
                SlideshowEffect::RequestFullscreen => {
                    if let (Some(fs), Some(root)) = (&self.fullscreen, self.root.cast::<Element>()) {
                        if let Err(e) = fs.request(&root) {
                            cwarn(&format!("fullscreen: request failed: {:?}", e));
                        }
                    }
                }
                SlideshowEffect::ExitFullscreen => {
                    if let Some(fs) = &self.fullscreen {
                        if let Err(e) = fs.exit() {
                            cwarn(&format!("fullscreen: exit failed: {:?}", e));
                        }
                    }
                }
                SlideshowEffect::LockPageScroll(lock) => platform::lock_page_scroll(lock),
                SlideshowEffect::Focus => {
                    // the root is still hidden until this render lands
                    let root = self.root.clone();
                    Timeout::new(0, move || {
                        if let Some(el) = root.cast::<HtmlElement>() {
                            platform::focus(&el);
                        }
                    })
                    .forget();
                }
                SlideshowEffect::Notify(event) => {
                    let cb = self.on_event.borrow().clone();
                    cb.emit(event);
                }
            }
        }
    }

    /// Pushes the container's active image into the slideshow.
    fn sync(&self) {
        let effects = {
            let container = self.container.borrow();
            self.model.borrow_mut().set_active(
                container.is_active(),
                container.active_image(),
                container.gallery(),
            )
        };
        self.run(effects);
        self.redraw.force_update();
    }

    fn dispatch(&self, action: SlideshowAction) {
        let effects = self.model.borrow_mut().dispatch(action);
        self.run(effects);
        self.redraw.force_update();
    }

    fn image_loaded(&self, load: ImageLoad) {
        {
            let mut container = self.container.borrow_mut();
            let mut model = self.model.borrow_mut();
            let handle = ImageHandle::new(&load.resolved);
            let gallery = container.gallery_mut();
            match load.slot {
                Slot::Current => {
                    model.image_loaded(load.index, &load.src, handle, load.natural, gallery)
                }
                _ => model.adjoining_image_loaded(
                    load.index,
                    &load.src,
                    handle,
                    load.natural,
                    gallery,
                ),
            }
        }
        self.redraw.force_update();
    }

    fn image_failed(&self, failure: ImageFailure) {
        let effects = self.model.borrow_mut().image_error(failure.index, &failure.src);
        self.run(effects);
        self.redraw.force_update();
    }
}

fn touch_point(e: &TouchEvent) -> Option<Point> {
    let touches = e.touches();
    let t = touches.item(0).or_else(|| e.changed_touches().item(0))?;
    Some(Point::new(t.client_x() as f64, t.client_y() as f64))
}

fn mouse_point(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

#[function_component(Gallery)]
pub fn gallery(props: &GalleryProps) -> Html {
    let root = use_node_ref();
    let redraw = use_force_update();
    let fullscreen = use_memo((), |_| FullscreenApi::detect());
    let container = {
        let prefix = props.config.prefix.clone();
        let images = props.images.clone();
        use_mut_ref(move || {
            GalleryContainer::new(HashRoute::new(prefix), ImageSequence::from_items(images))
        })
    };
    let model = {
        let config = props.config.clone();
        let enabled = (*fullscreen).as_ref().is_some_and(|fs| fs.enabled());
        use_mut_ref(move || SlideshowModel::new(config, WindowViewport, enabled))
    };
    let transition_timer = use_mut_ref(|| None::<Timeout>);
    let settle_timer = use_mut_ref(|| None::<Timeout>);
    let on_event = use_mut_ref(|| props.on_event.clone());
    *on_event.borrow_mut() = props.on_event.clone();
    let hover_enabled = use_memo((), |_| platform::hover_enabled());

    let host = Host {
        container: container.clone(),
        model: model.clone(),
        fullscreen: (*fullscreen).clone(),
        transition_timer,
        settle_timer,
        on_event,
        root: root.clone(),
        redraw,
    };

    // Backing sequence changes
    {
        let host = host.clone();
        use_effect_with(props.images.clone(), move |images| {
            host.container.borrow_mut().replace_items(images.clone());
            host.sync();
            || ()
        });
    }
    // Active flag
    {
        let host = host.clone();
        use_effect_with(props.active, move |active| {
            host.container.borrow_mut().set_active(*active);
            host.sync();
            || ()
        });
    }
    // Window, document and slideshow listeners
    {
        let host = host.clone();
        use_effect_with((), move |_| {
            let mut listeners: Vec<EventListener> = Vec::new();
            let owned = EventListenerOptions::enable_prevent_default();
            if let Some(window) = web_sys::window() {
                {
                    let host = host.clone();
                    listeners.push(EventListener::new(&window, "hashchange", move |_| {
                        host.container.borrow_mut().route_changed();
                        host.sync();
                    }));
                }
                {
                    let host = host.clone();
                    listeners.push(EventListener::new_with_options(
                        &window,
                        "keydown",
                        owned,
                        move |e| {
                            let Some(e) = e.dyn_ref::<KeyboardEvent>() else {
                                return;
                            };
                            let handled = host.model.borrow_mut().key_down(&e.key());
                            if let Some(effects) = handled {
                                e.prevent_default();
                                host.run(effects);
                                host.redraw.force_update();
                            }
                        },
                    ));
                }
                {
                    let host = host.clone();
                    listeners.push(EventListener::new(&window, "resize", move |_| {
                        host.model.borrow_mut().resize();
                        host.redraw.force_update();
                    }));
                }
                {
                    let host = host.clone();
                    listeners.push(EventListener::new_with_options(
                        &window,
                        "mousemove",
                        owned,
                        move |e| {
                            let Some(e) = e.dyn_ref::<MouseEvent>() else {
                                return;
                            };
                            let held = e.buttons() & 1 == 1;
                            if host.model.borrow_mut().mouse_move(mouse_point(e), held) {
                                e.prevent_default();
                                host.redraw.force_update();
                            }
                        },
                    ));
                }
                {
                    let host = host.clone();
                    listeners.push(EventListener::new(&window, "mouseup", move |_| {
                        let was_dragging = host.model.borrow().zoom_clicked();
                        host.model.borrow_mut().mouse_up();
                        if was_dragging {
                            host.redraw.force_update();
                        }
                    }));
                }
            }
            if let Some(fs) = host.fullscreen.clone() {
                let host = host.clone();
                let target = fs.document().clone();
                listeners.push(EventListener::new(&target, fs.change_event(), move |_| {
                    let active = host
                        .root
                        .cast::<Element>()
                        .is_some_and(|root| fs.is_element_fullscreen(&root));
                    clog(&format!("fullscreen: {}", if active { "entered" } else { "left" }));
                    host.model.borrow_mut().fullscreen_changed(active);
                    host.redraw.force_update();
                }));
            }
            if let Some(root) = host.root.cast::<HtmlElement>() {
                {
                    let host = host.clone();
                    listeners.push(EventListener::new_with_options(&root, "wheel", owned, move |e| {
                        let Some(e) = e.dyn_ref::<WheelEvent>() else {
                            return;
                        };
                        if host.model.borrow_mut().wheel(e.delta_y(), mouse_point(e)) {
                            e.prevent_default();
                            host.redraw.force_update();
                        }
                    }));
                }
                {
                    let host = host.clone();
                    listeners.push(EventListener::new_with_options(
                        &root,
                        "mousedown",
                        owned,
                        move |e| {
                            let Some(e) = e.dyn_ref::<MouseEvent>() else {
                                return;
                            };
                            if e.button() == 0 && host.model.borrow_mut().mouse_down(mouse_point(e)) {
                                e.prevent_default();
                                host.redraw.force_update();
                            }
                        },
                    ));
                }
                {
                    let host = host.clone();
                    listeners.push(EventListener::new(&root, "touchstart", move |e| {
                        let Some(point) = e.dyn_ref::<TouchEvent>().and_then(touch_point) else {
                            return;
                        };
                        host.model.borrow_mut().touch_start(point, platform::now_ms());
                    }));
                }
                {
                    let host = host.clone();
                    listeners.push(EventListener::new_with_options(
                        &root,
                        "touchmove",
                        owned,
                        move |e| {
                            let Some(e) = e.dyn_ref::<TouchEvent>() else {
                                return;
                            };
                            let Some(point) = touch_point(e) else {
                                return;
                            };
                            if host.model.borrow_mut().touch_move(point) {
                                e.prevent_default();
                                host.redraw.force_update();
                            }
                        },
                    ));
                }
                for name in ["touchend", "touchcancel"] {
                    let host = host.clone();
                    listeners.push(EventListener::new(&root, name, move |_| {
                        let effects = host.model.borrow_mut().touch_end(platform::now_ms());
                        host.run(effects);
                        host.redraw.force_update();
                    }));
                }
            }
            move || {
                drop(listeners);
                platform::lock_page_scroll(false);
            }
        });
    }

    let on_select = {
        let host = host.clone();
        Callback::from(move |index: usize| {
            host.container.borrow_mut().select(index);
            host.sync();
        })
    };
    let on_action = {
        let host = host.clone();
        Callback::from(move |action: SlideshowAction| host.dispatch(action))
    };
    let on_load = {
        let host = host.clone();
        Callback::from(move |load: ImageLoad| host.image_loaded(load))
    };
    let on_error = {
        let host = host.clone();
        Callback::from(move |failure: ImageFailure| host.image_failed(failure))
    };

    let thumbnails: Vec<Thumbnail> = container
        .borrow()
        .gallery()
        .entries()
        .iter()
        .map(|e| Thumbnail {
            index: e.index,
            src: e.thumbnail_url().to_string(),
            title: e.title.clone(),
        })
        .collect();

    let m = model.borrow();
    let slots: Vec<SlotView> = [Slot::Previous, Slot::Current, Slot::Next]
        .into_iter()
        .map(|slot| SlotView {
            slot,
            image: m.slot(slot).cloned(),
            rest: m.slot_rest(slot),
            transform: m.slot_transform(slot),
        })
        .collect();
    let (title, caption, has_caption) = m
        .slot(Slot::Current)
        .map(|c| (c.title.clone(), c.caption.clone(), c.has_caption))
        .unwrap_or_default();

    html! {<>
        <Grid {thumbnails} {on_select} />
        <Slideshow
            root={root.clone()}
            open={m.is_open()}
            {slots}
            transition_ms={m.transition_ms()}
            spinner={m.spinner_visible()}
            zoom_active={m.zoom_active()}
            zoom_clicked={m.zoom_clicked()}
            {on_load}
            {on_error}>
            <Overlay
                {title}
                {caption}
                {has_caption}
                toolbar_visible={m.toolbar_visible()}
                has_previous={m.has_previous()}
                has_next={m.has_next()}
                fullscreen_enabled={m.fullscreen_enabled()}
                fullscreen_active={m.fullscreen_active()}
                zoom_active={m.zoom_active()}
                hover_enabled={*hover_enabled}
                {on_action} />
        </Slideshow>
    </>}
}
