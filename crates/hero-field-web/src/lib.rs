//! Browser bridge: mounts a [`HeroField`] on a canvas inside the host element
//! and drives it from `requestAnimationFrame`.
//!
//! ```ignore
//! import init, { HeroBackground } from "./hero_field_web.js";
//! await init();
//! const background = new HeroBackground(JSON.stringify({ maxParticles: 20 }));
//! // later
//! background.destroy();
//! ```

pub mod canvas;
pub mod icons;
pub mod runner;

pub use canvas::Canvas2dRenderer;
pub use icons::{IconPool, LoadTracker, Settled};
pub use runner::FieldRunner;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use hero_field::{FieldConfig, HeroField, IconManifest, InputEvent};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

type SharedRunner = Rc<RefCell<FieldRunner<Canvas2dRenderer>>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// An event listener registered on the page, removed on destroy.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// Everything created by a successful mount.
struct Mounted {
    window: Window,
    canvas: HtmlCanvasElement,
    runner: SharedRunner,
    frame_callback: FrameCallback,
    frame_handle: Rc<Cell<Option<i32>>>,
    listeners: Vec<Listener>,
    _icons: icons::IconPool,
}

/// One animated hero background. Instances are fully independent.
#[wasm_bindgen]
pub struct HeroBackground {
    mounted: Option<Mounted>,
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn host_size(host: &HtmlElement) -> (u32, u32) {
    (host.client_width().max(0) as u32, host.client_height().max(0) as u32)
}

/// Create the full-bleed canvas behind the host's content.
fn mount_canvas(document: &Document, host: &HtmlElement, id: &str) -> Result<HtmlCanvasElement, JsValue> {
    let canvas = document
        .create_element("canvas")?
        .dyn_into::<HtmlCanvasElement>()?;
    canvas.set_id(id);
    let style = canvas.style();
    for (name, value) in [
        ("position", "absolute"),
        ("top", "0"),
        ("left", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("z-index", "0"),
        ("pointer-events", "none"),
    ] {
        style.set_property(name, value)?;
    }
    host.prepend_with_node_1(&canvas)?;
    host.style().set_property("position", "relative")?;
    Ok(canvas)
}

#[wasm_bindgen]
impl HeroBackground {
    /// Mount a background. `options` is a JSON object of field options and
    /// `icons` an optional JSON icon manifest (the built-in icons otherwise).
    /// A missing host element is logged and yields an inert instance.
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>, icons: Option<String>) -> Result<HeroBackground, JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let mut config = match options {
            Some(json) => FieldConfig::from_json(&json).map_err(to_js)?,
            None => FieldConfig::default(),
        };
        let manifest = match icons {
            Some(json) => IconManifest::from_json(&json).map_err(to_js)?,
            None => IconManifest::builtin(),
        };
        if config.seed.is_none() {
            config.seed = Some((js_sys::Math::random() * u32::MAX as f64) as u64);
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let host = match document.query_selector(&config.host_selector)? {
            Some(element) => element.dyn_into::<HtmlElement>()?,
            None => {
                log::error!("hero-field: host element '{}' not found", config.host_selector);
                return Ok(HeroBackground { mounted: None });
            }
        };

        let canvas = mount_canvas(&document, &host, &config.selector)?;
        let (width, height) = host_size(&host);
        canvas.set_width(width);
        canvas.set_height(height);

        let icon_pool = icons::IconPool::load(&manifest, config.palette().line)?;
        let renderer = Canvas2dRenderer::new(&canvas, icon_pool.clone())?;
        let field = HeroField::from_manifest(config, &manifest, width as f32, height as f32)
            .map_err(to_js)?;
        let runner: SharedRunner = Rc::new(RefCell::new(FieldRunner::new(field, renderer)));

        {
            let runner = Rc::downgrade(&runner);
            icon_pool.on_settled(move |outcome| {
                if let Some(runner) = runner.upgrade() {
                    runner.borrow_mut().start(outcome);
                }
            });
        }

        let listeners = Self::listen(&window, &host, &runner)?;
        let (frame_callback, frame_handle) = Self::start_loop(&window, &runner)?;

        log::info!("hero-field: mounted on '{}' ({}x{})", host.tag_name(), width, height);
        Ok(HeroBackground {
            mounted: Some(Mounted {
                window,
                canvas,
                runner,
                frame_callback,
                frame_handle,
                listeners,
                _icons: icon_pool,
            }),
        })
    }

    fn listen(window: &Window, host: &HtmlElement, runner: &SharedRunner) -> Result<Vec<Listener>, JsValue> {
        let host_target: &EventTarget = host.as_ref();
        let mut listeners = Vec::with_capacity(4);

        listeners.push(Listener::attach(host_target, "mousemove", {
            let runner = Rc::downgrade(runner);
            let host = host.clone();
            move |event: Event| {
                let (Some(runner), Some(mouse)) = (runner.upgrade(), event.dyn_ref::<MouseEvent>()) else {
                    return;
                };
                let rect = host.get_bounding_client_rect();
                let x = mouse.client_x() as f64 - rect.left();
                let y = mouse.client_y() as f64 - rect.top();
                runner.borrow_mut().push_input(InputEvent::PointerMove {
                    x: x as f32,
                    y: y as f32,
                });
            }
        })?);

        for (kind, input) in [
            ("mouseenter", InputEvent::PointerEnter),
            ("mouseleave", InputEvent::PointerLeave),
        ] {
            let runner = Rc::downgrade(runner);
            listeners.push(Listener::attach(host_target, kind, move |_| {
                if let Some(runner) = runner.upgrade() {
                    runner.borrow_mut().push_input(input);
                }
            })?);
        }

        listeners.push(Listener::attach(window.as_ref(), "resize", {
            let runner = Rc::downgrade(runner);
            let host = host.clone();
            move |_| {
                if let Some(runner) = runner.upgrade() {
                    let (width, height) = host_size(&host);
                    runner.borrow_mut().resize(width, height);
                }
            }
        })?);

        Ok(listeners)
    }

    fn start_loop(
        window: &Window,
        runner: &SharedRunner,
    ) -> Result<(FrameCallback, Rc<Cell<Option<i32>>>), JsValue> {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));

        let next = Rc::downgrade(&callback);
        let runner = Rc::downgrade(runner);
        let window_ = window.clone();
        let handle_ = handle.clone();
        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |now: f64| {
            let Some(runner) = runner.upgrade() else {
                return;
            };
            runner.borrow_mut().tick(now);
            let Some(next) = next.upgrade() else {
                return;
            };
            if let Some(cb) = next.borrow().as_ref() {
                match window_.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => handle_.set(Some(id)),
                    Err(err) => log::error!("hero-field: requestAnimationFrame failed: {:?}", err),
                }
            };
        }));

        if let Some(cb) = callback.borrow().as_ref() {
            handle.set(Some(window.request_animation_frame(cb.as_ref().unchecked_ref())?));
        }
        Ok((callback, handle))
    }

    /// False when the host element was missing or after `destroy`.
    pub fn active(&self) -> bool {
        self.mounted.is_some()
    }

    /// Number of live particles (0 until icons finish loading).
    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.mounted
            .as_ref()
            .map(|m| m.runner.borrow().field().particles().len())
            .unwrap_or(0)
    }

    /// Stop the loop, detach listeners, remove the canvas and drop all state.
    /// Pending respawns never fire afterwards.
    pub fn destroy(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };
        if let Some(id) = mounted.frame_handle.take() {
            let _ = mounted.window.cancel_animation_frame(id);
        }
        mounted.frame_callback.borrow_mut().take();
        for listener in &mounted.listeners {
            listener.detach();
        }
        mounted.runner.borrow_mut().teardown();
        mounted.canvas.remove();
        log::info!("hero-field: destroyed");
    }
}

impl Drop for HeroBackground {
    fn drop(&mut self) {
        self.destroy();
    }
}
