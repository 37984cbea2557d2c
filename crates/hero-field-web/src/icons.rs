//! Asynchronous icon rasterization.
//!
//! Each manifest icon is tinted, wrapped in a data URL and handed to an
//! `HtmlImageElement`. Once every image has either loaded or failed, the pool
//! settles: all loaded means `Ready`, any failure means every icon is drawn
//! with one blank placeholder.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use hero_field::{Color, IconKind, IconManifest};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlImageElement;

const BLANK_SVG: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24"/>"#;

/// How the pool settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Ready,
    Fallback,
}

/// Counts load results until every icon has reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTracker {
    total: usize,
    loaded: usize,
    failed: usize,
}

impl LoadTracker {
    pub fn new(total: usize) -> Self {
        Self { total, loaded: 0, failed: 0 }
    }

    /// Record one result. Returns the outcome once the last icon reports.
    pub fn record(&mut self, ok: bool) -> Option<Settled> {
        if self.is_settled() {
            return None;
        }
        if ok {
            self.loaded += 1;
        } else {
            self.failed += 1;
        }
        self.outcome()
    }

    pub fn outcome(&self) -> Option<Settled> {
        if !self.is_settled() {
            None
        } else if self.failed == 0 {
            Some(Settled::Ready)
        } else {
            Some(Settled::Fallback)
        }
    }

    pub fn is_settled(&self) -> bool {
        self.loaded + self.failed >= self.total
    }
}

enum IconState {
    Loading {
        images: Vec<HtmlImageElement>,
        tracker: LoadTracker,
    },
    Ready(Vec<HtmlImageElement>),
    Fallback(HtmlImageElement),
}

/// A DOM object whose event handlers point at Rust closures.
trait Detach {
    fn detach(&self);
}

impl Detach for HtmlImageElement {
    fn detach(&self) {
        self.set_onload(None);
        self.set_onerror(None);
    }
}

/// Targets whose handlers are cleared on drop, so a late event never reaches
/// a dropped closure.
struct Hooked<T: Detach> {
    targets: Vec<T>,
}

impl<T: Detach> Hooked<T> {
    fn new() -> Self {
        Self { targets: Vec::new() }
    }

    fn push(&mut self, target: T) {
        self.targets.push(target);
    }
}

impl<T: Detach> Drop for Hooked<T> {
    fn drop(&mut self) {
        for target in &self.targets {
            target.detach();
        }
    }
}

// Field order matters: `hooked` drops before `callbacks`.
struct PoolInner {
    state: IconState,
    on_settled: Option<Box<dyn FnOnce(Settled)>>,
    hooked: Hooked<HtmlImageElement>,
    // onload/onerror callbacks; they hold only weak references back.
    callbacks: Vec<Closure<dyn FnMut()>>,
}

/// Shared handle to the rasterized icons.
#[derive(Clone)]
pub struct IconPool {
    inner: Rc<RefCell<PoolInner>>,
}

fn data_url(svg: &str) -> String {
    let encoded: String = js_sys::encode_uri_component(svg).into();
    format!("data:image/svg+xml;charset=utf-8,{}", encoded)
}

impl IconPool {
    /// Start loading every manifest icon tinted with `tint`.
    pub fn load(manifest: &IconManifest, tint: Color) -> Result<Self, JsValue> {
        let pool = IconPool {
            inner: Rc::new(RefCell::new(PoolInner {
                state: IconState::Loading {
                    images: Vec::with_capacity(manifest.len()),
                    tracker: LoadTracker::new(manifest.len()),
                },
                on_settled: None,
                hooked: Hooked::new(),
                callbacks: Vec::new(),
            })),
        };

        let css = tint.to_css();
        for (i, icon) in manifest.icons.iter().enumerate() {
            let svg = manifest
                .tinted_svg(IconKind(i as u8), &css)
                .unwrap_or_else(|| icon.svg.clone());
            let image = HtmlImageElement::new()?;

            let onload = {
                let pool = Rc::downgrade(&pool.inner);
                Closure::<dyn FnMut()>::new(move || record(&pool, true))
            };
            let onerror = {
                let pool = Rc::downgrade(&pool.inner);
                let name = icon.name.clone();
                Closure::<dyn FnMut()>::new(move || {
                    log::warn!("hero-field: icon '{}' failed to load", name);
                    record(&pool, false);
                })
            };
            image.set_onload(Some(onload.as_ref().unchecked_ref()));
            image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            image.set_src(&data_url(&svg));

            let mut inner = pool.inner.borrow_mut();
            inner.callbacks.push(onload);
            inner.callbacks.push(onerror);
            inner.hooked.push(image.clone());
            if let IconState::Loading { images, .. } = &mut inner.state {
                images.push(image);
            }
        }
        Ok(pool)
    }

    /// Run `f` once loading settles (immediately if it already has).
    pub fn on_settled(&self, f: impl FnOnce(Settled) + 'static) {
        let settled = self.settled();
        match settled {
            Some(outcome) => f(outcome),
            None => self.inner.borrow_mut().on_settled = Some(Box::new(f)),
        }
    }

    pub fn settled(&self) -> Option<Settled> {
        match &self.inner.borrow().state {
            IconState::Loading { tracker, .. } => tracker.outcome(),
            IconState::Ready(_) => Some(Settled::Ready),
            IconState::Fallback(_) => Some(Settled::Fallback),
        }
    }

    fn record(&self, ok: bool) {
        let outcome = {
            let mut inner = self.inner.borrow_mut();
            let outcome = match &mut inner.state {
                IconState::Loading { tracker, .. } => tracker.record(ok),
                _ => None,
            };
            if let Some(outcome) = outcome {
                inner.settle(outcome);
            }
            outcome.and_then(|o| inner.on_settled.take().map(|f| (f, o)))
        };
        // Called after the borrow ends; the callback may read the pool.
        if let Some((f, outcome)) = outcome {
            f(outcome);
        }
    }

    /// Image for `kind`, if loading has settled.
    pub fn image(&self, kind: IconKind) -> Option<HtmlImageElement> {
        match &self.inner.borrow().state {
            IconState::Loading { .. } => None,
            IconState::Ready(images) => images.get(kind.0 as usize).cloned(),
            IconState::Fallback(blank) => Some(blank.clone()),
        }
    }
}

impl PoolInner {
    fn settle(&mut self, outcome: Settled) {
        let state = std::mem::replace(&mut self.state, IconState::Ready(Vec::new()));
        self.state = match (state, outcome) {
            (IconState::Loading { images, .. }, Settled::Ready) => IconState::Ready(images),
            (_, _) => match blank_image() {
                Ok(blank) => IconState::Fallback(blank),
                Err(_) => {
                    log::error!("hero-field: could not create placeholder icon");
                    IconState::Ready(Vec::new())
                }
            },
        };
        if outcome == Settled::Fallback {
            log::warn!("hero-field: icon loading failed, using blank placeholders");
        }
    }
}

fn record(pool: &Weak<RefCell<PoolInner>>, ok: bool) {
    if let Some(inner) = pool.upgrade() {
        IconPool { inner }.record(ok);
    }
}

fn blank_image() -> Result<HtmlImageElement, JsValue> {
    let image = HtmlImageElement::new_with_width_and_height(24, 24)?;
    image.set_src(&data_url(BLANK_SVG));
    Ok(image)
}
