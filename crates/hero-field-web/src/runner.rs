use hero_field::{HeroField, InputEvent, InputQueue, Renderer};
use crate::icons::Settled;

/// Drives a [`HeroField`] from host callbacks and replays each frame on a renderer.
///
/// The simulation starts only after the icons settle; until then pointer and
/// resize events are still applied, but no particles exist and nothing is drawn.
pub struct FieldRunner<R: Renderer> {
    field: HeroField,
    renderer: R,
    input: InputQueue,
    started: bool,
    torn_down: bool,
}

impl<R: Renderer> FieldRunner<R> {
    pub fn new(field: HeroField, renderer: R) -> Self {
        Self {
            field,
            renderer,
            input: InputQueue::new(),
            started: false,
            torn_down: false,
        }
    }

    /// Icons finished loading (or fell back): populate and begin animating.
    pub fn start(&mut self, icons: Settled) {
        if self.started || self.torn_down {
            return;
        }
        if icons == Settled::Fallback {
            log::warn!("hero-field: starting with placeholder icons");
        }
        self.field.populate();
        self.started = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Host surface changed size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.push_input(InputEvent::Resize {
            width: width as f32,
            height: height as f32,
        });
    }

    /// Run one display frame at host time `now_ms`.
    pub fn tick(&mut self, now_ms: f64) {
        if self.torn_down {
            return;
        }
        if !self.started {
            for event in self.input.drain() {
                self.field.handle_input(event);
            }
            return;
        }
        let frame = self.field.tick(now_ms, &mut self.input);
        self.renderer.draw(frame);
    }

    /// Stop for good, discarding all simulation state.
    pub fn teardown(&mut self) {
        self.torn_down = true;
        self.input.drain();
        self.field.teardown();
    }

    pub fn is_running(&self) -> bool {
        self.started && !self.torn_down
    }

    pub fn field(&self) -> &HeroField {
        &self.field
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
