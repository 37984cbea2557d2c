use hero_field::{DashStyle, DrawCommand, DrawStats, FrameBuffer, Renderer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use crate::icons::IconPool;

/// Replays frames onto a 2D canvas context.
pub struct Canvas2dRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    icons: IconPool,
    /// Draw failures are logged once, not every frame.
    reported_failure: bool,
}

impl Canvas2dRenderer {
    pub fn new(canvas: &HtmlCanvasElement, icons: IconPool) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
            icons,
            reported_failure: false,
        })
    }

    fn set_dash(&self, style: Option<&DashStyle>) -> Result<(), JsValue> {
        let segments = js_sys::Array::new();
        if let Some(style) = style {
            segments.push(&JsValue::from_f64(style.dash as f64));
            segments.push(&JsValue::from_f64(style.gap as f64));
        }
        self.ctx.set_line_dash(&segments)
    }

    fn replay(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Clear { width, height } => {
                ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
            }
            DrawCommand::DashedLine { from, to, style, color, alpha } => {
                ctx.begin_path();
                self.set_dash(Some(style))?;
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(style.width as f64);
                ctx.set_global_alpha(*alpha as f64);
                ctx.stroke();
                self.set_dash(None)?;
                ctx.set_global_alpha(1.0);
            }
            DrawCommand::Circle { center, radius, color, alpha } => {
                ctx.begin_path();
                ctx.arc(
                    center.x as f64,
                    center.y as f64,
                    radius.max(0.0) as f64,
                    0.0,
                    std::f64::consts::TAU,
                )?;
                ctx.set_fill_style_str(&color.to_css());
                ctx.set_global_alpha(*alpha as f64);
                ctx.fill();
                ctx.set_global_alpha(1.0);
            }
            DrawCommand::Icon { kind, center, size, rotation, alpha, fallback } => {
                let half = (*size as f64) / 2.0;
                ctx.save();
                let drawn = (|| -> Result<(), JsValue> {
                    ctx.translate(center.x as f64, center.y as f64)?;
                    ctx.rotate((*rotation as f64).to_radians())?;
                    ctx.set_global_alpha(*alpha as f64);
                    match self.icons.image(*kind) {
                        Some(image) => ctx.draw_image_with_html_image_element_and_dw_and_dh(
                            &image,
                            -half,
                            -half,
                            *size as f64,
                            *size as f64,
                        ),
                        None => {
                            ctx.set_fill_style_str(&fallback.to_css());
                            ctx.fill_rect(-half, -half, *size as f64, *size as f64);
                            Ok(())
                        }
                    }
                })();
                ctx.restore();
                drawn?;
            }
        }
        Ok(())
    }
}

impl Renderer for Canvas2dRenderer {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn draw(&mut self, frame: &FrameBuffer) -> DrawStats {
        let mut stats = DrawStats::default();
        for command in frame.iter() {
            match self.replay(command) {
                Ok(()) => stats.drawn += 1,
                Err(err) => {
                    stats.failed += 1;
                    if !self.reported_failure {
                        log::warn!("hero-field: draw failed: {:?}", err);
                        self.reported_failure = true;
                    }
                }
            }
        }
        stats
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }
}
