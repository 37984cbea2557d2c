//! Renderer trait: the seam between the headless simulation and a host surface.
//!
//! The simulation never touches pixels. Each frame it fills a [`FrameBuffer`]
//! and a backend (Canvas2D in the web bridge, a recorder in tests) replays it.

use super::frame::FrameBuffer;

/// Counters from a draw call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Commands replayed successfully.
    pub drawn: u32,
    /// Commands the backend could not execute.
    pub failed: u32,
}

/// Rendering backend for [`FrameBuffer`]s.
///
/// # Example Implementation
///
/// ```ignore
/// struct Canvas2dRenderer {
///     ctx: web_sys::CanvasRenderingContext2d,
///     // ...
/// }
///
/// impl Renderer for Canvas2dRenderer {
///     fn backend(&self) -> &'static str { "canvas2d" }
///
///     fn draw(&mut self, frame: &FrameBuffer) -> DrawStats {
///         // Replay commands onto the context...
///     }
///
///     fn resize(&mut self, width: u32, height: u32) {
///         // Resize the backing canvas...
///     }
/// }
/// ```
pub trait Renderer {
    /// Backend identifier (e.g., "canvas2d").
    fn backend(&self) -> &'static str;

    /// Replay a complete frame, in command order.
    fn draw(&mut self, frame: &FrameBuffer) -> DrawStats;

    /// Handle a surface resize.
    fn resize(&mut self, width: u32, height: u32);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::frame::DrawCommand;

    /// Records the size it was given and counts commands.
    struct CountingRenderer {
        size: (u32, u32),
    }

    impl Renderer for CountingRenderer {
        fn backend(&self) -> &'static str {
            "counting"
        }

        fn draw(&mut self, frame: &FrameBuffer) -> DrawStats {
            DrawStats {
                drawn: frame.len() as u32,
                failed: 0,
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.size = (width, height);
        }
    }

    #[test]
    fn renderer_replays_every_command() {
        let mut renderer = CountingRenderer { size: (0, 0) };
        let mut frame = FrameBuffer::new();
        frame.push(DrawCommand::Clear { width: 800.0, height: 600.0 });
        let stats = renderer.draw(&frame);
        assert_eq!(stats, DrawStats { drawn: 1, failed: 0 });
        renderer.resize(1024, 768);
        assert_eq!(renderer.size, (1024, 768));
        assert_eq!(renderer.backend(), "counting");
    }
}
