pub mod frame;
pub mod traits;

// Re-export key types for convenient access
pub use frame::{Color, DashStyle, DrawCommand, FrameBuffer};
pub use traits::{DrawStats, Renderer};
