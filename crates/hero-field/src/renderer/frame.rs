use glam::Vec2;
use crate::api::types::IconKind;

/// An sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (leading `#` optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |i: usize, len: usize| u8::from_str_radix(hex.get(i..i + len)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            3 => {
                let expand = |v: u8| v * 17;
                Some(Self::rgb(
                    expand(channel(0, 1)?),
                    expand(channel(1, 1)?),
                    expand(channel(2, 1)?),
                ))
            }
            _ => None,
        }
    }

    /// CSS `#rrggbb` form.
    pub fn to_css(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Dash pattern and stroke width for links.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashStyle {
    pub dash: f32,
    pub gap: f32,
    pub width: f32,
}

/// One drawing operation, replayed in order by a [`Renderer`](super::Renderer).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Erase the whole surface.
    Clear { width: f32, height: f32 },
    /// Dashed straight segment.
    DashedLine {
        from: Vec2,
        to: Vec2,
        style: DashStyle,
        color: Color,
        alpha: f32,
    },
    /// Filled circle.
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
        alpha: f32,
    },
    /// Icon sprite centered at `center`, rotated by `rotation` degrees.
    /// Renderers without an image for `kind` fill a `fallback` square instead.
    Icon {
        kind: IconKind,
        center: Vec2,
        size: f32,
        rotation: f32,
        alpha: f32,
        fallback: Color,
    },
}

/// Ordered draw commands for a single frame.
pub struct FrameBuffer {
    pub commands: Vec<DrawCommand>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            commands: Vec::with_capacity(256),
        }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter()
    }

    /// Number of icon sprites in the frame.
    pub fn icon_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Icon { .. }))
            .count()
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}
