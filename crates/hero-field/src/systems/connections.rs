//! Dashed links between nearby particles, split where a cut is in progress.

use glam::Vec2;
use crate::api::config::{FieldConfig, Palette};
use crate::components::particle::Particle;
use crate::renderer::frame::{DashStyle, DrawCommand, FrameBuffer};
use crate::systems::cutting::CuttingLines;

/// Faintest a link ever gets.
pub const MIN_LINK_OPACITY: f32 = 0.1;
/// Radius of the dot marking where a link is being cut.
pub const CUT_MARKER_RADIUS: f32 = 3.0;

/// Opacity of a link between particles `distance` apart.
pub fn link_opacity(distance: f32, config: &FieldConfig) -> f32 {
    (config.line_opacity * (1.0 - distance / config.connection_distance)).max(MIN_LINK_OPACITY)
}

pub fn dash_style(config: &FieldConfig) -> DashStyle {
    DashStyle {
        dash: config.dash_length,
        gap: config.dash_gap,
        width: config.line_width,
    }
}

/// Emit links for every pair of active particles closer than the connection distance.
pub fn draw_connections(
    particles: &[Particle],
    lines: &CuttingLines,
    config: &FieldConfig,
    palette: &Palette,
    frame: &mut FrameBuffer,
) {
    let style = dash_style(config);
    let visible: Vec<&Particle> = particles.iter().filter(|p| p.is_active()).collect();

    for (i, a) in visible.iter().enumerate() {
        for b in &visible[i + 1..] {
            let delta = a.pos - b.pos;
            let distance = delta.length();
            if distance >= config.connection_distance {
                continue;
            }
            let alpha = link_opacity(distance, config);
            let mut dashed = |from: Vec2, to: Vec2| {
                frame.push(DrawCommand::DashedLine {
                    from,
                    to,
                    style,
                    color: palette.line,
                    alpha,
                })
            };

            match lines.find_pair(a.id, b.id) {
                Some(cut) => {
                    let split = a.pos - delta * cut.progress;
                    dashed(a.pos, split);
                    dashed(b.pos, split + delta * 0.1);
                    frame.push(DrawCommand::Circle {
                        center: split,
                        radius: CUT_MARKER_RADIUS,
                        color: palette.accent,
                        alpha: 1.0,
                    });
                }
                None => dashed(a.pos, b.pos),
            }
        }
    }
}
