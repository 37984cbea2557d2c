use crate::api::config::{FieldConfig, Palette};
use crate::components::particle::Particle;
use crate::renderer::frame::{DrawCommand, FrameBuffer};
use crate::systems::effects::ExplosionPool;

/// Sparks are drawn slightly fainter than their fade value.
pub const SPARK_ALPHA_SCALE: f32 = 0.9;

/// Emit the icon sprite for one particle.
pub fn draw_particle(p: &Particle, config: &FieldConfig, palette: &Palette, frame: &mut FrameBuffer) {
    frame.push(DrawCommand::Icon {
        kind: p.icon,
        center: p.pos,
        size: p.size,
        rotation: p.rotation,
        alpha: config.particle_alpha,
        fallback: palette.primary,
    });
}

/// Emit a filled circle per spark of every live explosion.
pub fn draw_explosions(pool: &ExplosionPool, palette: &Palette, frame: &mut FrameBuffer) {
    for explosion in pool.iter() {
        for spark in &explosion.sparks {
            frame.push(DrawCommand::Circle {
                center: explosion.spark_position(spark),
                radius: spark.radius(),
                color: palette.accent,
                alpha: spark.alpha * SPARK_ALPHA_SCALE,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{IconKind, ParticleId};
    use crate::core::rng::Rng;
    use glam::Vec2;

    #[test]
    fn icon_carries_alpha_and_fallback() {
        let config = FieldConfig::default();
        let palette = config.palette();
        let p = Particle::new(ParticleId(0), Vec2::new(10.0, 10.0), 20.0, IconKind(0));
        let mut frame = FrameBuffer::new();
        draw_particle(&p, &config, &palette, &mut frame);
        assert_eq!(frame.icon_count(), 1);
        match &frame.commands[0] {
            DrawCommand::Icon { alpha, fallback, .. } => {
                assert_eq!(*alpha, 0.7);
                assert_eq!(*fallback, palette.primary);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn sparks_drawn_in_accent_color() {
        let config = FieldConfig::default();
        let palette = config.palette();
        let mut pool = ExplosionPool::new();
        let mut rng = Rng::new(11);
        pool.spawn(Vec2::new(5.0, 5.0), ParticleId(0), 30.0, 4, &mut rng);
        let mut frame = FrameBuffer::new();
        draw_explosions(&pool, &palette, &mut frame);
        assert_eq!(frame.len(), 4);
        for command in frame.iter() {
            match command {
                DrawCommand::Circle { color, alpha, .. } => {
                    assert_eq!(*color, palette.accent);
                    assert!((*alpha - 0.9).abs() < 1e-6);
                }
                other => panic!("unexpected command {:?}", other),
            }
        }
    }
}
