//! Pointer pursuit: sustained proximity accumulates until the particle explodes.

use glam::Vec2;
use crate::api::config::FieldConfig;
use crate::components::particle::Particle;

/// Decay runs this many times faster than growth.
pub const PURSUIT_DECAY_FACTOR: f32 = 3.0;

/// Result of one pursuit update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pursuit {
    /// Nobody is chasing and the accumulator is empty.
    Idle,
    /// Accumulator is between zero and the threshold.
    Pursued,
    /// Threshold reached; the accumulator has been reset.
    Triggered,
}

/// Grow the accumulator while the pointer is within the pursuit distance,
/// otherwise decay it toward zero. `pointer` is `None` while the pointer is
/// outside the surface, which only decays.
pub fn track(p: &mut Particle, pointer: Option<Vec2>, config: &FieldConfig, dt: f32) -> Pursuit {
    let close = pointer.is_some_and(|at| p.distance_to(at) < config.pursuit_distance_threshold);
    if close {
        p.pursuit += dt;
    } else {
        p.pursuit = (p.pursuit - dt * PURSUIT_DECAY_FACTOR).max(0.0);
    }

    if close && p.pursuit >= config.pursuit_time_threshold {
        p.pursuit = 0.0;
        Pursuit::Triggered
    } else if p.pursuit > 0.0 {
        Pursuit::Pursued
    } else {
        Pursuit::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{IconKind, ParticleId};

    fn particle() -> Particle {
        Particle::new(ParticleId(0), Vec2::new(400.0, 300.0), 20.0, IconKind(0))
    }

    #[test]
    fn grows_while_close_and_triggers_once() {
        let config = FieldConfig::default();
        let mut p = particle();
        let pointer = Some(Vec2::new(410.0, 300.0));
        let mut triggered = 0;
        for frame in 0..60 {
            match track(&mut p, pointer, &config, 1.0) {
                Pursuit::Triggered => {
                    triggered += 1;
                    assert_eq!(frame, 59);
                }
                state => assert_eq!(state, Pursuit::Pursued),
            }
        }
        assert_eq!(triggered, 1);
        assert_eq!(p.pursuit, 0.0);
    }

    #[test]
    fn decays_three_times_faster_and_never_negative() {
        let config = FieldConfig::default();
        let mut p = particle();
        for _ in 0..30 {
            track(&mut p, Some(Vec2::new(400.0, 300.0)), &config, 1.0);
        }
        assert_eq!(p.pursuit, 30.0);
        track(&mut p, Some(Vec2::new(700.0, 300.0)), &config, 1.0);
        assert_eq!(p.pursuit, 27.0);
        for _ in 0..20 {
            track(&mut p, Some(Vec2::new(700.0, 300.0)), &config, 1.0);
            assert!(p.pursuit >= 0.0);
        }
        assert_eq!(p.pursuit, 0.0);
    }

    #[test]
    fn pointer_outside_decays_gradually() {
        let config = FieldConfig::default();
        let mut p = particle();
        p.pursuit = 40.0;
        assert_eq!(track(&mut p, None, &config, 1.0), Pursuit::Pursued);
        assert_eq!(p.pursuit, 37.0);
        p.pursuit = 100.0;
        assert_ne!(track(&mut p, None, &config, 1.0), Pursuit::Triggered);
    }
}
