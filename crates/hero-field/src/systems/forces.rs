//! Velocity contributions applied to every active particle each frame,
//! followed by integration.
//!
//! Order per particle: neighbor repulsion, pointer repulsion, edge avoidance,
//! cruise + wobble, then [`integrate`].

use glam::Vec2;
use std::f32::consts::FRAC_PI_2;
use crate::api::config::FieldConfig;
use crate::components::particle::Particle;
use crate::core::math::{clamp_speed, enforce_min_speed, heading, lerp, lerp_angle};
use crate::core::rng::Rng;
use crate::core::space::SimulationSpace;

/// Minimum center distance before two particles push each other apart.
pub fn repulsion_distance(config: &FieldConfig, a: &Particle, b: &Particle) -> f32 {
    let multiplier = if a.icon == b.icon {
        config.same_icon_repulsion_multiplier
    } else {
        1.0
    };
    ((a.size + b.size) / 2.0 + config.min_distance_between_particles) * multiplier
}

/// Sum of pushes on `particles[index]` from every other active particle.
pub fn neighbor_repulsion(particles: &[Particle], index: usize, config: &FieldConfig, dt: f32) -> Vec2 {
    let Some(p) = particles.get(index) else {
        return Vec2::ZERO;
    };
    if p.exploding {
        return Vec2::ZERO;
    }

    let mut push = Vec2::ZERO;
    for other in particles {
        if other.id == p.id || other.exploding {
            continue;
        }
        let delta = p.pos - other.pos;
        let distance = delta.length().max(1.0);
        let min = repulsion_distance(config, p, other);
        if distance < min {
            let strength = if p.icon == other.icon {
                config.repulsion_strength * 1.5
            } else {
                config.repulsion_strength
            };
            let t = (min - distance) / min;
            let force = t * t * strength * 50.0 * dt;
            push += delta.try_normalize().unwrap_or(Vec2::X) * force;
        }
    }
    push
}

/// Flee the pointer when it is within the repulsion radius; otherwise relax
/// the transient speed back toward the base speed.
/// `pointer` is `None` while the pointer is outside the surface.
pub fn pointer_repulsion(p: &mut Particle, pointer: Option<Vec2>, config: &FieldConfig, dt: f32, rng: &mut Rng) {
    let radius = config.mouse_repulsion_radius;
    let inside = pointer.and_then(|at| {
        let delta = p.pos - at;
        let distance = delta.length().max(1.0);
        (distance < radius).then_some((delta, distance))
    });

    match inside {
        Some((delta, distance)) => {
            p.fleeing = true;
            let proximity = (radius - distance) / radius;
            let force = proximity * proximity * config.mouse_repulsion_strength * 50.0 * dt;
            let angle = delta.y.atan2(delta.x);
            let drift = angle + FRAC_PI_2 * rng.sign();
            p.vel += heading(angle) * force + heading(drift) * force * 0.2;
            p.current_speed = (config.max_base_speed * 1.5).min(p.base_speed + force * 0.5);
        }
        None => {
            p.current_speed = lerp(p.current_speed, p.base_speed, 0.05 * dt);
        }
    }
}

/// Inward push inside the band along each edge (1.5x the border padding).
/// Bands combine at corners.
pub fn edge_avoidance(p: &Particle, space: &SimulationSpace, config: &FieldConfig, dt: f32) -> Vec2 {
    let band = space.border_padding * 1.5;
    if band <= 0.0 {
        return Vec2::ZERO;
    }
    let mut force = Vec2::ZERO;
    if p.pos.x < band {
        force.x += (band - p.pos.x) / band;
    }
    if p.pos.x > space.width - band {
        force.x -= (p.pos.x - (space.width - band)) / band;
    }
    if p.pos.y < band {
        force.y += (band - p.pos.y) / band;
    }
    if p.pos.y > space.height - band {
        force.y -= (p.pos.y - (space.height - band)) / band;
    }
    force * config.corner_avoidance_strength * dt
}

/// Cruise velocity along the heading plus the wobble drift.
/// `seconds` is wall-clock time and drives the wobble phase.
pub fn cruise(p: &Particle, seconds: f64, dt: f32) -> Vec2 {
    let phase = (seconds as f32) * p.wobble.frequency + p.wobble.offset;
    let wobble = Vec2::new(
        phase.sin() * p.wobble.amplitude,
        (phase + std::f32::consts::FRAC_PI_4).cos() * p.wobble.amplitude,
    );
    let speed = if p.fleeing { p.current_speed } else { p.base_speed };
    heading(p.direction) * speed * 0.1 * dt + wobble * 0.01 * dt
}

/// Drag, speed limits, position, heading, edge fallback and spin.
pub fn integrate(p: &mut Particle, space: &SimulationSpace, config: &FieldConfig, dt: f32, rng: &mut Rng) {
    p.vel *= config.drag;
    p.vel = clamp_speed(p.vel, config.max_speed);
    p.vel = enforce_min_speed(p.vel, config.min_speed);

    p.pos += p.vel * dt;

    if p.vel.x.abs() > 0.01 || p.vel.y.abs() > 0.01 {
        p.direction = p.vel.y.atan2(p.vel.x);
    }

    p.direction_timer -= dt;
    if p.direction_timer <= 0.0 {
        p.direction = lerp_angle(p.direction, rng.angle(), 0.3);
        p.direction_timer = rng.range(100.0, 300.0);
    }

    contain(p, space);
    p.rotation += p.rotation_speed * dt;
}

/// Clamp inside the surface, bouncing off the edge at half speed.
fn contain(p: &mut Particle, space: &SimulationSpace) {
    let margin = p.size / 2.0 + 5.0;
    if p.pos.x < margin {
        p.pos.x = margin;
        p.vel.x = p.vel.x.abs() * 0.5;
    } else if p.pos.x > space.width - margin {
        p.pos.x = space.width - margin;
        p.vel.x = -p.vel.x.abs() * 0.5;
    }
    if p.pos.y < margin {
        p.pos.y = margin;
        p.vel.y = p.vel.y.abs() * 0.5;
    } else if p.pos.y > space.height - margin {
        p.pos.y = space.height - margin;
        p.vel.y = -p.vel.y.abs() * 0.5;
    }
}
