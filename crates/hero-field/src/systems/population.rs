//! Particle placement: full population and single-particle respawn.

use glam::Vec2;
use crate::api::config::FieldConfig;
use crate::api::types::{IconKind, IconSet, ParticleId};
use crate::components::particle::Particle;
use crate::core::rng::Rng;
use crate::core::space::SimulationSpace;
use crate::core::store::ParticleStore;

/// Candidate positions tried before accepting the last one regardless.
pub const MAX_PLACEMENT_ATTEMPTS: u32 = 50;

/// Outcome of one rejection-sampling search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub pos: Vec2,
    pub size: f32,
    pub attempts: u32,
    /// False when the search ran out of attempts and kept an overlapping candidate.
    pub clear: bool,
}

/// Summary of a populate pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlacementReport {
    pub placed: usize,
    /// Most attempts any single particle needed.
    pub max_attempts: u32,
    /// Particles placed without the required clearance.
    pub best_effort: usize,
}

/// Minimum center distance a new particle must keep from an existing one.
pub fn placement_separation(config: &FieldConfig, size: f32, other: &Particle, same_icon: bool) -> f32 {
    let factor = if same_icon {
        config.same_icon_repulsion_multiplier * 0.5
    } else {
        1.0
    };
    (size + other.size + config.min_distance_between_particles) * factor
}

/// Rejection-sample a position and size inside the safe zone.
/// The particle with id `exclude` (if any) is ignored during the overlap check.
pub fn find_placement(
    store: &ParticleStore,
    exclude: Option<ParticleId>,
    icon: IconKind,
    config: &FieldConfig,
    space: &SimulationSpace,
    rng: &mut Rng,
) -> Placement {
    let (min, max) = space.safe_zone();
    let mut placement = Placement {
        pos: min,
        size: config.min_size,
        attempts: 0,
        clear: false,
    };

    while !placement.clear && placement.attempts < MAX_PLACEMENT_ATTEMPTS {
        let size = rng.range(config.min_size, config.max_size);
        let pos = Vec2::new(rng.range(min.x, max.x), rng.range(min.y, max.y));
        let clear = store
            .iter()
            .filter(|p| Some(p.id) != exclude)
            .all(|p| pos.distance(p.pos) >= placement_separation(config, size, p, p.icon == icon));
        placement = Placement {
            pos,
            size,
            attempts: placement.attempts + 1,
            clear,
        };
    }
    placement
}

/// Cruising speed: either an extreme (very slow or very fast) or a middle value.
pub fn draw_base_speed(config: &FieldConfig, rng: &mut Rng) -> f32 {
    let (lo, hi) = (config.min_base_speed, config.max_base_speed);
    if rng.chance(config.speed_variation_probability) {
        if rng.chance(0.5) {
            rng.range(lo, lo * 1.5)
        } else {
            rng.range(hi * 0.8, hi)
        }
    } else {
        rng.range(lo * 1.5, hi * 0.8)
    }
}

fn build(
    id: ParticleId,
    icon: IconKind,
    placement: Placement,
    icons: &IconSet,
    config: &FieldConfig,
    rng: &mut Rng,
) -> Particle {
    let base_speed = draw_base_speed(config, rng);
    Particle::spawn(
        id,
        placement.pos,
        placement.size,
        icon,
        icons.is_cutting(icon),
        base_speed,
        rng,
    )
}

/// Replace the whole population with `config.max_particles` fresh particles.
/// Icon kinds are balanced round-robin and then shuffled; ids are sequential from 0.
pub fn populate(
    store: &mut ParticleStore,
    icons: &IconSet,
    config: &FieldConfig,
    space: &SimulationSpace,
    rng: &mut Rng,
) -> PlacementReport {
    store.clear();
    let mut kinds: Vec<IconKind> = (0..config.max_particles).map(|i| icons.round_robin(i)).collect();
    rng.shuffle(&mut kinds);

    let mut report = PlacementReport::default();
    for (i, icon) in kinds.into_iter().enumerate() {
        let placement = find_placement(store, None, icon, config, space, rng);
        report.max_attempts = report.max_attempts.max(placement.attempts);
        if !placement.clear {
            report.best_effort += 1;
        }
        let particle = build(ParticleId(i as u32), icon, placement, icons, config, rng);
        store.push(particle);
        report.placed += 1;
    }

    if report.best_effort > 0 {
        log::warn!(
            "{} of {} particles placed without clearance ({}x{} surface)",
            report.best_effort,
            report.placed,
            space.width,
            space.height
        );
    }
    report
}

/// Regenerate the particle `id` in place with a random icon kind.
/// Returns false if no particle with that id exists.
pub fn replace(
    store: &mut ParticleStore,
    id: ParticleId,
    icons: &IconSet,
    config: &FieldConfig,
    space: &SimulationSpace,
    rng: &mut Rng,
) -> bool {
    if store.get(id).is_none() {
        return false;
    }
    let icon = IconKind(rng.next_int(icons.count() as u32) as u8);
    let placement = find_placement(store, Some(id), icon, config, space, rng);
    if !placement.clear {
        log::warn!("particle {} respawned without clearance", id.0);
    }
    let particle = build(id, icon, placement, icons, config, rng);
    store.replace(particle)
}
