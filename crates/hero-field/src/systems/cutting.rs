//! Cutting: a scissors particle severs its link to a neighbor over time.

use crate::api::config::FieldConfig;
use crate::api::types::ParticleId;
use crate::components::particle::{CutState, Particle};
use crate::core::rng::Rng;

/// A link being cut. `progress` runs from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CuttingLine {
    pub cutter: ParticleId,
    pub target: ParticleId,
    pub progress: f32,
}

impl CuttingLine {
    pub fn involves(&self, id: ParticleId) -> bool {
        self.cutter == id || self.target == id
    }

    /// True if the line joins `a` and `b`, in either order.
    pub fn connects(&self, a: ParticleId, b: ParticleId) -> bool {
        (self.cutter == a && self.target == b) || (self.cutter == b && self.target == a)
    }
}

/// Live cutting lines, referenced by particle id.
#[derive(Debug, Default)]
pub struct CuttingLines {
    lines: Vec<CuttingLine>,
}

impl CuttingLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, cutter: ParticleId, target: ParticleId) {
        self.lines.push(CuttingLine {
            cutter,
            target,
            progress: 0.0,
        });
    }

    /// First line joining the pair, in either order.
    pub fn find_pair(&self, a: ParticleId, b: ParticleId) -> Option<&CuttingLine> {
        self.lines.iter().find(|l| l.connects(a, b))
    }

    /// Index of the line `cutter` is driving toward `target`.
    fn position(&self, cutter: ParticleId, target: ParticleId) -> Option<usize> {
        self.lines.iter().position(|l| l.cutter == cutter && l.target == target)
    }

    /// Drop every line touching `id`. Returns how many were removed.
    pub fn remove_involving(&mut self, id: ParticleId) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| !l.involves(id));
        before - self.lines.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CuttingLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Outcome of advancing one particle's cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CutProgress {
    /// Not cutting (cooldown may be ticking).
    Idle,
    Cutting(f32),
    /// Line removed at full progress; cooldown started.
    Completed,
    /// Line or target gone; cut dropped without cooldown.
    Abandoned,
}

/// Roll for a new cut on `particles[index]` and commit to the first accepted
/// neighbor within connection distance. Returns the chosen target.
pub fn maybe_start(
    particles: &mut [Particle],
    index: usize,
    lines: &mut CuttingLines,
    config: &FieldConfig,
    rng: &mut Rng,
) -> Option<ParticleId> {
    let p = particles.get(index)?;
    if !p.can_cut || p.exploding || p.is_cutting() || p.cut_cooldown > 0.0 {
        return None;
    }
    if !rng.chance(config.cut_chance) {
        return None;
    }

    let (id, pos) = (p.id, p.pos);
    let target = particles
        .iter()
        .filter(|o| o.id != id && !o.exploding)
        // A pair carries at most one line.
        .filter(|o| o.cut != CutState::Cutting { target: id })
        .find(|o| o.pos.distance(pos) < config.connection_distance && rng.chance(config.cut_target_chance))
        .map(|o| o.id)?;

    particles[index].cut = CutState::Cutting { target };
    lines.start(id, target);
    Some(target)
}

/// Advance the cut of `p`. `target_alive` says whether the target can still
/// be found in the live collection and is not exploding.
pub fn advance(
    p: &mut Particle,
    lines: &mut CuttingLines,
    target_alive: bool,
    config: &FieldConfig,
    dt: f32,
) -> CutProgress {
    let target = match p.cut {
        CutState::Cutting { target } if !p.exploding => target,
        _ => {
            if p.cut_cooldown > 0.0 {
                p.cut_cooldown -= dt;
            }
            return CutProgress::Idle;
        }
    };

    let found = lines.position(p.id, target);
    let Some(i) = found.filter(|_| target_alive) else {
        if let Some(i) = found {
            lines.lines.remove(i);
        }
        p.cut = CutState::Idle;
        return CutProgress::Abandoned;
    };

    let progress = {
        let line = &mut lines.lines[i];
        line.progress += config.cut_speed * dt;
        line.progress
    };
    if progress >= 1.0 {
        lines.lines.remove(i);
        p.cut = CutState::Idle;
        p.cut_cooldown = config.cut_cooldown;
        CutProgress::Completed
    } else {
        CutProgress::Cutting(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::IconKind;
    use glam::Vec2;

    fn cutter_and_target(gap: f32) -> Vec<Particle> {
        vec![
            Particle::new(ParticleId(0), Vec2::new(200.0, 200.0), 20.0, IconKind(1)).with_cutting(true),
            Particle::new(ParticleId(1), Vec2::new(200.0 + gap, 200.0), 20.0, IconKind(0)),
        ]
    }

    fn eager() -> FieldConfig {
        FieldConfig {
            cut_chance: 1.0,
            cut_target_chance: 1.0,
            ..FieldConfig::default()
        }
    }

    #[test]
    fn starts_on_neighbor_within_connection_distance() {
        let config = eager();
        let mut rng = Rng::new(1);
        let mut particles = cutter_and_target(120.0);
        let mut lines = CuttingLines::new();
        assert_eq!(maybe_start(&mut particles, 0, &mut lines, &config, &mut rng), Some(ParticleId(1)));
        assert_eq!(particles[0].cut, CutState::Cutting { target: ParticleId(1) });
        assert!(lines.find_pair(ParticleId(1), ParticleId(0)).is_some());
    }

    #[test]
    fn non_cutters_and_far_neighbors_never_start() {
        let config = eager();
        let mut rng = Rng::new(1);
        let mut lines = CuttingLines::new();

        let mut far = cutter_and_target(400.0);
        assert_eq!(maybe_start(&mut far, 0, &mut lines, &config, &mut rng), None);

        let mut near = cutter_and_target(120.0);
        assert_eq!(maybe_start(&mut near, 1, &mut lines, &config, &mut rng), None);
        assert!(lines.is_empty());
    }

    #[test]
    fn cooldown_blocks_new_cuts() {
        let config = eager();
        let mut rng = Rng::new(1);
        let mut particles = cutter_and_target(120.0);
        particles[0].cut_cooldown = 10.0;
        let mut lines = CuttingLines::new();
        assert_eq!(maybe_start(&mut particles, 0, &mut lines, &config, &mut rng), None);
    }

    #[test]
    fn progress_is_monotonic_and_completes_once() {
        let config = eager();
        let mut rng = Rng::new(1);
        let mut particles = cutter_and_target(120.0);
        let mut lines = CuttingLines::new();
        maybe_start(&mut particles, 0, &mut lines, &config, &mut rng);

        let mut last = 0.0;
        let mut completed = 0;
        for _ in 0..150 {
            match advance(&mut particles[0], &mut lines, true, &config, 1.0) {
                CutProgress::Cutting(progress) => {
                    assert!(progress >= last);
                    last = progress;
                }
                CutProgress::Completed => completed += 1,
                CutProgress::Idle => {}
                CutProgress::Abandoned => panic!("cut should not be abandoned"),
            }
        }
        assert_eq!(completed, 1);
        assert!(lines.is_empty());
        assert_eq!(particles[0].cut, CutState::Idle);
        assert!(particles[0].cut_cooldown > 0.0);
    }

    #[test]
    fn vanished_target_abandons_cut() {
        let config = eager();
        let mut rng = Rng::new(1);
        let mut particles = cutter_and_target(120.0);
        let mut lines = CuttingLines::new();
        maybe_start(&mut particles, 0, &mut lines, &config, &mut rng);

        assert_eq!(advance(&mut particles[0], &mut lines, false, &config, 1.0), CutProgress::Abandoned);
        assert!(lines.is_empty());
        assert_eq!(particles[0].cut, CutState::Idle);
        assert_eq!(particles[0].cut_cooldown, 0.0);
    }

    #[test]
    fn purged_line_abandons_cut() {
        let config = eager();
        let mut rng = Rng::new(1);
        let mut particles = cutter_and_target(120.0);
        let mut lines = CuttingLines::new();
        maybe_start(&mut particles, 0, &mut lines, &config, &mut rng);

        assert_eq!(lines.remove_involving(ParticleId(1)), 1);
        assert_eq!(advance(&mut particles[0], &mut lines, true, &config, 1.0), CutProgress::Abandoned);
    }

    #[test]
    fn mutual_cutters_share_one_line_at_base_speed() {
        let config = eager();
        let mut rng = Rng::new(1);
        let mut particles = cutter_and_target(120.0);
        particles[1] = Particle::new(ParticleId(1), Vec2::new(320.0, 200.0), 20.0, IconKind(1)).with_cutting(true);
        let mut lines = CuttingLines::new();

        for _ in 0..10 {
            for i in 0..particles.len() {
                maybe_start(&mut particles, i, &mut lines, &config, &mut rng);
                advance(&mut particles[i], &mut lines, true, &config, 1.0);
            }
        }
        assert_eq!(lines.len(), 1);
        let line = lines.iter().next().unwrap();
        assert_eq!(line.cutter, ParticleId(0));
        assert!(line.progress <= config.cut_speed * 10.0 + 1e-5);
        assert_eq!(particles[1].cut, CutState::Idle);
    }

    #[test]
    fn each_cutter_advances_only_its_own_line() {
        let config = eager();
        let mut particles = cutter_and_target(120.0);
        particles[0].cut = CutState::Cutting { target: ParticleId(1) };
        particles[1].cut = CutState::Cutting { target: ParticleId(0) };
        let mut lines = CuttingLines::new();
        lines.start(ParticleId(0), ParticleId(1));
        lines.start(ParticleId(1), ParticleId(0));

        advance(&mut particles[0], &mut lines, true, &config, 1.0);
        advance(&mut particles[1], &mut lines, true, &config, 1.0);
        for line in lines.iter() {
            assert!((line.progress - config.cut_speed).abs() < 1e-6);
        }
    }

    #[test]
    fn idle_cooldown_ticks_down() {
        let config = FieldConfig::default();
        let mut particles = cutter_and_target(120.0);
        particles[0].cut_cooldown = 5.0;
        let mut lines = CuttingLines::new();
        assert_eq!(advance(&mut particles[0], &mut lines, true, &config, 2.0), CutProgress::Idle);
        assert_eq!(particles[0].cut_cooldown, 3.0);
    }
}
