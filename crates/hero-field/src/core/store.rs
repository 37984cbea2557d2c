use crate::api::types::ParticleId;
use crate::components::particle::Particle;

/// Live particle collection using a flat Vec.
/// Order is stable: replacing a particle keeps its slot, and nothing is ever
/// swap-removed mid-simulation.
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self {
            particles: Vec::with_capacity(32),
        }
    }

    /// Add a particle at the end. The caller guarantees its id is unused.
    pub fn push(&mut self, particle: Particle) {
        debug_assert!(self.get(particle.id).is_none(), "duplicate particle id {:?}", particle.id);
        self.particles.push(particle);
    }

    /// Overwrite the particle with `particle.id` in place.
    /// Returns false (and drops `particle`) when no such id is live.
    pub fn replace(&mut self, particle: Particle) -> bool {
        match self.index_of(particle.id) {
            Some(idx) => {
                self.particles[idx] = particle;
                true
            }
            None => false,
        }
    }

    /// Current slot of a particle id.
    pub fn index_of(&self, id: ParticleId) -> Option<usize> {
        self.particles.iter().position(|p| p.id == id)
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.iter_mut().find(|p| p.id == id)
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    pub fn as_mut_slice(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Iterate over particles that are not exploding.
    pub fn active(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_active())
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }
}

impl Default for ParticleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::IconKind;
    use glam::Vec2;

    fn particle(id: u32, x: f32) -> Particle {
        Particle::new(ParticleId(id), Vec2::new(x, 0.0), 20.0, IconKind(0))
    }

    #[test]
    fn replace_keeps_slot() {
        let mut store = ParticleStore::new();
        store.push(particle(0, 1.0));
        store.push(particle(1, 2.0));
        store.push(particle(2, 3.0));

        assert!(store.replace(particle(1, 99.0)));
        assert_eq!(store.index_of(ParticleId(1)), Some(1));
        assert_eq!(store.get(ParticleId(1)).unwrap().pos.x, 99.0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn replace_unknown_id_is_noop() {
        let mut store = ParticleStore::new();
        store.push(particle(0, 1.0));
        assert!(!store.replace(particle(7, 5.0)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn active_skips_exploding() {
        let mut store = ParticleStore::new();
        store.push(particle(0, 0.0));
        store.push(particle(1, 0.0));
        store.get_mut(ParticleId(0)).unwrap().exploding = true;
        let ids: Vec<_> = store.active().map(|p| p.id).collect();
        assert_eq!(ids, vec![ParticleId(1)]);
    }
}
