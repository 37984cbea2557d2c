//! Short-lived spark bursts left behind by exploding particles.

use glam::Vec2;
use crate::api::types::{ExplosionId, ParticleId};
use crate::core::rng::Rng;

/// One spark of an explosion. Position is relative to the explosion origin.
#[derive(Debug, Clone)]
pub struct Spark {
    pub offset: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub alpha: f32,
}

impl Spark {
    pub const DRAG: f32 = 0.97;
    pub const GRAVITY: f32 = 0.05;

    pub fn random(rng: &mut Rng) -> Self {
        Spark {
            offset: Vec2::ZERO,
            vel: Vec2::new(rng.range(-4.0, 4.0), rng.range(-4.0, 4.0)),
            size: rng.range(2.0, 6.0),
            alpha: 1.0,
        }
    }

    fn tick(&mut self, life_ratio: f32, dt: f32) {
        self.offset += self.vel * dt;
        self.alpha = life_ratio;
        self.vel *= Self::DRAG;
        self.vel.y += Self::GRAVITY * dt;
    }

    /// Drawn radius; shrinks with the remaining life.
    pub fn radius(&self) -> f32 {
        self.size * self.alpha
    }
}

/// A burst of sparks centered where a particle exploded.
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: ExplosionId,
    /// Particle that exploded.
    pub source: ParticleId,
    pub origin: Vec2,
    /// Remaining life in frame units.
    pub life: f32,
    pub duration: f32,
    pub sparks: Vec<Spark>,
}

impl Explosion {
    /// Advance the burst. Returns false when expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.life -= dt;
        if self.life <= 0.0 {
            return false;
        }
        let ratio = self.life_ratio();
        for spark in &mut self.sparks {
            spark.tick(ratio, dt);
        }
        true
    }

    /// Remaining life as a fraction of the full duration.
    pub fn life_ratio(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        (self.life / self.duration).max(0.0)
    }

    /// Absolute position of a spark.
    pub fn spark_position(&self, spark: &Spark) -> Vec2 {
        self.origin + spark.offset
    }
}

/// All live explosions.
#[derive(Debug, Default)]
pub struct ExplosionPool {
    explosions: Vec<Explosion>,
    next_id: u32,
    total_spawned: u64,
}

impl ExplosionPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a burst of `count` sparks at `origin`.
    pub fn spawn(
        &mut self,
        origin: Vec2,
        source: ParticleId,
        duration: f32,
        count: usize,
        rng: &mut Rng,
    ) -> ExplosionId {
        let id = ExplosionId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.total_spawned += 1;
        let sparks = (0..count).map(|_| Spark::random(rng)).collect();
        self.explosions.push(Explosion {
            id,
            source,
            origin,
            life: duration,
            duration,
            sparks,
        });
        id
    }

    /// Age every explosion and drop the expired ones.
    pub fn tick(&mut self, dt: f32) {
        self.explosions.retain_mut(|e| e.tick(dt));
    }

    pub fn iter(&self) -> impl Iterator<Item = &Explosion> {
        self.explosions.iter()
    }

    pub fn len(&self) -> usize {
        self.explosions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.explosions.is_empty()
    }

    /// Explosions spawned since creation, including expired ones.
    pub fn total_spawned(&self) -> u64 {
        self.total_spawned
    }

    pub fn clear(&mut self) {
        self.explosions.clear();
    }
}
