use glam::Vec2;
use crate::api::types::{IconKind, ParticleId};
use crate::core::rng::Rng;

/// Periodic drift added on top of the cruise velocity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wobble {
    pub amplitude: f32,
    pub frequency: f32,
    /// Phase offset in radians.
    pub offset: f32,
}

impl Wobble {
    pub const NONE: Wobble = Wobble {
        amplitude: 0.0,
        frequency: 0.0,
        offset: 0.0,
    };

    pub fn random(rng: &mut Rng) -> Self {
        Self {
            amplitude: rng.range(0.2, 0.5),
            frequency: rng.range(0.001, 0.003),
            offset: rng.angle(),
        }
    }
}

/// Cutting state of a particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutState {
    #[default]
    Idle,
    /// Severing the link to `target`; progress lives on the cutting line.
    Cutting { target: ParticleId },
}

/// One icon sprite: kinematics, visuals and interaction state.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Stable identifier, kept across respawn-in-place.
    pub id: ParticleId,
    /// Center position in surface pixels.
    pub pos: Vec2,
    pub vel: Vec2,
    /// Diameter.
    pub size: f32,
    pub icon: IconKind,
    /// Whether this particle's icon kind initiates cuts.
    pub can_cut: bool,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Degrees per frame.
    pub rotation_speed: f32,
    /// Cruising speed, drawn once at creation.
    pub base_speed: f32,
    /// Transient speed while fleeing the pointer.
    pub current_speed: f32,
    /// Heading in radians.
    pub direction: f32,
    pub wobble: Wobble,
    /// Frames until the heading is nudged toward a random angle.
    pub direction_timer: f32,
    /// Inside the pointer repulsion radius this frame.
    pub fleeing: bool,
    /// Accumulated pursuit time in frames.
    pub pursuit: f32,
    pub cut: CutState,
    /// Frames before another cut may start.
    pub cut_cooldown: f32,
    /// Waiting for respawn; physics and drawing are suspended.
    pub exploding: bool,
}

impl Particle {
    /// A motionless particle with neutral visuals. Use the builders to adjust.
    pub fn new(id: ParticleId, pos: Vec2, size: f32, icon: IconKind) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size,
            icon,
            can_cut: false,
            rotation: 0.0,
            rotation_speed: 0.0,
            base_speed: 0.0,
            current_speed: 0.0,
            direction: 0.0,
            wobble: Wobble::NONE,
            direction_timer: 200.0,
            fleeing: false,
            pursuit: 0.0,
            cut: CutState::Idle,
            cut_cooldown: 0.0,
            exploding: false,
        }
    }

    /// A freshly spawned particle with randomized heading, spin and wobble.
    pub fn spawn(
        id: ParticleId,
        pos: Vec2,
        size: f32,
        icon: IconKind,
        can_cut: bool,
        base_speed: f32,
        rng: &mut Rng,
    ) -> Self {
        Self {
            can_cut,
            rotation: rng.range(0.0, 360.0),
            rotation_speed: rng.range(-0.1, 0.1),
            base_speed,
            current_speed: base_speed,
            direction: rng.angle(),
            wobble: Wobble::random(rng),
            direction_timer: rng.range(100.0, 300.0),
            ..Self::new(id, pos, size, icon)
        }
    }

    // -- Builder pattern --

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn with_base_speed(mut self, speed: f32) -> Self {
        self.base_speed = speed;
        self.current_speed = speed;
        self
    }

    pub fn with_cutting(mut self, can_cut: bool) -> Self {
        self.can_cut = can_cut;
        self
    }

    /// Not exploding.
    pub fn is_active(&self) -> bool {
        !self.exploding
    }

    pub fn is_cutting(&self) -> bool {
        matches!(self.cut, CutState::Cutting { .. })
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.pos.distance(point)
    }
}
