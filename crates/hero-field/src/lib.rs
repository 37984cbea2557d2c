pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod input;
pub mod assets;

// Re-export key types at crate root for convenience
pub use api::config::{FieldConfig, Palette};
pub use api::error::{ConfigError, ManifestError};
pub use api::field::{HeroField, DEFAULT_SEED};
pub use api::types::{ExplosionId, IconKind, IconSet, ParticleId};
pub use assets::manifest::{IconDescriptor, IconManifest};
pub use components::particle::{CutState, Particle, Wobble};
pub use core::rng::Rng;
pub use core::schedule::RespawnSchedule;
pub use core::space::{SimulationSpace, POINTER_SENTINEL};
pub use core::store::ParticleStore;
pub use core::time::{FrameClock, NOMINAL_FRAME_MS};
pub use input::queue::{InputEvent, InputQueue};
pub use renderer::frame::{Color, DashStyle, DrawCommand, FrameBuffer};
pub use renderer::traits::{DrawStats, Renderer};
pub use systems::cutting::{CuttingLine, CuttingLines};
pub use systems::effects::{Explosion, ExplosionPool, Spark};
pub use systems::population::PlacementReport;
