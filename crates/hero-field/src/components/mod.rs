pub mod particle;

pub use particle::{CutState, Particle, Wobble};
