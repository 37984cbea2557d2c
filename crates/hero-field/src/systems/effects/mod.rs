//! Visual effects: explosion bursts.
//!
//! `ExplosionPool` owns every live burst; the simulation spawns one per
//! exploding particle and ticks the pool once per frame.

mod explosion;

pub use explosion::{Explosion, ExplosionPool, Spark};
