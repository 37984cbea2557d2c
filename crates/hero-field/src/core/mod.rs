pub mod math;
pub mod rng;
pub mod schedule;
pub mod space;
pub mod store;
pub mod time;
