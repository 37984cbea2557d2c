pub mod population;
pub mod forces;
pub mod pursuit;
pub mod cutting;
pub mod connections;
pub mod effects;
pub mod render;
