//! Core simulation state for the 2D noble-gas enclosure: the species
//! table, the ballistic particle with exact-time wall collisions, and
//! the enclosure that owns the ensemble.

pub mod particle;
pub mod species;
pub mod system;

pub use particle::{Bounds, Particle};
pub use species::{Color, Species, BOLTZMANN};
pub use system::SystemState;
