use log::debug;
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

use crate::core::particle::{Bounds, Particle};
use crate::core::species::{Color, Species};
use crate::error::{Error, Result};

/// Fixed enclosure width in simulation length units.
pub const WIDTH: f64 = 2500.0;
/// Ambient temperature a fresh enclosure starts at (K).
pub const DEFAULT_TEMPERATURE: f64 = 300.0;
/// Height a fresh enclosure starts at.
pub const DEFAULT_HEIGHT: f64 = 2500.0;

/// The enclosure and the ensemble living in it.
///
/// Owns the rectangular domain (fixed width, adjustable height), the
/// particle collection in insertion order, the ambient temperature, the
/// monotonic wall-collision counter, and the RNG every sampling
/// operation draws from. All global parameter changes enter here and
/// fan out to the particles.
#[derive(Debug)]
pub struct SystemState {
    temperature: f64,
    bounds: Bounds,
    pub particles: Vec<Particle>,
    collisions: u64,
    rng: StdRng,
}

impl SystemState {
    /// Create an empty enclosure with the default ambient temperature
    /// and height. `seed` fixes the RNG stream for reproducibility;
    /// `None` seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            bounds: Bounds {
                width: WIDTH,
                height: DEFAULT_HEIGHT,
            },
            particles: Vec::new(),
            collisions: 0,
            rng: seed_rng(seed),
        }
    }

    /// Create an empty enclosure with explicit starting parameters.
    ///
    /// Errors:
    /// - `Error::NonPositiveTemperature` / `Error::NonPositiveHeight`
    ///   unless both are finite and > 0.
    pub fn with_params(temperature: f64, height: f64, seed: Option<u64>) -> Result<Self> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(Error::NonPositiveTemperature(temperature));
        }
        if !height.is_finite() || height <= 0.0 {
            return Err(Error::NonPositiveHeight(height));
        }
        let mut state = Self::new(seed);
        state.temperature = temperature;
        state.bounds.height = height;
        Ok(state)
    }

    /// Current ambient temperature (K).
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Current enclosure height.
    pub fn height(&self) -> f64 {
        self.bounds.height
    }

    /// Enclosure width (fixed for the lifetime of the simulation).
    pub fn width(&self) -> f64 {
        self.bounds.width
    }

    /// Current enclosure extent.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Total wall-bounce events since creation.
    pub fn collisions(&self) -> u64 {
        self.collisions
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    /// Positions as `[x, y]` pairs, in insertion order.
    pub fn positions(&self) -> Vec<[f64; 2]> {
        self.particles.iter().map(|p| [p.x, p.y]).collect()
    }

    /// Velocities as `[vx, vy]` pairs, parallel to `positions`.
    pub fn velocities(&self) -> Vec<[f64; 2]> {
        self.particles.iter().map(|p| [p.vx, p.vy]).collect()
    }

    /// Display colors, parallel to `positions`.
    pub fn colors(&self) -> Vec<Color> {
        self.particles.iter().map(|p| p.species.color()).collect()
    }

    /// Total kinetic energy of the ensemble (diagnostic).
    pub fn kinetic_energy(&self) -> f64 {
        self.particles.iter().map(|p| p.kinetic_energy()).sum()
    }

    /// Spawn a particle of `species` at the ambient temperature, with a
    /// Maxwell-sampled velocity and a uniform position in the enclosure.
    pub fn add_particle(&mut self, species: Species) -> Result<()> {
        let bounds = self.bounds;
        let particle = Particle::new(species, self.temperature, &bounds, &mut self.rng)?;
        debug!(
            "spawned {} at ({}, {}), speed {:.3e}",
            species,
            particle.x,
            particle.y,
            particle.speed()
        );
        self.particles.push(particle);
        Ok(())
    }

    /// Set the ambient temperature and broadcast it to every particle,
    /// rescaling each velocity by the ratio of new to old.
    ///
    /// Errors:
    /// - `Error::NonPositiveTemperature` unless finite and > 0.
    pub fn update_temperatures(&mut self, temperature: f64) -> Result<()> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(Error::NonPositiveTemperature(temperature));
        }
        debug!("ambient temperature {} K -> {} K", self.temperature, temperature);
        self.temperature = temperature;
        for particle in &mut self.particles {
            particle.update_temperature(temperature);
        }
        Ok(())
    }

    /// Advance every particle by the same `dt`, counting one collision
    /// per wall bounce. Particle order carries no physical meaning; the
    /// particles do not interact.
    ///
    /// Errors:
    /// - `Error::InvalidParam` unless `dt` is finite and >= 0.
    pub fn update_positions(&mut self, dt: f64) -> Result<()> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(Error::InvalidParam(format!(
                "time step must be finite and >= 0, got {dt}"
            )));
        }
        let bounds = self.bounds;
        for i in 0..self.particles.len() {
            let bounces = self.particles[i].update_position(dt, &bounds)?;
            for _ in 0..bounces {
                self.increment_collisions();
            }
        }
        Ok(())
    }

    /// Resize the enclosure. Particles left above the new ceiling are
    /// clamped onto it with their vertical velocity negated — a plain
    /// fix-up, not a collision: no time is consumed and the counter does
    /// not move.
    ///
    /// Errors:
    /// - `Error::NonPositiveHeight` unless finite and > 0.
    pub fn update_height(&mut self, height: f64) -> Result<()> {
        if !height.is_finite() || height <= 0.0 {
            return Err(Error::NonPositiveHeight(height));
        }
        debug!("enclosure height {} -> {}", self.bounds.height, height);
        self.bounds.height = height;
        for particle in &mut self.particles {
            if particle.y > height {
                particle.y = height;
                particle.vy = -particle.vy;
            }
        }
        Ok(())
    }

    /// Record one wall-bounce event. The counter is monotone and only
    /// ever written through here.
    #[inline]
    pub fn increment_collisions(&mut self) {
        self.collisions = self.collisions.saturating_add(1);
    }
}

fn seed_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => SeedableRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rng().random()),
    }
}
