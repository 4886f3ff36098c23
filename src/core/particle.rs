use ordered_float::NotNan;
use rand::Rng;
use rand_distr::StandardNormal;

use crate::core::species::{Species, BOLTZMANN};
use crate::error::{Error, Result};

/// Hard cap on wall bounces resolved within a single time step. Keeps
/// the sub-step loop bounded when velocities dwarf the enclosure.
const MAX_BOUNCES: u32 = 256;

/// Rectangular enclosure extent: `[0, width] x [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// True if `(x, y)` lies inside the enclosure, boundary included.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
    }
}

/// The wall a collision resolves against. Left/right reflect `vx`,
/// bottom/top reflect `vy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Wall {
    Left,
    Right,
    Bottom,
    Top,
}

/// A point particle of a noble-gas species moving ballistically in 2D.
///
/// The particle carries its own copy of the ambient temperature as of
/// the last update; the enclosure broadcasts changes. Geometry is not
/// stored here: operations that need the box take a [`Bounds`] and
/// report wall bounces back to the caller, so the enclosure remains the
/// sole owner of its counter.
#[derive(Debug, Clone)]
pub struct Particle {
    /// Species identity (immutable after creation).
    pub species: Species,
    /// Particle-local copy of the ambient temperature (K).
    pub temperature: f64,
    /// Position, kept within `[0, width]`.
    pub x: f64,
    /// Position, kept within `[0, height]`.
    pub y: f64,
    /// Signed velocity component along x.
    pub vx: f64,
    /// Signed velocity component along y.
    pub vy: f64,
}

impl Particle {
    /// Create a particle at the ambient `temperature`, sampling an
    /// initial velocity from the Maxwell speed distribution and a
    /// uniform position inside `bounds`.
    ///
    /// Errors:
    /// - `Error::NonPositiveTemperature` unless `temperature` is finite and > 0.
    pub fn new<R: Rng + ?Sized>(
        species: Species,
        temperature: f64,
        bounds: &Bounds,
        rng: &mut R,
    ) -> Result<Self> {
        if !temperature.is_finite() || temperature <= 0.0 {
            return Err(Error::NonPositiveTemperature(temperature));
        }
        let (vx, vy) = generate_velocity(rng, species, temperature);
        let (x, y) = generate_position(rng, bounds);
        Ok(Self {
            species,
            temperature,
            x,
            y,
            vx,
            vy,
        })
    }

    /// Speed magnitude `|v|`.
    #[inline]
    pub fn speed(&self) -> f64 {
        self.vx.hypot(self.vy)
    }

    /// Kinetic energy `1/2 m |v|^2`.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.species.mass() * (self.vx * self.vx + self.vy * self.vy)
    }

    /// Adopt a new temperature and rescale the velocity by the ratio of
    /// new to old. The rescaling is linear in the ratio, not the square
    /// root. Callers guarantee `temperature > 0`; the old value is
    /// positive by construction.
    pub fn update_temperature(&mut self, temperature: f64) {
        let ratio = temperature / self.temperature;
        self.temperature = temperature;
        self.vx *= ratio;
        self.vy *= ratio;
    }

    /// Advance the particle by `dt`, resolving wall collisions at their
    /// exact hit times. Returns how many wall bounces occurred.
    ///
    /// Free flight that stays inside `bounds` commits in one step.
    /// Otherwise the step is split at the earliest wall hit: move there,
    /// snap onto the wall, reflect the normal velocity component, and
    /// continue with the remaining time. The loop ends when a candidate
    /// lands inside, the time is used up, or `MAX_BOUNCES` is reached
    /// (the residual time is then dropped; the state is already valid).
    ///
    /// Errors:
    /// - `Error::DegenerateVelocity` if the candidate lies outside the
    ///   enclosure but no wall is being approached. Unreachable from
    ///   in-bounds states, guarded against dividing by a zero component.
    pub fn update_position(&mut self, dt: f64, bounds: &Bounds) -> Result<u32> {
        let mut remaining = dt;
        let mut bounces = 0u32;
        loop {
            let x_new = self.x + self.vx * remaining;
            let y_new = self.y + self.vy * remaining;
            if bounds.contains(x_new, y_new) {
                self.x = x_new;
                self.y = y_new;
                return Ok(bounces);
            }
            if bounces >= MAX_BOUNCES {
                return Ok(bounces);
            }

            let (t_hit, wall) = self.next_wall_hit(bounds)?;
            let t_hit = t_hit.min(remaining);
            // Clamp both coordinates: a near-corner hit can round the
            // swept axis a few ulp past its own wall.
            self.x = (self.x + self.vx * t_hit).clamp(0.0, bounds.width);
            self.y = (self.y + self.vy * t_hit).clamp(0.0, bounds.height);
            match wall {
                Wall::Left => {
                    self.x = 0.0;
                    self.vx = -self.vx;
                }
                Wall::Right => {
                    self.x = bounds.width;
                    self.vx = -self.vx;
                }
                Wall::Bottom => {
                    self.y = 0.0;
                    self.vy = -self.vy;
                }
                Wall::Top => {
                    self.y = bounds.height;
                    self.vy = -self.vy;
                }
            }
            bounces += 1;
            remaining -= t_hit;
            if remaining <= 0.0 {
                return Ok(bounces);
            }
        }
    }

    /// Earliest wall hit from the current state: free-flight time
    /// `(boundary - coord) / v` for each wall the particle moves toward.
    fn next_wall_hit(&self, bounds: &Bounds) -> Result<(f64, Wall)> {
        let candidates = [
            (self.vx > 0.0).then(|| ((bounds.width - self.x) / self.vx, Wall::Right)),
            (self.vx < 0.0).then(|| (-self.x / self.vx, Wall::Left)),
            (self.vy > 0.0).then(|| ((bounds.height - self.y) / self.vy, Wall::Top)),
            (self.vy < 0.0).then(|| (-self.y / self.vy, Wall::Bottom)),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter_map(|(t, wall)| NotNan::new(t).ok().map(|t| (t, wall)))
            .min_by_key(|&(t, _)| t)
            .map(|(t, wall)| (t.into_inner(), wall))
            .ok_or_else(|| {
                Error::DegenerateVelocity(format!(
                    "out of bounds at ({}, {}) with no wall approached by velocity ({}, {})",
                    self.x, self.y, self.vx, self.vy
                ))
            })
    }
}

/// Sample a velocity for `species` at `temperature`.
///
/// The speed comes from the Maxwell speed distribution with scale
/// `sqrt(k_B T / m)`, realized as `scale * chi_3` via three standard
/// normal draws; the direction is uniform over the 360 whole-degree
/// angles.
pub fn generate_velocity<R: Rng + ?Sized>(
    rng: &mut R,
    species: Species,
    temperature: f64,
) -> (f64, f64) {
    let scale = (BOLTZMANN * temperature / species.mass()).sqrt();
    let mut sq_sum = 0.0;
    for _ in 0..3 {
        let n: f64 = rng.sample(StandardNormal);
        sq_sum += n * n;
    }
    let speed = scale * sq_sum.sqrt();
    let angle = f64::from(rng.random_range(0u32..360)).to_radians();
    (speed * angle.cos(), speed * angle.sin())
}

/// Sample a creation position: independent uniform integer draws over
/// `[0, width]` and `[0, height]`.
pub fn generate_position<R: Rng + ?Sized>(rng: &mut R, bounds: &Bounds) -> (f64, f64) {
    let x = rng.random_range(0..=bounds.width as u64) as f64;
    let y = rng.random_range(0..=bounds.height as u64) as f64;
    (x, y)
}
