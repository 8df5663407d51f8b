use glam::DVec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::solver::{BoundaryMode, FluidGrid};
use crate::timestep::TimeStepController;

/// Number of streak samples per particle, head included.
pub const TRAIL_LEN: usize = 50;
/// Particle time step and its adjustment increment.
pub const PARTICLE_TIME_STEP: f64 = 0.01;

/// A massless tracer in normalized [0, 1]^2 domain coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: DVec2,
    weight: f64,
    /// Streak samples: index 0 is the head, higher indices lie further upstream.
    trail: Vec<DVec2>,
}

impl Particle {
    fn new(position: DVec2, weight: f64) -> Self {
        Self { position, weight, trail: vec![position; TRAIL_LEN] }
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    /// Fixed at creation; scales how fast the head follows the flow.
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn trail(&self) -> &[DVec2] {
        &self.trail
    }
}

/// Keep a position inside the legal band `[spacing, 1 - spacing]` on both axes.
/// Periodic jumps to the opposite band edge, fixed wall clamps to the near one.
pub fn clamp_position(mode: BoundaryMode, p: DVec2, spacing: f64) -> DVec2 {
    DVec2::new(clamp_axis(mode, p.x, spacing), clamp_axis(mode, p.y, spacing))
}

fn clamp_axis(mode: BoundaryMode, x: f64, spacing: f64) -> f64 {
    let lo = spacing;
    let hi = 1.0 - spacing;
    if !x.is_finite() {
        return 0.5;
    }
    match mode {
        BoundaryMode::Periodic if x < lo => hi,
        BoundaryMode::Periodic if x > hi => lo,
        BoundaryMode::Periodic => x,
        BoundaryMode::FixedWall => x.clamp(lo, hi),
    }
}

/// Tracer population advected through a [`FluidGrid`] velocity field.
#[derive(Debug)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
    rng: StdRng,
    time_step: TimeStepController,
}

impl ParticleSystem {
    /// Weights are drawn from a generator seeded with `seed`, so a fixed seed
    /// reproduces the same population.
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            time_step: TimeStepController::new(PARTICLE_TIME_STEP),
        }
    }

    /// Append a particle at `position`, clamped into [0, 1]^2.
    pub fn add_particle(&mut self, position: DVec2) {
        let position = if position.is_finite() { position.clamp(DVec2::ZERO, DVec2::ONE) } else { DVec2::splat(0.5) };
        let weight = self.rng.gen::<f64>();
        self.particles.push(Particle::new(position, weight));
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Advance every particle one step through the grid's current velocity.
    ///
    /// The head moves by forward Euler. The streak is then rebuilt from the new
    /// head by tracing each sample backwards through the live field, one cell
    /// lookup per sample.
    pub fn tick(&mut self, fluid: &FluidGrid) {
        let dt = self.time_step.step();
        let mode = fluid.boundary_mode();
        let spacing = fluid.spacing();

        for particle in self.particles.iter_mut() {
            let velocity = fluid.velocity_at(particle.position);
            particle.position = clamp_position(mode, particle.position + particle.weight * dt * velocity, spacing);

            particle.trail[0] = particle.position;
            for k in 0..TRAIL_LEN - 1 {
                let sample = particle.trail[k];
                let upstream = sample - dt * fluid.velocity_at(sample);
                particle.trail[k + 1] = clamp_position(mode, upstream, spacing);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particle(&self, k: usize) -> Option<&Particle> {
        self.particles.get(k)
    }

    pub fn trail_len(&self) -> usize {
        TRAIL_LEN
    }

    pub fn time_step(&self) -> f64 {
        self.time_step.step()
    }

    pub fn set_time_step(&mut self, dt: f64) {
        self.time_step.set(dt);
    }

    pub fn increase_time_step(&mut self) {
        self.time_step.increase();
    }

    pub fn decrease_time_step(&mut self) {
        self.time_step.decrease();
    }
}
