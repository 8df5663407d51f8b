use glam::DVec2;

use crate::config::Config;
use crate::error::SimError;
use crate::particle::ParticleSystem;
use crate::solver::{FluidGrid, SolverParams};

/// A user intent pushed into the core by an input layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    IncreaseResolution,
    DecreaseResolution,
    ToggleBoundary,
    ToggleObstacle,
    IncreaseDiffusion,
    DecreaseDiffusion,
    IncreaseViscosity,
    DecreaseViscosity,
    IncreaseFluidTimeStep,
    DecreaseFluidTimeStep,
    IncreaseParticleTimeStep,
    DecreaseParticleTimeStep,
    /// Directional force at an interior cell.
    AddForce { cell: (usize, usize), force: DVec2 },
    AddSource { cell: (usize, usize), amount: f64 },
    AddSink { cell: (usize, usize), amount: f64 },
    /// New tracer at a normalized position.
    AddParticle(DVec2),
    ClearParticles,
    ResetFluid,
    ToggleFluidAnimation,
    ToggleParticleAnimation,
}

/// Frame driver: one fluid grid, one tracer population, and a pause switch
/// for each.
#[derive(Debug)]
pub struct Simulation {
    fluid: FluidGrid,
    particles: ParticleSystem,
    fluid_animated: bool,
    particles_animated: bool,
}

impl Simulation {
    pub fn new(params: SolverParams, seed: u64) -> Result<Self, SimError> {
        Ok(Self {
            fluid: FluidGrid::new(params)?,
            particles: ParticleSystem::new(seed),
            fluid_animated: false,
            particles_animated: false,
        })
    }

    pub fn from_config(cfg: &Config) -> Result<Self, SimError> {
        let mut params = SolverParams::with_resolution(cfg.fluid.resolution);
        params.set_diffusion(cfg.fluid.diffusion);
        params.set_viscosity(cfg.fluid.viscosity);

        let mut sim = Self::new(params, cfg.particles.seed)?;
        sim.fluid.set_time_step(cfg.fluid.time_step);
        sim.fluid.set_boundary_mode(cfg.fluid.boundary);
        sim.fluid.set_obstacle(cfg.fluid.obstacle);
        sim.particles.set_time_step(cfg.particles.time_step);
        log::info!(
            "simulation ready: {}x{} grid, {} boundary, dt={:.3}, particle dt={:.3}",
            sim.fluid.resolution(),
            sim.fluid.resolution(),
            sim.fluid.boundary_mode().label(),
            sim.fluid.time_step(),
            sim.particles.time_step()
        );
        Ok(sim)
    }

    /// Advance one frame: fluid first, so particles always sample the
    /// velocity field produced this frame.
    pub fn frame(&mut self) {
        if self.fluid_animated {
            self.fluid.tick();
        }
        if self.particles_animated {
            self.particles.tick(&self.fluid);
        }
    }

    pub fn apply(&mut self, cmd: Command) -> Result<(), SimError> {
        match cmd {
            Command::IncreaseResolution => {
                if !self.fluid.increase_resolution()? {
                    log::debug!("resolution already at maximum ({})", self.fluid.resolution());
                }
            }
            Command::DecreaseResolution => {
                if !self.fluid.decrease_resolution()? {
                    log::debug!("resolution already at minimum ({})", self.fluid.resolution());
                }
            }
            Command::ToggleBoundary => {
                self.fluid.toggle_boundary_mode();
                log::info!("boundary mode: {}", self.fluid.boundary_mode().label());
            }
            Command::ToggleObstacle => {
                let enabled = !self.fluid.obstacle_enabled();
                self.fluid.set_obstacle(enabled);
            }
            Command::IncreaseDiffusion => self.fluid.increase_diffusion(),
            Command::DecreaseDiffusion => self.fluid.decrease_diffusion(),
            Command::IncreaseViscosity => self.fluid.increase_viscosity(),
            Command::DecreaseViscosity => self.fluid.decrease_viscosity(),
            Command::IncreaseFluidTimeStep => self.fluid.increase_time_step(),
            Command::DecreaseFluidTimeStep => self.fluid.decrease_time_step(),
            Command::IncreaseParticleTimeStep => self.particles.increase_time_step(),
            Command::DecreaseParticleTimeStep => self.particles.decrease_time_step(),
            Command::AddForce { cell: (i, j), force } => self.fluid.add_impulse(i, j, force),
            Command::AddSource { cell: (i, j), amount } => self.fluid.add_source(i, j, amount),
            Command::AddSink { cell: (i, j), amount } => self.fluid.add_sink(i, j, amount),
            Command::AddParticle(position) => self.particles.add_particle(position),
            Command::ClearParticles => self.particles.clear(),
            Command::ResetFluid => self.fluid.init()?,
            Command::ToggleFluidAnimation => self.fluid_animated = !self.fluid_animated,
            Command::ToggleParticleAnimation => self.particles_animated = !self.particles_animated,
        }
        Ok(())
    }

    /// Place `count` particles on a centred square lattice.
    pub fn seed_particles(&mut self, count: usize) {
        if count == 0 {
            return;
        }
        let side = (count as f64).sqrt().ceil() as usize;
        for k in 0..count {
            let (a, b) = (k % side, k / side);
            let pos = DVec2::new((a as f64 + 0.5) / side as f64, (b as f64 + 0.5) / side as f64);
            self.particles.add_particle(pos);
        }
    }

    pub fn set_animated(&mut self, fluid: bool, particles: bool) {
        self.fluid_animated = fluid;
        self.particles_animated = particles;
    }

    pub fn fluid_animated(&self) -> bool {
        self.fluid_animated
    }

    pub fn particles_animated(&self) -> bool {
        self.particles_animated
    }

    pub fn fluid(&self) -> &FluidGrid {
        &self.fluid
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::BoundaryMode;

    fn sim(n: usize) -> Simulation {
        Simulation::new(SolverParams::with_resolution(n), 9).unwrap()
    }

    #[test]
    fn test_paused_by_default() {
        let mut s = sim(16);
        s.apply(Command::AddParticle(DVec2::new(0.3, 0.3))).unwrap();
        let before = s.particles().particle(0).unwrap().clone();
        let u = s.fluid().velocity_u(4, 4);
        s.frame();
        assert_eq!(s.fluid().elapsed(), 0.0);
        assert_eq!(s.fluid().velocity_u(4, 4), u);
        assert_eq!(s.particles().particle(0).unwrap(), &before);
    }

    #[test]
    fn test_independent_animation_toggles() {
        let mut s = sim(16);
        s.apply(Command::AddParticle(DVec2::new(0.3, 0.3))).unwrap();
        s.apply(Command::ToggleParticleAnimation).unwrap();
        s.frame();
        assert_eq!(s.fluid().elapsed(), 0.0, "Fluid should stay paused");
        assert_ne!(s.particles().particle(0).unwrap().position(), DVec2::new(0.3, 0.3));

        s.apply(Command::ToggleFluidAnimation).unwrap();
        s.apply(Command::ToggleParticleAnimation).unwrap();
        s.frame();
        assert!(s.fluid().elapsed() > 0.0);
        assert!(s.fluid_animated() && !s.particles_animated());
    }

    #[test]
    fn test_toggle_boundary_shared_by_particles() {
        let mut s = sim(16);
        s.apply(Command::ToggleBoundary).unwrap();
        assert_eq!(s.fluid().boundary_mode(), BoundaryMode::FixedWall);
        s.apply(Command::AddParticle(DVec2::new(0.0, 0.0))).unwrap();
        s.set_animated(true, true);
        s.frame();
        let sp = s.fluid().spacing();
        let p = s.particles().particle(0).unwrap().position();
        // Fixed wall clamps into the band instead of wrapping to the far side
        assert!(p.x < 0.5 && p.y < 0.5, "Particle wrapped under fixed wall: {:?}", p);
        assert!(p.x >= sp && p.y >= sp);
    }

    #[test]
    fn test_resize_commands() {
        let mut s = sim(8);
        s.apply(Command::IncreaseResolution).unwrap();
        assert_eq!(s.fluid().resolution(), 16);
        s.apply(Command::DecreaseResolution).unwrap();
        s.apply(Command::DecreaseResolution).unwrap();
        s.apply(Command::DecreaseResolution).unwrap();
        assert_eq!(s.fluid().resolution(), 4);
    }

    #[test]
    fn test_clear_particles_command() {
        let mut s = sim(8);
        s.seed_particles(10);
        assert_eq!(s.particles().len(), 10);
        s.apply(Command::ClearParticles).unwrap();
        assert_eq!(s.particles().len(), 0);
    }

    #[test]
    fn test_seed_particles_inside_domain() {
        let mut s = sim(8);
        s.seed_particles(7);
        assert_eq!(s.particles().len(), 7);
        for p in s.particles().particles() {
            let pos = p.position();
            assert!(pos.x > 0.0 && pos.x < 1.0 && pos.y > 0.0 && pos.y < 1.0);
        }
    }

    #[test]
    fn test_tunable_commands() {
        let mut s = sim(8);
        s.apply(Command::IncreaseDiffusion).unwrap();
        s.apply(Command::IncreaseViscosity).unwrap();
        s.apply(Command::IncreaseViscosity).unwrap();
        s.apply(Command::IncreaseFluidTimeStep).unwrap();
        s.apply(Command::DecreaseParticleTimeStep).unwrap();
        s.apply(Command::ToggleObstacle).unwrap();
        assert!((s.fluid().diffusion() - 0.001).abs() < 1e-12);
        assert!((s.fluid().viscosity() - 0.002).abs() < 1e-12);
        assert!((s.fluid().time_step() - 0.2).abs() < 1e-12);
        assert_eq!(s.particles().time_step(), 0.01);
        assert!(s.fluid().obstacle_enabled());
    }

    #[test]
    fn test_force_and_source_commands() {
        let mut s = sim(8);
        let u = s.fluid().velocity_u(3, 3);
        let d = s.fluid().density(3, 3);
        s.apply(Command::AddForce { cell: (3, 3), force: DVec2::new(1.0, 0.0) }).unwrap();
        s.apply(Command::AddSource { cell: (3, 3), amount: 2.0 }).unwrap();
        s.apply(Command::AddSink { cell: (3, 3), amount: 0.5 }).unwrap();
        assert!((s.fluid().velocity_u(3, 3) - u - 1.0).abs() < 1e-12);
        assert!((s.fluid().density(3, 3) - d - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_reset_fluid_restores_initial_state() {
        let mut s = sim(16);
        let initial = s.fluid().fields().0.to_vec();
        s.set_animated(true, false);
        s.frame();
        s.frame();
        s.apply(Command::ResetFluid).unwrap();
        assert_eq!(s.fluid().fields().0, initial.as_slice());
        assert_eq!(s.fluid().elapsed(), 0.0);
    }

    #[test]
    fn test_from_config_applies_settings() {
        let mut cfg = Config::default();
        cfg.fluid.resolution = 32;
        cfg.fluid.diffusion = 5.0;
        cfg.fluid.boundary = BoundaryMode::FixedWall;
        cfg.fluid.time_step = 0.3;
        cfg.particles.time_step = 0.05;
        let s = Simulation::from_config(&cfg).unwrap();
        assert_eq!(s.fluid().resolution(), 32);
        assert_eq!(s.fluid().diffusion(), 1.0);
        assert_eq!(s.fluid().boundary_mode(), BoundaryMode::FixedWall);
        assert_eq!(s.fluid().time_step(), 0.3);
        assert_eq!(s.particles().time_step(), 0.05);
    }
}
