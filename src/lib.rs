//! Stable-fluids grid solver with Lagrangian tracer particles.
//!
//! [`physics::Simulation`] owns one [`solver::FluidGrid`] and one
//! [`particle::ParticleSystem`] and advances them a frame at a time.

pub mod config;
pub mod error;
pub mod particle;
pub mod physics;
pub mod solver;
pub mod state;
pub mod timestep;
