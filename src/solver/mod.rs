mod analytic;
pub mod boundary;
mod core;
pub mod diagnostics;
pub mod params;

// Re-export public API
pub use boundary::BoundaryMode;
pub use diagnostics::Extrema;
pub use params::{SolverParams, MAX_RESOLUTION, MIN_RESOLUTION};

use glam::DVec2;

use crate::error::SimError;
use crate::state::{alloc_field, idx, FieldPair};
use crate::timestep::TimeStepController;
use analytic::{taylor_green_density, taylor_green_u, taylor_green_v};
use boundary::set_bnd;
use self::core::{advect, diffuse, project};
use params::{clamp_unit, snap_resolution, DIFFUSION_STEP, FLUID_TIME_STEP, VISCOSITY_STEP};

/// Eulerian stable-fluids solver on an `(N+2) x (N+2)` padded grid.
///
/// Density and both velocity components are ping-pong pairs; divergence and
/// pressure are scratch fields rebuilt by every projection. All eight fields
/// are always the same length and are reallocated together.
#[derive(Debug)]
pub struct FluidGrid {
    params: SolverParams,
    mode: BoundaryMode,
    time_step: TimeStepController,
    obstacle: bool,
    elapsed: f64,
    div: Vec<f64>,
    p: Vec<f64>,
    d: FieldPair,
    u: FieldPair,
    v: FieldPair,
    extrema: Extrema,
}

impl FluidGrid {
    /// Allocate and initialize a grid with the Taylor–Green vortex.
    pub fn new(params: SolverParams) -> Result<Self, SimError> {
        let mut params = params;
        params.resolution = snap_resolution(params.resolution);
        params.diff = clamp_unit(params.diff);
        params.visc = clamp_unit(params.visc);
        let n = params.resolution;
        let mut grid = Self {
            params,
            mode: BoundaryMode::default(),
            time_step: TimeStepController::new(FLUID_TIME_STEP),
            obstacle: false,
            elapsed: 0.0,
            div: alloc_field(n)?,
            p: alloc_field(n)?,
            d: FieldPair::new(n)?,
            u: FieldPair::new(n)?,
            v: FieldPair::new(n)?,
            extrema: Extrema::default(),
        };
        grid.initial_condition();
        Ok(grid)
    }

    /// Reallocate every field for the current resolution, zero it and impose
    /// the analytic initial condition. Discards all simulation history.
    ///
    /// Fields are built before any old one is released, so a failed
    /// allocation leaves the grid untouched.
    pub fn init(&mut self) -> Result<(), SimError> {
        let n = self.params.resolution;
        let div = alloc_field(n)?;
        let p = alloc_field(n)?;
        let d = FieldPair::new(n)?;
        let u = FieldPair::new(n)?;
        let v = FieldPair::new(n)?;

        self.div = div;
        self.p = p;
        self.d = d;
        self.u = u;
        self.v = v;
        self.elapsed = 0.0;
        self.initial_condition();
        log::debug!("initialized {}x{} fluid grid ({} cells per field)", n, n, self.div.len());
        Ok(())
    }

    /// Taylor–Green vortex at t = 0, evaluated at every interior cell centre.
    fn initial_condition(&mut self) {
        let n = self.params.resolution;
        let h = self.spacing();
        for j in 1..=n {
            let y = (j as f64 - 0.5) * h;
            for i in 1..=n {
                let x = (i as f64 - 0.5) * h;
                let ii = idx(i, j, n);
                self.u.current_mut()[ii] = taylor_green_u(0.0, x, y);
                self.v.current_mut()[ii] = taylor_green_v(0.0, x, y);
                self.d.current_mut()[ii] = taylor_green_density(0.0, x, y);
            }
        }
        set_bnd(self.mode, self.u.current_mut(), n);
        set_bnd(self.mode, self.v.current_mut(), n);
        set_bnd(self.mode, self.d.current_mut(), n);
        self.update_extrema();
    }

    /// Advance the fluid by one time step.
    pub fn tick(&mut self) {
        let n = self.params.resolution;
        let dt = self.time_step.step();
        let iter = self.params.relax_iter;
        let mode = self.mode;

        // Diffuse velocity
        self.u.swap();
        self.v.swap();
        {
            let (dst, src) = self.u.split_mut();
            diffuse(mode, dst, src, self.params.visc, dt, iter, n);
        }
        {
            let (dst, src) = self.v.split_mut();
            diffuse(mode, dst, src, self.params.visc, dt, iter, n);
        }

        // Advect velocity through the diffused field
        self.u.swap();
        self.v.swap();
        {
            let (dst, src) = self.u.split_mut();
            advect(mode, dst, src, src, self.v.previous(), dt, n);
        }
        {
            let (dst, src) = self.v.split_mut();
            advect(mode, dst, src, self.u.previous(), src, dt, n);
        }

        self.project();

        // Diffuse + advect density through the final velocity
        self.d.swap();
        {
            let (dst, src) = self.d.split_mut();
            diffuse(mode, dst, src, self.params.diff, dt, iter, n);
        }
        self.d.swap();
        {
            let (dst, src) = self.d.split_mut();
            advect(mode, dst, src, self.u.current(), self.v.current(), dt, n);
        }

        self.update_extrema();
        self.apply_obstacle();
        self.elapsed += dt;
    }

    /// Make the current velocity field divergence-free.
    fn project(&mut self) {
        project(
            self.mode,
            self.u.current_mut(),
            self.v.current_mut(),
            &mut self.p,
            &mut self.div,
            self.params.relax_iter,
            self.params.resolution,
        );
    }

    fn update_extrema(&mut self) {
        self.extrema = Extrema::compute(self.u.current(), self.v.current(), self.d.current(), self.params.resolution);
    }

    /// Inclusive cell range `[lo, hi]` (same on both axes) covered by the
    /// square obstacle, or `None` when it is disabled or the grid is too coarse.
    pub fn obstacle_bounds(&self) -> Option<(usize, usize)> {
        let n = self.params.resolution;
        if !self.obstacle || n <= 8 {
            return None;
        }
        let center = n / 2;
        let half = n / 8;
        Some((center - half, center + half))
    }

    fn apply_obstacle(&mut self) {
        let Some((lo, hi)) = self.obstacle_bounds() else {
            return;
        };
        let n = self.params.resolution;
        for j in lo..=hi {
            for i in lo..=hi {
                let ii = idx(i, j, n);
                self.u.current_mut()[ii] = 0.0;
                self.v.current_mut()[ii] = 0.0;
                self.d.current_mut()[ii] = 0.0;
            }
        }
    }

    // --- Resolution ---

    /// Double the resolution. Returns `Ok(false)` when already at the maximum.
    pub fn increase_resolution(&mut self) -> Result<bool, SimError> {
        let n = self.params.resolution * 2;
        if n > MAX_RESOLUTION {
            return Ok(false);
        }
        self.resize(n).map(|()| true)
    }

    /// Halve the resolution. Returns `Ok(false)` when already at the minimum.
    pub fn decrease_resolution(&mut self) -> Result<bool, SimError> {
        let n = self.params.resolution / 2;
        if n < MIN_RESOLUTION {
            return Ok(false);
        }
        self.resize(n).map(|()| true)
    }

    /// Snap `n` to a legal power of two and reinitialize if it changed.
    pub fn set_resolution(&mut self, n: usize) -> Result<bool, SimError> {
        let n = snap_resolution(n);
        if n == self.params.resolution {
            return Ok(false);
        }
        self.resize(n).map(|()| true)
    }

    fn resize(&mut self, n: usize) -> Result<(), SimError> {
        let old = self.params.resolution;
        self.params.resolution = n;
        if let Err(e) = self.init() {
            self.params.resolution = old;
            return Err(e);
        }
        log::debug!("resized fluid grid {} -> {}", old, n);
        Ok(())
    }

    // --- Tunables ---

    pub fn boundary_mode(&self) -> BoundaryMode {
        self.mode
    }

    pub fn set_boundary_mode(&mut self, mode: BoundaryMode) {
        self.mode = mode;
    }

    pub fn toggle_boundary_mode(&mut self) {
        self.mode = self.mode.toggle();
    }

    pub fn diffusion(&self) -> f64 {
        self.params.diff
    }

    pub fn set_diffusion(&mut self, diff: f64) {
        self.params.set_diffusion(diff);
    }

    pub fn increase_diffusion(&mut self) {
        self.params.set_diffusion(self.params.diff + DIFFUSION_STEP);
    }

    pub fn decrease_diffusion(&mut self) {
        self.params.set_diffusion(self.params.diff - DIFFUSION_STEP);
    }

    pub fn viscosity(&self) -> f64 {
        self.params.visc
    }

    pub fn set_viscosity(&mut self, visc: f64) {
        self.params.set_viscosity(visc);
    }

    pub fn increase_viscosity(&mut self) {
        self.params.set_viscosity(self.params.visc + VISCOSITY_STEP);
    }

    pub fn decrease_viscosity(&mut self) {
        self.params.set_viscosity(self.params.visc - VISCOSITY_STEP);
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

    pub fn obstacle_enabled(&self) -> bool {
        self.obstacle
    }

    pub fn set_obstacle(&mut self, enabled: bool) {
        self.obstacle = enabled;
    }

    // --- Read accessors ---

    pub fn resolution(&self) -> usize {
        self.params.resolution
    }

    /// Cell width in normalized domain units.
    pub fn spacing(&self) -> f64 {
        1.0 / self.params.resolution as f64
    }

    /// Simulated time since the last (re)initialization.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn extrema(&self) -> Extrema {
        self.extrema
    }

    /// Index of `(i, j)` on the padded grid, ghosts included.
    ///
    /// # Panics
    /// If `i` or `j` exceeds `N + 1`.
    fn cell(&self, i: usize, j: usize) -> usize {
        let n = self.params.resolution;
        assert!(i <= n + 1 && j <= n + 1, "cell ({}, {}) outside the padded {}x{} grid", i, j, n + 2, n + 2);
        idx(i, j, n)
    }

    /// Index of the interior cell nearest to `(i, j)`.
    fn interior_cell(&self, i: usize, j: usize) -> usize {
        let n = self.params.resolution;
        idx(i.clamp(1, n), j.clamp(1, n), n)
    }

    pub fn velocity_u(&self, i: usize, j: usize) -> f64 {
        self.u.current()[self.cell(i, j)]
    }

    pub fn velocity_v(&self, i: usize, j: usize) -> f64 {
        self.v.current()[self.cell(i, j)]
    }

    pub fn velocity(&self, i: usize, j: usize) -> DVec2 {
        let ii = self.cell(i, j);
        DVec2::new(self.u.current()[ii], self.v.current()[ii])
    }

    pub fn density(&self, i: usize, j: usize) -> f64 {
        self.d.current()[self.cell(i, j)]
    }

    /// Current u, v and density fields, ghost border included, row-major.
    pub fn fields(&self) -> (&[f64], &[f64], &[f64]) {
        (self.u.current(), self.v.current(), self.d.current())
    }

    /// Padded-grid cell sampled for the normalized `position`: `floor(p * N)`
    /// on each axis, clamped to `[0, N-1]`. Coordinates outside [0, 1] and NaN
    /// map to the nearest edge.
    pub fn cell_containing(&self, position: DVec2) -> (usize, usize) {
        let n = self.params.resolution;
        let to_cell = |c: f64| ((c * n as f64).floor().max(0.0) as usize).min(n - 1);
        (to_cell(position.x), to_cell(position.y))
    }

    /// Nearest-cell velocity at a normalized position.
    pub fn velocity_at(&self, position: DVec2) -> DVec2 {
        let (i, j) = self.cell_containing(position);
        self.velocity(i, j)
    }

    // --- Perturbations ---

    /// Add a force to the current velocity at one interior cell.
    pub fn add_impulse(&mut self, i: usize, j: usize, force: DVec2) {
        let ii = self.interior_cell(i, j);
        self.u.current_mut()[ii] += force.x;
        self.v.current_mut()[ii] += force.y;
    }

    pub fn add_source(&mut self, i: usize, j: usize, amount: f64) {
        let ii = self.interior_cell(i, j);
        self.d.current_mut()[ii] += amount;
    }

    pub fn add_sink(&mut self, i: usize, j: usize, amount: f64) {
        let ii = self.interior_cell(i, j);
        self.d.current_mut()[ii] -= amount;
    }
}
