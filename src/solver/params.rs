/// Smallest and largest supported grid resolution (interior cells per side).
pub const MIN_RESOLUTION: usize = 4;
pub const MAX_RESOLUTION: usize = 512;
/// Grid time step and its adjustment increment.
pub const FLUID_TIME_STEP: f64 = 0.1;
/// Increment applied by a single diffusion / viscosity adjustment.
pub const DIFFUSION_STEP: f64 = 0.001;
pub const VISCOSITY_STEP: f64 = 0.001;

/// Solver parameters for the fluid simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParams {
    /// Interior cells per side, power of two in [MIN_RESOLUTION, MAX_RESOLUTION].
    pub resolution: usize,
    /// Density diffusion coefficient in [0, 1].
    pub diff: f64,
    /// Kinematic viscosity in [0, 1].
    pub visc: f64,
    /// Gauss-Seidel sweeps per relaxation solve.
    pub relax_iter: usize,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            resolution: 64,
            diff: 0.0,
            visc: 0.0,
            relax_iter: 20,
        }
    }
}

impl SolverParams {
    pub fn with_resolution(resolution: usize) -> Self {
        Self { resolution: snap_resolution(resolution), ..Self::default() }
    }

    pub fn set_diffusion(&mut self, diff: f64) {
        self.diff = clamp_unit(diff);
    }

    pub fn set_viscosity(&mut self, visc: f64) {
        self.visc = clamp_unit(visc);
    }
}

/// Saturate a coefficient into [0, 1]. NaN collapses to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Snap an arbitrary resolution to the nearest power of two in range.
/// Ties round up.
pub fn snap_resolution(n: usize) -> usize {
    let n = n.clamp(MIN_RESOLUTION, MAX_RESOLUTION);
    let upper = n.next_power_of_two();
    let lower = upper / 2;
    let snapped = if upper == n || upper - n <= n - lower { upper } else { lower };
    snapped.clamp(MIN_RESOLUTION, MAX_RESOLUTION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coefficients_saturate() {
        let mut params = SolverParams::default();
        params.set_diffusion(3.0);
        params.set_viscosity(-1.0);
        assert_eq!(params.diff, 1.0);
        assert_eq!(params.visc, 0.0);
        params.set_diffusion(f64::NAN);
        assert_eq!(params.diff, 0.0);
    }

    #[test]
    fn test_snap_resolution_clamps_and_rounds() {
        assert_eq!(snap_resolution(0), 4);
        assert_eq!(snap_resolution(5), 4);
        assert_eq!(snap_resolution(6), 8);
        assert_eq!(snap_resolution(100), 128);
        assert_eq!(snap_resolution(90), 64);
        assert_eq!(snap_resolution(10_000), 512);
        assert_eq!(snap_resolution(64), 64);
    }
}
