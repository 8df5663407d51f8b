use crate::state::idx;

/// Running extrema of density and speed over the interior cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extrema {
    pub max_density: f64,
    pub min_density: f64,
    pub max_speed: f64,
    pub min_speed: f64,
}

impl Default for Extrema {
    fn default() -> Self {
        Self {
            max_density: f64::NEG_INFINITY,
            min_density: f64::INFINITY,
            max_speed: f64::NEG_INFINITY,
            min_speed: f64::INFINITY,
        }
    }
}

impl Extrema {
    /// Scan the interior of the current u, v and density fields.
    pub fn compute(u: &[f64], v: &[f64], d: &[f64], n: usize) -> Self {
        let mut ext = Self::default();
        for j in 1..=n {
            for i in 1..=n {
                let ii = idx(i, j, n);
                let speed = u[ii].hypot(v[ii]);
                ext.max_speed = ext.max_speed.max(speed);
                ext.min_speed = ext.min_speed.min(speed);
                ext.max_density = ext.max_density.max(d[ii]);
                ext.min_density = ext.min_density.min(d[ii]);
            }
        }
        ext
    }
}

/// Sum of squared central-difference divergence over interior cells.
pub fn divergence_norm(u: &[f64], v: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    for j in 1..=n {
        for i in 1..=n {
            let d = (u[idx(i + 1, j, n)] - u[idx(i - 1, j, n)]) + (v[idx(i, j + 1, n)] - v[idx(i, j - 1, n)]);
            sum += d * d;
        }
    }
    sum
}

/// Compute area-averaged kinetic energy: KE = 0.5 * <u² + v²>.
pub fn kinetic_energy(u: &[f64], v: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    for j in 1..=n {
        for i in 1..=n {
            let ii = idx(i, j, n);
            sum += u[ii] * u[ii] + v[ii] * v[ii];
        }
    }
    0.5 * sum / (n * n) as f64
}
