use super::boundary::{clamp_trace, set_bnd, BoundaryMode};
use crate::state::idx;

/// Gauss-Seidel iterative linear solver.
/// Solves: x[i,j] = (x0[i,j] + a * (neighbors)) / c
///
/// The boundary pass runs after every sweep, not just the last, so each sweep
/// reads ghost values consistent with the previous one.
pub fn lin_solve(mode: BoundaryMode, x: &mut [f64], x0: &[f64], a: f64, c: f64, iter: usize, n: usize) {
    let c_inv = 1.0 / c;
    for _ in 0..iter {
        for j in 1..=n {
            for i in 1..=n {
                let neighbors = x[idx(i - 1, j, n)]
                    + x[idx(i + 1, j, n)]
                    + x[idx(i, j - 1, n)]
                    + x[idx(i, j + 1, n)];
                x[idx(i, j, n)] = (x0[idx(i, j, n)] + a * neighbors) * c_inv;
            }
        }
        set_bnd(mode, x, n);
    }
}

/// Diffusion step: spreads the field over time.
/// a = dt * diff * N^2, c = 1 + 4a
pub fn diffuse(mode: BoundaryMode, x: &mut [f64], x0: &[f64], diff: f64, dt: f64, iter: usize, n: usize) {
    let n_f = n as f64;
    let a = dt * diff * n_f * n_f;
    let c = 1.0 + 4.0 * a;
    // Initialize x from x0
    x.copy_from_slice(x0);
    lin_solve(mode, x, x0, a, c, iter, n);
}

/// Semi-Lagrangian advection: traces each cell backwards through the velocity
/// field and samples `d0` bilinearly at the departure point.
pub fn advect(mode: BoundaryMode, d: &mut [f64], d0: &[f64], u: &[f64], v: &[f64], dt: f64, n: usize) {
    let dt0 = dt * n as f64;

    for j in 1..=n {
        for i in 1..=n {
            let ii = idx(i, j, n);
            // Trace backwards
            let x = clamp_trace(mode, i as f64 - dt0 * u[ii], n);
            let y = clamp_trace(mode, j as f64 - dt0 * v[ii], n);

            let i0 = x.floor() as usize;
            let i1 = i0 + 1;
            let j0 = y.floor() as usize;
            let j1 = j0 + 1;
            let s1 = x - i0 as f64;
            let s0 = 1.0 - s1;
            let t1 = y - j0 as f64;
            let t0 = 1.0 - t1;

            d[ii] = s0 * (t0 * d0[idx(i0, j0, n)] + t1 * d0[idx(i0, j1, n)])
                + s1 * (t0 * d0[idx(i1, j0, n)] + t1 * d0[idx(i1, j1, n)]);
        }
    }
    set_bnd(mode, d, n);
}

/// Pressure projection: enforces incompressibility (divergence-free velocity field).
pub fn project(mode: BoundaryMode, u: &mut [f64], v: &mut [f64], p: &mut [f64], div: &mut [f64], iter: usize, n: usize) {
    let h = 1.0 / n as f64;

    // Calculate divergence
    for j in 1..=n {
        for i in 1..=n {
            div[idx(i, j, n)] = -0.5
                * h
                * (u[idx(i + 1, j, n)] - u[idx(i - 1, j, n)]
                    + v[idx(i, j + 1, n)] - v[idx(i, j - 1, n)]);
            p[idx(i, j, n)] = 0.0;
        }
    }
    set_bnd(mode, div, n);
    set_bnd(mode, p, n);

    // Solve for pressure
    lin_solve(mode, p, div, 1.0, 4.0, iter, n);

    // Subtract pressure gradient from velocity
    let half_n = 0.5 * n as f64;
    for j in 1..=n {
        for i in 1..=n {
            u[idx(i, j, n)] -= half_n * (p[idx(i + 1, j, n)] - p[idx(i - 1, j, n)]);
            v[idx(i, j, n)] -= half_n * (p[idx(i, j + 1, n)] - p[idx(i, j - 1, n)]);
        }
    }
    set_bnd(mode, u, n);
    set_bnd(mode, v, n);
}
