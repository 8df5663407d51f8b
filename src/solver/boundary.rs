use serde::Deserialize;

use crate::state::idx;

/// Domain-edge policy shared by the grid solver and the tracer particles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Quantities wrap around to the opposite edge.
    #[default]
    Periodic,
    /// Solid wall: ghost cells mirror the interior with opposite sign.
    FixedWall,
}

impl BoundaryMode {
    pub fn toggle(self) -> Self {
        match self {
            BoundaryMode::Periodic => BoundaryMode::FixedWall,
            BoundaryMode::FixedWall => BoundaryMode::Periodic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BoundaryMode::Periodic => "periodic",
            BoundaryMode::FixedWall => "fixed wall",
        }
    }
}

/// Fill the ghost border of `x` from its interior according to `mode`.
pub fn set_bnd(mode: BoundaryMode, x: &mut [f64], n: usize) {
    match mode {
        BoundaryMode::Periodic => set_bnd_periodic(x, n),
        BoundaryMode::FixedWall => set_bnd_fixed(x, n),
    }
}

/// Periodic: every ghost copies the interior cell at the opposite edge.
/// Corners copy the diagonally opposite interior corner.
fn set_bnd_periodic(x: &mut [f64], n: usize) {
    for k in 1..=n {
        x[idx(0, k, n)] = x[idx(n, k, n)];
        x[idx(n + 1, k, n)] = x[idx(1, k, n)];
        x[idx(k, 0, n)] = x[idx(k, n, n)];
        x[idx(k, n + 1, n)] = x[idx(k, 1, n)];
    }

    x[idx(0, 0, n)] = x[idx(n, n, n)];
    x[idx(n + 1, 0, n)] = x[idx(1, n, n)];
    x[idx(0, n + 1, n)] = x[idx(n, 1, n)];
    x[idx(n + 1, n + 1, n)] = x[idx(1, 1, n)];
}

/// Fixed wall: edge ghosts negate their adjacent interior cell, corners are zero.
fn set_bnd_fixed(x: &mut [f64], n: usize) {
    for k in 1..=n {
        x[idx(0, k, n)] = -x[idx(1, k, n)];
        x[idx(n + 1, k, n)] = -x[idx(n, k, n)];
        x[idx(k, 0, n)] = -x[idx(k, 1, n)];
        x[idx(k, n + 1, n)] = -x[idx(k, n, n)];
    }

    x[idx(0, 0, n)] = 0.0;
    x[idx(n + 1, 0, n)] = 0.0;
    x[idx(0, n + 1, n)] = 0.0;
    x[idx(n + 1, n + 1, n)] = 0.0;
}

/// Keep a back-traced grid coordinate inside the bilinear sampling range
/// `[0.5, n + 0.5]`. Periodic jumps to the opposite edge, fixed wall clamps.
pub fn clamp_trace(mode: BoundaryMode, pos: f64, n: usize) -> f64 {
    let lo = 0.5;
    let hi = n as f64 + 0.5;
    if pos < lo {
        match mode {
            BoundaryMode::Periodic => hi,
            BoundaryMode::FixedWall => lo,
        }
    } else if pos > hi {
        match mode {
            BoundaryMode::Periodic => lo,
            BoundaryMode::FixedWall => hi,
        }
    } else {
        pos
    }
}
