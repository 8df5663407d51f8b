//! Taylor–Green vortex: a doubly periodic exact solution of the
//! incompressible Navier–Stokes equations on the unit square.

use std::f64::consts::TAU;

pub fn taylor_green_u(t: f64, x: f64, y: f64) -> f64 {
    -(-2.0 * t).exp() * (TAU * x).cos() * (TAU * y).sin()
}

pub fn taylor_green_v(t: f64, x: f64, y: f64) -> f64 {
    (-2.0 * t).exp() * (TAU * x).sin() * (TAU * y).cos()
}

pub fn taylor_green_density(t: f64, x: f64, y: f64) -> f64 {
    -0.25 * (-4.0 * t).exp() * ((TAU * x).cos() + (TAU * y).cos())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_velocity_vanishes_at_cell_corners() {
        // sin(2πy) = 0 on y = 0, sin(2πx) = 0 on x = 0
        assert!(taylor_green_u(0.0, 0.3, 0.0).abs() < 1e-12);
        assert!(taylor_green_v(0.0, 0.0, 0.7).abs() < 1e-12);
    }

    #[test]
    fn test_peak_speed_is_unit() {
        assert!((taylor_green_u(0.0, 0.0, 0.25) + 1.0).abs() < 1e-12);
        assert!((taylor_green_v(0.0, 0.25, 0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_decays_in_time() {
        let u0 = taylor_green_u(0.0, 0.1, 0.2).abs();
        let u1 = taylor_green_u(1.0, 0.1, 0.2).abs();
        assert!(u1 < u0);
        let d0 = taylor_green_density(0.0, 0.0, 0.0);
        assert!((d0 + 0.5).abs() < 1e-12);
        assert!(taylor_green_density(1.0, 0.0, 0.0).abs() < d0.abs());
    }

    #[test]
    fn test_doubly_periodic() {
        for &(x, y) in &[(0.1, 0.2), (0.45, 0.9), (0.77, 0.03)] {
            assert!((taylor_green_u(0.0, x, y) - taylor_green_u(0.0, x + 1.0, y)).abs() < 1e-12);
            assert!((taylor_green_v(0.0, x, y) - taylor_green_v(0.0, x, y + 1.0)).abs() < 1e-12);
        }
    }
}
