//! Sun placement from normalized inclination and azimuth.

use glam::DVec3;
use std::f64::consts::PI;

/// Distance from the origin at which the sun is placed.
pub const DEFAULT_SUN_DISTANCE: f64 = 400_000.0;

/// Map `(inclination, azimuth, distance)` to a world-space offset.
///
/// ```text
/// theta = PI * (inclination - 0.5)
/// phi   = 2 * PI * (azimuth - 0.5)
/// x = distance * cos(phi)
/// y = distance * sin(phi) * sin(theta)
/// z = distance * sin(phi) * cos(theta)
/// ```
///
/// `x` does not depend on `theta`. Inputs are not range-checked; the
/// animation drives inclination past 1 and the result stays continuous.
pub fn compute_sun_offset(inclination: f64, azimuth: f64, distance: f64) -> DVec3 {
    let theta = PI * (inclination - 0.5);
    let phi = 2.0 * PI * (azimuth - 0.5);
    DVec3::new(
        distance * phi.cos(),
        distance * phi.sin() * theta.sin(),
        distance * phi.sin() * theta.cos(),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunDirection {
    pub inclination: f64,
    pub azimuth: f64,
    pub distance: f64,
}

impl SunDirection {
    pub fn offset(&self) -> DVec3 {
        compute_sun_offset(self.inclination, self.azimuth, self.distance)
    }
}

impl Default for SunDirection {
    fn default() -> Self {
        Self {
            inclination: 0.49,
            azimuth: 0.25,
            distance: DEFAULT_SUN_DISTANCE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let a = compute_sun_offset(0.3, 0.7, 1234.5);
        let b = compute_sun_offset(0.3, 0.7, 1234.5);
        assert_eq!(a, b);
    }

    #[test]
    fn test_half_half_points_down_x() {
        let offset = compute_sun_offset(0.5, 0.5, DEFAULT_SUN_DISTANCE);
        assert_eq!(offset, DVec3::new(DEFAULT_SUN_DISTANCE, 0.0, 0.0));
    }

    #[test]
    fn test_zero_distance_is_origin() {
        let offset = compute_sun_offset(0.123, 0.987, 0.0);
        assert_eq!(offset.x, 0.0);
        assert_eq!(offset.y.abs(), 0.0);
        assert_eq!(offset.z.abs(), 0.0);
    }

    #[test]
    fn test_defaults() {
        let offset = SunDirection::default().offset();
        assert!(offset.x.abs() < 1e-6);
        assert!((offset.y - 12_566.0).abs() <= 5.0, "y = {}", offset.y);
        assert!((offset.z + 399_803.0).abs() <= 1.0, "z = {}", offset.z);
    }

    #[test]
    fn test_length_equals_distance() {
        for (inclination, azimuth) in [(0.1, 0.2), (0.49, 0.25), (0.9, 0.75), (1.7, -0.3)] {
            let offset = compute_sun_offset(inclination, azimuth, 400_000.0);
            assert!((offset.length() - 400_000.0).abs() < 1e-6);
        }
    }

    #[test]
    fn test_x_ignores_inclination() {
        let a = compute_sun_offset(0.1, 0.3, 10.0);
        let b = compute_sun_offset(0.8, 0.3, 10.0);
        assert_eq!(a.x, b.x);
    }

    #[test]
    fn test_inclination_is_periodic() {
        let a = compute_sun_offset(0.25, 0.25, 1000.0);
        let b = compute_sun_offset(2.25, 0.25, 1000.0);
        assert!((a - b).length() < 1e-9);
    }
}
