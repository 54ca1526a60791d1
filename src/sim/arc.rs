//! Arc sector geometry for the shield
//!
//! A sector is a pie slice around an origin:
//! - center_angle: direction the sector faces
//! - half_width: angular reach on either side of the center
//! - radius: distance reach from the origin

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{normalize_angle, polar_to_cartesian};

/// A pie-slice sector in polar space, relative to an origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcSector {
    /// Facing angle (radians, normalized to (-π, π])
    pub center_angle: f32,
    /// Half of the angular width (radians)
    pub half_width: f32,
    /// Reach from the origin
    pub radius: f32,
}

impl ArcSector {
    pub fn new(center_angle: f32, half_width: f32, radius: f32) -> Self {
        Self {
            center_angle: normalize_angle(center_angle),
            half_width,
            radius,
        }
    }

    /// First edge angle (unwrapped: center - half_width)
    #[inline]
    pub fn start_angle(&self) -> f32 {
        self.center_angle - self.half_width
    }

    /// Second edge angle (unwrapped: center + half_width)
    #[inline]
    pub fn end_angle(&self) -> f32 {
        self.center_angle + self.half_width
    }

    /// Signed shortest angular offset of `theta` from the facing angle
    #[inline]
    pub fn offset_of(&self, theta: f32) -> f32 {
        normalize_angle(theta - self.center_angle)
    }

    /// Check if an angle lies within ±half_width of the facing angle
    pub fn contains_angle(&self, theta: f32) -> bool {
        self.offset_of(theta).abs() <= self.half_width
    }

    /// Check if a point (relative to the sector origin) lies inside the sector
    pub fn contains_offset(&self, offset: Vec2) -> bool {
        if offset.length_squared() > self.radius * self.radius {
            return false;
        }
        // A point sitting on the origin has no direction; treat it as covered
        if offset.length_squared() == 0.0 {
            return true;
        }
        self.contains_angle(offset.y.atan2(offset.x))
    }

    /// Sample points along the curved edge, offset from `origin`
    pub fn sample_edge(&self, origin: Vec2, num_points: usize) -> Vec<Vec2> {
        let start = self.start_angle();
        let span = self.end_angle() - start;

        (0..num_points)
            .map(|i| {
                let t = i as f32 / (num_points - 1).max(1) as f32;
                origin + polar_to_cartesian(self.radius, start + t * span)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_sector_contains_angle() {
        let sector = ArcSector::new(0.0, 50f32.to_radians(), 100.0);
        assert!(sector.contains_angle(0.3));
        assert!(sector.contains_angle(-0.3));
        assert!(sector.contains_angle(50f32.to_radians()));
        assert!(!sector.contains_angle(51f32.to_radians()));
        assert!(!sector.contains_angle(PI));
    }

    #[test]
    fn test_sector_contains_angle_wraparound() {
        // Facing left: the arc straddles ±180°
        let sector = ArcSector::new(PI, 20f32.to_radians(), 100.0);
        assert!(sector.contains_angle(PI - 0.1));
        assert!(sector.contains_angle(-PI + 0.1));
        assert!(!sector.contains_angle(0.0));
    }

    #[test]
    fn test_sector_contains_offset() {
        let sector = ArcSector::new(PI / 2.0, 50f32.to_radians(), 100.0);
        assert!(sector.contains_offset(Vec2::new(0.0, 100.0)));
        assert!(!sector.contains_offset(Vec2::new(0.0, 101.0)));
        assert!(!sector.contains_offset(Vec2::new(0.0, -50.0)));
        assert!(sector.contains_offset(Vec2::ZERO));
    }

    #[test]
    fn test_sample_edge_endpoints() {
        let sector = ArcSector::new(0.0, PI / 2.0, 10.0);
        let pts = sector.sample_edge(Vec2::new(5.0, 5.0), 3);
        assert_eq!(pts.len(), 3);
        assert!((pts[0] - Vec2::new(5.0, -5.0)).length() < 1e-4);
        assert!((pts[1] - Vec2::new(15.0, 5.0)).length() < 1e-4);
        assert!((pts[2] - Vec2::new(5.0, 15.0)).length() < 1e-4);
    }
}
