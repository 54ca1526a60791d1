//! Circle overlap and arena bounds tests
//!
//! Every entity is a circle. There is no physics response: overlap only
//! drives existence and damage.

use glam::Vec2;

use crate::tuning::ArenaTuning;

/// Two circles overlap when their centers are no farther apart than the
/// sum of their radii (touching counts)
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    let reach = a_radius + b_radius;
    a.distance_squared(b) <= reach * reach
}

/// Check if a circle has left the arena rectangle expanded by its own radius
#[inline]
pub fn outside_arena(pos: Vec2, radius: f32, arena: &ArenaTuning) -> bool {
    pos.x < -radius
        || pos.x > arena.width + radius
        || pos.y < -radius
        || pos.y > arena.height + radius
}

/// Keep a circle fully inside the arena
#[inline]
pub fn clamp_to_arena(pos: Vec2, radius: f32, arena: &ArenaTuning) -> Vec2 {
    let min = Vec2::splat(radius);
    let max = Vec2::new(arena.width - radius, arena.height - radius).max(min);
    pos.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap_touching() {
        assert!(circles_overlap(Vec2::ZERO, 4.0, Vec2::new(40.0, 0.0), 36.0));
        assert!(!circles_overlap(Vec2::ZERO, 4.0, Vec2::new(40.1, 0.0), 36.0));
        assert!(circles_overlap(Vec2::ZERO, 4.0, Vec2::new(3.0, 4.0), 1.0));
    }

    #[test]
    fn test_outside_arena() {
        let arena = ArenaTuning::default();
        assert!(!outside_arena(Vec2::new(964.0, 10.0), 4.0, &arena));
        assert!(outside_arena(Vec2::new(964.5, 10.0), 4.0, &arena));
        assert!(outside_arena(Vec2::new(10.0, -5.1), 5.0, &arena));
        assert!(!outside_arena(Vec2::new(-5.0, 545.0), 5.0, &arena));
        assert!(outside_arena(Vec2::new(10.0, 545.1), 5.0, &arena));
    }

    #[test]
    fn test_clamp_to_arena() {
        let arena = ArenaTuning::default();
        assert_eq!(
            clamp_to_arena(Vec2::new(-20.0, 600.0), 16.0, &arena),
            Vec2::new(16.0, 524.0)
        );
        assert_eq!(
            clamp_to_arena(Vec2::new(100.0, 100.0), 16.0, &arena),
            Vec2::new(100.0, 100.0)
        );
    }
}
