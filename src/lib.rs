//! Boss Arena - A top-down arena shooter against a stationary boss
//!
//! Core modules:
//! - `sim`: Combat simulation (movement, projectiles, shield, damage)
//! - `tuning`: Data-driven game balance
//! - `hud`: Text labels the host shows over the arena
//! - `renderer`: Flat-vector WebGPU rendering

pub mod hud;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use hud::HudLabels;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Arena dimensions (world units, origin top-left, y down)
    pub const ARENA_WIDTH: f32 = 960.0;
    pub const ARENA_HEIGHT: f32 = 540.0;

    /// Longest frame delta the sim will integrate in one tick (ms)
    pub const MAX_FRAME_DT_MS: f64 = 100.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 16.0;
    pub const PLAYER_SPEED: f32 = 260.0;
    pub const PLAYER_MAX_HEALTH: u32 = 100;
    pub const AIM_LINE_LENGTH: f32 = 36.0;

    /// Player bullet defaults
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const BULLET_SPEED: f32 = 650.0;
    /// Shots per second
    pub const ASTEROID_FIRE_RATE: f32 = 7.0;
    pub const METEORA_FIRE_RATE: f32 = 4.0;

    /// Weapon damage against the boss
    pub const ASTEROID_TO_BOSS: u32 = 8;
    pub const METEORA_TO_BOSS: u32 = 12;
    /// METEORA impact splash (cosmetic only)
    pub const METEORA_SPLASH_RADIUS: f32 = 70.0;
    pub const SPLASH_DURATION_MS: f64 = 250.0;

    /// Boss defaults
    pub const BOSS_X: f32 = ARENA_WIDTH / 2.0;
    pub const BOSS_Y: f32 = 120.0;
    pub const BOSS_RADIUS: f32 = 36.0;
    pub const BOSS_MAX_HEALTH: u32 = 120;
    pub const BOSS_BULLET_RADIUS: f32 = 5.0;
    pub const BOSS_BULLET_SPEED: f32 = 480.0;
    /// Shots per second
    pub const BOSS_FIRE_RATE: f32 = 1.8;
    pub const BOSS_BULLET_DAMAGE: u32 = 10;
    pub const BOSS_FLASH_MS: f64 = 80.0;

    /// Shield defaults
    pub const SHIELD_MAX_HEALTH: u32 = 80;
    pub const SHIELD_RADIUS: f32 = 100.0;
    pub const SHIELD_ARC_DEG: f32 = 100.0;
    pub const SHIELD_FOLLOW_DEG_PER_SEC: f32 = 180.0;
    pub const SHIELD_BLOCK_DAMAGE: u32 = 6;
    pub const SHIELD_STUN_MS: f64 = 2000.0;
    /// Boss bullet damage multiplier while the shield is broken
    pub const STUN_DAMAGE_MULTIPLIER: f32 = 1.6;
}

/// Wrap an angle into (-π, π]
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    if !angle.is_finite() {
        return 0.0;
    }
    let mut wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped -= TAU;
    }
    wrapped
}

/// Angle of the vector from `from` to `to`, or `None` when the points coincide
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> Option<f32> {
    let d = to - from;
    if d.length_squared() > 0.0 {
        Some(d.y.atan2(d.x))
    } else {
        None
    }
}

/// Unit vector from `from` toward `to`, or `None` when degenerate
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}

/// Convert polar (r, theta) to cartesian offset
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_normalize_angle_range() {
        assert!((normalize_angle(PI) - PI).abs() < 1e-6);
        assert!((normalize_angle(-PI) - PI).abs() < 1e-6);
        assert!((normalize_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-5);
        assert!(normalize_angle(4.0 * PI).abs() < 1e-5);
        assert_eq!(normalize_angle(f32::NAN), 0.0);
    }

    #[test]
    fn test_angle_between_degenerate() {
        let p = Vec2::new(10.0, 10.0);
        assert!(angle_between(p, p).is_none());
        let a = angle_between(p, Vec2::new(10.0, 20.0)).unwrap();
        assert!((a - PI / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_direction_to() {
        let d = direction_to(Vec2::new(480.0, 270.0), Vec2::new(580.0, 270.0)).unwrap();
        assert_eq!(d, Vec2::X);
        assert!(direction_to(Vec2::ONE, Vec2::ONE).is_none());
    }
}
