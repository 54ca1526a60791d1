//! Directional shield: aim tracking, arc block test and the stun cycle
//!
//! States:
//! - `Active`: blocks boss bullets inside its arc
//! - `Broken`: blocks nothing until the stun deadline passes, and boss
//!   bullets that reach the player deal amplified damage

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::arc::ArcSector;
use crate::normalize_angle;
use crate::tuning::ShieldTuning;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ShieldStatus {
    Active,
    /// Stunned until this clock reading (ms)
    Broken { until_ms: f64 },
}

/// Outcome of a block attempt
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlockResult {
    /// Bullet is outside the arc or the shield is down
    NotBlocked,
    /// Bullet absorbed; shield still up
    Blocked { remaining: u32 },
    /// Bullet absorbed and the shield broke
    Broke { until_ms: f64 },
}

impl BlockResult {
    pub fn blocked(&self) -> bool {
        !matches!(self, BlockResult::NotBlocked)
    }
}

/// The player's shield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    /// Facing angle (radians)
    pub angle: f32,
    /// Half the angular width of the arc (radians)
    pub half_arc: f32,
    /// Reach from the player's center
    pub radius: f32,
    pub health: u32,
    pub max_health: u32,
    pub status: ShieldStatus,
}

impl Shield {
    pub fn new(tuning: &ShieldTuning) -> Self {
        Self {
            angle: 0.0,
            half_arc: tuning.half_arc(),
            radius: tuning.radius,
            health: tuning.max_health,
            max_health: tuning.max_health,
            status: ShieldStatus::Active,
        }
    }

    pub fn is_broken(&self) -> bool {
        matches!(self.status, ShieldStatus::Broken { .. })
    }

    /// The blocking sector, relative to the player
    pub fn sector(&self) -> ArcSector {
        ArcSector::new(self.angle, self.half_arc, self.radius)
    }

    /// Damage multiplier for boss bullets reaching the player
    pub fn damage_multiplier(&self, tuning: &ShieldTuning) -> f32 {
        if self.is_broken() {
            tuning.stun_damage_multiplier
        } else {
            1.0
        }
    }

    /// Recover from a stun if due, then turn toward `target_angle`
    ///
    /// The turn uses the shortest signed path, capped at the follow speed for
    /// this frame. Returns true if the shield came back up this call.
    pub fn update(&mut self, now_ms: f64, target_angle: f32, dt_secs: f32, tuning: &ShieldTuning) -> bool {
        let restored = self.try_recover(now_ms);

        let max_step = tuning.follow_rad_per_sec() * dt_secs;
        let delta = normalize_angle(target_angle - self.angle);
        self.angle = normalize_angle(self.angle + delta.clamp(-max_step, max_step));

        restored
    }

    /// Broken -> Active once the deadline has passed
    fn try_recover(&mut self, now_ms: f64) -> bool {
        match self.status {
            ShieldStatus::Broken { until_ms } if now_ms >= until_ms => {
                self.status = ShieldStatus::Active;
                self.health = self.max_health;
                log::info!("Shield restored");
                true
            }
            _ => false,
        }
    }

    /// Try to absorb a boss bullet at `bullet_pos` for a player at `player_pos`
    pub fn try_block(
        &mut self,
        player_pos: Vec2,
        bullet_pos: Vec2,
        now_ms: f64,
        tuning: &ShieldTuning,
    ) -> BlockResult {
        if self.is_broken() || !self.sector().contains_offset(bullet_pos - player_pos) {
            return BlockResult::NotBlocked;
        }

        self.health = self.health.saturating_sub(tuning.block_damage);
        if self.health == 0 {
            let until_ms = now_ms + tuning.stun_ms;
            self.status = ShieldStatus::Broken { until_ms };
            log::info!("Shield broken until {until_ms:.0}ms");
            BlockResult::Broke { until_ms }
        } else {
            BlockResult::Blocked {
                remaining: self.health,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn shield() -> (Shield, ShieldTuning) {
        let tuning = ShieldTuning::default();
        (Shield::new(&tuning), tuning)
    }

    const PLAYER: Vec2 = Vec2::new(480.0, 270.0);

    #[test]
    fn test_blocks_inside_arc_and_radius() {
        let (mut s, t) = shield();
        let r = s.try_block(PLAYER, PLAYER + Vec2::new(100.0, 0.0), 0.0, &t);
        assert_eq!(r, BlockResult::Blocked { remaining: 74 });
    }

    #[test]
    fn test_never_blocks_beyond_radius() {
        let (mut s, t) = shield();
        let r = s.try_block(PLAYER, PLAYER + Vec2::new(101.0, 0.0), 0.0, &t);
        assert_eq!(r, BlockResult::NotBlocked);
        assert_eq!(s.health, 80);
    }

    #[test]
    fn test_arc_edges() {
        let (mut s, t) = shield();
        let inside = PLAYER + crate::polar_to_cartesian(50.0, 49f32.to_radians());
        let outside = PLAYER + crate::polar_to_cartesian(50.0, 51f32.to_radians());
        assert!(s.try_block(PLAYER, inside, 0.0, &t).blocked());
        assert!(!s.try_block(PLAYER, outside, 0.0, &t).blocked());
        let behind = PLAYER + Vec2::new(-30.0, 0.0);
        assert!(!s.try_block(PLAYER, behind, 0.0, &t).blocked());
    }

    #[test]
    fn test_breaks_on_fourteenth_block() {
        let (mut s, t) = shield();
        let bullet = PLAYER + Vec2::new(60.0, 0.0);
        for _ in 0..13 {
            assert!(matches!(
                s.try_block(PLAYER, bullet, 500.0, &t),
                BlockResult::Blocked { .. }
            ));
        }
        assert_eq!(s.health, 2);
        assert_eq!(
            s.try_block(PLAYER, bullet, 500.0, &t),
            BlockResult::Broke { until_ms: 2500.0 }
        );
        assert_eq!(s.health, 0);
        assert!(s.is_broken());
        assert_eq!(s.damage_multiplier(&t), 1.6);
        // Broken shield blocks nothing
        assert_eq!(s.try_block(PLAYER, bullet, 600.0, &t), BlockResult::NotBlocked);
    }

    #[test]
    fn test_recovers_at_deadline() {
        let (mut s, t) = shield();
        s.health = 6;
        s.try_block(PLAYER, PLAYER + Vec2::X, 1000.0, &t);
        assert!(s.is_broken());

        assert!(!s.update(2999.0, 0.0, 0.016, &t));
        assert!(s.is_broken());
        assert!(s.update(3000.0, 0.0, 0.016, &t));
        assert!(!s.is_broken());
        assert_eq!(s.health, 80);
        assert_eq!(s.damage_multiplier(&t), 1.0);
    }

    #[test]
    fn test_tracking_is_rate_limited() {
        let (mut s, t) = shield();
        // 180°/s for 0.25s = 45°
        s.update(0.0, FRAC_PI_2, 0.25, &t);
        assert!((s.angle - PI / 4.0).abs() < 1e-5);
        s.update(0.0, FRAC_PI_2, 1.0, &t);
        assert!((s.angle - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_tracking_takes_shortest_path() {
        let (mut s, t) = shield();
        s.angle = 170f32.to_radians();
        s.update(0.0, -170f32.to_radians(), 10f32.to_radians() / t.follow_rad_per_sec(), &t);
        // Crossed ±180° instead of sweeping through 0
        assert!((s.angle.abs() - PI).abs() < 1e-4);
    }

    #[test]
    fn test_zero_dt_does_not_turn() {
        let (mut s, t) = shield();
        s.update(0.0, 1.0, 0.0, &t);
        assert_eq!(s.angle, 0.0);
    }

    proptest! {
        #[test]
        fn prop_step_is_bounded(start in -PI..PI, target in -PI..PI, dt in 0.0f32..2.0) {
            let (mut s, t) = shield();
            s.angle = start;
            s.update(0.0, target, dt, &t);
            let moved = normalize_angle(s.angle - start).abs();
            prop_assert!(moved <= t.follow_rad_per_sec() * dt + 1e-4);
        }

        #[test]
        fn prop_health_stays_in_range(blocks in 0usize..40) {
            let (mut s, t) = shield();
            for i in 0..blocks {
                s.try_block(PLAYER, PLAYER + Vec2::X, i as f64, &t);
                prop_assert!(s.health <= s.max_health);
            }
        }
    }
}
