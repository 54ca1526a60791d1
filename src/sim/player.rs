//! Player controller: movement, aim, firing and weapon selection

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::clamp_to_arena;
use super::state::{EntityIds, PlayerBullet, WeaponMode};
use crate::tuning::{ArenaTuning, Tuning, WeaponTuning};
use crate::{angle_between, direction_to};

/// The player-controlled ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    pub health: u32,
    pub max_health: u32,
    pub weapon: WeaponMode,
    /// Direction toward the pointer (radians)
    pub aim_angle: f32,
    /// Clock reading of the last shot that produced a bullet
    last_fired_ms: Option<f64>,
}

impl Player {
    /// Spawn at the arena center
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.arena.center(),
            radius: tuning.player.radius,
            health: tuning.player.max_health,
            max_health: tuning.player.max_health,
            weapon: WeaponMode::default(),
            aim_angle: 0.0,
            last_fired_ms: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Integrate movement along `direction` (any length; zero = no-op)
    pub fn move_by(&mut self, direction: Vec2, dt_secs: f32, speed: f32, arena: &ArenaTuning) {
        let Some(dir) = direction.try_normalize() else {
            return;
        };
        self.pos += dir * speed * dt_secs;
        self.pos = clamp_to_arena(self.pos, self.radius, arena);
    }

    /// Point the aim at `pointer`; unchanged when the pointer sits on the player
    pub fn update_aim(&mut self, pointer: Vec2) {
        if let Some(angle) = angle_between(self.pos, pointer) {
            self.aim_angle = angle;
        }
    }

    /// Fire toward `pointer` if the weapon's throttle has elapsed
    ///
    /// An id is only allocated when a bullet is produced.
    pub fn try_fire(
        &mut self,
        now_ms: f64,
        pointer: Vec2,
        weapons: &WeaponTuning,
        ids: &mut EntityIds,
    ) -> Option<PlayerBullet> {
        let interval = weapons.stats(self.weapon).fire_interval_ms();
        if let Some(last) = self.last_fired_ms {
            if now_ms - last < interval {
                return None;
            }
        }

        let dir = direction_to(self.pos, pointer)?;
        self.last_fired_ms = Some(now_ms);

        Some(PlayerBullet {
            id: ids.allocate(),
            pos: self.pos,
            vel: dir * weapons.bullet_speed,
            radius: weapons.bullet_radius,
            weapon: self.weapon,
        })
    }

    /// Select the weapon for subsequent shots. Returns true if it changed.
    pub fn set_weapon(&mut self, mode: WeaponMode) -> bool {
        let changed = self.weapon != mode;
        self.weapon = mode;
        changed
    }

    /// Subtract health (floored at 0). Returns true if this hit was fatal.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        let was_alive = self.is_alive();
        self.health = self.health.saturating_sub(amount);
        was_alive && !self.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn player() -> (Player, Tuning) {
        let tuning = Tuning::default();
        (Player::new(&tuning), tuning)
    }

    #[test]
    fn test_move_diagonal_is_normalized() {
        let (mut p, t) = player();
        let start = p.pos;
        p.move_by(Vec2::new(1.0, 1.0), 1.0, t.player.speed, &t.arena);
        assert!(((p.pos - start).length() - 260.0).abs() < 1e-3);
    }

    #[test]
    fn test_move_zero_direction_is_noop() {
        let (mut p, t) = player();
        let start = p.pos;
        p.move_by(Vec2::ZERO, 1.0, t.player.speed, &t.arena);
        assert_eq!(p.pos, start);
    }

    #[test]
    fn test_move_clamps_to_arena() {
        let (mut p, t) = player();
        p.move_by(Vec2::new(-1.0, 0.0), 10.0, t.player.speed, &t.arena);
        assert_eq!(p.pos.x, 16.0);
        p.move_by(Vec2::new(0.0, 1.0), 10.0, t.player.speed, &t.arena);
        assert_eq!(p.pos.y, 540.0 - 16.0);
    }

    #[test]
    fn test_aim_degenerate_keeps_angle() {
        let (mut p, _) = player();
        p.update_aim(p.pos + Vec2::new(0.0, 10.0));
        let angle = p.aim_angle;
        assert!((angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        p.update_aim(p.pos);
        assert_eq!(p.aim_angle, angle);
    }

    #[test]
    fn test_fire_direction_and_speed() {
        let (mut p, t) = player();
        let mut ids = EntityIds::default();
        let b = p
            .try_fire(0.0, Vec2::new(580.0, 270.0), &t.weapons, &mut ids)
            .unwrap();
        assert_eq!(b.pos, Vec2::new(480.0, 270.0));
        assert_eq!(b.vel, Vec2::new(650.0, 0.0));
        assert_eq!(b.radius, 4.0);
        assert_eq!(b.weapon, WeaponMode::Asteroid);
    }

    #[test]
    fn test_fire_throttle() {
        let (mut p, t) = player();
        let mut ids = EntityIds::default();
        let target = Vec2::new(580.0, 270.0);
        let interval = t.weapons.asteroid.fire_interval_ms();

        assert!(p.try_fire(0.0, target, &t.weapons, &mut ids).is_some());
        assert!(p.try_fire(interval - 1.0, target, &t.weapons, &mut ids).is_none());
        assert!(p.try_fire(interval, target, &t.weapons, &mut ids).is_some());
        assert!(p.try_fire(2.0 * interval, target, &t.weapons, &mut ids).is_some());
    }

    #[test]
    fn test_degenerate_fire_keeps_throttle_open() {
        let (mut p, t) = player();
        let mut ids = EntityIds::default();
        let pos = p.pos;
        assert!(p.try_fire(0.0, pos, &t.weapons, &mut ids).is_none());
        // No bullet was produced, so the next valid shot is not throttled
        assert!(p.try_fire(1.0, pos + Vec2::X, &t.weapons, &mut ids).is_some());
    }

    #[test]
    fn test_ids_only_consumed_on_fire() {
        let (mut p, t) = player();
        let mut ids = EntityIds::default();
        let target = Vec2::new(0.0, 0.0);
        let a = p.try_fire(0.0, target, &t.weapons, &mut ids).unwrap();
        assert!(p.try_fire(1.0, target, &t.weapons, &mut ids).is_none());
        let b = p.try_fire(500.0, target, &t.weapons, &mut ids).unwrap();
        assert_eq!((a.id, b.id), (1, 2));
    }

    #[test]
    fn test_weapon_switch_tags_new_bullets_only() {
        let (mut p, t) = player();
        let mut ids = EntityIds::default();
        let target = Vec2::new(0.0, 0.0);
        let first = p.try_fire(0.0, target, &t.weapons, &mut ids).unwrap();
        assert!(p.set_weapon(WeaponMode::Meteora));
        assert!(!p.set_weapon(WeaponMode::Meteora));
        let second = p.try_fire(1000.0, target, &t.weapons, &mut ids).unwrap();
        assert_eq!(first.weapon, WeaponMode::Asteroid);
        assert_eq!(second.weapon, WeaponMode::Meteora);
    }

    #[test]
    fn test_fatal_damage_reported_once() {
        let (mut p, _) = player();
        assert!(!p.apply_damage(60));
        assert!(p.apply_damage(60));
        assert_eq!(p.health, 0);
        assert!(!p.apply_damage(10));
        assert_eq!(p.health, 0);
    }

    proptest! {
        #[test]
        fn prop_health_stays_in_range(hits in proptest::collection::vec(0u32..200, 0..50)) {
            let (mut p, _) = player();
            for h in hits {
                p.apply_damage(h);
                prop_assert!(p.health <= p.max_health);
            }
        }

        #[test]
        fn prop_shots_closer_than_interval_yield_one(gap in 0.0f64..142.0) {
            let (mut p, t) = player();
            let mut ids = EntityIds::default();
            let target = Vec2::new(0.0, 0.0);
            let fired = [0.0, gap]
                .iter()
                .filter(|&&now| p.try_fire(500.0 + now, target, &t.weapons, &mut ids).is_some())
                .count();
            prop_assert_eq!(fired, 1);
        }
    }
}
