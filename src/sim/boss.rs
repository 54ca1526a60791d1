//! Boss controller: timed firing and the health/defeat state machine

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{BossBullet, EntityIds};
use crate::direction_to;
use crate::tuning::BossTuning;

/// Result of applying damage to the boss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BossDamage {
    /// Boss was already defeated; nothing changed
    Ignored,
    /// Health dropped but the boss is still standing
    Hit { remaining: u32 },
    /// This hit took the boss to zero
    Defeated,
}

/// The stationary boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub pos: Vec2,
    pub radius: f32,
    pub health: u32,
    pub max_health: u32,
    /// Terminal: once set the boss is hidden and collision-inert
    pub defeated: bool,
    /// Damage flash lasts until this clock reading (cosmetic)
    pub flash_until_ms: f64,
    last_fired_ms: f64,
}

impl Boss {
    /// Place the boss; its first shot comes one interval after `start_ms`
    pub fn new(tuning: &BossTuning, start_ms: f64) -> Self {
        Self {
            pos: Vec2::new(tuning.x, tuning.y),
            radius: tuning.radius,
            health: tuning.max_health,
            max_health: tuning.max_health,
            defeated: false,
            flash_until_ms: 0.0,
            last_fired_ms: start_ms,
        }
    }

    /// Whether the boss takes part in collisions
    pub fn is_collidable(&self) -> bool {
        !self.defeated
    }

    pub fn is_flashing(&self, now_ms: f64) -> bool {
        !self.defeated && now_ms < self.flash_until_ms
    }

    /// Fire at `target` if the fire timer has elapsed
    pub fn try_fire(
        &mut self,
        now_ms: f64,
        target: Vec2,
        tuning: &BossTuning,
        ids: &mut EntityIds,
    ) -> Option<BossBullet> {
        if self.defeated || now_ms - self.last_fired_ms < tuning.fire_interval_ms() {
            return None;
        }

        let dir = direction_to(self.pos, target)?;
        self.last_fired_ms = now_ms;

        Some(BossBullet {
            id: ids.allocate(),
            pos: self.pos,
            vel: dir * tuning.bullet_speed,
            radius: tuning.bullet_radius,
        })
    }

    /// Subtract health; reaching zero defeats the boss exactly once
    pub fn apply_damage(&mut self, amount: u32, now_ms: f64, tuning: &BossTuning) -> BossDamage {
        if self.defeated {
            return BossDamage::Ignored;
        }

        self.flash_until_ms = now_ms + tuning.flash_ms;
        self.health = self.health.saturating_sub(amount);

        if self.health == 0 {
            self.defeated = true;
            log::info!("Boss defeated");
            BossDamage::Defeated
        } else {
            BossDamage::Hit {
                remaining: self.health,
            }
        }
    }
}
