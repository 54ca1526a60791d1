//! Game balance tuning
//!
//! Every value defaults to the constants in [`crate::consts`]. A JSON
//! document may override any subset of fields.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::consts::*;
use crate::sim::WeaponMode;

/// Errors raised while loading tuning overrides
#[derive(Debug)]
pub enum TuningError {
    /// Document was not valid JSON for [`Tuning`]
    Parse(serde_json::Error),
    /// A field holds a value the sim can't run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "malformed tuning JSON: {e}"),
            TuningError::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Playfield rectangle
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaTuning {
    pub width: f32,
    pub height: f32,
}

impl Default for ArenaTuning {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl ArenaTuning {
    /// Arena center point
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub radius: f32,
    /// Movement speed (units/sec)
    pub speed: f32,
    pub max_health: u32,
    pub aim_line_length: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            max_health: PLAYER_MAX_HEALTH,
            aim_line_length: AIM_LINE_LENGTH,
        }
    }
}

/// Per-weapon stats
///
/// No field-level defaults: each weapon has its own, and partial overrides
/// are merged onto them by [`Tuning::from_json`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponStats {
    /// Shots per second
    pub fire_rate: f32,
    pub damage: u32,
    /// Cosmetic impact splash radius (0 = none)
    pub splash_radius: f32,
}

impl WeaponStats {
    /// Minimum time between shots (ms)
    pub fn fire_interval_ms(&self) -> f64 {
        1000.0 / self.fire_rate as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    pub bullet_radius: f32,
    pub bullet_speed: f32,
    pub asteroid: WeaponStats,
    pub meteora: WeaponStats,
    pub splash_duration_ms: f64,
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            bullet_radius: BULLET_RADIUS,
            bullet_speed: BULLET_SPEED,
            asteroid: WeaponStats {
                fire_rate: ASTEROID_FIRE_RATE,
                damage: ASTEROID_TO_BOSS,
                splash_radius: 0.0,
            },
            meteora: WeaponStats {
                fire_rate: METEORA_FIRE_RATE,
                damage: METEORA_TO_BOSS,
                splash_radius: METEORA_SPLASH_RADIUS,
            },
            splash_duration_ms: SPLASH_DURATION_MS,
        }
    }
}

impl WeaponTuning {
    pub fn stats(&self, mode: WeaponMode) -> &WeaponStats {
        match mode {
            WeaponMode::Asteroid => &self.asteroid,
            WeaponMode::Meteora => &self.meteora,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub max_health: u32,
    pub bullet_radius: f32,
    pub bullet_speed: f32,
    /// Shots per second
    pub fire_rate: f32,
    pub bullet_damage: u32,
    pub flash_ms: f64,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            x: BOSS_X,
            y: BOSS_Y,
            radius: BOSS_RADIUS,
            max_health: BOSS_MAX_HEALTH,
            bullet_radius: BOSS_BULLET_RADIUS,
            bullet_speed: BOSS_BULLET_SPEED,
            fire_rate: BOSS_FIRE_RATE,
            bullet_damage: BOSS_BULLET_DAMAGE,
            flash_ms: BOSS_FLASH_MS,
        }
    }
}

impl BossTuning {
    pub fn fire_interval_ms(&self) -> f64 {
        1000.0 / self.fire_rate as f64
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShieldTuning {
    pub max_health: u32,
    /// Reach of the shield from the player's center
    pub radius: f32,
    /// Full angular width of the arc (degrees)
    pub arc_deg: f32,
    pub follow_deg_per_sec: f32,
    pub block_damage: u32,
    pub stun_ms: f64,
    pub stun_damage_multiplier: f32,
}

impl Default for ShieldTuning {
    fn default() -> Self {
        Self {
            max_health: SHIELD_MAX_HEALTH,
            radius: SHIELD_RADIUS,
            arc_deg: SHIELD_ARC_DEG,
            follow_deg_per_sec: SHIELD_FOLLOW_DEG_PER_SEC,
            block_damage: SHIELD_BLOCK_DAMAGE,
            stun_ms: SHIELD_STUN_MS,
            stun_damage_multiplier: STUN_DAMAGE_MULTIPLIER,
        }
    }
}

impl ShieldTuning {
    /// Half of the blocking arc (radians)
    pub fn half_arc(&self) -> f32 {
        (self.arc_deg / 2.0).to_radians()
    }

    /// Largest rotation per second (radians)
    pub fn follow_rad_per_sec(&self) -> f32 {
        self.follow_deg_per_sec.to_radians()
    }
}

/// Complete balance sheet for a match
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub arena: ArenaTuning,
    pub player: PlayerTuning,
    pub weapons: WeaponTuning,
    pub boss: BossTuning,
    pub shield: ShieldTuning,
}

impl Tuning {
    /// Parse overrides from JSON (missing fields keep their defaults)
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let overrides: Value = serde_json::from_str(json)?;
        let mut merged = serde_json::to_value(Tuning::default())?;
        merge_json(&mut merged, overrides);

        let tuning: Tuning = serde_json::from_value(merged)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check that every value is usable by the sim
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, v: f32) -> Result<(), TuningError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }
        fn nonzero(field: &'static str, v: u32) -> Result<(), TuningError> {
            if v > 0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be greater than zero",
                })
            }
        }

        positive("arena.width", self.arena.width)?;
        positive("arena.height", self.arena.height)?;

        positive("player.radius", self.player.radius)?;
        positive("player.speed", self.player.speed)?;
        nonzero("player.max_health", self.player.max_health)?;

        positive("weapons.bullet_radius", self.weapons.bullet_radius)?;
        positive("weapons.bullet_speed", self.weapons.bullet_speed)?;
        positive("weapons.asteroid.fire_rate", self.weapons.asteroid.fire_rate)?;
        positive("weapons.meteora.fire_rate", self.weapons.meteora.fire_rate)?;

        positive("boss.radius", self.boss.radius)?;
        positive("boss.bullet_radius", self.boss.bullet_radius)?;
        positive("boss.bullet_speed", self.boss.bullet_speed)?;
        positive("boss.fire_rate", self.boss.fire_rate)?;
        nonzero("boss.max_health", self.boss.max_health)?;

        positive("shield.radius", self.shield.radius)?;
        positive("shield.follow_deg_per_sec", self.shield.follow_deg_per_sec)?;
        nonzero("shield.max_health", self.shield.max_health)?;
        if !(self.shield.arc_deg > 0.0 && self.shield.arc_deg <= 360.0) {
            return Err(TuningError::Invalid {
                field: "shield.arc_deg",
                reason: "must be in (0, 360]",
            });
        }
        if !(self.shield.stun_damage_multiplier >= 1.0 && self.shield.stun_damage_multiplier.is_finite()) {
            return Err(TuningError::Invalid {
                field: "shield.stun_damage_multiplier",
                reason: "must be at least 1",
            });
        }
        if !(self.shield.stun_ms.is_finite() && self.shield.stun_ms >= 0.0) {
            return Err(TuningError::Invalid {
                field: "shield.stun_ms",
                reason: "must be a non-negative finite duration",
            });
        }

        Ok(())
    }

    /// Load overrides from a JSON string, falling back to defaults on error
    pub fn load_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning overrides: {e}");
                    Self::default()
                }
            },
            None => Self::default(),
        }
    }
}

/// Overlay `overrides` onto `base`, recursing into objects
fn merge_json(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                merge_json(base.entry(key).or_insert(Value::Null), value);
            }
        }
        (base, value) => *base = value,
    }
}
