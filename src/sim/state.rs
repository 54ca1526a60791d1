//! Game state and core simulation types
//!
//! Everything the renderer and HUD read after a tick lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::boss::Boss;
use super::player::Player;
use super::shield::Shield;
use crate::tuning::Tuning;

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player can move and fire
    Playing,
    /// Player health hit zero (latched until restart)
    GameOver,
}

/// Player weapon selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WeaponMode {
    /// Light, rapid shots
    #[default]
    Asteroid,
    /// Heavier, slower shots with an impact splash
    Meteora,
}

impl WeaponMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponMode::Asteroid => "ASTEROID",
            WeaponMode::Meteora => "METEORA",
        }
    }
}

/// A bullet fired by the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerBullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Weapon active when the shot was fired
    pub weapon: WeaponMode,
}

/// A bullet fired by the boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossBullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// METEORA impact ring (visual only, never deals damage)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Splash {
    pub pos: Vec2,
    pub radius: f32,
    pub spawned_ms: f64,
}

impl Splash {
    /// Remaining opacity in [0, 1] at `now_ms`
    pub fn fade(&self, now_ms: f64, duration_ms: f64) -> f32 {
        if duration_ms <= 0.0 {
            return 0.0;
        }
        (1.0 - (now_ms - self.spawned_ms) / duration_ms).clamp(0.0, 1.0) as f32
    }
}

/// One-shot notifications produced during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    PlayerFired { weapon: WeaponMode },
    BossFired,
    BossHit { weapon: WeaponMode, damage: u32, remaining: u32 },
    BossDefeated,
    ShieldBlocked { remaining: u32 },
    ShieldBroken { until_ms: f64 },
    ShieldRestored,
    PlayerHit { damage: u32, remaining: u32, stunned: bool },
    GameOver,
    WeaponChanged { weapon: WeaponMode },
    Restarted,
}

/// Monotonic entity id source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Balance values this match runs with
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    pub boss: Boss,
    pub shield: Shield,
    /// Active player bullets (ascending id)
    pub player_bullets: Vec<PlayerBullet>,
    /// Active boss bullets (ascending id)
    pub boss_bullets: Vec<BossBullet>,
    #[serde(skip)]
    pub splashes: Vec<Splash>,
    /// Events from the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Clock reading of the most recent tick (ms)
    pub time_ms: f64,
    /// Ticks since the match started
    pub time_ticks: u64,
    pub ids: EntityIds,
}

impl GameState {
    /// Start a new match at clock time `start_ms`
    pub fn new(tuning: Tuning, start_ms: f64) -> Self {
        let player = Player::new(&tuning);
        let boss = Boss::new(&tuning.boss, start_ms);
        let shield = Shield::new(&tuning.shield);
        Self {
            tuning,
            phase: GamePhase::Playing,
            player,
            boss,
            shield,
            player_bullets: Vec::new(),
            boss_bullets: Vec::new(),
            splashes: Vec::new(),
            events: Vec::new(),
            time_ms: start_ms,
            time_ticks: 0,
            ids: EntityIds::default(),
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        self.ids.allocate()
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn boss_defeated(&self) -> bool {
        self.boss.defeated
    }

    /// Drop expired splashes
    pub fn prune_splashes(&mut self, now_ms: f64) {
        let duration = self.tuning.weapons.splash_duration_ms;
        self.splashes.retain(|s| now_ms - s.spawned_ms < duration);
    }
}
