//! Combat simulation module
//!
//! All gameplay logic lives here. This module has no rendering or platform
//! dependencies:
//! - One tick per frame, fixed order
//! - Wall-clock throttles instead of timer callbacks
//! - Stable iteration order (by entity ID)

pub mod arc;
pub mod boss;
pub mod collision;
pub mod combat;
pub mod player;
pub mod shield;
pub mod state;
pub mod tick;

pub use arc::ArcSector;
pub use boss::{Boss, BossDamage};
pub use collision::{circles_overlap, clamp_to_arena, outside_arena};
pub use player::Player;
pub use shield::{BlockResult, Shield, ShieldStatus};
pub use state::{
    BossBullet, EntityIds, GameEvent, GamePhase, GameState, PlayerBullet, Splash, WeaponMode,
};
pub use tick::{TickInput, tick};
