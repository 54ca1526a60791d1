//! HUD text derived from the game state
//!
//! The host writes these into DOM elements after each tick.

use crate::sim::GameState;

pub const GAME_OVER_BANNER: &str = "GAME OVER";
pub const BOSS_DOWN_BANNER: &str = "BOSS DOWN";

/// All text the HUD shows for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudLabels {
    pub hp: String,
    pub boss_hp: String,
    pub weapon: String,
    pub shield_hp: String,
    /// Empty while the shield is up
    pub shield_status: String,
    pub game_over_banner: Option<&'static str>,
    pub boss_down_banner: Option<&'static str>,
}

impl HudLabels {
    pub fn from_state(state: &GameState) -> Self {
        let boss_hp = if state.boss.defeated {
            BOSS_DOWN_BANNER.to_string()
        } else {
            format!("BOSS HP: {}/{}", state.boss.health, state.boss.max_health)
        };

        Self {
            hp: format!("HP: {}", state.player.health),
            boss_hp,
            weapon: format!("WEAPON: {}", state.player.weapon.as_str()),
            shield_hp: format!("SHIELD: {}/{}", state.shield.health, state.shield.max_health),
            shield_status: if state.shield.is_broken() {
                "SHIELD BROKEN".to_string()
            } else {
                String::new()
            },
            game_over_banner: state.is_game_over().then_some(GAME_OVER_BANNER),
            boss_down_banner: state.boss.defeated.then_some(BOSS_DOWN_BANNER),
        }
    }
}
