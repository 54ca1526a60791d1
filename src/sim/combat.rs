//! Combat resolution between bullets, the boss, the player and the shield
//!
//! Runs once per tick, after movement and firing, in a fixed order:
//! player bullets vs boss, boss bullets vs shield/player, then cleanup.

use super::boss::BossDamage;
use super::collision::{circles_overlap, outside_arena};
use super::shield::BlockResult;
use super::state::{GameEvent, GamePhase, GameState, Splash, WeaponMode};

/// Player bullets that reach the boss are consumed and deal weapon damage
///
/// Stops processing hits as soon as the boss is defeated; bullets still in
/// flight keep flying.
pub fn resolve_player_bullets(state: &mut GameState, now_ms: f64) {
    let GameState {
        tuning,
        boss,
        player_bullets,
        splashes,
        events,
        ..
    } = state;

    player_bullets.retain(|bullet| {
        if !boss.is_collidable() || !circles_overlap(bullet.pos, bullet.radius, boss.pos, boss.radius) {
            return true;
        }

        let stats = tuning.weapons.stats(bullet.weapon);
        if bullet.weapon == WeaponMode::Meteora && stats.splash_radius > 0.0 {
            splashes.push(Splash {
                pos: bullet.pos,
                radius: stats.splash_radius,
                spawned_ms: now_ms,
            });
        }

        match boss.apply_damage(stats.damage, now_ms, &tuning.boss) {
            BossDamage::Hit { remaining } => {
                log::debug!("Boss hit by {} for {}", bullet.weapon.as_str(), stats.damage);
                events.push(GameEvent::BossHit {
                    weapon: bullet.weapon,
                    damage: stats.damage,
                    remaining,
                });
            }
            BossDamage::Defeated => {
                events.push(GameEvent::BossHit {
                    weapon: bullet.weapon,
                    damage: stats.damage,
                    remaining: 0,
                });
                events.push(GameEvent::BossDefeated);
            }
            BossDamage::Ignored => {}
        }
        false
    });
}

/// Boss bullets are tested against the shield first, then the player
///
/// Skipped entirely once the match is over.
pub fn resolve_boss_bullets(state: &mut GameState, now_ms: f64) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    let GameState {
        tuning,
        phase,
        player,
        shield,
        boss_bullets,
        events,
        ..
    } = state;

    boss_bullets.retain(|bullet| {
        if *phase == GamePhase::GameOver {
            return true;
        }

        let block = shield.try_block(player.pos, bullet.pos, now_ms, &tuning.shield);
        match block {
            BlockResult::Blocked { remaining } => {
                events.push(GameEvent::ShieldBlocked { remaining });
            }
            BlockResult::Broke { until_ms } => {
                events.push(GameEvent::ShieldBlocked { remaining: 0 });
                events.push(GameEvent::ShieldBroken { until_ms });
            }
            BlockResult::NotBlocked => {}
        }
        if block.blocked() {
            return false;
        }

        if !circles_overlap(bullet.pos, bullet.radius, player.pos, player.radius) {
            return true;
        }

        let stunned = shield.is_broken();
        let damage = stun_damage(tuning.boss.bullet_damage, shield.damage_multiplier(&tuning.shield));
        let fatal = player.apply_damage(damage);
        log::debug!("Player hit for {damage} (stunned: {stunned})");
        events.push(GameEvent::PlayerHit {
            damage,
            remaining: player.health,
            stunned,
        });

        if fatal {
            *phase = GamePhase::GameOver;
            log::info!("Game over");
            events.push(GameEvent::GameOver);
        }
        false
    });
}

/// Damage after the stun multiplier, rounded up
#[inline]
pub fn stun_damage(base: u32, multiplier: f32) -> u32 {
    (base as f32 * multiplier).ceil() as u32
}

/// Drop every bullet that has left the arena (expanded by its own radius)
pub fn cleanup_out_of_bounds(state: &mut GameState) {
    let arena = &state.tuning.arena;
    state
        .player_bullets
        .retain(|b| !outside_arena(b.pos, b.radius, arena));
    state
        .boss_bullets
        .retain(|b| !outside_arena(b.pos, b.radius, arena));
}
