//! Per-frame simulation tick
//!
//! One tick runs per rendered frame, in a fixed order, against a single
//! `GameState`.

use glam::Vec2;

use super::combat::{cleanup_out_of_bounds, resolve_boss_bullets, resolve_player_bullets};
use super::state::{GameEvent, GameState, WeaponMode};
use crate::consts::MAX_FRAME_DT_MS;

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Monotonic clock reading (ms)
    pub now_ms: f64,
    /// Time since the previous tick (ms)
    pub dt_ms: f64,
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Pointer in world coordinates, if known
    pub pointer: Option<Vec2>,
    pub pointer_down: bool,
    /// Weapon selected this frame (key edge)
    pub weapon: Option<WeaponMode>,
    /// Restart requested this frame (key edge)
    pub restart: bool,
}

impl TickInput {
    /// Unnormalized movement direction from the four keys (y down)
    pub fn move_direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }

    /// Frame delta clamped to [0, MAX_FRAME_DT_MS]; garbage becomes 0
    pub fn sanitized_dt_ms(&self) -> f64 {
        if self.dt_ms.is_finite() {
            self.dt_ms.clamp(0.0, MAX_FRAME_DT_MS)
        } else {
            0.0
        }
    }

    /// Pointer position, ignoring non-finite readings
    pub fn sanitized_pointer(&self) -> Option<Vec2> {
        self.pointer.filter(|p| p.is_finite())
    }
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    let now = input.now_ms;
    if !now.is_finite() {
        log::warn!("Skipping tick with non-finite clock reading");
        return;
    }

    state.events.clear();

    if input.restart {
        let tuning = state.tuning.clone();
        *state = GameState::new(tuning, now);
        state.events.push(GameEvent::Restarted);
        log::info!("Match restarted");
        return;
    }

    let dt_secs = (input.sanitized_dt_ms() / 1000.0) as f32;
    let pointer = input.sanitized_pointer();

    if let Some(mode) = input.weapon {
        if state.player.set_weapon(mode) {
            log::debug!("Weapon switched to {}", mode.as_str());
            state.events.push(GameEvent::WeaponChanged { weapon: mode });
        }
    }

    advance_bullets(state, dt_secs);

    if let Some(p) = pointer {
        state.player.update_aim(p);
    }

    let aim = state.player.aim_angle;
    if state.shield.update(now, aim, dt_secs, &state.tuning.shield) {
        state.events.push(GameEvent::ShieldRestored);
    }

    if !state.is_game_over() {
        let dir = input.move_direction();
        state
            .player
            .move_by(dir, dt_secs, state.tuning.player.speed, &state.tuning.arena);

        if input.pointer_down {
            if let Some(p) = pointer {
                if let Some(bullet) =
                    state
                        .player
                        .try_fire(now, p, &state.tuning.weapons, &mut state.ids)
                {
                    state.events.push(GameEvent::PlayerFired {
                        weapon: bullet.weapon,
                    });
                    state.player_bullets.push(bullet);
                }
            }
        }

        if !state.boss.defeated {
            let target = state.player.pos;
            if let Some(bullet) = state
                .boss
                .try_fire(now, target, &state.tuning.boss, &mut state.ids)
            {
                state.events.push(GameEvent::BossFired);
                state.boss_bullets.push(bullet);
            }
        }
    }

    resolve_player_bullets(state, now);
    resolve_boss_bullets(state, now);
    cleanup_out_of_bounds(state);
    state.prune_splashes(now);

    state.time_ms = now;
    state.time_ticks += 1;
}

/// Integrate every bullet along its velocity
fn advance_bullets(state: &mut GameState, dt_secs: f32) {
    for bullet in &mut state.player_bullets {
        bullet.pos += bullet.vel * dt_secs;
    }
    for bullet in &mut state.boss_bullets {
        bullet.pos += bullet.vel * dt_secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use crate::tuning::Tuning;

    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Drives ticks with a steadily advancing clock
    struct Driver {
        state: GameState,
        now: f64,
    }

    impl Driver {
        fn new(tuning: Tuning) -> Self {
            Self {
                state: GameState::new(tuning, 0.0),
                now: 0.0,
            }
        }

        fn step(&mut self, input: TickInput) {
            self.now += FRAME_MS;
            let input = TickInput {
                now_ms: self.now,
                dt_ms: FRAME_MS,
                ..input
            };
            tick(&mut self.state, &input);
        }
    }

    /// Tuning with a boss that effectively never fires
    fn quiet_boss() -> Tuning {
        let mut t = Tuning::default();
        t.boss.fire_rate = 0.0001;
        t
    }

    #[test]
    fn test_bullet_flies_off_and_is_removed() {
        let mut d = Driver::new(quiet_boss());
        d.step(TickInput {
            pointer: Some(Vec2::new(580.0, 270.0)),
            pointer_down: true,
            ..Default::default()
        });
        assert_eq!(d.state.player_bullets.len(), 1);
        let b = &d.state.player_bullets[0];
        assert_eq!(b.vel, Vec2::new(650.0, 0.0));
        assert_eq!(b.radius, 4.0);

        let mut ticks = 0;
        while !d.state.player_bullets.is_empty() {
            d.step(TickInput::default());
            ticks += 1;
            assert!(ticks < 100, "bullet never left the arena");
            if let Some(b) = d.state.player_bullets.first() {
                assert!(b.pos.x <= 964.0);
            }
        }
        // (964 - 480) / (650 / 60) ≈ 44.7 frames
        assert!((44..=46).contains(&ticks));
    }

    #[test]
    fn test_holding_fire_respects_throttle() {
        let mut d = Driver::new(quiet_boss());
        let input = TickInput {
            pointer: Some(Vec2::new(480.0, 500.0)),
            pointer_down: true,
            ..Default::default()
        };
        for _ in 0..60 {
            d.step(input.clone());
        }
        // One second of held fire at 7 shots/sec
        let fired = d.state.ids.allocate() - 1;
        assert!((6..=7).contains(&fired), "fired {fired}");
    }

    #[test]
    fn test_movement_and_diagonal_speed() {
        let mut d = Driver::new(quiet_boss());
        let start = d.state.player.pos;
        for _ in 0..30 {
            d.step(TickInput {
                up: true,
                right: true,
                ..Default::default()
            });
        }
        let moved = d.state.player.pos - start;
        assert!((moved.length() - 130.0).abs() < 0.5);
        assert!(moved.x > 0.0 && moved.y < 0.0);
    }

    #[test]
    fn test_negative_and_garbage_deltas_are_ignored() {
        let mut state = GameState::new(quiet_boss(), 0.0);
        let start = state.player.pos;
        for dt in [-50.0, f64::NAN, f64::INFINITY] {
            tick(
                &mut state,
                &TickInput {
                    now_ms: 10.0,
                    dt_ms: dt,
                    right: true,
                    ..Default::default()
                },
            );
        }
        assert_eq!(state.player.pos, start);

        // Non-finite clock skips the tick entirely
        let ticks = state.time_ticks;
        tick(
            &mut state,
            &TickInput {
                now_ms: f64::NAN,
                ..Default::default()
            },
        );
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let mut d = Driver::new(quiet_boss());
        let aim = d.state.player.aim_angle;
        for pointer in [
            Vec2::new(f32::NAN, 0.0),
            Vec2::new(0.0, f32::INFINITY),
        ] {
            d.step(TickInput {
                pointer: Some(pointer),
                pointer_down: true,
                ..Default::default()
            });
            assert_eq!(d.state.player.aim_angle, aim);
            assert!(d.state.player_bullets.is_empty());
            assert!(!d.state.events.iter().any(|e| matches!(e, GameEvent::PlayerFired { .. })));
        }
        // The tick itself still ran
        assert_eq!(d.state.time_ticks, 2);
        assert_eq!(d.state.time_ms, d.now);
    }

    #[test]
    fn test_boss_fires_at_player_on_its_own_timer() {
        let mut d = Driver::new(Tuning::default());
        // 2 seconds at 1.8 shots/sec
        let mut shots = 0;
        for _ in 0..120 {
            d.step(TickInput::default());
            shots += d
                .state
                .events
                .iter()
                .filter(|e| **e == GameEvent::BossFired)
                .count();
        }
        assert_eq!(shots, 3);
    }

    #[test]
    fn test_shield_follows_aim() {
        let mut d = Driver::new(quiet_boss());
        let below = d.state.player.pos + Vec2::new(0.0, 100.0);
        for _ in 0..60 {
            d.step(TickInput {
                pointer: Some(below),
                ..Default::default()
            });
        }
        assert!((d.state.shield.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_boss_goes_down_after_fifteen_asteroid_hits() {
        let mut d = Driver::new(quiet_boss());
        let boss = d.state.boss.pos;
        let mut frames = 0;
        while !d.state.boss_defeated() {
            d.step(TickInput {
                pointer: Some(boss),
                pointer_down: true,
                ..Default::default()
            });
            frames += 1;
            assert!(frames < 600);
        }
        assert_eq!(d.state.boss.health, 0);
        let hits = d.state.events.iter().filter(|e| matches!(e, GameEvent::BossHit { .. })).count();
        assert_eq!(hits, 1);

        // Keep firing: no further hits, bullets pass through the inert boss
        for _ in 0..120 {
            d.step(TickInput {
                pointer: Some(boss),
                pointer_down: true,
                ..Default::default()
            });
            assert!(!d.state.events.iter().any(|e| matches!(e, GameEvent::BossHit { .. } | GameEvent::BossDefeated)));
        }
        assert_eq!(d.state.boss.health, 0);
    }

    #[test]
    fn test_game_over_freezes_player_and_boss() {
        let mut d = Driver::new(Tuning::default());
        d.state.player.health = 0;
        d.state.phase = GamePhase::GameOver;
        let pos = d.state.player.pos;
        for _ in 0..120 {
            d.step(TickInput {
                left: true,
                pointer: Some(Vec2::new(0.0, 0.0)),
                pointer_down: true,
                ..Default::default()
            });
        }
        assert_eq!(d.state.player.pos, pos);
        assert!(d.state.player_bullets.is_empty());
        assert!(d.state.boss_bullets.is_empty());
        // Shield still tracks the aim
        assert!(d.state.shield.angle < 0.0);
    }

    #[test]
    fn test_weapon_switch_and_restart() {
        let mut d = Driver::new(quiet_boss());
        d.step(TickInput {
            weapon: Some(WeaponMode::Meteora),
            ..Default::default()
        });
        assert_eq!(d.state.player.weapon, WeaponMode::Meteora);
        assert!(d.state.events.contains(&GameEvent::WeaponChanged {
            weapon: WeaponMode::Meteora
        }));

        d.state.player.health = 30;
        d.step(TickInput {
            restart: true,
            ..Default::default()
        });
        assert_eq!(d.state.player.health, 100);
        assert_eq!(d.state.player.weapon, WeaponMode::Asteroid);
        assert_eq!(d.state.events, vec![GameEvent::Restarted]);
        // Tuning survives the restart
        assert!(d.state.tuning.boss.fire_rate < 0.001);
    }
}
