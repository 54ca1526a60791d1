//! Scene assembly: turns a `GameState` into world-space triangles
//!
//! Draw order (back to front): splashes, shield, player, aim line, player
//! bullets, boss bullets, boss.

use glam::Vec2;

use super::shapes::{circle, line, ring, sector, sector_outline};
use super::vertex::{Vertex, colors};
use crate::polar_to_cartesian;
use crate::sim::GameState;

const CIRCLE_SEGMENTS: u32 = 32;
const BULLET_SEGMENTS: u32 = 10;
const SECTOR_DETAIL: f32 = 16.0;
const AIM_LINE_WIDTH: f32 = 2.0;
const SHIELD_EDGE_WIDTH: f32 = 2.0;
const SPLASH_RING_WIDTH: f32 = 2.0;

/// Build the vertex list for one frame
pub fn build(state: &GameState, now_ms: f64) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(4096);

    let splash_duration = state.tuning.weapons.splash_duration_ms;
    for splash in &state.splashes {
        let alpha = splash.fade(now_ms, splash_duration);
        if alpha <= 0.0 {
            continue;
        }
        vertices.extend(ring(
            splash.pos,
            (splash.radius - SPLASH_RING_WIDTH).max(0.0),
            splash.radius,
            colors::faded(colors::SPLASH, alpha),
            CIRCLE_SEGMENTS,
        ));
    }

    let player = &state.player;
    if !state.shield.is_broken() {
        let arc = state.shield.sector();
        vertices.extend(sector(player.pos, &arc, colors::SHIELD_FILL, SECTOR_DETAIL));
        vertices.extend(sector_outline(
            player.pos,
            &arc,
            SHIELD_EDGE_WIDTH,
            colors::SHIELD_EDGE,
            SECTOR_DETAIL,
        ));
    }

    vertices.extend(circle(player.pos, player.radius, colors::PLAYER, CIRCLE_SEGMENTS));
    let aim_tip: Vec2 =
        player.pos + polar_to_cartesian(state.tuning.player.aim_line_length, player.aim_angle);
    vertices.extend(line(player.pos, aim_tip, AIM_LINE_WIDTH, colors::AIM));

    for bullet in &state.player_bullets {
        vertices.extend(circle(bullet.pos, bullet.radius, colors::BULLET, BULLET_SEGMENTS));
    }
    for bullet in &state.boss_bullets {
        vertices.extend(circle(
            bullet.pos,
            bullet.radius,
            colors::BOSS_BULLET,
            BULLET_SEGMENTS,
        ));
    }

    let boss = &state.boss;
    if !boss.defeated {
        let color = if boss.is_flashing(now_ms) {
            colors::BOSS_FLASH
        } else {
            colors::BOSS
        };
        vertices.extend(circle(boss.pos, boss.radius, color, CIRCLE_SEGMENTS));
    }

    vertices
}
