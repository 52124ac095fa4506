//! Procedural world generation
//!
//! Maintains a frontier of platforms, enemies, and power-ups ahead of the
//! camera so the player never reaches a dead end, and removes entities that
//! fall too far behind. Platforms are never pruned; bounded growth of the
//! platform array over a run is accepted.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;
use crate::sim::powerup;
use crate::sim::state::{Enemy, EnemyKind, GameState, Platform, PlatformKind};

/// Seed the world for a fresh run: the lethal ground strip, a ramp of initial
/// ledges, and a first batch of power-ups.
pub fn initial_world(state: &mut GameState) {
    state.platforms.clear();
    state.enemies.clear();
    state.powerups.clear();

    state.platforms.push(Platform::new(
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(VIEW_W * 3.0, GROUND_H),
        PlatformKind::Ground,
    ));

    for i in 0..20 {
        let x = i as f32 * 200.0 + 300.0;
        let y = VIEW_H - state.rng.random_range(0.0..200.0) - 100.0;
        let width = 80.0 + state.rng.random_range(0.0..60.0);
        state.platforms.push(Platform::new(
            Vec2::new(x, y),
            Vec2::new(width, PLATFORM_H),
            PlatformKind::Ledge,
        ));
    }

    powerup::frontier_batch(state, 300.0);
}

/// Extend the world until the frontier invariant holds:
/// rightmost platform edge >= camera + viewport + look-ahead margin.
pub fn extend(state: &mut GameState) {
    loop {
        let rightmost = state.rightmost_platform_edge();
        if rightmost >= state.camera.x + VIEW_W + LOOKAHEAD_MARGIN {
            break;
        }

        for i in 0..PLATFORM_BATCH {
            let x = rightmost + i as f32 * PLATFORM_SPACING + state.rng.random_range(0.0..100.0);
            // Keep a small clearance above the lethal ground line
            let y = GROUND_Y - state.rng.random_range(5.0..305.0);
            let width = PLATFORM_MIN_W + state.rng.random_range(0.0..80.0);
            state.platforms.push(Platform::new(
                Vec2::new(x, y),
                Vec2::new(width, PLATFORM_H),
                PlatformKind::Ledge,
            ));
        }

        spawn_enemies(state, rightmost);
        powerup::frontier_batch(state, rightmost);
    }
}

/// Find a platform able to support an entity at horizontal position `x`,
/// restricted to the walkable band above the ground.
pub fn support_at(state: &GameState, x: f32) -> Option<&Platform> {
    state
        .platforms
        .iter()
        .find(|p| x >= p.pos.x && x <= p.right() && p.top() > VIEW_H - WALKABLE_BAND)
}

/// Roll a batch of enemy candidates over the new frontier region. Candidates
/// without a supporting platform are silently skipped; boss-tagged kinds pass
/// a second, lower probability gate.
fn spawn_enemies(state: &mut GameState, start_x: f32) {
    for i in 0..ENEMY_BATCH {
        let x = start_x + i as f32 * 100.0 + state.rng.random_range(0.0..60.0);

        let Some(platform_top) = support_at(state, x).map(|p| p.top()) else {
            continue;
        };

        if !state.rng.random_bool(ENEMY_SPAWN_CHANCE) {
            continue;
        }

        let kind = EnemyKind::ALL[state.rng.random_range(0..EnemyKind::ALL.len())];
        let stats = kind.stats();
        if stats.boss && !state.rng.random_bool(state.mode.boss_gate_chance()) {
            continue;
        }

        let y = if kind == EnemyKind::Flyer {
            // Flyers patrol above the platforms
            platform_top - 80.0
        } else {
            platform_top - stats.size.y
        };
        let dir = if state.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        state.enemies.push(Enemy::new(kind, Vec2::new(x, y), dir));
    }
}

/// Remove enemies and power-ups trailing too far behind the camera.
/// Runs every tick.
pub fn cleanup(state: &mut GameState) {
    let cam_x = state.camera.x;
    state
        .enemies
        .retain(|e| e.pos.x >= cam_x - ENEMY_TRAIL_DISTANCE);
    let trail = state.tuning.powerup_trail_distance;
    state.powerups.retain(|p| p.pos.x >= cam_x - trail);
}
