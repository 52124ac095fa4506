//! Enemy movement and contact resolution
//!
//! Movement patterns are per kind; bob phases are driven by the tick counter,
//! never wall time, so the simulation stays deterministic.

use crate::consts::*;
use crate::sim::collision;
use crate::sim::state::{EffectKind, EnemyKind, GameState};

/// Advance every enemy one tick, then resolve contacts with the player.
pub fn update(state: &mut GameState) {
    // Time-slow drags every enemy to 30% speed
    let factor = if state.player.timers.is_active(EffectKind::TimeSlow) {
        0.3
    } else {
        1.0
    };
    let cam_x = state.camera.x;
    let ticks = state.ticks as f32;

    {
        let platforms = &state.platforms;
        for enemy in &mut state.enemies {
            match enemy.kind {
                EnemyKind::Walker => {
                    enemy.pos.x += enemy.vel_x * factor;

                    // Turn around at platform edges
                    let foot_y = enemy.pos.y + enemy.size.y;
                    let supported = platforms.iter().any(|p| {
                        enemy.pos.x >= p.pos.x
                            && enemy.pos.x <= p.right()
                            && (foot_y - p.top()).abs() < 10.0
                    });
                    if !supported {
                        enemy.vel_x = -enemy.vel_x;
                    }

                    if enemy.pos.x < cam_x - 50.0 || enemy.pos.x > cam_x + VIEW_W + 50.0 {
                        enemy.vel_x = -enemy.vel_x;
                    }
                }
                EnemyKind::Flyer => {
                    enemy.pos.x += enemy.vel_x * factor;
                    enemy.pos.y += (ticks * 0.05 + enemy.pos.x * 0.01).sin() * 0.5 * factor;

                    if enemy.pos.x < cam_x - 50.0 || enemy.pos.x > cam_x + VIEW_W + 50.0 {
                        enemy.vel_x = -enemy.vel_x;
                    }
                }
                EnemyKind::Spiker => {
                    // Spikers hold their ground
                }
                _ => {
                    // Boss-tagged kinds patrol the visible band with a slow bob
                    enemy.pos.x += enemy.vel_x * factor;
                    enemy.pos.y += (ticks * 0.033).sin() * 0.3 * factor;

                    if enemy.pos.x < cam_x + 100.0 || enemy.pos.x > cam_x + VIEW_W - 100.0 {
                        enemy.vel_x = -enemy.vel_x;
                    }
                }
            }
        }
    }

    collision::resolve_enemies(state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameMode, SpawnTuning};
    use crate::sim::state::{Enemy, Platform, PlatformKind};
    use glam::Vec2;

    fn fresh() -> GameState {
        let mut state = GameState::new(11, GameMode::Classic, SpawnTuning::performance());
        state.platforms.clear();
        state.enemies.clear();
        state.powerups.clear();
        // Park the player far away so no contact resolves
        state.player.pos = Vec2::new(-10_000.0, 0.0);
        state
    }

    #[test]
    fn walker_reverses_at_platform_edge() {
        let mut state = fresh();
        state.platforms.push(Platform::new(
            Vec2::new(0.0, 400.0),
            Vec2::new(100.0, PLATFORM_H),
            PlatformKind::Ledge,
        ));
        let walker = Enemy::new(EnemyKind::Walker, Vec2::new(99.0, 400.0 - 28.0), 1.0);
        state.enemies.push(walker);

        update(&mut state);
        // Walked off the right edge: no support, direction flips
        assert!(state.enemies[0].vel_x < 0.0);
    }

    #[test]
    fn walker_keeps_direction_with_support() {
        let mut state = fresh();
        state.platforms.push(Platform::new(
            Vec2::new(0.0, 400.0),
            Vec2::new(500.0, PLATFORM_H),
            PlatformKind::Ledge,
        ));
        let walker = Enemy::new(EnemyKind::Walker, Vec2::new(100.0, 400.0 - 28.0), 1.0);
        state.enemies.push(walker);

        update(&mut state);
        assert!(state.enemies[0].vel_x > 0.0);
        assert!(state.enemies[0].pos.x > 100.0);
    }

    #[test]
    fn spiker_never_moves() {
        let mut state = fresh();
        let spiker = Enemy::new(EnemyKind::Spiker, Vec2::new(200.0, 400.0), 1.0);
        state.enemies.push(spiker);
        for _ in 0..10 {
            update(&mut state);
        }
        assert_eq!(state.enemies[0].pos, Vec2::new(200.0, 400.0));
    }

    #[test]
    fn time_slow_reduces_walker_speed() {
        let mut state = fresh();
        state.platforms.push(Platform::new(
            Vec2::new(0.0, 400.0),
            Vec2::new(5000.0, PLATFORM_H),
            PlatformKind::Ledge,
        ));
        let walker = Enemy::new(EnemyKind::Walker, Vec2::new(100.0, 400.0 - 28.0), 1.0);
        state.enemies.push(walker);
        state.player.timers.set(EffectKind::TimeSlow, 300);

        update(&mut state);
        let moved = state.enemies[0].pos.x - 100.0;
        assert!((moved - 2.0 * 0.3).abs() < 1e-5);
    }
}
