//! Per-tick orchestration: component order, scoring, and progression
//!
//! The component order is a correctness invariant: integration before
//! collision, collision before generation-triggered cleanup, scoring last.
//! One call advances exactly one gameplay tick; frame-rate gating (skipping
//! early refreshes) is the harness's job.

use crate::consts::*;
use crate::sim::state::{GameEvent, GamePhase, GameState, SoundCue};
use crate::sim::{collision, enemy, particles, physics, powerup, worldgen};

/// Input intent for a single tick. The core never sees raw input events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Advance the simulation by one tick.
pub fn tick(state: &mut GameState, input: &TickInput) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    state.ticks += 1;

    physics::integrate(state, input);
    collision::resolve_platforms(state);
    collision::confine_and_follow(state);
    enemy::update(state);
    powerup::update(state);
    worldgen::extend(state);
    worldgen::cleanup(state);

    // Cosmetic passes; nothing below reads them back
    particles::update(state);
    collision::update_shake(state);

    advance_score(state);

    if state.player.health <= 0.0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
    }
}

/// Survival bonus, speed creep, and level-threshold progression.
fn advance_score(state: &mut GameState) {
    state.game_speed += SPEED_CREEP;

    state.survival_timer += 1;
    if state.survival_timer.is_multiple_of(SURVIVAL_INTERVAL) {
        let bonus = (2.0 * state.level as f32 * state.player.score_multiplier).floor() as u32;
        state.score += bonus;
    }

    state.level_progress = (state.score % SCORE_PER_LEVEL) as f32 / SCORE_PER_LEVEL as f32;

    let threshold = state.level * SCORE_PER_LEVEL;
    if state.score >= threshold && state.level < state.mode.max_level() {
        state.level += 1;
        state.level_progress = 0.0;
        state.game_speed += LEVEL_UP_SPEED_STEP;
        state.player.heal(LEVEL_UP_HEAL);
        state.push_cue(SoundCue::LevelUp);
        let level = state.level;
        state.events.push(GameEvent::LevelUp { level });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameMode, SpawnTuning};
    use glam::Vec2;

    fn fresh() -> GameState {
        GameState::new(1234, GameMode::Classic, SpawnTuning::performance())
    }

    /// Park the player safely on a tall ledge away from enemies
    fn parked(state: &mut GameState) {
        state.enemies.clear();
        state.powerups.clear();
        state.player.pos = Vec2::new(400.0, 100.0);
        state.player.vel = Vec2::ZERO;
    }

    #[test]
    fn level_up_at_threshold() {
        let mut state = fresh();
        parked(&mut state);
        state.score = 1000;
        state.game_speed = 2.0;
        state.player.health = 70.0;

        advance_score(&mut state);

        assert_eq!(state.level, 2);
        assert_eq!(state.level_progress, 0.0);
        assert_eq!(state.player.health, 90.0);
        assert!((state.game_speed - (2.0 + SPEED_CREEP + LEVEL_UP_SPEED_STEP)).abs() < 1e-5);
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::LevelUp { level: 2 }))
        );
    }

    #[test]
    fn level_up_heal_caps_at_full_health() {
        let mut state = fresh();
        parked(&mut state);
        state.score = 1000;
        state.player.health = 95.0;
        advance_score(&mut state);
        assert_eq!(state.player.health, 100.0);
    }

    #[test]
    fn level_never_exceeds_mode_maximum() {
        let mut state = fresh();
        parked(&mut state);
        state.level = state.mode.max_level();
        state.score = state.level * SCORE_PER_LEVEL + 500;
        advance_score(&mut state);
        assert_eq!(state.level, state.mode.max_level());
    }

    #[test]
    fn survival_bonus_every_interval() {
        let mut state = fresh();
        parked(&mut state);
        state.level = 3;
        state.player.score_multiplier = 1.5;

        for _ in 0..SURVIVAL_INTERVAL {
            advance_score(&mut state);
        }
        // floor(2 * 3 * 1.5) = 9, awarded exactly once
        assert_eq!(state.score, 9);
    }

    #[test]
    fn game_over_emitted_once_with_final_tallies() {
        let mut state = fresh();
        parked(&mut state);
        state.score = 420;
        state.player.health = 0.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let overs: Vec<_> = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .collect();
        assert_eq!(overs.len(), 1);

        // Further ticks are no-ops
        let ticks = state.ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ticks, ticks);
    }

    #[test]
    fn frontier_invariant_holds_after_every_tick() {
        let mut state = fresh();
        let input = TickInput {
            right: true,
            jump: true,
            ..Default::default()
        };
        for _ in 0..240 {
            tick(&mut state, &input);
            if state.phase == GamePhase::GameOver {
                break;
            }
            assert!(
                state.rightmost_platform_edge()
                    >= state.camera.x + VIEW_W + LOOKAHEAD_MARGIN
            );
        }
    }

    #[test]
    fn ticks_advance_only_while_playing() {
        let mut state = fresh();
        parked(&mut state);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.ticks, 1);
    }
}
