//! Property tests for the simulation invariants: clamping, timer
//! monotonicity, and the world-generation frontier.

use proptest::prelude::*;

use rainbow_run::consts::*;
use rainbow_run::settings::{GameMode, SpawnTuning};
use rainbow_run::sim::{EffectKind, GamePhase, GameState, Player, TickInput, tick};

/// Tuning with every spawn trigger disabled, so no collection event can
/// interfere with timer observations.
fn silent_tuning() -> SpawnTuning {
    let mut tuning = SpawnTuning::performance();
    tuning.jump_skip_chance = 1.0;
    tuning.jump_burst = 0;
    tuning.landing_chance = 0.0;
    tuning.landing_burst = 0;
    tuning.ambient_chance = 0.0;
    tuning.frontier_anchored = 0;
    tuning.frontier_anchored_chance = 0.0;
    tuning.frontier_floating = 0;
    tuning
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(left, right, jump)| TickInput {
        left,
        right,
        jump,
    })
}

proptest! {
    /// Property 1: health stays in [0, 100] under any damage/heal sequence.
    #[test]
    fn health_clamped_under_arbitrary_events(ops in prop::collection::vec(-150.0f32..150.0, 1..200)) {
        let mut player = Player::new();
        for amount in ops {
            if amount >= 0.0 {
                player.heal(amount);
            } else {
                player.damage(-amount);
            }
            prop_assert!((0.0..=100.0).contains(&player.health));
        }
    }

    /// Health also stays clamped across whole simulated runs.
    #[test]
    fn health_clamped_during_simulation(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..300),
    ) {
        let mut state = GameState::new(seed, GameMode::Classic, SpawnTuning::performance());
        for input in &inputs {
            tick(&mut state, input);
            prop_assert!((0.0..=100.0).contains(&state.player.health));
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }

    /// Property 3: absent collection events, every effect timer is
    /// non-increasing tick over tick and never underflows.
    #[test]
    fn timers_monotone_without_collections(
        seed in any::<u64>(),
        initial in prop::collection::vec(0u32..1200, EffectKind::ALL.len()),
        inputs in prop::collection::vec(input_strategy(), 1..200),
    ) {
        let mut state = GameState::new(seed, GameMode::Classic, silent_tuning());
        for (kind, ticks) in EffectKind::ALL.into_iter().zip(initial) {
            state.player.timers.set(kind, ticks);
        }

        for input in &inputs {
            let before: Vec<u32> = EffectKind::ALL
                .iter()
                .map(|k| state.player.timers.get(*k))
                .collect();
            tick(&mut state, input);
            for (kind, prev) in EffectKind::ALL.into_iter().zip(before) {
                let now = state.player.timers.get(kind);
                prop_assert!(now <= prev, "{:?} grew from {} to {}", kind, prev, now);
            }
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }

    /// Property 4: after any tick, the rightmost platform edge covers the
    /// camera viewport plus the look-ahead margin.
    #[test]
    fn frontier_invariant_after_any_tick(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..300),
    ) {
        let mut state = GameState::new(seed, GameMode::Classic, SpawnTuning::performance());
        for input in &inputs {
            tick(&mut state, input);
            if state.phase == GamePhase::GameOver {
                break;
            }
            prop_assert!(
                state.rightmost_platform_edge() >= state.camera.x + VIEW_W + LOOKAHEAD_MARGIN
            );
        }
    }

    /// Score multiplier stays within [1, 3] whatever gets collected.
    #[test]
    fn multiplier_stays_in_range(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..300),
    ) {
        let mut state = GameState::new(seed, GameMode::PowerUp, SpawnTuning::visual());
        for input in &inputs {
            tick(&mut state, input);
            prop_assert!(
                state.player.score_multiplier >= 1.0
                    && state.player.score_multiplier <= MULTIPLIER_MAX
            );
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
    }
}
