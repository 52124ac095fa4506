//! Physics integrator
//!
//! Advances the player's velocity and position for one tick from the current
//! input intent and effect timers. Pure state transition, no errors.

use crate::consts::*;
use crate::sim::particles;
use crate::sim::powerup;
use crate::sim::state::{EffectKind, GameState, SoundCue};
use crate::sim::tick::TickInput;
use rand::Rng;

pub fn integrate(state: &mut GameState, input: &TickInput) {
    let mut jump_cue = None;

    {
        let p = &mut state.player;

        // Uniform decay across the whole timer bank, then multiplier decay
        p.timers.decay();
        if p.score_multiplier > 1.0 {
            p.score_multiplier = (p.score_multiplier - MULTIPLIER_DECAY).max(1.0);
        }

        // Horizontal: keys set velocity directly, releasing both applies friction
        let speed = p.current_speed();
        if input.left {
            p.vel.x = -speed;
        } else if input.right {
            p.vel.x = speed;
        } else {
            p.vel.x *= FRICTION;
        }

        // Jumping. The intent is a held boolean, so a grounded jump followed by
        // a running double-jump timer fires the second jump on the next tick.
        if input.jump {
            if p.on_ground {
                p.vel.y = -p.current_jump_power();
                p.on_ground = false;
                p.jump_count = 1;
                jump_cue = Some(SoundCue::Jump);
            } else if p.timers.is_active(EffectKind::DoubleJump) && p.jump_count < 2 {
                p.vel.y = -p.current_jump_power() * DOUBLE_JUMP_SCALE;
                p.jump_count += 1;
                jump_cue = Some(SoundCue::DoubleJump);
            }
        }

        // jump_count resets only while grounded
        if p.on_ground {
            p.jump_count = 0;
        }

        // Gravity applies every tick regardless of state
        p.vel.y += GRAVITY;
        p.pos += p.vel;
    }

    if let Some(cue) = jump_cue {
        state.push_cue(cue);
        powerup::spawn_on_jump(state);
    }

    // Ambient spawn roll as a function of player motion
    powerup::ambient_roll(state);

    // Rainbow trail while the buff runs (cosmetic)
    if state.player.timers.is_active(EffectKind::Rainbow) && state.rng.random_bool(0.3) {
        let center = state.player.center();
        particles::rainbow_trail(state, center);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameMode, SpawnTuning};

    fn fresh() -> GameState {
        GameState::new(7, GameMode::Classic, SpawnTuning::performance())
    }

    fn airborne(state: &mut GameState) {
        state.player.on_ground = false;
        state.player.pos.y = 300.0;
        state.player.vel.y = 0.0;
    }

    #[test]
    fn grounded_jump_sets_velocity_and_count() {
        let mut state = fresh();
        state.player.on_ground = true;
        integrate(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        // -14 from the jump, +0.5 gravity applied after
        assert_eq!(state.player.jump_count, 1);
        assert!((state.player.vel.y - (-BASE_JUMP_POWER + GRAVITY)).abs() < 1e-5);
        assert!(!state.player.on_ground);
    }

    #[test]
    fn double_jump_uses_reduced_power_then_rejects_third() {
        let mut state = fresh();
        airborne(&mut state);
        state.player.jump_count = 1;
        state.player.timers.set(EffectKind::DoubleJump, 900);

        integrate(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.jump_count, 2);
        let expected = -BASE_JUMP_POWER * DOUBLE_JUMP_SCALE + GRAVITY;
        assert!((state.player.vel.y - expected).abs() < 1e-5);

        // Still airborne, jump_count is no longer < 2: only gravity applies
        let vy_before = state.player.vel.y;
        integrate(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.jump_count, 2);
        assert!((state.player.vel.y - (vy_before + GRAVITY)).abs() < 1e-5);
    }

    #[test]
    fn friction_decays_horizontal_velocity() {
        let mut state = fresh();
        airborne(&mut state);
        state.player.vel.x = 10.0;
        integrate(&mut state, &TickInput::default());
        assert!((state.player.vel.x - 10.0 * FRICTION).abs() < 1e-5);
    }

    #[test]
    fn speed_boost_raises_run_speed() {
        let mut state = fresh();
        airborne(&mut state);
        state.player.timers.set(EffectKind::Speed, 300);
        integrate(
            &mut state,
            &TickInput {
                right: true,
                ..Default::default()
            },
        );
        assert!((state.player.vel.x - (BASE_SPEED + SPEED_BOOST_BONUS)).abs() < 1e-5);
    }

    #[test]
    fn timers_decrement_toward_zero() {
        let mut state = fresh();
        airborne(&mut state);
        state.player.timers.set(EffectKind::Shield, 2);
        integrate(&mut state, &TickInput::default());
        assert_eq!(state.player.timers.get(EffectKind::Shield), 1);
        integrate(&mut state, &TickInput::default());
        assert_eq!(state.player.timers.get(EffectKind::Shield), 0);
        integrate(&mut state, &TickInput::default());
        assert_eq!(state.player.timers.get(EffectKind::Shield), 0);
    }

    #[test]
    fn multiplier_decays_toward_one() {
        let mut state = fresh();
        airborne(&mut state);
        state.player.score_multiplier = 1.005;
        integrate(&mut state, &TickInput::default());
        assert!((state.player.score_multiplier - 1.0).abs() < 1e-6);
    }
}
