//! Cosmetic particle bursts and trails
//!
//! Read-only for the renderer; nothing in the simulation depends on them.
//! Counts are clamped by the active spawn tuning.

use glam::Vec2;
use rand::Rng;

use crate::sim::state::{GameState, Particle};

pub const GOLD_HUE: f32 = 51.0;
pub const RED_HUE: f32 = 0.0;
pub const SHIELD_HUE: f32 = 243.0;

/// Spawn a burst at `pos`. `hue` of `None` picks a random color per particle.
pub fn burst(state: &mut GameState, pos: Vec2, hue: Option<f32>, count: usize) {
    let count = count.min(state.tuning.particle_burst_cap);
    let glow = state.tuning.particle_glow;
    for _ in 0..count {
        if state.particles.len() >= state.tuning.particle_cap {
            state.particles.remove(0);
        }
        let vel = Vec2::new(
            (state.rng.random_range(0.0..1.0f32) - 0.5) * 6.0,
            (state.rng.random_range(0.0..1.0f32) - 0.5) * 6.0,
        );
        let hue = hue.unwrap_or_else(|| state.rng.random_range(0.0..360.0));
        state.particles.push(Particle {
            pos,
            vel,
            life: 30,
            max_life: 30,
            size: state.rng.random_range(1.0..4.0),
            hue,
            glow,
        });
    }
}

/// Rainbow trail: hue cycles with the tick counter so replays look identical.
pub fn rainbow_trail(state: &mut GameState, pos: Vec2) {
    let count = 12usize.min(state.tuning.particle_burst_cap * 2);
    let glow = state.tuning.particle_glow;
    for i in 0..count {
        if state.particles.len() >= state.tuning.particle_cap {
            state.particles.remove(0);
        }
        let hue = ((state.ticks as f32 * 1.6) + i as f32 * 30.0) % 360.0;
        let vel = Vec2::new(
            (state.rng.random_range(0.0..1.0f32) - 0.5) * 8.0,
            (state.rng.random_range(0.0..1.0f32) - 0.5) * 8.0,
        );
        state.particles.push(Particle {
            pos,
            vel,
            life: 40,
            max_life: 40,
            size: state.rng.random_range(2.0..6.0),
            hue,
            glow,
        });
    }
}

/// Advance particle motion and cull dead ones.
pub fn update(state: &mut GameState) {
    for particle in &mut state.particles {
        particle.pos += particle.vel;
        particle.vel.y += 0.15;
        particle.vel.x *= 0.98;
        particle.life = particle.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameMode, SpawnTuning};

    #[test]
    fn burst_respects_cap() {
        let mut state = GameState::new(3, GameMode::Classic, SpawnTuning::performance());
        state.particles.clear();
        for _ in 0..100 {
            burst(&mut state, Vec2::ZERO, Some(GOLD_HUE), 16);
        }
        assert!(state.particles.len() <= state.tuning.particle_cap);
    }

    #[test]
    fn particles_die_after_lifetime() {
        let mut state = GameState::new(3, GameMode::Classic, SpawnTuning::performance());
        state.particles.clear();
        burst(&mut state, Vec2::ZERO, None, 4);
        assert!(!state.particles.is_empty());
        for _ in 0..31 {
            update(&mut state);
        }
        assert!(state.particles.is_empty());
    }
}
