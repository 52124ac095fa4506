//! Power-up lifecycle: spawn triggers, magnet attraction, collection,
//! and live-cap eviction.
//!
//! Four independent spawn triggers feed the live set: on-jump bursts,
//! on-landing bursts, a per-tick ambient roll while the player moves, and
//! frontier batches driven by world generation. All probabilities and caps
//! come from the active [`SpawnTuning`](crate::settings::SpawnTuning) record.

use glam::Vec2;
use rand::Rng;

use crate::aabb_overlap;
use crate::consts::*;
use crate::sim::particles;
use crate::sim::state::{EffectKind, GameState, PowerUp, PowerUpEffect, PowerUpKind};
use crate::sim::worldgen;

fn random_kind(state: &mut GameState, pool: &[PowerUpKind]) -> PowerUpKind {
    pool[state.rng.random_range(0..pool.len())]
}

/// Burst around the player on a successful jump.
pub fn spawn_on_jump(state: &mut GameState) {
    let tuning = state.tuning;
    if tuning.jump_skip_chance > 0.0 && state.rng.random_bool(tuning.jump_skip_chance) {
        return;
    }

    for i in 0..tuning.jump_burst {
        let angle = std::f32::consts::TAU * i as f32 / tuning.jump_burst.max(1) as f32
            + state.rng.random_range(0.0..0.5);
        let distance = 60.0 + state.rng.random_range(0.0..80.0);
        let pos = state.player.center() + Vec2::new(angle.cos(), angle.sin()) * distance;
        let kind = random_kind(state, &PowerUpKind::ALL);
        state.powerups.push(PowerUp::new(kind, pos));
    }
}

/// Burst above a platform the player just landed on.
pub fn spawn_on_landing(state: &mut GameState, platform_pos: Vec2, platform_size: Vec2) {
    let tuning = state.tuning;
    let chance = (tuning.landing_chance * state.mode.spawn_chance_scale()).min(1.0);
    if !state.rng.random_bool(chance) {
        return;
    }
    if tuning.landing_skip_chance > 0.0 && state.rng.random_bool(tuning.landing_skip_chance) {
        return;
    }

    for _ in 0..tuning.landing_burst {
        let x = platform_pos.x + state.rng.random_range(0.0..platform_size.x);
        let y = platform_pos.y - 20.0 - state.rng.random_range(0.0..40.0);
        let kind = random_kind(state, &PowerUpKind::ALL);
        state.powerups.push(PowerUp::new(kind, Vec2::new(x, y)));
    }
}

/// Continuous low-probability spawn near the player while moving.
pub fn ambient_roll(state: &mut GameState) {
    if state.player.vel.x.abs() <= 0.1 {
        return;
    }
    let chance = (state.tuning.ambient_chance * state.mode.spawn_chance_scale()).min(1.0);
    if !state.rng.random_bool(chance) {
        return;
    }

    let offset = Vec2::new(
        (state.rng.random_range(0.0..1.0f32) - 0.5) * 200.0,
        (state.rng.random_range(0.0..1.0f32) - 0.5) * 100.0,
    );
    let pos = state.player.center() + offset;
    let kind = random_kind(state, &PowerUpKind::ALL);
    state.powerups.push(PowerUp::new(kind, pos));
}

/// Batch generation tied to world-frontier advancement: platform-anchored
/// spawns from the basic pool plus free-floating spawns from the full pool.
pub fn frontier_batch(state: &mut GameState, start_x: f32) {
    let tuning = state.tuning;

    for i in 0..tuning.frontier_anchored {
        let x = start_x + i as f32 * 200.0 + state.rng.random_range(0.0..150.0);
        // No supporting platform: silently skip this candidate
        let Some(top) = worldgen::support_at(state, x).map(|p| p.top()) else {
            continue;
        };
        if !state.rng.random_bool(tuning.frontier_anchored_chance) {
            continue;
        }
        let kind = random_kind(state, &PowerUpKind::BASIC);
        state
            .powerups
            .push(PowerUp::new(kind, Vec2::new(x, top - 25.0)));
    }

    for i in 0..tuning.frontier_floating {
        let x = start_x + i as f32 * 300.0 + state.rng.random_range(0.0..200.0);
        let y = VIEW_H - 150.0 - state.rng.random_range(0.0..200.0);
        let kind = random_kind(state, &PowerUpKind::ALL);
        state.powerups.push(PowerUp::new(kind, Vec2::new(x, y)));
    }
}

/// Per-tick lifecycle pass: cap eviction, magnet attraction, collection.
pub fn update(state: &mut GameState) {
    evict_over_cap(state);

    // Magnet: pull live power-ups toward the player's center
    if state.player.timers.is_active(EffectKind::Magnet) {
        let target = state.player.center();
        for pu in &mut state.powerups {
            if pu.collected {
                continue;
            }
            let delta = target - pu.center();
            let distance = delta.length();
            if distance > 0.0 && distance < MAGNET_RADIUS {
                pu.pos += delta / distance * MAGNET_PULL;
            }
        }
    }

    // Collection: mark, remove within the same tick, then apply effects
    let player_pos = state.player.pos;
    let player_size = state.player.size;
    let mut collected: Vec<(PowerUpKind, Vec2)> = Vec::new();
    state.powerups.retain_mut(|pu| {
        if !pu.collected && aabb_overlap(player_pos, player_size, pu.pos, pu.size) {
            pu.collected = true;
            collected.push((pu.kind, pu.center()));
            false
        } else {
            true
        }
    });

    for (kind, pos) in collected {
        apply_effect(state, kind);
        state.award(kind.score());
        state.push_cue(kind.cue());
        particles::burst(state, pos, None, 8);
    }
}

/// Oldest-created entries go first when the live cap is exceeded.
fn evict_over_cap(state: &mut GameState) {
    let cap = state.tuning.powerup_cap;
    if state.powerups.len() > cap {
        let excess = state.powerups.len() - cap;
        state.powerups.drain(0..excess);
    }
}

fn apply_effect(state: &mut GameState, kind: PowerUpKind) {
    let p = &mut state.player;
    match kind.effect() {
        PowerUpEffect::Heal(amount) => p.heal(amount),
        PowerUpEffect::Timer(effect, ticks) => p.timers.set(effect, ticks),
        PowerUpEffect::MultiplierStep(step) => {
            p.score_multiplier = (p.score_multiplier + step).min(MULTIPLIER_MAX);
        }
        PowerUpEffect::Coin => p.coins += 1,
        PowerUpEffect::ExplosiveCharge => p.charges.explosive += 1,
        PowerUpEffect::TeleportCharge => p.charges.teleport += 1,
        PowerUpEffect::RocketCharge => p.charges.rocket += 1,
        PowerUpEffect::ShieldBurstCharge => p.charges.shield_burst += 1,
        PowerUpEffect::Instant => {}
    }
}
