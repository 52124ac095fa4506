//! Collision resolver
//!
//! Axis-aligned resolution between the player and platforms (4-directional)
//! and classification of player/enemy contacts (stomp vs. hit). Runs after
//! integration, before generation-triggered cleanup.

use glam::Vec2;
use rand::Rng;

use crate::aabb_overlap;
use crate::consts::*;
use crate::sim::particles;
use crate::sim::state::{EffectKind, Enemy, GameState, Player, SoundCue};
use crate::sim::powerup;

/// Exhaustive classification of a player/enemy overlap. Exactly one applies
/// per contact per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Downward attack from above the enemy
    Stomp,
    /// Shield absorbs, draining part of its timer
    ShieldedHit,
    /// Invincibility absorbs at no cost
    InvincibleHit,
    /// Full damage plus knockback
    DamagingHit,
}

/// Classify an overlapping contact. Priority: stomp, then shield, then
/// invincibility, then damage.
pub fn classify_contact(player: &Player, enemy: &Enemy) -> ContactKind {
    if player.vel.y > 0.0 && player.pos.y < enemy.pos.y - STOMP_MARGIN {
        ContactKind::Stomp
    } else if player.timers.is_active(EffectKind::Shield) {
        ContactKind::ShieldedHit
    } else if player.timers.is_active(EffectKind::Invincibility) {
        ContactKind::InvincibleHit
    } else {
        ContactKind::DamagingHit
    }
}

/// Resolve player-vs-platform overlaps.
///
/// Per platform, in iteration order, the first geometric branch that matches
/// wins; there is no sorting by penetration depth. The order dependence is a
/// deliberate, documented tie-break for simultaneous multi-platform overlap.
pub fn resolve_platforms(state: &mut GameState) {
    let mut landings: Vec<(Vec2, Vec2)> = Vec::new();

    {
        let platforms = &state.platforms;
        let p = &mut state.player;
        p.on_ground = false;

        for platform in platforms {
            if !aabb_overlap(p.pos, p.size, platform.pos, platform.size) {
                continue;
            }

            if p.vel.y > 0.0 && p.pos.y < platform.pos.y {
                // Landing on top
                p.pos.y = platform.pos.y - p.size.y;
                p.vel.y = 0.0;
                p.on_ground = true;
                landings.push((platform.pos, platform.size));
            } else if p.vel.y < 0.0 && p.pos.y > platform.pos.y {
                // Hitting the underside
                p.pos.y = platform.pos.y + platform.size.y;
                p.vel.y = 0.0;
            } else if p.vel.x > 0.0 && p.pos.x < platform.pos.x {
                p.pos.x = platform.pos.x - p.size.x;
                p.vel.x = 0.0;
            } else if p.vel.x < 0.0 && p.pos.x > platform.pos.x {
                p.pos.x = platform.pos.x + platform.size.x;
                p.vel.x = 0.0;
            }
        }
    }

    for (pos, size) in landings {
        powerup::spawn_on_landing(state, pos, size);
    }
}

/// Clamp the player ahead of the camera backstop, advance the camera, and
/// apply lethal ground contact.
///
/// The ground is an unconditional instant kill: it overrides shield and
/// invincibility.
pub fn confine_and_follow(state: &mut GameState) {
    let backstop = state.camera.x + CAMERA_BACKSTOP;
    if state.player.pos.x < backstop {
        state.player.pos.x = backstop;
    }
    state.camera.x = state.player.pos.x - CAMERA_LEAD;

    if state.player.bottom() >= GROUND_Y {
        state.player.health = 0.0;
    }
}

/// Resolve player-vs-enemy overlaps for every live enemy.
pub fn resolve_enemies(state: &mut GameState) {
    let mut i = 0;
    while i < state.enemies.len() {
        let overlap = {
            let p = &state.player;
            let e = &state.enemies[i];
            aabb_overlap(p.pos, p.size, e.pos, e.size)
        };
        if !overlap {
            i += 1;
            continue;
        }

        match classify_contact(&state.player, &state.enemies[i]) {
            ContactKind::Stomp => {
                state.enemies[i].health -= 1;
                state.camera.add_shake(8.0);
                if state.enemies[i].health <= 0 {
                    let enemy = state.enemies.remove(i);
                    let center = enemy.center();
                    particles::burst(state, center, Some(particles::GOLD_HUE), 15);
                    if enemy.kind.stats().boss {
                        particles::rainbow_trail(state, center);
                        state.camera.add_shake(12.0);
                    }
                    state.award(ENEMY_KILL_SCORE);
                    state.push_cue(SoundCue::Powerup);
                    // removed in place, don't advance
                    continue;
                } else {
                    // Damaged but alive: bounce the player off
                    state.player.vel.y = STOMP_BOUNCE_VY;
                    let center = state.enemies[i].center();
                    particles::burst(state, center, Some(particles::RED_HUE), 10);
                    state.push_cue(SoundCue::Jump);
                }
            }
            ContactKind::ShieldedHit => {
                state
                    .player
                    .timers
                    .drain(EffectKind::Shield, SHIELD_HIT_COST);
                let center = state.enemies[i].center();
                particles::burst(state, center, Some(particles::SHIELD_HUE), 8);
                state.camera.add_shake(4.0);
                state.push_cue(SoundCue::ShieldHit);
            }
            ContactKind::InvincibleHit => {
                let center = state.enemies[i].center();
                particles::burst(state, center, Some(particles::GOLD_HUE), 8);
                state.camera.add_shake(3.0);
                state.push_cue(SoundCue::InvincibleHit);
            }
            ContactKind::DamagingHit => {
                state.player.damage(CONTACT_DAMAGE);
                // Knockback away from the enemy plus a small upward pop
                let away = if state.player.pos.x < state.enemies[i].pos.x {
                    -KNOCKBACK_VX
                } else {
                    KNOCKBACK_VX
                };
                state.player.vel.x = away;
                state.player.vel.y = KNOCKBACK_VY;
                let center = state.player.center();
                particles::burst(state, center, Some(particles::RED_HUE), 12);
                state.camera.add_shake(10.0);
                state.push_cue(SoundCue::Damage);
            }
        }
        i += 1;
    }
}

/// Update the camera shake offsets from the current magnitude and decay it.
pub fn update_shake(state: &mut GameState) {
    let cam = &mut state.camera;
    if cam.shake_mag > 0.0 {
        cam.shake.x = (state.rng.random_range(0.0..1.0f32) - 0.5) * cam.shake_mag;
        cam.shake.y = (state.rng.random_range(0.0..1.0f32) - 0.5) * cam.shake_mag;
        cam.shake_mag *= SHAKE_DECAY;
        if cam.shake_mag < SHAKE_EPSILON {
            cam.shake_mag = 0.0;
            cam.shake = Vec2::ZERO;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameMode, SpawnTuning};
    use crate::sim::state::{EnemyKind, Platform, PlatformKind};

    fn fresh() -> GameState {
        let mut state = GameState::new(42, GameMode::Classic, SpawnTuning::performance());
        // A clean slate: one ledge to stand on, no enemies
        state.platforms.clear();
        state.platforms.push(Platform::new(
            Vec2::new(0.0, 400.0),
            Vec2::new(200.0, PLATFORM_H),
            PlatformKind::Ledge,
        ));
        state.enemies.clear();
        state.powerups.clear();
        state
    }

    #[test]
    fn descending_player_lands_on_top() {
        let mut state = fresh();
        state.player.pos = Vec2::new(50.0, 400.0 - PLAYER_H + 4.0);
        state.player.vel = Vec2::new(0.0, 5.0);
        resolve_platforms(&mut state);
        assert!(state.player.on_ground);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.bottom(), 400.0);
    }

    #[test]
    fn rising_player_snaps_below_underside() {
        let mut state = fresh();
        state.player.pos = Vec2::new(50.0, 400.0 + PLATFORM_H - 4.0);
        state.player.vel = Vec2::new(0.0, -5.0);
        resolve_platforms(&mut state);
        assert!(!state.player.on_ground);
        assert_eq!(state.player.vel.y, 0.0);
        assert_eq!(state.player.pos.y, 400.0 + PLATFORM_H);
    }

    #[test]
    fn horizontal_penetration_snaps_to_near_edge() {
        let mut state = fresh();
        state.platforms.clear();
        state.platforms.push(Platform::new(
            Vec2::new(100.0, 300.0),
            Vec2::new(60.0, 200.0),
            PlatformKind::Ledge,
        ));
        // Walking right into the left face, vertically inside the box
        state.player.pos = Vec2::new(100.0 - PLAYER_W + 5.0, 350.0);
        state.player.vel = Vec2::new(5.0, 0.0);
        resolve_platforms(&mut state);
        assert_eq!(state.player.pos.x, 100.0 - PLAYER_W);
        assert_eq!(state.player.vel.x, 0.0);
    }

    #[test]
    fn first_platform_in_iteration_order_wins() {
        // Two identical overlapping ledges: the landing must resolve against
        // the first one and leave a consistent rest position either way.
        let mut state = fresh();
        state.platforms.clear();
        for x in [0.0, 10.0] {
            state.platforms.push(Platform::new(
                Vec2::new(x, 400.0),
                Vec2::new(200.0, PLATFORM_H),
                PlatformKind::Ledge,
            ));
        }
        state.player.pos = Vec2::new(60.0, 400.0 - PLAYER_H + 3.0);
        state.player.vel = Vec2::new(0.0, 4.0);
        resolve_platforms(&mut state);
        assert!(state.player.on_ground);
        assert_eq!(state.player.bottom(), 400.0);
    }

    #[test]
    fn ground_contact_kills_through_shield_and_invincibility() {
        let mut state = fresh();
        state.player.timers.set(EffectKind::Shield, 600);
        state.player.timers.set(EffectKind::Invincibility, 300);
        state.player.pos.y = GROUND_Y - PLAYER_H + 1.0;
        confine_and_follow(&mut state);
        assert_eq!(state.player.health, 0.0);
    }

    #[test]
    fn camera_leads_player() {
        let mut state = fresh();
        state.player.pos.x = 1000.0;
        confine_and_follow(&mut state);
        assert_eq!(state.camera.x, 1000.0 - CAMERA_LEAD);
    }

    fn enemy_at(kind: EnemyKind, pos: Vec2) -> Enemy {
        Enemy::new(kind, pos, 1.0)
    }

    #[test]
    fn contact_classification_is_exclusive_and_total() {
        let mut state = fresh();
        let enemy = enemy_at(EnemyKind::Walker, Vec2::new(100.0, 400.0));

        // Falling from above the stomp margin: stomp, regardless of buffs
        state.player.pos = Vec2::new(100.0, 400.0 - STOMP_MARGIN - 20.0);
        state.player.vel.y = 3.0;
        state.player.timers.set(EffectKind::Shield, 600);
        assert_eq!(classify_contact(&state.player, &enemy), ContactKind::Stomp);

        // Side contact with shield: shield wins over invincibility
        state.player.pos = Vec2::new(100.0, 400.0);
        state.player.vel.y = 0.0;
        state.player.timers.set(EffectKind::Invincibility, 300);
        assert_eq!(
            classify_contact(&state.player, &enemy),
            ContactKind::ShieldedHit
        );

        // Invincibility only
        state.player.timers.set(EffectKind::Shield, 0);
        assert_eq!(
            classify_contact(&state.player, &enemy),
            ContactKind::InvincibleHit
        );

        // No buffs: full damage
        state.player.timers.clear();
        assert_eq!(
            classify_contact(&state.player, &enemy),
            ContactKind::DamagingHit
        );
    }

    #[test]
    fn stomp_kills_single_hp_enemy_and_awards_score() {
        let mut state = fresh();
        state
            .enemies
            .push(enemy_at(EnemyKind::Walker, Vec2::new(100.0, 400.0)));
        state.player.pos = Vec2::new(100.0, 400.0 - STOMP_MARGIN - 18.0);
        state.player.vel.y = 4.0;
        resolve_enemies(&mut state);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, ENEMY_KILL_SCORE);
    }

    #[test]
    fn stomp_on_tough_enemy_bounces_without_removal() {
        let mut state = fresh();
        state
            .enemies
            .push(enemy_at(EnemyKind::Spiker, Vec2::new(100.0, 408.0)));
        state.player.pos = Vec2::new(100.0, 408.0 - STOMP_MARGIN - 18.0);
        state.player.vel.y = 4.0;
        resolve_enemies(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].health, 1);
        assert_eq!(state.player.vel.y, STOMP_BOUNCE_VY);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn shield_absorbs_and_drains() {
        let mut state = fresh();
        state
            .enemies
            .push(enemy_at(EnemyKind::Walker, Vec2::new(100.0, 400.0)));
        state.player.pos = Vec2::new(100.0, 402.0);
        state.player.vel.y = 0.0;
        state.player.timers.set(EffectKind::Shield, 600);
        state.player.health = 80.0;
        resolve_enemies(&mut state);
        assert_eq!(state.player.health, 80.0);
        assert_eq!(
            state.player.timers.get(EffectKind::Shield),
            600 - SHIELD_HIT_COST
        );
    }

    #[test]
    fn unshielded_hit_damages_and_knocks_back() {
        let mut state = fresh();
        state
            .enemies
            .push(enemy_at(EnemyKind::Walker, Vec2::new(120.0, 400.0)));
        state.player.pos = Vec2::new(100.0, 402.0);
        state.player.vel = Vec2::ZERO;
        state.player.health = 100.0;
        resolve_enemies(&mut state);
        assert_eq!(state.player.health, 100.0 - CONTACT_DAMAGE);
        // Enemy is to the right: knocked left
        assert_eq!(state.player.vel.x, -KNOCKBACK_VX);
        assert_eq!(state.player.vel.y, KNOCKBACK_VY);
    }
}
