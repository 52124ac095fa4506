//! Read-only render snapshot
//!
//! The render collaborator consumes this view once per frame and emits
//! nothing back into the core. Wall-clock time enters the simulation only
//! here, for cosmetic animation phases.

use glam::Vec2;

use crate::consts::SCORE_PER_LEVEL;
use crate::sim::state::{
    Charges, EffectKind, Enemy, GamePhase, GameState, Particle, Platform, PowerUp,
};

/// Player pose as the renderer needs it
#[derive(Debug, Clone, Copy)]
pub struct PlayerPose {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
}

/// One frame's worth of drawable state, borrowed from the simulation.
#[derive(Debug)]
pub struct RenderFrame<'a> {
    pub player: PlayerPose,
    /// Effect kinds with a running timer, for glow/aura selection
    pub active_effects: Vec<EffectKind>,
    pub platforms: &'a [Platform],
    pub enemies: &'a [Enemy],
    pub powerups: &'a [PowerUp],
    pub particles: &'a [Particle],
    /// Camera scroll plus the shake offset applied on top
    pub camera_x: f32,
    pub shake: Vec2,
    pub score: u32,
    pub health: f32,
    pub level: u32,
    /// Percentage toward the next level, [0, 100)
    pub progress_percent: f32,
    pub coins: u32,
    pub charges: Charges,
    pub score_multiplier: f32,
    pub game_over: bool,
    /// Free-running wall clock, seconds. Cosmetic phases only; gameplay
    /// counters never read this.
    pub anim_time: f64,
}

impl<'a> RenderFrame<'a> {
    pub fn capture(state: &'a GameState, anim_time: f64) -> Self {
        Self {
            player: PlayerPose {
                pos: state.player.pos,
                vel: state.player.vel,
                size: state.player.size,
                on_ground: state.player.on_ground,
            },
            active_effects: state.player.timers.active().collect(),
            platforms: &state.platforms,
            enemies: &state.enemies,
            powerups: &state.powerups,
            particles: &state.particles,
            camera_x: state.camera.x,
            shake: state.camera.shake,
            score: state.score,
            health: state.player.health.max(0.0),
            level: state.level,
            progress_percent: (state.score % SCORE_PER_LEVEL) as f32 / SCORE_PER_LEVEL as f32
                * 100.0,
            coins: state.player.coins,
            charges: state.player.charges,
            score_multiplier: state.player.score_multiplier,
            game_over: state.phase == GamePhase::GameOver,
            anim_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{GameMode, SpawnTuning};

    #[test]
    fn capture_reflects_state_scalars() {
        let mut state = GameState::new(8, GameMode::Classic, SpawnTuning::performance());
        state.score = 1250;
        state.level = 2;
        state.player.timers.set(EffectKind::Shield, 600);

        let frame = RenderFrame::capture(&state, 1.5);
        assert_eq!(frame.score, 1250);
        assert!((frame.progress_percent - 25.0).abs() < 1e-4);
        assert!(frame.active_effects.contains(&EffectKind::Shield));
        assert_eq!(frame.platforms.len(), state.platforms.len());
        assert!(!frame.game_over);
    }
}
