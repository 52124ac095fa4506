//! Rainbow Run - a browser side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, generation, scoring)
//! - `audio`: Web Audio cue synthesis
//! - `accounts`: Flat key-value account store (not a security boundary)
//! - `highscores`: Top-10 leaderboard
//! - `settings`: Game-mode presets and spawn tuning profiles

pub mod accounts;
pub mod audio;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::Leaderboard;
pub use settings::{GameMode, PerfProfile, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (one tick per display refresh, gated)
    pub const TICK_HZ: u32 = 60;
    /// Minimum milliseconds between executed ticks (frame-rate gate)
    pub const FRAME_INTERVAL_MS: f64 = 1000.0 / TICK_HZ as f64;

    /// Logical viewport (world units == pixels)
    pub const VIEW_W: f32 = 1280.0;
    pub const VIEW_H: f32 = 720.0;

    /// Physics
    pub const GRAVITY: f32 = 0.5;
    pub const FRICTION: f32 = 0.8;
    pub const PLAYER_W: f32 = 28.0;
    pub const PLAYER_H: f32 = 38.0;
    pub const BASE_SPEED: f32 = 5.0;
    pub const BASE_JUMP_POWER: f32 = 14.0;
    pub const SPEED_BOOST_BONUS: f32 = 3.0;
    pub const JUMP_BOOST_BONUS: f32 = 4.0;
    pub const SUPER_JUMP_BONUS: f32 = 6.0;
    /// Second jump is weaker than the first
    pub const DOUBLE_JUMP_SCALE: f32 = 0.8;

    /// The ground strip at the bottom of the world. Touching it is lethal.
    pub const GROUND_H: f32 = 50.0;
    pub const GROUND_Y: f32 = VIEW_H - GROUND_H;

    /// Camera follows the player with a fixed lead margin
    pub const CAMERA_LEAD: f32 = 300.0;
    /// Player cannot fall behind the camera's left edge by more than this
    pub const CAMERA_BACKSTOP: f32 = 100.0;

    /// World generation
    pub const LOOKAHEAD_MARGIN: f32 = 300.0;
    pub const PLATFORM_BATCH: usize = 10;
    pub const PLATFORM_SPACING: f32 = 150.0;
    pub const PLATFORM_MIN_W: f32 = 60.0;
    pub const PLATFORM_H: f32 = 20.0;
    /// Band above the ground in which enemies/power-ups may sit on platforms
    pub const WALKABLE_BAND: f32 = 300.0;
    pub const ENEMY_BATCH: usize = 20;
    pub const ENEMY_SPAWN_CHANCE: f64 = 0.8;
    pub const BOSS_GATE_CHANCE: f64 = 0.4;
    /// Enemies trailing this far behind the camera are despawned
    pub const ENEMY_TRAIL_DISTANCE: f32 = 200.0;

    /// Combat
    pub const STOMP_MARGIN: f32 = 10.0;
    pub const STOMP_BOUNCE_VY: f32 = -8.0;
    pub const ENEMY_KILL_SCORE: u32 = 100;
    pub const CONTACT_DAMAGE: f32 = 20.0;
    pub const KNOCKBACK_VX: f32 = 5.0;
    pub const KNOCKBACK_VY: f32 = -5.0;
    /// Absorbing a hit drains this many ticks from the shield timer
    pub const SHIELD_HIT_COST: u32 = 60;

    /// Power-ups
    pub const POWERUP_SIZE: f32 = 18.0;
    pub const MAGNET_RADIUS: f32 = 150.0;
    pub const MAGNET_PULL: f32 = 3.0;

    /// Scoring & progression
    pub const SCORE_PER_LEVEL: u32 = 1000;
    pub const SURVIVAL_INTERVAL: u64 = 60;
    pub const LEVEL_UP_HEAL: f32 = 20.0;
    pub const LEVEL_UP_SPEED_STEP: f32 = 0.5;
    pub const SPEED_CREEP: f32 = 0.001;
    pub const MULTIPLIER_DECAY: f32 = 0.01;
    pub const MULTIPLIER_MAX: f32 = 3.0;

    /// Screen shake decays multiplicatively and snaps to zero below this
    pub const SHAKE_DECAY: f32 = 0.9;
    pub const SHAKE_EPSILON: f32 = 0.1;
}

/// Axis-aligned overlap test between two boxes given by top-left + size
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}
