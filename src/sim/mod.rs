//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per executed frame, gated by the harness
//! - Seeded RNG only, owned by the state
//! - Fixed component order per tick (a correctness invariant)
//! - No rendering or platform dependencies

pub mod collision;
pub mod enemy;
pub mod frame;
pub mod particles;
pub mod physics;
pub mod powerup;
pub mod state;
pub mod tick;
pub mod worldgen;

pub use collision::ContactKind;
pub use frame::RenderFrame;
pub use state::{
    Camera, Charges, EffectKind, EffectTimers, Enemy, EnemyKind, GameEvent, GamePhase, GameState,
    Particle, Platform, PlatformKind, Player, PowerUp, PowerUpEffect, PowerUpKind, SoundCue,
    SpecialAbility,
};
pub use tick::{TickInput, tick};
