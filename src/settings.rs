//! Game settings, mode presets, and spawn tuning profiles
//!
//! Persisted to LocalStorage separately from accounts.

use serde::{Deserialize, Serialize};

use crate::consts::BOSS_GATE_CHANCE;

/// Named game-mode presets, applied once before a run begins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GameMode {
    #[default]
    Classic,
    /// Faster initial scroll
    Speed,
    /// No practical level cap
    Endless,
    /// Elite enemies spawn without the rarity gate
    Boss,
    /// Raised power-up spawn probabilities
    PowerUp,
    /// Half starting health
    Hardcore,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "Classic",
            GameMode::Speed => "Speed",
            GameMode::Endless => "Endless",
            GameMode::Boss => "Boss",
            GameMode::PowerUp => "PowerUp",
            GameMode::Hardcore => "Hardcore",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "speed" => Some(GameMode::Speed),
            "endless" => Some(GameMode::Endless),
            "boss" => Some(GameMode::Boss),
            "powerup" | "power-up" => Some(GameMode::PowerUp),
            "hardcore" => Some(GameMode::Hardcore),
            _ => None,
        }
    }

    pub fn initial_speed(&self) -> f32 {
        match self {
            GameMode::Speed => 3.0,
            _ => 2.0,
        }
    }

    pub fn max_level(&self) -> u32 {
        match self {
            GameMode::Endless => 999,
            _ => 10,
        }
    }

    pub fn starting_health(&self) -> f32 {
        match self {
            GameMode::Hardcore => 50.0,
            _ => 100.0,
        }
    }

    /// Probability that a rolled boss kind actually spawns
    pub fn boss_gate_chance(&self) -> f64 {
        match self {
            GameMode::Boss => 1.0,
            _ => BOSS_GATE_CHANCE,
        }
    }

    /// Multiplier on the ambient/landing spawn probabilities
    pub fn spawn_chance_scale(&self) -> f64 {
        match self {
            GameMode::PowerUp => 2.0,
            _ => 1.0,
        }
    }
}

/// Rendering/workload profile. Performance mode lowers spawn probabilities
/// and entity caps; it is a static configuration record, not a scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PerfProfile {
    #[default]
    Performance,
    Visual,
}

impl PerfProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            PerfProfile::Performance => "Performance",
            PerfProfile::Visual => "Visual",
        }
    }

    pub fn tuning(&self) -> SpawnTuning {
        match self {
            PerfProfile::Performance => SpawnTuning::performance(),
            PerfProfile::Visual => SpawnTuning::visual(),
        }
    }
}

/// Every spawn probability and cap the simulation consults, as one record.
/// Both historical numeric tables (performance vs visual) are preserved here
/// behind the two constructors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTuning {
    /// Chance that an on-jump burst is skipped entirely
    pub jump_skip_chance: f64,
    /// Power-ups per on-jump burst
    pub jump_burst: usize,
    /// Chance that landing on a platform triggers a burst roll
    pub landing_chance: f64,
    /// Chance that a triggered landing burst is skipped anyway
    pub landing_skip_chance: f64,
    /// Power-ups per landing burst
    pub landing_burst: usize,
    /// Per-tick ambient spawn chance while the player moves
    pub ambient_chance: f64,
    /// Platform-anchored candidates per frontier batch
    pub frontier_anchored: usize,
    /// Chance that an anchored candidate spawns
    pub frontier_anchored_chance: f64,
    /// Floating spawns per frontier batch
    pub frontier_floating: usize,
    /// Live power-up cap; oldest-created evicted first
    pub powerup_cap: usize,
    /// Power-ups trailing this far behind the camera are removed
    pub powerup_trail_distance: f32,
    /// Hard cap on live particles
    pub particle_cap: usize,
    /// Particle bursts are clamped to this many per event
    pub particle_burst_cap: usize,
    /// Whether particles carry the glow flag for the renderer
    pub particle_glow: bool,
}

impl SpawnTuning {
    pub fn performance() -> Self {
        Self {
            jump_skip_chance: 0.8,
            jump_burst: 0,
            landing_chance: 0.05,
            landing_skip_chance: 0.9,
            landing_burst: 0,
            ambient_chance: 0.001,
            frontier_anchored: 3,
            frontier_anchored_chance: 0.2,
            frontier_floating: 2,
            powerup_cap: 10,
            powerup_trail_distance: 100.0,
            particle_cap: 200,
            particle_burst_cap: 4,
            particle_glow: false,
        }
    }

    pub fn visual() -> Self {
        Self {
            jump_skip_chance: 0.0,
            jump_burst: 1,
            landing_chance: 0.15,
            landing_skip_chance: 0.0,
            landing_burst: 1,
            ambient_chance: 0.003,
            frontier_anchored: 6,
            frontier_anchored_chance: 0.2,
            frontier_floating: 4,
            powerup_cap: 25,
            powerup_trail_distance: 200.0,
            particle_cap: 500,
            particle_burst_cap: 16,
            particle_glow: true,
        }
    }
}

impl Default for SpawnTuning {
    fn default() -> Self {
        Self::performance()
    }
}

/// User preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub profile: PerfProfile,
    pub mode: GameMode,
    /// Master volume (0.0 - 1.0)
    pub volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            profile: PerfProfile::Performance,
            mode: GameMode::Classic,
            volume: 0.5,
            muted: false,
        }
    }
}

impl Settings {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "rainbow_run_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(settings) = serde_json::from_str(&json) {
                    log::info!("Loaded settings from LocalStorage");
                    return settings;
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}
