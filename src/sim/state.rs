//! Game state and core simulation types
//!
//! Everything the per-tick components read and mutate lives here. The state is
//! owned by the top-level loop and passed explicitly; there is no ambient or
//! static game state anywhere in the crate.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::settings::{GameMode, SpawnTuning};

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (health reached zero)
    GameOver,
}

/// Timed player buffs. Each variant owns one countdown slot in
/// [`EffectTimers`]; decay and clamping are a single uniform loop rather than
/// one line per field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Speed,
    Jump,
    Shield,
    DoubleJump,
    Invincibility,
    Magnet,
    TimeSlow,
    SuperJump,
    MultiJump,
    Freeze,
    Laser,
    Ghost,
    Rainbow,
    Gravity,
}

impl EffectKind {
    pub const ALL: [EffectKind; 14] = [
        EffectKind::Speed,
        EffectKind::Jump,
        EffectKind::Shield,
        EffectKind::DoubleJump,
        EffectKind::Invincibility,
        EffectKind::Magnet,
        EffectKind::TimeSlow,
        EffectKind::SuperJump,
        EffectKind::MultiJump,
        EffectKind::Freeze,
        EffectKind::Laser,
        EffectKind::Ghost,
        EffectKind::Rainbow,
        EffectKind::Gravity,
    ];

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

/// Countdown bank: remaining ticks per effect kind, floor 0
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectTimers([u32; EffectKind::ALL.len()]);

impl EffectTimers {
    #[inline]
    pub fn get(&self, kind: EffectKind) -> u32 {
        self.0[kind.slot()]
    }

    #[inline]
    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.0[kind.slot()] > 0
    }

    /// Set a timer. Collecting a power-up replaces the remaining duration
    /// rather than stacking it.
    #[inline]
    pub fn set(&mut self, kind: EffectKind, ticks: u32) {
        self.0[kind.slot()] = ticks;
    }

    /// Drain a fixed cost (shield absorbing a hit), saturating at zero
    #[inline]
    pub fn drain(&mut self, kind: EffectKind, cost: u32) {
        let t = &mut self.0[kind.slot()];
        *t = t.saturating_sub(cost);
    }

    /// One tick of decay across every slot
    pub fn decay(&mut self) {
        for t in &mut self.0 {
            *t = t.saturating_sub(1);
        }
    }

    /// Kinds with a running timer, in declaration order
    pub fn active(&self) -> impl Iterator<Item = EffectKind> + '_ {
        EffectKind::ALL
            .into_iter()
            .filter(|k| self.0[k.slot()] > 0)
    }

    pub fn clear(&mut self) {
        self.0 = [0; EffectKind::ALL.len()];
    }
}

/// Single-use charges banked until triggered. The collection side is part of
/// the simulation; triggers are owned by the UI layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Charges {
    pub explosive: u32,
    pub teleport: u32,
    pub rocket: u32,
    pub shield_burst: u32,
}

/// The player entity. Created once per session, reset on restart, mutated
/// every tick by the physics, collision, and power-up components.
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub on_ground: bool,
    /// Clamped to [0, 100] at every mutation
    pub health: f32,
    /// 0 grounded, 1 after the first jump, 2 after the double jump
    pub jump_count: u8,
    pub timers: EffectTimers,
    /// Score multiplier in [1, 3], decaying toward 1
    pub score_multiplier: f32,
    pub coins: u32,
    pub charges: Charges,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(100.0, 300.0),
            vel: Vec2::ZERO,
            size: Vec2::new(PLAYER_W, PLAYER_H),
            on_ground: false,
            health: 100.0,
            jump_count: 0,
            timers: EffectTimers::default(),
            score_multiplier: 1.0,
            coins: 0,
            charges: Charges::default(),
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Apply damage, clamped so health never leaves [0, 100]
    pub fn damage(&mut self, amount: f32) {
        self.health = (self.health - amount).clamp(0.0, 100.0);
    }

    /// Heal, capped at full health
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).clamp(0.0, 100.0);
    }

    /// Current horizontal speed including the speed-boost bonus
    pub fn current_speed(&self) -> f32 {
        let boost = if self.timers.is_active(EffectKind::Speed) {
            SPEED_BOOST_BONUS
        } else {
            0.0
        };
        BASE_SPEED + boost
    }

    /// Current jump power including jump-boost and super-jump bonuses
    pub fn current_jump_power(&self) -> f32 {
        let mut power = BASE_JUMP_POWER;
        if self.timers.is_active(EffectKind::Jump) {
            power += JUMP_BOOST_BONUS;
        }
        if self.timers.is_active(EffectKind::SuperJump) {
            power += SUPER_JUMP_BONUS;
        }
        power
    }

    pub fn reset(&mut self) {
        *self = Player::new();
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// Platform category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformKind {
    /// The lethal strip spanning the bottom of the world
    Ground,
    /// A walkable ledge
    Ledge,
}

/// A static platform. Immutable once created; the array is only reset on
/// restart, never pruned during play.
#[derive(Debug, Clone)]
pub struct Platform {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PlatformKind,
}

impl Platform {
    /// Callers guarantee positive dimensions; collision against a degenerate
    /// box is avoided by construction.
    pub fn new(pos: Vec2, size: Vec2, kind: PlatformKind) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0);
        Self { pos, size, kind }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }
}

/// Special behavior tag carried by boss kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialAbility {
    Charge,
    Earthquake,
    Rainbow,
    Fireball,
    Freeze,
    Teleport,
    Lightning,
}

/// Enemy kinds. The five elite variants are boss-tagged and spawn behind a
/// second, lower probability gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Walker,
    Flyer,
    Spiker,
    Boss,
    MegaBoss,
    RainbowBoss,
    FireBoss,
    IceBoss,
    ShadowBoss,
    LightningBoss,
}

/// Per-kind parameters, looked up from a static table
#[derive(Debug, Clone, Copy)]
pub struct EnemyStats {
    pub health: i32,
    pub size: Vec2,
    pub speed: f32,
    pub ability: Option<SpecialAbility>,
    pub boss: bool,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 10] = [
        EnemyKind::Walker,
        EnemyKind::Flyer,
        EnemyKind::Spiker,
        EnemyKind::Boss,
        EnemyKind::MegaBoss,
        EnemyKind::RainbowBoss,
        EnemyKind::FireBoss,
        EnemyKind::IceBoss,
        EnemyKind::ShadowBoss,
        EnemyKind::LightningBoss,
    ];

    pub fn stats(self) -> EnemyStats {
        use EnemyKind::*;
        use SpecialAbility as A;
        match self {
            Walker => EnemyStats {
                health: 1,
                size: Vec2::new(22.0, 28.0),
                speed: 2.0,
                ability: None,
                boss: false,
            },
            Flyer => EnemyStats {
                health: 1,
                size: Vec2::new(22.0, 28.0),
                speed: 1.5,
                ability: None,
                boss: false,
            },
            Spiker => EnemyStats {
                health: 2,
                size: Vec2::new(30.0, 20.0),
                speed: 0.0,
                ability: None,
                boss: false,
            },
            Boss => EnemyStats {
                health: 3,
                size: Vec2::new(35.0, 35.0),
                speed: 1.0,
                ability: Some(A::Charge),
                boss: true,
            },
            MegaBoss => EnemyStats {
                health: 5,
                size: Vec2::new(45.0, 45.0),
                speed: 0.8,
                ability: Some(A::Earthquake),
                boss: true,
            },
            RainbowBoss => EnemyStats {
                health: 4,
                size: Vec2::new(40.0, 40.0),
                speed: 1.2,
                ability: Some(A::Rainbow),
                boss: true,
            },
            FireBoss => EnemyStats {
                health: 4,
                size: Vec2::new(38.0, 38.0),
                speed: 1.5,
                ability: Some(A::Fireball),
                boss: true,
            },
            IceBoss => EnemyStats {
                health: 4,
                size: Vec2::new(38.0, 38.0),
                speed: 1.3,
                ability: Some(A::Freeze),
                boss: true,
            },
            ShadowBoss => EnemyStats {
                health: 4,
                size: Vec2::new(36.0, 36.0),
                speed: 1.8,
                ability: Some(A::Teleport),
                boss: true,
            },
            LightningBoss => EnemyStats {
                health: 4,
                size: Vec2::new(42.0, 42.0),
                speed: 2.0,
                ability: Some(A::Lightning),
                boss: true,
            },
        }
    }
}

/// An enemy entity, spawned ahead of the camera frontier
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    pub vel_x: f32,
    pub size: Vec2,
    pub kind: EnemyKind,
    pub health: i32,
    pub ability: Option<SpecialAbility>,
}

impl Enemy {
    pub fn new(kind: EnemyKind, pos: Vec2, dir: f32) -> Self {
        let stats = kind.stats();
        Self {
            pos,
            vel_x: stats.speed * dir,
            size: stats.size,
            kind,
            health: stats.health,
            ability: stats.ability,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// How collecting a power-up changes the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerUpEffect {
    Heal(f32),
    Timer(EffectKind, u32),
    MultiplierStep(f32),
    Coin,
    ExplosiveCharge,
    TeleportCharge,
    RocketCharge,
    ShieldBurstCharge,
    /// Score only, no lasting state
    Instant,
}

/// The full power-up roster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Health,
    Speed,
    Jump,
    Shield,
    DoubleJump,
    ScoreMultiplier,
    Invincibility,
    Magnet,
    TimeSlow,
    Explosive,
    SuperJump,
    Coin,
    Teleport,
    MultiJump,
    Freeze,
    Laser,
    Ghost,
    Rocket,
    ShieldBurst,
    MegaCoin,
    Rainbow,
    Gravity,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 22] = [
        PowerUpKind::Health,
        PowerUpKind::Speed,
        PowerUpKind::Jump,
        PowerUpKind::Shield,
        PowerUpKind::DoubleJump,
        PowerUpKind::ScoreMultiplier,
        PowerUpKind::Invincibility,
        PowerUpKind::Magnet,
        PowerUpKind::TimeSlow,
        PowerUpKind::Explosive,
        PowerUpKind::SuperJump,
        PowerUpKind::Coin,
        PowerUpKind::Teleport,
        PowerUpKind::MultiJump,
        PowerUpKind::Freeze,
        PowerUpKind::Laser,
        PowerUpKind::Ghost,
        PowerUpKind::Rocket,
        PowerUpKind::ShieldBurst,
        PowerUpKind::MegaCoin,
        PowerUpKind::Rainbow,
        PowerUpKind::Gravity,
    ];

    /// The smaller pool used for platform-anchored frontier spawns
    pub const BASIC: [PowerUpKind; 7] = [
        PowerUpKind::Health,
        PowerUpKind::Speed,
        PowerUpKind::Jump,
        PowerUpKind::Shield,
        PowerUpKind::DoubleJump,
        PowerUpKind::ScoreMultiplier,
        PowerUpKind::Invincibility,
    ];

    /// Base score, before the score multiplier
    pub fn score(self) -> u32 {
        use PowerUpKind::*;
        match self {
            Health => 15,
            Speed | Jump => 12,
            Shield | Magnet => 20,
            DoubleJump | SuperJump => 18,
            ScoreMultiplier | TimeSlow | MultiJump => 25,
            Invincibility | Explosive | Freeze | Ghost => 30,
            Laser | Gravity => 35,
            Coin | ShieldBurst => 50,
            Teleport | Rainbow => 40,
            Rocket => 45,
            MegaCoin => 200,
        }
    }

    /// Effect applied on collection (durations in ticks at 60/s)
    pub fn effect(self) -> PowerUpEffect {
        use PowerUpEffect as E;
        use PowerUpKind::*;
        match self {
            Health => E::Heal(30.0),
            Speed => E::Timer(EffectKind::Speed, 300),
            Jump => E::Timer(EffectKind::Jump, 300),
            Shield => E::Timer(EffectKind::Shield, 600),
            DoubleJump => E::Timer(EffectKind::DoubleJump, 900),
            ScoreMultiplier => E::MultiplierStep(0.5),
            Invincibility => E::Timer(EffectKind::Invincibility, 300),
            Magnet => E::Timer(EffectKind::Magnet, 600),
            TimeSlow => E::Timer(EffectKind::TimeSlow, 300),
            Explosive => E::ExplosiveCharge,
            SuperJump => E::Timer(EffectKind::SuperJump, 450),
            Coin => E::Coin,
            Teleport => E::TeleportCharge,
            MultiJump => E::Timer(EffectKind::MultiJump, 600),
            Freeze => E::Timer(EffectKind::Freeze, 300),
            Laser => E::Timer(EffectKind::Laser, 450),
            Ghost => E::Timer(EffectKind::Ghost, 300),
            Rocket => E::RocketCharge,
            ShieldBurst => E::ShieldBurstCharge,
            MegaCoin => E::Instant,
            Rainbow => E::Timer(EffectKind::Rainbow, 600),
            Gravity => E::Timer(EffectKind::Gravity, 300),
        }
    }

    /// Sound cue played on collection
    pub fn cue(self) -> SoundCue {
        use PowerUpKind::*;
        match self {
            Health => SoundCue::Health,
            Shield => SoundCue::Shield,
            Invincibility => SoundCue::Invincibility,
            ScoreMultiplier | Coin | MegaCoin => SoundCue::Multiplier,
            _ => SoundCue::Powerup,
        }
    }
}

/// A collectible power-up. Vec order is creation order; the live cap evicts
/// from the front.
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub pos: Vec2,
    pub size: Vec2,
    pub kind: PowerUpKind,
    pub collected: bool,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            pos,
            size: Vec2::splat(POWERUP_SIZE),
            kind,
            collected: false,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Camera: horizontal scroll plus an independent decaying shake offset
#[derive(Debug, Clone, Copy, Default)]
pub struct Camera {
    pub x: f32,
    pub shake: Vec2,
    /// Requested shake magnitude; requests keep the max, decay is ×0.9/tick
    pub shake_mag: f32,
}

impl Camera {
    /// Components request shake; the strongest request this tick wins
    pub fn add_shake(&mut self, intensity: f32) {
        self.shake_mag = self.shake_mag.max(intensity);
    }
}

/// A cosmetic particle. Consumed read-only by the renderer; nothing in the
/// simulation reads particles back.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub size: f32,
    /// hsl hue in degrees
    pub hue: f32,
    pub glow: bool,
}

/// Discrete audio cues emitted by simulation transitions. Fire-and-forget;
/// the core never observes a return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Jump,
    DoubleJump,
    Powerup,
    Health,
    Shield,
    Multiplier,
    Invincibility,
    LevelUp,
    Damage,
    ShieldHit,
    InvincibleHit,
}

/// Events drained by the harness after each tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Sound(SoundCue),
    LevelUp { level: u32 },
    /// Emitted once when the run ends; carries what the leaderboard needs
    GameOver { score: u32, level: u32 },
}

/// Complete simulation state, owned by the top-level loop
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Executed-tick counter; gameplay timers count these, never wall time
    pub ticks: u64,
    pub score: u32,
    pub level: u32,
    /// Fraction of the way to the next level threshold, [0, 1)
    pub level_progress: f32,
    pub game_speed: f32,
    pub survival_timer: u64,
    pub player: Player,
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<PowerUp>,
    pub particles: Vec<Particle>,
    pub camera: Camera,
    pub events: Vec<GameEvent>,
    pub mode: GameMode,
    pub tuning: SpawnTuning,
}

impl GameState {
    pub fn new(seed: u64, mode: GameMode, tuning: SpawnTuning) -> Self {
        let mut player = Player::new();
        player.health = mode.starting_health();
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Playing,
            ticks: 0,
            score: 0,
            level: 1,
            level_progress: 0.0,
            game_speed: mode.initial_speed(),
            survival_timer: 0,
            player,
            platforms: Vec::new(),
            enemies: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            camera: Camera::default(),
            events: Vec::new(),
            mode,
            tuning,
        };
        super::worldgen::initial_world(&mut state);
        state
    }

    /// Restart in place, keeping mode and tuning
    pub fn reset(&mut self, seed: u64) {
        *self = GameState::new(seed, self.mode, self.tuning);
    }

    /// Rightmost generated platform edge (the frontier)
    pub fn rightmost_platform_edge(&self) -> f32 {
        self.platforms
            .iter()
            .map(|p| p.right())
            .fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn push_cue(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound(cue));
    }

    /// Award score through the current multiplier
    pub fn award(&mut self, base: u32) {
        self.score += (base as f32 * self.player.score_multiplier).floor() as u32;
    }
}
