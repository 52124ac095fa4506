//! Audio cue playback using the Web Audio API
//!
//! Procedurally generated oscillator blips - no external files needed. The
//! simulation emits [`SoundCue`] events; this manager turns them into sound
//! and never reports anything back.

use crate::sim::SoundCue;

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, OscillatorType};

/// Oscillator frequency (Hz) and duration (s) for a cue
pub fn cue_voice(cue: SoundCue) -> (f32, f32) {
    match cue {
        SoundCue::Jump => (523.25, 0.1),          // C5
        SoundCue::DoubleJump => (659.25, 0.15),   // E5
        SoundCue::Powerup => (783.99, 0.2),       // G5
        SoundCue::Health => (880.0, 0.3),         // A5
        SoundCue::Shield => (1046.5, 0.25),       // C6
        SoundCue::Multiplier => (1318.5, 0.4),    // E6
        SoundCue::Invincibility => (1568.0, 0.5), // G6
        SoundCue::LevelUp => (1760.0, 0.8),       // A6
        SoundCue::Damage => (220.0, 0.2),         // A3
        SoundCue::ShieldHit => (1046.5, 0.15),    // C6
        SoundCue::InvincibleHit => (1760.0, 0.1), // A6
    }
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        // May fail outside a secure context; the game keeps running silently
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.5,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            volume: 0.5,
            muted: false,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn muted(&self) -> bool {
        self.muted
    }

    /// Play a cue. Fire-and-forget.
    #[cfg(target_arch = "wasm32")]
    pub fn play(&self, cue: SoundCue) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers suspend the context until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let (freq, duration) = cue_voice(cue);
        if let Err(e) = self.synth(ctx, freq, duration) {
            log::debug!("Audio cue failed: {:?}", e);
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn synth(&self, ctx: &AudioContext, freq: f32, duration: f32) -> Result<(), wasm_bindgen::JsValue> {
        let oscillator = ctx.create_oscillator()?;
        let gain = ctx.create_gain()?;

        oscillator.connect_with_audio_node(&gain)?;
        gain.connect_with_audio_node(&ctx.destination())?;

        let now = ctx.current_time();
        oscillator.frequency().set_value_at_time(freq, now)?;
        oscillator.set_type(OscillatorType::Sine);

        let peak = self.volume * 0.3;
        gain.gain().set_value_at_time(0.0, now)?;
        gain.gain().linear_ramp_to_value_at_time(peak, now + 0.01)?;
        gain.gain()
            .linear_ramp_to_value_at_time(0.0, now + duration as f64)?;

        oscillator.start()?;
        oscillator.stop_with_when(now + duration as f64)?;
        Ok(())
    }

    /// Native stub: cues are logged, not played.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn play(&self, cue: SoundCue) {
        if !self.muted {
            log::debug!("cue: {:?}", cue);
        }
    }
}
