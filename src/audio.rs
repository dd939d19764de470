//! Audio system
//!
//! Sound effects are generated with the Web Audio API; background music is a
//! looping media element. Browsers may refuse playback until the first user
//! gesture, and any refusal is ignored: audio never interrupts the game.

use crate::sim::GameEvent;

/// Looping background track, served next to the page
pub const MUSIC_SRC: &str = "/newfriendly.mp3";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run started
    GameStart,
    /// Bonus collected
    BonusCollect,
    /// Hit by a hazard
    GameOver,
}

impl SoundEffect {
    /// Sound to play for a session event, if any
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(SoundEffect::GameStart),
            GameEvent::BonusCollected { .. } => Some(SoundEffect::BonusCollect),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::Paused | GameEvent::Resumed => None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen::JsValue;
    use wasm_bindgen::closure::Closure;
    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{MUSIC_SRC, SoundEffect};
    use crate::settings::Settings;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        music: Option<HtmlAudioElement>,
        music_enabled: bool,
        sfx_enabled: bool,
        sfx_volume: f32,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - sound effects disabled");
            }
            let music = HtmlAudioElement::new_with_src(MUSIC_SRC).ok();
            if let Some(music) = &music {
                music.set_loop(true);
            } else {
                log::warn!("Failed to create music element - music disabled");
            }
            Self {
                ctx,
                music,
                music_enabled: true,
                sfx_enabled: true,
                sfx_volume: 0.8,
            }
        }

        /// Pick up the audio toggles and start/stop music to match
        pub fn apply_settings(&mut self, settings: &Settings) {
            self.music_enabled = settings.music_enabled;
            self.sfx_enabled = settings.sfx_enabled;
            self.update_music();
        }

        /// Resume audio after a user gesture (browsers block autoplay)
        pub fn unlock(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
            self.update_music();
        }

        /// Play or pause the music according to the toggle
        pub fn update_music(&self) {
            let Some(music) = &self.music else { return };
            if self.music_enabled {
                if let Ok(promise) = music.play() {
                    // Autoplay rejection is expected before the first gesture
                    let ignore = Closure::<dyn FnMut(JsValue)>::new(|_| {});
                    let _ = promise.catch(&ignore);
                    ignore.forget();
                }
            } else {
                let _ = music.pause();
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if !self.sfx_enabled {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            let vol = self.sfx_volume;
            match effect {
                SoundEffect::GameStart => self.play_game_start(ctx, vol),
                SoundEffect::BonusCollect => self.play_bonus(ctx, vol),
                SoundEffect::GameOver => self.play_game_over(ctx, vol),
            }
        }

        // === Sound generators ===

        /// Create an oscillator with gain envelope
        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Run start - rising arpeggio
        fn play_game_start(&self, ctx: &AudioContext, vol: f32) {
            for (i, freq) in [330.0, 440.0, 550.0, 660.0].iter().enumerate() {
                let delay = i as f64 * 0.09;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Square) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.15, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.15).ok();
                }
            }
        }

        /// Bonus - quick meow-ish chirp
        fn play_bonus(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 700.0, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(700.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(1100.0, t + 0.08)
                .ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(600.0, t + 0.25)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        /// Game over - falling scream
        fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 900.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.9)
                .ok();
            osc.frequency().set_value_at_time(900.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(120.0, t + 0.9)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 1.0).ok();
        }
    }
}
