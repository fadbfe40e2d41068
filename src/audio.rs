//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Every call is fire-and-forget: Web Audio errors are dropped.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Master gain applied to every cue
const VOLUME: f32 = 0.8;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Heart caught
    Collect,
    /// Mud hit the player
    Hit,
    /// Last life lost
    GameOver,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::Collected => SoundEffect::Collect,
            GameEvent::Hit => SoundEffect::Hit,
            GameEvent::GameOver { .. } => SoundEffect::GameOver,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
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
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self { ctx }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::Collect => self.play_collect(ctx, VOLUME),
            SoundEffect::Hit => self.play_hit(ctx, VOLUME),
            SoundEffect::GameOver => self.play_game_over(ctx, VOLUME),
        }
    }

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

    /// Heart caught - bright two-note chime
    fn play_collect(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        for (i, freq) in [880.0_f32, 1318.5].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                continue;
            };
            let start = t + i as f64 * 0.07;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.35, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.15)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.18).ok();
        }
    }

    /// Mud hit - low squelchy thud
    fn play_hit(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.2)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(50.0, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.22).ok();
        }

        // Bass thump
        if let Some((osc, gain)) = self.create_osc(ctx, 60.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }
    }

    /// Game over - descending sad trombone
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        for (i, freq) in [392.0_f32, 370.0, 349.2, 311.1].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Triangle) else {
                continue;
            };
            let start = t + i as f64 * 0.25;
            let len = if i == 3 { 0.6 } else { 0.22 };
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.3, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + len)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + len + 0.02).ok();
        }
    }
}
