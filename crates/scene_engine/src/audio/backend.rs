//! Audio backend implementations
//!
//! The backend is the boundary to an output device. The engine ships only
//! [`SilentBackend`], which accepts every command and remembers what it was
//! told, so scenes run unchanged without a sound card.

use std::collections::HashMap;

use crate::assets::WaveInfo;

use super::voice_manager::VoiceHandle;

/// Audio backend trait for platform abstraction
pub trait AudioBackend {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Begin playing a voice at the given effective volume
    fn start(&mut self, voice: VoiceHandle, sound: &WaveInfo, looping: bool, volume: f32);

    /// Stop a voice
    fn stop(&mut self, voice: VoiceHandle);

    /// Change the effective volume of a playing voice
    fn set_volume(&mut self, voice: VoiceHandle, volume: f32);

    /// Voices the backend believes are playing
    fn active_voices(&self) -> usize;
}

/// Backend that produces no sound
#[derive(Debug, Default)]
pub struct SilentBackend {
    playing: HashMap<VoiceHandle, f32>,
}

impl SilentBackend {
    /// Create a new silent backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Effective volume the backend last received for a voice
    pub fn volume(&self, voice: VoiceHandle) -> Option<f32> {
        self.playing.get(&voice).copied()
    }
}

impl AudioBackend for SilentBackend {
    fn name(&self) -> &'static str {
        "silent"
    }

    fn start(&mut self, voice: VoiceHandle, sound: &WaveInfo, looping: bool, volume: f32) {
        log::trace!(
            "Silent start {:?}: {} Hz, {} ch, looping {}",
            voice, sound.sample_rate, sound.channels, looping
        );
        self.playing.insert(voice, volume);
    }

    fn stop(&mut self, voice: VoiceHandle) {
        self.playing.remove(&voice);
    }

    fn set_volume(&mut self, voice: VoiceHandle, volume: f32) {
        if let Some(current) = self.playing.get_mut(&voice) {
            *current = volume;
        }
    }

    fn active_voices(&self) -> usize {
        self.playing.len()
    }
}
