//! Audio system
//!
//! Loads wave files into sound data handles and plays them on pooled voices.
//!
//! ```no_run
//! use scene_engine::audio::Audio;
//! use scene_engine::core::AudioConfig;
//!
//! let mut audio = Audio::silent(&AudioConfig::default(), "resources");
//! let sound = audio.load_wave("se_sad03.wav")?;
//! let voice = audio.play_wave(sound, true, 0.1)?;
//! audio.stop_wave(voice)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod backend;
pub mod voice_manager;

pub use backend::{AudioBackend, SilentBackend};
pub use voice_manager::{VoiceHandle, VoiceManager, VoiceSlot};

use slotmap::{new_key_type, SlotMap};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

use crate::assets::{AssetError, WaveInfo};
use crate::core::AudioConfig;

new_key_type! {
    /// Handle to loaded sound data
    pub struct SoundDataHandle;
}

/// Audio playback errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    /// Voice handle is not playing (never was, stopped, or finished)
    #[error("Invalid voice handle: {0:?}")]
    InvalidHandle(VoiceHandle),

    /// Sound data handle was not returned by this audio system
    #[error("Unknown sound data handle")]
    UnknownSound,

    /// Every voice in the pool is busy
    #[error("No free voice (pool of {0})")]
    NoFreeVoice(usize),
}

#[derive(Debug)]
struct SoundData {
    name: String,
    info: WaveInfo,
}

/// Audio system
pub struct Audio {
    resource_dir: PathBuf,
    master_volume: f32,
    sounds: SlotMap<SoundDataHandle, SoundData>,
    by_name: HashMap<String, SoundDataHandle>,
    voices: VoiceManager,
    backend: Box<dyn AudioBackend>,
}

impl Audio {
    /// Create an audio system on a backend
    pub fn new(
        config: &AudioConfig,
        resource_dir: impl Into<PathBuf>,
        backend: Box<dyn AudioBackend>,
    ) -> Self {
        log::info!(
            "Audio initialized on {} backend ({} voices)",
            backend.name(),
            config.max_voices
        );
        Self {
            resource_dir: resource_dir.into(),
            master_volume: config.master_volume.clamp(0.0, 1.0),
            sounds: SlotMap::with_key(),
            by_name: HashMap::new(),
            voices: VoiceManager::with_capacity(config.max_voices),
            backend,
        }
    }

    /// Create an audio system that produces no sound
    pub fn silent(config: &AudioConfig, resource_dir: impl Into<PathBuf>) -> Self {
        Self::new(config, resource_dir, Box::new(SilentBackend::new()))
    }

    /// Load a wave file, returning the cached handle if already loaded
    pub fn load_wave(&mut self, file_name: &str) -> Result<SoundDataHandle, AssetError> {
        if let Some(&handle) = self.by_name.get(file_name) {
            return Ok(handle);
        }

        let path = self.resource_dir.join(file_name);
        if !path.is_file() {
            return Err(AssetError::NotFound(path));
        }
        let info = WaveInfo::open(&path)?;

        let handle = self.sounds.insert(SoundData {
            name: file_name.to_string(),
            info,
        });
        self.by_name.insert(file_name.to_string(), handle);

        log::debug!(
            "Loaded sound {} ({:.2}s, {} Hz)",
            path.display(),
            info.duration_secs(),
            info.sample_rate
        );
        Ok(handle)
    }

    /// Header information for loaded sound data
    pub fn wave_info(&self, sound: SoundDataHandle) -> Option<&WaveInfo> {
        self.sounds.get(sound).map(|data| &data.info)
    }

    /// Start a voice playing `sound`
    pub fn play_wave(
        &mut self,
        sound: SoundDataHandle,
        looping: bool,
        volume: f32,
    ) -> Result<VoiceHandle, AudioError> {
        let data = self.sounds.get(sound).ok_or(AudioError::UnknownSound)?;
        let volume = volume.clamp(0.0, 1.0);

        let voice = self
            .voices
            .allocate(VoiceSlot {
                sound,
                looping,
                volume,
                position: 0.0,
                duration: data.info.duration_secs(),
            })
            .ok_or_else(|| AudioError::NoFreeVoice(self.voices.max_voices()))?;

        self.backend.start(voice, &data.info, looping, volume * self.master_volume);
        log::debug!("Playing {} on voice {} (looping: {})", data.name, voice.id(), looping);
        Ok(voice)
    }

    /// Stop a voice
    pub fn stop_wave(&mut self, voice: VoiceHandle) -> Result<(), AudioError> {
        self.voices.release(voice).ok_or(AudioError::InvalidHandle(voice))?;
        self.backend.stop(voice);
        log::debug!("Stopped voice {}", voice.id());
        Ok(())
    }

    /// Whether a voice is still playing
    pub fn is_playing(&self, voice: VoiceHandle) -> bool {
        self.voices.get(voice).is_some()
    }

    /// Set a voice's volume, clamped to `[0, 1]`
    pub fn set_volume(&mut self, voice: VoiceHandle, volume: f32) -> Result<(), AudioError> {
        let slot = self.voices.get_mut(voice).ok_or(AudioError::InvalidHandle(voice))?;
        slot.volume = volume.clamp(0.0, 1.0);
        let effective = slot.volume * self.master_volume;
        self.backend.set_volume(voice, effective);
        Ok(())
    }

    /// Volume a voice actually plays at (voice volume times master volume)
    pub fn effective_volume(&self, voice: VoiceHandle) -> Option<f32> {
        self.voices.get(voice).map(|slot| slot.volume * self.master_volume)
    }

    /// Advance playback by `delta` seconds and release finished voices
    pub fn update(&mut self, delta: f32) {
        for voice in self.voices.advance(delta) {
            self.backend.stop(voice);
            log::trace!("Voice {} finished", voice.id());
        }
    }

    /// Number of playing voices
    pub fn active_voices(&self) -> usize {
        self.voices.active_count()
    }

    /// The backend in use
    pub fn backend(&self) -> &dyn AudioBackend {
        self.backend.as_ref()
    }
}
