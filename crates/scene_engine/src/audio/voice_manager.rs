//! Voice management system
//!
//! Tracks the voices (playing instances of a sound) in a fixed-size pool and
//! advances their playback clocks so one-shot voices end on time.

use std::collections::HashMap;

use super::SoundDataHandle;

/// Handle to a playing voice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoiceHandle(u32);

impl VoiceHandle {
    /// Raw id, for logging
    pub fn id(self) -> u32 {
        self.0
    }
}

/// State of one voice in the pool
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSlot {
    /// Sound being played
    pub sound: SoundDataHandle,
    /// Restart at the end instead of finishing
    pub looping: bool,
    /// Voice volume before the master volume is applied
    pub volume: f32,
    /// Seconds played since the start of the current loop
    pub position: f32,
    /// Length of the sound in seconds
    pub duration: f32,
}

/// Fixed-capacity voice pool
pub struct VoiceManager {
    max_voices: usize,
    voices: HashMap<VoiceHandle, VoiceSlot>,
    next_handle_id: u32,
}

impl VoiceManager {
    /// Create a new voice manager with specified capacity
    pub fn with_capacity(max_voices: usize) -> Self {
        Self {
            max_voices,
            voices: HashMap::new(),
            next_handle_id: 0,
        }
    }

    fn next_handle(&mut self) -> VoiceHandle {
        let id = self.next_handle_id;
        self.next_handle_id = self.next_handle_id.wrapping_add(1);
        VoiceHandle(id)
    }

    /// Allocate a voice, or `None` when the pool is full
    pub fn allocate(&mut self, slot: VoiceSlot) -> Option<VoiceHandle> {
        if self.voices.len() >= self.max_voices {
            return None;
        }
        let handle = self.next_handle();
        self.voices.insert(handle, slot);
        Some(handle)
    }

    /// Remove a voice from the pool
    pub fn release(&mut self, handle: VoiceHandle) -> Option<VoiceSlot> {
        self.voices.remove(&handle)
    }

    /// Borrow a voice
    pub fn get(&self, handle: VoiceHandle) -> Option<&VoiceSlot> {
        self.voices.get(&handle)
    }

    /// Mutably borrow a voice
    pub fn get_mut(&mut self, handle: VoiceHandle) -> Option<&mut VoiceSlot> {
        self.voices.get_mut(&handle)
    }

    /// Advance every voice by `delta` seconds
    ///
    /// Looping voices wrap around; one-shot voices that reached their end are
    /// released and returned, sorted by handle.
    pub fn advance(&mut self, delta: f32) -> Vec<VoiceHandle> {
        let mut finished = Vec::new();

        for (handle, slot) in &mut self.voices {
            slot.position += delta;
            if slot.position < slot.duration {
                continue;
            }
            if slot.looping && slot.duration > 0.0 {
                slot.position %= slot.duration;
            } else {
                finished.push(*handle);
            }
        }

        finished.sort();
        for handle in &finished {
            self.voices.remove(handle);
        }
        finished
    }

    /// Get the number of currently active voices
    pub fn active_count(&self) -> usize {
        self.voices.len()
    }

    /// Get the maximum number of voices
    pub fn max_voices(&self) -> usize {
        self.max_voices
    }

    /// Check if voices are available
    pub fn has_available_voices(&self) -> bool {
        self.voices.len() < self.max_voices
    }

    /// Get all active voice handles
    pub fn handles(&self) -> Vec<VoiceHandle> {
        self.voices.keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn slot(looping: bool, duration: f32) -> VoiceSlot {
        let mut sounds: SlotMap<SoundDataHandle, ()> = SlotMap::with_key();
        VoiceSlot {
            sound: sounds.insert(()),
            looping,
            volume: 1.0,
            position: 0.0,
            duration,
        }
    }

    #[test]
    fn test_voice_pool_full() {
        let mut manager = VoiceManager::with_capacity(2);
        assert!(manager.allocate(slot(false, 1.0)).is_some());
        assert!(manager.allocate(slot(false, 1.0)).is_some());

        assert!(!manager.has_available_voices());
        assert!(manager.allocate(slot(false, 1.0)).is_none());
    }

    #[test]
    fn test_one_shot_finishes_and_loop_wraps() {
        let mut manager = VoiceManager::with_capacity(4);
        let one_shot = manager.allocate(slot(false, 0.5)).unwrap();
        let looping = manager.allocate(slot(true, 0.5)).unwrap();

        assert!(manager.advance(0.3).is_empty());
        assert_eq!(manager.advance(0.3), vec![one_shot]);

        assert_eq!(manager.active_count(), 1);
        let position = manager.get(looping).unwrap().position;
        assert!((position - 0.1).abs() < 1e-5);
    }

    #[test]
    fn test_release_frees_capacity() {
        let mut manager = VoiceManager::with_capacity(1);
        let handle = manager.allocate(slot(true, 1.0)).unwrap();
        assert!(manager.release(handle).is_some());
        assert!(manager.release(handle).is_none());
        assert!(manager.has_available_voices());
    }
}
