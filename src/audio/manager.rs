//! Cue playback interface
//!
//! The core plays cues fire-and-forget. `CueRecorder` keeps a bounded log of
//! requests for headless hosts and tests.

use std::collections::VecDeque;

use crate::ecs::Vec2;

use super::sounds::CueId;

/// Fire-and-forget audio playback; no return value is consulted
pub trait AudioCue {
    fn play_cue(&mut self, id: CueId, position: Vec2, pitch: f32, volume: f32);
}

/// A cue request as recorded by `CueRecorder`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayedCue {
    pub id: CueId,
    pub position: Vec2,
    pub pitch: f32,
    pub volume: f32,
}

/// Records cue requests instead of playing them
pub struct CueRecorder {
    /// Most recent requests, oldest first
    played: VecDeque<PlayedCue>,
    /// Maximum number of requests kept
    capacity: usize,
    /// Master volume (0.0 - 1.0)
    master_volume: f32,
    /// Total number of requests ever received
    total: u64,
}

impl CueRecorder {
    pub fn new(capacity: usize) -> Self {
        Self {
            played: VecDeque::with_capacity(capacity),
            capacity,
            master_volume: 1.0,
            total: 0,
        }
    }

    pub fn set_master_volume(&mut self, volume: f32) {
        self.master_volume = volume.clamp(0.0, 1.0);
    }

    pub fn played(&self) -> impl Iterator<Item = &PlayedCue> {
        self.played.iter()
    }

    /// Number of recorded requests for `id`
    pub fn count(&self, id: CueId) -> usize {
        self.played.iter().filter(|c| c.id == id).count()
    }

    pub fn total(&self) -> u64 {
        self.total
    }
}

impl Default for CueRecorder {
    fn default() -> Self {
        Self::new(256)
    }
}

impl AudioCue for CueRecorder {
    fn play_cue(&mut self, id: CueId, position: Vec2, pitch: f32, volume: f32) {
        self.total += 1;
        if self.capacity == 0 {
            return;
        }
        if self.played.len() == self.capacity {
            self.played.pop_front();
        }
        self.played.push_back(PlayedCue {
            id,
            position,
            pitch,
            volume: volume * self.master_volume,
        });
        log::trace!("Cue {:?} at ({:.0}, {:.0})", id, position.x, position.y);
    }
}
