//! Audio cues
//!
//! The encounter requests cues by id; playback belongs to the host.

pub mod manager;
pub mod sounds;

pub use manager::{AudioCue, CueRecorder, PlayedCue};
pub use sounds::{CueId, CueCategory};
