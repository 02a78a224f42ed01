//! Host collaborators
//!
//! Narrow capability interfaces the encounter core calls into. The core never
//! owns their implementation; the reference arena in `game` provides one.

pub mod spawner;
pub mod avatar;
pub mod narrative;

pub use spawner::{Spawner, ProjectileHandle, ProjectileStyle, EffectKind, Rgb, NullSpawner};
pub use avatar::{Avatar, TargetView};
pub use narrative::{NarrativeHook, BossHandle, BossTheme, SilentNarrator};

use crate::audio::{AudioCue, CueId};
use crate::ecs::Vec2;

/// The collaborators one tick talks to
pub struct Collaborators<'a> {
    pub spawner: &'a mut dyn Spawner,
    pub audio: &'a mut dyn AudioCue,
    pub narrative: &'a mut dyn NarrativeHook,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        spawner: &'a mut dyn Spawner,
        audio: &'a mut dyn AudioCue,
        narrative: &'a mut dyn NarrativeHook,
    ) -> Self {
        Self { spawner, audio, narrative }
    }

    pub fn projectile(
        &mut self,
        origin: Vec2,
        velocity: Vec2,
        damage: u32,
        style: ProjectileStyle,
    ) -> ProjectileHandle {
        self.spawner.spawn_projectile(origin, velocity, damage, style)
    }

    pub fn effect(&mut self, kind: EffectKind, position: Vec2, color: Rgb, scale: f32, lifetime: u32) {
        self.spawner.spawn_visual_effect(kind, position, color, scale, lifetime);
    }

    /// Play a cue at its default pitch and volume
    pub fn cue(&mut self, id: CueId, position: Vec2) {
        self.audio.play_cue(id, position, id.default_pitch(), id.default_volume());
    }
}
