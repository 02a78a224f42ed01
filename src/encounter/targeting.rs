//! Targeting and spatial policy
//!
//! Picks the target, computes where the boss hovers, and enforces the
//! distance bands: teleport rescue, sustained-distance enrage, and normal.

use crate::audio::CueId;
use crate::data::{EncounterConfig, HoverParams, RangePolicy};
use crate::ecs::Vec2;
use crate::host::{Avatar, Collaborators, EffectKind};

use super::body::BossBody;
use super::state::EncounterState;

/// Ticks before another rescue teleport may happen
const TELEPORT_COOLDOWN: u32 = 30;

/// Nearest active target to `origin`.
///
/// Ties go to the first one found in roster order.
pub fn select_target<A: Avatar>(origin: Vec2, targets: &[A]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (index, target) in targets.iter().enumerate() {
        if !target.is_active() {
            continue;
        }
        let distance = origin.distance(target.position());
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Point above the target with a slow sinusoidal sway
pub fn compute_hover_position(target: Vec2, timer: u32, params: &HoverParams) -> Vec2 {
    let t = timer as f32;
    target
        + Vec2::new(
            (t * params.freq_x).sin() * params.sway_x,
            -params.height + (t * params.freq_y).cos() * params.sway_y,
        )
}

/// Velocity that eases the body toward `destination`
pub fn approach_velocity(from: Vec2, destination: Vec2, max_speed: f32) -> Vec2 {
    ((destination - from) * 0.1).clamp_length(max_speed)
}

/// Which band a distance falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeBand {
    Normal,
    Enrage,
    Teleport,
}

pub fn classify_distance(distance: f32, ranges: &RangePolicy) -> RangeBand {
    if distance > ranges.teleport_distance {
        RangeBand::Teleport
    } else if distance > ranges.enrage_distance {
        RangeBand::Enrage
    } else {
        RangeBand::Normal
    }
}

/// What the range policy did this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeVerdict {
    pub teleported: bool,
    /// Meter has reached the enrage threshold
    pub enrage: bool,
    /// Back in range with the meter fully drained
    pub recovered: bool,
}

/// Apply the three distance bands for one tick
pub fn enforce_range_policy(
    state: &mut EncounterState,
    body: &mut BossBody,
    target: Vec2,
    config: &EncounterConfig,
    fx: &mut Collaborators<'_>,
) -> RangeVerdict {
    let ranges = &config.ranges;
    let mut verdict = RangeVerdict::default();

    if classify_distance(body.position.distance(target), ranges) == RangeBand::Teleport
        && state.teleport_cooldown == 0
    {
        let departure = body.position;
        let arrival = target + Vec2::UP * ranges.teleport_arrival_offset;
        fx.effect(EffectKind::Departure, departure, config.palette.primary, 2.0, 30);
        body.teleport(arrival);
        fx.effect(EffectKind::Arrival, arrival, config.palette.primary, 2.0, 30);
        fx.cue(CueId::Teleport, arrival);
        state.teleport_cooldown = TELEPORT_COOLDOWN;
        verdict.teleported = true;
        log::debug!(
            "Rescue teleport from ({:.0}, {:.0}) to ({:.0}, {:.0})",
            departure.x, departure.y, arrival.x, arrival.y
        );
    }

    match classify_distance(body.position.distance(target), ranges) {
        RangeBand::Normal => {
            state.enrage_meter = state.enrage_meter.saturating_sub(ranges.enrage_decay);
            verdict.recovered = state.enrage_meter == 0;
        }
        RangeBand::Enrage | RangeBand::Teleport => {
            state.enrage_meter = (state.enrage_meter + ranges.enrage_gain).min(ranges.enrage_threshold);
        }
    }
    verdict.enrage = state.enrage_meter >= ranges.enrage_threshold;

    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::CueRecorder;
    use crate::combat::StatusId;
    use crate::host::{NullSpawner, SilentNarrator};

    struct Dummy {
        position: Vec2,
        active: bool,
    }

    impl Avatar for Dummy {
        fn position(&self) -> Vec2 {
            self.position
        }
        fn velocity(&self) -> Vec2 {
            Vec2::ZERO
        }
        fn is_active(&self) -> bool {
            self.active
        }
        fn apply_impulse(&mut self, _: Vec2) {}
        fn apply_status(&mut self, _: StatusId, _: u32) {}
        fn health(&self) -> u32 {
            100
        }
        fn apply_damage(&mut self, _: u32) -> u32 {
            0
        }
    }

    fn dummy(x: f32, active: bool) -> Dummy {
        Dummy { position: Vec2::new(x, 0.0), active }
    }

    #[test]
    fn test_select_nearest_active() {
        let targets = [dummy(100.0, true), dummy(10.0, false), dummy(50.0, true)];
        assert_eq!(select_target(Vec2::ZERO, &targets), Some(2));
    }

    #[test]
    fn test_tie_goes_to_first_found() {
        let targets = [dummy(-50.0, true), dummy(50.0, true)];
        assert_eq!(select_target(Vec2::ZERO, &targets), Some(0));
    }

    #[test]
    fn test_no_active_target() {
        let targets = [dummy(1.0, false)];
        assert_eq!(select_target(Vec2::ZERO, &targets), None);
        assert_eq!(select_target::<Dummy>(Vec2::ZERO, &[]), None);
    }

    #[test]
    fn test_hover_sways_above_target() {
        let params = HoverParams::default();
        let a = compute_hover_position(Vec2::ZERO, 0, &params);
        let b = compute_hover_position(Vec2::ZERO, 40, &params);
        assert!(a.y < 0.0 && b.y < 0.0);
        assert_ne!(a, b);
        assert!(a.x.abs() <= params.sway_x && b.x.abs() <= params.sway_x);
    }

    #[test]
    fn test_enrage_meter_asymmetric() {
        let config = EncounterConfig::default();
        let mut state = EncounterState::new();
        let mut body = BossBody::new(Vec2::ZERO, 100);
        let (mut spawner, mut audio, mut narrator) =
            (NullSpawner::default(), CueRecorder::default(), SilentNarrator);
        let mut fx = Collaborators::new(&mut spawner, &mut audio, &mut narrator);
        let far = Vec2::new(config.ranges.enrage_distance + 10.0, 0.0);

        for _ in 0..40 {
            enforce_range_policy(&mut state, &mut body, far, &config, &mut fx);
        }
        assert_eq!(state.enrage_meter, 40);

        for _ in 0..10 {
            enforce_range_policy(&mut state, &mut body, Vec2::new(10.0, 0.0), &config, &mut fx);
        }
        assert_eq!(state.enrage_meter, 0);
    }

    #[test]
    fn test_teleport_band_relocates() {
        let config = EncounterConfig::default();
        let mut state = EncounterState::new();
        let mut body = BossBody::new(Vec2::ZERO, 100);
        body.velocity = Vec2::new(3.0, 3.0);
        let (mut spawner, mut audio, mut narrator) =
            (NullSpawner::default(), CueRecorder::default(), SilentNarrator);
        let mut fx = Collaborators::new(&mut spawner, &mut audio, &mut narrator);
        let target = Vec2::new(config.ranges.teleport_distance + 100.0, 0.0);

        let verdict = enforce_range_policy(&mut state, &mut body, target, &config, &mut fx);
        assert!(verdict.teleported);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert!(body.position.distance(target) <= config.ranges.teleport_arrival_offset + 1e-3);
        assert_eq!(spawner.effects, 2);
        assert_eq!(audio.count(CueId::Teleport), 1);
    }
}
