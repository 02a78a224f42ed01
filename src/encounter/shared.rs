//! Thread-shared encounter
//!
//! For hosts whose damage systems run on other threads: the controller and
//! body sit behind one lock, and damage is posted to an inbox that the tick
//! drains before anything else runs.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::host::{Avatar, Collaborators};

use super::body::BossBody;
use super::controller::{EncounterController, TickOutcome};
use super::state::Phase;

#[derive(Debug)]
struct Inner {
    controller: EncounterController,
    body: BossBody,
}

/// Cloneable handle to one encounter
#[derive(Debug, Clone)]
pub struct SharedEncounter {
    inner: Arc<Mutex<Inner>>,
    inbox: Arc<Mutex<Vec<u64>>>,
}

/// Posts damage to a shared encounter without taking the encounter lock
#[derive(Debug, Clone)]
pub struct DamageSender {
    inbox: Arc<Mutex<Vec<u64>>>,
}

impl DamageSender {
    pub fn send(&self, amount: u64) {
        if amount > 0 {
            self.inbox.lock().push(amount);
        }
    }
}

impl SharedEncounter {
    pub fn new(controller: EncounterController, body: BossBody) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner { controller, body })),
            inbox: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn damage_sender(&self) -> DamageSender {
        DamageSender {
            inbox: Arc::clone(&self.inbox),
        }
    }

    /// Damage waiting for the next tick
    pub fn pending_damage(&self) -> u64 {
        self.inbox.lock().iter().sum()
    }

    /// Apply queued damage, then run one tick
    pub fn tick<A: Avatar>(&self, targets: &mut [A], fx: &mut Collaborators<'_>) -> TickOutcome {
        let pending: Vec<u64> = std::mem::take(&mut *self.inbox.lock());
        let mut inner = self.inner.lock();
        let Inner { controller, body } = &mut *inner;

        let dealt: u64 = pending.iter().map(|&amount| body.take_damage(amount)).sum();
        if dealt > 0 {
            log::debug!("Applied {} queued damage ({} hits)", dealt, pending.len());
        }
        controller.tick(body, targets, fx)
    }

    pub fn phase(&self) -> Phase {
        self.inner.lock().controller.phase()
    }

    pub fn health(&self) -> (u64, u64) {
        let inner = self.inner.lock();
        (inner.body.health_current, inner.body.health_max)
    }

    /// Run `f` with the controller and body locked
    pub fn with<R>(&self, f: impl FnOnce(&EncounterController, &BossBody) -> R) -> R {
        let inner = self.inner.lock();
        f(&inner.controller, &inner.body)
    }
}
