//! Reference host
//!
//! A headless arena that plays the Warden against a scripted duelist. It
//! implements every collaborator the encounter needs, so whole fights can be
//! simulated, replayed and inspected from the command line.

mod arena;
mod duelist;
mod runner;
mod time;

pub use arena::Arena;
pub use duelist::{Behavior, Duelist, DUELIST_RADIUS};
pub use runner::{
    run_fight, run_to_limit, ArenaNarrator, Fight, FightOutcome, FightReport, FightSettings, PhaseChange,
};
pub use time::{TickClock, TICK_RATE};
