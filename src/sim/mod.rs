//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Explicit `GameState`, no globals
//! - Randomness only through `RandomSource`
//! - Each projectile evaluated exactly once per frame

pub mod collision;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use rng::{RandomSource, ScriptedRandom, seeded_rng};
pub use state::{
    Counters, Enemy, GameEvent, GamePhase, GameState, HitOutcome, Player, Projectile,
};
pub use tick::{TickInput, tick};
