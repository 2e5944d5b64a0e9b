//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod difficulty;
pub mod hit;
pub mod modes;
pub mod state;
pub mod tick;

pub use difficulty::{Difficulty, DifficultyProfile};
pub use hit::{is_headshot, pick_target};
pub use modes::GameMode;
pub use state::{
    GamePhase, GameState, Gun, MAX_PARTICLES, Particle, Pulse, SessionConfig, SessionStats, Target,
};
pub use tick::{TickInput, tick};
