//! Reflex Range - a desktop aim-training arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (targets, hit resolution, scoring, session state)
//! - `renderer`: WebGPU rendering pipeline
//! - `ui`: Menus, HUD and quad-built glyphs
//! - `settings`: Persisted user preferences
//! - `scores`: Local leaderboard persistence

pub mod renderer;
pub mod scores;
pub mod settings;
pub mod sim;
pub mod ui;

pub use scores::ScoreBoard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Simulation ticks per second
    pub const TICK_RATE: u32 = 120;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Logical play area (pixels); windows letterbox around it
    pub const PLAY_WIDTH: f32 = 1024.0;
    pub const PLAY_HEIGHT: f32 = 768.0;

    /// Session length
    pub const SESSION_TICKS: u32 = 60 * TICK_RATE;
    /// Pre-session countdown (3-2-1)
    pub const COUNTDOWN_TICKS: u32 = 3 * TICK_RATE;

    /// Base target radius range, before the difficulty size multiplier
    pub const TARGET_RADIUS_MIN: f32 = 12.0;
    pub const TARGET_RADIUS_MAX: f32 = 25.0;
    /// Absolute radius bounds after the multiplier
    pub const TARGET_RADIUS_FLOOR: f32 = 8.0;
    pub const TARGET_RADIUS_CEIL: f32 = 48.0;

    /// Base drift speed range (px/s), before the speed multiplier
    pub const TARGET_SPEED_MIN: f32 = 180.0;
    pub const TARGET_SPEED_MAX: f32 = 480.0;

    /// Base lifetime range, before the lifetime multiplier
    pub const TARGET_LIFETIME_MIN_TICKS: u32 = 180; // 1.5 s
    pub const TARGET_LIFETIME_MAX_TICKS: u32 = 420; // 3.5 s

    /// Base spawn interval; divided by the difficulty spawn-rate multiplier
    pub const SPAWN_INTERVAL_TICKS: u32 = 144; // 1.2 s

    /// Fraction of the radius that upgrades a hit to a headshot
    pub const HEADSHOT_FRACTION: f32 = 1.0 / 3.0;

    /// Scoring weights
    pub const POINTS_HIT: i64 = 100;
    pub const POINTS_HEADSHOT_BONUS: i64 = 100;
    /// Deducted when a click lands on no target
    pub const POINTS_MISS: i64 = 50;
    /// Deducted when a click lands on a decoy
    pub const POINTS_DECOY: i64 = 150;
    /// Deduction per full 100 ms of reaction time, and its cap
    pub const REACTION_PENALTY_PER_100MS: i64 = 10;
    pub const REACTION_PENALTY_CAP: i64 = 50;
    /// Tracking mode: points granted per accrual window spent on target
    pub const TRACK_POINTS: i64 = 5;
    pub const TRACK_WINDOW_TICKS: u32 = 12; // 0.1 s

    /// Magazine size and reload duration
    pub const MAG_SIZE: u32 = 30;
    pub const RELOAD_TICKS: u32 = 180; // 1.5 s
}
