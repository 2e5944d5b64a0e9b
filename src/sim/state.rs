//! Session state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::difficulty::{Difficulty, DifficultyProfile};
use super::modes::GameMode;
use crate::consts::*;

/// Current phase of a training session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Pre-session 3-2-1 countdown
    Countdown,
    /// Active gameplay
    Playing,
    /// Session is paused
    Paused,
    /// Session ended (timer expired or aborted)
    GameOver,
}

/// A spawned target
#[derive(Debug, Clone)]
pub struct Target {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Hitting a decoy penalizes instead of scoring (spike mode only)
    pub is_decoy: bool,
    /// Simulation tick this target appeared on
    pub spawn_tick: u64,
    pub lifetime_ticks: u32,
    /// Ticks the cursor has spent on this target (tracking mode)
    pub tracked_ticks: u32,
}

impl Target {
    /// Ticks this target has been alive
    pub fn age(&self, now: u64) -> u64 {
        now.saturating_sub(self.spawn_tick)
    }

    pub fn expired(&self, now: u64) -> bool {
        self.age(now) >= self.lifetime_ticks as u64
    }

    /// Circle point test with an extra forgiveness radius
    pub fn contains(&self, point: Vec2, forgiveness: f32) -> bool {
        point.distance(self.pos) <= self.radius + forgiveness
    }
}

/// Magazine and reload state
#[derive(Debug, Clone)]
pub struct Gun {
    pub ammo: u32,
    reload_ticks_left: u32,
}

impl Default for Gun {
    fn default() -> Self {
        Self {
            ammo: MAG_SIZE,
            reload_ticks_left: 0,
        }
    }
}

impl Gun {
    pub fn reloading(&self) -> bool {
        self.reload_ticks_left > 0
    }

    /// Reload progress in [0, 1], or None when not reloading
    pub fn reload_progress(&self) -> Option<f32> {
        if self.reloading() {
            Some(1.0 - self.reload_ticks_left as f32 / RELOAD_TICKS as f32)
        } else {
            None
        }
    }

    pub fn can_fire(&self) -> bool {
        !self.reloading() && self.ammo > 0
    }

    pub fn start_reload(&mut self) {
        if !self.reloading() && self.ammo < MAG_SIZE {
            self.reload_ticks_left = RELOAD_TICKS;
        }
    }

    /// Advance the reload timer by one tick
    pub fn step(&mut self) {
        if self.reload_ticks_left > 0 {
            self.reload_ticks_left -= 1;
            if self.reload_ticks_left == 0 {
                self.ammo = MAG_SIZE;
            }
        }
    }
}

/// Running totals for one session
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    pub hits: u32,
    pub misses: u32,
    pub headshots: u32,
    pub shots_fired: u32,
    pub score: i64,
    /// Spawn-to-hit delay of every successful hit
    pub reaction_ticks: Vec<u32>,
    /// Tracking mode: ticks the cursor spent on a target
    pub on_target_ticks: u64,
    /// Tracking mode: ticks during which at least one target was alive
    pub target_alive_ticks: u64,
}

impl SessionStats {
    /// `hits / (hits + misses)`; None until the first attempt resolves
    pub fn accuracy(&self) -> Option<f32> {
        let attempts = self.hits + self.misses;
        if attempts == 0 {
            None
        } else {
            Some(self.hits as f32 / attempts as f32)
        }
    }

    /// Mean spawn-to-hit delay in milliseconds
    pub fn avg_reaction_ms(&self) -> Option<f32> {
        if self.reaction_ticks.is_empty() {
            return None;
        }
        let sum: u64 = self.reaction_ticks.iter().map(|&t| t as u64).sum();
        Some(sum as f32 / self.reaction_ticks.len() as f32 * 1000.0 / TICK_RATE as f32)
    }

    /// Tracking mode: fraction of target-alive time spent on target
    pub fn tracking_ratio(&self) -> Option<f32> {
        if self.target_alive_ticks == 0 {
            None
        } else {
            Some(self.on_target_ticks as f32 / self.target_alive_ticks as f32)
        }
    }
}

/// A spark particle (render-only, never affects scoring)
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: [f32; 4],
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// An expanding ring marking a resolved click
#[derive(Debug, Clone)]
pub struct Pulse {
    pub pos: Vec2,
    pub max_radius: f32,
    pub color: [f32; 4],
    pub age_ticks: u32,
}

impl Pulse {
    pub const LIFETIME_TICKS: u32 = 36; // 0.3 s

    /// Current radius of the expanding ring
    pub fn radius(&self) -> f32 {
        self.max_radius * (self.age_ticks as f32 / Self::LIFETIME_TICKS as f32)
    }

    pub fn done(&self) -> bool {
        self.age_ticks >= Self::LIFETIME_TICKS
    }
}

/// Maximum particles kept alive at once
pub const MAX_PARTICLES: usize = 256;

/// Immutable per-session configuration, constructed once at session start
#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    /// RNG seed for target spawning
    pub seed: u64,
    /// Extra forgiveness radius applied to hit tests (from user settings)
    pub click_forgiveness: f32,
}

/// Complete session state, advanced only by `tick`
#[derive(Debug, Clone)]
pub struct GameState {
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub profile: DifficultyProfile,
    pub seed: u64,
    pub click_forgiveness: f32,
    pub phase: GamePhase,
    /// Simulation tick counter (runs during countdown too)
    pub time_ticks: u64,
    pub countdown_ticks: u32,
    pub session_ticks_left: u32,
    /// Active targets, in spawn order
    pub targets: Vec<Target>,
    pub stats: SessionStats,
    pub gun: Gun,
    pub particles: Vec<Particle>,
    pub pulses: Vec<Pulse>,
    pub last_spawn_tick: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            mode: config.mode,
            difficulty: config.difficulty,
            profile: config.difficulty.profile(),
            seed: config.seed,
            click_forgiveness: config.click_forgiveness,
            phase: GamePhase::Countdown,
            time_ticks: 0,
            countdown_ticks: COUNTDOWN_TICKS,
            session_ticks_left: SESSION_TICKS,
            targets: Vec::new(),
            stats: SessionStats::default(),
            gun: Gun::default(),
            particles: Vec::new(),
            pulses: Vec::new(),
            last_spawn_tick: 0,
            rng: Pcg32::seed_from_u64(config.seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Countdown value to display (3, 2, 1, 0 = GO)
    pub fn countdown_display(&self) -> u32 {
        self.countdown_ticks.div_ceil(TICK_RATE)
    }

    /// Whole seconds left on the session clock
    pub fn seconds_left(&self) -> u32 {
        self.session_ticks_left.div_ceil(TICK_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_undefined_without_attempts() {
        let stats = SessionStats::default();
        assert_eq!(stats.accuracy(), None);
    }

    #[test]
    fn test_accuracy_in_unit_range() {
        let mut stats = SessionStats::default();
        stats.hits = 3;
        stats.misses = 1;
        let acc = stats.accuracy().unwrap();
        assert!((0.0..=1.0).contains(&acc));
        assert!((acc - 0.75).abs() < 1e-6);

        stats.hits = 0;
        stats.misses = 10;
        assert_eq!(stats.accuracy(), Some(0.0));
    }

    #[test]
    fn test_gun_reload_cycle() {
        let mut gun = Gun::default();
        gun.ammo = 5;
        gun.start_reload();
        assert!(gun.reloading());
        assert!(!gun.can_fire());
        for _ in 0..RELOAD_TICKS {
            gun.step();
        }
        assert!(!gun.reloading());
        assert_eq!(gun.ammo, MAG_SIZE);
    }

    #[test]
    fn test_target_expiry_boundary() {
        let target = Target {
            id: 1,
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::ZERO,
            radius: 20.0,
            is_decoy: false,
            spawn_tick: 10,
            lifetime_ticks: 100,
            tracked_ticks: 0,
        };
        assert!(!target.expired(109));
        assert!(target.expired(110));
    }
}
