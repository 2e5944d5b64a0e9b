//! Drill modes and their per-mode policies
//!
//! Each mode owns its spawn placement, target count cap and scoring quirks.
//! The variant is picked once per session; everything else dispatches on it.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use crate::consts::{PLAY_HEIGHT, PLAY_WIDTH};

/// Drill mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Stationary targets at random positions; pure reaction + precision
    #[default]
    Flick,
    /// Moving targets scored by cumulative time-on-target
    Tracking,
    /// Several drifting targets up at once; rapid re-aiming
    Switch,
    /// Central cores surrounded by decoys that penalize when hit
    Spike,
}

impl GameMode {
    /// All modes, in menu order
    pub const ALL: [GameMode; 4] = [
        GameMode::Flick,
        GameMode::Tracking,
        GameMode::Switch,
        GameMode::Spike,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Flick => "flick",
            GameMode::Tracking => "tracking",
            GameMode::Switch => "switch",
            GameMode::Spike => "spike",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "flick" => Some(GameMode::Flick),
            "tracking" => Some(GameMode::Tracking),
            "switch" => Some(GameMode::Switch),
            "spike" => Some(GameMode::Spike),
            _ => None,
        }
    }

    /// The next mode in cycling order (wraps around)
    pub fn next(&self) -> Self {
        match self {
            GameMode::Flick => GameMode::Tracking,
            GameMode::Tracking => GameMode::Switch,
            GameMode::Switch => GameMode::Spike,
            GameMode::Spike => GameMode::Flick,
        }
    }

    /// Maximum concurrent targets
    pub fn max_targets(&self) -> usize {
        match self {
            // Tracking targets live long; a smaller set keeps them followable
            GameMode::Tracking => 4,
            _ => 8,
        }
    }

    /// Probability that a spawn is a decoy
    pub fn decoy_chance(&self) -> f64 {
        match self {
            GameMode::Spike => 0.7,
            _ => 0.0,
        }
    }

    /// Whether targets drift across the play area
    pub fn moving_targets(&self) -> bool {
        matches!(self, GameMode::Tracking | GameMode::Switch)
    }

    /// Whether an unhit target timing out counts as a miss.
    ///
    /// Tracking scores by time-on-target; letting a target live out its
    /// lifetime there is success, not failure.
    pub fn expiry_is_miss(&self) -> bool {
        !matches!(self, GameMode::Tracking)
    }

    /// Spawn position for a new target of the given radius.
    ///
    /// Flick/tracking/switch place uniformly inside the play area with a
    /// radius-sized margin. Spike places cores in the central zone and decoys
    /// on a ring around it.
    pub fn spawn_pos(&self, rng: &mut Pcg32, radius: f32, is_decoy: bool) -> Vec2 {
        let center = Vec2::new(PLAY_WIDTH / 2.0, PLAY_HEIGHT / 2.0);
        match self {
            GameMode::Spike if is_decoy => {
                // Annulus around the core zone
                let dist = rng.random_range(160.0..320.0_f32);
                let angle = rng.random_range(0.0..TAU);
                clamp_to_area(center + Vec2::from_angle(angle) * dist, radius)
            }
            GameMode::Spike => {
                // Core zone: within 120 px of center
                let dist = rng.random_range(0.0..120.0_f32);
                let angle = rng.random_range(0.0..TAU);
                clamp_to_area(center + Vec2::from_angle(angle) * dist, radius)
            }
            _ => Vec2::new(
                rng.random_range(radius..PLAY_WIDTH - radius),
                rng.random_range(radius..PLAY_HEIGHT - radius),
            ),
        }
    }
}

/// Keep a spawn point fully inside the play area
fn clamp_to_area(pos: Vec2, radius: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(radius, PLAY_WIDTH - radius),
        pos.y.clamp(radius, PLAY_HEIGHT - radius),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_spawn_positions_inside_play_area() {
        let mut rng = Pcg32::seed_from_u64(7);
        for mode in GameMode::ALL {
            for i in 0..200 {
                let decoy = i % 3 == 0;
                let pos = mode.spawn_pos(&mut rng, 25.0, decoy);
                assert!(pos.x >= 25.0 && pos.x <= PLAY_WIDTH - 25.0, "{:?}", mode);
                assert!(pos.y >= 25.0 && pos.y <= PLAY_HEIGHT - 25.0, "{:?}", mode);
            }
        }
    }

    #[test]
    fn test_spike_cores_cluster_centrally() {
        let mut rng = Pcg32::seed_from_u64(7);
        let center = Vec2::new(PLAY_WIDTH / 2.0, PLAY_HEIGHT / 2.0);
        for _ in 0..100 {
            let pos = GameMode::Spike.spawn_pos(&mut rng, 16.0, false);
            assert!(pos.distance(center) <= 120.0);
        }
    }

    #[test]
    fn test_only_spike_spawns_decoys() {
        for mode in GameMode::ALL {
            if mode == GameMode::Spike {
                assert!(mode.decoy_chance() > 0.0);
            } else {
                assert_eq!(mode.decoy_chance(), 0.0);
            }
        }
    }
}
