//! Difficulty tiers and their multiplier profiles
//!
//! A tier is selected once per session and never changes mid-session.

use serde::{Deserialize, Serialize};

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    /// All tiers, in menu order
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Extreme => "extreme",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            "extreme" => Some(Difficulty::Extreme),
            _ => None,
        }
    }

    /// The next tier in cycling order (wraps around)
    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Extreme,
            Difficulty::Extreme => Difficulty::Easy,
        }
    }

    /// Multiplier set for this tier
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                size_multiplier: 1.3,
                speed_multiplier: 0.7,
                lifetime_multiplier: 1.5,
                spawn_rate_multiplier: 0.7,
            },
            Difficulty::Medium => DifficultyProfile {
                size_multiplier: 1.0,
                speed_multiplier: 1.0,
                lifetime_multiplier: 1.0,
                spawn_rate_multiplier: 1.0,
            },
            Difficulty::Hard => DifficultyProfile {
                size_multiplier: 0.8,
                speed_multiplier: 1.3,
                lifetime_multiplier: 0.7,
                spawn_rate_multiplier: 1.3,
            },
            Difficulty::Extreme => DifficultyProfile {
                size_multiplier: 0.6,
                speed_multiplier: 1.7,
                lifetime_multiplier: 0.5,
                spawn_rate_multiplier: 1.7,
            },
        }
    }
}

/// Immutable multiplier set scaling target size/speed/lifetime/spawn-rate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    pub size_multiplier: f32,
    pub speed_multiplier: f32,
    pub lifetime_multiplier: f32,
    pub spawn_rate_multiplier: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_multipliers_positive() {
        for tier in Difficulty::ALL {
            let p = tier.profile();
            assert!(p.size_multiplier > 0.0, "{:?} size", tier);
            assert!(p.speed_multiplier > 0.0, "{:?} speed", tier);
            assert!(p.lifetime_multiplier > 0.0, "{:?} lifetime", tier);
            assert!(p.spawn_rate_multiplier > 0.0, "{:?} spawn rate", tier);
        }
    }

    #[test]
    fn test_harder_tiers_shrink_targets() {
        let easy = Difficulty::Easy.profile();
        let extreme = Difficulty::Extreme.profile();
        assert!(easy.size_multiplier > extreme.size_multiplier);
        assert!(easy.lifetime_multiplier > extreme.lifetime_multiplier);
        assert!(easy.speed_multiplier < extreme.speed_multiplier);
    }

    #[test]
    fn test_str_round_trip() {
        for tier in Difficulty::ALL {
            assert_eq!(Difficulty::from_str(tier.as_str()), Some(tier));
        }
        assert_eq!(Difficulty::from_str("nightmare"), None);
    }
}
