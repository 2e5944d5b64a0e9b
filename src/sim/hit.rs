//! Click resolution against the active target set
//!
//! Plain circle point tests. When several targets overlap under the cursor,
//! the most-recently-spawned one wins (it is drawn on top).

use glam::Vec2;

use super::state::Target;
use crate::consts::HEADSHOT_FRACTION;

/// Find the target a click at `point` lands on, if any.
///
/// `forgiveness` widens every hit circle by a few pixels so near-misses on
/// the rim still register. Ties resolve to the last-spawned target, with the
/// entity id as the final tie-break.
pub fn pick_target(targets: &[Target], point: Vec2, forgiveness: f32) -> Option<usize> {
    targets
        .iter()
        .enumerate()
        .filter(|(_, t)| t.contains(point, forgiveness))
        .max_by_key(|(_, t)| (t.spawn_tick, t.id))
        .map(|(i, _)| i)
}

/// Whether a hit at `point` falls inside the inner sub-radius that upgrades
/// it to a headshot. Decoys have no headshot zone.
pub fn is_headshot(target: &Target, point: Vec2) -> bool {
    !target.is_decoy && point.distance(target.pos) <= target.radius * HEADSHOT_FRACTION
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: u32, x: f32, y: f32, radius: f32, spawn_tick: u64) -> Target {
        Target {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius,
            is_decoy: false,
            spawn_tick,
            lifetime_ticks: 600,
            tracked_ticks: 0,
        }
    }

    #[test]
    fn test_center_click_always_hits() {
        let targets = vec![target(1, 100.0, 100.0, 8.0, 0)];
        assert_eq!(pick_target(&targets, Vec2::new(100.0, 100.0), 0.0), Some(0));
    }

    #[test]
    fn test_example_offset_click_hits() {
        // Target at (100,100) radius 40, click at (110,105): distance ~11.2
        let targets = vec![target(1, 100.0, 100.0, 40.0, 0)];
        assert_eq!(pick_target(&targets, Vec2::new(110.0, 105.0), 0.0), Some(0));
    }

    #[test]
    fn test_forgiveness_extends_rim() {
        let targets = vec![target(1, 100.0, 100.0, 20.0, 0)];
        let just_outside = Vec2::new(125.0, 100.0);
        assert_eq!(pick_target(&targets, just_outside, 0.0), None);
        assert_eq!(pick_target(&targets, just_outside, 8.0), Some(0));
    }

    #[test]
    fn test_overlap_resolves_to_latest_spawn() {
        let targets = vec![
            target(1, 100.0, 100.0, 30.0, 5),
            target(2, 110.0, 100.0, 30.0, 50),
            target(3, 400.0, 400.0, 30.0, 90),
        ];
        // Click inside both overlapping targets; the later spawn wins
        assert_eq!(pick_target(&targets, Vec2::new(105.0, 100.0), 0.0), Some(1));
    }

    #[test]
    fn test_headshot_inner_radius() {
        let t = target(1, 100.0, 100.0, 30.0, 0);
        assert!(is_headshot(&t, Vec2::new(100.0, 100.0)));
        assert!(is_headshot(&t, Vec2::new(109.0, 100.0)));
        assert!(!is_headshot(&t, Vec2::new(115.0, 100.0)));
    }

    #[test]
    fn test_decoy_has_no_headshot_zone() {
        let mut t = target(1, 100.0, 100.0, 30.0, 0);
        t.is_decoy = true;
        assert!(!is_headshot(&t, Vec2::new(100.0, 100.0)));
    }
}
