//! Fixed timestep session tick
//!
//! Advances one session deterministically: firing, target drift, tracking
//! accrual, the expiry sweep and the spawner all happen here and nowhere
//! else. Rendering reads the state; it never mutates it.

use glam::Vec2;
use rand::Rng;

use super::hit;
use super::modes::GameMode;
use super::state::{GamePhase, GameState, MAX_PARTICLES, Particle, Pulse, Target};
use crate::consts::*;

/// Colors handed to spawned feedback effects
const FX_HIT: [f32; 4] = [1.0, 0.27, 0.33, 1.0];
const FX_HEADSHOT: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
const FX_DECOY: [f32; 4] = [0.55, 0.55, 0.55, 1.0];
const FX_MISS: [f32; 4] = [0.4, 0.4, 0.4, 1.0];

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Cursor position in play-area coordinates
    pub cursor: Vec2,
    /// Fire (left click)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a manual reload
    pub reload: bool,
}

/// Advance the session by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    // Pause toggle; not available during countdown or after game over
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Playing,
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        _ => {}
    }

    state.time_ticks += 1;

    if state.phase == GamePhase::Countdown {
        state.countdown_ticks = state.countdown_ticks.saturating_sub(1);
        if state.countdown_ticks == 0 {
            state.phase = GamePhase::Playing;
            // First target goes up the moment play starts
            spawn_target(state);
            state.last_spawn_tick = state.time_ticks;
        }
        return;
    }

    // Session clock
    state.session_ticks_left = state.session_ticks_left.saturating_sub(1);
    if state.session_ticks_left == 0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "session over: score {} accuracy {:?}",
            state.stats.score,
            state.stats.accuracy()
        );
        return;
    }

    state.gun.step();
    if input.reload {
        state.gun.start_reload();
    }

    if input.fire {
        resolve_click(state, input.cursor);
    }

    move_targets(state, dt);

    if state.mode == GameMode::Tracking {
        accrue_tracking(state, input.cursor);
    }

    expire_targets(state);
    spawn_due_target(state);
    step_effects(state, dt);
}

/// Resolve a click to exactly one of {hit-core, hit-decoy, miss}
fn resolve_click(state: &mut GameState, cursor: Vec2) {
    // Clicks while reloading or dry are swallowed entirely
    if !state.gun.can_fire() {
        return;
    }
    state.gun.ammo -= 1;
    state.stats.shots_fired += 1;

    match hit::pick_target(&state.targets, cursor, state.click_forgiveness) {
        Some(i) if state.targets[i].is_decoy => {
            let target = state.targets.remove(i);
            state.stats.score -= POINTS_DECOY;
            spawn_burst(state, target.pos, FX_DECOY, target.radius);
        }
        Some(i) => {
            let headshot = hit::is_headshot(&state.targets[i], cursor);
            let target = state.targets.remove(i);
            let reaction = target.age(state.time_ticks) as u32;

            let mut points = POINTS_HIT - reaction_penalty(reaction);
            if headshot {
                points += POINTS_HEADSHOT_BONUS;
                state.stats.headshots += 1;
            }
            state.stats.hits += 1;
            state.stats.score += points;
            state.stats.reaction_ticks.push(reaction);

            let color = if headshot { FX_HEADSHOT } else { FX_HIT };
            spawn_burst(state, target.pos, color, target.radius);
        }
        None => {
            state.stats.misses += 1;
            state.stats.score -= POINTS_MISS;
            state.pulses.push(Pulse {
                pos: cursor,
                max_radius: 12.0,
                color: FX_MISS,
                age_ticks: 0,
            });
        }
    }

    if state.gun.ammo == 0 {
        state.gun.start_reload();
    }
}

/// Deduction for a slow hit: 10 points per full 100 ms, capped so a clean
/// hit always nets positive points
fn reaction_penalty(reaction_ticks: u32) -> i64 {
    let ms = reaction_ticks as u64 * 1000 / TICK_RATE as u64;
    ((ms / 100) as i64 * REACTION_PENALTY_PER_100MS).min(REACTION_PENALTY_CAP)
}

/// Drift targets and bounce them off the play-area edges
fn move_targets(state: &mut GameState, dt: f32) {
    if !state.mode.moving_targets() {
        return;
    }
    for target in &mut state.targets {
        target.pos += target.vel * dt;

        if target.pos.x - target.radius < 0.0 || target.pos.x + target.radius > PLAY_WIDTH {
            target.vel.x = -target.vel.x;
            target.pos.x = target.pos.x.clamp(target.radius, PLAY_WIDTH - target.radius);
        }
        if target.pos.y - target.radius < 0.0 || target.pos.y + target.radius > PLAY_HEIGHT {
            target.vel.y = -target.vel.y;
            target.pos.y = target.pos.y.clamp(target.radius, PLAY_HEIGHT - target.radius);
        }
    }
}

/// Tracking mode: bank time-on-target and drip score for sustained aim
fn accrue_tracking(state: &mut GameState, cursor: Vec2) {
    if !state.targets.is_empty() {
        state.stats.target_alive_ticks += 1;
    }
    if let Some(i) = hit::pick_target(&state.targets, cursor, state.click_forgiveness) {
        let target = &mut state.targets[i];
        target.tracked_ticks += 1;
        state.stats.on_target_ticks += 1;
        if target.tracked_ticks.is_multiple_of(TRACK_WINDOW_TICKS) {
            state.stats.score += TRACK_POINTS;
        }
    }
}

/// Remove every target whose lifetime has elapsed; each one the player was
/// supposed to hit counts as a miss
fn expire_targets(state: &mut GameState) {
    let now = state.time_ticks;
    let expiry_is_miss = state.mode.expiry_is_miss();
    let mut expired_misses = 0u32;

    state.targets.retain(|t| {
        if t.expired(now) {
            // Letting a decoy time out is correct play, never a miss
            if expiry_is_miss && !t.is_decoy {
                expired_misses += 1;
            }
            false
        } else {
            true
        }
    });

    state.stats.misses += expired_misses;
}

/// Spawn one target when below the mode cap and the spawn timer has elapsed
fn spawn_due_target(state: &mut GameState) {
    if state.targets.len() >= state.mode.max_targets() {
        return;
    }
    let interval =
        (SPAWN_INTERVAL_TICKS as f32 / state.profile.spawn_rate_multiplier).round() as u64;
    if state.time_ticks - state.last_spawn_tick < interval.max(1) {
        return;
    }
    spawn_target(state);
    state.last_spawn_tick = state.time_ticks;
}

/// Create one target sized, timed and placed per mode and difficulty
fn spawn_target(state: &mut GameState) {
    let mode = state.mode;
    let profile = state.profile;

    let is_decoy = state.rng.random_bool(mode.decoy_chance());
    let radius = (state.rng.random_range(TARGET_RADIUS_MIN..=TARGET_RADIUS_MAX)
        * profile.size_multiplier)
        .clamp(TARGET_RADIUS_FLOOR, TARGET_RADIUS_CEIL);
    let lifetime_ticks = (state
        .rng
        .random_range(TARGET_LIFETIME_MIN_TICKS..=TARGET_LIFETIME_MAX_TICKS)
        as f32
        * profile.lifetime_multiplier) as u32;
    let pos = mode.spawn_pos(&mut state.rng, radius, is_decoy);

    let vel = if mode.moving_targets() {
        let speed =
            state.rng.random_range(TARGET_SPEED_MIN..=TARGET_SPEED_MAX) * profile.speed_multiplier;
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        Vec2::from_angle(angle) * speed
    } else {
        Vec2::ZERO
    };

    let id = state.next_entity_id();
    state.targets.push(Target {
        id,
        pos,
        vel,
        radius,
        is_decoy,
        spawn_tick: state.time_ticks,
        lifetime_ticks: lifetime_ticks.max(1),
        tracked_ticks: 0,
    });
}

/// Particle burst plus an expanding ring at a resolved hit
fn spawn_burst(state: &mut GameState, pos: Vec2, color: [f32; 4], radius: f32) {
    state.pulses.push(Pulse {
        pos,
        max_radius: radius * 1.4,
        color,
        age_ticks: 0,
    });

    for _ in 0..12 {
        if state.particles.len() >= MAX_PARTICLES {
            break;
        }
        let angle = state.rng.random_range(0.0..std::f32::consts::TAU);
        let speed = state.rng.random_range(60.0..220.0_f32);
        state.particles.push(Particle {
            pos,
            vel: Vec2::from_angle(angle) * speed,
            color,
            life: 1.0,
            size: state.rng.random_range(2.0..4.5_f32),
        });
    }
}

/// Advance feedback effects and cull the dead ones
fn step_effects(state: &mut GameState, dt: f32) {
    for particle in &mut state.particles {
        particle.pos += particle.vel * dt;
        particle.vel *= 0.96;
        particle.life -= dt * 2.5;
        particle.size *= 0.99;
    }
    state.particles.retain(|p| p.life > 0.0);

    for pulse in &mut state.pulses {
        pulse.age_ticks += 1;
    }
    state.pulses.retain(|p| !p.done());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::difficulty::Difficulty;
    use crate::sim::state::SessionConfig;

    fn session(mode: GameMode, difficulty: Difficulty) -> GameState {
        GameState::new(SessionConfig {
            mode,
            difficulty,
            seed: 12345,
            click_forgiveness: 0.0,
        })
    }

    /// Run the countdown out so the session is live
    fn start_playing(state: &mut GameState) {
        let input = TickInput::default();
        while state.phase == GamePhase::Countdown {
            tick(state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
    }

    fn place_target(state: &mut GameState, x: f32, y: f32, radius: f32, is_decoy: bool) {
        let id = state.next_entity_id();
        let spawn_tick = state.time_ticks;
        state.targets.push(Target {
            id,
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius,
            is_decoy,
            spawn_tick,
            lifetime_ticks: 1200,
            tracked_ticks: 0,
        });
    }

    #[test]
    fn test_countdown_then_playing() {
        let mut state = session(GameMode::Flick, Difficulty::Medium);
        assert_eq!(state.phase, GamePhase::Countdown);

        let input = TickInput::default();
        for _ in 0..COUNTDOWN_TICKS {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::Playing);
        // First target is up at GO
        assert_eq!(state.targets.len(), 1);
    }

    #[test]
    fn test_pause_toggle() {
        let mut state = session(GameMode::Flick, Difficulty::Medium);
        start_playing(&mut state);

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Paused);

        // Time stands still while paused
        let frozen = state.time_ticks;
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.time_ticks, frozen);

        tick(&mut state, &pause, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_session_timer_ends_in_game_over() {
        let mut state = session(GameMode::Flick, Difficulty::Medium);
        start_playing(&mut state);
        state.session_ticks_left = 5;

        let input = TickInput::default();
        for _ in 0..5 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_center_click_is_a_hit_with_reaction_time() {
        let mut state = session(GameMode::Flick, Difficulty::Easy);
        start_playing(&mut state);
        state.targets.clear();
        place_target(&mut state, 100.0, 100.0, 40.0, false);

        // Let 30 ticks pass, then click slightly off-center
        let idle = TickInput::default();
        for _ in 0..30 {
            tick(&mut state, &idle, SIM_DT);
        }
        let fire = TickInput {
            cursor: Vec2::new(110.0, 105.0),
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);

        assert_eq!(state.stats.hits, 1);
        assert_eq!(state.stats.misses, 0);
        // Reaction time = click tick - spawn tick (the 30 idle ticks + this one)
        assert_eq!(state.stats.reaction_ticks, vec![31]);
        assert!(state.stats.score > 0);
    }

    #[test]
    fn test_decoy_click_penalizes_without_counting_a_hit() {
        let mut state = session(GameMode::Spike, Difficulty::Medium);
        start_playing(&mut state);
        state.targets.clear();
        place_target(&mut state, 50.0, 50.0, 20.0, true);
        let before = state.stats.score;

        let fire = TickInput {
            cursor: Vec2::new(50.0, 50.0),
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);

        assert_eq!(state.stats.score, before - POINTS_DECOY);
        assert_eq!(state.stats.hits, 0);
        assert_eq!(state.stats.misses, 0);
        assert!(state.targets.is_empty());
    }

    #[test]
    fn test_empty_click_is_a_miss() {
        let mut state = session(GameMode::Flick, Difficulty::Medium);
        start_playing(&mut state);
        state.targets.clear();
        let before = state.stats.score;

        let fire = TickInput {
            cursor: Vec2::new(900.0, 700.0),
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);

        assert_eq!(state.stats.misses, 1);
        assert_eq!(state.stats.score, before - POINTS_MISS);
    }

    #[test]
    fn test_overlap_click_consumes_topmost_only() {
        let mut state = session(GameMode::Flick, Difficulty::Medium);
        start_playing(&mut state);
        state.targets.clear();
        place_target(&mut state, 200.0, 200.0, 30.0, false);
        tick(&mut state, &TickInput::default(), SIM_DT);
        place_target(&mut state, 210.0, 200.0, 30.0, false);

        let fire = TickInput {
            cursor: Vec2::new(205.0, 200.0),
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);

        assert_eq!(state.stats.hits, 1);
        assert_eq!(state.targets.len(), 1);
        // The earlier spawn survives
        assert_eq!(state.targets[0].pos.x, 200.0);
    }

    #[test]
    fn test_expired_target_swept_and_counted_as_miss() {
        let mut state = session(GameMode::Flick, Difficulty::Medium);
        start_playing(&mut state);
        state.targets.clear();
        place_target(&mut state, 300.0, 300.0, 20.0, false);
        state.targets[0].lifetime_ticks = 3;

        let input = TickInput::default();
        for _ in 0..4 {
            tick(&mut state, &input, SIM_DT);
        }
        let now = state.time_ticks;
        assert!(state.targets.iter().all(|t| !t.expired(now)));
        assert_eq!(state.stats.misses, 1);
    }

    #[test]
    fn test_tracking_expiry_is_not_a_miss() {
        let mut state = session(GameMode::Tracking, Difficulty::Medium);
        start_playing(&mut state);
        state.targets.clear();
        place_target(&mut state, 300.0, 300.0, 20.0, false);
        state.targets[0].lifetime_ticks = 3;

        let input = TickInput::default();
        for _ in 0..4 {
            tick(&mut state, &input, SIM_DT);
        }
        assert_eq!(state.stats.misses, 0);
    }

    #[test]
    fn test_tracking_accrues_score_on_target() {
        let mut state = session(GameMode::Tracking, Difficulty::Medium);
        start_playing(&mut state);
        state.targets.clear();
        place_target(&mut state, 400.0, 400.0, 30.0, false);
        state.targets[0].lifetime_ticks = 10_000;

        // Park the cursor on the target; it drifts, so follow it each tick
        for _ in 0..(TRACK_WINDOW_TICKS * 3) {
            let cursor = state.targets[0].pos;
            let input = TickInput {
                cursor,
                ..Default::default()
            };
            tick(&mut state, &input, SIM_DT);
        }

        assert!(state.stats.on_target_ticks >= (TRACK_WINDOW_TICKS * 3) as u64);
        assert!(state.stats.score >= TRACK_POINTS * 3);
        let ratio = state.stats.tracking_ratio().unwrap();
        assert!((0.0..=1.0).contains(&ratio));
    }

    #[test]
    fn test_spawner_respects_mode_cap() {
        let mut state = session(GameMode::Switch, Difficulty::Extreme);
        start_playing(&mut state);

        let input = TickInput::default();
        for _ in 0..(SESSION_TICKS / 2) {
            tick(&mut state, &input, SIM_DT);
            assert!(state.targets.len() <= state.mode.max_targets());
        }
    }

    #[test]
    fn test_reload_swallows_clicks() {
        let mut state = session(GameMode::Flick, Difficulty::Medium);
        start_playing(&mut state);
        state.targets.clear();
        state.gun.ammo = 0;
        state.gun.start_reload();
        let before = state.stats.clone();

        let fire = TickInput {
            cursor: Vec2::new(500.0, 400.0),
            fire: true,
            ..Default::default()
        };
        tick(&mut state, &fire, SIM_DT);

        assert_eq!(state.stats.misses, before.misses);
        assert_eq!(state.stats.shots_fired, before.shots_fired);
    }

    #[test]
    fn test_determinism() {
        let mut a = session(GameMode::Spike, Difficulty::Hard);
        let mut b = session(GameMode::Spike, Difficulty::Hard);

        let trace = [
            TickInput::default(),
            TickInput {
                cursor: Vec2::new(512.0, 384.0),
                fire: true,
                ..Default::default()
            },
            TickInput {
                cursor: Vec2::new(200.0, 300.0),
                ..Default::default()
            },
            TickInput {
                cursor: Vec2::new(200.0, 300.0),
                fire: true,
                ..Default::default()
            },
        ];

        for _ in 0..500 {
            for input in &trace {
                tick(&mut a, input, SIM_DT);
                tick(&mut b, input, SIM_DT);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.targets.len(), b.targets.len());
        assert_eq!(a.stats.score, b.stats.score);
        assert_eq!(a.stats.hits, b.stats.hits);
        for (ta, tb) in a.targets.iter().zip(&b.targets) {
            assert_eq!(ta.id, tb.id);
            assert!((ta.pos - tb.pos).length() < 1e-6);
        }
    }
}
