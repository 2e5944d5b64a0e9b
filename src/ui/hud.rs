//! In-session presentation: targets, effects, crosshair, HUD and overlays
//!
//! Everything here reads simulation state and appends quads; nothing mutates
//! the game.

use glam::Vec2;

use super::glyphs;
use crate::consts::*;
use crate::renderer::shapes;
use crate::renderer::vertex::{Vertex, colors};
use crate::settings::{CrosshairStyle, Settings};
use crate::sim::{GameState, Target};

/// Segment count for target circles
const TARGET_SEGMENTS: u32 = 40;

/// Backdrop: play-area panel plus a grid for depth
pub fn draw_backdrop(out: &mut Vec<Vertex>) {
    shapes::rect(
        out,
        Vec2::ZERO,
        Vec2::new(PLAY_WIDTH, PLAY_HEIGHT),
        colors::PLAY_AREA,
    );
    let spacing = 64.0;
    let mut x = spacing;
    while x < PLAY_WIDTH {
        shapes::rect(out, Vec2::new(x, 0.0), Vec2::new(1.0, PLAY_HEIGHT), colors::GRID);
        x += spacing;
    }
    let mut y = spacing;
    while y < PLAY_HEIGHT {
        shapes::rect(out, Vec2::new(0.0, y), Vec2::new(PLAY_WIDTH, 1.0), colors::GRID);
        y += spacing;
    }
}

/// One target: body, mid ring, bullseye marking the headshot zone
pub fn draw_target(out: &mut Vec<Vertex>, target: &Target) {
    let (body, ring) = if target.is_decoy {
        (colors::DECOY, colors::DECOY_RING)
    } else {
        (colors::TARGET, colors::TARGET_RING)
    };

    shapes::circle(out, target.pos, target.radius, body, TARGET_SEGMENTS);
    shapes::ring(
        out,
        target.pos,
        target.radius * 0.55,
        target.radius * 0.66,
        ring,
        TARGET_SEGMENTS,
    );
    if !target.is_decoy {
        shapes::circle(
            out,
            target.pos,
            target.radius * HEADSHOT_FRACTION,
            ring,
            TARGET_SEGMENTS / 2,
        );
    }
}

/// Spark particles and click pulses
pub fn draw_effects(out: &mut Vec<Vertex>, state: &GameState) {
    for p in &state.particles {
        let mut color = p.color;
        color[3] = p.life.clamp(0.0, 1.0);
        shapes::circle(out, p.pos, p.size, color, 8);
    }
    for pulse in &state.pulses {
        let r = pulse.radius().max(1.0);
        let mut color = pulse.color;
        color[3] = 1.0 - pulse.age_ticks as f32 / crate::sim::Pulse::LIFETIME_TICKS as f32;
        shapes::ring(out, pulse.pos, r, r + 2.0, color, 24);
    }
}

/// Crosshair at the cursor, styled per settings
pub fn draw_crosshair(out: &mut Vec<Vertex>, cursor: Vec2, settings: &Settings) {
    let color = settings.crosshair_rgba();
    let size = settings.crosshair_size;
    let thickness = (size / 8.0).max(1.0);

    match settings.crosshair_style {
        CrosshairStyle::Cross => {
            let gap = size / 4.0;
            let half = size / 2.0;
            shapes::line(
                out,
                cursor - Vec2::new(half, 0.0),
                cursor - Vec2::new(gap, 0.0),
                thickness,
                color,
            );
            shapes::line(
                out,
                cursor + Vec2::new(gap, 0.0),
                cursor + Vec2::new(half, 0.0),
                thickness,
                color,
            );
            shapes::line(
                out,
                cursor - Vec2::new(0.0, half),
                cursor - Vec2::new(0.0, gap),
                thickness,
                color,
            );
            shapes::line(
                out,
                cursor + Vec2::new(0.0, gap),
                cursor + Vec2::new(0.0, half),
                thickness,
                color,
            );
            shapes::circle(out, cursor, thickness, color, 8);
        }
        CrosshairStyle::Dot => {
            shapes::circle(out, cursor, size / 6.0, color, 12);
        }
        CrosshairStyle::Circle => {
            shapes::ring(out, cursor, size / 3.0 - thickness, size / 3.0, color, 24);
            shapes::circle(out, cursor, size / 10.0, color, 8);
        }
    }
}

/// Stats block, session clock, mode banner and ammo row
pub fn draw_hud(out: &mut Vec<Vertex>, state: &GameState, settings: &Settings, fps: u32) {
    let cell = 2.0;
    let line = glyphs::text_height(cell) + 8.0;

    if settings.show_stats {
        let mut y = 20.0;
        glyphs::text(
            out,
            &format!("SCORE {}", state.stats.score),
            Vec2::new(20.0, y),
            cell,
            colors::TEXT,
        );
        y += line;
        let acc = match state.stats.accuracy() {
            Some(a) => format!("ACC {:.0}%", a * 100.0),
            None => "ACC --".to_string(),
        };
        glyphs::text(out, &acc, Vec2::new(20.0, y), cell, colors::TEXT);
        y += line;
        glyphs::text(
            out,
            &format!("HITS {} MISS {}", state.stats.hits, state.stats.misses),
            Vec2::new(20.0, y),
            cell,
            colors::TEXT,
        );
        y += line;
        glyphs::text(
            out,
            &format!("HS {}", state.stats.headshots),
            Vec2::new(20.0, y),
            cell,
            colors::TEXT,
        );
        y += line;
        let rt = match state.stats.avg_reaction_ms() {
            Some(ms) => format!("RT {:.0}MS", ms),
            None => "RT --".to_string(),
        };
        glyphs::text(out, &rt, Vec2::new(20.0, y), cell, colors::TEXT);
    }

    // Mode and difficulty, top center
    glyphs::text_centered(
        out,
        &format!(
            "{} / {}",
            state.mode.as_str().to_uppercase(),
            state.difficulty.as_str().to_uppercase()
        ),
        PLAY_WIDTH / 2.0,
        20.0,
        cell,
        colors::TEXT_DIM,
    );

    // Session clock with a drain bar, top right
    let secs = state.seconds_left();
    glyphs::text_right(
        out,
        &format!("TIME {:02}:{:02}", secs / 60, secs % 60),
        PLAY_WIDTH - 20.0,
        20.0,
        cell,
        colors::TEXT,
    );
    let frac = state.session_ticks_left as f32 / SESSION_TICKS as f32;
    shapes::rect(
        out,
        Vec2::new(PLAY_WIDTH - 180.0, 44.0),
        Vec2::new(160.0 * frac, 4.0),
        colors::TIMER_BAR,
    );

    if settings.show_fps {
        glyphs::text_right(
            out,
            &format!("FPS {}", fps),
            PLAY_WIDTH - 20.0,
            58.0,
            cell,
            colors::TEXT_DIM,
        );
    }

    draw_ammo(out, state);
}

/// Ammo pips along the bottom edge, reload bar while reloading
fn draw_ammo(out: &mut Vec<Vertex>, state: &GameState) {
    let pip = Vec2::new(6.0, 16.0);
    let origin = Vec2::new(20.0, PLAY_HEIGHT - 36.0);
    for i in 0..MAG_SIZE {
        let color = if i < state.gun.ammo {
            colors::AMMO
        } else {
            colors::AMMO_EMPTY
        };
        shapes::rect(out, origin + Vec2::new(i as f32 * 9.0, 0.0), pip, color);
    }
    if let Some(progress) = state.gun.reload_progress() {
        let width = MAG_SIZE as f32 * 9.0 - 3.0;
        glyphs::text(
            out,
            "RELOADING",
            Vec2::new(20.0, PLAY_HEIGHT - 60.0),
            2.0,
            colors::WARNING,
        );
        shapes::rect(
            out,
            origin + Vec2::new(0.0, 20.0),
            Vec2::new(width * progress, 3.0),
            colors::WARNING,
        );
    }
}

/// Full-screen translucent quad behind overlays
fn overlay(out: &mut Vec<Vertex>) {
    shapes::rect(
        out,
        Vec2::ZERO,
        Vec2::new(PLAY_WIDTH, PLAY_HEIGHT),
        colors::OVERLAY,
    );
}

/// 3-2-1-GO countdown
pub fn draw_countdown(out: &mut Vec<Vertex>, state: &GameState) {
    overlay(out);
    let n = state.countdown_display();
    let (label, color) = if n > 0 {
        (n.to_string(), colors::TEXT)
    } else {
        ("GO".to_string(), colors::WARNING)
    };
    let cell = 14.0;
    glyphs::text_centered(
        out,
        &label,
        PLAY_WIDTH / 2.0,
        PLAY_HEIGHT / 2.0 - glyphs::text_height(cell) / 2.0,
        cell,
        color,
    );
}

/// Pause overlay with the key hints
pub fn draw_pause(out: &mut Vec<Vertex>) {
    overlay(out);
    glyphs::text_centered(out, "PAUSED", PLAY_WIDTH / 2.0, PLAY_HEIGHT / 3.0, 6.0, colors::TEXT);

    let cell = 2.0;
    let mut y = PLAY_HEIGHT / 2.0;
    for hint in [
        "ESC  RESUME",
        "R    RESTART",
        "M    MENU",
        "Q    QUIT",
    ] {
        glyphs::text_centered(out, hint, PLAY_WIDTH / 2.0, y, cell, colors::TEXT_DIM);
        y += glyphs::text_height(cell) + 12.0;
    }
}

/// End-of-session results overlay
pub fn draw_game_over(out: &mut Vec<Vertex>, state: &GameState, high_score: Option<i64>) {
    overlay(out);
    glyphs::text_centered(
        out,
        "TRAINING COMPLETE",
        PLAY_WIDTH / 2.0,
        PLAY_HEIGHT / 4.0,
        4.0,
        colors::ACCENT,
    );
    glyphs::text_centered(
        out,
        &format!("SCORE {}", state.stats.score),
        PLAY_WIDTH / 2.0,
        PLAY_HEIGHT / 2.0 - 60.0,
        4.0,
        colors::TEXT,
    );

    let beat_it = high_score.is_none_or(|hs| state.stats.score > hs);
    if beat_it {
        glyphs::text_centered(
            out,
            "NEW HIGH SCORE",
            PLAY_WIDTH / 2.0,
            PLAY_HEIGHT / 2.0 - 10.0,
            3.0,
            colors::GOLD,
        );
    } else if let Some(hs) = high_score {
        glyphs::text_centered(
            out,
            &format!("HIGH SCORE {}", hs),
            PLAY_WIDTH / 2.0,
            PLAY_HEIGHT / 2.0 - 10.0,
            3.0,
            colors::TEXT_DIM,
        );
    }

    let cell = 2.0;
    let acc = match state.stats.accuracy() {
        Some(a) => format!("{:.0}%", a * 100.0),
        None => "--".to_string(),
    };
    let rt = match state.stats.avg_reaction_ms() {
        Some(ms) => format!("{:.0}MS", ms),
        None => "--".to_string(),
    };
    glyphs::text_centered(
        out,
        &format!(
            "ACC {}  HITS {}  HS {}  RT {}",
            acc, state.stats.hits, state.stats.headshots, rt
        ),
        PLAY_WIDTH / 2.0,
        PLAY_HEIGHT / 2.0 + 40.0,
        cell,
        colors::TEXT,
    );

    glyphs::text_centered(
        out,
        "SPACE  MENU    L  LEADERBOARD",
        PLAY_WIDTH / 2.0,
        PLAY_HEIGHT * 3.0 / 4.0,
        cell,
        colors::TEXT_DIM,
    );
}
