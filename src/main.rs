//! Reflex Range entry point
//!
//! Native window and event loop, fixed-timestep simulation driving, screen
//! routing, and session-boundary persistence of settings and scores.

use std::path::Path;
use std::sync::Arc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Fullscreen, Window, WindowId};

use reflex_range::consts::*;
use reflex_range::renderer::{RenderState, Vertex};
use reflex_range::scores::{ScoreBoard, ScoreEntry};
use reflex_range::settings::Settings;
use reflex_range::sim::{self, Difficulty, GameMode, GamePhase, GameState, SessionConfig, TickInput};
use reflex_range::ui::{MenuAction, Menus, Screen, hud};

const SETTINGS_FILE: &str = "data/settings.json";
const SCORES_FILE: &str = "data/scores.json";

fn main() {
    env_logger::init();
    log::info!("Reflex Range starting");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let settings = Settings::load(Path::new(SETTINGS_FILE));
    if !Path::new(SETTINGS_FILE).exists() {
        settings.save(Path::new(SETTINGS_FILE));
    }
    let scores = ScoreBoard::load(Path::new(SCORES_FILE));

    let event_loop =
        EventLoop::new().map_err(|e| format!("event loop create failed: {e}"))?;
    let mut app = App::new(settings, scores);
    event_loop
        .run_app(&mut app)
        .map_err(|e| format!("event loop runtime failed: {e}"))
}

/// Application state: window, renderer, menus and the running session
struct App {
    window: Option<Arc<Window>>,
    render_state: Option<RenderState>,
    settings: Settings,
    scores: ScoreBoard,
    menus: Menus,
    session: Option<GameState>,
    /// High score of the bucket before the last session was recorded
    prev_high: Option<i64>,
    recorded: bool,
    input: TickInput,
    /// Cursor in play-area coordinates
    cursor: Vec2,
    accumulator: f32,
    last_frame: Option<Instant>,
    // FPS tracking over the last 60 frames
    frame_dts: [f32; 60],
    frame_index: usize,
    fps: u32,
}

impl App {
    fn new(settings: Settings, scores: ScoreBoard) -> Self {
        Self {
            window: None,
            render_state: None,
            settings,
            scores,
            menus: Menus::new(),
            session: None,
            prev_high: None,
            recorded: false,
            input: TickInput::default(),
            cursor: Vec2::new(PLAY_WIDTH / 2.0, PLAY_HEIGHT / 2.0),
            accumulator: 0.0,
            last_frame: None,
            frame_dts: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    /// Begin a session for the mode picked on the menu
    fn start_session(&mut self, difficulty: Difficulty) {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let config = SessionConfig {
            mode: self.menus.selected_mode,
            difficulty,
            seed,
            click_forgiveness: self.settings.click_threshold,
        };
        log::info!(
            "starting session: {} / {} (seed {seed})",
            config.mode.as_str(),
            config.difficulty.as_str()
        );

        self.session = Some(GameState::new(config));
        self.recorded = false;
        self.prev_high = None;
        self.accumulator = 0.0;
        self.input = TickInput::default();
        self.menus.goto(Screen::Playing);
        self.set_cursor_hidden(true);
    }

    /// Drop the session and return to a menu screen
    fn end_session(&mut self, to: Screen) {
        self.session = None;
        self.menus.goto(to);
        self.set_cursor_hidden(false);
    }

    fn set_cursor_hidden(&self, hidden: bool) {
        if let Some(window) = &self.window {
            window.set_cursor_visible(!hidden);
        }
    }

    /// Record the finished session into the leaderboard file
    fn record_session(&mut self) {
        let Some(state) = &self.session else {
            return;
        };
        self.prev_high = self.scores.high_score(state.mode, state.difficulty);

        // Tracking sessions report time-on-target as their accuracy figure
        let accuracy = if state.mode == GameMode::Tracking {
            state.stats.tracking_ratio()
        } else {
            state.stats.accuracy()
        };
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);

        let entry = ScoreEntry {
            score: state.stats.score,
            accuracy,
            avg_reaction_ms: state.stats.avg_reaction_ms(),
            hits: state.stats.hits,
            misses: state.stats.misses,
            headshots: state.stats.headshots,
            timestamp,
        };
        match self.scores.record(state.mode, state.difficulty, entry) {
            Some(rank) => log::info!("session recorded at rank {rank}"),
            None => log::info!("session did not make the leaderboard"),
        }
        self.scores.save(Path::new(SCORES_FILE));
        self.recorded = true;
    }

    fn save_settings(&self) {
        self.settings.save(Path::new(SETTINGS_FILE));
    }

    fn apply_fullscreen(&self) {
        if let Some(window) = &self.window {
            let mode = self
                .settings
                .fullscreen
                .then(|| Fullscreen::Borderless(None));
            window.set_fullscreen(mode);
        }
    }

    /// Advance the simulation by however much wall time has passed
    fn update(&mut self) {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map(|t| (now - t).as_secs_f32())
            .unwrap_or(SIM_DT);
        self.last_frame = Some(now);

        // FPS over the last 60 frames
        self.frame_dts[self.frame_index] = dt;
        self.frame_index = (self.frame_index + 1) % self.frame_dts.len();
        let (sum, count) = self
            .frame_dts
            .iter()
            .filter(|&&d| d > 0.0)
            .fold((0.0f32, 0u32), |(s, c), &d| (s + d, c + 1));
        if sum > 0.0 {
            self.fps = (count as f32 / sum).round() as u32;
        }

        let Some(session) = &mut self.session else {
            return;
        };

        self.accumulator += dt.min(0.1);
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.input.cursor = self.cursor;
            let input = self.input.clone();
            sim::tick(session, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input.fire = false;
            self.input.pause = false;
            self.input.reload = false;
        }

        if session.phase == GamePhase::GameOver && !self.recorded {
            self.record_session();
            self.set_cursor_hidden(false);
        }
    }

    /// Assemble the frame's vertex list
    fn build_frame(&self) -> Vec<Vertex> {
        let mut out: Vec<Vertex> = Vec::with_capacity(4096);
        hud::draw_backdrop(&mut out);

        if let Some(state) = &self.session {
            // Spawn order doubles as draw order, so newer targets sit on top
            for target in &state.targets {
                hud::draw_target(&mut out, target);
            }
            hud::draw_effects(&mut out, state);
            hud::draw_hud(&mut out, state, &self.settings, self.fps);

            match state.phase {
                GamePhase::Countdown => {
                    hud::draw_countdown(&mut out, state);
                    hud::draw_crosshair(&mut out, self.cursor, &self.settings);
                }
                GamePhase::Playing => {
                    hud::draw_crosshair(&mut out, self.cursor, &self.settings);
                }
                GamePhase::Paused => hud::draw_pause(&mut out),
                GamePhase::GameOver => hud::draw_game_over(&mut out, state, self.prev_high),
            }
        } else {
            self.menus.draw(&mut out, &self.settings, &self.scores);
        }

        out
    }

    fn render(&mut self) {
        let vertices = self.build_frame();
        if let Some(render_state) = &mut self.render_state {
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => log::error!("Out of memory!"),
                Err(e) => log::warn!("Render error: {e:?}"),
            }
        }
    }

    fn handle_action(&mut self, action: MenuAction, event_loop: &ActiveEventLoop) {
        match action {
            MenuAction::OpenModeSelect => self.menus.goto(Screen::ModeSelect),
            MenuAction::OpenSettings => self.menus.goto(Screen::SettingsView),
            MenuAction::OpenLeaderboard => self.menus.goto(Screen::Leaderboard),
            MenuAction::Quit => event_loop.exit(),
            MenuAction::SelectMode(mode) => {
                self.menus.selected_mode = mode;
                self.menus.goto(Screen::DifficultySelect);
            }
            MenuAction::SelectDifficulty(difficulty) => self.start_session(difficulty),
            MenuAction::Back => self.navigate_back(),

            MenuAction::ToggleSound => {
                self.settings.sound_enabled = !self.settings.sound_enabled;
                self.save_settings();
            }
            MenuAction::CycleMusicVolume => {
                self.settings.music_volume = cycle_volume(self.settings.music_volume);
                self.save_settings();
            }
            MenuAction::CycleSfxVolume => {
                self.settings.sfx_volume = cycle_volume(self.settings.sfx_volume);
                self.save_settings();
            }
            MenuAction::CycleCrosshairStyle => {
                self.settings.crosshair_style = self.settings.crosshair_style.next();
                self.save_settings();
            }
            MenuAction::CycleCrosshairSize => {
                self.settings.crosshair_size = cycle_of(
                    self.settings.crosshair_size,
                    &[12.0, 16.0, 24.0, 32.0],
                );
                self.save_settings();
            }
            MenuAction::CycleCrosshairColor => {
                self.settings.crosshair_color = cycle_color(self.settings.crosshair_color);
                self.save_settings();
            }
            MenuAction::ToggleFps => {
                self.settings.show_fps = !self.settings.show_fps;
                self.save_settings();
            }
            MenuAction::ToggleStats => {
                self.settings.show_stats = !self.settings.show_stats;
                self.save_settings();
            }
            MenuAction::ToggleFullscreen => {
                self.settings.fullscreen = !self.settings.fullscreen;
                self.apply_fullscreen();
                self.save_settings();
            }
            MenuAction::CycleSensitivity => {
                self.settings.mouse_sensitivity =
                    cycle_of(self.settings.mouse_sensitivity, &[0.5, 1.0, 1.5, 2.0]);
                self.save_settings();
            }
            MenuAction::CycleClickThreshold => {
                self.settings.click_threshold =
                    cycle_of(self.settings.click_threshold, &[0.0, 5.0, 10.0]);
                self.save_settings();
            }

            MenuAction::CycleBoardMode => {
                self.menus.board_mode = self.menus.board_mode.next();
            }
            MenuAction::CycleBoardDifficulty => {
                self.menus.board_difficulty = self.menus.board_difficulty.next();
            }
        }
    }

    /// Back out one level from the current screen
    fn navigate_back(&mut self) {
        match self.menus.screen {
            Screen::ModeSelect | Screen::Leaderboard => self.menus.goto(Screen::MainMenu),
            Screen::DifficultySelect => self.menus.goto(Screen::ModeSelect),
            Screen::SettingsView => {
                self.save_settings();
                self.menus.goto(Screen::MainMenu);
            }
            _ => {}
        }
    }

    fn handle_key(&mut self, code: KeyCode, event_loop: &ActiveEventLoop) {
        let Some(session) = &self.session else {
            if code == KeyCode::Escape {
                self.navigate_back();
            }
            return;
        };
        let (phase, mode, difficulty) = (session.phase, session.mode, session.difficulty);

        match code {
            KeyCode::Escape => self.input.pause = true,
            KeyCode::KeyR => match phase {
                // Restart with a fresh seed, same mode and difficulty
                GamePhase::Paused => self.start_session(difficulty),
                GamePhase::Playing => self.input.reload = true,
                _ => {}
            },
            KeyCode::KeyM => {
                if phase == GamePhase::Paused {
                    self.end_session(Screen::MainMenu);
                }
            }
            KeyCode::KeyQ => {
                if phase == GamePhase::Paused {
                    event_loop.exit();
                }
            }
            KeyCode::Space => {
                if phase == GamePhase::GameOver {
                    self.end_session(Screen::MainMenu);
                }
            }
            KeyCode::KeyL => {
                if phase == GamePhase::GameOver {
                    // Jump straight to the bucket this session played in
                    self.menus.board_mode = mode;
                    self.menus.board_difficulty = difficulty;
                    self.end_session(Screen::Leaderboard);
                }
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = Arc::new(
            event_loop
                .create_window(
                    Window::default_attributes()
                        .with_title("Reflex Range")
                        .with_inner_size(LogicalSize::new(PLAY_WIDTH as f64, PLAY_HEIGHT as f64)),
                )
                .expect("window creation failed"),
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("Failed to get adapter");
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let size = window.inner_size();
        let render_state = pollster::block_on(RenderState::new(
            surface,
            &adapter,
            size.width.max(1),
            size.height.max(1),
        ));

        self.window = Some(window.clone());
        self.render_state = Some(render_state);
        self.apply_fullscreen();
        window.request_redraw();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(render_state) = &mut self.render_state {
                    render_state.resize(size.width, size.height);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some(render_state) = &self.render_state {
                    let (x, y) =
                        render_state.window_to_play(position.x as f32, position.y as f32);
                    self.cursor = Vec2::new(x, y);
                }
                if self.session.is_none() {
                    self.menus.hover(self.cursor);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if self.session.is_some() {
                    self.input.fire = true;
                } else if let Some(action) = self.menus.click(self.cursor) {
                    self.handle_action(action, event_loop);
                }
            }
            WindowEvent::Focused(false) => {
                // Auto-pause a live session when the window loses focus
                if let Some(session) = &self.session {
                    if session.phase == GamePhase::Playing {
                        self.input.pause = true;
                    }
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat || event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    self.handle_key(code, event_loop);
                }
            }
            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

/// Step a volume through 0%, 25%, 50%, 75%, 100%
fn cycle_volume(v: f32) -> f32 {
    let step = ((v * 4.0).round() as i32 + 1).rem_euclid(5);
    step as f32 / 4.0
}

/// Step a value to the next entry of `options`, wrapping around
fn cycle_of(current: f32, options: &[f32]) -> f32 {
    let pos = options
        .iter()
        .position(|&o| (o - current).abs() < 1e-3)
        .unwrap_or(options.len() - 1);
    options[(pos + 1) % options.len()]
}

/// Crosshair color presets: red, blue, green, white
fn cycle_color(current: [u8; 3]) -> [u8; 3] {
    const PRESETS: [[u8; 3]; 4] = [
        [255, 70, 85],
        [18, 184, 253],
        [0, 255, 140],
        [255, 255, 255],
    ];
    let pos = PRESETS
        .iter()
        .position(|&c| c == current)
        .unwrap_or(PRESETS.len() - 1);
    PRESETS[(pos + 1) % PRESETS.len()]
}
