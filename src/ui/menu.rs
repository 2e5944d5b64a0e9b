//! Menu screens
//!
//! Quad-built buttons with rect hit-testing. Screens report actions; the
//! app decides what they mean (screen changes, settings writes, quit).

use glam::Vec2;

use super::glyphs;
use crate::consts::{PLAY_HEIGHT, PLAY_WIDTH};
use crate::renderer::shapes;
use crate::renderer::vertex::{Vertex, colors};
use crate::scores::ScoreBoard;
use crate::settings::Settings;
use crate::sim::{Difficulty, GameMode};

const BUTTON_W: f32 = 260.0;
const BUTTON_H: f32 = 48.0;
const BUTTON_SPACING: f32 = 64.0;
const LABEL_CELL: f32 = 2.5;

/// Which screen the app is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MainMenu,
    ModeSelect,
    DifficultySelect,
    SettingsView,
    Leaderboard,
    /// A session is running; menus are inactive
    Playing,
}

/// What a clicked button asks the app to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenModeSelect,
    OpenSettings,
    OpenLeaderboard,
    Quit,
    SelectMode(GameMode),
    SelectDifficulty(Difficulty),
    Back,
    // Settings rows
    ToggleSound,
    CycleMusicVolume,
    CycleSfxVolume,
    CycleCrosshairStyle,
    CycleCrosshairSize,
    CycleCrosshairColor,
    ToggleFps,
    ToggleStats,
    ToggleFullscreen,
    CycleSensitivity,
    CycleClickThreshold,
    // Leaderboard bucket cycling
    CycleBoardMode,
    CycleBoardDifficulty,
}

/// A clickable rectangle with a label
pub struct Button {
    pub min: Vec2,
    pub size: Vec2,
    pub label: &'static str,
    pub action: MenuAction,
    pub hovered: bool,
}

impl Button {
    fn new(min: Vec2, size: Vec2, label: &'static str, action: MenuAction) -> Self {
        Self {
            min,
            size,
            label,
            action,
            hovered: false,
        }
    }

    /// Centered in x at the default width
    fn stacked(y: f32, label: &'static str, action: MenuAction) -> Self {
        Self::new(
            Vec2::new((PLAY_WIDTH - BUTTON_W) / 2.0, y),
            Vec2::new(BUTTON_W, BUTTON_H),
            label,
            action,
        )
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x
            && p.x <= self.min.x + self.size.x
            && p.y >= self.min.y
            && p.y <= self.min.y + self.size.y
    }

    fn draw(&self, out: &mut Vec<Vertex>) {
        let (fill, border) = if self.hovered {
            (colors::BUTTON_HOVER, colors::TEXT)
        } else {
            (colors::BUTTON, colors::BUTTON_BORDER)
        };
        shapes::rect(out, self.min, self.size, fill);
        shapes::rect_outline(out, self.min, self.size, 2.0, border);
        glyphs::text_centered(
            out,
            self.label,
            self.min.x + self.size.x / 2.0,
            self.min.y + (self.size.y - glyphs::text_height(LABEL_CELL)) / 2.0,
            LABEL_CELL,
            colors::TEXT,
        );
    }
}

/// Menu state: the current screen plus its buttons
pub struct Menus {
    pub screen: Screen,
    /// Mode picked on the mode screen, pending a difficulty pick
    pub selected_mode: GameMode,
    /// Leaderboard bucket being browsed
    pub board_mode: GameMode,
    pub board_difficulty: Difficulty,
    buttons: Vec<Button>,
}

impl Default for Menus {
    fn default() -> Self {
        Self::new()
    }
}

impl Menus {
    pub fn new() -> Self {
        let mut menus = Self {
            screen: Screen::MainMenu,
            selected_mode: GameMode::Flick,
            board_mode: GameMode::Flick,
            board_difficulty: Difficulty::Medium,
            buttons: Vec::new(),
        };
        menus.rebuild();
        menus
    }

    pub fn goto(&mut self, screen: Screen) {
        self.screen = screen;
        self.rebuild();
    }

    /// Update hover states from the cursor position
    pub fn hover(&mut self, cursor: Vec2) {
        for button in &mut self.buttons {
            button.hovered = button.contains(cursor);
        }
    }

    /// Resolve a click; returns the action of the button under the cursor
    pub fn click(&self, cursor: Vec2) -> Option<MenuAction> {
        self.buttons
            .iter()
            .find(|b| b.contains(cursor))
            .map(|b| b.action)
    }

    fn rebuild(&mut self) {
        self.buttons.clear();
        match self.screen {
            Screen::MainMenu => {
                let y0 = PLAY_HEIGHT / 2.0 - 20.0;
                for (i, (label, action)) in [
                    ("START TRAINING", MenuAction::OpenModeSelect),
                    ("SETTINGS", MenuAction::OpenSettings),
                    ("LEADERBOARD", MenuAction::OpenLeaderboard),
                    ("QUIT", MenuAction::Quit),
                ]
                .into_iter()
                .enumerate()
                {
                    self.buttons
                        .push(Button::stacked(y0 + i as f32 * BUTTON_SPACING, label, action));
                }
            }
            Screen::ModeSelect => {
                let y0 = PLAY_HEIGHT / 3.0 - 30.0;
                for (i, (label, mode)) in [
                    ("FLICK", GameMode::Flick),
                    ("TRACKING", GameMode::Tracking),
                    ("SWITCH", GameMode::Switch),
                    ("SPIKE", GameMode::Spike),
                ]
                .into_iter()
                .enumerate()
                {
                    self.buttons.push(Button::stacked(
                        y0 + i as f32 * BUTTON_SPACING,
                        label,
                        MenuAction::SelectMode(mode),
                    ));
                }
                self.buttons.push(Button::stacked(
                    y0 + 4.0 * BUTTON_SPACING,
                    "BACK",
                    MenuAction::Back,
                ));
            }
            Screen::DifficultySelect => {
                let y0 = PLAY_HEIGHT / 3.0 - 30.0;
                for (i, (label, tier)) in [
                    ("EASY", Difficulty::Easy),
                    ("MEDIUM", Difficulty::Medium),
                    ("HARD", Difficulty::Hard),
                    ("EXTREME", Difficulty::Extreme),
                ]
                .into_iter()
                .enumerate()
                {
                    self.buttons.push(Button::stacked(
                        y0 + i as f32 * BUTTON_SPACING,
                        label,
                        MenuAction::SelectDifficulty(tier),
                    ));
                }
                self.buttons.push(Button::stacked(
                    y0 + 4.0 * BUTTON_SPACING,
                    "BACK",
                    MenuAction::Back,
                ));
            }
            Screen::SettingsView => {
                let rows = [
                    ("SOUND", MenuAction::ToggleSound),
                    ("MUSIC VOL", MenuAction::CycleMusicVolume),
                    ("SFX VOL", MenuAction::CycleSfxVolume),
                    ("CROSSHAIR", MenuAction::CycleCrosshairStyle),
                    ("SIZE", MenuAction::CycleCrosshairSize),
                    ("COLOR", MenuAction::CycleCrosshairColor),
                    ("SHOW FPS", MenuAction::ToggleFps),
                    ("SHOW STATS", MenuAction::ToggleStats),
                    ("FULLSCREEN", MenuAction::ToggleFullscreen),
                    ("SENSITIVITY", MenuAction::CycleSensitivity),
                    ("CLICK AID", MenuAction::CycleClickThreshold),
                ];
                let y0 = 120.0;
                let row_h = 44.0;
                for (i, (label, action)) in rows.into_iter().enumerate() {
                    self.buttons.push(Button::new(
                        Vec2::new(PLAY_WIDTH / 2.0 - 280.0, y0 + i as f32 * row_h),
                        Vec2::new(560.0, row_h - 8.0),
                        label,
                        action,
                    ));
                }
                self.buttons.push(Button::stacked(
                    y0 + rows.len() as f32 * row_h + 16.0,
                    "SAVE AND EXIT",
                    MenuAction::Back,
                ));
            }
            Screen::Leaderboard => {
                self.buttons.push(Button::new(
                    Vec2::new(PLAY_WIDTH / 4.0 - 130.0, 100.0),
                    Vec2::new(BUTTON_W, BUTTON_H),
                    "MODE",
                    MenuAction::CycleBoardMode,
                ));
                self.buttons.push(Button::new(
                    Vec2::new(PLAY_WIDTH * 3.0 / 4.0 - 130.0, 100.0),
                    Vec2::new(BUTTON_W, BUTTON_H),
                    "DIFFICULTY",
                    MenuAction::CycleBoardDifficulty,
                ));
                self.buttons.push(Button::stacked(
                    PLAY_HEIGHT - 90.0,
                    "BACK",
                    MenuAction::Back,
                ));
            }
            Screen::Playing => {}
        }
    }

    pub fn draw(&self, out: &mut Vec<Vertex>, settings: &Settings, scores: &ScoreBoard) {
        match self.screen {
            Screen::MainMenu => self.draw_main(out),
            Screen::ModeSelect => self.draw_mode_select(out),
            Screen::DifficultySelect => self.draw_difficulty_select(out),
            Screen::SettingsView => self.draw_settings(out, settings),
            Screen::Leaderboard => self.draw_leaderboard(out, scores),
            Screen::Playing => {}
        }
        for button in &self.buttons {
            button.draw(out);
        }
        self.draw_values(out, settings);
    }

    fn draw_main(&self, out: &mut Vec<Vertex>) {
        glyphs::text_centered(
            out,
            "REFLEX RANGE",
            PLAY_WIDTH / 2.0,
            PLAY_HEIGHT / 4.0 - 40.0,
            7.0,
            colors::WARNING,
        );
        glyphs::text_centered(
            out,
            "AIM TRAINING SIMULATOR",
            PLAY_WIDTH / 2.0,
            PLAY_HEIGHT / 4.0 + 30.0,
            2.5,
            colors::ACCENT,
        );
    }

    fn draw_mode_select(&self, out: &mut Vec<Vertex>) {
        glyphs::text_centered(out, "SELECT MODE", PLAY_WIDTH / 2.0, 80.0, 4.0, colors::TEXT);

        // Description of the hovered mode, bottom center
        let description = self.buttons.iter().find(|b| b.hovered).and_then(|b| {
            match b.action {
                MenuAction::SelectMode(GameMode::Flick) => {
                    Some("SNAP TO TARGETS BEFORE THEY EXPIRE")
                }
                MenuAction::SelectMode(GameMode::Tracking) => {
                    Some("HOLD YOUR AIM ON MOVING TARGETS")
                }
                MenuAction::SelectMode(GameMode::Switch) => {
                    Some("SWAP BETWEEN MULTIPLE TARGETS FAST")
                }
                MenuAction::SelectMode(GameMode::Spike) => {
                    Some("HIT THE CORES AND AVOID THE DECOYS")
                }
                _ => None,
            }
        });
        if let Some(description) = description {
            glyphs::text_centered(
                out,
                description,
                PLAY_WIDTH / 2.0,
                PLAY_HEIGHT - 80.0,
                2.0,
                colors::TEXT_DIM,
            );
        }
    }

    fn draw_difficulty_select(&self, out: &mut Vec<Vertex>) {
        glyphs::text_centered(
            out,
            "SELECT DIFFICULTY",
            PLAY_WIDTH / 2.0,
            80.0,
            4.0,
            colors::TEXT,
        );
        glyphs::text_centered(
            out,
            &self.selected_mode.as_str().to_uppercase(),
            PLAY_WIDTH / 2.0,
            130.0,
            2.5,
            colors::ACCENT,
        );
    }

    fn draw_settings(&self, out: &mut Vec<Vertex>, _settings: &Settings) {
        glyphs::text_centered(out, "SETTINGS", PLAY_WIDTH / 2.0, 40.0, 4.0, colors::TEXT);
    }

    /// Current values beside the settings rows
    fn draw_values(&self, out: &mut Vec<Vertex>, settings: &Settings) {
        if self.screen != Screen::SettingsView {
            return;
        }
        for button in &self.buttons {
            let value = match button.action {
                MenuAction::ToggleSound => on_off(settings.sound_enabled),
                MenuAction::CycleMusicVolume => format!("{:.0}%", settings.music_volume * 100.0),
                MenuAction::CycleSfxVolume => format!("{:.0}%", settings.sfx_volume * 100.0),
                MenuAction::CycleCrosshairStyle => {
                    settings.crosshair_style.as_str().to_uppercase()
                }
                MenuAction::CycleCrosshairSize => format!("{:.0}", settings.crosshair_size),
                MenuAction::CycleCrosshairColor => {
                    let [r, g, b] = settings.crosshair_color;
                    format!("{r} {g} {b}")
                }
                MenuAction::ToggleFps => on_off(settings.show_fps),
                MenuAction::ToggleStats => on_off(settings.show_stats),
                MenuAction::ToggleFullscreen => on_off(settings.fullscreen),
                MenuAction::CycleSensitivity => format!("{:.1}", settings.mouse_sensitivity),
                MenuAction::CycleClickThreshold => format!("{:.0}PX", settings.click_threshold),
                _ => continue,
            };
            glyphs::text_right(
                out,
                &value,
                button.min.x + button.size.x - 16.0,
                button.min.y + (button.size.y - glyphs::text_height(2.0)) / 2.0,
                2.0,
                colors::ACCENT,
            );
        }
    }

    fn draw_leaderboard(&self, out: &mut Vec<Vertex>, scores: &ScoreBoard) {
        glyphs::text_centered(out, "LEADERBOARD", PLAY_WIDTH / 2.0, 40.0, 4.0, colors::TEXT);

        // Current bucket under the cycle buttons
        glyphs::text_centered(
            out,
            &self.board_mode.as_str().to_uppercase(),
            PLAY_WIDTH / 4.0,
            160.0,
            2.5,
            colors::ACCENT,
        );
        glyphs::text_centered(
            out,
            &self.board_difficulty.as_str().to_uppercase(),
            PLAY_WIDTH * 3.0 / 4.0,
            160.0,
            2.5,
            colors::ACCENT,
        );

        let entries = scores.entries(self.board_mode, self.board_difficulty);
        if entries.is_empty() {
            glyphs::text_centered(
                out,
                "NO SCORES YET",
                PLAY_WIDTH / 2.0,
                PLAY_HEIGHT / 2.0,
                3.0,
                colors::TEXT_DIM,
            );
            return;
        }

        let cell = 2.0;
        let header_y = 210.0;
        glyphs::text(out, "RANK", Vec2::new(140.0, header_y), cell, colors::TEXT_DIM);
        glyphs::text_right(out, "SCORE", 460.0, header_y, cell, colors::TEXT_DIM);
        glyphs::text_right(out, "ACC", 600.0, header_y, cell, colors::TEXT_DIM);
        glyphs::text_right(out, "HITS", 720.0, header_y, cell, colors::TEXT_DIM);
        glyphs::text_right(out, "HS", 820.0, header_y, cell, colors::TEXT_DIM);

        for (i, entry) in entries.iter().enumerate() {
            let y = header_y + 34.0 + i as f32 * 30.0;
            let color = if i == 0 { colors::GOLD } else { colors::TEXT };
            glyphs::text(out, &format!("{}", i + 1), Vec2::new(140.0, y), cell, color);
            glyphs::text_right(out, &format!("{}", entry.score), 460.0, y, cell, color);
            let acc = match entry.accuracy {
                Some(a) => format!("{:.0}%", a * 100.0),
                None => "--".to_string(),
            };
            glyphs::text_right(out, &acc, 600.0, y, cell, color);
            glyphs::text_right(out, &format!("{}", entry.hits), 720.0, y, cell, color);
            glyphs::text_right(out, &format!("{}", entry.headshots), 820.0, y, cell, color);
        }
    }
}

fn on_off(v: bool) -> String {
    if v { "ON".to_string() } else { "OFF".to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_hits_button_under_cursor() {
        let menus = Menus::new();
        // Click the first main-menu button dead center
        let b = &menus.buttons[0];
        let center = b.min + b.size / 2.0;
        assert_eq!(menus.click(center), Some(MenuAction::OpenModeSelect));
        // Click in empty space resolves to nothing
        assert_eq!(menus.click(Vec2::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_every_screen_builds_buttons() {
        let mut menus = Menus::new();
        for screen in [
            Screen::MainMenu,
            Screen::ModeSelect,
            Screen::DifficultySelect,
            Screen::SettingsView,
            Screen::Leaderboard,
        ] {
            menus.goto(screen);
            assert!(!menus.buttons.is_empty(), "{screen:?}");
        }
        menus.goto(Screen::Playing);
        assert!(menus.buttons.is_empty());
    }

    #[test]
    fn test_mode_select_lists_all_modes() {
        let mut menus = Menus::new();
        menus.goto(Screen::ModeSelect);
        for mode in GameMode::ALL {
            assert!(
                menus
                    .buttons
                    .iter()
                    .any(|b| b.action == MenuAction::SelectMode(mode)),
                "{mode:?} missing"
            );
        }
    }
}
