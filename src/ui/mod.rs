//! Presentation layer: menus, HUD and the quad glyph set
//!
//! Read-only with respect to game logic; everything here consumes simulation
//! state and produces vertices.

pub mod glyphs;
pub mod hud;
pub mod menu;

pub use menu::{MenuAction, Menus, Screen};
