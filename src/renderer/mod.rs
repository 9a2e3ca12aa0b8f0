//! 2D rendering
//!
//! `render` walks the game state back to front and issues draw calls against
//! a `Surface`. It never mutates state, so the same state always produces the
//! same calls.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::assets::Sprite;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::sim::{GameState, Rect};

/// HUD layout
pub const HUD_FILL_STYLE: &str = "#fff";
pub const HUD_FONT: &str = "20px Arial";
const HEART_X: f32 = 70.0;
const HEART_Y: f32 = 10.0;
const HEART_SPACING: f32 = 30.0;
const HEART_SIZE: f32 = 20.0;

/// Drawing primitives the renderer needs
pub trait Surface {
    fn draw_image(&mut self, sprite: Sprite, rect: Rect);
    fn set_fill_style(&mut self, style: &str);
    fn set_font(&mut self, font: &str);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
}

/// Draw one frame
pub fn render(state: &GameState, surface: &mut impl Surface) {
    surface.draw_image(
        Sprite::Background,
        Rect::new(0.0, 0.0, SCREEN_WIDTH, SCREEN_HEIGHT),
    );
    surface.draw_image(Sprite::Enemy, state.enemy.rect);
    for projectile in &state.projectiles {
        surface.draw_image(Sprite::Projectile, projectile.rect);
    }
    surface.draw_image(Sprite::Player, state.player.rect);

    draw_hud(state, surface);
}

fn draw_hud(state: &GameState, surface: &mut impl Surface) {
    surface.set_fill_style(HUD_FILL_STYLE);
    surface.set_font(HUD_FONT);

    surface.fill_text("Hearts:", 10.0, 30.0);
    for i in 0..state.counters.lives {
        let x = HEART_X + i as f32 * HEART_SPACING;
        surface.draw_image(Sprite::Heart, Rect::new(x, HEART_Y, HEART_SIZE, HEART_SIZE));
    }

    surface.fill_text(&format!("Score: {}", state.counters.score), 10.0, 60.0);
    surface.fill_text(&format!("Coins: {}", state.counters.coins), 10.0, 90.0);
}

/// A single recorded draw operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Image { sprite: Sprite, rect: Rect },
    FillStyle(String),
    Font(String),
    Text { text: String, x: f32, y: f32 },
}

/// Surface that records calls instead of drawing (tests, headless runs)
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded so far
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Number of times a sprite was drawn
    pub fn image_count(&self, sprite: Sprite) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Image { sprite: s, .. } if *s == sprite))
            .count()
    }

    /// All text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn draw_image(&mut self, sprite: Sprite, rect: Rect) {
        self.calls.push(DrawCall::Image { sprite, rect });
    }

    fn set_fill_style(&mut self, style: &str) {
        self.calls.push(DrawCall::FillStyle(style.to_string()));
    }

    fn set_font(&mut self, font: &str) {
        self.calls.push(DrawCall::Font(font.to_string()));
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
        });
    }
}
