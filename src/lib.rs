//! Alien Dodge - A single-screen arcade dodger
//!
//! Core modules:
//! - `sim`: Simulation (entities, collisions, per-frame update)
//! - `renderer`: Draw-call rendering onto a 2D surface
//! - `driver`: Frame loop state machine gated on asset readiness
//! - `input`: Keyboard direction tracking
//! - `assets`: Image catalogue and load tracking
//! - `audio`: Sound cues
//! - `settings`: Player preferences

pub mod assets;
pub mod audio;
pub mod driver;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use driver::{FrameOutcome, LoopDriver, LoopState};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Logical screen size
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Starting lives, also the cap for lives and ammo
    pub const MAX_LIVES: u8 = 5;
    pub const INITIAL_AMMO: u8 = 5;
    /// A coin is earned every N points of score
    pub const SCORE_PER_COIN: u32 = 5;
    /// Ammo is granted every N coins
    pub const COINS_FOR_AMMO: u32 = 10;

    /// Player defaults - starts centred, 100 units above the bottom edge
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    pub const PLAYER_START_X: f32 = SCREEN_WIDTH / 2.0;
    pub const PLAYER_START_Y: f32 = SCREEN_HEIGHT - 100.0;
    pub const PLAYER_SPEED: f32 = 7.0;

    /// Enemy ship defaults
    pub const ENEMY_WIDTH: f32 = 100.0;
    pub const ENEMY_HEIGHT: f32 = 50.0;
    pub const ENEMY_START_X: f32 = SCREEN_WIDTH / 2.0;
    pub const ENEMY_START_Y: f32 = 50.0;
    pub const ENEMY_SPEED: f32 = 2.0;

    /// Projectile defaults
    pub const PROJECTILE_SIZE: f32 = 10.0;
    pub const PROJECTILE_SPEED: f32 = 5.0;
    /// Chance per frame that the enemy fires
    pub const SPAWN_CHANCE: f32 = 0.02;
}
