//! Game state and core simulation types
//!
//! Everything the update and render steps touch lives in `GameState`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Lives ran out; terminal, no resume
    GameOver,
}

/// Things that happened during a tick that the outside world should hear about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The enemy fired a projectile
    Shoot,
    /// Lives reached zero; emitted once per session
    GameOver { score: u32 },
}

/// The player's sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Horizontal step per frame
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            rect: Rect::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
            speed: PLAYER_SPEED,
        }
    }
}

impl Player {
    /// Rightmost x the player may occupy
    pub fn max_x(&self) -> f32 {
        SCREEN_WIDTH - self.rect.width
    }
}

/// The patrolling alien ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    pub speed: f32,
}

impl Default for Enemy {
    fn default() -> Self {
        Self {
            rect: Rect::new(ENEMY_START_X, ENEMY_START_Y, ENEMY_WIDTH, ENEMY_HEIGHT),
            speed: ENEMY_SPEED,
        }
    }
}

impl Enemy {
    /// Step one unit of speed left or right, staying on screen
    pub fn patrol(&mut self, rightward: bool) {
        let step = if rightward { self.speed } else { -self.speed };
        self.rect.x = (self.rect.x + step).clamp(0.0, SCREEN_WIDTH - self.rect.width);
    }

    /// Where new projectiles appear: horizontal centre, just below the hull
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(self.rect.center().x, self.rect.bottom())
    }
}

/// A falling projectile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub rect: Rect,
}

impl Projectile {
    pub fn new(id: u32, at: Vec2) -> Self {
        Self {
            id,
            rect: Rect::new(at.x, at.y, PROJECTILE_SIZE, PROJECTILE_SIZE),
        }
    }

    /// Move down by one frame's worth of travel
    pub fn fall(&mut self) {
        self.rect.translate(Vec2::new(0.0, PROJECTILE_SPEED));
    }

    /// Past the bottom edge of the screen
    pub fn is_off_screen(&self) -> bool {
        self.rect.y > SCREEN_HEIGHT
    }
}

/// What a projectile hit did to the lives counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Lives were already gone; nothing changed
    Absorbed,
    /// One life lost, some remain
    LifeLost,
    /// The final life was lost
    LastLife,
}

/// Score, currency, ammo and lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub score: u32,
    pub coins: u32,
    pub ammo: u8,
    pub lives: u8,
}

impl Default for Counters {
    fn default() -> Self {
        Self {
            score: 0,
            coins: 0,
            ammo: INITIAL_AMMO,
            lives: MAX_LIVES,
        }
    }
}

impl Counters {
    /// Award a point for a projectile that made it past the player.
    ///
    /// Every `SCORE_PER_COIN`th point earns a coin, and every
    /// `COINS_FOR_AMMO`th coin earns ammo while below the cap.
    pub fn award_dodge(&mut self) {
        self.score += 1;
        if self.score % SCORE_PER_COIN == 0 {
            self.coins += 1;
            if self.coins % COINS_FOR_AMMO == 0 && self.ammo < MAX_LIVES {
                self.ammo += 1;
            }
        }
    }

    /// Take a hit from a projectile
    pub fn take_hit(&mut self) -> HitOutcome {
        match self.lives {
            0 => HitOutcome::Absorbed,
            1 => {
                self.lives = 0;
                HitOutcome::LastLife
            }
            _ => {
                self.lives -= 1;
                HitOutcome::LifeLost
            }
        }
    }
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    pub enemy: Enemy,
    /// Live projectiles; order carries no meaning
    pub projectiles: Vec<Projectile>,
    pub counters: Counters,
    /// Frames simulated so far
    pub frame: u64,
    /// Next projectile ID
    next_id: u32,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh session: full lives, enemy and player at their start positions
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Running,
            player: Player::default(),
            enemy: Enemy::default(),
            projectiles: Vec::new(),
            counters: Counters::default(),
            frame: 0,
            next_id: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Allocate a new projectile ID
    pub fn next_projectile_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Fire a projectile from the enemy's muzzle
    pub fn spawn_projectile(&mut self) -> u32 {
        let id = self.next_projectile_id();
        let at = self.enemy.muzzle();
        self.projectiles.push(Projectile::new(id, at));
        id
    }

    /// Place a projectile at an exact spot (scenario setup, debugging)
    pub fn spawn_projectile_at(&mut self, at: Vec2) -> u32 {
        let id = self.next_projectile_id();
        self.projectiles.push(Projectile::new(id, at));
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let state = GameState::new();
        assert!(state.is_running());
        assert_eq!(state.counters.lives, MAX_LIVES);
        assert_eq!(state.counters.ammo, INITIAL_AMMO);
        assert_eq!(state.counters.score, 0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.player.rect.x, 400.0);
        assert_eq!(state.player.rect.y, 500.0);
    }

    #[test]
    fn test_enemy_patrol_clamps() {
        let mut enemy = Enemy::default();
        enemy.rect.x = 1.0;
        enemy.patrol(false);
        assert_eq!(enemy.rect.x, 0.0);

        enemy.rect.x = SCREEN_WIDTH - ENEMY_WIDTH - 1.0;
        enemy.patrol(true);
        assert_eq!(enemy.rect.x, SCREEN_WIDTH - ENEMY_WIDTH);
    }

    #[test]
    fn test_spawn_from_muzzle() {
        let mut state = GameState::new();
        let first = state.spawn_projectile();
        let second = state.spawn_projectile();
        assert!(second > first);

        let p = &state.projectiles[0];
        assert_eq!(p.rect.x, ENEMY_START_X + ENEMY_WIDTH / 2.0);
        assert_eq!(p.rect.y, ENEMY_START_Y + ENEMY_HEIGHT);
    }

    #[test]
    fn test_award_dodge_coins_and_ammo() {
        let mut counters = Counters {
            score: 49,
            coins: 9,
            ammo: 3,
            lives: 5,
        };
        counters.award_dodge();
        assert_eq!(counters.score, 50);
        assert_eq!(counters.coins, 10);
        assert_eq!(counters.ammo, 4);

        // Not a multiple of 5: nothing else moves
        counters.award_dodge();
        assert_eq!(counters.score, 51);
        assert_eq!(counters.coins, 10);
        assert_eq!(counters.ammo, 4);
    }

    #[test]
    fn test_ammo_capped() {
        let mut counters = Counters {
            score: 49,
            coins: 9,
            ammo: MAX_LIVES,
            lives: 1,
        };
        counters.award_dodge();
        assert_eq!(counters.coins, 10);
        assert_eq!(counters.ammo, MAX_LIVES);
    }

    #[test]
    fn test_take_hit_saturates() {
        let mut counters = Counters {
            lives: 2,
            ..Counters::default()
        };
        assert_eq!(counters.take_hit(), HitOutcome::LifeLost);
        assert_eq!(counters.lives, 1);
        assert_eq!(counters.take_hit(), HitOutcome::LastLife);
        assert_eq!(counters.lives, 0);
        // Further hits change nothing
        assert_eq!(counters.take_hit(), HitOutcome::Absorbed);
        assert_eq!(counters.lives, 0);
    }

    #[test]
    fn test_state_serializes() {
        let state = GameState::new();
        let json = serde_json::to_string(&state).unwrap();
        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.counters, state.counters);
        assert_eq!(back.phase, state.phase);
    }
}
