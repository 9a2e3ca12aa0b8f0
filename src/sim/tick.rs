//! Per-frame simulation step
//!
//! Advances the enemy, the projectiles and the player by one frame.

use super::collision::overlaps;
use super::rng::RandomSource;
use super::state::{GameEvent, GamePhase, GameState, HitOutcome};
use crate::consts::SPAWN_CHANCE;

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left held
    pub left: bool,
    /// Move right held
    pub right: bool,
}

/// Advance the game state by one frame
///
/// Returns the events raised during the frame. Does nothing once the game is
/// over.
pub fn tick(state: &mut GameState, input: &TickInput, rng: &mut impl RandomSource) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == GamePhase::GameOver {
        return events;
    }

    // Enemy random walk
    let rightward = rng.coin_flip();
    state.enemy.patrol(rightward);

    update_projectiles(state, &mut events);

    if state.phase == GamePhase::Running {
        if rng.chance(SPAWN_CHANCE) {
            let id = state.spawn_projectile();
            log::trace!("Projectile {} spawned at x={}", id, state.enemy.muzzle().x);
            events.push(GameEvent::Shoot);
        }

        move_player(state, input);
    }

    state.frame += 1;
    events
}

/// Move, hit-test and retire projectiles.
///
/// Takes the list out of the state and rebuilds it from survivors, so every
/// projectile is looked at exactly once no matter how many are removed.
fn update_projectiles(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let projectiles = std::mem::take(&mut state.projectiles);
    let mut survivors = Vec::with_capacity(projectiles.len());

    for mut projectile in projectiles {
        projectile.fall();

        if overlaps(&projectile.rect, &state.player.rect) {
            match state.counters.take_hit() {
                HitOutcome::LastLife => {
                    state.phase = GamePhase::GameOver;
                    let score = state.counters.score;
                    log::info!("Game over! Final score: {}", score);
                    events.push(GameEvent::GameOver { score });
                }
                HitOutcome::LifeLost => {
                    log::debug!(
                        "Hit by projectile {}, lives left: {}",
                        projectile.id,
                        state.counters.lives
                    );
                }
                HitOutcome::Absorbed => {}
            }
            continue;
        }

        if projectile.is_off_screen() {
            state.counters.award_dodge();
            continue;
        }

        survivors.push(projectile);
    }

    state.projectiles = survivors;
}

/// Apply held directions. Each direction checks its own bound.
fn move_player(state: &mut GameState, input: &TickInput) {
    let player = &mut state.player;
    let max_x = player.max_x();

    if input.left && player.rect.x > 0.0 {
        player.rect.x -= player.speed;
    }
    if input.right && player.rect.x < max_x {
        player.rect.x += player.speed;
    }
    player.rect.x = player.rect.x.clamp(0.0, max_x);
}
