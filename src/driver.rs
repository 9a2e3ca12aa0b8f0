//! Frame loop state machine
//!
//! `NotReady` until the required images load, then `Running` one
//! update+render per frame, then `Stopped` for good after the game-over
//! frame. The browser (or the headless binary) owns scheduling; this type
//! decides what a frame does and whether another should be scheduled.

use crate::audio::{CuePlayer, SoundCue};
use crate::renderer::{Surface, render};
use crate::sim::{GameEvent, GameState, RandomSource, TickInput, tick};

/// Loop lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Waiting for assets; frames do nothing
    NotReady,
    /// Update and render every frame
    Running,
    /// Game over; no more frames
    Stopped,
}

/// What the scheduler should do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Nothing ran; don't reschedule
    Idle,
    /// Frame ran; schedule the next one
    Continue,
    /// This frame ended the game; show the final score and stop
    GameOver { score: u32 },
}

#[derive(Debug)]
pub struct LoopDriver {
    state: LoopState,
    frames: u64,
}

impl Default for LoopDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl LoopDriver {
    pub fn new() -> Self {
        Self {
            state: LoopState::NotReady,
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Frames that ran update+render
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Open the readiness gate. Returns true only on the transition.
    pub fn mark_ready(&mut self) -> bool {
        if self.state != LoopState::NotReady {
            return false;
        }
        log::info!("Assets ready, starting loop");
        self.state = LoopState::Running;
        true
    }

    /// Run one frame: update, render, then dispatch the frame's events
    pub fn frame(
        &mut self,
        game: &mut GameState,
        input: &TickInput,
        rng: &mut impl RandomSource,
        surface: &mut impl Surface,
        audio: &impl CuePlayer,
    ) -> FrameOutcome {
        if self.state != LoopState::Running {
            return FrameOutcome::Idle;
        }

        let events = tick(game, input, rng);
        render(game, surface);
        self.frames += 1;

        let mut outcome = FrameOutcome::Continue;
        for event in events {
            match event {
                GameEvent::Shoot => audio.play(SoundCue::Shoot),
                GameEvent::GameOver { score } => {
                    audio.play(SoundCue::GameOver);
                    outcome = FrameOutcome::GameOver { score };
                }
            }
        }

        if !game.is_running() {
            log::info!("Loop stopped after {} frames", self.frames);
            self.state = LoopState::Stopped;
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Sprite;
    use crate::audio::RecordingAudio;
    use crate::renderer::RecordingSurface;
    use crate::sim::ScriptedRandom;
    use glam::Vec2;

    struct Harness {
        driver: LoopDriver,
        game: GameState,
        surface: RecordingSurface,
        audio: RecordingAudio,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                driver: LoopDriver::new(),
                game: GameState::new(),
                surface: RecordingSurface::new(),
                audio: RecordingAudio::new(),
            }
        }

        fn frame(&mut self, rng: &mut ScriptedRandom) -> FrameOutcome {
            self.driver.frame(
                &mut self.game,
                &TickInput::default(),
                rng,
                &mut self.surface,
                &self.audio,
            )
        }
    }

    #[test]
    fn test_not_ready_does_nothing() {
        let mut h = Harness::new();
        let mut rng = ScriptedRandom::new([0.1], 0.0);
        assert_eq!(h.frame(&mut rng), FrameOutcome::Idle);
        assert_eq!(h.game.frame, 0);
        assert!(h.surface.calls.is_empty());
        assert!(h.audio.played().is_empty());
        assert_eq!(rng.remaining(), 1);
    }

    #[test]
    fn test_mark_ready_once() {
        let mut driver = LoopDriver::new();
        assert!(driver.mark_ready());
        assert_eq!(driver.state(), LoopState::Running);
        assert!(!driver.mark_ready());
        assert_eq!(driver.state(), LoopState::Running);
    }

    #[test]
    fn test_running_frame_updates_and_renders() {
        let mut h = Harness::new();
        h.driver.mark_ready();
        let mut rng = ScriptedRandom::constant(0.9);

        assert_eq!(h.frame(&mut rng), FrameOutcome::Continue);
        assert_eq!(h.game.frame, 1);
        assert_eq!(h.driver.frames(), 1);
        assert_eq!(h.surface.image_count(Sprite::Background), 1);
    }

    #[test]
    fn test_shoot_plays_cue() {
        let mut h = Harness::new();
        h.driver.mark_ready();
        let mut rng = ScriptedRandom::new([0.9, 0.0], 0.9);

        h.frame(&mut rng);
        assert_eq!(h.audio.played(), vec![SoundCue::Shoot]);
        assert_eq!(h.game.projectiles.len(), 1);
    }

    #[test]
    fn test_game_over_stops_loop() {
        let mut h = Harness::new();
        h.driver.mark_ready();
        h.game.counters.lives = 1;
        h.game.counters.score = 9;
        let p = h.game.player.rect;
        h.game.spawn_projectile_at(Vec2::new(p.x + 10.0, p.y - 5.0));

        let mut rng = ScriptedRandom::constant(0.9);
        assert_eq!(h.frame(&mut rng), FrameOutcome::GameOver { score: 9 });
        assert_eq!(h.driver.state(), LoopState::Stopped);
        assert_eq!(h.audio.count(SoundCue::GameOver), 1);
        // Terminal frame still rendered, with no hearts left
        assert_eq!(h.surface.image_count(Sprite::Heart), 0);
        assert_eq!(h.surface.texts(), vec!["Hearts:", "Score: 9", "Coins: 0"]);

        h.surface.clear();
        let frames = h.game.frame;
        for _ in 0..5 {
            assert_eq!(h.frame(&mut rng), FrameOutcome::Idle);
        }
        assert_eq!(h.game.frame, frames);
        assert!(h.surface.calls.is_empty());
        assert_eq!(h.audio.count(SoundCue::GameOver), 1);
        assert!(!h.driver.mark_ready());
    }
}
