//! Alien Dodge entry point
//!
//! In the browser: loads images and sounds, wires keyboard input and runs the
//! frame loop on `requestAnimationFrame`. Natively: plays a seeded headless
//! session with a simple autopilot and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use alien_dodge::assets::{AssetTracker, web as asset_web};
    use alien_dodge::audio::AudioManager;
    use alien_dodge::input::{InputTracker, is_mute_key};
    use alien_dodge::renderer::CanvasSurface;
    use alien_dodge::sim::{GameState, seeded_rng};
    use alien_dodge::{FrameOutcome, LoopDriver, Settings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        driver: LoopDriver,
        input: InputTracker,
        rng: Pcg32,
        assets: AssetTracker,
        surface: CanvasSurface,
        audio: AudioManager,
        settings: Settings,
    }

    impl Game {
        /// Run one frame and report what the scheduler should do next
        fn frame(&mut self) -> FrameOutcome {
            let input = self.input.snapshot();
            self.driver.frame(
                &mut self.state,
                &input,
                &mut self.rng,
                &mut self.surface,
                &self.audio,
            )
        }

        /// Flip mute, apply it to the audio manager and persist it
        fn toggle_mute(&mut self) {
            let muted = self.settings.toggle_muted();
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Sound {}", if muted { "muted" } else { "unmuted" });
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Alien Dodge starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let settings = Settings::load();
        let seed = settings.seed_or(js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        let images = asset_web::create_all().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let surface = CanvasSurface::new(&canvas, images.clone())?;

        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(),
            driver: LoopDriver::new(),
            input: InputTracker::new(),
            rng: seeded_rng(seed),
            assets: AssetTracker::new(),
            surface,
            audio: AudioManager::new(&settings),
            settings,
        }));

        setup_input_handlers(game.clone());

        // Each image reports in on its own; the last required one starts the loop
        for (sprite, image) in images {
            let game = game.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let result = asset_web::load(sprite, &image).await;
                let start = {
                    let mut g = game.borrow_mut();
                    g.assets.record(sprite, result) && g.driver.mark_ready()
                };
                if start {
                    request_animation_frame(game);
                }
            });
        }

        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut g = game.borrow_mut();
                if is_mute_key(&key) {
                    if !event.repeat() {
                        g.toggle_mute();
                    }
                } else if g.input.press(&key) {
                    event.prevent_default();
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.release(&event.key());
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur - keyup never arrives for keys held while focus leaves
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.clear();
                log::debug!("Input cleared (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let (outcome, blocking) = {
            let mut g = game.borrow_mut();
            (g.frame(), g.settings.blocking_game_over_alert)
        };

        match outcome {
            FrameOutcome::Continue => request_animation_frame(game),
            FrameOutcome::GameOver { score } => show_game_over(score, blocking),
            FrameOutcome::Idle => {}
        }
    }

    /// Present the final score, either as an alert or in the overlay element
    fn show_game_over(score: u32, blocking: bool) {
        let message = format!("Game Over! Final Score: {}", score);
        let Some(window) = web_sys::window() else {
            return;
        };

        if blocking {
            let _ = window.alert_with_message(&message);
            return;
        }

        let overlay = window
            .document()
            .and_then(|d| d.get_element_by_id("game-over"));
        match overlay {
            Some(el) => {
                el.set_text_content(Some(&message));
                let _ = el.set_attribute("class", "");
            }
            None => {
                log::warn!("No #game-over element, falling back to alert");
                let _ = window.alert_with_message(&message);
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{SystemTime, UNIX_EPOCH};

    use alien_dodge::Settings;

    env_logger::init();
    log::info!("Alien Dodge (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` to play");

    let settings = Settings::load();
    let clock_seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    let seed = settings.seed_or(clock_seed);

    let report = headless::play(seed, headless::MAX_FRAMES);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize report: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use alien_dodge::assets::{AssetTracker, Sprite};
    use alien_dodge::audio::SilentAudio;
    use alien_dodge::renderer::RecordingSurface;
    use alien_dodge::sim::{Counters, GameState, TickInput, seeded_rng};
    use alien_dodge::{FrameOutcome, LoopDriver};

    /// Five minutes at 60 fps
    pub const MAX_FRAMES: u64 = 5 * 60 * 60;

    #[derive(Debug, Serialize)]
    pub struct Report {
        pub seed: u64,
        pub frames: u64,
        pub game_over: bool,
        pub counters: Counters,
    }

    /// Steer away from the closest projectile that is about to reach the player
    fn autopilot(state: &GameState) -> TickInput {
        let player = state.player.rect;
        let center = player.center().x;

        let threat = state
            .projectiles
            .iter()
            .filter(|p| p.rect.bottom() <= player.y + player.height && p.rect.y > player.y - 150.0)
            .filter(|p| (p.rect.center().x - center).abs() < player.width)
            .max_by(|a, b| a.rect.y.total_cmp(&b.rect.y));

        match threat {
            Some(p) if p.rect.center().x >= center => TickInput {
                left: true,
                right: false,
            },
            Some(_) => TickInput {
                left: false,
                right: true,
            },
            None => TickInput::default(),
        }
    }

    /// Play one session without sound or a screen
    pub fn play(seed: u64, max_frames: u64) -> Report {
        let mut state = GameState::new();
        let mut driver = LoopDriver::new();
        let mut rng = seeded_rng(seed);
        let mut surface = RecordingSurface::new();
        let audio = SilentAudio;

        // No files to fetch natively; everything is "loaded" up front
        let mut assets = AssetTracker::new();
        for sprite in Sprite::ALL {
            if assets.mark_loaded(sprite) {
                driver.mark_ready();
            }
        }

        let mut game_over = false;
        while driver.frames() < max_frames {
            surface.clear();
            let input = autopilot(&state);
            match driver.frame(&mut state, &input, &mut rng, &mut surface, &audio) {
                FrameOutcome::Continue => {}
                FrameOutcome::GameOver { score } => {
                    println!("Game Over! Final Score: {}", score);
                    game_over = true;
                    break;
                }
                FrameOutcome::Idle => break,
            }
        }

        Report {
            seed,
            frames: driver.frames(),
            game_over,
            counters: state.counters,
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_headless_session_is_reproducible() {
            let a = play(2024, 1200);
            let b = play(2024, 1200);
            assert!(a.frames <= 1200);
            assert_eq!(a.frames, b.frames);
            assert_eq!(a.counters, b.counters);
            assert_eq!(a.game_over, a.counters.lives == 0);
        }
    }
}
