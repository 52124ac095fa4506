//! Rainbow Run entry point
//!
//! Handles platform-specific initialization and runs the frame-gated loop:
//! one simulation tick per display refresh, with refreshes that arrive before
//! the target frame interval skipped rather than accumulated.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use rainbow_run::accounts::AccountStore;
    use rainbow_run::audio::AudioManager;
    use rainbow_run::consts::*;
    use rainbow_run::sim::{GameEvent, GameState, RenderFrame, TickInput, tick};
    use rainbow_run::{Leaderboard, Settings};

    /// LocalStorage key holding the logged-in username, written by the
    /// account menu outside the core.
    const CURRENT_USER_KEY: &str = "rainbow_run_current_user";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        audio: AudioManager,
        settings: Settings,
        accounts: AccountStore,
        guest_board: Leaderboard,
        /// Timestamp of the last executed tick (frame gate)
        last_tick_ms: f64,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.volume);
            audio.set_muted(settings.muted);
            Self {
                state: GameState::new(seed, settings.mode, settings.profile.tuning()),
                input: TickInput::default(),
                audio,
                settings,
                accounts: AccountStore::load(),
                guest_board: Leaderboard::load(),
                last_tick_ms: 0.0,
            }
        }

        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(
                seed,
                self.settings.mode,
                self.settings.profile.tuning(),
            );
        }

        /// One display refresh. Ticks at most once; early refreshes are
        /// skipped, not accumulated.
        fn frame(&mut self, now_ms: f64) {
            if now_ms - self.last_tick_ms >= FRAME_INTERVAL_MS {
                let input = self.input;
                tick(&mut self.state, &input);
                self.drain_events(now_ms);
                self.last_tick_ms = now_ms;
            }

            // The renderer consumes this snapshot read-only; wall time feeds
            // cosmetic animation phases only.
            let _frame = RenderFrame::capture(&self.state, now_ms / 1000.0);
        }

        fn drain_events(&mut self, now_ms: f64) {
            let events: Vec<GameEvent> = self.state.events.drain(..).collect();
            for event in events {
                match event {
                    GameEvent::Sound(cue) => self.audio.play(cue),
                    GameEvent::LevelUp { level } => {
                        log::info!("Level {}", level);
                    }
                    GameEvent::GameOver { score, level } => {
                        log::info!("Game over: score {} level {}", score, level);
                        self.record_run(score, level, now_ms);
                    }
                }
            }
        }

        /// Route the run result to the logged-in account, or the guest board
        fn record_run(&mut self, score: u32, level: u32, timestamp: f64) {
            let current_user = web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .and_then(|s| s.get_item(CURRENT_USER_KEY).ok())
                .flatten();

            match current_user {
                Some(user) if self.accounts.get(&user).is_some() => {
                    self.accounts.record_run(&user, score, level, timestamp);
                    self.accounts.save();
                }
                _ => {
                    self.guest_board.add(score, level, timestamp, "Guest");
                    self.guest_board.save();
                }
            }
        }
    }

    fn setup_input(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "Space" => {
                        event.prevent_default();
                        g.input.jump = true;
                    }
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "Space" => g.input.jump = false,
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(f: &Closure<dyn FnMut(f64)>) {
        web_sys::window()
            .unwrap()
            .request_animation_frame(f.as_ref().unchecked_ref())
            .expect("requestAnimationFrame failed");
    }

    fn start_loop(game: Rc<RefCell<Game>>) {
        let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let g = f.clone();

        *g.borrow_mut() = Some(Closure::new(move |time: f64| {
            game.borrow_mut().frame(time);
            request_animation_frame(f.borrow().as_ref().unwrap());
        }));

        request_animation_frame(g.borrow().as_ref().unwrap());
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let seed = js_sys::Date::now() as u64;
        log::info!("Rainbow Run starting with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game::new(seed)));
        setup_input(game.clone());
        setup_restart_button(game.clone());
        start_loop(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rainbow_run::audio::AudioManager;
    use rainbow_run::settings::Settings;
    use rainbow_run::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xC0FFEE);
    log::info!("Rainbow Run (headless) seed: {}", seed);

    let settings = Settings::load();
    let audio = AudioManager::new();
    let mut state = GameState::new(seed, settings.mode, settings.profile.tuning());

    // Scripted demo: run right and hop periodically until the run ends
    let mut ticks = 0u64;
    while state.phase == GamePhase::Playing && ticks < 36_000 {
        let input = TickInput {
            right: true,
            jump: ticks % 30 < 5,
            ..Default::default()
        };
        tick(&mut state, &input);
        for event in state.events.drain(..).collect::<Vec<_>>() {
            match event {
                GameEvent::Sound(cue) => audio.play(cue),
                GameEvent::LevelUp { level } => log::info!("Level {}", level),
                GameEvent::GameOver { score, level } => {
                    log::info!("Game over: score {} level {}", score, level);
                }
            }
        }
        ticks += 1;
    }

    println!(
        "run ended after {} ticks: score {} level {} ({} platforms, {} enemies)",
        ticks,
        state.score,
        state.level,
        state.platforms.len(),
        state.enemies.len()
    );
}
