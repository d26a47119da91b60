//! Spike Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use spike_runner::consts::{CHARACTER_FRAMES, OBSTACLE_SPRITE};
    use spike_runner::persistence::{CookieStore, KvStore, MemoryStore};
    use spike_runner::platform::{FrameClock, InputEvent, InputState, Key};
    use spike_runner::renderer::{CanvasSurface, render};
    use spike_runner::sim::{Viewport, World, tick};
    use spike_runner::{HighScore, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        world: World,
        store: Box<dyn KvStore>,
        settings: Settings,
        surface: CanvasSurface,
        input: InputState,
        clock: FrameClock,
    }

    impl Game {
        /// Advance and draw one animation frame
        fn frame(&mut self, time: f64) {
            let dt = self.clock.delta(time);
            let input = self.input.take_tick_input();
            tick(&mut self.world, &input, dt, self.store.as_mut());

            // Paused frames must not count toward the next delta
            if self.world.is_paused() {
                self.clock.reset();
            }

            render(&mut self.world, &self.settings, &mut self.surface);
        }

        fn handle(&mut self, event: InputEvent) {
            if event == InputEvent::KeyDown(Key::H) && !self.input.is_pressed(Key::H) {
                self.settings.toggle_hitboxes();
                self.settings.save();
                log::info!("Hitboxes: {}", self.settings.show_hitboxes);
            }
            self.input.handle(event);
        }
    }

    /// Cookie-backed store, or an in-memory one when cookies are unavailable
    fn open_store() -> Box<dyn KvStore> {
        match CookieStore::new() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("High score will not persist: {}", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Spike Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fill the window
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);
        let viewport = Viewport::new(width as f32, height as f32);

        let mut settings = Settings::load();
        if let Ok(query) = window.location().search() {
            settings.apply_query(&query);
        }

        let store = open_store();
        let high_score = HighScore::load(store.as_ref());

        let mut surface = CanvasSurface::new(canvas.clone()).expect("no 2d context");
        let mut sprites: Vec<&str> = CHARACTER_FRAMES.to_vec();
        sprites.push(OBSTACLE_SPRITE);
        surface.preload(&sprites);

        let seed = js_sys::Date::now() as u64;
        let world = World::new(viewport, Tuning::default(), high_score, seed);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            world,
            store,
            settings,
            surface,
            input: InputState::new(),
            clock: FrameClock::new(),
        }));

        setup_input_handlers(&canvas, game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Spike Runner running!");
    }

    /// Pointer position relative to the canvas
    fn canvas_pos(canvas: &HtmlCanvasElement, client_x: i32, client_y: i32) -> Vec2 {
        let rect = canvas.get_bounding_client_rect();
        Vec2::new(
            client_x as f32 - rect.left() as f32,
            client_y as f32 - rect.top() as f32,
        )
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_key_name(&event.key());
                if key.is_jump() {
                    // Keep Space from scrolling the page
                    event.prevent_default();
                }
                game.borrow_mut().handle(InputEvent::KeyDown(key));
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_key_name(&event.key());
                game.borrow_mut().handle(InputEvent::KeyUp(key));
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse
        for (name, make) in [
            ("mousedown", InputEvent::PointerDown as fn(Vec2) -> InputEvent),
            ("mouseup", InputEvent::PointerUp),
            ("mousemove", InputEvent::PointerMove),
        ] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = canvas_pos(&canvas_clone, event.client_x(), event.client_y());
                game.borrow_mut().handle(make(pos));
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start acts as a click
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let pos = canvas_pos(&canvas_clone, touch.client_x(), touch.client_y());
                    game.borrow_mut().handle(InputEvent::PointerDown(pos));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if !g.world.is_paused() {
                    g.input.request_pause();
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document
            .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Spike Runner (native) starting...");
    log::info!("Native mode runs a headless simulation - use `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => load_tuning(&path),
        None => spike_runner::Tuning::default(),
    };
    headless::run(tuning, 42, 60 * 120);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn load_tuning(path: &str) -> spike_runner::Tuning {
    let parsed = std::fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|json| spike_runner::Tuning::from_json(&json).map_err(|e| e.to_string()));
    match parsed {
        Ok(tuning) => {
            log::info!("Loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::error!("Bad tuning file {}: {} (using defaults)", path, e);
            spike_runner::Tuning::default()
        }
    }
}

/// Scripted run with a simple auto-jumper
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use spike_runner::consts::REFERENCE_FRAME_MS;
    use spike_runner::persistence::MemoryStore;
    use spike_runner::renderer::{RecordingSurface, render};
    use spike_runner::sim::{TickInput, Viewport, World, tick};
    use spike_runner::{HighScore, Settings, Tuning};

    /// Reference frames of warning the jumper wants before an obstacle
    const LOOKAHEAD_FRAMES: f32 = 18.0;

    pub fn run(tuning: Tuning, seed: u64, frames: u32) {
        let mut store = MemoryStore::new();
        let mut world = World::new(
            Viewport::new(800.0, 600.0),
            tuning,
            HighScore::load(&store),
            seed,
        );
        let settings = Settings::default();
        let mut surface = RecordingSurface::all_loaded();

        let mut jumps = 0;
        for frame in 0..frames {
            let input = TickInput {
                jump: should_jump(&world),
                ..Default::default()
            };
            if input.jump {
                jumps += 1;
            }
            tick(&mut world, &input, REFERENCE_FRAME_MS, &mut store);
            render(&mut world, &settings, &mut surface);
            surface.take_calls();

            if world.game.is_over() {
                log::info!("Run ended after {} frames", frame + 1);
                break;
            }
        }

        log::info!(
            "Final score: {} (high score {}, {} jump attempts)",
            world.game.score,
            world.game.high_score.best,
            jumps
        );
    }

    /// Jump when the nearest obstacle ahead is about to reach the character
    fn should_jump(world: &World) -> bool {
        let Some(character) = world.character_body() else {
            return false;
        };
        let reach = world.game.speed * LOOKAHEAD_FRAMES;
        world
            .obstacles
            .iter()
            .filter_map(|id| world.scene.get(*id))
            .map(|e| e.body.pos.x - character.right())
            .any(|gap| gap >= 0.0 && gap < reach)
    }
}
