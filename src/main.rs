//! Vector Pong entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use vector_pong::renderer::RenderState;
    use vector_pong::scene::PAUSED_MESSAGE;
    use vector_pong::sim::{GamePhase, keys};
    use vector_pong::{FrameClock, Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        clock: FrameClock,
        settings: Settings,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            Self {
                session: Session::new(),
                render_state: None,
                clock: FrameClock::new(),
                settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation step for this animation frame
        fn update(&mut self, time: f64) {
            let elapsed_ms = self.clock.advance(time);
            self.session.tick(elapsed_ms);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let palette = self.settings.palette();
            let scene = self.session.scene(&palette);
            let segments = self.settings.quality.circle_segments();

            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&scene, palette.background, segments) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update the text overlay in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.session.state();

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&state.score_line()));
            }

            // Message slot is empty while playing
            if let Some(el) = document.get_element_by_id("message") {
                let text = match state.phase {
                    GamePhase::Paused => PAUSED_MESSAGE,
                    GamePhase::Playing => "",
                };
                el.set_text_content(Some(text));
            }

            if let Some(el) = document.get_element_by_id("fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&self.fps.to_string()));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Vector Pong starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        log::info!("Quality preset: {}", settings.quality.as_str());
        let game = Rc::new(RefCell::new(Game::new(settings)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Vector Pong running!");
    }

    /// Keys the page would otherwise use for scrolling
    fn is_game_key(key: &str) -> bool {
        matches!(
            key,
            keys::SERVE | keys::P1_UP | keys::P1_DOWN | keys::P2_UP | keys::P2_DOWN
        )
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if is_game_key(&key) {
                    event.prevent_default();
                }
                game.borrow_mut().session.key_down(&key);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().session.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Vector Pong (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the web version");

    run_demo();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted rally at 60 Hz: serve, chase the ball with both paddles, log
/// the outcome
#[cfg(not(target_arch = "wasm32"))]
fn run_demo() {
    use vector_pong::Session;
    use vector_pong::sim::keys;

    const FRAME_MS: f32 = 1000.0 / 60.0;
    const FRAMES: u32 = 60 * 20;

    let mut session = Session::new();

    for frame in 0..FRAMES {
        let (ball_y, p1_y, p2_y) = {
            let s = session.state();
            (s.ball.pos.y, s.player1.pos.y, s.player2.pos.y)
        };

        // Serve whenever the table is waiting
        if session.state().phase == vector_pong::sim::GamePhase::Paused {
            session.key_down(keys::SERVE);
        } else {
            session.key_up(keys::SERVE);
        }

        // Left paddle tracks the ball, right paddle lags by holding still
        // every third second
        track(&mut session, ball_y - p1_y, keys::P1_UP, keys::P1_DOWN);
        if (frame / 60) % 3 == 2 {
            session.key_up(keys::P2_UP);
            session.key_up(keys::P2_DOWN);
        } else {
            track(&mut session, ball_y - p2_y, keys::P2_UP, keys::P2_DOWN);
        }

        session.tick(FRAME_MS);
    }

    let state = session.state();
    log::info!("Demo finished, final score {}", state.score_line());
    match serde_json::to_string(state) {
        Ok(json) => log::debug!("Final state: {}", json),
        Err(e) => log::warn!("Could not serialize state: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn track(session: &mut vector_pong::Session, offset: f32, up: &str, down: &str) {
    session.key_up(up);
    session.key_up(down);
    if offset > 5.0 {
        session.key_down(up);
    } else if offset < -5.0 {
        session.key_down(down);
    }
}
