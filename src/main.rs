//! Stick Hero entry point
//!
//! On the web this wires the DOM (canvas, HUD, input listeners) to a
//! `Session`. Natively it plays a few scripted jumps headlessly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use stick_hero::persistence::{LocalStorage, MemoryStorage, Storage};
    use stick_hero::platform::{FrameLoop, FrameScheduler, InputSignal, PointerEvent, map_key};
    use stick_hero::renderer::{CanvasBackend, RenderBackend};
    use stick_hero::sim::Viewport;
    use stick_hero::{Session, Tuning, UiEvent};

    /// How long the perfect/golden badges stay up
    const BADGE_MS: f64 = 1000.0;

    /// requestAnimationFrame behind the scheduler seam
    struct RafScheduler {
        game: Weak<RefCell<Game>>,
    }

    impl FrameScheduler for RafScheduler {
        type Handle = i32;

        fn request(&mut self) -> Option<i32> {
            let game = self.game.clone();
            let closure = Closure::once(move |time: f64| {
                if let Some(game) = game.upgrade() {
                    game_loop(&game, time);
                }
            });
            let handle = web_sys::window()?
                .request_animation_frame(closure.as_ref().unchecked_ref())
                .ok()?;
            closure.forget();
            Some(handle)
        }

        fn cancel(&mut self, handle: i32) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(handle);
            }
        }
    }

    /// Shell state around the session
    struct Game {
        session: Session,
        backend: Option<CanvasBackend>,
        frames: FrameLoop<RafScheduler>,
        badge_until: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn apply_signal(&mut self, signal: InputSignal) {
            let restart = signal == InputSignal::Restart;
            if restart {
                self.frames.stop();
            }
            if self.session.handle(signal) {
                self.frames.start();
            }
            if restart {
                set_class("game-over", "hidden");
                self.update_hud();
            }
        }

        fn track_fps(&mut self, time: f64) {
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

        fn update_hud(&mut self) {
            for event in self.session.drain_ui_events() {
                match event {
                    UiEvent::ScoreChanged { total } => set_text("score", &total.to_string()),
                    UiEvent::HighScore { score } => set_text("high-score", &score.to_string()),
                    UiEvent::PerfectHit => {
                        set_class("perfect", "badge");
                        self.badge_until = js_sys::Date::now() + BADGE_MS;
                    }
                    UiEvent::GoldenHit => {
                        set_class("golden", "badge");
                        self.badge_until = js_sys::Date::now() + BADGE_MS;
                    }
                    UiEvent::GameOver { score } => {
                        set_text("final-score", &score.to_string());
                        set_class("game-over", "");
                    }
                }
            }

            if self.badge_until > 0.0 && js_sys::Date::now() > self.badge_until {
                set_class("perfect", "badge hidden");
                set_class("golden", "badge hidden");
                self.badge_until = 0.0;
            }

            if self.session.settings().show_fps {
                set_text("fps", &self.fps.to_string());
            }
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(id: &str, class: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn window_viewport() -> Viewport {
        let window = web_sys::window();
        let size = |v: Option<Result<JsValue, JsValue>>| v.and_then(|r| r.ok()).and_then(|j| j.as_f64());
        let default = Viewport::default();
        Viewport {
            width: size(window.as_ref().map(|w| w.inner_width())).map_or(default.width, |w| w as f32),
            height: size(window.as_ref().map(|w| w.inner_height())).map_or(default.height, |h| h as f32),
        }
    }

    fn open_storage() -> Box<dyn Storage> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(err) => {
                log::warn!("{err}; records will not be kept");
                Box::new(MemoryStorage::new())
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        log::info!("Stick Hero starting...");

        let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        let viewport = window_viewport();
        canvas.set_width(viewport.width as u32);
        canvas.set_height(viewport.height as u32);

        let backend = match canvas.get_context("2d")? {
            Some(ctx) => Some(CanvasBackend::new(ctx.dyn_into::<CanvasRenderingContext2d>()?)),
            None => {
                log::error!("No 2D context; running without rendering");
                None
            }
        };

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(Tuning::default(), viewport, seed, open_storage());
        set_text("high-score", &session.records().high_score().to_string());
        set_text("score", "0");
        if !session.settings().show_fps {
            set_class("fps-row", "small hidden");
        }

        let game = Rc::new_cyclic(|weak| {
            RefCell::new(Game {
                session,
                backend,
                frames: FrameLoop::new(RafScheduler { game: weak.clone() }),
                badge_until: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            })
        });

        setup_input_handlers(&canvas, game.clone());
        setup_restart_button(game.clone());
        setup_resize(canvas, game.clone());

        {
            let mut g = game.borrow_mut();
            let Game { session, backend, .. } = &mut *g;
            if let Some(backend) = backend {
                session.draw(js_sys::Date::now(), backend);
            }
            g.frames.start();
        }

        log::info!("Stick Hero running with seed {seed}");
        Ok(())
    }

    fn game_loop(game: &Rc<RefCell<Game>>, time: f64) {
        let mut g = game.borrow_mut();
        g.frames.on_fired();

        let Game { session, backend, .. } = &mut *g;
        let running = session.frame(time, backend.as_mut().map(|b| b as &mut dyn RenderBackend));

        g.track_fps(time);
        g.update_hud();

        if running {
            g.frames.start();
        } else {
            log::info!("Round settled; frame loop idle");
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        for pointer in PointerEvent::ALL {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                if pointer.is_touch() {
                    event.prevent_default();
                }
                game.borrow_mut().apply_signal(pointer.signal());
            });
            let _ = canvas
                .add_event_listener_with_callback(pointer.dom_name(), closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let Some(signal) = map_key(&event.key(), g.session.is_game_over()) else {
                    return;
                };
                event.prevent_default();
                g.apply_signal(signal);
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        if let Some(btn) = document().and_then(|d| d.get_element_by_id("restart-btn")) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().apply_signal(InputSignal::Restart);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let viewport = window_viewport();
            canvas.set_width(viewport.width as u32);
            canvas.set_height(viewport.height as u32);

            let mut g = game.borrow_mut();
            let Game { session, backend, .. } = &mut *g;
            session.resize(viewport);
            if let Some(backend) = backend {
                session.draw(js_sys::Date::now(), backend);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use stick_hero::persistence::MemoryStorage;
    use stick_hero::renderer::{RecordingBackend, RenderBackend};
    use stick_hero::sim::{GamePhase, Viewport};
    use stick_hero::{Session, Tuning};

    env_logger::init();

    let seed = std::env::args().nth(1).and_then(|s| s.parse().ok()).unwrap_or(42);
    let jumps: usize = std::env::args().nth(2).and_then(|s| s.parse().ok()).unwrap_or(5);
    log::info!("Stick Hero (headless) with seed {seed}, {jumps} jumps");

    let mut session = Session::new(
        Tuning::default(),
        Viewport::default(),
        seed,
        Box::new(MemoryStorage::new()),
    );
    let mut backend = RecordingBackend::new();
    let mut now = 0.0;
    let mut step = |session: &mut Session, backend: &mut RecordingBackend| {
        now += 16.0;
        session.frame(now, Some(backend as &mut dyn RenderBackend))
    };
    step(&mut session, &mut backend);

    // Frames are capped so a stuck round cannot spin forever
    const MAX_FRAMES: usize = 2_000;

    for jump in 0..jumps {
        let world = session.world();
        let Some(stick) = world.live_stick() else {
            break;
        };
        let Some(target) = world.platforms.iter().find(|p| p.x > stick.x) else {
            break;
        };
        let needed = target.center() - stick.x;

        session.press_start();
        for _ in 0..MAX_FRAMES {
            step(&mut session, &mut backend);
            if session.world().live_stick().is_some_and(|s| s.length >= needed) {
                break;
            }
        }
        session.press_end();

        for _ in 0..MAX_FRAMES {
            let running = step(&mut session, &mut backend);
            if session.world().phase == GamePhase::Waiting || !running {
                break;
            }
        }

        for event in session.drain_ui_events() {
            log::info!("Jump {}: {event:?}", jump + 1);
        }
        if session.is_game_over() {
            break;
        }
    }

    let records = session.records();
    println!(
        "Score {} | best {} | perfect jumps {} | longest stick {:.0}px | {} draw commands last frame",
        session.score(),
        records.high_score(),
        records.stats().perfect_jumps,
        records.stats().longest_stick,
        backend.cmds.len()
    );
}
