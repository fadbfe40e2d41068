//! Heart Catcher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use heart_catcher::Game;
    use heart_catcher::platform::{AssetTracker, Display};
    use heart_catcher::platform::input::client_to_arena_x;
    use heart_catcher::platform::web::{BrowserScheduler, WebHost, ids, load_images, load_tuning};
    use heart_catcher::renderer::canvas::CanvasRenderer;
    use heart_catcher::renderer::fit_canvas;
    use heart_catcher::scheduler::Wakeup;
    use heart_catcher::sim::GamePhase;

    /// Game plus the page it runs on
    struct App {
        game: Game<BrowserScheduler>,
        host: WebHost,
    }

    impl App {
        fn wake(&mut self, wakeup: Wakeup) {
            match wakeup {
                Wakeup::Spawn(kind) => {
                    self.game.on_spawn_timer(kind, &self.host);
                }
                Wakeup::Frame => {
                    self.game.frame(&mut self.host);
                }
            }
        }

        fn start(&mut self) {
            self.host.audio.resume();
            if let Err(e) = self.game.start(&mut self.host) {
                log::info!("Start refused: {}", e);
            }
        }

        /// Refit the canvas to the window
        fn resize(&self) {
            let Some(window) = web_sys::window() else { return };
            let Some(document) = window.document() else { return };

            let height_of = |selector: &str| -> f64 {
                document
                    .query_selector(selector)
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
                    .map(|el| f64::from(el.offset_height()))
                    .unwrap_or(0.0)
            };
            let chrome = height_of(&format!("#{}", ids::SCOREBOARD)) + height_of("h2");

            let viewport = (
                window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
                window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
            );
            let tuning = &self.game.session().tuning;
            let layout = fit_canvas(
                (tuning.arena_width, tuning.arena_height),
                viewport,
                chrome,
                window.device_pixel_ratio(),
            );
            self.host.renderer.apply_layout(&layout);
        }

        /// Client-space touch x → arena x
        fn touch_x(&self, event: &TouchEvent) -> Option<f32> {
            let touch = event.touches().get(0)?;
            let rect = self.host.renderer.canvas().get_bounding_client_rect();
            Some(client_to_arena_x(
                touch.client_x() as f32,
                rect.left() as f32,
                rect.width() as f32,
                self.game.session().tuning.arena_width,
            ))
        }
    }

    /// Route a wakeup to the app, ignoring it if the app is gone
    fn dispatch(app: &Weak<RefCell<App>>, wakeup: Wakeup) {
        let Some(app) = app.upgrade() else { return };
        match app.try_borrow_mut() {
            Ok(mut app) => app.wake(wakeup),
            Err(_) => log::warn!("Dropped {:?}: game busy", wakeup),
        };
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Heart Catcher starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(ids::CANVAS)
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = load_tuning(&document);
        let assets = AssetTracker::new();
        let images = load_images(&assets)?;
        let arena = (tuning.arena_width, tuning.arena_height);
        let renderer = CanvasRenderer::new(canvas.clone(), images, arena)
            .ok_or_else(|| JsValue::from_str("2D canvas context unavailable"))?;

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new_cyclic(|weak: &Weak<RefCell<App>>| {
            let weak = weak.clone();
            let scheduler = BrowserScheduler::new(
                window.clone(),
                Rc::new(move |wakeup: Wakeup| dispatch(&weak, wakeup)),
            );
            RefCell::new(App {
                game: Game::new(tuning, seed, scheduler),
                host: WebHost::new(window.clone(), document.clone(), assets, renderer),
            })
        });

        log::info!("Game initialized with seed: {}", seed);

        {
            let mut a = app.borrow_mut();
            a.resize();
            a.host.show_screen(GamePhase::Idle);
            let status = a.game.session().status_line();
            a.host.show_status(&status);
        }

        setup_buttons(&document, app.clone());
        setup_keyboard(&document, app.clone());
        setup_touch(&canvas, app.clone());
        setup_resize(&window, app);

        log::info!("Heart Catcher ready!");
        Ok(())
    }

    fn setup_buttons(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        for id in [ids::START_BUTTON, ids::RESTART_BUTTON] {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing #{}", id);
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                app.borrow_mut().start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_keyboard(document: &web_sys::Document, app: Rc<RefCell<App>>) {
        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().game.key(&event.key(), down);
            });
            let _ = document
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let passive = web_sys::AddEventListenerOptions::new();
        passive.set_passive(true);
        let active = web_sys::AddEventListenerOptions::new();
        active.set_passive(false);

        // Touch start
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut a = app.borrow_mut();
                if let Some(x) = a.touch_x(&event) {
                    a.game.touch_start(x);
                }
            });
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &passive,
            );
            closure.forget();
        }

        // Touch move - drag the player, keep the page from scrolling
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut a = app.borrow_mut();
                if a.game.phase() != GamePhase::Running {
                    return;
                }
                if let Some(x) = a.touch_x(&event) {
                    a.game.touch_move(x);
                    event.prevent_default();
                }
            });
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchmove",
                closure.as_ref().unchecked_ref(),
                &active,
            );
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                app.borrow_mut().game.touch_end();
            });
            let _ = canvas.add_event_listener_with_callback_and_add_event_listener_options(
                "touchend",
                closure.as_ref().unchecked_ref(),
                &passive,
            );
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, app: Rc<RefCell<App>>) {
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut()>::new(move || app.borrow().resize());
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Orientation change reports stale sizes until the next task
        {
            let closure = Closure::<dyn FnMut()>::new(move || {
                let app = app.clone();
                let deferred = Closure::once(move || app.borrow().resize());
                if let Some(window) = web_sys::window() {
                    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                        deferred.as_ref().unchecked_ref(),
                        0,
                    );
                }
                deferred.forget();
            });
            let _ = window.add_event_listener_with_callback(
                "orientationchange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    //! Native autopilot run of the game loop with a manual clock

    use heart_catcher::platform::{Asset, AssetReadiness, AssetTracker, Display, Feedback, Renderer};
    use heart_catcher::renderer::Sprite;
    use heart_catcher::scheduler::{ManualScheduler, Wakeup};
    use heart_catcher::sim::{FallingKind, GameEvent, GamePhase};
    use heart_catcher::{Game, Tuning};

    /// One display refresh at 60 Hz
    const FRAME_MS: u64 = 16;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Host that logs instead of drawing
    struct LogHost {
        assets: AssetTracker,
        catches: u32,
        hits: u32,
    }

    impl AssetReadiness for LogHost {
        fn is_loaded(&self, asset: Asset) -> bool {
            self.assets.is_loaded(asset)
        }
    }

    impl Feedback for LogHost {
        fn on_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::Collected => self.catches += 1,
                GameEvent::Hit => {
                    self.hits += 1;
                    log::debug!("Hit!");
                }
                GameEvent::GameOver { .. } => {}
            }
        }
    }

    impl Display for LogHost {
        fn show_status(&mut self, _status: &str) {}

        fn show_screen(&mut self, phase: GamePhase) {
            log::info!("Screen: {:?}", phase);
        }

        fn show_final_score(&mut self, score: u32) {
            log::info!("Final score: {}", score);
        }

        fn notify(&mut self, notice: &str) {
            log::warn!("{}", notice);
        }
    }

    impl Renderer for LogHost {
        fn draw(&mut self, _sprites: &[Sprite]) {}
    }

    /// Steer toward the lowest heart, away from mud directly overhead
    fn autopilot(game: &mut Game<ManualScheduler>) {
        let session = game.session();
        let player = session.store.player;
        let centre = player.pos.x + player.size.x / 2.0;

        let target = session
            .store
            .iter(FallingKind::Collectible)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|heart| heart.pos.x + heart.size / 2.0);
        let threat = session.store.iter(FallingKind::Hazard).any(|mud| {
            mud.pos.y > player.pos.y - 120.0
                && mud.pos.x < player.pos.x + player.size.x
                && mud.pos.x + mud.size > player.pos.x
        });

        let (left, right) = match target {
            // Run toward the roomier side
            _ if threat => {
                let mid = session.tuning.arena_width / 2.0;
                (centre > mid, centre <= mid)
            }
            Some(x) if x < centre - 4.0 => (true, false),
            Some(x) if x > centre + 4.0 => (false, true),
            _ => (false, false),
        };
        game.key("ArrowLeft", left);
        game.key("ArrowRight", right);
    }

    pub fn run(tuning: Tuning, seed: u64) {
        let mut host = LogHost {
            assets: AssetTracker::new(),
            catches: 0,
            hits: 0,
        };
        let mut game = Game::new(tuning, seed, ManualScheduler::new());

        // Too early: sprites still loading
        let _ = game.start(&mut host);
        for asset in Asset::ALL {
            host.assets.mark_loaded(asset);
        }
        if let Err(e) = game.start(&mut host) {
            log::error!("Could not start: {}", e);
            return;
        }

        let mut frames = 0;
        while game.phase() == GamePhase::Running && frames < MAX_FRAMES {
            for wakeup in game.scheduler_mut().advance(FRAME_MS) {
                if let Wakeup::Spawn(kind) = wakeup {
                    game.on_spawn_timer(kind, &host.assets);
                }
            }
            if game.scheduler_mut().take_frame_request() {
                autopilot(&mut game);
                game.frame(&mut host);
            }
            frames += 1;
        }

        println!(
            "Seed {}: {} after {:.1}s, {} hearts caught, {} mud hits",
            seed,
            game.session().status_line(),
            (frames * FRAME_MS) as f64 / 1000.0,
            host.catches,
            host.hits
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use heart_catcher::Tuning;

    env_logger::init();
    log::info!("Heart Catcher (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);

    headless::run(tuning, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
