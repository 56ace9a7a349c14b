//! Auto Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, EventTarget, HtmlCanvasElement, HtmlElement,
        HtmlImageElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use auto_rush::consts::*;
    use auto_rush::platform::assets;
    use auto_rush::platform::storage::LocalStorage;
    use auto_rush::platform::toast::Toast;
    use auto_rush::platform::{Controls, PageNotifier, RawInput, input};
    use auto_rush::renderer::{CanvasSurface, Sprites};
    use auto_rush::{PlatformError, Session, Settings};

    const CANVAS_ID: &str = "gameCanvas";
    const CONTAINER_ID: &str = "gameContainer";
    const TOUCH_AREA_ID: &str = "touchArea";
    const PAUSE_BUTTON_ID: &str = "pauseButton";
    const PLAY_BUTTON_ID: &str = "playButton";
    const BEST_ID: &str = "personalBest";
    const PICK_RIDE_SELECTOR: &str = ".pick-ride-button";

    /// Game instance holding all state
    struct Game {
        session: Session<LocalStorage, PageNotifier<Toast>>,
        surface: CanvasSurface,
        sprites: Sprites<HtmlImageElement>,
        /// Last synced control state, to avoid touching the DOM every frame
        controls: Option<Controls>,
        shown_best: Option<u32>,
    }

    impl Game {
        fn frame(&mut self, time: f64) {
            self.surface.begin_frame();
            self.session.frame(time, &self.sprites, &mut self.surface);
        }

        /// Sync page buttons and the best-score label with the session
        fn update_dom(&mut self, document: &Document) {
            let world = self.session.world();

            if self.shown_best != Some(world.personal_best) {
                if let Some(el) = document.get_element_by_id(BEST_ID) {
                    el.set_text_content(Some(&world.personal_best.to_string()));
                }
                self.shown_best = Some(world.personal_best);
            }

            let controls = Controls::for_phase(world.phase);
            if self.controls == Some(controls) {
                return;
            }
            if let Some(el) = html_element(document.get_element_by_id(PAUSE_BUTTON_ID)) {
                let visibility = if controls.pause_visible { "visible" } else { "hidden" };
                let _ = el.style().set_property("visibility", visibility);
                let _ = el.class_list().toggle_with_force("paused", controls.paused);
            }
            if let Some(el) = html_element(document.get_element_by_id(PLAY_BUTTON_ID)) {
                set_displayed(&el, controls.play_visible);
                el.set_text_content(Some(controls.play_label));
            }
            if let Some(el) = html_element(document.query_selector(PICK_RIDE_SELECTOR).ok().flatten()) {
                set_displayed(&el, controls.pick_ride_visible);
            }
            self.controls = Some(controls);
        }
    }

    fn html_element(el: Option<Element>) -> Option<HtmlElement> {
        el.and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn set_displayed(el: &HtmlElement, shown: bool) {
        let _ = el
            .style()
            .set_property("display", if shown { "block" } else { "none" });
    }

    pub fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Auto Rush starting...");

        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let document = window.document().ok_or(PlatformError::NoDocument)?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or(PlatformError::MissingElement(CANVAS_ID))?
            .dyn_into()
            .map_err(|_| PlatformError::WrongElementType(CANVAS_ID))?;
        canvas.set_width((CANVAS_WIDTH as f64 * RENDER_SCALE) as u32);
        canvas.set_height((CANVAS_HEIGHT as f64 * RENDER_SCALE) as u32);
        resize_canvas(&document, &canvas);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let notifier = PageNotifier::or_log(Toast::attach());
        let session = Session::new(&settings, LocalStorage::open()?, notifier, seed);
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            surface: CanvasSurface::new(&canvas)?,
            sprites: Sprites {
                vehicle: None,
                obstacles: assets::load_obstacles()?,
            },
            controls: None,
            shown_best: None,
        }));
        load_vehicle(&game);

        setup_resize(&document, &canvas)?;
        setup_keyboard(&document, game.clone())?;
        let touch_area: EventTarget = match document.get_element_by_id(TOUCH_AREA_ID) {
            Some(el) => el.into(),
            None => canvas.clone().into(),
        };
        setup_pointer(&touch_area, game.clone())?;
        setup_buttons(&document, game.clone())?;

        request_animation_frame(game);

        log::info!("Auto Rush running!");
        Ok(())
    }

    /// Load the selected vehicle; on failure fall back to the default and retry
    fn load_vehicle(game: &Rc<RefCell<Game>>) {
        let path = game.borrow().session.vehicle().asset_path();
        let retry = game.clone();
        let result = assets::load_image(&path, move || {
            let fallback = retry.borrow_mut().session.vehicle_load_failed();
            if fallback.is_some() {
                load_vehicle(&retry);
            }
        });
        match result {
            Ok(image) => game.borrow_mut().sprites.vehicle = Some(image),
            Err(e) => log::error!("Could not create vehicle image: {}", e),
        }
    }

    /// Fit the CSS size to the container; the backing store stays fixed
    fn resize_canvas(document: &Document, canvas: &HtmlCanvasElement) {
        let Some(container) = document.get_element_by_id(CONTAINER_ID) else {
            return;
        };
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", container.client_width()));
        let _ = style.set_property("height", &format!("{}px", container.client_height()));
    }

    fn listen<E: FromWasmAbi + 'static>(
        target: &EventTarget,
        event: &str,
        passive: bool,
        handler: impl FnMut(E) + 'static,
    ) -> Result<(), PlatformError> {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        closure.forget();
        Ok(())
    }

    fn setup_resize(document: &Document, canvas: &HtmlCanvasElement) -> Result<(), PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::NoWindow)?;
        let document = document.clone();
        let canvas = canvas.clone();
        listen(&window, "resize", true, move |_: web_sys::Event| {
            resize_canvas(&document, &canvas);
        })
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), PlatformError> {
        {
            let game = game.clone();
            listen(document, "keydown", false, move |event: KeyboardEvent| {
                let code = event.code();
                if code == input::SLIDE_KEY || code == input::PAUSE_KEY {
                    event.prevent_default();
                }
                game.borrow_mut().session.handle_raw(&RawInput::KeyDown {
                    code,
                    repeat: event.repeat(),
                });
            })?;
        }
        listen(document, "keyup", false, move |event: KeyboardEvent| {
            let code = event.code();
            if code == input::SLIDE_KEY {
                event.prevent_default();
            }
            game.borrow_mut().session.handle_raw(&RawInput::KeyUp { code });
        })
    }

    fn setup_pointer(target: &EventTarget, game: Rc<RefCell<Game>>) -> Result<(), PlatformError> {
        {
            let game = game.clone();
            listen(target, "touchstart", false, move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().session.handle_raw(&RawInput::PressStart);
            })?;
        }
        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            listen(target, name, false, move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().session.handle_raw(&RawInput::PressEnd);
            })?;
        }
        // Touch handlers call preventDefault, so these only fire for real mice
        {
            let game = game.clone();
            listen(target, "mousedown", true, move |_: MouseEvent| {
                game.borrow_mut().session.handle_raw(&RawInput::PressStart);
            })?;
        }
        listen(target, "mouseup", true, move |_: MouseEvent| {
            game.borrow_mut().session.handle_raw(&RawInput::PressEnd);
        })
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), PlatformError> {
        let buttons = [
            (PAUSE_BUTTON_ID, RawInput::PauseButton),
            (PLAY_BUTTON_ID, RawInput::PlayButton),
        ];
        for (id, raw) in buttons {
            let Some(button) = document.get_element_by_id(id) else {
                log::warn!("No #{} button on the page", id);
                continue;
            };
            let game = game.clone();
            listen(&button, "click", false, move |event: MouseEvent| {
                event.prevent_default();
                game.borrow_mut().session.handle_raw(&raw);
            })?;
        }
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.frame(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_dom(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Auto Rush failed to start: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use serde::Serialize;

    use auto_rush::consts::FRAME_INTERVAL_MS;
    use auto_rush::platform::{InputEvent, LogNotifier};
    use auto_rush::sim::{SessionPhase, World};
    use auto_rush::{MemoryStore, Session, Settings};

    /// Give up after ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub seed: u64,
        pub vehicle: &'static str,
        pub steps: u64,
        pub score: u32,
        pub personal_best: u32,
        pub vehicles_unlocked: bool,
        pub game_over: bool,
    }

    /// Slide away from the nearest obstacle ahead, otherwise hold mid-field
    fn wants_slide(world: &World) -> bool {
        let player = &world.player;
        let center = player.y + player.height / 2.0;
        let ahead = world
            .obstacles
            .iter()
            .filter(|o| o.trailing_edge() > player.x)
            .min_by(|a, b| a.x.total_cmp(&b.x));
        match ahead {
            Some(obstacle) => obstacle.y + obstacle.height / 2.0 > center,
            None => center > auto_rush::consts::CANVAS_HEIGHT / 2.0,
        }
    }

    pub fn run(seed: u64) -> RunSummary {
        let settings = Settings {
            start_immediately: true,
            ..Settings::default()
        };
        let mut session = Session::new(&settings, MemoryStore::new(), LogNotifier, seed);

        let mut sliding = false;
        for frame in 0..MAX_FRAMES {
            let want = wants_slide(session.world());
            if want != sliding {
                session.handle(if want {
                    InputEvent::SlideStart
                } else {
                    InputEvent::SlideEnd
                });
                sliding = want;
            }
            session.update(f64::from(frame) * FRAME_INTERVAL_MS);
            if session.world().phase == SessionPhase::GameOver {
                break;
            }
        }

        let world = session.world();
        RunSummary {
            seed,
            vehicle: session.vehicle().id,
            steps: world.steps,
            score: world.score,
            personal_best: session.prefs().personal_best(),
            vehicles_unlocked: session.prefs().all_unlocked(),
            game_over: world.phase == SessionPhase::GameOver,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Auto Rush (native) starting headless autopilot...");
    log::info!("Run with `trunk serve` for the playable web version");

    let seed = match std::env::args().nth(1).map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::warn!("Ignoring invalid seed: {}", e);
            42
        }
        None => 42,
    };

    let summary = autopilot::run(seed);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize run summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
