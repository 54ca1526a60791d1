//! Boss Arena entry point
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
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use boss_arena::hud::HudLabels;
    use boss_arena::renderer::{self, RenderState, Viewport};
    use boss_arena::sim::{GameState, TickInput, WeaponMode, tick};
    use boss_arena::tuning::Tuning;

    /// Directional keys currently held
    #[derive(Default)]
    struct HeldKeys {
        up: bool,
        down: bool,
        left: bool,
        right: bool,
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        keys: HeldKeys,
        /// Last pointer position in world coordinates
        pointer: Option<Vec2>,
        pointer_down: bool,
        // Key edges, consumed by the next tick
        pending_weapon: Option<WeaponMode>,
        pending_restart: bool,
        last_time: Option<f64>,
        /// Labels last written to the DOM
        hud: Option<HudLabels>,
    }

    impl Game {
        fn new(tuning: Tuning) -> Self {
            Self {
                state: GameState::new(tuning, 0.0),
                render_state: None,
                keys: HeldKeys::default(),
                pointer: None,
                pointer_down: false,
                pending_weapon: None,
                pending_restart: false,
                last_time: None,
                hud: None,
            }
        }

        /// Run one simulation tick at rAF time `time`
        fn update(&mut self, time: f64) {
            let dt_ms = match self.last_time {
                Some(last) => time - last,
                None => {
                    // Anchor the match clock to the first frame
                    let tuning = self.state.tuning.clone();
                    self.state = GameState::new(tuning, time);
                    0.0
                }
            };
            self.last_time = Some(time);

            let input = TickInput {
                now_ms: time,
                dt_ms,
                up: self.keys.up,
                down: self.keys.down,
                left: self.keys.left,
                right: self.keys.right,
                pointer: self.pointer,
                pointer_down: self.pointer_down,
                weapon: self.pending_weapon.take(),
                restart: std::mem::take(&mut self.pending_restart),
            };
            tick(&mut self.state, &input);

            for event in &self.state.events {
                log::debug!("{event:?}");
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = renderer::build(&self.state, time);
                match render_state.render(&vertices) {
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

        /// Update HUD elements in DOM
        fn update_hud(&mut self, document: &Document) {
            let labels = HudLabels::from_state(&self.state);
            if self.hud.as_ref() == Some(&labels) {
                return;
            }

            set_text(document, "hud-hp", &labels.hp);
            set_text(document, "hud-boss", &labels.boss_hp);
            set_text(document, "hud-weapon", &labels.weapon);
            set_text(document, "hud-shield", &labels.shield_hp);
            set_text(document, "hud-shield-status", &labels.shield_status);
            set_banner(document, "game-over", labels.game_over_banner);
            set_banner(document, "boss-down", labels.boss_down_banner);

            self.hud = Some(labels);
        }

        fn release_inputs(&mut self) {
            self.keys = HeldKeys::default();
            self.pointer_down = false;
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_banner(document: &Document, id: &str, banner: Option<&str>) {
        if let Some(el) = document.get_element_by_id(id) {
            match banner {
                Some(text) => {
                    el.set_text_content(Some(text));
                    let _ = el.set_attribute("class", "banner");
                }
                None => {
                    let _ = el.set_attribute("class", "banner hidden");
                }
            }
        }
    }

    /// Tuning overrides from a `?tuning=<json>` query parameter
    fn tuning_from_url(window: &web_sys::Window) -> Tuning {
        let json = window
            .location()
            .search()
            .ok()
            .and_then(|search| web_sys::UrlSearchParams::new_with_str(&search).ok())
            .and_then(|params| params.get("tuning"));
        Tuning::load_or_default(json.as_deref())
    }

    /// Canvas-space mouse position to world coordinates
    fn pointer_to_world(canvas: &HtmlCanvasElement, world: Vec2, event: &MouseEvent) -> Vec2 {
        let viewport = Viewport::new(
            canvas.client_width() as f32,
            canvas.client_height() as f32,
            world,
        );
        viewport.screen_to_world(Vec2::new(event.offset_x() as f32, event.offset_y() as f32))
    }

    /// Resize the backing store to the displayed size times the pixel ratio
    fn fit_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = ((canvas.client_width() as f64 * dpr) as u32).max(1);
        let height = ((canvas.client_height() as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger already set: {e}").into());
        }

        log::info!("Boss Arena starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let (width, height) = fit_canvas(&window, &canvas);

        let tuning = tuning_from_url(&window);
        let world = Vec2::new(tuning.arena.width, tuning.arena.height);
        let game = Rc::new(RefCell::new(Game::new(tuning)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {e}")))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {e}")))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, world)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to create device: {e}")))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&window, &canvas, game.clone());
        setup_restart_button(&document, game.clone());
        setup_resize(&window, &canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Boss Arena running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        // Mouse move - aim
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let world = Vec2::new(g.state.tuning.arena.width, g.state.tuning.arena.height);
                g.pointer = Some(pointer_to_world(&canvas_clone, world, &event));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - start firing
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut g = game.borrow_mut();
                let world = Vec2::new(g.state.tuning.arena.width, g.state.tuning.arena.height);
                g.pointer = Some(pointer_to_world(&canvas_clone, world, &event));
                g.pointer_down = true;
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - on the window so releasing outside the canvas still counts
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() == 0 {
                    game.borrow_mut().pointer_down = false;
                }
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().to_ascii_lowercase().as_str() {
                    "w" => g.keys.up = true,
                    "s" => g.keys.down = true,
                    "a" => g.keys.left = true,
                    "d" => g.keys.right = true,
                    "1" if !event.repeat() => g.pending_weapon = Some(WeaponMode::Asteroid),
                    "2" if !event.repeat() => g.pending_weapon = Some(WeaponMode::Meteora),
                    "r" if !event.repeat() => g.pending_restart = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().to_ascii_lowercase().as_str() {
                    "w" => g.keys.up = false,
                    "s" => g.keys.down = false,
                    "a" => g.keys.left = false,
                    "d" => g.keys.right = false,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur (click outside) - keyup/mouseup never arrive, drop held inputs
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().release_inputs();
                log::debug!("Inputs released (window blur)");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().pending_restart = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window_clone = window.clone();
        let canvas_clone = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = fit_canvas(&window_clone, &canvas_clone);
            if let Some(ref mut render_state) = game.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
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
            g.render(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Boss Arena failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Boss Arena (native) starting...");
    log::info!("Native mode runs a headless scripted match - build for wasm32 to play");

    // Optional tuning overrides: first argument is a JSON file
    let json = std::env::args().nth(1).and_then(|path| {
        std::fs::read_to_string(&path)
            .map_err(|e| log::warn!("Could not read tuning file {path}: {e}"))
            .ok()
    });
    let tuning = boss_arena::Tuning::load_or_default(json.as_deref());

    headless::run_scripted_match(tuning);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use boss_arena::hud::HudLabels;
    use boss_arena::sim::{GameEvent, GameState, TickInput, WeaponMode, tick};
    use boss_arena::tuning::Tuning;

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_MATCH_MS: f64 = 90_000.0;
    /// Strafe direction flips on this period
    const STRAFE_PERIOD_MS: f64 = 1500.0;
    /// Switch to METEORA once the boss drops below this fraction
    const METEORA_THRESHOLD: f32 = 0.5;

    /// Play a match with a simple bot: strafe under the boss while firing at it
    pub fn run_scripted_match(tuning: Tuning) {
        let mut state = GameState::new(tuning, 0.0);
        let mut now = 0.0;

        while now < MAX_MATCH_MS && !state.boss_defeated() && !state.is_game_over() {
            now += FRAME_MS;
            let strafe_right = (now / STRAFE_PERIOD_MS) as u64 % 2 == 0;
            let boss_fraction = state.boss.health as f32 / state.boss.max_health.max(1) as f32;

            let input = TickInput {
                now_ms: now,
                dt_ms: FRAME_MS,
                left: !strafe_right,
                right: strafe_right,
                pointer: Some(state.boss.pos),
                pointer_down: true,
                weapon: (boss_fraction < METEORA_THRESHOLD).then_some(WeaponMode::Meteora),
                ..Default::default()
            };
            tick(&mut state, &input);
            log_events(&state, now);
        }

        let hud = HudLabels::from_state(&state);
        log::info!(
            "Match finished after {:.1}s ({} ticks): {} | {} | {} | {}",
            state.time_ms / 1000.0,
            state.time_ticks,
            hud.hp,
            hud.boss_hp,
            hud.shield_hp,
            hud.weapon
        );
        if let Some(banner) = hud.game_over_banner.or(hud.boss_down_banner) {
            println!("{banner}");
        } else {
            println!("TIME UP");
        }
    }

    fn log_events(state: &GameState, now: f64) {
        for event in &state.events {
            match event {
                GameEvent::PlayerFired { .. } | GameEvent::BossFired => {
                    log::debug!("[{:>8.1}ms] {event:?}", now);
                }
                _ => log::info!("[{:>8.1}ms] {event:?}", now),
            }
        }
    }
}
