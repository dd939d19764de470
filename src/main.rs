//! Lava Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlInputElement, KeyboardEvent};

    use lava_dodge::audio::{AudioManager, SoundEffect};
    use lava_dodge::input::{Action, KeyState};
    use lava_dodge::persistence::LocalStorage;
    use lava_dodge::sim::{GameSession, tick};
    use lava_dodge::ui::{GameOverSummary, Hud, RenderSnapshot};
    use lava_dodge::{BestTime, Settings, Tuning, platform};

    // The 3D scene lives on the JS side; hand it positions each frame
    #[wasm_bindgen(inline_js = "
        export function render_scene(json) {
            if (typeof window.lavaDodgeRender === 'function') {
                window.lavaDodgeRender(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn render_scene(json: &str);
    }

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        keys: KeyState,
        settings: Settings,
        storage: LocalStorage,
        audio: AudioManager,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let storage = LocalStorage::new();
            let settings = Settings::load(&storage);
            let best = BestTime::load(&storage);
            let tuning = Tuning::load(&storage);
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                session: GameSession::new(tuning, best, seed),
                keys: KeyState::new(),
                settings,
                storage,
                audio,
            }
        }

        fn save_settings(&mut self) {
            self.settings.save(&mut self.storage);
        }

        /// Route session events to audio, storage and dialogs
        fn handle_events(&mut self, document: &Document) {
            for event in self.session.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                let Some(summary) = GameOverSummary::from_event(&event) else {
                    continue;
                };
                if summary.new_record {
                    self.session.best.save(&mut self.storage);
                }
                if let Some(el) = document.query_selector("#gameover p#stats").ok().flatten() {
                    el.set_inner_html(&summary.html());
                }
                show_dialog(document, "gameover");
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document, now_ms: f64) {
            let hud = Hud::from_session(&self.session, now_ms);
            let Some(gui) = html_element(document, "div#gui") else {
                return;
            };
            if !hud.visible {
                let _ = gui.style().set_property("display", "none");
                return;
            }
            let _ = gui.style().remove_property("display");

            if let Some(stats) = gui.query_selector("#stats").ok().flatten() {
                stats.set_inner_html(&hud.stats_html());
            }
            if let Some(pause) = gui.query_selector("#pause").ok().flatten() {
                pause.set_inner_html(&format!("<img src=\"{}\">", hud.pause_icon()));
            }
        }
    }

    fn html_element(document: &Document, selector: &str) -> Option<HtmlElement> {
        document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn show_dialog(document: &Document, id: &str) {
        if let Some(dialog) = html_element(document, &format!("dialog#{id}")) {
            let _ = dialog.style().set_property("display", "flex");
        }
    }

    fn hide_dialog(document: &Document, id: &str) {
        if let Some(dialog) = html_element(document, &format!("dialog#{id}")) {
            let _ = dialog.style().set_property("display", "none");
        }
    }

    /// Attach a click handler to `selector` inside `dialog#id`
    fn on_dialog_click(
        document: &Document,
        id: &str,
        selector: &str,
        handler: impl FnMut(web_sys::MouseEvent) + 'static,
    ) {
        let button = document
            .query_selector(&format!("dialog#{id} {selector}"))
            .ok()
            .flatten();
        let Some(button) = button else {
            log::warn!("Missing button {selector} in dialog {id}");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Lava Dodge starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document - cannot start");
            return;
        };

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(game.clone());
        setup_focus_pause(game.clone());
        setup_pause_button(&document, game.clone());
        setup_dialogs(&document, game.clone());
        setup_settings_inputs(&document, game.clone());
        setup_audio_unlock(&document, game.clone());
        if platform::has_touch() {
            setup_touch_controls(&document, game.clone());
        }

        show_dialog(&document, "start");

        // Start game loop
        request_animation_frame(game);

        log::info!("Lava Dodge running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_down(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Window blur (tab switch, click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.session.blur(platform::now_ms());
                // Key-ups are not delivered while unfocused
                g.keys.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().session.focus(platform::now_ms());
            });
            let _ = window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_pause_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(button) = document.query_selector("div#gui #pause").ok().flatten() else {
            log::warn!("Missing pause button");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().session.toggle_pause(platform::now_ms());
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_dialogs(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let doc = document.clone();
            on_dialog_click(document, "start", "button#start", move |_| {
                hide_dialog(&doc, "start");
                game.borrow_mut().session.start(platform::now_ms());
            });
        }
        {
            let doc = document.clone();
            on_dialog_click(document, "start", "button#settings", move |_| {
                hide_dialog(&doc, "start");
                show_dialog(&doc, "settings");
            });
        }
        {
            let doc = document.clone();
            on_dialog_click(document, "start", "button#tutorial", move |_| {
                hide_dialog(&doc, "start");
                show_dialog(&doc, "tutorial");
            });
        }
        {
            let doc = document.clone();
            on_dialog_click(document, "tutorial", "button#back", move |_| {
                hide_dialog(&doc, "tutorial");
                show_dialog(&doc, "start");
            });
        }
        {
            let game = game.clone();
            let doc = document.clone();
            on_dialog_click(document, "settings", "button#back", move |_| {
                hide_dialog(&doc, "settings");
                show_dialog(&doc, "start");
                game.borrow_mut().save_settings();
            });
        }
        {
            let game = game.clone();
            let doc = document.clone();
            on_dialog_click(document, "gameover", "button#restart", move |_| {
                hide_dialog(&doc, "gameover");
                game.borrow_mut().session.restart(platform::now_ms());
            });
        }
        {
            let doc = document.clone();
            on_dialog_click(document, "gameover", "button#menu", move |_| {
                hide_dialog(&doc, "gameover");
                game.borrow_mut().session.return_to_menu();
                show_dialog(&doc, "start");
            });
        }
    }

    fn setup_settings_inputs(document: &Document, game: Rc<RefCell<Game>>) {
        let input = |selector: &str| {
            document
                .query_selector(&format!("dialog#settings {selector}"))
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        };

        if let Some(smoothness) = input("#camerasmoothness") {
            smoothness.set_value(&game.borrow().settings.camera_smoothness.to_string());
            let game = game.clone();
            let el = smoothness.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                match el.value().parse::<f32>() {
                    Ok(value) => g.settings.set_camera_smoothness(value),
                    Err(_) => log::warn!("Ignoring camera smoothness {:?}", el.value()),
                }
                g.save_settings();
            });
            let _ = smoothness
                .add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(music) = input("#musicenable") {
            music.set_checked(game.borrow().settings.music_enabled);
            let game = game.clone();
            let el = music.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.settings.music_enabled = el.checked();
                let settings = g.settings.clone();
                g.audio.apply_settings(&settings);
                g.save_settings();
            });
            let _ = music.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(sfx) = input("#sfxenable") {
            sfx.set_checked(game.borrow().settings.sfx_enabled);
            let el = sfx.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut g = game.borrow_mut();
                g.settings.sfx_enabled = el.checked();
                let settings = g.settings.clone();
                g.audio.apply_settings(&settings);
                g.save_settings();
            });
            let _ = sfx.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Browsers only allow playback after a gesture; retry music on first click
    fn setup_audio_unlock(document: &Document, game: Rc<RefCell<Game>>) {
        let closure = Closure::once(move |_event: web_sys::MouseEvent| {
            game.borrow().audio.unlock();
        });
        let options = web_sys::AddEventListenerOptions::new();
        options.set_once(true);
        let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
            "click",
            closure.as_ref().unchecked_ref(),
            &options,
        );
        closure.forget();
    }

    fn setup_touch_controls(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(controls) = html_element(document, "#mobilecontrols") else {
            return;
        };
        let _ = controls.style().set_property("display", "flex");

        for (selector, action) in [("#left", Action::Left), ("#right", Action::Right), ("#up", Action::Jump)] {
            let Some(button) = controls.query_selector(selector).ok().flatten() else {
                continue;
            };
            for (event_name, held) in [("touchstart", true), ("touchend", false), ("touchcancel", false)] {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                    if event_name != "touchcancel" {
                        event.prevent_default();
                    }
                    game.borrow_mut().keys.set(action, held);
                });
                let _ = button
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let mut g = game.borrow_mut();
            let input = g.keys.snapshot();
            let settings = g.settings.clone();

            tick(&mut g.session, &input, time, &settings);
            g.handle_events(&document);
            g.update_hud(&document, time);
            render_scene(&RenderSnapshot::from_session(&g.session).to_json());
        }

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
    log::info!("Lava Dodge (native) starting...");
    log::info!("Native mode runs a headless session - serve the wasm build for the playable game");

    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session at a fixed 60 FPS, for smoke-testing the core natively.
/// An optional first argument names a JSON file of tuning overrides.
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use lava_dodge::persistence::MemoryStorage;
    use lava_dodge::sim::{GameEvent, GamePhase, GameSession, tick};
    use lava_dodge::ui::Hud;
    use lava_dodge::{BestTime, Settings, Tuning, platform};

    /// Give up after this much simulated time
    const MAX_RUN_MS: f64 = 120_000.0;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run() {
        let mut storage = MemoryStorage::new();
        let settings = Settings::load(&storage);
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let wall_start = platform::now_ms();
        let tuning = match std::env::args().nth(1) {
            Some(path) => match std::fs::read_to_string(&path) {
                Ok(json) => Tuning::from_json(&json),
                Err(e) => {
                    log::warn!("Cannot read tuning file {path}: {e}");
                    Tuning::load(&storage)
                }
            },
            None => Tuning::load(&storage),
        };
        let mut session = GameSession::new(tuning, BestTime::load(&storage), seed);
        let mut keys = lava_dodge::input::KeyState::new();

        session.start(0.0);
        let mut now = 0.0;
        while session.phase == GamePhase::Playing && now < MAX_RUN_MS {
            now += FRAME_MS;
            steer(&session, &mut keys);
            tick(&mut session, &keys.snapshot(), now, &settings);

            for event in session.drain_events() {
                match event {
                    GameEvent::BonusCollected { total } => log::info!("Collected bonus #{total}"),
                    GameEvent::GameOver { new_record: true, .. } => {
                        session.best.save(&mut storage);
                    }
                    _ => {}
                }
            }
        }

        log::info!(
            "Simulated {:.0} frames in {:.1}ms (seed {})",
            now / FRAME_MS,
            platform::now_ms() - wall_start,
            seed
        );

        let hud = Hud::from_session(&session, now);
        println!(
            "Survived {:.1}s, collected {}, spawn interval {:.2}s, best {:.1}s",
            session.elapsed_secs(now),
            hud.collected,
            hud.spawn_interval_secs,
            session.best.secs()
        );
    }

    /// Naive autopilot: run away from the nearest hazard above
    fn steer(session: &GameSession, keys: &mut lava_dodge::input::KeyState) {
        use lava_dodge::input::Action;
        use lava_dodge::sim::FallingKind;

        let player = session.player.pos;
        let threat = session
            .entities
            .iter()
            .filter(|e| e.kind == FallingKind::Hazard && e.pos.y > player.y)
            .filter(|e| (e.pos.x - player.x).abs() < 1.5)
            .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

        keys.release_all();
        if let Some(threat) = threat {
            let flee_right = threat.pos.x <= player.x;
            let action = if flee_right { Action::Right } else { Action::Left };
            keys.set(action, true);
        }
    }
}
