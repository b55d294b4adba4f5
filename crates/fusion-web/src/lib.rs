pub mod runner;

pub use runner::GameRunner;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates `thread_local!` storage for the GameRunner, a `with_runner()`
/// helper, and the exports the page calls: lifecycle, button actions, data
/// loading, image delivery, command/sound draining and cue synthesis.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use fusion_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// fusion_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `fusion_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R: Default>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => f(runner),
                None => {
                    log::error!("{}: call game_init() first", $game_name);
                    R::default()
                }
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick(dt: f32) {
            with_runner(|r| r.tick(dt));
        }

        // ---- Buttons ----

        #[wasm_bindgen]
        pub fn game_start() {
            with_runner(|r| r.push_input(InputEvent::Action(Action::Start)));
        }

        #[wasm_bindgen]
        pub fn game_split() {
            with_runner(|r| r.push_input(InputEvent::Action(Action::Split)));
        }

        #[wasm_bindgen]
        pub fn game_reset() {
            with_runner(|r| r.push_input(InputEvent::Action(Action::Reset)));
        }

        #[wasm_bindgen]
        pub fn game_hover() {
            with_runner(|r| r.push_input(InputEvent::Hover));
        }

        // ---- Data ----

        #[wasm_bindgen]
        pub fn game_load_rounds(json: &str) {
            with_runner(|r| r.load_rounds(json));
        }

        #[wasm_bindgen]
        pub fn game_load_config(json: &str) {
            with_runner(|r| r.load_config(json));
        }

        #[wasm_bindgen]
        pub fn game_image_loaded(request: u32, width: u32, height: u32, rgba: Vec<u8>) {
            with_runner(|r| r.image_loaded(request, width, height, rgba));
        }

        #[wasm_bindgen]
        pub fn game_image_failed(request: u32) {
            with_runner(|r| r.image_failed(request));
        }

        // ---- Output ----

        #[wasm_bindgen]
        pub fn take_ui_commands() -> String {
            RUNNER.with(|cell| match cell.borrow_mut().as_mut() {
                Some(runner) => runner.take_ui_json(),
                None => "[]".to_string(),
            })
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const f32 {
            RUNNER.with(|cell| match cell.borrow().as_ref() {
                Some(runner) => runner.sound_events_ptr(),
                None => std::ptr::null(),
            })
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_status() -> u32 {
            with_runner(|r| r.status())
        }

        #[wasm_bindgen]
        pub fn get_fixed_dt() -> f32 {
            with_runner(|r| r.fixed_dt())
        }

        // ---- Audio & speech helpers ----

        /// Synthesize a cue into mono samples for an AudioBuffer.
        #[wasm_bindgen]
        pub fn render_cue(cue: u32, param: f32, sample_rate: f32) -> Vec<f32> {
            match CueKind::from_u32(cue) {
                Some(kind) => {
                    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
                    fusion_engine::render_cue(kind, param, sample_rate, seed)
                }
                None => {
                    log::warn!("render_cue: unknown cue id {}", cue);
                    Vec::new()
                }
            }
        }

        /// Index of the preferred voice among `names_json`, or -1 to keep the default.
        #[wasm_bindgen]
        pub fn select_voice(names_json: &str, hints_json: &str) -> i32 {
            let names: Vec<String> = serde_json::from_str(names_json).unwrap_or_default();
            let hints: Vec<String> = serde_json::from_str(hints_json).unwrap_or_default();
            fusion_engine::select_voice(&names, &hints)
                .map(|i| i as i32)
                .unwrap_or(-1)
        }
    };
}
