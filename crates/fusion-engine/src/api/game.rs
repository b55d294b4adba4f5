use crate::assets::images::ImageInbox;
use crate::assets::rounds::RoundStore;
use crate::audio::cues::AudioState;
use crate::core::rng::Rng;
use crate::error::FusionError;
use crate::input::queue::InputQueue;
use crate::ui::commands::UiCommand;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum number of sound events forwarded per frame (default: 32).
    pub max_sounds: usize,
    /// Seed for the engine RNG (decorative picks, blip pitches).
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_sounds: 32,
            seed: 42,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and emit the first UI commands.
    fn init(&mut self, ctx: &mut EngineContext);

    /// The game loop tick. Consume input, advance timers, emit commands.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Round data arrived from the host. A failed fetch arrives as an empty store.
    fn load_rounds(&mut self, _rounds: RoundStore) {}

    /// Game-specific tuning arrived from the host as JSON.
    fn load_config(&mut self, _json: &str) -> Result<(), FusionError> {
        Ok(())
    }

    /// Game-defined status code read by the host (e.g. the current phase).
    fn status(&self) -> u32 {
        0
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub audio: AudioState,
    pub ui: Vec<UiCommand>,
    pub images: ImageInbox,
    pub rng: Rng,
    dt: f32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::from_config(&GameConfig::default())
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            audio: AudioState::new(),
            ui: Vec::with_capacity(64),
            images: ImageInbox::new(),
            rng: Rng::new(config.seed),
            dt: config.fixed_dt,
        }
    }

    /// Length of one fixed step in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Queue a UI command for the host.
    pub fn emit_ui(&mut self, command: UiCommand) {
        self.ui.push(command);
    }

    /// Advance engine-owned systems by one fixed step.
    /// Called automatically by the game runner after `Game::update()`.
    pub fn tick_systems(&mut self) {
        self.audio.tick(self.dt, &mut self.rng);
    }

    /// Clear per-frame transient data (sound events).
    pub fn clear_frame_data(&mut self) {
        self.audio.clear_sounds();
    }

    /// Take every UI command queued since the last call.
    pub fn drain_ui(&mut self) -> Vec<UiCommand> {
        std::mem::take(&mut self.ui)
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
