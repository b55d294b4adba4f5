use fusion_engine::{
    Game, GameConfig, EngineContext, InputEvent, InputQueue, FixedTimestep,
    ImageRequest, ImageResult, RoundStore, SoundEvent, UiCommand,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    timestep: FixedTimestep,
    config: GameConfig,
    initialized: bool,
    /// This frame's sound events, capped at `config.max_sounds`.
    sound_buffer: Vec<SoundEvent>,
    /// UI commands not yet collected by the host.
    pending_ui: Vec<UiCommand>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::from_config(&config),
            input: InputQueue::new(),
            timestep,
            config,
            initialized: false,
            sound_buffer,
            pending_ui: Vec::new(),
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.game.init(&mut self.ctx);
        self.pending_ui.extend(self.ctx.drain_ui());
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: fixed-step updates, then collect sounds and UI commands.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.game.update(&mut self.ctx, &self.input);
            self.ctx.tick_systems();
            // Input is seen by the first step only.
            self.input.drain();
        }

        self.sound_buffer.clear();
        let sounds = self.ctx.audio.sounds();
        if sounds.len() > self.config.max_sounds {
            log::warn!(
                "dropping {} sound events over the per-frame cap of {}",
                sounds.len() - self.config.max_sounds,
                self.config.max_sounds
            );
        }
        self.sound_buffer
            .extend(sounds.iter().take(self.config.max_sounds).copied());

        self.pending_ui.extend(self.ctx.drain_ui());
    }

    /// Hand parsed round data to the game. Unreadable data leaves the game with no rounds.
    pub fn load_rounds(&mut self, json: &str) {
        let store = match RoundStore::from_json(json) {
            Ok(store) => {
                log::info!("loaded {} rounds", store.len());
                store
            }
            Err(e) => {
                log::error!("failed to load round data: {}", e);
                RoundStore::default()
            }
        };
        self.game.load_rounds(store);
    }

    pub fn load_config(&mut self, json: &str) {
        if let Err(e) = self.game.load_config(json) {
            log::warn!("ignoring game config: {}", e);
        }
    }

    /// Deliver decoded pixels for an image request. A malformed buffer counts as a failed load.
    pub fn image_loaded(&mut self, request: u32, width: u32, height: u32, rgba: Vec<u8>) {
        let result = match fusion_engine::rgba_from_raw(width, height, rgba) {
            Ok(image) => ImageResult::Loaded(image),
            Err(e) => {
                log::warn!("image request {}: {}", request, e);
                ImageResult::Failed
            }
        };
        self.ctx.images.deliver(ImageRequest(request), result);
    }

    pub fn image_failed(&mut self, request: u32) {
        log::warn!("image request {} failed to load", request);
        self.ctx.images.deliver(ImageRequest(request), ImageResult::Failed);
    }

    /// Collect queued UI commands as a JSON array.
    pub fn take_ui_json(&mut self) -> String {
        let commands = std::mem::take(&mut self.pending_ui);
        match serde_json::to_string(&commands) {
            Ok(json) => json,
            Err(e) => {
                log::error!("failed to encode {} UI commands: {}", commands.len(), e);
                "[]".to_string()
            }
        }
    }

    // ---- Accessors for the host ----

    pub fn sound_events_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<SoundEvent, f32>(&self.sound_buffer).as_ptr()
    }

    /// Number of sound events (each `SoundEvent::FLOATS` floats).
    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn sound_events(&self) -> &[SoundEvent] {
        &self.sound_buffer
    }

    pub fn status(&self) -> u32 {
        self.game.status()
    }

    pub fn fixed_dt(&self) -> f32 {
        self.config.fixed_dt
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }
}
