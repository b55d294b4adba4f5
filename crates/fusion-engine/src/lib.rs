pub mod api;
pub mod core;
pub mod input;
pub mod assets;
pub mod ui;
pub mod audio;
pub mod compositor;
pub mod error;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{CueKind, SoundEvent};
pub use core::time::{FixedTimestep, Countdown, Interval};
pub use core::rng::Rng;
pub use input::queue::{Action, InputEvent, InputQueue};
pub use assets::rounds::{RoundRecord, RoundStore};
pub use assets::pool::AssetPool;
pub use assets::images::{ImageInbox, ImageRequest, ImageResult};
pub use ui::screens::{Screen, ScreenRegistry};
pub use ui::commands::{Element, UiClass, UiCommand, Shard};
pub use ui::speech::{Announcement, select_voice};
pub use audio::cues::{AudioCues, AudioState, ScanLoop};
pub use audio::synth::{render_cue, Waveform};
pub use compositor::pixels::{RgbaImage, rgba_from_raw};
pub use compositor::surface::{Surface, fit_to_baseline, MAX_SURFACE_DIMENSION};
pub use error::FusionError;
