use thiserror::Error;

/// Errors raised at the data boundaries of the engine.
/// None of them is fatal to the game flow; callers log and fall back.
#[derive(Debug, Error)]
pub enum FusionError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pixel buffer holds {actual} bytes, expected {expected} for a {width}x{height} RGBA image")]
    ImageSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("asset pool must list at least one image")]
    EmptyPool,

    #[error("failed to encode surface: {0}")]
    Encode(#[from] image::ImageError),

    #[error("invalid config: {0}")]
    Config(String),
}
