use serde::{Deserialize, Serialize};

/// A text-to-speech request. Hosts without speech support drop it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Announcement {
    pub text: String,
    pub pitch: f32,
    pub rate: f32,
    /// Lowercase fragments; the first voice whose name contains one is preferred.
    pub voice_hints: Vec<String>,
}

impl Announcement {
    /// Robotic read-out used while scanning.
    pub fn robotic(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            pitch: 0.6,
            rate: 1.0,
            voice_hints: vec!["google".to_string(), "zira".to_string()],
        }
    }
}

/// Index of the first voice name matching any hint, case-insensitively.
pub fn select_voice<S: AsRef<str>>(names: &[S], hints: &[String]) -> Option<usize> {
    names.iter().position(|name| {
        let name = name.as_ref().to_lowercase();
        hints.iter().any(|hint| name.contains(&hint.to_lowercase()))
    })
}
