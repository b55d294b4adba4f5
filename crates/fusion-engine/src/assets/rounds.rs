use serde::{Deserialize, Serialize};
use crate::error::FusionError;

/// One round of content: a fused image, the two source images and their labels.
///
/// The JSON keys are matched verbatim against the existing `game_data.json`,
/// spelling included. Any field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    #[serde(rename = "split the indenties image", default, skip_serializing_if = "Option::is_none")]
    pub merged_image: Option<String>,
    #[serde(rename = "qleft image", default, skip_serializing_if = "Option::is_none")]
    pub left_image: Option<String>,
    #[serde(rename = "right image", default, skip_serializing_if = "Option::is_none")]
    pub right_image: Option<String>,
    #[serde(rename = "left text", default, skip_serializing_if = "Option::is_none")]
    pub left_text: Option<String>,
    #[serde(rename = "right text", default, skip_serializing_if = "Option::is_none")]
    pub right_text: Option<String>,
}

/// Empty strings count as missing.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl RoundRecord {
    pub fn merged_image(&self) -> Option<&str> {
        present(&self.merged_image)
    }

    pub fn left_image(&self) -> Option<&str> {
        present(&self.left_image)
    }

    pub fn right_image(&self) -> Option<&str> {
        present(&self.right_image)
    }

    pub fn left_text(&self) -> Option<&str> {
        present(&self.left_text)
    }

    pub fn right_text(&self) -> Option<&str> {
        present(&self.right_text)
    }
}

/// Ordered, immutable list of rounds with a sequential cursor.
#[derive(Debug, Clone, Default)]
pub struct RoundStore {
    rounds: Vec<RoundRecord>,
    index: usize,
}

impl RoundStore {
    pub fn new(rounds: Vec<RoundRecord>) -> Self {
        Self { rounds, index: 0 }
    }

    /// Parse the round data file (a JSON array of records).
    pub fn from_json(json: &str) -> Result<Self, FusionError> {
        let rounds: Vec<RoundRecord> = serde_json::from_str(json)?;
        Ok(Self::new(rounds))
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// The round selected for the next play-through, if any data was loaded.
    pub fn current(&self) -> Option<&RoundRecord> {
        self.rounds.get(self.index)
    }

    /// Move to the next round, wrapping. With fewer than two rounds the index stays 0.
    pub fn advance(&mut self) -> usize {
        self.index = if self.rounds.len() > 1 {
            (self.index + 1) % self.rounds.len()
        } else {
            0
        };
        self.index
    }
}
