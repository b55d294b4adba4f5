use serde::Deserialize;
use fusion_engine::{AssetPool, FusionError, RoundRecord, MAX_SURFACE_DIMENSION};
use fusion_engine::assets::pool::{DEFAULT_ASSET_FILES, DEFAULT_ASSET_ROOT};

/// Shortest accepted highlight cadence, in seconds.
const MIN_PHASING_INTERVAL: f32 = 0.01;
const MAX_MOSAIC_CELLS: usize = 1024;
const MAX_SHARDS: usize = 256;

/// Game tuning. Every field is optional in JSON and falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Seconds spent scanning before the merge.
    pub scan_dwell: f32,
    /// Seconds the clue stays up before the sphere appears.
    pub clue_dwell: f32,
    /// Seconds of energy buildup between the split press and the reveal.
    pub split_dwell: f32,
    /// Seconds between two mosaic highlights.
    pub phasing_interval: f32,
    /// Seconds a mosaic highlight stays on.
    pub phasing_hold: f32,
    pub mosaic_cells: usize,
    pub shard_count: usize,
    /// Merge canvas height in pixels; width follows the image aspect ratio.
    pub surface_baseline: u32,
    pub asset_root: String,
    pub asset_files: Vec<String>,
    pub announcement: String,
    pub fallbacks: Fallbacks,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            scan_dwell: 4.0,
            clue_dwell: 5.0,
            split_dwell: 3.5,
            phasing_interval: 0.1,
            phasing_hold: 0.3,
            mosaic_cells: 150,
            shard_count: 15,
            surface_baseline: 600,
            asset_root: DEFAULT_ASSET_ROOT.to_string(),
            asset_files: DEFAULT_ASSET_FILES.iter().map(|s| s.to_string()).collect(),
            announcement: "Scanning infinite realities.".to_string(),
            fallbacks: Fallbacks::default(),
        }
    }
}

impl FusionConfig {
    /// Parse and validate. A rejected config leaves the caller's current one in place.
    pub fn from_json(json: &str) -> Result<Self, FusionError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FusionError> {
        let durations = [
            ("scan_dwell", self.scan_dwell),
            ("clue_dwell", self.clue_dwell),
            ("split_dwell", self.split_dwell),
            ("phasing_hold", self.phasing_hold),
        ];
        for (name, value) in durations {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{} must be a positive number of seconds, got {}", name, value)));
            }
        }
        if !(self.phasing_interval.is_finite() && self.phasing_interval >= MIN_PHASING_INTERVAL) {
            return Err(invalid(format!(
                "phasing_interval must be at least {} s, got {}",
                MIN_PHASING_INTERVAL, self.phasing_interval
            )));
        }
        if self.mosaic_cells > MAX_MOSAIC_CELLS {
            return Err(invalid(format!("mosaic_cells {} exceeds {}", self.mosaic_cells, MAX_MOSAIC_CELLS)));
        }
        if self.shard_count > MAX_SHARDS {
            return Err(invalid(format!("shard_count {} exceeds {}", self.shard_count, MAX_SHARDS)));
        }
        if self.surface_baseline == 0 || self.surface_baseline > MAX_SURFACE_DIMENSION {
            return Err(invalid(format!(
                "surface_baseline must be within 1..={}, got {}",
                MAX_SURFACE_DIMENSION, self.surface_baseline
            )));
        }
        Ok(())
    }

    pub fn asset_pool(&self) -> Result<AssetPool, FusionError> {
        AssetPool::new(self.asset_root.clone(), self.asset_files.clone())
    }
}

fn invalid(reason: String) -> FusionError {
    FusionError::Config(reason)
}

/// What to show when there is no round data, or a record lacks a field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Fallbacks {
    pub merged_image: String,
    pub left_image: String,
    pub right_image: String,
    pub left_label: String,
    pub right_label: String,
    /// Caption under the merged card, shown only for real round data.
    pub center_caption: String,
}

impl Default for Fallbacks {
    fn default() -> Self {
        Self {
            merged_image: "assets/preview-merged.jpg".to_string(),
            left_image: "assets/img001.jpg".to_string(),
            right_image: "assets/img002.jpg".to_string(),
            left_label: "HR".to_string(),
            right_label: "AI".to_string(),
            center_caption: "FUSION COMPLETE".to_string(),
        }
    }
}

/// A round with every fallback applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRound {
    pub merged_image: String,
    pub left_image: String,
    pub right_image: String,
    pub left_label: String,
    pub right_label: String,
    pub from_data: bool,
}

impl ResolvedRound {
    pub fn resolve(record: Option<&RoundRecord>, fallbacks: &Fallbacks) -> Self {
        let pick = |field: Option<&str>, fallback: &String| field.unwrap_or(fallback).to_string();
        Self {
            merged_image: pick(record.and_then(|r| r.merged_image()), &fallbacks.merged_image),
            left_image: pick(record.and_then(|r| r.left_image()), &fallbacks.left_image),
            right_image: pick(record.and_then(|r| r.right_image()), &fallbacks.right_image),
            left_label: pick(record.and_then(|r| r.left_text()), &fallbacks.left_label),
            right_label: pick(record.and_then(|r| r.right_text()), &fallbacks.right_label),
            from_data: record.is_some(),
        }
    }

    /// Riddle shown before the sphere, e.g. "HR X AI".
    pub fn clue(&self) -> String {
        format!("{} X {}", self.left_label, self.right_label)
    }
}
