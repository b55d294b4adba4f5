//! UI commands: everything the core asks the page to do.
//!
//! Commands are queued on the `EngineContext` during a tick and handed to the
//! host as a JSON array, one object per command tagged by `"op"`. Elements
//! serialize as the CSS selector the host passes to `querySelector`.

use serde::Serialize;
use super::screens::Screen;
use super::speech::Announcement;

/// Addressable page elements other than the four screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Element {
    #[serde(rename = ".floating-shards")]
    FloatingShards,
    #[serde(rename = "#mosaic-grid")]
    MosaicGrid,
    #[serde(rename = "#merge-canvas")]
    MergeCanvas,
    #[serde(rename = ".energy-sphere")]
    EnergySphere,
    #[serde(rename = "#sphere-wrapper")]
    SphereWrapper,
    #[serde(rename = "#merge-controls")]
    MergeControls,
    #[serde(rename = "#clue-overlay")]
    ClueOverlay,
    #[serde(rename = "#clue-text")]
    ClueText,
    #[serde(rename = "#split-btn")]
    SplitButton,
    #[serde(rename = "#split-container")]
    SplitContainer,
    #[serde(rename = "#split-left")]
    SplitLeft,
    #[serde(rename = "#split-right")]
    SplitRight,
    #[serde(rename = "#reveal-img-merged")]
    RevealMerged,
    #[serde(rename = "#reveal-img-a")]
    RevealImageLeft,
    #[serde(rename = "#reveal-img-b")]
    RevealImageRight,
    #[serde(rename = "#reveal-name-a")]
    RevealNameLeft,
    #[serde(rename = "#reveal-name-b")]
    RevealNameRight,
    #[serde(rename = ".center-card .hero-name")]
    RevealCenterName,
}

/// CSS classes the core toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiClass {
    Hidden,
    FadedOut,
    Infusing,
}

/// One floating decorative shard on the intro backdrop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shard {
    /// Horizontal position in viewport-width percent.
    pub left_vw: f32,
    /// Animation delay in seconds.
    pub delay_s: f32,
    /// Edge length in pixels (shards are square).
    pub size_px: f32,
    pub src: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum UiCommand {
    /// Make `screen` the only active panel.
    ShowScreen { screen: Screen },
    /// Replace the intro backdrop shards.
    SpawnShards { shards: Vec<Shard> },
    /// Replace the mosaic grid contents, one image per cell.
    FillMosaic { cells: Vec<String> },
    /// Toggle the transient highlight on one mosaic cell.
    SetPhasing { cell: usize, on: bool },
    SetText { element: Element, text: String },
    SetImage { element: Element, src: String },
    SetClass { element: Element, class: UiClass, on: bool },
    /// Set an inline style property. An empty value removes the override.
    SetStyle { element: Element, property: String, value: String },
    /// Load and decode an image, then answer through `game_image_loaded`/`game_image_failed`.
    LoadImage { request: u32, src: String },
    /// Resize the merge canvas element.
    ResizeSurface { width: u32, height: u32 },
    /// Paint the composited surface onto the merge canvas.
    PresentSurface { data_url: String },
    Speak { announcement: Announcement },
    /// Resume the (initially suspended) audio context. Sent once, on first interaction.
    ResumeAudio,
}

impl UiCommand {
    pub fn set_text(element: Element, text: impl Into<String>) -> Self {
        UiCommand::SetText { element, text: text.into() }
    }

    pub fn set_image(element: Element, src: impl Into<String>) -> Self {
        UiCommand::SetImage { element, src: src.into() }
    }

    pub fn add_class(element: Element, class: UiClass) -> Self {
        UiCommand::SetClass { element, class, on: true }
    }

    pub fn remove_class(element: Element, class: UiClass) -> Self {
        UiCommand::SetClass { element, class, on: false }
    }

    pub fn set_style(element: Element, property: &str, value: impl Into<String>) -> Self {
        UiCommand::SetStyle {
            element,
            property: property.to_string(),
            value: value.into(),
        }
    }
}
