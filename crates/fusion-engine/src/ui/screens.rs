use serde::Serialize;

/// The four top-level panels of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Screen {
    #[serde(rename = "intro-screen")]
    Intro,
    #[serde(rename = "selection-screen")]
    Selection,
    #[serde(rename = "merge-screen")]
    Merge,
    #[serde(rename = "reveal-screen")]
    Reveal,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Intro, Screen::Selection, Screen::Merge, Screen::Reveal];

    /// DOM id of the panel container.
    pub fn dom_id(self) -> &'static str {
        match self {
            Screen::Intro => "intro-screen",
            Screen::Selection => "selection-screen",
            Screen::Merge => "merge-screen",
            Screen::Reveal => "reveal-screen",
        }
    }
}

/// Finite-state registry of panels. Exactly one panel is active at any time.
#[derive(Debug, Clone)]
pub struct ScreenRegistry {
    active: Screen,
}

impl ScreenRegistry {
    /// The page loads with the intro panel showing.
    pub fn new() -> Self {
        Self {
            active: Screen::Intro,
        }
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    pub fn is_active(&self, screen: Screen) -> bool {
        self.active == screen
    }

    /// Activate `screen`, deactivating every other one.
    /// Returns false (and changes nothing) if it was already active.
    pub fn activate(&mut self, screen: Screen) -> bool {
        if self.active == screen {
            return false;
        }
        log::debug!("screen {} -> {}", self.active.dom_id(), screen.dom_id());
        self.active = screen;
        true
    }

    /// Active flag of every panel, in `Screen::ALL` order.
    pub fn states(&self) -> [(Screen, bool); 4] {
        Screen::ALL.map(|s| (s, s == self.active))
    }
}

impl Default for ScreenRegistry {
    fn default() -> Self {
        Self::new()
    }
}
