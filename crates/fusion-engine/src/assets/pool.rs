use crate::core::rng::Rng;
use crate::error::FusionError;

/// Files shipped in the asset folder, used for decorative visuals.
pub const DEFAULT_ASSET_FILES: &[&str] = &[
    "gaurav.jpeg",
    "img001.jpeg",
    "img002.jpg",
    "preview-merged.jpeg",
    "shailesh+gaurav.jpeg",
    "shailesh.jpeg",
    "sudheer+tarun.jpeg",
    "sudheer.jpeg",
    "tarun.jpeg",
];

pub const DEFAULT_ASSET_ROOT: &str = "assets/";

/// Fixed, non-empty pool of decorative images under a common root.
#[derive(Debug, Clone)]
pub struct AssetPool {
    root: String,
    files: Vec<String>,
}

impl AssetPool {
    pub fn new(root: impl Into<String>, files: Vec<String>) -> Result<Self, FusionError> {
        if files.is_empty() {
            return Err(FusionError::EmptyPool);
        }
        Ok(Self {
            root: root.into(),
            files,
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Resolve a filename against the pool root.
    pub fn path(&self, file: &str) -> String {
        format!("{}{}", self.root, file)
    }

    /// A random image path from the pool.
    pub fn pick(&self, rng: &mut Rng) -> String {
        match rng.pick(&self.files) {
            Some(file) => self.path(file),
            None => self.root.clone(),
        }
    }
}

impl Default for AssetPool {
    fn default() -> Self {
        Self {
            root: DEFAULT_ASSET_ROOT.to_string(),
            files: DEFAULT_ASSET_FILES.iter().map(|s| s.to_string()).collect(),
        }
    }
}
