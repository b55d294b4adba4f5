use std::collections::HashMap;
use crate::compositor::pixels::{blank, RgbaImage};

/// Handle for an image load the host was asked to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageRequest(pub u32);

/// Outcome of an asynchronous image load.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageResult {
    Loaded(RgbaImage),
    Failed,
}

impl ImageResult {
    /// Failed loads behave like an image with no pixels.
    pub fn into_image(self) -> RgbaImage {
        match self {
            ImageResult::Loaded(image) => image,
            ImageResult::Failed => blank(),
        }
    }
}

/// One-shot mailbox for image loads.
/// The game opens a request, the host delivers the decoded pixels (or a failure)
/// some frames later, and the game takes the result exactly once.
#[derive(Debug, Default)]
pub struct ImageInbox {
    next_id: u32,
    pending: HashMap<ImageRequest, Option<ImageResult>>,
}

impl ImageInbox {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            pending: HashMap::new(),
        }
    }

    /// Open a new request.
    pub fn request(&mut self) -> ImageRequest {
        let id = ImageRequest(self.next_id.max(1));
        self.next_id = id.0.wrapping_add(1);
        self.pending.insert(id, None);
        id
    }

    /// Deliver the result of a request. Unknown or already-answered requests are ignored.
    pub fn deliver(&mut self, request: ImageRequest, result: ImageResult) -> bool {
        match self.pending.get_mut(&request) {
            Some(slot) if slot.is_none() => {
                *slot = Some(result);
                true
            }
            Some(_) => {
                log::debug!("image request {} answered twice", request.0);
                false
            }
            None => {
                log::debug!("image request {} is not pending", request.0);
                false
            }
        }
    }

    /// Take the result if it has arrived. Closes the request.
    pub fn take(&mut self, request: ImageRequest) -> Option<ImageResult> {
        if matches!(self.pending.get(&request), Some(Some(_))) {
            return self.pending.remove(&request).flatten();
        }
        None
    }
}
