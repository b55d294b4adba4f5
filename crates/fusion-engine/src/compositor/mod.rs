//! Single-image compositing onto a pixel surface, plus export as a `data:` URL.

pub mod pixels;
pub mod surface;
