//! Procedural audio: cue scheduling for the game loop and offline synthesis
//! of each cue into PCM samples for the host to play.

pub mod cues;
mod filter;
mod param;
pub mod synth;

pub use filter::Biquad;
pub use param::Param;
