use wasm_bindgen::prelude::*;
use fusion_engine::*;

mod config;
mod game;
mod mosaic;
mod sequencer;
use game::FusionReveal;

fusion_web::export_game!(FusionReveal, "fusion-reveal");
