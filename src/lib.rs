//! StarStory - scroll-driven star narrative in WASM

use wasm_bindgen::prelude::*;
use web_sys::console;

pub mod channels;
pub mod config;
pub mod constants;
pub mod engine;
pub mod math;
pub mod particle;
pub mod renderer;
pub mod sampler;
pub mod scroll;
pub mod story;

pub use channels::OutputChannels;
pub use config::{StoryConfig, Variant};
pub use constants::*;
pub use engine::StarStory;
pub use story::{StoryParams, CLASSIC, EXTENDED};

#[wasm_bindgen(start)]
pub fn main() {
    let mode = if RUNTIME_CONFIGURABLE {
        "configurable"
    } else {
        "release"
    };
    console::log_1(&format!("[StarStory] WASM loaded ({mode})").into());
}

#[wasm_bindgen]
pub fn is_runtime_configurable() -> bool {
    RUNTIME_CONFIGURABLE
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").into()
}
