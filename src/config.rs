//! Story configuration

use crate::constants::*;
use wasm_bindgen::prelude::*;

/// Which narrative table drives the animation.
#[wasm_bindgen]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Classic,
    Extended,
}

#[wasm_bindgen]
#[derive(Clone, Copy, Debug)]
pub struct StoryConfig {
    pub star_count_desktop: u32,
    pub star_count_mobile: u32,
    pub tail_len: u32,
    pub dpr_cap: f64,
    /// Seed for sampling/initialization randomness; 0 means seed from the
    /// clock at startup.
    pub seed: u32,
    pub variant: Variant,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            star_count_desktop: STAR_COUNT_DESKTOP as u32,
            star_count_mobile: STAR_COUNT_MOBILE as u32,
            tail_len: TAIL_CAP as u32,
            dpr_cap: DPR_CAP,
            seed: 0,
            variant: Variant::Classic,
        }
    }
}

#[wasm_bindgen]
impl StoryConfig {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoryConfig {
    pub fn from_js(value: JsValue) -> Self {
        let mut config = Self::default();

        if !value.is_object() {
            if let Some(count) = value.as_f64() {
                config.star_count_desktop = count as u32;
            }
            return config;
        }

        macro_rules! extract {
            ($field:ident, $key:expr, $ty:ty) => {
                if let Ok(v) = js_sys::Reflect::get(&value, &$key.into()) {
                    if let Some(num) = v.as_f64() {
                        config.$field = num as $ty;
                    }
                }
            };
        }

        extract!(star_count_desktop, "starCountDesktop", u32);
        extract!(star_count_mobile, "starCountMobile", u32);
        extract!(tail_len, "tailLen", u32);
        extract!(dpr_cap, "dprCap", f64);
        extract!(seed, "seed", u32);

        if let Ok(v) = js_sys::Reflect::get(&value, &"variant".into()) {
            if let Some(name) = v.as_string() {
                match name.as_str() {
                    "extended" => config.variant = Variant::Extended,
                    "classic" => config.variant = Variant::Classic,
                    _ => {}
                }
            }
        }

        config
    }

    /// Star count for the given viewport, small screens getting the
    /// reduced set.
    pub fn star_count_for(&self, inner_width: f64, inner_height: f64) -> usize {
        if inner_width.min(inner_height) < SMALL_VIEWPORT_PX {
            self.star_count_mobile as usize
        } else {
            self.star_count_desktop as usize
        }
    }
}
