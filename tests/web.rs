//! In-browser smoke tests. These only run under wasm-pack / wasm-bindgen
//! test runners; the pure simulation tests live next to their modules.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use starstory::{StoryConfig, Variant};

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn config_defaults_from_non_object() {
    let config = StoryConfig::from_js(JsValue::NULL);
    assert_eq!(config.star_count_desktop, 420);
    assert_eq!(config.variant, Variant::Classic);
}

#[wasm_bindgen_test]
fn config_extracts_camel_case_keys() {
    let obj = js_sys::Object::new();
    js_sys::Reflect::set(&obj, &"starCountDesktop".into(), &300.0.into()).unwrap();
    js_sys::Reflect::set(&obj, &"variant".into(), &"extended".into()).unwrap();
    let config = StoryConfig::from_js(obj.into());
    assert_eq!(config.star_count_desktop, 300);
    assert_eq!(config.variant, Variant::Extended);
}

#[wasm_bindgen_test]
fn version_is_exported() {
    assert!(!starstory::version().is_empty());
}
