//! Story engine
//!
//! The JS-facing surface: owns the canvas context, viewport and scroll
//! geometry, the particle field, and the story parameters. The host drives
//! it with one `render(t)` per animation frame and one `resize()` per
//! geometry change; `render` returns the output-channel snapshot the UI
//! layer applies to its own elements.

use wasm_bindgen::prelude::*;
use web_sys::{console, CanvasRenderingContext2d, Element, HtmlCanvasElement, Window};

use crate::channels::{self, OutputChannels};
use crate::config::StoryConfig;
#[cfg(feature = "configurable")]
use crate::config::Variant;
use crate::constants::RUNTIME_CONFIGURABLE;
use crate::particle::ParticleField;
use crate::renderer;
use crate::scroll::ScrollGeometry;
use crate::story::{self, StoryParams};

#[derive(Clone, Copy, Debug)]
struct Dims {
    w: f64,
    h: f64,
    dpr: f64,
}

#[wasm_bindgen]
pub struct StarStory {
    canvas: HtmlCanvasElement,
    wrap: Element,
    ctx: CanvasRenderingContext2d,

    config: StoryConfig,
    dims: Dims,
    scroll: ScrollGeometry,
    params: StoryParams,
    field: ParticleField,
    rng: fastrand::Rng,

    start_time: f32,
    frame_count: u32,
    fps_last_time: f32,
    current_fps: u32,

    /// Last emitted snapshot, replayed when a frame is not ready.
    channels: OutputChannels,
}

#[wasm_bindgen]
impl StarStory {
    /// `canvas_id` is the drawing surface inside the pinned stage;
    /// `wrap_id` is the tall scroll container the progress maps across.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, wrap_id: &str, config_val: JsValue) -> Result<StarStory, JsValue> {
        console::log_1(&"[StarStory] Initializing WASM module...".into());

        let config = StoryConfig::from_js(config_val);

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or("Failed to get document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into()?;

        let wrap: Element = document
            .get_element_by_id(wrap_id)
            .ok_or("Scroll container not found")?;

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2D canvas is not supported")?
            .dyn_into()?;

        let seed = if config.seed != 0 {
            config.seed as u64
        } else {
            js_sys::Date::now() as u64
        };
        let mut rng = fastrand::Rng::with_seed(seed);
        let field = ParticleField::new(0, 1.0, 1.0, config.tail_len as usize, &mut rng);

        let mut story = Self {
            canvas,
            wrap,
            ctx,
            config,
            dims: Dims {
                w: 1.0,
                h: 1.0,
                dpr: 1.0,
            },
            scroll: ScrollGeometry::default(),
            params: StoryParams::default(),
            field,
            rng,
            start_time: -1.0,
            frame_count: 0,
            fps_last_time: 0.0,
            current_fps: 0,
            channels: OutputChannels::default(),
        };

        story.resize()?;
        story.reinit_field()?;

        console::log_1(
            &format!("[StarStory] Initialized with {} stars", story.field.len()).into(),
        );
        Ok(story)
    }

    /// Remeasure the stage and scroll container. Existing stars are scaled
    /// into the new bounds and the silhouette targets are rebuilt; nothing
    /// is re-randomized.
    pub fn resize(&mut self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("Failed to get window")?;
        let dpr = window.device_pixel_ratio().min(self.config.dpr_cap);

        let w = (self.canvas.client_width().max(1)) as f64;
        let h = (self.canvas.client_height().max(1)) as f64;

        self.canvas.set_width((w * dpr).floor() as u32);
        self.canvas.set_height((h * dpr).floor() as u32);

        let prev = self.dims;
        self.dims = Dims { w, h, dpr };

        if !self.field.is_empty() && (prev.w != w || prev.h != h) {
            let sx = (w / prev.w.max(1.0)) as f32;
            let sy = (h / prev.h.max(1.0)) as f32;
            self.field.rescale(sx, sy, w as f32, h as f32);
            self.field.rebuild_targets(w as f32, h as f32, &mut self.rng);
        }

        let rect = self.wrap.get_bounding_client_rect();
        let wrap_top = rect.top() + window.scroll_y().unwrap_or(0.0);
        let viewport_h = inner_height(&window);
        self.scroll = ScrollGeometry::measure(wrap_top, rect.height(), viewport_h);
        Ok(())
    }

    /// Advance and draw one frame. `time_ms` is the host's animation-frame
    /// timestamp. Returns the output channels for the UI layer.
    pub fn render(&mut self, time_ms: f32) -> OutputChannels {
        if self.start_time < 0.0 {
            self.start_time = time_ms;
            self.fps_last_time = time_ms;
        }

        self.frame_count += 1;
        if time_ms - self.fps_last_time >= 1000.0 {
            self.current_fps = self.frame_count;
            self.frame_count = 0;
            self.fps_last_time = time_ms;
        }

        let Some(window) = web_sys::window() else {
            // Not ready; retry on the next scheduled frame.
            return self.channels;
        };
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        let p = self.scroll.progress(scroll_y);

        let narrative = story::narrative(self.config.variant);
        self.params.apply(narrative, p);

        let now = time_ms * 0.001;
        let (w, h) = (self.dims.w, self.dims.h);
        self.field
            .step(&self.params, narrative, now, w as f32, h as f32, &mut self.rng);

        if renderer::draw_frame(
            &self.ctx,
            w,
            h,
            self.dims.dpr,
            &self.params,
            narrative,
            &self.field,
            now,
        )
        .is_err()
        {
            // Surface not ready this frame; state is intact, retry next.
            return self.channels;
        }

        let elapsed = (time_ms - self.start_time) * 0.001;
        self.channels = channels::compute(self.config.variant, p, elapsed);
        self.channels
    }

    pub fn get_fps(&self) -> u32 {
        self.current_fps
    }

    pub fn get_progress(&self) -> f32 {
        self.params.progress
    }

    pub fn get_star_count(&self) -> u32 {
        self.field.len() as u32
    }

    pub fn get_config(&self) -> StoryConfig {
        self.config
    }

    pub fn is_configurable(&self) -> bool {
        RUNTIME_CONFIGURABLE
    }

    #[cfg(feature = "configurable")]
    pub fn set_variant(&mut self, variant: Variant) {
        self.config.variant = variant;
    }

    #[cfg(feature = "configurable")]
    pub fn set_star_count(&mut self, count: u32) -> Result<(), JsValue> {
        self.config.star_count_desktop = count;
        self.config.star_count_mobile = count;
        self.reinit_field()
    }
}

impl StarStory {
    /// Replace the whole star set for the current viewport size class.
    fn reinit_field(&mut self) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("Failed to get window")?;
        let iw = inner_width(&window);
        let ih = inner_height(&window);
        let count = self.config.star_count_for(iw, ih);

        let (w, h) = (self.dims.w as f32, self.dims.h as f32);
        self.field = ParticleField::new(count, w, h, self.config.tail_len as usize, &mut self.rng);
        self.field.rebuild_targets(w, h, &mut self.rng);
        Ok(())
    }
}

fn inner_width(window: &Window) -> f64 {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0)
}

fn inner_height(window: &Window) -> f64 {
    window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1.0)
}
