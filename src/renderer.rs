//! Canvas2D frame painter
//!
//! Draws the vignette, each star's trailing streak, the star heads, and the
//! hero glows. Trails and glows composite with "lighter" so overlaps bloom
//! instead of clipping.

use std::f64::consts::TAU;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::particle::{ParticleField, Star};
use crate::story::{Narrative, StoryParams};

const MIN_VISIBLE: f32 = 0.001;

pub fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    w: f64,
    h: f64,
    dpr: f64,
    params: &StoryParams,
    narrative: &Narrative,
    field: &ParticleField,
    now: f32,
) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, w, h);

    draw_vignette(ctx, w, h)?;

    let strength = params.streak.max(params.fall);
    for s in field.stars() {
        let vis = s.visibility(narrative, params.progress, now);
        draw_trail(ctx, s, strength, vis, params.scroll_dir)?;
        draw_head(ctx, s, vis)?;
    }
    Ok(())
}

/// Soft radial wash behind the field; the page background itself is CSS.
fn draw_vignette(ctx: &CanvasRenderingContext2d, w: f64, h: f64) -> Result<(), JsValue> {
    let vg = ctx.create_radial_gradient(w * 0.5, h * 0.35, 0.0, w * 0.5, h * 0.55, w.max(h) * 0.9)?;
    vg.add_color_stop(0.0, "rgba(130,170,255,0.06)")?;
    vg.add_color_stop(1.0, "rgba(0,0,0,0)")?;
    ctx.set_fill_style_canvas_gradient(&vg);
    ctx.fill_rect(0.0, 0.0, w, h);
    Ok(())
}

/// Stacked translucent circles along the stored path, radius and alpha
/// weighted toward the head. Suppressed while scrolling upward so reversal
/// reads as dispersal, not streaking.
fn draw_trail(
    ctx: &CanvasRenderingContext2d,
    s: &Star,
    strength: f32,
    vis: f32,
    scroll_dir: f32,
) -> Result<(), JsValue> {
    if strength <= MIN_VISIBLE || vis <= MIN_VISIBLE || scroll_dir < 0.0 {
        return Ok(());
    }

    ctx.save();
    ctx.set_global_composite_operation("lighter")?;
    let n = s.tail_len.max(2);
    for (i, p) in s.trail.last(n).enumerate() {
        let t = i as f32 / (n - 1) as f32;
        // t^2 emphasizes the head end of the streak.
        let k = t * t;
        let radius = (0.20 + strength) * (0.75 + s.r * 0.9) * (0.22 + 1.5 * k);
        let alpha = (0.02 + 0.18 * strength) * s.a * k * vis;

        ctx.begin_path();
        ctx.set_fill_style_str(&format!("rgba(255,255,255,{alpha})"));
        ctx.arc(p.x as f64, p.y as f64, radius as f64, 0.0, TAU)?;
        ctx.fill();
    }
    ctx.restore();
    Ok(())
}

fn draw_head(ctx: &CanvasRenderingContext2d, s: &Star, vis: f32) -> Result<(), JsValue> {
    if vis <= MIN_VISIBLE {
        return Ok(());
    }

    if s.hero {
        let (x, y, r) = (s.x as f64, s.y as f64, (s.r * 8.0) as f64);
        ctx.save();
        ctx.set_global_composite_operation("lighter")?;
        let glow = ctx.create_radial_gradient(x, y, 0.0, x, y, r)?;
        glow.add_color_stop(0.0, &format!("rgba(255,255,255,{})", 0.6 * vis))?;
        glow.add_color_stop(0.4, &format!("rgba(255,255,255,{})", 0.18 * vis))?;
        glow.add_color_stop(1.0, "rgba(255,255,255,0)")?;
        ctx.set_fill_style_canvas_gradient(&glow);
        ctx.begin_path();
        ctx.arc(x, y, r, 0.0, TAU)?;
        ctx.fill();
        ctx.restore();
    }

    ctx.begin_path();
    ctx.set_fill_style_str(&format!("rgba(255,255,255,{})", s.a * vis));
    ctx.arc(s.x as f64, s.y as f64, s.r as f64, 0.0, TAU)?;
    ctx.fill();
    Ok(())
}
