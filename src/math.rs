//! Scalar interpolation helpers shared by the story, channel, and particle
//! modules.

#[inline]
pub fn clamp(x: f32, a: f32, b: f32) -> f32 {
    x.max(a).min(b)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep on an already-normalized t.
#[inline]
pub fn smooth01(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Smoothstep window: 0 before `a`, 1 after `b`, eased in between.
#[inline]
pub fn range01(p: f32, a: f32, b: f32) -> f32 {
    smooth01(clamp((p - a) / (b - a), 0.0, 1.0))
}
