//! Particle field
//!
//! Owns every star and advances them once per frame: wind and gravity under
//! the current blend parameters, boundary wrap with scroll-aware respawn,
//! exponential easing toward the card and heart silhouettes, dispersion on
//! scroll reversal, and the fixed-capacity trail ring buffer behind each
//! star. Nothing in here can fail; degenerate values are tolerated until
//! the next wrap pass corrects them.

use std::f32::consts::PI;

use crate::constants::*;
use crate::math::{clamp, lerp, range01, smooth01};
use crate::sampler::{self, Point};
use crate::story::{Narrative, StoryParams};

#[inline]
fn rand_in(rng: &mut fastrand::Rng, a: f32, b: f32) -> f32 {
    a + rng.f32() * (b - a)
}

/// Fixed-capacity position history. Always full: pushing overwrites the
/// oldest entry in place.
#[derive(Clone, Debug)]
pub struct Trail {
    buf: Vec<Point>,
    head: usize,
}

impl Trail {
    pub fn new(p: Point, cap: usize) -> Self {
        Self {
            buf: vec![p; cap.max(2)],
            head: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn push(&mut self, p: Point) {
        self.head = (self.head + 1) % self.buf.len();
        self.buf[self.head] = p;
    }

    /// The most recent `n` positions, oldest to newest (head last).
    pub fn last(&self, n: usize) -> impl Iterator<Item = Point> + '_ {
        let cap = self.buf.len();
        let n = n.clamp(2, cap);
        (0..n).map(move |i| self.buf[(self.head + cap - (n - 1 - i)) % cap])
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        for p in &mut self.buf {
            p.x *= sx;
            p.y *= sy;
        }
    }
}

/// One simulated star.
#[derive(Clone, Debug)]
pub struct Star {
    pub hero: bool,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Home position for the opening beat; rescaled, never re-randomized.
    pub ix: f32,
    pub iy: f32,
    /// Card-silhouette target.
    pub tx: f32,
    pub ty: f32,
    /// Heart target.
    pub hx: f32,
    pub hy: f32,
    pub speed: f32,
    pub r: f32,
    pub a: f32,
    pub seed: f32,
    pub tail_len: usize,
    pub trail: Trail,
}

impl Star {
    /// On-screen visibility in [0, ~1.1]: twinkle, plus the staggered
    /// blink-out/in envelope when the narrative uses one. The envelope is
    /// keyed on each star's seed fraction so the wave is per-star stable.
    pub fn visibility(&self, narrative: &Narrative, progress: f32, now: f32) -> f32 {
        let mut vis = 1.0;
        if narrative.blink_envelope {
            let order = self.seed.fract();
            let out_t = range01(progress, narrative.blink_out.0, narrative.blink_out.1);
            let in_t = range01(progress, narrative.blink_in.0, narrative.blink_in.1);
            let out = clamp((out_t - order) / BLINK_WINDOW, 0.0, 1.0);
            let inn = clamp((in_t - order) / BLINK_WINDOW, 0.0, 1.0);
            vis = clamp(1.0 - out + inn, 0.0, 1.0);
        }
        let twinkle = TWINKLE_BASE
            + TWINKLE_AMP
                * (now * (TWINKLE_FREQ_BASE + self.seed * TWINKLE_FREQ_SEED)
                    + self.seed * TWINKLE_PHASE_SEED)
                    .sin();
        vis * twinkle
    }
}

pub struct ParticleField {
    stars: Vec<Star>,
    tail_cap: usize,
}

impl ParticleField {
    /// Create the full star set for a viewport. The first two stars are
    /// the heroes, anchored on opposite diagonals with larger radius and
    /// alpha. Count is fixed for the field's lifetime.
    pub fn new(count: usize, w: f32, h: f32, tail_cap: usize, rng: &mut fastrand::Rng) -> Self {
        let tail_cap = tail_cap.max(2);
        let mut stars = Vec::with_capacity(count);
        for i in 0..count {
            let hero = i < HERO_COUNT;
            let (x, y) = if hero {
                if i == 0 {
                    (w * 0.22, h * 0.78)
                } else {
                    (w * 0.78, h * 0.22)
                }
            } else {
                (rand_in(rng, 0.0, w), rand_in(rng, 0.0, h))
            };
            stars.push(Star {
                hero,
                x,
                y,
                ix: x,
                iy: y,
                vx: rand_in(rng, -0.09, 0.09),
                // downward bias
                vy: rand_in(rng, 0.04, 0.28),
                speed: if hero {
                    rand_in(rng, 1.55, 1.95)
                } else {
                    rand_in(rng, 0.75, 1.35)
                },
                r: if hero {
                    rand_in(rng, 3.2, 4.6)
                } else {
                    rand_in(rng, 0.6, 1.8)
                },
                a: if hero {
                    rand_in(rng, 0.85, 0.98)
                } else {
                    rand_in(rng, 0.25, 0.95)
                },
                tx: x,
                ty: y,
                hx: x,
                hy: y,
                seed: rand_in(rng, 0.0, SEED_RANGE),
                tail_len: rand_in(rng, tail_cap as f32 * 0.45, tail_cap as f32) as usize,
                trail: Trail::new(Point { x, y }, tail_cap),
            });
        }
        Self { stars, tail_cap }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn tail_cap(&self) -> usize {
        self.tail_cap
    }

    /// Map every position, home position, and target by the viewport scale
    /// factors, clamped into the new bounds. Re-randomizing here would make
    /// every resize flash; scaling keeps the picture continuous.
    pub fn rescale(&mut self, sx: f32, sy: f32, w: f32, h: f32) {
        for s in &mut self.stars {
            s.x = clamp(s.x * sx, 0.0, w);
            s.y = clamp(s.y * sy, 0.0, h);
            s.ix = clamp(s.ix * sx, 0.0, w);
            s.iy = clamp(s.iy * sy, 0.0, h);
            s.tx = clamp(s.tx * sx, 0.0, w);
            s.ty = clamp(s.ty * sy, 0.0, h);
            s.hx = clamp(s.hx * sx, 0.0, w);
            s.hy = clamp(s.hy * sy, 0.0, h);
            s.trail.scale(sx, sy);
        }
    }

    /// Rebuild the card and heart targets for the current viewport. Called
    /// on geometry change only; the physics step never touches targets.
    pub fn rebuild_targets(&mut self, w: f32, h: f32, rng: &mut fastrand::Rng) {
        if self.stars.is_empty() {
            return;
        }

        let card_w = CARD_MAX_W.min(w * CARD_W_FRAC);
        let card_h = CARD_MAX_H.min(h * CARD_H_FRAC);
        let card_min = card_w.min(card_h);

        let thickness = (card_min * 0.02).max(2.0);
        let pad = (card_min * 0.08).max(16.0);
        let outline_w = card_w + pad * 2.0;
        let outline_h = card_h + (pad + 10.0) * 2.0;

        let vs_count = ((self.stars.len() as f32 * VS_RING_FRAC) as usize).max(VS_RING_MIN);
        let card_count = self.stars.len().saturating_sub(vs_count).max(1);
        let left_count = card_count / 2;
        let right_count = card_count - left_count;

        let card_offset = clamp(card_w * 0.6, CARD_OFFSET_MIN, CARD_OFFSET_MAX);
        let left = sampler::sample_rounded_rect_outline(
            rng,
            w * 0.5 - card_offset,
            h * 0.5,
            outline_w,
            outline_h,
            CARD_RADIUS,
            left_count,
            thickness,
        );
        let right = sampler::sample_rounded_rect_outline(
            rng,
            w * 0.5 + card_offset,
            h * 0.5,
            outline_w,
            outline_h,
            CARD_RADIUS,
            right_count,
            thickness,
        );
        let vs_radius = VS_RADIUS_MAX.min(w.min(h) * VS_RADIUS_FRAC);
        let vs = sampler::sample_circle_outline(rng, w * 0.5, h * 0.5, vs_radius, vs_count, VS_THICKNESS);

        let heart_scale = w.min(h) * HEART_SCALE_FRAC;
        let heart_cx = w * 0.5;
        let heart_cy = h * HEART_CY_FRAC;
        let hearts = sampler::sample_heart(heart_cx, heart_cy, heart_scale, self.stars.len());
        let hero_offset = w.min(h) * HERO_HEART_OFFSET_FRAC;

        let right_start = left_count;
        let circle_start = left_count + right_count;
        for (i, s) in self.stars.iter_mut().enumerate() {
            let t = if i >= circle_start {
                vs[i - circle_start]
            } else if i >= right_start {
                right[i - right_start]
            } else {
                left[i]
            };
            s.tx = t.x;
            s.ty = t.y;
            if s.hero {
                let sign = if i == 0 { -1.0 } else { 1.0 };
                s.hx = heart_cx + hero_offset * sign;
                s.hy = heart_cy - hero_offset * sign;
            } else {
                s.hx = hearts[i].x;
                s.hy = hearts[i].y;
            }
        }
    }

    /// Advance every star one frame under the current story parameters.
    pub fn step(
        &mut self,
        params: &StoryParams,
        narrative: &Narrative,
        now: f32,
        w: f32,
        h: f32,
        rng: &mut fastrand::Rng,
    ) {
        let p = params.progress;
        let cx = w * 0.5;
        let cy = h * 0.5;
        let scroll_up = params.scroll_dir < -SCROLL_EPS;
        let scroll_down = params.scroll_dir > SCROLL_EPS;

        // Classic holds stars in the card outline while they blink back in.
        let blink_in_t = range01(p, narrative.blink_in.0, narrative.blink_in.1);
        let freeze = narrative.freeze_in_outline && blink_in_t > 0.0 && blink_in_t < 1.0;

        // Extended explodes the silhouette mid-split, both scroll directions.
        let burst = if narrative.card_split_burst {
            let (b0, b1) = narrative.burst_window;
            if p > b0 && p < b1 {
                BURST_REPULSE * (PI * range01(p, b0, b1)).sin()
            } else {
                0.0
            }
        } else {
            0.0
        };

        for s in &mut self.stars {
            if freeze {
                s.vx *= FREEZE_DAMP;
                s.vy *= FREEZE_DAMP;
                s.x += (s.tx - s.x) * FREEZE_EASE;
                s.y += (s.ty - s.y) * FREEZE_EASE;
            } else if s.hero && p < HERO_HOLD_PROGRESS {
                // Keep the heroes on-screen through the opening beat.
                s.vx *= HERO_DAMP;
                s.vy *= HERO_DAMP;
                s.x = lerp(s.x, s.ix, HERO_EASE);
                s.y = lerp(s.y, s.iy, HERO_EASE);
                s.x += (now * HERO_OSC_FREQ + s.seed).sin() * HERO_OSC_X;
                s.y += (now * HERO_OSC_FREQ + s.seed).cos() * HERO_OSC_Y;
            } else {
                let wind = (now * WIND_FREQ + s.seed).sin() * (WIND_BASE + WIND_STREAK_GAIN * params.streak);
                let gravity =
                    GRAVITY_BASE + GRAVITY_FALL_GAIN * params.fall + GRAVITY_STREAK_GAIN * params.streak;

                s.vx += wind * WIND_IMPULSE;
                s.vy += gravity * GRAVITY_IMPULSE;

                s.vx *= DAMP_VX;
                s.vy *= DAMP_VY;

                let speed = (SPEED_BASE
                    + params.drift * SPEED_DRIFT_GAIN
                    + params.streak * SPEED_STREAK_GAIN
                    + params.fall * SPEED_FALL_GAIN)
                    * s.speed;
                s.x += s.vx * speed;
                s.y += s.vy * speed;
            }

            // Boundary wrap. Bottom exits respawn higher up while scrolling
            // down so fewer stars re-enter mid-streak.
            if s.x < -WRAP_MARGIN {
                s.x = w + WRAP_MARGIN;
            }
            if s.x > w + WRAP_MARGIN {
                s.x = -WRAP_MARGIN;
            }
            if s.y < -WRAP_MARGIN {
                s.y = h + WRAP_MARGIN;
            }
            if s.y > h + WRAP_MARGIN {
                if scroll_down {
                    s.y = -WRAP_MARGIN - rand_in(rng, 0.0, h * RESPAWN_SPREAD);
                    s.x = rand_in(rng, 0.0, w);
                    s.vx *= RESPAWN_DAMP;
                    s.vy *= RESPAWN_DAMP;
                } else {
                    s.y = -WRAP_MARGIN;
                }
            }

            // Ease into the card silhouette.
            if params.morph_cards > 0.0 {
                let k = CARD_EASE_BASE + params.morph_cards * CARD_EASE_GAIN;
                s.x += (s.tx - s.x) * k;
                s.y += (s.ty - s.y) * k;
            }

            // Disperse away from the silhouette when scrolling back up.
            if scroll_up && params.morph_cards < DISPERSE_THRESHOLD {
                let t = smooth01(clamp(
                    (DISPERSE_THRESHOLD - params.morph_cards) / DISPERSE_THRESHOLD,
                    0.0,
                    1.0,
                ));
                let dx = s.x - cx;
                let dy = s.y - cy;
                let dist = dx.hypot(dy).max(1.0);
                let repulse = REPULSE_BASE + REPULSE_GAIN * t;
                let jitter = (now * JITTER_FREQ + s.seed).sin() * (JITTER_BASE + JITTER_GAIN * t);
                s.vx += (dx / dist) * repulse + jitter;
                s.vy += (dy / dist) * repulse - jitter * 0.6;
            } else if params.morph_cards < DISPERSE_THRESHOLD {
                // Settle back into plain falling motion.
                s.vx *= SETTLE_DAMP;
                s.vy = s.vy * SETTLE_DAMP + SETTLE_GRAVITY;
            }

            if burst > 0.0 {
                let dx = s.x - cx;
                let dy = s.y - cy;
                let dist = dx.hypot(dy).max(1.0);
                s.vx += (dx / dist) * burst;
                s.vy += (dy / dist) * burst;
            }

            // Ease into the heart.
            if params.morph_heart > 0.0 {
                let k = HEART_EASE_BASE + params.morph_heart * HEART_EASE_GAIN;
                s.x += (s.hx - s.x) * k;
                s.y += (s.hy - s.y) * k;
            }

            s.trail.push(Point { x: s.x, y: s.y });
        }
    }
}
