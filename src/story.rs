//! Narrative state machine
//!
//! Maps scroll progress onto the five blend parameters through an ordered
//! segment table. Each segment carries start/end anchor values per
//! parameter; evaluation smoothsteps the local position and lerps. Plateau
//! segments use identical anchors. Two narrative tables ship as product
//! variants; they are data, not code.

use crate::config::Variant;
use crate::math::{clamp, lerp, range01};

/// The five blend parameters at one point in the story.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blend {
    pub drift: f32,
    pub fall: f32,
    pub streak: f32,
    pub morph_cards: f32,
    pub morph_heart: f32,
}

impl Blend {
    const fn new(drift: f32, fall: f32, streak: f32, morph_cards: f32, morph_heart: f32) -> Self {
        Self {
            drift,
            fall,
            streak,
            morph_cards,
            morph_heart,
        }
    }
}

/// One progress interval with anchor values at both ends.
#[derive(Clone, Copy, Debug)]
pub struct Segment {
    pub start: f32,
    pub end: f32,
    pub from: Blend,
    pub to: Blend,
}

const fn seg(start: f32, end: f32, from: Blend, to: Blend) -> Segment {
    Segment {
        start,
        end,
        from,
        to,
    }
}

const fn plateau(start: f32, end: f32, at: Blend) -> Segment {
    seg(start, end, at, at)
}

const OPEN: Blend = Blend::new(1.0, 0.0, 0.0, 0.0, 0.0);
const FALLING: Blend = Blend::new(0.6, 1.0, 1.0, 0.0, 0.0);
const CARDS: Blend = Blend::new(0.18, 0.08, 0.10, 1.0, 0.0);
const HEART: Blend = Blend::new(0.0, 0.0, 0.10, 0.0, 1.0);
const HEART_HELD: Blend = Blend::new(0.05, 0.0, 0.10, 0.0, 1.0);

/// A full narrative: the segment table plus the per-variant behaviors the
/// particle field keys off.
#[derive(Clone, Copy, Debug)]
pub struct Narrative {
    pub segments: &'static [Segment],
    /// Stars vanish and reappear in a staggered wave around the card beat.
    pub blink_envelope: bool,
    /// Hold stars in the card outline while the wave blinks back in.
    pub freeze_in_outline: bool,
    /// Symmetric radial burst during the card-split beat, independent of
    /// scroll direction.
    pub card_split_burst: bool,
    pub burst_window: (f32, f32),
    pub blink_out: (f32, f32),
    pub blink_in: (f32, f32),
}

/// Short-form narrative: drift, fall, cards, heart.
pub const CLASSIC: Narrative = Narrative {
    segments: &[
        plateau(0.0, 0.05, OPEN),
        seg(0.05, 0.70, OPEN, FALLING),
        seg(0.70, 0.82, FALLING, CARDS),
        plateau(0.82, 0.94, CARDS),
        seg(0.94, 1.0, CARDS, HEART),
    ],
    blink_envelope: true,
    freeze_in_outline: true,
    card_split_burst: false,
    burst_window: (0.0, 0.0),
    blink_out: (0.74, 0.82),
    blink_in: (0.94, 0.97),
};

/// Long-form narrative with the intro plateau and a held heart tail where
/// the waitlist panel reveals.
pub const EXTENDED: Narrative = Narrative {
    segments: &[
        plateau(0.0, 0.04, OPEN),
        seg(0.04, 0.55, OPEN, FALLING),
        seg(0.55, 0.68, FALLING, CARDS),
        plateau(0.68, 0.82, CARDS),
        seg(0.82, 0.90, CARDS, HEART_HELD),
        plateau(0.90, 1.0, HEART_HELD),
    ],
    blink_envelope: false,
    freeze_in_outline: false,
    card_split_burst: true,
    burst_window: (0.70, 0.78),
    blink_out: (0.0, 0.0),
    blink_in: (0.0, 0.0),
};

pub fn narrative(variant: Variant) -> &'static Narrative {
    match variant {
        Variant::Classic => &CLASSIC,
        Variant::Extended => &EXTENDED,
    }
}

/// Blend parameters at progress p. Segments are scanned in order; p past
/// the table end evaluates the last segment at t = 1.
pub fn evaluate(segments: &[Segment], p: f32) -> Blend {
    let p = clamp(p, 0.0, 1.0);
    let last = segments.len() - 1;
    for (i, s) in segments.iter().enumerate() {
        if p < s.end || i == last {
            let t = if s.end > s.start {
                range01(p, s.start, s.end)
            } else {
                0.0
            };
            return Blend {
                drift: lerp(s.from.drift, s.to.drift, t),
                fall: lerp(s.from.fall, s.to.fall, t),
                streak: lerp(s.from.streak, s.to.streak, t),
                morph_cards: lerp(s.from.morph_cards, s.to.morph_cards, t),
                morph_heart: lerp(s.from.morph_heart, s.to.morph_heart, t),
            };
        }
    }
    unreachable!("segment table is never empty")
}

/// Frame-owned simulation state, written once per tick.
#[derive(Clone, Copy, Debug)]
pub struct StoryParams {
    pub drift: f32,
    pub fall: f32,
    pub streak: f32,
    pub morph_cards: f32,
    pub morph_heart: f32,
    pub progress: f32,
    pub prev_progress: f32,
    pub scroll_dir: f32,
}

impl Default for StoryParams {
    fn default() -> Self {
        Self {
            drift: 1.0,
            fall: 0.0,
            streak: 0.0,
            morph_cards: 0.0,
            morph_heart: 0.0,
            progress: 0.0,
            prev_progress: 0.0,
            scroll_dir: 0.0,
        }
    }
}

impl StoryParams {
    /// Advance the story to progress p, updating the scroll direction from
    /// the previous tick's progress.
    pub fn apply(&mut self, narrative: &Narrative, p: f32) {
        let b = evaluate(narrative.segments, p);
        self.prev_progress = self.progress;
        self.scroll_dir = p - self.progress;
        self.progress = p;
        self.drift = b.drift;
        self.fall = b.fall;
        self.streak = b.streak;
        self.morph_cards = b.morph_cards;
        self.morph_heart = b.morph_heart;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_tables() -> [&'static Narrative; 2] {
        [&CLASSIC, &EXTENDED]
    }

    fn fields(b: Blend) -> [f32; 5] {
        [b.drift, b.fall, b.streak, b.morph_cards, b.morph_heart]
    }

    #[test]
    fn blends_stay_in_unit_range_for_all_progress() {
        for nar in all_tables() {
            for i in 0..=1000 {
                let p = i as f32 / 1000.0;
                for v in fields(evaluate(nar.segments, p)) {
                    assert!((0.0..=1.0).contains(&v), "p={p} value={v}");
                }
            }
        }
    }

    #[test]
    fn continuous_at_every_segment_boundary() {
        for nar in all_tables() {
            for s in nar.segments.iter().skip(1) {
                let left = fields(evaluate(nar.segments, s.start - 1e-5));
                let right = fields(evaluate(nar.segments, s.start + 1e-5));
                for (l, r) in left.iter().zip(&right) {
                    assert!((l - r).abs() < 1e-3, "jump at {} ({l} vs {r})", s.start);
                }
            }
        }
    }

    #[test]
    fn exact_anchors_at_progress_zero_and_one() {
        for nar in all_tables() {
            let b0 = evaluate(nar.segments, 0.0);
            assert_eq!(b0.drift, 1.0);
            assert_eq!(b0.fall, 0.0);
            assert_eq!(b0.streak, 0.0);
            assert_eq!(b0.morph_cards, 0.0);
            assert_eq!(b0.morph_heart, 0.0);

            let b1 = evaluate(nar.segments, 1.0);
            assert_eq!(b1.morph_heart, 1.0);
            assert_eq!(b1.morph_cards, 0.0);
        }
    }

    #[test]
    fn plateau_segments_hold_their_anchor() {
        let b = evaluate(CLASSIC.segments, 0.88);
        assert_eq!(b.morph_cards, 1.0);
        assert_eq!(b.drift, 0.18);
        let b = evaluate(EXTENDED.segments, 0.95);
        assert_eq!(b.morph_heart, 1.0);
    }

    #[test]
    fn scroll_direction_follows_progress_delta() {
        let mut params = StoryParams::default();
        params.apply(&CLASSIC, 0.4);
        assert!(params.scroll_dir > 0.0);
        params.apply(&CLASSIC, 0.35);
        assert!(params.scroll_dir < 0.0);
        assert!((params.prev_progress - 0.4).abs() < 1e-6);
        assert!((params.progress - 0.35).abs() < 1e-6);
    }

    #[test]
    fn out_of_range_progress_clamps() {
        let lo = evaluate(CLASSIC.segments, -0.5);
        let hi = evaluate(CLASSIC.segments, 1.5);
        assert_eq!(fields(lo), fields(evaluate(CLASSIC.segments, 0.0)));
        assert_eq!(fields(hi), fields(evaluate(CLASSIC.segments, 1.0)));
    }
}
