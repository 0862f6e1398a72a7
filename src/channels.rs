//! Output channels for the surrounding UI layer
//!
//! A plain per-frame snapshot of every value the host applies to its own
//! presentation (card transforms, prompt visibility, waitlist reveal). All
//! channels are pure functions of progress, except the vote-prompt cursor
//! which also breathes with elapsed time.

use wasm_bindgen::prelude::*;

use crate::config::Variant;
use crate::math::{clamp, lerp, range01};

#[wasm_bindgen]
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputChannels {
    pub progress: f32,

    // Cards layer
    pub cards_opacity: f32,
    pub cards_offset_y: f32,
    pub card_reveal: f32,
    pub voting_active: bool,
    pub card_left_x: f32,
    pub card_left_rot: f32,
    pub card_right_x: f32,
    pub card_right_rot: f32,

    // Vote prompt cursor
    pub vote_cursor_x: f32,
    pub vote_cursor_y: f32,
    pub vote_cursor_opacity: f32,
    pub vote_cursor_scale: f32,

    // Extended-narrative extras
    pub intro_opacity: f32,
    pub glow_opacity: f32,
    pub glow_scale: f32,
    pub waitlist_opacity: f32,
    pub waitlist_offset_y: f32,
}

/// Card split/recombine transform: out to ±`reach` px and ±`tilt` degrees,
/// then back to center.
fn split_transform(split: f32, combine: f32, reach: f32, tilt: f32) -> (f32, f32, f32, f32) {
    let mut ax = 0.0;
    let mut ar = 0.0;
    let mut bx = 0.0;
    let mut br = 0.0;
    if split > 0.0 {
        ax = lerp(ax, -reach, split);
        ar = lerp(ar, -tilt, split);
        bx = lerp(bx, reach, split);
        br = lerp(br, tilt, split);
    }
    if combine > 0.0 {
        ax = lerp(ax, 0.0, combine);
        ar = lerp(ar, 0.0, combine);
        bx = lerp(bx, 0.0, combine);
        br = lerp(br, 0.0, combine);
    }
    (ax, ar, bx, br)
}

pub fn compute(variant: Variant, p: f32, elapsed: f32) -> OutputChannels {
    match variant {
        Variant::Classic => classic(p, elapsed),
        Variant::Extended => extended(p, elapsed),
    }
}

fn classic(p: f32, elapsed: f32) -> OutputChannels {
    let cards_in = range01(p, 0.74, 0.82);
    let cards_out = range01(p, 0.94, 0.97);
    let card_reveal = range01(p, 0.80, 0.86);
    let voting_active = (0.80..=0.95).contains(&p) && card_reveal > 0.6;

    let split = range01(p, 0.82, 0.90);
    let combine = range01(p, 0.90, 0.94);
    let (ax, ar, bx, br) = split_transform(split, combine, 220.0, 4.0);

    let cursor = clamp(range01(p, 0.81, 0.84) - range01(p, 0.93, 0.95), 0.0, 1.0);

    OutputChannels {
        progress: p,
        cards_opacity: clamp(cards_in - cards_out, 0.0, 1.0),
        cards_offset_y: lerp(12.0, 0.0, cards_in),
        card_reveal,
        voting_active,
        card_left_x: ax,
        card_left_rot: ar,
        card_right_x: bx,
        card_right_rot: br,
        vote_cursor_x: 0.5 + 0.18 * (elapsed * 0.8).sin() * cursor,
        vote_cursor_y: 0.62,
        vote_cursor_opacity: cursor,
        vote_cursor_scale: 0.9 + 0.1 * cursor + 0.05 * (elapsed * 2.0).sin() * cursor,
        intro_opacity: 1.0 - range01(p, 0.02, 0.10),
        glow_opacity: range01(p, 0.94, 1.0),
        glow_scale: lerp(0.8, 1.0, range01(p, 0.94, 1.0)),
        waitlist_opacity: 0.0,
        waitlist_offset_y: 24.0,
    }
}

fn extended(p: f32, elapsed: f32) -> OutputChannels {
    let cards_in = range01(p, 0.60, 0.68);
    let cards_out = range01(p, 0.82, 0.86);
    let card_reveal = range01(p, 0.66, 0.72);
    let voting_active = (0.66..=0.82).contains(&p) && card_reveal > 0.6;

    let split = range01(p, 0.70, 0.78);
    let combine = range01(p, 0.78, 0.82);
    let (ax, ar, bx, br) = split_transform(split, combine, 220.0, 4.0);

    let cursor = clamp(range01(p, 0.67, 0.70) - range01(p, 0.80, 0.82), 0.0, 1.0);
    let heart_glow = range01(p, 0.84, 0.92);
    let waitlist = range01(p, 0.92, 0.98);

    OutputChannels {
        progress: p,
        cards_opacity: clamp(cards_in - cards_out, 0.0, 1.0),
        cards_offset_y: lerp(12.0, 0.0, cards_in),
        card_reveal,
        voting_active,
        card_left_x: ax,
        card_left_rot: ar,
        card_right_x: bx,
        card_right_rot: br,
        vote_cursor_x: 0.5 + 0.18 * (elapsed * 0.8).sin() * cursor,
        vote_cursor_y: 0.62,
        vote_cursor_opacity: cursor,
        vote_cursor_scale: 0.9 + 0.1 * cursor + 0.05 * (elapsed * 2.0).sin() * cursor,
        intro_opacity: 1.0 - range01(p, 0.02, 0.08),
        glow_opacity: heart_glow,
        glow_scale: lerp(0.8, 1.0, heart_glow),
        waitlist_opacity: waitlist,
        waitlist_offset_y: lerp(24.0, 0.0, waitlist),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cards_fade_in_then_out_classic() {
        assert_eq!(classic(0.0, 0.0).cards_opacity, 0.0);
        assert!((classic(0.78, 0.0).cards_opacity - 0.5).abs() < 1e-5);
        assert_eq!(classic(0.88, 0.0).cards_opacity, 1.0);
        assert_eq!(classic(1.0, 0.0).cards_opacity, 0.0);
    }

    #[test]
    fn voting_window_requires_reveal() {
        assert!(!classic(0.80, 0.0).voting_active);
        assert!(classic(0.90, 0.0).voting_active);
        assert!(!classic(0.96, 0.0).voting_active);
        assert!(extended(0.75, 0.0).voting_active);
        assert!(!extended(0.85, 0.0).voting_active);
    }

    #[test]
    fn split_reaches_full_offset_then_recombines() {
        let c = classic(0.90, 0.0);
        assert!((c.card_left_x + 220.0).abs() < 1e-3);
        assert!((c.card_right_x - 220.0).abs() < 1e-3);
        assert!((c.card_left_rot + 4.0).abs() < 1e-3);
        let c = classic(0.94, 0.0);
        assert!(c.card_left_x.abs() < 1e-3);
        assert!(c.card_right_rot.abs() < 1e-3);
    }

    #[test]
    fn waitlist_only_reveals_in_the_extended_tail() {
        assert_eq!(classic(1.0, 0.0).waitlist_opacity, 0.0);
        assert_eq!(extended(0.5, 0.0).waitlist_opacity, 0.0);
        assert_eq!(extended(1.0, 0.0).waitlist_opacity, 1.0);
        assert_eq!(extended(1.0, 0.0).waitlist_offset_y, 0.0);
    }

    #[test]
    fn cursor_breathes_only_while_visible() {
        let hidden = classic(0.2, 3.0);
        assert_eq!(hidden.vote_cursor_opacity, 0.0);
        assert!((hidden.vote_cursor_x - 0.5).abs() < 1e-6);
        let shown = classic(0.88, 3.0);
        assert_eq!(shown.vote_cursor_opacity, 1.0);
        assert!(shown.vote_cursor_scale > 0.9);
    }

    #[test]
    fn intro_copy_fades_out_early() {
        assert_eq!(extended(0.0, 0.0).intro_opacity, 1.0);
        assert_eq!(extended(0.2, 0.0).intro_opacity, 0.0);
    }
}
