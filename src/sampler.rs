//! Silhouette point sampling
//!
//! Pure geometry: rejection sampling against a rounded-rectangle signed
//! distance field, annulus sampling for the "VS" ring, and the closed-form
//! parametric heart curve. Every routine takes the random source by `&mut`
//! so callers control seeding and tests are reproducible.

use std::f32::consts::TAU;

use crate::constants::{AREA_ATTEMPTS, CIRCLE_ATTEMPTS, OUTLINE_ATTEMPTS};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[inline]
fn rand_in(rng: &mut fastrand::Rng, a: f32, b: f32) -> f32 {
    a + rng.f32() * (b - a)
}

/// Signed distance from (px, py) to a rounded rectangle centered at
/// (cx, cy). Negative inside, zero on the rounded boundary.
pub fn sd_rounded_rect(px: f32, py: f32, cx: f32, cy: f32, w: f32, h: f32, r: f32) -> f32 {
    let x = (px - cx).abs() - (w * 0.5 - r);
    let y = (py - cy).abs() - (h * 0.5 - r);
    let ax = x.max(0.0);
    let ay = y.max(0.0);
    ax.hypot(ay) + x.max(y).min(0.0) - r
}

/// Points within `thickness` of the rounded-rectangle boundary. Candidates
/// are drawn from the bounding box padded by twice the thickness; when the
/// attempt budget runs out the remaining slots are filled uniformly inside
/// the box so the caller always gets exactly `n` points.
pub fn sample_rounded_rect_outline(
    rng: &mut fastrand::Rng,
    cx: f32,
    cy: f32,
    w: f32,
    h: f32,
    r: f32,
    n: usize,
    thickness: f32,
) -> Vec<Point> {
    let mut pts = Vec::with_capacity(n);
    let pad = thickness * 2.0;
    let mut guard = 0;
    while pts.len() < n && guard < n * OUTLINE_ATTEMPTS {
        guard += 1;
        let x = cx + rand_in(rng, -w / 2.0 - pad, w / 2.0 + pad);
        let y = cy + rand_in(rng, -h / 2.0 - pad, h / 2.0 + pad);
        if sd_rounded_rect(x, y, cx, cy, w, h, r).abs() <= thickness {
            pts.push(Point { x, y });
        }
    }
    while pts.len() < n {
        pts.push(Point {
            x: cx + rand_in(rng, -w / 2.0, w / 2.0),
            y: cy + rand_in(rng, -h / 2.0, h / 2.0),
        });
    }
    pts
}

/// Points filling the interior of a rounded rectangle.
pub fn sample_rounded_rect_area(
    rng: &mut fastrand::Rng,
    cx: f32,
    cy: f32,
    w: f32,
    h: f32,
    r: f32,
    n: usize,
) -> Vec<Point> {
    let mut pts = Vec::with_capacity(n);
    let mut guard = 0;
    while pts.len() < n && guard < n * AREA_ATTEMPTS {
        guard += 1;
        let x = cx + rand_in(rng, -w / 2.0, w / 2.0);
        let y = cy + rand_in(rng, -h / 2.0, h / 2.0);
        if sd_rounded_rect(x, y, cx, cy, w, h, r) <= 0.0 {
            pts.push(Point { x, y });
        }
    }
    while pts.len() < n {
        pts.push(Point {
            x: cx + rand_in(rng, -w / 2.0, w / 2.0),
            y: cy + rand_in(rng, -h / 2.0, h / 2.0),
        });
    }
    pts
}

/// Points in the annulus of the given radius and half-width. The inner
/// radius is floored at 1 so a thin ring near the origin stays valid.
pub fn sample_circle_outline(
    rng: &mut fastrand::Rng,
    cx: f32,
    cy: f32,
    radius: f32,
    n: usize,
    thickness: f32,
) -> Vec<Point> {
    let mut pts = Vec::with_capacity(n);
    let inner = (radius - thickness).max(1.0);
    let outer = radius + thickness;
    let mut guard = 0;
    while pts.len() < n && guard < n * CIRCLE_ATTEMPTS {
        guard += 1;
        let a = rand_in(rng, 0.0, TAU);
        let rr = rand_in(rng, inner, outer);
        pts.push(Point {
            x: cx + a.cos() * rr,
            y: cy + a.sin() * rr,
        });
    }
    while pts.len() < n {
        pts.push(Point {
            x: cx + rand_in(rng, -radius, radius),
            y: cy + rand_in(rng, -radius, radius),
        });
    }
    pts
}

/// One point on the canonical heart curve at parameter t.
pub fn heart_point(t: f32) -> Point {
    let x = 16.0 * t.sin().powi(3);
    let y = 13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos();
    Point { x, y }
}

/// Exactly `n` heart points in parameter order, evenly spaced over [0, 2π).
/// Deterministic, so per-star target assignment stays stable across rebuilds.
pub fn sample_heart(cx: f32, cy: f32, scale: f32, n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = (i as f32 / n as f32) * TAU;
            let p = heart_point(t);
            Point {
                x: cx + p.x * scale,
                y: cy - p.y * scale,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_points_lie_within_thickness() {
        let mut rng = fastrand::Rng::with_seed(7);
        let pts = sample_rounded_rect_outline(&mut rng, 400.0, 400.0, 320.0, 480.0, 24.0, 100, 6.4);
        assert_eq!(pts.len(), 100);
        // A band this wide never exhausts the budget, so every point is a
        // true outline sample.
        for p in &pts {
            let sd = sd_rounded_rect(p.x, p.y, 400.0, 400.0, 320.0, 480.0, 24.0);
            assert!(sd.abs() <= 6.4 + 1e-4, "sd {sd} out of band at ({}, {})", p.x, p.y);
        }
    }

    #[test]
    fn outline_sampling_is_reproducible_per_seed() {
        let a = sample_rounded_rect_outline(
            &mut fastrand::Rng::with_seed(99),
            100.0,
            100.0,
            80.0,
            120.0,
            12.0,
            50,
            3.0,
        );
        let b = sample_rounded_rect_outline(
            &mut fastrand::Rng::with_seed(99),
            100.0,
            100.0,
            80.0,
            120.0,
            12.0,
            50,
            3.0,
        );
        assert_eq!(a, b);
    }

    #[test]
    fn area_points_are_interior() {
        let mut rng = fastrand::Rng::with_seed(3);
        let pts = sample_rounded_rect_area(&mut rng, 0.0, 0.0, 200.0, 300.0, 20.0, 80);
        assert_eq!(pts.len(), 80);
        let hits = pts
            .iter()
            .filter(|p| sd_rounded_rect(p.x, p.y, 0.0, 0.0, 200.0, 300.0, 20.0) <= 1e-4)
            .count();
        // Interior acceptance dominates the box area, so the budget holds.
        assert_eq!(hits, 80);
    }

    #[test]
    fn zero_thickness_outline_falls_back_without_hanging() {
        // The zero-set has measure zero; every slot comes from the uniform
        // fallback and the call still returns the full count.
        let mut rng = fastrand::Rng::with_seed(1);
        let pts = sample_rounded_rect_outline(&mut rng, 0.0, 0.0, 100.0, 100.0, 10.0, 25, 0.0);
        assert_eq!(pts.len(), 25);
        for p in &pts {
            assert!(p.x.abs() <= 50.0 && p.y.abs() <= 50.0);
        }
    }

    #[test]
    fn circle_points_stay_in_annulus() {
        let mut rng = fastrand::Rng::with_seed(11);
        let pts = sample_circle_outline(&mut rng, 50.0, -20.0, 40.0, 60, 2.5);
        assert_eq!(pts.len(), 60);
        for p in &pts {
            let d = (p.x - 50.0).hypot(p.y + 20.0);
            assert!((37.5 - 1e-3..=42.5 + 1e-3).contains(&d), "radius {d}");
        }
    }

    #[test]
    fn heart_sampling_is_deterministic_and_evenly_spaced() {
        let a = sample_heart(500.0, 448.0, 17.0, 360);
        let b = sample_heart(500.0, 448.0, 17.0, 360);
        assert_eq!(a.len(), 360);
        assert_eq!(a, b);
        for (i, p) in a.iter().enumerate() {
            let t = (i as f32 / 360.0) * TAU;
            let q = heart_point(t);
            assert!((p.x - (500.0 + q.x * 17.0)).abs() < 1e-3);
            assert!((p.y - (448.0 - q.y * 17.0)).abs() < 1e-3);
        }
        // Distinctness: the curve does not revisit points at this count.
        for w in a.windows(2) {
            assert_ne!(w[0], w[1]);
        }
    }

    #[test]
    fn signed_distance_matches_known_values() {
        // Center of a 100x100 box with r=10: nearest edge is 50 away.
        assert!((sd_rounded_rect(0.0, 0.0, 0.0, 0.0, 100.0, 100.0, 10.0) + 50.0).abs() < 1e-4);
        // On the flat edge midpoint the distance is zero.
        assert!(sd_rounded_rect(50.0, 0.0, 0.0, 0.0, 100.0, 100.0, 10.0).abs() < 1e-4);
        // Outside along the axis.
        assert!((sd_rounded_rect(60.0, 0.0, 0.0, 0.0, 100.0, 100.0, 10.0) - 10.0).abs() < 1e-4);
    }
}
