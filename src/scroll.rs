//! Scroll progress tracking
//!
//! Maps the document scroll offset onto [0, 1] across the pinned animation
//! container. Geometry is remeasured by the engine on resize; this module
//! only holds the numbers and the mapping.

use crate::math::clamp;

#[derive(Clone, Copy, Debug)]
pub struct ScrollGeometry {
    /// Container top offset relative to the document origin.
    pub wrap_top: f64,
    /// Scrollable range: container height minus viewport height, floored
    /// at 1 so a degenerate layout never divides by zero.
    pub scroll_max: f64,
}

impl Default for ScrollGeometry {
    fn default() -> Self {
        Self {
            wrap_top: 0.0,
            scroll_max: 1.0,
        }
    }
}

impl ScrollGeometry {
    pub fn measure(wrap_top: f64, container_height: f64, viewport_height: f64) -> Self {
        Self {
            wrap_top,
            scroll_max: (container_height - viewport_height).max(1.0),
        }
    }

    /// Normalized progress for the given document scroll offset.
    pub fn progress(&self, scroll_y: f64) -> f32 {
        clamp(((scroll_y - self.wrap_top) / self.scroll_max) as f32, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamps_to_unit_interval() {
        let g = ScrollGeometry::measure(100.0, 8100.0, 800.0);
        assert_eq!(g.progress(0.0), 0.0);
        assert_eq!(g.progress(100.0), 0.0);
        assert_eq!(g.progress(100.0 + 7300.0), 1.0);
        assert_eq!(g.progress(1e9), 1.0);
    }

    #[test]
    fn progress_is_linear_inside_the_range() {
        let g = ScrollGeometry::measure(0.0, 1800.0, 800.0);
        assert!((g.progress(500.0) - 0.5).abs() < 1e-6);
        assert!((g.progress(250.0) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn degenerate_range_floors_at_one() {
        // Container shorter than the viewport: no scroll range.
        let g = ScrollGeometry::measure(0.0, 600.0, 800.0);
        assert_eq!(g.scroll_max, 1.0);
        assert_eq!(g.progress(0.0), 0.0);
        assert_eq!(g.progress(10.0), 1.0);
    }
}
