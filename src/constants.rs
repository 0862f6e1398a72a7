//! Star-story tuning constants
//!
//! In debug mode the narrative variant and star count can be changed through
//! the API. In release mode they are hardcoded and cannot be changed.

// Stars
pub const STAR_COUNT_DESKTOP: usize = 420;
pub const STAR_COUNT_MOBILE: usize = 260;
pub const SMALL_VIEWPORT_PX: f64 = 700.0;
pub const HERO_COUNT: usize = 2;
pub const TAIL_CAP: usize = 48;
pub const DPR_CAP: f64 = 2.0;
pub const SEED_RANGE: f32 = 1000.0;

// Motion
pub const WIND_FREQ: f32 = 1.1;
pub const WIND_BASE: f32 = 0.06;
pub const WIND_STREAK_GAIN: f32 = 0.25;
pub const WIND_IMPULSE: f32 = 0.02;
pub const GRAVITY_BASE: f32 = 0.10;
pub const GRAVITY_FALL_GAIN: f32 = 1.25;
pub const GRAVITY_STREAK_GAIN: f32 = 1.8;
pub const GRAVITY_IMPULSE: f32 = 0.008;
pub const DAMP_VX: f32 = 0.995;
pub const DAMP_VY: f32 = 0.999;
pub const SPEED_BASE: f32 = 0.45;
pub const SPEED_DRIFT_GAIN: f32 = 0.9;
pub const SPEED_STREAK_GAIN: f32 = 3.8;
pub const SPEED_FALL_GAIN: f32 = 2.0;

// Hero stars during the opening beat
pub const HERO_HOLD_PROGRESS: f32 = 0.22;
pub const HERO_DAMP: f32 = 0.6;
pub const HERO_EASE: f32 = 0.2;
pub const HERO_OSC_FREQ: f32 = 0.7;
pub const HERO_OSC_X: f32 = 0.06;
pub const HERO_OSC_Y: f32 = 0.04;

// Boundary wrap / respawn
pub const WRAP_MARGIN: f32 = 40.0;
pub const RESPAWN_SPREAD: f32 = 0.6;
pub const RESPAWN_DAMP: f32 = 0.6;
pub const SCROLL_EPS: f32 = 0.0004;

// Shape attraction
pub const CARD_EASE_BASE: f32 = 0.05;
pub const CARD_EASE_GAIN: f32 = 0.26;
pub const HEART_EASE_BASE: f32 = 0.04;
pub const HEART_EASE_GAIN: f32 = 0.30;
pub const FREEZE_DAMP: f32 = 0.85;
pub const FREEZE_EASE: f32 = 0.35;

// Dispersion when leaving the card silhouette
pub const DISPERSE_THRESHOLD: f32 = 0.7;
pub const REPULSE_BASE: f32 = 0.02;
pub const REPULSE_GAIN: f32 = 0.085;
pub const JITTER_FREQ: f32 = 2.2;
pub const JITTER_BASE: f32 = 0.012;
pub const JITTER_GAIN: f32 = 0.3;
pub const SETTLE_DAMP: f32 = 0.94;
pub const SETTLE_GRAVITY: f32 = 0.006;

// Card-split burst (extended variant)
pub const BURST_REPULSE: f32 = 0.06;

// Twinkle / blink
pub const TWINKLE_BASE: f32 = 0.75;
pub const TWINKLE_AMP: f32 = 0.35;
pub const TWINKLE_FREQ_BASE: f32 = 1.2;
pub const TWINKLE_FREQ_SEED: f32 = 0.015;
pub const TWINKLE_PHASE_SEED: f32 = 12.3;
pub const BLINK_WINDOW: f32 = 0.10;

// Silhouette geometry
pub const CARD_MAX_W: f32 = 380.0;
pub const CARD_W_FRAC: f32 = 0.40;
pub const CARD_MAX_H: f32 = 500.0;
pub const CARD_H_FRAC: f32 = 0.60;
pub const CARD_RADIUS: f32 = 24.0;
pub const CARD_OFFSET_MIN: f32 = 160.0;
pub const CARD_OFFSET_MAX: f32 = 240.0;
pub const VS_RING_FRAC: f32 = 0.18;
pub const VS_RING_MIN: usize = 8;
pub const VS_RADIUS_MAX: f32 = 48.0;
pub const VS_RADIUS_FRAC: f32 = 0.06;
pub const VS_THICKNESS: f32 = 2.5;
pub const HEART_SCALE_FRAC: f32 = 0.017;
pub const HEART_CY_FRAC: f32 = 0.56;
pub const HERO_HEART_OFFSET_FRAC: f32 = 0.09;

// Rejection-sampling attempt budgets (per requested point)
pub const OUTLINE_ATTEMPTS: usize = 120;
pub const CIRCLE_ATTEMPTS: usize = 80;
pub const AREA_ATTEMPTS: usize = 70;

// Feature flag
pub const RUNTIME_CONFIGURABLE: bool = cfg!(feature = "configurable");
