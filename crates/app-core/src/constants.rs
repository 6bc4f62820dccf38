//! Scene layout and simulation tuning constants shared by the web frontend.
//!
//! Motion values are per-tick increments, not per-second rates: the reference
//! visuals assume one integration step per display refresh.

// Scene layout
pub const CAKE_BASE_Y: f32 = 1.1;
pub const CANDLE_TIP_LOCAL: [f32; 3] = [0.0, 0.85, 0.0]; // cake-local flame/smoke origin
pub const CANDLE_LIGHT_LOCAL: [f32; 3] = [0.0, 0.9, 0.0];
pub const CONFETTI_ORIGIN: [f32; 3] = [0.0, 1.5, 0.0]; // scene-global, above the cake
pub const AGE_LABEL_POS: [f32; 3] = [0.0, 1.5, 0.0];

// Candle light
pub const BASE_LIGHT_INTENSITY: f32 = 1.0;
pub const LIGHT_FADE_SEC: f32 = 0.5;

// Particle bursts
pub const SMOKE_COUNT: usize = 50;
pub const SMOKE_OPACITY: f32 = 0.5;
pub const SMOKE_FADE_PER_TICK: f32 = 0.005;
pub const SMOKE_JITTER_XZ: f32 = 0.005; // +/- per axis
pub const SMOKE_RISE_MIN: f32 = 0.02;
pub const SMOKE_RISE_SPAN: f32 = 0.05;

pub const CONFETTI_COUNT_MOBILE: usize = 800;
pub const CONFETTI_COUNT_DESKTOP: usize = 2000;
pub const CONFETTI_OPACITY: f32 = 0.8;
pub const CONFETTI_FADE_PER_TICK: f32 = 0.002;
pub const CONFETTI_GRAVITY_PER_TICK: f32 = -0.001;
pub const CONFETTI_JITTER_XZ: f32 = 0.05;
pub const CONFETTI_LAUNCH_MIN: f32 = 0.05;
pub const CONFETTI_LAUNCH_SPAN: f32 = 0.15;

// Pink / hot pink / gold, sampled uniformly per confetti particle
pub const CONFETTI_PALETTE: [[f32; 3]; 3] = [
    [1.0, 0.7529, 0.7961],
    [1.0, 0.4118, 0.7059],
    [1.0, 0.8431, 0.0],
];

// Ambient sparkle field
pub const SPARKLE_COUNT_MOBILE: usize = 250;
pub const SPARKLE_COUNT_DESKTOP: usize = 500;
pub const SPARKLE_SPREAD: f32 = 10.0; // points scattered in a +/- spread/2 cube
pub const SPARKLE_BASE_SIZE: f32 = 0.02;
pub const SPARKLE_PULSE_SIZE: f32 = 0.04;
pub const SPARKLE_PULSE_SEC: f32 = 1.5;

// Celebration schedule
pub const CELEBRATION_DELAY_SEC: f64 = 0.5;
pub const FLOWER_PULSE_SEC: f32 = 1.5;
pub const FLOWER_EMISSIVE_BASE: [f32; 3] = [0.2, 0.0, 0.0];
pub const FLOWER_EMISSIVE_PULSE: [f32; 3] = [0.8, 0.2, 0.3];
pub const CAMERA_DOLLY_SEC: f32 = 3.0;
pub const AGE_LABEL_SCALE_SEC: f32 = 2.0;
pub const AGE_LABEL_SPIN_SEC: f32 = 3.0;
pub const AGE_LABEL_START_SCALE: f32 = 0.01;
pub const MESSAGE_FADE_SEC: f32 = 1.5;
pub const MESSAGE_DELAY_SEC: f32 = 2.0;
pub const SUBLINE_DELAY_SEC: f32 = 2.5;
pub const MESSAGE_RISE_PX: f32 = 30.0; // overlay starts this far below its rest position

// Camera
pub const CAMERA_EYE: [f32; 3] = [0.0, 1.5, 5.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 1.0, 0.0];
pub const CAMERA_EYE_CLOSE: [f32; 3] = [0.0, 1.5, 3.5];
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Interaction
pub const FLAME_PICK_RADIUS: f32 = 0.12;
pub const FRAME_PICK_RADIUS: f32 = 0.4;
pub const HOVER_FADE_SEC: f32 = 0.3;
pub const HOVER_SCALE_GAIN: f32 = 0.1; // hovered frame grows to 1.1x
pub const FRAME_BASE_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const FRAME_HIGHLIGHT_COLOR: [f32; 3] = [1.0, 0.7529, 0.7961];

// Photo frame layout: (x, y, z, rotation about Y)
pub const FRAME_LAYOUT: [[f32; 4]; 5] = [
    [-1.5, 1.2, 0.0, std::f32::consts::FRAC_PI_4],
    [1.5, 1.3, 0.0, -std::f32::consts::FRAC_PI_4],
    [0.0, 1.4, -1.5, 0.0],
    [-1.0, 1.5, -1.0, std::f32::consts::PI / 8.0],
    [1.0, 1.1, -1.0, -std::f32::consts::PI / 8.0],
];

pub const FLOWER_LAYOUT: [[f32; 3]; 3] = [[-1.0, 1.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, -2.0]];

// Microphone blow detection
pub const BLOW_THRESHOLD: f32 = 100.0; // 0..255 band average
pub const BLOW_HOLD_FRAMES: u32 = 3;

pub const AGE_LABEL_TEXT: &str = "18";
