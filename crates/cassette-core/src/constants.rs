use glam::Vec3;

// Shared layout/animation tuning constants used by the showcase.

// Camera
pub const CAMERA_FOVY_DEG: f32 = 10.0; // narrow lens, product-shot look
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const CAMERA_EYE: [f32; 3] = [0.0, 15.0, 30.0];
pub const CAMERA_TARGET: [f32; 3] = [0.0, 0.0, 0.0];
pub const FRAMING_TARGET_LIFT: f32 = 0.3; // aim slightly above the group center
pub const FRAMING_MARGIN: f32 = 1.15; // bounding sphere padding when pulling back

// Scene layout
pub const GROUP_YAW_DEG: f32 = -45.0; // model group rotation about Y
pub const SLOT_SPACING_Z: f32 = -0.5; // per-slot z offset so cassettes don't overlap

// Floating idle motion
pub const FLOAT_AMPLITUDE: f32 = 0.1;
pub const FLOAT_HALF_PERIOD_SEC: f32 = 1.0;
pub const FLOAT_PHASE_STEP_SEC: f32 = 0.2; // per-index delay so the group doesn't bob in unison

// Pointer interaction
pub const HOVER_OFFSET: f32 = 0.1;
pub const HOVER_DURATION_SEC: f32 = 0.3;
pub const CLICK_OFFSET: f32 = 0.3;
pub const CLICK_DURATION_SEC: f32 = 0.5;

// Detail panel
pub const PANEL_FADE_SEC: f32 = 0.4;

// Ambient marquee text
pub const MARQUEE_PERIOD_SEC: f32 = 10.0;
pub const MARQUEE_TRAVEL_PERCENT: f32 = -100.0;

#[inline]
pub fn camera_eye_vec3() -> Vec3 {
    Vec3::from_array(CAMERA_EYE)
}

#[inline]
pub fn camera_target_vec3() -> Vec3 {
    Vec3::from_array(CAMERA_TARGET)
}
