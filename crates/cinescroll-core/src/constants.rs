use glam::DVec3;

// Shared choreography tuning constants used by every presentation preset.

// Scroll smoothing
pub const SCROLL_DAMPING: f64 = 0.1; // share of the remaining distance covered per reference frame
pub const REFERENCE_FRAME_RATE: f64 = 60.0; // refresh rate the damping factor is expressed at
pub const WHEEL_SENSITIVITY: f64 = -0.05; // wheel deltaY to scroll units; wheel down pulls the camera in

// Golden angle π(3 − √5) in radians
pub const GOLDEN_ANGLE: f64 = 2.399_963_229_728_653;

// Intro sphere page
pub const INTRO_SCROLL_START: f64 = 9.0;
pub const INTRO_SCROLL_MIN: f64 = 1.5; // closest the camera may get to the centre
pub const INTRO_SCROLL_MAX: f64 = 12.0;
pub const INTRO_REVEAL_DEPTH: f64 = 3.0; // camera depth below which the intro copy shows
pub const INTRO_TRAIL_COUNT: usize = 40;

// Intro exit (after the enter button)
pub const EXIT_DELAY_SEC: f64 = 0.6;
pub const SPHERE_EXIT_X: f64 = -20.0;
pub const SPHERE_EXIT_SEC: f64 = 3.0;
pub const CAMERA_EXIT_DEPTH: f64 = 0.5;
pub const CAMERA_EXIT_SEC: f64 = 1.5;
pub const EXIT_FINISH_SEC: f64 = 3.6; // host navigates away once reached

// Horizontal chapters page
pub const CHAPTER_OBJECTS_DISTANCE: f64 = 10.0; // world units between chapter tableaux
pub const CHAPTER_CAMERA_Z: f64 = 6.0;
pub const CHAPTER_FOV_DEGREES: f64 = 35.0;
pub const PARALLAX_GAIN: f64 = 0.5;
pub const PARALLAX_RATE: f64 = 5.0; // per second

// Particle field page
pub const PARTICLE_CAMERA_Z: f64 = 5.0;
pub const PARTICLE_SCROLL_SCALE: f64 = 0.1;
pub const PARTICLE_TRAIL_COUNT: usize = 100;

// Trails
pub const TRAIL_SPACING: f64 = 0.1;
pub const DEFAULT_FOV_DEGREES: f64 = 75.0;

// Image sphere
pub const SPHERE_SLOT_COUNT: usize = 50;
pub const SPHERE_CONTENT_COUNT: usize = 18;
pub const SPHERE_RADIUS: f64 = 3.0;
pub const SPHERE_JITTER: f64 = 0.15; // max per-axis tilt in radians
pub const SPHERE_START: [f64; 3] = [50.0, 0.0, -50.0];
pub const SPHERE_FLY_IN_SEC: f64 = 6.0;
pub const SPHERE_SPIN_SEC: f64 = 6.0;

// Torus tableaux and orbiting lights
pub const TORUS_MAJOR_RADIUS: f64 = 8.0;
pub const TORUS_MINOR_RADIUS: f64 = 0.06;
pub const TORUS_SCALE: f64 = 0.2;
pub const ORBIT_SPEED: f64 = 0.5;
pub const LEMNISCATE_RADIUS: f64 = 1.5;

// Particle palette (#D5BDBD, #E4E0DB)
pub const STAR_PALETTE: [[f32; 3]; 2] = [[0.835, 0.741, 0.741], [0.894, 0.878, 0.859]];
pub const STAR_FIELD_EXTENT: f64 = 200.0;

#[inline]
pub fn sphere_start_vec3() -> DVec3 {
    DVec3::new(SPHERE_START[0], SPHERE_START[1], SPHERE_START[2])
}
