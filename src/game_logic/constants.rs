// Simulation timing
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0; // 60 Hz, one tick per rendered frame

// Track defaults
pub const DEFAULT_BASE_RADIUS: f32 = 900.0;
pub const DEFAULT_SEGMENTS: usize = 360;
pub const DEFAULT_LANE_WIDTH: f32 = 14.0;
pub const DEFAULT_LANE_COUNT: u32 = 3;
pub const DEFAULT_CURB_WIDTH: f32 = 2.5;
pub const DEFAULT_BANK_LIMIT: f32 = 0.35; // ~20 degrees
pub const DEFAULT_BANK_RESPONSIVENESS: f32 = 6.0;
pub const WORLD_MARGIN: f32 = 200.0;

// Physics constants (per-second units, integrated as velocity * dt)
pub const MAX_SPEED: f32 = 90.0;
pub const ACCEL_RATE: f32 = 40.0;
pub const MIN_STEER_RATE: f32 = 0.6;
pub const MAX_STEER_RATE: f32 = 1.8;
pub const GRIP: f32 = 8.0;
pub const DRIFT_RETENTION: f32 = 0.12;
pub const FISHTAIL_IMPULSE: f32 = 6.0;
pub const OFF_TRACK_FRACTION: f32 = 0.95;
pub const OFF_TRACK_DRAG: f32 = 1.5;
pub const EDGE_MARGIN: f32 = 3.0;
pub const EDGE_PUSH: f32 = 4.0;
pub const EDGE_FRICTION: f32 = 2.0;
pub const ORIENTATION_BLEND_RATE: f32 = 9.0;
pub const YAW_ALIGN_RATE: f32 = 0.6;

// Boost economy
pub const BOOST_BONUS_FACTOR: f32 = 0.8;
pub const BOOST_SPEED_FACTOR: f32 = 1.35;
pub const BOOST_DRAIN_RATE: f32 = 0.6;
pub const BOOST_RECHARGE_RATE: f32 = 0.2;
pub const BOOST_EPSILON: f32 = 0.01;

// Lap detection
pub const LAP_COOLDOWN_SECS: f32 = 2.0;
pub const LAP_SEAM_FRACTION: f32 = 0.2;
pub const TOTAL_LAPS: u32 = 3;
