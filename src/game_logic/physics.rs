use crate::game_logic::{
    ACCEL_RATE, BOOST_BONUS_FACTOR, BOOST_DRAIN_RATE, BOOST_EPSILON, BOOST_RECHARGE_RATE,
    BOOST_SPEED_FACTOR, DRIFT_RETENTION, EDGE_FRICTION, EDGE_MARGIN, EDGE_PUSH, FISHTAIL_IMPULSE,
    FrameSequence, GRIP, LapTracker, MAX_SPEED, MAX_STEER_RATE,
    MIN_STEER_RATE, OFF_TRACK_DRAG, OFF_TRACK_FRACTION, ORIENTATION_BLEND_RATE, YAW_ALIGN_RATE,
};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::{PI, TAU};
use thiserror::Error;

// Longest step a single tick will integrate; a stalled frame is not replayed at full length
const MAX_TICK_DT: f32 = 0.1;

/// Input state for one simulation tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlVector {
    /// -0.6 (full brake/reverse) to 1.0 (full throttle)
    pub throttle: f32,
    /// -1, 0 or 1. Positive steer decreases yaw.
    pub steer: i8,
    pub boost: bool,
}

impl ControlVector {
    pub fn clamped(self) -> Self {
        let throttle = if self.throttle.is_finite() {
            self.throttle.clamp(-0.6, 1.0)
        } else {
            0.0
        };
        Self {
            throttle,
            steer: self.steer.signum(),
            boost: self.boost,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("invalid vehicle config: {0}")]
pub struct VehicleConfigError(pub String);

/// Tuning for the kart integrator. Rates are per second.
#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub max_speed: f32,
    pub accel: f32,
    pub min_steer_rate: f32,
    pub max_steer_rate: f32,
    pub grip: f32,
    pub drift_retention: f32,
    pub fishtail_impulse: f32,
    pub off_track_fraction: f32,
    pub off_track_drag: f32,
    pub edge_margin: f32,
    pub edge_push: f32,
    pub edge_friction: f32,
    pub orientation_blend_rate: f32,
    pub yaw_align_rate: f32,
    pub boost_bonus_factor: f32,
    pub boost_speed_factor: f32,
    pub boost_drain_rate: f32,
    pub boost_recharge_rate: f32,
    pub boost_epsilon: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            max_speed: MAX_SPEED,
            accel: ACCEL_RATE,
            min_steer_rate: MIN_STEER_RATE,
            max_steer_rate: MAX_STEER_RATE,
            grip: GRIP,
            drift_retention: DRIFT_RETENTION,
            fishtail_impulse: FISHTAIL_IMPULSE,
            off_track_fraction: OFF_TRACK_FRACTION,
            off_track_drag: OFF_TRACK_DRAG,
            edge_margin: EDGE_MARGIN,
            edge_push: EDGE_PUSH,
            edge_friction: EDGE_FRICTION,
            orientation_blend_rate: ORIENTATION_BLEND_RATE,
            yaw_align_rate: YAW_ALIGN_RATE,
            boost_bonus_factor: BOOST_BONUS_FACTOR,
            boost_speed_factor: BOOST_SPEED_FACTOR,
            boost_drain_rate: BOOST_DRAIN_RATE,
            boost_recharge_rate: BOOST_RECHARGE_RATE,
            boost_epsilon: BOOST_EPSILON,
        }
    }
}

impl VehicleConfig {
    /// Reject tunings that would turn the integrator unstable or produce NaN.
    pub fn validate(&self) -> Result<(), VehicleConfigError> {
        let invalid = |reason: String| Err(VehicleConfigError(reason));

        if !(self.max_speed.is_finite() && self.max_speed > 0.0) {
            return invalid(format!("max speed {} must be positive", self.max_speed));
        }
        let rates = [
            ("accel", self.accel),
            ("min_steer_rate", self.min_steer_rate),
            ("max_steer_rate", self.max_steer_rate),
            ("grip", self.grip),
            ("fishtail_impulse", self.fishtail_impulse),
            ("off_track_drag", self.off_track_drag),
            ("edge_margin", self.edge_margin),
            ("edge_push", self.edge_push),
            ("edge_friction", self.edge_friction),
            ("orientation_blend_rate", self.orientation_blend_rate),
            ("yaw_align_rate", self.yaw_align_rate),
            ("boost_bonus_factor", self.boost_bonus_factor),
            ("boost_drain_rate", self.boost_drain_rate),
            ("boost_recharge_rate", self.boost_recharge_rate),
            ("boost_epsilon", self.boost_epsilon),
        ];
        if let Some((name, value)) = rates
            .iter()
            .find(|(_, value)| !(value.is_finite() && *value >= 0.0))
        {
            return invalid(format!("{name} {value} must be finite and non-negative"));
        }
        if !(0.0..=1.0).contains(&self.drift_retention) {
            return invalid(format!("drift retention {} is outside [0, 1]", self.drift_retention));
        }
        if !(self.off_track_fraction.is_finite() && self.off_track_fraction > 0.0) {
            return invalid(format!(
                "off-track fraction {} must be positive",
                self.off_track_fraction
            ));
        }
        if !(self.boost_speed_factor.is_finite() && self.boost_speed_factor >= 1.0) {
            return invalid(format!(
                "boost speed factor {} must be at least 1",
                self.boost_speed_factor
            ));
        }
        Ok(())
    }
}

/// Physics state of one kart. Only [`apply_physics`] mutates it.
#[derive(Component, Clone, Debug)]
pub struct VehicleState {
    position: Vec3,
    velocity: Vec3,
    yaw: f32,
    orientation: Quat,
    boost_charge: f32,
    lap_count: u32,
    race_time: f32,
    laps: LapTracker,
}

impl VehicleState {
    /// Kart on the centerline of frame 0, facing along the track.
    pub fn new(frames: &FrameSequence, lap_cooldown: f32) -> Self {
        Self::at_offset(frames, 0.0, lap_cooldown)
    }

    /// Kart at the center of lane `slot % lane_count` on frame 0.
    pub fn on_grid(frames: &FrameSequence, slot: u32, lap_cooldown: f32) -> Self {
        Self::at_offset(frames, frames.lane_center_offset(slot), lap_cooldown)
    }

    fn at_offset(frames: &FrameSequence, lateral_offset: f32, lap_cooldown: f32) -> Self {
        let start = frames.frame(0);
        Self {
            position: start.offset_point(lateral_offset),
            velocity: Vec3::ZERO,
            yaw: start.heading(),
            orientation: start.rotation(),
            boost_charge: 1.0,
            lap_count: 1,
            race_time: 0.0,
            laps: LapTracker::new(0, lap_cooldown, 0.0),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn boost_charge(&self) -> f32 {
        self.boost_charge
    }

    /// Lap currently being driven, starting at 1
    pub fn lap_count(&self) -> u32 {
        self.lap_count
    }

    pub fn race_time(&self) -> f32 {
        self.race_time
    }

    pub fn prev_nearest_index(&self) -> usize {
        self.laps.prev_index()
    }

    pub fn has_finished(&self, total_laps: u32) -> bool {
        self.lap_count > total_laps
    }
}

/// What happened during one tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    pub boosting: bool,
    /// Speed cap in effect this tick
    pub max_speed: f32,
    pub nearest_index: usize,
    pub nearest_distance_sq: f32,
    /// Planar distance from the centerline, across the road
    pub centerline_offset: f32,
    pub off_track: bool,
    pub surface_index: usize,
    pub completed_lap: Option<CompletedLap>,
}

/// Lap finished during a tick
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompletedLap {
    /// 1 for the first lap
    pub number: u32,
    pub lap_time: f32,
    /// Race clock at the crossing
    pub at: f32,
}

impl TickReport {
    /// Whether this tick's lap was the last one of a `total_laps` race.
    pub fn finishes_race(&self, total_laps: u32) -> bool {
        matches!(self.completed_lap, Some(lap) if lap.number >= total_laps)
    }
}

/// Wrap an angle into `[-PI, PI)`.
pub fn wrap_angle(angle: f32) -> f32 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Advance one kart by `dt` seconds.
///
/// Integration is `position += velocity * dt`; damping factors are applied as
/// `(1 - rate * dt)`. The steps run in a fixed order so replays are
/// deterministic. Out-of-range controls and time steps are clamped.
pub fn apply_physics(
    state: &mut VehicleState,
    controls: ControlVector,
    dt: f32,
    frames: &FrameSequence,
    config: &VehicleConfig,
) -> TickReport {
    let controls = controls.clamped();
    let dt = if dt.is_finite() { dt.clamp(0.0, MAX_TICK_DT) } else { 0.0 };
    state.race_time += dt;

    // Heading
    let forward = Vec3::new(state.yaw.sin(), 0.0, state.yaw.cos());
    let right = Vec3::new(state.yaw.cos(), 0.0, -state.yaw.sin());

    // Steering authority grows with speed
    let speed_fraction = if config.max_speed > 0.0 {
        (state.velocity.length() / config.max_speed).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let steer_rate =
        config.min_steer_rate + (config.max_steer_rate - config.min_steer_rate) * speed_fraction;
    let steer = controls.steer as f32;
    state.yaw -= steer * steer_rate * dt;

    // Throttle / brake
    state.velocity += forward * controls.throttle * config.accel * dt;

    // Boost
    let boosting = controls.boost && state.boost_charge > config.boost_epsilon;
    if boosting {
        state.velocity += forward * config.accel * config.boost_bonus_factor * dt;
        state.boost_charge = (state.boost_charge - config.boost_drain_rate * dt).max(0.0);
    } else {
        state.boost_charge = (state.boost_charge + config.boost_recharge_rate * dt).min(1.0);
    }
    let max_speed = if boosting {
        config.max_speed * config.boost_speed_factor
    } else {
        config.max_speed
    };

    // Fishtail: rear slides out against the turn
    if controls.steer != 0 {
        state.velocity += right * steer * config.fishtail_impulse * speed_fraction * dt;
    }

    // Grip keeps only part of the sideways slide
    let lateral_speed = state.velocity.dot(right);
    let grip = (config.grip * dt).min(1.0);
    let kept = config.drift_retention + (1.0 - config.drift_retention) * (1.0 - grip);
    state.velocity -= right * lateral_speed * (1.0 - kept);

    state.velocity = state.velocity.clamp_length_max(max_speed);

    // Laps use the planar match so climbs cannot skip frames
    let (nearest_index, nearest_distance_sq) = frames.nearest_planar(state.position);
    let completed_lap = state
        .laps
        .observe(nearest_index, frames.segment_count(), state.race_time)
        .map(|event| {
            state.lap_count += 1;
            CompletedLap {
                number: state.lap_count - 1,
                lap_time: event.lap_time,
                at: event.at,
            }
        });

    // Off-track drag, measured across the road rather than to the frame vertex
    let nearest = frames.frame(nearest_index);
    let across = Vec3::new(nearest.tangent.z, 0.0, -nearest.tangent.x).normalize_or_zero();
    let centerline_offset = (state.position - nearest.position).dot(across).abs();
    let off_track = centerline_offset > frames.half_width() * config.off_track_fraction;
    if off_track {
        state.velocity *= (1.0 - config.off_track_drag * dt).max(0.0);
    }

    state.position += state.velocity * dt;

    // Snap onto the road plane
    let (projected, surface_index) = frames.project_onto_surface(state.position);
    state.position = projected;
    let frame = *frames.frame(surface_index);

    // Soft edge containment
    let offset = (state.position - frame.position).dot(frame.lateral);
    let edge = frames.half_width() + config.edge_margin;
    if offset.abs() > edge {
        let overshoot = offset.abs() - edge;
        state.velocity -= frame.lateral * offset.signum() * overshoot * config.edge_push * dt;
        state.velocity *= (1.0 - config.edge_friction * dt).max(0.0);
        state.velocity = state.velocity.clamp_length_max(max_speed);
    }

    // Orientation: planted on the road, facing the steering yaw
    let yaw_offset = wrap_angle(state.yaw - frame.heading());
    let target = frame.rotation() * Quat::from_rotation_y(yaw_offset);
    let blend = (config.orientation_blend_rate * dt).min(1.0);
    state.orientation = state.orientation.slerp(target, blend).normalize();
    let align = (config.yaw_align_rate * dt).min(1.0);
    state.yaw = wrap_angle(state.yaw - yaw_offset * align);

    // World bounds are inelastic
    let (lo, hi) = frames.bounds();
    for axis in 0..3 {
        if state.position[axis] < lo[axis] {
            state.position[axis] = lo[axis];
            state.velocity[axis] = 0.0;
        } else if state.position[axis] > hi[axis] {
            state.position[axis] = hi[axis];
            state.velocity[axis] = 0.0;
        }
    }

    TickReport {
        boosting,
        max_speed,
        nearest_index,
        nearest_distance_sq,
        centerline_offset,
        off_track,
        surface_index,
        completed_lap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_logic::{FIXED_TIMESTEP, Harmonic, LAP_COOLDOWN_SECS, TrackParams, generate};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    fn flat_circle(radius: f32) -> FrameSequence {
        generate(&TrackParams {
            base_radius: radius,
            radial: [Harmonic::ZERO; 2],
            height: [Harmonic::ZERO; 2],
            ..Default::default()
        })
        .unwrap()
    }

    fn full_throttle() -> ControlVector {
        ControlVector {
            throttle: 1.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_starts_on_frame_zero() {
        let frames = generate(&TrackParams::default()).unwrap();
        let state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        assert_eq!(state.position(), frames.frame(0).position);
        assert!((state.yaw() - frames.frame(0).heading()).abs() < 1e-6);
        assert_eq!(state.lap_count(), 1);
        assert_eq!(state.prev_nearest_index(), 0);
        assert_eq!(state.boost_charge(), 1.0);

        let grid = VehicleState::on_grid(&frames, 2, LAP_COOLDOWN_SECS);
        let offset = (grid.position() - frames.frame(0).position).dot(frames.frame(0).lateral);
        assert!((offset - frames.lane_center_offset(2)).abs() < 1e-3);
    }

    #[test]
    fn test_accelerates_to_max_speed_without_exceeding() {
        let frames = flat_circle(20_000.0);
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);

        let mut last_speed = 0.0;
        for _ in 0..240 {
            let report = apply_physics(&mut state, full_throttle(), FIXED_TIMESTEP, &frames, &config);
            assert!(!report.boosting);
            assert!(state.speed() <= config.max_speed + 1e-3);
            assert!(state.speed() >= last_speed - 1e-2);
            last_speed = state.speed();
        }
        assert!(state.speed() > config.max_speed * 0.98);
    }

    #[test]
    fn test_speed_cap_holds_under_random_controls() {
        let frames = generate(&TrackParams::from_seed(21)).unwrap();
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..3000 {
            let controls = ControlVector {
                throttle: rng.random_range(-1.0..1.5),
                steer: rng.random_range(-1..=1),
                boost: rng.random_bool(0.3),
            };
            let report = apply_physics(&mut state, controls, FIXED_TIMESTEP, &frames, &config);
            assert!(state.speed() <= report.max_speed + 1e-3);
            assert!((0.0..=1.0).contains(&state.boost_charge()));
            assert!(state.position().is_finite());
            assert!(state.lap_count() >= 1);
        }
    }

    #[test]
    fn test_boost_drains_then_stops() {
        let frames = flat_circle(20_000.0);
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        let controls = ControlVector {
            throttle: 1.0,
            steer: 0,
            boost: true,
        };

        let mut boosted_ticks = 0;
        let mut previous = state.boost_charge();
        loop {
            let report = apply_physics(&mut state, controls, FIXED_TIMESTEP, &frames, &config);
            if !report.boosting {
                assert_eq!(report.max_speed, config.max_speed);
                assert!(previous <= config.boost_epsilon);
                break;
            }
            assert_eq!(report.max_speed, config.max_speed * config.boost_speed_factor);
            assert!(state.boost_charge() < previous);
            previous = state.boost_charge();
            boosted_ticks += 1;
            assert!(boosted_ticks < 1000);
        }

        let boosted_secs = boosted_ticks as f32 * FIXED_TIMESTEP;
        let expected = 1.0 / config.boost_drain_rate;
        assert!((boosted_secs - expected).abs() < 3.0 * FIXED_TIMESTEP);
    }

    #[test]
    fn test_boost_recharges_when_released() {
        let frames = flat_circle(20_000.0);
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        state.boost_charge = 0.5;

        let mut previous = state.boost_charge();
        for _ in 0..600 {
            apply_physics(&mut state, full_throttle(), FIXED_TIMESTEP, &frames, &config);
            if previous < 1.0 {
                assert!(state.boost_charge() > previous);
            } else {
                assert_eq!(state.boost_charge(), 1.0);
            }
            previous = state.boost_charge();
        }
        assert_eq!(state.boost_charge(), 1.0);
    }

    #[test]
    fn test_steering_turns_yaw() {
        let frames = flat_circle(20_000.0);
        let config = VehicleConfig::default();
        let mut straight = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        let mut steered = straight.clone();

        let left = ControlVector {
            throttle: 1.0,
            steer: 1,
            boost: false,
        };
        for _ in 0..60 {
            apply_physics(&mut straight, full_throttle(), FIXED_TIMESTEP, &frames, &config);
            apply_physics(&mut steered, left, FIXED_TIMESTEP, &frames, &config);
        }
        assert!(steered.yaw() < straight.yaw() - 0.3);
    }

    #[test]
    fn test_grip_keeps_some_drift() {
        let frames = flat_circle(20_000.0);
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        let right = Vec3::new(state.yaw.cos(), 0.0, -state.yaw.sin());
        state.velocity = right * 10.0;

        apply_physics(&mut state, ControlVector::default(), FIXED_TIMESTEP, &frames, &config);
        let lateral = state.velocity().dot(right);
        assert!(lateral < 10.0);
        assert!(lateral > 10.0 * config.drift_retention);
    }

    #[test]
    fn test_off_track_drag() {
        let frames = flat_circle(900.0);
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        let start = *frames.frame(0);
        state.position = start.offset_point(frames.half_width() * 2.0);
        state.velocity = start.tangent * 50.0;

        let report = apply_physics(&mut state, ControlVector::default(), FIXED_TIMESTEP, &frames, &config);
        assert!(report.off_track);
        assert!(state.speed() < 50.0);
    }

    #[test]
    fn test_wide_frame_spacing_is_not_off_track() {
        // frames about 26 units apart; halfway between them the nearest vertex is far
        let frames = flat_circle(1500.0);
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        let offset = frames.half_width() - 3.0;
        state.position = (frames.frame(10).offset_point(offset) + frames.frame(11).offset_point(offset)) / 2.0;

        let report = apply_physics(&mut state, ControlVector::default(), FIXED_TIMESTEP, &frames, &config);
        let limit = frames.half_width() * config.off_track_fraction;
        assert!(report.nearest_distance_sq > limit * limit);
        assert!((report.centerline_offset - offset).abs() < 0.5);
        assert!(!report.off_track);
    }

    #[test]
    fn test_edge_containment_pushes_inward() {
        let frames = flat_circle(900.0);
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        let start = *frames.frame(0);
        state.position = start.offset_point(frames.half_width() + config.edge_margin + 20.0);

        apply_physics(&mut state, ControlVector::default(), FIXED_TIMESTEP, &frames, &config);
        assert!(state.velocity().dot(start.lateral) < 0.0);
    }

    #[test]
    fn test_stays_on_surface_over_hills() {
        let frames = generate(&TrackParams::from_seed(4)).unwrap();
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);

        for _ in 0..600 {
            let report = apply_physics(&mut state, full_throttle(), FIXED_TIMESTEP, &frames, &config);
            let frame = frames.frame(report.surface_index);
            let height = (state.position() - frame.position).dot(frame.normal);
            assert!(height.abs() < 1e-2);
        }
    }

    #[test]
    fn test_orientation_stays_unit_and_upright() {
        let frames = generate(&TrackParams::from_seed(8)).unwrap();
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);

        for _ in 0..300 {
            apply_physics(&mut state, full_throttle(), FIXED_TIMESTEP, &frames, &config);
            assert!((state.orientation().length() - 1.0).abs() < 1e-3);
            assert!((state.orientation() * Vec3::Y).y > 0.8);
        }
    }

    #[test]
    fn test_crossing_start_completes_lap() {
        let frames = flat_circle(900.0);
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        let near_end = *frames.frame(352);
        state.position = near_end.position;
        state.yaw = near_end.heading();
        state.velocity = near_end.tangent * 60.0;
        state.race_time = 30.0;
        state.laps = LapTracker::new(352, LAP_COOLDOWN_SECS, 0.0);

        let mut completed = Vec::new();
        for _ in 0..180 {
            let report = apply_physics(&mut state, full_throttle(), FIXED_TIMESTEP, &frames, &config);
            if report.completed_lap.is_some() {
                assert!(report.finishes_race(1));
                assert!(!report.finishes_race(3));
            }
            completed.extend(report.completed_lap.map(|lap| lap.number));
        }
        assert_eq!(completed, vec![1]);
        assert_eq!(state.lap_count(), 2);
        assert!(!state.has_finished(3));
        assert!(state.has_finished(1));
    }

    #[test]
    fn test_world_bounds_clamp() {
        let frames = flat_circle(900.0);
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        let (_, hi) = frames.bounds();
        state.position = Vec3::new(hi.x + 50.0, 0.0, 0.0);
        state.velocity = Vec3::new(80.0, 0.0, 0.0);

        apply_physics(&mut state, ControlVector::default(), FIXED_TIMESTEP, &frames, &config);
        assert!(state.position().x <= hi.x);
        assert_eq!(state.velocity().x, 0.0);
    }

    #[test]
    fn test_bad_inputs_are_clamped() {
        let frames = flat_circle(900.0);
        let config = VehicleConfig::default();
        let mut state = VehicleState::new(&frames, LAP_COOLDOWN_SECS);
        let wild = ControlVector {
            throttle: f32::NAN,
            steer: 100,
            boost: false,
        };
        assert_eq!(wild.clamped().throttle, 0.0);
        assert_eq!(wild.clamped().steer, 1);

        apply_physics(&mut state, wild, f32::INFINITY, &frames, &config);
        assert!(state.position().is_finite());
        assert_eq!(state.race_time(), 0.0);
    }
}
