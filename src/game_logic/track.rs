use crate::game_logic::{
    DEFAULT_BANK_LIMIT, DEFAULT_BANK_RESPONSIVENESS, DEFAULT_BASE_RADIUS, DEFAULT_CURB_WIDTH,
    DEFAULT_LANE_COUNT, DEFAULT_LANE_WIDTH, DEFAULT_SEGMENTS, WORLD_MARGIN,
};
use bevy::prelude::*;
use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, TAU};
use thiserror::Error;

const ORTHONORMAL_TOLERANCE: f32 = 1e-3;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackError {
    #[error("invalid track params: {0}")]
    InvalidParams(String),
    #[error("frame {index} does not form an orthonormal basis")]
    NumericDegeneracy { index: usize },
}

/// One term of a harmonic perturbation: `amplitude * sin(order * theta + phase)`.
///
/// `order` is an integer so the perturbation repeats exactly once around the loop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    pub amplitude: f32,
    pub order: u32,
    pub phase: f32,
}

impl Harmonic {
    pub const ZERO: Self = Self {
        amplitude: 0.0,
        order: 1,
        phase: 0.0,
    };

    pub fn new(amplitude: f32, order: u32, phase: f32) -> Self {
        Self {
            amplitude,
            order,
            phase,
        }
    }

    pub fn sample(&self, theta: f32) -> f32 {
        self.amplitude * (self.order as f32 * theta + self.phase).sin()
    }
}

/// Inputs to track generation. Immutable for the duration of a race.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackParams {
    pub base_radius: f32,
    pub radial: [Harmonic; 2],
    pub height: [Harmonic; 2],
    pub lane_width: f32,
    pub lane_count: u32,
    pub curb_width: f32,
    /// Maximum bank angle in radians, must lie in (0, pi/2)
    pub bank_limit: f32,
    pub bank_responsiveness: f32,
    pub segments: usize,
}

impl Default for TrackParams {
    fn default() -> Self {
        Self {
            base_radius: DEFAULT_BASE_RADIUS,
            radial: [Harmonic::new(110.0, 3, 0.0), Harmonic::new(45.0, 5, 1.1)],
            height: [Harmonic::new(18.0, 2, 0.0), Harmonic::new(8.0, 3, 0.9)],
            lane_width: DEFAULT_LANE_WIDTH,
            lane_count: DEFAULT_LANE_COUNT,
            curb_width: DEFAULT_CURB_WIDTH,
            bank_limit: DEFAULT_BANK_LIMIT,
            bank_responsiveness: DEFAULT_BANK_RESPONSIVENESS,
            segments: DEFAULT_SEGMENTS,
        }
    }
}

impl TrackParams {
    /// Default params with the harmonic terms drawn from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        Self::default().seeded(seed)
    }

    /// Keep the road dimensions of `self` but redraw the radial and height
    /// harmonics from `seed`. Radial amplitudes sum to at most 22% of the base
    /// radius, so the result always passes validation.
    pub fn seeded(&self, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let base = self.base_radius;

        let radial = [
            Harmonic::new(
                base * rng.random_range(0.05..0.15),
                rng.random_range(2..=4),
                rng.random_range(0.0..TAU),
            ),
            Harmonic::new(
                base * rng.random_range(0.02..0.07),
                rng.random_range(5..=7),
                rng.random_range(0.0..TAU),
            ),
        ];
        let height = [
            Harmonic::new(
                rng.random_range(10.0..30.0),
                rng.random_range(1..=3),
                rng.random_range(0.0..TAU),
            ),
            Harmonic::new(
                rng.random_range(4.0..12.0),
                rng.random_range(3..=5),
                rng.random_range(0.0..TAU),
            ),
        ];

        Self {
            radial,
            height,
            ..self.clone()
        }
    }

    pub fn radius_at(&self, theta: f32) -> f32 {
        self.base_radius + self.radial.iter().map(|h| h.sample(theta)).sum::<f32>()
    }

    pub fn height_at(&self, theta: f32) -> f32 {
        self.height.iter().map(|h| h.sample(theta)).sum()
    }

    pub fn centerline_point(&self, theta: f32) -> Vec3 {
        let radius = self.radius_at(theta);
        Vec3::new(radius * theta.cos(), self.height_at(theta), radius * theta.sin())
    }

    pub fn road_half_width(&self) -> f32 {
        self.lane_width * self.lane_count as f32 / 2.0
    }

    pub fn validate(&self) -> Result<(), TrackError> {
        let invalid = |reason: String| Err(TrackError::InvalidParams(reason));

        if self.segments < 3 {
            return invalid(format!("segment count {} is below 3", self.segments));
        }
        if !(self.base_radius.is_finite() && self.base_radius > 0.0) {
            return invalid(format!("base radius {} must be positive", self.base_radius));
        }
        if !(self.lane_width.is_finite() && self.lane_width > 0.0) {
            return invalid(format!("lane width {} must be positive", self.lane_width));
        }
        if self.lane_count == 0 {
            return invalid("lane count must be at least 1".to_string());
        }
        if !(self.curb_width.is_finite() && self.curb_width > 0.0) {
            return invalid(format!("curb width {} must be positive", self.curb_width));
        }
        if !(self.bank_limit > 0.0 && self.bank_limit < FRAC_PI_2) {
            return invalid(format!("bank limit {} is outside (0, pi/2)", self.bank_limit));
        }
        if !(self.bank_responsiveness.is_finite() && self.bank_responsiveness >= 0.0) {
            return invalid(format!(
                "bank responsiveness {} must be finite and non-negative",
                self.bank_responsiveness
            ));
        }
        let mut terms = self.radial.iter().chain(self.height.iter());
        if terms.any(|h| !(h.amplitude.is_finite() && h.phase.is_finite())) {
            return invalid("harmonic terms must be finite".to_string());
        }

        // Cheap bound first, dense sampling only when the amplitudes could reach the center
        let worst_case = self.base_radius - self.radial.iter().map(|h| h.amplitude.abs()).sum::<f32>();
        if worst_case > 0.0 {
            return Ok(());
        }
        let samples = (self.segments * 8).max(1440);
        for s in 0..samples {
            let theta = TAU * s as f32 / samples as f32;
            let radius = self.radius_at(theta);
            if radius <= 0.0 {
                return invalid(format!(
                    "radius {radius:.2} at theta {theta:.3} is not positive"
                ));
            }
        }
        Ok(())
    }
}

/// An oriented point on the centerline.
///
/// `{tangent, lateral, normal}` is a right-handed orthonormal basis:
/// `normal = tangent x lateral` is the road's local up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub position: Vec3,
    pub tangent: Vec3,
    pub lateral: Vec3,
    pub normal: Vec3,
    pub bank_angle: f32,
}

impl Frame {
    /// Rotation taking local X/Y/Z to lateral/normal/tangent.
    pub fn rotation(&self) -> Quat {
        Quat::from_mat3(&Mat3::from_cols(self.lateral, self.normal, self.tangent)).normalize()
    }

    /// Yaw of the tangent using the kart's heading convention, forward = (sin, 0, cos).
    pub fn heading(&self) -> f32 {
        self.tangent.x.atan2(self.tangent.z)
    }

    pub fn offset_point(&self, lateral_offset: f32) -> Vec3 {
        self.position + self.lateral * lateral_offset
    }

    pub fn is_orthonormal(&self, tolerance: f32) -> bool {
        let axes = [self.tangent, self.lateral, self.normal];
        let finite = axes.iter().all(|a| a.is_finite()) && self.position.is_finite();
        finite
            && axes.iter().all(|a| (a.length() - 1.0).abs() < tolerance)
            && self.tangent.dot(self.lateral).abs() < tolerance
            && self.tangent.dot(self.normal).abs() < tolerance
            && self.lateral.dot(self.normal).abs() < tolerance
    }
}

/// Closed, cyclic sequence of frames produced by [`generate`].
///
/// Holds `N + 1` frames where frame `N` is a copy of frame 0, so strip builders
/// can walk `0..=N` without a seam. Queries work on the `N` unique frames.
#[derive(Resource, Clone, Debug)]
pub struct FrameSequence {
    frames: Vec<Frame>,
    lane_width: f32,
    lane_count: u32,
    curb_width: f32,
    bank_limit: f32,
    bounds_min: Vec3,
    bounds_max: Vec3,
}

impl FrameSequence {
    /// Number of unique frames, N.
    pub fn segment_count(&self) -> usize {
        self.frames.len() - 1
    }

    /// All `N + 1` frames, including the closing copy of frame 0.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn unique_frames(&self) -> &[Frame] {
        &self.frames[..self.segment_count()]
    }

    /// Frame at `index`, wrapping cyclically.
    pub fn frame(&self, index: usize) -> &Frame {
        &self.frames[index % self.segment_count()]
    }

    pub fn half_width(&self) -> f32 {
        self.lane_width * self.lane_count as f32 / 2.0
    }

    pub fn lane_width(&self) -> f32 {
        self.lane_width
    }

    pub fn lane_count(&self) -> u32 {
        self.lane_count
    }

    pub fn curb_width(&self) -> f32 {
        self.curb_width
    }

    pub fn bank_limit(&self) -> f32 {
        self.bank_limit
    }

    /// Lateral offset of a lane's center from the centerline. Lanes wrap.
    pub fn lane_center_offset(&self, lane: u32) -> f32 {
        let lane = lane % self.lane_count;
        (lane as f32 + 0.5) * self.lane_width - self.half_width()
    }

    /// Point at frame `index` moved `lateral_offset` along its lateral axis.
    pub fn point_at(&self, index: usize, lateral_offset: f32) -> Vec3 {
        self.frame(index).offset_point(lateral_offset)
    }

    /// World bounding box: centerline extents grown by the road and a margin.
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (self.bounds_min, self.bounds_max)
    }
}

fn bank_angle(before: Vec3, after: Vec3, responsiveness: f32, limit: f32) -> f32 {
    let a = Vec2::new(before.x, before.z).normalize_or_zero();
    let b = Vec2::new(after.x, after.z).normalize_or_zero();
    let turn = a.perp_dot(b).atan2(a.dot(b));
    (turn * responsiveness).clamp(-limit, limit)
}

/// Build the banked centerline for `params`.
pub fn generate(params: &TrackParams) -> Result<FrameSequence, TrackError> {
    params.validate()?;
    let n = params.segments;

    let points: Vec<Vec3> = (0..n)
        .map(|i| params.centerline_point(TAU * i as f32 / n as f32))
        .collect();

    // central difference over the cycle
    let tangents: Vec<Vec3> = (0..n)
        .map(|i| (points[(i + 1) % n] - points[(i + n - 1) % n]).normalize_or_zero())
        .collect();

    let mut frames = Vec::with_capacity(n + 1);
    for i in 0..n {
        let tangent = tangents[i];
        if tangent == Vec3::ZERO {
            return Err(TrackError::NumericDegeneracy { index: i });
        }

        let bank = bank_angle(
            tangents[(i + n - 1) % n],
            tangents[(i + 1) % n],
            params.bank_responsiveness,
            params.bank_limit,
        );
        let banked_up = Quat::from_axis_angle(tangent, bank) * Vec3::Y;
        let lateral = banked_up.cross(tangent).normalize_or_zero();
        let normal = tangent.cross(lateral);

        let frame = Frame {
            position: points[i],
            tangent,
            lateral,
            normal,
            bank_angle: bank,
        };
        if !frame.is_orthonormal(ORTHONORMAL_TOLERANCE) {
            return Err(TrackError::NumericDegeneracy { index: i });
        }
        frames.push(frame);
    }
    frames.push(frames[0]);

    let (mut lo, mut hi) = (Vec3::splat(f32::INFINITY), Vec3::splat(f32::NEG_INFINITY));
    for p in &points {
        lo = lo.min(*p);
        hi = hi.max(*p);
    }
    let reach = params.road_half_width() + params.curb_width + WORLD_MARGIN;
    let grow = Vec3::new(reach, WORLD_MARGIN, reach);

    Ok(FrameSequence {
        frames,
        lane_width: params.lane_width,
        lane_count: params.lane_count,
        curb_width: params.curb_width,
        bank_limit: params.bank_limit,
        bounds_min: lo - grow,
        bounds_max: hi + grow,
    })
}
