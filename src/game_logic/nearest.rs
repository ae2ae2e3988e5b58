use crate::game_logic::{Frame, FrameSequence};
use bevy::prelude::*;

// Both searches are linear scans over the unique frames and run twice per tick.
// Fine for a few hundred segments; a much denser track wants a spatial index
// keyed by arc length instead.
impl FrameSequence {
    /// Frame closest to `position` ignoring elevation, as `(index, squared distance)`.
    ///
    /// Used for lap detection, where a banked climb must not pull the match
    /// onto a frame further along the loop.
    pub fn nearest_planar(&self, position: Vec3) -> (usize, f32) {
        let target = Vec2::new(position.x, position.z);
        self.nearest_by(|frame| {
            Vec2::new(frame.position.x, frame.position.z).distance_squared(target)
        })
    }

    /// Frame closest to `position` in full 3D, as `(index, squared distance)`.
    pub fn nearest_spatial(&self, position: Vec3) -> (usize, f32) {
        self.nearest_by(|frame| frame.position.distance_squared(position))
    }

    /// Snap `position` onto the road plane of its nearest 3D frame by removing
    /// the offset along that frame's normal. Returns the snapped point and the
    /// frame index used.
    pub fn project_onto_surface(&self, position: Vec3) -> (Vec3, usize) {
        let (index, _) = self.nearest_spatial(position);
        let frame = self.frame(index);
        let height = (position - frame.position).dot(frame.normal);
        (position - frame.normal * height, index)
    }

    fn nearest_by(&self, distance: impl Fn(&Frame) -> f32) -> (usize, f32) {
        self.unique_frames()
            .iter()
            .enumerate()
            .map(|(i, frame)| (i, distance(frame)))
            .fold((0, f32::INFINITY), |best, candidate| {
                if candidate.1 < best.1 { candidate } else { best }
            })
    }
}
