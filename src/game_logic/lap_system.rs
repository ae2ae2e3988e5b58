use crate::game_logic::LAP_SEAM_FRACTION;

/// A completed lap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LapEvent {
    /// Race clock when the start frame was crossed
    pub at: f32,
    pub lap_time: f32,
}

/// Turns a stream of nearest-frame indices into lap events.
///
/// A lap counts when the index jumps from the last fifth of the loop into the
/// first fifth and the cooldown since the previous lap has elapsed. A jump the
/// other way (reversing over the line) is remembered, and the next forward
/// jump only pays it back instead of counting.
#[derive(Clone, Debug)]
pub struct LapTracker {
    prev_index: usize,
    last_lap_at: f32,
    cooldown: f32,
    reverse_debt: u32,
}

impl LapTracker {
    pub fn new(start_index: usize, cooldown: f32, now: f32) -> Self {
        Self {
            prev_index: start_index,
            last_lap_at: now,
            cooldown: cooldown.max(0.0),
            reverse_debt: 0,
        }
    }

    pub fn prev_index(&self) -> usize {
        self.prev_index
    }

    /// Feed the nearest index for this tick. `segment_count` is N for the loop.
    pub fn observe(&mut self, index: usize, segment_count: usize, now: f32) -> Option<LapEvent> {
        let prev = std::mem::replace(&mut self.prev_index, index);
        // Each band holds at least one index, so short loops still wrap
        let band = ((segment_count as f32 * LAP_SEAM_FRACTION).ceil() as usize).max(1);
        let end_start = segment_count.saturating_sub(band);
        let near_start = |i: usize| i < band;
        let near_end = |i: usize| i >= end_start;

        if near_start(prev) && near_end(index) {
            self.reverse_debt += 1;
            return None;
        }
        if !(near_end(prev) && near_start(index)) {
            return None;
        }
        if self.reverse_debt > 0 {
            self.reverse_debt -= 1;
            return None;
        }
        if now - self.last_lap_at < self.cooldown {
            return None;
        }

        let lap_time = now - self.last_lap_at;
        self.last_lap_at = now;
        Some(LapEvent { at: now, lap_time })
    }
}
