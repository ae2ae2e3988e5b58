use crate::game_logic::VehicleState;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-tick pose of one kart, as sent to the other participants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct KartPose {
    pub player_id: u32,
    pub tick: u64,
    pub position: [f32; 3],
    /// Quaternion as x, y, z, w
    pub rotation: [f32; 4],
    pub lap: u32,
    pub boost_charge: f32,
}

impl KartPose {
    pub fn from_state(player_id: u32, tick: u64, state: &VehicleState) -> Self {
        Self {
            player_id,
            tick,
            position: state.position().to_array(),
            rotation: state.orientation().to_array(),
            lap: state.lap_count(),
            boost_charge: state.boost_charge(),
        }
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_array(self.rotation).normalize()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum NetworkMessage {
    RaceStart { seed: u64 },
    Pose(KartPose),
}

/// One JSON object per line.
pub fn encode_message(message: &NetworkMessage) -> Result<String, serde_json::Error> {
    let mut line = serde_json::to_string(message)?;
    line.push('\n');
    Ok(line)
}

pub fn decode_message(line: &str) -> Result<NetworkMessage, serde_json::Error> {
    serde_json::from_str(line.trim())
}

/// Latest known pose of every remote kart
#[derive(Resource, Default)]
pub struct RemotePoses {
    pub poses: HashMap<u32, KartPose>,
}

impl RemotePoses {
    /// Store `pose` unless a newer one from the same player is already held.
    /// Returns whether it was stored.
    pub fn apply(&mut self, pose: KartPose) -> bool {
        match self.poses.get(&pose.player_id) {
            Some(existing) if existing.tick >= pose.tick => false,
            _ => {
                self.poses.insert(pose.player_id, pose);
                true
            }
        }
    }

    pub fn get(&self, player_id: u32) -> Option<&KartPose> {
        self.poses.get(&player_id)
    }
}
