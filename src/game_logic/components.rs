use crate::networking::KartPose;
use bevy::prelude::*;

#[derive(Component, Clone, Copy, Debug)]
pub struct Kart {
    pub player_id: u32,
}

#[derive(Component)]
pub struct PlayerControlled;

/// Another participant's kart. Display only: its pose comes from the network
/// and never feeds back into the local simulation.
#[derive(Component, Clone, Debug)]
pub struct RemoteKart {
    pub pose: KartPose,
}
