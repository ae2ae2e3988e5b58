use crate::game_logic::{
    ControlVector, FIXED_TIMESTEP, FrameSequence, Kart, PlayerControlled, RemoteKart,
    VehicleState, apply_physics, generate,
};
use crate::networking::{KartPose, NetworkMessage, RemotePoses, encode_message};
use crate::settings::SimSettings;
use bevy::prelude::*;
use std::collections::HashSet;

#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum RaceState {
    #[default]
    Waiting,
    Racing,
    Finished,
}

/// Race-start signal from the lobby. A missing seed falls back to the
/// configured one, then to the fixed default track.
#[derive(Event, Debug, Clone, Copy)]
pub struct RaceStartEvent {
    pub seed: Option<u64>,
}

#[derive(Event, Debug, Clone, Copy)]
pub struct LapCompletedEvent {
    pub player_id: u32,
    pub lap: u32,
    pub lap_time: f32,
}

/// Pose received from another participant
#[derive(Event, Debug, Clone)]
pub struct RemotePoseEvent(pub KartPose);

/// Track for the current race. Read-only once inserted.
#[derive(Resource, Deref)]
pub struct Track(pub FrameSequence);

/// Controls for the local kart, written once per tick by the input collaborator
#[derive(Resource, Default, Clone, Copy)]
pub struct KartControls(pub ControlVector);

/// Serialized pose lines waiting for the host to send them
#[derive(Resource, Default)]
pub struct OutboundPoses {
    pub messages: Vec<String>,
}

#[derive(Resource, Default)]
pub struct TickCounter(pub u64);

pub struct RacePlugin;

impl Plugin for RacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimSettings>()
            .init_resource::<KartControls>()
            .init_resource::<OutboundPoses>()
            .init_resource::<RemotePoses>()
            .init_resource::<TickCounter>()
            .init_state::<RaceState>()
            .add_event::<RaceStartEvent>()
            .add_event::<LapCompletedEvent>()
            .add_event::<RemotePoseEvent>()
            .insert_resource(Time::<Fixed>::from_seconds(FIXED_TIMESTEP as f64))
            .add_systems(
                Update,
                (
                    start_race.run_if(in_state(RaceState::Waiting)),
                    apply_remote_poses,
                    log_laps,
                ),
            )
            .add_systems(
                FixedUpdate,
                (simulate_karts, broadcast_poses)
                    .chain()
                    .run_if(in_state(RaceState::Racing)),
            );
    }
}

fn start_race(
    mut commands: Commands,
    mut starts: EventReader<RaceStartEvent>,
    settings: Res<SimSettings>,
    mut tick: ResMut<TickCounter>,
    mut next_state: ResMut<NextState<RaceState>>,
) {
    let Some(start) = starts.read().last().copied() else {
        return;
    };

    if let Err(err) = settings.vehicle.validate() {
        error!("Vehicle tuning rejected, race not started: {err}");
        return;
    }

    let params = settings.track_params(start.seed);
    let frames = match generate(&params) {
        Ok(frames) => frames,
        Err(err) => {
            error!("Track generation failed, race not started: {err}");
            return;
        }
    };
    info!(
        "Race starting: seed {:?}, {} segments, {} laps",
        start.seed.or(settings.race.seed),
        frames.segment_count(),
        settings.race.total_laps
    );

    let state = VehicleState::on_grid(&frames, 0, settings.race.lap_cooldown_secs);
    commands.spawn((
        Kart {
            player_id: settings.race.local_player_id,
        },
        PlayerControlled,
        state,
    ));
    commands.insert_resource(Track(frames));
    tick.0 = 0;
    next_state.set(RaceState::Racing);
}

/// Runs at the fixed 60 Hz tick
fn simulate_karts(
    time: Res<Time<Fixed>>,
    track: Res<Track>,
    controls: Res<KartControls>,
    settings: Res<SimSettings>,
    mut tick: ResMut<TickCounter>,
    mut karts: Query<(&Kart, &mut VehicleState), With<PlayerControlled>>,
    mut laps: EventWriter<LapCompletedEvent>,
    mut next_state: ResMut<NextState<RaceState>>,
) {
    let dt = time.delta_secs();
    tick.0 += 1;

    for (kart, mut state) in karts.iter_mut() {
        let report = apply_physics(&mut state, controls.0, dt, &track, &settings.vehicle);

        if let Some(lap) = report.completed_lap {
            laps.write(LapCompletedEvent {
                player_id: kart.player_id,
                lap: lap.number,
                lap_time: lap.lap_time,
            });
        }

        // once, on the crossing that ends the race
        if report.finishes_race(settings.race.total_laps) {
            info!(
                "Kart {} finished {} laps in {:.2}s",
                kart.player_id,
                settings.race.total_laps,
                state.race_time()
            );
            next_state.set(RaceState::Finished);
        }
    }
}

fn broadcast_poses(
    tick: Res<TickCounter>,
    settings: Res<SimSettings>,
    karts: Query<(&Kart, &VehicleState), With<PlayerControlled>>,
    mut outbound: ResMut<OutboundPoses>,
) {
    let every = settings.race.broadcast_every_ticks.max(1) as u64;
    if tick.0 % every != 0 {
        return;
    }

    for (kart, state) in karts.iter() {
        let message = NetworkMessage::Pose(KartPose::from_state(kart.player_id, tick.0, state));
        match encode_message(&message) {
            Ok(line) => outbound.messages.push(line),
            Err(err) => warn!("Failed to encode pose for kart {}: {err}", kart.player_id),
        }
    }
}

fn apply_remote_poses(
    mut commands: Commands,
    mut incoming: EventReader<RemotePoseEvent>,
    mut remote: ResMut<RemotePoses>,
    mut karts: Query<&mut RemoteKart>,
) {
    let mut updated = HashSet::new();
    for RemotePoseEvent(pose) in incoming.read() {
        if remote.apply(pose.clone()) {
            updated.insert(pose.player_id);
        }
    }
    if updated.is_empty() {
        return;
    }

    for mut kart in karts.iter_mut() {
        if updated.remove(&kart.pose.player_id) {
            if let Some(pose) = remote.get(kart.pose.player_id) {
                kart.pose = pose.clone();
            }
        }
    }

    // first pose from a new participant
    for player_id in updated {
        if let Some(pose) = remote.get(player_id) {
            debug!("Remote kart {} joined the display", player_id);
            commands.spawn(RemoteKart { pose: pose.clone() });
        }
    }
}

fn log_laps(mut laps: EventReader<LapCompletedEvent>) {
    for lap in laps.read() {
        info!(
            "Kart {} completed lap {} in {:.2}s",
            lap.player_id, lap.lap, lap.lap_time
        );
    }
}
