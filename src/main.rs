use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use std::env;
use std::time::Duration;

use ribbon_racers::game_logic::{ControlVector, FIXED_TIMESTEP, PlayerControlled, VehicleState, wrap_angle};
use ribbon_racers::race::{KartControls, OutboundPoses, RacePlugin, RaceStartEvent, RaceState, Track};
use ribbon_racers::settings::{SimSettings, load_settings_from_file};

/// Frames ahead of the kart the autopilot aims at
const LOOKAHEAD_FRAMES: usize = 6;
const STEER_DEADBAND: f32 = 0.04;

#[derive(Resource)]
struct StartSeed(Option<u64>);

fn main() {
    // usage: ribbon_racers [settings.json] [seed]
    let mut args = env::args().skip(1);
    let settings = match args.next() {
        Some(path) => load_settings_from_file(&path).unwrap_or_else(|err| {
            eprintln!("{err}, using default settings");
            SimSettings::default()
        }),
        None => SimSettings::default(),
    };
    let seed = args.next().and_then(|raw| match raw.parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(_) => {
            eprintln!("Ignoring invalid seed {raw:?}");
            None
        }
    });

    // The runner loop only paces Update; physics runs on the fixed tick
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f32(
                FIXED_TIMESTEP,
            ))),
        )
        .add_plugins((LogPlugin::default(), StatesPlugin))
        .insert_resource(settings)
        .insert_resource(StartSeed(seed))
        .add_plugins(RacePlugin)
        .add_systems(Startup, send_race_start)
        .add_systems(
            Update,
            (autopilot, flush_outbound_poses).run_if(in_state(RaceState::Racing)),
        )
        .add_systems(OnEnter(RaceState::Finished), exit_when_finished)
        .run();
}

fn send_race_start(seed: Res<StartSeed>, mut starts: EventWriter<RaceStartEvent>) {
    starts.write(RaceStartEvent { seed: seed.0 });
}

/// Full throttle, steering toward the road a few frames ahead.
fn autopilot(
    track: Res<Track>,
    karts: Query<&VehicleState, With<PlayerControlled>>,
    mut controls: ResMut<KartControls>,
) {
    let Ok(state) = karts.single() else {
        return;
    };

    let target = track.frame(state.prev_nearest_index() + LOOKAHEAD_FRAMES);
    let error = wrap_angle(target.heading() - state.yaw());
    let steer = if error > STEER_DEADBAND {
        -1
    } else if error < -STEER_DEADBAND {
        1
    } else {
        0
    };

    controls.0 = ControlVector {
        throttle: 1.0,
        steer,
        boost: state.boost_charge() > 0.5,
    };
}

fn flush_outbound_poses(mut outbound: ResMut<OutboundPoses>) {
    for line in outbound.messages.drain(..) {
        print!("{line}");
    }
}

fn exit_when_finished(mut exit: EventWriter<AppExit>) {
    info!("Race finished, shutting down");
    exit.write(AppExit::Success);
}
