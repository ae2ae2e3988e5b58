use crate::game_logic::{
    LAP_COOLDOWN_SECS, TOTAL_LAPS, TrackParams, VehicleConfig, VehicleConfigError,
};
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Vehicle(#[from] VehicleConfigError),
}

/// Race rules for the local kart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub total_laps: u32,
    pub lap_cooldown_secs: f32,
    /// Track seed used when the race-start signal carries none
    pub seed: Option<u64>,
    pub local_player_id: u32,
    /// Pose broadcast period in simulation ticks
    pub broadcast_every_ticks: u32,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            total_laps: TOTAL_LAPS,
            lap_cooldown_secs: LAP_COOLDOWN_SECS,
            seed: None,
            local_player_id: 0,
            broadcast_every_ticks: 3, // 20 Hz at the 60 Hz tick
        }
    }
}

/// Everything the simulation can be tuned with. Any missing field in a
/// settings file falls back to its default.
#[derive(Resource, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    pub track: TrackParams,
    pub vehicle: VehicleConfig,
    pub race: RaceConfig,
}

impl SimSettings {
    /// Track params for a race. A seed redraws the harmonics; without one the
    /// configured params are used as they are.
    pub fn track_params(&self, seed: Option<u64>) -> TrackParams {
        match seed.or(self.race.seed) {
            Some(seed) => self.track.seeded(seed),
            None => self.track.clone(),
        }
    }
}

pub fn parse_settings(json: &str) -> Result<SimSettings, SettingsError> {
    let settings: SimSettings = serde_json::from_str(json)?;
    settings.vehicle.validate()?;
    Ok(settings)
}

pub fn load_settings_from_file(path: &str) -> Result<SimSettings, SettingsError> {
    let contents = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_settings(&contents)
}
