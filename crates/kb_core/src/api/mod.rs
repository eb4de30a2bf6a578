//! # JSON API
//!
//! String-in, string-out entry points for embedding front-ends. Errors are
//! `CODE: message` strings (see [`json_api::error_codes`]).

pub mod json_api;

mod config_env;

pub use json_api::{
    apply_effects_json, error_codes, resolve_pitch_json, run_tournament_json,
    scouting_report_json, EffectRecord, EffectsRequest, EffectsResponse, PitchRequest,
    ScoutingReportRequest, TournamentMode, TournamentRequest, TournamentResponse, SCHEMA_VERSION,
};
