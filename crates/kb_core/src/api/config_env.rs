use crate::config::{GameConfig, CONFIG_PATH_ENV};

use super::json_api::error_codes;

/// Config for JSON entry points: `KB_CONFIG_PATH` when set, defaults otherwise.
pub(crate) fn game_config_from_env() -> Result<GameConfig, String> {
    GameConfig::from_env().map_err(|e| {
        format!("{}: config from {CONFIG_PATH_ENV} rejected: {e}", error_codes::INVALID_CONFIG)
    })
}
