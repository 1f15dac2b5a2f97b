use super::{types::EngineConfig, ConfigError};
use crate::ranker::SolutionBias;

/// Validate configuration
/// Currently validates:
/// - game.max_turns and game.top_n are not 0
/// - ranker.max_guesses_scanned is not 0 when set
/// - a prior weight lies in [0, 1]
pub fn validate_config(config: &EngineConfig) -> Result<(), ConfigError> {
    if config.game.max_turns == 0 {
        return Err(ConfigError::ValidationError(
            "game.max_turns cannot be 0".to_string(),
        ));
    }

    if config.game.top_n == 0 {
        return Err(ConfigError::ValidationError(
            "game.top_n cannot be 0".to_string(),
        ));
    }

    if config.ranker.max_guesses_scanned == Some(0) {
        return Err(ConfigError::ValidationError(
            "ranker.max_guesses_scanned cannot be 0".to_string(),
        ));
    }

    if let SolutionBias::Prior {
        non_solution_weight,
    } = config.ranker.solution_bias
    {
        if !(0.0..=1.0).contains(&non_solution_weight) {
            return Err(ConfigError::ValidationError(format!(
                "ranker.solution_bias.non_solution_weight must be within [0, 1], got {}",
                non_solution_weight
            )));
        }
    }

    Ok(())
}
