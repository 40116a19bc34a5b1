use crate::logic::eval_constants::{VAL_KING, VAL_MAN, VAL_MAN_ADVANCED, VAL_MAN_CENTER};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

pub const MAX_DEPTH: u8 = 12;
/// Upper bound for any configured piece value.
pub const MAX_PIECE_VALUE: i32 = 10_000;

/// Move ordering applied by the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveOrdering {
    /// Children in generation order, alternating max/min frames.
    #[default]
    None,
    /// Children sorted by history score, sign-flipped bounds.
    History,
}

/// What the history table is keyed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryKeying {
    /// The identity of the searched state. Entries only help while the same
    /// tree is being searched again.
    #[default]
    Node,
    /// The (source, destination) pair of the move leading to the state, so
    /// scores carry over between searches.
    Move,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("search depth must be between 1 and {MAX_DEPTH}, got {0}")]
    InvalidDepth(u8),
    #[error("piece value {field} must be between 0 and {MAX_PIECE_VALUE}, got {value}")]
    InvalidPieceValue { field: &'static str, value: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Search Parameters
    pub search_depth: u8,
    pub move_ordering: MoveOrdering,
    pub history_key: HistoryKeying,

    // Evaluation Parameters
    pub val_man: i32,
    pub val_man_advanced: i32,
    pub val_man_center: i32,
    pub val_king: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 4,
            move_ordering: MoveOrdering::None,
            history_key: HistoryKeying::Node,

            val_man: VAL_MAN,
            val_man_advanced: VAL_MAN_ADVANCED,
            val_man_center: VAL_MAN_CENTER,
            val_king: VAL_KING,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON config. Missing fields keep their defaults.
    pub fn load_from_json(json_str: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::load_from_json(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 || self.search_depth > MAX_DEPTH {
            return Err(ConfigError::InvalidDepth(self.search_depth));
        }
        let values = [
            ("val_man", self.val_man),
            ("val_man_advanced", self.val_man_advanced),
            ("val_man_center", self.val_man_center),
            ("val_king", self.val_king),
        ];
        for (field, value) in values {
            if !(0..=MAX_PIECE_VALUE).contains(&value) {
                return Err(ConfigError::InvalidPieceValue { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_default() {
        let config = EngineConfig::load_from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.val_man_center, VAL_MAN_CENTER);
        assert_eq!(config.move_ordering, MoveOrdering::None);
    }

    #[test]
    fn test_load_config_partial() {
        let json = r#"{
            "search_depth": 6,
            "move_ordering": "history",
            "val_king": 75
        }"#;
        let config = EngineConfig::load_from_json(json).unwrap();
        assert_eq!(config.search_depth, 6);
        assert_eq!(config.move_ordering, MoveOrdering::History);
        assert_eq!(config.history_key, HistoryKeying::Node);
        assert_eq!(config.val_king, 75);
        assert_eq!(config.val_man, VAL_MAN);
    }

    #[test]
    fn test_load_config_move_keying() {
        let config = EngineConfig::load_from_json(r#"{ "history_key": "move" }"#).unwrap();
        assert_eq!(config.history_key, HistoryKeying::Move);
    }

    #[test]
    fn test_load_config_invalid_json() {
        let result = EngineConfig::load_from_json("{ invalid json }");
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_load_config_rejects_piece_values() {
        let huge = EngineConfig::load_from_json(r#"{ "val_king": 2147483647 }"#);
        assert!(matches!(
            huge,
            Err(ConfigError::InvalidPieceValue {
                field: "val_king",
                value: i32::MAX
            })
        ));
        let negative = EngineConfig::load_from_json(r#"{ "val_man": -1 }"#);
        assert!(matches!(
            negative,
            Err(ConfigError::InvalidPieceValue { field: "val_man", .. })
        ));
        let edge = EngineConfig::load_from_json(r#"{ "val_man_center": 10000 }"#).unwrap();
        assert_eq!(edge.val_man_center, MAX_PIECE_VALUE);
    }

    #[test]
    fn test_load_config_rejects_depth() {
        let zero = EngineConfig::load_from_json(r#"{ "search_depth": 0 }"#);
        assert!(matches!(zero, Err(ConfigError::InvalidDepth(0))));
        let deep = EngineConfig::load_from_json(r#"{ "search_depth": 40 }"#);
        assert!(matches!(deep, Err(ConfigError::InvalidDepth(40))));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = EngineConfig::load_from_path("/nonexistent/checkers-config.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_serialize_round_trip() {
        let config = EngineConfig {
            search_depth: 5,
            move_ordering: MoveOrdering::History,
            history_key: HistoryKeying::Move,
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"history\""));
        assert_eq!(EngineConfig::load_from_json(&json).unwrap(), config);
    }
}
