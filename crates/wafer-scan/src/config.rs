use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::compositor::WarpMode;
use crate::error::WaferError;

/// Settings of a generation run.
///
/// Every field has a default, so a JSON file only needs the fields it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Directory the generated PNG files are written to.
    pub output_dir: PathBuf,
    /// Prefix of the sequence labels.
    pub label_prefix: String,
    /// Optional fixed seed for reproducible parameters.
    pub random_seed: Option<u64>,
    /// First value of the label counter.
    pub start_index: u32,
    /// JSON-lines file for generation records, in-memory when unset.
    pub records_path: Option<PathBuf>,
    /// How the two affine matrices are applied.
    pub warp_mode: WarpMode,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("generated"),
            label_prefix: "scan".to_string(),
            random_seed: None,
            start_index: 0,
            records_path: None,
            warp_mode: WarpMode::default(),
        }
    }
}

impl GeneratorConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, WaferError> {
        serde_json::from_str(json).map_err(|e| WaferError::Config(e.to_string()))
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, WaferError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| WaferError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() -> Result<(), WaferError> {
        let config = GeneratorConfig::from_json_str(
            r#"{ "output_dir": "/tmp/wafers", "random_seed": 42, "warp_mode": "fused" }"#,
        )?;
        assert_eq!(config.output_dir, PathBuf::from("/tmp/wafers"));
        assert_eq!(config.random_seed, Some(42));
        assert_eq!(config.warp_mode, WarpMode::Fused);
        assert_eq!(config.label_prefix, "scan");
        assert_eq!(config.start_index, 0);
        assert_eq!(config.records_path, None);
        Ok(())
    }

    #[test]
    fn invalid_json_is_a_config_error() {
        let res = GeneratorConfig::from_json_str("{ \"start_index\": -1 }");
        assert!(matches!(res, Err(WaferError::Config(_))));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let res = GeneratorConfig::from_json_file("no/such/config.json");
        assert!(matches!(res, Err(WaferError::Config(_))));
    }
}
