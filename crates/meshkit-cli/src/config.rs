//! `--config` file handling.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use meshkit_analysis::AnalysisSettings;
use meshkit_io::ExportSettings;
use serde::{Deserialize, Serialize};

/// Settings file contents. Both tables are optional.
///
/// ```toml
/// [analysis]
/// extremal = true
/// max_vertices = 500
///
/// [export]
/// color_scale = "range"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub analysis: AnalysisSettings,
    pub export: ExportSettings,
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.analysis.validate()?;
        Ok(config)
    }

    /// Read `path`, or use defaults when no path was given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meshkit_io::ColorScale;

    #[test]
    fn test_empty_config() {
        let config = Config::from_toml("").unwrap();
        assert!(!config.analysis.extremal);
        assert_eq!(config.export.color_scale, ColorScale::ReciprocalVertexCount);
    }

    #[test]
    fn test_both_tables() {
        let config = Config::from_toml(
            "[analysis]\nextremal = true\nmax_vertices = 12\n\n[export]\ncolor_scale = { fixed = 2.0 }\n",
        )
        .unwrap();
        assert!(config.analysis.extremal);
        assert_eq!(config.analysis.max_vertices, Some(12));
        assert_eq!(config.export.color_scale, ColorScale::Fixed(2.0));
    }

    #[test]
    fn test_invalid_limit() {
        assert!(Config::from_toml("[analysis]\nmax_vertices = 0\n").is_err());
    }

    #[test]
    fn test_unknown_table() {
        assert!(Config::from_toml("[render]\nwidth = 3\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
        assert!(Config::load(None).is_ok());
    }
}
