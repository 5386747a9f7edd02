//! Analysis settings.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Controls what [`analyze`](crate::analyze) computes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Run the exhaustive extremal scans.
    pub extremal: bool,
    /// Refuse extremal scans on meshes with more vertices than this.
    pub max_vertices: Option<usize>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            extremal: false,
            max_vertices: Some(2_000),
        }
    }
}

impl AnalysisSettings {
    /// Check that the settings are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_vertices == Some(0) {
            return Err(AnalysisError::InvalidSettings(
                "max_vertices must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let s = AnalysisSettings::default();
        assert!(!s.extremal);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_zero_limit_rejected() {
        let s = AnalysisSettings {
            extremal: true,
            max_vertices: Some(0),
        };
        assert!(matches!(s.validate(), Err(AnalysisError::InvalidSettings(_))));
    }

    #[test]
    fn test_from_toml() {
        let s: AnalysisSettings = toml::from_str("extremal = true").unwrap();
        assert!(s.extremal);
        assert_eq!(s.max_vertices, AnalysisSettings::default().max_vertices);

        let s: AnalysisSettings = toml::from_str("max_vertices = 50").unwrap();
        assert!(!s.extremal);
        assert_eq!(s.max_vertices, Some(50));
    }
}
