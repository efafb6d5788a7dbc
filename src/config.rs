use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::filetype::FileType;

/// Duplication-issue thresholds (percent) for one file class.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SeverityThresholds {
    pub medium: u32,
    pub high: u32,
}

/// Tuning for the duplication detector, passed explicitly into the
/// analysis so it stays a pure function of its inputs.
///
/// Intentionally repetitive code gets looser thresholds: a test suite or
/// an example tree reporting 30% literal duplication is normal, the same
/// number in production code is not.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DupConfig {
    /// Consecutive non-blank lines per block window.
    pub block_lines: usize,
    /// Minimum normalized characters for a window to count.
    pub min_block_chars: usize,
    /// Minimum whitespace-separated tokens for a window to count.
    pub min_block_tokens: usize,
    pub production: SeverityThresholds,
    pub test: SeverityThresholds,
    pub example: SeverityThresholds,
    pub config: SeverityThresholds,
}

impl Default for DupConfig {
    fn default() -> Self {
        Self {
            block_lines: 5,
            min_block_chars: 40,
            min_block_tokens: 8,
            production: SeverityThresholds {
                medium: 15,
                high: 30,
            },
            test: SeverityThresholds {
                medium: 40,
                high: 60,
            },
            example: SeverityThresholds {
                medium: 50,
                high: 75,
            },
            config: SeverityThresholds {
                medium: 60,
                high: 85,
            },
        }
    }
}

impl DupConfig {
    /// Threshold row for a file class.
    pub fn thresholds_for(&self, file_type: FileType) -> SeverityThresholds {
        match file_type {
            FileType::Production => self.production,
            FileType::Test => self.test,
            FileType::Example => self.example,
            FileType::Config => self.config,
        }
    }

    /// Load overrides from a TOML file; absent keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let text = fs::read_to_string(path).map_err(|e| format!("{}: {e}", path.display()))?;
        let config: Self =
            toml::from_str(&text).map_err(|e| format!("{}: {e}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
