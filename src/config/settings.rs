//! Configuration settings for the grid-filling solver

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub puzzle: PuzzleConfig,
    pub solver: SolverConfig,
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    /// Grid side length; the grid is always square.
    pub size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    pub max_solutions: usize,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub word_list_file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub save_solutions: bool,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

/// Command-line overrides applied on top of the config file.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub size: Option<usize>,
    pub max_solutions: Option<usize>,
    pub word_list: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            puzzle: PuzzleConfig { size: 4 },
            solver: SolverConfig {
                max_solutions: 1,
                timeout_seconds: 300,
            },
            input: InputConfig {
                word_list_file: PathBuf::from("input/words/common.txt"),
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                save_solutions: false,
                output_directory: PathBuf::from("output/solutions"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file.
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file.
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        if self.puzzle.size == 0 {
            anyhow::bail!("Grid size must be positive");
        }

        if self.solver.max_solutions == 0 {
            anyhow::bail!("Maximum solutions must be positive");
        }

        if !self.input.word_list_file.exists() {
            anyhow::bail!(
                "Word list file does not exist: {}",
                self.input.word_list_file.display()
            );
        }

        Ok(())
    }

    /// Apply command-line overrides.
    pub fn merge_with_cli(&mut self, overrides: &CliOverrides) {
        if let Some(size) = overrides.size {
            self.puzzle.size = size;
        }
        if let Some(max_solutions) = overrides.max_solutions {
            self.solver.max_solutions = max_solutions;
        }
        if let Some(ref word_list) = overrides.word_list {
            self.input.word_list_file = word_list.clone();
        }
        if let Some(ref output_dir) = overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_shape() {
        let settings = Settings::default();
        assert_eq!(settings.puzzle.size, 4);
        assert_eq!(settings.solver.max_solutions, 1);
        assert_eq!(settings.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");

        // point the word list somewhere that exists so validation passes
        let word_list = dir.path().join("words.txt");
        std::fs::write(&word_list, "cat\n").unwrap();

        let mut settings = Settings::default();
        settings.input.word_list_file = word_list;
        settings.puzzle.size = 3;
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.puzzle.size, 3);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut settings = Settings::default();
        settings.puzzle.size = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.solver.max_solutions = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            size: Some(6),
            max_solutions: Some(3),
            word_list: Some(PathBuf::from("other.txt")),
            output_dir: None,
        };

        settings.merge_with_cli(&overrides);

        assert_eq!(settings.puzzle.size, 6);
        assert_eq!(settings.solver.max_solutions, 3);
        assert_eq!(settings.input.word_list_file, PathBuf::from("other.txt"));
        assert_eq!(
            settings.output.output_directory,
            PathBuf::from("output/solutions")
        );
    }
}
