//! Configuration file loading and saving

use super::DeployOptions;
use anyhow::{Context, Result};
use std::path::Path;

impl DeployOptions {
    /// Load options from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;

        // An empty file is a valid, empty set of options
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let options: DeployOptions = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file '{}'", path.display()))?;

        // Relative paths in the file are relative to the file, not the caller
        let config_dir = path.parent().unwrap_or(Path::new(""));
        Ok(Self {
            src: options.src.map(|src| config_dir.join(src)),
            dest: options.dest.map(|dest| config_dir.join(dest)),
            ..options
        })
    }

    /// Load options from a YAML file if it exists, otherwise start empty
    pub fn load_if_exists(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save options to a YAML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;

        // Add document marker for yamllint compliance
        let yaml_content = format!("---\n{}", yaml);

        std::fs::write(path, yaml_content)
            .with_context(|| format!("Failed to write config file '{}'", path.display()))?;

        Ok(())
    }
}
