use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dotenv::dotenv;
use log::info;
use serde::Deserialize;

use crate::common::{DEFAULT_PATTERN, DEFAULT_TARGET, ENV_PREFIX};

/// How the old target is retired before the selected candidate takes its name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReplaceStrategy {
    /// Delete the old target, then rename the candidate. The target is briefly
    /// absent between the two steps.
    #[default]
    DeleteThenRename,
    /// Rename the candidate directly over the old target.
    Overwrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacerConfig {
    pub directory: PathBuf,
    pub pattern: String,
    pub target: String,
    pub strategy: ReplaceStrategy,
}

impl ReplacerConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            pattern: DEFAULT_PATTERN.to_string(),
            target: DEFAULT_TARGET.to_string(),
            strategy: ReplaceStrategy::default(),
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    pub fn with_strategy(mut self, strategy: ReplaceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn target_path(&self) -> PathBuf {
        self.directory.join(&self.target)
    }

    /// Build the configuration from `REPLACER_*` variables, reading `.env` first.
    ///
    /// Without any variable set this is the fixed-name behavior: the default
    /// pattern and target, resolved next to the running executable.
    pub fn from_env() -> Result<Self> {
        dotenv().ok();
        let env = envy::prefixed(ENV_PREFIX)
            .from_env::<EnvConfig>()
            .context("Failed to read REPLACER_* environment variables")?;
        let config = env.into_config(executable_dir)?;
        info!("Working directory: {}", config.directory.display());
        Ok(config)
    }
}

/// Raw `REPLACER_*` variables as deserialized by `envy`.
#[derive(Debug, Default, Deserialize)]
struct EnvConfig {
    dir: Option<PathBuf>,
    pattern: Option<String>,
    target: Option<String>,
    #[serde(default)]
    atomic: bool,
}

impl EnvConfig {
    fn into_config(self, default_dir: impl FnOnce() -> Result<PathBuf>) -> Result<ReplacerConfig> {
        let directory = match self.dir {
            Some(dir) => dir,
            None => default_dir()?,
        };
        let mut config = ReplacerConfig::new(directory);
        if let Some(pattern) = self.pattern {
            config = config.with_pattern(pattern);
        }
        if let Some(target) = self.target {
            config = config.with_target(target);
        }
        if self.atomic {
            config = config.with_strategy(ReplaceStrategy::Overwrite);
        }
        Ok(config)
    }
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Failed to locate the running executable")?;
    exe.parent()
        .map(Path::to_path_buf)
        .with_context(|| format!("Executable path {:?} has no parent directory", exe))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_names() {
        let config = ReplacerConfig::new("/srv/hub");
        assert_eq!(config.pattern, "command-hub-2026*.db");
        assert_eq!(config.target, "def.db");
        assert_eq!(config.strategy, ReplaceStrategy::DeleteThenRename);
        assert_eq!(config.target_path(), PathBuf::from("/srv/hub/def.db"));
    }

    #[test]
    fn empty_env_falls_back_to_executable_dir() {
        let config = EnvConfig::default()
            .into_config(|| Ok(PathBuf::from("/opt/bin")))
            .unwrap();
        assert_eq!(config, ReplacerConfig::new("/opt/bin"));
    }

    #[test]
    fn env_values_override_defaults() {
        let env = EnvConfig {
            dir: Some(PathBuf::from("/data")),
            pattern: Some("export-*.db".into()),
            target: Some("live.db".into()),
            atomic: true,
        };
        let config = env
            .into_config(|| panic!("default dir must not be resolved"))
            .unwrap();
        assert_eq!(config.directory, PathBuf::from("/data"));
        assert_eq!(config.pattern, "export-*.db");
        assert_eq!(config.target, "live.db");
        assert_eq!(config.strategy, ReplaceStrategy::Overwrite);
    }

    #[test]
    fn envy_parses_prefixed_pairs() {
        let vars = vec![
            ("REPLACER_DIR".to_string(), "/tmp/hub".to_string()),
            ("REPLACER_ATOMIC".to_string(), "true".to_string()),
        ];
        let env: EnvConfig = envy::prefixed(ENV_PREFIX).from_iter(vars).unwrap();
        assert_eq!(env.dir, Some(PathBuf::from("/tmp/hub")));
        assert!(env.atomic);
        assert!(env.pattern.is_none());
    }
}
