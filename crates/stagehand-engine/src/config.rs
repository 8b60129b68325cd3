use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::core::ActorSpec;
use crate::coords::Resolution;
use crate::error::ConfigError;
use crate::input::TimelineEntry;

/// Stage manifest (`stage.json`).
#[derive(Debug, Clone, Deserialize)]
pub struct StageConfig {
    #[serde(default = "StageConfig::default_title")]
    pub title: String,
    #[serde(default)]
    pub resolution: Resolution,
    /// Resolved against the manifest's directory when loaded from disk.
    #[serde(default = "StageConfig::default_content_root")]
    pub content_root: PathBuf,
    #[serde(default = "StageConfig::default_fps")]
    pub fps: u32,
    #[serde(default = "StageConfig::default_live_reload")]
    pub live_reload: bool,
    pub actor: ActorSpec,
    /// Scripted input replayed by frame index.
    #[serde(default)]
    pub input: Vec<TimelineEntry>,
}

impl StageConfig {
    fn default_title() -> String {
        "stagehand".to_string()
    }

    fn default_content_root() -> PathBuf {
        PathBuf::from("assets")
    }

    const fn default_fps() -> u32 {
        60
    }

    const fn default_live_reload() -> bool {
        true
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: StageConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let mut config = Self::from_json(&json)?;

        if config.content_root.is_relative() {
            if let Some(dir) = path.parent() {
                config.content_root = dir.join(&config.content_root);
            }
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.resolution.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "resolution must be non-zero, got {}x{}",
                self.resolution.width, self.resolution.height
            )));
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be at least 1".to_string()));
        }
        if self.actor.name.trim().is_empty() {
            return Err(ConfigError::Invalid("actor name is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_defaults() {
        let config = StageConfig::from_json(r#"{ "actor": { "name": "mascot" } }"#).unwrap();
        assert_eq!(config.title, "stagehand");
        assert_eq!(config.resolution, Resolution::new(1280, 720));
        assert_eq!(config.fps, 60);
        assert!(config.live_reload);
        assert!(config.input.is_empty());
        assert_eq!(config.actor.name, "mascot");
    }

    #[test]
    fn rejects_zero_resolution_and_fps() {
        let zero_res = r#"{ "resolution": { "width": 0, "height": 10 }, "actor": { "name": "a" } }"#;
        assert!(matches!(StageConfig::from_json(zero_res), Err(ConfigError::Invalid(_))));

        let zero_fps = r#"{ "fps": 0, "actor": { "name": "a" } }"#;
        assert!(matches!(StageConfig::from_json(zero_fps), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(StageConfig::from_json("{ nope"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn content_root_is_relative_to_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("stage.json");
        fs::write(
            &manifest,
            r#"{ "content_root": "art", "actor": { "name": "corner_converge", "params": { "speed": 4 } } }"#,
        )
        .unwrap();

        let config = StageConfig::load(&manifest).unwrap();
        assert_eq!(config.content_root, dir.path().join("art"));
        assert_eq!(config.actor.params.f32_or("speed", 0.0).unwrap(), 4.0);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = StageConfig::load("/definitely/not/here/stage.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
