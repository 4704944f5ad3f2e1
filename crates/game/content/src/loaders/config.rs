//! Game configuration loader.

use std::path::Path;

use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to [`GameConfig::default`]. The result is
    /// validated before it is returned.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {}", path.display(), e))
    }

    /// Parse and validate config TOML from a string.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = ConfigLoader::parse(
            r#"
            container_capacity = 12
            interact_cooldown = 0.5

            [pickup_shape]
            scale = 2.0
            "#,
        )
        .unwrap();

        assert_eq!(config.container_capacity, 12);
        assert_eq!(config.interact_cooldown, 0.5);
        assert_eq!(config.pickup_shape.scale, 2.0);
        assert_eq!(config.pickup_shape.radius, 1.0);
        assert_eq!(config.slowdown_threshold, GameConfig::DEFAULT_SLOWDOWN_THRESHOLD);
    }

    #[test]
    fn rejects_invalid_rules() {
        let error = ConfigLoader::parse("penalty_per_extra = 1.5").unwrap_err();
        assert!(error.to_string().contains("penalty"), "{error}");
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_speed = 6.0").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.base_speed, 6.0);
    }

    #[test]
    fn missing_file_names_the_path() {
        let error = ConfigLoader::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(error.to_string().contains("/nonexistent/config.toml"));
    }
}
