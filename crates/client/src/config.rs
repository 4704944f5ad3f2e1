//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use game_content::ContentFactory;

/// Settings for one headless session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Content directory; `None` uses the data bundled with `game-content`.
    pub data_dir: Option<PathBuf>,
    pub level: String,
    pub event_buffer: usize,
    /// Print every event as a JSON line on stdout instead of logging it.
    pub json_events: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            level: "laundromat".to_owned(),
            event_buffer: 256,
            json_events: false,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `LAUNDRY_DATA_DIR` - content directory (default: bundled data)
    /// - `LAUNDRY_LEVEL` - level file name without extension (default: laundromat)
    /// - `LAUNDRY_EVENT_BUFFER` - broadcast capacity per topic (default: 256)
    /// - `LAUNDRY_JSON_EVENTS` - print events as JSON lines (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("LAUNDRY_DATA_DIR").ok().map(PathBuf::from);

        if let Ok(level) = env::var("LAUNDRY_LEVEL") {
            config.level = level;
        }

        if let Some(capacity) = read_env::<usize>("LAUNDRY_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }

        if let Some(json) = read_env_bool("LAUNDRY_JSON_EVENTS") {
            config.json_events = json;
        }

        config
    }

    pub fn content(&self) -> ContentFactory {
        match &self.data_dir {
            Some(dir) => ContentFactory::new(dir),
            None => ContentFactory::bundled(),
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
