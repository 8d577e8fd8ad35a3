use config::Config;
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_BASE_URL: &str = "https://omniweb.gsfc.nasa.gov/cgi/nx1.cgi";
pub const DEFAULT_SPACECRAFT: &str = "omni2";

/// Runtime settings, overridable through `OMNI_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub spacecraft: String,
    /// Total download attempts per call, first one included.
    pub max_attempts: u32,
    /// Data lines required before a download counts as complete.
    pub min_data_lines: usize,
    /// No timeout is applied unless set.
    pub timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            spacecraft: DEFAULT_SPACECRAFT.to_string(),
            max_attempts: 2,
            min_data_lines: 2,
            timeout_secs: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Settings> {
        let settings: Settings = Config::builder()
            .add_source(config::Environment::with_prefix("OMNI").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings.normalized())
    }

    fn normalized(mut self) -> Self {
        self.max_attempts = self.max_attempts.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_omniweb() {
        let s = Settings::default();
        assert_eq!(s.base_url, DEFAULT_BASE_URL);
        assert_eq!(s.spacecraft, "omni2");
        assert_eq!(s.max_attempts, 2);
        assert_eq!(s.min_data_lines, 2);
        assert!(s.timeout_secs.is_none());
    }

    #[test]
    fn zero_attempts_is_clamped() {
        let s = Settings {
            max_attempts: 0,
            ..Settings::default()
        }
        .normalized();
        assert_eq!(s.max_attempts, 1);
    }
}
