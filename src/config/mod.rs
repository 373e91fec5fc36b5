use crate::errors::{XkcdError, XkcdResult};
use crate::format::DEFAULT_WIDTH;
use crate::services::XKCD_RSS_URL;

pub const FEED_URL_VAR: &str = "XKCD_ALT_FEED_URL";
pub const WRAP_WIDTH_VAR: &str = "XKCD_ALT_WRAP_WIDTH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub feed_url: String,
    pub wrap_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            feed_url: XKCD_RSS_URL.to_string(),
            wrap_width: DEFAULT_WIDTH,
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> XkcdResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> XkcdResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let feed_url = lookup(FEED_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(defaults.feed_url);

        let wrap_width = match lookup(WRAP_WIDTH_VAR) {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(width) if width > 0 => width,
                _ => {
                    return Err(XkcdError::Config(format!(
                        "{WRAP_WIDTH_VAR} must be a positive integer, got {raw:?}"
                    )))
                }
            },
            None => defaults.wrap_width,
        };

        Ok(Self {
            feed_url,
            wrap_width,
        })
    }
}
