//! Project configuration: a `slate.toml` file with environment overrides.
//!
//! A missing file yields defaults; a file that exists but does not parse is
//! an error. Credentials are environment-first so they stay out of the
//! config file.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "slate.toml";

/// Tracker custom field holding the structured epic reference.
pub const DEFAULT_EPIC_LINK_FIELD: &str = "customfield_10014";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tracker: TrackerConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
}

/// Connection settings for the external issue tracker.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Never written back to disk by slate; prefer the env override.
    #[serde(default)]
    pub api_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    /// Project keys fetched when a request names none.
    #[serde(default = "default_projects")]
    pub projects: Vec<String>,
    #[serde(default = "default_group_by")]
    pub group_by: String,
    #[serde(default = "default_epic_link_field")]
    pub epic_link_field: String,
    /// Upper bound on issues fetched per projection request.
    #[serde(default = "default_fetch_cap")]
    pub fetch_cap: u32,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            projects: default_projects(),
            group_by: default_group_by(),
            epic_link_field: default_epic_link_field(),
            fetch_cap: default_fetch_cap(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("overlays.db")
}

fn default_projects() -> Vec<String> {
    vec!["SR".to_owned()]
}

fn default_group_by() -> String {
    "project".to_owned()
}

fn default_epic_link_field() -> String {
    DEFAULT_EPIC_LINK_FIELD.to_owned()
}

const fn default_fetch_cap() -> u32 {
    1000
}

impl Config {
    /// Load configuration from `path` (or [`CONFIG_FILE`]) and apply
    /// `SLATE_JIRA_BASE` / `SLATE_JIRA_EMAIL` / `SLATE_JIRA_TOKEN` overrides.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read config file {}", path.display()))?;
            toml::from_str(&raw)
                .with_context(|| format!("parse config file {}", path.display()))?
        } else {
            debug!(path = %path.display(), "config file missing, using defaults");
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(base) = env::var("SLATE_JIRA_BASE") {
            self.tracker.base_url = Some(base);
        }
        if let Ok(email) = env::var("SLATE_JIRA_EMAIL") {
            self.tracker.email = Some(email);
        }
        if let Ok(token) = env::var("SLATE_JIRA_TOKEN") {
            self.tracker.api_token = Some(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use std::io::Write;

    #[test]
    fn defaults_when_file_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let config =
            Config::load(Some(&dir.path().join("missing.toml"))).expect("defaults load");
        assert_eq!(config.timeline.projects, vec!["SR"]);
        assert_eq!(config.timeline.group_by, "project");
        assert_eq!(config.timeline.epic_link_field, "customfield_10014");
        assert_eq!(config.timeline.fetch_cap, 1000);
        assert_eq!(config.overlay.db_path.to_str(), Some("overlays.db"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("slate.toml");
        let mut file = std::fs::File::create(&path).expect("create config");
        writeln!(
            file,
            "[timeline]\nprojects = [\"SR\", \"OPS\"]\ngroup_by = \"assignee\""
        )
        .expect("write config");

        let config = Config::load(Some(&path)).expect("config loads");
        assert_eq!(config.timeline.projects, vec!["SR", "OPS"]);
        assert_eq!(config.timeline.group_by, "assignee");
        assert_eq!(config.timeline.epic_link_field, "customfield_10014");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("slate.toml");
        std::fs::write(&path, "timeline = [not toml").expect("write config");
        assert!(Config::load(Some(&path)).is_err());
    }
}
