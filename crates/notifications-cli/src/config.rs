use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notifications_client::ClientConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProfileConfig {
    pub server: Option<String>,
    pub proxy_prefix: Option<String>,
    pub identity_file: Option<String>,
}

impl ProfileConfig {
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let slot = match key {
            "server" => &mut self.server,
            "proxy_prefix" => &mut self.proxy_prefix,
            "identity_file" => &mut self.identity_file,
            other => anyhow::bail!(
                "Unknown config key: {other}. Valid keys: server, proxy_prefix, identity_file"
            ),
        };
        *slot = Some(value.to_string());
        Ok(())
    }
}

pub type ConfigFile = HashMap<String, ProfileConfig>;

fn config_dir() -> Result<PathBuf> {
    let dir = dirs::home_dir()
        .context("Cannot determine home directory")?
        .join(".notifications");
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn load_all(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::new());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let cfg: ConfigFile = toml::from_str(&content)
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(cfg)
}

pub fn load_profile(path: &Path, profile: &str) -> Result<ProfileConfig> {
    Ok(load_all(path)?.remove(profile).unwrap_or_default())
}

pub fn save_profile(path: &Path, profile: &str, config: &ProfileConfig) -> Result<()> {
    let mut all = load_all(path)?;
    all.insert(profile.to_string(), config.clone());
    let content = toml::to_string_pretty(&all)?;
    fs::write(path, content)?;
    Ok(())
}

/// Everything a command needs to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub client: ClientConfig,
    pub identity_file: Option<String>,
}

impl Settings {
    /// Flags and environment win over the stored profile.
    pub fn resolve(
        server: Option<&str>,
        proxy_prefix: Option<&str>,
        identity_file: Option<&str>,
        profile: ProfileConfig,
    ) -> Result<Self> {
        let Some(server) = server.map(str::to_string).or(profile.server) else {
            anyhow::bail!(
                "No server URL configured. Use --server, set NOTIFICATIONS_URL, or run: notifications config set server <url>"
            );
        };
        let mut client = ClientConfig::new(server);
        if let Some(prefix) = proxy_prefix.map(str::to_string).or(profile.proxy_prefix) {
            client = client.with_proxy_prefix(prefix);
        }
        Ok(Self {
            client,
            identity_file: identity_file.map(str::to_string).or(profile.identity_file),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_round_trip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut stage = ProfileConfig::default();
        stage.set("server", "https://stage.example.com").unwrap();
        stage.set("proxy_prefix", "/api/notifications-backend").unwrap();
        save_profile(&path, "stage", &stage).unwrap();
        save_profile(&path, "default", &ProfileConfig::default()).unwrap();

        assert_eq!(load_profile(&path, "stage").unwrap(), stage);
        assert_eq!(load_profile(&path, "missing").unwrap(), ProfileConfig::default());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut cfg = ProfileConfig::default();
        let err = cfg.set("format", "json").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn flags_override_profile() {
        let profile = ProfileConfig {
            server: Some("http://profile:8085".into()),
            proxy_prefix: Some("/proxy".into()),
            identity_file: Some("/etc/identity".into()),
        };
        let settings =
            Settings::resolve(Some("http://flag:8085"), None, None, profile).unwrap();
        assert_eq!(settings.client.base_url, "http://flag:8085");
        assert_eq!(settings.client.proxy_prefix.as_deref(), Some("/proxy"));
        assert_eq!(settings.identity_file.as_deref(), Some("/etc/identity"));
    }

    #[test]
    fn missing_server_is_an_error() {
        let err = Settings::resolve(None, None, None, ProfileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("No server URL configured"));
    }
}
