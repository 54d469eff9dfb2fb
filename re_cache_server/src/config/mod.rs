use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    pub instances: Vec<InstanceConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_address")]
    pub address: String,
    #[serde(default = "default_stats_interval")]
    pub stats_interval_seconds: u64,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            address: default_address(),
            stats_interval_seconds: default_stats_interval(),
        }
    }
}

impl ServerSettings {
    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_seconds)
    }
}

fn default_address() -> String {
    "0.0.0.0:8980".to_string()
}

fn default_stats_interval() -> u64 {
    60
}

/// One tenant namespace. An empty or omitted `name` declares the default
/// instance, which serves requests that carry no instance name.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InstanceConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_true")]
    pub allow_updates: bool,
    pub action_cache: ActionCacheConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "backend")]
pub enum ActionCacheConfig {
    #[serde(rename = "filesystem")]
    FileSystem { root_dir: PathBuf },

    #[serde(rename = "memory")]
    Memory {
        #[serde(default = "default_max_cache_entries")]
        max_entries: u64,
        #[serde(default)]
        ttl_seconds: Option<u64>,
    },
}

fn default_max_cache_entries() -> u64 {
    10000
}

fn default_true() -> bool {
    true
}

impl ServerConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: ServerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.instances.is_empty() {
            anyhow::bail!("At least one [[instances]] entry is required");
        }

        let mut seen = HashSet::new();
        for instance in &self.instances {
            if !seen.insert(instance.name.as_str()) {
                anyhow::bail!("Instance {:?} is declared more than once", instance.name);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [server]
        address = "127.0.0.1:9092"

        [[instances]]
        name = "main"
        [instances.action_cache]
        backend = "filesystem"
        root_dir = "/var/cache/ac/main"

        [[instances]]
        allow_updates = false
        [instances.action_cache]
        backend = "memory"
        ttl_seconds = 600
    "#;

    #[test]
    fn test_parse_instances() {
        let config = ServerConfig::parse(SAMPLE).unwrap();

        assert_eq!(config.server.address, "127.0.0.1:9092");
        assert_eq!(config.server.stats_interval(), Duration::from_secs(60));
        assert_eq!(config.instances.len(), 2);

        let main = &config.instances[0];
        assert_eq!(main.name, "main");
        assert!(main.allow_updates);
        assert!(matches!(
            &main.action_cache,
            ActionCacheConfig::FileSystem { root_dir } if root_dir == Path::new("/var/cache/ac/main")
        ));

        let default = &config.instances[1];
        assert_eq!(default.name, "");
        assert!(!default.allow_updates);
        assert!(matches!(
            default.action_cache,
            ActionCacheConfig::Memory {
                max_entries: 10000,
                ttl_seconds: Some(600)
            }
        ));
    }

    #[test]
    fn test_rejects_duplicate_instances() {
        let content = r#"
            [[instances]]
            name = "main"
            [instances.action_cache]
            backend = "memory"

            [[instances]]
            name = "main"
            [instances.action_cache]
            backend = "memory"
        "#;

        let err = ServerConfig::parse(content).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_rejects_empty_instance_list() {
        assert!(ServerConfig::parse("instances = []").is_err());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("server.toml");

        let config = ServerConfig::parse(SAMPLE).unwrap();
        config.to_file(&path).unwrap();

        let reloaded = ServerConfig::from_file(&path).unwrap();
        assert_eq!(reloaded.instances.len(), 2);
        assert_eq!(reloaded.server.address, config.server.address);
    }
}
