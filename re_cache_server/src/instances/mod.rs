use crate::cache::{CacheInstance, DynInstance};
use crate::config::InstanceConfig;
use crate::storage::create_action_cache_store;
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::runtime::Handle;
use tonic::Status;

/// Name of a tenant namespace.
///
/// The wire protocol spells the default instance as an empty string; inside
/// the server it is always the explicit `Default` variant, so a malformed or
/// unknown name can never fall through to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InstanceName {
    Default,
    Named(String),
}

impl InstanceName {
    pub const DEFAULT_WIRE_NAME: &'static str = "";

    pub fn from_wire(name: &str) -> Self {
        if name == Self::DEFAULT_WIRE_NAME {
            InstanceName::Default
        } else {
            InstanceName::Named(name.to_string())
        }
    }

    pub fn as_wire(&self) -> &str {
        match self {
            InstanceName::Default => Self::DEFAULT_WIRE_NAME,
            InstanceName::Named(name) => name,
        }
    }
}

impl fmt::Display for InstanceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstanceName::Default => f.write_str("<default>"),
            InstanceName::Named(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no instance {:?} known", .0.as_wire())]
pub struct InstanceNotFound(pub InstanceName);

impl From<InstanceNotFound> for Status {
    fn from(error: InstanceNotFound) -> Self {
        Status::not_found(error.to_string())
    }
}

/// Resolves tenant names to instance handles. Handles are only borrowed for
/// the request that resolved them.
pub trait InstanceRouter: Send + Sync {
    fn resolve(&self, name: &InstanceName) -> Result<DynInstance, InstanceNotFound>;
}

/// Fixed set of instances, assembled at startup and only read afterwards.
#[derive(Default)]
pub struct Instances {
    by_name: HashMap<InstanceName, DynInstance>,
}

impl Instances {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an instance under its own name, replacing any previous holder.
    pub fn with_instance(mut self, instance: DynInstance) -> Self {
        self.by_name.insert(instance.name().clone(), instance);
        self
    }

    pub async fn from_config(configs: &[InstanceConfig]) -> Result<Self> {
        let runtime = Handle::current();
        let mut instances = Self::new();

        for config in configs {
            let name = InstanceName::from_wire(&config.name);
            let cache_store = create_action_cache_store(&config.action_cache)
                .await
                .with_context(|| format!("Failed to create action cache for instance {}", name))?;

            tracing::info!(
                "Instance {} ready ({:?} backend, updates {})",
                name,
                config.action_cache,
                if config.allow_updates { "allowed" } else { "disabled" }
            );

            let instance = CacheInstance::new(name, cache_store, runtime.clone())
                .with_updates_allowed(config.allow_updates);
            instances = instances.with_instance(Arc::new(instance));
        }

        Ok(instances)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

impl InstanceRouter for Instances {
    fn resolve(&self, name: &InstanceName) -> Result<DynInstance, InstanceNotFound> {
        self.by_name
            .get(name)
            .cloned()
            .ok_or_else(|| InstanceNotFound(name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActionCacheConfig;
    use tonic::Code;

    fn memory_config(name: &str) -> InstanceConfig {
        InstanceConfig {
            name: name.to_string(),
            allow_updates: true,
            action_cache: ActionCacheConfig::Memory {
                max_entries: 16,
                ttl_seconds: None,
            },
        }
    }

    #[test]
    fn test_empty_wire_name_is_default() {
        assert_eq!(InstanceName::from_wire(""), InstanceName::Default);
        assert_eq!(
            InstanceName::from_wire("main"),
            InstanceName::Named("main".to_string())
        );
        assert_eq!(InstanceName::Default.as_wire(), "");
        assert_eq!(InstanceName::Default.to_string(), "<default>");
    }

    #[tokio::test]
    async fn test_resolves_configured_instances() {
        let instances = Instances::from_config(&[memory_config("main"), memory_config("")])
            .await
            .unwrap();
        assert_eq!(instances.len(), 2);

        let main = instances.resolve(&InstanceName::from_wire("main")).unwrap();
        assert_eq!(main.name(), &InstanceName::from_wire("main"));

        let default = instances.resolve(&InstanceName::Default).unwrap();
        assert_eq!(default.name(), &InstanceName::Default);
    }

    #[tokio::test]
    async fn test_unknown_name_does_not_fall_back_to_default() {
        let instances = Instances::from_config(&[memory_config("")]).await.unwrap();

        let err = instances
            .resolve(&InstanceName::from_wire("ghost"))
            .err()
            .unwrap();
        assert_eq!(err, InstanceNotFound(InstanceName::from_wire("ghost")));

        let status = Status::from(err);
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "no instance \"ghost\" known");
    }

    #[test]
    fn test_missing_default_is_not_found() {
        let instances = Instances::new();
        assert!(instances.is_empty());
        assert!(instances.resolve(&InstanceName::Default).is_err());
    }
}
