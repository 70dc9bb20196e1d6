//! Gateway lifecycle helpers.
//!
//! [`bootstrap`] turns a loaded [`GatewayConfig`] into a [`Gateway`]: the
//! resource catalog (when the resource center is enabled), the artifact
//! resolver with its local cache, and the global variable table. Each client
//! session then asks the gateway for its own [`ExecutionContext`].

use anyhow::Result;
use log::{debug, info};
use sqlgate_configs::GatewayConfig;
use sqlgate_core::{DefaultArtifactResolver, ExecutionContext, ExecutionEngine};
use sqlgate_filestore::{ResourceCatalog, ResourceNode};
use sqlgate_sql::VariableManager;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Parent id given to top-level nodes by [`Gateway::resource_tree`]
pub const RESOURCE_ROOT_ID: i64 = 0;

/// Shared components for every session of one gateway
pub struct Gateway {
    config: GatewayConfig,
    catalog: Option<ResourceCatalog>,
    resolver: Arc<DefaultArtifactResolver>,
    /// Variables visible to every session; sessions start from a copy
    global_variables: Arc<VariableManager>,
}

/// Load `path` (or defaults when it does not exist), apply `SQLGATE_*`
/// overrides, then normalize and validate.
pub fn load_config(path: &Path) -> Result<GatewayConfig> {
    let mut config = if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
        GatewayConfig::from_toml_str(&content)?
    } else {
        debug!("Config file {} not found, using defaults", path.display());
        GatewayConfig::default()
    };

    config.apply_env_overrides()?;
    config.finalize()?;
    Ok(config)
}

/// Build the object store, resource catalog, and artifact resolver.
pub fn bootstrap(config: &GatewayConfig) -> Result<Gateway> {
    let phase_start = Instant::now();

    let catalog = if config.resources.enabled {
        let catalog = ResourceCatalog::from_settings(&config.resources)?;
        info!(
            "Resource center ready: model={:?}, base_path='{}' ({:.2}ms)",
            config.resources.model,
            catalog.base_path(),
            phase_start.elapsed().as_secs_f64() * 1000.0
        );
        Some(catalog)
    } else {
        info!("Resource center disabled; rs: artifacts will not resolve");
        None
    };

    let cache_dir = Path::new(&config.execution.artifact_cache_dir);
    std::fs::create_dir_all(cache_dir)?;
    let resolver = Arc::new(DefaultArtifactResolver::new(catalog.clone(), cache_dir));
    debug!("Artifact cache at {}", cache_dir.display());

    info!(
        "Gateway bootstrapped: sql_fragment={}, default_parallelism={} ({:.2}ms)",
        config.execution.use_sql_fragment,
        config.execution.default_parallelism,
        phase_start.elapsed().as_secs_f64() * 1000.0
    );

    Ok(Gateway {
        config: config.clone(),
        catalog,
        resolver,
        global_variables: Arc::new(VariableManager::new()),
    })
}

impl Gateway {
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn catalog(&self) -> Option<&ResourceCatalog> {
        self.catalog.as_ref()
    }

    pub fn resolver(&self) -> Arc<DefaultArtifactResolver> {
        Arc::clone(&self.resolver)
    }

    pub fn global_variables(&self) -> &VariableManager {
        &self.global_variables
    }

    /// New session over `engine`.
    ///
    /// The session gets its own variable table seeded with the global
    /// variables, so its fragment definitions stay private.
    pub fn context(&self, engine: Arc<dyn ExecutionEngine>) -> Result<ExecutionContext> {
        let variables = VariableManager::new();
        for name in self.global_variables.names() {
            if let Some(value) = self.global_variables.get(&name) {
                variables.register(&name, &value)?;
            }
        }

        Ok(ExecutionContext::new(engine, self.resolver.clone())
            .with_settings(&self.config.execution)
            .with_variables(Arc::new(variables)))
    }

    /// Tree of everything in the resource center, or an empty tree when it is
    /// disabled.
    pub fn resource_tree(&self) -> Result<Vec<ResourceNode>> {
        match &self.catalog {
            Some(catalog) => Ok(catalog.full_directory_structure_sync(RESOURCE_ROOT_ID)?),
            None => Ok(Vec::new()),
        }
    }
}
