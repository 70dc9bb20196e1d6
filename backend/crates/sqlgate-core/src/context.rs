use crate::artifact::ArtifactResolver;
use crate::engine::ExecutionEngine;
use parking_lot::RwLock;
use sqlgate_configs::ExecutionSettings;
use sqlgate_sql::VariableManager;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-session state handed to every operation
pub struct ExecutionContext {
    engine: Arc<dyn ExecutionEngine>,
    resolver: Arc<dyn ArtifactResolver>,
    variables: Arc<VariableManager>,
    use_sql_fragment: bool,
    /// Used when the engine reports no parallelism of its own
    default_parallelism: u32,
    /// Extra classpath entries attached to every packaged program
    user_classpaths: RwLock<Vec<PathBuf>>,
}

impl ExecutionContext {
    pub fn new(engine: Arc<dyn ExecutionEngine>, resolver: Arc<dyn ArtifactResolver>) -> Self {
        Self {
            engine,
            resolver,
            variables: Arc::new(VariableManager::new()),
            use_sql_fragment: true,
            default_parallelism: 1,
            user_classpaths: RwLock::new(Vec::new()),
        }
    }

    /// Apply `[execution]` settings.
    pub fn with_settings(mut self, settings: &ExecutionSettings) -> Self {
        self.use_sql_fragment = settings.use_sql_fragment;
        self.default_parallelism = settings.default_parallelism;
        self
    }

    pub fn with_variables(mut self, variables: Arc<VariableManager>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_sql_fragment(mut self, enabled: bool) -> Self {
        self.use_sql_fragment = enabled;
        self
    }

    pub fn with_user_classpaths(self, classpaths: Vec<PathBuf>) -> Self {
        *self.user_classpaths.write() = classpaths;
        self
    }

    pub fn engine(&self) -> &dyn ExecutionEngine {
        self.engine.as_ref()
    }

    pub fn resolver(&self) -> &dyn ArtifactResolver {
        self.resolver.as_ref()
    }

    pub fn variables(&self) -> &VariableManager {
        &self.variables
    }

    pub fn use_sql_fragment(&self) -> bool {
        self.use_sql_fragment
    }

    /// Parallelism for submissions that do not set one: the engine's, or the
    /// configured default when the engine reports 0.
    pub fn ambient_parallelism(&self) -> u32 {
        match self.engine.parallelism() {
            0 => self.default_parallelism,
            parallelism => parallelism,
        }
    }

    pub fn user_classpaths(&self) -> Vec<PathBuf> {
        self.user_classpaths.read().clone()
    }

    /// Add a classpath entry unless it is already present.
    pub fn add_user_classpath(&self, path: &Path) {
        let mut classpaths = self.user_classpaths.write();
        if !classpaths.iter().any(|existing| existing == path) {
            classpaths.push(path.to_path_buf());
        }
    }
}
