//! Execution engine collaborator
//!
//! The gateway never runs jobs itself. It hands a [`ProgramSpec`] to an
//! [`ExecutionEngine`], gets back a packaged program, extracts a pipeline from
//! it and either submits the pipeline or returns it for inspection.

use crate::code_context::CodeContext;
use crate::error::EngineError;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// Engine configuration as flat `key -> value` pairs
pub type Configuration = BTreeMap<String, String>;

/// How a submitted program restores state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SavepointRestoreSettings {
    #[default]
    None,
    Path {
        path: String,
        allow_non_restored_state: bool,
    },
}

impl SavepointRestoreSettings {
    pub fn none() -> Self {
        SavepointRestoreSettings::None
    }

    pub fn for_path(path: impl Into<String>, allow_non_restored_state: bool) -> Self {
        SavepointRestoreSettings::Path {
            path: path.into(),
            allow_non_restored_state,
        }
    }

    pub fn restore_path(&self) -> Option<&str> {
        match self {
            SavepointRestoreSettings::None => None,
            SavepointRestoreSettings::Path { path, .. } => Some(path),
        }
    }
}

/// Everything the engine needs to package a user program
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgramSpec {
    /// `None` for programs that run on a language runtime instead of a jar
    pub jar_file: Option<PathBuf>,
    /// `None` lets the engine read the entry point from the jar manifest
    pub entry_point: Option<String>,
    pub configuration: Configuration,
    pub savepoint_settings: SavepointRestoreSettings,
    pub arguments: Vec<String>,
    pub user_classpaths: Vec<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineKind {
    /// Streaming dataflow; its job graph carries generated code
    StreamGraph,
    /// Batch plan
    Plan,
}

/// Handle of an asynchronously submitted job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub job_id: String,
}

impl JobHandle {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
        }
    }
}

/// A user program packaged by the engine.
///
/// Must be closed once the pipeline has been extracted.
pub trait PackagedProgram: Send {
    /// Code context that resolves the program's own classes
    fn user_code_context(&self) -> CodeContext;

    fn close(&mut self) -> Result<(), EngineError>;
}

/// A pipeline extracted from a packaged program
pub trait Pipeline: Send + fmt::Debug {
    fn kind(&self) -> PipelineKind;

    /// Build the job graph now, compiling generated code against the code
    /// context active on the calling thread.
    fn compile_job_graph(&mut self) -> Result<(), EngineError>;
}

pub trait ExecutionEngine: Send + Sync {
    /// Current engine configuration
    fn configuration(&self) -> Configuration;

    /// Ambient parallelism used when a submission does not set one
    fn parallelism(&self) -> u32;

    /// Make a jar visible to the session
    fn add_jar(&self, jar: &Path) -> Result<(), EngineError>;

    fn build_program(&self, spec: ProgramSpec) -> Result<Box<dyn PackagedProgram>, EngineError>;

    fn pipeline_from_program(
        &self,
        program: &dyn PackagedProgram,
        configuration: &Configuration,
        parallelism: u32,
        suppress_output: bool,
    ) -> Result<Box<dyn Pipeline>, EngineError>;

    fn execute_async(&self, pipeline: Box<dyn Pipeline>) -> Result<JobHandle, EngineError>;
}
