//! Shared test helpers: a recording execution engine and context builders
#![allow(dead_code)]

use parking_lot::Mutex;
use sqlgate_core::code_context;
use sqlgate_core::{
    CodeContext, Configuration, DefaultArtifactResolver, EngineError, ExecutionContext,
    ExecutionEngine, JobHandle, PackagedProgram, Pipeline, PipelineKind, ProgramSpec,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Where the mock engine should fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailAt {
    Nowhere,
    AddJar,
    BuildProgram,
    ExtractPipeline,
    Compile,
    CompilePanic,
    Execute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineRequest {
    pub parallelism: u32,
    pub suppress_output: bool,
}

#[derive(Debug, Default)]
pub struct EngineLog {
    pub added_jars: Vec<PathBuf>,
    pub programs: Vec<ProgramSpec>,
    pub pipeline_requests: Vec<PipelineRequest>,
    /// Code context active on the thread when the job graph was compiled
    pub compile_contexts: Vec<Option<CodeContext>>,
    pub closes: usize,
    pub executed: usize,
}

pub struct RecordingEngine {
    pub log: Arc<Mutex<EngineLog>>,
    pub fail_at: FailAt,
    pub pipeline_kind: PipelineKind,
    pub parallelism: u32,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(EngineLog::default())),
            fail_at: FailAt::Nowhere,
            pipeline_kind: PipelineKind::StreamGraph,
            parallelism: 1,
        }
    }

    pub fn failing_at(mut self, fail_at: FailAt) -> Self {
        self.fail_at = fail_at;
        self
    }

    pub fn with_pipeline_kind(mut self, kind: PipelineKind) -> Self {
        self.pipeline_kind = kind;
        self
    }

    pub fn with_parallelism(mut self, parallelism: u32) -> Self {
        self.parallelism = parallelism;
        self
    }
}

impl ExecutionEngine for RecordingEngine {
    fn configuration(&self) -> Configuration {
        let mut configuration = Configuration::new();
        configuration.insert("execution.runtime-mode".to_string(), "streaming".to_string());
        configuration
    }

    fn parallelism(&self) -> u32 {
        self.parallelism
    }

    fn add_jar(&self, jar: &Path) -> Result<(), EngineError> {
        if self.fail_at == FailAt::AddJar {
            return Err(EngineError::Program("jar rejected".into()));
        }
        self.log.lock().added_jars.push(jar.to_path_buf());
        Ok(())
    }

    fn build_program(&self, spec: ProgramSpec) -> Result<Box<dyn PackagedProgram>, EngineError> {
        if self.fail_at == FailAt::BuildProgram {
            return Err(EngineError::Program("entry point not found".into()));
        }
        let name = spec.entry_point.clone().unwrap_or_else(|| "manifest".to_string());
        self.log.lock().programs.push(spec);
        Ok(Box::new(MockProgram {
            context: CodeContext::new(&name),
            log: Arc::clone(&self.log),
        }))
    }

    fn pipeline_from_program(
        &self,
        _program: &dyn PackagedProgram,
        _configuration: &Configuration,
        parallelism: u32,
        suppress_output: bool,
    ) -> Result<Box<dyn Pipeline>, EngineError> {
        if self.fail_at == FailAt::ExtractPipeline {
            return Err(EngineError::Program("main method threw".into()));
        }
        self.log.lock().pipeline_requests.push(PipelineRequest {
            parallelism,
            suppress_output,
        });
        Ok(Box::new(MockPipeline {
            kind: self.pipeline_kind,
            fail_at: self.fail_at,
            log: Arc::clone(&self.log),
        }))
    }

    fn execute_async(&self, _pipeline: Box<dyn Pipeline>) -> Result<JobHandle, EngineError> {
        if self.fail_at == FailAt::Execute {
            return Err(EngineError::Unavailable("cluster unreachable".into()));
        }
        let mut log = self.log.lock();
        log.executed += 1;
        Ok(JobHandle::new(format!("job-{}", log.executed)))
    }
}

pub struct MockProgram {
    context: CodeContext,
    log: Arc<Mutex<EngineLog>>,
}

impl PackagedProgram for MockProgram {
    fn user_code_context(&self) -> CodeContext {
        self.context.clone()
    }

    fn close(&mut self) -> Result<(), EngineError> {
        self.log.lock().closes += 1;
        Ok(())
    }
}

#[derive(Debug)]
pub struct MockPipeline {
    kind: PipelineKind,
    fail_at: FailAt,
    log: Arc<Mutex<EngineLog>>,
}

impl Pipeline for MockPipeline {
    fn kind(&self) -> PipelineKind {
        self.kind
    }

    fn compile_job_graph(&mut self) -> Result<(), EngineError> {
        self.log.lock().compile_contexts.push(code_context::current());
        match self.fail_at {
            FailAt::Compile => Err(EngineError::Compilation("generated code did not compile".into())),
            FailAt::CompilePanic => panic!("codegen crashed"),
            _ => Ok(()),
        }
    }
}

/// Write a fake jar into `dir` and return its path.
pub fn write_jar(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"PK\x03\x04").unwrap();
    path
}

/// Context over `engine` resolving local files only.
pub fn local_context(engine: RecordingEngine, cache_dir: &Path) -> (ExecutionContext, Arc<Mutex<EngineLog>>) {
    let log = Arc::clone(&engine.log);
    let resolver = Arc::new(DefaultArtifactResolver::new(None, cache_dir));
    (ExecutionContext::new(Arc::new(engine), resolver), log)
}
