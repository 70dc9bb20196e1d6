//! EXECUTE JAR operation
//!
//! Submission runs through these steps:
//!
//! 1. parse the statement into a [`JarSubmitParam`]
//! 2. resolve the artifact URI to a local file; programs with a Python entry
//!    point get the file as a `--python` argument instead of a jar
//! 3. package the program (entry point, configuration, restore settings,
//!    arguments, extra classpaths)
//! 4. extract the pipeline; streaming graphs are compiled right away with the
//!    program's own code context active on this thread
//! 5. release the packaged program
//!
//! The packaged program is released on every path out of step 3 onwards, and
//! the code context switch never outlives the compilation call.

use crate::code_context::with_code_context;
use crate::context::ExecutionContext;
use crate::engine::{PackagedProgram, Pipeline, PipelineKind, ProgramSpec, SavepointRestoreSettings};
use crate::error::{EngineError, GatewayError, Result};
use crate::result::ExecutionResult;
use sqlgate_sql::{extract_args, redact_sensitive_sql, JarSubmitParam};
use std::path::Path;

/// Entry points that run on the Python runtime instead of a jar
pub const PYTHON_ENTRY_POINTS: &[&str] = &[
    "org.apache.flink.client.python.PythonDriver",
    "org.apache.flink.client.python.PythonGatewayServer",
];

/// Argument that hands the script to the Python runtime
pub const PYTHON_MARKER: &str = "--python";

#[derive(Debug, Clone)]
pub struct ExecuteJarOperation {
    statement: String,
    param: JarSubmitParam,
}

impl ExecuteJarOperation {
    /// The statement is fully handled here and must not reach the SQL path.
    pub const NO_EXECUTE: bool = true;

    pub fn new(statement: &str) -> Result<Self> {
        let param = JarSubmitParam::parse(statement).map_err(GatewayError::Validation)?;
        Ok(Self::from_param(statement, param))
    }

    pub fn from_param(statement: &str, param: JarSubmitParam) -> Self {
        Self {
            statement: statement.to_string(),
            param,
        }
    }

    pub fn statement(&self) -> &str {
        &self.statement
    }

    pub fn param(&self) -> &JarSubmitParam {
        &self.param
    }

    /// Build the pipeline and submit it asynchronously.
    pub fn execute(&self, ctx: &ExecutionContext) -> Result<ExecutionResult> {
        let pipeline = self.build_pipeline(ctx)?;
        let handle = ctx.engine().execute_async(pipeline)?;
        log::info!("Submitted jar job {} from {}", handle.job_id, self.param.uri);
        Ok(ExecutionResult::JobSubmitted {
            job_id: handle.job_id,
        })
    }

    /// Build the pipeline without submitting it.
    pub fn explain(&self, ctx: &ExecutionContext) -> Result<Box<dyn Pipeline>> {
        self.build_pipeline(ctx)
    }

    fn build_pipeline(&self, ctx: &ExecutionContext) -> Result<Box<dyn Pipeline>> {
        let span = tracing::info_span!(
            "jar.submit",
            uri = %self.param.uri,
            main_class = self.param.main_class.as_deref().unwrap_or("<manifest>"),
        );
        let _entered = span.enter();

        log::debug!("Building pipeline for {}", redact_sensitive_sql(&self.statement));
        build_jar_pipeline(&self.param, ctx)
            .map_err(|message| GatewayError::submission(&self.statement, message))
    }
}

fn build_jar_pipeline(
    param: &JarSubmitParam,
    ctx: &ExecutionContext,
) -> std::result::Result<Box<dyn Pipeline>, String> {
    let engine = ctx.engine();
    let configuration = engine.configuration();

    let artifact = ctx
        .resolver()
        .resolve(&param.uri)
        .map_err(|e| format!("Failed to resolve '{}': {}", param.uri, e))?;

    let (jar_file, arguments) = if is_python_entry_point(param.main_class.as_deref()) {
        let script = std::path::absolute(&artifact)
            .map_err(|e| format!("Failed to resolve '{}': {}", artifact.display(), e))?;
        (None, python_arguments(&script, param.args_or_empty()))
    } else {
        engine
            .add_jar(&artifact)
            .map_err(|e| step_failed("register jar", e))?;
        (Some(artifact), extract_args(param.args_or_empty().trim()))
    };

    let spec = ProgramSpec {
        jar_file,
        entry_point: param.main_class.clone(),
        configuration: configuration.clone(),
        savepoint_settings: savepoint_settings(param),
        arguments,
        user_classpaths: ctx.user_classpaths(),
    };
    let program = engine
        .build_program(spec)
        .map_err(|e| step_failed("package program", e))?;
    let lease = ProgramLease::new(program);

    let parallelism = resolve_parallelism(param.parallelism.as_deref(), ctx.ambient_parallelism());
    let mut pipeline = engine
        .pipeline_from_program(lease.program(), &configuration, parallelism, true)
        .map_err(|e| step_failed("extract pipeline", e))?;

    // Compile generated code now, while the program's classes are resolvable
    if pipeline.kind() == PipelineKind::StreamGraph {
        let user_context = lease.program().user_code_context();
        with_code_context(user_context, || pipeline.compile_job_graph())
            .map_err(|e| step_failed("pre-compile job graph", e))?;
    }

    lease
        .release()
        .map_err(|e| step_failed("release program", e))?;

    Ok(pipeline)
}

fn step_failed(step: &str, err: EngineError) -> String {
    format!("Failed to {}: {}", step, err)
}

/// Whether `main_class` runs on the Python runtime.
pub fn is_python_entry_point(main_class: Option<&str>) -> bool {
    main_class.is_some_and(|class| PYTHON_ENTRY_POINTS.contains(&class.trim()))
}

/// `--python <script> <user args...>`
pub fn python_arguments(script: &Path, user_args: &str) -> Vec<String> {
    let mut arguments = vec![
        PYTHON_MARKER.to_string(),
        script.to_string_lossy().to_string(),
    ];
    arguments.extend(extract_args(user_args.trim()));
    arguments
}

/// Use `raw` when it is a plain integer literal, otherwise `ambient`.
pub fn resolve_parallelism(raw: Option<&str>, ambient: u32) -> u32 {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit()) => {
            value.parse().unwrap_or_else(|_| {
                log::warn!("Parallelism '{}' is out of range, using {}", value, ambient);
                ambient
            })
        },
        _ => ambient,
    }
}

pub fn savepoint_settings(param: &JarSubmitParam) -> SavepointRestoreSettings {
    match param.savepoint_path.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => {
            SavepointRestoreSettings::for_path(path, param.allow_non_restored_state)
        },
        _ => SavepointRestoreSettings::none(),
    }
}

/// Exclusive ownership of a packaged program.
///
/// `release` closes the program and reports the outcome; a lease dropped
/// without `release` (an early return) still closes it.
struct ProgramLease {
    program: Box<dyn PackagedProgram>,
    released: bool,
}

impl ProgramLease {
    fn new(program: Box<dyn PackagedProgram>) -> Self {
        Self {
            program,
            released: false,
        }
    }

    fn program(&self) -> &dyn PackagedProgram {
        self.program.as_ref()
    }

    fn release(mut self) -> std::result::Result<(), EngineError> {
        self.released = true;
        self.program.close()
    }
}

impl Drop for ProgramLease {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Err(e) = self.program.close() {
            log::warn!("Failed to release packaged program: {}", e);
        }
    }
}
