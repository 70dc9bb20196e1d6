//! # sqlgate-core
//!
//! Statement interception and the extended operations behind it.
//!
//! ```text
//! raw statement -> pretreat_statement -> build -> OperationRegistry -> Operation::execute
//!                                                                     -> ExecutionEngine
//! ```
//!
//! The execution engine is a collaborator behind [`engine::ExecutionEngine`];
//! artifact URIs are turned into local files by an [`artifact::ArtifactResolver`].

pub mod artifact;
pub mod code_context;
pub mod context;
pub mod engine;
pub mod error;
pub mod interceptor;
pub mod operations;
pub mod result;

pub use artifact::{ArtifactResolver, DefaultArtifactResolver};
pub use code_context::{with_code_context, CodeContext, CodeContextGuard};
pub use context::ExecutionContext;
pub use engine::{
    Configuration, ExecutionEngine, JobHandle, PackagedProgram, Pipeline, PipelineKind,
    ProgramSpec, SavepointRestoreSettings,
};
pub use error::{EngineError, GatewayError, ResolveError, Result};
pub use interceptor::{build, pretreat_statement, InterceptorResult};
pub use operations::{Operation, OperationRegistry};
pub use result::ExecutionResult;
