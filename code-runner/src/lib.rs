//! # Code Runner
//!
//! Runs Go and Python snippets submitted from a browser. Each submission is
//! written into a throwaway directory, executed with a wall-clock timeout, and
//! its output is scrubbed of filesystem paths and HTML-escaped before it is
//! handed back.
//!
//! Executed code is not isolated in any way: it runs with the privileges of
//! the host process.

mod error;
mod executor;
mod input;
mod languages;
mod process;
mod sanitize;
mod service;
mod types;
mod workspace;

#[cfg(test)]
mod tests;

pub use error::Error;
pub use executor::CodeExecutor;
pub use input::prepare_stdin;
pub use languages::{missing_tools, LanguageProfile};
pub use process::{run_process, ProcessOutput, ProcessSpec};
pub use sanitize::{escape_html, sanitize_output, FILEPATH_PLACEHOLDER, TEMPDIR_PLACEHOLDER};
pub use service::CodeExecutionService;
pub use types::{
    ExecutionFailure, ExecutionResult, Language, RunnerConfig, Submission, DEFAULT_TIMEOUT,
    FAILURE_SUFFIX,
};
pub use workspace::Workspace;

/// Result type for code runner operations
pub type Result<T> = std::result::Result<T, Error>;
