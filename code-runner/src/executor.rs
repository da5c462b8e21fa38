use tracing::debug;

use crate::{
    error::Error,
    input::prepare_stdin,
    process::{run_process, ProcessSpec},
    sanitize::sanitize_output,
    types::{ExecutionResult, RunnerConfig, Submission},
    workspace::Workspace,
};

/// Runs one submission from source text to sanitized output
#[derive(Debug, Clone, Default)]
pub struct CodeExecutor {
    config: RunnerConfig,
}

impl CodeExecutor {
    pub fn new(config: RunnerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Write the code into a fresh workspace, run it, and scrub the output.
    ///
    /// Only workspace setup can fail with an `Err`. Anything that goes wrong
    /// with the program itself is reported through
    /// [`ExecutionResult::failure`]. The workspace is gone by the time this
    /// returns.
    pub async fn execute(&self, submission: &Submission) -> Result<ExecutionResult, Error> {
        let profile = submission.language.profile();
        let workspace = Workspace::create()?;
        let source_file = workspace
            .write_source(profile.file_name, &submission.code)
            .await?;

        let mut args: Vec<String> = profile.args.iter().map(|s| s.to_string()).collect();
        args.push(source_file.to_string_lossy().into_owned());

        let output = run_process(ProcessSpec {
            program: self.config.program_for(submission.language).to_string(),
            args,
            working_dir: workspace.path().to_path_buf(),
            stdin: prepare_stdin(&submission.input),
            timeout: self.config.timeout,
        })
        .await;

        let temp_dir = workspace.path().to_string_lossy();
        debug!(
            "Sanitizing {} bytes of stdout and {} bytes of stderr",
            output.stdout.len(),
            output.stderr.len()
        );

        Ok(ExecutionResult {
            stdout: sanitize_output(&output.stdout, &temp_dir),
            stderr: sanitize_output(&output.stderr, &temp_dir),
            failure: output.failure,
        })
    }
}
