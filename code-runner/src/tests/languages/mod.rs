use super::utils::defaults::*;
use crate::{
    languages::skip_if_not_available, CodeExecutor, ExecutionResult, Language, Result,
    RunnerConfig, Submission,
};

pub mod golang;
pub mod python;

/// Run `code` unless the language's program is missing, in which case the
/// test is skipped by returning `None`.
pub(crate) async fn run_snippet(
    config: RunnerConfig,
    language: Language,
    code: &str,
    input: &str,
) -> Result<Option<ExecutionResult>> {
    if skip_if_not_available(&[config.program_for(language)]) {
        return Ok(None);
    }
    let executor = CodeExecutor::new(config);
    let result = executor
        .execute(&Submission::new(language, code, input))
        .await?;
    Ok(Some(result))
}

// Common test utilities for language tests
pub(crate) async fn test_default_snippet(language: Language, config: RunnerConfig) -> Result<()> {
    let code = language.profile().default_code;
    let Some(result) = run_snippet(config, language, code, "42").await? else {
        return Ok(());
    };
    assert!(result.succeeded(), "{:?}", result);
    assert!(result.stdout.contains("You entered: 42"));
    Ok(())
}

pub(crate) async fn test_language_timeout(language: Language, code: &str) -> Result<()> {
    let config = default_test_config().with_timeout(short_timeout());
    let started = std::time::Instant::now();
    let Some(result) = run_snippet(config, language, code, "").await? else {
        return Ok(());
    };
    assert!(!result.succeeded());
    assert!(started.elapsed() < default_timeout());
    assert!(result.render().ends_with(crate::FAILURE_SUFFIX));
    Ok(())
}
