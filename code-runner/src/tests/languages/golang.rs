use super::super::fixtures::{
    code_samples::{GO_HELLO, GO_HI},
    test_scenarios::{GO_COMPILE_ERROR, GO_SCAN_TWO, GO_WITH_TIMEOUT},
};
use super::*;
use crate::{ExecutionFailure, TEMPDIR_PLACEHOLDER};

fn go_config() -> RunnerConfig {
    default_test_config().with_timeout(extended_timeout())
}

#[tokio::test]
async fn test_go_basic() -> Result<()> {
    let Some(result) = run_snippet(go_config(), Language::Go, GO_HELLO, "").await? else {
        return Ok(());
    };
    assert_eq!(result.stdout, "Hello from Go!\n");
    assert_eq!(result.failure, None);
    Ok(())
}

#[tokio::test]
async fn test_go_hi_end_to_end() -> Result<()> {
    let Some(result) = run_snippet(go_config(), Language::Go, GO_HI, "").await? else {
        return Ok(());
    };
    assert!(result.render().contains("hi"));
    Ok(())
}

#[tokio::test]
async fn test_go_default_snippet() -> Result<()> {
    test_default_snippet(Language::Go, go_config()).await
}

#[tokio::test]
async fn test_go_reads_semicolon_separated_input() -> Result<()> {
    let Some(result) = run_snippet(go_config(), Language::Go, GO_SCAN_TWO, "40; 2").await? else {
        return Ok(());
    };
    assert_eq!(result.stdout, "42\n");
    Ok(())
}

#[tokio::test]
async fn test_go_compile_error_is_sanitized() -> Result<()> {
    let Some(result) = run_snippet(go_config(), Language::Go, GO_COMPILE_ERROR, "").await? else {
        return Ok(());
    };
    assert!(matches!(result.failure, Some(ExecutionFailure::NonZeroExit(_))));
    assert!(result.stderr.contains("undefined"));
    assert!(!result.stderr.contains("/tmp/"));

    let body = result.render();
    assert!(body.contains("Error Output:"));
    assert!(!body.contains(TEMPDIR_PLACEHOLDER), "placeholders are escaped too");
    Ok(())
}

#[tokio::test]
async fn test_go_timeout() -> Result<()> {
    test_language_timeout(Language::Go, GO_WITH_TIMEOUT).await
}
