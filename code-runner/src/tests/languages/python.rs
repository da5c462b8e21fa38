use super::super::fixtures::{code_samples::PYTHON_HELLO, test_scenarios::*};
use super::*;
use crate::{ExecutionFailure, FAILURE_SUFFIX, TEMPDIR_PLACEHOLDER};

#[tokio::test]
async fn test_python_basic() -> Result<()> {
    let Some(result) =
        run_snippet(default_test_config(), Language::Python, PYTHON_HELLO, "").await?
    else {
        return Ok(());
    };
    assert_eq!(result.stdout, "Hello from Python!\n");
    assert!(result.stderr.is_empty());
    assert!(result.succeeded());
    Ok(())
}

#[tokio::test]
async fn test_python_default_snippet() -> Result<()> {
    test_default_snippet(Language::Python, default_test_config()).await
}

#[tokio::test]
async fn test_python_input() -> Result<()> {
    let Some(result) = run_snippet(
        default_test_config(),
        Language::Python,
        PYTHON_WITH_INPUT,
        "  test user  ",
    )
    .await?
    else {
        return Ok(());
    };
    assert_eq!(result.stdout, "Hello, test user!\n");
    Ok(())
}

#[tokio::test]
async fn test_python_sees_prepared_lines() -> Result<()> {
    let Some(result) = run_snippet(
        default_test_config(),
        Language::Python,
        PYTHON_READ_LINES,
        "a; b ;c",
    )
    .await?
    else {
        return Ok(());
    };
    assert_eq!(result.stdout, "3 a|b|c\n");
    Ok(())
}

#[tokio::test]
async fn test_python_output_is_escaped() -> Result<()> {
    let Some(result) =
        run_snippet(default_test_config(), Language::Python, PYTHON_MARKUP, "").await?
    else {
        return Ok(());
    };
    let body = result.render();
    assert!(body.contains("&lt;script&gt;"));
    assert!(body.contains("&amp; done"));
    assert!(!body.contains('<'));
    Ok(())
}

#[tokio::test]
async fn test_python_traceback_hides_workspace() -> Result<()> {
    let Some(result) =
        run_snippet(default_test_config(), Language::Python, PYTHON_RAISES, "").await?
    else {
        return Ok(());
    };
    assert_eq!(result.failure, Some(ExecutionFailure::NonZeroExit(1)));
    assert!(result.stderr.contains(TEMPDIR_PLACEHOLDER));
    assert!(result.stderr.contains("ValueError"));

    let body = result.render();
    assert!(body.contains("&lt;tempdir&gt;"));
    assert!(body.contains("bad &lt;value&gt;"));
    assert!(body.ends_with(FAILURE_SUFFIX));
    Ok(())
}

#[tokio::test]
async fn test_python_partial_output_before_failure() -> Result<()> {
    let Some(result) = run_snippet(
        default_test_config(),
        Language::Python,
        PYTHON_PARTIAL_THEN_FAIL,
        "",
    )
    .await?
    else {
        return Ok(());
    };
    assert_eq!(result.failure, Some(ExecutionFailure::NonZeroExit(3)));
    assert_eq!(result.render(), format!("before\n{}", FAILURE_SUFFIX));
    Ok(())
}

#[tokio::test]
async fn test_python_timeout() -> Result<()> {
    test_language_timeout(Language::Python, PYTHON_WITH_TIMEOUT).await
}
