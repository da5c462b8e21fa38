use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::{error::Error, sanitize::escape_html};

/// Wall-clock limit applied to every run unless configured otherwise
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Appended to the response body whenever a run did not succeed
pub const FAILURE_SUFFIX: &str = "\nError: An error occurred during execution.";

const STDERR_HEADER: &str = "\nError Output:\n";

/// Supported programming languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Go,
    Python,
}

impl Language {
    /// Every supported language, in the order the page lists them
    pub const ALL: [Language; 2] = [Language::Go, Language::Python];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Python => "python",
        }
    }
}

impl FromStr for Language {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.as_str() == s)
            .ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request's code, language and raw semicolon-delimited input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub language: Language,
    pub code: String,
    /// Raw input as typed by the user, e.g. `"3; 4"`
    #[serde(default)]
    pub input: String,
}

impl Submission {
    pub fn new(language: Language, code: impl Into<String>, input: impl Into<String>) -> Self {
        Self {
            language,
            code: code.into(),
            input: input.into(),
        }
    }
}

/// Why a run counts as failed. Only used for logging; the response body
/// carries a generic message instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionFailure {
    NonZeroExit(i32),
    Signaled,
    TimedOut(Duration),
    Spawn(String),
    Io(String),
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExecutionFailure::NonZeroExit(code) => write!(f, "exited with status {}", code),
            ExecutionFailure::Signaled => f.write_str("terminated by signal"),
            ExecutionFailure::TimedOut(limit) => {
                write!(f, "timed out after {} ms", limit.as_millis())
            }
            ExecutionFailure::Spawn(e) => write!(f, "failed to spawn: {}", e),
            ExecutionFailure::Io(e) => write!(f, "process io error: {}", e),
        }
    }
}

/// Sanitized output of a finished run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    pub failure: Option<ExecutionFailure>,
}

impl ExecutionResult {
    pub fn succeeded(&self) -> bool {
        self.failure.is_none()
    }

    /// Build the plain-text response body.
    ///
    /// Stdout is always included. Stderr is only shown for failed runs, and is
    /// followed by [`FAILURE_SUFFIX`]. Everything is HTML-escaped because the
    /// page drops the body straight into the document.
    pub fn render(&self) -> String {
        let mut body = escape_html(&self.stdout);
        if self.failure.is_some() {
            if !self.stderr.is_empty() {
                body.push_str(STDERR_HEADER);
                body.push_str(&escape_html(&self.stderr));
            }
            body.push_str(FAILURE_SUFFIX);
        }
        body
    }
}

/// Runner settings shared by every execution
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Wall-clock limit per run
    pub timeout: Duration,
    /// Interpreter/compiler overrides keyed by language
    pub programs: HashMap<Language, String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            programs: HashMap::new(),
        }
    }
}

impl RunnerConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_program(mut self, language: Language, program: impl Into<String>) -> Self {
        self.programs.insert(language, program.into());
        self
    }

    /// Program used to run `language`, falling back to the built-in default
    pub fn program_for(&self, language: Language) -> &str {
        self.programs
            .get(&language)
            .map(String::as_str)
            .unwrap_or(language.profile().program)
    }
}
