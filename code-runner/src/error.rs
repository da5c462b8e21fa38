use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("Could not create temp directory: {0}")]
    TempDir(#[source] std::io::Error),

    #[error("Could not write source file: {0}")]
    WriteSource(#[source] std::io::Error),

    #[error("System error: {0}")]
    System(String),
}
