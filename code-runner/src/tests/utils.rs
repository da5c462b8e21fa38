pub mod defaults {
    use crate::{RunnerConfig, DEFAULT_TIMEOUT};
    use tokio::time::Duration;

    pub fn default_test_config() -> RunnerConfig {
        RunnerConfig::default().with_timeout(default_timeout())
    }

    pub fn default_timeout() -> Duration {
        DEFAULT_TIMEOUT
    }

    /// `go run` compiles first, which can take a while on a cold build cache
    pub fn extended_timeout() -> Duration {
        Duration::from_secs(60)
    }

    pub fn short_timeout() -> Duration {
        Duration::from_secs(1)
    }
}
