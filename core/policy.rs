// Retry/backoff policy for the exact-transfer primitives - pure data, no I/O
use std::env;
use std::time::Duration;

// Environment variables for configuration
// ETERM_READ_POLL_MS: Readiness poll slice for the reader (default: 1000)
// ETERM_WRITE_BACKOFF_MS: Sleep after a would-block on send (default: 100)
// ETERM_MAX_WAIT_MS: Upper bound on a whole transfer (default: unset, wait forever)
pub const ENV_READ_POLL_MS: &str = "ETERM_READ_POLL_MS";
pub const ENV_WRITE_BACKOFF_MS: &str = "ETERM_WRITE_BACKOFF_MS";
pub const ENV_MAX_WAIT_MS: &str = "ETERM_MAX_WAIT_MS";

pub const DEFAULT_READ_POLL_INTERVAL: Duration = Duration::from_secs(1);
pub const DEFAULT_WRITE_BACKOFF: Duration = Duration::from_millis(100);

/// How long the reader and writer wait between attempts.
///
/// The defaults reproduce the fixed intervals of the wire layer this crate
/// serves: the reader polls readiness in one-second slices and the writer
/// sleeps 100ms whenever the local send buffer is full. Tests shrink both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Timeout handed to the readiness waiter before every receive attempt.
    pub read_poll_interval: Duration,
    /// Pause after a send attempt reports would-block.
    pub write_backoff: Duration,
    /// Deadline for one whole transfer. `None` blocks until done or failed.
    pub max_wait: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            read_poll_interval: DEFAULT_READ_POLL_INTERVAL,
            write_backoff: DEFAULT_WRITE_BACKOFF,
            max_wait: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(read_poll_interval: Duration, write_backoff: Duration) -> Self {
        RetryPolicy {
            read_poll_interval,
            write_backoff,
            max_wait: None,
        }
    }

    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Read the policy from `ETERM_*` environment variables.
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let millis = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let read_poll_interval = millis(ENV_READ_POLL_MS)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_READ_POLL_INTERVAL);

        let write_backoff = millis(ENV_WRITE_BACKOFF_MS)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_WRITE_BACKOFF);

        let max_wait = millis(ENV_MAX_WAIT_MS).map(Duration::from_millis);

        RetryPolicy {
            read_poll_interval,
            write_backoff,
            max_wait,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_in(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_wire_layer_intervals() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.read_poll_interval, Duration::from_secs(1));
        assert_eq!(policy.write_backoff, Duration::from_millis(100));
        assert_eq!(policy.max_wait, None);
    }

    #[test]
    fn empty_environment_yields_defaults() {
        assert_eq!(RetryPolicy::from_lookup(|_| None), RetryPolicy::default());
    }

    #[test]
    fn environment_overrides_each_field() {
        let policy = RetryPolicy::from_lookup(lookup_in(&[
            (ENV_READ_POLL_MS, "250"),
            (ENV_WRITE_BACKOFF_MS, " 5 "),
            (ENV_MAX_WAIT_MS, "30000"),
        ]));
        assert_eq!(policy.read_poll_interval, Duration::from_millis(250));
        assert_eq!(policy.write_backoff, Duration::from_millis(5));
        assert_eq!(policy.max_wait, Some(Duration::from_secs(30)));
    }

    #[test]
    fn garbage_values_fall_back() {
        let policy = RetryPolicy::from_lookup(lookup_in(&[
            (ENV_READ_POLL_MS, "soon"),
            (ENV_WRITE_BACKOFF_MS, "-1"),
            (ENV_MAX_WAIT_MS, ""),
        ]));
        assert_eq!(policy, RetryPolicy::default());
    }

    #[test]
    fn builder_sets_deadline() {
        let policy = RetryPolicy::new(Duration::from_millis(1), Duration::ZERO)
            .with_max_wait(Duration::from_millis(20));
        assert_eq!(policy.max_wait, Some(Duration::from_millis(20)));
        assert_eq!(policy.write_backoff, Duration::ZERO);
    }
}
