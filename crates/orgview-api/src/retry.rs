// Retry policy for organization-scoped fetches
//
// Off by default: a fetch is attempted exactly once. When enabled, a single
// extra attempt is made after a jittered delay, and only for transport
// failures.

use std::time::Duration;

use rand::Rng;

use crate::error::Error;

/// How many times a failed fetch is re-attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryPolicy {
    /// Attempt once; report the failure.
    #[default]
    Never,
    /// Retry a transport failure once, after `base_delay` plus up to
    /// `max_jitter` of random extra delay.
    OnceOnTransport {
        base_delay: Duration,
        max_jitter: Duration,
    },
}

impl RetryPolicy {
    pub fn once_on_transport(base_delay: Duration, max_jitter: Duration) -> Self {
        Self::OnceOnTransport {
            base_delay,
            max_jitter,
        }
    }

    /// Upper bound on requests issued per fetch.
    pub fn max_attempts(self) -> u32 {
        match self {
            Self::Never => 1,
            Self::OnceOnTransport { .. } => 2,
        }
    }

    /// Whether another attempt should follow `attempts_made` failed ones.
    pub fn should_retry(self, attempts_made: u32, err: &Error) -> bool {
        attempts_made < self.max_attempts() && err.is_transient()
    }

    /// Delay before the next attempt.
    pub fn next_delay(self) -> Duration {
        match self {
            Self::Never => Duration::ZERO,
            Self::OnceOnTransport {
                base_delay,
                max_jitter,
            } => {
                let jitter_ms = u64::try_from(max_jitter.as_millis()).unwrap_or(u64::MAX);
                let extra = if jitter_ms == 0 {
                    0
                } else {
                    rand::rng().random_range(0..=jitter_ms)
                };
                base_delay + Duration::from_millis(extra)
            }
        }
    }
}
