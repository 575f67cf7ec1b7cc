use std::time::Duration;

/// Default suspension when the server does not supply a retry delay.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Backoff policy applied when a call fails with the rate-limit condition.
///
/// `max_retries: None` (the default) retries indefinitely, bounded only by how long
/// the server keeps rate-limiting. Set a ceiling to trade eventual completion for
/// bounded latency; exhaustion surfaces as `Error::RateLimitExhausted`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
	pub default_delay: Duration,
	pub max_retries: Option<u32>,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			default_delay: DEFAULT_RETRY_DELAY,
			max_retries: None,
		}
	}
}

impl RetryPolicy {
	#[must_use]
	pub const fn with_max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = Some(max_retries);
		self
	}

	#[must_use]
	pub const fn with_default_delay(mut self, default_delay: Duration) -> Self {
		self.default_delay = default_delay;
		self
	}

	/// Delay to sleep before re-issuing, preferring the server-supplied value.
	#[must_use]
	pub fn delay_for(&self, retry_after: Option<Duration>) -> Duration {
		retry_after.unwrap_or(self.default_delay)
	}

	/// Whether another retry is allowed after `attempts` rate-limited attempts.
	#[must_use]
	pub fn allows(&self, attempts: u32) -> bool {
		match self.max_retries {
			Some(max) => attempts <= max,
			None => true,
		}
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_delay_for_prefers_server_value() {
		let policy = RetryPolicy::default();
		assert_eq!(policy.delay_for(Some(Duration::from_secs(7))), Duration::from_secs(7));
		assert_eq!(policy.delay_for(None), DEFAULT_RETRY_DELAY);
	}

	#[test]
	fn test_allows_unbounded_by_default() {
		let policy = RetryPolicy::default();
		assert!(policy.allows(1_000_000));
	}

	#[test]
	fn test_allows_respects_ceiling() {
		let policy = RetryPolicy::default().with_max_retries(2);
		assert!(policy.allows(1));
		assert!(policy.allows(2));
		assert!(!policy.allows(3));
	}
}

// endregion: --- Tests
