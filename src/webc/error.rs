use derive_more::From;
use std::time::Duration;

pub type Result<T> = core::result::Result<T, Error>;

/// Transport-level error for the request engine.
///
/// `RateLimited` is the distinguished condition the page stream retries on; every
/// other variant is terminal for the call that produced it.
#[derive(Debug, From)]
pub enum Error {
	/// The server signaled that the request quota was exceeded.
	/// `retry_after` is the server-supplied delay, when present.
	RateLimited {
		retry_after: Option<Duration>,
	},

	/// Non-success HTTP status (other than the rate-limit signal).
	/// The body is captured for the caller to log or re-raise.
	ResponseFailedStatus {
		status: u16,
		body: String,
	},

	/// Object-shaped page without a record collection at the configured pointer.
	ResponseMissingRecords {
		pointer: String,
	},

	// -- Externals
	#[from]
	Reqwest(reqwest::Error),
	#[from]
	SerdeJson(serde_json::Error),
}

/// Getters
impl Error {
	/// HTTP status attached to this error, when there is one.
	#[must_use]
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::RateLimited { .. } => Some(429),
			Self::ResponseFailedStatus { status, .. } => Some(*status),
			Self::Reqwest(err) => err.status().map(|s| s.as_u16()),
			Self::ResponseMissingRecords { .. } | Self::SerdeJson(_) => None,
		}
	}
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
	fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
		write!(fmt, "{self:?}")
	}
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
