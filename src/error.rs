use derive_more::From;
use serde_json::Value;

pub type Result<T> = core::result::Result<T, Error>;

/// Main error type for the `idsync` crate.
///
/// Construction-time failures (`InvalidHost`, `Authentication`) abort the whole client
/// before any pagination begins. Per-call failures abort only the call (or the
/// in-progress pagination sequence); records already yielded remain valid.
#[derive(Debug, From)]
pub enum Error {
	/// The base host string was empty or whitespace-only.
	InvalidHost {
		host: String,
	},

	/// Credential validation failed while fetching the authenticated principal's
	/// identity. Fatal: the client is never constructed.
	Authentication {
		status: Option<u16>,
		detail: String,
	},

	/// A GraphQL response carried a non-empty top-level `errors` list
	/// (the protocol reports logical errors inside a 200 response).
	Query {
		errors: Vec<Value>,
	},

	/// The configured rate-limit retry ceiling was reached.
	/// Only raised when `RetryPolicy::max_retries` is set.
	RateLimitExhausted {
		attempts: u32,
	},

	/// The auth env variable was configured but is not set.
	ApiKeyEnvNotFound {
		env_name: String,
	},

	/// A record that must carry a login field does not.
	RecordMissingLogin {
		context: &'static str,
	},

	// -- Request engine
	#[from]
	ApiRequest(crate::webc::Error),

	// -- Externals
	#[from]
	ReqwestError(reqwest::Error),
	#[from]
	SerdeJson(serde_json::Error),
	#[from]
	JsonValueExt(value_ext::JsonValueExtError),
}

// region:    --- Error Boilerplate

impl core::fmt::Display for Error {
	fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::result::Result<(), core::fmt::Error> {
		write!(fmt, "{self:?}")
	}
}

impl std::error::Error for Error {}

// endregion: --- Error Boilerplate
