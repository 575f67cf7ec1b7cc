use crate::{Error, Result};

/// Bearer credential for a deployment.
///
/// Either a literal key or the name of an environment variable resolved when the
/// header sets are built. Immutable after construction and safe to share.
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub enum AuthData {
	FromEnv(String),
	Key(String),
}

/// Constructors
impl AuthData {
	pub fn from_env(env_name: impl Into<String>) -> Self {
		Self::FromEnv(env_name.into())
	}

	pub fn from_key(key: impl Into<String>) -> Self {
		Self::Key(key.into())
	}
}

/// Getters
impl AuthData {
	/// Resolve the bearer token value.
	pub fn token(&self) -> Result<String> {
		match self {
			Self::FromEnv(env_name) => std::env::var(env_name).map_err(|_| Error::ApiKeyEnvNotFound {
				env_name: env_name.to_string(),
			}),
			Self::Key(key) => Ok(key.clone()),
		}
	}
}

// region:    --- Debug Redaction

// Custom Debug so that a literal key never lands in logs.
impl std::fmt::Debug for AuthData {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::FromEnv(env_name) => write!(f, "AuthData::FromEnv({env_name})"),
			Self::Key(_) => write!(f, "AuthData::Key(REDACTED)"),
		}
	}
}

// endregion: --- Debug Redaction

// region:    --- Tests


// endregion: --- Tests
