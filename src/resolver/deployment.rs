use crate::resolver::Endpoint;
use crate::{Error, Result};
use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Canonical hostname of the public cloud deployment.
const CLOUD_HOSTNAME: &str = "github.com";
/// Fixed API roots for the public cloud (self-hosted roots are derived from the base URL).
const CLOUD_REST_ROOT: &str = "https://api.github.com";
const CLOUD_GRAPHQL_ROOT: &str = "https://api.github.com/graphql";

/// Accept header value for versioned REST calls.
pub const ACCEPT_REST: &str = "application/vnd.github.v3+json";
/// Accept header value for GraphQL calls.
pub const ACCEPT_GRAPHQL: &str = "application/vnd.github+json";

/// `DeploymentKind` distinguishes the vendor's public cloud from a self-hosted
/// enterprise instance. Derived from the hostname alone, never from response data.
#[derive(Debug, Clone, Copy, Display, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum DeploymentKind {
	Cloud,
	SelfHosted,
}

/// Serialization implementations
impl DeploymentKind {
	/// Serialize to a static str
	#[must_use]
	pub const fn as_str(&self) -> &'static str {
		match self {
			Self::Cloud => "Cloud",
			Self::SelfHosted => "SelfHosted",
		}
	}
}

/// From base URL implementations
impl DeploymentKind {
	/// Determine the deployment kind from a normalized base URL.
	/// Only the hostname is inspected (case-insensitive).
	#[must_use]
	pub fn from_base_url(base_url: &str) -> Self {
		if hostname_of(base_url).eq_ignore_ascii_case(CLOUD_HOSTNAME) {
			Self::Cloud
		} else {
			Self::SelfHosted
		}
	}
}

/// Normalize an arbitrary host string into a canonical absolute base URL.
/// - Prepends `https://` when no scheme prefix is present.
/// - Strips trailing slashes.
/// - Pure string transformation, no network access. Idempotent.
///
/// Empty or whitespace-only input is rejected rather than silently normalized.
pub fn normalize_base_url(host: &str) -> Result<String> {
	let host = host.trim();
	if host.is_empty() {
		return Err(Error::InvalidHost { host: host.to_string() });
	}

	let url = if host.starts_with("http://") || host.starts_with("https://") {
		host.to_string()
	} else {
		format!("https://{host}")
	};

	Ok(url.trim_end_matches('/').to_string())
}

/// Extract the hostname of an absolute URL (drops scheme, path, query, userinfo, port).
fn hostname_of(url: &str) -> &str {
	let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
	let rest = rest.split(['/', '?', '#']).next().unwrap_or(rest);
	let rest = rest.rsplit_once('@').map_or(rest, |(_, host)| host);
	// Bracketed IPv6 literals carry `:` inside the host part.
	if let Some(rest) = rest.strip_prefix('[') {
		rest.split(']').next().unwrap_or(rest)
	} else {
		rest.split(':').next().unwrap_or(rest)
	}
}

// region:    --- ServiceEndpoints

/// The two API roots a deployment exposes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceEndpoints {
	pub rest: Endpoint,
	pub graphql: Endpoint,
}

impl ServiceEndpoints {
	/// Resolve both API roots for a base host.
	///
	/// - Cloud (`github.com`): the fixed well-known public roots.
	/// - Self-hosted: `<base>/api/v3` and `<base>/api/graphql`.
	pub fn resolve(host: &str) -> Result<Self> {
		let base_url = normalize_base_url(host)?;
		let kind = DeploymentKind::from_base_url(&base_url);
		tracing::debug!("resolved '{base_url}' as a {} deployment", kind.as_str());
		match kind {
			DeploymentKind::Cloud => Ok(Self {
				rest: Endpoint::from_static(CLOUD_REST_ROOT),
				graphql: Endpoint::from_static(CLOUD_GRAPHQL_ROOT),
			}),
			DeploymentKind::SelfHosted => Ok(Self {
				rest: Endpoint::from_owned(format!("{base_url}/api/v3")),
				graphql: Endpoint::from_owned(format!("{base_url}/api/graphql")),
			}),
		}
	}
}

// endregion: --- ServiceEndpoints

// region:    --- Tests


// endregion: --- Tests
