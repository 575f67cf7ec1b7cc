use std::sync::Arc;

/// One resolved API root (REST or GraphQL).
/// It is designed to be efficiently clonable.
/// Invariant: never carries a trailing slash (enforced by `ServiceEndpoints::resolve`).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Endpoint {
	inner: Arc<str>,
}

/// Constructors
impl Endpoint {
	#[must_use]
	pub fn from_static(url: &'static str) -> Self {
		Self { inner: Arc::from(url) }
	}

	pub fn from_owned(url: impl Into<Arc<str>>) -> Self {
		Self { inner: url.into() }
	}
}

/// Getters
impl Endpoint {
	#[must_use]
	pub fn base_url(&self) -> &str {
		&self.inner
	}

	/// Join an endpoint path (expected to start with `/`) onto this root.
	#[must_use]
	pub fn join(&self, path: &str) -> String {
		format!("{}{path}", self.inner)
	}
}
