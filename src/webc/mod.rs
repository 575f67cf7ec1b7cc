//! The webc module holds the low-level request engine: one authenticated call at a
//! time, plus the page stream that drains cursor-paginated list endpoints.
//!
//! The engine is stateless across invocations; it never caches or persists responses.

// region:    --- Modules

mod backoff;
mod error;
mod page_stream;

pub use backoff::*;
pub use error::{Error, Result};
pub use page_stream::*;

// endregion: --- Modules

use reqwest::{Method, StatusCode};
use serde_json::{Map, Value};
use std::time::Duration;

/// Header carrying the server-requested retry delay on rate-limit responses.
const RETRY_AFTER_HEADER: &str = "Retry-After";

/// Thin wrapper over `reqwest::Client` that classifies responses for the engine.
#[derive(Debug, Clone, Default)]
pub struct WebClient {
	reqwest_client: reqwest::Client,
}

/// Constructors
impl WebClient {
	#[must_use]
	pub fn from_reqwest_client(reqwest_client: reqwest::Client) -> Self {
		Self { reqwest_client }
	}
}

/// Web call implementations
impl WebClient {
	pub async fn do_get(
		&self,
		url: &str,
		headers: &[(String, String)],
		query: Vec<(String, String)>,
	) -> Result<WebResponse> {
		self.do_request(Method::GET, url, headers, query, None).await
	}

	pub async fn do_post(&self, url: &str, headers: &[(String, String)], payload: Value) -> Result<WebResponse> {
		self.do_request(Method::POST, url, headers, Vec::new(), Some(payload)).await
	}

	/// Issue one HTTP call and decode the JSON body.
	///
	/// - `429` becomes the distinguished `Error::RateLimited` (with the parsed
	///   `Retry-After` delay) so that the page stream can absorb it.
	/// - Any other non-success status becomes `Error::ResponseFailedStatus` with the
	///   body captured for diagnostics.
	/// - An empty body decodes to an empty JSON object.
	pub async fn do_request(
		&self,
		method: Method,
		url: &str,
		headers: &[(String, String)],
		query: Vec<(String, String)>,
		body: Option<Value>,
	) -> Result<WebResponse> {
		let mut reqwest_builder = self.reqwest_client.request(method, url);
		for (name, value) in headers {
			reqwest_builder = reqwest_builder.header(name, value);
		}
		if !query.is_empty() {
			reqwest_builder = reqwest_builder.query(&query);
		}
		if let Some(body) = body {
			reqwest_builder = reqwest_builder.json(&body);
		}

		let response = reqwest_builder.send().await?;
		let status = response.status();

		if status == StatusCode::TOO_MANY_REQUESTS {
			let retry_after = response
				.headers()
				.get(RETRY_AFTER_HEADER)
				.and_then(|value| value.to_str().ok())
				.and_then(|value| value.trim().parse::<u64>().ok())
				.map(Duration::from_secs);
			return Err(Error::RateLimited { retry_after });
		}

		if !status.is_success() {
			let body = response.text().await.unwrap_or_default();
			return Err(Error::ResponseFailedStatus {
				status: status.as_u16(),
				body,
			});
		}

		let text = response.text().await?;
		let body = if text.trim().is_empty() {
			Value::Object(Map::new())
		} else {
			serde_json::from_str(&text)?
		};

		Ok(WebResponse {
			status: status.as_u16(),
			body,
		})
	}
}

// region:    --- WebResponse

#[derive(Debug)]
pub struct WebResponse {
	pub status: u16,
	pub body: Value,
}

// endregion: --- WebResponse
