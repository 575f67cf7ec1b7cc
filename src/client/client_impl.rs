use crate::resolver::{AuthData, ServiceEndpoints};
use crate::webc::{ListQuery, PageStream, RetryPolicy, WebClient};
use crate::{Error, Result, ServiceTarget};
use reqwest::Method;
use serde_json::{Value, json};
use std::sync::Arc;
use value_ext::JsonValueExt;

/// Well-known endpoint returning the identity of the authenticated principal.
const IDENTITY_ENDPOINT: &str = "/user";
/// Default list endpoint for user extraction.
const USERS_ENDPOINT: &str = "/users";

/// The `idsync` client. Cheaply clonable; immutable after construction.
///
/// A `Client` only exists once its credential has been validated: `connect` resolves
/// the deployment endpoints and fetches the authenticated principal's login before
/// returning. A failed identity fetch is fatal to construction.
#[derive(Debug, Clone)]
pub struct Client {
	inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
	web_client: WebClient,
	target: ServiceTarget,
	retry_policy: RetryPolicy,
	login: String,
}

/// Constructors
impl Client {
	#[must_use]
	pub fn builder() -> ClientBuilder {
		ClientBuilder::default()
	}

	/// Connect with a literal bearer token. Shorthand for the builder.
	pub async fn connect(host: impl AsRef<str>, token: impl Into<String>) -> Result<Self> {
		Self::builder().connect(host.as_ref(), AuthData::from_key(token)).await
	}
}

/// Getters
impl Client {
	/// Login identifier of the authenticated principal.
	#[must_use]
	pub fn login(&self) -> &str {
		&self.inner.login
	}

	#[must_use]
	pub fn endpoints(&self) -> &ServiceEndpoints {
		&self.inner.target.endpoints
	}
}

/// Request surface
impl Client {
	/// Issue one REST call against `<rest_root><endpoint>`.
	///
	/// Returns the decoded response body (an empty mapping when the body is empty).
	/// Fails with `Error::ApiRequest` on transport failure or non-success status.
	pub async fn request(
		&self,
		method: Method,
		endpoint: &str,
		body: Option<Value>,
		query: Option<Vec<(String, String)>>,
	) -> Result<Value> {
		let inner = &self.inner;
		let url = inner.target.endpoints.rest.join(endpoint);
		let headers = inner.target.rest_headers()?;
		let res = inner
			.web_client
			.do_request(method, &url, &headers, query.unwrap_or_default(), body)
			.await?;
		tracing::trace!("{url} answered with status {}", res.status);
		Ok(res.body)
	}

	/// Convenience GET against the REST root.
	pub async fn get(&self, endpoint: &str, query: Option<Vec<(String, String)>>) -> Result<Value> {
		self.request(Method::GET, endpoint, None, query).await
	}

	/// Convenience POST against the REST root.
	pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value> {
		self.request(Method::POST, endpoint, Some(body), None).await
	}

	/// Issue one GraphQL call. Returns only the `data` payload, discarding the envelope.
	///
	/// A non-empty top-level `errors` list raises `Error::Query`, even when the HTTP
	/// status itself is a success; no partial `data` is returned in that case.
	pub async fn graphql(&self, query: &str, variables: Option<Value>) -> Result<Value> {
		let inner = &self.inner;
		let url = inner.target.endpoints.graphql.base_url().to_string();
		let headers = inner.target.graphql_headers()?;

		let mut payload = json!({ "query": query });
		if let Some(variables) = variables {
			payload.x_insert("variables", variables)?;
		}

		let res = inner.web_client.do_post(&url, &headers, payload).await?;

		if let Some(errors) = res.body.get("errors").and_then(Value::as_array)
			&& !errors.is_empty()
		{
			return Err(Error::Query { errors: errors.clone() });
		}

		let mut body = res.body;
		Ok(body.x_take::<Value>("data").unwrap_or_else(|_| json!({})))
	}

	/// Drain a cursor-paginated list endpoint into a stream of records.
	///
	/// Records are yielded strictly in server order, one page buffered at a time.
	/// Rate-limit responses are absorbed by the stream (sleep and re-issue, same
	/// cursor); any other failure terminates the stream.
	pub fn paginate(&self, list: ListQuery) -> Result<PageStream> {
		let inner = &self.inner;
		let url = inner.target.endpoints.rest.join(&list.endpoint);
		let headers = inner.target.rest_headers()?;
		Ok(PageStream::new(
			inner.web_client.clone(),
			url,
			headers,
			list,
			inner.retry_policy.clone(),
		))
	}

	/// Stream every user of the deployment.
	pub fn users(&self, page_size: u32) -> Result<PageStream> {
		self.paginate(ListQuery::new(USERS_ENDPOINT).with_page_size(page_size))
	}
}

// region:    --- ClientBuilder

/// Builder for [`Client`]. `connect` is the terminal call and performs the mandatory
/// credential validation.
#[derive(Debug, Default)]
pub struct ClientBuilder {
	reqwest_client: Option<reqwest::Client>,
	retry_policy: Option<RetryPolicy>,
}

impl ClientBuilder {
	#[must_use]
	pub fn with_reqwest(mut self, reqwest_client: reqwest::Client) -> Self {
		self.reqwest_client = Some(reqwest_client);
		self
	}

	#[must_use]
	pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
		self.retry_policy = Some(retry_policy);
		self
	}

	/// Resolve the deployment endpoints for `host`, then validate the credential by
	/// fetching the identity of the authenticated principal.
	///
	/// Fails with `Error::Authentication` when the identity call fails, returns a
	/// non-success status, or the response lacks a login field.
	pub async fn connect(self, host: &str, auth: impl Into<AuthData>) -> Result<Client> {
		let endpoints = ServiceEndpoints::resolve(host)?;
		let target = ServiceTarget {
			endpoints,
			auth: auth.into(),
		};
		let web_client = match self.reqwest_client {
			Some(reqwest_client) => WebClient::from_reqwest_client(reqwest_client),
			None => WebClient::default(),
		};

		let login = resolve_identity(&web_client, &target).await?;
		tracing::debug!(
			"authenticated against {} as '{login}'",
			target.endpoints.rest.base_url()
		);

		Ok(Client {
			inner: Arc::new(ClientInner {
				web_client,
				target,
				retry_policy: self.retry_policy.unwrap_or_default(),
				login,
			}),
		})
	}
}

/// Fetch the authenticated principal's login from the identity endpoint.
async fn resolve_identity(web_client: &WebClient, target: &ServiceTarget) -> Result<String> {
	let url = target.endpoints.rest.join(IDENTITY_ENDPOINT);
	let headers = target.rest_headers()?;

	let res = web_client
		.do_get(&url, &headers, Vec::new())
		.await
		.map_err(|webc_error| Error::Authentication {
			status: webc_error.status(),
			detail: format!("failed to fetch identity: {webc_error}"),
		})?;

	res.body.x_get::<String>("login").map_err(|_| Error::Authentication {
		status: None,
		detail: "identity response lacks a 'login' field".to_string(),
	})
}

// endregion: --- ClientBuilder
