use crate::record::Record;
use crate::webc::{Error as WebcError, RetryPolicy, WebClient, WebResponse};
use futures::{Future, Stream};
use serde_json::Value;
use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::time::Sleep;

pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Description of a cursor-paginated list endpoint.
#[derive(Debug, Clone)]
pub struct ListQuery {
	/// Endpoint path under the REST root (e.g. `/users`).
	pub endpoint: String,
	/// Page size, sent as the `limit` query parameter.
	pub page_size: u32,
	/// JSON pointer to the record collection for object-shaped pages.
	/// An array-shaped body is itself the page.
	pub records_pointer: String,
	/// JSON pointer to the next-page cursor. Missing or empty means final page.
	pub cursor_pointer: String,
}

impl ListQuery {
	pub fn new(endpoint: impl Into<String>) -> Self {
		Self {
			endpoint: endpoint.into(),
			page_size: DEFAULT_PAGE_SIZE,
			records_pointer: "/members".to_string(),
			cursor_pointer: "/response_metadata/next_cursor".to_string(),
		}
	}

	#[must_use]
	pub const fn with_page_size(mut self, page_size: u32) -> Self {
		self.page_size = page_size;
		self
	}

	#[must_use]
	pub fn with_records_pointer(mut self, pointer: impl Into<String>) -> Self {
		self.records_pointer = pointer.into();
		self
	}

	#[must_use]
	pub fn with_cursor_pointer(mut self, pointer: impl Into<String>) -> Self {
		self.cursor_pointer = pointer.into();
		self
	}
}

/// A lazy, finite, non-restartable stream of records drained from a paginated list
/// endpoint.
///
/// - One page is buffered at a time; records come out strictly in server order.
/// - The cursor is opaque: it is read from the page metadata and passed back
///   verbatim, never interpreted.
/// - Rate-limit failures are absorbed here: the stream sleeps out the server-supplied
///   delay and re-issues the identical request (same cursor), so no record is lost or
///   duplicated and the consumer never observes the retry.
/// - Any other failure ends the stream with a terminal error; records already yielded
///   remain valid.
///
/// Termination relies on the server eventually omitting a next cursor; the stream does
/// not independently bound the number of pages.
#[allow(clippy::type_complexity)]
pub struct PageStream {
	web_client: WebClient,
	url: String,
	headers: Vec<(String, String)>,
	list: ListQuery,
	retry_policy: RetryPolicy,

	// -- Pagination state, local to this stream
	cursor: Option<String>,
	attempts: u32,
	pending_records: VecDeque<Record>,
	request_future: Option<Pin<Box<dyn Future<Output = crate::webc::Result<WebResponse>> + Send>>>,
	backoff_sleep: Option<Pin<Box<Sleep>>>,
	done: bool,
}

impl PageStream {
	pub(crate) fn new(
		web_client: WebClient,
		url: String,
		headers: Vec<(String, String)>,
		list: ListQuery,
		retry_policy: RetryPolicy,
	) -> Self {
		Self {
			web_client,
			url,
			headers,
			list,
			retry_policy,
			cursor: None,
			attempts: 0,
			pending_records: VecDeque::new(),
			request_future: None,
			backoff_sleep: None,
			done: false,
		}
	}

	/// Arm the request future for the current cursor.
	fn start_request(&mut self) {
		let web_client = self.web_client.clone();
		let url = self.url.clone();
		let headers = self.headers.clone();
		let mut query = vec![("limit".to_string(), self.list.page_size.to_string())];
		if let Some(cursor) = &self.cursor {
			query.push(("cursor".to_string(), cursor.clone()));
		}
		self.request_future = Some(Box::pin(async move { web_client.do_get(&url, &headers, query).await }));
	}
}

impl Stream for PageStream {
	type Item = crate::Result<Record>;

	fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
		let this = self.get_mut();

		// -- First, drain the buffered page.
		if let Some(record) = this.pending_records.pop_front() {
			return Poll::Ready(Some(Ok(record)));
		}

		if this.done {
			return Poll::Ready(None);
		}

		loop {
			// -- Sleep out a pending backoff before re-issuing.
			if let Some(ref mut sleep) = this.backoff_sleep {
				match sleep.as_mut().poll(cx) {
					Poll::Ready(()) => this.backoff_sleep = None,
					Poll::Pending => return Poll::Pending,
				}
			}

			if let Some(ref mut fut) = this.request_future {
				match Pin::new(fut).poll(cx) {
					Poll::Ready(Ok(res)) => {
						this.request_future = None;
						this.attempts = 0;

						let page = match parse_page(res.body, &this.list) {
							Ok(page) => page,
							Err(err) => {
								this.done = true;
								return Poll::Ready(Some(Err(err.into())));
							}
						};
						tracing::debug!("fetched page of {} records from {}", page.records.len(), this.url);

						this.cursor = page.next_cursor;
						if this.cursor.is_none() {
							this.done = true;
						}
						this.pending_records.extend(page.records);

						if let Some(record) = this.pending_records.pop_front() {
							return Poll::Ready(Some(Ok(record)));
						}
						// Empty page: either finished, or fetch the next one.
						if this.done {
							return Poll::Ready(None);
						}
						continue;
					}
					Poll::Ready(Err(WebcError::RateLimited { retry_after })) => {
						this.request_future = None;
						this.attempts += 1;
						if !this.retry_policy.allows(this.attempts) {
							this.done = true;
							return Poll::Ready(Some(Err(crate::Error::RateLimitExhausted {
								attempts: this.attempts,
							})));
						}
						let delay = this.retry_policy.delay_for(retry_after);
						tracing::warn!("rate limited, retrying after {}s", delay.as_secs());
						this.backoff_sleep = Some(Box::pin(tokio::time::sleep(delay)));
						continue;
					}
					Poll::Ready(Err(err)) => {
						this.request_future = None;
						this.done = true;
						return Poll::Ready(Some(Err(err.into())));
					}
					Poll::Pending => return Poll::Pending,
				}
			}

			// -- No request in flight: issue one for the current cursor.
			this.start_request();
		}
	}
}

// region:    --- Page Parsing

struct Page {
	records: Vec<Record>,
	next_cursor: Option<String>,
}

/// Split a response body into its record collection and next cursor.
///
/// - Array body: the array is the page; no cursor, single page.
/// - Object body: records live at the configured records pointer (their absence is a
///   malformed response); the cursor sits at the cursor pointer, with missing or
///   empty meaning final page.
fn parse_page(body: Value, list: &ListQuery) -> crate::webc::Result<Page> {
	match body {
		Value::Array(items) => Ok(Page {
			records: items.into_iter().map(Record::from).collect(),
			next_cursor: None,
		}),
		body => {
			let records = match body.pointer(&list.records_pointer) {
				Some(Value::Array(items)) => items.iter().cloned().map(Record::from).collect(),
				_ => {
					return Err(WebcError::ResponseMissingRecords {
						pointer: list.records_pointer.clone(),
					});
				}
			};
			let next_cursor = body
				.pointer(&list.cursor_pointer)
				.and_then(Value::as_str)
				.filter(|cursor| !cursor.is_empty())
				.map(str::to_string);
			Ok(Page { records, next_cursor })
		}
	}
}

// endregion: --- Page Parsing

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_parse_page_array_body_single_page() {
		let list = ListQuery::new("/users");
		let page = parse_page(json!([{ "id": "U1" }, { "id": "U2" }]), &list).unwrap();
		assert_eq!(page.records.len(), 2);
		assert_eq!(page.next_cursor, None);
	}

	#[test]
	fn test_parse_page_object_body_with_cursor() {
		let list = ListQuery::new("/users");
		let body = json!({
			"members": [{ "id": "U1" }],
			"response_metadata": { "next_cursor": "c2" },
		});
		let page = parse_page(body, &list).unwrap();
		assert_eq!(page.records.len(), 1);
		assert_eq!(page.next_cursor.as_deref(), Some("c2"));
	}

	#[test]
	fn test_parse_page_empty_cursor_is_final() {
		let list = ListQuery::new("/users");
		let body = json!({
			"members": [{ "id": "U1" }],
			"response_metadata": { "next_cursor": "" },
		});
		let page = parse_page(body, &list).unwrap();
		assert_eq!(page.next_cursor, None);
	}

	#[test]
	fn test_parse_page_missing_records_is_err() {
		let list = ListQuery::new("/users");
		let res = parse_page(json!({ "ok": true }), &list);
		assert!(matches!(res, Err(WebcError::ResponseMissingRecords { .. })));
	}
}

// endregion: --- Tests
