//! Some support utilities for the tests
//! Note: Must be imported in each test file

#![allow(unused)] // For test support

use serde_json::{Value, json};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub type Result<T> = core::result::Result<T, Box<dyn std::error::Error>>;

// Helper to initialize tracing, call this at the beginning of each test
pub fn init_tracing() {
	let subscriber = FmtSubscriber::builder()
		.with_env_filter(
			EnvFilter::from_default_env().add_directive("idsync=trace".parse().expect("Invalid tracing directive")),
		)
		.with_test_writer() // Writes to the test output buffer, visible with --nocapture
		.try_init();
	// Ignore error if already initialized by another test
	let _ = subscriber;
}

pub const TEST_TOKEN: &str = "test-token";
pub const TEST_LOGIN: &str = "octo-admin";

/// Start a mock self-hosted deployment whose identity endpoint answers for `TEST_TOKEN`.
pub async fn start_deployment() -> MockServer {
	let server = MockServer::start().await;
	mount_identity(&server, TEST_LOGIN).await;
	server
}

pub async fn mount_identity(server: &MockServer, login: &str) {
	Mock::given(method("GET"))
		.and(path("/api/v3/user"))
		.and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
		.respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": login })))
		.mount(server)
		.await;
}

/// Mount one page of a cursor-paginated user listing.
/// `cursor` is the cursor this page answers for (`None` = first request), and
/// `next_cursor` the cursor it hands back (`None` = final page, sent as the empty
/// string the way the live service does).
pub async fn mount_users_page(server: &MockServer, cursor: Option<&str>, members: Value, next_cursor: Option<&str>) {
	let mock = Mock::given(method("GET")).and(path("/api/v3/users"));
	let mock = match cursor {
		Some(cursor) => mock.and(query_param("cursor", cursor)),
		None => mock.and(query_param_is_missing("cursor")),
	};

	let body = json!({
		"members": members,
		"response_metadata": { "next_cursor": next_cursor.unwrap_or("") },
	});

	mock.respond_with(ResponseTemplate::new(200).set_body_json(body))
		.mount(server)
		.await;
}

/// Mount a one-shot 429 for the given cursor, with a `Retry-After` delay in seconds.
/// Mount this before the success page for the same cursor so it matches first.
pub async fn mount_rate_limit_once(server: &MockServer, cursor: Option<&str>, retry_after_secs: u64) {
	let mock = Mock::given(method("GET")).and(path("/api/v3/users"));
	let mock = match cursor {
		Some(cursor) => mock.and(query_param("cursor", cursor)),
		None => mock.and(query_param_is_missing("cursor")),
	};
	mock.respond_with(ResponseTemplate::new(429).insert_header("Retry-After", retry_after_secs.to_string().as_str()))
		.up_to_n_times(1)
		.mount(server)
		.await;
}

/// Build a member object with the common fields.
pub fn member(id: &str, name: &str) -> Value {
	json!({
		"id": id,
		"name": name,
		"deleted": false,
		"is_bot": false,
		"is_app_user": false,
	})
}
