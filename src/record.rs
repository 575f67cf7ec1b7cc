use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One user/entity returned by the remote service.
///
/// The schema is owned by the remote service and varies with the requested field set,
/// so a record is an open mapping: typed accessors for the well-known fields, raw
/// lookup for everything else. Fields that some platforms nest under a `profile`
/// object (email, first/last name, ...) are found by [`Record::field`] as well.
///
/// Records are produced per page by the request engine and are not retained by it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
	value: Value,
}

impl From<Value> for Record {
	fn from(value: Value) -> Self {
		Self { value }
	}
}

/// Known-field accessors
impl Record {
	#[must_use]
	pub fn login(&self) -> Option<&str> {
		self.value.get("login").and_then(Value::as_str)
	}

	/// Unique identifier; stringified when the platform uses numeric ids.
	#[must_use]
	pub fn id(&self) -> Option<String> {
		match self.value.get("id") {
			Some(Value::String(s)) => Some(s.clone()),
			Some(Value::Number(n)) => Some(n.to_string()),
			_ => None,
		}
	}

	#[must_use]
	pub fn name(&self) -> Option<&str> {
		self.value.get("name").and_then(Value::as_str)
	}

	#[must_use]
	pub fn email(&self) -> Option<&str> {
		self.field("email").and_then(Value::as_str)
	}

	#[must_use]
	pub fn deleted(&self) -> bool {
		self.value.get("deleted").and_then(Value::as_bool).unwrap_or(false)
	}

	#[must_use]
	pub fn is_bot(&self) -> bool {
		self.value.get("is_bot").and_then(Value::as_bool).unwrap_or(false)
	}

	#[must_use]
	pub fn is_app_user(&self) -> bool {
		self.value.get("is_app_user").and_then(Value::as_bool).unwrap_or(false)
	}
}

/// Open-mapping access
impl Record {
	/// Look up a field by name, falling back to the nested `profile` object for
	/// platforms that keep contact fields there.
	#[must_use]
	pub fn field(&self, name: &str) -> Option<&Value> {
		self.value
			.get(name)
			.or_else(|| self.value.get("profile").and_then(|profile| profile.get(name)))
	}

	/// Raw JSON-pointer lookup (e.g. `/profile/email`).
	#[must_use]
	pub fn get(&self, pointer: &str) -> Option<&Value> {
		self.value.pointer(pointer)
	}

	#[must_use]
	pub fn as_value(&self) -> &Value {
		&self.value
	}

	#[must_use]
	pub fn into_value(self) -> Value {
		self.value
	}
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_field_profile_fallback() {
		let record = Record::from(json!({
			"id": "U1",
			"name": "alice",
			"profile": { "email": "alice@example.com", "first_name": "Alice" },
		}));
		assert_eq!(record.email(), Some("alice@example.com"));
		assert_eq!(
			record.field("first_name").and_then(Value::as_str),
			Some("Alice")
		);
		assert_eq!(record.field("tz"), None);
	}

	#[test]
	fn test_id_stringifies_numbers() {
		let record = Record::from(json!({ "id": 42 }));
		assert_eq!(record.id().as_deref(), Some("42"));
	}

	#[test]
	fn test_flags_default_false() {
		let record = Record::from(json!({ "login": "alice" }));
		assert!(!record.deleted());
		assert!(!record.is_bot());
		assert!(!record.is_app_user());
	}
}

// endregion: --- Tests
