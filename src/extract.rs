//! Extraction options for turning raw records into tabular rows.
//!
//! This module owns the per-record filter/transform step between the page stream and
//! the downstream delimited sink: a fixed field order, a header row, empty strings
//! for missing values, and running counters for the end-of-run summary. The sink
//! itself (file I/O, backups) is an external collaborator.

use crate::record::Record;
use serde_json::Value;

/// Fields a caller may select for output.
pub const AVAILABLE_FIELDS: &[&str] = &[
	"id",
	"name",
	"real_name",
	"email",
	"deleted",
	"is_bot",
	"team_id",
	"tz",
	"title",
	"phone",
	"skype",
	"first_name",
	"last_name",
	"is_app_user",
	"is_owner",
	"is_admin",
	"is_primary_owner",
];

const DEFAULT_FIELDS: &[&str] = &[
	"id",
	"name",
	"first_name",
	"last_name",
	"email",
	"deleted",
	"is_bot",
	"is_app_user",
];

/// Field selection and inclusion filters for an extraction run.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
	pub fields: Vec<String>,
	pub include_bots: bool,
	pub include_deleted: bool,
}

impl Default for ExtractOptions {
	fn default() -> Self {
		Self {
			fields: DEFAULT_FIELDS.iter().map(ToString::to_string).collect(),
			include_bots: false,
			include_deleted: false,
		}
	}
}

impl ExtractOptions {
	#[must_use]
	pub fn with_fields(mut self, fields: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.fields = fields.into_iter().map(Into::into).collect();
		self
	}

	#[must_use]
	pub const fn with_include_bots(mut self, include_bots: bool) -> Self {
		self.include_bots = include_bots;
		self
	}

	#[must_use]
	pub const fn with_include_deleted(mut self, include_deleted: bool) -> Self {
		self.include_deleted = include_deleted;
		self
	}

	/// Whether this record passes the inclusion filters.
	#[must_use]
	pub fn accept(&self, record: &Record) -> bool {
		if !self.include_bots && (record.is_bot() || record.is_app_user()) {
			return false;
		}
		if !self.include_deleted && record.deleted() {
			return false;
		}
		true
	}

	/// Header row, in field order.
	#[must_use]
	pub fn header(&self) -> Vec<String> {
		self.fields.clone()
	}

	/// One output row for `record`, in field order. Missing values render empty.
	#[must_use]
	pub fn to_row(&self, record: &Record) -> Vec<String> {
		self.fields.iter().map(|field| render_field(record, field)).collect()
	}
}

fn render_field(record: &Record, field: &str) -> String {
	match record.field(field) {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(s)) => s.clone(),
		Some(Value::Bool(b)) => b.to_string(),
		Some(Value::Number(n)) => n.to_string(),
		Some(other) => other.to_string(),
	}
}

// region:    --- ExtractStats

/// Running counters for an extraction run, reported at the end.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractStats {
	pub active: u64,
	pub deactivated: u64,
	pub bots: u64,
	pub app_users: u64,
}

impl ExtractStats {
	pub fn observe(&mut self, record: &Record) {
		if record.deleted() {
			self.deactivated += 1;
		} else {
			self.active += 1;
		}
		if record.is_bot() {
			self.bots += 1;
		}
		if record.is_app_user() {
			self.app_users += 1;
		}
	}

	#[must_use]
	pub const fn total(&self) -> u64 {
		self.active + self.deactivated
	}

	#[must_use]
	pub fn summary(&self) -> String {
		format!(
			"{} users ({} active, {} deactivated, {} bot, {} app users)",
			self.total(),
			self.active,
			self.deactivated,
			self.bots,
			self.app_users
		)
	}
}

// endregion: --- ExtractStats

// region:    --- Tests


// endregion: --- Tests
