//! Reconcile identity records across two sources: a SAML export and a platform user
//! export.
//!
//! The SCIM/SAML APIs occasionally omit users, so reconciliation works on whatever
//! record sets the caller supplies (API pages or raw export rows): a left join of
//! SAML identities onto platform records by normalized login, plus unmatched
//! reporting in both directions.

use crate::record::Record;
use crate::{Error, Result};
use std::collections::{HashMap, HashSet};

/// Normalize a login key for joining: trim + ASCII lowercase.
#[must_use]
pub fn normalize_login(login: &str) -> String {
	login.trim().to_ascii_lowercase()
}

/// One SAML identity with its (possibly missing) platform counterpart.
#[derive(Debug, Clone)]
pub struct MergedIdentity {
	/// Normalized join key.
	pub login: String,
	pub saml: Record,
	pub platform: Option<Record>,
}

/// Outcome of a reconciliation run.
#[derive(Debug, Clone)]
pub struct ReconcileReport {
	/// Every SAML identity, in input order, joined with its platform record.
	pub merged: Vec<MergedIdentity>,
	/// SAML identities without a platform record.
	pub unmatched_saml: Vec<Record>,
	/// Platform records whose login is absent from the SAML export, in input order.
	pub unmatched_platform: Vec<Record>,
}

impl ReconcileReport {
	#[must_use]
	pub fn has_unmatched(&self) -> bool {
		!self.unmatched_saml.is_empty() || !self.unmatched_platform.is_empty()
	}
}

/// Left-join SAML identities onto platform records by normalized login.
///
/// Every record on both sides must carry a login field; a record without one is an
/// input error (`Error::RecordMissingLogin`). When the platform export contains
/// duplicate logins, the first record wins.
pub fn reconcile(saml: &[Record], platform: &[Record]) -> Result<ReconcileReport> {
	// -- Index the platform records by normalized login.
	let mut platform_by_login: HashMap<String, &Record> = HashMap::new();
	for record in platform {
		let login = record.login().ok_or(Error::RecordMissingLogin {
			context: "platform export",
		})?;
		platform_by_login.entry(normalize_login(login)).or_insert(record);
	}

	// -- Left join, SAML order preserved.
	let mut merged = Vec::with_capacity(saml.len());
	let mut unmatched_saml = Vec::new();
	let mut saml_logins: HashSet<String> = HashSet::new();

	for record in saml {
		let login = record.login().ok_or(Error::RecordMissingLogin { context: "saml export" })?;
		let login = normalize_login(login);
		let platform_record = platform_by_login.get(&login).map(|record| (*record).clone());
		if platform_record.is_none() {
			unmatched_saml.push(record.clone());
		}
		saml_logins.insert(login.clone());
		merged.push(MergedIdentity {
			login,
			saml: record.clone(),
			platform: platform_record,
		});
	}

	// -- Platform records never referenced by the SAML export.
	let unmatched_platform = platform
		.iter()
		.filter(|record| {
			record
				.login()
				.is_some_and(|login| !saml_logins.contains(&normalize_login(login)))
		})
		.cloned()
		.collect();

	Ok(ReconcileReport {
		merged,
		unmatched_saml,
		unmatched_platform,
	})
}

// region:    --- Tests

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn rec(login: &str) -> Record {
		Record::from(json!({ "login": login }))
	}

	#[test]
	fn test_reconcile_joins_on_normalized_login() {
		let saml = vec![rec("Alice "), rec("bob")];
		let platform = vec![rec("alice"), rec("BOB")];

		let report = reconcile(&saml, &platform).unwrap();
		assert_eq!(report.merged.len(), 2);
		assert!(report.merged.iter().all(|m| m.platform.is_some()));
		assert!(!report.has_unmatched());
	}

	#[test]
	fn test_reconcile_reports_unmatched_both_directions() {
		let saml = vec![rec("alice"), rec("carol")];
		let platform = vec![rec("alice"), rec("dave")];

		let report = reconcile(&saml, &platform).unwrap();
		assert_eq!(report.merged.len(), 2);

		let unmatched_saml: Vec<_> = report.unmatched_saml.iter().filter_map(Record::login).collect();
		assert_eq!(unmatched_saml, ["carol"]);

		let unmatched_platform: Vec<_> = report.unmatched_platform.iter().filter_map(Record::login).collect();
		assert_eq!(unmatched_platform, ["dave"]);
	}

	#[test]
	fn test_reconcile_preserves_saml_order() {
		let saml = vec![rec("carol"), rec("alice"), rec("bob")];
		let platform = vec![rec("alice"), rec("bob"), rec("carol")];

		let report = reconcile(&saml, &platform).unwrap();
		let logins: Vec<_> = report.merged.iter().map(|m| m.login.as_str()).collect();
		assert_eq!(logins, ["carol", "alice", "bob"]);
	}

	#[test]
	fn test_reconcile_missing_login_is_err() {
		let saml = vec![Record::from(json!({ "name": "no-login" }))];
		let res = reconcile(&saml, &[]);
		assert!(matches!(res, Err(Error::RecordMissingLogin { context: "saml export" })));
	}

	#[test]
	fn test_reconcile_duplicate_platform_logins_first_wins() {
		let saml = vec![rec("alice")];
		let platform = vec![
			Record::from(json!({ "login": "alice", "email": "first@example.com" })),
			Record::from(json!({ "login": "alice", "email": "second@example.com" })),
		];

		let report = reconcile(&saml, &platform).unwrap();
		let matched = report.merged[0].platform.as_ref().unwrap();
		assert_eq!(matched.email(), Some("first@example.com"));
	}
}

// endregion: --- Tests
