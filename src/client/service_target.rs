use crate::Result;
use crate::resolver::{ACCEPT_GRAPHQL, ACCEPT_REST, AuthData, ServiceEndpoints};

/// A `ServiceTarget` pairs the resolved endpoints of a deployment with the credential
/// used to authenticate against them.
///
/// This structure contains:
/// - `endpoints`: the REST and GraphQL roots of the deployment.
/// - `auth`: the authentication data required to access them.
///
/// Immutable after construction; header sets are built on demand.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ServiceTarget {
	pub endpoints: ServiceEndpoints,
	pub auth: AuthData,
}

impl ServiceTarget {
	/// Header set for REST calls (bearer token + versioned JSON accept type).
	pub fn rest_headers(&self) -> Result<Vec<(String, String)>> {
		let token = self.auth.token()?;
		Ok(vec![
			("Authorization".to_string(), format!("Bearer {token}")),
			("Accept".to_string(), ACCEPT_REST.to_string()),
		])
	}

	/// Header set for GraphQL calls (bearer token + generic JSON accept type).
	pub fn graphql_headers(&self) -> Result<Vec<(String, String)>> {
		let token = self.auth.token()?;
		Ok(vec![
			("Authorization".to_string(), format!("Bearer {token}")),
			("Accept".to_string(), ACCEPT_GRAPHQL.to_string()),
		])
	}
}
