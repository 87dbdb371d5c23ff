//! OAuth 2.0 grant type identifiers.

// self
use crate::_prelude::*;

/// OAuth 2.0 grant types handled by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum GrantType {
	/// Client Credentials grant for app-only tokens.
	ClientCredentials,
}
impl GrantType {
	/// Returns the RFC 6749 identifier sent as `grant_type`.
	pub const fn as_str(self) -> &'static str {
		match self {
			GrantType::ClientCredentials => "client_credentials",
		}
	}

	/// Returns the identifier orchestrators use to register the grant's flow.
	pub const fn flow_id(self) -> &'static str {
		match self {
			GrantType::ClientCredentials => "CLIENT_CREDENTIALS",
		}
	}
}
impl Display for GrantType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
