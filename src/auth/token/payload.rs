//! Decoded token endpoint payloads and the minimal schema they must satisfy.

// crates.io
use serde_json::{Map, Value};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// Schema failure raised when a decoded body lacks a string `access_token`.
pub type PayloadSchemaError = serde_path_to_error::Error<serde_json::Error>;

/// Token endpoint payload carrying at least a string `access_token`.
///
/// Every other field the server returned is preserved verbatim in [`extra`](Self::extra).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
	/// Access token issued by the authorization server.
	pub access_token: TokenSecret,
	/// Remaining response fields (e.g., `token_type`, `expires_in`, `scope`).
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}
impl TokenPayload {
	/// Creates a payload that only carries an access token.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self { access_token: TokenSecret::new(access_token), extra: Map::new() }
	}

	/// Adds an extra response field.
	pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.extra.insert(key.into(), value.into());

		self
	}

	/// Checks a decoded JSON value against the `{ access_token: string }` contract.
	///
	/// The returned error carries the path of the offending field.
	pub fn from_json(value: Value) -> Result<Self, PayloadSchemaError> {
		serde_path_to_error::deserialize(value)
	}

	/// Returns the `token_type` field when the server supplied a string.
	pub fn token_type(&self) -> Option<&str> {
		self.extra.get("token_type").and_then(Value::as_str)
	}

	/// Returns the `expires_in` field when the server supplied a non-negative integer.
	pub fn expires_in(&self) -> Option<u64> {
		self.extra.get("expires_in").and_then(Value::as_u64)
	}

	/// Returns the granted `scope` field when the server supplied a string.
	pub fn scope(&self) -> Option<&str> {
		self.extra.get("scope").and_then(Value::as_str)
	}
}
