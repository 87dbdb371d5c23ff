//! Client Credentials parameters and their validation.

// self
use crate::_prelude::*;

/// Raised when caller-supplied parameters violate the flow's invariants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum ValidationError {
	/// The token endpoint was empty.
	#[error("Token endpoint cannot be empty.")]
	MissingAuthEndpoint,
	/// The client identifier was empty.
	#[error("Client identifier cannot be empty.")]
	MissingClientId,
	/// Scopes were provided as an empty string.
	#[error("Scopes cannot be empty when provided.")]
	BlankScopes,
}

/// Raw Client Credentials parameters as collected from a form.
///
/// Field names serialize with the form keys (`authEndpoint`, `clientID`, `clientSecret`,
/// `scopes`). Missing keys fall back to [`Default`], so incomplete input surfaces as a
/// [`ValidationError`] instead of a deserialization failure.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowParameters {
	/// Token endpoint URL.
	#[serde(rename = "authEndpoint")]
	pub auth_endpoint: String,
	/// OAuth 2.0 client identifier.
	#[serde(rename = "clientID")]
	pub client_id: String,
	/// Client secret; absent or empty for public clients.
	#[serde(rename = "clientSecret", skip_serializing_if = "Option::is_none")]
	pub client_secret: Option<String>,
	/// Space-delimited scope list.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub scopes: Option<String>,
}
impl FlowParameters {
	/// Creates parameters for the given endpoint and client without secret or scopes.
	pub fn new(auth_endpoint: impl Into<String>, client_id: impl Into<String>) -> Self {
		Self {
			auth_endpoint: auth_endpoint.into(),
			client_id: client_id.into(),
			client_secret: None,
			scopes: None,
		}
	}

	/// Sets or replaces the client secret.
	pub fn with_client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Sets or replaces the space-delimited scope list.
	pub fn with_scopes(mut self, scopes: impl Into<String>) -> Self {
		self.scopes = Some(scopes.into());

		self
	}

	/// Checks the parameters and returns the form the exchanger accepts.
	///
	/// The endpoint and client identifier must be non-empty; scopes, when present, must be
	/// non-empty too. An empty client secret is treated as absent.
	pub fn validate(self) -> Result<ValidatedParameters, ValidationError> {
		if self.auth_endpoint.is_empty() {
			return Err(ValidationError::MissingAuthEndpoint);
		}
		if self.client_id.is_empty() {
			return Err(ValidationError::MissingClientId);
		}
		if self.scopes.as_deref().is_some_and(str::is_empty) {
			return Err(ValidationError::BlankScopes);
		}

		Ok(ValidatedParameters {
			auth_endpoint: self.auth_endpoint,
			client_id: self.client_id,
			client_secret: self.client_secret.filter(|secret| !secret.is_empty()),
			scopes: self.scopes,
		})
	}
}
impl Default for FlowParameters {
	fn default() -> Self {
		Self {
			auth_endpoint: String::new(),
			client_id: String::new(),
			client_secret: Some(String::new()),
			scopes: None,
		}
	}
}
impl Debug for FlowParameters {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("FlowParameters")
			.field("auth_endpoint", &self.auth_endpoint)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.as_deref().is_some_and(|s| !s.is_empty()))
			.field("scopes", &self.scopes)
			.finish()
	}
}
impl From<ValidatedParameters> for FlowParameters {
	fn from(value: ValidatedParameters) -> Self {
		Self {
			auth_endpoint: value.auth_endpoint,
			client_id: value.client_id,
			client_secret: value.client_secret,
			scopes: value.scopes,
		}
	}
}

/// Parameters that passed [`FlowParameters::validate`].
#[derive(Clone, PartialEq, Eq)]
pub struct ValidatedParameters {
	auth_endpoint: String,
	client_id: String,
	client_secret: Option<String>,
	scopes: Option<String>,
}
impl ValidatedParameters {
	/// Token endpoint URL (non-empty).
	pub fn auth_endpoint(&self) -> &str {
		&self.auth_endpoint
	}

	/// Client identifier (non-empty).
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// Client secret, if one was supplied (never empty).
	pub fn client_secret(&self) -> Option<&str> {
		self.client_secret.as_deref()
	}

	/// Space-delimited scope list, if one was supplied (never empty).
	pub fn scopes(&self) -> Option<&str> {
		self.scopes.as_deref()
	}
}
impl TryFrom<FlowParameters> for ValidatedParameters {
	type Error = ValidationError;

	fn try_from(value: FlowParameters) -> Result<Self, Self::Error> {
		value.validate()
	}
}
impl Debug for ValidatedParameters {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ValidatedParameters")
			.field("auth_endpoint", &self.auth_endpoint)
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("scopes", &self.scopes)
			.finish()
	}
}
