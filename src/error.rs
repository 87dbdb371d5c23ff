//! Flow-level error taxonomy shared by the validator, the exchanger, and flow registrations.
//!
//! The taxonomy is intentionally flat: transport, decoding, and schema causes are logged at the
//! stage that produced them and never travel with the returned [`Error`].

// self
use crate::{_prelude::*, auth::GrantType, flows::ValidationError};

/// Flow-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical flow error exposed by public APIs.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
	/// Parameters failed validation; no request was sent.
	#[error("Flow parameters are invalid: {0}")]
	Validation(#[from] ValidationError),
	/// Transport failure or an undecodable response body.
	#[error("Token request failed.")]
	TokenRequestFailed,
	/// Response decoded as JSON but does not carry a string `access_token`.
	#[error("Token endpoint returned a response without a valid access token.")]
	TokenRequestInvalidResponse,
	/// The requested operation is not available for this grant.
	#[error("Operation is not implemented for the {grant} grant.")]
	NotImplemented {
		/// Grant whose flow rejected the operation.
		grant: GrantType,
	},
}
impl Error {
	/// Returns the stable code callers and UI layers match on.
	pub fn code(&self) -> ErrorCode {
		match self {
			Self::Validation(_) => ErrorCode::ValidationError,
			Self::TokenRequestFailed => ErrorCode::AuthTokenRequestFailed,
			Self::TokenRequestInvalidResponse => ErrorCode::AuthTokenRequestInvalidResponse,
			Self::NotImplemented { .. } => ErrorCode::NotImplemented,
		}
	}
}

/// Stable error codes surfaced to UI layers (also used as notification keys).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
	/// See [`Error::Validation`].
	ValidationError,
	/// See [`Error::TokenRequestFailed`].
	AuthTokenRequestFailed,
	/// See [`Error::TokenRequestInvalidResponse`].
	AuthTokenRequestInvalidResponse,
	/// See [`Error::NotImplemented`].
	NotImplemented,
}
impl ErrorCode {
	/// Returns the stable label for the code.
	pub const fn as_str(self) -> &'static str {
		match self {
			ErrorCode::ValidationError => "VALIDATION_ERROR",
			ErrorCode::AuthTokenRequestFailed => "AUTH_TOKEN_REQUEST_FAILED",
			ErrorCode::AuthTokenRequestInvalidResponse => "AUTH_TOKEN_REQUEST_INVALID_RESPONSE",
			ErrorCode::NotImplemented => "NOT_IMPLEMENTED",
		}
	}
}
impl Display for ErrorCode {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
