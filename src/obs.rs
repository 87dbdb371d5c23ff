//! Optional observability helpers for flow invocations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit spans named `oauth2_client_credentials.flow` with the `grant` and
//!   `operation` fields, plus a `warn` event for every failing exchange stage.
//! - Enable `metrics` to increment the `oauth2_client_credentials_flow_total` counter for every
//!   attempt/success/failure, labeled by `operation` + `outcome` (and `code` on failures).

mod metrics;
mod tracing;

pub use self::metrics::*;
pub use self::tracing::*;

// self
use crate::{_prelude::*, error::ErrorCode};

/// Entry points exposed by a flow registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOperation {
	/// Initial token exchange.
	Exchange,
	/// Token refresh extension point.
	Refresh,
}
impl FlowOperation {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOperation::Exchange => "exchange",
			FlowOperation::Refresh => "refresh",
		}
	}
}
impl Display for FlowOperation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Exchange stages that can terminate an invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExchangeStage {
	/// Submitting the request and awaiting the transport.
	Transport,
	/// Parsing the response body as JSON.
	Decode,
	/// Checking the decoded body against the token contract.
	Schema,
}
impl ExchangeStage {
	/// Returns a stable label suitable for span or event fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			ExchangeStage::Transport => "transport",
			ExchangeStage::Decode => "decode",
			ExchangeStage::Schema => "schema",
		}
	}
}
impl Display for ExchangeStage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a flow operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure returned to the caller.
	Failure(ErrorCode),
}
impl FlowOutcome {
	/// Maps an operation result onto its terminal outcome.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => FlowOutcome::Success,
			Err(e) => FlowOutcome::Failure(e.code()),
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure(_) => "failure",
		}
	}

	/// Returns the error code carried by failures.
	pub const fn code(self) -> Option<ErrorCode> {
		match self {
			FlowOutcome::Failure(code) => Some(code),
			_ => None,
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
