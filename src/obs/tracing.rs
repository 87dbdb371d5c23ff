// self
use crate::{
	_prelude::*,
	auth::GrantType,
	error::ErrorCode,
	http::TokenRequest,
	obs::{ExchangeStage, FlowOperation},
};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedFlow<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedFlow<F> = F;

/// A span builder used by flow operations.
#[derive(Clone, Debug)]
pub struct FlowSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl FlowSpan {
	/// Creates a new span tagged with the provided grant + operation.
	pub fn new(grant: GrantType, operation: FlowOperation) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!(
				"oauth2_client_credentials.flow",
				grant = grant.as_str(),
				operation = operation.as_str()
			);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (grant, operation);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedFlow<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs an outbound token request. Secrets in the body are never recorded.
pub fn record_request(request: &TokenRequest) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(
			request_id = request.id.get(),
			method = %request.method,
			url = %request.url,
			"Submitting token request."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = request;
	}
}

/// Logs why an exchange stopped at `stage`, including the full source chain of `cause`.
pub fn record_stage_failure(stage: ExchangeStage, code: ErrorCode, cause: &dyn StdError) {
	#[cfg(feature = "tracing")]
	{
		let mut chain = cause.to_string();
		let mut source = cause.source();

		while let Some(inner) = source {
			chain.push_str(": ");
			chain.push_str(&inner.to_string());

			source = inner.source();
		}

		tracing::warn!(
			stage = stage.as_str(),
			code = code.as_str(),
			cause = %chain,
			"Token exchange failed."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (stage, code, cause);
	}
}
