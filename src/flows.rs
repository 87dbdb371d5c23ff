//! Flow registration contract and the grant handlers that implement it.
//!
//! A multi-grant orchestrator drives every grant through [`OAuthFlow`]: it seeds a form with
//! [`OAuthFlow::default_params`], gates user input through [`OAuthFlow::validate`], and only then
//! calls [`OAuthFlow::exchange`]. Grants without a refresh story still expose
//! [`OAuthFlow::refresh`] and answer with [`Error::NotImplemented`].

pub mod client_credentials;

pub use client_credentials::*;

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, auth::GrantType};

/// Boxed future returned by flow entry points.
pub type FlowFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + 'a + Send>>;

/// Artifacts a grant handler exposes to the orchestrator that registers it.
pub trait OAuthFlow
where
	Self: Send + Sync,
{
	/// Grant identifier the flow is registered under.
	const GRANT_TYPE: GrantType;

	/// Raw, caller-supplied parameters (typically form state).
	type Params: 'static + Clone + Default + Send + Sync + Serialize + DeserializeOwned;
	/// Parameters that passed validation; the only input [`exchange`](Self::exchange) accepts.
	type ValidParams: 'static + Send + Sync;
	/// Successful exchange result.
	type Payload: 'static + Send;

	/// Returns the factory default used to initialize a fresh form.
	fn default_params() -> Self::Params {
		<Self::Params as Default>::default()
	}

	/// Checks raw parameters without performing any I/O.
	fn validate(params: Self::Params) -> Result<Self::ValidParams>;

	/// Performs the grant's token exchange.
	fn exchange<'a>(&'a self, params: &'a Self::ValidParams) -> FlowFuture<'a, Self::Payload>;

	/// Refreshes a previously issued token.
	fn refresh<'a>(
		&'a self,
		params: &'a Self::ValidParams,
		refresh_token: &'a str,
	) -> FlowFuture<'a, Self::Payload>;

	/// Validates `params` and, only when they pass, performs the exchange.
	fn run<'a>(&'a self, params: Self::Params) -> FlowFuture<'a, Self::Payload> {
		Box::pin(async move {
			let valid = Self::validate(params)?;

			self.exchange(&valid).await
		})
	}
}
