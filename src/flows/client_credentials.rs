//! Client Credentials flow: validated parameters in, one token request out.
//!
//! [`ClientCredentialsFlow::exchange`] builds a form-urlencoded `grant_type=client_credentials`
//! request, submits it through the injected [`TokenHttpClient`], and interprets the response in
//! three steps, each terminal on failure:
//!
//! 1. transport failure → [`Error::TokenRequestFailed`]
//! 2. body is not JSON → [`Error::TokenRequestFailed`]
//! 3. JSON lacks a string `access_token` → [`Error::TokenRequestInvalidResponse`], and the
//!    injected [`Notifier`] is told once
//!
//! Nothing is cached or retried between invocations, so concurrent calls are independent.

mod params;

pub use params::*;

// self
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;
use crate::{
	_prelude::*,
	auth::{GrantType, TokenPayload},
	flows::{FlowFuture, OAuthFlow},
	http::{
		self, APPLICATION_JSON, FORM_URLENCODED, RequestContent, TokenHttpClient, TokenRequest,
	},
	notify::{LogNotifier, Notification, Notifier},
	obs::{self, ExchangeStage, FlowOperation, FlowOutcome, FlowSpan},
};

#[cfg(feature = "reqwest")]
/// Client Credentials flow specialized for the crate's default reqwest transport.
pub type ReqwestClientCredentialsFlow = ClientCredentialsFlow<ReqwestHttpClient>;

/// Client Credentials grant handler with injected transport and notifier.
pub struct ClientCredentialsFlow<C, N = LogNotifier>
where
	C: ?Sized + TokenHttpClient,
	N: ?Sized + Notifier,
{
	/// HTTP client wrapper used for every token request.
	pub http_client: Arc<C>,
	/// Sink for user-visible notifications raised on invalid responses.
	pub notifier: Arc<N>,
}
impl<C, N> ClientCredentialsFlow<C, N>
where
	C: ?Sized + TokenHttpClient,
	N: ?Sized + Notifier,
{
	/// Creates a flow around the caller-provided transport + notifier pair.
	pub fn with_http_client(http_client: Arc<C>, notifier: Arc<N>) -> Self {
		Self { http_client, notifier }
	}

	/// Replaces the notifier while keeping the transport.
	pub fn with_notifier<N2>(self, notifier: Arc<N2>) -> ClientCredentialsFlow<C, N2>
	where
		N2: ?Sized + Notifier,
	{
		ClientCredentialsFlow { http_client: self.http_client, notifier }
	}

	/// Exchanges validated parameters for an access token.
	pub async fn exchange(&self, params: &ValidatedParameters) -> Result<TokenPayload> {
		const OPERATION: FlowOperation = FlowOperation::Exchange;

		let span = FlowSpan::new(GrantType::ClientCredentials, OPERATION);

		obs::record_flow_outcome(OPERATION, FlowOutcome::Attempt);

		let result = span.instrument(self.request_token(params)).await;

		obs::record_flow_outcome(OPERATION, FlowOutcome::of(&result));

		result
	}

	/// Refresh extension point; the grant issues no refresh tokens, so this always fails with
	/// [`Error::NotImplemented`] and never touches the transport.
	pub async fn refresh(
		&self,
		_params: &ValidatedParameters,
		_refresh_token: &str,
	) -> Result<TokenPayload> {
		const OPERATION: FlowOperation = FlowOperation::Refresh;

		let span = FlowSpan::new(GrantType::ClientCredentials, OPERATION);

		obs::record_flow_outcome(OPERATION, FlowOutcome::Attempt);

		let result = span
			.instrument(async {
				Err::<TokenPayload, _>(Error::NotImplemented { grant: GrantType::ClientCredentials })
			})
			.await;

		obs::record_flow_outcome(OPERATION, FlowOutcome::of(&result));

		result
	}

	async fn request_token(&self, params: &ValidatedParameters) -> Result<TokenPayload> {
		let request = build_token_request(params);

		obs::record_request(&request);

		let response = self
			.http_client
			.execute(request)
			.await
			.map_err(|e| stage_failure(ExchangeStage::Transport, Error::TokenRequestFailed, &e))?;
		let body = http::decode_response_as_json(&response)
			.map_err(|e| stage_failure(ExchangeStage::Decode, Error::TokenRequestFailed, &e))?;

		TokenPayload::from_json(body).map_err(|e| {
			let err = stage_failure(ExchangeStage::Schema, Error::TokenRequestInvalidResponse, &e);

			self.notifier.notify(Notification::from(&err));

			err
		})
	}
}
#[cfg(feature = "reqwest")]
impl ClientCredentialsFlow<ReqwestHttpClient, LogNotifier> {
	/// Creates a flow backed by a default reqwest client that logs notifications.
	pub fn new() -> Self {
		Self::with_http_client(Arc::new(ReqwestHttpClient::default()), Arc::new(LogNotifier))
	}
}
#[cfg(feature = "reqwest")]
impl Default for ClientCredentialsFlow<ReqwestHttpClient, LogNotifier> {
	fn default() -> Self {
		Self::new()
	}
}
impl<C, N> Clone for ClientCredentialsFlow<C, N>
where
	C: ?Sized + TokenHttpClient,
	N: ?Sized + Notifier,
{
	fn clone(&self) -> Self {
		Self { http_client: Arc::clone(&self.http_client), notifier: Arc::clone(&self.notifier) }
	}
}
impl<C, N> Debug for ClientCredentialsFlow<C, N>
where
	C: ?Sized + TokenHttpClient,
	N: ?Sized + Notifier,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentialsFlow")
			.field("grant", &GrantType::ClientCredentials)
			.finish_non_exhaustive()
	}
}
impl<C, N> OAuthFlow for ClientCredentialsFlow<C, N>
where
	C: ?Sized + TokenHttpClient,
	N: ?Sized + Notifier,
{
	type Params = FlowParameters;
	type Payload = TokenPayload;
	type ValidParams = ValidatedParameters;

	const GRANT_TYPE: GrantType = GrantType::ClientCredentials;

	fn validate(params: Self::Params) -> Result<Self::ValidParams> {
		params.validate().map_err(Error::from)
	}

	fn exchange<'a>(&'a self, params: &'a Self::ValidParams) -> FlowFuture<'a, Self::Payload> {
		Box::pin(ClientCredentialsFlow::exchange(self, params))
	}

	fn refresh<'a>(
		&'a self,
		params: &'a Self::ValidParams,
		refresh_token: &'a str,
	) -> FlowFuture<'a, Self::Payload> {
		Box::pin(ClientCredentialsFlow::refresh(self, params, refresh_token))
	}
}

/// Builds the token request for `params`.
///
/// The body always carries `grant_type` and `client_id`, adds `client_secret` only for a
/// non-empty secret, and adds `scope` only when scopes were supplied.
pub fn build_token_request(params: &ValidatedParameters) -> TokenRequest {
	let mut form = vec![
		("grant_type", GrantType::ClientCredentials.as_str()),
		("client_id", params.client_id()),
	];

	if let Some(secret) = params.client_secret().filter(|secret| !secret.is_empty()) {
		form.push(("client_secret", secret));
	}
	if let Some(scope) = params.scopes() {
		form.push(("scope", scope));
	}

	TokenRequest::post(params.auth_endpoint(), RequestContent::urlencoded(form))
		.with_header("Content-Type", FORM_URLENCODED)
		.with_header("Accept", APPLICATION_JSON)
}

fn stage_failure(stage: ExchangeStage, err: Error, cause: &dyn StdError) -> Error {
	obs::record_stage_failure(stage, err.code(), cause);

	err
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::{Method, Version};
	// self
	use super::*;

	const ENDPOINT: &str = "https://auth.example.com/oauth/token";

	fn validated(params: FlowParameters) -> ValidatedParameters {
		params.validate().expect("Test parameters should validate.")
	}

	#[test]
	fn request_carries_method_version_and_headers() {
		let request = build_token_request(&validated(FlowParameters::new(ENDPOINT, "svc")));

		assert_eq!(request.url, ENDPOINT);
		assert_eq!(request.method, Method::POST);
		assert_eq!(request.version, Version::HTTP_11);
		assert_eq!(request.header("content-type"), Some([FORM_URLENCODED.to_owned()].as_slice()));
		assert_eq!(request.header("accept"), Some([APPLICATION_JSON.to_owned()].as_slice()));
		assert_eq!(request.content.media_type(), FORM_URLENCODED);
	}

	#[test]
	fn request_includes_secret_and_scope_when_present() {
		let request = build_token_request(&validated(
			FlowParameters::new(ENDPOINT, "svc")
				.with_client_secret("s3cret")
				.with_scopes("api.read api.write"),
		));

		assert_eq!(
			request.content,
			RequestContent::urlencoded([
				("grant_type", "client_credentials"),
				("client_id", "svc"),
				("client_secret", "s3cret"),
				("scope", "api.read api.write"),
			])
		);
		assert_eq!(
			String::from_utf8(request.content.encode()).expect("Encoded body should be UTF-8."),
			"grant_type=client_credentials&client_id=svc&client_secret=s3cret&scope=api.read+api.write"
		);
	}

	#[test]
	fn request_omits_absent_or_empty_secret_and_absent_scope() {
		for params in [
			FlowParameters::new(ENDPOINT, "svc"),
			FlowParameters::new(ENDPOINT, "svc").with_client_secret(""),
		] {
			let request = build_token_request(&validated(params));

			assert_eq!(request.content.get("grant_type"), Some("client_credentials"));
			assert_eq!(request.content.get("client_id"), Some("svc"));
			assert!(!request.content.contains("client_secret"));
			assert!(!request.content.contains("scope"));
		}
	}

	#[test]
	fn scope_is_sent_verbatim() {
		let request = build_token_request(&validated(
			FlowParameters::new(ENDPOINT, "svc").with_scopes("openid  profile"),
		));

		assert_eq!(request.content.get("scope"), Some("openid  profile"));
		assert!(!request.content.contains("client_secret"));
	}

	#[cfg(feature = "reqwest")]
	#[test]
	fn default_flow_is_registered_under_client_credentials() {
		let flow = ReqwestClientCredentialsFlow::default();

		assert_eq!(
			<ReqwestClientCredentialsFlow as OAuthFlow>::GRANT_TYPE.flow_id(),
			"CLIENT_CREDENTIALS"
		);
		assert_eq!(
			<ReqwestClientCredentialsFlow as OAuthFlow>::default_params(),
			FlowParameters::default()
		);
		assert!(format!("{flow:?}").contains("ClientCredentials"));
	}
}
