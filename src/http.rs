//! Transport primitives for token requests.
//!
//! Flows describe every outbound call as a [`TokenRequest`] and hand it to a [`TokenHttpClient`],
//! the crate's only dependency on an HTTP stack. Transports answer with an
//! [`oauth2::HttpResponse`] or an [`HttpClientError`]; [`decode_response_as_json`] turns a raw
//! response into JSON for schema validation.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use oauth2::{
	HttpClientError, HttpRequest, HttpResponse,
	http::{Method, Request, Version, header},
};
use serde_json::Value;
use time::OffsetDateTime;
use url::form_urlencoded;
// self
use crate::_prelude::*;

/// MIME type of form-urlencoded request bodies.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
/// MIME type token endpoints are asked to answer with.
pub const APPLICATION_JSON: &str = "application/json";

/// Boxed future returned by [`TokenHttpClient::execute`].
pub type TransportFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<HttpResponse, HttpClientError<E>>> + 'a + Send>>;

/// Abstraction over HTTP transports capable of executing token requests.
///
/// Implementations must be `Send + Sync + 'static` so a single transport can back many
/// concurrent flow invocations, and the futures they return must be `Send`. Timeouts,
/// cancellation, TLS verification, and status handling belong to the transport: a non-success
/// status may be reported either as an error or as a plain response.
pub trait TokenHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Submits `request` and resolves once the transport has a response or gives up.
	fn execute(&self, request: TokenRequest) -> TransportFuture<'_, Self::TransportError>;
}

/// Opaque correlation token attached to each outbound request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);
impl RequestId {
	/// Wraps an existing identifier.
	pub const fn new(value: u64) -> Self {
		Self(value)
	}

	/// Derives an identifier from the current wall-clock time in milliseconds.
	pub fn now() -> Self {
		let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;

		Self(u64::try_from(millis).unwrap_or_default())
	}

	/// Returns the raw identifier.
	pub const fn get(self) -> u64 {
		self.0
	}
}
impl Display for RequestId {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "{}", self.0)
	}
}

/// Pre-encoded request body together with its declared encoding.
#[derive(Clone, PartialEq, Eq)]
pub enum RequestContent {
	/// `application/x-www-form-urlencoded` key/value pairs, kept in insertion order.
	UrlEncoded(Vec<(String, String)>),
}
impl RequestContent {
	const REDACTED_KEYS: [&'static str; 1] = ["client_secret"];

	/// Builds form-urlencoded content from key/value pairs.
	pub fn urlencoded<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self::UrlEncoded(pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}

	/// Returns the MIME type matching the content encoding.
	pub fn media_type(&self) -> &'static str {
		match self {
			Self::UrlEncoded(_) => FORM_URLENCODED,
		}
	}

	/// Returns the first value stored under `key`.
	pub fn get(&self, key: &str) -> Option<&str> {
		match self {
			Self::UrlEncoded(pairs) =>
				pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str()),
		}
	}

	/// Returns true if the content carries `key`.
	pub fn contains(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	/// Serializes the content into wire bytes.
	pub fn encode(&self) -> Vec<u8> {
		match self {
			Self::UrlEncoded(pairs) => form_urlencoded::Serializer::new(String::new())
				.extend_pairs(pairs.iter())
				.finish()
				.into_bytes(),
		}
	}
}
impl Debug for RequestContent {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::UrlEncoded(pairs) => {
				let mut map = f.debug_map();

				for (key, value) in pairs {
					if Self::REDACTED_KEYS.contains(&key.as_str()) {
						map.entry(key, &"<redacted>");
					} else {
						map.entry(key, value);
					}
				}

				map.finish()
			},
		}
	}
}

/// Transport-agnostic description of a single token request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenRequest {
	/// Correlation token for logs and transport bookkeeping.
	pub id: RequestId,
	/// Absolute token endpoint URL.
	pub url: String,
	/// HTTP method.
	pub method: Method,
	/// HTTP protocol version.
	pub version: Version,
	/// Header names mapped to every value sent under that name.
	pub headers: BTreeMap<String, Vec<String>>,
	/// Pre-encoded body.
	pub content: RequestContent,
}
impl TokenRequest {
	/// Creates an HTTP/1.1 `POST` request with no headers.
	pub fn post(url: impl Into<String>, content: RequestContent) -> Self {
		Self {
			id: RequestId::now(),
			url: url.into(),
			method: Method::POST,
			version: Version::HTTP_11,
			headers: BTreeMap::new(),
			content,
		}
	}

	/// Overrides the correlation token.
	pub fn with_id(mut self, id: RequestId) -> Self {
		self.id = id;

		self
	}

	/// Appends a header value, keeping previously added values for the same name.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.entry(name.into()).or_default().push(value.into());

		self
	}

	/// Returns the values recorded for `name`, compared case-insensitively.
	pub fn header(&self, name: &str) -> Option<&[String]> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, values)| values.as_slice())
	}

	/// Converts the descriptor into an [`HttpRequest`] for `http`-based clients.
	pub fn to_http_request(&self) -> Result<HttpRequest, oauth2::http::Error> {
		let mut builder = Request::builder()
			.method(self.method.clone())
			.uri(self.url.as_str())
			.version(self.version);

		for (name, values) in &self.headers {
			for value in values {
				builder = builder.header(name.as_str(), value.as_str());
			}
		}
		if self.header(header::CONTENT_TYPE.as_str()).is_none() {
			builder = builder.header(header::CONTENT_TYPE, self.content.media_type());
		}

		builder.body(self.content.encode())
	}
}

/// Raised when a response body cannot be parsed as JSON.
#[derive(Debug, ThisError)]
#[error("Response body is not valid JSON.")]
pub struct DecodeError {
	/// HTTP status of the undecodable response.
	pub status: u16,
	/// Underlying parser failure.
	#[source]
	pub source: serde_json::Error,
}

/// Parses a raw response body as JSON without interpreting its shape.
pub fn decode_response_as_json(response: &HttpResponse) -> Result<Value, DecodeError> {
	serde_json::from_slice(response.body())
		.map_err(|source| DecodeError { status: response.status().as_u16(), source })
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
///
/// Non-success statuses are surfaced as transport errors. Token endpoints answer directly, so
/// any custom [`ReqwestClient`] passed to [`with_client`](Self::with_client) should disable
/// redirect following.
#[cfg(feature = "reqwest")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl TokenHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: TokenRequest) -> TransportFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let request = request.to_http_request().map_err(HttpClientError::Http)?;
			let response = client
				.execute(request.try_into().map_err(Box::new)?)
				.await
				.map_err(Box::new)?
				.error_for_status()
				.map_err(Box::new)?;
			let status = response.status();
			let headers = response.headers().to_owned();
			let mut response_new =
				HttpResponse::new(response.bytes().await.map_err(Box::new)?.to_vec());

			*response_new.status_mut() = status;
			*response_new.headers_mut() = headers;

			Ok(response_new)
		})
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use oauth2::http::StatusCode;
	// self
	use super::*;

	fn sample_request() -> TokenRequest {
		TokenRequest::post(
			"https://auth.example.com/oauth/token",
			RequestContent::urlencoded([
				("grant_type", "client_credentials"),
				("client_id", "svc"),
				("client_secret", "s3cr&t"),
				("scope", "api.read api.write"),
			]),
		)
		.with_id(RequestId::new(7))
		.with_header("Accept", APPLICATION_JSON)
	}

	fn response(status: StatusCode, body: &str) -> HttpResponse {
		let mut response = HttpResponse::new(body.as_bytes().to_vec());

		*response.status_mut() = status;

		response
	}

	#[test]
	fn urlencoded_content_escapes_values_in_order() {
		let request = sample_request();

		assert_eq!(
			String::from_utf8(request.content.encode()).expect("Encoded body should be UTF-8."),
			"grant_type=client_credentials&client_id=svc&client_secret=s3cr%26t&scope=api.read+api.write"
		);
		assert_eq!(request.content.get("scope"), Some("api.read api.write"));
		assert!(!request.content.contains("audience"));
	}

	#[test]
	fn debug_output_redacts_client_secret() {
		let rendered = format!("{:?}", sample_request());

		assert!(!rendered.contains("s3cr&t"));
		assert!(rendered.contains("<redacted>"));
		assert!(rendered.contains("client_credentials"));
	}

	#[test]
	fn headers_accumulate_and_match_case_insensitively() {
		let request = sample_request().with_header("accept", "text/plain");

		assert_eq!(request.header("ACCEPT"), Some([APPLICATION_JSON.to_owned()].as_slice()));
		assert_eq!(request.header("accept"), Some([APPLICATION_JSON.to_owned()].as_slice()));
		assert_eq!(request.headers.len(), 2);

		let request = sample_request().with_header("Accept", "text/plain");

		assert_eq!(
			request.header("Accept"),
			Some([APPLICATION_JSON.to_owned(), "text/plain".to_owned()].as_slice())
		);
	}

	#[test]
	fn converts_to_http_request() {
		let http = sample_request()
			.with_header("Content-Type", FORM_URLENCODED)
			.to_http_request()
			.expect("Token request should convert into an HTTP request.");

		assert_eq!(*http.method(), Method::POST);
		assert_eq!(http.version(), Version::HTTP_11);
		assert_eq!(http.uri().to_string(), "https://auth.example.com/oauth/token");
		assert_eq!(http.headers().get_all(header::CONTENT_TYPE).iter().count(), 1);
		assert_eq!(http.headers()[header::ACCEPT], APPLICATION_JSON);
		assert!(http.body().starts_with(b"grant_type=client_credentials"));
	}

	#[test]
	fn conversion_fills_missing_content_type() {
		let http = sample_request()
			.to_http_request()
			.expect("Token request should convert into an HTTP request.");

		assert_eq!(http.headers()[header::CONTENT_TYPE], FORM_URLENCODED);
	}

	#[test]
	fn conversion_rejects_unparsable_urls() {
		let request =
			TokenRequest::post("not a url", RequestContent::urlencoded([("grant_type", "x")]));

		assert!(request.to_http_request().is_err());
	}

	#[test]
	fn decodes_json_bodies() {
		let value = decode_response_as_json(&response(StatusCode::OK, "{\"access_token\":\"abc\"}"))
			.expect("JSON body should decode.");

		assert_eq!(value["access_token"], "abc");
	}

	#[test]
	fn rejects_non_json_bodies() {
		let err = decode_response_as_json(&response(StatusCode::BAD_GATEWAY, "not json"))
			.expect_err("Plain text must not decode as JSON.");

		assert_eq!(err.status, 502);
		assert!(decode_response_as_json(&response(StatusCode::OK, "")).is_err());
	}

	#[test]
	fn request_ids_track_wall_clock() {
		let id = RequestId::now();

		assert!(id.get() > 1_600_000_000_000);
		assert_eq!(RequestId::new(42).to_string(), "42");
	}
}
