//! Shared transport and notifier doubles for flow integration tests.

#![allow(dead_code)]

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use parking_lot::Mutex;
// self
use oauth2_client_credentials::{
	flows::ClientCredentialsFlow,
	http::{TokenHttpClient, TokenRequest, TransportFuture},
	notify::{Notification, Notifier},
	oauth2::{
		HttpClientError, HttpResponse,
		http::{HeaderValue, StatusCode, header},
	},
};

pub const TOKEN_ENDPOINT: &str = "https://auth.example.com/oauth/token";

pub type ScriptedFlow = ClientCredentialsFlow<ScriptedHttpClient, RecordingNotifier>;

#[derive(Debug)]
pub enum ScriptedTransportError {
	ConnectionRefused,
}
impl Display for ScriptedTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		match self {
			Self::ConnectionRefused => write!(f, "Connection refused."),
		}
	}
}
impl StdError for ScriptedTransportError {}

#[derive(Clone, Debug)]
enum Behavior {
	Respond { status: StatusCode, body: String },
	Refuse,
	Other(&'static str),
}

/// Transport double that answers every request the same way and records what it was sent.
#[derive(Clone)]
pub struct ScriptedHttpClient {
	behavior: Behavior,
	requests: Arc<Mutex<Vec<TokenRequest>>>,
}
impl ScriptedHttpClient {
	pub fn json(body: &str) -> Self {
		Self::respond(StatusCode::OK, body)
	}

	pub fn respond(status: StatusCode, body: &str) -> Self {
		Self::with_behavior(Behavior::Respond { status, body: body.to_owned() })
	}

	pub fn refuse() -> Self {
		Self::with_behavior(Behavior::Refuse)
	}

	pub fn other_error(message: &'static str) -> Self {
		Self::with_behavior(Behavior::Other(message))
	}

	fn with_behavior(behavior: Behavior) -> Self {
		Self { behavior, requests: Default::default() }
	}

	pub fn calls(&self) -> usize {
		self.requests.lock().len()
	}

	pub fn requests(&self) -> Vec<TokenRequest> {
		self.requests.lock().clone()
	}
}
impl TokenHttpClient for ScriptedHttpClient {
	type TransportError = ScriptedTransportError;

	fn execute(&self, request: TokenRequest) -> TransportFuture<'_, Self::TransportError> {
		self.requests.lock().push(request);

		let behavior = self.behavior.clone();

		Box::pin(async move {
			match behavior {
				Behavior::Respond { status, body } => {
					let mut response = HttpResponse::new(body.into_bytes());

					*response.status_mut() = status;
					response
						.headers_mut()
						.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

					Ok(response)
				},
				Behavior::Refuse =>
					Err(HttpClientError::Reqwest(Box::new(ScriptedTransportError::ConnectionRefused))),
				Behavior::Other(message) => Err(HttpClientError::Other(message.to_owned())),
			}
		})
	}
}

/// Notifier double that keeps every notification it receives.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
	received: Arc<Mutex<Vec<Notification>>>,
}
impl RecordingNotifier {
	pub fn received(&self) -> Vec<Notification> {
		self.received.lock().clone()
	}
}
impl Notifier for RecordingNotifier {
	fn notify(&self, notification: Notification) {
		self.received.lock().push(notification);
	}
}

pub fn scripted_flow(client: ScriptedHttpClient) -> (ScriptedFlow, ScriptedHttpClient, RecordingNotifier) {
	let notifier = RecordingNotifier::default();
	let flow = ClientCredentialsFlow::with_http_client(
		Arc::new(client.clone()),
		Arc::new(notifier.clone()),
	);

	(flow, client, notifier)
}
