//! Demonstrates plugging a custom transport and notifier into the client-credentials flow.
//!
//! 1. Implement [`TokenHttpClient`] so the flow can submit [`TokenRequest`] descriptors.
//! 2. Implement [`Notifier`] to route invalid-response notifications to your UI layer.
//! 3. Wrap both in `Arc` and pass them to [`ClientCredentialsFlow::with_http_client`].

// std
use std::{
	error::Error as StdError,
	fmt::{Display, Formatter, Result as FmtResult},
	sync::Arc,
};
// crates.io
use color_eyre::Result;
// self
use oauth2_client_credentials::{
	flows::{ClientCredentialsFlow, FlowParameters},
	http::{TokenHttpClient, TokenRequest, TransportFuture},
	notify::{Notification, Notifier},
	oauth2::{HttpClientError, HttpResponse},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let params = FlowParameters::new("https://provider.example.com/token", "demo-client")
		.with_client_secret("demo-secret")
		.with_scopes("profile.read")
		.validate()?;

	for behavior in [
		MockBehavior::Token,
		MockBehavior::Foreign,
		MockBehavior::Garbage,
		MockBehavior::DnsFailure("provider.example.com"),
	] {
		let flow = ClientCredentialsFlow::with_http_client(
			Arc::new(MockHttpClient { behavior }),
			Arc::new(ConsoleNotifier),
		);

		match flow.exchange(&params).await {
			Ok(payload) => println!("{behavior:?}: issued {}.", payload.access_token.expose()),
			Err(e) => println!("{behavior:?}: failed with {}.", e.code()),
		}
	}

	Ok(())
}

#[derive(Clone, Copy, Debug)]
enum MockBehavior {
	Token,
	Foreign,
	Garbage,
	DnsFailure(&'static str),
}

#[derive(Debug)]
struct MockTransportError {
	host: &'static str,
}
impl Display for MockTransportError {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "DNS lookup failed for {}", self.host)
	}
}
impl StdError for MockTransportError {}

struct MockHttpClient {
	behavior: MockBehavior,
}
impl TokenHttpClient for MockHttpClient {
	type TransportError = MockTransportError;

	fn execute(&self, request: TokenRequest) -> TransportFuture<'_, Self::TransportError> {
		let behavior = self.behavior;

		Box::pin(async move {
			println!("Request #{} -> {} {:?}", request.id, request.url, request.content);

			let body: &[u8] = match behavior {
				MockBehavior::Token => b"{\"access_token\":\"mock-access\",\"token_type\":\"bearer\"}",
				MockBehavior::Foreign => b"{\"message\":\"hello\"}",
				MockBehavior::Garbage => b"<html>maintenance</html>",
				MockBehavior::DnsFailure(host) =>
					return Err(HttpClientError::Reqwest(Box::new(MockTransportError { host }))),
			};

			Ok(HttpResponse::new(body.to_vec()))
		})
	}
}

struct ConsoleNotifier;
impl Notifier for ConsoleNotifier {
	fn notify(&self, notification: Notification) {
		println!("[toast] {notification}");
	}
}
