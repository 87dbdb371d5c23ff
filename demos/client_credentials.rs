//! Demonstrates the client-credentials flow with the default reqwest transport against a mock
//! token endpoint.

// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use oauth2_client_credentials::flows::{FlowParameters, OAuthFlow, ReqwestClientCredentialsFlow};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let flow = ReqwestClientCredentialsFlow::new();
	let form = FlowParameters::new(server.url("/token"), "demo-client")
		.with_client_secret("super-secret")
		.with_scopes("email.read profile.read");
	let params = form.validate()?;
	let payload = flow.exchange(&params).await?;

	println!(
		"Access token issued by the mock endpoint: {} ({:?}, expires in {:?}s).",
		payload.access_token.expose(),
		payload.token_type(),
		payload.expires_in()
	);

	match flow.refresh(&params, "unused").await {
		Ok(_) => println!("Refresh unexpectedly succeeded."),
		Err(e) => println!("Refresh answered with {}: {e}", e.code()),
	}

	match flow.run(ReqwestClientCredentialsFlow::default_params()).await {
		Ok(_) => println!("The empty form unexpectedly produced a token."),
		Err(e) => println!("The empty form was rejected with {}: {e}", e.code()),
	}

	token_mock.assert_async().await;

	Ok(())
}
