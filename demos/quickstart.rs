//! Demonstrates wiring a gateway to a session token and calling the challenge routes, including
//! what callers see once the daily quota runs out.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use url::Url;
// self
use challenge_gateway::{
	api::{ChallengeApi, Difficulty},
	auth::StaticTokenProvider,
	config::GatewayConfig,
	gateway::{ReqwestGateway, RequestGateway},
	request::RequestOptions,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let quota_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/quota").header("authorization", "Bearer demo-session");
			then.status(200).header("content-type", "application/json").body(
				"{\"quota\":{\"id\":1,\"user_id\":\"user_demo\",\"remaining_quota\":0,\
				 \"last_reset_date\":\"2024-05-01T00:00:00\"}}",
			);
		})
		.await;
	let generate_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/generate-challenge");
			then.status(429).body("{\"detail\":\"Quota exhausted\"}");
		})
		.await;
	let sessions = Arc::new(StaticTokenProvider::new("demo-session"));
	let config = GatewayConfig::from_base_url(Url::parse(&server.url("/api/"))?)?;
	let gateway: ReqwestGateway<StaticTokenProvider> =
		RequestGateway::new(config, Arc::clone(&sessions));
	let raw = gateway.make_request("quota", RequestOptions::new()).await?;

	println!("Raw quota payload: {raw}");

	let api = ChallengeApi::new(gateway);
	let quota = api.quota().await?;

	println!("Challenges left today: {}", quota.remaining());

	match api.generate_challenge(Difficulty::Medium).await {
		Ok(challenge) => println!("Generated challenge #{}: {}", challenge.id, challenge.title),
		Err(e) if e.is_quota_exceeded() => println!("Generation refused: {e}"),
		Err(e) => return Err(e.into()),
	}

	sessions.clear();

	quota_mock.assert_calls_async(2).await;
	generate_mock.assert_calls_async(1).await;

	Ok(())
}
