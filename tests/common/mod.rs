//! Helpers shared by the integration suites.

#![allow(dead_code)]

// std
use std::sync::{
	Arc,
	atomic::{AtomicUsize, Ordering},
};
// crates.io
use httpmock::MockServer;
// self
use challenge_gateway::{
	auth::{FnTokenProvider, StaticTokenProvider, TokenFuture, TokenSecret},
	config::GatewayConfig,
	gateway::{ReqwestGateway, RequestGateway},
	url::Url,
};

/// Provider handing out `token-1`, `token-2`, ... on successive calls.
pub type CountingTokenProvider =
	FnTokenProvider<Box<dyn Fn() -> TokenFuture<'static> + Send + Sync>>;

/// Builds a config rooted at the mock server's `/api/` path.
pub fn mock_config(server: &MockServer) -> GatewayConfig {
	let base_url =
		Url::parse(&server.url("/api/")).expect("Mock server base URL should parse successfully.");

	GatewayConfig::from_base_url(base_url).expect("Mock server base URL should be a valid base.")
}

/// Builds a reqwest-backed gateway with a fixed token pointed at the mock server.
pub fn mock_gateway(server: &MockServer, token: &str) -> ReqwestGateway<StaticTokenProvider> {
	RequestGateway::new(mock_config(server), StaticTokenProvider::new(token))
}

/// Builds a token provider that counts how often it is asked.
pub fn counting_token_provider() -> (CountingTokenProvider, Arc<AtomicUsize>) {
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	let provider: CountingTokenProvider =
		FnTokenProvider::new(Box::new(move || -> TokenFuture<'static> {
			let call = counter.fetch_add(1, Ordering::SeqCst) + 1;

			Box::pin(async move { Ok(Some(TokenSecret::new(format!("token-{call}")))) })
		}));

	(provider, calls)
}
