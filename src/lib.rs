//! Authenticated request gateway for the challenge API—bearer-token injection, typed request
//! options, and normalized quota/detail errors behind swappable transports.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http;
pub mod obs;
pub mod request;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and an in-memory transport for tests; enabled via `cfg(test)` or
	//! the `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::StaticTokenProvider,
		config::GatewayConfig,
		gateway::RequestGateway,
		http::{ApiHttpClient, ApiRequest, ApiResponse, ResponseFuture, ResponseMetadata},
	};

	/// Transport error emitted by [`RecordingHttpClient`] when it has no canned response left.
	#[derive(Debug, ThisError)]
	#[error("Recording transport has no response queued.")]
	pub struct NoResponseQueued;

	/// In-memory transport that records every dispatched request and replays canned responses
	/// in FIFO order.
	#[derive(Clone, Debug, Default)]
	pub struct RecordingHttpClient {
		requests: Arc<Mutex<Vec<ApiRequest>>>,
		responses: Arc<Mutex<Vec<ApiResponse>>>,
	}
	impl RecordingHttpClient {
		/// Creates a transport that answers the next request with `status` + `body`.
		pub fn replying(status: u16, body: impl Into<Vec<u8>>) -> Self {
			let client = Self::default();

			client.push_response(status, body);

			client
		}

		/// Queues another canned response.
		pub fn push_response(&self, status: u16, body: impl Into<Vec<u8>>) {
			self.push(ApiResponse::new(
				ResponseMetadata { status: Some(status), retry_after: None },
				body.into(),
			));
		}

		/// Queues a fully-specified response.
		pub fn push(&self, response: ApiResponse) {
			self.responses.lock().push(response);
		}

		/// Returns every request dispatched so far.
		pub fn requests(&self) -> Vec<ApiRequest> {
			self.requests.lock().clone()
		}

		/// Returns the most recently dispatched request.
		pub fn last_request(&self) -> ApiRequest {
			self.requests
				.lock()
				.last()
				.cloned()
				.expect("Recording transport should have dispatched at least one request.")
		}
	}
	impl ApiHttpClient for RecordingHttpClient {
		type TransportError = NoResponseQueued;

		fn execute(&self, request: ApiRequest) -> ResponseFuture<'_, Self::TransportError> {
			self.requests.lock().push(request);

			let next = {
				let mut responses = self.responses.lock();

				if responses.is_empty() { None } else { Some(responses.remove(0)) }
			};

			Box::pin(async move { next.ok_or(NoResponseQueued) })
		}
	}

	/// Builds a gateway over a [`RecordingHttpClient`] with a fixed `test-token` credential.
	pub fn build_recording_gateway(
		http_client: RecordingHttpClient,
	) -> RequestGateway<RecordingHttpClient, StaticTokenProvider> {
		RequestGateway::with_http_client(
			GatewayConfig::default(),
			http_client,
			StaticTokenProvider::new("test-token"),
		)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
	pub use serde_json::Value as JsonValue;
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
