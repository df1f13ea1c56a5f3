//! The authenticated request gateway.
//!
//! [`RequestGateway::make_request`] runs one linear sequence per call: ask the
//! [`TokenProvider`] for a token, merge the caller's [`RequestOptions`] over the default
//! headers, dispatch through the [`ApiHttpClient`], then either decode the JSON body or turn the
//! failure status into an [`Error`]. Nothing is cached and nothing is retried; two calls never
//! share state beyond the injected transport and provider.

// self
use crate::{
	_prelude::*,
	auth::{TokenProvider, TokenSecret},
	config::GatewayConfig,
	error::FALLBACK_ERROR_MESSAGE,
	http::{ApiHttpClient, ApiRequest, ApiResponse},
	obs::{self, RequestOutcome, RequestSpan},
	request::{self, RequestOptions},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// HTTP status the backend uses to signal an exhausted quota.
pub const TOO_MANY_REQUESTS: u16 = 429;

#[cfg(feature = "reqwest")]
/// Gateway specialized for the crate's default reqwest transport.
pub type ReqwestGateway<P> = RequestGateway<ReqwestHttpClient, P>;

/// Performs authenticated calls against the backend API and normalizes their results.
pub struct RequestGateway<C, P>
where
	C: ?Sized + ApiHttpClient,
	P: ?Sized + TokenProvider,
{
	/// Where the backend lives.
	pub config: GatewayConfig,
	/// Transport used for every outbound call.
	pub http_client: Arc<C>,
	/// Source of the bearer token, asked once per call.
	pub token_provider: Arc<P>,
}
impl<C, P> RequestGateway<C, P>
where
	C: ?Sized + ApiHttpClient,
	P: ?Sized + TokenProvider,
{
	/// Creates a gateway over the caller-provided transport + token provider pair.
	pub fn with_http_client(
		config: GatewayConfig,
		http_client: impl Into<Arc<C>>,
		token_provider: impl Into<Arc<P>>,
	) -> Self {
		Self { config, http_client: http_client.into(), token_provider: token_provider.into() }
	}

	/// Performs one authenticated call and returns the decoded JSON body.
	///
	/// `endpoint` is appended verbatim to the configured base URL. Fields set on `options`
	/// replace the gateway defaults as a whole, so passing `headers` drops the default
	/// `Content-Type` and `Authorization` headers (see [`crate::request`]).
	///
	/// # Errors
	///
	/// - [`Error::TokenProvider`] when the provider fails; no request is sent.
	/// - [`Error::Transport`] or [`Error::Config`] when no response could be obtained.
	/// - [`Error::QuotaExceeded`] for HTTP 429, whatever the body says.
	/// - [`Error::RequestFailed`] for any other non-2xx status, carrying the body's `detail`
	///   or [`FALLBACK_ERROR_MESSAGE`].
	/// - [`Error::Decode`] when a 2xx body is not valid JSON.
	pub async fn make_request(
		&self,
		endpoint: &str,
		options: RequestOptions,
	) -> Result<JsonValue> {
		self.make_request_as(endpoint, options).await
	}

	/// Same as [`make_request`](Self::make_request) but decodes the success body into `T`.
	pub async fn make_request_as<T>(&self, endpoint: &str, options: RequestOptions) -> Result<T>
	where
		T: DeserializeOwned,
	{
		let method = options.method.unwrap_or_default();
		let span = RequestSpan::new(method, endpoint);

		obs::record_request_outcome(method, RequestOutcome::Attempt);

		let result = span
			.instrument(async {
				let response = self.dispatch(endpoint, options).await?;

				span.record_status(response.status());

				if response.is_success() {
					Ok(response.json()?)
				} else {
					Err(error_from_response(&response))
				}
			})
			.await;

		obs::record_request_outcome(method, RequestOutcome::of(&result));

		result
	}

	/// Resolves the token, builds the request, and hands it to the transport.
	///
	/// The raw response is returned whatever its status.
	pub async fn dispatch(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse> {
		let token = <P as TokenProvider>::token(self.token_provider.as_ref())
			.await
			.map_err(Error::token_provider)?;
		let request = self.build_request(endpoint, options, token.as_ref());

		self.http_client
			.execute(request)
			.await
			.map_err(|e| self.http_client.map_transport_error(e))
	}

	/// Builds the request that would be dispatched for `endpoint` with the given token.
	pub fn build_request(
		&self,
		endpoint: &str,
		options: RequestOptions,
		token: Option<&TokenSecret>,
	) -> ApiRequest {
		let merged = options.merge_over(request::default_options(token));

		ApiRequest {
			method: merged.method.unwrap_or_default(),
			url: self.config.endpoint_url(endpoint),
			headers: merged.headers.unwrap_or_default(),
			body: merged.body,
		}
	}
}
#[cfg(feature = "reqwest")]
impl<P> RequestGateway<ReqwestHttpClient, P>
where
	P: ?Sized + TokenProvider,
{
	/// Creates a gateway that provisions its own reqwest-backed transport.
	pub fn new(config: GatewayConfig, token_provider: impl Into<Arc<P>>) -> Self {
		Self::with_http_client(config, ReqwestHttpClient::default(), token_provider)
	}
}
impl<C, P> Clone for RequestGateway<C, P>
where
	C: ?Sized + ApiHttpClient,
	P: ?Sized + TokenProvider,
{
	fn clone(&self) -> Self {
		Self {
			config: self.config.clone(),
			http_client: Arc::clone(&self.http_client),
			token_provider: Arc::clone(&self.token_provider),
		}
	}
}
impl<C, P> Debug for RequestGateway<C, P>
where
	C: ?Sized + ApiHttpClient,
	P: ?Sized + TokenProvider,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RequestGateway")
			.field("base_url", &self.config.base_url().as_str())
			.finish_non_exhaustive()
	}
}

/// Maps a non-success response to the caller-facing error.
///
/// A body that fails to parse is treated as absent so the HTTP failure is never masked by a
/// decode error.
pub fn error_from_response(response: &ApiResponse) -> Error {
	if response.status() == TOO_MANY_REQUESTS {
		return Error::QuotaExceeded { retry_after: response.metadata.retry_after };
	}

	let body = response.json::<JsonValue>().ok();
	let message = body
		.as_ref()
		.and_then(|value| value.get("detail"))
		.and_then(detail_message)
		.unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.into());

	Error::RequestFailed { status: response.status(), message }
}

// Empty, null, `false`, and `0` details count as missing; other non-strings render as JSON.
fn detail_message(detail: &JsonValue) -> Option<String> {
	match detail {
		JsonValue::Null | JsonValue::Bool(false) => None,
		JsonValue::String(text) if text.is_empty() => None,
		JsonValue::String(text) => Some(text.clone()),
		JsonValue::Number(number) if number.as_f64() == Some(0.0) => None,
		other => Some(other.to_string()),
	}
}
