//! Transport primitives for gateway calls.
//!
//! The module exposes [`ApiHttpClient`] alongside the plain [`ApiRequest`]/[`ApiResponse`]
//! values it exchanges, so callers can swap the reqwest stack for a custom client (or an
//! in-memory fake) without touching the gateway. Responses are fully buffered: the gateway
//! always needs the whole body to either decode it or look for an error `detail`.

// crates.io
#[cfg(feature = "reqwest")] use reqwest::header::{HeaderMap, RETRY_AFTER};
#[cfg(feature = "reqwest")] use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	error::TransportError,
	request::{HttpMethod, RequestHeaders},
};
#[cfg(feature = "reqwest")] use crate::error::ConfigError;

/// Boxed future returned by [`ApiHttpClient::execute`].
pub type ResponseFuture<'a, E> =
	Pin<Box<dyn Future<Output = Result<ApiResponse, E>> + 'a + Send>>;

/// Abstraction over fetch-style HTTP transports.
///
/// The trait is the gateway's only dependency on an HTTP stack. Implementations must be
/// `Send + Sync + 'static` so one transport can back many gateway clones, and the futures they
/// return must be `Send` so gateway calls can hop executors.
pub trait ApiHttpClient
where
	Self: 'static + Send + Sync,
{
	/// Concrete error emitted by the underlying transport.
	type TransportError: 'static + Send + Sync + StdError;

	/// Dispatches `request` and buffers the response.
	///
	/// Non-success statuses are not errors at this layer; only failures to obtain a response
	/// are.
	fn execute(&self, request: ApiRequest) -> ResponseFuture<'_, Self::TransportError>;

	/// Converts a transport failure into a gateway [`Error`].
	fn map_transport_error(&self, err: Self::TransportError) -> Error {
		TransportError::network(err).into()
	}
}

/// Fully-resolved request handed to the transport.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
	/// Method to dispatch.
	pub method: HttpMethod,
	/// Absolute URL, exactly as built by the gateway.
	pub url: String,
	/// Complete header set; nothing is added by the transport.
	pub headers: RequestHeaders,
	/// Optional raw body.
	pub body: Option<String>,
}

/// Captures metadata from an HTTP response for downstream error mapping.
///
/// Additional metadata fields may be added in future releases, so downstream code
/// should construct values using field names instead of struct update syntax.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResponseMetadata {
	/// HTTP status code, if available.
	pub status: Option<u16>,
	/// Retry-After hint expressed as a relative duration.
	pub retry_after: Option<Duration>,
}

/// Buffered response returned by an [`ApiHttpClient`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiResponse {
	/// Status and retry hints.
	pub metadata: ResponseMetadata,
	/// Raw body bytes.
	pub body: Vec<u8>,
}
impl ApiResponse {
	/// Creates a response from its parts.
	pub fn new(metadata: ResponseMetadata, body: Vec<u8>) -> Self {
		Self { metadata, body }
	}

	/// HTTP status code (`0` when the transport could not report one).
	pub fn status(&self) -> u16 {
		self.metadata.status.unwrap_or_default()
	}

	/// Mirrors fetch's `ok` flag: `true` for 200..=299.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status())
	}

	/// Decodes the body as JSON, rejecting trailing content.
	pub fn json<T>(&self) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
	where
		T: DeserializeOwned,
	{
		let mut track = serde_path_to_error::Track::new();
		let mut de = serde_json::Deserializer::from_slice(&self.body);
		let value =
			match T::deserialize(serde_path_to_error::Deserializer::new(&mut de, &mut track)) {
				Ok(value) => value,
				Err(e) => return Err(serde_path_to_error::Error::new(track.path(), e)),
			};

		if let Err(e) = de.end() {
			return Err(serde_path_to_error::Error::new(track.path(), e));
		}

		Ok(value)
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
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
impl ApiHttpClient for ReqwestHttpClient {
	type TransportError = ReqwestError;

	fn execute(&self, request: ApiRequest) -> ResponseFuture<'_, Self::TransportError> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = reqwest_method(request.method);
			let mut builder = client.request(method, request.url.as_str());

			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await?;
			let status = response.status().as_u16();
			let retry_after = parse_retry_after(response.headers());
			let body = response.bytes().await?.to_vec();

			Ok(ApiResponse::new(ResponseMetadata { status: Some(status), retry_after }, body))
		})
	}

	fn map_transport_error(&self, err: Self::TransportError) -> Error {
		if err.is_builder() {
			return ConfigError::request_build(err).into();
		}

		TransportError::from(err).into()
	}
}

#[cfg(feature = "reqwest")]
fn reqwest_method(method: HttpMethod) -> reqwest::Method {
	match method {
		HttpMethod::Get => reqwest::Method::GET,
		HttpMethod::Post => reqwest::Method::POST,
		HttpMethod::Put => reqwest::Method::PUT,
		HttpMethod::Patch => reqwest::Method::PATCH,
		HttpMethod::Delete => reqwest::Method::DELETE,
		HttpMethod::Head => reqwest::Method::HEAD,
		HttpMethod::Options => reqwest::Method::OPTIONS,
	}
}

#[cfg(feature = "reqwest")]
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(Duration::seconds(i64::try_from(secs).unwrap_or(i64::MAX)));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta);
		}
	}

	None
}
