//! Gateway-level error types shared by the transport, auth, and typed API layers.

// self
use crate::_prelude::*;

/// Gateway-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed error used at the token-provider and transport seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Fixed message surfaced when the backend answers with HTTP 429.
///
/// The web frontend shows this text misspelled as `"Daily quota exceede"`; match on
/// [`Error::QuotaExceeded`] rather than on either string.
pub const QUOTA_EXCEEDED_MESSAGE: &str = "Daily quota exceeded";
/// Message surfaced when a failed response carries no usable `detail`.
///
/// The web frontend shows this text misspelled as `"An errror occured"`.
pub const FALLBACK_ERROR_MESSAGE: &str = "An error occurred";

/// Canonical gateway error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem (header values, request bodies, client construction).
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A successful response carried a body that is not the expected JSON.
	#[error(transparent)]
	Decode(#[from] serde_path_to_error::Error<serde_json::Error>),

	/// The auth provider could not resolve a token.
	#[error("Token provider failed to resolve a bearer token.")]
	TokenProvider {
		/// Provider-specific failure.
		#[source]
		source: BoxError,
	},
	/// Backend rejected the call with HTTP 429.
	#[error("{}", QUOTA_EXCEEDED_MESSAGE)]
	QuotaExceeded {
		/// Retry-After hint from upstream, if supplied.
		retry_after: Option<Duration>,
	},
	/// Backend answered with any other non-success status.
	#[error("{message}")]
	RequestFailed {
		/// HTTP status code.
		status: u16,
		/// Server-supplied `detail`, or [`FALLBACK_ERROR_MESSAGE`].
		message: String,
	},
}
impl Error {
	/// Wraps a token-provider failure.
	pub fn token_provider(src: impl Into<BoxError>) -> Self {
		Self::TokenProvider { source: src.into() }
	}

	/// Returns the HTTP status that produced this error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::QuotaExceeded { .. } => Some(429),
			Self::RequestFailed { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Returns the human-readable message of an HTTP failure.
	pub fn message(&self) -> Option<&str> {
		match self {
			Self::QuotaExceeded { .. } => Some(QUOTA_EXCEEDED_MESSAGE),
			Self::RequestFailed { message, .. } => Some(message),
			_ => None,
		}
	}

	/// Returns `true` for the rate-limit variant.
	pub fn is_quota_exceeded(&self) -> bool {
		matches!(self, Self::QuotaExceeded { .. })
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// The transport refused to build the request (bad URL, header name, or header value).
	#[error("HTTP request could not be constructed.")]
	RequestBuild {
		/// Underlying builder failure.
		#[source]
		source: BoxError,
	},
	/// A JSON request body could not be serialized.
	#[error("Request body could not be serialized to JSON.")]
	RequestBody(#[source] serde_json::Error),
	/// Gateway configuration failed validation.
	#[error(transparent)]
	Gateway(#[from] crate::config::GatewayConfigError),
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}

	/// Wraps a transport's request-builder failure inside [`ConfigError`].
	pub fn request_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::RequestBuild { source: Box::new(src) }
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
