//! Caller-facing request options and the shallow merge applied over gateway defaults.
//!
//! # Header replacement
//!
//! Options merge one top-level field at a time. Supplying [`RequestOptions::headers`] replaces
//! the default header map wholesale, which drops `Content-Type` and `Authorization` unless the
//! caller repeats them. Callers that only want to add a header should start from
//! [`default_headers`] and extend it.

// self
use crate::{
	_prelude::*,
	auth::{self, TokenSecret},
	error::ConfigError,
};

/// Header map sent with a request. Keys are kept exactly as supplied.
pub type RequestHeaders = BTreeMap<String, String>;

/// Header carrying the body media type.
pub const CONTENT_TYPE: &str = "Content-Type";
/// Header carrying the bearer credential.
pub const AUTHORIZATION: &str = "Authorization";
/// Media type of every body the backend accepts.
pub const APPLICATION_JSON: &str = "application/json";

/// HTTP methods the gateway can dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
	/// `GET`, used when the caller does not pick a method.
	#[default]
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `PATCH`.
	Patch,
	/// `DELETE`.
	Delete,
	/// `HEAD`.
	Head,
	/// `OPTIONS`.
	Options,
}
impl HttpMethod {
	/// Returns the wire token for the method.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Patch => "PATCH",
			HttpMethod::Delete => "DELETE",
			HttpMethod::Head => "HEAD",
			HttpMethod::Options => "OPTIONS",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Optional per-call overrides.
///
/// Every field left as `None` falls back to the gateway default; every field set replaces the
/// default entirely (see the module docs for what that means for headers).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
	/// Request method; `GET` when neither side supplies one.
	pub method: Option<HttpMethod>,
	/// Raw request body.
	pub body: Option<String>,
	/// Complete header map; replaces the defaults when present.
	pub headers: Option<RequestHeaders>,
}
impl RequestOptions {
	/// Creates empty options (all defaults).
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the request method.
	pub fn with_method(mut self, method: HttpMethod) -> Self {
		self.method = Some(method);

		self
	}

	/// Sets a raw body.
	pub fn with_body(mut self, body: impl Into<String>) -> Self {
		self.body = Some(body.into());

		self
	}

	/// Serializes `value` as the JSON body.
	pub fn with_json<T>(mut self, value: &T) -> Result<Self, ConfigError>
	where
		T: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_string(value).map_err(ConfigError::RequestBody)?);

		Ok(self)
	}

	/// Replaces the whole header map.
	pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.headers = Some(headers.into_iter().map(|(k, v)| (k.into(), v.into())).collect());

		self
	}

	/// Shallow-merges `self` over `defaults`: each field present in `self` wins as a whole.
	pub fn merge_over(self, defaults: Self) -> Self {
		Self {
			method: self.method.or(defaults.method),
			body: self.body.or(defaults.body),
			headers: self.headers.or(defaults.headers),
		}
	}
}

/// Builds the header map every request starts from.
pub fn default_headers(token: Option<&TokenSecret>) -> RequestHeaders {
	RequestHeaders::from([
		(CONTENT_TYPE.into(), APPLICATION_JSON.into()),
		(AUTHORIZATION.into(), auth::bearer_value(token)),
	])
}

/// Gateway defaults: only the header map is populated.
pub fn default_options(token: Option<&TokenSecret>) -> RequestOptions {
	RequestOptions { headers: Some(default_headers(token)), ..Default::default() }
}
