//! Gateway configuration: where the backend API lives.
//!
//! The gateway talks to a single backend rooted at `http://<host>:<port>/api/`. [`GatewayConfig`]
//! keeps that root as a validated [`Url`] that always ends with `/`, so endpoint paths can be
//! appended verbatim.

// self
use crate::_prelude::*;

/// Errors raised while constructing or validating a [`GatewayConfig`].
#[derive(Debug, PartialEq, Eq, ThisError)]
pub enum GatewayConfigError {
	/// Base URL could not be parsed.
	#[error("Base URL `{url}` is invalid.")]
	InvalidUrl {
		/// Raw URL that failed to parse.
		url: String,
		/// Parser diagnostic.
		reason: String,
	},
	/// Host must not be empty.
	#[error("Gateway host must not be empty.")]
	MissingHost,
	/// Base URL cannot carry relative paths (`data:`, `mailto:`, ...).
	#[error("Base URL `{url}` cannot be used as a base.")]
	CannotBeABase {
		/// Offending URL.
		url: String,
	},
	/// Query strings and fragments would be split by appended endpoints.
	#[error("Base URL `{url}` must not carry a query or fragment.")]
	QueryOrFragment {
		/// Offending URL.
		url: String,
	},
}

/// Validated location of the backend API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayConfig {
	base_url: Url,
}
impl GatewayConfig {
	/// Host used by the backend during local development.
	pub const DEFAULT_HOST: &'static str = "localhost";
	/// Port used by the backend during local development.
	pub const DEFAULT_PORT: u16 = 8000;
	/// Path prefix under which every backend route is mounted.
	pub const DEFAULT_API_PREFIX: &'static str = "api";

	/// Starts a builder seeded with the local development defaults.
	pub fn builder() -> GatewayConfigBuilder {
		GatewayConfigBuilder::default()
	}

	/// Accepts a fully-formed base URL such as `https://quiz.example.com/api/`.
	///
	/// A trailing `/` is appended when missing.
	pub fn from_base_url(mut base_url: Url) -> Result<Self, GatewayConfigError> {
		if base_url.cannot_be_a_base() {
			return Err(GatewayConfigError::CannotBeABase { url: base_url.into() });
		}
		if base_url.host_str().is_none_or(str::is_empty) {
			return Err(GatewayConfigError::MissingHost);
		}
		if base_url.query().is_some() || base_url.fragment().is_some() {
			return Err(GatewayConfigError::QueryOrFragment { url: base_url.into() });
		}
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());

			base_url.set_path(&path);
		}

		Ok(Self { base_url })
	}

	/// Returns the normalized base URL (always ends with `/`).
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Appends `endpoint` verbatim to the base URL.
	///
	/// No normalization happens here: an empty endpoint yields the base itself and embedded
	/// slashes are kept as-is.
	pub fn endpoint_url(&self, endpoint: &str) -> String {
		format!("{}{endpoint}", self.base_url)
	}
}
impl Default for GatewayConfig {
	fn default() -> Self {
		let base_url = Url::parse(&format!(
			"http://{}:{}/{}/",
			Self::DEFAULT_HOST,
			Self::DEFAULT_PORT,
			Self::DEFAULT_API_PREFIX
		))
		.unwrap_or_else(|_| unreachable!("default gateway URL is statically valid"));

		Self { base_url }
	}
}

/// Builder for [`GatewayConfig`] values.
#[derive(Clone, Debug)]
pub struct GatewayConfigBuilder {
	/// URL scheme, `http` unless overridden.
	pub scheme: String,
	/// Backend host name or IP literal.
	pub host: String,
	/// Backend port.
	pub port: u16,
	/// Path prefix mounted in front of every endpoint.
	pub api_prefix: String,
}
impl GatewayConfigBuilder {
	/// Sets the URL scheme.
	pub fn scheme(mut self, scheme: impl Into<String>) -> Self {
		self.scheme = scheme.into();

		self
	}

	/// Sets the backend host.
	pub fn host(mut self, host: impl Into<String>) -> Self {
		self.host = host.into();

		self
	}

	/// Sets the backend port.
	pub fn port(mut self, port: u16) -> Self {
		self.port = port;

		self
	}

	/// Sets the path prefix (leading and trailing slashes are ignored).
	pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.api_prefix = prefix.into();

		self
	}

	/// Validates the inputs and produces a [`GatewayConfig`].
	pub fn build(self) -> Result<GatewayConfig, GatewayConfigError> {
		if self.host.trim().is_empty() {
			return Err(GatewayConfigError::MissingHost);
		}

		let prefix = self.api_prefix.trim_matches('/');
		let raw = if prefix.is_empty() {
			format!("{}://{}:{}/", self.scheme, self.host, self.port)
		} else {
			format!("{}://{}:{}/{prefix}/", self.scheme, self.host, self.port)
		};
		let base_url = Url::parse(&raw)
			.map_err(|e| GatewayConfigError::InvalidUrl { url: raw.clone(), reason: e.to_string() })?;

		GatewayConfig::from_base_url(base_url)
	}
}
impl Default for GatewayConfigBuilder {
	fn default() -> Self {
		Self {
			scheme: "http".into(),
			host: GatewayConfig::DEFAULT_HOST.into(),
			port: GatewayConfig::DEFAULT_PORT,
			api_prefix: GatewayConfig::DEFAULT_API_PREFIX.into(),
		}
	}
}
