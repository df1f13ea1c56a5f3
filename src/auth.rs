//! Bearer-token sourcing.
//!
//! The gateway never owns credentials. Each call asks an injected [`TokenProvider`] for the
//! current token and discards it once the request is built, so caching and refresh stay the
//! provider's business.

// self
use crate::{_prelude::*, error::BoxError};

/// Boxed future returned by [`TokenProvider::token`].
pub type TokenFuture<'a> =
	Pin<Box<dyn Future<Output = Result<Option<TokenSecret>, BoxError>> + 'a + Send>>;

/// Capability that resolves the caller's current bearer token.
///
/// `Ok(None)` means the provider has no session; the gateway still sends the request with an
/// empty bearer credential and lets the backend decide.
pub trait TokenProvider
where
	Self: Send + Sync,
{
	/// Resolves the token to attach to the next request.
	fn token(&self) -> TokenFuture<'_>;
}
impl<T> TokenProvider for Arc<T>
where
	T: ?Sized + TokenProvider,
{
	fn token(&self) -> TokenFuture<'_> {
		T::token(self)
	}
}

/// Redacted token wrapper keeping bearer credentials out of logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Formats the `Authorization` header value; an absent token yields an empty credential.
pub fn bearer_value(token: Option<&TokenSecret>) -> String {
	format!("Bearer {}", token.map(TokenSecret::expose).unwrap_or_default())
}

/// Provider holding whatever token the host application last handed it.
///
/// Sign-in code calls [`replace`](Self::replace) or [`clear`](Self::clear) as the session
/// changes.
#[derive(Debug, Default)]
pub struct StaticTokenProvider(RwLock<Option<TokenSecret>>);
impl StaticTokenProvider {
	/// Creates a provider seeded with `token`.
	pub fn new(token: impl Into<String>) -> Self {
		Self(RwLock::new(Some(TokenSecret::new(token))))
	}

	/// Creates a provider with no session.
	pub fn signed_out() -> Self {
		Self::default()
	}

	/// Swaps in a new token, returning the previous one.
	pub fn replace(&self, token: impl Into<String>) -> Option<TokenSecret> {
		self.0.write().replace(TokenSecret::new(token))
	}

	/// Drops the current token.
	pub fn clear(&self) -> Option<TokenSecret> {
		self.0.write().take()
	}
}
impl TokenProvider for StaticTokenProvider {
	fn token(&self) -> TokenFuture<'_> {
		let current = self.0.read().clone();

		Box::pin(async move { Ok(current) })
	}
}

/// Adapts an async closure into a [`TokenProvider`].
pub struct FnTokenProvider<F>(F);
impl<F> FnTokenProvider<F> {
	/// Wraps `f`; it is invoked once per gateway call.
	pub fn new(f: F) -> Self {
		Self(f)
	}
}
impl<F, Fut> TokenProvider for FnTokenProvider<F>
where
	F: Send + Sync + Fn() -> Fut,
	Fut: 'static + Send + Future<Output = Result<Option<TokenSecret>, BoxError>>,
{
	fn token(&self) -> TokenFuture<'_> {
		Box::pin((self.0)())
	}
}
impl<F> Debug for FnTokenProvider<F> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("FnTokenProvider(..)")
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
	}

	#[test]
	fn bearer_value_interpolates_missing_tokens() {
		let secret = TokenSecret::new("abc");

		assert_eq!(bearer_value(Some(&secret)), "Bearer abc");
		assert_eq!(bearer_value(None), "Bearer ");
	}

	#[tokio::test]
	async fn static_provider_tracks_session_changes() {
		let provider = StaticTokenProvider::new("first");

		assert_eq!(
			provider.token().await.expect("Static provider should not fail."),
			Some(TokenSecret::new("first"))
		);

		let previous = provider.replace("second");

		assert_eq!(previous, Some(TokenSecret::new("first")));
		assert_eq!(
			provider.token().await.expect("Static provider should not fail."),
			Some(TokenSecret::new("second"))
		);

		provider.clear();

		assert_eq!(provider.token().await.expect("Static provider should not fail."), None);
	}

	#[tokio::test]
	async fn fn_provider_surfaces_failures() {
		let provider = FnTokenProvider::new(|| async {
			Err::<Option<TokenSecret>, BoxError>("identity provider offline".into())
		});
		let err = provider.token().await.expect_err("Closure failure should propagate.");

		assert_eq!(err.to_string(), "identity provider offline");
	}
}
