//! Base OAuth client the strategy composes with.
//!
//! [`OAuth2Client`] is the capability set the strategy consumes: token placement toggles, the
//! authenticated GET, and authorization redirect construction. [`BasicOAuth2Client`] is the
//! default implementation backed by any [`ProfileHttpClient`].

pub use oauth2;

// std
use std::sync::atomic::{AtomicBool, Ordering};
// crates.io
use oauth2::{
	AsyncHttpClient, ClientId, ClientSecret, HttpClientError, HttpRequest,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION},
	},
};
// self
use crate::{
	_prelude::*,
	error::TransportError,
	http::ProfileHttpClient,
	strategy::{AuthorizationParams, ResolvedOptions},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Boxed future returned by [`OAuth2Client::get`].
pub type GetFuture<'a> =
	Pin<Box<dyn Future<Output = Result<ProfileResponse, TransportError>> + 'a + Send>>;

/// Successful (2xx) response to an authenticated GET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileResponse {
	/// HTTP status code.
	pub status: u16,
	/// Response body decoded as UTF-8.
	pub body: String,
}

/// Capabilities the strategy needs from its base OAuth client.
///
/// The token placement settings are sticky: they apply to every later request issued
/// through the same client, and setting them repeatedly to the same value is harmless.
pub trait OAuth2Client
where
	Self: 'static + Send + Sync,
{
	/// Names the query parameter that carries the access token when the authorization
	/// header is disabled.
	fn set_access_token_name(&self, name: &str);

	/// Switches GET requests between `Authorization: Bearer` and the query parameter.
	fn use_authorization_header_for_get(&self, enabled: bool);

	/// Issues an authenticated GET.
	///
	/// Responses outside `200..=299` resolve to [`TransportError::Status`].
	fn get<'a>(&'a self, url: &'a Url, access_token: &'a str) -> GetFuture<'a>;

	/// Builds the authorization redirect for the provided parameters, adding the client's
	/// own `client_id` and `redirect_uri`.
	fn authorize_url(&self, params: &AuthorizationParams) -> Url;
}

/// Base clients that can be built straight from resolved strategy options.
pub trait Initialize
where
	Self: Sized + OAuth2Client,
{
	/// Builds a client for the resolved endpoints and credentials.
	fn initialize(options: &ResolvedOptions) -> Self;
}

/// Base client specialized for the crate's default reqwest transport.
#[cfg(feature = "reqwest")]
pub type ReqwestOAuth2Client = BasicOAuth2Client<ReqwestHttpClient>;

/// Default [`OAuth2Client`] over a pluggable [`ProfileHttpClient`].
pub struct BasicOAuth2Client<C>
where
	C: ?Sized + ProfileHttpClient,
{
	http_client: Arc<C>,
	client_id: Option<ClientId>,
	client_secret: Option<ClientSecret>,
	authorization_url: Url,
	token_url: Url,
	redirect_url: Option<Url>,
	access_token_name: RwLock<String>,
	authorization_header_for_get: AtomicBool,
}
impl<C> BasicOAuth2Client<C>
where
	C: ?Sized + ProfileHttpClient,
{
	/// Query parameter used for the access token until overridden.
	pub const DEFAULT_ACCESS_TOKEN_NAME: &str = "access_token";

	/// Creates a client that reuses the caller-provided transport.
	pub fn with_http_client(options: &ResolvedOptions, http_client: impl Into<Arc<C>>) -> Self {
		Self {
			http_client: http_client.into(),
			client_id: options.client_id.clone().map(ClientId::new),
			client_secret: options.client_secret.clone().map(ClientSecret::new),
			authorization_url: options.authorization_url.clone(),
			token_url: options.token_url.clone(),
			redirect_url: options.callback_url.clone(),
			access_token_name: RwLock::new(Self::DEFAULT_ACCESS_TOKEN_NAME.into()),
			authorization_header_for_get: AtomicBool::new(false),
		}
	}

	/// OAuth 2.0 client identifier, when configured.
	pub fn client_id(&self) -> Option<&str> {
		self.client_id.as_ref().map(|id| id.as_str())
	}

	/// Client secret, when configured. Callers must avoid logging this string.
	pub fn client_secret(&self) -> Option<&str> {
		self.client_secret.as_ref().map(|secret| secret.secret().as_str())
	}

	/// Authorization endpoint used for redirects.
	pub fn authorization_url(&self) -> &Url {
		&self.authorization_url
	}

	/// Token endpoint, kept for the host's code exchange.
	pub fn token_url(&self) -> &Url {
		&self.token_url
	}

	/// Current query parameter name used for access tokens.
	pub fn access_token_name(&self) -> String {
		self.access_token_name.read().clone()
	}

	/// Whether GET requests currently carry the token in the `Authorization` header.
	pub fn uses_authorization_header_for_get(&self) -> bool {
		self.authorization_header_for_get.load(Ordering::Relaxed)
	}

	fn build_get_request(
		&self,
		url: &Url,
		access_token: &str,
	) -> Result<HttpRequest, TransportError> {
		let builder = Request::builder().method(Method::GET).header(ACCEPT, "application/json");
		let builder = if self.uses_authorization_header_for_get() {
			builder.uri(url.as_str()).header(AUTHORIZATION, format!("Bearer {access_token}"))
		} else {
			let mut url = url.clone();

			url.query_pairs_mut().append_pair(&self.access_token_name.read(), access_token);

			builder.uri(url.as_str())
		};

		Ok(builder.body(Vec::new())?)
	}
}
impl<C> OAuth2Client for BasicOAuth2Client<C>
where
	C: ?Sized + ProfileHttpClient,
{
	fn set_access_token_name(&self, name: &str) {
		*self.access_token_name.write() = name.to_owned();
	}

	fn use_authorization_header_for_get(&self, enabled: bool) {
		self.authorization_header_for_get.store(enabled, Ordering::Relaxed);
	}

	fn get<'a>(&'a self, url: &'a Url, access_token: &'a str) -> GetFuture<'a> {
		Box::pin(async move {
			let request = self.build_get_request(url, access_token)?;
			let handle = self.http_client.handle();
			let response = handle.call(request).await.map_err(map_http_client_error)?;
			let status = response.status().as_u16();
			let body = String::from_utf8_lossy(response.body()).into_owned();

			if !(200..=299).contains(&status) {
				return Err(TransportError::Status { status, body });
			}

			Ok(ProfileResponse { status, body })
		})
	}

	fn authorize_url(&self, params: &AuthorizationParams) -> Url {
		let mut query = params.clone();

		if let Some(client_id) = self.client_id() {
			query.insert("client_id".into(), client_id.to_owned());
		}
		if let Some(redirect) = &self.redirect_url {
			query.insert("redirect_uri".into(), redirect.to_string());
		}

		let mut url = self.authorization_url.clone();

		url.query_pairs_mut().extend_pairs(query.iter());

		url
	}
}
impl<C> Initialize for BasicOAuth2Client<C>
where
	C: Default + ProfileHttpClient,
{
	fn initialize(options: &ResolvedOptions) -> Self {
		Self::with_http_client(options, C::default())
	}
}
impl<C> Debug for BasicOAuth2Client<C>
where
	C: ?Sized + ProfileHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("BasicOAuth2Client")
			.field("authorization_url", &self.authorization_url.as_str())
			.field("token_url", &self.token_url.as_str())
			.field("client_id", &self.client_id())
			.field("client_secret_set", &self.client_secret.is_some())
			.field("access_token_name", &self.access_token_name())
			.field("authorization_header_for_get", &self.uses_authorization_header_for_get())
			.finish()
	}
}

fn map_http_client_error<E>(err: HttpClientError<E>) -> TransportError
where
	E: 'static + Send + Sync + StdError,
{
	match err {
		HttpClientError::Reqwest(inner) => TransportError::Network { source: inner },
		HttpClientError::Http(inner) => TransportError::Request(inner),
		HttpClientError::Io(inner) => TransportError::Io(inner),
		HttpClientError::Other(message) => TransportError::Other { message },
		_ => TransportError::Other { message: "unrecognized transport failure".into() },
	}
}

#[cfg(all(test, feature = "reqwest"))]
mod tests {
	// self
	use super::*;
	use crate::strategy::StrategyOptions;

	fn client() -> ReqwestOAuth2Client {
		let options = StrategyOptions::default()
			.client_id("client-id")
			.client_secret("client-secret")
			.callback_url(
				Url::parse("https://app.example.com/auth/naver/callback")
					.expect("Failed to parse callback URL."),
			)
			.resolve();

		ReqwestOAuth2Client::initialize(&options)
	}

	#[test]
	fn token_goes_to_query_parameter_by_default() {
		let client = client();

		client.set_access_token_name("token");

		let url = Url::parse("https://openapi.naver.com/v1/nid/me")
			.expect("Failed to parse profile URL.");
		let request = client.build_get_request(&url, "abc").expect("Request should build.");

		assert_eq!(request.uri().query(), Some("token=abc"));
		assert!(request.headers().get(AUTHORIZATION).is_none());
	}

	#[test]
	fn authorization_header_toggle_is_sticky() {
		let client = client();
		let url = Url::parse("https://openapi.naver.com/v1/nid/me")
			.expect("Failed to parse profile URL.");

		client.use_authorization_header_for_get(true);
		client.use_authorization_header_for_get(true);

		for _ in 0..2 {
			let request = client.build_get_request(&url, "abc").expect("Request should build.");

			assert_eq!(
				request.headers().get(AUTHORIZATION).map(|value| value.as_bytes()),
				Some(&b"Bearer abc"[..])
			);
			assert_eq!(request.uri().query(), None);
		}
	}

	#[test]
	fn authorize_url_adds_client_identity() {
		let client = client();
		let mut params = AuthorizationParams::new();

		params.insert("response_type".into(), "code".into());
		params.insert("client_id".into(), "spoofed".into());

		let url = client.authorize_url(&params);
		let pairs: BTreeMap<_, _> = url.query_pairs().into_owned().collect();

		assert_eq!(url.host_str(), Some("nid.naver.com"));
		assert_eq!(pairs.get("client_id").map(String::as_str), Some("client-id"));
		assert_eq!(
			pairs.get("redirect_uri").map(String::as_str),
			Some("https://app.example.com/auth/naver/callback")
		);
		assert_eq!(pairs.get("response_type").map(String::as_str), Some("code"));
	}

	#[test]
	fn debug_output_redacts_secret() {
		let rendered = format!("{:?}", client());

		assert!(rendered.contains("client_secret_set: true"));
		assert!(!rendered.contains("client-secret"));
	}
}
