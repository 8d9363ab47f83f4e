//! Strategy configuration, Naver endpoint defaults, and `auth_type` values.

// self
use crate::_prelude::*;

/// Naver authorization endpoint used when none is configured.
pub const DEFAULT_AUTHORIZATION_URL: &str = "https://nid.naver.com/oauth2.0/authorize";
/// Naver token endpoint used when none is configured.
pub const DEFAULT_TOKEN_URL: &str = "https://nid.naver.com/oauth2.0/token";
/// Naver member profile endpoint used when none is configured.
pub const DEFAULT_PROFILE_URL: &str = "https://openapi.naver.com/v1/nid/me";

/// Naver's `auth_type` authorization parameter.
///
/// Naver documents `reauthenticate` (ask for the password again) and `reprompt` (show the
/// consent screen again); other values are forwarded verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AuthType {
	/// Forces the member to log in again even with a live Naver session.
	Reauthenticate,
	/// Shows the consent screen again so previously declined items can be granted.
	Reprompt,
	/// Any other value.
	Other(String),
}
impl AuthType {
	/// Returns the wire value.
	pub fn as_str(&self) -> &str {
		match self {
			Self::Reauthenticate => "reauthenticate",
			Self::Reprompt => "reprompt",
			Self::Other(value) => value.as_str(),
		}
	}
}
impl From<String> for AuthType {
	fn from(value: String) -> Self {
		match value.as_str() {
			"reauthenticate" => Self::Reauthenticate,
			"reprompt" => Self::Reprompt,
			_ => Self::Other(value),
		}
	}
}
impl From<&str> for AuthType {
	fn from(value: &str) -> Self {
		value.to_owned().into()
	}
}
impl From<AuthType> for String {
	fn from(value: AuthType) -> Self {
		match value {
			AuthType::Other(value) => value,
			known => known.as_str().to_owned(),
		}
	}
}
impl Display for AuthType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Caller-facing strategy configuration. Every field is optional.
///
/// Deserializes from snake_case keys so hosts can keep it in their own config files.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyOptions {
	/// Authorization endpoint override.
	pub authorization_url: Option<Url>,
	/// Token endpoint override.
	pub token_url: Option<Url>,
	/// Profile endpoint override.
	pub profile_url: Option<Url>,
	/// OAuth 2.0 client identifier.
	pub client_id: Option<String>,
	/// OAuth 2.0 client secret.
	pub client_secret: Option<String>,
	/// Redirect URI registered with Naver.
	pub callback_url: Option<Url>,
	/// Re-authentication behavior; omitted from requests when unset.
	pub auth_type: Option<AuthType>,
}
impl StrategyOptions {
	/// Sets the authorization endpoint.
	pub fn authorization_url(mut self, url: Url) -> Self {
		self.authorization_url = Some(url);

		self
	}

	/// Sets the token endpoint.
	pub fn token_url(mut self, url: Url) -> Self {
		self.token_url = Some(url);

		self
	}

	/// Sets the profile endpoint.
	pub fn profile_url(mut self, url: Url) -> Self {
		self.profile_url = Some(url);

		self
	}

	/// Sets the client identifier.
	pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
		self.client_id = Some(client_id.into());

		self
	}

	/// Sets the client secret.
	pub fn client_secret(mut self, secret: impl Into<String>) -> Self {
		self.client_secret = Some(secret.into());

		self
	}

	/// Sets the redirect URI.
	pub fn callback_url(mut self, url: Url) -> Self {
		self.callback_url = Some(url);

		self
	}

	/// Sets the re-authentication behavior.
	pub fn auth_type(mut self, auth_type: impl Into<AuthType>) -> Self {
		self.auth_type = Some(auth_type.into());

		self
	}

	/// Fills every unset endpoint with Naver's default. Never fails.
	pub fn resolve(self) -> ResolvedOptions {
		ResolvedOptions {
			authorization_url: self
				.authorization_url
				.unwrap_or_else(|| builtin_url(DEFAULT_AUTHORIZATION_URL)),
			token_url: self.token_url.unwrap_or_else(|| builtin_url(DEFAULT_TOKEN_URL)),
			profile_url: self.profile_url.unwrap_or_else(|| builtin_url(DEFAULT_PROFILE_URL)),
			client_id: self.client_id,
			client_secret: self.client_secret,
			callback_url: self.callback_url,
			auth_type: self.auth_type,
		}
	}
}
impl Debug for StrategyOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StrategyOptions")
			.field("authorization_url", &self.authorization_url.as_ref().map(Url::as_str))
			.field("token_url", &self.token_url.as_ref().map(Url::as_str))
			.field("profile_url", &self.profile_url.as_ref().map(Url::as_str))
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("callback_url", &self.callback_url.as_ref().map(Url::as_str))
			.field("auth_type", &self.auth_type)
			.finish()
	}
}

/// Strategy configuration with every endpoint resolved.
#[derive(Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
	/// Authorization endpoint.
	pub authorization_url: Url,
	/// Token endpoint.
	pub token_url: Url,
	/// Profile endpoint.
	pub profile_url: Url,
	/// OAuth 2.0 client identifier.
	pub client_id: Option<String>,
	/// OAuth 2.0 client secret.
	pub client_secret: Option<String>,
	/// Redirect URI registered with Naver.
	pub callback_url: Option<Url>,
	/// Re-authentication behavior.
	pub auth_type: Option<AuthType>,
}
impl Debug for ResolvedOptions {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ResolvedOptions")
			.field("authorization_url", &self.authorization_url.as_str())
			.field("token_url", &self.token_url.as_str())
			.field("profile_url", &self.profile_url.as_str())
			.field("client_id", &self.client_id)
			.field("client_secret_set", &self.client_secret.is_some())
			.field("callback_url", &self.callback_url.as_ref().map(Url::as_str))
			.field("auth_type", &self.auth_type)
			.finish()
	}
}

fn builtin_url(raw: &'static str) -> Url {
	Url::parse(raw).expect("Built-in Naver endpoints are valid URLs.")
}
