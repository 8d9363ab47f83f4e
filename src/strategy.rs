//! Naver login strategy.
//!
//! [`NaverStrategy`] configures a base OAuth client with Naver's endpoints, derives the
//! authorization parameters Naver expects, and turns the profile API's `resultcode` envelope
//! into a [`NaverProfile`] or a typed [`Error`].

pub mod authorization;
pub mod options;
pub mod verify;

pub use authorization::*;
pub use options::*;
pub use verify::*;

// self
use crate::{
	_prelude::*,
	oauth::{Initialize, OAuth2Client},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	profile::{self, NaverProfile, PROVIDER_NAME},
};

/// Naver login strategy composed over a base OAuth client `O` and a host verify callback `V`.
///
/// The strategy is immutable after construction and can be shared across request handlers.
/// The only state it touches afterwards is the base client's sticky token placement toggle.
pub struct NaverStrategy<O, V>
where
	O: ?Sized + OAuth2Client,
{
	options: ResolvedOptions,
	verify: V,
	client: Arc<O>,
}
impl<O, V> NaverStrategy<O, V>
where
	O: Initialize,
{
	/// Creates a strategy whose base client is built from the resolved `options`.
	///
	/// Unset endpoints fall back to Naver's defaults; construction never fails.
	pub fn new(options: StrategyOptions, verify: V) -> Self {
		let options = options.resolve();
		let client = O::initialize(&options);

		Self::from_parts(options, verify, Arc::new(client))
	}
}
impl<O, V> NaverStrategy<O, V>
where
	O: ?Sized + OAuth2Client,
{
	/// Query parameter the base client uses for the access token when the authorization
	/// header is off.
	pub const ACCESS_TOKEN_NAME: &str = "access_token";

	/// Creates a strategy around an already initialized base client.
	pub fn with_client(options: StrategyOptions, verify: V, client: impl Into<Arc<O>>) -> Self {
		Self::from_parts(options.resolve(), verify, client.into())
	}

	fn from_parts(options: ResolvedOptions, verify: V, client: Arc<O>) -> Self {
		client.set_access_token_name(Self::ACCESS_TOKEN_NAME);

		Self { options, verify, client }
	}

	/// Strategy name registered with the host framework.
	pub fn name(&self) -> &'static str {
		PROVIDER_NAME
	}

	/// Resolved configuration.
	pub fn options(&self) -> &ResolvedOptions {
		&self.options
	}

	/// Profile endpoint queried by [`user_profile`](Self::user_profile).
	pub fn profile_url(&self) -> &Url {
		&self.options.profile_url
	}

	/// Shared base OAuth client.
	pub fn client(&self) -> &Arc<O> {
		&self.client
	}

	/// Host verify callback, as supplied at construction.
	pub fn verifier(&self) -> &V {
		&self.verify
	}

	/// Derives the extra authorization parameters for one redirect.
	///
	/// The result is a copy of `options` with `response_type` forced to `code` and, when
	/// configured, `auth_type` set. `options` itself is left untouched.
	pub fn authorization_params(&self, options: &AuthorizationParams) -> AuthorizationParams {
		let mut params = options.clone();

		params.insert("response_type".into(), "code".into());

		if let Some(auth_type) = &self.options.auth_type {
			params.insert("auth_type".into(), auth_type.to_string());
		}

		params
	}

	/// Builds the authorization redirect with a fresh `state`.
	pub fn authorization_request(&self, options: &AuthorizationParams) -> AuthorizationRequest {
		const KIND: FlowKind = FlowKind::Authorization;

		let span = FlowSpan::new(KIND, "authorization_request");
		let _guard = span.enter();

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let state = random_state();
		let mut params = self.authorization_params(options);

		params.insert("state".into(), state.clone());

		let url = self.client.authorize_url(&params);

		span.record_outcome(FlowOutcome::Success);
		obs::record_flow_outcome(KIND, FlowOutcome::Success);

		AuthorizationRequest { url, state }
	}

	/// Fetches and normalizes the member profile for `access_token`.
	///
	/// Switches the shared base client to header-based token delivery first; the switch
	/// persists for later requests.
	pub async fn user_profile(&self, access_token: &str) -> Result<NaverProfile> {
		const KIND: FlowKind = FlowKind::UserProfile;

		let span = FlowSpan::new(KIND, "user_profile");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				self.client.use_authorization_header_for_get(true);

				let response = self.client.get(&self.options.profile_url, access_token).await?;

				profile::parse_profile(response.body)
			})
			.await;

		obs::finish(KIND, &span, &result);

		result
	}

	/// Fetches the profile and hands it to the verify callback.
	///
	/// Profile failures are returned as-is and never reach the callback.
	pub async fn authenticate(
		&self,
		access_token: &str,
		refresh_token: Option<&str>,
	) -> Result<V::User>
	where
		V: Verify,
	{
		const KIND: FlowKind = FlowKind::Authenticate;

		let span = FlowSpan::new(KIND, "authenticate");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let profile = self.user_profile(access_token).await?;

				self.verify
					.verify(access_token, refresh_token, profile)
					.await
					.map_err(|source| Error::Verify { source })
			})
			.await;

		obs::finish(KIND, &span, &result);

		result
	}
}
impl<O, V> Debug for NaverStrategy<O, V>
where
	O: ?Sized + OAuth2Client,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("NaverStrategy")
			.field("name", &self.name())
			.field("options", &self.options)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// std
	use std::sync::atomic::{AtomicBool, Ordering};
	// crates.io
	use parking_lot::Mutex;
	// self
	use super::*;
	use crate::{
		error::TransportError,
		oauth::{GetFuture, ProfileResponse},
	};

	enum Reply {
		Body(&'static str),
		Unreachable,
	}

	struct FakeClient {
		reply: Reply,
		token_name: RwLock<String>,
		header: AtomicBool,
		calls: Mutex<Vec<(String, String, bool)>>,
	}
	impl FakeClient {
		fn new(reply: Reply) -> Self {
			Self {
				reply,
				token_name: RwLock::new("unset".into()),
				header: AtomicBool::new(false),
				calls: Mutex::new(Vec::new()),
			}
		}
	}
	impl OAuth2Client for FakeClient {
		fn set_access_token_name(&self, name: &str) {
			*self.token_name.write() = name.to_owned();
		}

		fn use_authorization_header_for_get(&self, enabled: bool) {
			self.header.store(enabled, Ordering::SeqCst);
		}

		fn get<'a>(&'a self, url: &'a Url, access_token: &'a str) -> GetFuture<'a> {
			self.calls.lock().push((
				url.to_string(),
				access_token.to_owned(),
				self.header.load(Ordering::SeqCst),
			));

			let reply = match self.reply {
				Reply::Body(body) => Ok(ProfileResponse { status: 200, body: body.into() }),
				Reply::Unreachable =>
					Err(TransportError::Other { message: "connection refused".into() }),
			};

			Box::pin(async move { reply })
		}

		fn authorize_url(&self, params: &AuthorizationParams) -> Url {
			let mut url = Url::parse("https://nid.naver.com/oauth2.0/authorize")
				.expect("Authorization URL fixture should parse.");

			url.query_pairs_mut().extend_pairs(params.iter());

			url
		}
	}

	struct RecordingVerify {
		reject: bool,
		seen: Mutex<Vec<(String, Option<String>, Option<String>)>>,
	}
	impl RecordingVerify {
		fn new(reject: bool) -> Self {
			Self { reject, seen: Mutex::new(Vec::new()) }
		}
	}
	impl Verify for RecordingVerify {
		type User = String;

		fn verify<'a>(
			&'a self,
			access_token: &'a str,
			refresh_token: Option<&'a str>,
			profile: NaverProfile,
		) -> VerifyFuture<'a, Self::User> {
			self.seen.lock().push((
				access_token.to_owned(),
				refresh_token.map(str::to_owned),
				profile.id.clone(),
			));

			Box::pin(async move {
				if self.reject {
					Err(BoxError::from("member is suspended"))
				} else {
					Ok(format!("user:{}", profile.id.unwrap_or_default()))
				}
			})
		}
	}

	const SUCCESS: &str = r#"{"resultcode":"00","message":"success","response":{"id":"abc123","nickname":"nick","email":"a@b.com"}}"#;

	fn fake_strategy(
		options: StrategyOptions,
		reply: Reply,
	) -> NaverStrategy<FakeClient, RecordingVerify> {
		NaverStrategy::with_client(options, RecordingVerify::new(false), FakeClient::new(reply))
	}

	#[test]
	fn construction_applies_defaults_and_token_name() {
		let strategy = fake_strategy(StrategyOptions::default(), Reply::Unreachable);

		assert_eq!(strategy.name(), "naver");
		assert_eq!(strategy.options().authorization_url.as_str(), DEFAULT_AUTHORIZATION_URL);
		assert_eq!(strategy.options().token_url.as_str(), DEFAULT_TOKEN_URL);
		assert_eq!(strategy.profile_url().as_str(), DEFAULT_PROFILE_URL);
		assert_eq!(strategy.client().token_name.read().as_str(), "access_token");
		assert!(!strategy.client().header.load(Ordering::SeqCst));
	}

	#[test]
	fn authorization_params_copy_and_force_code() {
		let strategy = fake_strategy(StrategyOptions::default(), Reply::Unreachable);
		let mut options = AuthorizationParams::new();

		options.insert("response_type".into(), "token".into());
		options.insert("scope".into(), "profile".into());

		let before = options.clone();
		let params = strategy.authorization_params(&options);

		assert_eq!(options, before, "Caller options must not change.");
		assert_eq!(params.get("response_type").map(String::as_str), Some("code"));
		assert_eq!(params.get("scope").map(String::as_str), Some("profile"));
		assert!(!params.contains_key("auth_type"));
	}

	#[test]
	fn authorization_params_with_empty_input() {
		let strategy = fake_strategy(StrategyOptions::default(), Reply::Unreachable);
		let params = strategy.authorization_params(&AuthorizationParams::new());

		assert_eq!(params.len(), 1);
		assert_eq!(params.get("response_type").map(String::as_str), Some("code"));
	}

	#[test]
	fn authorization_params_carry_configured_auth_type() {
		let strategy = fake_strategy(
			StrategyOptions::default().auth_type(AuthType::Reauthenticate),
			Reply::Unreachable,
		);
		let params = strategy.authorization_params(&AuthorizationParams::new());

		assert_eq!(params.get("auth_type").map(String::as_str), Some("reauthenticate"));
	}

	#[test]
	fn authorization_request_embeds_state_and_params() {
		let strategy =
			fake_strategy(StrategyOptions::default().auth_type("reprompt"), Reply::Unreachable);
		let mut options = AuthorizationParams::new();

		options.insert("state".into(), "caller".into());

		let request = strategy.authorization_request(&options);
		let pairs: BTreeMap<_, _> = request.url.query_pairs().into_owned().collect();

		assert_eq!(pairs.get("state"), Some(&request.state));
		assert_ne!(request.state, "caller");
		assert_eq!(pairs.get("response_type").map(String::as_str), Some("code"));
		assert_eq!(pairs.get("auth_type").map(String::as_str), Some("reprompt"));
		assert!(request.validate_state(&request.state).is_ok());
	}

	#[tokio::test]
	async fn user_profile_switches_to_header_and_builds_profile() {
		let strategy = fake_strategy(StrategyOptions::default(), Reply::Body(SUCCESS));
		let profile = strategy.user_profile("token-1").await.expect("Profile should load.");

		assert_eq!(profile.provider, "naver");
		assert_eq!(profile.id.as_deref(), Some("abc123"));
		assert_eq!(profile.raw, SUCCESS);

		let calls = strategy.client().calls.lock().clone();

		assert_eq!(calls, vec![(DEFAULT_PROFILE_URL.to_owned(), "token-1".to_owned(), true)]);
		assert!(strategy.client().header.load(Ordering::SeqCst), "Header toggle must persist.");
	}

	#[tokio::test]
	async fn user_profile_wraps_transport_failures() {
		let strategy = fake_strategy(StrategyOptions::default(), Reply::Unreachable);
		let err = strategy.user_profile("token").await.expect_err("Transport must fail.");

		assert!(matches!(err, Error::Transport(TransportError::Other { .. })));
	}

	#[tokio::test]
	async fn user_profile_maps_each_envelope_failure() {
		let cases: [(&'static str, fn(&Error) -> bool); 4] = [
			("not json", |err| matches!(err, Error::Parse { .. })),
			("{}", |err| matches!(err, Error::EmptyResponse)),
			(r#"{"resultcode":"024","message":"Authentication failed","response":null}"#, |err| {
				matches!(err, Error::Api(api) if api.message == "Authentication failed" && api.code == "024")
			}),
			(r#"{"resultcode":"0","message":"success","response":{"id":"x"}}"#, |err| {
				err.api_code() == Some("0")
			}),
		];

		for (body, check) in cases {
			let strategy = fake_strategy(StrategyOptions::default(), Reply::Body(body));
			let err = strategy.user_profile("token").await.expect_err("Body must be rejected.");

			assert!(check(&err), "Unexpected error for {body}: {err:?}.");
		}
	}

	#[tokio::test]
	async fn authenticate_hands_profile_to_verify() {
		let strategy = fake_strategy(StrategyOptions::default(), Reply::Body(SUCCESS));
		let user = strategy
			.authenticate("access", Some("refresh"))
			.await
			.expect("Verify callback should accept the profile.");

		assert_eq!(user, "user:abc123");
		assert_eq!(
			strategy.verifier().seen.lock().clone(),
			vec![("access".to_owned(), Some("refresh".to_owned()), Some("abc123".to_owned()))]
		);
	}

	#[tokio::test]
	async fn authenticate_skips_verify_on_profile_failure() {
		let strategy = fake_strategy(StrategyOptions::default(), Reply::Body("{}"));
		let err = strategy.authenticate("access", None).await.expect_err("Empty body must fail.");

		assert!(matches!(err, Error::EmptyResponse));
		assert!(strategy.verifier().seen.lock().is_empty());
	}

	#[tokio::test]
	async fn authenticate_surfaces_verify_rejection() {
		let strategy: NaverStrategy<FakeClient, RecordingVerify> = NaverStrategy::with_client(
			StrategyOptions::default(),
			RecordingVerify::new(true),
			FakeClient::new(Reply::Body(SUCCESS)),
		);
		let err = strategy.authenticate("access", None).await.expect_err("Verify must reject.");

		assert!(matches!(err, Error::Verify { .. }));
	}
}
