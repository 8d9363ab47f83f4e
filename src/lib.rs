//! Naver login for Rust: derive OAuth 2.0 authorization parameters, fetch the signed-in
//! member's profile, and normalize Naver's `resultcode` envelope into a typed profile or a
//! typed error.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod error;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod profile;
pub mod strategy;
#[cfg(feature = "reqwest")]
#[doc(hidden)]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests.

	pub use crate::_prelude::*;

	// self
	use crate::{
		http::ReqwestHttpClient,
		oauth::BasicOAuth2Client,
		profile::NaverProfile,
		strategy::{NaverStrategy, StrategyOptions, Verify, VerifyFuture},
	};

	/// Strategy type alias used by reqwest-backed integration tests.
	pub type ReqwestTestStrategy = NaverStrategy<BasicOAuth2Client<ReqwestHttpClient>, NoopVerify>;

	/// Verify callback that accepts every profile and hands back its identifier.
	#[derive(Clone, Debug, Default)]
	pub struct NoopVerify;
	impl Verify for NoopVerify {
		type User = Option<String>;

		fn verify<'a>(
			&'a self,
			_access_token: &'a str,
			_refresh_token: Option<&'a str>,
			profile: NaverProfile,
		) -> VerifyFuture<'a, Self::User> {
			Box::pin(async move { Ok::<_, BoxError>(profile.id) })
		}
	}

	/// Options pointing every endpoint at the provided base URL (e.g. an `httpmock` server).
	pub fn test_options(base: &str) -> StrategyOptions {
		let url = |path: &str| {
			Url::parse(&format!("{base}{path}")).expect("Failed to parse mock endpoint URL.")
		};

		StrategyOptions::default()
			.authorization_url(url("/oauth2.0/authorize"))
			.token_url(url("/oauth2.0/token"))
			.profile_url(url("/v1/nid/me"))
			.client_id("client-it")
			.client_secret("secret-it")
			.callback_url(url("/auth/naver/callback"))
	}

	/// Constructs a reqwest-backed [`NaverStrategy`] for the provided options.
	pub fn build_reqwest_test_strategy(options: StrategyOptions) -> ReqwestTestStrategy {
		NaverStrategy::new(options, NoopVerify)
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

	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{BoxError, Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {color_eyre as _, httpmock as _};
