//! Verify callback contract used by [`NaverStrategy::authenticate`](super::NaverStrategy::authenticate).

// self
use crate::{_prelude::*, profile::NaverProfile};

/// Boxed future returned by [`Verify::verify`].
pub type VerifyFuture<'a, User> = Pin<Box<dyn Future<Output = Result<User, BoxError>> + 'a + Send>>;

/// Host hook that turns a Naver profile into an application user.
///
/// The strategy never inspects the callback; it only hands over the tokens and the
/// normalized profile once the profile fetch succeeded.
pub trait Verify
where
	Self: Send + Sync,
{
	/// Application user produced on success.
	type User: Send;

	/// Looks up or provisions the user for `profile`.
	fn verify<'a>(
		&'a self,
		access_token: &'a str,
		refresh_token: Option<&'a str>,
		profile: NaverProfile,
	) -> VerifyFuture<'a, Self::User>;
}
