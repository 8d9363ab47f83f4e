//! Strategy-level error types shared by the profile fetch, the base client, and the verify
//! hook.

// self
use crate::{_prelude::*, profile::NaverApiError};

/// Strategy-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Boxed, thread-safe error used where the concrete cause is transport- or host-specific.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical strategy error exposed by public APIs.
///
/// Every non-success path of [`NaverStrategy::user_profile`](crate::strategy::NaverStrategy::user_profile)
/// maps onto exactly one variant; nothing is retried internally.
#[derive(Debug, ThisError)]
pub enum Error {
	/// The profile request never produced a usable HTTP response.
	#[error("Failed to fetch user profile.")]
	Transport(
		#[from]
		#[source]
		TransportError,
	),
	/// The profile endpoint answered with a body that is not JSON.
	#[error("Failed to parse API response.")]
	Parse {
		/// Underlying JSON syntax failure.
		#[source]
		source: serde_json::Error,
	},
	/// JSON parsed, but `resultcode` or `message` is missing or empty.
	#[error("Empty API response.")]
	EmptyResponse,
	/// Naver answered with a result code other than `00`.
	#[error(transparent)]
	Api(#[from] NaverApiError),

	/// Returned `state` does not match the one issued with the authorization redirect.
	#[error("Authorization state mismatch.")]
	StateMismatch,
	/// The host's verify callback rejected the profile.
	#[error("Verify callback rejected the profile.")]
	Verify {
		/// Host-supplied rejection.
		#[source]
		source: BoxError,
	},
}
impl Error {
	/// Returns the Naver result code when the failure was signaled by the provider itself.
	pub fn api_code(&self) -> Option<&str> {
		match self {
			Self::Api(e) => Some(e.code.as_str()),
			_ => None,
		}
	}
}

/// Transport-level failures surfaced by the base OAuth client.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the profile endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error("Profile request could not be built.")]
	Request(#[from] oauth2::http::Error),
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the profile endpoint.")]
	Io(#[from] std::io::Error),
	/// Profile endpoint answered outside the 2xx range.
	#[error("Profile endpoint returned HTTP {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, kept for diagnostics.
		body: String,
	},
	/// Any other transport failure reported as plain text.
	#[error("HTTP client error occurred while calling the profile endpoint: {message}.")]
	Other {
		/// Transport-supplied message.
		message: String,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}

	/// HTTP status code, when the failure carries one.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}
