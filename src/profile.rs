//! Naver profile API envelope and the normalized profile built from it.
//!
//! Naver answers `GET /v1/nid/me` with HTTP 200 even when it rejects the request; the
//! outcome lives in the body:
//!
//! ```json
//! { "resultcode": "00", "message": "success", "response": { "id": "..." } }
//! ```
//!
//! [`parse_profile`] turns that body into a [`NaverProfile`] or one of the parse, empty,
//! and provider-rejection errors.

// self
use crate::_prelude::*;

/// Provider name stamped on every profile.
pub const PROVIDER_NAME: &str = "naver";
/// Result code Naver uses for success. It is a string with a leading zero, never a number.
pub const SUCCESS_RESULT_CODE: &str = "00";

/// Naver rejected the profile request with a non-success `resultcode`.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Naver API rejected the request with result code {code}: {message}.")]
pub struct NaverApiError {
	/// Provider `message` field.
	pub message: String,
	/// Provider `resultcode` field.
	pub code: String,
}
impl NaverApiError {
	/// Creates a new provider error.
	pub fn new(message: impl Into<String>, code: impl Into<String>) -> Self {
		Self { message: message.into(), code: code.into() }
	}

	/// Classifies the result code against Naver's published code table.
	pub fn kind(&self) -> ApiErrorKind {
		ApiErrorKind::from_code(&self.code)
	}
}

/// Result codes documented for the profile API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiErrorKind {
	/// `024`: the access token was rejected.
	AuthenticationFailed,
	/// `028`: the `Authorization` header was missing.
	MissingAuthorizationHeader,
	/// `403`: the application may not call this API.
	Forbidden,
	/// `404`: the API does not exist.
	NotFound,
	/// `500`: Naver failed internally.
	InternalServerError,
	/// Any code outside the documented table.
	Unknown,
}
impl ApiErrorKind {
	/// Maps a raw result code onto its documented meaning.
	pub fn from_code(code: &str) -> Self {
		match code {
			"024" => Self::AuthenticationFailed,
			"028" => Self::MissingAuthorizationHeader,
			"403" => Self::Forbidden,
			"404" => Self::NotFound,
			"500" => Self::InternalServerError,
			_ => Self::Unknown,
		}
	}

	/// Whether a fresh access token (re-login) is the remedy.
	pub fn requires_reauthentication(self) -> bool {
		matches!(self, Self::AuthenticationFailed | Self::MissingAuthorizationHeader)
	}
}

/// Normalized Naver member profile.
///
/// Every provider field is optional: Naver only returns what the member consented to share.
/// Only string and number values are kept (numbers as their decimal text); a boolean,
/// array, or object in a provider field leaves it `None`. The untouched value stays
/// available in [`json`](Self::json).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NaverProfile {
	/// Always [`PROVIDER_NAME`].
	pub provider: String,
	/// Unique member identifier scoped to the application.
	pub id: Option<String>,
	/// Member nickname.
	pub nickname: Option<String>,
	/// Member display name.
	pub name: Option<String>,
	/// Member email address.
	pub email: Option<String>,
	/// `F`, `M`, or `U`.
	pub gender: Option<String>,
	/// Age range such as `20-29`.
	pub age: Option<String>,
	/// Birthday as `MM-DD`.
	pub birthday: Option<String>,
	/// Profile image URL.
	pub profile_image: Option<String>,
	/// Birth year as `YYYY`.
	pub birthyear: Option<String>,
	/// Mobile number as shown to Korean users.
	pub mobile: Option<String>,
	/// Mobile number in E.164 format.
	pub mobile_e164: Option<String>,
	/// Response body exactly as received.
	#[serde(rename = "_raw")]
	pub raw: String,
	/// Parsed response body.
	#[serde(rename = "_json")]
	pub json: Value,
}
impl NaverProfile {
	fn from_body(body: Option<&Value>, raw: String, json: Value) -> Self {
		let field = |name: &str| body.and_then(|body| body.get(name)).and_then(field_text);

		Self {
			provider: PROVIDER_NAME.into(),
			id: field("id"),
			nickname: field("nickname"),
			name: field("name"),
			email: field("email"),
			gender: field("gender"),
			age: field("age"),
			birthday: field("birthday"),
			profile_image: field("profile_image"),
			birthyear: field("birthyear"),
			mobile: field("mobile"),
			mobile_e164: field("mobile_e164"),
			raw,
			json,
		}
	}
}

/// Interprets a profile API body.
///
/// A `resultcode` or `message` that is missing, `null`, `false`, `0`, or empty yields
/// [`Error::EmptyResponse`]. Any other code besides the exact string `"00"` yields
/// [`Error::Api`].
pub fn parse_profile(raw: String) -> Result<NaverProfile> {
	let json: Value = serde_json::from_str(&raw).map_err(|source| Error::Parse { source })?;
	let (Some(code), Some(message)) =
		(truthy_text(json.get("resultcode")), truthy_text(json.get("message")))
	else {
		return Err(Error::EmptyResponse);
	};
	let succeeded = matches!(
		json.get("resultcode"),
		Some(Value::String(result_code)) if result_code == SUCCESS_RESULT_CODE
	);

	if !succeeded {
		return Err(NaverApiError { message, code }.into());
	}

	let body = json.get("response").cloned();

	Ok(NaverProfile::from_body(body.as_ref(), raw, json))
}

// Text of a value that counts as present: non-empty strings, non-zero numbers, `true`, and
// any array or object.
fn truthy_text(value: Option<&Value>) -> Option<String> {
	match value? {
		Value::Null | Value::Bool(false) => None,
		Value::String(s) if s.is_empty() => None,
		Value::String(s) => Some(s.clone()),
		Value::Number(n) if n.as_f64() == Some(0.) => None,
		other => Some(other.to_string()),
	}
}

fn field_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		_ => None,
	}
}
