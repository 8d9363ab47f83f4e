//! Optional observability helpers for strategy operations.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `oauth2_naver.flow` with the `flow`
//!   (operation) and `stage` (call site) fields.
//!   The `outcome` and `result_code` fields are filled in when the operation finishes.
//! - Enable `metrics` to increment the `oauth2_naver_flow_total` counter for every
//!   attempt/success/failure, labeled by `flow` + `outcome`, and
//!   `oauth2_naver_api_rejection_total` for every `resultcode` rejection, labeled by `flow` +
//!   `code`.
//!
//! Failures are counted, never logged: reporting them is the host's call.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Records the end of a strategy operation on `span` and the metrics recorder.
pub fn finish<T>(kind: FlowKind, span: &FlowSpan, result: &Result<T>) {
	let outcome = FlowOutcome::of(result);

	span.record_outcome(outcome);

	if let Err(Error::Api(api)) = result {
		span.record_result_code(&api.code);
		record_api_rejection(kind, &api.code);
	}

	record_flow_outcome(kind, outcome);
}

/// Strategy operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowKind {
	/// Authorization redirect construction.
	Authorization,
	/// Profile fetch and normalization.
	UserProfile,
	/// Profile fetch followed by the host's verify callback.
	Authenticate,
}
impl FlowKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowKind::Authorization => "authorization",
			FlowKind::UserProfile => "user_profile",
			FlowKind::Authenticate => "authenticate",
		}
	}
}
impl Display for FlowKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FlowOutcome {
	/// Entry to a strategy operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure returned to the caller.
	Failure,
}
impl FlowOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			FlowOutcome::Attempt => "attempt",
			FlowOutcome::Success => "success",
			FlowOutcome::Failure => "failure",
		}
	}

	/// Maps a finished operation onto its outcome label.
	pub fn of<T, E>(result: &Result<T, E>) -> Self {
		match result {
			Ok(_) => FlowOutcome::Success,
			Err(_) => FlowOutcome::Failure,
		}
	}
}
impl Display for FlowOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
