// self
use crate::obs::{FlowKind, FlowOutcome};

/// Counts one strategy operation event (when `metrics` is enabled).
pub fn record_flow_outcome(kind: FlowKind, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_naver_flow_total",
			"flow" => kind.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// Counts one `resultcode` rejection from the profile API (when `metrics` is enabled).
///
/// Naver's code table is small, so the raw code is used as the label.
pub fn record_api_rejection(kind: FlowKind, code: &str) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"oauth2_naver_api_rejection_total",
			"flow" => kind.as_str(),
			"code" => code.to_owned()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, code);
	}
}
