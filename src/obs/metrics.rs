// self
use crate::obs::{FlowOperation, FlowOutcome};

/// Records a flow outcome via the global metrics recorder (when enabled).
pub fn record_flow_outcome(operation: FlowOperation, outcome: FlowOutcome) {
	#[cfg(feature = "metrics")]
	{
		match outcome.code() {
			Some(code) => metrics::counter!(
				"oauth2_client_credentials_flow_total",
				"operation" => operation.as_str(),
				"outcome" => outcome.as_str(),
				"code" => code.as_str()
			)
			.increment(1),
			None => metrics::counter!(
				"oauth2_client_credentials_flow_total",
				"operation" => operation.as_str(),
				"outcome" => outcome.as_str()
			)
			.increment(1),
		}
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (operation, outcome);
	}
}
