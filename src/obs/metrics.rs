// self
use crate::{obs::RequestOutcome, request::HttpMethod};

/// Records a call outcome via the global metrics recorder (when enabled).
pub fn record_request_outcome(method: HttpMethod, outcome: RequestOutcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"challenge_gateway_request_total",
			"method" => method.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (method, outcome);
	}
}
