//! Optional observability helpers for gateway calls.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to run every call inside a `challenge_gateway.request` span carrying the
//!   `method` and `endpoint` fields.
//! - Enable `metrics` to increment the `challenge_gateway_request_total` counter for every
//!   attempt and outcome, labeled by `method` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RequestOutcome {
	/// Entry to [`RequestGateway::make_request`](crate::gateway::RequestGateway::make_request).
	Attempt,
	/// Successful completion.
	Success,
	/// Backend answered with HTTP 429.
	QuotaExceeded,
	/// Any other failure propagated back to the caller.
	Failure,
}
impl RequestOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			RequestOutcome::Attempt => "attempt",
			RequestOutcome::Success => "success",
			RequestOutcome::QuotaExceeded => "quota_exceeded",
			RequestOutcome::Failure => "failure",
		}
	}

	/// Classifies a finished call.
	pub fn of<T>(result: &Result<T>) -> Self {
		match result {
			Ok(_) => Self::Success,
			Err(e) if e.is_quota_exceeded() => Self::QuotaExceeded,
			Err(_) => Self::Failure,
		}
	}
}
impl Display for RequestOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
