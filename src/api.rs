//! Typed calls for the challenge backend.
//!
//! The backend mounts three routes under `/api/`: challenge generation (which spends one unit of
//! the caller's daily quota), the caller's history, and the current quota. [`ChallengeApi`]
//! wraps a [`RequestGateway`] so these routes can be called with typed payloads while keeping the
//! gateway's error semantics, including [`Error::QuotaExceeded`] once the quota runs out.

// self
use crate::{
	_prelude::*,
	auth::TokenProvider,
	gateway::RequestGateway,
	http::ApiHttpClient,
	request::{HttpMethod, RequestOptions},
};

/// Route that generates a new challenge.
pub const GENERATE_CHALLENGE: &str = "generate-challenge";
/// Route listing the caller's previously generated challenges.
pub const MY_HISTORY: &str = "my-history";
/// Route reporting the caller's remaining quota.
pub const QUOTA: &str = "quota";

/// Difficulty accepted by the generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
	/// Entry-level questions.
	#[default]
	Easy,
	/// Intermediate questions.
	Medium,
	/// Advanced questions.
	Hard,
}
impl Difficulty {
	/// Returns the wire label.
	pub const fn as_str(self) -> &'static str {
		match self {
			Difficulty::Easy => "easy",
			Difficulty::Medium => "medium",
			Difficulty::Hard => "hard",
		}
	}
}
impl Display for Difficulty {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Body sent to [`GENERATE_CHALLENGE`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRequest {
	/// Requested difficulty.
	pub difficulty: Difficulty,
}

/// Freshly generated multiple-choice challenge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedChallenge {
	/// Backend identifier.
	pub id: i64,
	/// Difficulty the challenge was generated for.
	pub difficulty: Difficulty,
	/// Question text.
	pub title: String,
	/// Answer choices, indexed by `correct_answer_id`.
	pub options: Vec<String>,
	/// Index into `options` of the correct answer.
	pub correct_answer_id: usize,
	/// Why the correct answer is correct.
	pub explanation: String,
	/// Creation time as reported by the backend (ISO 8601, no offset).
	pub timestamp: String,
}
impl GeneratedChallenge {
	/// Returns the text of the correct answer, if the index is in range.
	pub fn correct_answer(&self) -> Option<&str> {
		self.options.get(self.correct_answer_id).map(String::as_str)
	}
}

/// Stored challenge as listed by [`MY_HISTORY`].
///
/// The backend stores `options` as a JSON-encoded string; use [`ChallengeRecord::options`] to
/// decode it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRecord {
	/// Backend identifier.
	pub id: i64,
	/// Difficulty label as stored.
	pub difficulty: String,
	/// Creation time (ISO 8601, no offset).
	pub date_created: String,
	/// User that generated the challenge.
	pub created_by: String,
	/// Question text.
	pub title: String,
	/// JSON-encoded answer choices.
	#[serde(rename = "options")]
	pub options_raw: String,
	/// Index of the correct answer.
	pub correct_answer_id: usize,
	/// Explanation text.
	pub explanation: String,
}
impl ChallengeRecord {
	/// Decodes the stored answer choices.
	pub fn options(&self) -> Result<Vec<String>> {
		let de = &mut serde_json::Deserializer::from_str(&self.options_raw);

		Ok(serde_path_to_error::deserialize(de)?)
	}
}

/// Response of [`MY_HISTORY`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeHistory {
	/// Challenges generated by the caller, oldest first.
	pub challenges: Vec<ChallengeRecord>,
}

/// Persisted quota row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeQuota {
	/// Row identifier.
	pub id: i64,
	/// Owner of the quota.
	pub user_id: String,
	/// Challenges left for today.
	pub remaining_quota: i64,
	/// Last daily reset (ISO 8601, no offset).
	pub last_reset_date: String,
}

/// Response of [`QUOTA`].
///
/// Users who never generated a challenge have no quota row yet and receive a placeholder.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuotaStatus {
	/// A quota row exists.
	Tracked {
		/// The stored quota.
		quota: ChallengeQuota,
	},
	/// No quota row yet.
	Untracked {
		/// Caller's user identifier.
		user_id: String,
		/// Always zero until the first generation creates the row.
		quota_remaining: i64,
		/// Server time of the lookup.
		last_reset_date: String,
	},
}
impl QuotaStatus {
	/// Challenges the caller can still generate today.
	pub fn remaining(&self) -> i64 {
		match self {
			Self::Tracked { quota } => quota.remaining_quota,
			Self::Untracked { quota_remaining, .. } => *quota_remaining,
		}
	}
}

/// Typed facade over the challenge routes.
pub struct ChallengeApi<C, P>
where
	C: ?Sized + ApiHttpClient,
	P: ?Sized + TokenProvider,
{
	gateway: RequestGateway<C, P>,
}
impl<C, P> ChallengeApi<C, P>
where
	C: ?Sized + ApiHttpClient,
	P: ?Sized + TokenProvider,
{
	/// Wraps an existing gateway.
	pub fn new(gateway: RequestGateway<C, P>) -> Self {
		Self { gateway }
	}

	/// Returns the underlying gateway for untyped calls.
	pub fn gateway(&self) -> &RequestGateway<C, P> {
		&self.gateway
	}

	/// Generates a challenge, spending one unit of quota.
	pub async fn generate_challenge(&self, difficulty: Difficulty) -> Result<GeneratedChallenge> {
		let options = RequestOptions::new()
			.with_method(HttpMethod::Post)
			.with_json(&ChallengeRequest { difficulty })?;

		self.gateway.make_request_as(GENERATE_CHALLENGE, options).await
	}

	/// Lists the caller's challenges.
	pub async fn my_history(&self) -> Result<ChallengeHistory> {
		self.gateway.make_request_as(MY_HISTORY, RequestOptions::new()).await
	}

	/// Reads the caller's quota.
	pub async fn quota(&self) -> Result<QuotaStatus> {
		self.gateway.make_request_as(QUOTA, RequestOptions::new()).await
	}
}
impl<C, P> Clone for ChallengeApi<C, P>
where
	C: ?Sized + ApiHttpClient,
	P: ?Sized + TokenProvider,
{
	fn clone(&self) -> Self {
		Self { gateway: self.gateway.clone() }
	}
}
impl<C, P> Debug for ChallengeApi<C, P>
where
	C: ?Sized + ApiHttpClient,
	P: ?Sized + TokenProvider,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ChallengeApi").field("gateway", &self.gateway).finish()
	}
}
