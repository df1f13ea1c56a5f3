mod common;

// crates.io
use httpmock::prelude::*;
// self
use challenge_gateway::{
	api::{ChallengeApi, Difficulty, QuotaStatus},
	error::{Error, QUOTA_EXCEEDED_MESSAGE},
};
use common::mock_gateway;

const TOKEN: &str = "clerk-session";

#[tokio::test]
async fn generate_challenge_posts_difficulty_with_default_headers() {
	let server = MockServer::start_async().await;
	let api = ChallengeApi::new(mock_gateway(&server, TOKEN));
	let mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/api/generate-challenge")
				.header("authorization", "Bearer clerk-session")
				.header("content-type", "application/json")
				.body("{\"difficulty\":\"hard\"}");
			then.status(200).header("content-type", "application/json").body(
				"{\"id\":12,\"difficulty\":\"hard\",\"title\":\"What does `Pin` guarantee?\",\
				 \"options\":[\"Nothing\",\"The value will not move\",\"Thread safety\",\"Drop order\"],\
				 \"correct_answer_id\":1,\"explanation\":\"Pinned values stay at a fixed address.\",\
				 \"timestamp\":\"2024-05-01T09:30:00.123456\"}",
			);
		})
		.await;
	let challenge = api
		.generate_challenge(Difficulty::Hard)
		.await
		.expect("Challenge generation should succeed.");

	assert_eq!(challenge.id, 12);
	assert_eq!(challenge.difficulty, Difficulty::Hard);
	assert_eq!(challenge.correct_answer(), Some("The value will not move"));
	assert_eq!(challenge.timestamp, "2024-05-01T09:30:00.123456");

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn exhausted_quota_maps_to_quota_exceeded() {
	let server = MockServer::start_async().await;
	let api = ChallengeApi::new(mock_gateway(&server, TOKEN));
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/generate-challenge");
			then.status(429)
				.header("content-type", "application/json")
				.body("{\"detail\":\"Quota exhausted\"}");
		})
		.await;
	let err = api
		.generate_challenge(Difficulty::Easy)
		.await
		.expect_err("Exhausted quota should fail.");

	assert!(err.is_quota_exceeded(), "Got {err:?}.");
	assert_eq!(err.to_string(), QUOTA_EXCEEDED_MESSAGE);
}

#[tokio::test]
async fn generation_failure_surfaces_backend_detail() {
	let server = MockServer::start_async().await;
	let api = ChallengeApi::new(mock_gateway(&server, TOKEN));
	let _mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/api/generate-challenge");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"detail\":\"No valid session token found\"}");
		})
		.await;
	let err = api
		.generate_challenge(Difficulty::Medium)
		.await
		.expect_err("Backend rejection should fail.");

	assert!(matches!(err, Error::RequestFailed { status: 400, .. }), "Got {err:?}.");
	assert_eq!(err.to_string(), "No valid session token found");
}

#[tokio::test]
async fn history_lists_stored_challenges() {
	let server = MockServer::start_async().await;
	let api = ChallengeApi::new(mock_gateway(&server, TOKEN));
	let _mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/api/my-history")
				.header("authorization", "Bearer clerk-session");
			then.status(200).header("content-type", "application/json").body(
				"{\"challenges\":[{\"id\":1,\"difficulty\":\"easy\",\
				 \"date_created\":\"2024-05-01T09:30:00\",\"created_by\":\"user_1\",\
				 \"title\":\"Which keyword declares a constant?\",\
				 \"options\":\"[\\\"let\\\",\\\"const\\\",\\\"static\\\",\\\"mut\\\"]\",\
				 \"correct_answer_id\":1,\"explanation\":\"`const` declares a constant.\"}]}",
			);
		})
		.await;
	let history = api.my_history().await.expect("History lookup should succeed.");

	assert_eq!(history.challenges.len(), 1);

	let record = &history.challenges[0];

	assert_eq!(record.created_by, "user_1");
	assert_eq!(
		record.options().expect("Stored options should decode."),
		vec!["let", "const", "static", "mut"]
	);
}

#[tokio::test]
async fn quota_handles_tracked_and_untracked_users() {
	let server = MockServer::start_async().await;
	let api = ChallengeApi::new(mock_gateway(&server, TOKEN));
	let mut tracked = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/quota");
			then.status(200).header("content-type", "application/json").body(
				"{\"quota\":{\"id\":4,\"user_id\":\"user_1\",\"remaining_quota\":47,\
				 \"last_reset_date\":\"2024-05-01T00:00:00\"}}",
			);
		})
		.await;
	let quota = api.quota().await.expect("Tracked quota lookup should succeed.");

	assert_eq!(quota.remaining(), 47);
	assert!(matches!(quota, QuotaStatus::Tracked { .. }));

	tracked.delete_async().await;

	let _untracked = server
		.mock_async(|when, then| {
			when.method(GET).path("/api/quota");
			then.status(200).header("content-type", "application/json").body(
				"{\"user_id\":\"user_9\",\"quota_remaining\":0,\
				 \"last_reset_date\":\"2024-05-01T12:00:00.5\"}",
			);
		})
		.await;
	let quota = api.quota().await.expect("Untracked quota lookup should succeed.");

	assert_eq!(quota.remaining(), 0);
	assert!(matches!(quota, QuotaStatus::Untracked { .. }));
}
