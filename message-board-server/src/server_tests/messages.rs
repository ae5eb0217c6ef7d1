use crate::configuration::Environment;
use crate::server_tests::test_client::TestClient;
use crate::server_tests::{connected_server, disconnected_server, stalled_server};
use reqwest::StatusCode;
use serde_json::{Value, json};
use std::time::Duration;

async fn create_message(client: &TestClient, sender: &str, content: &str) -> Value {
	let response = client
		.post("/api/messages")
		.json(&json!({"sender": sender, "content": content}))
		.send()
		.await
		.expect("Failed to send request");
	assert_eq!(StatusCode::CREATED, response.status());

	let body = response.json::<Value>().await.expect("Response is not JSON");
	body["data"].clone()
}

async fn json_response(response: reqwest::Response) -> (StatusCode, Value) {
	let status = response.status();
	let body = response.json::<Value>().await.expect("Response is not JSON");
	(status, body)
}

fn id_of(message: &Value) -> String {
	message["id"].as_str().expect("Message has no id").to_string()
}

#[tokio::test]
async fn should_create_and_get_message() {
	let client = connected_server(Environment::Development).await;

	let response = client
		.post("/api/messages")
		.json(&json!({"sender": " alice ", "content": "Hello world!"}))
		.send()
		.await
		.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::CREATED, status);
	assert_eq!(json!(true), body["success"]);
	assert_eq!(json!("Message sent successfully"), body["message"]);
	assert_eq!(json!("alice"), body["data"]["sender"]);
	assert_eq!(json!("Hello world!"), body["data"]["content"]);
	assert!(body["data"]["createdAt"].is_string());
	assert_eq!(body["data"]["createdAt"], body["data"]["timestamp"]);
	assert!(body["data"]["updatedAt"].is_null());

	let id = id_of(&body["data"]);
	let response = client
		.get(&format!("/api/messages/{id}"))
		.send()
		.await
		.expect("Failed to send request");
	let (status, fetched) = json_response(response).await;

	assert_eq!(StatusCode::OK, status);
	assert_eq!(json!({"success": true, "data": body["data"]}), fetched);
}

#[tokio::test]
async fn should_reject_message_with_missing_fields() {
	let client = connected_server(Environment::Development).await;

	for request in [json!({"sender": "alice"}), json!({"content": "hi"}), json!({"sender": "  ", "content": "hi"})] {
		let response = client
			.post("/api/messages")
			.json(&request)
			.send()
			.await
			.expect("Failed to send request");
		let (status, body) = json_response(response).await;

		assert_eq!(StatusCode::BAD_REQUEST, status, "Request: {request}");
		assert_eq!(
			json!({
				"success": false,
				"error": "Missing required fields",
				"requiredFields": ["sender", "content"],
			}),
			body
		);
	}

	let response = client.get("/api/messages").send().await.expect("Failed to send request");
	let (_, body) = json_response(response).await;
	assert_eq!(json!(0), body["pagination"]["total"]);
}

#[tokio::test]
async fn should_reject_malformed_body() {
	let client = connected_server(Environment::Development).await;

	let response = client
		.post("/api/messages")
		.header("content-type", "application/json")
		.body("{not json")
		.send()
		.await
		.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::BAD_REQUEST, status);
	assert_eq!(json!(false), body["success"]);
	assert_eq!(json!("Invalid request body"), body["error"]);
	assert!(body["details"].is_string());
}

#[tokio::test]
async fn should_not_find_unknown_message() {
	let client = connected_server(Environment::Development).await;

	for path in [
		"/api/messages/6f1c1b8e-3c4b-4f55-9d0a-0d5b8c1f2e3a",
		"/api/messages/not-a-valid-id",
	] {
		let response = client.get(path).send().await.expect("Failed to send request");
		let (status, body) = json_response(response).await;

		assert_eq!(StatusCode::NOT_FOUND, status, "Path: {path}");
		assert_eq!(json!({"success": false, "error": "Message not found"}), body);
	}
}

#[tokio::test]
async fn should_update_message() {
	let client = connected_server(Environment::Development).await;
	let message = create_message(&client, "alice", "first").await;
	let id = id_of(&message);

	let response = client
		.put(&format!("/api/messages/{id}"))
		.json(&json!({"content": " edited "}))
		.send()
		.await
		.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::OK, status);
	assert_eq!(json!("Message updated successfully"), body["message"]);
	assert_eq!(json!("edited"), body["data"]["content"]);
	assert_eq!(message["createdAt"], body["data"]["createdAt"]);
	assert!(body["data"]["updatedAt"].is_string());
}

#[tokio::test]
async fn should_reject_update_without_content() {
	let client = connected_server(Environment::Development).await;
	let message = create_message(&client, "alice", "first").await;
	let id = id_of(&message);

	let response = client
		.put(&format!("/api/messages/{id}"))
		.json(&json!({}))
		.send()
		.await
		.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::BAD_REQUEST, status);
	assert_eq!(
		json!({"success": false, "error": "Content is required for update"}),
		body
	);
}

#[tokio::test]
async fn should_not_update_unknown_message() {
	let client = connected_server(Environment::Development).await;

	let response = client
		.put("/api/messages/6f1c1b8e-3c4b-4f55-9d0a-0d5b8c1f2e3a")
		.json(&json!({"content": "edited"}))
		.send()
		.await
		.expect("Failed to send request");

	assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn should_delete_message() {
	let client = connected_server(Environment::Development).await;
	let message = create_message(&client, "alice", "first").await;
	let path = format!("/api/messages/{}", id_of(&message));

	let response = client.delete(&path).send().await.expect("Failed to send request");
	let (status, body) = json_response(response).await;
	assert_eq!(StatusCode::OK, status);
	assert_eq!(
		json!({"success": true, "message": "Message deleted successfully"}),
		body
	);

	let response = client.delete(&path).send().await.expect("Failed to send request");
	assert_eq!(StatusCode::NOT_FOUND, response.status());
	let response = client.get(&path).send().await.expect("Failed to send request");
	assert_eq!(StatusCode::NOT_FOUND, response.status());
}

#[tokio::test]
async fn should_list_messages_of_sender_newest_first() {
	let client = connected_server(Environment::Development).await;
	let first = create_message(&client, "A", "one").await;
	create_message(&client, "B", "two").await;
	let third = create_message(&client, "A", "three").await;

	let response = client
		.get("/api/messages?sender=A")
		.send()
		.await
		.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::OK, status);
	assert_eq!(
		json!({
			"success": true,
			"data": [third, first],
			"pagination": {"total": 2, "page": 1, "limit": 20, "pages": 1},
		}),
		body
	);
}

#[tokio::test]
async fn should_page_through_messages() {
	let client = connected_server(Environment::Development).await;
	for number in 0..5 {
		create_message(&client, "alice", &format!("message {number}")).await;
	}

	let response = client
		.get("/api/messages?page=2&limit=2&sortOrder=asc")
		.send()
		.await
		.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::OK, status);
	let contents = body["data"]
		.as_array()
		.expect("Data is not an array")
		.iter()
		.map(|message| message["content"].clone())
		.collect::<Vec<_>>();
	assert_eq!(vec![json!("message 2"), json!("message 3")], contents);
	assert_eq!(
		json!({"total": 5, "page": 2, "limit": 2, "pages": 3}),
		body["pagination"]
	);
}

#[tokio::test]
async fn should_fall_back_to_defaults_for_invalid_list_parameters() {
	let client = connected_server(Environment::Development).await;

	let response = client
		.get("/api/messages?page=zero&limit=-5&sortBy=nonsense&sortOrder=sideways")
		.send()
		.await
		.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::OK, status);
	assert_eq!(
		json!({"total": 0, "page": 1, "limit": 20, "pages": 0}),
		body["pagination"]
	);
}

#[tokio::test]
async fn should_report_timeout_with_details_in_development() {
	let client = stalled_server(Environment::Development, Duration::from_millis(100)).await;

	let response = client.get("/api/messages").send().await.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
	assert_eq!(
		json!({
			"success": false,
			"error": "Failed to retrieve messages",
			"details": "Database query timed out after 100ms",
		}),
		body
	);
}

#[tokio::test]
async fn should_hide_details_in_production() {
	let client = stalled_server(Environment::Production, Duration::from_millis(100)).await;

	let response = client.get("/api/messages").send().await.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
	assert_eq!(
		json!({"success": false, "error": "Failed to retrieve messages"}),
		body
	);
}

#[tokio::test]
async fn should_fail_while_database_is_disconnected() {
	let client = disconnected_server(Environment::Development).await;

	let response = client
		.post("/api/messages")
		.json(&json!({"sender": "alice", "content": "hello"}))
		.send()
		.await
		.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, status);
	assert_eq!(json!("Failed to send message"), body["error"]);
	assert_eq!(json!("Connection error: Database is not connected"), body["details"]);
}

#[tokio::test]
async fn should_use_first_of_repeated_list_parameters() {
	let client = connected_server(Environment::Development).await;
	for number in 0..3 {
		create_message(&client, "alice", &format!("message {number}")).await;
	}

	let response = client
		.get("/api/messages?page=2&page=3&limit=1&limit=50&sortOrder=asc")
		.send()
		.await
		.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::OK, status);
	assert_eq!(json!("message 1"), body["data"][0]["content"]);
	assert_eq!(
		json!({"total": 3, "page": 2, "limit": 1, "pages": 3}),
		body["pagination"]
	);
}

#[tokio::test]
async fn should_tolerate_garbage_query_string() {
	let client = connected_server(Environment::Development).await;

	let response = client
		.get("/api/messages?page=%zz&&=&limit&sender=%FF%FE")
		.send()
		.await
		.expect("Failed to send request");
	let (status, body) = json_response(response).await;

	assert_eq!(StatusCode::OK, status);
	assert_eq!(json!(true), body["success"]);
	assert_eq!(json!(1), body["pagination"]["page"]);
	assert_eq!(json!(20), body["pagination"]["limit"]);
}

#[tokio::test]
async fn should_reject_undecodable_message_id_with_envelope() {
	let client = connected_server(Environment::Development).await;

	for request in [
		client.get("/api/messages/%FF"),
		client.put("/api/messages/%FF").json(&json!({"content": "edited"})),
		client.delete("/api/messages/%FF"),
	] {
		let response = request.send().await.expect("Failed to send request");
		let (status, body) = json_response(response).await;

		assert_eq!(StatusCode::BAD_REQUEST, status);
		assert_eq!(json!(false), body["success"]);
		assert_eq!(json!("Invalid request path"), body["error"]);
	}
}

#[tokio::test]
async fn should_treat_update_without_body_as_missing_content() {
	let client = connected_server(Environment::Development).await;
	let message = create_message(&client, "alice", "first").await;
	let path = format!("/api/messages/{}", id_of(&message));

	for request in [client.put(&path), client.put(&path).body("content=edited")] {
		let response = request.send().await.expect("Failed to send request");
		let (status, body) = json_response(response).await;

		assert_eq!(StatusCode::BAD_REQUEST, status);
		assert_eq!(
			json!({"success": false, "error": "Content is required for update"}),
			body
		);
	}
}
