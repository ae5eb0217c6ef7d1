use axum::Json;
use serde_json::{Value, json};

/// Overview of the API served at the root path.
pub async fn api_docs() -> Json<Value> {
	Json(json!({
		"message": "Message Board API Server",
		"version": env!("CARGO_PKG_VERSION"),
		"status": {
			"health": "/api/health",
		},
		"documentation": {
			"messages": {
				"collection": {
					"get": {
						"endpoint": "/api/messages",
						"description": "Get all messages",
						"parameters": {
							"page": "Page number for pagination (default: 1)",
							"limit": "Number of messages per page (default: 20)",
							"sortBy": "Field to sort by: timestamp, updatedAt, sender, content or id (default: timestamp)",
							"sortOrder": "Sort order: asc or desc (default: desc)",
							"sender": "Filter by sender name",
						},
					},
					"post": {
						"endpoint": "/api/messages",
						"description": "Create a new message",
						"body": {
							"sender": "Name of the message sender (required)",
							"content": "Message content (required)",
						},
					},
				},
				"singleItem": {
					"get": {
						"endpoint": "/api/messages/{id}",
						"description": "Get a single message by ID",
					},
					"put": {
						"endpoint": "/api/messages/{id}",
						"description": "Update a message",
						"body": {
							"content": "New message content (required)",
						},
					},
					"delete": {
						"endpoint": "/api/messages/{id}",
						"description": "Delete a message",
					},
				},
			},
		},
		"frontend": "/app",
	}))
}
