use crate::database::error::DatabaseError;
use derive_more::Display;
use std::time::Duration;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum MessageError {
	#[error(transparent)]
	Validation(#[from] ValidationError),
	#[error("Message not found")]
	NotFound,
	#[error("Database query timed out after {0:?}")]
	QueryTimeout(Duration),
	#[error("{operation}: {source}")]
	Store {
		operation: Operation,
		#[source]
		source: DatabaseError,
	},
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
	#[error("Missing required fields")]
	MissingFields,
	#[error("Content is required for update")]
	MissingContent,
}

impl ValidationError {
	/// Fields the client has to send, reported alongside the error where it helps.
	pub fn required_fields(self) -> Option<&'static [&'static str]> {
		match self {
			Self::MissingFields => Some(&["sender", "content"]),
			Self::MissingContent => None,
		}
	}
}

/// Message service operation, displayed as the message clients get when it fails.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
	#[display("Failed to send message")]
	Create,
	#[display("Failed to retrieve messages")]
	List,
	#[display("Failed to retrieve message")]
	Get,
	#[display("Failed to update message")]
	Update,
	#[display("Failed to delete message")]
	Delete,
}

impl Operation {
	/// Wraps a store error into a [`MessageError::Store`] for this operation, logging it on the way.
	pub fn failed(self) -> impl FnOnce(DatabaseError) -> MessageError {
		move |source| {
			error!(operation = %self, error = %source, "Store operation failed");
			MessageError::Store {
				operation: self,
				source,
			}
		}
	}
}
