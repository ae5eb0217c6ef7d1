use axum::http::HeaderValue;
use rust_embed::EmbeddedFile;
use std::fmt::{Display, Formatter};

/// Strong entity tag derived from the SHA-256 hash `rust-embed` computes for every bundled file.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct ETag {
	hash: [u8; 32],
}

impl PartialEq<HeaderValue> for ETag {
	fn eq(&self, header: &HeaderValue) -> bool {
		header
			.to_str()
			.is_ok_and(|header| header.split(',').any(|tag| tag.trim() == self.to_string() || tag.trim() == "*"))
	}
}

impl From<&EmbeddedFile> for ETag {
	fn from(file: &EmbeddedFile) -> Self {
		Self {
			hash: file.metadata.sha256_hash(),
		}
	}
}

impl Display for ETag {
	fn fmt(&self, formatter: &mut Formatter) -> std::fmt::Result {
		write!(formatter, "\"{}\"", hex::encode(self.hash))
	}
}
