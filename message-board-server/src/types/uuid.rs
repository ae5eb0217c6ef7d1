use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::{Database, Decode, Encode};
use std::str::FromStr;

/// Identifier of a stored record.
///
/// Stored as hyphenated text on every backend so that the column stays readable
/// and comparable with plain SQL.
#[derive(
	derive_more::From,
	derive_more::Into,
	derive_more::Deref,
	derive_more::Display,
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Hash,
	Serialize,
	Deserialize,
)]
#[serde(transparent)]
pub struct Uuid(uuid::Uuid);

impl Uuid {
	pub fn new_v4() -> Self {
		Self(uuid::Uuid::new_v4())
	}
}

impl FromStr for Uuid {
	type Err = uuid::Error;

	fn from_str(text: &str) -> Result<Self, Self::Err> {
		uuid::Uuid::parse_str(text).map(Uuid)
	}
}

impl<'r, Db> Decode<'r, Db> for Uuid
where
	Db: Database,
	String: Decode<'r, Db>,
{
	fn decode(value: <Db as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
		let text = String::decode(value)?;
		Ok(text.parse()?)
	}
}

impl<'q, Db> Encode<'q, Db> for Uuid
where
	Db: Database,
	String: Encode<'q, Db>,
{
	fn encode_by_ref(&self, buffer: &mut <Db as Database>::ArgumentBuffer<'q>) -> Result<IsNull, BoxDynError> {
		self.0.hyphenated().to_string().encode_by_ref(buffer)
	}
}

impl<Db> sqlx::Type<Db> for Uuid
where
	Db: Database,
	String: sqlx::Type<Db>,
{
	fn type_info() -> Db::TypeInfo {
		String::type_info()
	}

	fn compatible(type_info: &Db::TypeInfo) -> bool {
		String::compatible(type_info)
	}
}

impl From<Uuid> for libsql::Value {
	fn from(Uuid(uuid): Uuid) -> libsql::Value {
		libsql::Value::Text(uuid.hyphenated().to_string())
	}
}

impl TryFrom<libsql::Value> for Uuid {
	type Error = anyhow::Error;

	fn try_from(value: libsql::Value) -> anyhow::Result<Self> {
		let libsql::Value::Text(text) = value else {
			return Err(anyhow!("Expected text value"));
		};

		text.parse().context("Failed to parse UUID")
	}
}
