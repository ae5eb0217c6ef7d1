use anyhow::{Context, anyhow};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::{Database, Decode, Encode};

/// UTC point in time as persisted by the message store.
///
/// The text representation always carries nanoseconds and a `Z` suffix, so
/// lexical ordering of the column equals chronological ordering.
#[derive(
	derive_more::From,
	derive_more::Into,
	derive_more::Deref,
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	PartialOrd,
	Ord,
	Serialize,
	Deserialize,
)]
#[serde(transparent)]
pub struct DateTime(chrono::DateTime<Utc>);

impl DateTime {
	pub fn now() -> Self {
		Self(Utc::now())
	}

	fn to_storage_text(self) -> String {
		self.0.to_rfc3339_opts(SecondsFormat::Nanos, true)
	}

	fn from_storage_text(text: &str) -> Result<Self, chrono::ParseError> {
		chrono::DateTime::parse_from_rfc3339(text).map(|date_time| Self(date_time.with_timezone(&Utc)))
	}
}

impl<'r, Db> Decode<'r, Db> for DateTime
where
	Db: Database,
	String: Decode<'r, Db>,
{
	fn decode(value: <Db as Database>::ValueRef<'r>) -> Result<Self, BoxDynError> {
		let text = String::decode(value)?;
		Ok(Self::from_storage_text(&text)?)
	}
}

impl<'q, Db> Encode<'q, Db> for DateTime
where
	Db: Database,
	String: Encode<'q, Db>,
{
	fn encode_by_ref(&self, buffer: &mut <Db as Database>::ArgumentBuffer<'q>) -> Result<IsNull, BoxDynError> {
		self.to_storage_text().encode_by_ref(buffer)
	}
}

impl<Db> sqlx::Type<Db> for DateTime
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

impl From<DateTime> for libsql::Value {
	fn from(date_time: DateTime) -> libsql::Value {
		libsql::Value::Text(date_time.to_storage_text())
	}
}

impl TryFrom<libsql::Value> for DateTime {
	type Error = anyhow::Error;

	fn try_from(value: libsql::Value) -> anyhow::Result<Self> {
		let libsql::Value::Text(text) = value else {
			return Err(anyhow!("Expected text value"));
		};

		Self::from_storage_text(&text).context("Failed to parse DateTime")
	}
}
