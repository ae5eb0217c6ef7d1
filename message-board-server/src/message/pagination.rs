use crate::message::model::Message;
use serde::Serialize;
use typed_builder::TypedBuilder;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 20;

/// Field a message listing is ordered by.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortField {
	#[default]
	CreatedAt,
	UpdatedAt,
	Sender,
	Content,
	Id,
}

impl SortField {
	/// Unknown field names fall back to the creation time.
	pub fn parse(text: Option<&str>) -> Self {
		use SortField::*;
		match text.map(str::trim) {
			Some("updatedAt") => UpdatedAt,
			Some("sender") => Sender,
			Some("content") => Content,
			Some("id" | "_id") => Id,
			_ => CreatedAt,
		}
	}

	pub fn column(self) -> &'static str {
		use SortField::*;
		match self {
			CreatedAt => "created_at",
			UpdatedAt => "updated_at",
			Sender => "sender",
			Content => "content",
			Id => "id",
		}
	}
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
	Ascending,
	#[default]
	Descending,
}

impl SortOrder {
	/// Only `asc` selects ascending order.
	pub fn parse(text: Option<&str>) -> Self {
		match text {
			Some("asc") => Self::Ascending,
			_ => Self::Descending,
		}
	}

	pub fn keyword(self) -> &'static str {
		match self {
			Self::Ascending => "ASC",
			Self::Descending => "DESC",
		}
	}
}

#[derive(TypedBuilder, Clone, Debug, PartialEq, Eq)]
pub struct ListParameters {
	#[builder(default = DEFAULT_PAGE)]
	pub page: u32,
	#[builder(default = DEFAULT_LIMIT)]
	pub limit: u32,
	#[builder(default)]
	pub sort_by: SortField,
	#[builder(default)]
	pub sort_order: SortOrder,
	/// Exact match on the sender, `None` lists every sender.
	#[builder(default, setter(into, strip_option))]
	pub sender: Option<String>,
}

impl ListParameters {
	/// Coerces raw query values, anything unusable falls back to its default.
	pub fn parse(
		page: Option<&str>,
		limit: Option<&str>,
		sort_by: Option<&str>,
		sort_order: Option<&str>,
		sender: Option<&str>,
	) -> Self {
		Self {
			page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
			limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
			sort_by: SortField::parse(sort_by),
			sort_order: SortOrder::parse(sort_order),
			sender: sender.filter(|sender| !sender.is_empty()).map(ToOwned::to_owned),
		}
	}

	/// Number of records skipped before the requested page.
	pub fn offset(&self) -> u64 {
		u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
	}
}

impl Default for ListParameters {
	fn default() -> Self {
		Self::builder().build()
	}
}

fn parse_positive(text: Option<&str>) -> Option<u32> {
	text?.trim().parse::<u32>().ok().filter(|&number| number > 0)
}

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
	pub total: u64,
	pub page: u32,
	pub limit: u32,
	pub pages: u64,
}

impl Pagination {
	pub fn new(total: u64, parameters: &ListParameters) -> Self {
		Self {
			total,
			page: parameters.page,
			limit: parameters.limit,
			pages: total.div_ceil(u64::from(parameters.limit.max(1))),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessagePage {
	pub records: Vec<Message>,
	pub pagination: Pagination,
}
