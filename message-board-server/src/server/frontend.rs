use crate::server::frontend::etag::ETag;
use crate::server::rest_api::error::ApiErrorResponse;
use axum::extract::Path;
use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE, ETAG, IF_NONE_MATCH};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use mime_guess::MimeGuess;
use rust_embed::{EmbeddedFile, RustEmbed};

mod etag;

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/public"]
struct FrontendBundle;

pub async fn index(headers: HeaderMap) -> Response {
	serve("", &headers)
}

pub async fn file(Path(path): Path<String>, headers: HeaderMap) -> Response {
	serve(&path, &headers)
}

fn serve(path: &str, request_headers: &HeaderMap) -> Response {
	let Some((path, file)) = bundled_file_falling_back_to_index_html(path) else {
		return ApiErrorResponse::route_not_found().into_response();
	};

	let etag = ETag::from(&file);
	if request_headers
		.get(IF_NONE_MATCH)
		.is_some_and(|if_none_match| etag == *if_none_match)
	{
		return (StatusCode::NOT_MODIFIED, [(ETAG, etag.to_string())]).into_response();
	}

	let mime = MimeGuess::from_path(&path).first_or_octet_stream();
	(
		[
			(CONTENT_TYPE, mime.to_string()),
			(ETAG, etag.to_string()),
			// Browsers have to revalidate with If-None-Match instead of relying on a maximum age.
			(CACHE_CONTROL, "must-revalidate".to_string()),
		],
		file.data,
	)
		.into_response()
}

fn bundled_file_falling_back_to_index_html(path: &str) -> Option<(String, EmbeddedFile)> {
	let path = normalize_path(path);
	let index_path = if path.is_empty() {
		"index.html".to_string()
	} else {
		format!("{path}/index.html")
	};

	[path.to_string(), index_path]
		.into_iter()
		.filter(|path| !path.is_empty())
		.find_map(|path| FrontendBundle::get(&path).map(|file| (path, file)))
}

fn normalize_path(path: &str) -> &str {
	path.trim_matches('/')
}
