use axum::http::{header, HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use rust_embed::Embed;
use std::fmt::Write;

#[derive(Embed)]
#[folder = "../../frontend/"]
struct FrontendAssets;

const INDEX: &str = "index.html";

/// Serve the embedded timeline page and its script. Unknown paths fall back
/// to the page itself.
///
/// Asset names carry no content hash, so browsers revalidate on every load
/// and get a 304 while the ETag still matches.
pub async fn static_handler(uri: Uri, headers: HeaderMap) -> Response {
    let path = uri.path().trim_start_matches('/');
    let (name, file) = match FrontendAssets::get(path) {
        Some(file) if !path.is_empty() => (path, file),
        _ => match FrontendAssets::get(INDEX) {
            Some(file) => (INDEX, file),
            None => return (StatusCode::NOT_FOUND, "frontend not found").into_response(),
        },
    };

    let etag = etag_for(&file.metadata.sha256_hash());
    let cache_headers = [
        (header::ETAG, etag.clone()),
        (header::CACHE_CONTROL, "no-cache".to_string()),
    ];

    let fresh = headers
        .get(header::IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.split(',').any(|tag| tag.trim() == etag));
    if fresh {
        return (StatusCode::NOT_MODIFIED, cache_headers).into_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, content_type(name))],
        cache_headers,
        file.data.into_owned(),
    )
        .into_response()
}

fn content_type(name: &str) -> HeaderValue {
    let mime = match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("js" | "mjs") => "text/javascript; charset=utf-8".to_string(),
        Some("html") => "text/html; charset=utf-8".to_string(),
        _ => mime_guess::from_path(name)
            .first_or_octet_stream()
            .to_string(),
    };
    HeaderValue::from_str(&mime).unwrap_or(HeaderValue::from_static("application/octet-stream"))
}

fn etag_for(hash: &[u8]) -> String {
    let mut tag = String::with_capacity(hash.len() * 2 + 2);
    tag.push('"');
    for byte in hash {
        let _ = write!(tag, "{byte:02x}");
    }
    tag.push('"');
    tag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripts_are_text_javascript() {
        assert_eq!(content_type("app.js"), "text/javascript; charset=utf-8");
        assert_eq!(content_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(content_type("logo.png"), "image/png");
    }

    #[test]
    fn etag_is_quoted_hex() {
        assert_eq!(etag_for(&[0x0a, 0xff]), "\"0aff\"");
    }

    #[tokio::test]
    async fn unknown_path_falls_back_to_page() {
        let response = static_handler(Uri::from_static("/timeline/deep"), HeaderMap::new()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
    }

    #[tokio::test]
    async fn matching_etag_is_not_modified() {
        let first = static_handler(Uri::from_static("/app.js"), HeaderMap::new()).await;
        let etag = first.headers()[header::ETAG].clone();

        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, etag);
        let second = static_handler(Uri::from_static("/app.js"), headers).await;
        assert_eq!(second.status(), StatusCode::NOT_MODIFIED);
    }
}
