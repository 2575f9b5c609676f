//! Canned responses.

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use http::{Response, StatusCode};

use apidocs_fs::FsError;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// Plain-text error page, e.g. `404 page not found`.
pub fn error(status: StatusCode) -> Response<Bytes> {
    let text = match status {
        StatusCode::NOT_FOUND => "404 page not found\n".to_string(),
        StatusCode::FORBIDDEN => "403 Forbidden\n".to_string(),
        StatusCode::INTERNAL_SERVER_ERROR => "500 Internal Server Error\n".to_string(),
        _ => format!(
            "{} {}\n",
            status.as_u16(),
            status.canonical_reason().unwrap_or("Error")
        ),
    };
    let body = Bytes::from(text);

    let mut resp = Response::new(body.clone());
    *resp.status_mut() = status;
    let headers = resp.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    resp
}

pub fn not_found() -> Response<Bytes> {
    error(StatusCode::NOT_FOUND)
}

/// Map a lookup failure to a client-facing status.
pub fn from_fs_error(err: &FsError) -> Response<Bytes> {
    match err {
        FsError::NotFound { .. } => not_found(),
        FsError::InvalidPath { .. } => error(StatusCode::BAD_REQUEST),
        FsError::Io { source, .. } if source.kind() == std::io::ErrorKind::PermissionDenied => {
            error(StatusCode::FORBIDDEN)
        }
        FsError::Io { .. } => {
            tracing::warn!(error = %err, "file server lookup failed");
            error(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// `301` to a location relative to the request path.
pub fn redirect(location: &str) -> Response<Bytes> {
    let Ok(value) = HeaderValue::from_str(location) else {
        return error(StatusCode::BAD_REQUEST);
    };
    let mut resp = Response::new(Bytes::new());
    *resp.status_mut() = StatusCode::MOVED_PERMANENTLY;
    resp.headers_mut().insert(LOCATION, value);
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_page() {
        let resp = not_found();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.body().as_ref(), b"404 page not found\n");
        assert_eq!(resp.headers()[CONTENT_TYPE], TEXT_PLAIN);
        assert_eq!(resp.headers()[CONTENT_LENGTH], "19");
    }

    #[test]
    fn other_status_pages() {
        let resp = error(StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.body().as_ref(), b"405 Method Not Allowed\n");
    }

    #[test]
    fn fs_errors_map_to_statuses() {
        let denied = FsError::io(
            "open",
            "secret",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope"),
        );
        assert_eq!(from_fs_error(&denied).status(), StatusCode::FORBIDDEN);
        assert_eq!(
            from_fs_error(&FsError::not_found("x")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            from_fs_error(&FsError::invalid_path("/x")).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn redirect_sets_location() {
        let resp = redirect("css/");
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "css/");
    }
}
