//! FileServer: answer GET and HEAD requests from a filesystem.

use std::io::Read;

use bytes::Bytes;
use http::header::{
    HeaderValue, ALLOW, CONTENT_LENGTH, CONTENT_TYPE, IF_MODIFIED_SINCE, LAST_MODIFIED,
};
use http::{HeaderMap, Method, Request, Response, StatusCode};

use apidocs_fs::{join, File, FileInfo, Fs};

use crate::handler::Handler;
use crate::{date, mime, path, response};

const INDEX_PAGE: &str = "index.html";

/// Serves the files of an [`Fs`] over HTTP.
///
/// The request path is cleaned and looked up in the filesystem. Directories
/// serve their `index.html`; there are no directory listings. The response
/// length is the size the file reports from `stat`.
///
/// # Example
///
/// ```rust
/// use apidocs_fs::MemFs;
/// use apidocs_http::{FileServer, Handler};
/// use http::{Request, StatusCode};
///
/// let fs = MemFs::new().with_file("hello.txt", "hi").unwrap();
/// let server = FileServer::new(fs);
///
/// let resp = server.handle(&Request::get("/hello.txt").body(()).unwrap());
/// assert_eq!(resp.status(), StatusCode::OK);
/// assert_eq!(resp.body().as_ref(), b"hi");
/// ```
pub struct FileServer<F> {
    fs: F,
}

impl<F: Fs> FileServer<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// The filesystem being served.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn into_inner(self) -> F {
        self.fs
    }

    fn serve(
        &self,
        method: &Method,
        raw_path: &str,
        query: Option<&str>,
        headers: &HeaderMap,
    ) -> Response<Bytes> {
        let Some(decoded) = path::decode(raw_path) else {
            return response::error(StatusCode::BAD_REQUEST);
        };
        let url_path = if decoded.starts_with('/') {
            decoded
        } else {
            format!("/{}", decoded)
        };
        let cleaned = path::clean(&url_path);
        let name = path::to_fs_name(&cleaned);

        let file = match self.fs.open(name) {
            Ok(file) => file,
            Err(e) => return response::from_fs_error(&e),
        };
        let info = match file.stat() {
            Ok(info) => info,
            Err(e) => return response::from_fs_error(&e),
        };

        if info.is_dir() {
            if !url_path.ends_with('/') {
                return local_redirect(&format!("{}/", path::last_element(&url_path)), query);
            }
            let index_name = join(name, INDEX_PAGE);
            let index = match self.fs.open(&index_name) {
                Ok(index) => index,
                Err(e) => return response::from_fs_error(&e),
            };
            let index_info = match index.stat() {
                Ok(info) if !info.is_dir() => info,
                Ok(_) => return response::not_found(),
                Err(e) => return response::from_fs_error(&e),
            };
            return serve_content(method, headers, &index_name, index, &index_info);
        }

        if url_path.ends_with('/') {
            return local_redirect(&format!("../{}", path::last_element(&url_path)), query);
        }

        serve_content(method, headers, name, file, &info)
    }
}

impl<F: Fs> Handler for FileServer<F> {
    fn handle<B>(&self, req: &Request<B>) -> Response<Bytes> {
        let method = req.method();
        tracing::trace!(%method, path = req.uri().path(), "file server request");

        if method != Method::GET && method != Method::HEAD {
            let mut resp = response::error(StatusCode::METHOD_NOT_ALLOWED);
            resp.headers_mut()
                .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
            return resp;
        }

        self.serve(method, req.uri().path(), req.uri().query(), req.headers())
    }
}

fn local_redirect(target: &str, query: Option<&str>) -> Response<Bytes> {
    match query {
        Some(q) => response::redirect(&format!("{}?{}", target, q)),
        None => response::redirect(target),
    }
}

fn not_modified(headers: &HeaderMap, modified: Option<i64>) -> bool {
    let (Some(modified), Some(since)) = (
        modified,
        headers
            .get(IF_MODIFIED_SINCE)
            .and_then(|v| v.to_str().ok())
            .and_then(date::parse),
    ) else {
        return false;
    };
    modified <= since
}

fn serve_content(
    method: &Method,
    headers: &HeaderMap,
    name: &str,
    mut file: Box<dyn File>,
    info: &FileInfo,
) -> Response<Bytes> {
    let modified = info.modified().and_then(date::unix_seconds);
    let last_modified = info
        .modified()
        .filter(|_| modified.is_some())
        .and_then(|t| HeaderValue::from_str(&date::format(t)).ok());

    if not_modified(headers, modified) {
        let mut resp = Response::new(Bytes::new());
        *resp.status_mut() = StatusCode::NOT_MODIFIED;
        if let Some(value) = last_modified {
            resp.headers_mut().insert(LAST_MODIFIED, value);
        }
        return resp;
    }

    let size = info.size();
    let mut body = Vec::with_capacity(usize::try_from(size).unwrap_or(0));
    if let Err(e) = file.by_ref().take(size).read_to_end(&mut body) {
        tracing::warn!(path = name, error = %e, "reading file failed");
        return response::error(StatusCode::INTERNAL_SERVER_ERROR);
    }
    if (body.len() as u64) < size {
        tracing::warn!(
            path = name,
            expected = size,
            read = body.len(),
            "file shorter than its reported size"
        );
        return response::error(StatusCode::INTERNAL_SERVER_ERROR);
    }

    let content_type = mime::content_type(info.name(), &body);
    let body = if method == Method::HEAD {
        Bytes::new()
    } else {
        Bytes::from(body)
    };

    let mut resp = Response::new(body);
    let out = resp.headers_mut();
    out.insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    out.insert(CONTENT_LENGTH, HeaderValue::from(size));
    if let Some(value) = last_modified {
        out.insert(LAST_MODIFIED, value);
    }
    resp
}
