//! The request handler capability and prefix mounting.

use bytes::Bytes;
use http::{Request, Response, StatusCode, Uri};

use crate::response;

/// Turn a request into a response.
///
/// Implementations never panic and never block on I/O beyond in-memory reads,
/// so they can be called directly from any server's request path.
pub trait Handler: Send + Sync {
    fn handle<B>(&self, req: &Request<B>) -> Response<Bytes>;
}

impl<H: Handler + ?Sized> Handler for &H {
    fn handle<B>(&self, req: &Request<B>) -> Response<Bytes> {
        (**self).handle(req)
    }
}

impl<H: Handler + ?Sized> Handler for std::sync::Arc<H> {
    fn handle<B>(&self, req: &Request<B>) -> Response<Bytes> {
        self.as_ref().handle(req)
    }
}

/// Serve a handler below a route prefix.
///
/// `StripPrefix::new("/docs", h)` hands `/docs/index.html` to `h` as
/// `/index.html`. Requests outside the prefix get `404`.
pub struct StripPrefix<H> {
    prefix: String,
    inner: H,
}

impl<H: Handler> StripPrefix<H> {
    pub fn new(prefix: impl Into<String>, inner: H) -> Self {
        let prefix = prefix.into().trim_end_matches('/').to_string();
        Self { prefix, inner }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<H: Handler> Handler for StripPrefix<H> {
    fn handle<B>(&self, req: &Request<B>) -> Response<Bytes> {
        let Some(rest) = req.uri().path().strip_prefix(self.prefix.as_str()) else {
            return response::not_found();
        };
        if !rest.is_empty() && !rest.starts_with('/') {
            return response::not_found();
        }

        let mut target = if rest.is_empty() {
            "/".to_string()
        } else {
            rest.to_string()
        };
        if let Some(query) = req.uri().query() {
            target.push('?');
            target.push_str(query);
        }
        let uri = match target.parse::<Uri>() {
            Ok(uri) => uri,
            Err(_) => return response::error(StatusCode::BAD_REQUEST),
        };

        let mut inner = Request::new(());
        *inner.method_mut() = req.method().clone();
        *inner.uri_mut() = uri;
        *inner.version_mut() = req.version();
        *inner.headers_mut() = req.headers().clone();
        self.inner.handle(&inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl Handler for Echo {
        fn handle<B>(&self, req: &Request<B>) -> Response<Bytes> {
            let target = req
                .uri()
                .path_and_query()
                .map(|pq| pq.as_str().to_string())
                .unwrap_or_default();
            Response::new(Bytes::from(target))
        }
    }

    fn get(uri: &str) -> Request<()> {
        Request::get(uri).body(()).unwrap()
    }

    fn body(resp: Response<Bytes>) -> String {
        String::from_utf8(resp.into_body().to_vec()).unwrap()
    }

    #[test]
    fn strips_prefix_and_keeps_query() {
        let h = StripPrefix::new("/docs/", Echo);
        assert_eq!(h.prefix(), "/docs");
        assert_eq!(body(h.handle(&get("/docs/index.html?x=1"))), "/index.html?x=1");
        assert_eq!(body(h.handle(&get("/docs"))), "/");
    }

    #[test]
    fn outside_prefix_is_not_found() {
        let h = StripPrefix::new("/docs", Echo);
        assert_eq!(h.handle(&get("/api/x")).status(), StatusCode::NOT_FOUND);
        assert_eq!(h.handle(&get("/docsx/y")).status(), StatusCode::NOT_FOUND);
    }
}
