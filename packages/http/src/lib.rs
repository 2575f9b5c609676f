//! # apidocs-http
//!
//! Static file serving over an [`apidocs_fs::Fs`].
//!
//! ## Handlers
//!
//! ### FileServer
//!
//! Answers `GET` and `HEAD` with the file at the cleaned request path:
//!
//! ```ignore
//! use apidocs_http::{FileServer, Handler};
//!
//! let server = FileServer::new(fs);
//! let response = server.handle(&request);
//! ```
//!
//! ### StripPrefix
//!
//! Mounts another handler below a route prefix:
//!
//! ```ignore
//! use apidocs_http::{FileServer, StripPrefix};
//!
//! let docs = StripPrefix::new("/docs", FileServer::new(fs));
//! ```
//!
//! Handlers work on `http::Request` and return `http::Response<Bytes>`, so
//! they slot into any server that speaks the `http` crate types.

mod date;
mod file_server;
mod handler;
mod mime;
mod path;
mod response;

pub use bytes::Bytes;
pub use file_server::FileServer;
pub use handler::{Handler, StripPrefix};
pub use mime::content_type;
