//! Self-hosted Swagger UI.
//!
//! The Swagger UI distribution is compiled into the crate. [`handler`] returns
//! a file server over it whose `index.html` points at the caller's API
//! specification instead of the upstream petstore example; every other asset
//! is served untouched.
//!
//! # Example
//!
//! ```rust
//! use apidocs_ui::Handler;
//! use http::{Request, StatusCode};
//!
//! let docs = apidocs_ui::handler("https://example.com/api/openapi.json");
//!
//! let resp = docs.handle(&Request::get("/index.html").body(()).unwrap());
//! assert_eq!(resp.status(), StatusCode::OK);
//! let page = std::str::from_utf8(resp.body()).unwrap();
//! assert!(page.contains(r#"url: "https://example.com/api/openapi.json""#));
//! ```
//!
//! The bundled assets are refreshed with the `apidocs-update` tool.

mod assemble;
mod error;
mod template;

pub use assemble::{
    asset_version, assets, build, handler, render_entry_page, try_build, SwaggerUi, ENTRY_PAGE,
    SPEC_URL_FIELD,
};
pub use error::{BuildError, TemplateError};
pub use template::Template;

pub use apidocs_http::{Handler, StripPrefix};
